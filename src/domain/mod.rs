mod container;
pub mod value_objects;

pub use container::{ContainerInfo, ContainerMap, EngineContainer};
pub use value_objects::{Action, Completion, ContainerName, ContainerNameError, ContainerState};
