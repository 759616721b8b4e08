mod action;
mod container_name;
mod container_state;

pub use action::{Action, Completion};
pub use container_name::{ContainerName, ContainerNameError};
pub use container_state::ContainerState;
