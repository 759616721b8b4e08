pub mod embedded_assets;
pub mod error;
pub mod index;
pub mod lifecycle;
pub mod router;
pub mod server;
pub mod theme;

pub use router::{AppState, create_router};
pub use server::Server;
