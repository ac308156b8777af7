pub mod api_server;
pub mod router;

pub use api_server::{run_server, AppState};
