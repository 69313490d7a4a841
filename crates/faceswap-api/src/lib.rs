//! Face swap HTTP API
//!
//! Serves the swap service routes and the stateless function routes from one
//! router. Both adapters call into `faceswap-services`.

mod api_doc;
mod handlers;
mod middleware;
mod telemetry;
mod utils;

pub mod auth;
pub mod error;
pub mod setup;
pub mod state;

pub use error::ErrorResponse;
pub use setup::routes::setup_routes;
pub use state::AppState;
