//! Web layer for the train status board.
//!
//! Serves the status card as HTML and JSON.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
pub use templates::*;
