//! API layer - HTTP endpoints and middleware

pub mod admin;
pub mod chat;
pub mod health;
pub mod middleware;
pub mod questions;
pub mod router;
pub mod state;
pub mod types;

pub use router::create_router;
pub use state::{AppState, ServiceInfo};
