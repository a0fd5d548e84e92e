//! Infrastructure layer - Store backends, cache, classifier adapters and services

pub mod cache;
pub mod classifier;
pub mod logging;
pub mod observability;
pub mod services;
pub mod store;
