//! Core of the client: session lifecycle, API gateway and typed resources

pub mod api;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod session;

pub use config::Config;
pub use error::ApiError;
pub use models::*;
