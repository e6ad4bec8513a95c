pub mod cache;
pub mod chat;
pub mod config;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod state;
pub mod tracing;
pub mod translation;

pub use config::ApiConfig;
pub use state::ApiState;
