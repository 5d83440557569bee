mod app;
mod config;
mod engine;
mod http;
mod validation;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use engine::{EngineError, HookError, TransportError};
pub use http::HttpError;
pub use validation::ValidationError;
