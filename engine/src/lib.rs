mod client;
mod config;
mod error;
mod process;
mod session;

pub use client::EngineClient;
pub use config::EngineConfig;
pub use error::EngineError;
pub use session::SessionState;
