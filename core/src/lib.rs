pub mod agent;
pub mod calc;
pub mod config;
pub mod error;
pub mod guide;
pub mod llm;
pub mod logger;
pub mod output;
pub mod util;

// Re-exports for convenience
pub use agent::core::Agent;
pub use calc::evaluate;
pub use config::Config;
pub use error::{Result, TutorError};
