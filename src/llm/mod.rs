mod llm_client;
mod message;
mod prompt;
pub mod providers;

pub use llm_client::*;
pub use message::*;
pub use prompt::*;
