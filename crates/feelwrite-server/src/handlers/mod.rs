//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod audit;
pub mod completion;
pub mod emotions;
pub mod health;
pub mod journal;
pub mod prompts;
pub mod summary;
pub mod users;

// Re-export all handlers for use in router
pub use audit::*;
pub use completion::*;
pub use emotions::*;
pub use health::*;
pub use journal::*;
pub use prompts::*;
pub use summary::*;
pub use users::*;
