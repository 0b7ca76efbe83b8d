//! Compilation service and per-website locking.

pub mod compile;
pub mod locks;

pub use compile::CompileService;
pub use locks::WebsiteLocks;
