//! Site compiler server — HTTP and CLI access to the static site compiler.

pub mod config;
pub mod service;
pub mod transport;
pub mod types;

pub use config::{resolve_graph_path, resolve_listen_addr, resolve_output_dir};
pub use service::CompileService;
pub use transport::HttpTransport;
