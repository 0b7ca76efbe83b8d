//! Transport layer for compile requests.

pub mod http;

pub use http::HttpTransport;
