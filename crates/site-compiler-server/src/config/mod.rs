//! Configuration loading and resolution.

use std::path::PathBuf;

/// Default HTTP listen address.
pub const DEFAULT_ADDR: &str = "127.0.0.1:5000";

/// Default graph export location, relative to the working directory.
pub const DEFAULT_GRAPH_FILE: &str = "site-graph.json";

/// Default root for compiled websites, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "compiled-websites";

/// Resolve the graph export path: flag, then `SITE_GRAPH`, then the default.
pub fn resolve_graph_path(explicit: Option<&str>) -> PathBuf {
    resolve(explicit, "SITE_GRAPH", DEFAULT_GRAPH_FILE).into()
}

/// Resolve the output root: flag, then `SITE_OUTPUT_DIR`, then the default.
pub fn resolve_output_dir(explicit: Option<&str>) -> PathBuf {
    resolve(explicit, "SITE_OUTPUT_DIR", DEFAULT_OUTPUT_DIR).into()
}

/// Resolve the listen address: flag, then `SITE_COMPILER_ADDR`, then the default.
pub fn resolve_listen_addr(explicit: Option<&str>) -> String {
    resolve(explicit, "SITE_COMPILER_ADDR", DEFAULT_ADDR)
}

fn resolve(explicit: Option<&str>, env_var: &str, default: &str) -> String {
    if let Some(value) = explicit {
        return value.to_string();
    }

    match std::env::var(env_var) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}
