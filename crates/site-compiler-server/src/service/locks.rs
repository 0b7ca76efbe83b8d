//! Per-website locks so compilations of the same site never interleave.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

/// Registry of one lock per website id, created on first use.
#[derive(Default)]
pub struct WebsiteLocks {
    locks: HashMap<String, Arc<Mutex<()>>>,
}

impl WebsiteLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the lock guarding `website_id`'s output directory.
    pub fn get_or_create(&mut self, website_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(website_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Number of websites seen so far.
    pub fn count(&self) -> usize {
        self.locks.len()
    }
}
