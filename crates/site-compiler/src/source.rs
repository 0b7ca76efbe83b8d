//! Read access to the stored website graph.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::{CompileError, CompileResult, PageRecord, WebsiteGraph, WebsiteRecord};

/// Fetches a website together with its pages and their widgets.
///
/// Implementations perform one read per call. A website that is unknown, or
/// that has no pages, is reported as `Ok(None)`.
pub trait GraphSource: Send + Sync {
    fn fetch_website(&self, website_id: &str) -> CompileResult<Option<WebsiteGraph>>;
}

/// A whole graph export: every website with its pages and widgets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub websites: Vec<WebsiteRecord>,
}

impl GraphDocument {
    pub fn website(&self, website_id: &str) -> Option<&WebsiteRecord> {
        self.websites.iter().find(|w| w.id == website_id)
    }

    fn graph_for(&self, website_id: &str) -> Option<WebsiteGraph> {
        let website = self.website(website_id)?;
        graph_from_pages(website_id, &website.pages)
    }
}

fn graph_from_pages(website_id: &str, pages: &[PageRecord]) -> Option<WebsiteGraph> {
    if pages.is_empty() {
        return None;
    }
    Some(WebsiteGraph {
        website_id: website_id.to_string(),
        pages: pages.to_vec(),
    })
}

/// Graph held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGraph {
    document: GraphDocument,
}

impl InMemoryGraph {
    pub fn new(websites: Vec<WebsiteRecord>) -> Self {
        Self {
            document: GraphDocument { websites },
        }
    }
}

impl GraphSource for InMemoryGraph {
    fn fetch_website(&self, website_id: &str) -> CompileResult<Option<WebsiteGraph>> {
        Ok(self.document.graph_for(website_id))
    }
}

/// Graph export stored as a JSON file, re-read on every fetch.
#[derive(Debug, Clone)]
pub struct JsonGraphFile {
    path: PathBuf,
}

impl JsonGraphFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read and parse the whole export.
    pub fn load(&self) -> CompileResult<GraphDocument> {
        let bytes = std::fs::read(&self.path).map_err(|e| {
            CompileError::Source(format!("Failed to read graph file {}: {e}", self.path.display()))
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            CompileError::Source(format!("Failed to parse graph file {}: {e}", self.path.display()))
        })
    }
}

impl GraphSource for JsonGraphFile {
    fn fetch_website(&self, website_id: &str) -> CompileResult<Option<WebsiteGraph>> {
        let document = self.load()?;
        tracing::debug!(
            "Loaded graph file {} ({} websites)",
            self.path.display(),
            document.websites.len()
        );
        Ok(document.graph_for(website_id))
    }
}
