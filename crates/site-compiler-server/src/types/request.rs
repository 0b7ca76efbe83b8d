//! Inbound request payloads.

use serde::{Deserialize, Serialize};

/// Body of `POST /compile`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileRequest {
    pub website_id: String,
    #[serde(default)]
    pub home_page_id: Option<String>,
}
