//! Response payloads returned by the compile endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use site_compiler::{CompileReport, CompileWarning};

/// Success message returned after a compilation.
pub const COMPILED_MESSAGE: &str = "Website compiled successfully";

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

/// One compiled page, as reported to the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub page_id: String,
    pub title: String,
    pub file: String,
    pub widget_count: usize,
}

/// Success response body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileResponse {
    pub message: String,
    pub website_id: String,
    pub pages: Vec<PageSummary>,
    pub entry_point: Option<String>,
    pub warnings: Vec<CompileWarning>,
    pub compiled_at: DateTime<Utc>,
}

impl CompileResponse {
    pub fn from_report(report: &CompileReport) -> Self {
        let file_name = |path: &std::path::Path| {
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        };

        Self {
            message: COMPILED_MESSAGE.to_string(),
            website_id: report.website_id.clone(),
            pages: report
                .pages
                .iter()
                .map(|p| PageSummary {
                    page_id: p.page_id.clone(),
                    title: p.title.clone(),
                    file: file_name(p.path.as_path()),
                    widget_count: p.widget_count,
                })
                .collect(),
            entry_point: report.entry_point.as_deref().map(file_name),
            warnings: report.warnings.clone(),
            compiled_at: Utc::now(),
        }
    }
}
