//! Core data types for stored site graphs and compilation results.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A website as exported by the graph store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteRecord {
    pub id: String,
    #[serde(default)]
    pub home_page_id: Option<String>,
    #[serde(default)]
    pub pages: Vec<PageRecord>,
}

/// A page and the widgets that belong to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub widgets: Vec<WidgetRecord>,
}

/// A widget exactly as stored: attribute blobs are still JSON-encoded strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetRecord {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub widget_type: String,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub size: String,
    /// Stacking order within the page. Missing means 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
}

/// Result of the single graph read performed per compilation.
#[derive(Debug, Clone)]
pub struct WebsiteGraph {
    pub website_id: String,
    pub pages: Vec<PageRecord>,
}

/// Top-left corner of a widget, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Default for Position {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

/// Widget dimensions, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Default for Size {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
        }
    }
}

/// Type-specific widget payload (`fontSize`, `imageUrl`, `color`, ...).
pub type WidgetData = serde_json::Map<String, serde_json::Value>;

/// The widget types the renderer knows how to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetKind {
    Text,
    Image,
    Shape,
    Unknown(String),
}

impl WidgetKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "text" => WidgetKind::Text,
            "image" => WidgetKind::Image,
            "shape" => WidgetKind::Shape,
            other => WidgetKind::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            WidgetKind::Text => "text",
            WidgetKind::Image => "image",
            WidgetKind::Shape => "shape",
            WidgetKind::Unknown(raw) => raw,
        }
    }
}

/// A widget whose attribute blobs have been decoded (or defaulted).
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedWidget {
    pub id: String,
    pub kind: WidgetKind,
    pub position: Position,
    pub size: Size,
    pub data: WidgetData,
    pub z_index: i64,
}

/// Whether stored strings are HTML-escaped before they reach the markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Escaping {
    #[default]
    Html,
    /// Interpolate stored strings verbatim.
    Raw,
}

/// One page document written during a compilation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledPage {
    pub page_id: String,
    pub title: String,
    pub path: PathBuf,
    pub widget_count: usize,
}

/// Non-fatal conditions noticed while compiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompileWarning {
    /// A widget whose type has no renderer; it produced no markup.
    SkippedWidget {
        page_id: String,
        widget_id: String,
        widget_type: String,
    },
    /// No page with the home page id was compiled, so there is no `index.html`.
    MissingHomePage { home_page_id: Option<String> },
}

impl std::fmt::Display for CompileWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileWarning::SkippedWidget {
                page_id,
                widget_id,
                widget_type,
            } => write!(
                f,
                "widget '{widget_id}' on page '{page_id}' has unsupported type '{widget_type}'"
            ),
            CompileWarning::MissingHomePage {
                home_page_id: Some(id),
            } => write!(f, "home page '{id}' was not compiled; no entry point written"),
            CompileWarning::MissingHomePage { home_page_id: None } => {
                write!(f, "no home page given; no entry point written")
            }
        }
    }
}

/// Summary of a finished compilation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileReport {
    pub website_id: String,
    pub output_dir: PathBuf,
    pub pages: Vec<CompiledPage>,
    pub entry_point: Option<PathBuf>,
    pub warnings: Vec<CompileWarning>,
}

/// Which widget attribute blob failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeField {
    Data,
    Position,
    Size,
}

impl std::fmt::Display for AttributeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            AttributeField::Data => "data",
            AttributeField::Position => "position",
            AttributeField::Size => "size",
        })
    }
}

/// A stored attribute blob that could not be decoded.
#[derive(thiserror::Error, Debug)]
#[error("Invalid widget {field}: {reason}")]
pub struct AttributeDecodeError {
    pub field: AttributeField,
    pub reason: String,
}

/// Errors that can occur while compiling a website.
#[derive(thiserror::Error, Debug)]
pub enum CompileError {
    #[error("No data found for website: {0}")]
    NotFound(String),

    #[error("Invalid {kind} id: {value:?}")]
    InvalidIdentifier { kind: &'static str, value: String },

    /// Stored graph data that cannot be compiled, such as a page id that is
    /// not a single path segment.
    #[error("Invalid stored data: {0}")]
    InvalidData(String),

    #[error("Graph source error: {0}")]
    Source(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type CompileResult<T> = Result<T, CompileError>;
