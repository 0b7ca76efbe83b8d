//! Site compiler — turns a stored graph of websites, pages, and positioned
//! widgets into static, self-contained HTML documents.

pub mod compile;
pub mod decode;
pub mod document;
pub mod output;
pub mod render;
pub mod source;
pub mod types;

pub use compile::{render_page, CompileOptions, Compiler, RenderedPage};
pub use decode::{attribute_issues, decode_widget};
pub use document::{build_document, DEFAULT_PAGE_TITLE};
pub use output::{SiteWriter, ENTRY_POINT_FILE};
pub use render::render_widget;
pub use source::{GraphDocument, GraphSource, InMemoryGraph, JsonGraphFile};
pub use types::*;
