//! Assembly of complete, self-contained page documents.

use crate::render::escape;
use crate::types::Escaping;

/// Title used when a page has no name.
pub const DEFAULT_PAGE_TITLE: &str = "Untitled Page";

/// Stylesheet shared by every compiled page.
const PAGE_STYLE: &str = ".widget-container { position: absolute; }";

/// The title a page document will carry.
pub fn page_title(name: Option<&str>) -> &str {
    match name {
        Some(name) if !name.is_empty() => name,
        _ => DEFAULT_PAGE_TITLE,
    }
}

/// Build the HTML document for one page. Fragments keep the given order;
/// empty fragments are dropped.
pub fn build_document(title: Option<&str>, fragments: &[String], escaping: Escaping) -> String {
    let title = escape(page_title(title), escaping);

    let mut body = String::new();
    for fragment in fragments.iter().filter(|f| !f.is_empty()) {
        body.push_str("    ");
        body.push_str(fragment);
        body.push('\n');
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <style>
    {PAGE_STYLE}
  </style>
</head>
<body>
  <div style="width: 100%; height: 100%; position: relative; overflow: hidden;">
{body}  </div>
</body>
</html>
"#
    )
}
