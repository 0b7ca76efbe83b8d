//! Compilation of a stored website graph into a directory of static pages.

use std::path::PathBuf;
use std::sync::Arc;

use crate::decode::decode_widget;
use crate::document::{build_document, page_title};
use crate::output::{validate_identifier, SiteWriter};
use crate::render::render_widget;
use crate::source::GraphSource;
use crate::types::{
    CompileError, CompileReport, CompileResult, CompileWarning, CompiledPage, DecodedWidget,
    Escaping, PageRecord, WidgetKind,
};

/// Options that affect the generated markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompileOptions {
    pub escaping: Escaping,
}

/// One page rendered in memory, not yet written.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub page_id: String,
    pub title: String,
    pub html: String,
    pub widget_count: usize,
    pub warnings: Vec<CompileWarning>,
}

/// Decode a page's widgets and order them by `z_index`; ties keep source order.
pub fn decode_page_widgets(page: &PageRecord) -> Vec<DecodedWidget> {
    let mut widgets: Vec<DecodedWidget> = page.widgets.iter().map(decode_widget).collect();
    widgets.sort_by_key(|w| w.z_index);
    widgets
}

/// Render one page to a complete HTML document.
pub fn render_page(page: &PageRecord, options: CompileOptions) -> RenderedPage {
    let widgets = decode_page_widgets(page);
    let mut warnings = Vec::new();
    let mut fragments = Vec::with_capacity(widgets.len());

    for widget in &widgets {
        if let WidgetKind::Unknown(raw) = &widget.kind {
            let warning = CompileWarning::SkippedWidget {
                page_id: page.id.clone(),
                widget_id: widget.id.clone(),
                widget_type: raw.clone(),
            };
            tracing::warn!("{warning}");
            warnings.push(warning);
            continue;
        }
        fragments.push(render_widget(widget, options.escaping));
    }

    RenderedPage {
        page_id: page.id.clone(),
        title: page_title(page.name.as_deref()).to_string(),
        html: build_document(page.name.as_deref(), &fragments, options.escaping),
        widget_count: fragments.len(),
        warnings,
    }
}

/// Drives a full compilation: load, decode, render, write, alias.
pub struct Compiler {
    source: Arc<dyn GraphSource>,
    output_root: PathBuf,
    options: CompileOptions,
}

impl Compiler {
    pub fn new(
        source: Arc<dyn GraphSource>,
        output_root: impl Into<PathBuf>,
        options: CompileOptions,
    ) -> Self {
        Self {
            source,
            output_root: output_root.into(),
            options,
        }
    }

    /// Compile every page of `website_id` and alias `home_page_id` as `index.html`.
    ///
    /// Returns [`CompileError::NotFound`] without touching the filesystem when
    /// the website has no pages. Files already written are left in place if a
    /// later step fails.
    pub fn compile(
        &self,
        website_id: &str,
        home_page_id: Option<&str>,
    ) -> CompileResult<CompileReport> {
        validate_identifier("website", website_id)?;

        tracing::info!("Compiling website {website_id} (home page: {home_page_id:?})");

        let graph = self
            .source
            .fetch_website(website_id)?
            .ok_or_else(|| CompileError::NotFound(website_id.to_string()))?;

        for page in &graph.pages {
            validate_identifier("page", &page.id)
                .map_err(|e| CompileError::InvalidData(format!("website {website_id}: {e}")))?;
        }

        let rendered: Vec<RenderedPage> = graph
            .pages
            .iter()
            .map(|page| render_page(page, self.options))
            .collect();

        let writer = SiteWriter::create(&self.output_root, website_id)?;
        let mut pages = Vec::with_capacity(rendered.len());
        let mut warnings = Vec::new();

        for page in rendered {
            let path = writer.write_page(&page.page_id, &page.html)?;
            warnings.extend(page.warnings);
            pages.push(CompiledPage {
                page_id: page.page_id,
                title: page.title,
                path,
                widget_count: page.widget_count,
            });
        }

        let home_compiled = home_page_id.filter(|home| pages.iter().any(|p| p.page_id == *home));
        let entry_point = match home_compiled {
            Some(home) => writer.alias_entry_point(home)?,
            None => None,
        };

        if entry_point.is_none() {
            writer.remove_stale_entry_point()?;
            let warning = CompileWarning::MissingHomePage {
                home_page_id: home_page_id.map(str::to_string),
            };
            tracing::warn!("Website {website_id}: {warning}");
            warnings.push(warning);
        }

        tracing::info!(
            "Compiled website {website_id}: {} pages, entry point {}, {} warnings",
            pages.len(),
            if entry_point.is_some() { "written" } else { "missing" },
            warnings.len()
        );

        Ok(CompileReport {
            website_id: website_id.to_string(),
            output_dir: writer.dir().to_path_buf(),
            pages,
            entry_point,
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::source::InMemoryGraph;
    use crate::types::{WebsiteRecord, WidgetRecord};

    fn shape(id: &str, z_index: Option<i64>, color: &str) -> WidgetRecord {
        WidgetRecord {
            id: id.to_string(),
            widget_type: "shape".to_string(),
            data: format!(r#"{{"color":"{color}"}}"#),
            position: r#"{"x":10,"y":20}"#.to_string(),
            size: r#"{"width":50,"height":30}"#.to_string(),
            z_index,
        }
    }

    fn page(id: &str, name: Option<&str>, widgets: Vec<WidgetRecord>) -> PageRecord {
        PageRecord {
            id: id.to_string(),
            name: name.map(str::to_string),
            widgets,
        }
    }

    fn sample_site() -> WebsiteRecord {
        WebsiteRecord {
            id: "W1".to_string(),
            home_page_id: Some("P1".to_string()),
            pages: vec![
                page("P1", Some("Home"), vec![shape("s1", None, "#ff0000")]),
                page("P2", Some("About"), vec![]),
            ],
        }
    }

    fn compiler(root: &Path, sites: Vec<WebsiteRecord>) -> Compiler {
        Compiler::new(
            Arc::new(InMemoryGraph::new(sites)),
            root,
            CompileOptions::default(),
        )
    }

    #[test]
    fn test_compile_writes_pages_and_entry_point() {
        let root = tempfile::tempdir().unwrap();
        let report = compiler(root.path(), vec![sample_site()])
            .compile("W1", Some("P1"))
            .unwrap();

        let dir = root.path().join("W1");
        assert_eq!(report.output_dir, dir);
        assert_eq!(report.pages.len(), 2);
        assert!(report.warnings.is_empty());

        let home = std::fs::read_to_string(dir.join("page_P1.html")).unwrap();
        assert!(home.contains("<title>Home</title>"));
        assert!(home.contains(
            "left: 10px; top: 20px; width: 50px; height: 30px; background-color: #ff0000;"
        ));

        let about = std::fs::read_to_string(dir.join("page_P2.html")).unwrap();
        assert!(about.contains("<title>About</title>"));
        assert!(!about.contains("widget-container\""));

        assert_eq!(report.entry_point, Some(dir.join("index.html")));
        assert_eq!(
            std::fs::read(dir.join("index.html")).unwrap(),
            home.into_bytes()
        );

        let files = std::fs::read_dir(&dir).unwrap().count();
        assert_eq!(files, 3);
    }

    #[test]
    fn test_not_found_writes_nothing() {
        let root = tempfile::tempdir().unwrap();
        let err = compiler(root.path(), vec![sample_site()])
            .compile("W404", Some("P1"))
            .unwrap_err();
        assert!(matches!(err, CompileError::NotFound(id) if id == "W404"));
        assert!(!root.path().join("W404").exists());
    }

    #[test]
    fn test_missing_home_page_is_a_warning() {
        let root = tempfile::tempdir().unwrap();
        let compiler = compiler(root.path(), vec![sample_site()]);

        compiler.compile("W1", Some("P1")).unwrap();
        assert!(root.path().join("W1/index.html").exists());

        let report = compiler.compile("W1", Some("P9")).unwrap();
        assert_eq!(report.pages.len(), 2);
        assert!(report.entry_point.is_none());
        assert_eq!(
            report.warnings,
            vec![CompileWarning::MissingHomePage {
                home_page_id: Some("P9".to_string())
            }]
        );
        assert!(!root.path().join("W1/index.html").exists());
    }

    #[test]
    fn test_unknown_widget_is_skipped_with_warning() {
        let root = tempfile::tempdir().unwrap();
        let mut site = sample_site();
        site.pages[0].widgets.push(WidgetRecord {
            id: "v1".to_string(),
            widget_type: "video".to_string(),
            ..Default::default()
        });
        site.pages[0].widgets.push(shape("s2", None, "blue"));

        let report = compiler(root.path(), vec![site])
            .compile("W1", Some("P1"))
            .unwrap();
        assert_eq!(report.pages[0].widget_count, 2);
        assert_eq!(
            report.warnings,
            vec![CompileWarning::SkippedWidget {
                page_id: "P1".to_string(),
                widget_id: "v1".to_string(),
                widget_type: "video".to_string(),
            }]
        );

        let home = std::fs::read_to_string(root.path().join("W1/page_P1.html")).unwrap();
        assert!(home.contains("background-color: #ff0000;"));
        assert!(home.contains("background-color: blue;"));
    }

    #[test]
    fn test_malformed_text_data_still_renders() {
        let root = tempfile::tempdir().unwrap();
        let mut site = sample_site();
        site.pages[1].widgets.push(WidgetRecord {
            id: "t1".to_string(),
            widget_type: "text".to_string(),
            data: "not-json".to_string(),
            position: r#"{"x":5,"y":6}"#.to_string(),
            size: String::new(),
            z_index: None,
        });

        compiler(root.path(), vec![site]).compile("W1", Some("P1")).unwrap();
        let about = std::fs::read_to_string(root.path().join("W1/page_P2.html")).unwrap();
        assert!(about.contains(
            r#"style="left: 5px; top: 6px;"><p style="font-size: px; color: ;"></p>"#
        ));
    }

    #[test]
    fn test_widgets_ordered_by_z_index() {
        let page = page(
            "P1",
            None,
            vec![
                shape("top", Some(5), "red"),
                shape("bottom", Some(-1), "green"),
                shape("a", None, "blue"),
                shape("b", None, "black"),
            ],
        );
        let order: Vec<_> = decode_page_widgets(&page).into_iter().map(|w| w.id).collect();
        assert_eq!(order, vec!["bottom", "a", "b", "top"]);

        let html = render_page(&page, CompileOptions::default()).html;
        let pos = |color: &str| html.find(&format!("background-color: {color};")).unwrap();
        assert!(pos("green") < pos("blue"));
        assert!(pos("blue") < pos("black"));
        assert!(pos("black") < pos("red"));
        assert!(html.contains("<title>Untitled Page</title>"));
    }

    #[test]
    fn test_recompile_overwrites() {
        let root = tempfile::tempdir().unwrap();
        compiler(root.path(), vec![sample_site()]).compile("W1", Some("P1")).unwrap();

        let mut site = sample_site();
        site.pages[0].name = Some("Welcome".to_string());
        compiler(root.path(), vec![site]).compile("W1", Some("P1")).unwrap();

        let index = std::fs::read_to_string(root.path().join("W1/index.html")).unwrap();
        assert!(index.contains("<title>Welcome</title>"));
    }

    #[test]
    fn test_invalid_website_id_rejected_before_loading() {
        let root = tempfile::tempdir().unwrap();
        let compiler = compiler(root.path(), vec![sample_site()]);
        for bad in ["", "../W1", "a/b"] {
            assert!(
                matches!(
                    compiler.compile(bad, Some("P1")),
                    Err(CompileError::InvalidIdentifier { kind: "website", .. })
                ),
                "{bad:?}"
            );
        }
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_unusable_home_page_id_is_only_a_warning() {
        let root = tempfile::tempdir().unwrap();
        let compiler = compiler(root.path(), vec![sample_site()]);

        for home in ["", "../x", "a/b"] {
            let report = compiler.compile("W1", Some(home)).unwrap();
            assert_eq!(report.pages.len(), 2, "{home:?}");
            assert!(report.entry_point.is_none());
            assert_eq!(
                report.warnings,
                vec![CompileWarning::MissingHomePage {
                    home_page_id: Some(home.to_string())
                }]
            );
        }
        assert!(root.path().join("W1/page_P1.html").exists());
        assert!(!root.path().join("W1/index.html").exists());
        assert!(!root.path().join("x").exists());
    }

    #[test]
    fn test_stored_page_id_that_is_not_a_path_segment_is_invalid_data() {
        let root = tempfile::tempdir().unwrap();
        let mut site = sample_site();
        site.pages.push(page("x/y", Some("Broken"), vec![]));

        let err = compiler(root.path(), vec![site])
            .compile("W1", Some("P1"))
            .unwrap_err();
        assert!(matches!(err, CompileError::InvalidData(_)), "{err}");
        assert!(!root.path().join("W1").exists());
    }
}
