//! Compiled site directory: one HTML file per page plus `index.html`.

use std::path::{Path, PathBuf};

use crate::types::{CompileError, CompileResult};

/// File name of the entry-point document.
pub const ENTRY_POINT_FILE: &str = "index.html";

/// File name of a page's compiled document.
pub fn page_file_name(page_id: &str) -> String {
    format!("page_{page_id}.html")
}

/// Reject ids that would escape or collapse a single path segment.
pub fn validate_identifier(kind: &'static str, value: &str) -> CompileResult<()> {
    let invalid = value.is_empty()
        || value == "."
        || value == ".."
        || value.contains(['/', '\\', '\0']);
    if invalid {
        return Err(CompileError::InvalidIdentifier {
            kind,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Writer for one website's output directory.
pub struct SiteWriter {
    dir: PathBuf,
}

impl SiteWriter {
    /// Ensure `{root}/{website_id}` exists.
    pub fn create(root: &Path, website_id: &str) -> CompileResult<Self> {
        validate_identifier("website", website_id)?;
        let dir = root.join(website_id);
        std::fs::create_dir_all(&dir).map_err(|e| {
            CompileError::Io(std::io::Error::other(format!(
                "Failed to create directory {}: {e}",
                dir.display()
            )))
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn page_path(&self, page_id: &str) -> PathBuf {
        self.dir.join(page_file_name(page_id))
    }

    pub fn entry_point_path(&self) -> PathBuf {
        self.dir.join(ENTRY_POINT_FILE)
    }

    /// Write (or overwrite) a page document.
    pub fn write_page(&self, page_id: &str, html: &str) -> CompileResult<PathBuf> {
        validate_identifier("page", page_id)?;
        let path = self.page_path(page_id);
        tracing::debug!("Writing file {}", path.display());
        std::fs::write(&path, html)?;
        Ok(path)
    }

    /// Copy the home page's document to `index.html` if it exists.
    pub fn alias_entry_point(&self, home_page_id: &str) -> CompileResult<Option<PathBuf>> {
        validate_identifier("page", home_page_id)?;
        let home = self.page_path(home_page_id);
        if !home.is_file() {
            return Ok(None);
        }
        let entry = self.entry_point_path();
        std::fs::copy(&home, &entry)?;
        Ok(Some(entry))
    }

    /// Remove an `index.html` left by an earlier compilation.
    pub fn remove_stale_entry_point(&self) -> CompileResult<bool> {
        let entry = self.entry_point_path();
        match std::fs::remove_file(&entry) {
            Ok(()) => {
                tracing::debug!("Removed stale entry point {}", entry.display());
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
