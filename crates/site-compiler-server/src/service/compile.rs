//! Compile service: serializes compilations per website and runs them off the
//! async executor.

use std::sync::Arc;

use tokio::sync::Mutex;

use site_compiler::Compiler;

use super::WebsiteLocks;
use crate::types::{CompileRequest, CompileResponse, ServerError, ServerResult};

/// Shared entry point used by the HTTP transport and the CLI.
pub struct CompileService {
    compiler: Arc<Compiler>,
    locks: Arc<Mutex<WebsiteLocks>>,
}

impl CompileService {
    pub fn new(compiler: Compiler) -> Self {
        Self {
            compiler: Arc::new(compiler),
            locks: Arc::new(Mutex::new(WebsiteLocks::new())),
        }
    }

    /// Compile one website. The website's lock is held by the blocking task,
    /// so it stays held until the compile finishes even if this future is
    /// dropped first.
    pub async fn compile(&self, request: CompileRequest) -> ServerResult<CompileResponse> {
        if request.website_id.is_empty() {
            return Err(ServerError::InvalidRequest(
                "'websiteId' must not be empty".to_string(),
            ));
        }

        let site_lock = {
            let mut locks = self.locks.lock().await;
            locks.get_or_create(&request.website_id)
        };
        let guard = site_lock.lock_owned().await;

        let compiler = self.compiler.clone();
        let CompileRequest {
            website_id,
            home_page_id,
        } = request;

        let report = tokio::task::spawn_blocking(move || {
            let _guard = guard;
            compiler.compile(&website_id, home_page_id.as_deref())
        })
        .await
        .map_err(|e| ServerError::InternalError(format!("Compile task failed: {e}")))??;

        Ok(CompileResponse::from_report(&report))
    }

    /// Number of distinct websites compiled since startup.
    pub async fn website_count(&self) -> usize {
        self.locks.lock().await.count()
    }
}
