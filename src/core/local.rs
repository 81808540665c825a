//! Offline transport serving saved pages from disk.

use crate::core::http::{Request, Response, Transport};
use crate::error::{Result, UnderstatError};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::debug;

/// Reads documents from a directory tree mirroring understat URL paths.
///
/// `https://understat.com/league/EPL/2019` is served from
/// `<root>/league/EPL/2019.html` and
/// `https://understat.com/action/getLeagueData/EPL/2019` from
/// `<root>/action/getLeagueData/EPL/2019.json`. A missing file answers
/// `404 Not Found`.
#[derive(Debug)]
pub struct LocalTransport {
    root: PathBuf,
    cookies: Mutex<Vec<(String, String)>>,
    closed: AtomicBool,
}

impl LocalTransport {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cookies: Mutex::new(Vec::new()),
            closed: AtomicBool::new(false),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `url`, if the URL has a path.
    pub fn path_for(&self, url: &str) -> Option<PathBuf> {
        let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
        let (_, path) = without_scheme.split_once('/')?;
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_matches('/');
        if path.is_empty() || path.split('/').any(|segment| segment == "..") {
            return None;
        }
        let extension = if path.starts_with("action/") { "json" } else { "html" };
        Some(self.root.join(format!("{}.{}", path, extension)))
    }

    /// Cookies received through [`Transport::set_cookie`], in order.
    pub fn cookies(&self) -> Vec<(String, String)> {
        self.cookies
            .lock()
            .map(|cookies| cookies.clone())
            .unwrap_or_default()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Transport for LocalTransport {
    async fn fetch(&self, request: &Request) -> Result<Response> {
        if self.is_closed() {
            return Err(UnderstatError::SessionClosed);
        }
        let not_found = || Response {
            url: request.url.clone(),
            status: 404,
            reason: "Not Found".to_string(),
            text: String::new(),
        };

        let Some(path) = self.path_for(&request.url) else {
            return Ok(not_found());
        };
        debug!(url = %request.url, path = %path.display(), "reading local document");
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(Response::ok(request.url.clone(), text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(not_found()),
            Err(e) => Err(e.into()),
        }
    }

    fn set_cookie(&self, name: &str, value: &str) {
        if let Ok(mut cookies) = self.cookies.lock() {
            cookies.retain(|(existing, _)| existing != name);
            cookies.push((name.to_string(), value.to_string()));
        }
    }

    fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            debug!(root = %self.root.display(), "local session closed");
        }
    }
}
