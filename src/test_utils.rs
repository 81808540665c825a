//! In-memory stand-ins for the network and the browser.
//!
//! Enabled for this crate's tests and, behind the `test-utils` feature, for
//! downstream tests.

use crate::core::{Request, Response, Transport};
use crate::error::{Result, UnderstatError};
use crate::search::{result_row, Browser, BrowserCookie, LOADING_OVERLAY, RESULTS_PANEL, SEARCH_BOX, SEARCH_INPUT};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Transport that answers from a fixed table of URLs and records every
/// request. Unknown URLs answer `404 Not Found`.
#[derive(Debug, Default)]
pub struct StubTransport {
    pages: HashMap<String, (u16, String, String)>,
    requests: Mutex<Vec<Request>>,
    cookies: Mutex<Vec<(String, String)>>,
    closes: AtomicUsize,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with `200 OK` and `body`.
    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages
            .insert(url.into(), (200, "OK".to_string(), body.into()));
        self
    }

    /// Answer `url` with an empty body and the given status line.
    pub fn with_status(mut self, url: impl Into<String>, status: u16, reason: impl Into<String>) -> Self {
        self.pages
            .insert(url.into(), (status, reason.into(), String::new()));
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }

    /// URLs requested so far, in order.
    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }

    pub fn cookies(&self) -> Vec<(String, String)> {
        self.cookies.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// How many times `close` was called.
    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

impl Transport for StubTransport {
    async fn fetch(&self, request: &Request) -> Result<Response> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        let (status, reason, text) = self
            .pages
            .get(&request.url)
            .cloned()
            .unwrap_or((404, "Not Found".to_string(), String::new()));
        Ok(Response {
            url: request.url.clone(),
            status,
            reason,
            text,
        })
    }

    fn set_cookie(&self, name: &str, value: &str) {
        if let Ok(mut cookies) = self.cookies.lock() {
            cookies.push((name.to_string(), value.to_string()));
        }
    }

    fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

/// What a [`ScriptedBrowser`] was asked to do. Shared with the test after
/// the browser has been handed to a search.
#[derive(Debug, Default)]
pub struct BrowserLog {
    quits: AtomicUsize,
    page_loads: AtomicUsize,
    searches: AtomicUsize,
    cookie_reads: AtomicUsize,
    rows: Mutex<Vec<usize>>,
}

impl BrowserLog {
    pub fn quit_count(&self) -> usize {
        self.quits.load(Ordering::SeqCst)
    }

    pub fn page_loads(&self) -> usize {
        self.page_loads.load(Ordering::SeqCst)
    }

    /// How many times a query was typed into the search box.
    pub fn search_count(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }

    pub fn cookie_reads(&self) -> usize {
        self.cookie_reads.load(Ordering::SeqCst)
    }

    /// Result rows clicked, in order.
    pub fn clicked_rows(&self) -> Vec<usize> {
        self.rows.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

/// Browser that plays back a scripted understat search page.
///
/// Clicking result row `i` lands on the `i`-th scripted URL; `back` returns
/// to the search page with the results panel closed.
#[derive(Debug)]
pub struct ScriptedBrowser {
    results_text: String,
    urls: Vec<String>,
    cookies: Vec<BrowserCookie>,
    overlay_polls: Option<usize>,
    fail_cookies: bool,
    history: Vec<String>,
    polls: usize,
    search_box_open: bool,
    typed: String,
    panel_open: bool,
    log: Arc<BrowserLog>,
}

impl ScriptedBrowser {
    /// A page whose results panel shows `results_text` and whose rows link
    /// to `urls`.
    pub fn new(results_text: impl Into<String>, urls: &[&str]) -> Self {
        Self {
            results_text: results_text.into(),
            urls: urls.iter().map(|u| u.to_string()).collect(),
            cookies: Vec::new(),
            overlay_polls: Some(0),
            fail_cookies: false,
            history: Vec::new(),
            polls: 0,
            search_box_open: false,
            typed: String::new(),
            panel_open: false,
            log: Arc::new(BrowserLog::default()),
        }
    }

    pub fn with_cookie(mut self, name: &str, value: &str) -> Self {
        self.cookies.push(BrowserCookie::new(name, value));
        self
    }

    /// Keep the loading overlay up for `polls` visibility checks after each
    /// navigation.
    pub fn with_slow_overlay(mut self, polls: usize) -> Self {
        self.overlay_polls = Some(polls);
        self
    }

    /// The loading overlay never goes away.
    pub fn with_stuck_overlay(mut self) -> Self {
        self.overlay_polls = None;
        self
    }

    /// Reading cookies fails.
    pub fn with_failing_cookies(mut self) -> Self {
        self.fail_cookies = true;
        self
    }

    pub fn log(&self) -> Arc<BrowserLog> {
        Arc::clone(&self.log)
    }

    fn current(&self) -> &str {
        self.history.last().map(String::as_str).unwrap_or("about:blank")
    }

    fn on_search_page(&self) -> bool {
        !self.urls.iter().any(|u| u == self.current())
    }

    fn missing(xpath: &str) -> UnderstatError {
        UnderstatError::Browser {
            message: format!("no element at {xpath}"),
        }
    }
}

impl Browser for ScriptedBrowser {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.log.page_loads.fetch_add(1, Ordering::SeqCst);
        self.history.push(url.to_string());
        self.polls = 0;
        self.search_box_open = false;
        self.panel_open = false;
        Ok(())
    }

    async fn click(&mut self, xpath: &str) -> Result<()> {
        if !self.on_search_page() {
            return Err(Self::missing(xpath));
        }
        if xpath == SEARCH_BOX {
            self.search_box_open = true;
            return Ok(());
        }
        if xpath == SEARCH_INPUT && self.search_box_open {
            self.panel_open = !self.typed.is_empty();
            return Ok(());
        }
        let row = (0..self.urls.len()).find(|&i| result_row(i) == xpath);
        match row {
            Some(i) if self.panel_open => {
                if let Ok(mut rows) = self.log.rows.lock() {
                    rows.push(i);
                }
                let url = self.urls[i].clone();
                self.navigate(&url).await
            }
            _ => Err(Self::missing(xpath)),
        }
    }

    async fn send_keys(&mut self, xpath: &str, text: &str) -> Result<()> {
        if xpath != SEARCH_INPUT || !self.search_box_open {
            return Err(Self::missing(xpath));
        }
        self.typed = text.to_string();
        self.log.searches.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn text(&mut self, xpath: &str) -> Result<String> {
        if xpath == RESULTS_PANEL && self.panel_open {
            Ok(self.results_text.clone())
        } else {
            Err(Self::missing(xpath))
        }
    }

    async fn is_displayed(&mut self, xpath: &str) -> Result<bool> {
        if xpath == LOADING_OVERLAY {
            self.polls += 1;
            return Ok(match self.overlay_polls {
                Some(limit) => self.polls <= limit,
                None => true,
            });
        }
        Ok(xpath == RESULTS_PANEL && self.panel_open)
    }

    async fn current_url(&mut self) -> Result<String> {
        Ok(self.current().to_string())
    }

    async fn back(&mut self) -> Result<()> {
        self.history.pop();
        self.polls = 0;
        self.search_box_open = false;
        self.panel_open = false;
        Ok(())
    }

    async fn cookies(&mut self) -> Result<Vec<BrowserCookie>> {
        self.log.cookie_reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_cookies {
            return Err(UnderstatError::Browser {
                message: "cookie store unavailable".to_string(),
            });
        }
        Ok(self.cookies.clone())
    }

    async fn quit(&mut self) -> Result<()> {
        self.log.quits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
