//! Player search through the understat.com search bar.
//!
//! The site only exposes player ids behind its interactive search box, so a
//! search drives a real browser: open the site root, type the name, then
//! click each result row in turn and read the id off the page it lands on.
//! Each id is produced on demand; rows that are never asked for are never
//! visited.
//!
//! A search owns its browser. When it finishes, fails, or is closed, the
//! browser's cookies are copied into the client's session and the browser
//! is shut down.

#[cfg(feature = "browser")]
pub mod chrome;
pub mod wait;


#[cfg(feature = "browser")]
pub use chrome::ChromeBrowser;
pub use wait::{wait_until, Condition};

use crate::config::{ClientConfig, SearchOptions};
use crate::core::Transport;
use crate::endpoints::PlayerEndpoint;
use crate::error::{Result, UnderstatError};
use futures::stream::{self, Stream};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Navigation menu entry that opens the search box.
pub const SEARCH_BOX: &str = "//*[@id='header']/div/nav[2]/ul/li[1]";
/// Text input of the search box.
pub const SEARCH_INPUT: &str = "//*[@id='header']/div/nav[2]/ul/li[1]/span[1]/input";
/// Drop-down panel listing the results.
pub const RESULTS_PANEL: &str = "//*[@id='header']/div/nav[2]/ul/li[1]/span[1]/div";
/// Overlay shown while the page is still loading.
pub const LOADING_OVERLAY: &str = "/html/body/div[1]/div[1]";

/// XPath of the result row at zero-based `index`.
pub fn result_row(index: usize) -> String {
    format!("{RESULTS_PANEL}/div/div[{}]", index + 1)
}

/// A cookie read back from the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserCookie {
    pub name: String,
    pub value: String,
}

impl BrowserCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The browser operations a search needs. Elements are addressed by XPath.
pub trait Browser: Send {
    fn navigate(&mut self, url: &str) -> impl Future<Output = Result<()>> + Send;

    fn click(&mut self, xpath: &str) -> impl Future<Output = Result<()>> + Send;

    fn send_keys(&mut self, xpath: &str, text: &str) -> impl Future<Output = Result<()>> + Send;

    /// Rendered text of the element.
    fn text(&mut self, xpath: &str) -> impl Future<Output = Result<String>> + Send;

    /// Whether the element exists and is displayed. A missing element is
    /// not displayed.
    fn is_displayed(&mut self, xpath: &str) -> impl Future<Output = Result<bool>> + Send;

    fn current_url(&mut self) -> impl Future<Output = Result<String>> + Send;

    /// Go back one entry in the history.
    fn back(&mut self) -> impl Future<Output = Result<()>> + Send;

    fn cookies(&mut self) -> impl Future<Output = Result<Vec<BrowserCookie>>> + Send;

    /// Shut the browser down.
    fn quit(&mut self) -> impl Future<Output = Result<()>> + Send;
}

/// One row of the results panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SearchResult {
    pub name: String,
    pub affiliation: String,
}

/// Pair the lines of the results panel into (name, affiliation) rows.
/// A trailing unpaired line is dropped.
pub(crate) fn parse_results(text: &str) -> Vec<SearchResult> {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    lines
        .chunks_exact(2)
        .map(|pair| SearchResult {
            name: pair[0].to_string(),
            affiliation: pair[1].to_string(),
        })
        .collect()
}

/// Trailing path segment of a player page URL.
pub fn player_id_from_url(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url).trim_end_matches('/');
    path.rsplit('/').next().unwrap_or(path)
}

/// Where a search is in its protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    BrowserOpen,
    SearchBoxOpen,
    QueryEntered,
    ResultsVisible,
    /// The next row to visit.
    Cycling(usize),
    Done,
}

/// The search protocol for one name, yielding player ids.
pub struct SearchService<B: Browser, T: Transport> {
    browser: Option<B>,
    session: Arc<T>,
    url: String,
    name: String,
    options: SearchOptions,
    state: SearchState,
    results: Vec<SearchResult>,
}

impl<B: Browser, T: Transport> SearchService<B, T> {
    /// Search for `name` on the site at `base_url`, with a browser that is
    /// already running.
    pub fn new(
        browser: B,
        session: Arc<T>,
        base_url: &str,
        name: impl Into<String>,
        options: SearchOptions,
    ) -> Self {
        Self {
            browser: Some(browser),
            session,
            url: format!("{}/", base_url.trim_end_matches('/')),
            name: name.into(),
            options,
            state: SearchState::Idle,
            results: Vec::new(),
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The next player id, or `None` once every row (up to
    /// `max_results`) has been visited.
    ///
    /// The search closes itself when it runs out of rows or fails.
    pub async fn next_id(&mut self) -> Result<Option<String>> {
        if self.state == SearchState::Done {
            return Ok(None);
        }

        match self.advance().await {
            Ok(Some(id)) => {
                if self.exhausted() {
                    self.finish().await;
                }
                Ok(Some(id))
            }
            Ok(None) => {
                self.close().await?;
                Ok(None)
            }
            Err(e) => {
                self.finish().await;
                Err(e)
            }
        }
    }

    /// Every remaining id.
    pub async fn collect_ids(mut self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        while let Some(id) = self.next_id().await? {
            ids.push(id);
        }
        Ok(ids)
    }

    /// Copy the browser's cookies into the session, then quit the browser.
    ///
    /// Runs once; later calls are no-ops. The browser is quit even when
    /// reading its cookies fails.
    pub async fn close(&mut self) -> Result<()> {
        self.state = SearchState::Done;
        let Some(mut browser) = self.browser.take() else {
            return Ok(());
        };

        let cookies = browser.cookies().await;
        if let Ok(cookies) = &cookies {
            for cookie in cookies {
                self.session.set_cookie(&cookie.name, &cookie.value);
            }
            debug!(count = cookies.len(), "copied browser cookies into session");
        }
        let quit = browser.quit().await;
        cookies?;
        quit
    }

    /// Close after the last id or after an error, where a close failure
    /// must not mask the outcome.
    async fn finish(&mut self) {
        if let Err(e) = self.close().await {
            warn!(error = %e, "failed to close search browser");
        }
    }

    fn exhausted(&self) -> bool {
        match self.state {
            SearchState::Cycling(next) => next >= self.results.len().min(self.options.max_results),
            _ => false,
        }
    }

    /// Drive the state machine up to the next id.
    async fn advance(&mut self) -> Result<Option<String>> {
        let Some(browser) = self.browser.as_mut() else {
            return Err(UnderstatError::Browser {
                message: "search browser already shut down".to_string(),
            });
        };

        loop {
            match self.state {
                SearchState::Idle if self.options.max_results == 0 => {
                    debug!(query = %self.name, "max_results is 0, skipping search");
                    return Ok(None);
                }
                SearchState::Idle => self.state = SearchState::BrowserOpen,
                SearchState::BrowserOpen => {
                    info!(query = %self.name, url = %self.url, "starting player search");
                    browser.navigate(&self.url).await?;
                    make_search(browser, &self.name, &self.options, &mut self.state).await?;
                }
                SearchState::SearchBoxOpen | SearchState::QueryEntered => {
                    make_search(browser, &self.name, &self.options, &mut self.state).await?;
                }
                SearchState::ResultsVisible => {
                    let text = browser.text(RESULTS_PANEL).await?;
                    self.results = parse_results(&text);
                    debug!(query = %self.name, results = self.results.len(), "search results");
                    self.state = SearchState::Cycling(0);
                }
                SearchState::Cycling(index) => {
                    if index >= self.results.len().min(self.options.max_results) {
                        return Ok(None);
                    }
                    if index > 0 {
                        make_search(browser, &self.name, &self.options, &mut self.state).await?;
                    }
                    let id = visit_row(browser, index).await?;
                    debug!(
                        index,
                        player = %self.results[index].name,
                        team = %self.results[index].affiliation,
                        id = %id,
                        "search result"
                    );
                    self.state = SearchState::Cycling(index + 1);
                    return Ok(Some(id));
                }
                SearchState::Done => return Ok(None),
            }
        }
    }
}

impl<B: Browser, T: Transport> Drop for SearchService<B, T> {
    fn drop(&mut self) {
        if self.browser.is_some() {
            warn!(
                query = %self.name,
                "search dropped without close(); browser was not shut down (see UnderstatClient::search_scope)"
            );
        }
    }
}

/// Wait for the page, open the search box, type the name and wait for the
/// results panel. Leaves `state` at `ResultsVisible` unless it is cycling.
async fn make_search<B: Browser>(
    browser: &mut B,
    name: &str,
    options: &SearchOptions,
    state: &mut SearchState,
) -> Result<()> {
    let cycling = matches!(state, SearchState::Cycling(_));
    let limit = options.page_load_timeout;
    let poll = options.poll_interval;

    wait_until(browser, &Condition::Invisible(LOADING_OVERLAY.to_string()), limit, poll).await?;
    browser.click(SEARCH_BOX).await?;
    if !cycling {
        *state = SearchState::SearchBoxOpen;
    }

    browser.send_keys(SEARCH_INPUT, name).await?;
    browser.click(SEARCH_INPUT).await?;
    if !cycling {
        *state = SearchState::QueryEntered;
    }

    wait_until(browser, &Condition::Visible(RESULTS_PANEL.to_string()), limit, poll).await?;
    if !cycling {
        *state = SearchState::ResultsVisible;
    }
    Ok(())
}

/// Click row `index`, read the id off the player page, then go back.
async fn visit_row<B: Browser>(browser: &mut B, index: usize) -> Result<String> {
    browser.click(&result_row(index)).await?;
    let url = browser.current_url().await?;
    let id = player_id_from_url(&url).to_string();
    browser.back().await?;
    Ok(id)
}

/// Search results as player endpoints on the client's session.
pub struct PlayerSearch<B: Browser, T: Transport> {
    service: SearchService<B, T>,
    config: Arc<ClientConfig>,
}

impl<B: Browser, T: Transport> PlayerSearch<B, T> {
    pub fn new(service: SearchService<B, T>, config: Arc<ClientConfig>) -> Self {
        Self { service, config }
    }

    pub fn state(&self) -> SearchState {
        self.service.state()
    }

    pub async fn next(&mut self) -> Result<Option<PlayerEndpoint<T>>> {
        let id = self.service.next_id().await?;
        Ok(id.map(|id| {
            PlayerEndpoint::new(id, Arc::clone(&self.service.session), Arc::clone(&self.config))
        }))
    }

    pub async fn collect(mut self) -> Result<Vec<PlayerEndpoint<T>>> {
        let mut players = Vec::new();
        while let Some(player) = self.next().await? {
            players.push(player);
        }
        Ok(players)
    }

    /// Stop early. See [`SearchService::close`]. Later calls are no-ops.
    pub async fn close(&mut self) -> Result<()> {
        self.service.close().await
    }

    /// The remaining results as a stream, ending after the first error.
    ///
    /// A stream dropped before it ends leaves the browser running; use
    /// [`UnderstatClient::search_scope`](crate::UnderstatClient::search_scope)
    /// when a caller may stop early.
    pub fn into_stream(self) -> impl Stream<Item = Result<PlayerEndpoint<T>>> {
        stream::try_unfold(self, |mut search| async move {
            let player = search.next().await?;
            Ok::<_, UnderstatError>(player.map(|player| (player, search)))
        })
    }
}
