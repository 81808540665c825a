//! The client façade: owns the session and hands out endpoints.

use crate::config::{ClientConfig, SearchOptions};
use crate::core::{HttpTransport, Transport};
use crate::endpoints::{LeagueEndpoint, MatchEndpoint, PlayerEndpoint, TeamEndpoint};
use crate::error::{Result, UnderstatError};
use crate::search::{Browser, PlayerSearch, SearchService};
use crate::types::Identifier;
use futures::future::BoxFuture;
use std::sync::Arc;
use tracing::{debug, warn};

/// Entry point to understat.com data.
///
/// Every endpoint created from a client shares its session, which the client
/// closes exactly once: on [`close`](Self::close), at the end of
/// [`scope`](Self::scope), or on drop.
///
/// # Examples
///
/// ```rust,no_run
/// use futures::FutureExt;
/// use understat::UnderstatClient;
///
/// # async fn example() -> understat::Result<()> {
/// let shots = UnderstatClient::new()?
///     .scope(|client| async move { client.r#match("11652").get_shot_data().await }.boxed())
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct UnderstatClient<T: Transport = HttpTransport> {
    session: Arc<T>,
    config: Arc<ClientConfig>,
    closed: bool,
}

impl UnderstatClient<HttpTransport> {
    /// Client for understat.com with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(transport, config))
    }

    /// Client configured from `UNDERSTAT_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }
}

impl<T: Transport> UnderstatClient<T> {
    /// Client over any transport.
    pub fn with_transport(transport: T, config: ClientConfig) -> Self {
        Self {
            session: Arc::new(transport),
            config: Arc::new(config),
            closed: false,
        }
    }

    pub fn session(&self) -> &Arc<T> {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn league(&self, league: impl Into<Identifier>) -> LeagueEndpoint<T> {
        LeagueEndpoint::new(league, Arc::clone(&self.session), Arc::clone(&self.config))
    }

    pub fn player(&self, player: impl Into<Identifier>) -> PlayerEndpoint<T> {
        PlayerEndpoint::new(player, Arc::clone(&self.session), Arc::clone(&self.config))
    }

    pub fn team(&self, team: impl Into<Identifier>) -> TeamEndpoint<T> {
        TeamEndpoint::new(team, Arc::clone(&self.session), Arc::clone(&self.config))
    }

    pub fn r#match(&self, match_id: impl Into<Identifier>) -> MatchEndpoint<T> {
        MatchEndpoint::new(match_id, Arc::clone(&self.session), Arc::clone(&self.config))
    }

    /// Search for players named `name` with an already running browser.
    ///
    /// Results are produced one at a time by [`PlayerSearch::next`]. The
    /// browser is shut down once the results run out, `max_results` is
    /// reached, or a step fails; call [`PlayerSearch::close`] to stop
    /// earlier, or use [`search_scope`](Self::search_scope).
    pub fn search_with<B: Browser>(&self, browser: B, name: &str, options: SearchOptions) -> PlayerSearch<B, T> {
        let service = SearchService::new(
            browser,
            Arc::clone(&self.session),
            &self.config.base_url,
            name,
            options,
        );
        PlayerSearch::new(service, Arc::clone(&self.config))
    }

    /// Search for players named `name` in headless Chrome.
    ///
    /// Fails with `DriverUnavailable` when Chrome cannot be started.
    #[cfg(feature = "browser")]
    pub async fn search(
        &self,
        name: &str,
        options: SearchOptions,
    ) -> Result<PlayerSearch<crate::search::ChromeBrowser, T>> {
        let browser = crate::search::ChromeBrowser::launch(&self.config.browser).await?;
        Ok(self.search_with(browser, name, options))
    }

    /// Run `f` against a search for `name`, then close the search whatever
    /// the outcome.
    ///
    /// `f` may stop after any number of results; the browser's cookies still
    /// reach the session and the browser is still shut down. An error from
    /// `f` wins over a failure to close.
    ///
    /// ```rust,no_run
    /// # use futures::FutureExt;
    /// # async fn example<B: understat::Browser>(browser: B) -> understat::Result<()> {
    /// let client = understat::UnderstatClient::new()?;
    /// let first = client
    ///     .search_scope(browser, "Harry Kane", Default::default(), |search| {
    ///         async move { search.next().await }.boxed()
    ///     })
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search_scope<B, F, R>(&self, browser: B, name: &str, options: SearchOptions, f: F) -> Result<R>
    where
        B: Browser,
        F: for<'s> FnOnce(&'s mut PlayerSearch<B, T>) -> BoxFuture<'s, Result<R>>,
    {
        let mut search = self.search_with(browser, name, options);
        let result = f(&mut search).await;
        let closed = search.close().await;
        match (result, closed) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), closed) => {
                if let Err(close_err) = closed {
                    warn!(error = %close_err, "failed to close search browser");
                }
                Err(e)
            }
        }
    }

    /// Run `f` against this client, then close the session whatever the
    /// outcome.
    ///
    /// An `UnknownOperation` error from `f` comes back listing the
    /// operations of the endpoint it names; other errors are returned
    /// unchanged.
    pub async fn scope<F, R>(mut self, f: F) -> Result<R>
    where
        F: for<'c> FnOnce(&'c Self) -> BoxFuture<'c, Result<R>>,
    {
        let result = f(&self).await;
        self.shutdown();
        result.map_err(UnderstatError::with_available_operations)
    }

    /// Close the session now.
    pub fn close(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if !self.closed {
            self.closed = true;
            self.session.close();
            debug!("understat session closed");
        }
    }
}

impl<T: Transport> Drop for UnderstatClient<T> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
