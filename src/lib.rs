//! understat.com client library
//!
//! Typed access to the statistics understat.com embeds in its pages: league
//! tables and fixtures, player shot maps and season splits, team context
//! data and per-match shots, rosters and summaries.
//!
//! ## Features
//!
//! - **League, player, team and match endpoints** with one method per data
//!   block, plus name-based dispatch through [`LeagueEndpoint::call`] and
//!   friends
//! - **Fan-out**: build an endpoint from several identifiers and iterate or
//!   index it as single-identifier endpoints
//! - **HTML or JSON**: read the `JSON.parse('…')` blocks embedded in pages,
//!   or the site's AJAX endpoints
//! - **Player search** through the site's search bar in a headless browser
//!   (`browser` feature)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use understat::{Endpoint, UnderstatClient};
//!
//! # async fn example() -> understat::Result<()> {
//! let client = UnderstatClient::new()?;
//!
//! let teams = client.league("EPL").get_team_data("2019").await?;
//! let shots = client.player("647").get_shot_data().await?;
//!
//! for league in client.league(["EPL", "La_Liga"]).iter() {
//!     let fixtures = league.get_match_data("2019").await?;
//!     println!("{league}: {} fixtures", fixtures.as_array().map_or(0, Vec::len));
//! }
//!
//! client.close();
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! [`ClientConfig::from_env`] and [`UnderstatClient::from_env`] read:
//! ```bash
//! export UNDERSTAT_BASE_URL=https://understat.com
//! export UNDERSTAT_MODE=json        # html (default) or json
//! export UNDERSTAT_CHROME=/usr/bin/chromium
//! ```

pub mod client;
pub mod config;
pub mod core;
pub mod endpoints;
pub mod error;
pub mod search;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export commonly used types
pub use client::UnderstatClient;
pub use config::{BrowserOptions, ClientConfig, ExtractionMode, SearchOptions};
pub use crate::core::{HttpTransport, LocalTransport, Transport};
pub use endpoints::{Endpoint, LeagueEndpoint, MatchEndpoint, PlayerEndpoint, TeamEndpoint};
pub use error::{Result, StatusError, UnderstatError};
pub use search::{Browser, PlayerSearch};
pub use types::{Identifier, League, Query, ResourceKind, Season};

#[cfg(feature = "browser")]
pub use search::ChromeBrowser;

/// Overrides the site root, e.g. to point at a mirror.
pub const BASE_URL_ENV_VAR: &str = "UNDERSTAT_BASE_URL";

/// `html` or `json`.
pub const MODE_ENV_VAR: &str = "UNDERSTAT_MODE";

/// Path to the Chrome/Chromium binary used for search.
pub const CHROME_ENV_VAR: &str = "UNDERSTAT_CHROME";

/// Set to run the tests that hit the live site.
pub const INTEGRATION_ENV_VAR: &str = "UNDERSTAT_INTEGRATION";
