//! Mapping of resource identifiers onto understat request targets.
//!
//! Validation here is pure and runs before any request is built, so invalid
//! input never reaches the network.

use crate::config::{ClientConfig, ExtractionMode};
use crate::core::http::Request;
use crate::error::Result;
use crate::types::{League, Query, ResourceKind, Season};

/// Arguments that passed [`check_args`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckedArgs {
    pub league: Option<League>,
    pub season: Option<Season>,
    pub query: Option<Query>,
}

/// Validate the arguments of a data request for `kind`.
///
/// Checks run league, then season, then query; the first failure wins.
pub fn check_args(
    kind: ResourceKind,
    league: Option<&str>,
    season: Option<&str>,
    query: Option<&str>,
) -> Result<CheckedArgs> {
    Ok(CheckedArgs {
        league: league.map(str::parse::<League>).transpose()?,
        season: season.map(str::parse::<Season>).transpose()?,
        query: query.map(|q| kind.check_query(q)).transpose()?,
    })
}

/// Page URL for a resource: `{base}/{segment}/{identifier}[/{season}]`.
pub fn page_url(base_url: &str, kind: ResourceKind, identifier: &str, season: Option<Season>) -> String {
    let mut url = format!("{}/{}/{}", base_url, kind.segment(), identifier);
    if let Some(season) = season {
        url.push('/');
        url.push_str(&season.to_string());
    }
    url
}

/// AJAX URL for a resource: `{base}/action/get{Kind}Data/{identifier}[/{season}]`.
pub fn action_url(base_url: &str, kind: ResourceKind, identifier: &str, season: Option<Season>) -> String {
    let mut url = format!("{}/action/{}/{}", base_url, kind.action(), identifier);
    if let Some(season) = season {
        url.push('/');
        url.push_str(&season.to_string());
    }
    url
}

/// Build the request serving `identifier`'s data in the configured mode.
pub fn build_request(
    config: &ClientConfig,
    kind: ResourceKind,
    identifier: &str,
    season: Option<Season>,
) -> Request {
    match config.mode {
        ExtractionMode::Html => Request::get(page_url(&config.base_url, kind, identifier, season)),
        ExtractionMode::Json => Request::get(action_url(&config.base_url, kind, identifier, season))
            .header("x-requested-with", "XMLHttpRequest"),
    }
}
