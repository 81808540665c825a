//! League endpoint: `https://understat.com/league/<league>/<season>`

use super::{BaseEndpoint, Endpoint};
use crate::config::ClientConfig;
use crate::core::{check_args, HttpTransport, Transport};
use crate::error::{Result, UnderstatError};
use crate::types::{Identifier, Query, ResourceKind};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// League-wide data for one season.
///
/// # Examples
///
/// ```rust,no_run
/// use understat::{Endpoint, UnderstatClient};
///
/// # async fn example() -> understat::Result<()> {
/// let client = UnderstatClient::new()?;
/// for league in client.league(["EPL", "Bundesliga"]).iter() {
///     let teams = league.get_team_data("2019").await?;
///     println!("{}: {} teams", league, teams.as_object().map_or(0, |t| t.len()));
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct LeagueEndpoint<T = HttpTransport> {
    base: BaseEndpoint<T>,
}

impl<T> Clone for LeagueEndpoint<T> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
        }
    }
}

impl<T: Transport> LeagueEndpoint<T> {
    pub fn new(league: impl Into<Identifier>, session: Arc<T>, config: Arc<ClientConfig>) -> Self {
        Self {
            base: BaseEndpoint::new(league, session, config),
        }
    }

    /// League code(s) this endpoint was built with.
    pub fn league(&self) -> &Identifier {
        self.base.identifier()
    }

    /// Fetch the block named `query` for `season`.
    ///
    /// `query` is one of `teamsData`, `datesData`, `playersData`.
    pub async fn get_data(&self, season: &str, query: &str) -> Result<Value> {
        let league = self.base.single(Self::KIND)?;
        let args = check_args(Self::KIND, Some(league), Some(season), None)?;
        let query = Self::KIND.check_query(query)?;
        self.base.fetch(Self::KIND, league, args.season, query).await
    }

    /// Data for every team in the league and season.
    pub async fn get_team_data(&self, season: &str) -> Result<Value> {
        self.get_data(season, Query::Teams.as_str()).await
    }

    /// Every fixture of the season.
    pub async fn get_match_data(&self, season: &str) -> Result<Value> {
        self.get_data(season, Query::Dates.as_str()).await
    }

    /// Data for every player in the league and season.
    pub async fn get_player_data(&self, season: &str) -> Result<Value> {
        self.get_data(season, Query::Players.as_str()).await
    }

    /// Run the operation named `operation`.
    pub async fn call(&self, operation: &str, season: Option<&str>) -> Result<Value> {
        let query = Self::KIND.operation_query(operation)?;
        let season = season.ok_or_else(|| UnderstatError::MissingSeason {
            operation: operation.to_string(),
        })?;
        self.get_data(season, query.as_str()).await
    }
}

impl<T: Transport> Endpoint for LeagueEndpoint<T> {
    type Transport = T;

    const KIND: ResourceKind = ResourceKind::League;

    fn from_base(base: BaseEndpoint<T>) -> Self {
        Self { base }
    }

    fn base(&self) -> &BaseEndpoint<T> {
        &self.base
    }
}

impl<T: Transport> fmt::Display for LeagueEndpoint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.base.fmt_repr(Self::KIND, f)
    }
}
