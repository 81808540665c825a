//! Team endpoint: `https://understat.com/team/<team>/<season>`

use super::{BaseEndpoint, Endpoint};
use crate::config::ClientConfig;
use crate::core::{check_args, HttpTransport, Transport};
use crate::error::{Result, UnderstatError};
use crate::types::{Identifier, Query, ResourceKind};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Season data for one team. Team names use understat's spelling, with
/// underscores for spaces (`Manchester_United`).
#[derive(Debug)]
pub struct TeamEndpoint<T = HttpTransport> {
    base: BaseEndpoint<T>,
}

impl<T> Clone for TeamEndpoint<T> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
        }
    }
}

impl<T: Transport> TeamEndpoint<T> {
    pub fn new(team: impl Into<Identifier>, session: Arc<T>, config: Arc<ClientConfig>) -> Self {
        Self {
            base: BaseEndpoint::new(team, session, config),
        }
    }

    pub fn team(&self) -> &Identifier {
        self.base.identifier()
    }

    /// Fetch the block named `query` for `season`.
    ///
    /// `query` is one of `playersData`, `datesData`, `statisticsData`. A
    /// failed request is reported as `InvalidTeam`.
    pub async fn get_data(&self, season: &str, query: &str) -> Result<Value> {
        let team = self.base.single(Self::KIND)?;
        let args = check_args(Self::KIND, None, Some(season), None)?;
        let query = Self::KIND.check_query(query)?;
        self.base.fetch(Self::KIND, team, args.season, query).await
    }

    /// Season totals for each player of the team.
    pub async fn get_player_data(&self, season: &str) -> Result<Value> {
        self.get_data(season, Query::Players.as_str()).await
    }

    /// Match-level data for the team's fixtures.
    pub async fn get_match_data(&self, season: &str) -> Result<Value> {
        self.get_data(season, Query::Dates.as_str()).await
    }

    /// Data split by game context: situation, formation, game state, timing,
    /// shot zone, attack speed and shot result.
    pub async fn get_context_data(&self, season: &str) -> Result<Value> {
        self.get_data(season, Query::Statistics.as_str()).await
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

impl<T: Transport> Endpoint for TeamEndpoint<T> {
    type Transport = T;

    const KIND: ResourceKind = ResourceKind::Team;

    fn from_base(base: BaseEndpoint<T>) -> Self {
        Self { base }
    }

    fn base(&self) -> &BaseEndpoint<T> {
        &self.base
    }
}

impl<T: Transport> fmt::Display for TeamEndpoint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.base.fmt_repr(Self::KIND, f)
    }
}
