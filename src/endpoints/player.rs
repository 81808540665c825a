//! Player endpoint: `https://understat.com/player/<player_id>`

use super::{BaseEndpoint, Endpoint};
use crate::config::ClientConfig;
use crate::core::{HttpTransport, Transport};
use crate::error::Result;
use crate::types::{Identifier, Query, ResourceKind};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Career data for one player, addressed by understat's numeric player id.
///
/// # Examples
///
/// ```rust,no_run
/// use understat::UnderstatClient;
///
/// # async fn example() -> understat::Result<()> {
/// let client = UnderstatClient::new()?;
/// let shots = client.player("647").get_shot_data().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PlayerEndpoint<T = HttpTransport> {
    base: BaseEndpoint<T>,
}

impl<T> Clone for PlayerEndpoint<T> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
        }
    }
}

impl<T: Transport> PlayerEndpoint<T> {
    pub fn new(player: impl Into<Identifier>, session: Arc<T>, config: Arc<ClientConfig>) -> Self {
        Self {
            base: BaseEndpoint::new(player, session, config),
        }
    }

    /// Player id(s) this endpoint was built with.
    pub fn player(&self) -> &Identifier {
        self.base.identifier()
    }

    /// Fetch the block named `query`: `matchesData`, `shotsData` or
    /// `groupsData`. A failed request is reported as `InvalidPlayer`.
    pub async fn get_data(&self, query: &str) -> Result<Value> {
        let player = self.base.single(Self::KIND)?;
        let query = Self::KIND.check_query(query)?;
        self.base.fetch(Self::KIND, player, None, query).await
    }

    /// Match-level data for every game the player appeared in.
    pub async fn get_match_data(&self) -> Result<Value> {
        self.get_data(Query::Matches.as_str()).await
    }

    /// Every shot the player has taken.
    pub async fn get_shot_data(&self) -> Result<Value> {
        self.get_data(Query::Shots.as_str()).await
    }

    /// Season-level data, with breakdowns by position, situation, shot zone
    /// and shot type.
    pub async fn get_season_data(&self) -> Result<Value> {
        self.get_data(Query::Groups.as_str()).await
    }

    /// Run the operation named `operation`. Player pages are not per
    /// season, so `season` is ignored.
    pub async fn call(&self, operation: &str, _season: Option<&str>) -> Result<Value> {
        let query = Self::KIND.operation_query(operation)?;
        self.get_data(query.as_str()).await
    }
}

impl<T: Transport> Endpoint for PlayerEndpoint<T> {
    type Transport = T;

    const KIND: ResourceKind = ResourceKind::Player;

    fn from_base(base: BaseEndpoint<T>) -> Self {
        Self { base }
    }

    fn base(&self) -> &BaseEndpoint<T> {
        &self.base
    }
}

impl<T: Transport> fmt::Display for PlayerEndpoint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.base.fmt_repr(Self::KIND, f)
    }
}
