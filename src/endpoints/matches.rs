//! Match endpoint: `https://understat.com/match/<match_id>`

use super::{BaseEndpoint, Endpoint};
use crate::config::ClientConfig;
use crate::core::{HttpTransport, Transport};
use crate::error::Result;
use crate::types::{Identifier, Query, ResourceKind};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

#[derive(Debug)]
pub struct MatchEndpoint<T = HttpTransport> {
    base: BaseEndpoint<T>,
}

impl<T> Clone for MatchEndpoint<T> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
        }
    }
}

impl<T: Transport> MatchEndpoint<T> {
    pub fn new(match_id: impl Into<Identifier>, session: Arc<T>, config: Arc<ClientConfig>) -> Self {
        Self {
            base: BaseEndpoint::new(match_id, session, config),
        }
    }

    pub fn match_id(&self) -> &Identifier {
        self.base.identifier()
    }

    /// Fetch the block named `query`: `shotsData`, `rostersData` or
    /// `match_info`. A failed request is reported as `InvalidMatch`.
    pub async fn get_data(&self, query: &str) -> Result<Value> {
        let match_id = self.base.single(Self::KIND)?;
        let query = Self::KIND.check_query(query)?;
        self.base.fetch(Self::KIND, match_id, None, query).await
    }

    /// Shots of both sides, keyed `h` and `a`.
    pub async fn get_shot_data(&self) -> Result<Value> {
        self.get_data(Query::Shots.as_str()).await
    }

    /// Per-player lineup data for each side.
    pub async fn get_roster_data(&self) -> Result<Value> {
        self.get_data(Query::Rosters.as_str()).await
    }

    pub async fn get_match_info(&self) -> Result<Value> {
        self.get_data(Query::MatchInfo.as_str()).await
    }

    /// Run the operation named `operation`; `season` is ignored.
    pub async fn call(&self, operation: &str, _season: Option<&str>) -> Result<Value> {
        let query = Self::KIND.operation_query(operation)?;
        self.get_data(query.as_str()).await
    }
}

impl<T: Transport> Endpoint for MatchEndpoint<T> {
    type Transport = T;

    const KIND: ResourceKind = ResourceKind::Match;

    fn from_base(base: BaseEndpoint<T>) -> Self {
        Self { base }
    }

    fn base(&self) -> &BaseEndpoint<T> {
        &self.base
    }
}

impl<T: Transport> fmt::Display for MatchEndpoint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.base.fmt_repr(Self::KIND, f)
    }
}
