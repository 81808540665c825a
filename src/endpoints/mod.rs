//! Endpoints for the four understat resources.
//!
//! An endpoint owns an [`Identifier`] and a handle on the client's shared
//! session. Data operations need a single identifier; an endpoint built
//! from several identifiers is a collection of single-identifier endpoints
//! reachable through [`Endpoint::item_at`] and [`Endpoint::iter`].

pub mod league;
pub mod matches;
pub mod player;
pub mod team;


pub use league::LeagueEndpoint;
pub use matches::MatchEndpoint;
pub use player::PlayerEndpoint;
pub use team::TeamEndpoint;

use crate::config::ClientConfig;
use crate::core::{build_request, extract, Transport};
use crate::error::{Result, UnderstatError};
use crate::types::{Identifier, Query, ResourceKind, Season};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// State shared by every concrete endpoint.
#[derive(Debug)]
pub struct BaseEndpoint<T> {
    identifier: Identifier,
    session: Arc<T>,
    config: Arc<ClientConfig>,
}

impl<T> Clone for BaseEndpoint<T> {
    fn clone(&self) -> Self {
        Self {
            identifier: self.identifier.clone(),
            session: Arc::clone(&self.session),
            config: Arc::clone(&self.config),
        }
    }
}

impl<T: Transport> BaseEndpoint<T> {
    pub fn new(identifier: impl Into<Identifier>, session: Arc<T>, config: Arc<ClientConfig>) -> Self {
        Self {
            identifier: identifier.into(),
            session,
            config,
        }
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn session(&self) -> &Arc<T> {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Single-identifier endpoint for `index`, on the same session.
    fn item(&self, index: usize) -> Option<Self> {
        let id = self.identifier.get(index)?;
        Some(Self {
            identifier: Identifier::Single(id.to_string()),
            session: Arc::clone(&self.session),
            config: Arc::clone(&self.config),
        })
    }

    /// The identifier, provided it is a single one.
    pub(crate) fn single(&self, kind: ResourceKind) -> Result<&str> {
        self.identifier
            .as_single()
            .ok_or_else(|| UnderstatError::TypeMismatch {
                kind,
                found: format!("{} identifiers", self.identifier.len()),
            })
    }

    /// Request `identifier`'s page and extract `query` from it.
    ///
    /// HTTP failures become the `kind`-specific error for `identifier`.
    pub(crate) async fn fetch(
        &self,
        kind: ResourceKind,
        identifier: &str,
        season: Option<Season>,
        query: Query,
    ) -> Result<Value> {
        let request = build_request(&self.config, kind, identifier, season);
        debug!(%kind, identifier, %query, url = %request.url, "fetching");

        let response = self
            .session
            .fetch(&request)
            .await?
            .error_for_status()
            .map_err(|source| UnderstatError::for_kind(kind, identifier, source))?;

        extract(&response.text, kind, query, self.config.mode)
    }

    fn fmt_repr(&self, kind: ResourceKind, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.identifier {
            Identifier::Single(id) => write!(f, "<{} {}>", kind.type_name(), id),
            Identifier::Multiple(_) => write!(f, "<{}>", kind.type_name()),
        }
    }
}

/// Collection behaviour common to every endpoint.
pub trait Endpoint: Sized + fmt::Display {
    type Transport: Transport;

    const KIND: ResourceKind;

    fn from_base(base: BaseEndpoint<Self::Transport>) -> Self;

    fn base(&self) -> &BaseEndpoint<Self::Transport>;

    fn identifier(&self) -> &Identifier {
        self.base().identifier()
    }

    /// Number of identifiers; 1 for a single identifier.
    fn len(&self) -> usize {
        self.base().identifier().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// New endpoint of the same kind scoped to the identifier at `index`.
    fn item_at(&self, index: usize) -> Result<Self> {
        self.base()
            .item(index)
            .map(Self::from_base)
            .ok_or(UnderstatError::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    /// Single-identifier endpoints, front to back.
    fn iter(&self) -> Iter<'_, Self> {
        Iter {
            endpoint: self,
            index: 0,
        }
    }

    /// Names accepted by the endpoint's `call`.
    fn operations() -> &'static [&'static str] {
        Self::KIND.operations()
    }
}

/// Iterator over the single-identifier endpoints of an [`Endpoint`].
#[derive(Debug)]
pub struct Iter<'a, E> {
    endpoint: &'a E,
    index: usize,
}

impl<E: Endpoint> Iterator for Iter<'_, E> {
    type Item = E;

    fn next(&mut self) -> Option<E> {
        let item = self.endpoint.base().item(self.index).map(E::from_base)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.endpoint.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<E: Endpoint> ExactSizeIterator for Iter<'_, E> {}
