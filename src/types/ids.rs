//! Identifier types for understat resources.

use crate::error::{Result, UnderstatError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One or more identifiers of a single resource kind.
///
/// A `Single` identifier can be fetched directly. A `Multiple` identifier
/// has to be fanned out first, by indexing or iterating the endpoint that
/// owns it.
///
/// # Examples
///
/// ```rust
/// use understat::Identifier;
///
/// let one = Identifier::from("EPL");
/// let many = Identifier::from(vec!["EPL", "Bundesliga"]);
/// assert_eq!(one.len(), 1);
/// assert_eq!(many.len(), 2);
/// assert_eq!(many.get(1), Some("Bundesliga"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Single(String),
    Multiple(Vec<String>),
}

impl Identifier {
    pub fn len(&self) -> usize {
        match self {
            Identifier::Single(_) => 1,
            Identifier::Multiple(ids) => ids.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The identifier at `index`. A `Single` identifier answers index 0 only.
    pub fn get(&self, index: usize) -> Option<&str> {
        match self {
            Identifier::Single(id) if index == 0 => Some(id),
            Identifier::Single(_) => None,
            Identifier::Multiple(ids) => ids.get(index).map(String::as_str),
        }
    }

    /// The scalar value, if this is a `Single` identifier.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Identifier::Single(id) => Some(id),
            Identifier::Multiple(_) => None,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Single(id) => write!(f, "{}", id),
            Identifier::Multiple(ids) => write!(f, "[{}]", ids.join(", ")),
        }
    }
}

impl From<&str> for Identifier {
    fn from(id: &str) -> Self {
        Identifier::Single(id.to_string())
    }
}

impl From<String> for Identifier {
    fn from(id: String) -> Self {
        Identifier::Single(id)
    }
}

impl From<&String> for Identifier {
    fn from(id: &String) -> Self {
        Identifier::Single(id.clone())
    }
}

impl From<Vec<String>> for Identifier {
    fn from(ids: Vec<String>) -> Self {
        Identifier::Multiple(ids)
    }
}

impl From<Vec<&str>> for Identifier {
    fn from(ids: Vec<&str>) -> Self {
        Identifier::Multiple(ids.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Identifier {
    fn from(ids: &[&str]) -> Self {
        Identifier::Multiple(ids.iter().map(|id| id.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Identifier {
    fn from(ids: [&str; N]) -> Self {
        Identifier::Multiple(ids.iter().map(|id| id.to_string()).collect())
    }
}

/// Leagues covered by understat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum League {
    #[serde(rename = "EPL")]
    Epl,
    #[serde(rename = "La_Liga")]
    LaLiga,
    Bundesliga,
    #[serde(rename = "Serie_A")]
    SerieA,
    #[serde(rename = "Ligue_1")]
    Ligue1,
    #[serde(rename = "RFPL")]
    Rfpl,
}

impl League {
    pub const ALL: [League; 6] = [
        League::Epl,
        League::LaLiga,
        League::Bundesliga,
        League::SerieA,
        League::Ligue1,
        League::Rfpl,
    ];

    /// Code used in understat URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            League::Epl => "EPL",
            League::LaLiga => "La_Liga",
            League::Bundesliga => "Bundesliga",
            League::SerieA => "Serie_A",
            League::Ligue1 => "Ligue_1",
            League::Rfpl => "RFPL",
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for League {
    type Err = UnderstatError;

    /// Codes are matched exactly; `epl` is not `EPL`.
    fn from_str(s: &str) -> Result<Self> {
        League::ALL
            .into_iter()
            .find(|league| league.as_str() == s)
            .ok_or_else(|| UnderstatError::InvalidLeague {
                league: s.to_string(),
                source: None,
            })
    }
}

impl From<League> for Identifier {
    fn from(league: League) -> Self {
        Identifier::Single(league.as_str().to_string())
    }
}
