//! Season type for understat league and team pages.

use crate::error::{Result, UnderstatError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Earliest season covered by understat.
pub const MIN_SEASON: u16 = 2014;

/// Starting year of a season, e.g. `2019` for 2019/2020.
///
/// Only [`Season::new`] and its conversions build one, so every value is
/// at least [`MIN_SEASON`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Season(u16);

impl Season {
    /// Create a season, rejecting years before [`MIN_SEASON`].
    pub fn new(year: u16) -> Result<Self> {
        if year < MIN_SEASON {
            return Err(UnderstatError::InvalidSeason {
                season: year.to_string(),
            });
        }
        Ok(Self(year))
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for Season {
    type Error = UnderstatError;

    fn try_from(year: u16) -> Result<Self> {
        Self::new(year)
    }
}

impl From<Season> for u16 {
    fn from(season: Season) -> Self {
        season.0
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = UnderstatError;

    fn from_str(s: &str) -> Result<Self> {
        let year = s.trim().parse::<u16>().map_err(|_| UnderstatError::InvalidSeason {
            season: s.to_string(),
        })?;
        Self::new(year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_from_str() {
        let season: Season = "2019".parse().unwrap();
        assert_eq!(season.as_u16(), 2019);
        assert_eq!(season.to_string(), "2019");
    }

    #[test]
    fn test_season_lower_bound_is_inclusive() {
        assert!(Season::new(2014).is_ok());
        match Season::new(2013) {
            Err(UnderstatError::InvalidSeason { season }) => assert_eq!(season, "2013"),
            other => panic!("Expected InvalidSeason, got {:?}", other),
        }
    }

    #[test]
    fn test_season_not_a_number() {
        match "twenty-nineteen".parse::<Season>() {
            Err(UnderstatError::InvalidSeason { season }) => {
                assert_eq!(season, "twenty-nineteen")
            }
            other => panic!("Expected InvalidSeason, got {:?}", other),
        }
        assert!("".parse::<Season>().is_err());
        assert!("-2019".parse::<Season>().is_err());
    }

    #[test]
    fn test_season_deserialize_is_validated() {
        let season: Season = serde_json::from_str("2019").unwrap();
        assert_eq!(season, Season::new(2019).unwrap());
        assert_eq!(serde_json::to_string(&season).unwrap(), "2019");

        let err = serde_json::from_str::<Season>("1999").unwrap_err();
        assert!(err.to_string().contains("1999 is not a valid season"));
        assert_eq!(Season::try_from(2013).ok(), None);
        assert_eq!(u16::from(season), 2019);
    }
}
