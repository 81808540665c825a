//! Resource kinds and the data blocks each one serves.

use crate::error::{Result, UnderstatError};
use std::fmt;

/// The four addressable understat resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    League,
    Player,
    Team,
    Match,
}

impl ResourceKind {
    /// URL path segment, as in `https://understat.com/<segment>/...`.
    pub fn segment(&self) -> &'static str {
        match self {
            ResourceKind::League => "league",
            ResourceKind::Player => "player",
            ResourceKind::Team => "team",
            ResourceKind::Match => "match",
        }
    }

    /// Name of the AJAX action serving this kind's data.
    pub fn action(&self) -> &'static str {
        match self {
            ResourceKind::League => "getLeagueData",
            ResourceKind::Player => "getPlayerData",
            ResourceKind::Team => "getTeamData",
            ResourceKind::Match => "getMatchData",
        }
    }

    /// Argument name of the identifier, used in error messages.
    pub fn argument(&self) -> &'static str {
        match self {
            ResourceKind::Match => "match",
            _ => self.segment(),
        }
    }

    /// Name of the endpoint type serving this kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            ResourceKind::League => "LeagueEndpoint",
            ResourceKind::Player => "PlayerEndpoint",
            ResourceKind::Team => "TeamEndpoint",
            ResourceKind::Match => "MatchEndpoint",
        }
    }

    /// League and team pages are per season.
    pub fn requires_season(&self) -> bool {
        matches!(self, ResourceKind::League | ResourceKind::Team)
    }

    /// Data blocks available on this kind's page.
    pub fn queries(&self) -> &'static [Query] {
        match self {
            ResourceKind::League => &[Query::Teams, Query::Dates, Query::Players],
            ResourceKind::Player => &[Query::Matches, Query::Shots, Query::Groups],
            ResourceKind::Team => &[Query::Players, Query::Dates, Query::Statistics],
            ResourceKind::Match => &[Query::Shots, Query::Rosters, Query::MatchInfo],
        }
    }

    /// Public data operations of this kind's endpoint, in declaration order.
    pub fn operations(&self) -> &'static [&'static str] {
        match self {
            ResourceKind::League => &["get_team_data", "get_match_data", "get_player_data"],
            ResourceKind::Player => &["get_match_data", "get_shot_data", "get_season_data"],
            ResourceKind::Team => &["get_player_data", "get_match_data", "get_context_data"],
            ResourceKind::Match => &["get_shot_data", "get_roster_data", "get_match_info"],
        }
    }

    /// Resolve an operation name to the data block it reads.
    pub fn operation_query(&self, operation: &str) -> Result<Query> {
        self.operations()
            .iter()
            .position(|op| *op == operation)
            .map(|i| self.queries()[i])
            .ok_or_else(|| UnderstatError::UnknownOperation {
                kind: *self,
                operation: operation.to_string(),
                available: String::new(),
            })
    }

    /// Validate a raw query name against this kind's data blocks.
    pub fn check_query(&self, name: &str) -> Result<Query> {
        self.queries()
            .iter()
            .copied()
            .find(|q| q.as_str() == name)
            .ok_or_else(|| UnderstatError::InvalidQuery {
                query: name.to_string(),
            })
    }

    /// Whether `query`'s block is a JSON array on this kind's page rather
    /// than an object. Match shots are keyed by side; player shots are not.
    pub fn is_list_block(&self, query: Query) -> bool {
        match query {
            Query::Dates | Query::Matches | Query::Players => true,
            Query::Shots => *self == ResourceKind::Player,
            _ => false,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

/// A named data block embedded in an understat page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Query {
    Teams,
    Dates,
    Players,
    Statistics,
    Matches,
    Shots,
    Groups,
    Rosters,
    MatchInfo,
}

impl Query {
    /// Variable name in the HTML page.
    pub fn as_str(&self) -> &'static str {
        match self {
            Query::Teams => "teamsData",
            Query::Dates => "datesData",
            Query::Players => "playersData",
            Query::Statistics => "statisticsData",
            Query::Matches => "matchesData",
            Query::Shots => "shotsData",
            Query::Groups => "groupsData",
            Query::Rosters => "rostersData",
            Query::MatchInfo => "match_info",
        }
    }

    /// Key in the AJAX JSON payload.
    pub fn json_key(&self) -> &'static str {
        match self {
            Query::Teams => "teams",
            Query::Dates => "dates",
            Query::Players => "players",
            Query::Statistics => "statistics",
            Query::Matches => "matches",
            Query::Shots => "shots",
            Query::Groups => "groups",
            Query::Rosters => "rosters",
            Query::MatchInfo => "tmpl",
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ResourceKind; 4] = [
        ResourceKind::League,
        ResourceKind::Player,
        ResourceKind::Team,
        ResourceKind::Match,
    ];

    #[test]
    fn test_every_operation_has_a_query() {
        for kind in ALL {
            assert_eq!(kind.operations().len(), kind.queries().len());
            for op in kind.operations() {
                assert!(kind.operation_query(op).is_ok(), "{kind} {op}");
            }
        }
    }

    #[test]
    fn test_operation_query_mapping() {
        assert_eq!(
            ResourceKind::League.operation_query("get_match_data").unwrap(),
            Query::Dates
        );
        assert_eq!(
            ResourceKind::Team.operation_query("get_context_data").unwrap(),
            Query::Statistics
        );
        assert_eq!(
            ResourceKind::Player.operation_query("get_season_data").unwrap(),
            Query::Groups
        );
        assert_eq!(
            ResourceKind::Match.operation_query("get_match_info").unwrap(),
            Query::MatchInfo
        );
    }

    #[test]
    fn test_unknown_operation() {
        match ResourceKind::Match.operation_query("get_team_data") {
            Err(UnderstatError::UnknownOperation {
                kind,
                operation,
                available,
            }) => {
                assert_eq!(kind, ResourceKind::Match);
                assert_eq!(operation, "get_team_data");
                assert!(available.is_empty());
            }
            other => panic!("Expected UnknownOperation, got {:?}", other),
        }
    }

    #[test]
    fn test_check_query() {
        assert_eq!(
            ResourceKind::Team.check_query("statisticsData").unwrap(),
            Query::Statistics
        );
        // datesData is a league/team block, not a match block
        match ResourceKind::Match.check_query("datesData") {
            Err(UnderstatError::InvalidQuery { query }) => assert_eq!(query, "datesData"),
            other => panic!("Expected InvalidQuery, got {:?}", other),
        }
    }

    #[test]
    fn test_list_blocks() {
        assert!(ResourceKind::League.is_list_block(Query::Dates));
        assert!(ResourceKind::League.is_list_block(Query::Players));
        assert!(ResourceKind::Player.is_list_block(Query::Shots));
        assert!(ResourceKind::Player.is_list_block(Query::Matches));
        assert!(!ResourceKind::Match.is_list_block(Query::Shots));
        assert!(!ResourceKind::League.is_list_block(Query::Teams));
        assert!(!ResourceKind::Team.is_list_block(Query::Statistics));
        assert!(!ResourceKind::Player.is_list_block(Query::Groups));
    }

    #[test]
    fn test_requires_season() {
        assert!(ResourceKind::League.requires_season());
        assert!(ResourceKind::Team.requires_season());
        assert!(!ResourceKind::Player.requires_season());
        assert!(!ResourceKind::Match.requires_season());
    }

    #[test]
    fn test_query_names() {
        assert_eq!(Query::MatchInfo.as_str(), "match_info");
        assert_eq!(Query::MatchInfo.json_key(), "tmpl");
        assert_eq!(Query::Statistics.to_string(), "statisticsData");
    }
}
