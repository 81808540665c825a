//! Extraction of the data blocks understat embeds in its pages.
//!
//! Pages carry their data as JavaScript assignments of the form
//!
//! ```text
//! var teamsData = JSON.parse('\x7B\x2287\x22\x3A...');
//! ```
//!
//! where the argument is a JavaScript string literal holding hex-escaped
//! JSON. The AJAX endpoints return plain JSON objects keyed by short names
//! (`teams`, `shots`, ...) instead.

use crate::config::ExtractionMode;
use crate::error::{Result, UnderstatError};
use crate::types::{Query, ResourceKind};
use serde_json::{Map, Value};
use tracing::debug;

/// Extract `query` from a `kind` response body according to `mode`.
pub fn extract(document: &str, kind: ResourceKind, query: Query, mode: ExtractionMode) -> Result<Value> {
    match mode {
        ExtractionMode::Html => parse(document, query.as_str()),
        ExtractionMode::Json => project(document, kind, query),
    }
}

/// Find the block tagged `query` in an HTML document and decode it.
///
/// The first occurrence of `query` is taken; the payload is whatever lies
/// between the next `(` and the `)` that follows it, minus the quotes.
pub fn parse(document: &str, query: &str) -> Result<Value> {
    let query_index = document
        .find(query)
        .ok_or_else(|| UnderstatError::InvalidQuery {
            query: query.to_string(),
        })?;

    let malformed = |reason: &str| UnderstatError::MalformedData {
        query: query.to_string(),
        reason: reason.to_string(),
    };

    let open = document[query_index..]
        .find('(')
        .map(|i| query_index + i + 1)
        .ok_or_else(|| malformed("no opening parenthesis after the query"))?;
    let close = document[open..]
        .find(')')
        .map(|i| open + i)
        .ok_or_else(|| malformed("no closing parenthesis"))?;

    let literal = strip_quotes(document[open..close].trim())
        .ok_or_else(|| malformed("argument is not a quoted string"))?;
    let json = unescape_js(literal);

    let value = serde_json::from_str(&json).map_err(|source| UnderstatError::Parse {
        query: query.to_string(),
        source,
    })?;
    debug!(query, bytes = json.len(), "extracted embedded data");
    Ok(value)
}

/// Take `query`'s key out of an AJAX JSON payload.
///
/// A missing key is an empty collection of the block's usual shape: the
/// response was valid but carried no data for that block.
pub fn project(document: &str, kind: ResourceKind, query: Query) -> Result<Value> {
    let value: Value = serde_json::from_str(document).map_err(|source| UnderstatError::Parse {
        query: query.as_str().to_string(),
        source,
    })?;

    match value {
        Value::Object(mut map) => Ok(map.remove(query.json_key()).unwrap_or_else(|| {
            if kind.is_list_block(query) {
                Value::Array(Vec::new())
            } else {
                Value::Object(Map::new())
            }
        })),
        _ => Err(UnderstatError::MalformedData {
            query: query.as_str().to_string(),
            reason: "response is not a JSON object".to_string(),
        }),
    }
}

fn strip_quotes(literal: &str) -> Option<&str> {
    ['\'', '"']
        .into_iter()
        .find_map(|q| literal.strip_prefix(q)?.strip_suffix(q))
}

/// Decode the escapes of a JavaScript string literal.
///
/// Unknown escapes resolve to the escaped character itself, as in
/// JavaScript (`\'` is `'`, `\/` is `/`).
pub fn unescape_js(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    let mut chars = literal.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escaped) = chars.next() else {
            out.push('\\');
            break;
        };
        match escaped {
            'x' => match take_hex(&mut chars, 2) {
                Some(code) => out.push(char::from(code as u8)),
                None => out.push('x'),
            },
            'u' => match take_hex(&mut chars, 4) {
                Some(high @ 0xD800..=0xDBFF) => {
                    let low = take_low_surrogate(&mut chars);
                    let code = low.map(|low| 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00));
                    out.push(code.and_then(char::from_u32).unwrap_or(char::REPLACEMENT_CHARACTER));
                }
                Some(code) => out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)),
                None => out.push('u'),
            },
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            other => out.push(other),
        }
    }
    out
}

/// Consume exactly `digits` hex digits, or nothing.
fn take_hex(chars: &mut std::str::Chars<'_>, digits: usize) -> Option<u32> {
    let lookahead: String = chars.clone().take(digits).collect();
    if lookahead.len() != digits || !lookahead.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    for _ in 0..digits {
        chars.next();
    }
    u32::from_str_radix(&lookahead, 16).ok()
}

fn take_low_surrogate(chars: &mut std::str::Chars<'_>) -> Option<u32> {
    let mut probe = chars.clone();
    if probe.next() != Some('\\') || probe.next() != Some('u') {
        return None;
    }
    let low = take_hex(&mut probe, 4).filter(|low| (0xDC00..=0xDFFF).contains(low))?;
    *chars = probe;
    Some(low)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const LEAGUE_PAGE: &str = include_str!("../../tests/fixtures/league/EPL/2019.html");
    const MATCH_PAGE: &str = include_str!("../../tests/fixtures/match/11652.html");

    fn page(name: &str, literal: &str) -> String {
        format!(
            "<html><body><script>\n\tvar {} = JSON.parse('{}');\n</script></body></html>",
            name, literal
        )
    }

    #[test]
    fn test_parse_teams_data_from_league_page() {
        let data = parse(LEAGUE_PAGE, "teamsData").unwrap();
        let teams = data.as_object().unwrap();
        assert_eq!(teams.len(), 20);
        assert_eq!(teams["87"]["title"], "Liverpool");
    }

    #[test]
    fn test_parse_picks_the_requested_block() {
        let dates = parse(LEAGUE_PAGE, "datesData").unwrap();
        assert!(dates.is_array());
        let players = parse(LEAGUE_PAGE, "playersData").unwrap();
        let names: Vec<_> = players
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["player_name"].as_str().unwrap())
            .collect();
        assert!(names.contains(&"Harry Kane"));
        // \u escapes decode to the original characters
        assert!(names.contains(&"Martin Ødegaard"));
    }

    #[test]
    fn test_parse_match_info() {
        let info = parse(MATCH_PAGE, "match_info").unwrap();
        assert_eq!(info["team_h"], "Manchester United");
        assert_eq!(info["h_goals"], "4");
    }

    #[test]
    fn test_parse_missing_query() {
        match parse(LEAGUE_PAGE, "rostersData") {
            Err(UnderstatError::InvalidQuery { query }) => assert_eq!(query, "rostersData"),
            other => panic!("Expected InvalidQuery, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_round_trip_matches_direct_decoding() {
        let expected = json!({"h": [{"id": "1", "xG": "0.05", "player": "O'Neil"}], "a": []});
        let raw = serde_json::to_string(&expected).unwrap();
        let literal: String = raw
            .chars()
            .map(|c| match c {
                '"' | '{' | '}' | '[' | ']' | ':' | ',' | '\'' => format!("\\x{:02X}", c as u32),
                c => c.to_string(),
            })
            .collect();

        let data = parse(&page("shotsData", &literal), "shotsData").unwrap();
        assert_eq!(data, expected);
        assert_eq!(
            serde_json::to_string(&data).unwrap(),
            serde_json::to_string(&serde_json::from_str::<Value>(&raw).unwrap()).unwrap()
        );
    }

    #[test]
    fn test_parse_without_parenthesis_is_malformed() {
        let doc = "<script>var teamsData = 42;</script>";
        assert!(matches!(
            parse(doc, "teamsData"),
            Err(UnderstatError::MalformedData { .. })
        ));
        let doc = "<script>var teamsData = JSON.parse('\\x7B\\x7D'";
        assert!(matches!(
            parse(doc, "teamsData"),
            Err(UnderstatError::MalformedData { .. })
        ));
    }

    #[test]
    fn test_parse_invalid_json_is_a_parse_error() {
        let doc = page("teamsData", "\\x7Bnot json");
        match parse(&doc, "teamsData") {
            Err(UnderstatError::Parse { query, .. }) => assert_eq!(query, "teamsData"),
            other => panic!("Expected Parse, got {:?}", other),
        }
    }

    #[test]
    fn test_unescape_js() {
        assert_eq!(unescape_js(r"\x7B\x22a\x22\x3A1\x7D"), r#"{"a":1}"#);
        assert_eq!(unescape_js(r"it\'s"), "it's");
        assert_eq!(unescape_js(r"a\\b"), r"a\b");
        assert_eq!(unescape_js(r"Ødegaard"), "Ødegaard");
        assert_eq!(unescape_js(r"\xA0"), "\u{a0}");
        assert_eq!(unescape_js(r"😀"), "😀");
        assert_eq!(unescape_js(r"line\nbreak"), "line\nbreak");
    }

    #[test]
    fn test_unescape_js_keeps_broken_escapes() {
        assert_eq!(unescape_js(r"\xZZ"), "xZZ");
        assert_eq!(unescape_js(r"\u12"), "u12");
        assert_eq!(unescape_js("trailing\\"), "trailing\\");
        assert_eq!(unescape_js(r"\uD83D"), "\u{fffd}");
    }

    #[test]
    fn test_project() {
        let doc = r#"{"teams": {"87": {"title": "Liverpool"}}, "dates": [1, 2]}"#;
        assert_eq!(
            project(doc, ResourceKind::League, Query::Teams).unwrap(),
            json!({"87": {"title": "Liverpool"}})
        );
        assert_eq!(
            project(doc, ResourceKind::League, Query::Dates).unwrap(),
            json!([1, 2])
        );
    }

    #[test]
    fn test_project_missing_key_is_empty_of_the_block_shape() {
        let doc = r#"{"teams": {}}"#;
        assert_eq!(project(doc, ResourceKind::League, Query::Players).unwrap(), json!([]));
        assert_eq!(project(doc, ResourceKind::Team, Query::Dates).unwrap(), json!([]));
        assert_eq!(project(doc, ResourceKind::Player, Query::Shots).unwrap(), json!([]));
        assert_eq!(project(doc, ResourceKind::Player, Query::Matches).unwrap(), json!([]));
        assert_eq!(project(doc, ResourceKind::Match, Query::Shots).unwrap(), json!({}));
        assert_eq!(project(doc, ResourceKind::Team, Query::Statistics).unwrap(), json!({}));
        assert_eq!(project(doc, ResourceKind::Match, Query::MatchInfo).unwrap(), json!({}));
    }

    #[test]
    fn test_project_rejects_bad_payloads() {
        assert!(matches!(
            project("<html>", ResourceKind::League, Query::Teams),
            Err(UnderstatError::Parse { .. })
        ));
        assert!(matches!(
            project("[1, 2]", ResourceKind::League, Query::Teams),
            Err(UnderstatError::MalformedData { .. })
        ));
    }

    #[test]
    fn test_extract_dispatches_on_mode() {
        let html = extract(MATCH_PAGE, ResourceKind::Match, Query::Rosters, ExtractionMode::Html).unwrap();
        assert!(html["h"].is_object());
        let json = extract(
            r#"{"rosters": {"h": {}}}"#,
            ResourceKind::Match,
            Query::Rosters,
            ExtractionMode::Json,
        )
        .unwrap();
        assert_eq!(json, json!({"h": {}}));
    }
}
