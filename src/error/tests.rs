//! Unit tests for error handling

use super::*;
use std::io;

#[cfg(test)]
mod status_error_tests {
    use super::*;

    #[test]
    fn test_client_and_server_classes() {
        let not_found = StatusError::new(404, "Not Found", "https://understat.com/player/0");
        assert_eq!(
            not_found.to_string(),
            "404 Client Error: Not Found for url: https://understat.com/player/0"
        );

        let down = StatusError::new(503, "Service Unavailable", "https://understat.com/");
        assert!(down.to_string().starts_with("503 Server Error"));
    }
}

#[cfg(test)]
mod understat_error_tests {
    use super::*;
    use std::error::Error as _;

    #[tokio::test]
    async fn test_http_error_conversion() {
        // Create a real HTTP error by making a request to an invalid URL
        let client = reqwest::Client::new();
        let result = client
            .get("http://invalid-url-that-does-not-exist.fake")
            .send()
            .await;
        let reqwest_error = result.unwrap_err();
        let error = UnderstatError::from(reqwest_error);

        match error {
            UnderstatError::Http(_) => (),
            _ => panic!("Expected Http error variant"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = UnderstatError::from(io_error);

        match error {
            UnderstatError::Io(_) => (),
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn test_for_kind_keeps_identifier_and_cause() {
        let source = StatusError::new(404, "Not Found", "https://understat.com/league/EFL/2019");
        let error = UnderstatError::for_kind(ResourceKind::League, "EFL", source.clone());

        assert_eq!(error.to_string(), "EFL is not a valid league");
        assert_eq!(
            error.source().map(|s| s.to_string()),
            Some(source.to_string())
        );

        let error = UnderstatError::for_kind(
            ResourceKind::Player,
            "abc",
            StatusError::new(404, "Not Found", "https://understat.com/player/abc"),
        );
        assert_eq!(error.to_string(), "abc is not a valid player or player id");

        let error = UnderstatError::for_kind(
            ResourceKind::Match,
            "0",
            StatusError::new(500, "Internal Server Error", "https://understat.com/match/0"),
        );
        match error {
            UnderstatError::InvalidMatch { match_id, source: Some(source) } => {
                assert_eq!(match_id, "0");
                assert_eq!(source.status, 500);
            }
            other => panic!("Expected InvalidMatch, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_messages() {
        let error = UnderstatError::InvalidSeason {
            season: "2013".to_string(),
        };
        assert_eq!(error.to_string(), "2013 is not a valid season");

        let error = UnderstatError::InvalidQuery {
            query: "shotsData".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "There is no html entry matching the query shotsData"
        );

        let error = UnderstatError::TypeMismatch {
            kind: ResourceKind::Match,
            found: "3 identifiers".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "`match` must be a single identifier, got 3 identifiers"
        );
    }

    #[test]
    fn test_with_available_operations() {
        let error = ResourceKind::Player
            .operation_query("get_team_data")
            .unwrap_err()
            .with_available_operations();

        assert_eq!(
            error.to_string(),
            "PlayerEndpoint has no operation `get_team_data`. Available operations: \
             get_match_data, get_shot_data, get_season_data"
        );
    }

    #[test]
    fn test_with_available_operations_leaves_other_errors() {
        let error = UnderstatError::SessionClosed.with_available_operations();
        assert!(matches!(error, UnderstatError::SessionClosed));
    }

    #[test]
    fn test_driver_unavailable_is_actionable() {
        let error = UnderstatError::DriverUnavailable {
            driver: "Chrome/Chromium",
            env_var: "UNDERSTAT_CHROME",
            source: "could not find chrome executable".into(),
        };

        let error_string = error.to_string();
        assert!(error_string.contains("Could not start Chrome/Chromium"));
        assert!(error_string.contains("UNDERSTAT_CHROME"));
        assert_eq!(
            error.source().map(|s| s.to_string()),
            Some("could not find chrome executable".to_string())
        );
    }

    #[test]
    fn test_timeout_error() {
        let error = UnderstatError::Timeout {
            condition: "visibility of //div".to_string(),
            timeout: Duration::from_secs(5),
        };
        assert_eq!(
            error.to_string(),
            "Timed out after 5s waiting for visibility of //div"
        );
    }

    #[test]
    fn test_error_source_chain() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = UnderstatError::from(io_error);

        // Test that the error implements std::error::Error properly
        let error_trait: &dyn std::error::Error = &error;
        assert!(error_trait.source().is_some());
    }

    #[test]
    fn test_error_debug_formatting() {
        let error = UnderstatError::SessionClosed;
        let debug_string = format!("{:?}", error);
        assert_eq!(debug_string, "SessionClosed");
    }

    #[test]
    fn test_result_type_alias_error() {
        fn test_function() -> Result<String> {
            Err(UnderstatError::SessionClosed)
        }

        match test_function().unwrap_err() {
            UnderstatError::SessionClosed => (),
            _ => panic!("Expected SessionClosed error"),
        }
    }
}
