//! Endpoint requests against a mock understat server

use understat::{ClientConfig, ExtractionMode, Transport, UnderstatClient, UnderstatError};
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

const PLAYER_PAGE: &str = include_str!("fixtures/player/647.html");
const LEAGUE_ACTION: &str = include_str!("fixtures/action/getLeagueData/EPL/2019.json");

fn client(server: &MockServer, mode: ExtractionMode) -> UnderstatClient {
    let config = ClientConfig::default()
        .with_base_url(server.uri())
        .with_mode(mode);
    UnderstatClient::with_config(config).unwrap()
}

#[cfg(test)]
mod http_tests {
    use super::*;

    #[tokio::test]
    async fn test_player_page_is_fetched_and_parsed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/player/647"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PLAYER_PAGE))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client(&mock_server, ExtractionMode::Html);
        let shots = client.player("647").get_shot_data().await.unwrap();

        assert_eq!(shots.as_array().map(Vec::len), Some(6));
    }

    #[tokio::test]
    async fn test_json_mode_sends_ajax_header() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/action/getLeagueData/EPL/2019"))
            .and(header("x-requested-with", "XMLHttpRequest"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/json")
                    .set_body_string(LEAGUE_ACTION),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client(&mock_server, ExtractionMode::Json);
        let teams = client.league("EPL").get_team_data("2019").await.unwrap();

        assert_eq!(teams["87"]["title"], "Liverpool");
    }

    #[tokio::test]
    async fn test_not_found_is_invalid_player() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/player/0"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = client(&mock_server, ExtractionMode::Html);
        match client.player("0").get_match_data().await {
            Err(UnderstatError::InvalidPlayer { player, source }) => {
                assert_eq!(player, "0");
                let source = source.unwrap();
                assert_eq!(source.status, 404);
                assert_eq!(source.url, format!("{}/player/0", mock_server.uri()));
            }
            other => panic!("Expected InvalidPlayer, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_server_error_is_invalid_match() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/match/11652"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = client(&mock_server, ExtractionMode::Html);
        let err = client.r#match("11652").get_roster_data().await.unwrap_err();

        assert_eq!(err.to_string(), "11652 is not a valid match");
        match err {
            UnderstatError::InvalidMatch { source: Some(source), .. } => {
                assert!(source.to_string().starts_with("503 Server Error"));
            }
            other => panic!("Expected InvalidMatch, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_season_sends_no_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = client(&mock_server, ExtractionMode::Html);
        let result = client.team("Arsenal").get_player_data("1999").await;

        assert!(matches!(result, Err(UnderstatError::InvalidSeason { .. })));
    }

    #[tokio::test]
    async fn test_session_cookies_are_sent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/player/647"))
            .and(header("cookie", "PHPSESSID=abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PLAYER_PAGE))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client(&mock_server, ExtractionMode::Html);
        client.session().set_cookie("PHPSESSID", "abc123");
        assert_eq!(client.session().cookies().as_deref(), Some("PHPSESSID=abc123"));

        client.player("647").get_season_data().await.unwrap();
    }

    #[tokio::test]
    async fn test_close_shuts_http_session() {
        let mock_server = MockServer::start().await;
        let client = client(&mock_server, ExtractionMode::Html);
        let session = std::sync::Arc::clone(client.session());

        client.close();

        assert!(session.is_closed());
        assert!(matches!(
            session.fetch(&understat::core::Request::get(mock_server.uri())).await,
            Err(UnderstatError::SessionClosed)
        ));
    }
}
