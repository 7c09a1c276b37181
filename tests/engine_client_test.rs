use gee_gateway::domain::model::{ImageQuery, IndexTimeSeriesQuery, StatisticsQuery};
use gee_gateway::{EngineError, GeoEngine, HttpGeoEngine};
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

fn client(url: &str) -> HttpGeoEngine {
    assert_ok!(HttpGeoEngine::new(url, Duration::from_secs(2), &[]))
}

#[tokio::test]
async fn test_message_field_is_a_domain_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/getStatistics");
            then.status(422).json_body(json!({"message": "paramType must be basin or landscape"}));
        })
        .await;

    let result = client(&server.base_url())
        .statistics(StatisticsQuery {
            param_type: Some(json!("county")),
            param_value: None,
        })
        .await;

    match assert_err!(result) {
        EngineError::Domain { message } => {
            assert_eq!(message, "paramType must be basin or landscape")
        }
        other => panic!("expected a domain error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_undecodable_success_body_is_a_protocol_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/getTimeSeriesByIndex");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let result = client(&server.base_url())
        .time_series_by_index(IndexTimeSeriesQuery {
            index_name: json!("NDVI"),
            scale: 30.0,
            geometry: json!([0, 0]),
        })
        .await;

    assert!(matches!(assert_err!(result), EngineError::Protocol(_)));
}

#[tokio::test]
async fn test_unreachable_engine_is_a_transport_error() {
    // Bind and drop a listener to get a port with nothing behind it.
    let port = {
        let listener = assert_ok!(std::net::TcpListener::bind("127.0.0.1:0"));
        assert_ok!(listener.local_addr()).port()
    };

    let result = client(&format!("http://127.0.0.1:{}/", port))
        .image_to_map_id(ImageQuery {
            image_name: json!("X"),
            vis_params: None,
        })
        .await;

    let err = assert_err!(result);
    assert!(!err.is_domain());
    assert!(matches!(err, EngineError::Transport(_)));
}
