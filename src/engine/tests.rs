//! Tests for engine module

use super::*;
use crate::error::Error;
use crate::http::StreamRequest;
use crate::state::{Bookmark, StateManager};
use async_trait::async_trait;
use chrono::{Duration, TimeZone};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

// ============================================================================
// Scripted transport
// ============================================================================

/// Replays canned responses and records every request it receives
#[derive(Clone)]
struct ScriptedClient {
    responses: Arc<Mutex<VecDeque<Result<Value>>>>,
    requests: Arc<Mutex<Vec<StreamRequest>>>,
    fallback: Value,
}

impl ScriptedClient {
    fn new(responses: Vec<Result<Value>>, fallback: Value) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            requests: Arc::new(Mutex::new(Vec::new())),
            fallback,
        }
    }

    fn requests(&self) -> Vec<StreamRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RestClient for ScriptedClient {
    async fn send(&self, request: &StreamRequest) -> Result<Value> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}

fn engine(client: &ScriptedClient, state: StateManager) -> SyncEngine {
    SyncEngine::new(Box::new(client.clone()), state)
}

fn context() -> SyncContext {
    SyncContext {
        timezone_id: Some(67),
        start_date: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
    }
}

fn records_of(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .filter_map(|m| match m {
            Message::Record { record, .. } => Some(record.clone()),
            _ => None,
        })
        .collect()
}

fn states_of(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .filter_map(|m| match m {
            Message::State { value } => Some(value.to_value()),
            _ => None,
        })
        .collect()
}

fn body_range(request: &StreamRequest) -> (String, String) {
    (
        request.body_str("from").unwrap().to_string(),
        request.body_str("to").unwrap().to_string(),
    )
}

// ============================================================================
// Message Tests
// ============================================================================

#[test]
fn test_message_kinds() {
    let schema = Message::schema(&StreamDefinition::clicks());
    assert!(schema.is_schema());

    let record = Message::record("clicks", json!({"transaction_id": "t"}), Utc::now());
    assert!(record.is_record());
    assert!(!record.is_state());

    let state = Message::state(crate::state::State::new());
    assert!(state.is_state());
}

#[test]
fn test_message_json_lines() {
    let at = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
    let line = Message::record("offers", json!({"network_offer_id": 1}), at)
        .to_json_line()
        .unwrap();
    let parsed: Value = serde_json::from_str(&line).unwrap();
    assert_eq!(
        parsed,
        json!({
            "type": "RECORD",
            "stream": "offers",
            "record": {"network_offer_id": 1},
            "time_extracted": "2024-01-05T00:00:00Z"
        })
    );

    let mut state = crate::state::State::new();
    state.set_bookmark("clicks", "unix_timestamp", Bookmark::Unix(5));
    let parsed: Value =
        serde_json::from_str(&Message::state(state).to_json_line().unwrap()).unwrap();
    assert_eq!(
        parsed,
        json!({"type": "STATE", "value": {"bookmarks": {"clicks": {
            "replication_key": "unix_timestamp",
            "replication_key_value": 5
        }}}})
    );
}

#[test]
fn test_schema_message_shape() {
    let offers: Value = serde_json::from_str(
        &Message::schema(&StreamDefinition::offers())
            .to_json_line()
            .unwrap(),
    )
    .unwrap();
    assert_eq!(offers["type"], "SCHEMA");
    assert_eq!(offers["key_properties"], json!(["network_offer_id"]));
    assert!(offers.get("bookmark_properties").is_none());

    let clicks: Value = serde_json::from_str(
        &Message::schema(&StreamDefinition::clicks())
            .to_json_line()
            .unwrap(),
    )
    .unwrap();
    assert_eq!(clicks["bookmark_properties"], json!(["unix_timestamp"]));
}

#[test]
fn test_json_lines_sink() {
    let mut sink = JsonLinesSink::new(Vec::new());
    sink.emit(Message::state(crate::state::State::new())).unwrap();
    sink.emit(Message::state(crate::state::State::new())).unwrap();

    let out = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(
        out,
        "{\"type\":\"STATE\",\"value\":{\"bookmarks\":{}}}\n{\"type\":\"STATE\",\"value\":{\"bookmarks\":{}}}\n"
    );
}

// ============================================================================
// SyncConfig / SyncStats Tests
// ============================================================================

#[test]
fn test_sync_config_default() {
    let config = SyncConfig::default();
    assert!(!config.emit_state_per_page);
    assert!(SyncConfig::new().with_state_per_page(true).emit_state_per_page);
}

#[test]
fn test_sync_stats_merge() {
    let mut total = SyncStats::new();
    let mut one = SyncStats::new();
    one.add_records(3);
    one.add_page();
    one.add_window();
    one.add_stream();

    total.merge(&one);
    total.merge(&one);
    assert_eq!(total.records_synced, 6);
    assert_eq!(total.pages_fetched, 2);
    assert_eq!(total.windows_synced, 2);
    assert_eq!(total.streams_synced, 2);
}

// ============================================================================
// Offers (page number, full table)
// ============================================================================

#[tokio::test]
async fn test_offers_two_pages() {
    let client = ScriptedClient::new(
        vec![
            Ok(json!({
                "offers": [
                    {"network_offer_id": 1, "date_live_until": 0},
                    {"network_offer_id": 2, "date_live_until": "2025-01-01"}
                ],
                "paging": {"page": 1, "page_size": 2, "total_count": 3}
            })),
            Ok(json!({
                "offers": [{"network_offer_id": 3, "date_live_until": ""}],
                "paging": {"page": 2, "page_size": 2, "total_count": 3}
            })),
        ],
        Value::Null,
    );
    let mut engine = engine(&client, StateManager::in_memory());
    let mut messages = Vec::new();

    let stats = engine
        .sync_stream(
            &StreamDefinition::offers(),
            &SyncContext {
                timezone_id: None,
                ..context()
            },
            Utc::now(),
            &mut messages,
        )
        .await
        .unwrap();

    assert_eq!(stats.pages_fetched, 2);
    assert_eq!(stats.records_synced, 3);
    assert!(messages[0].is_schema());

    let records = records_of(&messages);
    assert_eq!(
        records,
        vec![
            json!({"network_offer_id": 1, "date_live_until": null}),
            json!({"network_offer_id": 2, "date_live_until": "2025-01-01"}),
            json!({"network_offer_id": 3, "date_live_until": null}),
        ]
    );

    let requests = client.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].path, "/networks/offers");
    assert_eq!(requests[0].query_value("page"), Some("1"));
    assert_eq!(requests[0].query_value("page_size"), Some("2000"));
    assert_eq!(requests[1].query_value("page"), Some("2"));

    // full table: only the final, empty state
    assert_eq!(states_of(&messages), vec![json!({"bookmarks": {}})]);
    assert!(messages.last().unwrap().is_state());
}

#[tokio::test]
async fn test_state_per_page() {
    let client = ScriptedClient::new(
        vec![
            Ok(json!({"offers": [{"network_offer_id": 1}], "paging": {"page": 1, "page_size": 1, "total_count": 2}})),
            Ok(json!({"offers": [{"network_offer_id": 2}], "paging": {"page": 2, "page_size": 1, "total_count": 2}})),
        ],
        Value::Null,
    );
    let mut engine = engine(&client, StateManager::in_memory())
        .with_config(SyncConfig::new().with_state_per_page(true));
    let mut messages = Vec::new();

    engine
        .sync_stream(&StreamDefinition::offers(), &context(), Utc::now(), &mut messages)
        .await
        .unwrap();

    assert_eq!(states_of(&messages).len(), 3);
}

#[tokio::test]
async fn test_malformed_paging_is_fatal() {
    let client = ScriptedClient::new(
        vec![Ok(json!({"offers": [{"network_offer_id": 1}]}))],
        Value::Null,
    );
    let mut engine = engine(&client, StateManager::in_memory());
    let mut messages = Vec::new();

    let err = engine
        .sync_stream(&StreamDefinition::offers(), &context(), Utc::now(), &mut messages)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MalformedResponse { .. }));
    assert!(states_of(&messages).is_empty());
}

#[tokio::test]
async fn test_transport_error_aborts_stream() {
    let client = ScriptedClient::new(vec![Err(Error::http_status(500, "boom"))], Value::Null);
    let mut engine = engine(&client, StateManager::in_memory());
    let mut messages = Vec::new();

    let err = engine
        .sync_stream(&StreamDefinition::offers(), &context(), Utc::now(), &mut messages)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
    assert!(records_of(&messages).is_empty());
    assert!(states_of(&messages).is_empty());
}

// ============================================================================
// Conversions (page number, single unbounded window)
// ============================================================================

#[tokio::test]
async fn test_conversions_window_from_bookmark() {
    let state = StateManager::from_json(
        r#"{"bookmarks": {"conversions": {"replication_key": "conversion_unix_timestamp", "replication_key_value": "2024-01-01T00:00:00Z"}}}"#,
    )
    .unwrap();
    let now = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
    let jan_2 = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap().timestamp();
    let jan_3 = Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap().timestamp();

    let client = ScriptedClient::new(
        vec![
            Ok(json!({
                "conversions": [
                    {"conversion_id": "a", "conversion_unix_timestamp": jan_3},
                    {"conversion_id": "b", "conversion_unix_timestamp": jan_2}
                ],
                "paging": {"page": 1, "page_size": 2, "total_count": 3}
            })),
            Ok(json!({
                "conversions": [{"conversion_id": "c", "conversion_unix_timestamp": jan_2}],
                "paging": {"page": 2, "page_size": 2, "total_count": 3}
            })),
        ],
        Value::Null,
    );
    let mut engine = engine(&client, state);
    let mut messages = Vec::new();

    let stats = engine
        .sync_stream(&StreamDefinition::conversions(), &context(), now, &mut messages)
        .await
        .unwrap();

    let requests = client.requests();
    assert_eq!(requests.len(), 2);
    for request in &requests {
        assert_eq!(
            request.body,
            Some(json!({
                "from": "2024-01-01 00:00:00",
                "to": "2024-01-05 00:00:00",
                "timezone_id": 67,
                "show_conversions": true,
                "show_events": true
            }))
        );
    }
    assert_eq!(requests[0].query_value("page"), Some("1"));
    assert_eq!(requests[1].query_value("page"), Some("2"));

    assert_eq!(stats.windows_synced, 1);
    assert_eq!(
        engine
            .state()
            .get_bookmark("conversions", "conversion_unix_timestamp")
            .await,
        Some(Bookmark::Unix(jan_3))
    );
    assert_eq!(
        states_of(&messages).last().unwrap(),
        &json!({"bookmarks": {"conversions": {
            "replication_key": "conversion_unix_timestamp",
            "replication_key_value": jan_3
        }}})
    );
}

#[tokio::test]
async fn test_conversions_without_bookmark_uses_start_date() {
    let now = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
    let client = ScriptedClient::new(
        Vec::new(),
        json!({"conversions": [], "paging": {"page": 1, "page_size": 2000, "total_count": 0}}),
    );
    let mut engine = engine(&client, StateManager::in_memory());
    let mut messages = Vec::new();

    engine
        .sync_stream(&StreamDefinition::conversions(), &context(), now, &mut messages)
        .await
        .unwrap();

    let requests = client.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        body_range(&requests[0]),
        ("2023-01-01 00:00:00".to_string(), "2024-01-05 00:00:00".to_string())
    );
    assert!(engine
        .state()
        .get_bookmark("conversions", "conversion_unix_timestamp")
        .await
        .is_none());
}

#[tokio::test]
async fn test_bookmark_never_regresses() {
    let state = StateManager::in_memory();
    let jan_3 = Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap();
    state
        .set_bookmark("conversions", "conversion_unix_timestamp", jan_3.into())
        .await
        .unwrap();

    let client = ScriptedClient::new(
        vec![Ok(json!({
            "conversions": [{"conversion_id": "old", "conversion_unix_timestamp": jan_3.timestamp() - 3600}],
            "paging": {"page": 1, "page_size": 2000, "total_count": 1}
        }))],
        Value::Null,
    );
    let mut engine = engine(&client, state);
    let mut messages = Vec::new();

    engine
        .sync_stream(
            &StreamDefinition::conversions(),
            &context(),
            Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap(),
            &mut messages,
        )
        .await
        .unwrap();

    assert_eq!(records_of(&messages).len(), 1);
    assert_eq!(
        engine
            .state()
            .get_bookmark("conversions", "conversion_unix_timestamp")
            .await,
        Some(Bookmark::Unix(jan_3.timestamp()))
    );
}

#[tokio::test]
async fn test_reporting_stream_requires_timezone() {
    let client = ScriptedClient::new(Vec::new(), Value::Null);
    let mut engine = engine(&client, StateManager::in_memory());
    let mut messages = Vec::new();

    let err = engine
        .sync_stream(
            &StreamDefinition::conversions(),
            &SyncContext {
                timezone_id: None,
                ..context()
            },
            Utc::now(),
            &mut messages,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Config { .. }));
    assert!(client.requests().is_empty());
}

// ============================================================================
// Clicks (date cursor, bounded windows)
// ============================================================================

#[tokio::test]
async fn test_clicks_windows_and_cursor() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let state = StateManager::in_memory();
    state
        .set_bookmark(
            "clicks",
            "unix_timestamp",
            (now - Duration::days(200)).into(),
        )
        .await
        .unwrap();

    let march_5 = Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap().timestamp();
    let client = ScriptedClient::new(
        vec![
            // leading record moves the window start forward
            Ok(json!({"clicks": [{"transaction_id": "a", "unix_timestamp": march_5}]})),
            // leading record sits on the window start: window exhausted
            Ok(json!({"clicks": [{"transaction_id": "a", "unix_timestamp": march_5}]})),
        ],
        json!({"clicks": []}),
    );
    let mut engine = engine(&client, state);
    let mut messages = Vec::new();

    let stats = engine
        .sync_stream(&StreamDefinition::clicks(), &context(), now, &mut messages)
        .await
        .unwrap();

    let ranges: Vec<(String, String)> = client.requests().iter().map(body_range).collect();
    let expected: Vec<(String, String)> = [
        ("2024-03-03 00:00:00", "2024-03-17 00:00:00"),
        ("2024-03-05 00:00:00", "2024-03-19 00:00:00"),
        ("2024-03-19 00:00:00", "2024-04-02 00:00:00"),
        ("2024-04-02 00:00:00", "2024-04-16 00:00:00"),
        ("2024-04-16 00:00:00", "2024-04-30 00:00:00"),
        ("2024-04-30 00:00:00", "2024-05-14 00:00:00"),
        ("2024-05-14 00:00:00", "2024-05-28 00:00:00"),
        ("2024-05-28 00:00:00", "2024-06-01 00:00:00"),
    ]
    .iter()
    .map(|(f, t)| ((*f).to_string(), (*t).to_string()))
    .collect();
    assert_eq!(ranges, expected);

    for request in client.requests() {
        assert_eq!(
            request.query,
            vec![("page_size".to_string(), "2000".to_string())]
        );
        assert_eq!(request.body.as_ref().unwrap()["timezone_id"], 67);
    }

    assert_eq!(stats.pages_fetched, 8);
    assert_eq!(stats.windows_synced, 7);
    assert_eq!(records_of(&messages).len(), 2);
    assert_eq!(
        engine.state().get_bookmark("clicks", "unix_timestamp").await,
        Some(Bookmark::Unix(march_5))
    );
}

#[tokio::test]
async fn test_clicks_cursor_past_now_terminates() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let state = StateManager::in_memory();
    state
        .set_bookmark("clicks", "unix_timestamp", (now - Duration::days(1)).into())
        .await
        .unwrap();

    let future = (now + Duration::hours(1)).timestamp();
    let client = ScriptedClient::new(
        Vec::new(),
        json!({"clicks": [{"transaction_id": "f", "unix_timestamp": future}]}),
    );
    let mut engine = engine(&client, state);
    let mut messages = Vec::new();

    engine
        .sync_stream(&StreamDefinition::clicks(), &context(), now, &mut messages)
        .await
        .unwrap();

    let ranges: Vec<(String, String)> = client.requests().iter().map(body_range).collect();
    assert_eq!(
        ranges,
        vec![
            ("2024-05-31 00:00:00".to_string(), "2024-06-01 00:00:00".to_string()),
            ("2024-06-01 00:00:00".to_string(), "2024-06-01 00:00:00".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_clicks_empty_first_window_advances() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let client = ScriptedClient::new(Vec::new(), json!({"clicks": []}));
    let mut engine = engine(&client, StateManager::in_memory());
    let mut messages = Vec::new();

    let stats = engine
        .sync_stream(
            &StreamDefinition::clicks(),
            &SyncContext {
                timezone_id: Some(67),
                start_date: now - Duration::days(20),
            },
            now,
            &mut messages,
        )
        .await
        .unwrap();

    // 20 days: one full 14 day window and one of 6 days
    assert_eq!(stats.pages_fetched, 2);
    assert_eq!(stats.windows_synced, 2);
    assert_eq!(states_of(&messages), vec![json!({"bookmarks": {}})]);
}

#[tokio::test]
async fn test_engine_stats_accumulate_across_streams() {
    let client = ScriptedClient::new(
        Vec::new(),
        json!({"offers": [], "paging": {"page": 1, "page_size": 2000, "total_count": 0}}),
    );
    let mut engine = engine(&client, StateManager::in_memory());
    let mut messages = Vec::new();

    for _ in 0..2 {
        engine
            .sync_stream(&StreamDefinition::offers(), &context(), Utc::now(), &mut messages)
            .await
            .unwrap();
    }
    assert_eq!(engine.stats().streams_synced, 2);

    engine.reset_stats();
    assert_eq!(engine.stats(), &SyncStats::default());
}
