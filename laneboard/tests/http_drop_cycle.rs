//! Full drop-cycles against a mock HTTP store

use laneboard::{BoardConfig, BoardEngine, DropOutcome, RenderedBoard, RenderedTarget, Status};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CLIENTS: &str = "/api/v1/clients";

fn config(server: &MockServer) -> BoardConfig {
    BoardConfig {
        base_url: server.uri(),
        request_timeout_secs: 5,
        ..BoardConfig::default()
    }
}

async fn mount_put(server: &MockServer, id: &str, body: serde_json::Value, status: u16) {
    Mock::given(method("PUT"))
        .and(path(format!("{CLIENTS}/{id}")))
        .and(body_json(body))
        .respond_with(ResponseTemplate::new(status))
        .expect(1)
        .mount(server)
        .await;
}

fn drag_first_backlog_card_to_complete(
    engine: &BoardEngine<laneboard::HttpCardStore>,
    view: &mut RenderedBoard,
    card: &str,
) -> laneboard::DropTicket {
    let mut session = engine.attach(view).unwrap();
    let target = RenderedTarget::with_classes(["Card"]);
    assert!(session.begin(card, Status::Backlog, Some(&target)).unwrap());
    view.move_card(Status::Backlog, 0, Status::Complete, 0)
        .unwrap();
    session.release().unwrap()
}

#[tokio::test]
async fn test_http_drop_cycle_saves_and_reloads() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(CLIENTS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "status": "backlog", "priority": 1, "name": "Acme"},
            {"id": 2, "status": "backlog", "priority": 2, "name": "Globex"},
        ])))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(CLIENTS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "status": "complete", "priority": 1, "name": "Acme"},
            {"id": 2, "status": "backlog", "priority": 1, "name": "Globex"},
        ])))
        .expect(1)
        .mount(&server)
        .await;
    mount_put(&server, "2", json!({"status": "backlog", "priority": 1}), 200).await;
    mount_put(&server, "1", json!({"status": "complete", "priority": 1}), 200).await;

    let engine = BoardEngine::from_config(&config(&server)).unwrap();
    let board = engine.load().await.unwrap();
    let mut view = RenderedBoard::from_board(&board);

    let ticket = drag_first_backlog_card_to_complete(&engine, &mut view, "1");
    let outcome = engine.drop_cycle(ticket, &mut view).await;

    assert!(outcome.is_saved());
    let board = engine.snapshot().await;
    assert_eq!(board.lane_ids(Status::Backlog), vec!["2"]);
    assert_eq!(board.lane_ids(Status::Complete), vec!["1"]);
    assert_eq!(
        board.complete[0].attribute("name").and_then(|v| v.as_str()),
        Some("Acme")
    );
}

#[tokio::test]
async fn test_http_partial_failure_skips_reload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(CLIENTS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a", "status": "backlog", "priority": 1},
            {"id": "b", "status": "backlog", "priority": 2},
            {"id": "c", "status": "complete", "priority": 1},
        ])))
        .expect(1)
        .mount(&server)
        .await;
    mount_put(&server, "b", json!({"status": "backlog", "priority": 1}), 200).await;
    mount_put(&server, "a", json!({"status": "complete", "priority": 1}), 500).await;
    mount_put(&server, "c", json!({"status": "complete", "priority": 2}), 200).await;

    let engine = BoardEngine::from_config(&config(&server)).unwrap();
    let board = engine.load().await.unwrap();
    let mut view = RenderedBoard::from_board(&board);

    let ticket = drag_first_backlog_card_to_complete(&engine, &mut view, "a");
    let outcome = engine.drop_cycle(ticket, &mut view).await;

    match outcome {
        DropOutcome::SaveFailed { report, reloaded } => {
            assert!(!reloaded);
            assert_eq!(report.succeeded(), 2);
            assert_eq!(report.failures[0].id.as_str(), "a");
            assert!(report.failures[0].error.is_retryable());
        }
        other => panic!("expected SaveFailed, got {other:?}"),
    }

    let board = engine.snapshot().await;
    assert_eq!(board.lane_ids(Status::Complete), vec!["a", "c"]);
    assert_eq!(board.lane_ids(Status::Backlog), vec!["b"]);
}

#[tokio::test]
async fn test_http_reload_failure_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(CLIENTS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a", "status": "backlog", "priority": 1},
        ])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(CLIENTS))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    mount_put(&server, "a", json!({"status": "complete", "priority": 1}), 204).await;

    let engine = BoardEngine::from_config(&config(&server)).unwrap();
    let board = engine.load().await.unwrap();
    let mut view = RenderedBoard::from_board(&board);

    let ticket = drag_first_backlog_card_to_complete(&engine, &mut view, "a");
    let outcome = engine.drop_cycle(ticket, &mut view).await;

    assert!(matches!(outcome, DropOutcome::ReloadFailed { .. }));
    assert_eq!(
        engine.snapshot().await.lane_ids(Status::Complete),
        vec!["a"]
    );
}

#[tokio::test]
async fn test_http_initial_load_failure_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CLIENTS))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let engine = BoardEngine::from_config(&config(&server)).unwrap();
    let err = engine.load().await.unwrap_err();
    assert!(err.to_string().contains("500"));
    assert!(engine.snapshot().await.is_empty());
}
