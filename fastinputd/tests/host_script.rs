use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use fastinputd::{HostRuntime, HostRuntimeConfig};
use services_command_dispatch::{CommandKind, DispatchOutcome};
use services_focus_notifier::FocusKind;
use services_settings::FastInputSettings;
use tokio::net::TcpListener;
use tokio::runtime::Runtime;

const DEMO_SCRIPT: &str = include_str!("../../demos/hello.fiscript");

#[derive(Clone, Default)]
struct PeerState {
    bodies: Arc<Mutex<Vec<String>>>,
}

async fn whatsinput(State(state): State<PeerState>, body: String) -> StatusCode {
    state.bodies.lock().expect("peer bodies lock").push(body);
    StatusCode::OK
}

/// Starts the mock peer on its own runtime so the host can own another one
fn spawn_mock_peer() -> (Runtime, String, PeerState) {
    let runtime = Runtime::new().expect("peer runtime");
    let state = PeerState::default();
    let app = Router::new()
        .route("/whatsinput", post(whatsinput))
        .with_state(state.clone());

    let listener = runtime
        .block_on(TcpListener::bind("127.0.0.1:0"))
        .expect("bind mock peer listener");
    let address = listener.local_addr().expect("mock peer local addr");
    runtime.spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (runtime, format!("http://{address}/whatsinput"), state)
}

fn config(endpoint: String, script: &str) -> HostRuntimeConfig {
    let mut settings = FastInputSettings::default();
    settings.notify.endpoint = endpoint;
    settings.notify.timeout_ms = Some(2_000);
    HostRuntimeConfig {
        settings,
        script: script.to_string(),
        init_logging: false,
    }
}

#[test]
fn demo_script_edits_field_and_reports_focus() {
    let (_peer, endpoint, state) = spawn_mock_peer();

    let report = HostRuntime::new(config(endpoint, DEMO_SCRIPT))
        .expect("create runtime")
        .run()
        .expect("run script");

    assert_eq!(report.final_text.as_deref(), Some("Hello, 世界"));
    assert_eq!(
        report.outcomes,
        vec![
            DispatchOutcome::Applied(CommandKind::SetText),
            DispatchOutcome::Applied(CommandKind::InputText),
            DispatchOutcome::Applied(CommandKind::InputKeycode),
        ]
    );

    let mut bodies = state.bodies.lock().expect("peer bodies lock").clone();
    bodies.sort();
    assert_eq!(bodies, vec!["F".to_string(), "Idraft".to_string()]);
}

#[test]
fn acquisition_snapshot_reflects_text_at_focus_time() {
    let (_peer, endpoint, state) = spawn_mock_peer();
    let script = format!(
        "focus start before\n\
         am broadcast -a SET_TEXT --es text {}\n\
         focus finish\n\
         focus start second\n",
        text_codec::encode("after"),
    );

    let report = HostRuntime::new(config(endpoint, &script))
        .expect("create runtime")
        .run()
        .expect("run script");

    assert_eq!(report.final_text.as_deref(), Some("second"));
    let kinds: Vec<FocusKind> = report.transitions.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![FocusKind::Acquired, FocusKind::Released, FocusKind::Acquired]
    );

    // Sends run concurrently; arrival order at the peer is not fixed.
    let mut bodies = state.bodies.lock().expect("peer bodies lock").clone();
    bodies.sort();
    assert_eq!(
        bodies,
        vec!["F".to_string(), "Ibefore".to_string(), "Isecond".to_string()]
    );
}

#[test]
fn unreachable_peer_does_not_fail_the_run() {
    let report = HostRuntime::new(config(
        "http://127.0.0.1:9/whatsinput".to_string(),
        DEMO_SCRIPT,
    ))
    .expect("create runtime")
    .run()
    .expect("run script");

    assert_eq!(report.final_text.as_deref(), Some("Hello, 世界"));
    assert_eq!(report.transitions.len(), 2);
}
