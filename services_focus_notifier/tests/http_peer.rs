use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use services_focus_notifier::{
    FocusLifecycle, FocusNotifier, HttpNotifyTransport, NotifyConfig, NotifyTransport,
};
use services_input_surface::{EditExecutor, MemorySurface, SurfaceSlot};
use tokio::net::TcpListener;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::time::timeout;

const TEST_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Clone, Default)]
struct PeerState {
    requests: Arc<Mutex<Vec<(Option<String>, String)>>>,
}

async fn whatsinput(State(state): State<PeerState>, headers: HeaderMap, body: String) -> StatusCode {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    state
        .requests
        .lock()
        .expect("peer requests lock")
        .push((content_type, body));
    StatusCode::OK
}

async fn spawn_mock_peer() -> (String, PeerState, oneshot::Sender<()>, tokio::task::JoinHandle<()>) {
    let state = PeerState::default();
    let app = Router::new()
        .route("/whatsinput", post(whatsinput))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock peer listener");
    let address: SocketAddr = listener.local_addr().expect("mock peer local addr");
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .expect("run mock peer");
    });
    (format!("http://{address}/whatsinput"), state, shutdown_tx, handle)
}

async fn unused_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let address = listener.local_addr().expect("probe local addr");
    drop(listener);
    format!("http://{address}/whatsinput")
}

#[tokio::test]
async fn http_transport_posts_plain_text() {
    let (endpoint, state, shutdown, server) = spawn_mock_peer().await;
    let transport = HttpNotifyTransport::new(&NotifyConfig {
        endpoint,
        timeout_ms: Some(2_000),
    })
    .expect("build transport");

    let status = timeout(TEST_TIMEOUT, transport.post("Ihi".to_string()))
        .await
        .expect("post within timeout")
        .expect("post succeeds");
    assert_eq!(status, 200);

    let requests = state.requests.lock().expect("peer requests lock").clone();
    assert_eq!(
        requests,
        vec![(
            Some("text/plain; charset=utf-8".to_string()),
            "Ihi".to_string()
        )]
    );

    let _ = shutdown.send(());
    let _ = server.await;
}

#[tokio::test]
async fn lifecycle_reports_focus_to_peer() {
    let (endpoint, state, shutdown, server) = spawn_mock_peer().await;
    let transport = HttpNotifyTransport::new(&NotifyConfig {
        endpoint,
        timeout_ms: Some(2_000),
    })
    .expect("build transport");
    let notifier = FocusNotifier::new(
        EditExecutor::new(SurfaceSlot::new()),
        Arc::new(transport),
        Handle::current(),
    );
    let mut lifecycle = FocusLifecycle::new(notifier);

    timeout(
        TEST_TIMEOUT,
        lifecycle.surface_acquired(Box::new(MemorySurface::new("你好"))),
    )
    .await
    .expect("acquired send within timeout")
    .expect("acquired task");
    timeout(TEST_TIMEOUT, lifecycle.surface_released())
        .await
        .expect("released send within timeout")
        .expect("released task");

    let bodies: Vec<String> = state
        .requests
        .lock()
        .expect("peer requests lock")
        .iter()
        .map(|(_, body)| body.clone())
        .collect();
    assert_eq!(bodies, vec!["I你好".to_string(), "F".to_string()]);

    let _ = shutdown.send(());
    let _ = server.await;
}

#[tokio::test]
async fn dead_peer_is_reported_not_raised() {
    let endpoint = unused_endpoint().await;
    let transport = Arc::new(
        HttpNotifyTransport::new(&NotifyConfig {
            endpoint,
            timeout_ms: Some(500),
        })
        .expect("build transport"),
    );

    let direct = timeout(TEST_TIMEOUT, transport.post("F".to_string()))
        .await
        .expect("post within timeout");
    assert!(direct.is_err());

    let slot = SurfaceSlot::new();
    slot.attach(Box::new(MemorySurface::new("hi")));
    let notifier = FocusNotifier::new(EditExecutor::new(slot), transport, Handle::current());
    let joined = timeout(TEST_TIMEOUT, notifier.on_surface_acquired())
        .await
        .expect("send task within timeout");
    assert!(joined.is_ok());
}
