//! Shared utilities for end-to-end tests.
//!
//! Spawns the real service on an ephemeral port against an isolated data
//! file and hands back the base URL.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::oneshot;

use task_api::{HttpServer, ServiceConfig, Store};

pub struct TestService {
    pub base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
    _data_dir: Option<tempfile::TempDir>,
}

impl Drop for TestService {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Start the service on its own temp directory.
#[allow(dead_code)]
pub async fn start_service() -> TestService {
    let dir = tempfile::tempdir().unwrap();
    let mut service = start_service_with(dir.path().join("tasks.json")).await;
    service._data_dir = Some(dir);
    service
}

/// Start the service against a caller-owned data file, so tests can stop
/// the service and start a fresh one on the same file.
#[allow(dead_code)]
pub async fn start_service_with(data_path: PathBuf) -> TestService {
    let config = ServiceConfig::default();
    let store = Arc::new(Store::open(data_path).unwrap());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let server = HttpServer::new(&config, store);
    tokio::spawn(async move {
        let _ = server
            .run(listener, async {
                let _ = shutdown_rx.await;
            })
            .await;
    });

    TestService {
        base_url: format!("http://{addr}"),
        shutdown: Some(shutdown_tx),
        _data_dir: None,
    }
}

/// A client that ignores any ambient proxy configuration.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
