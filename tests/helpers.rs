// Shared test helpers for starting the service and talking to it over HTTP.
//
// Every test gets its own temp directory and an ephemeral port, so tests can
// run in parallel without sharing a visitor log.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use visitor_log::{run_server_with_store, Config, RecordStore};

/// A running service instance bound to 127.0.0.1 on a random port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub data_file: PathBuf,
    /// The same store the handlers and sweeper use.
    pub store: Arc<RecordStore>,
    pub client: reqwest::Client,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<anyhow::Result<()>>>,
    _dir: TempDir,
}

/// Starts the service with its visitor log in a fresh temp directory.
pub async fn start_server() -> TestServer {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let data_file = dir.path().join("assets").join("pnc").join("index.csv");

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    let config = Config {
        port: addr.port(),
        data_file: data_file.clone(),
        ..Default::default()
    };

    let store = Arc::new(
        RecordStore::open(&data_file)
            .await
            .expect("Failed to open visitor log"),
    );

    let (tx, rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(run_server_with_store(config, store.clone(), listener, async {
        let _ = rx.await;
    }));

    TestServer {
        addr,
        data_file,
        store,
        client: reqwest::Client::new(),
        shutdown: Some(tx),
        handle: Some(handle),
        _dir: dir,
    }
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POSTs a raw body to `/capture` with a JSON content type.
    pub async fn capture_raw(&self, body: String) -> (u16, Value) {
        let response = self
            .client
            .post(self.url("/capture"))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .expect("capture request failed");
        read_json(response).await
    }

    pub async fn capture(&self, payload: Value) -> (u16, Value) {
        self.capture_raw(payload.to_string()).await
    }

    pub async fn get_json(&self, path: &str) -> (u16, Value) {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed");
        read_json(response).await
    }

    /// Current contents of the visitor log on disk.
    pub fn file_contents(&self) -> String {
        std::fs::read_to_string(&self.data_file).expect("Failed to read visitor log")
    }

    /// Signals shutdown and waits for the server task to finish.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle
                .await
                .expect("server task panicked")
                .expect("server returned an error");
        }
    }
}

pub async fn read_json(response: reqwest::Response) -> (u16, Value) {
    let status = response.status().as_u16();
    let text = response.text().await.expect("Failed to read body");
    let value = serde_json::from_str(&text)
        .unwrap_or_else(|e| panic!("Body is not JSON ({}): {:?}", e, text));
    (status, value)
}
