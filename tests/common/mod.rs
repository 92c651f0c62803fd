#![allow(dead_code)]

use greet_rpc::{ClientConfig, GreetClient, GreetServer, Greeting, ServerConfig};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<Result<(), greet_rpc::GreetError>>,
}

impl TestServer {
    /// Stops accepting calls and waits for the server task to finish.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = tokio::time::timeout(Duration::from_secs(5), &mut self.handle).await;
    }
}

pub fn fast_server_config() -> ServerConfig {
    ServerConfig::new()
        .with_stream_interval(Duration::from_millis(5))
        .with_deadline_work(Duration::from_millis(500))
}

pub fn fast_client_config(addr: SocketAddr) -> ClientConfig {
    ClientConfig::for_addr(addr)
        .with_connect_timeout(Duration::from_secs(2))
        .with_client_stream_interval(Duration::from_millis(5))
        .with_bidi_interval(Duration::from_millis(5))
}

pub async fn start_server(config: ServerConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    let server = GreetServer::new(config);
    let handle = tokio::spawn(server.serve_with_shutdown(listener, async {
        let _ = rx.await;
    }));

    TestServer {
        addr,
        shutdown: Some(tx),
        handle,
    }
}

pub async fn start_pair() -> (TestServer, GreetClient) {
    let server = start_server(fast_server_config()).await;
    let client = GreetClient::connect(fast_client_config(server.addr))
        .await
        .unwrap();
    (server, client)
}

pub fn lokard() -> Greeting {
    Greeting::new("lokard", "deepmaker")
}

pub fn roster() -> Vec<Greeting> {
    ["lokard", "deepmanker", "jesteez", "ja"]
        .into_iter()
        .map(|name| Greeting::new(name, ""))
        .collect()
}
