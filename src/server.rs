use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tracing::info;

use crate::config::ServerConfig;
use crate::errors::GreetError;
use crate::proto::greet_service_server::GreetServiceServer;
use crate::service::GreetingService;

/// Hosts [`GreetingService`] over plaintext HTTP/2.
pub struct GreetServer {
    config: ServerConfig,
    service: GreetingService,
}

impl GreetServer {
    pub fn new(config: ServerConfig) -> Self {
        let service = GreetingService::new(&config);
        Self { config, service }
    }

    /// Binds the configured address.
    pub async fn bind(&self) -> Result<TcpListener, GreetError> {
        let listener = TcpListener::bind(self.config.bind_address()).await?;
        Ok(listener)
    }

    /// Binds the configured address and serves until the process ends.
    pub async fn serve(self) -> Result<(), GreetError> {
        let listener = self.bind().await?;
        self.serve_with_listener(listener).await
    }

    pub async fn serve_with_listener(self, listener: TcpListener) -> Result<(), GreetError> {
        self.serve_with_shutdown(listener, std::future::pending()).await
    }

    /// Serves on `listener` until `signal` resolves, then lets in-flight
    /// calls finish and releases the socket.
    pub async fn serve_with_shutdown<F>(self, listener: TcpListener, signal: F) -> Result<(), GreetError>
    where
        F: Future<Output = ()>,
    {
        let local_addr: SocketAddr = listener.local_addr()?;
        info!(%local_addr, "Greet server listening");

        Server::builder()
            .add_service(GreetServiceServer::new(self.service))
            .serve_with_incoming_shutdown(TcpListenerStream::new(listener), signal)
            .await?;

        info!(%local_addr, "Greet server stopped");
        Ok(())
    }
}
