use anyhow::Result;
use greet_rpc::{GreetServer, ServerConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(greet_rpc::logging::env_filter("greet_server")?)
        .init();

    let server = GreetServer::new(ServerConfig::default());
    let listener = server.bind().await?;

    server
        .serve_with_shutdown(listener, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("failed to listen for ctrl-c: {}", e);
                std::future::pending::<()>().await;
            }
            info!("ctrl-c received, shutting down");
        })
        .await?;

    Ok(())
}
