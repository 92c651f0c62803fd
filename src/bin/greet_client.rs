use anyhow::Result;
use greet_rpc::{ClientConfig, GreetClient, Greeting};
use std::time::Duration;
use tracing::info;

fn roster() -> Vec<Greeting> {
    ["lokard", "deepmanker", "jesteez", "ja"]
        .into_iter()
        .map(|first_name| Greeting::new(first_name, ""))
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(greet_rpc::logging::env_filter("greet_client")?)
        .init();

    let mut client = GreetClient::connect(ClientConfig::default()).await?;
    let lokard = Greeting::new("lokard", "deepmaker");

    let hello = client.greet(lokard.clone()).await?;
    info!("unary: {}", hello);

    let many = client.greet_many_times(lokard.clone()).await?;
    info!("server streaming: {} messages", many.len());

    let long = client.long_greet(roster()).await?;
    info!("client streaming: {}", long);

    let everyone = client.greet_everyone(roster()).await?;
    info!("bidirectional streaming: {:?}", everyone);

    for number in [10, -2] {
        let outcome = client.square_root(number).await?;
        info!("square root of {}: {:?}", number, outcome);
    }

    for budget in [Duration::from_secs(3), Duration::from_secs(6)] {
        let outcome = client.greet_with_deadline(lokard.clone(), budget).await?;
        info!("deadline {:?}: {:?}", budget, outcome);
    }

    Ok(())
}
