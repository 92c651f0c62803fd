//! Greeting service over gRPC.
//!
//! One service, `greet.GreetService`, covers the four call shapes:
//!
//! - `Greet`: unary
//! - `GreetManyTimes`: server streaming
//! - `LongGreet`: client streaming
//! - `GreetEveryone`: bidirectional streaming
//!
//! plus `SquareRoot`, which fails with `INVALID_ARGUMENT` on negative input,
//! and `GreetWithDeadline`, which takes long enough to trip a short client
//! deadline. Framing, HTTP/2 and encoding are left to tonic and prost.
//!
//! ```no_run
//! use greet_rpc::{ClientConfig, GreetClient, Greeting};
//!
//! # async fn run() -> Result<(), greet_rpc::GreetError> {
//! let mut client = GreetClient::connect(ClientConfig::default()).await?;
//! let hello = client.greet(Greeting::new("lokard", "deepmaker")).await?;
//! assert_eq!(hello, "Hello lokard deepmaker");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod errors;
pub mod logging;
pub mod proto;
pub mod server;
pub mod service;
pub mod streaming;

pub use client::{DeadlineOutcome, GreetClient, SquareRootOutcome};
pub use config::{ClientConfig, ServerConfig};
pub use errors::GreetError;
pub use proto::Greeting;
pub use server::GreetServer;
pub use service::GreetingService;
