use std::error::Error as _;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::Instant;
use tonic::transport::{Channel, Endpoint};
use tonic::{Code, Request, Status};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::errors::GreetError;
use crate::proto::greet_service_client::GreetServiceClient;
use crate::proto::{
    GreetEveryoneRequest, GreetManyTimesRequest, GreetRequest, GreetWithDeadlineRequest, Greeting,
    LongGreetRequest, SquareRootRequest,
};
use crate::streaming::{paced, RequestFeed};

/// What a `SquareRoot` call came back with.
#[derive(Debug, Clone, PartialEq)]
pub enum SquareRootOutcome {
    Root(f64),
    /// The server refused the input; carries the status message.
    InvalidArgument(String),
    /// Any other status the server answered with.
    Rejected { code: Code, message: String },
}

/// What a deadline-bounded call came back with.
#[derive(Debug, Clone, PartialEq)]
pub enum DeadlineOutcome {
    Completed(String),
    DeadlineExceeded,
    Unexpected { code: Code, message: String },
}

/// Keeps statuses the server sent and turns statuses raised by the
/// transport itself into a fatal error.
fn server_status(status: Status) -> Result<Status, GreetError> {
    if status.source().is_some() {
        return Err(GreetError::Status(status));
    }
    Ok(status)
}

/// tonic enforces `grpc-timeout` on the client side too. When its own timer
/// fires first it raises `Cancelled` with a transport source, which would
/// otherwise read as a broken connection.
fn local_expiry(status: Status, elapsed: Duration, budget: Duration) -> Status {
    let expired = elapsed >= budget
        && status.source().is_some()
        && matches!(status.code(), Code::Cancelled | Code::DeadlineExceeded);
    if expired {
        return Status::deadline_exceeded(format!("no answer within {:?}", budget));
    }
    status
}

pub fn classify_square_root(result: Result<f64, Status>) -> Result<SquareRootOutcome, GreetError> {
    let status = match result {
        Ok(root) => return Ok(SquareRootOutcome::Root(root)),
        Err(status) => server_status(status)?,
    };

    Ok(match status.code() {
        Code::InvalidArgument => SquareRootOutcome::InvalidArgument(status.message().to_string()),
        code => SquareRootOutcome::Rejected {
            code,
            message: status.message().to_string(),
        },
    })
}

pub fn classify_deadline(result: Result<String, Status>) -> Result<DeadlineOutcome, GreetError> {
    let status = match result {
        Ok(greeting) => return Ok(DeadlineOutcome::Completed(greeting)),
        Err(status) => server_status(status)?,
    };

    Ok(match status.code() {
        Code::DeadlineExceeded => DeadlineOutcome::DeadlineExceeded,
        code => DeadlineOutcome::Unexpected {
            code,
            message: status.message().to_string(),
        },
    })
}

/// Typed client for `greet.GreetService` over one long-lived channel.
pub struct GreetClient {
    inner: GreetServiceClient<Channel>,
    config: ClientConfig,
}

impl GreetClient {
    /// Opens the connection described by `config`.
    pub async fn connect(config: ClientConfig) -> Result<Self, GreetError> {
        let channel = Endpoint::from_shared(config.endpoint().to_string())?
            .connect_timeout(config.connect_timeout())
            .connect()
            .await?;
        info!(endpoint = config.endpoint(), "Connected to greet server");

        Ok(Self {
            inner: GreetServiceClient::new(channel),
            config,
        })
    }

    /// Unary: one greeting in, one greeting out.
    pub async fn greet(&mut self, greeting: Greeting) -> Result<String, GreetError> {
        info!("Starting unary call");
        let response = self.inner.greet(GreetRequest::new(greeting)).await?;
        let result = response.into_inner().result;
        info!(%result, "Greet answered");
        Ok(result)
    }

    /// Server streaming: reads every response until the server ends the stream.
    pub async fn greet_many_times(&mut self, greeting: Greeting) -> Result<Vec<String>, GreetError> {
        info!("Starting server streaming call");
        let mut stream = self
            .inner
            .greet_many_times(GreetManyTimesRequest::new(greeting))
            .await?
            .into_inner();

        let mut results = Vec::new();
        while let Some(response) = stream.message().await? {
            info!(result = %response.result, "GreetManyTimes message");
            results.push(response.result);
        }
        Ok(results)
    }

    /// Client streaming: sends `roster` one by one, then waits for the
    /// aggregated answer.
    pub async fn long_greet(&mut self, roster: Vec<Greeting>) -> Result<String, GreetError> {
        info!(count = roster.len(), "Starting client streaming call");
        let requests = roster.into_iter().map(|greeting| {
            debug!(first_name = %greeting.first_name, "sending long greet");
            LongGreetRequest::new(greeting)
        });
        let outbound = paced(
            futures_util::stream::iter(requests),
            self.config.client_stream_interval(),
        );

        let result = self.inner.long_greet(outbound).await?.into_inner().result;
        info!(%result, "LongGreet answered");
        Ok(result)
    }

    /// Bidirectional streaming: a send task and a receive task run over the
    /// same call; returns once the receive task has seen the end of stream.
    pub async fn greet_everyone(&mut self, roster: Vec<Greeting>) -> Result<Vec<String>, GreetError> {
        info!(count = roster.len(), "Starting bidirectional streaming call");
        let requests: Vec<GreetEveryoneRequest> =
            roster.into_iter().map(GreetEveryoneRequest::new).collect();
        let (outbound, sender) = RequestFeed::spawn(
            self.config.channel_buffer(),
            requests,
            self.config.bidi_interval(),
        )
        .into_parts();

        let mut inbound = self.inner.greet_everyone(outbound).await?.into_inner();

        let (done_tx, done_rx) = oneshot::channel::<Result<Vec<String>, Status>>();
        tokio::spawn(async move {
            let mut replies = Vec::new();
            let outcome = loop {
                match inbound.message().await {
                    Ok(Some(reply)) => {
                        info!(result = %reply.result, "Receiving");
                        replies.push(reply.result);
                    }
                    Ok(None) => break Ok(replies),
                    Err(status) => break Err(status),
                }
            };
            let _ = done_tx.send(outcome);
        });

        let replies = done_rx
            .await
            .map_err(|_| GreetError::Stream("receive task ended without reporting".to_string()))??;
        let sent = sender.await?;
        debug!(sent, received = replies.len(), "GreetEveryone finished");
        Ok(replies)
    }

    /// Asks for the square root of `number`, sorting the server's answer
    /// into an outcome.
    pub async fn square_root(&mut self, number: i32) -> Result<SquareRootOutcome, GreetError> {
        info!(number, "Starting square root call");
        let result = self
            .inner
            .square_root(SquareRootRequest { number })
            .await
            .map(|response| response.into_inner().number_root);

        let outcome = classify_square_root(result)?;
        match &outcome {
            SquareRootOutcome::Root(root) => info!(number, root, "SquareRoot answered"),
            SquareRootOutcome::InvalidArgument(message) => {
                warn!(number, %message, "invalid argument!")
            }
            SquareRootOutcome::Rejected { code, message } => {
                warn!(number, ?code, %message, "SquareRoot failed")
            }
        }
        Ok(outcome)
    }

    /// Unary call abandoned once `budget` runs out.
    ///
    /// The budget travels as `grpc-timeout` and tonic's channel enforces it
    /// locally as well; whichever side gives up first the caller sees
    /// `DeadlineExceeded`.
    pub async fn greet_with_deadline(
        &mut self,
        greeting: Greeting,
        budget: Duration,
    ) -> Result<DeadlineOutcome, GreetError> {
        info!(?budget, "Starting unary call with deadline");
        let mut request = Request::new(GreetWithDeadlineRequest::new(greeting));
        request.set_timeout(budget);

        let started = Instant::now();
        let result = self
            .inner
            .greet_with_deadline(request)
            .await
            .map(|response| response.into_inner().result)
            .map_err(|status| local_expiry(status, started.elapsed(), budget));

        let outcome = classify_deadline(result)?;
        match &outcome {
            DeadlineOutcome::Completed(result) => info!(%result, "GreetWithDeadline answered"),
            DeadlineOutcome::DeadlineExceeded => warn!(?budget, "deadline exceeded"),
            DeadlineOutcome::Unexpected { code, message } => {
                warn!(?code, %message, "unexpected error")
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_root_success_is_root() {
        assert_eq!(
            classify_square_root(Ok(3.0)).unwrap(),
            SquareRootOutcome::Root(3.0)
        );
    }

    #[test]
    fn test_invalid_argument_keeps_message() {
        let status = Status::invalid_argument("Received a negative number: -2");
        assert_eq!(
            classify_square_root(Err(status)).unwrap(),
            SquareRootOutcome::InvalidArgument("Received a negative number: -2".to_string())
        );
    }

    #[test]
    fn test_other_codes_are_rejections() {
        let outcome = classify_square_root(Err(Status::internal("boom"))).unwrap();
        assert_eq!(
            outcome,
            SquareRootOutcome::Rejected {
                code: Code::Internal,
                message: "boom".to_string()
            }
        );
    }

    #[test]
    fn test_transport_status_is_fatal() {
        let status = Status::from_error(Box::new(std::fmt::Error));
        assert!(classify_square_root(Err(status.clone())).is_err());
        assert!(classify_deadline(Err(status)).is_err());
    }

    fn channel_timeout() -> Status {
        let mut status = Status::cancelled("Timeout expired");
        status.set_source(std::sync::Arc::new(std::io::Error::new(
            std::io::ErrorKind::TimedOut,
            "Timeout expired",
        )));
        status
    }

    #[test]
    fn test_channel_timeout_is_deadline_exceeded() {
        let budget = Duration::from_millis(50);
        let status = local_expiry(channel_timeout(), Duration::from_millis(51), budget);
        assert_eq!(
            classify_deadline(Err(status)).unwrap(),
            DeadlineOutcome::DeadlineExceeded
        );

        let status = local_expiry(channel_timeout(), budget, budget);
        assert_eq!(status.code(), Code::DeadlineExceeded);
    }

    #[test]
    fn test_early_transport_cancel_stays_fatal() {
        let budget = Duration::from_secs(3);
        let status = local_expiry(channel_timeout(), Duration::from_millis(10), budget);
        assert!(classify_deadline(Err(status)).is_err());

        let refused = Status::from_error(Box::new(std::fmt::Error));
        let status = local_expiry(refused, Duration::from_secs(4), budget);
        assert!(classify_deadline(Err(status)).is_err());
    }

    #[test]
    fn test_server_cancel_is_not_remapped() {
        let budget = Duration::from_millis(50);
        let status = local_expiry(Status::cancelled("stop"), Duration::from_secs(1), budget);
        assert!(matches!(
            classify_deadline(Err(status)).unwrap(),
            DeadlineOutcome::Unexpected {
                code: Code::Cancelled,
                ..
            }
        ));
    }

    #[test]
    fn test_deadline_codes() {
        assert_eq!(
            classify_deadline(Err(Status::deadline_exceeded("late"))).unwrap(),
            DeadlineOutcome::DeadlineExceeded
        );
        assert_eq!(
            classify_deadline(Ok("Hello a b".to_string())).unwrap(),
            DeadlineOutcome::Completed("Hello a b".to_string())
        );
        assert!(matches!(
            classify_deadline(Err(Status::unavailable("gone"))).unwrap(),
            DeadlineOutcome::Unexpected {
                code: Code::Unavailable,
                ..
            }
        ));
    }
}
