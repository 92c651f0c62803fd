//! Handler bodies of `greet.GreetService`.
//!
//! The stream-shaped logic is written against plain `Stream`s so it can be
//! driven without a transport; the tonic trait impl only unwraps requests
//! and wraps responses.

use futures_util::{pin_mut, Stream, StreamExt};
use std::pin::Pin;
use std::time::Duration;
use tonic::{Request, Response, Status, Streaming};
use tracing::{debug, info};

use crate::config::ServerConfig;
use crate::proto::greet_service_server::GreetService;
use crate::proto::{
    GreetEveryoneRequest, GreetEveryoneResponse, GreetManyTimesRequest, GreetManyTimesResponse,
    GreetRequest, GreetResponse, GreetWithDeadlineRequest, GreetWithDeadlineResponse, Greeting,
    LongGreetRequest, LongGreetResponse, SquareRootRequest, SquareRootResponse,
};
use crate::streaming::paced;

/// Number of messages a `GreetManyTimes` call produces.
pub const GREET_MANY_TIMES_COUNT: u32 = 10;

/// Steps the deadline-aware handler splits its work into.
pub const DEADLINE_WORK_STEPS: u32 = 5;

pub type ResponseStream<T> = Pin<Box<dyn Stream<Item = Result<T, Status>> + Send>>;

pub fn full_greeting(greeting: &Greeting) -> String {
    format!("Hello {} {}", greeting.first_name, greeting.last_name)
}

pub fn first_name_greeting(greeting: &Greeting) -> String {
    format!("Hello {}! ", greeting.first_name)
}

pub fn numbered_greeting(greeting: &Greeting, n: u32) -> String {
    format!(
        "{} {} requested a service {} times",
        greeting.first_name, greeting.last_name, n
    )
}

pub fn square_root(number: i32) -> Result<f64, Status> {
    if number < 0 {
        return Err(Status::invalid_argument(format!(
            "Received a negative number: {}",
            number
        )));
    }
    Ok(f64::from(number).sqrt())
}

/// Responses 1..=GREET_MANY_TIMES_COUNT for `greeting`, `interval` apart.
pub fn numbered_greetings(
    greeting: Greeting,
    interval: Duration,
) -> impl Stream<Item = Result<GreetManyTimesResponse, Status>> + Send {
    let responses = (1..=GREET_MANY_TIMES_COUNT).map(move |n| {
        Ok(GreetManyTimesResponse {
            result: numbered_greeting(&greeting, n),
        })
    });
    paced(futures_util::stream::iter(responses), interval)
}

/// Folds every inbound greeting into one string, in arrival order.
pub async fn accumulate_greetings<S>(inbound: S) -> Result<String, Status>
where
    S: Stream<Item = Result<LongGreetRequest, Status>>,
{
    pin_mut!(inbound);
    let mut result = String::new();
    while let Some(request) = inbound.next().await {
        let greeting = request?.greeting_or_default();
        debug!(first_name = %greeting.first_name, "long greet received");
        result.push_str(&first_name_greeting(&greeting));
    }
    Ok(result)
}

/// Answers each inbound greeting as soon as it arrives.
pub fn echo_greetings<S>(inbound: S) -> impl Stream<Item = Result<GreetEveryoneResponse, Status>>
where
    S: Stream<Item = Result<GreetEveryoneRequest, Status>>,
{
    async_stream::try_stream! {
        pin_mut!(inbound);
        while let Some(request) = inbound.next().await {
            let greeting = request?.greeting_or_default();
            debug!(first_name = %greeting.first_name, "greet everyone received");
            yield GreetEveryoneResponse {
                result: first_name_greeting(&greeting),
            };
        }
    }
}

/// Simulates work lasting `total`, one step at a time.
pub async fn slow_greeting(greeting: &Greeting, total: Duration) -> String {
    let step = total / DEADLINE_WORK_STEPS;
    for n in 1..=DEADLINE_WORK_STEPS {
        tokio::time::sleep(step).await;
        debug!(step = n, of = DEADLINE_WORK_STEPS, "deadline greet working");
    }
    full_greeting(greeting)
}

#[derive(Debug, Clone)]
pub struct GreetingService {
    stream_interval: Duration,
    deadline_work: Duration,
}

impl GreetingService {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            stream_interval: config.stream_interval(),
            deadline_work: config.deadline_work(),
        }
    }
}

impl Default for GreetingService {
    fn default() -> Self {
        Self::new(&ServerConfig::default())
    }
}

#[async_trait::async_trait]
impl GreetService for GreetingService {
    async fn greet(&self, request: Request<GreetRequest>) -> Result<Response<GreetResponse>, Status> {
        let request = request.into_inner();
        info!(?request, "Greet invoked");
        let greeting = request.greeting_or_default();

        Ok(Response::new(GreetResponse {
            result: full_greeting(&greeting),
        }))
    }

    type GreetManyTimesStream = ResponseStream<GreetManyTimesResponse>;

    async fn greet_many_times(
        &self,
        request: Request<GreetManyTimesRequest>,
    ) -> Result<Response<Self::GreetManyTimesStream>, Status> {
        let request = request.into_inner();
        info!(?request, "GreetManyTimes invoked");
        let greeting = request.greeting_or_default();

        Ok(Response::new(Box::pin(numbered_greetings(
            greeting,
            self.stream_interval,
        ))))
    }

    async fn long_greet(
        &self,
        request: Request<Streaming<LongGreetRequest>>,
    ) -> Result<Response<LongGreetResponse>, Status> {
        info!("LongGreet invoked");
        let result = accumulate_greetings(request.into_inner()).await?;
        info!(%result, "LongGreet answering");

        Ok(Response::new(LongGreetResponse { result }))
    }

    type GreetEveryoneStream = ResponseStream<GreetEveryoneResponse>;

    async fn greet_everyone(
        &self,
        request: Request<Streaming<GreetEveryoneRequest>>,
    ) -> Result<Response<Self::GreetEveryoneStream>, Status> {
        info!("GreetEveryone invoked");
        Ok(Response::new(Box::pin(echo_greetings(request.into_inner()))))
    }

    async fn square_root(
        &self,
        request: Request<SquareRootRequest>,
    ) -> Result<Response<SquareRootResponse>, Status> {
        let number = request.into_inner().number;
        info!(number, "SquareRoot invoked");
        let number_root = square_root(number)?;

        Ok(Response::new(SquareRootResponse { number_root }))
    }

    async fn greet_with_deadline(
        &self,
        request: Request<GreetWithDeadlineRequest>,
    ) -> Result<Response<GreetWithDeadlineResponse>, Status> {
        let request = request.into_inner();
        info!(?request, work = ?self.deadline_work, "GreetWithDeadline invoked");
        let greeting = request.greeting_or_default();
        let result = slow_greeting(&greeting, self.deadline_work).await;

        Ok(Response::new(GreetWithDeadlineResponse { result }))
    }
}
