//! Wire messages of the `greet` package and the generated service stubs.
//!
//! `greet_service_server` and `greet_service_client` are produced by
//! `build.rs`; every message they reference lives in this module.

/// A person to greet.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Greeting {
    #[prost(string, tag = "1")]
    pub first_name: String,
    #[prost(string, tag = "2")]
    pub last_name: String,
}

impl Greeting {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

macro_rules! greeting_messages {
    ($($request:ident => $response:ident),+ $(,)?) => {
        $(
            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct $request {
                #[prost(message, optional, tag = "1")]
                pub greeting: Option<Greeting>,
            }

            impl $request {
                pub fn new(greeting: Greeting) -> Self {
                    Self { greeting: Some(greeting) }
                }

                /// The carried greeting, or an empty one when the field is unset.
                pub fn greeting_or_default(self) -> Greeting {
                    self.greeting.unwrap_or_default()
                }
            }

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct $response {
                #[prost(string, tag = "1")]
                pub result: String,
            }
        )+
    };
}

greeting_messages! {
    GreetRequest => GreetResponse,
    GreetManyTimesRequest => GreetManyTimesResponse,
    LongGreetRequest => LongGreetResponse,
    GreetEveryoneRequest => GreetEveryoneResponse,
    GreetWithDeadlineRequest => GreetWithDeadlineResponse,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SquareRootRequest {
    #[prost(int32, tag = "1")]
    pub number: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SquareRootResponse {
    #[prost(double, tag = "1")]
    pub number_root: f64,
}

include!(concat!(env!("OUT_DIR"), "/greet.GreetService.rs"));
