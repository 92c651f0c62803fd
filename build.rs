//! Generates the `greet.GreetService` client and server stubs.
//!
//! The messages are declared by hand in `src/proto.rs` with prost derives, so
//! the service is described here with tonic-build's manual builder instead of
//! a `.proto` file. No `protoc` is needed at build time.

use tonic_build::manual::{Builder, Method, Service};

const CODEC: &str = "tonic::codec::ProstCodec";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let method = |name: &str, route: &str, input: &str, output: &str| {
        Method::builder()
            .name(name)
            .route_name(route)
            .input_type(&format!("crate::proto::{}", input))
            .output_type(&format!("crate::proto::{}", output))
            .codec_path(CODEC)
    };

    let service = Service::builder()
        .name("GreetService")
        .package("greet")
        .method(method("greet", "Greet", "GreetRequest", "GreetResponse").build())
        .method(
            method(
                "greet_many_times",
                "GreetManyTimes",
                "GreetManyTimesRequest",
                "GreetManyTimesResponse",
            )
            .server_streaming()
            .build(),
        )
        .method(
            method("long_greet", "LongGreet", "LongGreetRequest", "LongGreetResponse")
                .client_streaming()
                .build(),
        )
        .method(
            method(
                "greet_everyone",
                "GreetEveryone",
                "GreetEveryoneRequest",
                "GreetEveryoneResponse",
            )
            .client_streaming()
            .server_streaming()
            .build(),
        )
        .method(
            method("square_root", "SquareRoot", "SquareRootRequest", "SquareRootResponse").build(),
        )
        .method(
            method(
                "greet_with_deadline",
                "GreetWithDeadline",
                "GreetWithDeadlineRequest",
                "GreetWithDeadlineResponse",
            )
            .build(),
        )
        .build();

    Builder::new().compile(&[service]);
}
