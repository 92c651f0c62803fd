mod common;

use common::{lokard, start_pair};
use greet_rpc::proto::greet_service_client::GreetServiceClient;
use greet_rpc::proto::GreetRequest;
use greet_rpc::{Greeting, SquareRootOutcome};

#[tokio::test]
async fn test_unary_greet() {
    let (server, mut client) = start_pair().await;

    let hello = client.greet(lokard()).await.unwrap();
    assert_eq!(hello, "Hello lokard deepmaker");

    server.stop().await;
}

#[tokio::test]
async fn test_unary_greet_reuses_connection() {
    let (server, mut client) = start_pair().await;

    for (first, last) in [("ada", "lovelace"), ("alan", "turing"), ("", "")] {
        let hello = client.greet(Greeting::new(first, last)).await.unwrap();
        assert_eq!(hello, format!("Hello {} {}", first, last));
    }

    server.stop().await;
}

#[tokio::test]
async fn test_unary_greet_without_greeting_field() {
    let (server, _client) = start_pair().await;

    let mut raw = GreetServiceClient::connect(format!("http://{}", server.addr))
        .await
        .unwrap();
    let response = raw.greet(GreetRequest::default()).await.unwrap().into_inner();
    assert_eq!(response.result, "Hello  ");

    server.stop().await;
}

#[tokio::test]
async fn test_square_root_of_non_negative_numbers() {
    let (server, mut client) = start_pair().await;

    for number in [0, 1, 10, 16, 99_999] {
        match client.square_root(number).await.unwrap() {
            SquareRootOutcome::Root(root) => {
                assert!((root - f64::from(number).sqrt()).abs() < 1e-9);
            }
            other => panic!("unexpected outcome for {}: {:?}", number, other),
        }
    }

    server.stop().await;
}

#[tokio::test]
async fn test_square_root_of_negative_number_is_invalid_argument() {
    let (server, mut client) = start_pair().await;

    for number in [-2, -1, i32::MIN] {
        let outcome = client.square_root(number).await.unwrap();
        assert_eq!(
            outcome,
            SquareRootOutcome::InvalidArgument(format!("Received a negative number: {}", number))
        );
    }

    server.stop().await;
}
