use bookswipe::backend::BackendClient;
use bookswipe::domain::{FeedbackSink, HistoryRepository, NetworkError, RecommendationRepository};
use bookswipe::models::{FeedbackAction, FeedbackEvent};
use std::time::Duration;
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

// Helper to point a client at the mock backend
fn client_for(server: &MockServer) -> BackendClient {
    BackendClient::new(&server.uri(), Duration::from_secs(5)).expect("valid base url")
}

// Helper to build a backend-shaped book list
fn sample_books(n: i64) -> serde_json::Value {
    let books: Vec<serde_json::Value> = (1..=n)
        .map(|id| {
            serde_json::json!({
                "book_id": id,
                "title": format!("Book {}", id),
                "author": "Test Author",
                "description": "<no description>",
                "genres": "sci-fi fantasy fiction classics",
                "avg_rating": 4.1,
                "score": 0.5
            })
        })
        .collect();
    serde_json::Value::Array(books)
}

fn query_pairs(request: &Request) -> Vec<(String, String)> {
    request.url.query_pairs().into_owned().collect()
}

#[tokio::test]
async fn test_fetch_recommendations_with_genre_filter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recommend"))
        .and(query_param("user_id", "demo_user"))
        .and(query_param("n", "10"))
        .and(query_param("genres", "Sci-Fi,Fantasy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_books(10)))
        .expect(1)
        .mount(&server)
        .await;

    let genres = vec!["Sci-Fi".to_string(), "Fantasy".to_string()];
    let books = client_for(&server)
        .fetch_recommendations("demo_user", 10, &genres)
        .await
        .expect("recommendations");

    assert_eq!(books.len(), 10);
    assert_eq!(books[0].id, 1);
    assert!(books[0].description.is_none());
    assert_eq!(books[0].card_tags().len(), 3);
}

#[tokio::test]
async fn test_request_sizes_differ_only_in_n() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recommend"))
        .and(query_param_is_missing("genres"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.fetch_recommendations("demo_user", 6, &[]).await.unwrap();
    client.fetch_recommendations("demo_user", 10, &[]).await.unwrap();

    let requests = server.received_requests().await.expect("request recording");
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, requests[1].method);
    assert_eq!(requests[0].url.path(), requests[1].url.path());

    let without_n = |pairs: Vec<(String, String)>| -> Vec<(String, String)> {
        pairs.into_iter().filter(|(k, _)| k != "n").collect()
    };
    let small = query_pairs(&requests[0]);
    let large = query_pairs(&requests[1]);
    assert_eq!(without_n(small.clone()), without_n(large.clone()));

    let n_of = |pairs: &[(String, String)]| {
        pairs
            .iter()
            .find(|(k, _)| k == "n")
            .map(|(_, v)| v.clone())
    };
    assert_eq!(n_of(&small).as_deref(), Some("6"));
    assert_eq!(n_of(&large).as_deref(), Some("10"));
}

#[tokio::test]
async fn test_submit_feedback_posts_action_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/demo_user/pass"))
        .and(body_json(serde_json::json!({ "user_id": "demo_user", "book_id": 7 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": "passed" })))
        .expect(1)
        .mount(&server)
        .await;

    let event = FeedbackEvent::new("demo_user", 7, FeedbackAction::Pass);
    client_for(&server)
        .submit_feedback(&event)
        .await
        .expect("feedback recorded");
}

#[tokio::test]
async fn test_fetch_history() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/demo_user/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "book_id": 12, "action": "like" },
            { "book_id": 31, "action": "pass" }
        ])))
        .mount(&server)
        .await;

    let history = client_for(&server)
        .fetch_history("demo_user")
        .await
        .expect("history");

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].book_id, 12);
    assert_eq!(history[0].label(), "Liked");
    assert_eq!(history[1].action, FeedbackAction::Pass);
}

#[tokio::test]
async fn test_error_statuses_and_bad_payloads() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/recommend"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(serde_json::json!({ "detail": "Search index not ready" })),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/user/demo_user/history"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let err = client
        .fetch_recommendations("demo_user", 10, &[])
        .await
        .unwrap_err();
    assert_eq!(err, NetworkError::Status(503));

    let err = client.fetch_history("demo_user").await.unwrap_err();
    assert!(matches!(err, NetworkError::Decode(_)), "got {:?}", err);

    // Nothing mounted for feedback: wiremock answers 404
    let event = FeedbackEvent::new("demo_user", 1, FeedbackAction::Like);
    assert_eq!(
        client.submit_feedback(&event).await.unwrap_err(),
        NetworkError::Status(404)
    );
}

#[tokio::test]
async fn test_unreachable_backend_is_a_request_error() {
    let client = BackendClient::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
    let err = client.fetch_history("demo_user").await.unwrap_err();
    assert!(matches!(err, NetworkError::Request(_)), "got {:?}", err);
}
