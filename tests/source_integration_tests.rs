use happyhour::trivia::{Difficulty, FetchRequest, OpenTdbSource, QuestionSource, SourceError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helper Functions
// ============================================================================

fn request(amount: usize) -> FetchRequest {
    FetchRequest {
        amount,
        difficulty: Difficulty::Easy,
        category_id: 9,
    }
}

fn api_question(i: usize) -> serde_json::Value {
    serde_json::json!({
        "category": "General Knowledge",
        "type": "multiple",
        "difficulty": "easy",
        "question": format!("Question {i}?"),
        "correct_answer": format!("Right {i}"),
        "incorrect_answers": [
            format!("Wrong {i}a"),
            format!("Wrong {i}b"),
            format!("Wrong {i}c"),
        ],
    })
}

fn success_body(count: usize) -> serde_json::Value {
    serde_json::json!({
        "response_code": 0,
        "results": (0..count).map(api_question).collect::<Vec<_>>(),
    })
}

async fn mount_success(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ============================================================================
// OpenTdbSource Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_returns_a_full_batch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api.php"))
        .and(query_param("amount", "10"))
        .and(query_param("difficulty", "easy"))
        .and(query_param("category", "9"))
        .and(query_param("type", "multiple"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(10)))
        .mount(&mock_server)
        .await;

    let source = OpenTdbSource::new(Some(mock_server.uri()));
    let batch = source.fetch(request(10)).await.unwrap();

    assert_eq!(batch.len(), 10);
    let first = batch.get(0).unwrap();
    assert_eq!(first.text, "Question 0?");
    assert_eq!(first.correct_answer, "Right 0");
    assert_eq!(first.options.len(), 4);
    assert_eq!(
        first.options.iter().filter(|o| *o == "Right 0").count(),
        1
    );
}

#[tokio::test]
async fn test_fetch_decodes_html_entities() {
    let mock_server = MockServer::start().await;
    let body = serde_json::json!({
        "response_code": 0,
        "results": [{
            "category": "General Knowledge",
            "type": "multiple",
            "difficulty": "easy",
            "question": "What does &quot;HTTP&quot; stand for, isn&#039;t that obvious?",
            "correct_answer": "HyperText Transfer Protocol",
            "incorrect_answers": ["Hot &amp; Tasty Pancakes", "a", "b"],
        }],
    });
    mount_success(&mock_server, body).await;

    let source = OpenTdbSource::new(Some(mock_server.uri()));
    let batch = source.fetch(request(1)).await.unwrap();
    let question = batch.get(0).unwrap();

    assert_eq!(
        question.text,
        "What does \"HTTP\" stand for, isn't that obvious?"
    );
    assert!(question.options.iter().any(|o| o == "Hot & Tasty Pancakes"));
}

#[tokio::test]
async fn test_rejection_code_is_an_error() {
    let mock_server = MockServer::start().await;
    mount_success(
        &mock_server,
        serde_json::json!({ "response_code": 1, "results": [] }),
    )
    .await;

    let source = OpenTdbSource::new(Some(mock_server.uri()));
    let err = source.fetch(request(10)).await.unwrap_err();

    match err {
        SourceError::Rejected(msg) => assert!(msg.contains("not enough questions"), "got: {msg}"),
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_error_maps_to_api_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api.php"))
        .respond_with(ResponseTemplate::new(500).set_body_string("provider exploded"))
        .mount(&mock_server)
        .await;

    let source = OpenTdbSource::new(Some(mock_server.uri()));
    let err = source.fetch(request(10)).await.unwrap_err();

    match err {
        SourceError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "provider exploded");
        }
        other => panic!("expected Api, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_a_parse_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&mock_server)
        .await;

    let source = OpenTdbSource::new(Some(mock_server.uri()));
    let err = source.fetch(request(10)).await.unwrap_err();

    assert!(matches!(err, SourceError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn test_short_batch_is_insufficient() {
    let mock_server = MockServer::start().await;
    mount_success(&mock_server, success_body(3)).await;

    let source = OpenTdbSource::new(Some(mock_server.uri()));
    let err = source.fetch(request(10)).await.unwrap_err();

    match err {
        SourceError::Insufficient { requested, received } => {
            assert_eq!(requested, 10);
            assert_eq!(received, 3);
        }
        other => panic!("expected Insufficient, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_provider_is_a_network_error() {
    // Nothing listens on this port
    let source = OpenTdbSource::new(Some("http://127.0.0.1:9".to_string()));
    let err = source.fetch(request(10)).await.unwrap_err();

    assert!(matches!(err, SourceError::Network(_)), "got {err:?}");
}
