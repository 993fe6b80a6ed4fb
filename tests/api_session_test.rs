//! Integration tests for the session API endpoints

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    use parley::session::{SessionView, Status};

    use crate::test_utils::{body_to_string, test_app};

    const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

    fn success_body(text: &str) -> String {
        serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }]
        })
        .to_string()
    }

    fn message_request(message: &str) -> Request<Body> {
        Request::builder()
            .uri("/api/session/message")
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({ "message": message }).to_string(),
            ))
            .unwrap()
    }

    async fn session_view(response: axum::response::Response) -> SessionView {
        let body = body_to_string(response.into_body()).await;
        serde_json::from_str(&body).expect("Response was not a session view")
    }

    /// Tests the initial session is empty and idle
    #[tokio::test]
    async fn it_gets_initial_session() {
        let app = test_app("http://localhost:9", Some("test-key"));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/session")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let view = session_view(response).await;
        assert!(view.transcript.is_empty());
        assert_eq!(view.status, Status::Idle);
        assert_eq!(view.last_error, None);
        assert_eq!(view.system_instruction, "You are a helpful assistant.");
    }

    /// Tests a successful round trip appends a user and assistant turn
    #[tokio::test]
    async fn it_submits_a_message() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", GENERATE_PATH)
            .match_query(mockito::Matcher::UrlEncoded(
                "key".into(),
                "test-key".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(success_body("Hi there"))
            .create_async()
            .await;

        let app = test_app(&server.url(), Some("test-key"));

        let response = app.oneshot(message_request("hello")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        mock.assert_async().await;

        let view = session_view(response).await;
        assert_eq!(view.status, Status::Idle);
        assert_eq!(view.last_error, None);
        assert_eq!(view.transcript.len(), 2);
        assert_eq!(view.transcript[0].content, "hello");
        assert_eq!(view.transcript[1].content, "Hi there");
    }

    /// Tests that only the new user turn is sent, with the structured
    /// system instruction and the fixed generation config
    #[tokio::test]
    async fn it_sends_only_the_new_turn() {
        let mut server = mockito::Server::new_async().await;
        let first = server
            .mock("POST", GENERATE_PATH)
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(success_body("Hi there"))
            .create_async()
            .await;

        let app = test_app(&server.url(), Some("test-key"));
        let response = app.clone().oneshot(message_request("hello")).await.unwrap();
        assert_eq!(session_view(response).await.transcript.len(), 2);
        first.assert_async().await;

        // The second request body carries the new turn only, no prior
        // transcript, with the instruction in structured form
        let second = server
            .mock("POST", GENERATE_PATH)
            .match_query(mockito::Matcher::Any)
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "contents": [{"parts": [{"text": "and another"}]}],
                "systemInstruction": {"parts": [{"text": "You are a helpful assistant."}]},
                "generationConfig": {"temperature": 0.7, "maxOutputTokens": 1000}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(success_body("Sure"))
            .create_async()
            .await;

        let response = app
            .oneshot(message_request("and another"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        second.assert_async().await;
    }

    /// Tests an endpoint failure sets the error and keeps the user turn
    #[tokio::test]
    async fn it_surfaces_endpoint_failure() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", GENERATE_PATH)
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": {"code": 500, "message": "Internal error", "status": "INTERNAL"}}"#)
            .create_async()
            .await;

        let app = test_app(&server.url(), Some("test-key"));

        let response = app.oneshot(message_request("hello")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        mock.assert_async().await;

        let view = session_view(response).await;
        assert_eq!(view.status, Status::Idle);
        assert_eq!(view.transcript.len(), 1);
        assert_eq!(view.transcript[0].content, "hello");
        assert_eq!(view.last_error.as_deref(), Some("Internal error"));
    }

    /// Tests a missing credential is surfaced without a network attempt
    #[tokio::test]
    async fn it_surfaces_missing_credential() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", GENERATE_PATH)
            .match_query(mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let app = test_app(&server.url(), None);

        let response = app.oneshot(message_request("hello")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        mock.assert_async().await;

        let view = session_view(response).await;
        assert!(view.transcript.is_empty());
        assert_eq!(view.status, Status::Idle);
        assert_eq!(view.last_error.as_deref(), Some("credential missing"));
    }

    /// Tests whitespace input is silently ignored
    #[tokio::test]
    async fn it_ignores_whitespace_messages() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", GENERATE_PATH)
            .match_query(mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let app = test_app(&server.url(), Some("test-key"));

        let response = app.oneshot(message_request("   \n")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        mock.assert_async().await;

        let view = session_view(response).await;
        assert!(view.transcript.is_empty());
        assert_eq!(view.status, Status::Idle);
        assert_eq!(view.last_error, None);
    }

    /// Tests updating the system instruction applies to the next message
    #[tokio::test]
    async fn it_updates_the_system_instruction() {
        let mut server = mockito::Server::new_async().await;
        let app = test_app(&server.url(), Some("test-key"));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/session/system")
                    .method("PUT")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::json!({ "instruction": "Talk like a pirate." }).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let view = session_view(response).await;
        assert_eq!(view.system_instruction, "Talk like a pirate.");
        assert!(view.transcript.is_empty());
        assert_eq!(view.status, Status::Idle);

        // The next message goes out under the new instruction
        let mock = server
            .mock("POST", GENERATE_PATH)
            .match_query(mockito::Matcher::Any)
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "systemInstruction": {"parts": [{"text": "Talk like a pirate."}]}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(success_body("Arr"))
            .create_async()
            .await;

        let response = app.oneshot(message_request("hello")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        mock.assert_async().await;
    }

    /// Tests pending input tracking and its clearing on submit
    #[tokio::test]
    async fn it_tracks_pending_input() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", GENERATE_PATH)
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(success_body("Hi there"))
            .create_async()
            .await;

        let app = test_app(&server.url(), Some("test-key"));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/session/input")
                    .method("PUT")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::json!({ "input": "hello" }).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        let view = session_view(response).await;
        assert_eq!(view.pending_input, "hello");

        let response = app.oneshot(message_request("hello")).await.unwrap();
        let view = session_view(response).await;
        assert_eq!(view.pending_input, "");
        assert_eq!(view.transcript.len(), 2);
    }
}
