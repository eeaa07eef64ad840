use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::DateTime;
use serde_json::{json, Value};
use tower::ServiceExt;

use nyai_api::{build_router, config::Config, state::AppState};
use nyai_extract::ExtractorRegistry;
use nyai_llm::{GenerateRequest, GenerativeClient, LlmError};
use nyai_store::Conversation;

/// Scripted model double: pops one canned result per invocation, fails with
/// an API error when the script runs dry.
struct ScriptedModel {
    responses: Mutex<VecDeque<Result<String, LlmError>>>,
}

impl ScriptedModel {
    fn new(responses: Vec<Result<String, LlmError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
        })
    }

    fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerativeClient for ScriptedModel {
    async fn generate(&self, _request: GenerateRequest) -> Result<String, LlmError> {
        self.responses.lock().unwrap().pop_front().unwrap_or(Err(LlmError::Api {
            status: 500,
            message: "script exhausted".to_string(),
        }))
    }
}

fn api_error(message: &str) -> LlmError {
    LlmError::Api {
        status: 503,
        message: message.to_string(),
    }
}

fn test_state(model: Option<Arc<ScriptedModel>>) -> Arc<AppState> {
    let model = model.map(|m| m as Arc<dyn GenerativeClient>);
    Arc::new(AppState::new(Config::default(), ExtractorRegistry::probe(), model).unwrap())
}

fn app(state: &Arc<AppState>) -> Router {
    build_router(Arc::clone(state))
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn upload_body(text: &str, filename: &str, content_type: &str) -> Value {
    json!({
        "content": STANDARD.encode(text),
        "filename": filename,
        "content_type": content_type,
    })
}

const VALID_ANALYSIS: &str = r#"{
    "document_type": "contract",
    "summary": "A rental agreement between two parties.",
    "key_topics": ["rent", "deposit"],
    "entities": ["Asha", "Ravi"],
    "language_complexity": "simple"
}"#;

// --- health ---

#[tokio::test]
async fn health_reports_capabilities_and_model_state() {
    let state = test_state(None);
    let (status, body) = send(app(&state), Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model"], false);
    assert_eq!(body["pdf_support"], true);
    assert_eq!(body["docx_support"], true);
}

// --- upload ---

#[tokio::test]
async fn upload_stores_document_and_returns_analysis() {
    let model = ScriptedModel::new(vec![Ok(VALID_ANALYSIS.to_string())]);
    let state = test_state(Some(Arc::clone(&model)));

    let (status, body) = send(
        app(&state),
        Method::POST,
        "/upload",
        Some(upload_body("The tenant shall pay rent monthly.", "lease.txt", "text/plain")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["word_count"], 6);
    assert_eq!(body["analysis"]["document_type"], "contract");

    let document_id = body["document_id"].as_str().unwrap();
    assert!(document_id.starts_with("doc_"));
    assert!(state.documents.get(document_id).is_some());
}

#[tokio::test]
async fn upload_falls_back_when_analysis_is_not_json() {
    let model = ScriptedModel::new(vec![Ok("Here is my analysis: it is a contract.".to_string())]);
    let state = test_state(Some(model));

    let (status, body) = send(
        app(&state),
        Method::POST,
        "/upload",
        Some(upload_body("Some legal text.", "doc.txt", "text/plain")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["analysis"]["document_type"], "unknown");
    assert_eq!(body["analysis"]["language_complexity"], "moderate");
    assert_eq!(body["analysis"]["key_topics"], json!([]));
    assert_eq!(
        body["analysis"]["summary"],
        "Document uploaded successfully. You can now ask questions about it."
    );
}

#[tokio::test]
async fn upload_falls_back_when_invocation_fails() {
    let model = ScriptedModel::new(vec![Err(api_error("model overloaded"))]);
    let state = test_state(Some(model));

    let (status, body) = send(
        app(&state),
        Method::POST,
        "/upload",
        Some(upload_body("Some legal text.", "doc.txt", "text/plain")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["analysis"]["document_type"], "unknown");
    assert_eq!(
        body["analysis"]["summary"],
        "Document uploaded but analysis failed. You can still ask questions about it."
    );
}

#[tokio::test]
async fn upload_rejects_oversized_payload_before_extraction() {
    let model = ScriptedModel::new(vec![]);
    let state = test_state(Some(Arc::clone(&model)));

    let oversized = STANDARD.encode(vec![0u8; 16 * 1024 * 1024]);
    let (status, body) = send(
        app(&state),
        Method::POST,
        "/upload",
        Some(json!({
            "content": oversized,
            "filename": "big.txt",
            "content_type": "text/plain",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("too large"));
    // the model was never consulted
    assert_eq!(model.remaining(), 0);
}

#[tokio::test]
async fn upload_rejects_unknown_extension() {
    let model = ScriptedModel::new(vec![]);
    let state = test_state(Some(model));

    let (status, body) = send(
        app(&state),
        Method::POST,
        "/upload",
        Some(upload_body("data", "malware.exe", "text/plain")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Unsupported file extension"));
}

#[tokio::test]
async fn upload_rejects_empty_document() {
    let model = ScriptedModel::new(vec![]);
    let state = test_state(Some(model));

    let (status, body) = send(
        app(&state),
        Method::POST,
        "/upload",
        Some(upload_body("   \n  ", "blank.txt", "text/plain")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("No text content"));
}

#[tokio::test]
async fn upload_without_model_is_a_configuration_error() {
    let state = test_state(None);

    let (status, body) = send(
        app(&state),
        Method::POST,
        "/upload",
        Some(upload_body("text", "doc.txt", "text/plain")),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "AI model not configured. Set GOOGLE_API_KEY.");
}

// --- question ---

async fn upload_fixture(state: &Arc<AppState>) -> String {
    let (status, body) = send(
        app(state),
        Method::POST,
        "/upload",
        Some(upload_body(
            "The security deposit shall be refunded within 30 days.",
            "lease.txt",
            "text/plain",
        )),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["document_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn question_answers_from_structured_output() {
    let answer = json!({
        "answer": "The deposit is refunded within 30 days.",
        "confidence": "high",
        "relevant_sections": ["refunded within 30 days"],
        "follow_up_questions": ["What if the landlord delays?"]
    });
    let model = ScriptedModel::new(vec![
        Ok(VALID_ANALYSIS.to_string()),
        Ok(answer.to_string()),
    ]);
    let state = test_state(Some(model));
    let document_id = upload_fixture(&state).await;

    let (status, body) = send(
        app(&state),
        Method::POST,
        "/question",
        Some(json!({
            "question": "When is the deposit refunded?",
            "document_id": document_id,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["document_name"], "lease.txt");
    assert_eq!(body["answer"], "The deposit is refunded within 30 days.");
    assert_eq!(body["confidence"], "high");
    assert_eq!(body["relevant_sections"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn question_falls_back_when_output_is_not_json() {
    let model = ScriptedModel::new(vec![
        Ok(VALID_ANALYSIS.to_string()),
        Ok("The deposit is refunded... (not JSON)".to_string()),
    ]);
    let state = test_state(Some(model));
    let document_id = upload_fixture(&state).await;

    let (status, body) = send(
        app(&state),
        Method::POST,
        "/question",
        Some(json!({
            "question": "When is the deposit refunded?",
            "document_id": document_id,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["confidence"], "low");
    assert!(body["answer"]
        .as_str()
        .unwrap()
        .contains("difficulty formatting the response"));
    assert_eq!(body["relevant_sections"], json!([]));
    assert_eq!(body["follow_up_questions"], json!([]));
}

#[tokio::test]
async fn question_for_unknown_document_is_404() {
    let model = ScriptedModel::new(vec![]);
    let state = test_state(Some(model));

    let (status, _) = send(
        app(&state),
        Method::POST,
        "/question",
        Some(json!({ "question": "Anything?", "document_id": "doc_404" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn question_length_and_emptiness_are_validated() {
    let model = ScriptedModel::new(vec![Ok(VALID_ANALYSIS.to_string())]);
    let state = test_state(Some(model));
    let document_id = upload_fixture(&state).await;

    let (status, body) = send(
        app(&state),
        Method::POST,
        "/question",
        Some(json!({ "question": "  ", "document_id": document_id })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Question is required");

    let long_question = "why? ".repeat(150);
    let (status, body) = send(
        app(&state),
        Method::POST,
        "/question",
        Some(json!({ "question": long_question, "document_id": document_id })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Question too long"));
}

// --- chat & conversations ---

#[tokio::test]
async fn chat_creates_a_conversation_with_generated_title() {
    let model = ScriptedModel::new(vec![
        Ok("Eviction Notice Rights".to_string()),
        Ok("You generally must receive written notice. I am an AI, not a lawyer.".to_string()),
    ]);
    let state = test_state(Some(model));

    let (status, body) = send(
        app(&state),
        Method::POST,
        "/chat",
        Some(json!({ "message": "Can I be evicted without notice?", "user_id": "asha" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["conversation_title"], "Eviction Notice Rights");
    let conversation_id = body["conversation_id"].as_str().unwrap().to_string();
    assert!(conversation_id.starts_with("asha_"));

    // transcript holds both turns, and the new conversation is active
    let (status, listing) = send(app(&state), Method::GET, "/conversations/asha", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["conversations"].as_array().unwrap().len(), 1);
    assert_eq!(listing["active_conversation"], conversation_id.as_str());

    let uri = format!("/conversations/asha/{conversation_id}");
    let (status, transcript) = send(app(&state), Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let messages = transcript["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[1]["role"], "assistant");
}

#[tokio::test]
async fn chat_title_falls_back_to_truncated_message() {
    let model = ScriptedModel::new(vec![
        Err(api_error("title generation down")),
        Ok("Here is an answer.".to_string()),
    ]);
    let state = test_state(Some(model));

    let message = "Please explain the doctrine of adverse possession in detail";
    let (status, body) = send(
        app(&state),
        Method::POST,
        "/chat",
        Some(json!({ "message": message, "user_id": "asha" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["conversation_title"], "Please explain the doctrine of...");
}

#[tokio::test]
async fn chat_reply_degrades_to_error_text_instead_of_500() {
    let model = ScriptedModel::new(vec![
        Ok("Some Title".to_string()),
        Err(api_error("model overloaded")),
    ]);
    let state = test_state(Some(model));

    let (status, body) = send(
        app(&state),
        Method::POST,
        "/chat",
        Some(json!({ "message": "What is a contract?", "user_id": "asha" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let response = body["response"].as_str().unwrap();
    assert!(response.starts_with("Sorry, an error occurred while processing your request:"));

    // the degraded reply still lands in the transcript
    let conversation_id = body["conversation_id"].as_str().unwrap();
    let uri = format!("/conversations/asha/{conversation_id}");
    let (_, transcript) = send(app(&state), Method::GET, &uri, None).await;
    assert_eq!(transcript["messages"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn chat_with_unknown_conversation_is_404() {
    let model = ScriptedModel::new(vec![]);
    let state = test_state(Some(model));

    let (status, _) = send(
        app(&state),
        Method::POST,
        "/chat",
        Some(json!({
            "message": "hello",
            "user_id": "asha",
            "conversation_id": "asha_999"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn conversations_list_newest_updated_first() {
    let state = test_state(None);

    state.conversations.with_history("asha", |history| {
        for (id, seconds) in [("c10", 10), ("c30", 30), ("c20", 20)] {
            let mut conversation = Conversation::new(format!("Conversation {seconds}"));
            conversation.created_at = DateTime::from_timestamp(seconds, 0).unwrap();
            conversation.updated_at = DateTime::from_timestamp(seconds, 0).unwrap();
            history.insert_conversation(id, conversation);
        }
    });

    let (status, body) = send(app(&state), Method::GET, "/conversations/asha", None).await;
    assert_eq!(status, StatusCode::OK);

    let order: Vec<&str> = body["conversations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(order, vec!["c30", "c20", "c10"]);
}

#[tokio::test]
async fn deleting_active_conversation_clears_pointer() {
    let state = test_state(None);

    let (_, first) = send(app(&state), Method::POST, "/conversations/asha/new", None).await;
    // conversation ids are second-resolution; reuse the id from the response
    let first_id = first["conversation_id"].as_str().unwrap().to_string();

    state.conversations.with_history("asha", |history| {
        history.insert_conversation("other", Conversation::new("Other"));
    });

    // first_id is active; deleting "other" must not touch the pointer
    let (status, _) = send(
        app(&state),
        Method::DELETE,
        "/conversations/asha/other",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, listing) = send(app(&state), Method::GET, "/conversations/asha", None).await;
    assert_eq!(listing["active_conversation"], first_id.as_str());

    // deleting the active conversation clears it
    let uri = format!("/conversations/asha/{first_id}");
    let (status, body) = send(app(&state), Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Conversation deleted successfully");
    let (_, listing) = send(app(&state), Method::GET, "/conversations/asha", None).await;
    assert_eq!(listing["active_conversation"], Value::Null);
}

#[tokio::test]
async fn deleting_unknown_conversation_is_404() {
    let state = test_state(None);
    let (status, _) = send(
        app(&state),
        Method::DELETE,
        "/conversations/asha/missing",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn set_active_validates_the_target() {
    let state = test_state(None);

    let (_, created) = send(app(&state), Method::POST, "/conversations/asha/new", None).await;
    let id = created["conversation_id"].as_str().unwrap().to_string();

    let (status, _) = send(
        app(&state),
        Method::PUT,
        "/conversations/asha/active",
        Some(json!({ "conversation_id": "missing" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        app(&state),
        Method::PUT,
        "/conversations/asha/active",
        Some(json!({ "conversation_id": id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Active conversation updated");
}

// --- analyze ---

#[tokio::test]
async fn analyze_rejects_invalid_analysis_type() {
    let model = ScriptedModel::new(vec![]);
    let state = test_state(Some(model));

    let mut body = upload_body("Some text to analyze.", "doc.txt", "text/plain");
    body["analysis_type"] = json!("vibes");
    let (status, response) = send(app(&state), Method::POST, "/analyze", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["error"]
        .as_str()
        .unwrap()
        .contains("Invalid analysis type"));
}

#[tokio::test]
async fn analyze_merges_model_fields_into_response() {
    let model = ScriptedModel::new(vec![Ok(json!({
        "executive_summary": "Short.",
        "detailed_summary": "Long.",
        "key_sections": []
    })
    .to_string())]);
    let state = test_state(Some(model));

    let mut body = upload_body("Some text to analyze in detail.", "doc.txt", "text/plain");
    body["analysis_type"] = json!("summary");
    let (status, response) = send(app(&state), Method::POST, "/analyze", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["success"], true);
    assert_eq!(response["analysis_type"], "summary");
    assert_eq!(response["word_count"], 6);
    assert_eq!(response["executive_summary"], "Short.");
}

#[tokio::test]
async fn analyze_with_malformed_output_is_500() {
    let model = ScriptedModel::new(vec![Ok("no json here".to_string())]);
    let state = test_state(Some(model));

    let (status, _) = send(
        app(&state),
        Method::POST,
        "/analyze",
        Some(upload_body("Some text to analyze.", "doc.txt", "text/plain")),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

// --- documents listing & deletion ---

#[tokio::test]
async fn documents_list_reports_stored_records() {
    let model = ScriptedModel::new(vec![
        Ok(VALID_ANALYSIS.to_string()),
        Ok(VALID_ANALYSIS.to_string()),
    ]);
    let state = test_state(Some(model));

    let (_, first) = send(
        app(&state),
        Method::POST,
        "/upload",
        Some(upload_body("First document text.", "first.txt", "text/plain")),
    )
    .await;
    let (_, second) = send(
        app(&state),
        Method::POST,
        "/upload",
        Some(upload_body("Second document text.", "second.txt", "text/plain")),
    )
    .await;

    let (status, body) = send(app(&state), Method::GET, "/documents", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    let ids: Vec<&str> = body["documents"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["document_id"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&first["document_id"].as_str().unwrap()));
    assert!(ids.contains(&second["document_id"].as_str().unwrap()));
    assert_eq!(body["documents"][0]["document_type"], "contract");
}

#[tokio::test]
async fn delete_document_roundtrip() {
    let model = ScriptedModel::new(vec![Ok(VALID_ANALYSIS.to_string())]);
    let state = test_state(Some(model));
    let document_id = upload_fixture(&state).await;

    let uri = format!("/documents/{document_id}");
    let (status, body) = send(app(&state), Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Document 'lease.txt' deleted successfully"
    );

    let (status, _) = send(app(&state), Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// --- simplify & translate ---

#[tokio::test]
async fn simplify_rejects_non_legal_text_before_any_model_call() {
    let model = ScriptedModel::new(vec![]);
    let state = test_state(Some(Arc::clone(&model)));

    let (status, body) = send(
        app(&state),
        Method::POST,
        "/simplify",
        Some(json!({ "text": "hello there friend" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "This does not appear to be a valid legal statement."
    );
    assert_eq!(model.remaining(), 0);
}

#[tokio::test]
async fn simplify_rejects_empty_text() {
    let model = ScriptedModel::new(vec![]);
    let state = test_state(Some(model));

    let (status, body) = send(
        app(&state),
        Method::POST,
        "/simplify",
        Some(json!({ "text": "   " })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Text is required");
}

#[tokio::test]
async fn translate_skips_model_for_english_target() {
    let model = ScriptedModel::new(vec![]);
    let state = test_state(Some(Arc::clone(&model)));

    let original = json!({
        "simplified_explanation": "You must give notice.",
        "real_life_example": "Asha tells Ravi a month ahead."
    });

    for target in ["English", "english", ""] {
        let (status, body) = send(
            app(&state),
            Method::POST,
            "/translate",
            Some(json!({ "result": original.clone(), "target_language": target })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, original);
    }
    // no scripted response was ever consumed
    assert_eq!(model.remaining(), 0);
}

#[tokio::test]
async fn translate_returns_original_on_model_failure() {
    let model = ScriptedModel::new(vec![Err(api_error("translation down"))]);
    let state = test_state(Some(model));

    let original = json!({ "simplified_explanation": "You must give notice." });
    let (status, body) = send(
        app(&state),
        Method::POST,
        "/translate",
        Some(json!({ "result": original.clone(), "target_language": "Hindi" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, original);
}

#[tokio::test]
async fn translate_returns_translated_object_on_success() {
    let translated = json!({ "simplified_explanation": "आपको सूचना देनी होगी।" });
    let model = ScriptedModel::new(vec![Ok(translated.to_string())]);
    let state = test_state(Some(model));

    let (status, body) = send(
        app(&state),
        Method::POST,
        "/translate",
        Some(json!({
            "result": { "simplified_explanation": "You must give notice." },
            "target_language": "Hindi"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, translated);
}

#[tokio::test]
async fn translate_without_model_is_a_configuration_error() {
    let state = test_state(None);
    let (status, _) = send(
        app(&state),
        Method::POST,
        "/translate",
        Some(json!({ "result": {}, "target_language": "Hindi" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
