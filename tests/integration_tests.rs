// Integration tests for STEP Algo

use async_trait::async_trait;
use step_algo::core::booking::BookingWorkflow;
use step_algo::core::filters::ALL;
use step_algo::core::MentorCatalog;
use step_algo::models::{BookingRequest, MatchSuggestion, MeetingFormat, Mentor};
use step_algo::services::gemini::{GeminiClient, MatchError, MentorRecommender};
use step_algo::services::webhook::{SubmissionClient, SubmissionOutcome};

fn create_mentor(id: &str, industry: &str, city: &str) -> Mentor {
    Mentor {
        id: id.to_string(),
        name: format!("Наставник {}", id),
        industry: industry.to_string(),
        city: city.to_string(),
        experience: "10 лет".to_string(),
        description: format!("Эксперт в сфере {}", industry),
        achievements: vec![],
        request: String::new(),
        values: vec!["труд".to_string()],
        video_url: String::new(),
        avatar_url: String::new(),
        single_price: 3000,
        group_price: 1000,
    }
}

/// Deterministic stand-in for the external matching model
struct StubRecommender {
    mentor_id: String,
}

#[async_trait]
impl MentorRecommender for StubRecommender {
    async fn recommend(
        &self,
        query: &str,
        _mentors: &[Mentor],
    ) -> Result<MatchSuggestion, MatchError> {
        if query.trim().is_empty() {
            return Err(MatchError::EmptyQuery);
        }
        Ok(MatchSuggestion {
            mentor_id: self.mentor_id.clone(),
            reason: "Работает в нужной индустрии".to_string(),
        })
    }
}

#[test]
fn test_end_to_end_filter_and_pricing() {
    // mentor A: industry "IT", city "Москва", groupPrice 1000, singlePrice 3000
    let catalog = MentorCatalog::new(vec![create_mentor("a", "IT", "Москва")]).unwrap();

    let it_moscow: Vec<&str> = catalog
        .filter("IT", "Москва", "")
        .iter()
        .map(|m| m.id.as_str())
        .collect();
    assert_eq!(it_moscow, vec!["a"]);

    assert!(catalog.filter("Маркетинг", "Москва", "").is_empty());

    // booking A in the group format yields 1000
    let mentor = catalog.get("a").unwrap().clone();
    let mut flow = BookingWorkflow::open(mentor.clone());
    flow.select_format(MeetingFormat::GroupOffline).unwrap();
    flow.submit_goal("Хочу в IT", "Помощь с соцсетями").unwrap();
    let group_request = flow.select_slot("10:00").unwrap();
    assert_eq!(group_request.price, 1000);

    // and in the solo online format yields 3000
    let mut flow = BookingWorkflow::open(mentor);
    flow.select_format(MeetingFormat::Online1On1).unwrap();
    flow.submit_goal("Хочу в IT", "Помощь с соцсетями").unwrap();
    let solo_request = flow.select_slot("11:30").unwrap();
    assert_eq!(solo_request.price, 3000);
}

#[tokio::test]
async fn test_match_scenario_with_stub_recommender() {
    let catalog = MentorCatalog::new(vec![
        create_mentor("it-mentor", "IT", "Москва"),
        create_mentor("fin-mentor", "Финансы", "Москва"),
    ])
    .unwrap();

    let recommender = StubRecommender {
        mentor_id: "it-mentor".to_string(),
    };

    let suggestion = recommender
        .recommend("хочу в IT", catalog.mentors())
        .await
        .unwrap();

    assert_eq!(suggestion.mentor_id, "it-mentor");
    // the consuming layer must be able to resolve the id
    let mentor = catalog.get(&suggestion.mentor_id);
    assert!(mentor.is_some());
    assert_eq!(mentor.unwrap().industry, "IT");
}

#[tokio::test]
async fn test_unknown_recommended_id_resolves_to_nothing() {
    let catalog = MentorCatalog::new(vec![create_mentor("a", "IT", "Москва")]).unwrap();
    let recommender = StubRecommender {
        mentor_id: "hallucinated".to_string(),
    };

    let suggestion = recommender
        .recommend("хочу в IT", catalog.mentors())
        .await
        .unwrap();

    // unknown id is "no recommendation", never a crash
    assert!(catalog.get(&suggestion.mentor_id).is_none());
}

#[tokio::test]
async fn test_gemini_client_parses_constrained_reply() {
    let mut server = mockito::Server::new_async().await;

    let body = serde_json::json!({
        "candidates": [{
            "content": {
                "parts": [{
                    "text": "{\"id\": \"m-volkov\", \"reason\": \"Подходит по индустрии\"}"
                }]
            }
        }]
    });

    let mock = server
        .mock("POST", "/v1beta/models/gemini-3-flash-preview:generateContent")
        .match_query(mockito::Matcher::UrlEncoded(
            "key".into(),
            "test_key".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let client = GeminiClient::new(
        server.url(),
        "test_key".to_string(),
        "gemini-3-flash-preview".to_string(),
    );

    let suggestion = client
        .recommend("хочу в IT", &[create_mentor("m-volkov", "IT", "Москва")])
        .await
        .unwrap();

    assert_eq!(suggestion.mentor_id, "m-volkov");
    assert_eq!(suggestion.reason, "Подходит по индустрии");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_gemini_client_rejects_unparsable_reply() {
    let mut server = mockito::Server::new_async().await;

    let body = serde_json::json!({
        "candidates": [{
            "content": {
                "parts": [{ "text": "извините, не могу выбрать" }]
            }
        }]
    });

    let _mock = server
        .mock("POST", "/v1beta/models/gemini-3-flash-preview:generateContent")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let client = GeminiClient::new(
        server.url(),
        "test_key".to_string(),
        "gemini-3-flash-preview".to_string(),
    );

    let result = client
        .recommend("хочу в IT", &[create_mentor("a", "IT", "Москва")])
        .await;

    assert!(matches!(result, Err(MatchError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_gemini_client_maps_api_failure() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("POST", "/v1beta/models/gemini-3-flash-preview:generateContent")
        .match_query(mockito::Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let client = GeminiClient::new(
        server.url(),
        "test_key".to_string(),
        "gemini-3-flash-preview".to_string(),
    );

    let result = client
        .recommend("хочу в IT", &[create_mentor("a", "IT", "Москва")])
        .await;

    assert!(matches!(result, Err(MatchError::ApiError(_))));
}

#[tokio::test]
async fn test_submission_confirmed_on_success_status() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/exec")
        .with_status(200)
        .create_async()
        .await;

    let client = SubmissionClient::new(format!("{}/exec", server.url()));
    let outcome = client
        .submit_booking(&sample_request(), &create_mentor("a", "IT", "Москва"))
        .await;

    assert_eq!(outcome, SubmissionOutcome::Submitted);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_submission_unconfirmed_on_server_error() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("POST", "/exec")
        .with_status(500)
        .create_async()
        .await;

    let client = SubmissionClient::new(format!("{}/exec", server.url()));
    let outcome = client
        .submit_booking(&sample_request(), &create_mentor("a", "IT", "Москва"))
        .await;

    // the failed write is swallowed, only the uncertainty is reported
    assert_eq!(outcome, SubmissionOutcome::SubmittedUnconfirmed);
}

#[test]
fn test_builtin_catalog_supports_the_filter_lists() {
    let catalog = MentorCatalog::builtin();

    assert_eq!(catalog.industries()[0], ALL);
    assert_eq!(catalog.cities()[0], ALL);
    assert!(catalog.industries().len() > 1);
    assert!(catalog.cities().len() > 1);
}

fn sample_request() -> BookingRequest {
    BookingRequest {
        mentor_id: "a".to_string(),
        format: MeetingFormat::GroupOffline,
        goal: "Хочу в IT".to_string(),
        exchange_offer: "Помощь с контентом".to_string(),
        slot: "10:00".to_string(),
        price: 1000,
    }
}
