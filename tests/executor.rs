//! Request executor and referral client against a mock API.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use referral_claimer::http::{ApiRequest, RequestExecutor};
use referral_claimer::observability::{AccountLog, MemorySink, Severity};
use referral_claimer::referral::{Referral, ReferralApi, ReferralClient, ReferralId};
use reqwest::header::{HeaderName, HeaderValue, CONTENT_TYPE};

mod common;

fn client_for(base_url: &str, sink: &Arc<MemorySink>) -> ReferralClient {
    let config = common::fast_config(base_url);
    ReferralClient::new(None, &config, AccountLog::new(sink.clone(), 1, 1)).unwrap()
}

fn executor_for(base_url: &str, sink: &Arc<MemorySink>) -> RequestExecutor {
    let config = common::fast_config(base_url);
    RequestExecutor::new(None, &config, AccountLog::new(sink.clone(), 1, 1)).unwrap()
}

#[tokio::test]
async fn test_retries_exactly_max_attempts_then_gives_up() {
    let backend =
        common::start_programmable_backend(|_| (500, r#"{"error":"boom"}"#.into())).await;
    let sink = Arc::new(MemorySink::new());
    let executor = executor_for(&backend.base_url(), &sink);

    let result = executor
        .execute(&ApiRequest::get(format!("{}/anything", backend.base_url())))
        .await;

    assert!(result.is_none());
    assert_eq!(backend.requests().len(), 3);

    let errors: Vec<String> = sink
        .entries()
        .into_iter()
        .filter(|e| e.severity == Severity::Error)
        .map(|e| e.message)
        .collect();
    assert_eq!(
        errors.iter().filter(|m| *m == r#"Error 500: {"error":"boom"}"#).count(),
        3
    );
    let retries = sink.messages_for(1);
    assert_eq!(retries.iter().filter(|m| *m == "Retrying request...").count(), 2);
}

#[tokio::test]
async fn test_explicit_attempt_budget() {
    let backend = common::start_programmable_backend(|_| (503, "down".into())).await;
    let sink = Arc::new(MemorySink::new());
    let executor = executor_for(&backend.base_url(), &sink);

    let result = executor
        .execute_with_attempts(&ApiRequest::get(backend.base_url()), 1)
        .await;

    assert!(result.is_none());
    assert_eq!(backend.requests().len(), 1);
    assert!(!sink.contains("Retrying request..."));
}

#[tokio::test]
async fn test_succeeds_after_transient_failures() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    let backend = common::start_programmable_backend(move |_| {
        if counter.fetch_add(1, Ordering::SeqCst) < 2 {
            (429, "{}".into())
        } else {
            (200, r#"{"ok":true}"#.into())
        }
    })
    .await;
    let sink = Arc::new(MemorySink::new());
    let executor = executor_for(&backend.base_url(), &sink);

    let response = executor.execute(&ApiRequest::get(backend.base_url())).await.unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_default_and_caller_headers() {
    let backend = common::start_programmable_backend(|_| (200, "{}".into())).await;
    let sink = Arc::new(MemorySink::new());
    let executor = executor_for(&backend.base_url(), &sink);

    let request = ApiRequest::get(backend.base_url())
        .bearer("tok-1")
        .header(CONTENT_TYPE, HeaderValue::from_static("text/plain"))
        .header(HeaderName::from_static("x-trace"), HeaderValue::from_static("abc"));
    executor.execute(&request).await.unwrap();
    executor.execute(&request).await.unwrap();

    let seen = backend.requests();
    assert_eq!(seen.len(), 2);
    for req in &seen {
        assert_eq!(req.bearer(), Some("tok-1"));
        assert_eq!(req.header("content-type"), Some("text/plain"));
        assert_eq!(req.header("x-trace"), Some("abc"));
        assert!(req.header("user-agent").unwrap().starts_with("Mozilla/5.0"));
    }
}

#[tokio::test]
async fn test_multi_valued_caller_header_sent_in_full() {
    let backend = common::start_programmable_backend(|_| (200, "{}".into())).await;
    let sink = Arc::new(MemorySink::new());
    let executor = executor_for(&backend.base_url(), &sink);

    let mut request = ApiRequest::get(backend.base_url());
    let multi = HeaderName::from_static("x-multi");
    request.headers.append(multi.clone(), HeaderValue::from_static("first"));
    request.headers.append(multi, HeaderValue::from_static("second"));
    executor.execute(&request).await.unwrap();

    let seen = &backend.requests()[0];
    assert_eq!(seen.header_values("x-multi"), vec!["first", "second"]);
    assert_eq!(seen.header_values("content-type"), vec!["application/json"]);
}

#[tokio::test]
async fn test_fetch_referrals_success() {
    let backend = common::start_programmable_backend(|_| {
        let body = r#"{"success":true,"unfiltered":{"referrals":[
            {"id":"a","status":"Claimable","canClaim":true}
        ]}}"#;
        (200, body.into())
    })
    .await;
    let sink = Arc::new(MemorySink::new());
    let client = client_for(&backend.base_url(), &sink);

    let referrals = client.fetch_referrals("tok").await.unwrap();

    assert_eq!(referrals, vec![Referral::new("a", "Claimable", true)]);
    let request = &backend.requests()[0];
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/api/users/referrals");
    assert_eq!(request.bearer(), Some("tok"));
    assert!(sink.contains("Total referrals: 1"));
}

#[tokio::test]
async fn test_fetch_referrals_empty_list_is_some() {
    let body = r#"{"success":true,"unfiltered":{"referrals":[]}}"#;
    let backend = common::start_programmable_backend(move |_| (200, body.into())).await;
    let sink = Arc::new(MemorySink::new());

    let referrals = client_for(&backend.base_url(), &sink).fetch_referrals("tok").await;
    assert_eq!(referrals, Some(Vec::new()));
}

#[tokio::test]
async fn test_fetch_referrals_unsuccessful_flag_is_none() {
    let backend =
        common::start_programmable_backend(|_| (200, r#"{"success":false}"#.into())).await;
    let sink = Arc::new(MemorySink::new());

    let referrals = client_for(&backend.base_url(), &sink).fetch_referrals("tok").await;
    assert!(referrals.is_none());
    assert_eq!(backend.requests().len(), 1);
    assert!(sink.contains("Failed to get referral data."));
}

#[tokio::test]
async fn test_fetch_referrals_exhausted_is_none() {
    let backend = common::start_programmable_backend(|_| (502, "bad gateway".into())).await;
    let sink = Arc::new(MemorySink::new());

    let referrals = client_for(&backend.base_url(), &sink).fetch_referrals("tok").await;
    assert!(referrals.is_none());
    assert_eq!(backend.requests().len(), 3);
}

#[tokio::test]
async fn test_fetch_referrals_undecodable_body_is_none() {
    let backend =
        common::start_programmable_backend(|_| (200, "<html>maintenance</html>".into())).await;
    let sink = Arc::new(MemorySink::new());

    let referrals = client_for(&backend.base_url(), &sink).fetch_referrals("tok").await;
    assert!(referrals.is_none());
    assert!(sink.contains("Error getting referral data"));
}

#[tokio::test]
async fn test_claim_referral_posts_id() {
    let body = r#"{"success":true,"message":"Claimed 100 points"}"#;
    let backend = common::start_programmable_backend(move |_| (200, body.into())).await;
    let sink = Arc::new(MemorySink::new());
    let client = client_for(&backend.base_url(), &sink);

    assert!(client.claim_referral("tok", Some(&ReferralId::from("ref-9"))).await);

    let request = &backend.requests()[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/api/users/referrals/claim");
    assert_eq!(request.json(), serde_json::json!({ "referralId": "ref-9" }));
    assert!(sink.contains("Claimed 100 points"));
}

#[tokio::test]
async fn test_claim_referral_failure_is_false() {
    let body = r#"{"success":false,"message":"Already claimed"}"#;
    let backend = common::start_programmable_backend(move |_| (200, body.into())).await;
    let sink = Arc::new(MemorySink::new());

    let id = ReferralId(serde_json::json!(7));
    let claimed = client_for(&backend.base_url(), &sink)
        .claim_referral("tok", Some(&id))
        .await;

    assert!(!claimed);
    assert_eq!(backend.requests()[0].json(), serde_json::json!({ "referralId": 7 }));
    assert!(sink.contains("Already claimed"));
}

#[tokio::test]
async fn test_claim_without_id_sends_empty_object() {
    let body = r#"{"success":false,"message":"referralId is required"}"#;
    let backend = common::start_programmable_backend(move |_| (400, body.into())).await;
    let sink = Arc::new(MemorySink::new());

    let claimed = client_for(&backend.base_url(), &sink)
        .claim_referral("tok", None)
        .await;

    assert!(!claimed);
    let seen = backend.requests();
    assert_eq!(seen.len(), 3);
    assert!(seen.iter().all(|r| r.json() == serde_json::json!({})));
    assert!(sink.contains("Failed to claim referral <none>"));
}
