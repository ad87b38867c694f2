//! Integration tests for per-IP rate limiting.
//!
//! These tests require a running server and are sensitive to limiter state,
//! so run them against a freshly started instance.
//!
//! Run with: cargo test -p shakwa-integration-tests -- --ignored

use reqwest::StatusCode;

use shakwa_integration_tests::{base_url, client};

#[tokio::test]
#[ignore = "Requires freshly started server (limiter state)"]
async fn test_spam_endpoint_limits_after_three_requests() {
    let client = client();
    let url = format!("{}/spam", base_url());

    for i in 1..=3 {
        let resp = client.get(&url).send().await.expect("Failed to request /spam");
        assert_eq!(resp.status(), StatusCode::OK, "request {i} should pass");
        let body = resp.text().await.expect("Failed to read body");
        assert_eq!(body, "مسموح لك بثلاث محاولات في الدقيقة");
    }

    let resp = client.get(&url).send().await.expect("Failed to request /spam");
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

    // The 429 response is the localized error page
    let body = resp.text().await.expect("Failed to read 429 body");
    assert!(body.contains("429"));
}

#[tokio::test]
#[ignore = "Requires freshly started server (limiter state)"]
async fn test_login_limits_after_five_attempts() {
    let client = client();
    let url = format!("{}/admin/login", base_url());

    for _ in 1..=5 {
        let resp = client
            .post(&url)
            .form(&[("username", "nobody"), ("password", "wrong")])
            .send()
            .await
            .expect("Failed to send login");
        assert_ne!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    let resp = client
        .post(&url)
        .form(&[("username", "nobody"), ("password", "wrong")])
        .send()
        .await
        .expect("Failed to send login");
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
#[ignore = "Requires freshly started server (limiter state)"]
async fn test_tracking_budget_independent_of_submissions() {
    let client = client();
    let index_url = format!("{}/", base_url());

    // Exhaust the submission form's budget
    for _ in 1..=20 {
        let resp = client.get(&index_url).send().await.expect("Failed to request /");
        assert_ne!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    }
    let resp = client.get(&index_url).send().await.expect("Failed to request /");
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

    // Tracking still answers from its own budget
    let resp = client
        .get(format!("{}/track/ffffffffffff", base_url()))
        .send()
        .await
        .expect("Failed to request tracking");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
