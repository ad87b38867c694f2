//! Integration tests for the admin dashboard.
//!
//! These tests require:
//! - A running `PostgreSQL` database
//! - The server running with `DASHBOARD_USERNAME`/`DASHBOARD_PASSWORD` seeded
//!
//! Run with: cargo test -p shakwa-integration-tests -- --ignored

use reqwest::StatusCode;
use uuid::Uuid;

use shakwa_integration_tests::{authenticated_client, base_url, client};

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_dashboard_requires_login() {
    let client = client();

    let resp = client
        .get(format!("{}/admin/dashboard", base_url()))
        .send()
        .await
        .expect("Failed to request dashboard");

    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, "/admin/login");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_wrong_credentials_bounce_back_to_login() {
    let client = client();

    let resp = client
        .post(format!("{}/admin/login", base_url()))
        .form(&[("username", "nobody"), ("password", "wrong")])
        .send()
        .await
        .expect("Failed to send login request");

    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, "/admin/login");

    // The login page shows the localized failure message
    let body = client
        .get(format!("{}/admin/login", base_url()))
        .send()
        .await
        .expect("Failed to load login page")
        .text()
        .await
        .expect("Failed to read login page");
    assert!(body.contains("اسم المستخدم أو كلمة المرور غير صحيحة"));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_login_logout_flow() {
    let client = authenticated_client().await;

    let resp = client
        .get(format!("{}/admin/dashboard", base_url()))
        .send()
        .await
        .expect("Failed to load dashboard");
    assert_eq!(resp.status(), StatusCode::OK);

    // Logout invalidates the session
    let resp = client
        .get(format!("{}/admin/logout", base_url()))
        .send()
        .await
        .expect("Failed to logout");
    assert!(resp.status().is_redirection());

    let resp = client
        .get(format!("{}/admin/dashboard", base_url()))
        .send()
        .await
        .expect("Failed to request dashboard");
    assert!(resp.status().is_redirection(), "session should be gone");
}

// ============================================================================
// Complaint Management Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_dashboard_filters() {
    let client = authenticated_client().await;

    // Status filter
    let resp = client
        .get(format!("{}/admin/dashboard?status=waiting", base_url()))
        .send()
        .await
        .expect("Failed to load filtered dashboard");
    assert_eq!(resp.status(), StatusCode::OK);

    // Text search on title/content
    let resp = client
        .get(format!("{}/admin/dashboard?q=الماء", base_url()))
        .send()
        .await
        .expect("Failed to load searched dashboard");
    assert_eq!(resp.status(), StatusCode::OK);

    // Out-of-range page still renders (clamped, not an error)
    let resp = client
        .get(format!("{}/admin/dashboard?page=0", base_url()))
        .send()
        .await
        .expect("Failed to load dashboard");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_unknown_status_update_is_rejected() {
    let client = authenticated_client().await;

    let resp = client
        .post(format!("{}/admin/complaints/update/1", base_url()))
        .form(&[("status", "bogus")])
        .send()
        .await
        .expect("Failed to send update");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_update_missing_complaint_is_404() {
    let client = authenticated_client().await;

    let resp = client
        .post(format!("{}/admin/complaints/update/999999", base_url()))
        .form(&[("status", "complete")])
        .send()
        .await
        .expect("Failed to send update");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Admin Account Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_create_and_delete_admin_account() {
    let client = authenticated_client().await;
    let username = format!("test-admin-{}", Uuid::new_v4().simple());

    let resp = client
        .post(format!("{}/admin/dashboard", base_url()))
        .form(&[("username", username.as_str()), ("password", "test-pass")])
        .send()
        .await
        .expect("Failed to create account");
    assert!(resp.status().is_redirection());

    // The new account appears in the user list
    let body = client
        .get(format!("{}/admin/dashboard", base_url()))
        .send()
        .await
        .expect("Failed to load dashboard")
        .text()
        .await
        .expect("Failed to read dashboard");
    assert!(body.contains(&username));

    // Duplicate username is rejected with a flash
    let resp = client
        .post(format!("{}/admin/dashboard", base_url()))
        .form(&[("username", username.as_str()), ("password", "other")])
        .send()
        .await
        .expect("Failed to send duplicate create");
    assert!(resp.status().is_redirection());

    let body = client
        .get(format!("{}/admin/dashboard", base_url()))
        .send()
        .await
        .expect("Failed to load dashboard")
        .text()
        .await
        .expect("Failed to read dashboard");
    assert!(body.contains("اسم المستخدم موجود بالفعل"));
}

#[tokio::test]
#[ignore = "Requires running server, fresh database with seeded default admin"]
async fn test_admin_cannot_delete_own_account() {
    let client = authenticated_client().await;

    // The seeded default admin has id 1 on a fresh database
    let resp = client
        .post(format!("{}/admin/users/delete/1", base_url()))
        .send()
        .await
        .expect("Failed to send delete");
    assert!(resp.status().is_redirection());

    // The guard flash appears and the session still works
    let resp = client
        .get(format!("{}/admin/dashboard", base_url()))
        .send()
        .await
        .expect("Failed to load dashboard");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.expect("Failed to read dashboard");
    assert!(body.contains("لا يمكن حذف المستخدم الحالي"));
}

// ============================================================================
// Export Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_export_downloads_spreadsheet() {
    let client = authenticated_client().await;

    let resp = client
        .get(format!("{}/admin/export", base_url()))
        .send()
        .await
        .expect("Failed to request export");
    assert_eq!(resp.status(), StatusCode::OK);

    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert_eq!(
        content_type,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );

    let disposition = resp
        .headers()
        .get(reqwest::header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.contains("complaints.xlsx"));

    // XLSX files are ZIP archives
    let bytes = resp.bytes().await.expect("Failed to read export body");
    assert_eq!(&bytes[..2], b"PK");
}
