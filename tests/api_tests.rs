mod common;

use common::details_body;
use reqwest::StatusCode;
use serde_json::json;
use sha2::{Digest, Sha256};

// ── Health ──────────────────────────────────────────────────────

#[tokio::test]
async fn health_returns_ok() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");

    common::cleanup(app).await;
}

// ── Bootstrap & Auth ────────────────────────────────────────────

#[tokio::test]
async fn bootstrap_creates_first_admin() {
    let app = common::spawn_app().await;

    let token = app.bootstrap().await;
    assert!(!token.is_empty());

    let (body, status) = app.get_auth("/api/v1/me", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "ADMIN");
    assert_eq!(body["status"], "ACTIVE");

    common::cleanup(app).await;
}

#[tokio::test]
async fn bootstrap_rejected_once_members_exist() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let (body, status) = app
        .post("/api/v1/auth/bootstrap", &json!({
            "name": "Another",
            "email": "other@test.com",
            "password": "password123",
        }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"].as_str().unwrap().contains("already set up"));

    common::cleanup(app).await;
}

#[tokio::test]
async fn login_with_valid_credentials() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let (body, status) = app.login("admin@test.com", "password123").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].is_string());
    assert_eq!(body["role"], "ADMIN");

    common::cleanup(app).await;
}

#[tokio::test]
async fn login_rejects_bad_password_and_unknown_email() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let (_, status) = app.login("admin@test.com", "wrongpassword").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, status) = app.login("nobody@test.com", "password123").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    common::cleanup(app).await;
}

#[tokio::test]
async fn admin_endpoints_require_admin_role() {
    let app = common::spawn_app().await;
    let admin = app.bootstrap().await;

    // A plain ACTIVE member
    let (body, status) = app
        .post_auth("/api/v1/admin/members", &admin, &json!({
            "name": "Plain Member",
            "email": "member@test.com",
            "password": "password123",
        }))
        .await;
    assert_eq!(status, StatusCode::OK, "create member failed: {body}");

    let (body, status) = app.login("member@test.com", "password123").await;
    assert_eq!(status, StatusCode::OK, "member login failed: {body}");
    let member_token = body["access_token"].as_str().unwrap().to_string();

    let (_, status) = app.get_auth("/api/v1/admin/members", &member_token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, status) = app.get_auth("/api/v1/admin/members", &admin).await;
    assert_eq!(status, StatusCode::OK);

    common::cleanup(app).await;
}

// ── Password reset ──────────────────────────────────────────────

fn sha256_hex(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[tokio::test]
async fn reset_token_works_once_before_expiry() {
    let app = common::spawn_app().await;
    let admin = app.bootstrap().await;

    let (body, _) = app.get_auth("/api/v1/me", &admin).await;
    let member_id = body["id"].as_str().unwrap().to_string();

    // Plant a token the way forgot-password would
    let token = "a-valid-reset-token";
    sqlx::query(
        "INSERT INTO password_reset_tokens (member_id, token_hash, expires_at)
         VALUES ($1::uuid, $2, now() + interval '15 minutes')",
    )
    .bind(&member_id)
    .bind(sha256_hex(token))
    .execute(&app.pool)
    .await
    .unwrap();

    let (body, status) = app
        .post("/api/v1/auth/reset-password", &json!({
            "token": token,
            "password": "new-password-123",
        }))
        .await;
    assert_eq!(status, StatusCode::OK, "reset failed: {body}");

    // New password works, old one doesn't
    let (_, status) = app.login("admin@test.com", "new-password-123").await;
    assert_eq!(status, StatusCode::OK);
    let (_, status) = app.login("admin@test.com", "password123").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // The token is single-use
    let (_, status) = app
        .post("/api/v1/auth/reset-password", &json!({
            "token": token,
            "password": "another-password-123",
        }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    common::cleanup(app).await;
}

#[tokio::test]
async fn expired_reset_token_is_rejected_even_when_correct() {
    let app = common::spawn_app().await;
    let admin = app.bootstrap().await;

    let (body, _) = app.get_auth("/api/v1/me", &admin).await;
    let member_id = body["id"].as_str().unwrap().to_string();

    let token = "an-expired-reset-token";
    sqlx::query(
        "INSERT INTO password_reset_tokens (member_id, token_hash, expires_at)
         VALUES ($1::uuid, $2, now() - interval '1 minute')",
    )
    .bind(&member_id)
    .bind(sha256_hex(token))
    .execute(&app.pool)
    .await
    .unwrap();

    let (body, status) = app
        .post("/api/v1/auth/reset-password", &json!({
            "token": token,
            "password": "new-password-123",
        }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("expired"));

    common::cleanup(app).await;
}

// ── Plan pricing quotes ─────────────────────────────────────────

#[tokio::test]
async fn quote_matches_pricing_formulas() {
    let app = common::spawn_app().await;
    let admin = app.bootstrap().await;

    let service = app.create_service(&admin, "Health plan", "100.00").await;
    let service_id = service["id"].as_str().unwrap();

    // SEMIANNUAL, 10% coupon: 600 - 60 = 540, 90/month
    let (body, status) = app
        .get(&format!(
            "/api/v1/signup/quote?service_id={service_id}&plan=SEMIANNUAL"
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["discount"], "60.00");
    assert_eq!(body["total"], "540.00");
    assert_eq!(body["per_month"], "90.00");

    // MONTHLY, flat 5.00 coupon
    let (body, status) = app
        .get(&format!(
            "/api/v1/signup/quote?service_id={service_id}&plan=MONTHLY"
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], "95.00");
    assert_eq!(body["per_month"], "95.00");

    // Dependents add dependent_price * months
    let (body, status) = app
        .get(&format!(
            "/api/v1/signup/quote?service_id={service_id}&plan=ANNUAL&dependents=2"
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    // 1200 - 240 + 2*20*12
    assert_eq!(body["total"], "1440.00");

    common::cleanup(app).await;
}

// ── Signup wizard ───────────────────────────────────────────────

#[tokio::test]
async fn wizard_rejects_skipping_ahead() {
    let app = common::spawn_app().await;
    let admin = app.bootstrap().await;
    app.create_service(&admin, "Health plan", "100.00").await;

    let (body, _) = app.post("/api/v1/signup", &json!({})).await;
    let id = body["id"].as_str().unwrap().to_string();

    // Details before a plan is chosen
    let (body, status) = app
        .post(&format!("/api/v1/signup/{id}/details"), &details_body("x@test.com"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "unexpected: {body}");

    common::cleanup(app).await;
}

#[tokio::test]
async fn wizard_details_gate_requires_fields_and_matching_passwords() {
    let app = common::spawn_app().await;
    let admin = app.bootstrap().await;
    let service = app.create_service(&admin, "Health plan", "100.00").await;
    let service_id = service["id"].as_str().unwrap();

    let (body, _) = app.post("/api/v1/signup", &json!({})).await;
    let id = body["id"].as_str().unwrap().to_string();

    let (_, status) = app
        .post(
            &format!("/api/v1/signup/{id}/plan"),
            &json!({ "service_id": service_id, "plan": "MONTHLY" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // Missing required field
    let mut incomplete = details_body("maria@test.com");
    incomplete["city"] = json!("");
    let (body, status) = app
        .post(&format!("/api/v1/signup/{id}/details"), &incomplete)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("city"));

    // Password mismatch
    let mut mismatched = details_body("maria@test.com");
    mismatched["password_confirm"] = json!("different-pass-123");
    let (body, status) = app
        .post(&format!("/api/v1/signup/{id}/details"), &mismatched)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("match"));

    // The wizard stays on the details step
    let (body, status) = app.get(&format!("/api/v1/signup/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["step"], "ENTER_DETAILS");

    common::cleanup(app).await;
}

#[tokio::test]
async fn wizard_completes_into_pending_member_with_contract() {
    let app = common::spawn_app().await;
    let admin = app.bootstrap().await;
    let service = app.create_service(&admin, "Health plan", "100.00").await;
    let service_id = service["id"].as_str().unwrap();

    let id = app.signup_to_review(service_id, "maria@test.com").await;

    let (body, status) = app.get(&format!("/api/v1/signup/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["step"], "REVIEW");

    let (body, status) = app
        .post(&format!("/api/v1/signup/{id}/confirm"), &json!({}))
        .await;
    assert_eq!(status, StatusCode::OK, "confirm failed: {body}");
    assert_eq!(body["status"], "PENDING");

    // The wizard session is gone
    let (_, status) = app.get(&format!("/api/v1/signup/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The member row exists with the stored contract
    let (body, status) = app
        .get_auth("/api/v1/admin/members?status=PENDING", &admin)
        .await;
    assert_eq!(status, StatusCode::OK);
    let member = body
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["email"] == "maria@test.com")
        .expect("pending member missing");
    assert_eq!(member["plan"], "SEMIANNUAL");
    assert!(member["contract_path"]
        .as_str()
        .unwrap()
        .contains("contracts/"));

    // PENDING members cannot log in yet
    let (_, status) = app.login("maria@test.com", "password123").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Approval unlocks login
    let member_id = member["id"].as_str().unwrap();
    let (body, status) = app
        .post_auth(
            &format!("/api/v1/admin/members/{member_id}/approve"),
            &admin,
            &json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "approve failed: {body}");
    assert_eq!(body["status"], "ACTIVE");

    let (_, status) = app.login("maria@test.com", "password123").await;
    assert_eq!(status, StatusCode::OK);

    common::cleanup(app).await;
}

#[tokio::test]
async fn wizard_back_steps_without_losing_data() {
    let app = common::spawn_app().await;
    let admin = app.bootstrap().await;
    let service = app.create_service(&admin, "Health plan", "100.00").await;
    let service_id = service["id"].as_str().unwrap();

    let id = app.signup_to_review(service_id, "maria@test.com").await;

    let (body, status) = app
        .post(&format!("/api/v1/signup/{id}/back"), &json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["step"], "UPLOAD_CONTRACT");
    assert_eq!(body["form"]["name"], "Maria Silva");

    let (body, status) = app
        .post(&format!("/api/v1/signup/{id}/back"), &json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["step"], "ENTER_DETAILS");

    common::cleanup(app).await;
}

#[tokio::test]
async fn wizard_rejects_duplicate_email() {
    let app = common::spawn_app().await;
    let admin = app.bootstrap().await;
    let service = app.create_service(&admin, "Health plan", "100.00").await;
    let service_id = service["id"].as_str().unwrap();

    let (body, _) = app.post("/api/v1/signup", &json!({})).await;
    let id = body["id"].as_str().unwrap().to_string();
    let (_, status) = app
        .post(
            &format!("/api/v1/signup/{id}/plan"),
            &json!({ "service_id": service_id, "plan": "MONTHLY" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (body, status) = app
        .post(
            &format!("/api/v1/signup/{id}/details"),
            &details_body("admin@test.com"),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT, "unexpected: {body}");

    common::cleanup(app).await;
}

// ── Receipts ────────────────────────────────────────────────────

#[tokio::test]
async fn receipt_only_downloadable_for_paid_charges() {
    let app = common::spawn_app().await;
    let admin = app.bootstrap().await;

    // Institutional profile backs the receipt header
    let (_, status) = app
        .put_auth("/api/v1/admin/org-profile", &admin, &json!({
            "site_title": "Benefit Association",
            "tax_id": "00.000.000/0001-00",
        }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (body, status) = app
        .post_auth("/api/v1/admin/members", &admin, &json!({
            "name": "Paying Member",
            "email": "payer@test.com",
            "password": "password123",
        }))
        .await;
    assert_eq!(status, StatusCode::OK, "create member failed: {body}");
    let member_id = body["id"].as_str().unwrap().to_string();

    let (body, status) = app
        .post_auth("/api/v1/admin/charges", &admin, &json!({
            "member_id": member_id,
            "description": "Monthly dues",
            "amount": "90.00",
            "due_on": "2030-01-10",
        }))
        .await;
    assert_eq!(status, StatusCode::OK, "create charge failed: {body}");
    let charge_id = body["id"].as_str().unwrap().to_string();

    let (body, _) = app.login("payer@test.com", "password123").await;
    let member_token = body["access_token"].as_str().unwrap().to_string();

    // PENDING: no receipt
    let resp = app
        .client
        .get(app.url(&format!("/api/v1/me/charges/{charge_id}/receipt")))
        .bearer_auth(&member_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Mark PAID
    let (body, status) = app
        .post_auth(
            &format!("/api/v1/admin/charges/{charge_id}/status"),
            &admin,
            &json!({ "status": "PAID" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paid_on"].is_string());

    // PAID: receipt downloads with the charge details
    let resp = app
        .client
        .get(app.url(&format!("/api/v1/me/charges/{charge_id}/receipt")))
        .bearer_auth(&member_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("attachment"));
    let doc = resp.text().await.unwrap();
    assert!(doc.contains("Paying Member"));
    assert!(doc.contains("90.00"));

    // Another member cannot reach it
    let (_, status) = app
        .get_auth(&format!("/api/v1/me/charges/{charge_id}/receipt"), &admin)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    common::cleanup(app).await;
}

// ── Classifieds ─────────────────────────────────────────────────

async fn make_member(app: &common::TestApp, admin: &str, email: &str) -> String {
    let (body, status) = app
        .post_auth("/api/v1/admin/members", admin, &json!({
            "name": "Board Member",
            "email": email,
            "password": "password123",
        }))
        .await;
    assert_eq!(status, StatusCode::OK, "create member failed: {body}");

    let (body, status) = app.login(email, "password123").await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn classified_ads_expire_after_thirty_days() {
    let app = common::spawn_app().await;
    let admin = app.bootstrap().await;
    let member = make_member(&app, &admin, "board@test.com").await;

    let (body, status) = app
        .post_auth("/api/v1/classifieds", &member, &json!({
            "title": "Bicycle for sale",
            "description": "Good condition",
            "contact": "board@test.com",
            "category": "SALE",
        }))
        .await;
    assert_eq!(status, StatusCode::OK, "create ad failed: {body}");
    let ad_id = body["id"].as_str().unwrap().to_string();
    assert_eq!(body["status"], "PENDING");

    // Pending ads are not public
    let (body, _) = app.get("/api/v1/classifieds").await;
    assert_eq!(body.as_array().unwrap().len(), 0);

    // Moderation activates it
    let (_, status) = app
        .post_auth(
            &format!("/api/v1/admin/classifieds/{ad_id}/status"),
            &admin,
            &json!({ "status": "ACTIVE" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (body, _) = app.get("/api/v1/classifieds").await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    // 29 days old: still listed
    sqlx::query("UPDATE classifieds SET created_at = now() - interval '29 days' WHERE id = $1::uuid")
        .bind(&ad_id)
        .execute(&app.pool)
        .await
        .unwrap();
    let (body, _) = app.get("/api/v1/classifieds").await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    // 31 days old: expired out of the listing
    sqlx::query("UPDATE classifieds SET created_at = now() - interval '31 days' WHERE id = $1::uuid")
        .bind(&ad_id)
        .execute(&app.pool)
        .await
        .unwrap();
    let (body, _) = app.get("/api/v1/classifieds").await;
    assert_eq!(body.as_array().unwrap().len(), 0);

    common::cleanup(app).await;
}

#[tokio::test]
async fn classified_cap_limits_live_ads_per_member() {
    let app = common::spawn_app().await;
    let admin = app.bootstrap().await;
    let member = make_member(&app, &admin, "board@test.com").await;

    for i in 0..3 {
        let (body, status) = app
            .post_auth("/api/v1/classifieds", &member, &json!({
                "title": format!("Ad {i}"),
                "description": "Something",
                "contact": "board@test.com",
                "category": "OTHER",
            }))
            .await;
        assert_eq!(status, StatusCode::OK, "ad {i} failed: {body}");
    }

    let (body, status) = app
        .post_auth("/api/v1/classifieds", &member, &json!({
            "title": "One too many",
            "description": "Something",
            "contact": "board@test.com",
            "category": "OTHER",
        }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT, "unexpected: {body}");

    common::cleanup(app).await;
}

// ── News, comments, likes ───────────────────────────────────────

#[tokio::test]
async fn comments_appear_only_after_moderation() {
    let app = common::spawn_app().await;
    let admin = app.bootstrap().await;
    let member = make_member(&app, &admin, "reader@test.com").await;

    let (body, status) = app
        .post_auth("/api/v1/admin/news", &admin, &json!({
            "title": "Assembly announced",
            "body": "Details soon",
            "tags": "assembly, community",
            "status": "PUBLISHED",
        }))
        .await;
    assert_eq!(status, StatusCode::OK, "create news failed: {body}");
    let news_id = body["id"].as_str().unwrap().to_string();

    let (body, status) = app
        .post_auth(
            &format!("/api/v1/news/{news_id}/comments"),
            &member,
            &json!({ "body": "Looking forward to it!" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let comment_id = body["id"].as_str().unwrap().to_string();

    // Not visible while pending
    let (body, _) = app.get(&format!("/api/v1/news/{news_id}")).await;
    assert_eq!(body["comments"].as_array().unwrap().len(), 0);

    let (_, status) = app
        .post_auth(
            &format!("/api/v1/admin/comments/{comment_id}/status"),
            &admin,
            &json!({ "status": "APPROVED" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (body, _) = app.get(&format!("/api/v1/news/{news_id}")).await;
    let comments = body["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["author_name"], "Board Member");

    // Likes count once per member
    let (body, status) = app
        .post_auth(&format!("/api/v1/news/{news_id}/like"), &member, &json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["like_count"], 1);
    let (body, _) = app
        .post_auth(&format!("/api/v1/news/{news_id}/like"), &member, &json!({}))
        .await;
    assert_eq!(body["like_count"], 1);

    common::cleanup(app).await;
}

#[tokio::test]
async fn news_feed_filters_by_tag_and_hides_drafts() {
    let app = common::spawn_app().await;
    let admin = app.bootstrap().await;

    for (title, tags, status) in [
        ("Published sports", "sports", "PUBLISHED"),
        ("Published health", "health", "PUBLISHED"),
        ("Draft item", "sports", "DRAFT"),
    ] {
        let (body, code) = app
            .post_auth("/api/v1/admin/news", &admin, &json!({
                "title": title,
                "tags": tags,
                "status": status,
            }))
            .await;
        assert_eq!(code, StatusCode::OK, "create news failed: {body}");
    }

    let (body, _) = app.get("/api/v1/news").await;
    assert_eq!(body["total"], 2);

    let (body, _) = app.get("/api/v1/news?tag=sports").await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["title"], "Published sports");

    common::cleanup(app).await;
}

// ── Agreements & ratings ────────────────────────────────────────

#[tokio::test]
async fn agreement_ratings_average_and_upsert() {
    let app = common::spawn_app().await;
    let admin = app.bootstrap().await;
    let member = make_member(&app, &admin, "rater@test.com").await;

    let (body, status) = app
        .post_auth("/api/v1/admin/agreements", &admin, &json!({
            "name": "City Gym",
            "category": "Fitness",
        }))
        .await;
    assert_eq!(status, StatusCode::OK, "create agreement failed: {body}");
    let agreement_id = body["id"].as_str().unwrap().to_string();

    let (body, status) = app
        .post_auth(
            &format!("/api/v1/agreements/{agreement_id}/rating"),
            &member,
            &json!({ "rating": 4 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rating_count"], 1);

    // Re-rating replaces the earlier vote
    let (body, _) = app
        .post_auth(
            &format!("/api/v1/agreements/{agreement_id}/rating"),
            &member,
            &json!({ "rating": 2 }),
        )
        .await;
    assert_eq!(body["rating_count"], 1);
    assert_eq!(body["average_rating"], 2.0);

    let (_, status) = app
        .post_auth(
            &format!("/api/v1/agreements/{agreement_id}/rating"),
            &member,
            &json!({ "rating": 9 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    common::cleanup(app).await;
}

// ── Contact form & moderation ───────────────────────────────────

#[tokio::test]
async fn contact_form_lands_in_admin_triage() {
    let app = common::spawn_app().await;
    let admin = app.bootstrap().await;

    let (body, status) = app
        .post("/api/v1/contact", &json!({
            "name": "Visitor",
            "email": "visitor@test.com",
            "subject": "Question",
            "message": "How do I join?",
        }))
        .await;
    assert_eq!(status, StatusCode::OK, "contact failed: {body}");
    assert_eq!(body["status"], "NEW");
    let message_id = body["id"].as_str().unwrap().to_string();

    let (body, _) = app.get_auth("/api/v1/admin/contacts", &admin).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (body, status) = app
        .post_auth(
            &format!("/api/v1/admin/contacts/{message_id}/status"),
            &admin,
            &json!({ "status": "ANSWERED" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ANSWERED");

    common::cleanup(app).await;
}

#[tokio::test]
async fn contact_form_validates_required_fields() {
    let app = common::spawn_app().await;

    let (_, status) = app
        .post("/api/v1/contact", &json!({
            "name": "Visitor",
            "email": "visitor@test.com",
            "subject": "",
            "message": "hello",
        }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    common::cleanup(app).await;
}

// ── Member self-service ─────────────────────────────────────────

#[tokio::test]
async fn profile_update_keeps_email_and_tax_id() {
    let app = common::spawn_app().await;
    let admin = app.bootstrap().await;
    let member = make_member(&app, &admin, "editor@test.com").await;

    let (body, status) = app
        .put_auth("/api/v1/me", &member, &json!({
            "name": "Renamed Member",
            "phone": "11 98888-7777",
            "city": "Campinas",
        }))
        .await;
    assert_eq!(status, StatusCode::OK, "profile update failed: {body}");
    assert_eq!(body["name"], "Renamed Member");
    assert_eq!(body["city"], "Campinas");
    // Still the registered email
    assert_eq!(body["email"], "editor@test.com");

    common::cleanup(app).await;
}

// ── Directory: events, faq, org profile ─────────────────────────

#[tokio::test]
async fn events_split_into_upcoming_and_past() {
    let app = common::spawn_app().await;
    let admin = app.bootstrap().await;

    for (title, date) in [("Future party", "2099-06-01"), ("Old workshop", "2020-01-15")] {
        let (body, status) = app
            .post_auth("/api/v1/admin/events", &admin, &json!({
                "title": title,
                "event_date": date,
                "location": "HQ",
            }))
            .await;
        assert_eq!(status, StatusCode::OK, "create event failed: {body}");
    }

    let (body, status) = app.get("/api/v1/events").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["upcoming"].as_array().unwrap().len(), 1);
    assert_eq!(body["upcoming"][0]["title"], "Future party");
    assert_eq!(body["past"].as_array().unwrap().len(), 1);

    common::cleanup(app).await;
}

#[tokio::test]
async fn faq_search_matches_question_or_answer() {
    let app = common::spawn_app().await;
    let admin = app.bootstrap().await;

    let (body, status) = app
        .post_auth("/api/v1/admin/faq", &admin, &json!({
            "question": "How do I pay?",
            "answer": "Charges appear in your member area.",
        }))
        .await;
    assert_eq!(status, StatusCode::OK, "create faq failed: {body}");

    let (body, _) = app.get("/api/v1/faq?search=member%20area").await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (body, _) = app.get("/api/v1/faq?search=nothing-matches").await;
    assert_eq!(body.as_array().unwrap().len(), 0);

    common::cleanup(app).await;
}

#[tokio::test]
async fn org_profile_is_a_singleton_upsert() {
    let app = common::spawn_app().await;
    let admin = app.bootstrap().await;

    let (_, status) = app.get("/api/v1/info").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    for title in ["First Title", "Second Title"] {
        let (body, status) = app
            .put_auth("/api/v1/admin/org-profile", &admin, &json!({
                "site_title": title,
            }))
            .await;
        assert_eq!(status, StatusCode::OK, "org upsert failed: {body}");
    }

    let (body, status) = app.get("/api/v1/info").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["site_title"], "Second Title");

    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM org_profile")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(row.0, 1);

    common::cleanup(app).await;
}

// ── Billing summary & audit trail ───────────────────────────────

#[tokio::test]
async fn billing_summary_totals_by_status() {
    let app = common::spawn_app().await;
    let admin = app.bootstrap().await;
    make_member(&app, &admin, "payer@test.com").await;

    let (body, _) = app.get_auth("/api/v1/admin/members", &admin).await;
    let member_id = body
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["email"] == "payer@test.com")
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    for (amount, status) in [("100.00", "PENDING"), ("50.00", "PAID"), ("25.00", "PENDING")] {
        let (body, code) = app
            .post_auth("/api/v1/admin/charges", &admin, &json!({
                "member_id": member_id,
                "description": "Dues",
                "amount": amount,
                "due_on": "2030-01-10",
                "status": status,
            }))
            .await;
        assert_eq!(code, StatusCode::OK, "create charge failed: {body}");
    }

    let (body, status) = app.get_auth("/api/v1/admin/charges/summary", &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pending"], "125.00");
    assert_eq!(body["paid"], "50.00");

    common::cleanup(app).await;
}

#[tokio::test]
async fn admin_mutations_leave_an_audit_trail() {
    let app = common::spawn_app().await;
    let admin = app.bootstrap().await;

    app.create_service(&admin, "Health plan", "100.00").await;

    let (body, status) = app.get_auth("/api/v1/admin/audit", &admin).await;
    assert_eq!(status, StatusCode::OK);
    let actions: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["action"].as_str())
        .collect();
    assert!(actions.contains(&"service.created"));
    assert!(actions.contains(&"member.bootstrap"));

    common::cleanup(app).await;
}
