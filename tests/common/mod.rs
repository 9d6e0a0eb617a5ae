use std::net::SocketAddr;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use associa::config::Config;

/// A running test server instance with a dedicated test database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: PgPool,
    pub client: Client,
    pub db_name: String,
    pub uploads_dir: String,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Create the first admin account, return its access token.
    pub async fn bootstrap(&self) -> String {
        let (body, status) = self
            .post("/api/v1/auth/bootstrap", &json!({
                "name": "Admin",
                "email": "admin@test.com",
                "password": "password123",
            }))
            .await;
        assert_eq!(status, StatusCode::OK, "bootstrap failed: {body}");
        body["access_token"].as_str().unwrap().to_string()
    }

    pub async fn login(&self, email: &str, password: &str) -> (Value, StatusCode) {
        self.post(
            "/api/v1/auth/login",
            &json!({ "email": email, "password": password }),
        )
        .await
    }

    /// Create a service through the admin API, return its JSON.
    pub async fn create_service(&self, token: &str, name: &str, monthly_price: &str) -> Value {
        let (body, status) = self
            .post_auth(
                "/api/v1/admin/services",
                token,
                &json!({
                    "name": name,
                    "description": "Test service",
                    "monthly_price": monthly_price,
                    "dependent_price": "20.00",
                    "monthly_coupon": "5.00",
                    "semiannual_coupon_pct": "10",
                    "annual_coupon_pct": "20",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create service failed: {body}");
        body
    }

    /// Walk the signup wizard up to (and including) the review step.
    /// Returns the wizard session id.
    pub async fn signup_to_review(&self, service_id: &str, email: &str) -> String {
        let (body, status) = self.post("/api/v1/signup", &json!({})).await;
        assert_eq!(status, StatusCode::OK, "signup start failed: {body}");
        let id = body["id"].as_str().unwrap().to_string();

        let (body, status) = self
            .post(
                &format!("/api/v1/signup/{id}/plan"),
                &json!({ "service_id": service_id, "plan": "SEMIANNUAL" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "plan step failed: {body}");

        let (body, status) = self
            .post(&format!("/api/v1/signup/{id}/details"), &details_body(email))
            .await;
        assert_eq!(status, StatusCode::OK, "details step failed: {body}");

        let (body, status) = self.upload_contract(&id).await;
        assert_eq!(status, StatusCode::OK, "contract step failed: {body}");

        id
    }

    /// Upload a small PDF as the signed contract.
    pub async fn upload_contract(&self, signup_id: &str) -> (Value, StatusCode) {
        let part = reqwest::multipart::Part::bytes(b"%PDF-1.4 signed".to_vec())
            .file_name("contract.pdf")
            .mime_str("application/pdf")
            .unwrap();
        let form = reqwest::multipart::Form::new().part("contract", part);

        let resp = self
            .client
            .post(self.url(&format!("/api/v1/signup/{signup_id}/contract")))
            .multipart(form)
            .send()
            .await
            .expect("contract upload failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn post(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn post_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn put_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("put request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn delete_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("delete request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

/// A complete, valid details-step payload.
pub fn details_body(email: &str) -> Value {
    json!({
        "name": "Maria Silva",
        "tax_id": "123.456.789-00",
        "email": email,
        "phone": "11 99999-0000",
        "postal_code": "01001-000",
        "street": "Rua A",
        "number": "42",
        "complement": "",
        "district": "Centro",
        "city": "Sao Paulo",
        "state": "SP",
        "password": "password123",
        "password_confirm": "password123",
    })
}

/// Spawn a test app with a fresh temporary database.
pub async fn spawn_app() -> TestApp {
    let _ = dotenvy::dotenv();

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    // Create a unique test database
    let db_name = format!("associa_test_{}", Uuid::now_v7().to_string().replace('-', ""));

    // Connect to default postgres DB to create the test DB
    let admin_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.clone());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url)
        .await
        .expect("Failed to connect to postgres for test DB creation");

    sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");

    admin_pool.close().await;

    // Connect to the test DB and run migrations
    let test_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/{db_name}"))
        .unwrap_or_else(|| base_url.clone());

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&test_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test database");

    let uploads_dir = std::env::temp_dir()
        .join(format!("associa_uploads_{db_name}"))
        .to_string_lossy()
        .to_string();

    let config = Config {
        database_url: test_url,
        jwt_secret: "test-jwt-secret-that-is-long-enough".to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to a random port
        base_url: "http://localhost:0".to_string(),
        uploads_dir: uploads_dir.clone(),
        max_body_size: 10 * 1024 * 1024,
        reminder_interval_secs: None,
        reminder_window_days: 5,
        log_level: "warn".to_string(),
        smtp: None,
    };

    let (app, _state) = associa::build_app(pool.clone(), config);

    // Bind to a random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        pool,
        client,
        db_name,
        uploads_dir,
    }
}

/// Drop the test database and uploaded files.
pub async fn cleanup(app: TestApp) {
    let TestApp {
        pool,
        db_name,
        uploads_dir,
        ..
    } = app;
    pool.close().await;

    let _ = tokio::fs::remove_dir_all(&uploads_dir).await;

    if let Ok(base_url) = std::env::var("DATABASE_URL") {
        let admin_url = base_url
            .rsplit_once('/')
            .map(|(base, _)| format!("{base}/postgres"))
            .unwrap_or(base_url);

        if let Ok(admin_pool) = PgPoolOptions::new()
            .max_connections(1)
            .connect(&admin_url)
            .await
        {
            let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
                .execute(&admin_pool)
                .await;
            admin_pool.close().await;
        }
    }
}
