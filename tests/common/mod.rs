use std::net::SocketAddr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use sqlx::MySqlPool;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};

use formsink::config::{AllowedOrigin, Config};

/// A running test server instance.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: MySqlPool,
    pub client: Client,
    pub config: Config,
    pub db_name: Option<String>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POST a JSON body to /submit, return (body, status).
    pub async fn submit_json(&self, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/submit"))
            .json(data)
            .send()
            .await
            .expect("submit json failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// POST form-urlencoded data to /submit, return (body, status).
    pub async fn submit_form(&self, data: &[(&str, &str)]) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/submit"))
            .form(data)
            .send()
            .await
            .expect("submit form failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

/// Spawn the service with a store that is never reachable. Exercises
/// validation, CORS, and failure paths without a MySQL instance.
pub async fn spawn_app_without_store() -> TestApp {
    spawn_app_with_origin(AllowedOrigin::Any).await
}

/// Same as [`spawn_app_without_store`], with a chosen CORS policy.
pub async fn spawn_app_with_origin(origin: AllowedOrigin) -> TestApp {
    let config = unreachable_store_config(origin);

    // Port 9 (discard): nothing listens there, so every acquire times out.
    let pool = MySqlPoolOptions::new()
        .max_connections(2)
        .acquire_timeout(Duration::from_millis(500))
        .connect_lazy_with(config.connect_options());

    spawn_with(pool, config).await
}

/// Spawn against a real MySQL instance with a fresh temporary database.
/// Requires the MYSQL_* variables; used by the #[ignore]d tests.
pub async fn spawn_app_with_store() -> TestApp {
    let _ = dotenvy::dotenv();

    let base = Config::from_env().expect("MYSQL_* must be set for store-backed tests");

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let db_name = format!("formsink_test_{nanos}");

    // Connect without a database selected to create the test database
    let admin_pool = MySqlPoolOptions::new()
        .max_connections(2)
        .connect_with(admin_options(&base))
        .await
        .expect("Failed to connect to MySQL for test DB creation");

    sqlx::query(&format!("CREATE DATABASE `{db_name}`"))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");

    admin_pool.close().await;

    let config = Config {
        mysql_database: db_name.clone(),
        ..base
    };

    let pool = MySqlPoolOptions::new()
        .max_connections(5)
        .connect_with(config.connect_options())
        .await
        .expect("Failed to connect to test database");

    formsink::db::submissions::ensure_schema(&pool)
        .await
        .expect("Failed to ensure schema on test database");

    let mut app = spawn_with(pool, config).await;
    app.db_name = Some(db_name);
    app
}

/// Drop the temporary database, if one was created.
pub async fn cleanup(app: TestApp) {
    let Some(db_name) = app.db_name else { return };

    app.pool.close().await;

    let admin_pool = MySqlPoolOptions::new()
        .max_connections(1)
        .connect_with(admin_options(&app.config))
        .await
        .expect("Failed to connect to MySQL for test DB cleanup");

    let _ = sqlx::query(&format!("DROP DATABASE `{db_name}`"))
        .execute(&admin_pool)
        .await;

    admin_pool.close().await;
}

async fn spawn_with(pool: MySqlPool, config: Config) -> TestApp {
    let app = formsink::build_app(pool.clone(), config.clone());

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        pool,
        client: Client::new(),
        config,
        db_name: None,
    }
}

fn admin_options(config: &Config) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&config.mysql_host)
        .port(config.mysql_port)
        .username(&config.mysql_user)
        .password(&config.mysql_password)
}

fn unreachable_store_config(origin: AllowedOrigin) -> Config {
    Config {
        mysql_host: "127.0.0.1".to_string(),
        mysql_port: 9,
        mysql_user: "formsink".to_string(),
        mysql_password: String::new(),
        mysql_database: "formsink".to_string(),
        allowed_origin: origin,
        log_level: "warn".to_string(),
    }
}
