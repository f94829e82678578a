//! Harness for the end-to-end tests: a real `taskboard` router on an
//! ephemeral port, backed by a private in-memory database.

use sqlx::sqlite::SqlitePoolOptions;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;

use taskboard::common::migrations::run_migrations;
use taskboard::{build_router, AppConfig, AppState};
use taskcli::{ClientConfig, Controller, HttpApi, SessionStore, TaskService};

pub struct TestServer {
    pub addr: SocketAddr,
}

impl TestServer {
    pub async fn start() -> anyhow::Result<Self> {
        // One connection that never recycles keeps the in-memory database alive
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        run_migrations(&pool, false).await?;

        let config = AppConfig {
            jwt_secret: "e2e-secret".to_string(),
            bcrypt_cost: 4,
            ..AppConfig::default()
        };
        let app = build_router(AppState::new(pool, &config), &config.cors_origins);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app.into_make_service()).await;
        });

        Ok(Self { addr })
    }

    pub fn api_url(&self) -> String {
        format!("http://{}/api/v1", self.addr)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_url: self.api_url(),
            state_dir: std::env::temp_dir(),
            page_limit: 50,
            timeout: Some(Duration::from_secs(10)),
        }
    }

    /// A controller with its own in-memory session, as a separate browser would have.
    pub fn controller(&self) -> anyhow::Result<Controller<HttpApi>> {
        let config = self.client_config();
        let api = HttpApi::new(&config)?;
        Ok(Controller::new(
            TaskService::new(api, SessionStore::in_memory()),
            config.page_limit,
        ))
    }
}
