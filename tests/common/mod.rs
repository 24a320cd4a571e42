use portal_auth::config::{EnvConfig, JwtConfig, MailConfig, CONFIG};
use portal_auth::db::postgres_service::PostgresService;
use std::sync::Arc;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres;

pub mod client;

pub struct TestContext {
    pub db: Arc<PostgresService>,
    pub _container: ContainerAsync<Postgres>,
}

impl TestContext {
    pub async fn new() -> TestContext {
        // OnceLock: first test in the binary wins, the rest reuse it.
        let _ = CONFIG.set(get_test_config());

        let container = Postgres::default()
            .start()
            .await
            .expect("Failed to start postgres container");

        let host = container.get_host().await.expect("Failed to get host");
        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("Failed to get port");

        let db_url = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);

        let db = Arc::new(
            PostgresService::new(&db_url)
                .await
                .expect("Failed to initialize PostgresService"),
        );

        TestContext {
            db,
            _container: container,
        }
    }
}

pub fn get_test_config() -> EnvConfig {
    EnvConfig {
        port: 8080,
        db_url: "test".to_string(), // Not used in tests
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            access_ttl_secs: 3600,
            refresh_ttl_secs: 86400,
        },
        mail: MailConfig {
            api_key: "test".to_string(),
            // Unroutable on purpose; dispatch failures are logged, not fatal.
            endpoint: "http://127.0.0.1:9/emails".to_string(),
            from: "noreply@test.local".to_string(),
        },
    }
}

// Test data helpers
pub mod test_data {
    use portal_auth::types::user::RegisterRequest;

    pub fn sample_register() -> RegisterRequest {
        RegisterRequest {
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password: "password1".to_string(),
            password_confirmation: "password1".to_string(),
            definers: None,
        }
    }

    pub fn register_with_email(email: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            ..sample_register()
        }
    }
}
