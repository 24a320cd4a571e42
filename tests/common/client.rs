use actix_web::{web, App};
use portal_auth::{
    auth::token::TokenService,
    db::postgres_service::PostgresService,
    types::{token::TokenPair, user::NewUser},
    utils::password::hash_password,
};
use std::sync::Arc;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "password1";

pub struct TestClient {
    pub db: Arc<PostgresService>,
    pub tokens: TokenService,
}

impl TestClient {
    pub fn new(db: Arc<PostgresService>) -> Self {
        TestClient {
            db,
            tokens: TokenService::new("test-secret", 3600, 86400),
        }
    }

    #[allow(dead_code)]
    pub fn create_app(
        &self,
    ) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(Arc::clone(&self.db)))
            .app_data(web::Data::new(self.tokens.clone()))
            .configure(portal_auth::routes::configure_routes)
    }

    /// Seed an account directly in the directory (password
    /// `TEST_PASSWORD`) and mint it a token pair.
    #[allow(dead_code)]
    pub async fn create_test_user(
        &self,
        email: Option<String>,
    ) -> (entity::user::Model, TokenPair) {
        let email = email.unwrap_or_else(|| format!("user-{}@test.com", Uuid::new_v4()));
        let password_hash = hash_password(TEST_PASSWORD).expect("Failed to hash password");

        let user = self
            .db
            .create_user(NewUser {
                name: "Test User".to_string(),
                email,
                password_hash,
                definers: None,
            })
            .await
            .expect("Failed to create user");

        let pair = self.tokens.issue(user.id).expect("Failed to issue tokens");
        (user, pair)
    }
}
