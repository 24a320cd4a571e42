use std::env;
use std::sync::OnceLock;

#[derive(Clone, Debug)]
pub struct EnvConfig {
    pub port: i32,
    pub db_url: String,
    pub jwt: JwtConfig,
    pub mail: MailConfig,
}

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub access_ttl_secs: i64,
    pub refresh_ttl_secs: i64,
}

#[derive(Clone, Debug)]
pub struct MailConfig {
    pub api_key: String,
    pub endpoint: String,
    pub from: String,
}

impl EnvConfig {
    fn get_env(key: &str) -> String {
        env::var(key).unwrap_or_else(|_| panic!("Environment variable {} not set", key))
    }

    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let db_url: String = Self::get_env("POSTGRES_URI");
        let jwt = JwtConfig {
            secret: Self::get_env("JWT_SECRET"),
            access_ttl_secs: env::var("JWT_ACCESS_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            refresh_ttl_secs: env::var("JWT_REFRESH_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1_209_600), // 14 days
        };
        let mail = MailConfig {
            api_key: Self::get_env("RESEND_KEY"),
            endpoint: env::var("MAIL_ENDPOINT")
                .unwrap_or_else(|_| "https://api.resend.com/emails".to_string()),
            from: env::var("MAIL_FROM").unwrap_or_else(|_| "noreply@example.com".to_string()),
        };

        EnvConfig {
            port: Self::get_env("PORT").parse().unwrap_or(8080),
            db_url,
            jwt,
            mail,
        }
    }
}

pub static CONFIG: OnceLock<EnvConfig> = OnceLock::new();

pub fn config() -> &'static EnvConfig {
    CONFIG.get().expect("Not initialized")
}
