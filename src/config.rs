use std::env;
use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

const DEV_JWT_SECRET: &str = "dev_secret_key_change_in_production";
const MIN_JWT_SECRET_LEN: usize = 32;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub mongo_max_pool_size: u32,
    pub mongo_min_pool_size: u32,
    pub mongo_timeout_secs: u64,
    pub users_collection: String,
    pub assignments_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub cors_allowed_origin: String,
    pub mail_from: String,
    pub app_env: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "eduportal-local".to_string()),
            mongo_max_pool_size: env_number("MONGO_MAX_POOL_SIZE", 10),
            mongo_min_pool_size: env_number("MONGO_MIN_POOL_SIZE", 2),
            mongo_timeout_secs: env_number("MONGO_TIMEOUT_SECS", 5),
            users_collection: env::var("USERS_COLLECTION").unwrap_or_else(|_| "users".to_string()),
            assignments_collection: env::var("ASSIGNMENTS_COLLECTION")
                .unwrap_or_else(|_| "assignments".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env_number("WEB_SERVER_PORT", 8000),
            jwt_secret: SecretString::from(env::var("JWT_SECRET")
                .unwrap_or_else(|_| DEV_JWT_SECRET.to_string())),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            mail_from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "EduPortal <no-reply@eduportal.local>".to_string()),
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// Rejects signing secrets that are unsafe outside local development.
    pub fn validate_for_production(&self) -> AppResult<()> {
        use secrecy::ExposeSecret;

        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEV_JWT_SECRET {
            return Err(AppError::ValidationError(
                "JWT_SECRET is using the development default; set it to a secure random string"
                    .to_string(),
            ));
        }

        if jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(AppError::ValidationError(format!(
                "JWT_SECRET is too short ({}). Must be at least {} characters",
                jwt_secret.len(),
                MIN_JWT_SECRET_LEN
            )));
        }

        Ok(())
    }

    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "eduportal-test".to_string(),
            mongo_max_pool_size: 4,
            mongo_min_pool_size: 1,
            mongo_timeout_secs: 2,
            users_collection: "users".to_string(),
            assignments_collection: "assignments".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8000,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            cors_allowed_origin: "http://localhost:3000".to_string(),
            mail_from: "EduPortal <test@eduportal.local>".to_string(),
            app_env: "test".to_string(),
        }
    }
}

fn env_number<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        assert!(!config.mongo_conn_string.is_empty());
        assert!(!config.mongo_db_name.is_empty());
        assert!(!config.assignments_collection.is_empty());
        assert!(config.mongo_min_pool_size <= config.mongo_max_pool_size);
    }

    #[test]
    fn unparsable_number_falls_back_to_default() {
        assert_eq!(env_number::<u32>("EDUPORTAL_UNSET_NUMBER_FOR_TEST", 7), 7);
    }

    #[test]
    fn test_test_config() {
        let config = Config::test_config();

        assert_eq!(config.mongo_db_name, "eduportal-test");
        assert_eq!(config.users_collection, "users");
        assert_eq!(config.assignments_collection, "assignments");
        assert!(!config.is_production());
    }

    #[test]
    fn production_validation_rejects_default_secret() {
        let mut config = Config::test_config();
        config.jwt_secret = SecretString::from(DEV_JWT_SECRET.to_string());

        assert!(matches!(
            config.validate_for_production(),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn production_validation_rejects_short_secret() {
        let config = Config::test_config();
        assert!(config.validate_for_production().is_err());
    }

    #[test]
    fn production_validation_accepts_long_secret() {
        let mut config = Config::test_config();
        config.jwt_secret = SecretString::from("x".repeat(48));
        assert!(config.validate_for_production().is_ok());
    }
}
