use std::sync::Arc;

use crate::{
    auth::{password, JwtService},
    errors::{AppError, AppResult},
    models::dto::{request::LoginRequest, response::LoginResponse},
    repositories::UserRepository,
};

/// Exchanges email/password for a signed access token.
pub struct AuthService {
    repository: Arc<dyn UserRepository>,
    jwt_service: Arc<JwtService>,
}

impl AuthService {
    pub fn new(repository: Arc<dyn UserRepository>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            repository,
            jwt_service,
        }
    }

    /// Unknown email and wrong password fail identically.
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let (Some(email), Some(raw_password)) = (
            request.email.as_deref().map(str::trim).filter(|e| !e.is_empty()),
            request.password.filter(|p| !p.is_empty()),
        ) else {
            return Err(AppError::ValidationError(
                "Please provide email and password.".to_string(),
            ));
        };

        let Some(user) = self.repository.find_by_email(email).await? else {
            password::verify_against_dummy(raw_password).await;
            log::warn!("Failed login attempt");
            return Err(AppError::InvalidCredentials);
        };

        if !password::verify_password(raw_password, user.password_hash.clone()).await? {
            log::warn!("Failed login attempt for identity {}", user.id);
            return Err(AppError::InvalidCredentials);
        }

        let token = self.jwt_service.create_token(&user)?;
        log::info!("Issued token for identity {}", user.id);

        Ok(LoginResponse {
            token,
            role: user.role,
            name: user.name,
        })
    }
}
