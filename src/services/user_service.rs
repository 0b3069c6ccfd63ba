use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::password,
    errors::{AppError, AppResult},
    models::{
        domain::User,
        dto::{
            request::{required, RegisterUserRequest},
            response::UserDto,
        },
    },
    repositories::UserRepository,
    services::mailer::{self, Mailer},
};

pub struct UserService {
    repository: Arc<dyn UserRepository>,
    mailer: Arc<dyn Mailer>,
    mail_from: String,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, mailer: Arc<dyn Mailer>, mail_from: &str) -> Self {
        Self {
            repository,
            mailer,
            mail_from: mail_from.to_string(),
        }
    }

    /// Registers an identity and queues its welcome email.
    pub async fn register(&self, request: RegisterUserRequest) -> AppResult<UserDto> {
        request.validate()?;

        let (Some(name), Some(email), Some(role), Some(raw_password)) = (
            required(&request.name),
            required(&request.email),
            request.role,
            request.password.as_deref().filter(|p| !p.is_empty()),
        ) else {
            return Err(AppError::ValidationError(
                "Please fill all required fields.".to_string(),
            ));
        };

        if self.repository.find_by_email(email).await?.is_some() {
            return Err(AppError::AlreadyExists("Email already present".to_string()));
        }

        let password_hash = password::hash_password(raw_password.to_string()).await?;
        let phone = required(&request.phone).map(str::to_string);

        let user = self
            .repository
            .create(User::new(name, email, phone, role, password_hash))
            .await?;

        log::info!("Registered {} identity {} <{}>", user.role, user.id, user.email);
        mailer::dispatch(
            Arc::clone(&self.mailer),
            mailer::welcome_email(&self.mail_from, &user),
        );

        Ok(user.into())
    }

    pub async fn list_users(&self) -> AppResult<Vec<UserDto>> {
        let users = self.repository.find_all().await?;

        if users.is_empty() {
            return Err(AppError::NotFound("No users found".to_string()));
        }

        Ok(users.into_iter().map(UserDto::from).collect())
    }
}
