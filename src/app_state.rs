use std::sync::Arc;

use crate::{
    auth::{password, JwtService},
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        AssignmentRepository, MongoAssignmentRepository, MongoUserRepository, UserRepository,
    },
    services::{
        assignment_service::AssignmentService,
        auth_service::AuthService,
        mailer::{LogMailer, Mailer},
        submission_service::SubmissionService,
        user_service::UserService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub auth_service: Arc<AuthService>,
    pub assignment_service: Arc<AssignmentService>,
    pub submission_service: Arc<SubmissionService>,
    pub jwt_service: Arc<JwtService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        password::prepare_timing_guard().await?;

        let db = Database::connect(&config).await?;

        let user_repository = Arc::new(MongoUserRepository::new(&db, &config.users_collection));
        user_repository.ensure_indexes().await?;

        let assignment_repository = Arc::new(MongoAssignmentRepository::new(
            &db,
            &config.assignments_collection,
        ));
        assignment_repository.ensure_indexes().await?;

        Ok(Self::from_parts(
            config,
            user_repository,
            assignment_repository,
            Arc::new(LogMailer),
        ))
    }

    /// Wires services over the given collaborators.
    pub fn from_parts(
        config: Config,
        user_repository: Arc<dyn UserRepository>,
        assignment_repository: Arc<dyn AssignmentRepository>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        let jwt_service = Arc::new(JwtService::new(&config.jwt_secret));

        let user_service = Arc::new(UserService::new(
            Arc::clone(&user_repository),
            mailer,
            &config.mail_from,
        ));
        let auth_service = Arc::new(AuthService::new(user_repository, Arc::clone(&jwt_service)));
        let assignment_service = Arc::new(AssignmentService::new(Arc::clone(&assignment_repository)));
        let submission_service = Arc::new(SubmissionService::new(assignment_repository));

        Self {
            user_service,
            auth_service,
            assignment_service,
            submission_service,
            jwt_service,
            config: Arc::new(config),
        }
    }
}
