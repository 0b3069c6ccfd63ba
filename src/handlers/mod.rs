pub mod assignment_handler;
pub mod auth_handler;
pub mod user_handler;

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::errors::AppError;

pub use assignment_handler::{
    create_assignment, delete_assignment, get_assignment, list_assignments,
    list_published_assignments, mark_submission_reviewed, submit_answer, update_assignment,
};
pub use auth_handler::login;
pub use user_handler::{get_all_users, health_check, register_user};

/// Registers every route. `published` must precede `{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(health_check)
        .service(register_user)
        .service(get_all_users)
        .service(login)
        .service(list_assignments)
        .service(list_published_assignments)
        .service(create_assignment)
        .service(get_assignment)
        .service(update_assignment)
        .service(delete_assignment)
        .service(submit_answer)
        .service(mark_submission_reviewed);
}

/// Malformed bodies become JSON validation errors instead of plain-text 400s.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        AppError::ValidationError(format!("Invalid request body: {}", err)).into()
    })
}
