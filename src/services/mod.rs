pub mod assignment_service;
pub mod auth_service;
pub mod mailer;
pub mod submission_service;
pub mod user_service;
