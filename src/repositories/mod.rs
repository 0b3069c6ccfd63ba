pub mod assignment_repository;
pub mod user_repository;

pub use assignment_repository::{AssignmentRepository, MongoAssignmentRepository};
pub use user_repository::{MongoUserRepository, UserRepository};
