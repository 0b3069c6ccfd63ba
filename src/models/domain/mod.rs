pub mod assignment;
pub mod user;
pub use assignment::{Assignment, AssignmentPatch, AssignmentStatus, Submission};
pub use user::{User, UserRole};
