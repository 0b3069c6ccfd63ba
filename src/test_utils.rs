#[cfg(test)]
pub mod fixtures {
    use crate::{
        auth::VerifiedIdentity,
        models::domain::{Assignment, AssignmentStatus, Submission, User, UserRole},
    };

    /// A student identity with a placeholder hash.
    pub fn student() -> User {
        User::new("Sam Student", "sam@example.com", None, UserRole::Student, "hash".into())
    }

    pub fn teacher() -> User {
        User::new("Tess Teacher", "tess@example.com", None, UserRole::Teacher, "hash".into())
    }

    pub fn identity_for(user: &User) -> VerifiedIdentity {
        VerifiedIdentity {
            identity_id: user.id.clone(),
            role: user.role,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }

    /// A published assignment holding one unreviewed submission.
    pub fn published_assignment_with_submission() -> (Assignment, Submission) {
        let mut assignment = Assignment::new("HW1", Some("Warm-up".into()), None);
        assignment.status = AssignmentStatus::Published;

        let submission = Submission::new("Sam Student", "sam@example.com", "42");
        assignment.submissions.push(submission.clone());
        (assignment, submission)
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::UserRole;

    #[test]
    fn test_fixture_roles() {
        assert_eq!(student().role, UserRole::Student);
        assert_eq!(teacher().role, UserRole::Teacher);
    }

    #[test]
    fn test_identity_mirrors_user() {
        let user = student();
        let identity = identity_for(&user);
        assert_eq!(identity.identity_id, user.id);
        assert_eq!(identity.email, user.email);
    }

    #[test]
    fn test_published_fixture_holds_submission() {
        let (assignment, submission) = published_assignment_with_submission();
        assert!(assignment.status.is_student_visible());
        assert_eq!(assignment.submission(&submission.id), Some(&submission));
    }
}
