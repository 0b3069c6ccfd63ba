use crate::{
    auth::VerifiedIdentity,
    errors::{AppError, AppResult},
};

/// Admins and teachers only.
pub fn require_staff(identity: &VerifiedIdentity) -> AppResult<()> {
    if !identity.role.is_staff() {
        return Err(AppError::Forbidden(
            "Only admins and teachers can perform this action".to_string(),
        ));
    }
    Ok(())
}
