use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::user::{User, UserRole};

/// Fixed validity window of every issued token.
pub const TOKEN_VALIDITY_HOURS: i64 = 24;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Identity id
    pub role: UserRole,
    pub name: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user: &User, issued_at: DateTime<Utc>) -> Self {
        let exp = issued_at + Duration::hours(TOKEN_VALIDITY_HOURS);

        Self {
            sub: user.id.clone(),
            role: user.role,
            name: user.name.clone(),
            email: user.email.clone(),
            iat: issued_at.timestamp(),
            exp: exp.timestamp(),
        }
    }
}

/// Identity resolved from a verified token. Lives for one request only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub identity_id: String,
    pub role: UserRole,
    pub name: String,
    pub email: String,
}

impl From<Claims> for VerifiedIdentity {
    fn from(claims: Claims) -> Self {
        VerifiedIdentity {
            identity_id: claims.sub,
            role: claims.role,
            name: claims.name,
            email: claims.email,
        }
    }
}
