use crate::auth::repo_types::{User, UserRole};
use crate::error::AppError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Request body for signup.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
}

impl SignUpRequest {
    /// Normalize and validate before anything touches the store.
    pub fn validate(&mut self) -> Result<(), AppError> {
        self.email = self.email.trim().to_lowercase();
        self.name = self.name.trim().to_string();
        self.phone_number = self.phone_number.trim().to_string();

        if self.name.is_empty() {
            return Err(AppError::Validation("Name is required".into()));
        }
        if !is_valid_email(&self.email) {
            return Err(AppError::Validation("Invalid email".into()));
        }
        if self.phone_number.is_empty() {
            return Err(AppError::Validation("Phone number is required".into()));
        }
        if self.password.len() < 8 {
            return Err(AppError::Validation("Password too short".into()));
        }
        Ok(())
    }
}

/// Request body for signin.
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

impl SignInRequest {
    pub fn validate(&mut self) -> Result<(), AppError> {
        self.email = self.email.trim().to_lowercase();
        if !is_valid_email(&self.email) {
            return Err(AppError::Validation("Invalid email".into()));
        }
        Ok(())
    }
}

/// Response returned after signin.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: PublicUser,
}

/// Public part of the user returned to the client; no password field exists
/// on this type at all.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub role: UserRole,
    pub is_verified: bool,
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone_number: user.phone_number,
            role: user.role,
            is_verified: user.is_verified,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup_request(email: &str, password: &str) -> SignUpRequest {
        SignUpRequest {
            name: "A".into(),
            email: email.into(),
            phone_number: "1".into(),
            password: password.into(),
        }
    }

    #[test]
    fn accepts_valid_signup() {
        let mut req = signup_request("a@x.com", "long-enough");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn normalizes_email_case_and_whitespace() {
        let mut req = signup_request("  A@X.Com ", "long-enough");
        req.validate().unwrap();
        assert_eq!(req.email, "a@x.com");
    }

    #[test]
    fn rejects_invalid_email() {
        let mut req = signup_request("not-an-email", "long-enough");
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn rejects_short_password() {
        let mut req = signup_request("a@x.com", "short");
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn rejects_blank_name() {
        let mut req = signup_request("a@x.com", "long-enough");
        req.name = "   ".into();
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn signup_body_uses_camel_case_wire_format() {
        let req: SignUpRequest = serde_json::from_str(
            r#"{"name":"A","email":"a@x.com","phoneNumber":"1","password":"secret-pw"}"#,
        )
        .unwrap();
        assert_eq!(req.phone_number, "1");
    }

    #[test]
    fn projection_never_contains_a_password_field() {
        let user = PublicUser {
            id: Uuid::new_v4(),
            name: "A".into(),
            email: "a@x.com".into(),
            phone_number: "1".into(),
            role: UserRole::Student,
            is_verified: false,
            is_active: true,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.to_lowercase().contains("password"));
        assert!(json.contains("phoneNumber"));
    }
}
