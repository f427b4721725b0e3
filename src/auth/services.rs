use axum::extract::FromRef;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::auth::dto::{AuthResponse, PublicUser, SignInRequest, SignUpRequest};
use crate::auth::jwt::JwtKeys;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::repo_types::{NewUser, User};
use crate::error::AppError;
use crate::state::AppState;

/// Onboard a new account. The plaintext password is replaced by its bcrypt
/// hash before the record ever reaches the store.
pub async fn register(state: &AppState, req: SignUpRequest) -> Result<PublicUser, AppError> {
    if User::find_by_email(&state.db, &req.email).await?.is_some() {
        warn!(email = %req.email, "email already registered");
        return Err(AppError::AlreadyExists);
    }

    let password_hash = hash_password(&req.password)?;
    let candidate = NewUser {
        name: req.name,
        email: req.email,
        phone_number: req.phone_number,
        password_hash,
    };

    let user = User::create(&state.db, &candidate).await?;
    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(PublicUser::from(user))
}

/// Check an email/password pair against the store. Absent email and wrong
/// password both come back as `None` so the caller cannot tell them apart.
pub async fn validate_credentials(
    db: &PgPool,
    email: &str,
    password: &str,
) -> Result<Option<PublicUser>, AppError> {
    let Some(user) = User::find_by_email(db, email).await? else {
        return Ok(None);
    };

    if verify_password(password, &user.password_hash)? {
        Ok(Some(PublicUser::from(user)))
    } else {
        Ok(None)
    }
}

/// Verify credentials and mint a bearer token carrying the user's id and
/// email.
pub async fn login(state: &AppState, req: SignInRequest) -> Result<AuthResponse, AppError> {
    let Some(user) = validate_credentials(&state.db, &req.email, &req.password).await? else {
        warn!(email = %req.email, "login rejected");
        return Err(AppError::Unauthorized);
    };

    let keys = JwtKeys::from_ref(state);
    let access_token = keys.sign(user.id, &user.email)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(AuthResponse { access_token, user })
}
