use crate::auth::repo_types::{NewUser, User};
use crate::error::AppError;
use sqlx::PgPool;
use uuid::Uuid;

impl User {
    /// Exact-match lookup on the unique email key.
    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, phone_number, password_hash, role,
                   is_verified, is_active, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, phone_number, password_hash, role,
                   is_verified, is_active, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Insert a new record and return the stored row with generated id and
    /// timestamps. The unique index on email is the authority on duplicates;
    /// a unique violation surfaces as `AlreadyExists`.
    pub async fn create(db: &PgPool, candidate: &NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, phone_number, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, phone_number, password_hash, role,
                      is_verified, is_active, created_at, updated_at
            "#,
        )
        .bind(&candidate.name)
        .bind(&candidate.email)
        .bind(&candidate.phone_number)
        .bind(&candidate.password_hash)
        .fetch_one(db)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::AlreadyExists
            }
            other => AppError::Database(other),
        })
    }
}
