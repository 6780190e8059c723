//! Postgres repository implementations.

mod post;
mod user;

pub use post::PostgresPostRepository;
pub use user::PostgresUserRepository;

use chronicle_core::error::RepoError;
use sea_orm::{DbErr, SqlErr};

/// Translate driver errors into the repository taxonomy. Unique violations
/// are reported with the colliding field so the API can name it.
pub(crate) fn map_db_err(e: DbErr) -> RepoError {
    if let Some(SqlErr::UniqueConstraintViolation(msg)) = e.sql_err() {
        return RepoError::Constraint(constraint_field(&msg).to_string());
    }

    match e {
        DbErr::Conn(err) => RepoError::Connection(err.to_string()),
        other => {
            let msg = other.to_string();
            // mocked or driver-wrapped errors don't always carry SqlErr
            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                RepoError::Constraint(constraint_field(&msg).to_string())
            } else {
                RepoError::Query(msg)
            }
        }
    }
}

fn constraint_field(msg: &str) -> &'static str {
    if msg.contains("slug") {
        "slug"
    } else if msg.contains("email") {
        "email"
    } else {
        "key"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_names_the_field() {
        let err = DbErr::Custom(
            r#"duplicate key value violates unique constraint "idx-posts-slug""#.to_string(),
        );
        assert!(matches!(
            map_db_err(err),
            RepoError::Constraint(field) if field == "slug"
        ));

        let err = DbErr::Custom(
            r#"duplicate key value violates unique constraint "users_email_key""#.to_string(),
        );
        assert!(matches!(
            map_db_err(err),
            RepoError::Constraint(field) if field == "email"
        ));
    }

    #[test]
    fn other_errors_stay_query_errors() {
        let err = DbErr::Custom("syntax error at or near".to_string());
        assert!(matches!(map_db_err(err), RepoError::Query(_)));
    }
}
