//! Mapping from SeaORM errors to the repository error taxonomy
//!
//! Raw driver messages never cross the repository boundary: constraint
//! violations become friendly conflict messages and everything else is
//! wrapped as an internal error whose original text only reaches the log.

use cursus_interfaces::DatabaseError;
use sea_orm::{DbErr, RuntimeErr};

/// Whether this error is a unique-constraint violation
pub fn is_unique_violation(err: &DbErr) -> bool {
    let text = match err {
        DbErr::Query(RuntimeErr::SqlxError(e)) => e.to_string(),
        DbErr::Exec(RuntimeErr::SqlxError(e)) => e.to_string(),
        other => other.to_string(),
    };
    text.contains("UNIQUE constraint") || text.contains("duplicate key")
}

/// Map a SeaORM error to the shared taxonomy.
///
/// `conflict_message` is the user-facing text used when the error turns
/// out to be a unique-constraint violation.
pub fn map_db_err(err: DbErr, conflict_message: &str) -> DatabaseError {
    if is_unique_violation(&err) {
        return DatabaseError::Constraint {
            message: conflict_message.to_string(),
        };
    }
    match err {
        DbErr::ConnectionAcquire(e) => DatabaseError::Connection {
            message: e.to_string(),
        },
        DbErr::Conn(e) => DatabaseError::Connection {
            message: e.to_string(),
        },
        other => DatabaseError::Internal {
            message: other.to_string(),
        },
    }
}

/// Map an error from a read path, where no conflict is possible
pub fn map_read_err(err: DbErr) -> DatabaseError {
    map_db_err(err, "Conflit de données")
}
