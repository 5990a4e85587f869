//! Model to entity mappers
//!
//! Rows whose text columns hold values the domain doesn't know (a role or
//! status written by hand, say) fail conversion with a `DatabaseError`
//! instead of being silently coerced.

mod campaign;
mod partnership;
mod user;

use bridged_core::DomainError;

pub(crate) fn corrupt_column(table: &str, column: &str, detail: String) -> DomainError {
    DomainError::DatabaseError(format!("invalid {table}.{column}: {detail}"))
}
