//! Domain errors

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("CPF {0} is already registered")]
    CpfAlreadyRegistered(String),

    #[error("Email {0} is already registered")]
    EmailAlreadyRegistered(String),

    #[error("Customer with id {0} was not found")]
    CustomerNotFoundById(Uuid),

    #[error("Customer with CPF {0} was not found")]
    CustomerNotFoundByCpf(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            DomainError::CpfAlreadyRegistered(_) | DomainError::EmailAlreadyRegistered(_)
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DomainError::CustomerNotFoundById(_) | DomainError::CustomerNotFoundByCpf(_)
        )
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(crate::domain::form::describe_errors(&errors))
    }
}
