//! Uniqueness pre-checks run before insert

use std::sync::Arc;
use tracing::warn;

use clientes_shared::utils::{mask_cpf, mask_email};

use crate::error::DomainError;
use crate::repositories::CustomerRepository;

/// Early rejection of duplicate CPF/email. The storage unique constraints
/// remain the source of truth when two registrations race.
#[derive(Clone)]
pub struct CustomerValidator {
    repo: Arc<dyn CustomerRepository>,
}

impl CustomerValidator {
    pub fn new(repo: Arc<dyn CustomerRepository>) -> Self {
        Self { repo }
    }

    pub async fn ensure_cpf_available(&self, cpf: &str) -> Result<(), DomainError> {
        if self.repo.exists_by_cpf(cpf).await? {
            warn!("CPF already registered: {}", mask_cpf(cpf));
            return Err(DomainError::CpfAlreadyRegistered(cpf.to_string()));
        }
        Ok(())
    }

    pub async fn ensure_email_available(&self, email: &str) -> Result<(), DomainError> {
        if self.repo.exists_by_email(email).await? {
            warn!("Email already registered: {}", mask_email(email));
            return Err(DomainError::EmailAlreadyRegistered(email.to_string()));
        }
        Ok(())
    }
}
