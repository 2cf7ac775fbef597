//! Customer repository trait (port)

use async_trait::async_trait;
use clientes_shared::{Page, PageRequest};
use uuid::Uuid;

use crate::domain::{Customer, NewCustomer, Partition};
use crate::error::DomainError;

/// Persistence gateway for customer records.
///
/// Implementations must enforce CPF and email uniqueness across the whole
/// table and report violations as [`DomainError::CpfAlreadyRegistered`] or
/// [`DomainError::EmailAlreadyRegistered`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn insert(&self, customer: &NewCustomer) -> Result<Customer, DomainError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Customer>, DomainError>;
    async fn find_by_cpf(&self, cpf: &str, partition: Partition) -> Result<Option<Customer>, DomainError>;
    /// Page of one partition ordered by birth date ascending
    async fn find_page(&self, partition: Partition, request: PageRequest) -> Result<Page<Customer>, DomainError>;
    async fn update(&self, customer: &Customer) -> Result<Customer, DomainError>;
    async fn delete(&self, customer: &Customer) -> Result<(), DomainError>;
    async fn exists_by_cpf(&self, cpf: &str) -> Result<bool, DomainError>;
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;
    async fn ping(&self) -> Result<(), DomainError>;
}
