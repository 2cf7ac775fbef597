//! Process-local customer repository
//!
//! Keeps the same uniqueness and ordering guarantees as the PostgreSQL
//! adapter. Used for local runs (`database.backend = "memory"`) and tests.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use clientes_core::domain::{Customer, NewCustomer, Partition};
use clientes_core::error::DomainError;
use clientes_core::repositories::CustomerRepository;
use clientes_shared::{Page, PageRequest};

#[derive(Default)]
pub struct InMemoryCustomerRepository {
    rows: RwLock<HashMap<Uuid, Customer>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

/// Unique-constraint check against every row except `skip`
fn check_unique(
    rows: &HashMap<Uuid, Customer>,
    cpf: &str,
    email: &str,
    skip: Option<Uuid>,
) -> Result<(), DomainError> {
    for row in rows.values().filter(|r| Some(r.id) != skip) {
        if row.cpf == cpf {
            return Err(DomainError::CpfAlreadyRegistered(cpf.to_string()));
        }
        if row.email == email {
            return Err(DomainError::EmailAlreadyRegistered(email.to_string()));
        }
    }
    Ok(())
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn insert(&self, customer: &NewCustomer) -> Result<Customer, DomainError> {
        let mut rows = self.rows.write().await;
        check_unique(&rows, &customer.cpf, &customer.email, None)?;

        let created = customer.clone().into_customer(Uuid::new_v4(), Utc::now());
        rows.insert(created.id, created.clone());

        info!("Customer row created: {}", created.id);
        Ok(created)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Customer>, DomainError> {
        Ok(self.rows.read().await.get(id).cloned())
    }

    async fn find_by_cpf(&self, cpf: &str, partition: Partition) -> Result<Option<Customer>, DomainError> {
        let rows = self.rows.read().await;
        Ok(rows
            .values()
            .find(|c| c.cpf == cpf && c.partition() == partition)
            .cloned())
    }

    async fn find_page(&self, partition: Partition, request: PageRequest) -> Result<Page<Customer>, DomainError> {
        let rows = self.rows.read().await;
        let mut matching: Vec<&Customer> = rows.values().filter(|c| c.partition() == partition).collect();
        matching.sort_by(|a, b| a.birth_date.cmp(&b.birth_date).then(a.id.cmp(&b.id)));

        let total = matching.len() as u64;
        let content = matching
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.limit() as usize)
            .cloned()
            .collect();
        Ok(Page::new(content, request, total))
    }

    async fn update(&self, customer: &Customer) -> Result<Customer, DomainError> {
        let mut rows = self.rows.write().await;
        if !rows.contains_key(&customer.id) {
            return Err(DomainError::CustomerNotFoundById(customer.id));
        }
        check_unique(&rows, &customer.cpf, &customer.email, Some(customer.id))?;

        rows.insert(customer.id, customer.clone());
        Ok(customer.clone())
    }

    async fn delete(&self, customer: &Customer) -> Result<(), DomainError> {
        self.rows
            .write()
            .await
            .remove(&customer.id)
            .map(|_| ())
            .ok_or(DomainError::CustomerNotFoundById(customer.id))
    }

    async fn exists_by_cpf(&self, cpf: &str) -> Result<bool, DomainError> {
        Ok(self.rows.read().await.values().any(|c| c.cpf == cpf))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.rows.read().await.values().any(|c| c.email == email))
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
