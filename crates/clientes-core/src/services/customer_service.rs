// ============================================================================
// Clientes Core - Customer Service
// File: crates/clientes-core/src/services/customer_service.rs
// ============================================================================
//! Customer use cases: register, list, find, update, toggle status, delete

use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

use clientes_shared::utils::{mask_cpf, mask_email};
use clientes_shared::{Page, PageRequest};

use crate::cache::{CacheKey, CachedValue, CustomerCache};
use crate::domain::{Customer, CustomerForm, Partition, StatusForm};
use crate::error::DomainError;
use crate::repositories::CustomerRepository;
use crate::services::{CustomerMapper, CustomerValidator};

/// Orchestrates validator, mapper, repository and cache.
///
/// Every write persists first and then evicts the whole cache namespace.
#[derive(Clone)]
pub struct CustomerService {
    repo: Arc<dyn CustomerRepository>,
    cache: Arc<dyn CustomerCache>,
    validator: CustomerValidator,
    mapper: CustomerMapper,
}

impl CustomerService {
    pub fn new(
        repo: Arc<dyn CustomerRepository>,
        cache: Arc<dyn CustomerCache>,
        validator: CustomerValidator,
        mapper: CustomerMapper,
    ) -> Self {
        Self {
            repo,
            cache,
            validator,
            mapper,
        }
    }

    /// Wire the default validator and mapper around a repository
    pub fn with_defaults(repo: Arc<dyn CustomerRepository>, cache: Arc<dyn CustomerCache>) -> Self {
        let validator = CustomerValidator::new(repo.clone());
        Self::new(repo, cache, validator, CustomerMapper)
    }

    /// Register a new customer
    pub async fn register(&self, form: &CustomerForm) -> Result<Customer, DomainError> {
        info!("Registration attempt for CPF: {}", mask_cpf(&form.cpf));
        form.validate()?;

        // 1. Uniqueness pre-checks on the stored layout, CPF first
        self.validator.ensure_cpf_available(&self.mapper.normalize_cpf(&form.cpf)).await?;
        self.validator.ensure_email_available(&self.mapper.normalize_email(&form.email)).await?;

        // 2. Map form and attach address
        let address = self.mapper.to_address(&form.address);
        let new_customer = self.mapper.to_new_customer(form, address);

        // 3. Persist
        let created = self.repo.insert(&new_customer).await?;
        self.cache.evict_all();

        info!("Customer registered: {}", created.id);
        Ok(created)
    }

    pub async fn list_active(&self, request: PageRequest) -> Result<Page<Customer>, DomainError> {
        self.list(Partition::Active, request).await
    }

    pub async fn list_inactive(&self, request: PageRequest) -> Result<Page<Customer>, DomainError> {
        self.list(Partition::Inactive, request).await
    }

    pub async fn find_active_by_cpf(&self, cpf: &str) -> Result<Customer, DomainError> {
        self.find_by_cpf(Partition::Active, cpf).await
    }

    pub async fn find_inactive_by_cpf(&self, cpf: &str) -> Result<Customer, DomainError> {
        self.find_by_cpf(Partition::Inactive, cpf).await
    }

    /// Replace every form field of an existing customer
    pub async fn update(&self, id: &Uuid, form: &CustomerForm) -> Result<Customer, DomainError> {
        info!("Update requested for customer: {}", id);
        form.validate()?;

        let mut customer = self.find_by_id(id).await?;
        self.mapper.apply(form, &mut customer);

        let updated = self.repo.update(&customer).await?;
        self.cache.evict_all();

        info!("Customer updated: {}", id);
        Ok(updated)
    }

    pub async fn toggle_status(&self, id: &Uuid, status: &StatusForm) -> Result<(), DomainError> {
        info!("Status change to active={} for customer: {}", status.active, id);

        let mut customer = self.find_by_id(id).await?;
        customer.set_active(status.active);

        self.repo.update(&customer).await?;
        self.cache.evict_all();
        Ok(())
    }

    /// Hard delete; frees the CPF and email for new registrations
    pub async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        info!("Delete requested for customer: {}", id);

        let customer = self.find_by_id(id).await?;
        self.repo.delete(&customer).await?;
        self.cache.evict_all();

        info!("Customer deleted: {} ({})", id, mask_email(&customer.email));
        Ok(())
    }

    /// Storage reachability, for readiness probes
    pub async fn ping(&self) -> Result<(), DomainError> {
        self.repo.ping().await
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Customer, DomainError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| {
            warn!("Customer not found by id: {}", id);
            DomainError::CustomerNotFoundById(*id)
        })
    }

    async fn list(&self, partition: Partition, request: PageRequest) -> Result<Page<Customer>, DomainError> {
        let key = CacheKey::page(partition, request);
        if let Some(CachedValue::Page(page)) = self.cache.get(&key) {
            debug!("Cache hit for {} page {} (size {})", partition.as_str(), request.page, request.size);
            return Ok(page);
        }

        debug!("Cache miss for {} page {} (size {})", partition.as_str(), request.page, request.size);
        let generation = self.cache.generation();
        let page = self.repo.find_page(partition, request).await?;
        self.cache.put(key, CachedValue::Page(page.clone()), generation);
        Ok(page)
    }

    async fn find_by_cpf(&self, partition: Partition, cpf: &str) -> Result<Customer, DomainError> {
        let cpf = self.mapper.normalize_cpf(cpf);
        let key = CacheKey::cpf(partition, &cpf);
        if let Some(CachedValue::Customer(customer)) = self.cache.get(&key) {
            debug!("Cache hit for {} CPF {}", partition.as_str(), mask_cpf(&cpf));
            return Ok(customer);
        }

        let generation = self.cache.generation();
        let customer = self.repo.find_by_cpf(&cpf, partition).await?.ok_or_else(|| {
            warn!("No {} customer with CPF {}", partition.as_str(), mask_cpf(&cpf));
            DomainError::CustomerNotFoundByCpf(cpf.clone())
        })?;
        self.cache.put(key, CachedValue::Customer(customer.clone()), generation);
        Ok(customer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MockCustomerCache;
    use crate::domain::{Address, AddressForm, NewCustomer};
    use crate::repositories::MockCustomerRepository;
    use chrono::{NaiveDate, Utc};
    use mockall::Sequence;

    fn form(cpf: &str, email: &str) -> CustomerForm {
        CustomerForm {
            name: "Rodrigo Alves".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2002, 2, 7).unwrap(),
            email: email.to_string(),
            cpf: cpf.to_string(),
            address: AddressForm {
                street: "Avenida Paulista".to_string(),
                number: "1000".to_string(),
                neighborhood: "Bela Vista".to_string(),
                city: "São Paulo".to_string(),
                state: "SP".to_string(),
                postal_code: "01310-100".to_string(),
            },
        }
    }

    fn customer(active: bool) -> Customer {
        NewCustomer {
            name: "José Carlos".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1970, 10, 14).unwrap(),
            email: "teste2@hotmail.com".to_string(),
            cpf: "594.642.567-61".to_string(),
            address: Address {
                street: "Rua das Flores".to_string(),
                number: "250".to_string(),
                neighborhood: "Jardim Primavera".to_string(),
                city: "Curitiba".to_string(),
                state: "PR".to_string(),
                postal_code: "80530-200".to_string(),
            },
            active,
        }
        .into_customer(Uuid::new_v4(), Utc::now())
    }

    fn service(repo: MockCustomerRepository, cache: MockCustomerCache) -> CustomerService {
        CustomerService::with_defaults(Arc::new(repo), Arc::new(cache))
    }

    #[tokio::test]
    async fn test_register_persists_then_evicts() {
        let mut seq = Sequence::new();
        let mut repo = MockCustomerRepository::new();
        let mut cache = MockCustomerCache::new();

        repo.expect_exists_by_cpf().times(1).in_sequence(&mut seq).returning(|_| Ok(false));
        repo.expect_exists_by_email().times(1).in_sequence(&mut seq).returning(|_| Ok(false));
        repo.expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new| Ok(new.clone().into_customer(Uuid::new_v4(), Utc::now())));
        cache.expect_evict_all().times(1).in_sequence(&mut seq).return_const(());

        let created = service(repo, cache)
            .register(&form("745.303.692-50", "teste@gmail.com"))
            .await
            .unwrap();

        assert_eq!(created.name, "Rodrigo Alves");
        assert_eq!(created.cpf, "745.303.692-50");
        assert_eq!(created.address.postal_code, "01310-100");
        assert!(created.active);
    }

    #[tokio::test]
    async fn test_register_duplicate_cpf_short_circuits() {
        let mut repo = MockCustomerRepository::new();
        let mut cache = MockCustomerCache::new();

        repo.expect_exists_by_cpf().returning(|_| Ok(true));
        repo.expect_exists_by_email().never();
        repo.expect_insert().never();
        cache.expect_evict_all().never();

        let err = service(repo, cache)
            .register(&form("745.303.692-50", "outro@gmail.com"))
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::CpfAlreadyRegistered("745.303.692-50".to_string()));
    }

    #[tokio::test]
    async fn test_register_checks_canonical_cpf_and_email() {
        let mut repo = MockCustomerRepository::new();
        let mut cache = MockCustomerCache::new();

        repo.expect_exists_by_cpf()
            .withf(|cpf| cpf == "745.303.692-50")
            .times(1)
            .returning(|_| Ok(false));
        repo.expect_exists_by_email()
            .withf(|email| email == "teste@gmail.com")
            .times(1)
            .returning(|_| Ok(false));
        repo.expect_insert()
            .withf(|new| new.cpf == "745.303.692-50" && new.email == "teste@gmail.com")
            .times(1)
            .returning(|new| Ok(new.clone().into_customer(Uuid::new_v4(), Utc::now())));
        cache.expect_evict_all().times(1).return_const(());

        let created = service(repo, cache)
            .register(&form("74530369250", "Teste@Gmail.com"))
            .await
            .unwrap();
        assert_eq!(created.cpf, "745.303.692-50");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repo = MockCustomerRepository::new();
        let mut cache = MockCustomerCache::new();

        repo.expect_exists_by_cpf().returning(|_| Ok(false));
        repo.expect_exists_by_email().returning(|_| Ok(true));
        repo.expect_insert().never();
        cache.expect_evict_all().never();

        let err = service(repo, cache)
            .register(&form("745.303.692-50", "teste@gmail.com"))
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::EmailAlreadyRegistered("teste@gmail.com".to_string()));
    }

    #[tokio::test]
    async fn test_register_invalid_form_touches_nothing() {
        let mut repo = MockCustomerRepository::new();
        repo.expect_exists_by_cpf().never();
        repo.expect_insert().never();

        let err = service(repo, MockCustomerCache::new())
            .register(&form("745.303.692-51", "teste@gmail.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::ValidationError(msg) if msg.contains("Invalid CPF")));
    }

    #[tokio::test]
    async fn test_list_active_miss_populates_cache() {
        let mut repo = MockCustomerRepository::new();
        let mut cache = MockCustomerCache::new();
        let request = PageRequest::default();
        let stored = customer(true);
        let expected = Page::new(vec![stored.clone()], request, 1);

        cache.expect_get()
            .withf(move |key| *key == CacheKey::page(Partition::Active, request))
            .times(1)
            .returning(|_| None);
        cache.expect_generation().return_const(3u64);
        repo.expect_find_page()
            .withf(move |partition, req| *partition == Partition::Active && *req == request)
            .times(1)
            .returning(move |_, req| Ok(Page::new(vec![stored.clone()], req, 1)));
        cache.expect_put()
            .withf(move |key, _, generation| *key == CacheKey::page(Partition::Active, request) && *generation == 3)
            .times(1)
            .return_const(());

        let page = service(repo, cache).list_active(request).await.unwrap();
        assert_eq!(page, expected);
    }

    #[tokio::test]
    async fn test_list_inactive_hit_skips_repository() {
        let mut repo = MockCustomerRepository::new();
        let mut cache = MockCustomerCache::new();
        let request = PageRequest::new(0, 10);
        let cached = Page::new(vec![customer(false)], request, 1);
        let returned = cached.clone();

        cache.expect_get()
            .withf(move |key| *key == CacheKey::page(Partition::Inactive, request))
            .returning(move |_| Some(CachedValue::Page(returned.clone())));
        repo.expect_find_page().never();
        cache.expect_put().never();

        let page = service(repo, cache).list_inactive(request).await.unwrap();
        assert_eq!(page, cached);
    }

    #[tokio::test]
    async fn test_find_active_by_cpf_not_found_is_not_cached() {
        let mut repo = MockCustomerRepository::new();
        let mut cache = MockCustomerCache::new();

        cache.expect_get().returning(|_| None);
        cache.expect_generation().return_const(0u64);
        repo.expect_find_by_cpf()
            .withf(|cpf, partition| cpf == "462.789.844-40" && *partition == Partition::Active)
            .returning(|_, _| Ok(None));
        cache.expect_put().never();

        let err = service(repo, cache)
            .find_active_by_cpf("46278984440")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Customer with CPF 462.789.844-40 was not found");
    }

    #[tokio::test]
    async fn test_find_inactive_by_cpf_caches_result() {
        let mut repo = MockCustomerRepository::new();
        let mut cache = MockCustomerCache::new();
        let stored = customer(false);
        let returned = stored.clone();

        cache.expect_get().returning(|_| None);
        cache.expect_generation().return_const(0u64);
        repo.expect_find_by_cpf()
            .withf(|_, partition| *partition == Partition::Inactive)
            .returning(move |_, _| Ok(Some(returned.clone())));
        cache.expect_put()
            .withf(|key, value, _| {
                *key == CacheKey::cpf(Partition::Inactive, "594.642.567-61")
                    && matches!(value, CachedValue::Customer(_))
            })
            .times(1)
            .return_const(());

        let found = service(repo, cache)
            .find_inactive_by_cpf("594.642.567-61")
            .await
            .unwrap();
        assert_eq!(found, stored);
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_evicts() {
        let mut repo = MockCustomerRepository::new();
        let mut cache = MockCustomerCache::new();
        let existing = customer(false);
        let id = existing.id;

        repo.expect_find_by_id().returning(move |_| Ok(Some(existing.clone())));
        repo.expect_update()
            .withf(move |c| c.id == id && c.email == "rodrigo@hotmail.com" && !c.active)
            .times(1)
            .returning(|c| Ok(c.clone()));
        cache.expect_evict_all().times(1).return_const(());

        let updated = service(repo, cache)
            .update(&id, &form("745.303.692-50", "rodrigo@hotmail.com"))
            .await
            .unwrap();

        assert_eq!(updated.id, id);
        assert_eq!(updated.name, "Rodrigo Alves");
        assert_eq!(updated.address.street, "Avenida Paulista");
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_found() {
        let mut repo = MockCustomerRepository::new();
        let mut cache = MockCustomerCache::new();
        let id = Uuid::new_v4();

        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_update().never();
        cache.expect_evict_all().never();

        let err = service(repo, cache)
            .update(&id, &form("745.303.692-50", "teste@gmail.com"))
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::CustomerNotFoundById(id));
    }

    #[tokio::test]
    async fn test_toggle_status_sets_flag() {
        let mut repo = MockCustomerRepository::new();
        let mut cache = MockCustomerCache::new();
        let existing = customer(true);
        let id = existing.id;

        repo.expect_find_by_id().returning(move |_| Ok(Some(existing.clone())));
        repo.expect_update()
            .withf(|c| !c.active && c.modified_at.is_some())
            .times(1)
            .returning(|c| Ok(c.clone()));
        cache.expect_evict_all().times(1).return_const(());

        service(repo, cache)
            .toggle_status(&id, &StatusForm { active: false })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_toggle_status_missing_id() {
        let mut repo = MockCustomerRepository::new();
        let mut cache = MockCustomerCache::new();

        repo.expect_find_by_id().returning(|_| Ok(None));
        cache.expect_evict_all().never();

        let err = service(repo, cache)
            .toggle_status(&Uuid::new_v4(), &StatusForm { active: true })
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_removes_then_evicts() {
        let mut seq = Sequence::new();
        let mut repo = MockCustomerRepository::new();
        let mut cache = MockCustomerCache::new();
        let existing = customer(true);
        let id = existing.id;

        repo.expect_find_by_id()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_delete()
            .withf(move |c| c.id == id)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        cache.expect_evict_all().times(1).in_sequence(&mut seq).return_const(());

        service(repo, cache).delete(&id).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_missing_id() {
        let mut repo = MockCustomerRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_delete().never();

        let id = Uuid::new_v4();
        let err = service(repo, MockCustomerCache::new()).delete(&id).await.unwrap_err();
        assert_eq!(err.to_string(), format!("Customer with id {} was not found", id));
    }
}
