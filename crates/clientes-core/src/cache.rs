//! Read-result cache port
//!
//! One namespace holds every memoized read. Writers never update entries in
//! place; they call [`CustomerCache::evict_all`] after persisting.
//!
//! Readers take a [`CustomerCache::generation`] before going to storage and
//! hand it back to [`CustomerCache::put`]; a value read before an eviction is
//! never stored after it.

use clientes_shared::{Page, PageRequest};

use crate::domain::{Customer, Partition};

/// Key of a memoized read. The partition is part of every key so the
/// active and inactive listings never share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Page { partition: Partition, page: u32, size: u32 },
    Cpf { partition: Partition, cpf: String },
}

impl CacheKey {
    pub fn page(partition: Partition, request: PageRequest) -> Self {
        CacheKey::Page { partition, page: request.page, size: request.size }
    }

    pub fn cpf(partition: Partition, cpf: &str) -> Self {
        CacheKey::Cpf { partition, cpf: cpf.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    Page(Page<Customer>),
    Customer(Customer),
}

#[cfg_attr(test, mockall::automock)]
pub trait CustomerCache: Send + Sync {
    /// Detached copy of the cached value, if present and still fresh
    fn get(&self, key: &CacheKey) -> Option<CachedValue>;

    /// Eviction counter, bumped by every [`CustomerCache::evict_all`]
    fn generation(&self) -> u64;

    /// Store `value` unless the namespace was evicted after `generation`
    fn put(&self, key: CacheKey, value: CachedValue, generation: u64);

    /// Drop every entry in the namespace
    fn evict_all(&self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
