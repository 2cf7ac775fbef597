use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use clientes_core::cache::{CacheKey, CachedValue, CustomerCache};
use clientes_shared::constants::CACHE_NAMESPACE;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: CachedValue,
    stored_at: Instant,
}

/// Thread-safe in-memory read cache for one namespace.
/// Uses DashMap for concurrent access; expired entries are dropped lazily on read.
#[derive(Clone)]
pub struct MemoryCache {
    storage: Arc<DashMap<CacheKey, CacheEntry>>,
    generation: Arc<AtomicU64>,
    ttl: Option<Duration>,
}

impl MemoryCache {
    /// Create a cache whose entries live until the next eviction
    pub fn new() -> Self {
        Self::with_ttl(None)
    }

    /// `None` or a zero duration disables expiry
    pub fn with_ttl(ttl: Option<Duration>) -> Self {
        let ttl = ttl.filter(|d| !d.is_zero());
        info!("Initializing '{}' cache (ttl: {:?})", CACHE_NAMESPACE, ttl);
        Self {
            storage: Arc::new(DashMap::new()),
            generation: Arc::new(AtomicU64::new(0)),
            ttl,
        }
    }

    fn is_expired(&self, entry: &CacheEntry) -> bool {
        self.ttl.is_some_and(|ttl| entry.stored_at.elapsed() >= ttl)
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerCache for MemoryCache {
    fn get(&self, key: &CacheKey) -> Option<CachedValue> {
        let entry = self.storage.get(key)?;
        if self.is_expired(entry.value()) {
            drop(entry); // Release read lock before removing
            self.storage.remove(key);
            debug!("Entry {:?} expired, removed from cache", key);
            return None;
        }
        Some(entry.value().value.clone())
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    fn put(&self, key: CacheKey, value: CachedValue, generation: u64) {
        if self.generation() != generation {
            debug!("Dropping {:?}, read before the last eviction", key);
            return;
        }
        self.storage.insert(key.clone(), CacheEntry { value, stored_at: Instant::now() });

        // an eviction that raced the insert may have cleared before it landed
        if self.generation() != generation {
            self.storage.remove(&key);
        }
    }

    fn evict_all(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        let count = self.storage.len();
        self.storage.clear();
        debug!("Evicted {} entries from '{}' cache", count, CACHE_NAMESPACE);
    }

    fn len(&self) -> usize {
        self.storage.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use clientes_core::domain::{Address, NewCustomer, Partition};
    use clientes_shared::{Page, PageRequest};
    use uuid::Uuid;

    fn customer() -> clientes_core::Customer {
        NewCustomer {
            name: "Lucas Silva".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1995, 6, 22).unwrap(),
            email: "teste1@gmail.com".to_string(),
            cpf: "462.789.844-40".to_string(),
            address: Address {
                street: "Avenida Rio Branco".to_string(),
                number: "890".to_string(),
                neighborhood: "Centro".to_string(),
                city: "Rio de Janeiro".to_string(),
                state: "RJ".to_string(),
                postal_code: "20040-003".to_string(),
            },
            active: true,
        }
        .into_customer(Uuid::new_v4(), Utc::now())
    }

    #[test]
    fn test_cache_basic_operations() {
        let cache = MemoryCache::new();
        let key = CacheKey::cpf(Partition::Active, "462.789.844-40");
        let value = CachedValue::Customer(customer());

        cache.put(key.clone(), value.clone(), cache.generation());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key), Some(value));

        cache.evict_all();
        assert!(cache.is_empty());
        assert!(cache.get(&key).is_none());
    }

    #[test]
    fn test_partitions_do_not_share_keys() {
        let cache = MemoryCache::new();
        let request = PageRequest::default();
        let page = Page::new(vec![customer()], request, 1);

        cache.put(CacheKey::page(Partition::Active, request), CachedValue::Page(page), cache.generation());
        assert!(cache.get(&CacheKey::page(Partition::Inactive, request)).is_none());
        assert!(cache.get(&CacheKey::page(Partition::Active, request)).is_some());
    }

    #[test]
    fn test_returned_value_is_detached() {
        let cache = MemoryCache::new();
        let key = CacheKey::cpf(Partition::Active, "462.789.844-40");
        cache.put(key.clone(), CachedValue::Customer(customer()), cache.generation());

        if let Some(CachedValue::Customer(mut c)) = cache.get(&key) {
            c.name = "changed".to_string();
        }
        match cache.get(&key) {
            Some(CachedValue::Customer(c)) => assert_eq!(c.name, "Lucas Silva"),
            other => panic!("unexpected cache content: {:?}", other),
        }
    }

    #[test]
    fn test_put_after_eviction_is_dropped() {
        let cache = MemoryCache::new();
        let key = CacheKey::cpf(Partition::Active, "462.789.844-40");

        // value read from storage, then a write evicts before it is cached
        let generation = cache.generation();
        cache.evict_all();
        cache.put(key.clone(), CachedValue::Customer(customer()), generation);

        assert!(cache.get(&key).is_none());
        assert!(cache.is_empty());

        cache.put(key.clone(), CachedValue::Customer(customer()), cache.generation());
        assert!(cache.get(&key).is_some());
    }

    #[test]
    fn test_ttl_expiry() {
        let cache = MemoryCache::with_ttl(Some(Duration::from_millis(10)));
        let key = CacheKey::cpf(Partition::Active, "462.789.844-40");
        cache.put(key.clone(), CachedValue::Customer(customer()), cache.generation());

        std::thread::sleep(Duration::from_millis(30));
        assert!(cache.get(&key).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_ttl_disables_expiry() {
        let cache = MemoryCache::with_ttl(Some(Duration::ZERO));
        let key = CacheKey::cpf(Partition::Active, "462.789.844-40");
        cache.put(key.clone(), CachedValue::Customer(customer()), cache.generation());
        assert!(cache.get(&key).is_some());
    }
}
