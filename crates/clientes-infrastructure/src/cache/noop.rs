//! Cache that never stores anything (`cache.enabled = false`)

use clientes_core::cache::{CacheKey, CachedValue, CustomerCache};

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl CustomerCache for NoopCache {
    fn get(&self, _key: &CacheKey) -> Option<CachedValue> {
        None
    }

    fn generation(&self) -> u64 {
        0
    }

    fn put(&self, _key: CacheKey, _value: CachedValue, _generation: u64) {}

    fn evict_all(&self) {}

    fn len(&self) -> usize {
        0
    }
}
