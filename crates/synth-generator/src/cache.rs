//! Shared cache of compiled expressions.
//!
//! Compilation is a pure function of the source text, so compiled trees can
//! be shared by every request (and every thread) that uses the same source.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use synth_expr::{CompiledExpression, ExpressionError};

/// Default number of cached expressions.
pub const DEFAULT_CACHE_SIZE: usize = 256;

/// Bounded, thread-safe map from expression source to compiled expression.
///
/// When full, an arbitrary entry is evicted to make room. A capacity of
/// zero disables caching.
#[derive(Debug)]
pub struct ExpressionCache {
    entries: RwLock<HashMap<String, Arc<CompiledExpression>>>,
    capacity: usize,
}

impl ExpressionCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity,
        }
    }

    /// Return the cached compilation of `source`, compiling it on a miss.
    ///
    /// Compile errors are not cached.
    pub fn get_or_compile(&self, source: &str) -> Result<Arc<CompiledExpression>, ExpressionError> {
        {
            let entries = self.entries.read();
            if let Some(compiled) = entries.get(source) {
                return Ok(Arc::clone(compiled));
            }
        }

        let compiled = Arc::new(synth_expr::compile(source)?);
        if self.capacity == 0 {
            return Ok(compiled);
        }

        let mut entries = self.entries.write();

        // Another thread may have compiled the same source meanwhile
        if let Some(existing) = entries.get(source) {
            return Ok(Arc::clone(existing));
        }

        if entries.len() >= self.capacity {
            if let Some(victim) = entries.keys().next().cloned() {
                entries.remove(&victim);
            }
        }
        entries.insert(source.to_string(), Arc::clone(&compiled));
        Ok(compiled)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl Default for ExpressionCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_cache_hit_returns_same_tree() {
        let cache = ExpressionCache::new(4);
        let a = cache.get_or_compile("1 + 1").unwrap();
        let b = cache.get_or_compile("1 + 1").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_compile_errors_are_not_cached() {
        let cache = ExpressionCache::new(4);
        assert!(cache.get_or_compile("1 +").is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_eviction_keeps_size_bounded() {
        let cache = ExpressionCache::new(3);
        for i in 0..10 {
            cache.get_or_compile(&format!("{i} * 2")).unwrap();
        }
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.capacity(), 3);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_capacity_disables_caching() {
        let cache = ExpressionCache::new(0);
        cache.get_or_compile("record_index").unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_access() {
        let cache = Arc::new(ExpressionCache::new(16));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for j in 0..50 {
                        let source = format!("record_index + {}", (i + j) % 4);
                        cache.get_or_compile(&source).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 4);
    }
}
