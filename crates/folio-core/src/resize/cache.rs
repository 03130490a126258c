use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

/// Source URL → resized data URL.
///
/// Values are shared `Arc<str>`s, so a hit hands back the very same
/// allocation that was stored. Unbounded unless built with a capacity, in
/// which case the oldest insertion is evicted first.
#[derive(Debug, Default)]
pub struct ImageCache {
    inner: Mutex<CacheInner>,
    capacity: Option<usize>,
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<String, Arc<str>>,
    order: VecDeque<String>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            inner: Mutex::default(),
            capacity: capacity.filter(|&c| c > 0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Exact-match lookup.
    pub fn get(&self, src: &str) -> Option<Arc<str>> {
        self.lock().entries.get(src).cloned()
    }

    /// Store a result. If another resize already stored `src`, that entry
    /// wins and is returned.
    pub fn insert(&self, src: &str, data_url: String) -> Arc<str> {
        let mut inner = self.lock();
        if let Some(existing) = inner.entries.get(src) {
            return existing.clone();
        }

        if let Some(cap) = self.capacity {
            while inner.entries.len() >= cap {
                let Some(oldest) = inner.order.pop_front() else {
                    break;
                };
                inner.entries.remove(&oldest);
            }
        }

        let value: Arc<str> = Arc::from(data_url);
        inner.entries.insert(src.to_string(), value.clone());
        inner.order.push_back(src.to_string());
        value
    }

    pub fn contains(&self, src: &str) -> bool {
        self.lock().entries.contains_key(src)
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
