#![forbid(unsafe_code)]

//! LRU cache for pixel measurements.
//!
//! Wrapping measures many overlapping prefixes of the same lines, and the
//! scrollbar double pass and every subsequent frame measure them again. This
//! cache stores computed widths keyed by font, text and size.
//!
//! # Example
//! ```
//! use quire_core::FontId;
//! use quire_text::{MeasureCache, MonospaceFont};
//!
//! let mut font = MonospaceFont::new(FontId(1)).with_advance(1.0);
//! let mut cache = MeasureCache::new(64);
//!
//! assert_eq!(cache.measure(&mut font, "Hello", 10.0), 50);
//! assert_eq!(cache.measure(&mut font, "Hello", 10.0), 50);
//!
//! let stats = cache.stats();
//! assert_eq!(stats.hits, 1);
//! assert_eq!(stats.misses, 1);
//! ```

use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;

use lru::LruCache;
use quire_core::FontId;
use rustc_hash::FxHasher;

use crate::font::FontSource;

/// Default cache capacity.
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

/// Statistics about cache performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Current number of entries.
    pub size: usize,
    /// Maximum capacity.
    pub capacity: usize,
}

impl CacheStats {
    /// Calculate hit rate (0.0 to 1.0).
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache of measured widths.
///
/// Keys are 64-bit FxHash digests of `(font id, text, size)` rather than the
/// strings themselves.
#[derive(Debug)]
pub struct MeasureCache {
    cache: LruCache<u64, i32>,
    hits: u64,
    misses: u64,
}

impl MeasureCache {
    /// Create a new cache with the specified capacity (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Create a new cache with the default capacity.
    #[must_use]
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }

    /// Measure `text` with `font`, consulting the cache first.
    #[inline]
    pub fn measure(&mut self, font: &mut dyn FontSource, text: &str, size: f32) -> i32 {
        let id = font.id();
        self.get_or_compute_with(id, text, size, |text| font.measure(text, size))
    }

    /// Get a cached width or compute it with `compute`.
    pub fn get_or_compute_with<F>(&mut self, font: FontId, text: &str, size: f32, compute: F) -> i32
    where
        F: FnOnce(&str) -> i32,
    {
        let key = measure_key(font, text, size);

        if let Some(&width) = self.cache.get(&key) {
            self.hits += 1;
            return width;
        }

        self.misses += 1;
        let width = compute(text);
        self.cache.put(key, width);
        width
    }

    /// Peek at a cached width without updating LRU order.
    #[must_use]
    pub fn peek(&self, font: FontId, text: &str, size: f32) -> Option<i32> {
        self.cache.peek(&measure_key(font, text, size)).copied()
    }

    /// Drop every cached width. Called when the font or its size changes.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Reset statistics.
    pub fn reset_stats(&mut self) {
        self.hits = 0;
        self.misses = 0;
    }

    /// Get cache statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.cache.len(),
            capacity: self.cache.cap().get(),
        }
    }

    /// Get the current number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Check if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl Default for MeasureCache {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

#[inline]
fn measure_key(font: FontId, text: &str, size: f32) -> u64 {
    let mut hasher = FxHasher::default();
    font.hash(&mut hasher);
    text.hash(&mut hasher);
    size.to_bits().hash(&mut hasher);
    hasher.finish()
}
