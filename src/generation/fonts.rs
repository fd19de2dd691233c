//! Font cache.
//!
//! Fonts are read from disk once per name and shared read-only for as long as the cache
//! lives. The cache is an ordinary owned object handed to the composer, so every test can
//! build its own.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use super::common::default_font_dirs;

const FONT_EXTENSION: &str = "ttf";

/// Lazily populated, never evicted font store.
pub struct FontCache {
    search_dirs: Vec<PathBuf>,
    fonts: RwLock<HashMap<String, Arc<[u8]>>>,
}

impl FontCache {
    /// Create a cache that searches `search_dirs` in order.
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self {
            search_dirs,
            fonts: RwLock::new(HashMap::new()),
        }
    }

    /// Create a cache over the standard deployment layouts plus an optional configured dir.
    pub fn with_default_locations(configured: Option<PathBuf>) -> Self {
        Self::new(default_font_dirs(configured.as_deref()))
    }

    /// Load a font by name.
    ///
    /// Returns an empty slice when no candidate file exists; callers treat that as
    /// "use the built-in font". Misses are not cached.
    pub fn load(&self, font_name: &str) -> Arc<[u8]> {
        if let Some(bytes) = self.fonts.read().get(font_name) {
            return bytes.clone();
        }

        // Two callers may both miss here and read the same file; the second insert
        // simply replaces identical bytes.
        match self.read_from_disk(font_name) {
            Some(bytes) => {
                let bytes: Arc<[u8]> = Arc::from(bytes);
                log::debug!("Font '{}' cached ({} bytes)", font_name, bytes.len());
                self.fonts
                    .write()
                    .insert(font_name.to_string(), bytes.clone());
                bytes
            }
            None => {
                log::warn!("Font not found: {}, using default font", font_name);
                Arc::from(Vec::new())
            }
        }
    }

    /// Number of fonts currently held.
    pub fn len(&self) -> usize {
        self.fonts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.read().is_empty()
    }

    fn read_from_disk(&self, font_name: &str) -> Option<Vec<u8>> {
        let file_name = format!("{}.{}", font_name, FONT_EXTENSION);

        for dir in &self.search_dirs {
            let path = dir.join(&file_name);
            if !path.is_file() {
                continue;
            }
            match fs::read(&path) {
                Ok(bytes) => return Some(bytes),
                Err(e) => {
                    log::warn!("Failed to read font {}: {}", path.display(), e);
                }
            }
        }

        None
    }
}

impl Default for FontCache {
    fn default() -> Self {
        Self::with_default_locations(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_font_returns_empty_bytes() {
        let cache = FontCache::new(vec![PathBuf::from("/nonexistent/fonts")]);
        let bytes = cache.load("Nope-Regular");
        assert!(bytes.is_empty());
        assert!(cache.is_empty());
    }
}
