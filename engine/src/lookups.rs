//! Fetch-if-absent loading of lookup collections into the cache.

use std::sync::Arc;

use medalliance_backend::LookupSource;
use medalliance_core::LookupCache;
use medalliance_types::LookupKind;

pub struct LookupLoader {
    source: Arc<dyn LookupSource>,
}

impl LookupLoader {
    pub fn new(source: Arc<dyn LookupSource>) -> Self {
        Self { source }
    }

    /// Fetch `kind` unless it is already cached or in flight.
    ///
    /// Returns whether entries are available afterwards. Failures are recorded
    /// in the cache and logged; they leave the collection empty.
    pub async fn ensure(&self, kind: LookupKind, cache: &mut LookupCache) -> bool {
        if !cache.needs_fetch(kind) {
            return !cache.entries(kind).is_empty();
        }
        self.refresh(kind, cache).await
    }

    /// Fetch `kind` unconditionally, replacing whatever is cached.
    pub async fn refresh(&self, kind: LookupKind, cache: &mut LookupCache) -> bool {
        cache.begin_loading(kind);
        match self.source.fetch_lookup(kind).await {
            Ok(entries) => {
                let available = !entries.is_empty();
                cache.store(kind, entries);
                available
            }
            Err(err) => {
                tracing::warn!(kind = %kind, error = %err, "lookup fetch failed");
                cache.fail(kind, err.message());
                false
            }
        }
    }

    /// Load every collection in turn.
    pub async fn ensure_all(&self, cache: &mut LookupCache) {
        for kind in LookupKind::ALL {
            self.ensure(kind, cache).await;
        }
    }
}
