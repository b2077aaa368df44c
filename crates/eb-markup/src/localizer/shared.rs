//! Exactly-once shared localizer.
//!
//! The process-wide localizer is built on first request. Callers that race on
//! the first request wait for the one in flight and receive the same
//! instance. Later requests return that instance and ignore their path.

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use super::Localizer;
use super::source::{DocumentSource, FileSource};
use crate::error::LocalizeError;

/// Slot holding a localizer built at most once.
///
/// Reads after initialization take a shared lock only long enough to clone
/// the [`Arc`]; resolution itself runs without any lock. A failed build
/// leaves the slot empty so the next request tries again.
#[derive(Debug, Default)]
pub struct LocalizerCell {
    slot: RwLock<Option<Arc<Localizer>>>,
    init_lock: Mutex<()>,
}

impl LocalizerCell {
    /// Create an empty cell.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: RwLock::new(None),
            init_lock: Mutex::new(()),
        }
    }

    /// The localizer, if one has been built.
    #[must_use]
    pub fn get(&self) -> Option<Arc<Localizer>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(Arc::clone)
    }

    /// Return the localizer, building it from `source` if the cell is empty.
    ///
    /// Uses double-checked locking: concurrent first callers serialize on the
    /// init lock and only the first one reads `source`.
    ///
    /// # Errors
    ///
    /// Returns the build error if this call performed the build and it failed.
    pub fn get_or_load(&self, source: &dyn DocumentSource) -> Result<Arc<Localizer>, LocalizeError> {
        if let Some(localizer) = self.get() {
            tracing::debug!(origin = localizer.origin(), "Reusing shared localizer");
            return Ok(localizer);
        }

        let _guard = self.init_lock.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(localizer) = self.get() {
            return Ok(localizer);
        }

        let localizer = Arc::new(Localizer::from_source(source)?);
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&localizer));
        Ok(localizer)
    }

    /// Empty the cell so the next request builds a fresh localizer.
    #[cfg(any(test, feature = "testing"))]
    pub fn reset(&self) {
        let _guard = self.init_lock.lock().unwrap_or_else(PoisonError::into_inner);
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

static SHARED: LocalizerCell = LocalizerCell::new();

/// Process-wide localizer, loaded from `path` on first use.
///
/// Once loaded, later calls return the same instance regardless of `path`.
///
/// # Errors
///
/// Returns [`LocalizeError`] if this call loaded the document and loading
/// failed. The next call retries.
pub fn shared_localizer(path: impl AsRef<Path>) -> Result<Arc<Localizer>, LocalizeError> {
    SHARED.get_or_load(&FileSource::new(path.as_ref()))
}

/// Process-wide localizer if it has already been loaded.
#[must_use]
pub fn current_localizer() -> Option<Arc<Localizer>> {
    SHARED.get()
}

/// Clear the process-wide localizer.
#[cfg(any(test, feature = "testing"))]
pub fn reset_shared_localizer() {
    SHARED.reset();
}

#[cfg(test)]
mod tests {
    use std::sync::Barrier;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use pretty_assertions::assert_eq;

    static_assertions::assert_impl_all!(LocalizerCell: Send, Sync);

    /// Serializes tests touching the process-wide cell.
    static SHARED_TEST_LOCK: Mutex<()> = Mutex::new(());

    struct CountingSource {
        content: &'static str,
        reads: AtomicUsize,
    }

    impl CountingSource {
        fn new(content: &'static str) -> Self {
            Self {
                content,
                reads: AtomicUsize::new(0),
            }
        }

        fn reads(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }
    }

    impl DocumentSource for CountingSource {
        fn origin(&self) -> String {
            "counting".to_owned()
        }

        fn read(&self) -> Result<Vec<u8>, LocalizeError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(20));
            Ok(self.content.as_bytes().to_vec())
        }
    }

    const DOCUMENT: &str = r#"{"COMBAT": {"Begin": "Begin Encounter"}}"#;

    #[test]
    fn test_get_on_empty_cell() {
        assert!(LocalizerCell::new().get().is_none());
    }

    #[test]
    fn test_second_load_returns_same_instance() {
        let cell = LocalizerCell::new();
        let source = CountingSource::new(DOCUMENT);
        let other = CountingSource::new("{}");

        let first = cell.get_or_load(&source).unwrap();
        let second = cell.get_or_load(&other).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.reads(), 1);
        assert_eq!(other.reads(), 0);
        assert_eq!(second.resolve("@Localize[COMBAT.Begin]"), "Begin Encounter");
    }

    #[test]
    fn test_concurrent_first_loads_read_once() {
        const THREADS: usize = 100;

        let cell = LocalizerCell::new();
        let source = CountingSource::new(DOCUMENT);
        let barrier = Barrier::new(THREADS);
        let (cell, source, barrier) = (&cell, &source, &barrier);

        let instances: Vec<Arc<Localizer>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    scope.spawn(move || {
                        barrier.wait();
                        cell.get_or_load(source).unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(source.reads(), 1);
        assert!(instances.iter().all(|l| Arc::ptr_eq(l, &instances[0])));
    }

    #[test]
    fn test_failed_load_leaves_cell_empty() {
        let cell = LocalizerCell::new();
        let bad = CountingSource::new("[1, 2, 3]");

        let err = cell.get_or_load(&bad).unwrap_err();
        assert!(matches!(err, LocalizeError::MalformedDocument { .. }));
        assert!(cell.get().is_none());

        let good = CountingSource::new(DOCUMENT);
        assert!(cell.get_or_load(&good).is_ok());
        assert_eq!(good.reads(), 1);
    }

    #[test]
    fn test_reset_allows_rebuild() {
        let cell = LocalizerCell::new();
        let first = cell.get_or_load(&CountingSource::new(DOCUMENT)).unwrap();

        cell.reset();
        assert!(cell.get().is_none());

        let second = cell.get_or_load(&CountingSource::new("{}")).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_shared_localizer_ignores_later_paths() {
        let _lock = SHARED_TEST_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        reset_shared_localizer();

        let dir = tempfile::tempdir().unwrap();
        let first_path = dir.path().join("en.json");
        let second_path = dir.path().join("de.json");
        std::fs::write(&first_path, DOCUMENT).unwrap();
        std::fs::write(&second_path, r#"{"COMBAT": {"Begin": "Begegnung beginnen"}}"#).unwrap();

        let first = shared_localizer(&first_path).unwrap();
        let second = shared_localizer(&second_path).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.resolve("@Localize[COMBAT.Begin]"), "Begin Encounter");
        assert!(current_localizer().is_some_and(|l| Arc::ptr_eq(&l, &first)));

        reset_shared_localizer();
    }

    #[test]
    fn test_shared_localizer_errors_then_retries() {
        let _lock = SHARED_TEST_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        reset_shared_localizer();

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let invalid = dir.path().join("invalid.json");
        let valid = dir.path().join("valid.json");
        std::fs::write(&invalid, r#"{"invalid": json}"#).unwrap();
        std::fs::write(&valid, DOCUMENT).unwrap();

        let err = shared_localizer(&missing).unwrap_err();
        assert!(matches!(err, LocalizeError::FileNotReadable { .. }));

        let err = shared_localizer(&invalid).unwrap_err();
        assert!(matches!(err, LocalizeError::MalformedDocument { .. }));
        assert!(current_localizer().is_none());

        assert!(shared_localizer(&valid).is_ok());

        reset_shared_localizer();
    }
}
