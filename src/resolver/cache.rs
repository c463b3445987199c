use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::trace;

type Slot = Arc<Mutex<Option<String>>>;

/// Successful license lookups, keyed by the directory the license was found in.
///
/// The map lock is only held long enough to fetch the slot of one directory.
/// Classification then runs under that slot's lock, so two threads missing on
/// the same directory classify it once and lookups of other directories are
/// not blocked by the filesystem access. A failed classification removes the
/// slot again unless another thread is waiting on it. Licenses are never
/// evicted.
#[derive(Debug, Default)]
pub struct LicenseCache {
    slots: Mutex<HashMap<PathBuf, Slot>>,
}

impl LicenseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, dir: &Path) -> Option<String> {
        let slot = lock(&self.slots).get(dir).cloned()?;
        let license = lock(&slot).clone();
        license
    }

    /// Return the cached license of `dir`, or run `classify` and remember its
    /// result if it succeeds.
    pub fn get_or_classify<F, E>(&self, dir: &Path, classify: F) -> Result<String, E>
    where
        F: FnOnce() -> Result<String, E>,
    {
        let slot = lock(&self.slots)
            .entry(dir.to_path_buf())
            .or_default()
            .clone();

        let mut entry = lock(&slot);
        if let Some(license) = entry.as_ref() {
            trace!(dir = %dir.display(), license = %license, "license cache hit");
            return Ok(license.clone());
        }

        match classify() {
            Ok(license) => {
                *entry = Some(license.clone());
                Ok(license)
            }
            Err(err) => {
                drop(entry);
                self.discard_empty(dir, &slot);
                Err(err)
            }
        }
    }

    /// Remove the slot of `dir` if it holds no license and only the map and
    /// the caller still reference it. Other threads clone slots under the map
    /// lock, so the count cannot grow while it is held.
    fn discard_empty(&self, dir: &Path, slot: &Slot) {
        let mut slots = lock(&self.slots);
        let unshared = slots
            .get(dir)
            .is_some_and(|current| Arc::ptr_eq(current, slot) && Arc::strong_count(slot) == 2);
        if unshared && lock(slot).is_none() {
            slots.remove(dir);
        }
    }

    /// Number of directories with a cached license.
    pub fn len(&self) -> usize {
        let slots: Vec<Slot> = lock(&self.slots).values().cloned().collect();
        slots.iter().filter(|slot| lock(slot).is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
