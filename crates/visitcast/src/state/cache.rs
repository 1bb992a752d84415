//! Version-stamped cache for derived view data.
//!
//! `AppState` bumps its parameter version on every edit; anything derived
//! from the parameters is stored here together with the version it was
//! computed at and is recomputed once that version goes stale.

#[derive(Debug)]
pub struct CachedValue<T> {
    value: Option<T>,
    computed_at_version: u64,
}

impl<T> Default for CachedValue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CachedValue<T> {
    pub const fn new() -> Self {
        Self {
            value: None,
            computed_at_version: 0,
        }
    }

    /// The cached value if it was computed at `current_version`
    pub fn get(&self, current_version: u64) -> Option<&T> {
        if self.computed_at_version == current_version {
            self.value.as_ref()
        } else {
            None
        }
    }

    pub fn set(&mut self, value: T, version: u64) {
        self.value = Some(value);
        self.computed_at_version = version;
    }

    pub fn is_stale(&self, current_version: u64) -> bool {
        self.value.is_none() || self.computed_at_version != current_version
    }

    /// Recompute with `compute` when stale; returns whether it ran
    pub fn refresh(&mut self, version: u64, compute: impl FnOnce() -> T) -> bool {
        if !self.is_stale(version) {
            return false;
        }
        self.set(compute(), version);
        true
    }
}
