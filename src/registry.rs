//! Driver identity registry for device discovery.
//!
//! Discovery matches sensor names against the identities registered here.
//! The table is owned by the platform integration and handed to whatever
//! performs discovery, instead of living in process-global state; a module
//! registers its identity once at startup and removes it once at teardown.

use heapless::Vec;

/// Maximum number of driver identities one table holds.
pub const MAX_DRIVERS: usize = 8;

/// Errors adding a driver identity to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// The identity is already registered.
    Duplicate,
    /// The table is full.
    Full,
}

/// Table of driver identity strings known to device discovery.
#[derive(Default)]
pub struct DriverTable {
    entries: Vec<&'static str, MAX_DRIVERS>,
}

impl DriverTable {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a driver identity. Registering the same identity twice is
    /// an error; registration happens once per driver at module startup.
    pub fn register(&mut self, id: &'static str) -> Result<(), RegistryError> {
        if self.entries.iter().any(|entry| *entry == id) {
            return Err(RegistryError::Duplicate);
        }
        self.entries.push(id).map_err(|_| RegistryError::Full)
    }

    /// Remove a driver identity at module teardown. Returns whether the
    /// identity was present.
    pub fn unregister(&mut self, id: &str) -> bool {
        match self.entries.iter().position(|entry| *entry == id) {
            Some(idx) => {
                self.entries.swap_remove(idx);
                true
            }
            None => false,
        }
    }

    /// True when a discovered device name matches a registered driver.
    pub fn matches(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| *entry == name)
    }
}
