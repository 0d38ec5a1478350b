//! Deferred post-install hooks
//!
//! Stages only record that a hook is needed; [`HookAggregator::fire_pending`]
//! runs each pending hook once and clears it. The aggregator is owned by the
//! install run and passed down explicitly.

use tracing::debug;

use crate::error::Result;
use crate::host::Host;

/// Batched side effects requested by install stages
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HookAggregator {
    doc_index: bool,
}

impl HookAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for the documentation index to be rebuilt
    pub fn request_doc_index(&mut self) {
        self.doc_index = true;
    }

    /// Whether any hook is waiting to run
    #[allow(dead_code)] // Used by tests
    pub fn is_pending(&self) -> bool {
        self.doc_index
    }

    /// Run every pending hook once.
    ///
    /// The flag is cleared before the hook runs. Returns the names of the
    /// hooks that ran.
    pub fn fire_pending(&mut self, host: &mut dyn Host) -> Result<Vec<&'static str>> {
        let mut fired = Vec::new();

        if std::mem::take(&mut self.doc_index) {
            debug!("Firing documentation index hook");
            host.rebuild_doc_index()?;
            fired.push("man-db");
        }

        Ok(fired)
    }
}
