use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use common::prelude::Namespace;

use crate::ServiceConfig;

/// Shared daemon state handed to every request handler.
///
/// The whole namespace sits behind one lock: mutations take it
/// exclusively, reads share it. Guards are never held across an await.
#[derive(Clone, Default)]
pub struct State {
    namespace: Arc<RwLock<Namespace>>,
}

impl State {
    pub fn new(namespace: Namespace) -> Self {
        Self {
            namespace: Arc::new(RwLock::new(namespace)),
        }
    }

    /// Fresh state for a daemon run. The namespace always starts empty.
    pub fn from_config(config: &ServiceConfig) -> Self {
        tracing::info!(api_port = config.api_port, "starting with an empty namespace");
        Self::default()
    }

    /// Handle to the lock itself, for callers that need timed acquisition
    pub fn namespace(&self) -> &Arc<RwLock<Namespace>> {
        &self.namespace
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Namespace> {
        self.namespace.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Namespace> {
        self.namespace.write()
    }
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_one_namespace() {
        let state = State::default();
        let other = state.clone();

        state.write().create("", "drive", "C").unwrap();
        assert_eq!(other.read().drives(), vec!["C"]);
    }
}
