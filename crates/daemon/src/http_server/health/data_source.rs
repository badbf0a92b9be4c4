use std::fmt::Debug;
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;

use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use http::request::Parts;
use parking_lot::RwLock;

use common::prelude::Namespace;

use crate::ServiceState;

/// How long readiness waits for a turn on the namespace lock
const LOCK_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

#[async_trait]
pub trait DataSource {
    /// Perform various checks on the system to ensure its healthy and ready to accept requests.
    async fn is_ready(&self) -> Result<(), DataSourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DataSourceError {
    #[error("one or more dependent services aren't available")]
    DependencyFailure,
}

pub type DynDataSource = Arc<dyn DataSource + Send + Sync>;

pub struct StateDataSource(DynDataSource);

impl Debug for StateDataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateDataSource").finish()
    }
}

impl StateDataSource {
    #[cfg(test)]
    pub fn new(dds: DynDataSource) -> Self {
        Self(dds)
    }
}

impl Deref for StateDataSource {
    type Target = DynDataSource;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Ready when a shared guard on the namespace can be taken in bounded time
struct NamespaceSource {
    namespace: Arc<RwLock<Namespace>>,
}

#[async_trait]
impl DataSource for NamespaceSource {
    async fn is_ready(&self) -> Result<(), DataSourceError> {
        let namespace = self.namespace.clone();
        // a writer can hold the lock for a while; wait off the runtime threads
        let acquired = tokio::task::spawn_blocking(move || {
            namespace.try_read_for(LOCK_PROBE_TIMEOUT).is_some()
        })
        .await
        .map_err(|_| DataSourceError::DependencyFailure)?;

        if acquired {
            Ok(())
        } else {
            tracing::warn!("namespace lock not available for readiness probe");
            Err(DataSourceError::DependencyFailure)
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for StateDataSource
where
    ServiceState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ();

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = ServiceState::from_ref(state);
        Ok(StateDataSource(Arc::new(NamespaceSource {
            namespace: state.namespace().clone(),
        })))
    }
}
