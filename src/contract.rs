// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! The host-facing lifecycle contract.
//!
//! A [`DataSource`] answers a lookup; a [`Resource`] is created, read, updated,
//! deleted and imported. Each operation takes the host's view of the state and
//! returns the new state, or an error that leaves the host state unchanged.

use crate::errors::ResourceError;
use crate::schema::Schema;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Outcome of reading a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome<M> {
    /// The remote object exists; this is its refreshed state
    Present(M),
    /// The remote object is gone; the host drops it from state
    Removed,
}

impl<M> ReadOutcome<M> {
    /// The refreshed state, if the object still exists.
    pub fn into_present(self) -> Option<M> {
        match self {
            Self::Present(model) => Some(model),
            Self::Removed => None,
        }
    }
}

/// A read-only lookup.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// State model of the data source.
    type Model: Serialize + DeserializeOwned + Send + Sync;

    /// Type name suffix appended to the provider type name.
    fn type_suffix(&self) -> &'static str;

    /// Attribute schema.
    fn schema(&self) -> Schema;

    /// Resolve the lookup for the given configuration.
    async fn read(&self, config: Self::Model) -> Result<Self::Model, ResourceError>;
}

/// A managed remote object.
#[async_trait]
pub trait Resource: Send + Sync {
    /// State model of the resource.
    type Model: Serialize + DeserializeOwned + Send + Sync;

    /// Type name suffix appended to the provider type name.
    fn type_suffix(&self) -> &'static str;

    /// Attribute schema.
    fn schema(&self) -> Schema;

    /// Create the object from the planned state.
    async fn create(&self, planned: Self::Model) -> Result<Self::Model, ResourceError>;

    /// Refresh the state from the remote object.
    async fn read(&self, state: Self::Model) -> Result<ReadOutcome<Self::Model>, ResourceError>;

    /// Apply in-place changes from `prior` to `planned`.
    async fn update(
        &self,
        prior: Self::Model,
        planned: Self::Model,
    ) -> Result<Self::Model, ResourceError>;

    /// Destroy the object.
    async fn delete(&self, state: Self::Model) -> Result<(), ResourceError>;

    /// Build an initial state from an external ID. The host reads it next.
    fn import_state(&self, id: &str) -> Result<Self::Model, ResourceError>;
}
