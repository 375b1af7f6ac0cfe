//! Activity catalog snapshot.
//!
//! Loaded once per wizard session. A deep link may pre-select one
//! activity, in which case the selector stays locked for the rest of
//! the session.

use async_trait::async_trait;

use crate::domain::Activity;
use crate::error::CoreError;
use crate::types::DbId;

/// Catalog collaborator; returns only currently active activities.
#[async_trait]
pub trait ActivityCatalog: Send + Sync {
    async fn list_active(&self) -> Result<Vec<Activity>, CoreError>;
}

#[async_trait]
impl<C: ActivityCatalog + ?Sized> ActivityCatalog for std::sync::Arc<C> {
    async fn list_active(&self) -> Result<Vec<Activity>, CoreError> {
        (**self).list_active().await
    }
}

/// The activities offered to the current session, sorted by name.
#[derive(Debug, Clone)]
pub struct CatalogState {
    activities: Vec<Activity>,
    locked_id: Option<DbId>,
}

impl CatalogState {
    /// Fetch the active catalog. A `deep_link` id that exists in the
    /// catalog pre-selects that activity and locks the selector; an
    /// unknown id is ignored.
    pub async fn load<C>(catalog: &C, deep_link: Option<DbId>) -> Result<Self, CoreError>
    where
        C: ActivityCatalog + ?Sized,
    {
        let mut activities = catalog.list_active().await?;
        activities.sort_by(|a, b| a.nama_kegiatan.cmp(&b.nama_kegiatan));

        let locked_id = deep_link.filter(|id| activities.iter().any(|a| a.id == *id));
        if deep_link.is_some() && locked_id.is_none() {
            tracing::warn!(?deep_link, "Deep-linked activity not in active catalog, ignoring");
        }

        Ok(Self {
            activities,
            locked_id,
        })
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn find(&self, id: DbId) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    /// The deep-linked activity, when one locked the selector.
    pub fn locked(&self) -> Option<&Activity> {
        self.locked_id.and_then(|id| self.find(id))
    }

    pub fn is_locked(&self) -> bool {
        self.locked_id.is_some()
    }
}
