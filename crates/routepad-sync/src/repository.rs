//! Client-side interface to the remote route store.

use async_trait::async_trait;
use routepad_core::{
    LineString, PersistedRoute, RouteDraft, RouteId, RouteSummary, UserId, to_persisted_path,
};

use crate::{BackendError, ClientError};

/// A user's profile as the route selector needs it.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRoutes {
    pub username: String,
    pub routes: Vec<RouteSummary>,
}

/// Remote route store.
///
/// Calls are independent and unsynchronised: two overlapping `upsert`s for
/// the same user are not serialised, and whichever response lands last
/// determines what the caller ends up showing.
#[async_trait]
pub trait RouteRepository: Send + Sync {
    /// Route summaries for `user`. Fails `NotFound` for an unknown user.
    async fn list_for_user(&self, user: &UserId) -> Result<UserRoutes, ClientError>;

    /// One stored route. Fails `NotFound` for an unknown id.
    async fn get(&self, route: &RouteId) -> Result<PersistedRoute, ClientError>;

    /// Create (`draft.id == None`) or overwrite (`draft.id == Some`) a route.
    ///
    /// Implementations must call [`validate_draft`] before any I/O.
    async fn upsert(&self, user: &UserId, draft: &RouteDraft) -> Result<RouteId, ClientError>;
}

/// Check a draft is saveable and convert it to wire form.
///
/// Returns the trimmed name and the `[lng, lat]` line string.
pub fn validate_draft(draft: &RouteDraft) -> Result<(String, LineString), ClientError> {
    let name = draft
        .trimmed_name()
        .ok_or_else(|| BackendError::Validation("route name is required".into()))?;
    if draft.path.len() < 2 {
        return Err(BackendError::Validation(format!(
            "route needs at least 2 points, got {}",
            draft.path.len()
        ))
        .into());
    }
    if let Some(p) = draft.path.iter().find(|p| !p.is_finite()) {
        return Err(BackendError::Validation(format!(
            "route contains a non-finite point ({}, {})",
            p.lat, p.lng
        ))
        .into());
    }
    let line = to_persisted_path(&draft.path)?;
    Ok((name.to_string(), line))
}
