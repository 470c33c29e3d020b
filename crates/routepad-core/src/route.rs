//! Route types shared between the drawing surface and the route store.
//!
//! Two point representations coexist on purpose:
//!
//! - [`LatLng`] — the map provider's `{lat, lng}` object, used by drafts and
//!   everything drawn on screen.
//! - `[lng, lat]` — GeoJSON position order, used only inside [`LineString`]
//!   as persisted by the backend.
//!
//! Conversion between the two lives in [`crate::translate`] and nowhere else.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::translate::from_persisted_path;

/// A point in the map provider's native `{lat, lng}` form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Backend identifier for a stored route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(pub String);

/// Backend identifier for a user, as handed over by the login flow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RouteId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One entry in a user's route selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub id: RouteId,
    pub name: String,
}

/// An unsaved, in-memory route being edited.
///
/// `id` decides create versus update on save: `None` creates a new stored
/// route, `Some` overwrites the route with that id. Points are kept in draw
/// order and never deduplicated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteDraft {
    pub id: Option<RouteId>,
    pub name: Option<String>,
    pub path: Vec<LatLng>,
}

impl RouteDraft {
    /// An empty draft, as created when the user starts a new line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild an editable draft from a stored route, flipping axes once.
    pub fn from_persisted(route: &PersistedRoute) -> Self {
        Self {
            id: Some(route.id.clone()),
            name: Some(route.name.clone()),
            path: from_persisted_path(&route.path.coordinates),
        }
    }

    /// The draft's name with surrounding whitespace removed, if any remains.
    pub fn trimmed_name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineStringKind {
    #[default]
    LineString,
}

/// GeoJSON `LineString` geometry. Positions are `[lng, lat]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineString {
    #[serde(rename = "type")]
    pub kind: LineStringKind,
    pub coordinates: Vec<[f64; 2]>,
}

impl LineString {
    pub fn new(coordinates: Vec<[f64; 2]>) -> Self {
        Self {
            kind: LineStringKind::LineString,
            coordinates,
        }
    }
}

/// A backend-owned route snapshot. The client never mutates these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedRoute {
    #[serde(alias = "_id")]
    pub id: RouteId,
    pub name: String,
    pub path: LineString,
}
