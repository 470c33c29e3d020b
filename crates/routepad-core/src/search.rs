//! Area search types.

use serde::{Deserialize, Serialize};

use crate::GeometryError;
use crate::route::LatLng;

/// A bounding rectangle defined by its north-east and south-west corners.
///
/// The other two corners are always derived, never stored, so a region
/// cannot describe a non-rectangular quad. Deserializing goes through
/// [`SearchRegion::new`], so decoded regions are validated too.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RegionBounds")]
pub struct SearchRegion {
    ne: LatLng,
    sw: LatLng,
}

/// Unchecked wire form of [`SearchRegion`].
#[derive(Deserialize)]
struct RegionBounds {
    ne: LatLng,
    sw: LatLng,
}

impl TryFrom<RegionBounds> for SearchRegion {
    type Error = GeometryError;

    fn try_from(bounds: RegionBounds) -> Result<Self, Self::Error> {
        Self::new(bounds.ne, bounds.sw)
    }
}

impl SearchRegion {
    /// Build a region from provider bounds.
    ///
    /// Longitudes are not ordered: a rectangle may cross the antimeridian,
    /// in which case `ne.lng < sw.lng`.
    pub fn new(ne: LatLng, sw: LatLng) -> Result<Self, GeometryError> {
        for p in [ne, sw] {
            if !p.is_finite() {
                return Err(GeometryError::NonFinite {
                    lat: p.lat,
                    lng: p.lng,
                });
            }
        }
        if ne.lat < sw.lat {
            return Err(GeometryError::InvertedBounds {
                ne_lat: ne.lat,
                sw_lat: sw.lat,
            });
        }
        Ok(Self { ne, sw })
    }

    pub fn ne(&self) -> LatLng {
        self.ne
    }

    pub fn sw(&self) -> LatLng {
        self.sw
    }

    pub fn nw(&self) -> LatLng {
        LatLng::new(self.ne.lat, self.sw.lng)
    }

    pub fn se(&self) -> LatLng {
        LatLng::new(self.sw.lat, self.ne.lng)
    }

    /// All four corners in request order: ne, nw, sw, se.
    pub fn corners(&self) -> [LatLng; 4] {
        [self.ne, self.nw(), self.sw, self.se()]
    }
}

/// One route returned by the legacy area search service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub external_id: String,
    pub name: String,
    pub path: Vec<LatLng>,
}
