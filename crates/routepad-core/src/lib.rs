pub mod error;
pub mod mode;
pub mod route;
pub mod search;
pub mod translate;

pub use error::GeometryError;
pub use mode::{DrawingMode, DrawingTool};
pub use route::{LatLng, LineString, PersistedRoute, RouteDraft, RouteId, RouteSummary, UserId};
pub use search::{SearchRegion, SearchResult};
pub use translate::{from_persisted_path, to_draft_path, to_persisted_path, to_search_region};
