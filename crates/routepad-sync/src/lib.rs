//! Sync layer: route store HTTP client and the legacy SOAP area search service.

mod config;
mod error;
pub mod http;
mod pending;
pub mod repository;
pub mod search;
pub mod soap;

pub use config::{ClientConfig, ConfigError};
pub use error::{BackendError, ClientError};
pub use http::HttpRouteRepository;
pub use pending::{Pending, Resolved};
pub use repository::{RouteRepository, UserRoutes, validate_draft};
pub use search::{AreaSearchService, SoapSearchClient};
