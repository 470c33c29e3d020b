use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("path needs at least 2 points, got {0}")]
    TooFewPoints(usize),

    #[error("non-finite coordinate ({lat}, {lng})")]
    NonFinite { lat: f64, lng: f64 },

    #[error("north-east corner latitude {ne_lat} is south of south-west latitude {sw_lat}")]
    InvertedBounds { ne_lat: f64, sw_lat: f64 },
}
