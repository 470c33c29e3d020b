use routepad_core::{DrawingTool, LatLng};

/// Opaque id of something the map provider has rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayStyle {
    /// The route being edited, or a loaded route.
    Route,
    /// A line returned by the area search.
    SearchResult,
}

/// Commands the core sends to the map provider.
pub trait MapSurface {
    /// Enable exactly one drawing tool, or none.
    fn arm_tool(&mut self, tool: Option<DrawingTool>);

    /// Drop any shape the user has started but not completed.
    fn discard_in_progress(&mut self);

    fn draw_polyline(&mut self, path: &[LatLng], style: OverlayStyle) -> OverlayHandle;

    fn remove_overlay(&mut self, handle: OverlayHandle);
}

/// Callbacks the map provider delivers, once per gesture.
///
/// After a `*Complete` event the provider's tool is inert until re-armed.
/// The completed shape stays rendered under `handle`.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderEvent {
    ShapeStarted(DrawingTool),
    PolylineComplete {
        handle: OverlayHandle,
        points: Vec<LatLng>,
    },
    RectangleComplete {
        handle: OverlayHandle,
        ne: LatLng,
        sw: LatLng,
    },
}
