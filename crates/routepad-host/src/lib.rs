//! Route editing host: binds the pure core and the sync clients to an opaque
//! map provider.
//!
//! The map engine is reached only through [`MapSurface`] (commands going out)
//! and [`ProviderEvent`] (gestures coming back). Everything the provider
//! renders is an [`OverlayHandle`] owned by whichever component created it.
//!
//! Network calls come back as [`routepad_sync::Pending`] values that borrow
//! nothing, so the embedding UI keeps handling gestures while they are in
//! flight and applies each outcome when it lands.

mod bridge;
mod drawing;
mod session;
mod surface;
mod workspace;

#[cfg(test)]
mod testing;

pub use bridge::{AreaSearchBridge, PendingSearch};
pub use drawing::{DrawingModeController, ShapeEvent};
pub use session::{MAX_NOTICES, Notice, NoticeLevel, SaveTicket, SessionContext};
pub use surface::{MapSurface, OverlayHandle, OverlayStyle, ProviderEvent};
pub use workspace::RouteWorkspace;
