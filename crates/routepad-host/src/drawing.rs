//! Drawing mode state machine.

use routepad_core::{
    DrawingMode, DrawingTool, GeometryError, LatLng, SearchRegion, to_draft_path,
    to_search_region,
};
use tracing::{debug, warn};

use crate::{MapSurface, OverlayHandle, OverlayStyle, ProviderEvent};

/// What a provider gesture means to the rest of the workspace.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeEvent {
    LineStarted,
    LineCompleted(Vec<LatLng>),
    RegionCompleted(SearchRegion),
}

/// Keeps exactly one drawing mode active and owns the user-drawn overlays.
///
/// `armed` tracks whether the provider's tool is live: it goes false when a
/// gesture completes (the provider turns inert) and true again on the next
/// `set_mode`. `in_progress` names the tool of a started, uncompleted shape.
#[derive(Debug, Default)]
pub struct DrawingModeController {
    mode: DrawingMode,
    armed: bool,
    in_progress: Option<DrawingTool>,
    line: Option<OverlayHandle>,
    rectangle: Option<OverlayHandle>,
}

impl DrawingModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> DrawingMode {
        self.mode
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Overlay of the displayed route line, if any.
    pub fn line_overlay(&self) -> Option<OverlayHandle> {
        self.line
    }

    /// Overlay of the last completed search rectangle, if any.
    pub fn rectangle_overlay(&self) -> Option<OverlayHandle> {
        self.rectangle
    }

    /// Switch to `target`, arming its tool on the provider.
    ///
    /// Any shape started but not completed under the previous mode is
    /// discarded. A discarded line also takes the displayed route line with
    /// it, since starting a line already emptied the draft path. Selecting
    /// the active mode changes nothing and discards nothing; if the tool went
    /// inert after a completed gesture it is armed again.
    pub fn set_mode(&mut self, target: DrawingMode, surface: &mut dyn MapSurface) {
        if target == self.mode {
            if !self.armed && target.tool().is_some() {
                surface.arm_tool(target.tool());
                self.armed = true;
                debug!(mode = ?target, "drawing tool re-armed");
            }
            return;
        }
        if let Some(tool) = self.in_progress.take() {
            surface.discard_in_progress();
            if tool == DrawingTool::Polyline {
                self.replace_line(None, surface);
            }
            debug!(mode = ?self.mode, tool = ?tool, "discarded in-progress shape");
        }
        surface.arm_tool(target.tool());
        self.armed = target.tool().is_some();
        debug!(from = ?self.mode, to = ?target, "drawing mode changed");
        self.mode = target;
    }

    fn accepts(&self, tool: DrawingTool) -> bool {
        self.armed && self.mode.tool() == Some(tool)
    }

    /// Interpret one provider callback.
    ///
    /// Completed shapes that do not match the armed tool are removed from the
    /// surface and ignored. A rectangle with invalid bounds is removed and
    /// reported as a [`GeometryError`].
    pub fn handle_event(
        &mut self,
        event: ProviderEvent,
        surface: &mut dyn MapSurface,
    ) -> Result<Option<ShapeEvent>, GeometryError> {
        match event {
            ProviderEvent::ShapeStarted(tool) => {
                if !self.accepts(tool) {
                    warn!(tool = ?tool, mode = ?self.mode, "ignoring shape start for unarmed tool");
                    return Ok(None);
                }
                self.in_progress = Some(tool);
                Ok(match tool {
                    DrawingTool::Polyline => Some(ShapeEvent::LineStarted),
                    DrawingTool::Rectangle => None,
                })
            }
            ProviderEvent::PolylineComplete { handle, points } => {
                if !self.accepts(DrawingTool::Polyline) {
                    warn!(mode = ?self.mode, "ignoring stray polyline");
                    surface.remove_overlay(handle);
                    return Ok(None);
                }
                self.finish_gesture();
                self.replace_line(Some(handle), surface);
                debug!(points = points.len(), "line completed");
                Ok(Some(ShapeEvent::LineCompleted(to_draft_path(&points))))
            }
            ProviderEvent::RectangleComplete { handle, ne, sw } => {
                if !self.accepts(DrawingTool::Rectangle) {
                    warn!(mode = ?self.mode, "ignoring stray rectangle");
                    surface.remove_overlay(handle);
                    return Ok(None);
                }
                self.finish_gesture();
                let region = match to_search_region(ne, sw) {
                    Ok(region) => region,
                    Err(e) => {
                        surface.remove_overlay(handle);
                        return Err(e);
                    }
                };
                if let Some(old) = self.rectangle.replace(handle) {
                    surface.remove_overlay(old);
                }
                Ok(Some(ShapeEvent::RegionCompleted(region)))
            }
        }
    }

    /// Show `path` as the route line, replacing whatever line was shown.
    pub fn show_path(&mut self, path: &[LatLng], surface: &mut dyn MapSurface) {
        self.replace_line(None, surface);
        if !path.is_empty() {
            self.line = Some(surface.draw_polyline(path, OverlayStyle::Route));
        }
    }

    /// Remove every user-drawn overlay and return to `Idle`.
    pub fn reset(&mut self, surface: &mut dyn MapSurface) {
        self.set_mode(DrawingMode::Idle, surface);
        self.replace_line(None, surface);
        if let Some(old) = self.rectangle.take() {
            surface.remove_overlay(old);
        }
    }

    fn finish_gesture(&mut self) {
        self.in_progress = None;
        self.armed = false;
    }

    fn replace_line(&mut self, handle: Option<OverlayHandle>, surface: &mut dyn MapSurface) {
        if let Some(old) = std::mem::replace(&mut self.line, handle) {
            surface.remove_overlay(old);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingSurface, log_entries};

    fn setup() -> (DrawingModeController, RecordingSurface) {
        (DrawingModeController::new(), RecordingSurface::new(Default::default()))
    }

    fn pts(points: &[(f64, f64)]) -> Vec<LatLng> {
        points.iter().map(|&(lat, lng)| LatLng::new(lat, lng)).collect()
    }

    fn line_done(handle: OverlayHandle, points: &[LatLng]) -> ProviderEvent {
        ProviderEvent::PolylineComplete {
            handle,
            points: points.to_vec(),
        }
    }

    #[test]
    fn starts_idle_and_unarmed() {
        let (ctl, _) = setup();
        assert_eq!(ctl.mode(), DrawingMode::Idle);
        assert!(!ctl.is_armed());
    }

    #[test]
    fn set_mode_arms_single_tool() {
        let (mut ctl, mut surface) = setup();
        ctl.set_mode(DrawingMode::DrawingLine, &mut surface);
        assert_eq!(surface.armed, Some(DrawingTool::Polyline));
        ctl.set_mode(DrawingMode::DrawingRectangle, &mut surface);
        assert_eq!(surface.armed, Some(DrawingTool::Rectangle));
        ctl.set_mode(DrawingMode::Idle, &mut surface);
        assert_eq!(surface.armed, None);
        assert!(!ctl.is_armed());
    }

    #[test]
    fn switching_mode_discards_in_progress_shape() {
        let (mut ctl, mut surface) = setup();
        ctl.set_mode(DrawingMode::DrawingLine, &mut surface);
        let started = ctl
            .handle_event(ProviderEvent::ShapeStarted(DrawingTool::Polyline), &mut surface)
            .unwrap();
        assert_eq!(started, Some(ShapeEvent::LineStarted));

        ctl.set_mode(DrawingMode::DrawingRectangle, &mut surface);
        let log = log_entries(&surface.log);
        let discard = log.iter().position(|e| e == "discard").unwrap();
        let arm = log.iter().position(|e| e == "arm Some(Rectangle)").unwrap();
        assert!(discard < arm);
    }

    #[test]
    fn discarded_line_takes_displayed_route_with_it() {
        let (mut ctl, mut surface) = setup();
        ctl.show_path(&pts(&[(45.5, -73.5), (45.6, -73.6)]), &mut surface);
        ctl.set_mode(DrawingMode::DrawingLine, &mut surface);
        ctl.handle_event(ProviderEvent::ShapeStarted(DrawingTool::Polyline), &mut surface)
            .unwrap();

        ctl.set_mode(DrawingMode::Idle, &mut surface);
        assert_eq!(ctl.line_overlay(), None);
        assert_eq!(surface.count(OverlayStyle::Route), 0);
    }

    #[test]
    fn discarded_rectangle_keeps_displayed_route() {
        let (mut ctl, mut surface) = setup();
        ctl.show_path(&pts(&[(45.5, -73.5), (45.6, -73.6)]), &mut surface);
        ctl.set_mode(DrawingMode::DrawingRectangle, &mut surface);
        ctl.handle_event(ProviderEvent::ShapeStarted(DrawingTool::Rectangle), &mut surface)
            .unwrap();

        ctl.set_mode(DrawingMode::Idle, &mut surface);
        assert!(log_entries(&surface.log).contains(&"discard".to_string()));
        assert!(ctl.line_overlay().is_some());
        assert_eq!(surface.count(OverlayStyle::Route), 1);
    }

    #[test]
    fn switching_without_in_progress_shape_discards_nothing() {
        let (mut ctl, mut surface) = setup();
        ctl.set_mode(DrawingMode::DrawingLine, &mut surface);
        ctl.set_mode(DrawingMode::Idle, &mut surface);
        assert!(!log_entries(&surface.log).contains(&"discard".to_string()));
    }

    #[test]
    fn same_mode_twice_keeps_completed_line() {
        let (mut ctl, mut surface) = setup();
        ctl.set_mode(DrawingMode::DrawingLine, &mut surface);
        let points = pts(&[(1.0, 1.0), (2.0, 2.0)]);
        let handle = surface.user_shape(points.clone());
        let event = ctl
            .handle_event(line_done(handle, &points), &mut surface)
            .unwrap();
        assert_eq!(event, Some(ShapeEvent::LineCompleted(points)));

        ctl.set_mode(DrawingMode::DrawingLine, &mut surface);
        assert_eq!(ctl.mode(), DrawingMode::DrawingLine);
        assert_eq!(ctl.line_overlay(), Some(handle));
        assert!(surface.overlays.contains_key(&handle.0));
        assert!(!log_entries(&surface.log).contains(&"discard".to_string()));
    }

    #[test]
    fn completion_leaves_tool_inert_until_toggled() {
        let (mut ctl, mut surface) = setup();
        ctl.set_mode(DrawingMode::DrawingLine, &mut surface);
        let handle = surface.user_shape(pts(&[(1.0, 1.0), (2.0, 2.0)]));
        ctl.handle_event(line_done(handle, &pts(&[(1.0, 1.0), (2.0, 2.0)])), &mut surface)
            .unwrap();
        assert!(!ctl.is_armed());
        assert_eq!(ctl.mode(), DrawingMode::DrawingLine);

        ctl.set_mode(DrawingMode::DrawingLine, &mut surface);
        assert!(ctl.is_armed());
        assert_eq!(surface.armed, Some(DrawingTool::Polyline));
    }

    #[test]
    fn second_line_replaces_first() {
        let (mut ctl, mut surface) = setup();
        let points = pts(&[(1.0, 1.0), (2.0, 2.0)]);

        ctl.set_mode(DrawingMode::DrawingLine, &mut surface);
        let first = surface.user_shape(points.clone());
        ctl.handle_event(line_done(first, &points), &mut surface)
            .unwrap();

        ctl.set_mode(DrawingMode::DrawingLine, &mut surface);
        let second = surface.user_shape(points.clone());
        ctl.handle_event(line_done(second, &points), &mut surface)
            .unwrap();

        assert!(!surface.overlays.contains_key(&first.0));
        assert_eq!(ctl.line_overlay(), Some(second));
    }

    #[test]
    fn stray_shape_removed_and_ignored() {
        let (mut ctl, mut surface) = setup();
        ctl.set_mode(DrawingMode::DrawingRectangle, &mut surface);
        let handle = surface.user_shape(pts(&[(1.0, 1.0), (2.0, 2.0)]));
        let event = ctl
            .handle_event(line_done(handle, &pts(&[(1.0, 1.0), (2.0, 2.0)])), &mut surface)
            .unwrap();
        assert_eq!(event, None);
        assert!(!surface.overlays.contains_key(&handle.0));
        assert!(ctl.is_armed());
    }

    #[test]
    fn rectangle_becomes_region() {
        let (mut ctl, mut surface) = setup();
        ctl.set_mode(DrawingMode::DrawingRectangle, &mut surface);
        let handle = surface.user_shape(vec![]);
        let event = ctl
            .handle_event(
                ProviderEvent::RectangleComplete {
                    handle,
                    ne: LatLng::new(45.0, -73.0),
                    sw: LatLng::new(44.0, -74.0),
                },
                &mut surface,
            )
            .unwrap();
        let Some(ShapeEvent::RegionCompleted(region)) = event else {
            panic!("expected region, got {event:?}");
        };
        assert_eq!(region.nw(), LatLng::new(45.0, -74.0));
        assert_eq!(ctl.rectangle_overlay(), Some(handle));
    }

    #[test]
    fn inverted_rectangle_is_geometry_error() {
        let (mut ctl, mut surface) = setup();
        ctl.set_mode(DrawingMode::DrawingRectangle, &mut surface);
        let handle = surface.user_shape(vec![]);
        let err = ctl
            .handle_event(
                ProviderEvent::RectangleComplete {
                    handle,
                    ne: LatLng::new(40.0, -73.0),
                    sw: LatLng::new(44.0, -74.0),
                },
                &mut surface,
            )
            .unwrap_err();
        assert!(matches!(err, GeometryError::InvertedBounds { .. }));
        assert!(!surface.overlays.contains_key(&handle.0));
        assert_eq!(ctl.rectangle_overlay(), None);
    }

    #[test]
    fn show_path_replaces_line() {
        let (mut ctl, mut surface) = setup();
        ctl.show_path(&pts(&[(1.0, 1.0), (2.0, 2.0)]), &mut surface);
        let first = ctl.line_overlay().unwrap();
        ctl.show_path(&pts(&[(3.0, 3.0), (4.0, 4.0)]), &mut surface);
        assert!(!surface.overlays.contains_key(&first.0));
        assert_eq!(surface.count(OverlayStyle::Route), 1);

        ctl.show_path(&[], &mut surface);
        assert_eq!(ctl.line_overlay(), None);
        assert_eq!(surface.count(OverlayStyle::Route), 0);
    }

    #[test]
    fn reset_clears_everything() {
        let (mut ctl, mut surface) = setup();
        ctl.show_path(&pts(&[(1.0, 1.0), (2.0, 2.0)]), &mut surface);
        ctl.set_mode(DrawingMode::DrawingRectangle, &mut surface);
        ctl.reset(&mut surface);
        assert_eq!(ctl.mode(), DrawingMode::Idle);
        assert!(surface.overlays.is_empty());
    }
}
