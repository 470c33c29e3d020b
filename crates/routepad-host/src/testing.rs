//! In-test map provider and search double sharing one ordered event log.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use routepad_core::{DrawingTool, LatLng, SearchRegion, SearchResult};
use routepad_sync::{AreaSearchService, ClientError};

use crate::{MapSurface, OverlayHandle, OverlayStyle};

pub type EventLog = Arc<Mutex<Vec<String>>>;

pub fn log_entries(log: &EventLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

#[derive(Default)]
pub struct RecordingSurface {
    pub log: EventLog,
    pub armed: Option<DrawingTool>,
    pub overlays: BTreeMap<u64, (OverlayStyle, Vec<LatLng>)>,
    next_handle: u64,
}

impl RecordingSurface {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            next_handle: 1000,
            ..Default::default()
        }
    }

    /// Simulate the user finishing a shape: a new handle the provider rendered.
    pub fn user_shape(&mut self, points: Vec<LatLng>) -> OverlayHandle {
        self.next_handle += 1;
        self.overlays
            .insert(self.next_handle, (OverlayStyle::Route, points));
        self.armed = None;
        OverlayHandle(self.next_handle)
    }

    pub fn count(&self, style: OverlayStyle) -> usize {
        self.overlays.values().filter(|(s, _)| *s == style).count()
    }

    fn record(&self, entry: String) {
        self.log.lock().unwrap().push(entry);
    }
}

impl MapSurface for RecordingSurface {
    fn arm_tool(&mut self, tool: Option<DrawingTool>) {
        self.armed = tool;
        self.record(format!("arm {tool:?}"));
    }

    fn discard_in_progress(&mut self) {
        self.record("discard".into());
    }

    fn draw_polyline(&mut self, path: &[LatLng], style: OverlayStyle) -> OverlayHandle {
        self.next_handle += 1;
        self.overlays
            .insert(self.next_handle, (style, path.to_vec()));
        self.record(format!("draw {}", self.next_handle));
        OverlayHandle(self.next_handle)
    }

    fn remove_overlay(&mut self, handle: OverlayHandle) {
        self.overlays.remove(&handle.0);
        self.record(format!("remove {}", handle.0));
    }
}

/// Area search double that replays scripted outcomes and logs each request.
pub struct ScriptedSearch {
    log: EventLog,
    outcomes: Mutex<VecDeque<Result<Vec<SearchResult>, ClientError>>>,
}

impl ScriptedSearch {
    pub fn new(log: EventLog, outcomes: Vec<Result<Vec<SearchResult>, ClientError>>) -> Self {
        Self {
            log,
            outcomes: Mutex::new(outcomes.into()),
        }
    }
}

#[async_trait]
impl AreaSearchService for ScriptedSearch {
    async fn search(&self, _region: &SearchRegion) -> Result<Vec<SearchResult>, ClientError> {
        self.log.lock().unwrap().push("request".into());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted search")
    }
}
