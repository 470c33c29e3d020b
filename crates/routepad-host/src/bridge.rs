//! Area search overlay management.

use std::sync::Arc;

use routepad_core::{SearchRegion, SearchResult};
use routepad_sync::{AreaSearchService, ClientError, Pending, Resolved};
use tracing::{debug, info, warn};

use crate::{MapSurface, OverlayHandle, OverlayStyle};

/// An outstanding area search, tagged with its issue sequence number.
pub type PendingSearch = Pending<Vec<SearchResult>, u64>;

/// Runs area searches and owns the overlays of the current result set.
///
/// A search is split in two so nothing is borrowed while the request is in
/// flight: [`begin`](Self::begin) removes the old overlays and issues the
/// request, [`apply`](Self::apply) renders whatever comes back. Overlapping
/// searches are not serialized; the last response applied is what the map
/// shows, and a failure leaves the map empty.
pub struct AreaSearchBridge<S> {
    service: Arc<S>,
    results: Vec<SearchResult>,
    overlays: Vec<OverlayHandle>,
    issued: u64,
}

impl<S: AreaSearchService + 'static> AreaSearchBridge<S> {
    pub fn new(service: S) -> Self {
        Self {
            service: Arc::new(service),
            results: Vec::new(),
            overlays: Vec::new(),
            issued: 0,
        }
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn overlays(&self) -> &[OverlayHandle] {
        &self.overlays
    }

    /// Remove every result overlay and forget the result set.
    pub fn clear(&mut self, surface: &mut dyn MapSurface) {
        if !self.overlays.is_empty() {
            debug!(count = self.overlays.len(), "clearing search overlays");
        }
        for handle in self.overlays.drain(..) {
            surface.remove_overlay(handle);
        }
        self.results.clear();
    }

    /// Clear the current result set, then issue a search for `region`.
    pub fn begin(&mut self, region: SearchRegion, surface: &mut dyn MapSurface) -> PendingSearch {
        self.clear(surface);
        self.issued += 1;
        debug!(seq = self.issued, "area search issued");

        let service = Arc::clone(&self.service);
        Pending::new(self.issued, async move { service.search(&region).await })
    }

    /// Replace the displayed result set with a search outcome.
    pub fn apply(
        &mut self,
        resolved: Resolved<Vec<SearchResult>, u64>,
        surface: &mut dyn MapSurface,
    ) -> Result<&[SearchResult], ClientError> {
        let seq = resolved.context;
        if seq != self.issued {
            debug!(seq, latest = self.issued, "applying out-of-order search response");
        }
        self.clear(surface);

        let results = match resolved.result {
            Ok(results) => results,
            Err(e) => {
                warn!(seq, error = %e, "area search failed");
                return Err(e);
            }
        };

        for result in &results {
            let handle = surface.draw_polyline(&result.path, OverlayStyle::SearchResult);
            self.overlays.push(handle);
        }
        info!(seq, count = results.len(), "rendered search results");
        self.results = results;
        Ok(&self.results)
    }
}
