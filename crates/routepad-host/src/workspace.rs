//! Route editing workspace: wires provider gestures to the translator, the
//! route store, and the area search.
//!
//! ```text
//! gesture ─▶ DrawingModeController ─▶ ShapeEvent
//!              ├─ LineCompleted   ─▶ draft ─▶ save_draft ─▶ apply_save
//!              └─ RegionCompleted ─▶ search_area ─▶ apply_search
//! ```
//!
//! Every network call is split in two. The issuing method returns a
//! [`Pending`] that owns what it needs, so the workspace and the map surface
//! stay usable while the request is outstanding. Its `apply_*` counterpart
//! takes the [`Resolved`] outcome, records a notice on failure, and returns
//! the error. Partial effects are never applied: a failed load keeps the old
//! draft, a failed save leaves the draft unsaved.

use std::sync::Arc;

use routepad_core::{
    DrawingMode, PersistedRoute, RouteDraft, RouteId, SearchRegion, SearchResult, UserId,
};
use routepad_sync::{
    AreaSearchService, BackendError, ClientError, Pending, Resolved, RouteRepository, UserRoutes,
};
use tracing::{debug, info};

use crate::{
    AreaSearchBridge, DrawingModeController, MapSurface, Notice, NoticeLevel, PendingSearch,
    ProviderEvent, SaveTicket, SessionContext, ShapeEvent,
};

pub struct RouteWorkspace<R, S> {
    session: SessionContext,
    drawing: DrawingModeController,
    search: AreaSearchBridge<S>,
    repository: Arc<R>,
}

impl<R, S> RouteWorkspace<R, S>
where
    R: RouteRepository + 'static,
    S: AreaSearchService + 'static,
{
    pub fn new(repository: R, search: S) -> Self {
        Self {
            session: SessionContext::new(),
            drawing: DrawingModeController::new(),
            search: AreaSearchBridge::new(search),
            repository: Arc::new(repository),
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Drain the notices raised so far, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.session.take_notices()
    }

    pub fn drawing(&self) -> &DrawingModeController {
        &self.drawing
    }

    pub fn mode(&self) -> DrawingMode {
        self.drawing.mode()
    }

    pub fn search_results(&self) -> &[SearchResult] {
        self.search.results()
    }

    pub fn set_mode(&mut self, mode: DrawingMode, surface: &mut dyn MapSurface) {
        self.drawing.set_mode(mode, surface);
    }

    // ── User ──

    /// Adopt the user id produced by the login flow and request their routes.
    pub fn sign_in(&mut self, user: UserId) -> Pending<UserRoutes, UserId> {
        self.session.set_user(user.clone());
        self.list_routes(user)
    }

    /// Drop the user and everything drawn on their behalf.
    pub fn sign_out(&mut self, surface: &mut dyn MapSurface) {
        self.drawing.reset(surface);
        self.search.clear(surface);
        self.session.clear_user();
    }

    pub fn refresh_routes(&mut self) -> Result<Pending<UserRoutes, UserId>, ClientError> {
        let user = self.require_user()?;
        Ok(self.list_routes(user))
    }

    fn list_routes(&self, user: UserId) -> Pending<UserRoutes, UserId> {
        let repository = Arc::clone(&self.repository);
        let key = user.clone();
        Pending::new(user, async move { repository.list_for_user(&key).await })
    }

    /// Apply a route list. A list for a user who is no longer selected is
    /// dropped.
    pub fn apply_routes(
        &mut self,
        resolved: Resolved<UserRoutes, UserId>,
    ) -> Result<(), ClientError> {
        let user = resolved.context;
        if self.session.user() != Some(&user) {
            debug!(user = %user, "dropping route list for signed-out user");
            return Ok(());
        }
        match resolved.result {
            Ok(profile) => {
                info!(user = %user, count = profile.routes.len(), "route list refreshed");
                self.session.set_profile(profile.username, profile.routes);
                Ok(())
            }
            Err(e) => Err(self.report("Could not load routes", e)),
        }
    }

    // ── Routes ──

    /// Request a stored route. Nothing changes until it is applied.
    pub fn select_route(&self, id: &RouteId) -> Pending<PersistedRoute, Option<UserId>> {
        let repository = Arc::clone(&self.repository);
        let id = id.clone();
        Pending::new(self.session.user().cloned(), async move { repository.get(&id).await })
    }

    /// Replace the current draft and displayed line with a loaded route.
    pub fn apply_route(
        &mut self,
        resolved: Resolved<PersistedRoute, Option<UserId>>,
        surface: &mut dyn MapSurface,
    ) -> Result<(), ClientError> {
        if self.session.user() != resolved.context.as_ref() {
            debug!("dropping route loaded for a previous user");
            return Ok(());
        }
        let route = match resolved.result {
            Ok(route) => route,
            Err(e) => return Err(self.report("Could not load route", e)),
        };
        let draft = RouteDraft::from_persisted(&route);
        self.drawing.show_path(&draft.path, surface);
        self.session.load_route(draft);
        Ok(())
    }

    /// Start a new, unsaved route and clear the displayed line.
    pub fn new_route(&mut self, surface: &mut dyn MapSurface) {
        self.drawing.show_path(&[], surface);
        self.session.new_draft();
    }

    pub fn rename_draft(&mut self, name: impl Into<String>) {
        self.session.rename_draft(name);
    }

    /// Save the draft: create when it has no id, update otherwise.
    ///
    /// Validation happens in the repository before any request goes out, so
    /// an invalid draft resolves to a `Validation` error.
    pub fn save_draft(&mut self) -> Result<Pending<RouteId, SaveTicket>, ClientError> {
        let Some(ticket) = self.session.save_ticket() else {
            return Err(self.unauthorized());
        };
        let repository = Arc::clone(&self.repository);
        let user = ticket.user.clone();
        let draft = self.session.draft().clone();
        Ok(Pending::new(ticket, async move { repository.upsert(&user, &draft).await }))
    }

    /// Record a save outcome. The id lands on the draft only if that draft
    /// is still the one being edited.
    pub fn apply_save(
        &mut self,
        resolved: Resolved<RouteId, SaveTicket>,
    ) -> Result<RouteId, ClientError> {
        let ticket = resolved.context;
        match resolved.result {
            Ok(id) => {
                if !self.session.mark_saved(id.clone(), &ticket) {
                    debug!(route = %id, "save landed after the draft changed");
                }
                let message = format!("Saved route {}", ticket.name);
                self.session.notify(NoticeLevel::Info, message);
                Ok(id)
            }
            Err(e) => Err(self.report("Could not save route", e)),
        }
    }

    // ── Gestures ──

    /// Feed one provider callback through the workspace.
    ///
    /// A completed rectangle issues an area search; the caller resolves it
    /// and hands it to [`apply_search`](Self::apply_search).
    pub fn handle_event(
        &mut self,
        event: ProviderEvent,
        surface: &mut dyn MapSurface,
    ) -> Result<Option<PendingSearch>, ClientError> {
        let shape = match self.drawing.handle_event(event, surface) {
            Ok(shape) => shape,
            Err(e) => return Err(self.report("Invalid shape", e.into())),
        };
        match shape {
            None => {}
            Some(ShapeEvent::LineStarted) => self.session.start_draft_path(),
            Some(ShapeEvent::LineCompleted(path)) => self.session.set_draft_path(path),
            Some(ShapeEvent::RegionCompleted(region)) => {
                return Ok(Some(self.search_area(region, surface)));
            }
        }
        Ok(None)
    }

    /// Clear the displayed result set and issue an area search.
    pub fn search_area(
        &mut self,
        region: SearchRegion,
        surface: &mut dyn MapSurface,
    ) -> PendingSearch {
        self.search.begin(region, surface)
    }

    /// Display a search outcome, replacing whatever result set is shown.
    pub fn apply_search(
        &mut self,
        resolved: Resolved<Vec<SearchResult>, u64>,
        surface: &mut dyn MapSurface,
    ) -> Result<usize, ClientError> {
        match self.search.apply(resolved, surface) {
            Ok(results) => {
                let count = results.len();
                self.session
                    .notify(NoticeLevel::Info, format!("Found {count} routes"));
                Ok(count)
            }
            Err(e) => Err(self.report("Area search failed", e)),
        }
    }

    fn require_user(&mut self) -> Result<UserId, ClientError> {
        match self.session.user().cloned() {
            Some(user) => Ok(user),
            None => Err(self.unauthorized()),
        }
    }

    fn unauthorized(&mut self) -> ClientError {
        self.report(
            "Not signed in",
            BackendError::Unauthorized("no user selected".into()).into(),
        )
    }

    fn report(&mut self, context: &str, e: ClientError) -> ClientError {
        self.session
            .notify(NoticeLevel::Error, format!("{context}: {e}"));
        e
    }
}
