//! Shared session state read and written by every workspace component.

use chrono::{DateTime, Utc};
use routepad_core::{LatLng, RouteDraft, RouteId, RouteSummary, UserId};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Notices kept before the oldest are dropped.
pub const MAX_NOTICES: usize = 64;

/// A message surfaced to the user, with the time it was raised.
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Identifies the draft a save was issued for.
///
/// A save may resolve after the user has moved on; the ticket lets
/// [`SessionContext::mark_saved`] tell whether its result still applies.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveTicket {
    pub user: UserId,
    pub name: String,
    generation: u64,
}

/// Selected user, their route list, and the draft being edited.
///
/// Fields are private; the setters below are the only mutation path.
/// `generation` changes whenever the draft is replaced by a different route.
#[derive(Debug, Default)]
pub struct SessionContext {
    user: Option<UserId>,
    username: Option<String>,
    routes: Vec<RouteSummary>,
    selected_route: Option<RouteId>,
    draft: RouteDraft,
    generation: u64,
    notices: Vec<Notice>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn routes(&self) -> &[RouteSummary] {
        &self.routes
    }

    pub fn selected_route(&self) -> Option<&RouteId> {
        self.selected_route.as_ref()
    }

    pub fn draft(&self) -> &RouteDraft {
        &self.draft
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }

    /// Hand every pending notice to the UI, leaving none behind.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // ── User ──

    /// Select `user`. Switching to a different user drops everything that
    /// belonged to the previous one.
    pub fn set_user(&mut self, user: UserId) {
        if self.user.as_ref() == Some(&user) {
            return;
        }
        self.clear_user();
        self.user = Some(user);
    }

    pub fn clear_user(&mut self) {
        self.user = None;
        self.username = None;
        self.routes.clear();
        self.selected_route = None;
        self.replace_draft(RouteDraft::new());
    }

    pub fn set_profile(&mut self, username: String, routes: Vec<RouteSummary>) {
        self.username = Some(username);
        self.routes = routes;
    }

    // ── Draft ──

    /// Replace the draft with a route just loaded from the store.
    pub fn load_route(&mut self, draft: RouteDraft) {
        self.selected_route = draft.id.clone();
        self.replace_draft(draft);
    }

    /// Start a brand-new route, unlinked from any stored one.
    pub fn new_draft(&mut self) {
        self.selected_route = None;
        self.replace_draft(RouteDraft::new());
    }

    fn replace_draft(&mut self, draft: RouteDraft) {
        self.draft = draft;
        self.generation += 1;
    }

    /// A line gesture started: empty the path, keep identity and name.
    pub fn start_draft_path(&mut self) {
        self.draft.path.clear();
    }

    pub fn set_draft_path(&mut self, path: Vec<LatLng>) {
        self.draft.path = path;
    }

    pub fn rename_draft(&mut self, name: impl Into<String>) {
        self.draft.name = Some(name.into());
    }

    /// Ticket for saving the current draft, or `None` when nobody is
    /// signed in.
    pub fn save_ticket(&self) -> Option<SaveTicket> {
        Some(SaveTicket {
            user: self.user.clone()?,
            name: self.draft.trimmed_name().unwrap_or_default().to_string(),
            generation: self.generation,
        })
    }

    /// Record a successful save and keep the selector in step.
    ///
    /// The route list is touched only while the saving user is still
    /// selected, and the id is stamped only on the draft that was saved.
    /// Returns whether the current draft took the id.
    pub fn mark_saved(&mut self, id: RouteId, ticket: &SaveTicket) -> bool {
        if self.user.as_ref() != Some(&ticket.user) {
            return false;
        }
        match self.routes.iter_mut().find(|r| r.id == id) {
            Some(summary) => summary.name = ticket.name.clone(),
            None => self.routes.push(RouteSummary {
                id: id.clone(),
                name: ticket.name.clone(),
            }),
        }
        if ticket.generation != self.generation {
            return false;
        }
        self.selected_route = Some(id.clone());
        self.draft.id = Some(id);
        true
    }

    // ── Notices ──

    pub fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            NoticeLevel::Info => info!(notice = %message, "notice"),
            NoticeLevel::Error => warn!(notice = %message, "notice"),
        }
        if self.notices.len() >= MAX_NOTICES {
            let excess = self.notices.len() + 1 - MAX_NOTICES;
            self.notices.drain(..excess);
        }
        self.notices.push(Notice {
            level,
            message,
            timestamp: Utc::now(),
        });
    }
}
