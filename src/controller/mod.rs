use tokio::sync::watch;

use crate::model::{FilterCriteria, FilterField, Movie, MovieDraft, PageState, SortKey};
use crate::pager::{RemotePager, ViewError};
use crate::projector;
use crate::remote::MovieBackend;

/// Read-only view of the controller after a state change: the filtered
/// records, pagination bookkeeping, active criteria, and the most recent
/// surfaced error (if any).
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub view: Vec<Movie>,
    pub page: PageState,
    pub criteria: FilterCriteria,
    pub genre_options: Vec<String>,
    pub last_error: Option<ViewError>,
}

/// Ties the [`RemotePager`] and the projector together behind one intent
/// surface. Every intent settles into a fresh [`Snapshot`], published on a
/// watch channel for subscribers and recomputable on demand via
/// [`snapshot`](Self::snapshot).
pub struct MovieController<B> {
    pager: RemotePager<B>,
    criteria: FilterCriteria,
    last_error: Option<ViewError>,
    changes: watch::Sender<Snapshot>,
}

impl<B: MovieBackend> MovieController<B> {
    pub fn new(backend: B) -> Self {
        let pager = RemotePager::new(backend);
        let initial = Snapshot {
            view: Vec::new(),
            page: pager.page(),
            criteria: FilterCriteria::default(),
            genre_options: Vec::new(),
            last_error: None,
        };
        let (changes, _) = watch::channel(initial);
        Self {
            pager,
            criteria: FilterCriteria::default(),
            last_error: None,
            changes,
        }
    }

    /// Recomputes the snapshot from current state. The derived view is never
    /// cached; page sizes are small enough that filtering on every read is
    /// the simpler contract.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            view: projector::project(self.pager.records(), &self.criteria),
            page: self.pager.page(),
            criteria: self.criteria.clone(),
            genre_options: projector::genre_options(self.pager.records()),
            last_error: self.last_error.clone(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.changes.subscribe()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn pager(&self) -> &RemotePager<B> {
        &self.pager
    }

    pub async fn refresh(&mut self) -> Result<(), ViewError> {
        let outcome = self.pager.refresh().await;
        self.settle(outcome)
    }

    pub async fn fetch_page(&mut self, page: u32) -> Result<(), ViewError> {
        let outcome = self.pager.fetch_page(page).await;
        self.settle(outcome)
    }

    pub async fn create(&mut self, draft: &MovieDraft) -> Result<(), ViewError> {
        let outcome = self.pager.create(draft).await;
        self.settle(outcome)
    }

    pub async fn update(&mut self, id: &str, draft: &MovieDraft) -> Result<(), ViewError> {
        let outcome = self.pager.update(id, draft).await;
        self.settle(outcome)
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), ViewError> {
        let outcome = self.pager.delete(id).await;
        self.settle(outcome)
    }

    pub async fn set_sort(&mut self, sort: SortKey) -> Result<(), ViewError> {
        let outcome = self.pager.set_sort(sort).await;
        self.settle(outcome)
    }

    pub async fn next_page(&mut self) -> Result<(), ViewError> {
        let outcome = self.pager.next_page().await;
        self.settle(outcome)
    }

    pub async fn previous_page(&mut self) -> Result<(), ViewError> {
        let outcome = self.pager.previous_page().await;
        self.settle(outcome)
    }

    /// Filter edits are purely local: no fetch, the derived view just
    /// recomputes against the current record set.
    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        self.criteria.set(field, value);
        self.publish();
    }

    pub fn reset_filters(&mut self) {
        self.criteria.reset();
        self.publish();
    }

    /// Explicitly clears a surfaced error without waiting for the next
    /// successful operation.
    pub fn dismiss_error(&mut self) {
        self.last_error = None;
        self.publish();
    }

    fn settle(&mut self, outcome: Result<(), ViewError>) -> Result<(), ViewError> {
        match &outcome {
            Ok(()) => self.last_error = None,
            Err(err) => self.last_error = Some(err.clone()),
        }
        self.publish();
        outcome
    }

    fn publish(&self) {
        self.changes.send_replace(self.snapshot());
    }
}
