use std::fmt;

use thiserror::Error;
use tracing::{debug, warn};

use crate::model::{DraftError, Movie, MovieDraft, PageState, SortKey};
use crate::remote::{MovieBackend, PageData, RemoteError};

/// Where the current fetch cycle stands. Failure never touches the record
/// set or pagination state, only this marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FetchPhase {
    #[default]
    Idle,
    Fetching,
    Settled,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Errors surfaced to the presentation layer. All are recoverable by
/// further user action; nothing is retried automatically.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ViewError {
    #[error("validation failed: {0}")]
    Validation(#[from] DraftError),

    #[error("failed to fetch page {page}: {message}")]
    FetchFailed { page: u32, message: String },

    #[error("{kind} failed: {message}")]
    MutationFailed { kind: MutationKind, message: String },
}

/// Identity of one issued page request. The sequence number is what makes
/// "apply only the response belonging to the latest request" enforceable
/// when completions arrive out of order.
#[derive(Clone, Copy, Debug)]
pub struct FetchTicket {
    seq: u64,
    pub page: u32,
    pub sort: SortKey,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// What happened when a fetch outcome was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchApplied {
    Applied,
    /// The requested page no longer exists (the collection shrank); the
    /// caller should re-issue with `retry_page`.
    OutOfRange { retry_page: u32 },
    /// A newer request superseded this one; the outcome was discarded.
    Stale,
}

/// Owns the dialogue with the remote source: page fetches, pagination and
/// sort bookkeeping, and mutations followed by a refresh so the view stays
/// synchronized with the backend. Holds no filtering logic.
#[derive(Debug)]
pub struct RemotePager<B> {
    backend: B,
    page: PageState,
    records: Vec<Movie>,
    next_seq: u64,
    latest_seq: u64,
    phase: FetchPhase,
}

impl<B: MovieBackend> RemotePager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            page: PageState::default(),
            records: Vec::new(),
            next_seq: 0,
            latest_seq: 0,
            phase: FetchPhase::Idle,
        }
    }

    /// Records held for the current page only; replaced wholesale on every
    /// successful fetch, never partially mutated.
    pub fn records(&self) -> &[Movie] {
        &self.records
    }

    pub fn page(&self) -> PageState {
        self.page
    }

    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Issues a new request identity. Any previously issued ticket becomes
    /// stale from this point on, which is how superseded in-flight fetches
    /// get cancelled-by-discard.
    pub fn begin_fetch(&mut self, page: u32, sort: SortKey) -> FetchTicket {
        self.next_seq += 1;
        self.latest_seq = self.next_seq;
        self.phase = FetchPhase::Fetching;
        debug!(seq = self.latest_seq, page, "issuing page fetch");
        FetchTicket {
            seq: self.latest_seq,
            page: page.max(1),
            sort,
        }
    }

    /// Applies a completed fetch. Last-write-wins by request identity, not
    /// arrival order: an outcome for anything but the latest ticket is
    /// silently discarded. On failure the record set and page state are left
    /// untouched.
    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<PageData, RemoteError>,
    ) -> Result<FetchApplied, ViewError> {
        if ticket.seq != self.latest_seq {
            debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                "discarding stale fetch response"
            );
            return Ok(FetchApplied::Stale);
        }
        match outcome {
            Ok(data) => {
                self.records = data.records;
                self.page.total_pages = data.total_pages;
                self.page.sort = ticket.sort;
                self.phase = FetchPhase::Settled;
                if data.total_pages == 0 {
                    // Empty collection: no valid page exists, pin to 1.
                    self.page.current_page = 1;
                    return Ok(FetchApplied::Applied);
                }
                if ticket.page > data.total_pages {
                    self.page.current_page = data.total_pages;
                    return Ok(FetchApplied::OutOfRange {
                        retry_page: data.total_pages,
                    });
                }
                self.page.current_page = ticket.page;
                Ok(FetchApplied::Applied)
            }
            Err(err) => {
                self.phase = FetchPhase::Failed;
                warn!(page = ticket.page, error = %err, "page fetch failed");
                Err(ViewError::FetchFailed {
                    page: ticket.page,
                    message: err.to_string(),
                })
            }
        }
    }

    /// Fetches a page with the active sort, re-issuing with a clamped page
    /// number when the requested page turns out to no longer exist.
    pub async fn fetch_page(&mut self, page: u32) -> Result<(), ViewError> {
        let mut target = page.max(1);
        loop {
            let ticket = self.begin_fetch(target, self.page.sort);
            let outcome = self.backend.list_page(ticket.page, ticket.sort).await;
            match self.apply_fetch(ticket, outcome)? {
                FetchApplied::OutOfRange { retry_page } => target = retry_page,
                FetchApplied::Applied | FetchApplied::Stale => return Ok(()),
            }
        }
    }

    /// Re-fetches whatever page the view currently shows.
    pub async fn refresh(&mut self) -> Result<(), ViewError> {
        self.fetch_page(self.page.current_page).await
    }

    /// Sort order changes the meaning of "page N", so the position resets
    /// to the first page before fetching.
    pub async fn set_sort(&mut self, sort: SortKey) -> Result<(), ViewError> {
        self.page.sort = sort;
        self.page.current_page = 1;
        self.fetch_page(1).await
    }

    /// No-op at the last page: no state change, no fetch.
    pub async fn next_page(&mut self) -> Result<(), ViewError> {
        if self.page.current_page >= self.page.total_pages {
            return Ok(());
        }
        self.fetch_page(self.page.current_page + 1).await
    }

    /// No-op at the first page: no state change, no fetch.
    pub async fn previous_page(&mut self) -> Result<(), ViewError> {
        if self.page.current_page <= 1 {
            return Ok(());
        }
        self.fetch_page(self.page.current_page - 1).await
    }

    /// Creates a record. Validation happens locally before any remote call;
    /// on success the view resets to page 1 so the new record is visible.
    pub async fn create(&mut self, draft: &MovieDraft) -> Result<(), ViewError> {
        let fields = draft.validate()?;
        if let Err(err) = self.backend.create(&fields).await {
            warn!(error = %err, "create rejected");
            return Err(ViewError::MutationFailed {
                kind: MutationKind::Create,
                message: err.to_string(),
            });
        }
        self.page.current_page = 1;
        self.fetch_page(1).await
    }

    /// Updates a record in place. The edited record's position is unknown
    /// but likely unchanged, so the *current* page is re-fetched.
    pub async fn update(&mut self, id: &str, draft: &MovieDraft) -> Result<(), ViewError> {
        let fields = draft.validate()?;
        if let Err(err) = self.backend.update(id, &fields).await {
            warn!(id, error = %err, "update rejected");
            return Err(ViewError::MutationFailed {
                kind: MutationKind::Update,
                message: err.to_string(),
            });
        }
        self.refresh().await
    }

    /// Deletes a record. Nothing is removed locally until the remote
    /// confirms; the refresh-with-clamp covers a page that vanished because
    /// the deletion shrank the collection.
    pub async fn delete(&mut self, id: &str) -> Result<(), ViewError> {
        if let Err(err) = self.backend.delete(id).await {
            warn!(id, error = %err, "delete rejected");
            return Err(ViewError::MutationFailed {
                kind: MutationKind::Delete,
                message: err.to_string(),
            });
        }
        self.refresh().await
    }
}
