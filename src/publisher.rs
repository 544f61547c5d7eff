use chrono::Month;

use crate::{
    config::ViewerConfig,
    filter::{filter, Selection},
    model::{ActiveView, Company, Record},
    store::DatasetStore,
};

/// Receives every freshly computed view, e.g. a chart renderer.
pub trait ViewSink {
    fn publish(&mut self, view: &ActiveView);
}

impl<F: FnMut(&ActiveView)> ViewSink for F {
    fn publish(&mut self, view: &ActiveView) {
        self(view)
    }
}

/// Sink for callers that only poll `active_view`.
#[derive(Default, Debug)]
pub struct Discard;

impl ViewSink for Discard {
    fn publish(&mut self, _: &ActiveView) {}
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ViewState {
    Empty,
    Loaded,
}

/// Handed out by `begin_upload`; a completion carrying an older ticket than
/// the newest one issued is discarded.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct UploadTicket(u64);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct ViewKey {
    generation: u64,
    selection: Selection,
}

/// Owns the dataset and selectors and keeps the active view in step with
/// them. Every transition recomputes before returning.
pub struct ViewPublisher<S: ViewSink = Discard> {
    store: DatasetStore,
    selection: Selection,
    active: ActiveView,
    computed_for: Option<ViewKey>,
    latest_ticket: u64,
    recomputations: usize,
    sink: S,
}

impl ViewPublisher<Discard> {
    pub fn new(config: &ViewerConfig) -> Self {
        Self::with_sink(config, Discard)
    }
}

impl Default for ViewPublisher<Discard> {
    fn default() -> Self {
        Self::new(&ViewerConfig::default())
    }
}

impl<S: ViewSink> ViewPublisher<S> {
    pub fn with_sink(config: &ViewerConfig, sink: S) -> Self {
        Self {
            store: DatasetStore::default(),
            selection: Selection {
                company: config.default_company,
                month: config.default_month,
            },
            active: ActiveView::default(),
            computed_for: None,
            latest_ticket: 0,
            recomputations: 0,
            sink,
        }
    }

    pub fn state(&self) -> ViewState {
        if self.store.generation() == 0 {
            ViewState::Empty
        } else {
            ViewState::Loaded
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn dataset(&self) -> &[Record] {
        self.store.current()
    }

    pub fn active_view(&self) -> &ActiveView {
        &self.active
    }

    /// Number of times the view was actually rebuilt and published.
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn begin_upload(&mut self) -> UploadTicket {
        self.latest_ticket += 1;
        UploadTicket(self.latest_ticket)
    }

    /// Applies a finished parse unless a newer upload was started after
    /// `ticket` was issued. Returns whether the records were taken.
    pub fn complete_upload(&mut self, ticket: UploadTicket, records: Vec<Record>) -> bool {
        if ticket.0 < self.latest_ticket {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.latest_ticket,
                "discarding stale upload"
            );
            return false;
        }

        self.apply_upload(records);
        true
    }

    /// Ticketless upload. Counts as the newest upload, so any parse still
    /// holding an earlier ticket is discarded when it completes.
    pub fn upload_completed(&mut self, records: Vec<Record>) {
        self.latest_ticket += 1;
        self.apply_upload(records);
    }

    fn apply_upload(&mut self, records: Vec<Record>) {
        let rows = records.len();
        let generation = self.store.replace(records);
        tracing::info!(rows, generation, "dataset replaced");

        self.recompute();
    }

    pub fn company_changed(&mut self, company: Company) {
        if self.selection.company != company {
            self.selection.company = company;
            self.recompute();
        }
    }

    pub fn month_changed(&mut self, month: Month) {
        if self.selection.month != month {
            self.selection.month = month;
            self.recompute();
        }
    }

    /// Rebuilds the view if the dataset or either selector moved since the
    /// last build. Does nothing while `Empty`. Returns whether it rebuilt.
    pub fn recompute(&mut self) -> bool {
        if self.state() == ViewState::Empty {
            return false;
        }

        let key = ViewKey {
            generation: self.store.generation(),
            selection: self.selection,
        };
        if self.computed_for == Some(key) {
            return false;
        }

        self.active = filter(self.store.current(), key.selection.company, key.selection.month);
        self.computed_for = Some(key);
        self.recomputations += 1;

        tracing::debug!(
            company = %key.selection.company,
            month = key.selection.month.name(),
            size = self.active.len(),
            "active view recomputed"
        );
        self.sink.publish(&self.active);

        true
    }
}
