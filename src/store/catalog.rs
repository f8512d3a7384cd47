//! The record store.
//!
//! `RecordStore` owns the parsed catalog and the player state that came
//! with it, and answers the presentation layer's queries. It is passed by
//! reference to whoever needs it; there is no global instance.
//!
//! ## Lifecycle
//!
//! ```text
//! Empty --load--> Loading --> Ready --reload--> Ready
//! ```
//!
//! `load` parses into a fresh [`Snapshot`] and swaps it in with a single
//! assignment, so a reader sees either the old contents or the new ones.
//! Once `Ready`, plain `load` does not re-parse; it only re-broadcasts the
//! readiness signal. Use [`reload`](RecordStore::reload) to replace the
//! contents of a ready store.
//!
//! ## Concurrency
//!
//! Single writer: `load`/`reload` take `&mut self`. Queries and
//! [`on_ready`](RecordStore::on_ready) take `&self` and may be called from
//! any thread once the store is shared.

use serde::{Deserialize, Serialize};

use crate::cards::{CardKind, CardRecord, RowClassifier};
use crate::core::{CardId, Diagnostic, LoaderConfig};
use crate::csv::{resolve_header, tokenize};
use crate::player::CountMap;

use super::readiness::{ReadySignal, SubscriptionId};
use super::snapshot::Snapshot;
use super::source::TextSource;

/// Where the store is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadState {
    /// Nothing loaded yet.
    #[default]
    Empty,
    /// A parse is running.
    Loading,
    /// At least one parse has completed. Terminal.
    Ready,
}

/// Summary of one ingestion pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Whether the text was parsed. False for a `load` on a ready store.
    pub parsed: bool,
    /// Tokenized rows, header and blanks included.
    pub rows: usize,
    /// Row index of the detected header, if any.
    pub header_row: Option<usize>,
    /// Records in the resulting store.
    pub records: usize,
    /// Everything that was dropped or fixed up.
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadReport {
    /// Number of rows dropped outright.
    #[must_use]
    pub fn dropped_rows(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.dropped_row()).count()
    }
}

/// Run the whole pipeline over `text`, producing a snapshot and its report.
///
/// Never fails; empty text yields an empty snapshot.
#[must_use]
pub fn parse_document(text: &str, config: &LoaderConfig) -> (Snapshot, LoadReport) {
    let rows = tokenize(text);
    let (header_row, header) = resolve_header(&rows, config);
    let classifier = RowClassifier::new(config, &header);

    let mut snapshot = Snapshot::new();
    let mut diagnostics = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        if Some(index) == header_row || row.is_blank() {
            continue;
        }
        classifier.classify_and_build(index, row, &mut snapshot, &mut diagnostics);
    }

    let report = LoadReport {
        parsed: true,
        rows: rows.len(),
        header_row,
        records: snapshot.len(),
        diagnostics,
    };
    (snapshot, report)
}

/// In-memory catalog of typed records plus the player state loaded with it.
#[derive(Debug, Default)]
pub struct RecordStore {
    config: LoaderConfig,
    snapshot: Snapshot,
    state: LoadState,
    ready: ReadySignal,
}

impl RecordStore {
    /// Create an empty store.
    #[must_use]
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The loader configuration.
    #[must_use]
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Parse `text` and become ready.
    ///
    /// On a store that is already ready this does not parse; it re-fires
    /// the readiness signal for any waiter that raced in, and returns a
    /// report with `parsed == false`.
    pub fn load(&mut self, text: &str) -> LoadReport {
        if self.state == LoadState::Ready {
            let woken = self.ready.fire();
            tracing::debug!(woken, "store already ready, load skipped");
            return LoadReport::default();
        }
        self.ingest(text)
    }

    /// Replace the contents with a parse of `text`.
    ///
    /// Works in any state. Consumers never observe an empty intermediate
    /// store.
    pub fn reload(&mut self, text: &str) -> LoadReport {
        self.ingest(text)
    }

    /// [`load`](Self::load) from a text source.
    ///
    /// A source that cannot be read counts as missing input: the store
    /// still becomes ready, empty.
    pub fn load_from(&mut self, source: &dyn TextSource) -> LoadReport {
        if self.state == LoadState::Ready {
            return self.load("");
        }
        let text = read_or_empty(source);
        self.load(&text)
    }

    /// [`reload`](Self::reload) from a text source.
    ///
    /// On a read failure the current contents are kept and the report is
    /// unparsed.
    pub fn reload_from(&mut self, source: &dyn TextSource) -> LoadReport {
        match source.read_text() {
            Ok(text) => self.reload(&text),
            Err(err) => {
                tracing::warn!(source = %source.describe(), error = %err, "reload failed, keeping current data");
                LoadReport::default()
            }
        }
    }

    fn ingest(&mut self, text: &str) -> LoadReport {
        if self.state == LoadState::Empty {
            self.state = LoadState::Loading;
        }

        let (snapshot, report) = parse_document(text, &self.config);
        self.snapshot = snapshot;
        self.state = LoadState::Ready;

        tracing::info!(
            rows = report.rows,
            records = report.records,
            diagnostics = report.diagnostics.len(),
            cards = self.snapshot.inventory().len(),
            deck = self.snapshot.deck().len(),
            coins = self.snapshot.coins(),
            "card data loaded"
        );

        self.ready.fire();
        report
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> LoadState {
        self.state
    }

    /// True once a load has completed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state == LoadState::Ready
    }

    /// Call `waiter` once the store is ready.
    ///
    /// If it already is, `waiter` runs before this returns and `None` is
    /// returned. Otherwise the returned id can cancel the subscription.
    pub fn on_ready<F>(&self, waiter: F) -> Option<SubscriptionId>
    where
        F: FnOnce() + Send + 'static,
    {
        self.ready.subscribe(waiter)
    }

    /// Cancel a waiter registered with [`on_ready`](Self::on_ready).
    pub fn cancel_ready(&self, id: SubscriptionId) -> bool {
        self.ready.cancel(id)
    }

    /// Look up a record by ID.
    #[must_use]
    pub fn get_by_id(&self, id: CardId) -> Option<CardRecord> {
        self.snapshot.get(id).cloned()
    }

    /// Borrow a record by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardRecord> {
        self.snapshot.get(id)
    }

    /// True if the store holds a record with this ID.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.snapshot.get(id).is_some()
    }

    /// Records of one kind, sorted by ID. The vector is the caller's.
    #[must_use]
    pub fn get_by_type(&self, kind: CardKind) -> Vec<CardRecord> {
        self.snapshot.of_kind(kind)
    }

    /// Every record, sorted by ID.
    #[must_use]
    pub fn records(&self) -> Vec<CardRecord> {
        self.snapshot.all()
    }

    /// Sorted IDs of every record.
    #[must_use]
    pub fn ids(&self) -> Vec<CardId> {
        self.snapshot.ids()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    /// True when the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    /// Owned copies, as loaded.
    #[must_use]
    pub fn inventory(&self) -> &CountMap {
        self.snapshot.inventory()
    }

    /// Deck copies, as loaded.
    #[must_use]
    pub fn deck(&self) -> &CountMap {
        self.snapshot.deck()
    }

    /// Coin balance, as loaded.
    #[must_use]
    pub fn coins(&self) -> i64 {
        self.snapshot.coins()
    }

    /// A copy of the current contents. O(1).
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.clone()
    }
}

fn read_or_empty(source: &dyn TextSource) -> String {
    match source.read_text() {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(source = %source.describe(), error = %err, "card data unavailable, loading empty");
            String::new()
        }
    }
}
