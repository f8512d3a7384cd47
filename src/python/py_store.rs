//! Record store bindings.

use pyo3::prelude::*;

use crate::cards::CardKind;
use crate::core::{CardId, LoaderConfig};
use crate::player::serialize;
use crate::store::{LoadReport, RecordStore};

use super::py_record::PyCardRecord;

/// Python wrapper for RecordStore.
#[pyclass(name = "RecordStore")]
#[derive(Debug, Default)]
pub struct PyRecordStore {
    inner: RecordStore,
}

fn report_tuple(report: &LoadReport) -> (usize, usize, Vec<String>) {
    (
        report.rows,
        report.records,
        report.diagnostics.iter().map(ToString::to_string).collect(),
    )
}

#[pymethods]
impl PyRecordStore {
    /// Create an empty store.
    ///
    /// `config_json` optionally overrides loader heuristics.
    #[new]
    #[pyo3(signature = (config_json = None))]
    fn new(config_json: Option<&str>) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => serde_json::from_str::<LoaderConfig>(json)
                .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("{}", e)))?,
            None => LoaderConfig::default(),
        };
        Ok(Self {
            inner: RecordStore::new(config),
        })
    }

    /// Parse `text`. Returns `(rows, records, diagnostics)`.
    fn load(&mut self, text: &str) -> (usize, usize, Vec<String>) {
        report_tuple(&self.inner.load(text))
    }

    /// Replace the contents with a parse of `text`.
    fn reload(&mut self, text: &str) -> (usize, usize, Vec<String>) {
        report_tuple(&self.inner.reload(text))
    }

    fn is_ready(&self) -> bool {
        self.inner.is_ready()
    }

    fn get_by_id(&self, id: u32) -> Option<PyCardRecord> {
        self.inner.get_by_id(CardId::new(id)).map(PyCardRecord)
    }

    /// Records of one kind ("monster" or "spell"), sorted by ID.
    fn get_by_type(&self, kind: &str) -> PyResult<Vec<PyCardRecord>> {
        let kind: CardKind = kind
            .parse()
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("{}", e)))?;
        Ok(self.inner.get_by_type(kind).into_iter().map(PyCardRecord).collect())
    }

    /// Every record, sorted by ID.
    fn records(&self) -> Vec<PyCardRecord> {
        self.inner.records().into_iter().map(PyCardRecord).collect()
    }

    fn inventory_count(&self, id: u32) -> u32 {
        self.inner.inventory().get(CardId::new(id))
    }

    fn deck_count(&self, id: u32) -> u32 {
        self.inner.deck().get(CardId::new(id))
    }

    fn coins(&self) -> i64 {
        self.inner.coins()
    }

    /// Loaded player state in save format.
    fn serialize(&self) -> String {
        serialize(self.inner.coins(), self.inner.inventory(), self.inner.deck())
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        format!("RecordStore(records={}, ready={})", self.inner.len(), self.inner.is_ready())
    }
}
