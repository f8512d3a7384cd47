//! Python bindings for the card catalog.
//!
//! # Quick Start
//!
//! ```python
//! import ccg_catalog as cat
//!
//! store = cat.RecordStore()
//! store.load(open("cards.csv", encoding="utf-8").read())
//!
//! wyrm = store.get_by_id(1001)
//! print(wyrm.name, wyrm.level, wyrm.attack)
//!
//! for spell in store.get_by_type("spell"):
//!     print(spell.id, spell.stack_description)
//! ```

use pyo3::prelude::*;

mod py_record;
mod py_store;

pub use py_record::*;
pub use py_store::*;

/// ccg_catalog: tolerant card-sheet loader and record store.
#[pymodule]
fn ccg_catalog(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyCardRecord>()?;
    m.add_class::<PyRecordStore>()?;
    Ok(())
}
