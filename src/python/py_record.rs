//! Read-only record wrapper.

use pyo3::prelude::*;

use crate::cards::CardRecord;

/// Python view of a CardRecord.
///
/// Fields that do not apply to the record's kind read as `None`.
#[pyclass(name = "CardRecord", frozen)]
#[derive(Clone, Debug)]
pub struct PyCardRecord(pub CardRecord);

#[pymethods]
impl PyCardRecord {
    #[getter]
    fn id(&self) -> u32 {
        self.0.id().raw()
    }

    /// "monster" or "spell".
    #[getter]
    fn kind(&self) -> &'static str {
        self.0.kind().tag()
    }

    #[getter]
    fn name(&self) -> &str {
        self.0.name()
    }

    /// Monster effect or spell magic text.
    #[getter]
    fn description(&self) -> &str {
        self.0.description()
    }

    #[getter]
    fn cost(&self) -> u32 {
        self.0.cost().value
    }

    #[getter]
    fn cost_description(&self) -> &str {
        &self.0.cost().description
    }

    #[getter]
    fn attribute(&self) -> Option<&'static str> {
        self.0.as_monster().and_then(|m| m.attribute).map(|a| a.name())
    }

    #[getter]
    fn level(&self) -> Option<u8> {
        self.0.as_monster().map(|m| m.level)
    }

    #[getter]
    fn attack(&self) -> Option<u32> {
        self.0.as_monster().map(|m| m.attack)
    }

    #[getter]
    fn bond_name(&self) -> Option<&str> {
        self.0.as_monster().map(|m| m.bond_name.as_str())
    }

    #[getter]
    fn bond_effect(&self) -> Option<&str> {
        self.0.as_monster().map(|m| m.bond_effect.as_str())
    }

    /// Monster sub-type: 0 for Effect, 1 for Judge.
    #[getter]
    fn monster_kind(&self) -> Option<u8> {
        self.0.as_monster().map(|m| m.kind as u8)
    }

    #[getter]
    fn stack_description(&self) -> Option<&str> {
        self.0.as_spell().map(|s| s.stack_description.as_str())
    }

    #[getter]
    fn stack_count(&self) -> Option<u32> {
        self.0.as_spell().map(|s| s.stack_count)
    }

    #[getter]
    fn can_use_as_magic(&self) -> Option<bool> {
        self.0.as_spell().map(|s| s.can_use_as_magic)
    }

    #[getter]
    fn can_use_as_stack(&self) -> Option<bool> {
        self.0.as_spell().map(|s| s.can_use_as_stack)
    }

    fn __repr__(&self) -> String {
        format!("CardRecord(id={}, kind={}, name={:?})", self.0.id(), self.0.kind().tag(), self.0.name())
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
