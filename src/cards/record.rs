//! Typed card records.
//!
//! `CardRecord` is a closed sum over the two card kinds the sheet defines.
//! Records are built once per load and never mutated by the store; the
//! presentation layer reads them through [`RecordStore`](crate::store::RecordStore).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{CardId, CatalogError};

/// Lowest monster level.
pub const MIN_LEVEL: u8 = 1;
/// Highest monster level.
pub const MAX_LEVEL: u8 = 5;

/// Elemental attribute of a monster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Earth,
    Wood,
    Water,
    Fire,
    Metal,
}

impl Attribute {
    /// All attributes, in sheet order.
    pub const ALL: [Attribute; 5] = [
        Attribute::Earth,
        Attribute::Wood,
        Attribute::Water,
        Attribute::Fire,
        Attribute::Metal,
    ];

    /// Single-glyph form used on the sheets.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Attribute::Earth => '土',
            Attribute::Wood => '木',
            Attribute::Water => '水',
            Attribute::Fire => '火',
            Attribute::Metal => '金',
        }
    }

    /// English name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Attribute::Earth => "Earth",
            Attribute::Wood => "Wood",
            Attribute::Water => "Water",
            Attribute::Fire => "Fire",
            Attribute::Metal => "Metal",
        }
    }

    /// Parse a cell: the glyph or the English name, case-insensitive.
    #[must_use]
    pub fn parse(cell: &str) -> Option<Self> {
        let cell = cell.trim();
        Self::ALL.into_iter().find(|a| {
            let mut chars = cell.chars();
            let is_glyph = chars.next() == Some(a.glyph()) && chars.next().is_none();
            is_glyph || cell.eq_ignore_ascii_case(a.name())
        })
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Monster sub-type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    /// Resolves its effect text (the default).
    #[default]
    Effect = 0,
    /// Resolves by judgement.
    Judge = 1,
}

impl MonsterKind {
    /// Map a sheet label to a sub-type.
    ///
    /// Accepts the numeric discriminant, the variant name in any case, and
    /// labels containing `判定`/`judge`. Anything else, blank included, is
    /// `Effect`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        match label.parse::<i64>() {
            Ok(0) => return MonsterKind::Effect,
            Ok(1) => return MonsterKind::Judge,
            _ => {}
        }
        if label.eq_ignore_ascii_case("effect") {
            return MonsterKind::Effect;
        }
        if label.eq_ignore_ascii_case("judge") {
            return MonsterKind::Judge;
        }
        let lower = label.to_lowercase();
        if lower.contains("判定") || lower.contains("judge") {
            MonsterKind::Judge
        } else {
            MonsterKind::Effect
        }
    }
}

/// Record kind, used to filter store queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Monster,
    Spell,
}

impl CardKind {
    /// The discriminator tag for this kind.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            CardKind::Monster => "monster",
            CardKind::Spell => "spell",
        }
    }
}

impl FromStr for CardKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("monster") {
            Ok(CardKind::Monster)
        } else if s.eq_ignore_ascii_case("spell") {
            Ok(CardKind::Spell)
        } else {
            Err(CatalogError::UnknownKind(s.to_string()))
        }
    }
}

/// Play cost of a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardCost {
    pub value: u32,
    pub description: String,
}

impl CardCost {
    /// Description used when a sheet gives no cost.
    pub const FREE_DESCRIPTION: &'static str = "无费用";

    /// Create a cost.
    #[must_use]
    pub fn new(value: u32, description: impl Into<String>) -> Self {
        Self {
            value,
            description: description.into(),
        }
    }

    /// The "no cost" default.
    #[must_use]
    pub fn free() -> Self {
        Self::new(0, Self::FREE_DESCRIPTION)
    }

    /// True for a zero cost.
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.value == 0
    }
}

impl Default for CardCost {
    fn default() -> Self {
        Self::free()
    }
}

/// A monster card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterRecord {
    pub id: CardId,
    pub name: String,
    /// `None` when the sheet gives no recognizable attribute.
    pub attribute: Option<Attribute>,
    /// Always within `MIN_LEVEL..=MAX_LEVEL`.
    pub level: u8,
    pub attack: u32,
    pub bond_name: String,
    pub bond_effect: String,
    pub kind: MonsterKind,
    pub effect: String,
    pub cost: CardCost,
}

impl MonsterRecord {
    /// Create a level-1, 0-attack Effect monster.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            attribute: None,
            level: MIN_LEVEL,
            attack: 0,
            bond_name: String::new(),
            bond_effect: String::new(),
            kind: MonsterKind::Effect,
            effect: String::new(),
            cost: CardCost::free(),
        }
    }

    /// Set the attribute (builder pattern).
    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attribute = Some(attribute);
        self
    }

    /// Set the level, clamped into range (builder pattern).
    #[must_use]
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level.clamp(MIN_LEVEL, MAX_LEVEL);
        self
    }

    /// Set the attack value (builder pattern).
    #[must_use]
    pub fn with_attack(mut self, attack: u32) -> Self {
        self.attack = attack;
        self
    }

    /// Set the bond group and its effect (builder pattern).
    #[must_use]
    pub fn with_bond(mut self, name: impl Into<String>, effect: impl Into<String>) -> Self {
        self.bond_name = name.into();
        self.bond_effect = effect.into();
        self
    }

    /// Set the sub-type (builder pattern).
    #[must_use]
    pub fn with_kind(mut self, kind: MonsterKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the effect text (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effect = effect.into();
        self
    }

    /// Set the cost (builder pattern).
    #[must_use]
    pub fn with_cost(mut self, cost: CardCost) -> Self {
        self.cost = cost;
        self
    }
}

/// A spell card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellRecord {
    pub id: CardId,
    pub name: String,
    /// Effect when cast directly.
    pub magic_text: String,
    /// Display text for stacked use. Never interpreted as a number.
    pub stack_description: String,
    pub can_use_as_magic: bool,
    pub can_use_as_stack: bool,
    /// Copies stacked together; 1 unless set explicitly.
    pub stack_count: u32,
    pub cost: CardCost,
}

impl SpellRecord {
    /// Create a spell with no text, no usages and a stack count of 1.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            magic_text: String::new(),
            stack_description: String::new(),
            can_use_as_magic: false,
            can_use_as_stack: false,
            stack_count: 1,
            cost: CardCost::free(),
        }
    }

    /// Set the magic text (builder pattern).
    #[must_use]
    pub fn with_magic_text(mut self, text: impl Into<String>) -> Self {
        self.magic_text = text.into();
        self
    }

    /// Set the stack description (builder pattern).
    #[must_use]
    pub fn with_stack_description(mut self, text: impl Into<String>) -> Self {
        self.stack_description = text.into();
        self
    }

    /// Set the usage flags (builder pattern).
    #[must_use]
    pub fn with_usage(mut self, as_magic: bool, as_stack: bool) -> Self {
        self.can_use_as_magic = as_magic;
        self.can_use_as_stack = as_stack;
        self
    }

    /// Set the stack count, at least 1 (builder pattern).
    #[must_use]
    pub fn with_stack_count(mut self, count: u32) -> Self {
        self.stack_count = count.max(1);
        self
    }

    /// Set the cost (builder pattern).
    #[must_use]
    pub fn with_cost(mut self, cost: CardCost) -> Self {
        self.cost = cost;
        self
    }
}

/// Any card record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardRecord {
    Monster(MonsterRecord),
    Spell(SpellRecord),
}

impl CardRecord {
    /// The record's identifier.
    #[must_use]
    pub fn id(&self) -> CardId {
        match self {
            CardRecord::Monster(m) => m.id,
            CardRecord::Spell(s) => s.id,
        }
    }

    /// The card name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            CardRecord::Monster(m) => &m.name,
            CardRecord::Spell(s) => &s.name,
        }
    }

    /// Which kind of record this is.
    #[must_use]
    pub fn kind(&self) -> CardKind {
        match self {
            CardRecord::Monster(_) => CardKind::Monster,
            CardRecord::Spell(_) => CardKind::Spell,
        }
    }

    /// Main rules text: monster effect or spell magic text.
    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            CardRecord::Monster(m) => &m.effect,
            CardRecord::Spell(s) => &s.magic_text,
        }
    }

    /// The card's cost.
    #[must_use]
    pub fn cost(&self) -> &CardCost {
        match self {
            CardRecord::Monster(m) => &m.cost,
            CardRecord::Spell(s) => &s.cost,
        }
    }

    /// Borrow as a monster.
    #[must_use]
    pub fn as_monster(&self) -> Option<&MonsterRecord> {
        match self {
            CardRecord::Monster(m) => Some(m),
            CardRecord::Spell(_) => None,
        }
    }

    /// Borrow as a spell.
    #[must_use]
    pub fn as_spell(&self) -> Option<&SpellRecord> {
        match self {
            CardRecord::Spell(s) => Some(s),
            CardRecord::Monster(_) => None,
        }
    }
}

impl From<MonsterRecord> for CardRecord {
    fn from(m: MonsterRecord) -> Self {
        CardRecord::Monster(m)
    }
}

impl From<SpellRecord> for CardRecord {
    fn from(s: SpellRecord) -> Self {
        CardRecord::Spell(s)
    }
}
