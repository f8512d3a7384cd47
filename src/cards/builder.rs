//! Record classification and construction.
//!
//! Field 0 of every row is a discriminator tag:
//!
//! | tag       | effect                                        |
//! |-----------|-----------------------------------------------|
//! | `monster` | builds a [`MonsterRecord`]                    |
//! | `spell`   | builds a [`SpellRecord`]                      |
//! | `card`    | adds owned copies (`card,<id>,<count>`)       |
//! | `deck`    | adds deck copies (`deck,<id>,<count>`)        |
//! | `coins`   | sets the coin balance (`coins,<value>`)       |
//!
//! Blank and comment tags are skipped silently. Anything else that cannot
//! be used is dropped with a [`Diagnostic`]; one bad row never stops the
//! rest of the document from loading.

use crate::core::{excerpt, CardId, Diagnostic, DiagnosticKind, LoaderConfig};
use crate::csv::{find_in_window, resolve, stack_description, FieldSpec, HeaderIndex, Row};
use crate::store::Snapshot;

use super::record::{Attribute, CardCost, MonsterKind, MonsterRecord, SpellRecord, MAX_LEVEL, MIN_LEVEL};

/// Discriminator tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    Monster,
    Spell,
    Card,
    Deck,
    Coins,
}

impl Tag {
    /// Parse a tag cell, case-insensitive.
    #[must_use]
    pub fn parse(cell: &str) -> Option<Self> {
        const TAGS: [(&str, Tag); 5] = [
            ("monster", Tag::Monster),
            ("spell", Tag::Spell),
            ("card", Tag::Card),
            ("deck", Tag::Deck),
            ("coins", Tag::Coins),
        ];
        let cell = cell.trim();
        TAGS.iter()
            .find(|(name, _)| cell.eq_ignore_ascii_case(name))
            .map(|(_, tag)| *tag)
    }

    /// The tag as written in documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Tag::Monster => "monster",
            Tag::Spell => "spell",
            Tag::Card => "card",
            Tag::Deck => "deck",
            Tag::Coins => "coins",
        }
    }

    /// Fewest fields a row with this tag can have.
    #[must_use]
    pub const fn min_fields(self) -> usize {
        match self {
            Tag::Monster | Tag::Spell | Tag::Coins => 2,
            Tag::Card | Tag::Deck => 3,
        }
    }
}

/// Logical fields and their positions in the canonical layout.
pub mod fields {
    use crate::csv::FieldSpec;

    pub const ID: FieldSpec = FieldSpec::new(&["卡片ID", "cardid", "id"], 1);
    pub const NAME: FieldSpec = FieldSpec::new(&["卡名", "cardname", "name"], 2);

    pub const ATTRIBUTE: FieldSpec = FieldSpec::new(&["属性", "attribute"], 3);
    pub const LEVEL: FieldSpec = FieldSpec::new(&["等级", "level", "lv"], 4);
    pub const ATTACK: FieldSpec = FieldSpec::new(&["战力", "attack", "atk"], 5);
    pub const BOND: FieldSpec = FieldSpec::new(&["羁绊", "bond"], 6);
    pub const BOND_EFFECT: FieldSpec = FieldSpec::new(&["羁绊描述", "bondeffect", "bonddescription"], 7);
    pub const SUB_TYPE: FieldSpec = FieldSpec::new(&["类型", "subtype", "monstertype"], 8);
    pub const EFFECT: FieldSpec = FieldSpec::new(&["效果", "effect"], 9);
    pub const MONSTER_COST: FieldSpec = FieldSpec::new(&["费用", "cost"], 10);
    pub const MONSTER_COST_TEXT: FieldSpec = FieldSpec::new(&["费用描述", "costdescription"], 11);

    pub const MAGIC: FieldSpec = FieldSpec::new(&["咒术描述", "magictext", "magic"], 3);
    pub const AS_MAGIC: FieldSpec = FieldSpec::new(&["可咒术", "canmagic"], 5);
    pub const AS_STACK: FieldSpec = FieldSpec::new(&["可叠放", "canstack"], 6);
    pub const SPELL_COST: FieldSpec = FieldSpec::new(&["费用", "cost"], 7);
    pub const SPELL_COST_TEXT: FieldSpec = FieldSpec::new(&["费用描述", "costdescription"], 8);
}

/// Parse a bool-like flag cell. Blank is `None`.
#[must_use]
pub fn parse_flag(cell: &str) -> Option<bool> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    let lower = cell.to_lowercase();
    Some(matches!(
        lower.as_str(),
        "1" | "true" | "yes" | "y" | "t" | "magic" | "stack"
    ))
}

/// Classifies rows and writes what they describe into a [`Snapshot`].
///
/// Holds the per-document context: configuration and the header index
/// resolved once for the whole document.
#[derive(Clone, Copy, Debug)]
pub struct RowClassifier<'a> {
    config: &'a LoaderConfig,
    header: &'a HeaderIndex,
}

impl<'a> RowClassifier<'a> {
    /// Create a classifier for one document.
    #[must_use]
    pub fn new(config: &'a LoaderConfig, header: &'a HeaderIndex) -> Self {
        Self { config, header }
    }

    fn field<'r>(&self, row: &'r Row, spec: &FieldSpec) -> &'r str {
        resolve(row, self.header, spec, self.config.comment_marker)
    }

    /// Classify one row and apply it to `out`.
    ///
    /// `index` is the row's position in the document, used for diagnostics.
    pub fn classify_and_build(
        &self,
        index: usize,
        row: &Row,
        out: &mut Snapshot,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let raw_tag = row.cell(0);
        if raw_tag.is_empty() || self.config.is_comment(raw_tag) {
            return;
        }

        let Some(tag) = Tag::parse(raw_tag) else {
            report(diagnostics, index, DiagnosticKind::UnknownTag(excerpt(raw_tag)));
            return;
        };

        if row.len() < tag.min_fields() {
            report(
                diagnostics,
                index,
                DiagnosticKind::TooFewFields {
                    tag: tag.as_str().to_string(),
                    found: row.len(),
                    needed: tag.min_fields(),
                },
            );
            return;
        }

        let mut ctx = RowContext { index, diagnostics };
        match tag {
            Tag::Monster => self.build_monster(row, out, &mut ctx),
            Tag::Spell => self.build_spell(row, out, &mut ctx),
            Tag::Card | Tag::Deck => build_count(tag, row, out, &mut ctx),
            Tag::Coins => build_coins(row, out, &mut ctx),
        }
    }

    fn build_monster(&self, row: &Row, out: &mut Snapshot, ctx: &mut RowContext<'_>) {
        let Some(id) = self.parse_id(Tag::Monster, row, ctx) else {
            return;
        };

        let name = self.field(row, &fields::NAME);
        let level = self.parse_level(id, row, ctx);
        let attack = parse_non_negative(self.field(row, &fields::ATTACK));
        let attribute = self.resolve_attribute(id, row, ctx);
        let kind = MonsterKind::from_label(self.field(row, &fields::SUB_TYPE));
        let cost = self.parse_cost(row, &fields::MONSTER_COST, &fields::MONSTER_COST_TEXT);

        let mut monster = MonsterRecord::new(id, name)
            .with_level(level)
            .with_attack(attack)
            .with_bond(self.field(row, &fields::BOND), self.field(row, &fields::BOND_EFFECT))
            .with_kind(kind)
            .with_effect(self.field(row, &fields::EFFECT))
            .with_cost(cost);
        monster.attribute = attribute;

        tracing::debug!(
            id = %id,
            name = %monster.name,
            attribute = ?monster.attribute,
            level = monster.level,
            attack = monster.attack,
            "loaded monster"
        );
        ctx.insert(out, monster.into());
    }

    fn build_spell(&self, row: &Row, out: &mut Snapshot, ctx: &mut RowContext<'_>) {
        let Some(id) = self.parse_id(Tag::Spell, row, ctx) else {
            return;
        };

        let name = self.field(row, &fields::NAME);
        let magic = self.field(row, &fields::MAGIC);
        let stack = stack_description(row, self.header, self.config);
        let as_magic = parse_flag(self.field(row, &fields::AS_MAGIC)).unwrap_or(!magic.is_empty());
        let as_stack = parse_flag(self.field(row, &fields::AS_STACK)).unwrap_or(!stack.is_empty());
        let cost = self.parse_cost(row, &fields::SPELL_COST, &fields::SPELL_COST_TEXT);

        let spell = SpellRecord::new(id, name)
            .with_magic_text(magic)
            .with_stack_description(stack)
            .with_usage(as_magic, as_stack)
            .with_cost(cost);

        tracing::debug!(
            id = %id,
            name = %spell.name,
            stack = %excerpt(&spell.stack_description),
            "loaded spell"
        );
        ctx.insert(out, spell.into());
    }

    fn parse_id(&self, tag: Tag, row: &Row, ctx: &mut RowContext<'_>) -> Option<CardId> {
        let raw = self.field(row, &fields::ID);
        let id = CardId::parse_cell(raw);
        if id.is_none() {
            ctx.report(DiagnosticKind::MalformedId {
                tag: tag.as_str().to_string(),
                raw: excerpt(raw),
            });
        }
        id
    }

    fn parse_level(&self, id: CardId, row: &Row, ctx: &mut RowContext<'_>) -> u8 {
        let raw = self.field(row, &fields::LEVEL);
        match raw.parse::<i64>() {
            Ok(lv) if (i64::from(MIN_LEVEL)..=i64::from(MAX_LEVEL)).contains(&lv) => lv as u8,
            parsed => {
                let clamped = match parsed {
                    Ok(lv) if lv > i64::from(MAX_LEVEL) => MAX_LEVEL,
                    _ => MIN_LEVEL,
                };
                ctx.report(DiagnosticKind::LevelOutOfRange {
                    id,
                    raw: excerpt(raw),
                    clamped,
                });
                clamped
            }
        }
    }

    /// The attribute column, or a known attribute token nearby when that
    /// column does not hold one.
    fn resolve_attribute(&self, id: CardId, row: &Row, ctx: &mut RowContext<'_>) -> Option<Attribute> {
        let raw = self.field(row, &fields::ATTRIBUTE);
        if let Some(attribute) = Attribute::parse(raw) {
            return Some(attribute);
        }

        let scanned = find_in_window(row, self.config.attribute_scan, |cell| Attribute::parse(cell).is_some())
            .and_then(|(_, cell)| Attribute::parse(cell));
        if scanned.is_none() && !raw.is_empty() {
            ctx.report(DiagnosticKind::UnknownAttribute {
                id,
                raw: excerpt(raw),
            });
        }
        scanned
    }

    fn parse_cost(&self, row: &Row, value: &FieldSpec, text: &FieldSpec) -> CardCost {
        let raw_value = self.field(row, value);
        let raw_text = self.field(row, text);
        match raw_value.parse::<u32>() {
            Ok(v) => CardCost::new(v, raw_text),
            Err(_) => CardCost::free(),
        }
    }
}

/// Per-row diagnostic context.
struct RowContext<'d> {
    index: usize,
    diagnostics: &'d mut Vec<Diagnostic>,
}

impl RowContext<'_> {
    fn report(&mut self, kind: DiagnosticKind) {
        report(self.diagnostics, self.index, kind);
    }

    fn insert(&mut self, out: &mut Snapshot, record: crate::cards::CardRecord) {
        let id = record.id();
        if out.insert_record(record).is_some() {
            self.report(DiagnosticKind::DuplicateId(id));
        }
    }
}

fn report(diagnostics: &mut Vec<Diagnostic>, row: usize, kind: DiagnosticKind) {
    let diagnostic = Diagnostic::new(row, kind);
    tracing::warn!(row, "{}", diagnostic);
    diagnostics.push(diagnostic);
}

fn parse_non_negative(raw: &str) -> u32 {
    match raw.parse::<i64>() {
        Ok(v) => u32::try_from(v.max(0)).unwrap_or(u32::MAX),
        Err(_) => 0,
    }
}

fn build_count(tag: Tag, row: &Row, out: &mut Snapshot, ctx: &mut RowContext<'_>) {
    let raw_id = row.cell(1);
    let Some(id) = CardId::parse_cell(raw_id) else {
        ctx.report(DiagnosticKind::MalformedId {
            tag: tag.as_str().to_string(),
            raw: excerpt(raw_id),
        });
        return;
    };

    let raw_count = row.cell(2);
    let count = match raw_count.parse::<i64>() {
        Ok(c) => c,
        Err(_) => {
            ctx.report(DiagnosticKind::MalformedCount {
                tag: tag.as_str().to_string(),
                raw: excerpt(raw_count),
            });
            return;
        }
    };

    if count <= 0 {
        tracing::debug!(row = ctx.index, id = %id, count, "skipping non-positive count");
        return;
    }

    let copies = u32::try_from(count).unwrap_or(u32::MAX);
    match tag {
        Tag::Deck => out.add_deck(id, copies),
        _ => out.add_inventory(id, copies),
    }
}

fn build_coins(row: &Row, out: &mut Snapshot, ctx: &mut RowContext<'_>) {
    let raw = row.cell(1);
    match raw.parse::<i64>() {
        Ok(coins) => out.set_coins(coins),
        Err(_) => ctx.report(DiagnosticKind::MalformedCoins { raw: excerpt(raw) }),
    }
}

/// Classify a single row against a snapshot.
///
/// Convenience wrapper over [`RowClassifier`] for one-off rows.
pub fn classify_and_build(
    index: usize,
    row: &Row,
    header: &HeaderIndex,
    config: &LoaderConfig,
    out: &mut Snapshot,
    diagnostics: &mut Vec<Diagnostic>,
) {
    RowClassifier::new(config, header).classify_and_build(index, row, out, diagnostics);
}
