use super::roller::Roller;
use crate::common::*;
use crate::config::{CritMethod, Verbosity};
use crate::grade::Grade;
use crate::parse::ast::{self, Dice, DicePart, Test};
use crate::system::{GameSystem, GameSystemRules};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Die {
    pub value: UInt,
    pub kept: bool,
}

/// A [DicePart] after rolling.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DicePartRoll {
    part: DicePart,
    dice: Vec<Die>,
    total: Int,
    is_min: bool,
    is_max: bool,
}

impl DicePartRoll {
    pub fn create<R: Roller>(part: &DicePart, roller: &mut R) -> Self {
        let faces = match (part.fixed_rolls(), NonZeroUInt::new(part.sides())) {
            (Some(fixed), _) => fixed.to_vec(),
            (None, Some(sides)) => roller.roll_iter(part.count() as usize, sides).collect(),
            (None, None) => Vec::new(),
        };
        Self::from_faces(part.clone(), faces)
    }

    /// Applies the part's drop/keep rule to `faces` and totals the result.
    pub fn from_faces(part: DicePart, faces: Vec<UInt>) -> Self {
        let kept = match part.drop_keep() {
            Some(dk) => dk.select(&faces),
            None => vec![true; faces.len()],
        };
        let dice = faces
            .into_iter()
            .zip(kept)
            .map(|(value, kept)| Die { value, kept })
            .collect();
        Self::with_dice(part, dice)
    }

    pub(crate) fn with_dice(part: DicePart, dice: Vec<Die>) -> Self {
        let kept: Vec<UInt> = dice.iter().filter(|d| d.kept).map(|d| d.value).collect();
        let sum: Int = kept.iter().map(|&v| v as Int).sum();
        let is_min = !kept.is_empty() && kept.iter().all(|&v| v == 1);
        let is_max = !kept.is_empty() && kept.iter().all(|&v| v == part.sides());
        Self {
            total: sum.saturating_add(part.modifier_value()),
            part,
            dice,
            is_min,
            is_max,
        }
    }

    pub fn part(&self) -> &DicePart {
        &self.part
    }

    /// Every die in roll order, dropped ones included.
    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    pub fn kept_faces(&self) -> impl Iterator<Item = UInt> + '_ {
        self.dice.iter().filter(|d| d.kept).map(|d| d.value)
    }

    /// Kept dice plus the flat modifier.
    pub fn total(&self) -> Int {
        self.total
    }

    /// Whether every kept die shows 1.
    pub fn is_min(&self) -> bool {
        self.is_min
    }

    /// Whether every kept die shows its highest face.
    pub fn is_max(&self) -> bool {
        self.is_max
    }

    /// The face of the one die that counts, if exactly one does.
    pub fn natural(&self) -> Option<UInt> {
        let mut kept = self.kept_faces();
        match (kept.next(), kept.next()) {
            (Some(face), None) => Some(face),
            _ => None,
        }
    }

    /// Doubles the dice, the drop/keep count and the flat modifier, keeping
    /// the faces already rolled.
    pub(crate) fn doubled(&self) -> Self {
        let mut part = self.part.clone();
        part.count = part.count.saturating_mul(2);
        part.drop_keep = part.drop_keep.map(|dk| dk.scaled(2));
        if part.sign != Sign::Times {
            part.modifier = part.modifier.saturating_mul(2);
        }
        part.fixed_rolls = None;
        let faces = self.dice.iter().chain(self.dice.iter()).map(|d| d.value).collect();
        Self::from_faces(part, faces)
    }
}

/// A [Dice] after rolling and grading.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DiceRoll {
    parts: NonEmpty<DicePartRoll>,
    total: Int,
    grade: Grade,
    critical: Option<CritMethod>,
}

impl DiceRoll {
    pub fn create<R: Roller>(dice: &Dice, roller: &mut R, rules: &GameSystem) -> Self {
        let parts = dice
            .parts()
            .iter()
            .map(|part| DicePartRoll::create(part, roller))
            .collect();
        Self::new(
            non_empty_or(parts, || DicePartRoll::from_faces(DicePart::empty(), Vec::new())),
            rules,
        )
    }

    pub(crate) fn new(parts: NonEmpty<DicePartRoll>, rules: &GameSystem) -> Self {
        let total = rules.total(&parts);
        let grade = rules.grade(&parts, total);
        tracing::trace!(total, ?grade, "rolled dice");
        Self {
            parts,
            total,
            grade,
            critical: None,
        }
    }

    pub(crate) fn with_critical(mut self, method: CritMethod) -> Self {
        self.critical = Some(method);
        self
    }

    pub fn parts(&self) -> &[DicePartRoll] {
        &self.parts
    }

    pub(crate) fn into_parts(self) -> Vec<DicePartRoll> {
        self.parts.into_vec()
    }

    pub fn total(&self) -> Int {
        self.total
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }

    /// The method that raised this roll's damage, if a critical hit did.
    pub fn critical(&self) -> Option<CritMethod> {
        self.critical
    }

    pub fn test(&self) -> Option<&Test> {
        self.parts.iter().find_map(|p| p.part().test())
    }

    pub fn description(&self) -> String {
        ast::join_descriptions(self.parts.iter().map(DicePartRoll::part))
    }

    pub fn notation(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = ast::write_notation(&mut out, self.parts.iter().map(DicePartRoll::part));
        out
    }

    /// The first part that rolls d20s.
    pub fn d20(&self) -> Option<&DicePartRoll> {
        self.parts.iter().find(|p| p.part().sides() == 20 && p.part().has_dice())
    }

    /// A d20 roll tested against an armor class.
    pub fn is_attack(&self) -> bool {
        self.d20().is_some() && self.test().map_or(false, |t| t.alias.is_armor_class())
    }

    /// Untested dice with no d20 among them.
    pub fn is_damage(&self) -> bool {
        self.d20().is_none()
            && self.test().is_none()
            && self.parts.iter().any(|p| p.part().has_dice())
    }
}

/// Folds part totals left to right through each part's sign.
pub fn arithmetic_total(parts: &[DicePartRoll]) -> Int {
    parts
        .iter()
        .fold(0, |total, p| p.part().sign().apply(total, p.total()))
}

/// A [DiceGroup](crate::parse::ast::DiceGroup) after rolling, with critical
/// damage already applied.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DiceGroupRoll {
    pub(crate) rolls: NonEmpty<DiceRoll>,
    pub(crate) verbosity: Verbosity,
    pub(crate) crit_method: CritMethod,
}

impl DiceGroupRoll {
    pub fn rolls(&self) -> &[DiceRoll] {
        &self.rolls
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn crit_method(&self) -> CritMethod {
        self.crit_method
    }

    pub fn totals(&self) -> Vec<Int> {
        self.rolls.iter().map(DiceRoll::total).collect()
    }

    /// Index pairs of an attack roll directly followed by its damage roll.
    pub fn attack_damage_pairs(&self) -> Vec<(usize, usize)> {
        super::finalize::attack_damage_pairs(&self.rolls)
    }
}
