use super::GameSystemRules;
use crate::common::{parse_num, Int, UInt};
use crate::config::{SystemKind, Verbosity};
use crate::grade::Grade;
use crate::parse::ast::{DicePart, Test};
use crate::parse::{RuleError, Token, TokenKind, TokenRule};
use crate::roll::{DicePartRoll, DiceRoll};

pub const HUNGER_PATTERN: &str = r"(?i)\bh(?:unger)?\s*(\d+)\b";

const SUCCESS_FACE: UInt = 6;
const CRITICAL_FACE: UInt = 10;

/// Success-counting d10 pools where the last few dice are hunger dice.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Vampire;

/// A d10 pool split into its regular and hunger dice.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Pool {
    pub base: Vec<UInt>,
    pub hunger: Vec<UInt>,
    pub modifier: Int,
}

impl Pool {
    /// Collects every kept die in roll order. The trailing dice, as many as
    /// the parts ask for, are hunger dice.
    pub fn from_parts(parts: &[DicePartRoll]) -> Self {
        let mut base: Vec<UInt> = parts
            .iter()
            .filter(|p| p.part().has_dice())
            .flat_map(DicePartRoll::kept_faces)
            .collect();
        let hunger_dice: usize = parts
            .iter()
            .filter_map(|p| p.part().hunger())
            .map(|h| h as usize)
            .sum();
        let hunger = base.split_off(base.len() - hunger_dice.min(base.len()));
        let modifier = parts.iter().fold(0, |total, p| {
            let flat = if p.part().has_dice() {
                p.part().modifier_value()
            } else {
                p.total()
            };
            p.part().sign().apply(total, flat)
        });
        Self {
            base,
            hunger,
            modifier,
        }
    }

    fn all(&self) -> impl Iterator<Item = UInt> + '_ {
        self.base.iter().chain(&self.hunger).copied()
    }

    pub fn criticals(&self) -> usize {
        self.all().filter(|&f| f >= CRITICAL_FACE).count()
    }

    /// Each die of 6 or more is a success; each pair of 10s adds two more.
    pub fn successes(&self) -> Int {
        let hits = self.all().filter(|&f| f >= SUCCESS_FACE).count();
        (hits + 2 * (self.criticals() / 2)) as Int
    }

    pub fn grade(&self, test: Option<&Test>, total: Int) -> Grade {
        let Some(test) = test else {
            return Grade::Unknown;
        };
        if test.passes(total) {
            if self.criticals() < 2 {
                Grade::Success
            } else if self.hunger.iter().any(|&f| f >= CRITICAL_FACE) {
                Grade::MessyCritical
            } else {
                Grade::CriticalSuccess
            }
        } else if self.hunger.contains(&1) {
            Grade::BestialFailure
        } else {
            Grade::Failure
        }
    }

    /// Every die highest first, hunger dice ahead of regular ones on ties.
    pub fn sorted(&self) -> Vec<(UInt, bool)> {
        let mut dice: Vec<(UInt, bool)> = self
            .hunger
            .iter()
            .map(|&f| (f, true))
            .chain(self.base.iter().map(|&f| (f, false)))
            .collect();
        dice.sort_by(|a, b| b.0.cmp(&a.0));
        dice
    }
}

pub fn base_die_grade(face: UInt) -> Grade {
    match face {
        0..=5 => Grade::Failure,
        6..=9 => Grade::Success,
        _ => Grade::CriticalSuccess,
    }
}

pub fn hunger_die_grade(face: UInt) -> Grade {
    match face {
        0 | 1 => Grade::BestialFailure,
        2..=5 => Grade::Failure,
        6..=9 => Grade::Success,
        _ => Grade::MessyCritical,
    }
}

fn faces(dice: &[UInt], verbosity: Verbosity, grade: fn(UInt) -> Grade) -> String {
    let mut dice = dice.to_vec();
    if verbosity < Verbosity::Xxl {
        dice.sort_by(|a, b| b.cmp(a));
    }
    dice.iter()
        .map(|&f| match verbosity {
            Verbosity::Xxl => format!("{} ({})", f, grade(f)),
            _ => f.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

impl GameSystemRules for Vampire {
    fn kind(&self) -> SystemKind {
        SystemKind::Vampire
    }

    fn token_rules(&self) -> Result<Vec<TokenRule>, RuleError> {
        Ok(vec![TokenRule::new(TokenKind::Hunger, HUNGER_PATTERN)?])
    }

    fn apply_token(&self, part: &mut DicePart, token: &Token<'_>) -> bool {
        match token.kind {
            TokenKind::Hunger => {
                part.hunger = parse_num("hunger", token.capture(1));
                true
            }
            _ => false,
        }
    }

    fn total(&self, parts: &[DicePartRoll]) -> Int {
        let pool = Pool::from_parts(parts);
        pool.successes().saturating_add(pool.modifier)
    }

    fn grade(&self, parts: &[DicePartRoll], total: Int) -> Grade {
        let test = parts.iter().find_map(|p| p.part().test());
        Pool::from_parts(parts).grade(test, total)
    }

    fn breakdown(&self, roll: &DiceRoll, _verbosity: Verbosity) -> String {
        let pool = Pool::from_parts(roll.parts());
        let dice = pool
            .sorted()
            .into_iter()
            .map(|(f, hunger)| if hunger { format!("_{}_", f) } else { f.to_string() })
            .collect::<Vec<_>>()
            .join(", ");
        let mut out = format!("[{}] {} successes", dice, pool.successes());
        if pool.modifier > 0 {
            out += &format!(" + {}", pool.modifier);
        } else if pool.modifier < 0 {
            out += &format!(" - {}", pool.modifier.unsigned_abs());
        }
        out
    }

    fn details(&self, roll: &DiceRoll, verbosity: Verbosity) -> Vec<String> {
        let pool = Pool::from_parts(roll.parts());
        let mut lines = vec![format!("  base: {}", faces(&pool.base, verbosity, base_die_grade))];
        if !pool.hunger.is_empty() {
            lines.push(format!(
                "  hunger: {}",
                faces(&pool.hunger, verbosity, hunger_die_grade)
            ));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{CompareOp, Sign, TargetKind};

    fn pool(faces: &[UInt], hunger: UInt, target: Option<Int>) -> Vec<DicePartRoll> {
        let mut part = DicePart::dice(faces.len() as Int, 10).unwrap().with_hunger(hunger);
        if let Some(target) = target {
            part = part.with_test(Test::new(TargetKind::Vs, CompareOp::Ge, target));
        }
        vec![DicePartRoll::from_faces(part, faces.to_vec())]
    }

    fn graded(parts: &[DicePartRoll]) -> (Int, Grade) {
        let total = Vampire.total(parts);
        (total, Vampire.grade(parts, total))
    }

    #[test]
    fn test_pool_split() {
        let split = Pool::from_parts(&pool(&[10, 6, 10, 1], 2, None));
        assert_eq!(split.base, vec![10, 6]);
        assert_eq!(split.hunger, vec![10, 1]);
        assert_eq!(split.successes(), 5);

        let over = Pool::from_parts(&pool(&[3, 4], 5, None));
        assert!(over.base.is_empty());
        assert_eq!(over.hunger, vec![3, 4]);
    }

    #[test]
    fn test_success_counting() {
        assert_eq!(graded(&pool(&[7, 3, 6], 0, Some(2))), (2, Grade::Success));
        assert_eq!(graded(&pool(&[10, 10, 2], 0, Some(3))), (4, Grade::CriticalSuccess));
        assert_eq!(graded(&pool(&[10, 10, 10, 1], 0, None)).0, 5);
    }

    #[test]
    fn test_messy_and_bestial() {
        assert_eq!(graded(&pool(&[10, 2, 10], 1, Some(3))), (4, Grade::MessyCritical));
        assert_eq!(graded(&pool(&[10, 10, 6, 1], 1, Some(6))), (5, Grade::BestialFailure));
        assert_eq!(graded(&pool(&[2, 3, 1], 0, Some(2))), (0, Grade::Failure));
    }

    #[test]
    fn test_paired_tens_beat_low_target() {
        let split = Pool::from_parts(&pool(&[10, 10, 6, 1], 1, Some(3)));
        assert_eq!(split.successes(), 5);
        assert_eq!(graded(&pool(&[10, 10, 6, 1], 1, Some(3))), (5, Grade::CriticalSuccess));
    }

    #[test]
    fn test_no_target() {
        assert_eq!(graded(&pool(&[10, 10], 1, None)).1, Grade::Unknown);
    }

    #[test]
    fn test_modifier_counts_as_successes() {
        let mut parts = pool(&[6, 2], 0, Some(2));
        parts.push(DicePartRoll::from_faces(
            DicePart::modifier(Sign::Plus, 1),
            Vec::new(),
        ));
        assert_eq!(graded(&parts), (2, Grade::Success));
    }

    #[test]
    fn test_sorted_ties() {
        let tied = Pool {
            base: vec![6, 10],
            hunger: vec![10],
            modifier: 0,
        };
        assert_eq!(tied.sorted(), vec![(10, true), (10, false), (6, false)]);
    }

    #[test]
    fn test_die_tables() {
        assert_eq!(base_die_grade(1), Grade::Failure);
        assert_eq!(base_die_grade(10), Grade::CriticalSuccess);
        assert_eq!(hunger_die_grade(1), Grade::BestialFailure);
        assert_eq!(hunger_die_grade(7), Grade::Success);
        assert_eq!(hunger_die_grade(10), Grade::MessyCritical);
    }
}
