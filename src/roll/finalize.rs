use super::roller::Roller;
use super::tree::{DicePartRoll, DiceGroupRoll, DiceRoll};
use crate::common::*;
use crate::config::{CritMethod, Verbosity};
use crate::grade::Grade;
use crate::parse::ast::{DiceGroup, DicePart};
use crate::system::{GameSystem, GameSystemRules};

/// A rolled group whose damage hasn't been adjusted for critical hits yet.
/// [PendingGroupRoll::finalize] is the only way to a [DiceGroupRoll].
#[derive(Debug, Clone)]
pub(crate) struct PendingGroupRoll {
    rolls: NonEmpty<DiceRoll>,
    verbosity: Verbosity,
    crit_method: CritMethod,
}

impl PendingGroupRoll {
    pub(crate) fn roll<R: Roller>(group: &DiceGroup, roller: &mut R, rules: &GameSystem) -> Self {
        let rolls = group
            .dice()
            .iter()
            .map(|dice| DiceRoll::create(dice, roller, rules))
            .collect();
        Self {
            rolls: non_empty_or(rolls, || {
                DiceRoll::new(
                    NonEmpty::new(DicePartRoll::from_faces(DicePart::empty(), Vec::new())),
                    rules,
                )
            }),
            verbosity: group.verbosity(),
            crit_method: group.crit_method(),
        }
    }

    /// Raises the damage that follows each critical attack.
    pub(crate) fn finalize(self, rules: &GameSystem) -> DiceGroupRoll {
        let Self {
            rolls,
            verbosity,
            crit_method,
        } = self;

        let Some(method) = rules.crit_method(crit_method) else {
            tracing::trace!(system = %rules.kind(), "no critical damage in this system");
            return DiceGroupRoll {
                rolls,
                verbosity,
                crit_method,
            };
        };

        let critical: Vec<usize> = attack_damage_pairs(&rolls)
            .into_iter()
            .filter(|&(attack, _)| rolls[attack].grade() == Grade::CriticalSuccess)
            .map(|(_, damage)| damage)
            .collect();
        if critical.is_empty() {
            tracing::trace!("no critical attacks to follow up");
        }

        let rolls = rolls
            .into_vec()
            .into_iter()
            .enumerate()
            .map(|(i, roll)| {
                if critical.contains(&i) {
                    critical_damage(roll, method, rules)
                } else {
                    roll
                }
            })
            .collect();

        DiceGroupRoll {
            rolls: non_empty_or(rolls, || {
                DiceRoll::new(
                    NonEmpty::new(DicePartRoll::from_faces(DicePart::empty(), Vec::new())),
                    rules,
                )
            }),
            verbosity,
            crit_method,
        }
    }
}

/// Pairs each attack with the damage roll right after it. A roll belongs
/// to at most one pair.
pub(crate) fn attack_damage_pairs(rolls: &[DiceRoll]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    let mut i = 0;
    while i + 1 < rolls.len() {
        if rolls[i].is_attack() && rolls[i + 1].is_damage() {
            pairs.push((i, i + 1));
            i += 2;
        } else {
            i += 1;
        }
    }
    pairs
}

/// Rebuilds a damage roll with `method` applied.
pub fn critical_damage(damage: DiceRoll, method: CritMethod, rules: &GameSystem) -> DiceRoll {
    let mut parts = damage.into_parts();
    match method {
        CritMethod::TimesTwo => {
            parts.push(DicePartRoll::from_faces(DicePart::modifier(Sign::Times, 2), Vec::new()));
        }
        CritMethod::RollTwice => {
            parts = parts.iter().map(DicePartRoll::doubled).collect();
        }
        CritMethod::AddMax => {
            let max = parts
                .iter()
                .map(DicePartRoll::part)
                .filter(|p| p.has_dice())
                .fold(0, |max: Int, p| p.sign().apply(max, p.max_dice_value()));
            parts.push(DicePartRoll::from_faces(DicePart::modifier(Sign::Plus, max), Vec::new()));
        }
    }
    tracing::debug!(%method, "applied critical damage");
    let parts = non_empty_or(parts, || DicePartRoll::from_faces(DicePart::empty(), Vec::new()));
    DiceRoll::new(parts, rules).with_critical(method)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineConfig, SystemKind};
    use crate::parse::TokenParsers;
    use crate::roll::ScriptedRoller;

    fn roll_with(kind: SystemKind, method: CritMethod, input: &str, faces: &[UInt]) -> DiceGroupRoll {
        let config = EngineConfig {
            system: kind,
            crit_method: method,
            ..EngineConfig::default()
        };
        let rules = GameSystem::from_config(&config).unwrap();
        let parsers = TokenParsers::extended(rules.token_rules().unwrap()).unwrap();
        let group = DiceGroup::from_tokens(&parsers.tokenize(input), &rules).with_crit_method(method);
        let mut roller = ScriptedRoller::new(faces.iter().copied());
        PendingGroupRoll::roll(&group, &mut roller, &rules).finalize(&rules)
    }

    #[test]
    fn test_pairs() {
        let group = roll_with(
            SystemKind::Pathfinder,
            CritMethod::TimesTwo,
            "1d20 ac 10; 1d6; 1d6; 1d20 ac 10; 1d20 ac 10; 2d4",
            &[5],
        );
        assert_eq!(group.attack_damage_pairs(), vec![(0, 1), (4, 5)]);
    }

    #[test]
    fn test_times_two() {
        let group = roll_with(
            SystemKind::Pathfinder,
            CritMethod::TimesTwo,
            "1d20+7 ac 18 2d6+4",
            &[20, 3, 5],
        );
        let rolls = group.rolls();
        assert_eq!(rolls[0].grade(), Grade::CriticalSuccess);
        assert_eq!(rolls[1].total(), 24);
        assert_eq!(rolls[1].critical(), Some(CritMethod::TimesTwo));
        assert_eq!(rolls[1].notation(), "2d6+4*2");
    }

    #[test]
    fn test_roll_twice() {
        let group = roll_with(
            SystemKind::Pathfinder,
            CritMethod::RollTwice,
            "1d20+7 ac 18 2d6+4",
            &[20, 3, 5],
        );
        let damage = &group.rolls()[1];
        assert_eq!(damage.total(), 24);
        assert_eq!(damage.notation(), "4d6+8");
    }

    #[test]
    fn test_add_max() {
        let group = roll_with(
            SystemKind::Pathfinder,
            CritMethod::AddMax,
            "1d20+7 ac 18 2d6+4",
            &[20, 3, 5],
        );
        assert_eq!(group.rolls()[1].total(), 24);
        assert_eq!(group.rolls()[1].notation(), "2d6+4+12");
    }

    #[test]
    fn test_plain_hit_leaves_damage() {
        let group = roll_with(
            SystemKind::Pathfinder,
            CritMethod::TimesTwo,
            "1d20+7 ac 18 2d6+4",
            &[15, 3, 5],
        );
        assert_eq!(group.rolls()[0].grade(), Grade::Success);
        assert_eq!(group.rolls()[1].total(), 12);
        assert_eq!(group.rolls()[1].critical(), None);
    }

    #[test]
    fn test_generic_never_crits() {
        let group = roll_with(
            SystemKind::Generic,
            CritMethod::TimesTwo,
            "1d20+7 ac 18 2d6+4",
            &[20, 3, 5],
        );
        assert_eq!(group.rolls()[0].grade(), Grade::Success);
        assert_eq!(group.rolls()[1].total(), 12);
    }

    #[test]
    fn test_add_max_counts_kept_dice_and_signs() {
        let group = roll_with(
            SystemKind::Pathfinder,
            CritMethod::AddMax,
            "1d20+7 ac 18 4d6k3-1d4",
            &[20, 4, 1, 6, 4, 2],
        );
        let damage = &group.rolls()[1];
        assert_eq!(damage.total(), 26);
        assert_eq!(damage.notation(), "4d6kh3-1d4+14");
    }

    #[test]
    fn test_roll_twice_scales_keep() {
        let group = roll_with(
            SystemKind::Pathfinder,
            CritMethod::RollTwice,
            "1d20+7 ac 18 4d6k3",
            &[20, 4, 1, 6, 4],
        );
        let damage = &group.rolls()[1];
        assert_eq!(damage.total(), 28);
        assert_eq!(damage.notation(), "8d6kh6");
    }
}
