use super::tree::{DicePartRoll, DiceGroupRoll, DiceRoll, Die};
use crate::common::*;
use crate::config::Verbosity;
use crate::system::{GameSystem, GameSystemRules};

pub const CRITICAL_DAMAGE_MARKER: &str = "[critical-damage]";

/// Renders rolled groups at one verbosity tier. Every tier from `XS` up
/// prints what the tier below it printed, then adds to it.
#[derive(Debug, Clone, Copy)]
pub struct Stringifier<'r> {
    rules: &'r GameSystem,
    verbosity: Verbosity,
}

impl<'r> Stringifier<'r> {
    pub fn new(rules: &'r GameSystem, verbosity: Verbosity) -> Self {
        Self { rules, verbosity }
    }

    /// One line per roll. Damage after a missed attack is left out below
    /// `XL`; damage after any hit carries the critical-damage marker.
    pub fn str_group(&self, group: &DiceGroupRoll) -> String {
        let rolls = group.rolls();
        let pairs = group.attack_damage_pairs();
        let mut lines = Vec::with_capacity(rolls.len());

        for (i, roll) in rolls.iter().enumerate() {
            let attack = pairs
                .iter()
                .find(|&&(_, damage)| damage == i)
                .map(|&(attack, _)| rolls[attack].grade());
            let line = self.str_roll(roll);
            match attack {
                Some(grade) if grade.is_failure() && self.verbosity < Verbosity::Xl => {}
                Some(grade) if grade.is_success() => {
                    lines.push(format!("{} {}", CRITICAL_DAMAGE_MARKER, line))
                }
                _ => lines.push(line),
            }
        }
        lines.join("\n")
    }

    pub fn str_roll(&self, roll: &DiceRoll) -> String {
        let grade = roll.grade();
        let glyph = self.rules.glyph(grade);
        if self.verbosity == Verbosity::Xxs {
            return if grade.is_graded() {
                glyph.to_owned()
            } else {
                roll.total().to_string()
            };
        }

        let mut out = format!("{} ({})", glyph, roll.total());
        if self.verbosity >= Verbosity::S {
            let description = roll.description();
            if !description.is_empty() {
                out += &format!(" \"{}\"", description);
            }
        }
        if self.verbosity >= Verbosity::M {
            let notation = roll.notation();
            if !notation.is_empty() {
                out += &format!(" ← {}", notation);
            }
        }
        if self.verbosity >= Verbosity::L {
            let breakdown = self.rules.breakdown(roll, self.verbosity);
            match (grade.is_graded(), breakdown.is_empty()) {
                (true, true) => out += &format!(" | **{}**", self.rules.label(grade)),
                (true, false) => {
                    out += &format!(" | **{}** {}", self.rules.label(grade), breakdown)
                }
                (false, false) => out += &format!(" | {}", breakdown),
                (false, true) => {}
            }
        }
        if self.verbosity >= Verbosity::Xl {
            for line in self.rules.details(roll, self.verbosity) {
                out.push('\n');
                out.push_str(&line);
            }
        }
        out
    }
}

/// Dropped dice are struck through. From `XL` up, ones and highest faces
/// are bold.
pub fn str_die(die: &Die, sides: UInt, verbosity: Verbosity) -> String {
    let bold = verbosity >= Verbosity::Xl && (die.value == 1 || die.value == sides);
    match (die.kept, bold) {
        (false, _) => format!("~~{}~~", die.value),
        (true, true) => format!("**{}**", die.value),
        (true, false) => die.value.to_string(),
    }
}

/// Faces highest first, or in roll order at `XXL` and for parts that ask
/// not to be sorted.
pub fn str_faces(part: &DicePartRoll, verbosity: Verbosity) -> String {
    let mut dice = part.dice().to_vec();
    if verbosity < Verbosity::Xxl && !part.part().no_sort() {
        dice.sort_by(|a, b| b.value.cmp(&a.value));
    }
    dice.iter()
        .map(|die| str_die(die, part.part().sides(), verbosity))
        .collect::<Vec<_>>()
        .join(", ")
}

fn shown(part: &DicePartRoll) -> bool {
    part.part().has_dice() || part.part().modifier_value() != 0
}

/// `[5, 4] + 3` style summary of every part. It reads the same at every
/// tier that shows it.
pub fn breakdown(roll: &DiceRoll, verbosity: Verbosity) -> String {
    let verbosity = verbosity.min(Verbosity::L);
    let mut out = String::new();
    for part in roll.parts().iter().filter(|p| shown(p)) {
        let sign = part.part().display_sign();
        if !out.is_empty() {
            out += &format!(" {} ", sign);
        } else if sign != Sign::Plus {
            out += &sign.to_string();
        }

        let modifier = part.part().modifier_value();
        if part.part().has_dice() {
            out += &format!("[{}]", str_faces(part, verbosity));
            if modifier > 0 {
                out += &format!(" + {}", modifier);
            } else if modifier < 0 {
                out += &format!(" - {}", modifier.unsigned_abs());
            }
        } else {
            out += &modifier.unsigned_abs().to_string();
        }
    }
    out
}

/// One line per rolled part, plus a note when critical damage was applied.
pub fn part_details(roll: &DiceRoll, verbosity: Verbosity) -> Vec<String> {
    let mut lines: Vec<String> = roll
        .parts()
        .iter()
        .filter(|p| p.part().has_dice())
        .map(|p| {
            let mut line = format!("  {}: {} = {}", p.part(), str_faces(p, verbosity), p.total());
            if verbosity >= Verbosity::Xxl {
                if p.is_max() {
                    line += " (max)";
                } else if p.is_min() {
                    line += " (min)";
                }
            }
            line
        })
        .collect();
    if let Some(method) = roll.critical() {
        lines.push(format!("  critical damage: {}", method));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CritMethod, EngineConfig, SystemKind};
    use crate::parse::ast::DiceGroup;
    use crate::parse::TokenParsers;
    use crate::roll::{roll_group, ScriptedRoller};
    use proptest::prelude::*;

    struct Fixture {
        rules: GameSystem,
        parsers: TokenParsers,
    }

    impl Fixture {
        fn new(system: SystemKind) -> Self {
            let rules = GameSystem::from_config(&EngineConfig::for_system(system)).unwrap();
            let parsers = TokenParsers::extended(rules.token_rules().unwrap()).unwrap();
            Self { rules, parsers }
        }

        fn roll(&self, input: &str, faces: &[UInt]) -> DiceGroupRoll {
            let group = DiceGroup::from_tokens(&self.parsers.tokenize(input), &self.rules)
                .with_crit_method(CritMethod::TimesTwo);
            roll_group(&group, &mut ScriptedRoller::new(faces.iter().copied()), &self.rules)
        }

        fn show(&self, input: &str, faces: &[UInt], verbosity: Verbosity) -> String {
            Stringifier::new(&self.rules, verbosity).str_group(&self.roll(input, faces))
        }
    }

    fn check(system: SystemKind, input: &str, faces: &[UInt], verbosity: Verbosity, expected: &str) {
        assert_eq!(Fixture::new(system).show(input, faces, verbosity), expected);
    }

    #[test]
    fn test_tiers() {
        let input = "2d6+3 fire vs 10";
        let faces = [5, 4];
        let g = SystemKind::Generic;
        check(g, input, &faces, Verbosity::Xxs, "[success]");
        check(g, input, &faces, Verbosity::Xs, "[success] (12)");
        check(g, input, &faces, Verbosity::S, "[success] (12) \"fire\"");
        check(g, input, &faces, Verbosity::M, "[success] (12) \"fire\" ← 2d6+3 vs 10");
        check(
            g,
            input,
            &faces,
            Verbosity::L,
            "[success] (12) \"fire\" ← 2d6+3 vs 10 | **Success** [5, 4] + 3",
        );
        check(
            g,
            input,
            &faces,
            Verbosity::Xl,
            "[success] (12) \"fire\" ← 2d6+3 vs 10 | **Success** [5, 4] + 3\n  2d6+3: 5, 4 = 12",
        );
    }

    #[test]
    fn test_ungraded() {
        let g = SystemKind::Generic;
        check(g, "1d20+5", &[12], Verbosity::Xxs, "17");
        check(g, "1d20+5", &[12], Verbosity::Xs, "[dice] (17)");
        check(g, "1d20+5", &[12], Verbosity::L, "[dice] (17) ← 1d20+5 | [12] + 5");
    }

    #[test]
    fn test_dropped_and_raw_order() {
        let g = SystemKind::Generic;
        check(g, "4d6k3", &[4, 1, 6, 4], Verbosity::L, "[dice] (14) ← 4d6kh3 | [6, 4, 4, ~~1~~]");
        check(
            g,
            "4d6k3",
            &[4, 1, 6, 4],
            Verbosity::Xxl,
            "[dice] (14) ← 4d6kh3 | [6, 4, 4, ~~1~~]\n  4d6kh3: 4, ~~1~~, **6**, 4 = 14",
        );
    }

    #[test]
    fn test_hidden_target() {
        check(SystemKind::Generic, "1d20 dc ||15||", &[16], Verbosity::M, "[success] (16) ← 1d20 DC ??");
    }

    #[test]
    fn test_attack_and_damage() {
        let pf = SystemKind::Pathfinder;
        let input = "1d20+7 ac 18; 2d6+4";
        check(pf, input, &[5, 3, 5], Verbosity::Xs, "[failure] (12)");
        check(
            pf,
            input,
            &[15, 3, 5],
            Verbosity::Xs,
            "[success] (22)\n[critical-damage] [dice] (12)",
        );
        check(
            pf,
            input,
            &[20, 3, 5],
            Verbosity::Xs,
            "[critical-success] (27)\n[critical-damage] [dice] (24)",
        );
        check(
            pf,
            input,
            &[5, 3, 5],
            Verbosity::Xl,
            "[failure] (12) ← 1d20+7 AC 18 | **Failure** [5] + 7\n  1d20+7: 5 = 12\n[dice] (12) ← 2d6+4 | [5, 3] + 4\n  2d6+4: 5, 3 = 12",
        );
    }

    #[test]
    fn test_vampire_pool() {
        let v = SystemKind::Vampire;
        check(v, "4d10 h1 vs 6", &[10, 10, 6, 1], Verbosity::Xs, "[bestial-failure] (5)");
        check(
            v,
            "4d10 h1 vs 6",
            &[10, 10, 6, 1],
            Verbosity::Xl,
            "[bestial-failure] (5) ← 4d10 h1 vs 6 | **Bestial Failure** [10, 10, 6, _1_] 5 successes\n  base: 10, 10, 6\n  hunger: 1",
        );
        check(
            v,
            "3d10 h1 vs 3",
            &[10, 2, 10],
            Verbosity::Xxl,
            "[messy-critical] (4) ← 3d10 h1 vs 3 | **Messy Critical** [_10_, 10, 2] 4 successes\n  base: 10 (Critical Success), 2 (Failure)\n  hunger: 10 (Messy Critical)",
        );
    }

    proptest! {
        #[test]
        fn test_tiers_build_on_each_other(
            count in 1u32..6,
            sides in 1u32..21,
            modifier in -10i64..10,
            target in 0i64..40,
            faces in prop::collection::vec(1u32..21, 1..6),
        ) {
            let input = format!("{}d{}{:+} vs {}", count, sides, modifier, target);
            let fixture = Fixture::new(SystemKind::Generic);
            let roll = fixture.roll(&input, &faces);
            let tiers = [Verbosity::Xs, Verbosity::S, Verbosity::M, Verbosity::L, Verbosity::Xl];
            let shown: Vec<String> = tiers
                .iter()
                .map(|&v| Stringifier::new(&fixture.rules, v).str_group(&roll))
                .collect();
            for pair in shown.windows(2) {
                prop_assert!(pair[1].starts_with(&pair[0]), "{:?} then {:?}", pair[0], pair[1]);
            }
            let again = Stringifier::new(&fixture.rules, Verbosity::Xl).str_group(&roll);
            prop_assert_eq!(&again, &shown[4]);
        }
    }
}
