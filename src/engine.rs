use crate::config::{EngineConfig, Verbosity};
use crate::error::Error;
use crate::parse::ast::DiceGroup;
use crate::parse::{Token, TokenParsers};
use crate::roll::{self, DiceGroupRoll, Roller, Stringifier};
use crate::system::{GameSystem, GameSystemRules};

/// Tokenizer rules, game system and output settings, built once and
/// reused for every command.
#[derive(Debug, Clone)]
pub struct DiceEngine {
    config: EngineConfig,
    rules: GameSystem,
    parsers: TokenParsers,
}

/// A rolled command and its formatted text.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Evaluation {
    pub roll: DiceGroupRoll,
    pub output: String,
}

impl DiceEngine {
    pub fn new(config: EngineConfig) -> Result<Self, Error> {
        let rules = GameSystem::from_config(&config)?;
        let parsers = TokenParsers::extended(rules.token_rules()?)?;
        tracing::debug!(
            system = %config.system,
            rules = parsers.rules().len(),
            "dice engine ready"
        );
        Ok(Self {
            config,
            rules,
            parsers,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn rules(&self) -> &GameSystem {
        &self.rules
    }

    pub fn parsers(&self) -> &TokenParsers {
        &self.parsers
    }

    pub fn tokenize<'a>(&self, input: &'a str) -> Vec<Token<'a>> {
        self.parsers.tokenize(input)
    }

    pub fn parse(&self, input: &str) -> DiceGroup {
        DiceGroup::from_tokens(&self.tokenize(input), &self.rules)
            .with_verbosity(self.config.verbosity)
            .with_crit_method(self.config.crit_method)
    }

    pub fn roll<R: Roller>(&self, group: &DiceGroup, roller: &mut R) -> DiceGroupRoll {
        roll::roll_group(group, roller, &self.rules)
    }

    /// Formats at the verbosity the group was parsed with.
    pub fn format(&self, roll: &DiceGroupRoll) -> String {
        self.format_at(roll, roll.verbosity())
    }

    pub fn format_at(&self, roll: &DiceGroupRoll, verbosity: Verbosity) -> String {
        Stringifier::new(&self.rules, verbosity).str_group(roll)
    }

    pub fn evaluate<R: Roller>(&self, input: &str, roller: &mut R) -> Evaluation {
        let group = self.parse(input);
        let roll = self.roll(&group, roller);
        let output = self.format(&roll);
        tracing::debug!(input, totals = ?roll.totals(), "evaluated");
        Evaluation { roll, output }
    }
}
