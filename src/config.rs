use crate::common::UInt;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How much detail the formatter prints, from a bare glyph up to per-die
/// annotations.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Xxs,
    Xs,
    S,
    #[default]
    M,
    L,
    Xl,
    Xxl,
}

impl Verbosity {
    pub const ALL: [Verbosity; 7] = [
        Self::Xxs,
        Self::Xs,
        Self::S,
        Self::M,
        Self::L,
        Self::Xl,
        Self::Xxl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xxs => "xxs",
            Self::Xs => "xs",
            Self::S => "s",
            Self::M => "m",
            Self::L => "l",
            Self::Xl => "xl",
            Self::Xxl => "xxl",
        }
    }
}

/// How damage is raised after a critical hit.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CritMethod {
    /// Multiply the damage total by two.
    #[default]
    TimesTwo,
    /// Roll every damage die twice and double flat modifiers.
    RollTwice,
    /// Add the highest value the damage dice could show.
    AddMax,
}

impl CritMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TimesTwo => "times-two",
            Self::RollTwice => "roll-twice",
            Self::AddMax => "add-max",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SystemKind {
    #[default]
    Generic,
    Pathfinder,
    Vampire,
}

impl SystemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Pathfinder => "pathfinder",
            Self::Vampire => "vampire",
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
#[error("unknown {setting}: {value:?}")]
pub struct UnknownSetting {
    pub setting: &'static str,
    pub value: String,
}

impl UnknownSetting {
    fn new(setting: &'static str, value: &str) -> Self {
        Self {
            setting,
            value: value.to_owned(),
        }
    }
}

impl FromStr for Verbosity {
    type Err = UnknownSetting;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == lower)
            .ok_or_else(|| UnknownSetting::new("verbosity", s))
    }
}

impl FromStr for CritMethod {
    type Err = UnknownSetting;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "times-two" | "timestwo" | "x2" | "double" => Ok(Self::TimesTwo),
            "roll-twice" | "rolltwice" | "twice" => Ok(Self::RollTwice),
            "add-max" | "addmax" | "max" => Ok(Self::AddMax),
            _ => Err(UnknownSetting::new("crit method", s)),
        }
    }
}

impl FromStr for SystemKind {
    type Err = UnknownSetting;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generic" | "none" => Ok(Self::Generic),
            "pathfinder" | "pf" | "pf2e" | "starfinder" | "sf" => Ok(Self::Pathfinder),
            "vampire" | "vtm" | "v5" => Ok(Self::Vampire),
            _ => Err(UnknownSetting::new("game system", s)),
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for CritMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a [DiceEngine](crate::DiceEngine) needs to know up front.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EngineConfig {
    pub system: SystemKind,
    pub verbosity: Verbosity,
    pub crit_method: CritMethod,
    /// The natural d20 at or above which an attack that hits becomes a
    /// critical hit, unless the roll names its own.
    pub crit_threshold: UInt,
    /// Whether save keywords in a description mark the roll as a save.
    pub infer_saves: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            system: SystemKind::default(),
            verbosity: Verbosity::default(),
            crit_method: CritMethod::default(),
            crit_threshold: 20,
            infer_saves: true,
        }
    }
}

impl EngineConfig {
    pub fn for_system(system: SystemKind) -> Self {
        Self {
            system,
            ..Self::default()
        }
    }
}
