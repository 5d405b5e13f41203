use crate::common::Int;
use crate::parse::ast::Test;
use std::fmt;

/// The outcome of a roll measured against its test.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Grade {
    /// No test, or a test the system doesn't grade.
    #[default]
    Unknown,
    BestialFailure,
    CriticalFailure,
    Failure,
    Success,
    CriticalSuccess,
    MessyCritical,
}

impl Grade {
    /// Position on the worst-to-best scale, `None` when ungraded.
    pub fn rank(&self) -> Option<u8> {
        match self {
            Self::Unknown => None,
            Self::BestialFailure => Some(0),
            Self::CriticalFailure => Some(1),
            Self::Failure => Some(2),
            Self::Success => Some(3),
            Self::CriticalSuccess => Some(4),
            Self::MessyCritical => Some(5),
        }
    }

    pub fn is_graded(&self) -> bool {
        *self != Self::Unknown
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success | Self::CriticalSuccess | Self::MessyCritical)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure | Self::CriticalFailure | Self::BestialFailure)
    }

    pub fn is_critical(&self) -> bool {
        matches!(self, Self::CriticalSuccess | Self::MessyCritical)
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Unknown => "[dice]",
            Self::BestialFailure => "[bestial-failure]",
            Self::CriticalFailure => "[critical-failure]",
            Self::Failure => "[failure]",
            Self::Success => "[success]",
            Self::CriticalSuccess => "[critical-success]",
            Self::MessyCritical => "[messy-critical]",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::BestialFailure => "Bestial Failure",
            Self::CriticalFailure => "Critical Failure",
            Self::Failure => "Failure",
            Self::Success => "Success",
            Self::CriticalSuccess => "Critical Success",
            Self::MessyCritical => "Messy Critical",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Plain pass/fail grading. Without a test there is nothing to grade.
pub fn grade_test(test: Option<&Test>, total: Int) -> Grade {
    match test {
        None => Grade::Unknown,
        Some(test) if test.passes(total) => Grade::Success,
        Some(_) => Grade::Failure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{CompareOp, TargetKind};

    #[test]
    fn test_grade_test() {
        let test = Test::vs(10);
        assert_eq!(grade_test(Some(&test), 10), Grade::Success);
        assert_eq!(grade_test(Some(&test), 9), Grade::Failure);
        assert_eq!(grade_test(None, 30), Grade::Unknown);

        let under = Test::new(TargetKind::Operator, CompareOp::Lt, 5);
        assert_eq!(grade_test(Some(&under), 4), Grade::Success);
        assert_eq!(grade_test(Some(&under), 5), Grade::Failure);
    }

    #[test]
    fn test_rank_order() {
        let ranked = [
            Grade::BestialFailure,
            Grade::CriticalFailure,
            Grade::Failure,
            Grade::Success,
            Grade::CriticalSuccess,
            Grade::MessyCritical,
        ];
        assert!(ranked.windows(2).all(|w| w[0].rank() < w[1].rank()));
        assert_eq!(Grade::Unknown.rank(), None);
        assert!(ranked.iter().all(|g| g.is_success() != g.is_failure()));
    }
}
