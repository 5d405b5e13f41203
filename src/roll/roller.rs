use crate::common::{NonZeroUInt, UInt};
use rand::{
    distributions::{DistIter, Distribution, Uniform},
    Rng,
};

/// A source of die faces. Every [Rng] is a roller.
pub trait Roller {
    type RollIter<'a>: Iterator<Item = UInt> + 'a
    where
        Self: 'a;

    fn roll(&mut self, sides: NonZeroUInt) -> UInt;

    fn roll_iter(&mut self, num: usize, sides: NonZeroUInt) -> Self::RollIter<'_>;
}

impl<R: Rng> Roller for R {
    type RollIter<'a> = std::iter::Take<DistIter<Uniform<UInt>, &'a mut Self, UInt>>
    where
        Self: 'a;

    fn roll(&mut self, sides: NonZeroUInt) -> UInt {
        self.gen_range(1..=sides.get())
    }

    fn roll_iter(&mut self, num: usize, sides: NonZeroUInt) -> Self::RollIter<'_> {
        Uniform::new_inclusive(1, sides.get())
            .sample_iter(self)
            .take(num)
    }
}

/// Plays back a fixed list of faces, starting over once it runs out.
/// Faces outside `1..=sides` are clamped into range; an empty script
/// always rolls 1.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ScriptedRoller {
    faces: Vec<UInt>,
    next: usize,
}

impl ScriptedRoller {
    pub fn new(faces: impl IntoIterator<Item = UInt>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
            next: 0,
        }
    }

    /// How many faces were played back so far.
    pub fn rolled(&self) -> usize {
        self.next
    }
}

impl Roller for ScriptedRoller {
    type RollIter<'a> = ScriptedIter<'a>;

    fn roll(&mut self, sides: NonZeroUInt) -> UInt {
        let face = match self.faces.len() {
            0 => 1,
            len => self.faces[self.next % len],
        };
        self.next += 1;
        face.clamp(1, sides.get())
    }

    fn roll_iter(&mut self, num: usize, sides: NonZeroUInt) -> Self::RollIter<'_> {
        ScriptedIter {
            roller: self,
            num,
            sides,
        }
    }
}

pub struct ScriptedIter<'a> {
    roller: &'a mut ScriptedRoller,
    num: usize,
    sides: NonZeroUInt,
}

impl Iterator for ScriptedIter<'_> {
    type Item = UInt;

    fn next(&mut self) -> Option<Self::Item> {
        if self.num == 0 {
            None
        } else {
            self.num -= 1;
            Some(self.roller.roll(self.sides))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn sides(n: UInt) -> NonZeroUInt {
        NonZeroUInt::new(n).unwrap()
    }

    #[test]
    fn test_scripted_cycles_and_clamps() {
        let mut roller = ScriptedRoller::new([3, 9, 0]);
        let faces: Vec<_> = roller.roll_iter(5, sides(6)).collect();
        assert_eq!(faces, vec![3, 6, 1, 3, 6]);
        assert_eq!(roller.rolled(), 5);
        assert_eq!(ScriptedRoller::default().roll(sides(20)), 1);
    }

    #[test]
    fn test_rng_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in [1, 2, 6, 20, 100] {
            assert!(rng.roll_iter(50, sides(n)).all(|v| (1..=n).contains(&v)));
        }
        assert_eq!(rng.roll_iter(4, sides(8)).count(), 4);
    }
}
