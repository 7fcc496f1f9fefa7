//! Mentor rating value types.

use std::fmt;

use serde::{Serialize, Serializer};

/// A single vote value, 0 to 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rate(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("rate must be between {min} and {max}, got {0}", min = Rate::MIN, max = Rate::MAX)]
pub struct InvalidRate(pub i64);

impl Rate {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 5;

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rate {
    type Error = InvalidRate;

    fn try_from(v: i64) -> Result<Self, Self::Error> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&v) {
            Ok(Self(v as u8))
        } else {
            Err(InvalidRate(v))
        }
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Mean of all votes for one mentor, rounded to one decimal place.
///
/// Displays as `"4.0"`; a mentor nobody has voted for displays as `"0"`.
/// Serialized as its display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AverageRating {
    /// Average in tenths (`42` is 4.2). `None` when there are no votes.
    tenths: Option<u32>,
}

impl AverageRating {
    /// Build from the sum and the count of vote values.
    ///
    /// Rounds half away from zero, like SQL `ROUND(avg, 1)`.
    pub fn from_totals(sum: u64, count: u64) -> Self {
        if count == 0 {
            return Self { tenths: None };
        }
        let tenths = (sum * 20 + count) / (count * 2);
        Self {
            tenths: Some(tenths as u32),
        }
    }

    pub fn from_votes(votes: &[Rate]) -> Self {
        let sum = votes.iter().map(|r| u64::from(r.value())).sum();
        Self::from_totals(sum, votes.len() as u64)
    }

    pub fn has_votes(&self) -> bool {
        self.tenths.is_some()
    }

    pub fn value(&self) -> Option<f64> {
        self.tenths.map(|t| f64::from(t) / 10.0)
    }
}

impl fmt::Display for AverageRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tenths {
            Some(t) => write!(f, "{}.{}", t / 10, t % 10),
            None => f.write_str("0"),
        }
    }
}

impl Serialize for AverageRating {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}
