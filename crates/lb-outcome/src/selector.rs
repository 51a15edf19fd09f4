//! Luck-biased weighted selection.
//!
//! Each eligible definition gets a weight of `chance * curve(luck, bias) * 100`.
//! The curve is `(1 / (1 - |bias| * 0.0077))^exp`, where `exp` is the
//! definition's 1-based luck rank when the bias is non-negative and the
//! reversed rank otherwise. A bias of zero therefore leaves only `chance`.
//!
//! Luck is normalised against the lowest and highest values in the partition,
//! both anchored at 0: a pack whose lucks are all positive still ranks them
//! from 1 upward through 0.

use crate::definition::OutcomeDefinition;

/// Per-point growth of the luck curve.
pub const LUCK_STEP: f64 = 0.77 / 100.0;

/// Scale applied to every weight.
pub const WEIGHT_SCALE: f64 = 100.0;

/// A cumulative weight ladder over definitions in encounter order.
///
/// `cumulative[0]` is 0 and `cumulative[i + 1]` is the sum of the weights of
/// definitions `0..=i`, so definition `i` owns `[cumulative[i], cumulative[i + 1])`.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightLadder {
    cumulative: Vec<f64>,
}

impl WeightLadder {
    /// Build a ladder from `(luck, chance)` pairs.
    pub fn from_entries(entries: &[(i32, f64)], bias: i32) -> Self {
        let lowest = entries.iter().map(|&(luck, _)| luck).fold(0, i32::min);
        let highest = entries.iter().map(|&(luck, _)| luck).fold(0, i32::max);
        let span = f64::from(highest) - f64::from(lowest) + 1.0;
        let base = 1.0 / (1.0 - f64::from(bias.unsigned_abs()) * LUCK_STEP);

        let mut cumulative = Vec::with_capacity(entries.len() + 1);
        cumulative.push(0.0);
        let mut total = 0.0;
        for &(luck, chance) in entries {
            let rank = f64::from(luck) - f64::from(lowest) + 1.0;
            let exp = if bias >= 0 { rank } else { span + 1.0 - rank };
            let chance = if chance > 0.0 { chance } else { 1.0 };
            total += chance * base.powf(exp) * WEIGHT_SCALE;
            cumulative.push(total);
        }
        Self { cumulative }
    }

    /// Build a ladder from definitions, using their defaulted luck and chance.
    pub fn for_definitions<'a, I>(definitions: I, bias: i32) -> Self
    where
        I: IntoIterator<Item = &'a OutcomeDefinition>,
    {
        let entries: Vec<(i32, f64)> = definitions
            .into_iter()
            .map(|def| (def.luck(), def.chance()))
            .collect();
        Self::from_entries(&entries, bias)
    }

    /// Number of rungs (definitions).
    pub fn len(&self) -> usize {
        self.cumulative.len() - 1
    }

    /// Whether the ladder has no rungs.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// The weight of definition `index`.
    pub fn weight(&self, index: usize) -> Option<f64> {
        Some(self.cumulative.get(index + 1)? - self.cumulative.get(index)?)
    }

    /// Each definition's fraction of the total weight.
    pub fn shares(&self) -> Vec<f64> {
        let total = self.total();
        self.cumulative
            .windows(2)
            .map(|w| if total > 0.0 { (w[1] - w[0]) / total } else { 0.0 })
            .collect()
    }

    /// The index owning a uniform `draw` in `[0, 1)`.
    ///
    /// Falls back to the last definition when the scaled draw lands on or past
    /// the top of the ladder. `None` only for an empty ladder.
    pub fn pick(&self, draw: f64) -> Option<usize> {
        self.index_for(draw * self.total())
    }

    /// The index whose interval contains the absolute weight `r`.
    pub fn index_for(&self, r: f64) -> Option<usize> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        let index = self.cumulative[1..].partition_point(|&c| c <= r);
        Some(index.min(len - 1))
    }
}
