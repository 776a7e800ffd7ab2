//! Live score sheet for the battle being judged.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ledger::Battle;
use crate::verdict::Standing;
use crate::{format_points, parse_or_zero, Round, Slot, DEFAULT_COMPETITOR_1, DEFAULT_COMPETITOR_2};

/// Per-round scores for one competitor. Every round is always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetitorScores {
    pub random: f64,
    pub ida: f64,
    pub vuelta: f64,
    pub acapella: f64,
    pub deluxe: f64,
}

impl CompetitorScores {
    pub fn get(&self, round: Round) -> f64 {
        match round {
            Round::Random => self.random,
            Round::Ida => self.ida,
            Round::Vuelta => self.vuelta,
            Round::Acapella => self.acapella,
            Round::Deluxe => self.deluxe,
        }
    }

    pub fn set(&mut self, round: Round, value: f64) {
        let cell = match round {
            Round::Random => &mut self.random,
            Round::Ida => &mut self.ida,
            Round::Vuelta => &mut self.vuelta,
            Round::Acapella => &mut self.acapella,
            Round::Deluxe => &mut self.deluxe,
        };
        *cell = value;
    }

    /// Rounds paired with their values, in battle order.
    pub fn iter(&self) -> impl Iterator<Item = (Round, f64)> + '_ {
        Round::ALL.into_iter().map(move |round| (round, self.get(round)))
    }

    /// Sum of all five rounds. Non-finite entries count as zero, and so
    /// does a sum that overflows.
    pub fn total(&self) -> f64 {
        let sum: f64 = self
            .iter()
            .map(|(_, value)| if value.is_finite() { value } else { 0.0 })
            .sum();
        if sum.is_finite() {
            sum
        } else {
            0.0
        }
    }
}

/// Scores for both competitor slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScorePair {
    pub competitor1: CompetitorScores,
    pub competitor2: CompetitorScores,
}

impl ScorePair {
    pub fn for_slot(&self, slot: Slot) -> &CompetitorScores {
        match slot {
            Slot::One => &self.competitor1,
            Slot::Two => &self.competitor2,
        }
    }

    pub fn for_slot_mut(&mut self, slot: Slot) -> &mut CompetitorScores {
        match slot {
            Slot::One => &mut self.competitor1,
            Slot::Two => &mut self.competitor2,
        }
    }
}

/// An owned copy of the sheet, detached from any later edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetSnapshot {
    pub competitor1: String,
    pub competitor2: String,
    pub scores: ScorePair,
}

/// The editable sheet: two names and their round scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSheet {
    competitor1: String,
    competitor2: String,
    scores: ScorePair,
}

impl Default for ScoreSheet {
    fn default() -> Self {
        Self::with_names(DEFAULT_COMPETITOR_1, DEFAULT_COMPETITOR_2)
    }
}

impl ScoreSheet {
    /// Fresh sheet with the placeholder names and all scores at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_names(competitor1: impl Into<String>, competitor2: impl Into<String>) -> Self {
        Self {
            competitor1: competitor1.into(),
            competitor2: competitor2.into(),
            scores: ScorePair::default(),
        }
    }

    pub fn name(&self, slot: Slot) -> &str {
        match slot {
            Slot::One => &self.competitor1,
            Slot::Two => &self.competitor2,
        }
    }

    pub fn scores(&self) -> &ScorePair {
        &self.scores
    }

    pub fn score(&self, slot: Slot, round: Round) -> f64 {
        self.scores.for_slot(slot).get(round)
    }

    /// Replace a competitor's name. Empty names are accepted.
    pub fn set_competitor_name(&mut self, slot: Slot, name: impl Into<String>) {
        let name = name.into();
        match slot {
            Slot::One => self.competitor1 = name,
            Slot::Two => self.competitor2 = name,
        }
    }

    /// Store `raw` for one cell, coercing unparseable input to zero.
    ///
    /// Returns the value actually stored.
    pub fn set_score(&mut self, slot: Slot, round: Round, raw: &str) -> f64 {
        let value = parse_or_zero(raw);
        if value == 0.0 && !raw.trim().is_empty() {
            debug!(slot = %slot, round = %round, raw, "score input coerced to zero");
        }
        self.scores.for_slot_mut(slot).set(round, value);
        value
    }

    /// Unrounded sum of a slot's five rounds.
    pub fn total(&self, slot: Slot) -> f64 {
        self.scores.for_slot(slot).total()
    }

    /// Total for display, always two decimals.
    pub fn compute_total(&self, slot: Slot) -> String {
        format_points(self.total(slot))
    }

    pub fn standing(&self) -> Standing {
        Standing::from_totals(self.total(Slot::One), self.total(Slot::Two))
    }

    pub fn snapshot(&self) -> SheetSnapshot {
        SheetSnapshot {
            competitor1: self.competitor1.clone(),
            competitor2: self.competitor2.clone(),
            scores: self.scores,
        }
    }

    /// Overwrite names and scores wholesale from a saved battle.
    pub fn restore(&mut self, battle: &Battle) {
        let sheet = battle.sheet().clone();
        self.competitor1 = sheet.competitor1;
        self.competitor2 = sheet.competitor2;
        self.scores = sheet.scores;
    }
}
