//! Who is ahead on the current totals.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::Slot;

/// Relative tolerance for calling two totals equal.
pub const TIE_TOLERANCE: f64 = f64::EPSILON * 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Standing {
    Leads(Slot),
    Tied,
}

impl Standing {
    /// Compare two raw totals. Sums that differ only by float noise
    /// (`0.1 + 0.2` against `0.3`) count as a tie.
    pub fn from_totals(total1: f64, total2: f64) -> Self {
        let scale = total1.abs().max(total2.abs()).max(1.0);
        if (total1 - total2).abs() <= TIE_TOLERANCE * scale {
            return Standing::Tied;
        }

        match total1.partial_cmp(&total2).unwrap_or(Ordering::Equal) {
            Ordering::Greater => Standing::Leads(Slot::One),
            Ordering::Less => Standing::Leads(Slot::Two),
            Ordering::Equal => Standing::Tied,
        }
    }

    pub fn leader(&self) -> Option<Slot> {
        match self {
            Standing::Leads(slot) => Some(*slot),
            Standing::Tied => None,
        }
    }
}
