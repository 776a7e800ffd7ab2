use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod event;
pub mod ledger;
pub mod scoring;
pub mod session;
pub mod surface;
pub mod verdict;
pub mod view;

pub use event::{Action, Notice};
pub use ledger::{Battle, BattleId, BattleLedger, PendingDelete};
pub use scoring::{CompetitorScores, ScorePair, ScoreSheet, SheetSnapshot};
pub use session::{Mode, Session, SessionConfig};
pub use surface::{drive, Surface};
pub use verdict::Standing;
pub use view::View;

/// Placeholder names a fresh sheet starts with.
pub const DEFAULT_COMPETITOR_1: &str = "MC 1";
pub const DEFAULT_COMPETITOR_2: &str = "MC 2";

/// Errors raised while turning user text into slots and rounds.
///
/// Score values never fail; see [`parse_or_zero`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("competitor slot must be 1 or 2, got {0}")]
    InvalidSlot(String),
    #[error("unknown round `{0}` (expected one of random, ida, vuelta, acapella, deluxe)")]
    UnknownRound(String),
}

/// One of the five fixed scoring rounds, in battle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Round {
    Random,
    Ida,
    Vuelta,
    Acapella,
    Deluxe,
}

impl Round {
    pub const ALL: [Round; 5] = [
        Round::Random,
        Round::Ida,
        Round::Vuelta,
        Round::Acapella,
        Round::Deluxe,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Round::Random => "random",
            Round::Ida => "ida",
            Round::Vuelta => "vuelta",
            Round::Acapella => "acapella",
            Round::Deluxe => "deluxe",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Round::Random => "RANDOM",
            Round::Ida => "IDA",
            Round::Vuelta => "VUELTA",
            Round::Acapella => "ACAPELLA",
            Round::Deluxe => "DELUXE",
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Round {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Round::ALL
            .into_iter()
            .find(|round| round.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| InputError::UnknownRound(wanted.to_string()))
    }
}

/// Which of the two competitors an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    One,
    Two,
}

impl Slot {
    pub const BOTH: [Slot; 2] = [Slot::One, Slot::Two];

    pub fn number(self) -> u8 {
        match self {
            Slot::One => 1,
            Slot::Two => 2,
        }
    }
}

impl TryFrom<u8> for Slot {
    type Error = InputError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Slot::One),
            2 => Ok(Slot::Two),
            other => Err(InputError::InvalidSlot(other.to_string())),
        }
    }
}

impl FromStr for Slot {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Slot::One),
            "2" => Ok(Slot::Two),
            other => Err(InputError::InvalidSlot(other.to_string())),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Parse the leading decimal literal of `raw`, falling back to `0.0`.
///
/// Leading whitespace is skipped and anything after the literal is ignored,
/// so `"8.5 pts"` reads as `8.5`. Empty input, text with no literal, and
/// non-finite results (`"NaN"`, overflow) all become `0.0`.
pub fn parse_or_zero(raw: &str) -> f64 {
    let trimmed = raw.trim_start();
    let literal = &trimmed[..leading_literal_len(trimmed)];
    match literal.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Byte length of the longest `[+-]digits[.digits][e[+-]digits]` prefix.
/// Zero when no mantissa digit is present.
fn leading_literal_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    end
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Fixed two-decimal rendering used for totals.
///
/// Exact half-cent values round away from zero (`8.125` -> `"8.13"`);
/// everything else rounds to the nearest cent of its exact binary value.
pub fn format_points(value: f64) -> String {
    let value = without_negative_zero(value);
    let magnitude = value.abs();
    let magnitude = if is_half_cent(magnitude) {
        // Smallest step up; positive finite values only.
        f64::from_bits(magnitude.to_bits() + 1)
    } else {
        magnitude
    };
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{:.2}", sign, magnitude)
}

/// A value sits exactly between two cents only when it is an odd number
/// of eighths (`.125`, `.375`, `.625`, `.875`).
fn is_half_cent(magnitude: f64) -> bool {
    let eighths = magnitude * 8.0;
    eighths.is_finite() && eighths.fract() == 0.0 && eighths % 2.0 == 1.0
}

/// Natural rendering of a stored round value (`7` rather than `7.00`).
pub fn format_score(value: f64) -> String {
    format!("{}", without_negative_zero(value))
}

fn without_negative_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_keep_battle_order() {
        let keys: Vec<_> = Round::ALL.iter().map(|r| r.key()).collect();
        assert_eq!(keys, ["random", "ida", "vuelta", "acapella", "deluxe"]);
        assert_eq!(Round::Acapella.label(), "ACAPELLA");
    }

    #[test]
    fn round_parses_case_insensitively() {
        assert_eq!("IDA".parse::<Round>(), Ok(Round::Ida));
        assert_eq!(" vuelta ".parse::<Round>(), Ok(Round::Vuelta));
        assert_eq!(
            "freestyle".parse::<Round>(),
            Err(InputError::UnknownRound("freestyle".to_string()))
        );
    }

    #[test]
    fn slot_accepts_only_one_and_two() {
        assert_eq!(Slot::try_from(1), Ok(Slot::One));
        assert_eq!("2".parse::<Slot>(), Ok(Slot::Two));
        assert!(Slot::try_from(0).is_err());
        assert!("3".parse::<Slot>().is_err());
        assert!("".parse::<Slot>().is_err());
    }

    #[test]
    fn parse_or_zero_reads_plain_numbers() {
        assert_eq!(parse_or_zero("8.5"), 8.5);
        assert_eq!(parse_or_zero("7"), 7.0);
        assert_eq!(parse_or_zero("-2"), -2.0);
        assert_eq!(parse_or_zero(".5"), 0.5);
        assert_eq!(parse_or_zero("5."), 5.0);
        assert_eq!(parse_or_zero("1e2"), 100.0);
    }

    #[test]
    fn parse_or_zero_absorbs_garbage() {
        for raw in ["", "abc", "NaN", "nan", "-", ".", "+.", "inf", "Infinity", "   "] {
            assert_eq!(parse_or_zero(raw), 0.0, "input {:?}", raw);
        }
        assert_eq!(parse_or_zero("1e999"), 0.0);
    }

    #[test]
    fn parse_or_zero_takes_leading_literal() {
        assert_eq!(parse_or_zero("  3.25"), 3.25);
        assert_eq!(parse_or_zero("8.5 pts"), 8.5);
        assert_eq!(parse_or_zero("4,5"), 4.0);
        assert_eq!(parse_or_zero("1e"), 1.0);
        assert_eq!(parse_or_zero("2e+"), 2.0);
        assert_eq!(parse_or_zero("1.2.3"), 1.2);
    }

    #[test]
    fn formatting_matches_display_rules() {
        assert_eq!(format_points(8.5), "8.50");
        assert_eq!(format_points(0.0), "0.00");
        assert_eq!(format_points(7.0), "7.00");
        assert_eq!(format_score(7.0), "7");
        assert_eq!(format_score(8.5), "8.5");
        assert_eq!(format_score(0.0), "0");
        assert_eq!(format_score(-0.0), "0");
        assert_eq!(format_points(-0.0), "0.00");
    }

    #[test]
    fn half_cents_round_away_from_zero() {
        assert_eq!(format_points(8.125), "8.13");
        assert_eq!(format_points(0.625), "0.63");
        assert_eq!(format_points(0.375), "0.38");
        assert_eq!(format_points(12.875), "12.88");
        assert_eq!(format_points(-8.125), "-8.13");
        assert_eq!(format_points(2.25), "2.25");
        // 1.005 is stored just below the half cent.
        assert_eq!(format_points(1.005), "1.00");
        assert_eq!(format_points(-0.001), "-0.00");
    }
}
