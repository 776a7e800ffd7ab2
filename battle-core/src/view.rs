//! Display-ready data for surfaces. Everything here is already formatted.

use crate::ledger::{BattleId, BattleLedger};
use crate::scoring::ScoreSheet;
use crate::verdict::Standing;
use crate::{format_score, Round, Slot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundRow {
    pub round: Round,
    pub label: &'static str,
    pub competitor1: String,
    pub competitor2: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetView {
    pub competitor1: String,
    pub competitor2: String,
    pub rounds: Vec<RoundRow>,
    pub total1: String,
    pub total2: String,
    pub standing: String,
}

impl SheetView {
    pub fn from_sheet(sheet: &ScoreSheet) -> Self {
        let rounds = Round::ALL
            .into_iter()
            .map(|round| RoundRow {
                round,
                label: round.label(),
                competitor1: format_score(sheet.score(Slot::One, round)),
                competitor2: format_score(sheet.score(Slot::Two, round)),
            })
            .collect();

        let standing = match sheet.standing() {
            Standing::Leads(slot) => format!("{} leads", sheet.name(slot)),
            Standing::Tied => "tied".to_string(),
        };

        Self {
            competitor1: sheet.name(Slot::One).to_string(),
            competitor2: sheet.name(Slot::Two).to_string(),
            rounds,
            total1: sheet.compute_total(Slot::One),
            total2: sheet.compute_total(Slot::Two),
            standing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleRow {
    /// 1-based place in the list.
    pub position: usize,
    pub id: BattleId,
    pub title: String,
    pub saved_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerView {
    pub rows: Vec<BattleRow>,
}

impl LedgerView {
    pub fn from_ledger(ledger: &BattleLedger) -> Self {
        let rows = ledger
            .list()
            .iter()
            .enumerate()
            .map(|(index, battle)| BattleRow {
                position: index + 1,
                id: battle.id(),
                title: battle.title(),
                saved_at: battle
                    .id()
                    .saved_at()
                    .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_default(),
            })
            .collect();
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Which screen a surface should draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Sheet(SheetView),
    Battles(LedgerView),
}
