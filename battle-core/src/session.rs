//! The running judging session: one sheet, one ledger, one screen mode.

use tracing::{debug, info};

use crate::event::{Action, Notice};
use crate::ledger::{BattleLedger, PendingDelete};
use crate::scoring::ScoreSheet;
use crate::view::{LedgerView, SheetView, View};
use crate::{DEFAULT_COMPETITOR_1, DEFAULT_COMPETITOR_2};

/// Starting values for a new session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Name shown for slot 1 before anyone edits it.
    pub competitor1: String,
    /// Name shown for slot 2 before anyone edits it.
    pub competitor2: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            competitor1: DEFAULT_COMPETITOR_1.to_string(),
            competitor2: DEFAULT_COMPETITOR_2.to_string(),
        }
    }
}

/// Which screen is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Sheet,
    Battles,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    sheet: ScoreSheet,
    ledger: BattleLedger,
    mode: Mode,
}

impl Session {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            sheet: ScoreSheet::with_names(config.competitor1.clone(), config.competitor2.clone()),
            ledger: BattleLedger::new(),
            mode: Mode::Sheet,
        }
    }

    pub fn sheet(&self) -> &ScoreSheet {
        &self.sheet
    }

    pub fn ledger(&self) -> &BattleLedger {
        &self.ledger
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Apply one action. Deletes only go as far as a pending request.
    pub fn apply(&mut self, action: Action) -> Notice {
        match action {
            Action::RenameCompetitor { slot, name } => {
                self.sheet.set_competitor_name(slot, name);
                Notice::Updated
            }
            Action::EnterScore { slot, round, raw } => {
                let stored = self.sheet.set_score(slot, round, &raw);
                debug!(slot = %slot, round = %round, stored, "score entered");
                Notice::Updated
            }
            Action::SaveBattle => {
                let battle = self.ledger.save(self.sheet.snapshot());
                Notice::Saved {
                    id: battle.id(),
                    title: battle.title(),
                }
            }
            Action::ShowBattles => {
                self.mode = Mode::Battles;
                Notice::Updated
            }
            Action::ShowSheet => {
                self.mode = Mode::Sheet;
                Notice::Updated
            }
            Action::LoadBattle(id) => match self.ledger.find_by_id(id) {
                Some(battle) => {
                    self.sheet.restore(battle);
                    self.mode = Mode::Sheet;
                    info!(id = %id, "battle loaded into sheet");
                    Notice::Loaded {
                        id,
                        title: battle.title(),
                    }
                }
                None => Notice::Missing(id),
            },
            Action::RequestDelete(id) => match self.ledger.request_delete(id) {
                Some(pending) => Notice::DeleteRequested(pending),
                None => Notice::Missing(id),
            },
        }
    }

    /// Finish a delete the user has agreed to.
    pub fn confirm_delete(&mut self, pending: PendingDelete) -> Notice {
        let id = pending.id();
        match self.ledger.confirm_delete(pending) {
            Some(removed) => Notice::Deleted {
                id,
                title: removed.title(),
            },
            None => Notice::Missing(id),
        }
    }

    pub fn view(&self) -> View {
        match self.mode {
            Mode::Sheet => View::Sheet(SheetView::from_sheet(&self.sheet)),
            Mode::Battles => View::Battles(LedgerView::from_ledger(&self.ledger)),
        }
    }
}
