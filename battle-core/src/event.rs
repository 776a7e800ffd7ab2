//! Input forwarded by a surface and the outcome of handling it.

use std::fmt;

use crate::ledger::{BattleId, PendingDelete};
use crate::{Round, Slot};

/// One user interaction, as forwarded by a surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    RenameCompetitor { slot: Slot, name: String },
    /// `raw` is the text as typed; coercion happens in the sheet.
    EnterScore { slot: Slot, round: Round, raw: String },
    SaveBattle,
    ShowBattles,
    ShowSheet,
    LoadBattle(BattleId),
    RequestDelete(BattleId),
}

/// What happened after one action was applied.
#[derive(Debug, PartialEq)]
pub enum Notice {
    /// State changed with nothing to tell the user.
    Updated,
    Saved { id: BattleId, title: String },
    Loaded { id: BattleId, title: String },
    /// The surface must confirm before anything is removed.
    DeleteRequested(PendingDelete),
    Deleted { id: BattleId, title: String },
    DeleteCancelled { id: BattleId },
    /// No battle with this id; nothing changed.
    Missing(BattleId),
}

impl Notice {
    /// Whether a surface should show this notice to the user.
    pub fn is_silent(&self) -> bool {
        matches!(self, Notice::Updated)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Updated => write!(f, "updated"),
            Notice::Saved { title, .. } => write!(f, "Battle saved: {}.", title),
            Notice::Loaded { title, .. } => write!(f, "Loaded {}.", title),
            Notice::DeleteRequested(pending) => write!(f, "{}", pending),
            Notice::Deleted { title, .. } => write!(f, "Deleted {}.", title),
            Notice::DeleteCancelled { .. } => write!(f, "Delete cancelled."),
            Notice::Missing(id) => write!(f, "No saved battle with id {}.", id),
        }
    }
}
