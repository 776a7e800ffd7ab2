//! Saved battles for the current session.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::scoring::SheetSnapshot;

/// Identifier of a saved battle: the save time in Unix milliseconds,
/// bumped forward when two saves land on the same millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BattleId(i64);

impl BattleId {
    pub fn as_millis(self) -> i64 {
        self.0
    }

    pub fn saved_at(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }
}

impl fmt::Display for BattleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable saved copy of a finished sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Battle {
    id: BattleId,
    #[serde(flatten)]
    sheet: SheetSnapshot,
}

impl Battle {
    pub fn id(&self) -> BattleId {
        self.id
    }

    pub fn sheet(&self) -> &SheetSnapshot {
        &self.sheet
    }

    /// List label, e.g. `"MC 1 vs MC 2"`.
    pub fn title(&self) -> String {
        format!("{} vs {}", self.sheet.competitor1, self.sheet.competitor2)
    }
}

/// A delete that has been asked for but not yet confirmed.
///
/// Only the ledger can create one; pass it back to
/// [`BattleLedger::confirm_delete`] once the user agrees.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingDelete {
    id: BattleId,
    title: String,
}

impl fmt::Display for PendingDelete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Delete battle \"{}\"?", self.title)
    }
}

impl PendingDelete {
    pub fn id(&self) -> BattleId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Ordered collection of saved battles, oldest first.
#[derive(Debug, Clone, Default)]
pub struct BattleLedger {
    battles: Vec<Battle>,
    last_id: Option<BattleId>,
}

impl BattleLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new battle built from `snapshot`. Never fails.
    pub fn save(&mut self, snapshot: SheetSnapshot) -> &Battle {
        self.save_at(snapshot, Utc::now().timestamp_millis())
    }

    fn save_at(&mut self, snapshot: SheetSnapshot, now_millis: i64) -> &Battle {
        let id = self.next_id(now_millis);
        let battle = Battle {
            id,
            sheet: snapshot,
        };
        info!(id = %id, title = %battle.title(), "battle saved");

        let index = self.battles.len();
        self.battles.push(battle);
        // `index` is the slot just pushed, so it is always in bounds.
        &self.battles[index]
    }

    fn next_id(&mut self, now_millis: i64) -> BattleId {
        let id = match self.last_id {
            Some(last) if now_millis <= last.0 => {
                debug!(last = last.0, now_millis, "clock did not advance, bumping battle id");
                BattleId(last.0 + 1)
            }
            _ => BattleId(now_millis),
        };
        self.last_id = Some(id);
        id
    }

    pub fn list(&self) -> &[Battle] {
        &self.battles
    }

    pub fn len(&self) -> usize {
        self.battles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.battles.is_empty()
    }

    pub fn find_by_id(&self, id: BattleId) -> Option<&Battle> {
        self.battles.iter().find(|b| b.id == id)
    }

    /// Remove the battle with `id`. Unknown ids leave the ledger untouched.
    pub fn delete_by_id(&mut self, id: BattleId) -> Option<Battle> {
        let index = self.battles.iter().position(|b| b.id == id)?;
        let removed = self.battles.remove(index);
        info!(id = %id, title = %removed.title(), "battle deleted");
        Some(removed)
    }

    /// First half of a delete: name the battle so the caller can ask.
    pub fn request_delete(&self, id: BattleId) -> Option<PendingDelete> {
        self.find_by_id(id).map(|battle| PendingDelete {
            id,
            title: battle.title(),
        })
    }

    /// Second half of a delete, once the caller has confirmed.
    pub fn confirm_delete(&mut self, pending: PendingDelete) -> Option<Battle> {
        self.delete_by_id(pending.id)
    }

    /// Pretty JSON of the saved battles, for display.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.battles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoreSheet;
    use crate::{Round, Slot};

    fn snapshot(name1: &str, name2: &str, ida1: &str) -> SheetSnapshot {
        let mut sheet = ScoreSheet::with_names(name1, name2);
        sheet.set_score(Slot::One, Round::Ida, ida1);
        sheet.snapshot()
    }

    fn titles(ledger: &BattleLedger) -> Vec<String> {
        ledger.list().iter().map(|b| b.title()).collect()
    }

    #[test]
    fn new_ledger_is_empty() {
        let ledger = BattleLedger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.len(), 0);
    }

    #[test]
    fn saves_keep_insertion_order() {
        let mut ledger = BattleLedger::new();
        ledger.save(snapshot("A", "B", "1"));
        ledger.save(snapshot("C", "D", "2"));
        ledger.save(snapshot("E", "F", "3"));

        assert_eq!(titles(&ledger), ["A vs B", "C vs D", "E vs F"]);
    }

    #[test]
    fn save_returns_the_appended_battle() {
        let mut ledger = BattleLedger::new();
        ledger.save_at(snapshot("A", "B", "1"), 1);
        let returned = ledger.save_at(snapshot("C", "D", "2"), 2).clone();

        assert_eq!(returned.title(), "C vs D");
        assert_eq!(ledger.list().last(), Some(&returned));
    }

    #[test]
    fn pending_delete_reads_as_a_question() {
        let mut ledger = BattleLedger::new();
        let id = ledger.save(snapshot("Aczino", "Wos", "9")).id();
        let pending = ledger.request_delete(id).unwrap();

        assert_eq!(pending.to_string(), "Delete battle \"Aczino vs Wos\"?");
    }

    #[test]
    fn ids_are_unique_and_increasing_when_clock_stalls() {
        let mut ledger = BattleLedger::new();
        let first = ledger.save_at(snapshot("A", "B", "1"), 1_000).id();
        let second = ledger.save_at(snapshot("A", "B", "1"), 1_000).id();
        let third = ledger.save_at(snapshot("A", "B", "1"), 999).id();
        let fourth = ledger.save_at(snapshot("A", "B", "1"), 5_000).id();

        assert_eq!(first.as_millis(), 1_000);
        assert_eq!(second.as_millis(), 1_001);
        assert_eq!(third.as_millis(), 1_002);
        assert_eq!(fourth.as_millis(), 5_000);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut ledger = BattleLedger::new();
        let first = ledger.save_at(snapshot("A", "B", "1"), 10).id();
        let second = ledger.save_at(snapshot("C", "D", "1"), 10).id();
        ledger.delete_by_id(second);
        let third = ledger.save_at(snapshot("E", "F", "1"), 10).id();

        assert!(third > second);
        assert!(second > first);
    }

    #[test]
    fn delete_closes_the_gap() {
        let mut ledger = BattleLedger::new();
        let b1 = ledger.save(snapshot("A", "B", "1")).clone();
        let b2 = ledger.save(snapshot("C", "D", "2")).clone();
        let b3 = ledger.save(snapshot("E", "F", "3")).clone();

        let removed = ledger.delete_by_id(b2.id());
        assert_eq!(removed.as_ref(), Some(&b2));
        assert_eq!(ledger.list(), [b1.clone(), b3.clone()]);
        assert_ne!(b1.id(), b3.id());
    }

    #[test]
    fn deleting_twice_is_a_no_op() {
        let mut ledger = BattleLedger::new();
        let kept = ledger.save(snapshot("A", "B", "1")).clone();
        let gone = ledger.save(snapshot("C", "D", "2")).id();

        assert!(ledger.delete_by_id(gone).is_some());
        assert!(ledger.delete_by_id(gone).is_none());
        assert!(ledger.delete_by_id(BattleId(-1)).is_none());
        assert_eq!(ledger.list(), [kept]);
    }

    #[test]
    fn find_by_id_hits_and_misses() {
        let mut ledger = BattleLedger::new();
        let id = ledger.save(snapshot("A", "B", "4.5")).id();

        let found = ledger.find_by_id(id).map(|b| b.sheet().scores.competitor1.ida);
        assert_eq!(found, Some(4.5));
        assert!(ledger.find_by_id(BattleId(id.as_millis() + 1)).is_none());
    }

    #[test]
    fn delete_needs_request_then_confirm() {
        let mut ledger = BattleLedger::new();
        let id = ledger.save(snapshot("Aczino", "Wos", "9")).id();

        let pending = ledger.request_delete(id).unwrap();
        assert_eq!(pending.title(), "Aczino vs Wos");
        assert_eq!(ledger.len(), 1);

        let removed = ledger.confirm_delete(pending).unwrap();
        assert_eq!(removed.id(), id);
        assert!(ledger.is_empty());
        assert!(ledger.request_delete(id).is_none());
    }

    #[test]
    fn stale_pending_delete_is_harmless() {
        let mut ledger = BattleLedger::new();
        let id = ledger.save(snapshot("A", "B", "1")).id();
        let pending = ledger.request_delete(id).unwrap();
        ledger.delete_by_id(id);

        assert!(ledger.confirm_delete(pending).is_none());
    }

    #[test]
    fn saved_battle_is_isolated_from_the_live_sheet() {
        let mut sheet = ScoreSheet::new();
        sheet.set_score(Slot::One, Round::Ida, "8.5");

        let mut ledger = BattleLedger::new();
        let id = ledger.save(sheet.snapshot()).id();

        sheet.set_score(Slot::One, Round::Ida, "2");
        sheet.set_competitor_name(Slot::Two, "Changed");

        let saved = ledger.find_by_id(id).unwrap();
        assert_eq!(saved.sheet().scores.competitor1.ida, 8.5);
        assert_eq!(saved.sheet().competitor2, "MC 2");
    }

    #[test]
    fn json_export_lists_battles_with_ids() {
        let mut ledger = BattleLedger::new();
        ledger.save_at(snapshot("A", "B", "7"), 42);

        let json: serde_json::Value = serde_json::from_str(&ledger.to_json().unwrap()).unwrap();
        assert_eq!(json[0]["id"], 42);
        assert_eq!(json[0]["competitor1"], "A");
        assert_eq!(json[0]["scores"]["competitor1"]["ida"], 7.0);
    }

    #[test]
    fn id_maps_back_to_save_time() {
        let id = BattleId(1_700_000_000_000);
        assert_eq!(id.saved_at().unwrap().timestamp_millis(), 1_700_000_000_000);
    }
}
