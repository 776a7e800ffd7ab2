//! Line-oriented terminal front end.

use std::io::{self, BufRead, Write};

use battle_core::view::{LedgerView, SheetView};
use battle_core::{drive, Action, BattleId, Notice, PendingDelete, Session, Surface, View};
use tracing::warn;

use crate::command::{parse_line, Command, HELP};

const BANNER: &str = "Rap battle score sheet. Type `help` for commands.";

/// Draws the session as plain text and reads answers from the same input.
pub struct TerminalSurface<R, W> {
    input: R,
    output: W,
    error: Option<io::Error>,
}

impl<R: BufRead, W: Write> TerminalSurface<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            error: None,
        }
    }

    /// Next input line without its terminator, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Writes inside `Surface` calls can't return errors; keep the first one.
    fn record(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            self.error.get_or_insert(e);
        }
    }

    fn take_error(&mut self) -> io::Result<()> {
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn write_sheet(&mut self, view: &SheetView) -> io::Result<()> {
        let out = &mut self.output;
        writeln!(out, "{:<10} | {:<14} | {}", "ROUND", view.competitor1, view.competitor2)?;
        for row in &view.rounds {
            writeln!(out, "{:<10} | {:<14} | {}", row.label, row.competitor1, row.competitor2)?;
        }
        writeln!(out, "{:<10} | {:<14} | {}", "TOTAL", view.total1, view.total2)?;
        writeln!(out, "({})", view.standing)
    }

    fn write_battles(&mut self, view: &LedgerView) -> io::Result<()> {
        let out = &mut self.output;
        if view.is_empty() {
            return writeln!(out, "No saved battles.");
        }
        writeln!(out, "Saved battles:")?;
        for row in &view.rows {
            writeln!(out, "  {}. {}  ({})", row.position, row.title, row.saved_at)?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> Surface for TerminalSurface<R, W> {
    fn render(&mut self, view: &View) {
        let result = match view {
            View::Sheet(sheet) => self.write_sheet(sheet),
            View::Battles(battles) => self.write_battles(battles),
        };
        self.record(result);
    }

    fn notify(&mut self, notice: &Notice) {
        let result = writeln!(self.output, "{}", notice);
        self.record(result);
    }

    fn confirm_delete(&mut self, pending: &PendingDelete) -> bool {
        let asked = write!(self.output, "{} [y/N] ", pending)
            .and_then(|_| self.output.flush());
        self.record(asked);

        match self.read_line() {
            Ok(Some(answer)) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Ok(None) => false,
            Err(e) => {
                self.record(Err(e));
                false
            }
        }
    }
}

/// Run the read/apply/render loop until `quit` or end of input.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    surface: &mut TerminalSurface<R, W>,
    banner: bool,
) -> io::Result<()> {
    if banner {
        writeln!(surface.output, "{}", BANNER)?;
        surface.render(&session.view());
        surface.take_error()?;
    }

    while let Some(line) = surface.read_line()? {
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                warn!(line = %line, error = %e, "rejected input");
                writeln!(surface.output, "error: {}", e)?;
                continue;
            }
        };

        let action = match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(surface.output, "{}", HELP)?;
                continue;
            }
            Command::Export => {
                let json = session.ledger().to_json().map_err(io::Error::other)?;
                writeln!(surface.output, "{}", json)?;
                continue;
            }
            Command::Name { slot, name } => Action::RenameCompetitor { slot, name },
            Command::Score { slot, round, raw } => Action::EnterScore { slot, round, raw },
            Command::Save => Action::SaveBattle,
            Command::Battles => Action::ShowBattles,
            Command::Sheet => Action::ShowSheet,
            Command::Load(position) => match battle_at(session, position) {
                Some(id) => Action::LoadBattle(id),
                None => {
                    writeln!(surface.output, "No battle number {}.", position)?;
                    continue;
                }
            },
            Command::Delete(position) => match battle_at(session, position) {
                Some(id) => Action::RequestDelete(id),
                None => {
                    writeln!(surface.output, "No battle number {}.", position)?;
                    continue;
                }
            },
        };

        drive(session, action, surface);
        surface.take_error()?;
    }

    surface.output.flush()
}

fn battle_at(session: &Session, position: usize) -> Option<BattleId> {
    session
        .ledger()
        .list()
        .get(position.checked_sub(1)?)
        .map(|battle| battle.id())
}
