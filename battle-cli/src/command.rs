//! One line of terminal input turned into a command.

use battle_core::{InputError, Round, Slot};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Name { slot: Slot, name: String },
    Score { slot: Slot, round: Round, raw: String },
    Save,
    Battles,
    Sheet,
    /// 1-based position in the battle list.
    Load(usize),
    Delete(usize),
    Export,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}` (try `help`)")]
    UnknownVerb(String),
    #[error("`{verb}` needs {what}")]
    MissingArgument { verb: &'static str, what: &'static str },
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("`{0}` is not a battle number")]
    BadPosition(String),
}

pub const HELP: &str = "\
commands:
  name <1|2> <text>           rename a competitor
  score <1|2> <round> <value> enter a round score (random, ida, vuelta, acapella, deluxe)
  save                        save the current sheet as a battle
  battles                     list saved battles
  sheet                       back to the score sheet
  load <n>                    load battle number n into the sheet
  delete <n>                  delete battle number n (asks first)
  export                      print saved battles as JSON
  help                        this text
  quit                        leave";

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = split_word(line);
    let command = match verb.to_ascii_lowercase().as_str() {
        "name" => {
            let (slot, name) = split_word(rest);
            if slot.is_empty() {
                return Err(CommandError::MissingArgument {
                    verb: "name",
                    what: "a slot (1 or 2)",
                });
            }
            Command::Name {
                slot: slot.parse()?,
                name: name.to_string(),
            }
        }
        "score" => {
            let (slot, rest) = split_word(rest);
            let (round, raw) = split_word(rest);
            if slot.is_empty() || round.is_empty() {
                return Err(CommandError::MissingArgument {
                    verb: "score",
                    what: "a slot and a round",
                });
            }
            Command::Score {
                slot: slot.parse()?,
                round: round.parse()?,
                raw: raw.to_string(),
            }
        }
        "save" => Command::Save,
        "battles" | "list" => Command::Battles,
        "sheet" | "back" => Command::Sheet,
        "load" => Command::Load(parse_position("load", rest)?),
        "delete" => Command::Delete(parse_position("delete", rest)?),
        "export" => Command::Export,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::UnknownVerb(other.to_string())),
    };
    Ok(Some(command))
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (s, ""),
    }
}

fn parse_position(verb: &'static str, arg: &str) -> Result<usize, CommandError> {
    let arg = arg.trim();
    if arg.is_empty() {
        return Err(CommandError::MissingArgument {
            verb,
            what: "a battle number",
        });
    }
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::BadPosition(arg.to_string())),
    }
}
