//! REPL command grammar.
//!
//! # Responsibility
//! - Split one input line into tokens, honoring double quotes.
//! - Map tokens to a typed `Command` the board can execute.
//!
//! # Invariants
//! - Parsing never touches board state.
//! - Task references stay as raw id prefixes; resolution happens later.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use taskboard_core::TaskStatus;

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]*)"|(\S+)"#).expect("valid token regex"));

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Pointer position named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetArg {
    Outside,
    Column(TaskStatus),
    /// Card id prefix.
    Card(String),
}

/// Commands that work with or without a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { user_id: String, password: String },
    Logout,
    Whoami,
    Help,
    Quit,
    Board(BoardCommand),
}

/// Commands that need an open board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardCommand {
    Show,
    Json,
    Add {
        column: TaskStatus,
        title: String,
        description: Option<String>,
        deadline: Option<NaiveDate>,
    },
    Edit {
        task: String,
        title: Option<String>,
        description: Option<String>,
        clear_description: bool,
        deadline: Option<NaiveDate>,
        clear_deadline: bool,
    },
    Delete { task: String },
    Move { task: String, column: TaskStatus },
    Grab { task: String },
    Hover { target: TargetArg },
    Drop { target: TargetArg },
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandError(String);

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for CommandError {}

fn usage(text: &str) -> CommandError {
    CommandError(format!("usage: {text}"))
}

pub const HELP: &str = "\
commands:
  login <user> <password>        open the board
  logout                         close the board and drop its tasks
  whoami                         show the logged-in user
  show                           render the board
  json                           print the board as JSON
  add <column> \"<title>\" [--desc \"<text>\"] [--due YYYY-MM-DD]
  edit <id> [--title \"<t>\"] [--desc \"<d>\" | --no-desc] [--due YYYY-MM-DD | --no-due]
  delete <id>
  move <id> <column>
  grab <id>                      start dragging a card
  hover <column|card:<id>|none>  move the pointer while dragging
  drop <column|card:<id>|none>   release the card
  cancel                         abort the drag
  help | quit
columns: todo, in-progress, done";

/// Splits a line into tokens. `"quoted text"` becomes one token.
pub fn tokenize(line: &str) -> Vec<String> {
    TOKEN_RE
        .captures_iter(line)
        .filter_map(|captures| captures.get(1).or_else(|| captures.get(2)))
        .map(|matched| matched.as_str().to_string())
        .collect()
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
    let tokens = tokenize(line);
    let Some((verb, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let board = match (verb.to_ascii_lowercase().as_str(), args) {
        ("login", [user_id, password]) => {
            return Ok(Some(Command::Login {
                user_id: user_id.clone(),
                password: password.clone(),
            }))
        }
        ("login", _) => return Err(usage("login <user> <password>")),
        ("logout", []) => return Ok(Some(Command::Logout)),
        ("whoami", []) => return Ok(Some(Command::Whoami)),
        ("help" | "?", _) => return Ok(Some(Command::Help)),
        ("quit" | "exit", []) => return Ok(Some(Command::Quit)),
        ("show" | "ls", []) => BoardCommand::Show,
        ("json", []) => BoardCommand::Json,
        ("add", [column, title, rest @ ..]) => parse_add(column, title, rest)?,
        ("add", _) => return Err(usage("add <column> \"<title>\" [--desc ..] [--due ..]")),
        ("edit", [task, rest @ ..]) => parse_edit(task, rest)?,
        ("edit", _) => return Err(usage("edit <id> [--title ..] [--desc ..] [--due ..]")),
        ("delete" | "rm", [task]) => BoardCommand::Delete { task: task.clone() },
        ("move" | "mv", [task, column]) => BoardCommand::Move {
            task: task.clone(),
            column: parse_column(column)?,
        },
        ("grab", [task]) => BoardCommand::Grab { task: task.clone() },
        ("hover", [target]) => BoardCommand::Hover {
            target: parse_target(target)?,
        },
        ("drop", [target]) => BoardCommand::Drop {
            target: parse_target(target)?,
        },
        ("drop", []) => BoardCommand::Drop {
            target: TargetArg::Outside,
        },
        ("cancel", []) => BoardCommand::Cancel,
        (other, _) => {
            return Err(CommandError(format!(
                "unknown or malformed command `{other}`; type `help`"
            )))
        }
    };
    Ok(Some(Command::Board(board)))
}

fn parse_add(column: &str, title: &str, rest: &[String]) -> Result<BoardCommand, CommandError> {
    let mut description = None;
    let mut deadline = None;
    let mut options = rest.iter();
    while let Some(flag) = options.next() {
        match flag.as_str() {
            "--desc" => description = Some(option_value(flag, options.next())?),
            "--due" => deadline = Some(parse_date(&option_value(flag, options.next())?)?),
            other => return Err(CommandError(format!("unknown option `{other}` for add"))),
        }
    }
    Ok(BoardCommand::Add {
        column: parse_column(column)?,
        title: title.to_string(),
        description,
        deadline,
    })
}

fn parse_edit(task: &str, rest: &[String]) -> Result<BoardCommand, CommandError> {
    let mut title = None;
    let mut description = None;
    let mut clear_description = false;
    let mut deadline = None;
    let mut clear_deadline = false;
    let mut options = rest.iter();
    while let Some(flag) = options.next() {
        match flag.as_str() {
            "--title" => title = Some(option_value(flag, options.next())?),
            "--desc" => description = Some(option_value(flag, options.next())?),
            "--no-desc" => clear_description = true,
            "--due" => deadline = Some(parse_date(&option_value(flag, options.next())?)?),
            "--no-due" => clear_deadline = true,
            other => return Err(CommandError(format!("unknown option `{other}` for edit"))),
        }
    }
    if description.is_some() && clear_description {
        return Err(CommandError("--desc and --no-desc conflict".to_string()));
    }
    if deadline.is_some() && clear_deadline {
        return Err(CommandError("--due and --no-due conflict".to_string()));
    }
    Ok(BoardCommand::Edit {
        task: task.to_string(),
        title,
        description,
        clear_description,
        deadline,
        clear_deadline,
    })
}

fn option_value(flag: &str, value: Option<&String>) -> Result<String, CommandError> {
    value
        .cloned()
        .ok_or_else(|| CommandError(format!("option `{flag}` needs a value")))
}

fn parse_column(value: &str) -> Result<TaskStatus, CommandError> {
    value
        .parse::<TaskStatus>()
        .map_err(|err| CommandError(err.to_string()))
}

fn parse_target(value: &str) -> Result<TargetArg, CommandError> {
    if value.eq_ignore_ascii_case("none") || value.eq_ignore_ascii_case("outside") {
        return Ok(TargetArg::Outside);
    }
    if let Some(prefix) = value.strip_prefix("card:") {
        if prefix.is_empty() {
            return Err(CommandError("card target needs an id".to_string()));
        }
        return Ok(TargetArg::Card(prefix.to_string()));
    }
    parse_column(value).map(TargetArg::Column)
}

fn parse_date(value: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| CommandError(format!("invalid date `{value}`; expected YYYY-MM-DD")))
}
