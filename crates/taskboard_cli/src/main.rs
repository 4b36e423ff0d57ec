//! Terminal front end for the task board.
//!
//! # Responsibility
//! - Render board state and forward user intents into `taskboard_core`.
//! - Keep every failed intent local: print a notice and keep the session.

mod command;
mod render;

use clap::Parser;
use command::{parse_line, BoardCommand, Command, TargetArg, HELP};
use log::info;
use render::{date_to_epoch_ms, render_board};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};
use taskboard_core::{
    default_log_level, init_logging, BoardService, Clock, DropTarget, FieldUpdate, NewTask,
    Session, SessionConfig, SystemClock, TaskId, TaskPatch,
};

/// Terminal task board with three workflow columns
#[derive(Parser, Debug)]
#[command(name = "taskboard")]
#[command(about = "Terminal task board with drag-and-drop style moves", long_about = None)]
struct Cli {
    /// Log level (trace|debug|info|warn|error)
    #[arg(long, default_value_t = default_log_level().to_string())]
    log_level: String,

    /// Absolute directory for rotating log files; logging is off when omitted
    #[arg(long)]
    log_dir: Option<String>,

    /// Start each board empty instead of with the starter tasks
    #[arg(long)]
    no_demo_tasks: bool,

    /// Log in at startup with this user id
    #[arg(long, requires = "password")]
    user: Option<String>,

    /// Password for --user
    #[arg(long, requires = "user")]
    password: Option<String>,
}

enum Flow {
    Continue,
    Quit,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        init_logging(&cli.log_level, log_dir)?;
    }
    info!(
        "event=cli_start module=cli status=ok version={}",
        taskboard_core::core_version()
    );

    let config = SessionConfig {
        seed_demo_tasks: !cli.no_demo_tasks,
        ..SessionConfig::default()
    };
    let mut session = Session::new(config);

    if let (Some(user_id), Some(password)) = (cli.user.as_deref(), cli.password.as_deref()) {
        login(&mut session, user_id, password);
    } else {
        println!("Log in with `login <user> <password>` (type `help` for commands).");
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();
    loop {
        print!("> ");
        stdout.flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                println!("error: {err}");
                continue;
            }
        };
        match execute(&mut session, command) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(err) => println!("error: {err}"),
        }
    }

    session.logout();
    info!("event=cli_exit module=cli status=ok");
    Ok(())
}

fn login(session: &mut Session, user_id: &str, password: &str) {
    if session.login(user_id, password) {
        println!("Welcome back, {user_id}!");
        if let Ok(board) = session.board() {
            show(board);
        }
    } else {
        println!("Login failed: invalid user ID or password");
    }
}

fn execute(session: &mut Session, command: Command) -> Result<Flow, Box<dyn Error>> {
    match command {
        Command::Login { user_id, password } => login(session, &user_id, &password),
        Command::Logout => {
            if session.logout() {
                println!("Logged out; the board was cleared.");
            } else {
                println!("Not logged in.");
            }
        }
        Command::Whoami => match session.current_user() {
            Some(user_id) => println!("{user_id}"),
            None => println!("Not logged in."),
        },
        Command::Help => println!("{HELP}"),
        Command::Quit => return Ok(Flow::Quit),
        Command::Board(command) => run_board_command(session.board_mut()?, command)?,
    }
    Ok(Flow::Continue)
}

fn run_board_command(
    board: &mut BoardService,
    command: BoardCommand,
) -> Result<(), Box<dyn Error>> {
    match command {
        BoardCommand::Show => show(board),
        BoardCommand::Json => println!("{}", serde_json::to_string_pretty(&board.columns())?),
        BoardCommand::Add {
            column,
            title,
            description,
            deadline,
        } => {
            let mut draft = NewTask::new(title).status(column);
            draft.description = description;
            draft.deadline = deadline.map(date_to_epoch_ms);
            let task = board.add_task(draft)?;
            println!("Added [{}] to {}.", render::short_id(task.id), task.status.title());
        }
        BoardCommand::Edit {
            task,
            title,
            description,
            clear_description,
            deadline,
            clear_deadline,
        } => {
            let id = resolve_task(board, &task)?;
            let patch = TaskPatch {
                title,
                description: match (description, clear_description) {
                    (Some(text), _) => FieldUpdate::Set(text),
                    (None, true) => FieldUpdate::Clear,
                    (None, false) => FieldUpdate::Keep,
                },
                status: None,
                deadline: match (deadline, clear_deadline) {
                    (Some(date), _) => FieldUpdate::Set(date_to_epoch_ms(date)),
                    (None, true) => FieldUpdate::Clear,
                    (None, false) => FieldUpdate::Keep,
                },
            };
            if patch.is_empty() {
                println!("Nothing to change.");
                return Ok(());
            }
            board.edit_task(id, patch)?;
            println!("Updated [{}].", render::short_id(id));
        }
        BoardCommand::Delete { task } => {
            let id = resolve_task(board, &task)?;
            board.delete_task(id);
            println!("Deleted [{}].", render::short_id(id));
        }
        BoardCommand::Move { task, column } => {
            let id = resolve_task(board, &task)?;
            let outcome = board.move_task(id, column)?;
            println!("{outcome:?}");
        }
        BoardCommand::Grab { task } => {
            let id = resolve_task(board, &task)?;
            println!("{:?}", board.grab(id)?);
        }
        BoardCommand::Hover { target } => {
            let target = resolve_target(board, target)?;
            println!("{:?}", board.hover(target)?);
            show(board);
        }
        BoardCommand::Drop { target } => {
            let target = resolve_target(board, target)?;
            println!("{:?}", board.release(target)?);
            show(board);
        }
        BoardCommand::Cancel => println!("{:?}", board.cancel_drag()?),
    }
    Ok(())
}

fn show(board: &BoardService) {
    print!(
        "{}",
        render_board(
            &board.columns(),
            board.drag().active_task(),
            SystemClock.now_epoch_ms()
        )
    );
}

/// Why a task prefix did not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LookupError {
    Empty,
    NoMatch(String),
    Ambiguous(String),
}

impl Display for LookupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "task id cannot be empty"),
            Self::NoMatch(prefix) => write!(f, "no task matches `{prefix}`"),
            Self::Ambiguous(prefix) => {
                write!(f, "`{prefix}` matches several tasks; type more of the id")
            }
        }
    }
}

impl Error for LookupError {}

/// Finds the one task whose id starts with `prefix`.
fn resolve_task(board: &BoardService, prefix: &str) -> Result<TaskId, LookupError> {
    match_prefix(board.tasks().iter().map(|task| task.id), prefix)
}

fn match_prefix(
    ids: impl IntoIterator<Item = TaskId>,
    prefix: &str,
) -> Result<TaskId, LookupError> {
    let needle = prefix.trim().to_ascii_lowercase().replace('-', "");
    if needle.is_empty() {
        return Err(LookupError::Empty);
    }
    let mut matches = ids
        .into_iter()
        .filter(|id| id.simple().to_string().starts_with(&needle));
    match (matches.next(), matches.next()) {
        (Some(id), None) => Ok(id),
        (None, _) => Err(LookupError::NoMatch(prefix.to_string())),
        (Some(_), Some(_)) => Err(LookupError::Ambiguous(prefix.to_string())),
    }
}

/// Maps a command-line target to a drop target.
fn resolve_target(
    board: &BoardService,
    target: TargetArg,
) -> Result<Option<DropTarget>, LookupError> {
    match target {
        TargetArg::Outside => Ok(None),
        TargetArg::Column(status) => Ok(Some(DropTarget::Column(status))),
        TargetArg::Card(prefix) => card_target(resolve_task(board, &prefix)),
    }
}

/// A card prefix that matches nothing is an off-board target, which reverts
/// the drag. An empty or ambiguous prefix is an error and leaves the drag
/// running.
fn card_target(lookup: Result<TaskId, LookupError>) -> Result<Option<DropTarget>, LookupError> {
    match lookup {
        Ok(id) => Ok(Some(DropTarget::Card(id))),
        Err(LookupError::NoMatch(_)) => Ok(None),
        Err(err) => Err(err),
    }
}
