//! Session context.
//!
//! # Responsibility
//! - Own the login gate and the board for one user session.
//! - Create the board when the gate opens and drop it when it closes.
//!
//! # Invariants
//! - The board is reachable only while authenticated.
//! - Logging out discards every task; the next login starts a fresh board.

use crate::clock::{Clock, SystemClock};
use crate::service::auth::{AuthGate, Credential};
use crate::service::board_service::BoardService;
use crate::store::task_store::TaskStore;
use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Settings fixed for the lifetime of a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub credential: Credential,
    /// Fill each new board with the starter tasks.
    pub seed_demo_tasks: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            credential: Credential::demo(),
            seed_demo_tasks: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The board was requested while logged out.
    NotAuthenticated,
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAuthenticated => write!(f, "log in to reach the board"),
        }
    }
}

impl Error for SessionError {}

/// One user session: gate plus board.
#[derive(Debug)]
pub struct Session<C: Clock + Clone = SystemClock> {
    config: SessionConfig,
    clock: C,
    auth: AuthGate,
    board: Option<BoardService<C>>,
}

impl Session<SystemClock> {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock + Clone> Session<C> {
    pub fn with_clock(config: SessionConfig, clock: C) -> Self {
        let auth = AuthGate::new(config.credential.clone());
        Self {
            config,
            clock,
            auth,
            board: None,
        }
    }

    /// Checks the credential pair and opens the board on success.
    ///
    /// Logging in again while already authenticated keeps the current board.
    pub fn login(&mut self, user_id: &str, password: &str) -> bool {
        if !self.auth.login(user_id, password) {
            return false;
        }
        if self.board.is_none() {
            self.board = Some(self.fresh_board());
        }
        true
    }

    /// Closes the gate and discards the board.
    pub fn logout(&mut self) -> bool {
        self.board = None;
        self.auth.logout()
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    pub fn current_user(&self) -> Option<&str> {
        self.auth.current_user()
    }

    pub fn board(&self) -> Result<&BoardService<C>, SessionError> {
        self.board.as_ref().ok_or(SessionError::NotAuthenticated)
    }

    pub fn board_mut(&mut self) -> Result<&mut BoardService<C>, SessionError> {
        self.board.as_mut().ok_or(SessionError::NotAuthenticated)
    }

    fn fresh_board(&self) -> BoardService<C> {
        let mut store = TaskStore::with_clock(self.clock.clone());
        if self.config.seed_demo_tasks {
            if let Err(err) = store.seed_demo_tasks() {
                error!("event=board_seed module=session status=error error={err}");
            }
        }
        BoardService::new(store)
    }
}
