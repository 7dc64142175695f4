//! Runs a [`Session`] on its own task and plays the delayed computer reply.
//!
//! All mutations go through one channel, so the session only ever changes
//! on the controller task. When the session starts waiting on the
//! computer, a one-shot timer task is spawned; it posts the move back
//! through the same channel once the delay has passed. Any change to the
//! session aborts that timer, and the generation check in
//! [`Session::play_computer_turn`] drops a reply that slipped through.

use std::time::Duration;

use derive_more::{Display, Error};
use rand::Rng;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::{ComputerTurn, GameConfig, Mode, MoveResult, Session, Theme};

/// Commands handled on the controller task.
#[derive(Debug)]
enum Command {
    SubmitMove {
        index: usize,
        reply: oneshot::Sender<MoveResult>,
    },
    NewGame {
        reply: oneshot::Sender<()>,
    },
    ResetHistory {
        reply: oneshot::Sender<()>,
    },
    ChangeMode {
        mode: Mode,
        reply: oneshot::Sender<()>,
    },
    ToggleTheme {
        reply: oneshot::Sender<Theme>,
    },
    ComputerMoveDue(ComputerTurn),
    Shutdown,
}

/// Timer task for one computer reply.
#[derive(Debug)]
struct PendingTurn {
    turn: ComputerTurn,
    timer: JoinHandle<()>,
}

/// Owns the session and serializes every change to it.
///
/// Create with [`SessionController::new`] and drive with
/// [`SessionController::run`], or use [`SessionController::spawn`].
pub struct SessionController<R> {
    session: Session,
    rng: R,
    delay: Duration,
    commands: mpsc::UnboundedReceiver<Command>,
    timer_tx: mpsc::WeakUnboundedSender<Command>,
    snapshot: watch::Sender<Session>,
    pending: Option<PendingTurn>,
}

impl<R: Rng + Send + 'static> SessionController<R> {
    /// Creates a controller and the handle used to talk to it.
    #[instrument(skip(session, rng))]
    pub fn new(session: Session, rng: R, delay: Duration) -> (Self, SessionHandle) {
        let (tx, commands) = mpsc::unbounded_channel();
        let (snapshot, snapshot_rx) = watch::channel(session.clone());
        let controller = Self {
            session,
            rng,
            delay,
            commands,
            timer_tx: tx.downgrade(),
            snapshot,
            pending: None,
        };
        let handle = SessionHandle {
            commands: tx,
            snapshot: snapshot_rx,
        };
        (controller, handle)
    }

    /// Builds a controller from config and runs it on a new task.
    #[instrument(skip(config, rng))]
    pub fn spawn(config: &GameConfig, rng: R) -> (SessionHandle, JoinHandle<()>) {
        let session = Session::new(*config.mode(), *config.theme());
        let (controller, handle) = Self::new(session, rng, config.computer_delay());
        let task = tokio::spawn(controller.run());
        (handle, task)
    }

    /// Processes commands until shutdown or until every handle is dropped.
    #[instrument(skip(self), fields(delay_ms = self.delay.as_millis() as u64))]
    pub async fn run(mut self) {
        info!("Session controller started");

        while let Some(command) = self.commands.recv().await {
            if matches!(command, Command::Shutdown) {
                break;
            }
            let before = self.session.generation();
            self.handle(command);
            self.reschedule(before);
            self.snapshot.send_replace(self.session.clone());
        }

        self.cancel_pending("controller stopping");
        info!("Session controller stopped");
    }

    fn handle(&mut self, command: Command) {
        debug!(?command, "Handling command");
        match command {
            Command::SubmitMove { index, reply } => {
                let result = self.session.submit_move(index);
                let _ = reply.send(result);
            }
            Command::NewGame { reply } => {
                self.session.new_game();
                let _ = reply.send(());
            }
            Command::ResetHistory { reply } => {
                self.session.reset_history();
                let _ = reply.send(());
            }
            Command::ChangeMode { mode, reply } => {
                self.session.change_mode(mode);
                let _ = reply.send(());
            }
            Command::ToggleTheme { reply } => {
                let theme = self.session.toggle_theme();
                let _ = reply.send(theme);
            }
            Command::ComputerMoveDue(turn) => {
                if self.pending.as_ref().is_some_and(|p| p.turn == turn) {
                    self.pending = None;
                }
                if let Err(rejection) = self.session.play_computer_turn(turn, &mut self.rng) {
                    debug!(%rejection, "Computer move not applied");
                }
            }
            Command::Shutdown => {}
        }
    }

    /// Cancels the timer if the session moved on, then arms a new one if
    /// the computer is due.
    fn reschedule(&mut self, before: u64) {
        if self.session.generation() != before {
            self.cancel_pending("session changed");
        }
        if self.pending.is_some() {
            return;
        }
        let Some(turn) = self.session.pending_computer_turn() else {
            return;
        };
        let Some(tx) = self.timer_tx.upgrade() else {
            warn!("Command channel closed; not scheduling computer move");
            return;
        };

        let delay = self.delay;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Command::ComputerMoveDue(turn));
        });
        debug!(generation = turn.generation(), "Scheduled computer move");
        self.pending = Some(PendingTurn { turn, timer });
    }

    fn cancel_pending(&mut self, reason: &str) {
        if let Some(pending) = self.pending.take() {
            pending.timer.abort();
            debug!(
                generation = pending.turn.generation(),
                reason, "Cancelled computer move"
            );
        }
    }
}

/// Cloneable client for a running [`SessionController`].
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<Command>,
    snapshot: watch::Receiver<Session>,
}

impl SessionHandle {
    /// Submits a human move. The inner result is the session's verdict.
    #[instrument(skip(self))]
    pub async fn submit_move(&self, index: usize) -> Result<MoveResult, ControllerError> {
        self.request(|reply| Command::SubmitMove { index, reply })
            .await
    }

    /// Starts a new game, keeping history.
    #[instrument(skip(self))]
    pub async fn new_game(&self) -> Result<(), ControllerError> {
        self.request(|reply| Command::NewGame { reply }).await
    }

    /// Clears history and starts a new game.
    #[instrument(skip(self))]
    pub async fn reset_history(&self) -> Result<(), ControllerError> {
        self.request(|reply| Command::ResetHistory { reply }).await
    }

    /// Switches mode and starts a new game.
    #[instrument(skip(self))]
    pub async fn change_mode(&self, mode: Mode) -> Result<(), ControllerError> {
        self.request(|reply| Command::ChangeMode { mode, reply })
            .await
    }

    /// Flips the theme and returns the new one.
    #[instrument(skip(self))]
    pub async fn toggle_theme(&self) -> Result<Theme, ControllerError> {
        self.request(|reply| Command::ToggleTheme { reply }).await
    }

    /// Latest published session state.
    pub fn snapshot(&self) -> Session {
        self.snapshot.borrow().clone()
    }

    /// Waits for the next published state.
    pub async fn changed(&mut self) -> Result<(), ControllerError> {
        self.snapshot
            .changed()
            .await
            .map_err(|_| ControllerError::new("Session controller has stopped"))
    }

    /// Asks the controller to stop. Pending computer moves are cancelled.
    #[instrument(skip(self))]
    pub fn shutdown(&self) {
        if self.commands.send(Command::Shutdown).is_err() {
            debug!("Session controller already stopped");
        }
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, ControllerError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(command(reply))
            .map_err(|_| ControllerError::new("Session controller has stopped"))?;
        response
            .await
            .map_err(|_| ControllerError::new("Session controller dropped the request"))
    }
}

/// The controller task is gone.
#[derive(Debug, Clone, Display, Error)]
#[display("Controller error: {} at {}:{}", message, file, line)]
pub struct ControllerError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ControllerError {
    /// Creates a new controller error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
