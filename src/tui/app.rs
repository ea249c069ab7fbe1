//! Application state: one game session plus its turn timer.

use super::input::{digit_position, move_cursor};
use anyhow::Result;
use crossterm::event::KeyCode;
use hero_tictactoe::{
    GameController, Phase, PendingTurn, Position, RuleEngine, Settings, Transition, TurnScheduler,
};
use tokio::sync::mpsc;
use tracing::{debug, instrument};

/// Main application state.
pub struct App {
    controller: GameController,
    scheduler: TurnScheduler,
    cursor: Position,
    status_message: String,
    should_quit: bool,
}

impl App {
    /// Creates the app and the channel automated-turn tickets come back on.
    pub fn new(settings: &Settings) -> (Self, mpsc::UnboundedReceiver<PendingTurn>) {
        let (scheduler, tickets) = TurnScheduler::new(settings.turn_delay());
        let app = Self {
            controller: GameController::with_selector(RuleEngine::from_seed(*settings.seed())),
            scheduler,
            cursor: Position::Center,
            status_message: start_message(),
            should_quit: false,
        };
        (app, tickets)
    }

    /// The game session.
    pub fn controller(&self) -> &GameController {
        &self.controller
    }

    /// Highlighted square.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Whether the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handles a key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('r') => self.reset(),
            KeyCode::Char('s') => self.start(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.controller.phase() == Phase::NotStarted {
                    self.start();
                } else {
                    self.play_at(self.cursor);
                }
            }
            KeyCode::Char(c) => {
                if let Some(position) = digit_position(c) {
                    self.cursor = position;
                    self.play_at(position);
                }
            }
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key);
            }
            _ => {}
        }
    }

    /// Plays the automated move a fired ticket allows.
    pub fn handle_ticket(&mut self, ticket: PendingTurn) -> Result<()> {
        let transition = self.controller.play_automated(ticket)?;
        self.apply_transition(transition);
        Ok(())
    }

    fn start(&mut self) {
        let transition = self.controller.start();
        self.apply_transition(transition);
    }

    fn reset(&mut self) {
        debug!("Resetting game");
        self.scheduler.cancel();
        self.controller.reset();
        self.status_message = start_message();
    }

    fn play_at(&mut self, position: Position) {
        let transition = self.controller.human_move(position);
        self.apply_transition(transition);
    }

    fn apply_transition(&mut self, transition: Transition) {
        match transition {
            Transition::Ignored => {}
            Transition::HumanToMove => {
                self.status_message = "Your move (X)".to_string();
            }
            Transition::AutomatedPending(ticket) => {
                self.status_message = "O is thinking...".to_string();
                self.scheduler.schedule(ticket);
            }
            Transition::Finished(outcome) => {
                self.status_message = format!("{} Press 'r' to play again.", outcome);
            }
        }
    }
}

fn start_message() -> String {
    "Press 's' to start".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hero_tictactoe::{GameResult, Mark};
    use std::time::Duration;

    fn settings() -> Settings {
        Settings::default().with_overrides(Some(500), Some(1))
    }

    #[tokio::test(start_paused = true)]
    async fn test_automated_reply_arrives_after_delay() {
        let (mut app, mut tickets) = App::new(&settings());
        app.handle_key(KeyCode::Char('s'));
        app.handle_key(KeyCode::Char('1'));
        assert_eq!(app.status_message(), "O is thinking...");

        tokio::time::advance(Duration::from_millis(501)).await;
        let ticket = tickets.recv().await.unwrap();
        app.handle_ticket(ticket).unwrap();

        assert_eq!(
            app.controller().board().get(Position::Center).mark(),
            Some(Mark::O)
        );
        assert_eq!(app.status_message(), "Your move (X)");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_during_delay_drops_reply() {
        let (mut app, mut tickets) = App::new(&settings());
        app.handle_key(KeyCode::Char('s'));
        app.handle_key(KeyCode::Char('5'));
        app.handle_key(KeyCode::Char('r'));

        tokio::time::advance(Duration::from_millis(1000)).await;
        assert!(tickets.try_recv().is_err());
        assert_eq!(app.controller().phase(), Phase::NotStarted);
        assert_eq!(app.controller().result(), GameResult::InProgress);
        assert_eq!(app.status_message(), "Press 's' to start");
    }

    #[test]
    fn test_keys_before_start_are_ignored() {
        let (mut app, _tickets) = App::new(&settings());
        app.handle_key(KeyCode::Char('3'));
        assert!(app.controller().history().is_empty());
        assert_eq!(app.cursor(), Position::TopRight);

        app.handle_key(KeyCode::Enter);
        assert_eq!(app.controller().turn(), Some(Mark::X));
        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit());
    }
}
