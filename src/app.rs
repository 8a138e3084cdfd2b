use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::debug;
use rand::{rngs::StdRng, Rng};
use std::{cell::RefCell, rc::Rc};

use crate::{
    error::GameError,
    game::{GameUiState, GameViewModel, GuessOutcome},
    observable::Subscription,
};

/// What a key press asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Input(char),
    Backspace,
    Submit,
    Skip,
    Reset,
    Quit,
}

impl Command {
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => Some(Command::Quit),
            KeyCode::Char('c') if ctrl => Some(Command::Quit),
            KeyCode::Char('r') if ctrl => Some(Command::Reset),
            KeyCode::Char(_) if ctrl => None,
            KeyCode::Char(c) => Some(Command::Input(c)),
            KeyCode::Backspace => Some(Command::Backspace),
            KeyCode::Enter => Some(Command::Submit),
            KeyCode::Tab => Some(Command::Skip),
            _ => None,
        }
    }
}

/// Ticks a "Correct!" message stays on screen.
pub const STATUS_TICKS: u32 = 8;

/// Message under the guess box. Errors stay until the next command.
struct Status {
    text: String,
    ticks_left: Option<u32>,
}

impl Status {
    fn fleeting(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ticks_left: Some(STATUS_TICKS),
        }
    }

    fn sticky(err: GameError) -> Self {
        let text = match err {
            GameError::ExhaustedWords { total } => {
                format!("All {total} words played! Press Ctrl-R to start over")
            }
            other => other.to_string(),
        };
        Self {
            text,
            ticks_left: None,
        }
    }
}

/// Front-end side of a session. Drawing reads `state`, which is only ever
/// written by the subscription on the game's published state.
pub struct App<R = StdRng> {
    game: GameViewModel<R>,
    state: Rc<RefCell<GameUiState>>,
    status: Option<Status>,
    _subscription: Subscription,
}

impl<R: Rng> App<R> {
    pub fn new(game: GameViewModel<R>) -> Self {
        let state = Rc::new(RefCell::new(GameUiState::default()));
        let sink = Rc::clone(&state);
        let subscription = game.ui_state().subscribe(move |s: &GameUiState| {
            *sink.borrow_mut() = s.clone();
        });

        Self {
            game,
            state,
            status: None,
            _subscription: subscription,
        }
    }

    pub fn state(&self) -> GameUiState {
        self.state.borrow().clone()
    }

    pub fn guess(&self) -> &str {
        self.game.user_guess()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.text.as_str())
    }

    pub fn game(&self) -> &GameViewModel<R> {
        &self.game
    }

    /// Applies a command. Returns false once the player asked to quit.
    pub fn apply(&mut self, command: Command) -> bool {
        debug!("applying {command:?}");
        match command {
            Command::Quit => return false,
            Command::Input(c) => {
                let mut guess = self.game.user_guess().to_string();
                guess.push(c);
                self.game.update_user_guess(guess);
            }
            Command::Backspace => {
                let mut guess = self.game.user_guess().to_string();
                guess.pop();
                self.game.update_user_guess(guess);
            }
            Command::Submit => {
                if self.game.user_guess().is_empty() {
                    return true;
                }
                let result = self.game.check_user_guess();
                self.status = match result {
                    Ok(GuessOutcome::Correct) => Some(Status::fleeting("Correct!")),
                    Ok(GuessOutcome::Wrong) => None,
                    Err(e) => Some(Status::sticky(e)),
                };
            }
            Command::Skip => {
                self.status = self.game.skip_word().err().map(Status::sticky);
            }
            Command::Reset => {
                self.status = self.game.reset_game().err().map(Status::sticky);
            }
        }
        true
    }

    /// Ages a fleeting status. Returns true when the screen needs a redraw.
    pub fn on_tick(&mut self) -> bool {
        match self.status.as_ref().and_then(|s| s.ticks_left) {
            None => false,
            Some(n) if n <= 1 => {
                self.status = None;
                true
            }
            Some(n) => {
                if let Some(status) = self.status.as_mut() {
                    status.ticks_left = Some(n - 1);
                }
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::WordList;
    use rand::SeedableRng;

    fn app(words: &[&str]) -> App {
        let list = WordList::from_words("test", 20, words.iter().copied()).unwrap();
        App::new(GameViewModel::with_rng(list, StdRng::seed_from_u64(99)).unwrap())
    }

    fn type_word(app: &mut App, word: &str) {
        for c in word.chars() {
            app.apply(Command::Input(c));
        }
    }

    fn answer(app: &App) -> String {
        let scrambled = app.state().current_scrambled_word;
        let mut key: Vec<char> = scrambled.chars().collect();
        key.sort_unstable();
        app.game()
            .word_list()
            .words()
            .iter()
            .find(|w| {
                let mut chars: Vec<char> = w.chars().collect();
                chars.sort_unstable();
                chars == key
            })
            .cloned()
            .unwrap()
    }

    #[test]
    fn key_mapping() {
        let key = |code, modifiers| Command::from_key(KeyEvent::new(code, modifiers));

        assert_eq!(key(KeyCode::Char('a'), KeyModifiers::NONE), Some(Command::Input('a')));
        assert_eq!(key(KeyCode::Char('A'), KeyModifiers::SHIFT), Some(Command::Input('A')));
        assert_eq!(key(KeyCode::Enter, KeyModifiers::NONE), Some(Command::Submit));
        assert_eq!(key(KeyCode::Tab, KeyModifiers::NONE), Some(Command::Skip));
        assert_eq!(key(KeyCode::Backspace, KeyModifiers::NONE), Some(Command::Backspace));
        assert_eq!(key(KeyCode::Esc, KeyModifiers::NONE), Some(Command::Quit));
        assert_eq!(key(KeyCode::Char('c'), KeyModifiers::CONTROL), Some(Command::Quit));
        assert_eq!(key(KeyCode::Char('r'), KeyModifiers::CONTROL), Some(Command::Reset));
        assert_eq!(key(KeyCode::Char('x'), KeyModifiers::CONTROL), None);
        assert_eq!(key(KeyCode::Left, KeyModifiers::NONE), None);
    }

    #[test]
    fn typing_and_backspace_edit_the_guess() {
        let mut app = app(&["cat", "dog"]);
        type_word(&mut app, "dogg");
        app.apply(Command::Backspace);
        assert_eq!(app.guess(), "dog");
    }

    #[test]
    fn submit_wrong_guess_flags_state() {
        let mut app = app(&["cat", "dog"]);
        type_word(&mut app, "zzz");
        assert!(app.apply(Command::Submit));

        assert!(app.state().is_guess_word_wrong);
        assert_eq!(app.guess(), "");
    }

    #[test]
    fn empty_submit_is_ignored() {
        let mut app = app(&["cat", "dog"]);
        app.apply(Command::Submit);
        assert!(!app.state().is_guess_word_wrong);
    }

    #[test]
    fn playing_through_the_list() {
        let mut app = app(&["cat", "dog"]);

        let first = answer(&app);
        type_word(&mut app, &first.to_uppercase());
        app.apply(Command::Submit);
        assert_eq!(app.state().score, 20);
        assert_eq!(app.status(), Some("Correct!"));

        let second = answer(&app);
        assert_ne!(first, second);
        type_word(&mut app, &second);
        app.apply(Command::Submit);

        let state = app.state();
        assert_eq!(state.score, 40);
        assert!(state.is_game_over);
        assert!(app.status().unwrap().contains("All 2 words played"));

        app.apply(Command::Reset);
        assert_eq!(app.state().score, 0);
        assert!(!app.state().is_game_over);
        assert_eq!(app.status(), None);
    }

    #[test]
    fn correct_status_expires_after_ticks() {
        let mut app = app(&["cat", "dog", "fish"]);
        let word = answer(&app);
        type_word(&mut app, &word);
        app.apply(Command::Submit);
        assert_eq!(app.status(), Some("Correct!"));

        for _ in 1..STATUS_TICKS {
            assert!(!app.on_tick());
        }
        assert_eq!(app.status(), Some("Correct!"));
        assert!(app.on_tick());
        assert_eq!(app.status(), None);
        assert!(!app.on_tick());
    }

    #[test]
    fn game_over_status_is_sticky() {
        let mut app = app(&["cat", "dog"]);
        for _ in 0..2 {
            let word = answer(&app);
            type_word(&mut app, &word);
            app.apply(Command::Submit);
        }
        for _ in 0..STATUS_TICKS * 2 {
            app.on_tick();
        }
        assert!(app.status().unwrap().contains("All 2 words played"));
    }

    #[test]
    fn quit_stops_the_app() {
        let mut app = app(&["cat", "dog"]);
        assert!(!app.apply(Command::Quit));
    }
}
