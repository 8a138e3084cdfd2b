use std::sync::mpsc::{self, Sender};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::{rngs::StdRng, SeedableRng};
use unscramble::{
    app::{App, Command},
    runtime::{EventSource, GameEvent, Runner},
    GameViewModel, WordList,
};

/// Sends a key the way the terminal reader would: translated, or dropped.
fn press(tx: &Sender<GameEvent>, code: KeyCode) {
    if let Some(command) = Command::from_key(KeyEvent::new(code, KeyModifiers::NONE)) {
        tx.send(GameEvent::Command(command)).unwrap();
    }
}

fn answer_for(list: &WordList, scrambled: &str) -> String {
    let mut target: Vec<char> = scrambled.chars().collect();
    target.sort_unstable();
    list.words()
        .iter()
        .find(|w| {
            let mut chars: Vec<char> = w.chars().collect();
            chars.sort_unstable();
            chars == target
        })
        .cloned()
        .expect("scrambled word should come from the list")
}

/// Runs the queued input to completion; returns how many frames were drawn.
fn play(app: &mut App, tx: Sender<GameEvent>, rx: mpsc::Receiver<GameEvent>) -> usize {
    drop(tx);
    let runner = Runner::new(EventSource::new(rx), Duration::from_millis(5));
    let mut frames = 0;
    runner
        .run(app, |_| {
            frames += 1;
            Ok(())
        })
        .unwrap();
    frames
}

// Headless integration using the runtime + App without a TTY
#[test]
fn headless_guess_flow_scores() {
    let list = WordList::from_words("pets", 20, ["cat", "dog", "fish"]).unwrap();
    let game = GameViewModel::with_rng(list.clone(), StdRng::seed_from_u64(11)).unwrap();
    let mut app = App::new(game);

    let (tx, rx) = mpsc::channel();

    let answer = answer_for(&list, &app.state().current_scrambled_word);
    for c in answer.to_uppercase().chars() {
        press(&tx, KeyCode::Char(c));
    }
    press(&tx, KeyCode::Enter);

    // first frame, one per typed letter, one for the submit
    assert_eq!(play(&mut app, tx, rx), answer.len() + 2);

    let state = app.state();
    assert_eq!(state.score, 20);
    assert!(!state.is_guess_word_wrong);
    assert_eq!(app.guess(), "");
    assert_ne!(answer_for(&list, &state.current_scrambled_word), answer);
}

#[test]
fn headless_wrong_guess_then_skip() {
    let list = WordList::from_words("pets", 20, ["cat", "dog", "fish"]).unwrap();
    let game = GameViewModel::with_rng(list.clone(), StdRng::seed_from_u64(12)).unwrap();
    let mut app = App::new(game);
    let first = app.state().current_scrambled_word;

    let (tx, rx) = mpsc::channel();

    for c in "xyz".chars() {
        press(&tx, KeyCode::Char(c));
    }
    press(&tx, KeyCode::Enter);
    play(&mut app, tx, rx);

    let state = app.state();
    assert!(state.is_guess_word_wrong);
    assert_eq!(state.score, 0);
    assert_eq!(state.current_scrambled_word, first);

    let (tx, rx) = mpsc::channel();
    press(&tx, KeyCode::Tab);
    play(&mut app, tx, rx);

    let state = app.state();
    assert!(!state.is_guess_word_wrong);
    assert_eq!(state.score, 0);
    assert_eq!(app.game().used_words().len(), 2);
}

#[test]
fn headless_escape_quits() {
    let list = WordList::from_words("pets", 20, ["cat", "dog"]).unwrap();
    let mut app = App::new(GameViewModel::with_rng(list, StdRng::seed_from_u64(13)).unwrap());

    let (tx, rx) = mpsc::channel();
    press(&tx, KeyCode::Char('c'));
    press(&tx, KeyCode::Esc);
    press(&tx, KeyCode::Char('x'));

    assert_eq!(play(&mut app, tx, rx), 2);
    assert_eq!(app.guess(), "c");
}
