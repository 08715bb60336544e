#![allow(dead_code)]
//! Game logic: the turn/timer state machine for two-player Shiritori
//!
//! The engine owns every piece of game state and exposes transition
//! methods. It holds no timer resource and makes no network calls: an
//! external loop drives `tick()` once per second and relays dictionary
//! verdicts back via `on_dictionary_result()`.

pub mod rules;

use crate::storage::{Snapshot, UsedWord};
use rules::check_word;
use std::collections::HashSet;

/// Seconds each player gets per turn
pub const TURN_SECONDS: u32 = 30;

/// Fixed display names for the two hot-seat players
pub const PLAYER_NAMES: [&str; 2] = ["Player 1", "Player 2"];

/// A word submission that passed the local checks and is waiting on the
/// dictionary. The attempt id stamps the lookup so a reply that arrives
/// after the turn has moved on can be told apart from a live one.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingLookup {
    attempt: u64,
    word: String,
}

/// What the caller must do after a submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAction {
    /// Submission was handled locally (rejected, ignored, or game over)
    None,
    /// Local checks passed; ask the dictionary and report back with
    /// `on_dictionary_result(attempt, verdict)`
    Lookup { attempt: u64, word: String },
}

/// The Shiritori turn engine
pub struct Engine {
    /// Index of the player whose turn it is (0 or 1)
    pub current_player: usize,
    /// Signed scores, one per player; penalties can push these negative
    pub scores: [i64; 2],
    /// Chronological list of accepted words
    used_words: Vec<UsedWord>,
    /// Lowercase forms of every accepted word, for duplicate lookup.
    /// Always equals the set derived from `used_words`.
    used_set: HashSet<String>,
    /// Final character of the most recent accepted word
    pub last_letter: Option<char>,
    /// Terminal flag; only `reset()` clears it
    pub game_over: bool,
    /// Consecutive timer expirations; 2 ends the game
    consecutive_timeouts: u8,
    /// Seconds left in the current turn
    pub remaining: u32,
    /// Whether the countdown is live
    running: bool,
    /// In-flight dictionary lookup, at most one per turn
    pending: Option<PendingLookup>,
    /// Monotonic stamp handed to each lookup
    next_attempt: u64,
    /// Current typed input
    pub input: String,
    /// Feedback from the last transition
    pub feedback: String,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            current_player: 0,
            scores: [0, 0],
            used_words: Vec::new(),
            used_set: HashSet::new(),
            last_letter: None,
            game_over: false,
            consecutive_timeouts: 0,
            remaining: TURN_SECONDS,
            running: true,
            pending: None,
            next_attempt: 0,
            input: String::new(),
            feedback: String::new(),
        }
    }
}

impl Engine {
    /// Create a fresh game with the timer running
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a previously saved game. Countdown state is never
    /// persisted: the restored game starts a fresh full-length turn,
    /// unless it ended while saved, in which case the timer stays off.
    pub fn from_snapshot(s: Snapshot) -> Self {
        let used_set = s
            .used_words
            .iter()
            .map(|u| u.word.to_lowercase())
            .collect();
        let running = !s.game_over;
        Self {
            current_player: s.current_player.min(PLAYER_NAMES.len() - 1),
            scores: s.scores,
            used_words: s.used_words,
            used_set,
            last_letter: s.last_letter,
            game_over: s.game_over,
            consecutive_timeouts: s.consecutive_timeouts,
            running,
            ..Self::default()
        }
    }

    /// The persisted subset of the state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            current_player: self.current_player,
            scores: self.scores,
            used_words: self.used_words.clone(),
            last_letter: self.last_letter,
            game_over: self.game_over,
            consecutive_timeouts: self.consecutive_timeouts,
        }
    }

    /// Display name of the player whose turn it is
    pub fn current_player_name(&self) -> &'static str {
        PLAYER_NAMES[self.current_player]
    }

    /// Accepted words, oldest first
    pub fn used_words(&self) -> &[UsedWord] {
        &self.used_words
    }

    pub fn consecutive_timeouts(&self) -> u8 {
        self.consecutive_timeouts
    }

    /// True while a dictionary lookup is outstanding for this turn
    pub fn lookup_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Handle character input. Locked while the game is over or a
    /// lookup is outstanding.
    pub fn on_char(&mut self, c: char) {
        if self.game_over || self.pending.is_some() {
            return;
        }
        if c.is_ascii_alphabetic() {
            self.input.push(c.to_ascii_lowercase());
            self.feedback.clear();
        }
    }

    /// Handle backspace (same locking as `on_char`)
    pub fn on_backspace(&mut self) {
        if self.game_over || self.pending.is_some() {
            return;
        }
        self.input.pop();
        self.feedback.clear();
    }

    /// Advance the countdown by one second. Fires the timeout
    /// transition when it reaches zero. No-op while the game is over,
    /// the timer is stopped, or a lookup is pending.
    pub fn tick(&mut self) {
        if self.game_over || !self.running || self.pending.is_some() {
            return;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            self.on_timeout();
        }
    }

    /// Submit the current input as this player's word for the turn.
    ///
    /// Runs the local checks (length, duplicate, letter chain) in that
    /// order; each failure is an immediate penalty. A word that passes
    /// them all enters the dictionary wait: the countdown pauses and
    /// the caller gets a `Lookup` to dispatch.
    pub fn on_submit(&mut self) -> SubmitAction {
        if self.game_over || self.pending.is_some() {
            return SubmitAction::None;
        }

        let word = self.input.trim().to_lowercase();

        if let Err(reason) = check_word(&word, &self.used_set, self.last_letter) {
            self.penalize(&reason.message());
            return SubmitAction::None;
        }

        let attempt = self.next_attempt;
        self.next_attempt += 1;
        self.pending = Some(PendingLookup {
            attempt,
            word: word.clone(),
        });
        self.feedback = format!("Checking '{}'...", word);
        SubmitAction::Lookup { attempt, word }
    }

    /// Apply a dictionary verdict. A reply whose attempt stamp does not
    /// match the outstanding lookup is stale (the turn already moved
    /// on) and is dropped without touching any state.
    pub fn on_dictionary_result(&mut self, attempt: u64, valid: bool) {
        if self.game_over {
            return;
        }
        let word = match &self.pending {
            Some(p) if p.attempt == attempt => p.word.clone(),
            _ => return,
        };

        if valid {
            self.accept(word);
        } else {
            self.penalize("Not a valid English word.");
        }
    }

    /// Return every field to its initial value and restart the timer.
    /// The only way out of the game-over state.
    ///
    /// The attempt counter survives the reset: recycling ids would let
    /// a verdict from a pre-reset lookup collide with a fresh one.
    pub fn reset(&mut self) {
        let next_attempt = self.next_attempt;
        *self = Self::default();
        self.next_attempt = next_attempt;
    }

    fn accept(&mut self, word: String) {
        self.last_letter = word.chars().last();
        self.used_set.insert(word.clone());
        self.used_words.push(UsedWord {
            by: self.current_player_name().to_string(),
            word: word.clone(),
        });
        self.consecutive_timeouts = 0;
        self.feedback = format!("Accepted: {}", word);
        self.advance_turn();
    }

    /// Shared penalty path for invalid submissions. Invalid words never
    /// count toward the double-timeout rule, so the counter resets.
    fn penalize(&mut self, msg: &str) {
        self.scores[self.current_player] -= 1;
        self.consecutive_timeouts = 0;
        self.feedback = format!("Invalid: {} -1 point.", msg);
        self.advance_turn();
    }

    /// Timer expired for the current player
    fn on_timeout(&mut self) {
        self.scores[self.current_player] -= 1;
        self.consecutive_timeouts += 1;
        if self.consecutive_timeouts >= 2 {
            // Both players timed out back to back: the game ends with
            // no further rotation.
            self.game_over = true;
            self.running = false;
            self.consecutive_timeouts = 0;
            self.pending = None;
            self.feedback = "Both players timed out. Game over.".to_string();
        } else {
            self.feedback = format!(
                "{} ran out of time. -1 point.",
                self.current_player_name()
            );
            self.advance_turn();
        }
    }

    /// Rotate to the next player and start their turn. The completed
    /// turn's state is fully applied before the new countdown begins;
    /// feedback stays visible until the next keystroke.
    fn advance_turn(&mut self) {
        self.current_player = (self.current_player + 1) % PLAYER_NAMES.len();
        self.input.clear();
        self.pending = None;
        self.remaining = TURN_SECONDS;
        self.running = true;
    }
}
