//! The round engine: one play session against the bot.
//!
//! `RoundSession` is a single-threaded state machine driven by the main
//! event loop. It never talks to the judge itself: `submit` and the bot
//! trigger hand out request tickets, the caller runs them off-thread and
//! feeds the replies back through `resolve_verdict` / `resolve_bot_word`.
//! Every ticket carries the round sequence number, so replies that arrive
//! after the round rotated or the session ended are dropped.

use crate::game::{
    self, TurnCard, MIN_WORD_CHARS, ROUND_SECONDS,
};
use crate::judge::Verdict;
use rand::prelude::*;
use rand::rngs::StdRng;
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// Pause between an accepted word and the next round, so the player sees
/// the confirmation.
pub const ROTATE_DELAY: Duration = Duration::from_millis(800);

/// How long a rejection message stays on screen.
pub const ERROR_CLEAR: Duration = Duration::from_millis(1500);

/// The bot wakes up this many seconds into the round.
pub const BOT_TRIGGER_OFFSET: u32 = 4;

/// Bounds of the bot's simulated thinking delay, in milliseconds.
pub const BOT_DELAY_MS: std::ops::Range<u64> = 2000..6000;

/// The active category/letter/countdown for one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub category: String,
    pub letter: char,
    pub seconds_remaining: u32,
    pub total_seconds: u32,
}

/// One seat at the table. Exactly one is the human.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSlot {
    pub name: String,
    pub score: u32,
    pub thinking: bool,
    pub last_word: Option<String>,
}

impl PlayerSlot {
    fn new(name: String) -> Self {
        PlayerSlot {
            name,
            score: 0,
            thinking: false,
            last_word: None,
        }
    }
}

/// Local rejection reasons, checked before the judge is ever called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Fewer than two characters after trimming
    TooShort,
    /// Word was already scored this session
    AlreadyUsed,
    /// Word does not start with the required letter
    WrongLetter(char),
}

impl RejectReason {
    pub fn message(&self) -> String {
        match self {
            RejectReason::TooShort => "ÇOK KISA!".to_string(),
            RejectReason::AlreadyUsed => "ZATEN KULLANILDI!".to_string(),
            RejectReason::WrongLetter(letter) => format!("'{}' İLE BAŞLAMALI!", letter),
        }
    }
}

/// What `submit` did with the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Rejected locally; the status line shows the reason
    Rejected(RejectReason),
    /// Passed local checks; run this request against the judge
    Checking(CheckRequest),
    /// Nothing happened: a check is already in flight, the round is
    /// rotating, or the session is over
    Ignored,
}

/// A validation request handed to the judge runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRequest {
    pub seq: u64,
    pub word: String,
    pub category: String,
    pub letter: char,
}

/// A bot move request handed to the judge runner. The runner sleeps for
/// `delay` before asking for a suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotPrompt {
    pub seq: u64,
    pub category: String,
    pub letter: char,
    pub excluded: Vec<String>,
    pub delay: Duration,
}

/// The status line under the input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Idle,
    /// Waiting on the judge
    Checking,
    /// Transient rejection, cleared at `until`
    Error { message: String, until: Instant },
    /// Last word was accepted
    Accepted { word: String, points: u32 },
}

/// Final tally, produced once when the session ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResult {
    pub final_score: u32,
    pub winner_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    /// Countdown running, input open
    Active,
    /// Accepted word shown, next round starts at the deadline
    Rotating { at: Instant },
    /// Terminal; entered only by explicit exit
    Ended,
}

/// State machine for one session: the active turn, both players, and the
/// words used so far.
pub struct RoundSession {
    turn: Turn,
    human: PlayerSlot,
    bot: PlayerSlot,
    used_words: HashSet<String>,
    used_order: Vec<String>,
    input: String,
    status: Status,
    phase: Phase,
    /// Bumped on every round rotation; stale async replies compare against it
    round_seq: u64,
    /// Single-flight guard: at most one judge check outstanding. Holds the
    /// seconds remaining at submission, which is what the score uses even
    /// if the countdown keeps ticking while the reply is in flight.
    pending_check: Option<u32>,
    /// The bot moves once per round
    bot_fired: bool,
    rng: StdRng,
}

impl RoundSession {
    /// Start a fresh session. The first round begins immediately.
    pub fn new(human_name: &str, now: Instant) -> Self {
        Self::with_rng(human_name, StdRng::from_os_rng(), now)
    }

    /// Start a session with a specific RNG (for testing/seeding).
    pub fn with_rng(human_name: &str, mut rng: StdRng, now: Instant) -> Self {
        let bot_name = game::BOT_NAMES[rng.random_range(0..game::BOT_NAMES.len())];
        let mut session = RoundSession {
            turn: Turn {
                category: String::new(),
                letter: 'A',
                seconds_remaining: ROUND_SECONDS,
                total_seconds: ROUND_SECONDS,
            },
            human: PlayerSlot::new(human_name.to_string()),
            bot: PlayerSlot::new(bot_name.to_string()),
            used_words: HashSet::new(),
            used_order: Vec::new(),
            input: String::new(),
            status: Status::Idle,
            phase: Phase::Active,
            round_seq: 0,
            pending_check: None,
            bot_fired: false,
            rng,
        };
        session.start_round(now);
        session
    }

    /// Rotate to a new round: draw a fresh card, reset the countdown, and
    /// clear all transient state. Any in-flight judge replies for the old
    /// round become no-ops.
    pub fn start_round(&mut self, _now: Instant) {
        if self.phase == Phase::Ended {
            return;
        }
        self.round_seq += 1;
        let card = TurnCard::draw_with_rng(&mut self.rng);
        self.turn = Turn {
            category: card.category.to_string(),
            letter: card.letter,
            seconds_remaining: ROUND_SECONDS,
            total_seconds: ROUND_SECONDS,
        };
        self.input.clear();
        self.status = Status::Idle;
        self.phase = Phase::Active;
        self.pending_check = None;
        self.bot_fired = false;
        self.bot.thinking = false;
    }

    /// One-second countdown tick. Reaching zero rotates the round with no
    /// penalty; partway through, the bot's move is scheduled exactly once.
    pub fn tick(&mut self, now: Instant) -> Option<BotPrompt> {
        if self.phase != Phase::Active {
            return None;
        }
        if self.turn.seconds_remaining == 0 {
            return None;
        }
        self.turn.seconds_remaining -= 1;
        if self.turn.seconds_remaining == 0 {
            self.start_round(now);
            return None;
        }
        if self.turn.seconds_remaining == self.turn.total_seconds - BOT_TRIGGER_OFFSET
            && !self.bot_fired
        {
            self.bot_fired = true;
            self.bot.thinking = true;
            let delay = Duration::from_millis(self.rng.random_range(BOT_DELAY_MS));
            return Some(BotPrompt {
                seq: self.round_seq,
                category: self.turn.category.clone(),
                letter: self.turn.letter,
                excluded: self.used_order.clone(),
                delay,
            });
        }
        None
    }

    /// Append a character to the input. Locked while a check is in flight.
    pub fn on_char(&mut self, c: char) {
        if self.phase != Phase::Active || self.pending_check.is_some() {
            return;
        }
        self.input.push(c);
        if matches!(self.status, Status::Error { .. }) {
            self.status = Status::Idle;
        }
    }

    /// Remove the last input character.
    pub fn on_backspace(&mut self) {
        if self.phase != Phase::Active || self.pending_check.is_some() {
            return;
        }
        self.input.pop();
        if matches!(self.status, Status::Error { .. }) {
            self.status = Status::Idle;
        }
    }

    /// Submit the current input. Local checks run in a fixed order (length,
    /// duplicate, starting letter); only a word that passes all three is
    /// handed to the judge.
    pub fn submit(&mut self, now: Instant) -> SubmitOutcome {
        if self.phase != Phase::Active || self.pending_check.is_some() {
            return SubmitOutcome::Ignored;
        }

        let word = self.input.trim().to_lowercase();

        if word.chars().count() < MIN_WORD_CHARS {
            return self.reject(RejectReason::TooShort, now);
        }
        if self.used_words.contains(&word) {
            return self.reject(RejectReason::AlreadyUsed, now);
        }
        let prefix: String = self.turn.letter.to_lowercase().collect();
        if !word.starts_with(&prefix) {
            return self.reject(RejectReason::WrongLetter(self.turn.letter), now);
        }

        self.pending_check = Some(self.turn.seconds_remaining);
        self.status = Status::Checking;
        SubmitOutcome::Checking(CheckRequest {
            seq: self.round_seq,
            word,
            category: self.turn.category.clone(),
            letter: self.turn.letter,
        })
    }

    fn reject(&mut self, reason: RejectReason, now: Instant) -> SubmitOutcome {
        self.status = Status::Error {
            message: reason.message(),
            until: now + ERROR_CLEAR,
        };
        SubmitOutcome::Rejected(reason)
    }

    /// Apply a judge verdict for a previously issued check request. Replies
    /// for a rotated round or an ended session are dropped. An accepted
    /// word scores with the seconds remaining at submission, not at reply.
    pub fn resolve_verdict(&mut self, seq: u64, word: &str, verdict: Verdict, now: Instant) {
        if self.phase == Phase::Ended || seq != self.round_seq {
            return;
        }
        let Some(submitted_seconds) = self.pending_check.take() else {
            return;
        };

        if verdict.valid {
            let points = game::human_points(word, submitted_seconds);
            self.insert_used(word);
            self.human.score += points;
            self.human.last_word = Some(word.to_string());
            self.input.clear();
            self.status = Status::Accepted {
                word: word.to_string(),
                points,
            };
            self.phase = Phase::Rotating {
                at: now + ROTATE_DELAY,
            };
        } else {
            let message = verdict
                .reason
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| "GEÇERSİZ KELİME!".to_string());
            self.status = Status::Error {
                message,
                until: now + ERROR_CLEAR,
            };
        }
    }

    /// Apply the bot's suggested word. An empty suggestion means the bot
    /// skips the round; a suggestion for a rotated round is dropped. Bot
    /// activity never rotates the round or blocks the player.
    pub fn resolve_bot_word(&mut self, seq: u64, word: &str) {
        if self.phase == Phase::Ended || seq != self.round_seq {
            return;
        }
        self.bot.thinking = false;
        let word = word.to_lowercase();
        if word.is_empty() {
            return;
        }
        // Words score at most once per session, even if the judge repeats one.
        if !self.insert_used(&word) {
            return;
        }
        self.bot.score += game::bot_points(&word);
        self.bot.last_word = Some(word);
    }

    /// Service deadlines: round rotation after an accepted word, and
    /// clearing of transient errors.
    pub fn poll(&mut self, now: Instant) {
        if let Phase::Rotating { at } = self.phase {
            if now >= at {
                self.start_round(now);
                return;
            }
        }
        if let Status::Error { until, .. } = self.status {
            if now >= until {
                self.status = Status::Idle;
            }
        }
    }

    /// End the session. All pending timers and in-flight replies become
    /// no-ops; the caller supplies the declared winner's name.
    pub fn end_session(&mut self, winner_name: &str) -> SessionResult {
        self.phase = Phase::Ended;
        self.pending_check = None;
        self.bot.thinking = false;
        SessionResult {
            final_score: self.human.score,
            winner_name: winner_name.to_string(),
        }
    }

    fn insert_used(&mut self, word: &str) -> bool {
        if self.used_words.insert(word.to_string()) {
            self.used_order.push(word.to_string());
            true
        } else {
            false
        }
    }

    pub fn turn(&self) -> &Turn {
        &self.turn
    }

    pub fn human(&self) -> &PlayerSlot {
        &self.human
    }

    pub fn bot(&self) -> &PlayerSlot {
        &self.bot
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn is_checking(&self) -> bool {
        self.pending_check.is_some()
    }

    pub fn is_ended(&self) -> bool {
        self.phase == Phase::Ended
    }

    /// Most recent used words, newest first.
    pub fn recent_words(&self, n: usize) -> Vec<&str> {
        self.used_order
            .iter()
            .rev()
            .take(n)
            .map(|w| w.as_str())
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn used_words(&self) -> &HashSet<String> {
        &self.used_words
    }

    #[cfg(test)]
    pub(crate) fn round_seq(&self) -> u64 {
        self.round_seq
    }
}
