//! Screen state management.
//!
//! Handles transitions between the application screens:
//! - Login (pick a display name)
//! - Lobby (rooms / leaderboard, start matchmaking)
//! - Matchmaking (fixed delay, then into the game)
//! - Playing (the round engine vs. the bot)
//! - Results (final tally, back to lobby)

use crate::game::round::{RoundSession, SessionResult};
use crate::judge::{JudgeReply, JudgeRunner, WordJudge};
use crate::lobby::LobbyBoard;
use crate::profile::{ProfileRecord, ProfileStore};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Simulated matchmaking time before a game starts.
pub const MATCHMAKING_DELAY: Duration = Duration::from_secs(2);

/// Longest allowed display name.
pub const MAX_NAME_LEN: usize = 16;

/// Which lobby tab is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LobbyTab {
    Rooms,
    Leaderboard,
}

/// The current application screen.
pub enum Screen {
    /// Entering a display name
    Login { input: String },
    /// Browsing rooms and the leaderboard
    Lobby { board: LobbyBoard, tab: LobbyTab },
    /// Waiting for the simulated match
    Matchmaking { ready_at: Instant },
    /// In a session against the bot
    Playing {
        session: RoundSession,
        runner: JudgeRunner,
    },
    /// Session over
    Results { result: SessionResult },
    /// Something went wrong (storage failure); any key returns to the lobby
    Error { message: String },
}

/// Top-level coordinator: owns the screen, the profile, and the judge.
pub struct AppCoordinator {
    pub screen: Screen,
    pub should_quit: bool,
    profile: Option<ProfileRecord>,
    store: ProfileStore,
    judge: Arc<dyn WordJudge>,
}

impl AppCoordinator {
    /// Start the app. A saved profile skips the login screen.
    pub fn new(
        store: ProfileStore,
        judge: Arc<dyn WordJudge>,
        now: Instant,
    ) -> Result<Self, crate::profile::ProfileError> {
        let profile = store.load()?;
        let screen = match profile {
            Some(_) => Screen::Lobby {
                board: LobbyBoard::new(now),
                tab: LobbyTab::Rooms,
            },
            None => Screen::Login {
                input: String::new(),
            },
        };
        Ok(AppCoordinator {
            screen,
            should_quit: false,
            profile,
            store,
            judge,
        })
    }

    pub fn profile(&self) -> Option<&ProfileRecord> {
        self.profile.as_ref()
    }

    /// Character input, routed to whichever screen wants it.
    pub fn on_char(&mut self, c: char, _now: Instant) {
        match &mut self.screen {
            Screen::Login { input } => {
                if input.chars().count() < MAX_NAME_LEN && !c.is_control() {
                    input.push(c);
                }
            }
            Screen::Playing { session, .. } => {
                if !c.is_control() {
                    session.on_char(c);
                }
            }
            _ => {}
        }
    }

    pub fn on_backspace(&mut self) {
        match &mut self.screen {
            Screen::Login { input } => {
                input.pop();
            }
            Screen::Playing { session, .. } => {
                session.on_backspace();
            }
            _ => {}
        }
    }

    /// Enter: confirm the login name, start matchmaking, submit a word,
    /// or leave the results screen.
    pub fn on_enter(&mut self, now: Instant) {
        match &mut self.screen {
            Screen::Login { input } => {
                let name = input.trim().to_string();
                if name.is_empty() {
                    return;
                }
                let profile = ProfileRecord::new(&name);
                if let Err(e) = self.store.save(&profile) {
                    self.screen = Screen::Error {
                        message: e.to_string(),
                    };
                    return;
                }
                self.profile = Some(profile);
                self.go_to_lobby(now);
            }
            Screen::Lobby { .. } => {
                self.screen = Screen::Matchmaking {
                    ready_at: now + MATCHMAKING_DELAY,
                };
            }
            Screen::Playing { session, runner } => {
                if let crate::game::round::SubmitOutcome::Checking(request) = session.submit(now) {
                    runner.spawn_check(request);
                }
            }
            Screen::Results { .. } | Screen::Error { .. } => {
                self.go_to_lobby(now);
            }
            Screen::Matchmaking { .. } => {}
        }
    }

    /// Tab switches the lobby between rooms and the leaderboard.
    pub fn on_tab(&mut self) {
        if let Screen::Lobby { tab, .. } = &mut self.screen {
            *tab = match tab {
                LobbyTab::Rooms => LobbyTab::Leaderboard,
                LobbyTab::Leaderboard => LobbyTab::Rooms,
            };
        }
    }

    /// Esc: leave the game (ending the session), back out of a screen, or
    /// quit from the lobby/login.
    pub fn on_esc(&mut self, now: Instant) {
        match &mut self.screen {
            Screen::Login { .. } | Screen::Lobby { .. } => {
                self.should_quit = true;
            }
            Screen::Matchmaking { .. } => {
                self.go_to_lobby(now);
            }
            Screen::Playing { .. } => {
                self.finish_session(now);
            }
            Screen::Results { .. } | Screen::Error { .. } => {
                self.go_to_lobby(now);
            }
        }
    }

    /// One-second cadence: drive the countdown and launch the bot's move.
    pub fn tick(&mut self, now: Instant) {
        if let Screen::Playing { session, runner } = &mut self.screen {
            if let Some(prompt) = session.tick(now) {
                runner.spawn_bot(prompt);
            }
        }
    }

    /// Fast cadence: deadlines, room drift, judge replies.
    pub fn poll(&mut self, now: Instant) {
        match &mut self.screen {
            Screen::Lobby { board, .. } => {
                board.poll(now);
            }
            Screen::Matchmaking { ready_at } => {
                if now >= *ready_at {
                    self.start_game(now);
                }
            }
            Screen::Playing { session, runner } => {
                for reply in runner.poll() {
                    match reply {
                        JudgeReply::Checked { seq, word, verdict } => {
                            session.resolve_verdict(seq, &word, verdict, now);
                        }
                        JudgeReply::BotWord { seq, word } => {
                            session.resolve_bot_word(seq, &word);
                        }
                    }
                }
                session.poll(now);
            }
            _ => {}
        }
    }

    fn go_to_lobby(&mut self, now: Instant) {
        self.screen = Screen::Lobby {
            board: LobbyBoard::new(now),
            tab: LobbyTab::Rooms,
        };
    }

    fn start_game(&mut self, now: Instant) {
        let name = match &self.profile {
            Some(profile) => profile.display_name.clone(),
            None => return,
        };
        self.screen = Screen::Playing {
            session: RoundSession::new(&name, now),
            runner: JudgeRunner::new(Arc::clone(&self.judge)),
        };
    }

    /// End the session, fold the result into the profile, and show the
    /// results screen. The player's own name is passed through as the
    /// declared winner; every completed session counts as a win.
    fn finish_session(&mut self, _now: Instant) {
        let Screen::Playing { session, .. } = &mut self.screen else {
            return;
        };
        let Some(profile) = self.profile.as_mut() else {
            return;
        };

        let result = session.end_session(&profile.display_name);
        profile.apply_session_result(&result);
        match self.store.save(profile) {
            Ok(()) => self.screen = Screen::Results { result },
            Err(e) => {
                self.screen = Screen::Error {
                    message: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judge::Verdict;
    use crate::profile::League;

    struct AlwaysValid;

    impl WordJudge for AlwaysValid {
        fn check_word(&self, _word: &str, _category: &str, _letter: char) -> Verdict {
            Verdict::valid()
        }

        fn suggest_word(&self, _category: &str, _letter: char, _excluded: &[String]) -> String {
            String::new()
        }
    }

    fn coordinator() -> (AppCoordinator, Instant) {
        let now = Instant::now();
        let store = ProfileStore::open_in_memory().unwrap();
        let app = AppCoordinator::new(store, Arc::new(AlwaysValid), now).unwrap();
        (app, now)
    }

    fn login(app: &mut AppCoordinator, name: &str, now: Instant) {
        for c in name.chars() {
            app.on_char(c, now);
        }
        app.on_enter(now);
    }

    #[test]
    fn test_fresh_start_shows_login() {
        let (app, _) = coordinator();
        assert!(matches!(app.screen, Screen::Login { .. }));
        assert!(app.profile().is_none());
    }

    #[test]
    fn test_saved_profile_skips_login() {
        let now = Instant::now();
        let store = ProfileStore::open_in_memory().unwrap();
        store.save(&ProfileRecord::new("Savaşçı_01")).unwrap();

        let app = AppCoordinator::new(store, Arc::new(AlwaysValid), now).unwrap();
        assert!(matches!(app.screen, Screen::Lobby { .. }));
        assert_eq!(app.profile().unwrap().display_name, "Savaşçı_01");
    }

    #[test]
    fn test_login_creates_profile_and_enters_lobby() {
        let (mut app, now) = coordinator();
        login(&mut app, "Savaşçı_01", now);

        assert!(matches!(app.screen, Screen::Lobby { .. }));
        let profile = app.profile().unwrap();
        assert_eq!(profile.display_name, "Savaşçı_01");
        assert_eq!(profile.level, 1);
        assert_eq!(profile.league, League::Bronz);
    }

    #[test]
    fn test_login_rejects_empty_name() {
        let (mut app, now) = coordinator();
        app.on_char(' ', now);
        app.on_enter(now);
        assert!(matches!(app.screen, Screen::Login { .. }));
    }

    #[test]
    fn test_login_caps_name_length() {
        let (mut app, now) = coordinator();
        for _ in 0..30 {
            app.on_char('a', now);
        }
        if let Screen::Login { input } = &app.screen {
            assert_eq!(input.chars().count(), MAX_NAME_LEN);
        } else {
            panic!("expected login screen");
        }
    }

    #[test]
    fn test_lobby_tab_toggles() {
        let (mut app, now) = coordinator();
        login(&mut app, "Oyuncu", now);

        app.on_tab();
        assert!(matches!(
            app.screen,
            Screen::Lobby {
                tab: LobbyTab::Leaderboard,
                ..
            }
        ));
        app.on_tab();
        assert!(matches!(
            app.screen,
            Screen::Lobby {
                tab: LobbyTab::Rooms,
                ..
            }
        ));
    }

    #[test]
    fn test_matchmaking_waits_then_starts_game() {
        let (mut app, now) = coordinator();
        login(&mut app, "Oyuncu", now);
        app.on_enter(now);
        assert!(matches!(app.screen, Screen::Matchmaking { .. }));

        // Not ready yet
        app.poll(now + Duration::from_secs(1));
        assert!(matches!(app.screen, Screen::Matchmaking { .. }));

        app.poll(now + MATCHMAKING_DELAY);
        assert!(matches!(app.screen, Screen::Playing { .. }));
    }

    #[test]
    fn test_esc_cancels_matchmaking() {
        let (mut app, now) = coordinator();
        login(&mut app, "Oyuncu", now);
        app.on_enter(now);
        app.on_esc(now);
        assert!(matches!(app.screen, Screen::Lobby { .. }));
    }

    #[test]
    fn test_leaving_game_updates_profile_and_shows_results() {
        let (mut app, now) = coordinator();
        login(&mut app, "Oyuncu", now);
        app.on_enter(now);
        app.poll(now + MATCHMAKING_DELAY);
        assert!(matches!(app.screen, Screen::Playing { .. }));

        app.on_esc(now);

        let Screen::Results { result } = &app.screen else {
            panic!("expected results screen");
        };
        assert_eq!(result.final_score, 0);
        assert_eq!(result.winner_name, "Oyuncu");

        let profile = app.profile().unwrap();
        assert_eq!(profile.games_played, 1);
        assert_eq!(profile.xp, 100);
        // The player is declared winner unconditionally on leaving
        assert_eq!(profile.wins, 1);
    }

    #[test]
    fn test_results_screen_returns_to_lobby() {
        let (mut app, now) = coordinator();
        login(&mut app, "Oyuncu", now);
        app.on_enter(now);
        app.poll(now + MATCHMAKING_DELAY);
        app.on_esc(now);
        app.on_enter(now);
        assert!(matches!(app.screen, Screen::Lobby { .. }));
    }

    #[test]
    fn test_profile_persists_across_sessions() {
        let (mut app, now) = coordinator();
        login(&mut app, "Oyuncu", now);

        for _ in 0..2 {
            app.on_enter(now); // matchmaking
            app.poll(now + MATCHMAKING_DELAY);
            app.on_esc(now); // leave game
            app.on_enter(now); // back to lobby
        }

        let profile = app.profile().unwrap();
        assert_eq!(profile.games_played, 2);
        assert_eq!(profile.xp, 200);

        // And the store agrees
        let stored = app.store.load().unwrap().unwrap();
        assert_eq!(stored, *profile);
    }

    #[test]
    fn test_esc_quits_from_lobby() {
        let (mut app, now) = coordinator();
        login(&mut app, "Oyuncu", now);
        app.on_esc(now);
        assert!(app.should_quit);
    }
}
