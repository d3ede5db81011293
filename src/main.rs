//! Kelime Savaşı - hızlı kelime düellosu
//!
//! Think fast. Say the word. Beat the bot.

mod app;
mod game;
mod judge;
mod lobby;
mod profile;
mod tui;

use app::AppCoordinator;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use judge::{GeminiConfig, GeminiJudge};
use profile::ProfileStore;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tui::Tui;

fn main() -> io::Result<()> {
    // The judge needs a Gemini API key; without one, every check falls
    // back to the offline first-letter rule.
    let api_key = std::env::var("GEMINI_API_KEY")
        .or_else(|_| std::env::var("API_KEY"))
        .unwrap_or_default();
    let judge = Arc::new(GeminiJudge::new(GeminiConfig::new(api_key)));

    let store = match ProfileStore::open() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Profil veritabanı açılamadı: {}", e);
            std::process::exit(1);
        }
    };

    let mut coordinator = match AppCoordinator::new(store, judge, Instant::now()) {
        Ok(coordinator) => coordinator,
        Err(e) => {
            eprintln!("Profil yüklenemedi: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize terminal
    let mut terminal = Tui::new()?;
    terminal.enter()?;

    // Main event loop: sub-second polling for deadlines and judge
    // replies, a one-second cadence for the countdown.
    let tick_rate = Duration::from_secs(1);
    let poll_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| tui::render(frame, &coordinator))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO)
            .min(poll_rate);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    let now = Instant::now();
                    match key.code {
                        KeyCode::Esc => coordinator.on_esc(now),
                        KeyCode::Enter => coordinator.on_enter(now),
                        KeyCode::Backspace => coordinator.on_backspace(),
                        KeyCode::Tab => coordinator.on_tab(),
                        KeyCode::Char(c) => coordinator.on_char(c, now),
                        _ => {}
                    }
                }
            }
        }

        let now = Instant::now();
        coordinator.poll(now);

        if last_tick.elapsed() >= tick_rate {
            coordinator.tick(now);
            last_tick = Instant::now();
        }

        if coordinator.should_quit {
            break;
        }
    }

    // Terminal cleanup happens automatically via Tui::drop
    Ok(())
}
