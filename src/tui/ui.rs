//! UI rendering using ratatui
//!
//! One render function per screen:
//! - Login: pick a display name
//! - Lobby: profile header, room list or leaderboard, activity feed
//! - Matchmaking: searching animation
//! - Playing: the game table
//! - Results: final tally

use crate::app::{AppCoordinator, LobbyTab, Screen};
use crate::game::round::{PlayerSlot, RoundSession, SessionResult, Status};
use crate::lobby::{self, LobbyBoard};
use crate::profile::ProfileRecord;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
};

const LOGO: &str = r#"
 _  _____ _    ___ __  __ ___   ___   ___   _____ ___ ___
| |/ / __| |  |_ _|  \/  | __| / __| /_\ \ / / _ \ __|_ _|
| ' <| _|| |__ | || |\/| | _|  \__ \/ _ \ V /|   \__ \| |
|_|\_\___|____|___|_|  |_|___| |___/_/ \_\_| |_|_|___/___|
"#;

/// Render the appropriate screen based on app state.
pub fn render(frame: &mut Frame, app: &AppCoordinator) {
    match &app.screen {
        Screen::Login { input } => render_login(frame, input),
        Screen::Lobby { board, tab } => render_lobby(frame, app.profile(), board, *tab),
        Screen::Matchmaking { .. } => render_matchmaking(frame),
        Screen::Playing { session, .. } => render_game(frame, session),
        Screen::Results { result } => render_results(frame, result, app.profile()),
        Screen::Error { message } => render_error(frame, message),
    }
}

fn render_login(frame: &mut Frame, input: &str) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Logo
            Constraint::Length(3), // Name input
            Constraint::Min(2),    // Hint
        ])
        .margin(2)
        .split(frame.area());

    frame.render_widget(logo_widget(), layout[0]);

    let name = Paragraph::new(format!("{}_", input))
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Savaşçı adın ")
                .border_style(Style::default().fg(Color::Yellow)),
        );
    frame.render_widget(name, layout[1]);

    let hint = Paragraph::new("Enter: savaşa başla   Esc: çık")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(hint, layout[2]);
}

fn render_lobby(
    frame: &mut Frame,
    profile: Option<&ProfileRecord>,
    board: &LobbyBoard,
    tab: LobbyTab,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Profile header
            Constraint::Min(8),    // Rooms / leaderboard + feed
            Constraint::Length(2), // Footer
        ])
        .margin(1)
        .split(frame.area());

    if let Some(profile) = profile {
        let header = Paragraph::new(format!(
            " {}  |  LVL {}  |  {}  |  {} puan  |  {} maç / {} galibiyet",
            profile.display_name,
            profile.level,
            profile.league.label(),
            profile.total_points,
            profile.games_played,
            profile.wins,
        ))
        .style(Style::default().fg(Color::White).bold())
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, layout[0]);
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(layout[1]);

    match tab {
        LobbyTab::Rooms => render_rooms(frame, board, columns[0]),
        LobbyTab::Leaderboard => render_leaderboard(frame, columns[0]),
    }
    render_feed(frame, columns[1]);

    let footer = Paragraph::new("Enter: RANKED savaş   Tab: odalar/liderlik   Esc: çık")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, layout[2]);
}

fn render_rooms(frame: &mut Frame, board: &LobbyBoard, area: Rect) {
    let items: Vec<ListItem> = board
        .rooms()
        .iter()
        .map(|room| {
            let lock = if room.private { "🔒" } else { "🎮" };
            ListItem::new(format!(
                "{} {:<18} {:>2}/{:<2}  {}",
                lock, room.name, room.player_count, room.max_players, room.owner
            ))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" AKTİF SAVAŞLAR ")
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(list, area);
}

fn render_leaderboard(frame: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = lobby::leaderboard()
        .iter()
        .map(|row| ListItem::new(format!("#{}  {:<14} {:>5} XP", row.rank, row.name, row.xp)))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" LİDERLİK TABLOSU ")
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(list, area);
}

fn render_feed(frame: &mut Frame, area: Rect) {
    let mut items: Vec<ListItem> = lobby::ACTIVITY_FEED
        .iter()
        .map(|entry| {
            ListItem::new(format!(
                "{} {} {} ({})",
                entry.icon, entry.user, entry.action, entry.time_ago
            ))
        })
        .collect();
    items.push(ListItem::new(""));
    for (sender, text) in lobby::CHAT_LINES {
        items.push(ListItem::new(format!("{}: {}", sender, text)));
    }

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" CANLI AKIŞ ")
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(list, area);
}

fn render_matchmaking(frame: &mut Frame) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(frame.area());

    let searching = Paragraph::new("🔎  EŞLEŞME ARANIYOR...")
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Center);
    frame.render_widget(searching, layout[1]);

    let region = Paragraph::new("Lobi: Bölge-1 (Türkiye)")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(region, layout[2]);
}

fn render_game(frame: &mut Frame, session: &RoundSession) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Players
            Constraint::Length(3), // Timer
            Constraint::Length(5), // Category + letter
            Constraint::Length(3), // Used words
            Constraint::Length(3), // Input
            Constraint::Length(2), // Status + hints
        ])
        .margin(1)
        .split(frame.area());

    let players = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout[0]);
    render_player(frame, session.human(), false, players[0]);
    render_player(frame, session.bot(), true, players[1]);

    let turn = session.turn();
    let ratio = if turn.total_seconds == 0 {
        0.0
    } else {
        f64::from(turn.seconds_remaining) / f64::from(turn.total_seconds)
    };
    let timer_color = if turn.seconds_remaining < 5 {
        Color::Red
    } else {
        Color::Yellow
    };
    let timer = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" SÜRE "))
        .gauge_style(Style::default().fg(timer_color))
        .ratio(ratio)
        .label(format!("{}s", turn.seconds_remaining));
    frame.render_widget(timer, layout[1]);

    let card = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("KATEGORİ: {}", turn.category),
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("HARF: {}", turn.letter),
            Style::default().fg(Color::Magenta).bold(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(card, layout[2]);

    let recent = session.recent_words(10).join("  ");
    let history = Paragraph::new(if recent.is_empty() {
        "Sıra sende!".to_string()
    } else {
        recent
    })
    .style(Style::default().fg(Color::DarkGray))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" KULLANILAN KELİMELER "),
    );
    frame.render_widget(history, layout[3]);

    let input_style = match session.status() {
        Status::Error { .. } => Style::default().fg(Color::Red),
        _ if session.is_checking() => Style::default().fg(Color::DarkGray),
        _ => Style::default().fg(Color::White),
    };
    let input = Paragraph::new(format!("{}_", session.input()))
        .style(input_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" KELİMENİ SÖYLE "),
        );
    frame.render_widget(input, layout[4]);

    let (message, color) = match session.status() {
        Status::Idle => ("Enter: gönder   Esc: ayrıl".to_string(), Color::DarkGray),
        Status::Checking => ("KONTROL EDİLİYOR...".to_string(), Color::DarkGray),
        Status::Error { message, .. } => (message.clone(), Color::Red),
        Status::Accepted { points, .. } => (format!("DOĞRU! +{}", points), Color::Green),
    };
    let status = Paragraph::new(message)
        .style(Style::default().fg(color).bold())
        .alignment(Alignment::Center);
    frame.render_widget(status, layout[5]);
}

fn render_player(frame: &mut Frame, player: &PlayerSlot, is_bot: bool, area: Rect) {
    let mut line = format!(" {}  {} puan", player.name, player.score);
    if player.thinking {
        line.push_str("  (yazıyor...)");
    } else if let Some(word) = &player.last_word {
        line.push_str(&format!("  [{}]", word));
    }
    let color = if is_bot { Color::Magenta } else { Color::Yellow };
    let widget = Paragraph::new(line)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn render_results(frame: &mut Frame, result: &SessionResult, profile: Option<&ProfileRecord>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Logo
            Constraint::Length(6), // Tally
            Constraint::Min(2),    // Hint
        ])
        .margin(2)
        .split(frame.area());

    frame.render_widget(logo_widget(), layout[0]);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("SAVAŞ BİTTİ — kazanan: {}", result.winner_name),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::from(format!("Skor: {}  (+100 XP)", result.final_score)),
    ];
    if let Some(profile) = profile {
        lines.push(Line::from(format!(
            "Toplam: {} puan | LVL {} | {}",
            profile.total_points,
            profile.level,
            profile.league.label()
        )));
    }
    let tally = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(tally, layout[1]);

    let hint = Paragraph::new("Enter: lobiye dön")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(hint, layout[2]);
}

fn render_error(frame: &mut Frame, message: &str) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Min(3)])
        .split(frame.area());

    let error = Paragraph::new(format!("HATA: {}\n\nEnter: lobiye dön", message))
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(error, layout[1]);
}

fn logo_widget() -> Paragraph<'static> {
    Paragraph::new(LOGO)
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Center)
}
