//! Lobby simulation: room list, activity feed, leaderboard.
//!
//! Everything here is client-side flavor with no backing store. Room
//! player counts drift over time so the list feels live; joining any room
//! just starts matchmaking.

use rand::prelude::*;
use rand::rngs::StdRng;
use std::time::{Duration, Instant};

/// How often room player counts are perturbed.
pub const ROOM_DRIFT_INTERVAL: Duration = Duration::from_secs(4);

/// One room in the lobby list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomListing {
    pub name: &'static str,
    pub owner: &'static str,
    pub player_count: u32,
    pub max_players: u32,
    pub private: bool,
}

/// One line in the live activity feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedEntry {
    pub user: &'static str,
    pub action: &'static str,
    pub time_ago: &'static str,
    pub icon: &'static str,
}

/// One row of the seasonal leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRow {
    pub rank: u32,
    pub name: String,
    pub xp: u32,
}

/// Static activity feed shown in the lobby sidebar.
pub const ACTIVITY_FEED: [FeedEntry; 4] = [
    FeedEntry {
        user: "Caner_TR",
        action: "Gümüş Ligine yükseldi!",
        time_ago: "Az önce",
        icon: "⭐",
    },
    FeedEntry {
        user: "Melo_X",
        action: "5 maçlık seri yakaladı!",
        time_ago: "2dk önce",
        icon: "🔥",
    },
    FeedEntry {
        user: "Admin",
        action: "Yeni kelime paketi eklendi.",
        time_ago: "10dk önce",
        icon: "📦",
    },
    FeedEntry {
        user: "Sözlükçü",
        action: "Hızlı Savaş kazandı.",
        time_ago: "15dk önce",
        icon: "⚔",
    },
];

/// Canned global chat lines.
pub const CHAT_LINES: [(&str, &str); 2] = [
    ("Mert", "Kim düello ister?"),
    ("Ece", "Yeni güncelleme çok iyi."),
];

fn seed_rooms() -> Vec<RoomListing> {
    vec![
        RoomListing {
            name: "Zeka Meydanı",
            owner: "Eren_06",
            player_count: 4,
            max_players: 8,
            private: false,
        },
        RoomListing {
            name: "Hızlı Parmaklar",
            owner: "Selinay_TR",
            player_count: 2,
            max_players: 4,
            private: false,
        },
        RoomListing {
            name: "Özel Düello",
            owner: "Kerem_X",
            player_count: 1,
            max_players: 2,
            private: true,
        },
        RoomListing {
            name: "Word Master Pro",
            owner: "KelimeKralı",
            player_count: 6,
            max_players: 10,
            private: false,
        },
    ]
}

/// Season leaderboard rows (simulated).
pub fn leaderboard() -> Vec<LeaderboardRow> {
    (1..=5)
        .map(|i| LeaderboardRow {
            rank: i,
            name: format!("Savaşçı_{}", i * 13),
            xp: 5000 - i * 500,
        })
        .collect()
}

/// The lobby's mutable state: the drifting room list.
pub struct LobbyBoard {
    rooms: Vec<RoomListing>,
    last_drift: Instant,
    rng: StdRng,
}

impl LobbyBoard {
    pub fn new(now: Instant) -> Self {
        Self::with_rng(StdRng::from_os_rng(), now)
    }

    /// Build a board with a specific RNG (for testing/seeding).
    pub fn with_rng(rng: StdRng, now: Instant) -> Self {
        LobbyBoard {
            rooms: seed_rooms(),
            last_drift: now,
            rng,
        }
    }

    pub fn rooms(&self) -> &[RoomListing] {
        &self.rooms
    }

    /// Perturb player counts once per drift interval.
    pub fn poll(&mut self, now: Instant) {
        if now.duration_since(self.last_drift) < ROOM_DRIFT_INTERVAL {
            return;
        }
        self.last_drift = now;
        for room in &mut self.rooms {
            if self.rng.random::<f64>() > 0.7 && room.player_count < room.max_players {
                room.player_count += 1;
            } else if self.rng.random::<f64>() > 0.8 && room.player_count > 1 {
                room.player_count -= 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_seed_rooms_are_within_capacity() {
        for room in seed_rooms() {
            assert!(room.player_count >= 1);
            assert!(room.player_count <= room.max_players);
        }
    }

    #[test]
    fn test_drift_respects_bounds() {
        let now = Instant::now();
        let mut board = LobbyBoard::with_rng(StdRng::seed_from_u64(99), now);
        for i in 1..500u64 {
            board.poll(now + ROOM_DRIFT_INTERVAL * i as u32);
            for room in board.rooms() {
                assert!(room.player_count >= 1, "room {} drained", room.name);
                assert!(
                    room.player_count <= room.max_players,
                    "room {} overfilled",
                    room.name
                );
            }
        }
    }

    #[test]
    fn test_drift_is_rate_limited() {
        let now = Instant::now();
        let mut board = LobbyBoard::with_rng(StdRng::seed_from_u64(4), now);
        let before: Vec<u32> = board.rooms().iter().map(|r| r.player_count).collect();

        // Polls inside the interval never change anything
        board.poll(now + Duration::from_millis(500));
        board.poll(now + Duration::from_secs(3));
        let after: Vec<u32> = board.rooms().iter().map(|r| r.player_count).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_drift_eventually_changes_counts() {
        let now = Instant::now();
        let mut board = LobbyBoard::with_rng(StdRng::seed_from_u64(1), now);
        let before: Vec<u32> = board.rooms().iter().map(|r| r.player_count).collect();
        for i in 1..50u32 {
            board.poll(now + ROOM_DRIFT_INTERVAL * i);
        }
        let after: Vec<u32> = board.rooms().iter().map(|r| r.player_count).collect();
        assert_ne!(before, after);
    }

    #[test]
    fn test_leaderboard_shape() {
        let rows = leaderboard();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].xp, 4500);
        assert!(rows.windows(2).all(|w| w[0].xp > w[1].xp));
    }
}
