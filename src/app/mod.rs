//! Application state and screen coordination

pub mod screen;

pub use screen::{AppCoordinator, LobbyTab, Screen, MATCHMAKING_DELAY, MAX_NAME_LEN};
