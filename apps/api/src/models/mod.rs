pub mod entry;
pub mod leaderboard;
pub mod profile;
pub mod session;
