//! Data models for tournament records and scrape logs.

mod prefecture;
mod tournament;

pub use prefecture::{canonical_prefecture, PREFECTURES, PREFECTURE_OTHER};
pub use tournament::{
    Category, NewTournament, ScrapeLogEntry, ScrapeStatus, Tournament, TournamentStatus,
};
