//! Lifetime statistics and unlocked achievements (`achievements.json`).
//!
//! Timestamps are local wall-clock times written as `YYYY-MM-DD HH:MM:SS`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::paths::{load_or_default, write_json_atomic, ACHIEVEMENTS_FILE};
use crate::types::{Achievement, PERSISTENCE_GAMES};

pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIME_FORMAT;

    pub fn serialize<S: Serializer>(t: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&t.format(TIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, TIME_FORMAT).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            t: &Option<NaiveDateTime>,
            s: S,
        ) -> Result<S::Ok, S::Error> {
            match t {
                Some(t) => super::serialize(t, s),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Option<NaiveDateTime>, D::Error> {
            Option::<String>::deserialize(d)?
                .map(|raw| {
                    NaiveDateTime::parse_from_str(&raw, TIME_FORMAT)
                        .map_err(serde::de::Error::custom)
                })
                .transpose()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unlocked {
    pub name: Achievement,
    #[serde(with = "timestamp")]
    pub unlock_time: NaiveDateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsBook {
    pub total_games: u32,
    pub total_score: u64,
    pub best_score: u32,
    #[serde(with = "timestamp::option")]
    pub last_game_time: Option<NaiveDateTime>,
    pub achievements: Vec<Unlocked>,
}

impl StatsBook {
    pub fn is_unlocked(&self, a: Achievement) -> bool {
        self.achievements.iter().any(|u| u.name == a)
    }

    /// Record an unlock. No-op (returns `false`) if already unlocked.
    pub fn unlock(&mut self, a: Achievement, now: NaiveDateTime) -> bool {
        if self.is_unlocked(a) {
            return false;
        }
        self.achievements.push(Unlocked {
            name: a,
            unlock_time: now,
        });
        true
    }

    /// Count a finished game. Returns `true` if this game unlocked Persistence.
    pub fn record_game(&mut self, score: u32, now: NaiveDateTime) -> bool {
        self.total_games = self.total_games.saturating_add(1);
        self.total_score = self.total_score.saturating_add(u64::from(score));
        self.best_score = self.best_score.max(score);
        self.last_game_time = Some(now);

        self.total_games >= PERSISTENCE_GAMES && self.unlock(Achievement::Persistence, now)
    }

    pub fn locked(&self) -> impl Iterator<Item = Achievement> + '_ {
        Achievement::ALL
            .into_iter()
            .filter(|a| !self.is_unlocked(*a))
    }

    pub fn clear_achievements(&mut self) {
        self.achievements.clear();
    }
}

#[derive(Debug, Clone)]
pub struct AchievementStore {
    path: PathBuf,
    book: StatsBook,
}

impl AchievementStore {
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(ACHIEVEMENTS_FILE);
        let book = load_or_default(&path);
        Self { path, book }
    }

    pub fn book(&self) -> &StatsBook {
        &self.book
    }

    /// Unlock and save. Already-unlocked achievements are not rewritten.
    pub fn add(&mut self, a: Achievement) -> Result<bool> {
        if !self.book.unlock(a, now()) {
            return Ok(false);
        }
        tracing::info!(achievement = a.name(), "achievement saved");
        self.save()?;
        Ok(true)
    }

    /// Count a finished game and save. Returns `true` if Persistence was unlocked.
    pub fn record_game(&mut self, score: u32) -> Result<bool> {
        let unlocked = self.book.record_game(score, now());
        self.save()?;
        Ok(unlocked)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.book.clear_achievements();
        self.save()
    }

    fn save(&self) -> Result<()> {
        write_json_atomic(&self.path, &self.book)
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(h, 30, 0))
            .unwrap()
    }

    #[test]
    fn unlock_is_idempotent() {
        let mut book = StatsBook::default();
        assert!(book.unlock(Achievement::LongSnake, at(9)));
        assert!(!book.unlock(Achievement::LongSnake, at(10)));
        assert_eq!(book.achievements.len(), 1);
        assert_eq!(book.achievements[0].unlock_time, at(9));
        assert_eq!(book.locked().count(), Achievement::ALL.len() - 1);
    }

    #[test]
    fn persistence_unlocks_on_tenth_game() {
        let mut book = StatsBook::default();
        for i in 0..9 {
            assert!(!book.record_game(10 * i, at(8)));
        }
        assert!(!book.is_unlocked(Achievement::Persistence));
        assert!(book.record_game(5, at(9)));
        assert!(book.is_unlocked(Achievement::Persistence));
        assert!(!book.record_game(5, at(10)));

        assert_eq!(book.total_games, 11);
        assert_eq!(book.best_score, 80);
        assert_eq!(book.total_score, 360 + 10);
        assert_eq!(book.last_game_time, Some(at(10)));
    }

    #[test]
    fn json_layout_uses_display_names_and_plain_timestamps() {
        let mut book = StatsBook::default();
        book.unlock(Achievement::FoodFrenzy, at(14));
        let json = serde_json::to_value(&book).unwrap();

        assert_eq!(json["achievements"][0]["name"], "Food Frenzy");
        assert_eq!(json["achievements"][0]["unlock_time"], "2024-05-01 14:30:00");
        assert!(json["last_game_time"].is_null());

        let back: StatsBook = serde_json::from_value(json).unwrap();
        assert_eq!(back, book);
    }

    #[test]
    fn store_persists_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = AchievementStore::open(dir.path());
        assert!(store.add(Achievement::Marathon).unwrap());
        assert!(!store.add(Achievement::Marathon).unwrap());
        store.record_game(42).unwrap();

        let mut reopened = AchievementStore::open(dir.path());
        assert!(reopened.book().is_unlocked(Achievement::Marathon));
        assert_eq!(reopened.book().best_score, 42);

        reopened.clear().unwrap();
        let cleared = AchievementStore::open(dir.path());
        assert!(cleared.book().achievements.is_empty());
        assert_eq!(cleared.book().total_games, 1);
    }
}
