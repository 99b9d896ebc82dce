use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub hole_count: u32,
}

/// A venue holding one or more courses. Course order is kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseLocation {
    pub id: String,
    pub name: String,
    pub courses: Vec<Course>,
}

impl CourseLocation {
    pub fn course(&self, course_id: &str) -> Option<&Course> {
        self.courses.iter().find(|course| course.id == course_id)
    }
}

/// The outcome of one hole. Winners, losers and hole-in-one achievers are sets;
/// hole-in-one membership is independent of the win/loss outcome.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HoleResult {
    pub hole_number: u32,
    #[serde(default)]
    pub winners: BTreeSet<String>,
    #[serde(default)]
    pub losers: BTreeSet<String>,
    #[serde(default)]
    pub hole_in_one_players: BTreeSet<String>,
}

impl HoleResult {
    pub fn hole(hole_number: u32) -> Self {
        Self {
            hole_number,
            ..Self::default()
        }
    }

    pub fn won_by(mut self, players: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.winners.extend(players.into_iter().map(Into::into));
        self
    }

    pub fn lost_by(mut self, players: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.losers.extend(players.into_iter().map(Into::into));
        self
    }

    pub fn hole_in_one_by(mut self, players: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.hole_in_one_players
            .extend(players.into_iter().map(Into::into));
        self
    }

    /// Every player id mentioned anywhere in this result.
    pub fn mentioned_players(&self) -> BTreeSet<&str> {
        self.winners
            .iter()
            .chain(&self.losers)
            .chain(&self.hole_in_one_players)
            .map(String::as_str)
            .collect()
    }
}

/// One playthrough of a course. `player_ids` is fixed at start and
/// `hole_results` only ever grows, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub season_id: String,
    pub location_id: String,
    pub course_id: String,
    pub starting_hole: u32,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub player_ids: Vec<String>,
    pub hole_results: Vec<HoleResult>,
}

impl Game {
    pub fn is_participant(&self, player_id: &str) -> bool {
        self.player_ids.iter().any(|id| id == player_id)
    }

    pub fn date_played(&self) -> NaiveDate {
        self.started_at.date_naive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScorecard {
    pub player_id: String,
    pub course_name: String,
    pub score: i32,
    pub date_played: NaiveDate,
    pub hole_in_one_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonStanding {
    pub player_id: String,
    pub score: i32,
    pub hole_in_one_count: u32,
}
