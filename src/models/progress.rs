use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::field::{missing_fields, FieldValue};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProgressEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub weight: f64,
    pub body_fat: f64,
    pub calories_consumed: i32,
    pub calories_burned: i32,
    /// Minutes
    pub workout_duration: i32,
    pub sleep_hours: Option<f64>,
    pub sleep_quality: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Raw progress submission as posted by the client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressSubmission {
    pub date: Option<NaiveDate>,
    pub weight: Option<FieldValue>,
    pub body_fat: Option<FieldValue>,
    pub calories_consumed: Option<FieldValue>,
    pub calories_burned: Option<FieldValue>,
    pub workout_duration: Option<FieldValue>,
    pub sleep_hours: Option<FieldValue>,
    pub sleep_quality: Option<FieldValue>,
}

impl ProgressSubmission {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        missing_fields(&[
            ("weight", self.weight.as_ref()),
            ("body_fat", self.body_fat.as_ref()),
            ("calories_consumed", self.calories_consumed.as_ref()),
            ("calories_burned", self.calories_burned.as_ref()),
            ("workout_duration", self.workout_duration.as_ref()),
        ])
    }
}

/// Validated values ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct CreateProgressEntry {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub weight: f64,
    pub body_fat: f64,
    pub calories_consumed: i32,
    pub calories_burned: i32,
    pub workout_duration: i32,
    pub sleep_hours: Option<f64>,
    pub sleep_quality: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressGoals {
    pub body_fat: f64,
    pub calories: i32,
    pub sleep_hours: f64,
}

impl Default for ProgressGoals {
    fn default() -> Self {
        Self {
            body_fat: 15.0,
            calories: 2000,
            sleep_hours: 8.0,
        }
    }
}

/// Progress log plus the series the charts are drawn from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressHistory {
    pub goals: ProgressGoals,
    pub entries: Vec<ProgressEntry>,
    pub dates: Vec<String>,
    pub weights: Vec<f64>,
    pub calories_consumed: Vec<i32>,
    pub calories_burned: Vec<i32>,
    pub sleep_hours: Vec<f64>,
    pub sleep_quality: Vec<i32>,
}

impl ProgressHistory {
    /// Entries must already be in ascending date order.
    pub fn from_entries(entries: Vec<ProgressEntry>) -> Self {
        Self {
            goals: ProgressGoals::default(),
            dates: entries
                .iter()
                .map(|entry| entry.date.format("%Y-%m-%d").to_string())
                .collect(),
            weights: entries.iter().map(|entry| entry.weight).collect(),
            calories_consumed: entries.iter().map(|entry| entry.calories_consumed).collect(),
            calories_burned: entries.iter().map(|entry| entry.calories_burned).collect(),
            sleep_hours: entries.iter().filter_map(|entry| entry.sleep_hours).collect(),
            sleep_quality: entries.iter().filter_map(|entry| entry.sleep_quality).collect(),
            entries,
        }
    }
}
