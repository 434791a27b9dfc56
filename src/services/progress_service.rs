use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::models::validation::{
    validate_body_fat, validate_non_negative, validate_sleep_hours, validate_weight,
};
use crate::models::{
    CreateProgressEntry, FieldValue, ProgressEntry, ProgressHistory, ProgressSubmission,
};
use crate::services::errors::ServiceError;

/// Number of entries returned by [`ProgressService::history`]
pub const HISTORY_LIMIT: i64 = 30;

const PROGRESS_COLUMNS: &str = "id, user_id, date, weight, body_fat, calories_consumed, calories_burned, \
     workout_duration, sleep_hours, sleep_quality, created_at";

fn number(value: Option<&FieldValue>, field: &'static str) -> Result<f64, ServiceError> {
    value
        .and_then(FieldValue::as_f64)
        .filter(|number| number.is_finite())
        .ok_or_else(|| ServiceError::invalid(field, "expected a number"))
}

fn whole_number(value: Option<&FieldValue>, field: &'static str) -> Result<i32, ServiceError> {
    let parsed = value
        .and_then(FieldValue::as_i32)
        .ok_or_else(|| ServiceError::invalid(field, "expected a whole number"))?;
    validate_non_negative(parsed, field).map_err(|e| ServiceError::invalid(field, e))?;
    Ok(parsed)
}

/// Optional sleep values: missing, null, blank or zero are all "not recorded"
fn optional_number(value: Option<&FieldValue>, field: &'static str) -> Result<Option<f64>, ServiceError> {
    match value.filter(|value| !value.is_blank()) {
        None => Ok(None),
        Some(value) => {
            let parsed = number(Some(value), field)?;
            Ok((parsed != 0.0).then_some(parsed))
        }
    }
}

fn optional_whole_number(
    value: Option<&FieldValue>,
    field: &'static str,
) -> Result<Option<i32>, ServiceError> {
    match value.filter(|value| !value.is_blank()) {
        None => Ok(None),
        Some(value) => {
            let parsed = whole_number(Some(value), field)?;
            Ok((parsed != 0).then_some(parsed))
        }
    }
}

/// Validate a submission and convert it into insertable values
pub fn build_progress_entry(
    user_id: Uuid,
    submission: &ProgressSubmission,
    today: NaiveDate,
) -> Result<CreateProgressEntry, ServiceError> {
    ServiceError::check_required(submission.missing_fields())?;

    let weight = number(submission.weight.as_ref(), "weight")?;
    validate_weight(weight).map_err(|e| ServiceError::invalid("weight", e))?;

    let body_fat = number(submission.body_fat.as_ref(), "body_fat")?;
    validate_body_fat(body_fat).map_err(|e| ServiceError::invalid("body_fat", e))?;

    let sleep_hours = optional_number(submission.sleep_hours.as_ref(), "sleep_hours")?;
    if let Some(hours) = sleep_hours {
        validate_sleep_hours(hours).map_err(|e| ServiceError::invalid("sleep_hours", e))?;
    }

    Ok(CreateProgressEntry {
        user_id,
        date: submission.date.unwrap_or(today),
        weight,
        body_fat,
        calories_consumed: whole_number(submission.calories_consumed.as_ref(), "calories_consumed")?,
        calories_burned: whole_number(submission.calories_burned.as_ref(), "calories_burned")?,
        workout_duration: whole_number(submission.workout_duration.as_ref(), "workout_duration")?,
        sleep_hours,
        sleep_quality: optional_whole_number(submission.sleep_quality.as_ref(), "sleep_quality")?,
    })
}

#[derive(Debug, Clone)]
pub struct ProgressService {
    db: PgPool,
}

impl ProgressService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    #[instrument(skip(self, submission), fields(user_id = %user_id))]
    pub async fn submit(
        &self,
        user_id: Uuid,
        submission: &ProgressSubmission,
    ) -> Result<ProgressEntry, ServiceError> {
        let entry = build_progress_entry(user_id, submission, Utc::now().date_naive())?;

        let query = format!(
            "INSERT INTO progress_entries (id, user_id, date, weight, body_fat, calories_consumed, calories_burned, \
             workout_duration, sleep_hours, sleep_quality) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {}",
            PROGRESS_COLUMNS
        );

        let stored = sqlx::query_as::<_, ProgressEntry>(&query)
            .bind(Uuid::new_v4())
            .bind(entry.user_id)
            .bind(entry.date)
            .bind(entry.weight)
            .bind(entry.body_fat)
            .bind(entry.calories_consumed)
            .bind(entry.calories_burned)
            .bind(entry.workout_duration)
            .bind(entry.sleep_hours)
            .bind(entry.sleep_quality)
            .fetch_one(&self.db)
            .await?;

        info!(entry_id = %stored.id, date = %stored.date, "Recorded progress entry");
        Ok(stored)
    }

    /// Most recent entries, oldest first, with chart series
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn history(&self, user_id: Uuid) -> Result<ProgressHistory, ServiceError> {
        let query = format!(
            "SELECT {} FROM progress_entries WHERE user_id = $1 \
             ORDER BY date DESC, created_at DESC LIMIT $2",
            PROGRESS_COLUMNS
        );

        let mut entries = sqlx::query_as::<_, ProgressEntry>(&query)
            .bind(user_id)
            .bind(HISTORY_LIMIT)
            .fetch_all(&self.db)
            .await?;
        entries.reverse();

        Ok(ProgressHistory::from_entries(entries))
    }
}
