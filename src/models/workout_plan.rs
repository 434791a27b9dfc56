use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::field::{missing_fields, FieldValue};

pub const DEFAULT_EXERCISE_TYPE: &str = "General";
pub const DEFAULT_EXERCISE_SETS: &str = "3";
pub const DEFAULT_EXERCISE_REPS: &str = "10-12";
pub const DEFAULT_EXERCISE_INTENSITY: i32 = 60;

/// One exercise extracted from model output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutExercise {
    pub name: String,
    #[serde(rename = "type")]
    pub exercise_type: String,
    pub sets: String,
    pub reps: String,
    /// Percent of maximum effort
    pub intensity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl WorkoutExercise {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exercise_type: DEFAULT_EXERCISE_TYPE.to_string(),
            sets: DEFAULT_EXERCISE_SETS.to_string(),
            reps: DEFAULT_EXERCISE_REPS.to_string(),
            intensity: DEFAULT_EXERCISE_INTENSITY,
            image: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkoutPlanRequest {
    pub fitness_level: Option<FieldValue>,
    pub workout_type: Option<FieldValue>,
    pub available_equipment: Option<FieldValue>,
    pub weekly_sessions: Option<FieldValue>,
}

impl WorkoutPlanRequest {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        missing_fields(&[
            ("fitness_level", self.fitness_level.as_ref()),
            ("workout_type", self.workout_type.as_ref()),
            ("available_equipment", self.available_equipment.as_ref()),
            ("weekly_sessions", self.weekly_sessions.as_ref()),
        ])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutPlanResult {
    pub plan: String,
    /// Normalized exercise name (lowercase, underscores) to image reference
    pub exercise_images: BTreeMap<String, String>,
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdaptWorkoutRequest {
    pub prompt: Option<FieldValue>,
}

impl AdaptWorkoutRequest {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        missing_fields(&[("prompt", self.prompt.as_ref())])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptedWorkout {
    pub exercises: Vec<WorkoutExercise>,
    pub feedback: String,
}
