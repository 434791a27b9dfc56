use futures::future::join_all;
use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;
use tracing::{info, instrument, warn};

use crate::models::{
    AdaptWorkoutRequest, AdaptedWorkout, FieldValue, WorkoutPlanRequest, WorkoutPlanResult,
};
use crate::services::completion_client::{CompletionClient, CompletionOptions};
use crate::services::errors::ServiceError;
use crate::services::exercise_parser::{
    fallback_workout, parse_exercise_plan, FALLBACK_IMAGE_QUERY, PARSED_FEEDBACK,
};
use crate::services::image_resolver::ImageResolver;
use crate::services::response_cleaner::clean_response;

fn bullet_regex() -> &'static Regex {
    static BULLET: OnceLock<Regex> = OnceLock::new();
    BULLET.get_or_init(|| Regex::new(r"• (.*?):").expect("bullet pattern is valid"))
}

fn day_regex() -> &'static Regex {
    static DAY: OnceLock<Regex> = OnceLock::new();
    DAY.get_or_init(|| Regex::new(r"Day \d+: (.*)").expect("day pattern is valid"))
}

/// Lowercase, spaces to underscores
pub fn normalize_exercise_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// Exercise names named in a generated plan.
///
/// Collects every `• Name:` bullet plus the comma-separated entries of the
/// first `Day N:` line. Names are unique by their normalized form; the first
/// spelling seen is kept.
pub fn extract_exercise_names(plan: &str) -> Vec<String> {
    let bullets = bullet_regex()
        .captures_iter(plan)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    let first_day = day_regex()
        .captures(plan)
        .and_then(|caps| caps.get(1))
        .map(|m| {
            m.as_str()
                .split(", ")
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    let mut seen = HashSet::new();
    bullets
        .chain(first_day)
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(normalize_exercise_name(name)))
        .collect()
}

pub fn build_workout_prompt(request: &WorkoutPlanRequest) -> String {
    let field = |value: Option<&FieldValue>| value.map(ToString::to_string).unwrap_or_default();

    format!(
        "Create a detailed workout plan with these parameters:
Fitness Level: {fitness_level}
Primary Goal: {workout_type}
Available Equipment: {equipment}
Sessions per Week: {sessions}

Provide the response in EXACTLY this format:

[Workout Schedule]
Day 1: [Exercise1], [Exercise2], [Exercise3]
Day 2: [Exercise4], [Exercise5], [Exercise6]

[Exercise Details]
• [Exercise1]: [Muscle Group] - [Sets]x[Reps] - [Description]
• [Exercise2]: [Muscle Group] - [Sets]x[Reps] - [Description]

[Progression Plan]
- Week 1: [Details]
- Week 2: [Details]",
        fitness_level = field(request.fitness_level.as_ref()),
        workout_type = field(request.workout_type.as_ref()),
        equipment = field(request.available_equipment.as_ref()),
        sessions = field(request.weekly_sessions.as_ref()),
    )
}

#[derive(Debug, Clone)]
pub struct WorkoutPlanService {
    completion: CompletionClient,
    images: ImageResolver,
}

impl WorkoutPlanService {
    pub fn new(completion: CompletionClient, images: ImageResolver) -> Self {
        Self { completion, images }
    }

    /// Generate a weekly plan and one image per exercise it names
    #[instrument(skip(self, request))]
    pub async fn generate(&self, request: &WorkoutPlanRequest) -> Result<WorkoutPlanResult, ServiceError> {
        ServiceError::check_required(request.missing_fields())?;

        let prompt = build_workout_prompt(request);
        let raw_plan = self
            .completion
            .complete_prompt(&prompt, CompletionOptions::PLAN)
            .await?;
        let plan = clean_response(&raw_plan);

        let names = extract_exercise_names(&plan);
        info!(exercises = names.len(), "Resolving exercise images");

        let queries: Vec<String> = names
            .iter()
            .map(|name| format!("{} exercise proper form", name))
            .collect();
        let references = join_all(queries.iter().map(|query| self.images.resolve(query))).await;

        let exercise_images: BTreeMap<String, String> = names
            .iter()
            .map(|name| normalize_exercise_name(name))
            .zip(references)
            .collect();

        Ok(WorkoutPlanResult {
            plan,
            exercise_images,
            status: "success".to_string(),
        })
    }

    /// Turn a free-form request into structured exercises.
    ///
    /// Completion failures propagate; unparseable output becomes the fixed
    /// fallback workout.
    #[instrument(skip(self, request))]
    pub async fn adapt(&self, request: &AdaptWorkoutRequest) -> Result<AdaptedWorkout, ServiceError> {
        ServiceError::check_required(request.missing_fields())?;
        let prompt = request
            .prompt
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();

        let raw = self
            .completion
            .complete_prompt(&prompt, CompletionOptions::SHORT)
            .await?;

        match parse_exercise_plan(&raw) {
            Ok(exercises) => Ok(AdaptedWorkout {
                exercises,
                feedback: PARSED_FEEDBACK.to_string(),
            }),
            Err(e) => {
                warn!("Falling back to default workout: {}", e);
                let image = self.images.resolve(FALLBACK_IMAGE_QUERY).await;
                Ok(fallback_workout(Some(image)))
            }
        }
    }
}
