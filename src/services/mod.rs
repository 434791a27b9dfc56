// Business logic services

pub mod chat_service;
pub mod completion_client;
pub mod errors;
pub mod exercise_parser;
pub mod image_providers;
pub mod image_resolver;
pub mod nutrition_plan_service;
pub mod progress_service;
pub mod response_cleaner;
pub mod workout_plan_service;

pub use chat_service::{ChatService, ChatSessionStore};
pub use completion_client::{CompletionClient, CompletionError, CompletionOptions};
pub use errors::ServiceError;
pub use exercise_parser::{fallback_workout, parse_exercise_plan, ExerciseParseError};
pub use image_providers::{ImageProvider, ProviderImage};
pub use image_resolver::ImageResolver;
pub use nutrition_plan_service::NutritionPlanService;
pub use progress_service::ProgressService;
pub use response_cleaner::{clean_response, ResponseCleaner};
pub use workout_plan_service::WorkoutPlanService;
