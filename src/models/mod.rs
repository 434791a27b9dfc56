// Data models and request/response shapes

pub mod chat;
pub mod field;
pub mod nutrition_plan;
pub mod progress;
pub mod user;
pub mod validation;
pub mod workout_plan;

pub use chat::*;
pub use field::*;
pub use nutrition_plan::*;
pub use progress::*;
pub use user::*;
pub use validation::*;
pub use workout_plan::*;
