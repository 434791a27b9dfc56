// Runtime configuration loaded from the environment

pub mod ai;
pub mod app;
pub mod database;

pub use ai::*;
pub use app::*;
pub use database::*;
