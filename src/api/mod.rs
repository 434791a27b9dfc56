// API routes and handlers

pub mod auth;
pub mod chat;
pub mod health;
pub mod images;
pub mod plans;
pub mod progress;
pub mod routes;
