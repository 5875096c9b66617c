//! HTTP backend for Wander Sphere.
//!
//! Axum serves a JSON API, SeaORM talks to SQLite, and tower-sessions keeps cookie
//! sessions in the same database.
//!
//! Requests pass through `controller/` (guard, DTO conversion), `service/` (rules and
//! transactions) and `data/` (repositories returning `model/` domain types). Errors from
//! every layer are `error::AppError`, which renders itself as a JSON response.
//!
//! Alongside the API: `config` reads the environment, `startup` opens the database and
//! session store, `router` mounts handlers with their OpenAPI document, and
//! `scheduler/` runs the per-minute maintenance job.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
