//! Request and response types shared by the HTTP API.
//!
//! Every type here is a plain serializable DTO with an OpenAPI schema. Conversion
//! from domain models lives next to the domain models in `server::model`.

pub mod api;
pub mod booking;
pub mod budget;
pub mod club;
pub mod notification;
pub mod story;
pub mod trip;
pub mod user;
pub mod wallet;
