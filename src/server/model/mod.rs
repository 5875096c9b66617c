//! Domain models and operation parameters.
//!
//! Domain models are produced by repositories from SeaORM entities (`from_entity`) and
//! turned into API DTOs by controllers (`into_dto`). Parameter types carry validated
//! input from controllers into services.

pub mod booking;
pub mod budget;
pub mod club;
pub mod notification;
pub mod pagination;
pub mod story;
pub mod trip;
pub mod user;
pub mod wallet;
