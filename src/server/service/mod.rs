//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Implementing core business rules and validation
//! - **Orchestration**: Coordinating multiple repository calls and side-effect notifications
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//! - **Transaction Management**: Running multi-write operations such as bookings and wallet
//!   entries inside a single database transaction

pub mod auth;
pub mod booking;
pub mod budget;
pub mod cache;
pub mod club;
pub mod follow;
pub mod notification;
pub mod story;
pub mod trip;
pub mod user;
pub mod wallet;

#[cfg(test)]
mod test;
