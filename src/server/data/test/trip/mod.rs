use crate::server::{
    data::trip::TripRepository,
    error::AppError,
    model::trip::{CreateTripParams, TripFilter, TripRole, TripStatus, UpdateTripParams},
};
use chrono::{Days, NaiveDate, Utc};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod list_public;
mod members;
mod status_transitions;
mod update;
