use crate::server::{
    data::booking::BookingRepository,
    error::AppError,
    model::booking::{BookingStatus, NewBooking},
};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod overdue_ids;
mod seat_holding_for_trip;
mod update_status;
