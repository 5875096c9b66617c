use crate::server::{
    data::club::ClubRepository,
    error::AppError,
    model::club::{ClubRole, CreateClubParams},
};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod list;
mod members;
