mod booking;
mod budget;
mod club;
mod follow;
mod notification;
mod story;
mod trip;
mod user;
mod wallet;
