pub mod auth;
pub mod calculator;
pub mod entries;
pub mod mailer;
pub mod reset;
pub mod session;
pub mod stats;
pub mod throttle;
pub mod users;
