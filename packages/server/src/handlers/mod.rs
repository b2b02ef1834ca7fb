pub mod activity;
pub mod auth;
pub mod classroom;
pub mod team_activity;
pub mod template;
