pub mod activity;
pub mod activity_team;
pub mod activity_template;
pub mod classroom;
pub mod role;
pub mod role_permission;
pub mod team;
pub mod user;
