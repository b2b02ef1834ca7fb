pub mod activity;
pub mod auth;
pub mod classroom;
pub mod shared;
pub mod template;
