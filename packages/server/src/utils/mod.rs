pub mod account;
pub mod activity;
pub mod hash;
pub mod jwt;
