pub mod auth;
pub mod book;
pub mod favorites;
pub mod id;
pub mod query;
pub mod reading;
