pub mod auth;
pub mod catalog;
pub mod debounce;
pub mod error;
pub mod favorites;
pub mod live_search;
pub mod notify;
pub mod presentation;
pub mod reader;
pub mod search;
pub mod session;
