pub mod api;
pub mod config;
pub mod errors;
pub mod guard;
pub mod poller;
pub mod provider;
pub mod router;
