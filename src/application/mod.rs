/// Gateway client
pub mod client;
/// Command registry mapping operation names to typed calls
pub mod commands;
/// Application configuration module
pub mod config;
/// Service interfaces implemented by the client
pub mod interfaces;
