pub mod config;
pub mod data;
pub mod directory;
pub mod forms;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
pub mod utils;
