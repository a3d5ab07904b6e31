pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod logging;
pub mod media;
pub mod middleware;
pub mod model;
pub mod routes;
pub mod services;
pub mod util;

#[cfg(test)]
mod test_utils;

pub use self::app::App;
