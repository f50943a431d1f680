pub mod api_connection;
pub mod calories;
pub mod cli;
pub mod config;
pub mod export;
pub mod menu;
pub mod menu_parser;
pub mod planner;
pub mod previous_week;
pub mod prompts;
pub mod session;
