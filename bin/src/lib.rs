pub mod cli;
pub mod commands;
pub mod navigator;
pub mod script;
