//! Command line front end for formwire: page checks and scripted event
//! replay.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod report;
pub mod script;
