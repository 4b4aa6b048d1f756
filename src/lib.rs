// src/lib.rs
//! Resumate backend: resume building, AI-assisted analysis, job search
//! aggregation and a chat-based career assistant behind one API.

pub mod admin_cli;
pub mod ai;
pub mod auth;
pub mod core;
pub mod editor;
pub mod intake;
pub mod jobs;
pub mod utils;
pub mod web;

pub use crate::core::config_manager::ConfigManager;
pub use crate::web::start_web_server;
