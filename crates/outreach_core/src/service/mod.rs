//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep UI/host layers decoupled from storage details.

pub mod finance_service;
pub mod library_service;
pub mod school_service;
pub mod settings_service;
pub mod task_service;
