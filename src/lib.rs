//! TalkAdvisor - AI-powered speech practice and evaluation CLI
//!
//! This crate provides the core functionality for recording a practice
//! speech session and having it scored by Google Gemini against a chosen
//! conversation scenario.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Core business logic, value objects, entities, and errors
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (cpal, Gemini, config store)
//! - **CLI**: Command-line interface and argument parsing

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
