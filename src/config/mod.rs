//! Configuration module for Onboard.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{ExtractionPrompts, Prompts, EXTRACTION_SCHEMA};
pub use settings::{
    ExtractionSettings, FirecrawlSettings, GeneralSettings, PromptSettings, Settings,
};
