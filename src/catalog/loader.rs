//! Load a lesson catalog from TOML
//!
//! ```toml
//! [[lessons]]
//! id = "lesson_001"
//! title = "Breaking the Ice"
//! description = "..."
//! prerequisites = []
//!
//! [lessons.metadata]
//! xp_reward = 100
//! estimated_minutes = 15
//! difficulty = "Beginner"
//! required_level = 1
//!
//! [[lessons.questions]]
//! type = "drag-drop"
//! id = "q1_002"
//! prompt = "Arrange these words:"
//! words = ["book", "that"]
//! correct_order = ["that", "book"]
//! explanation = "..."
//! ```

use super::lesson::LessonDefinition;
use super::LessonCatalog;
use crate::core::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    lessons: Vec<LessonDefinition>,
}

/// Parse and validate a catalog document
pub fn parse_catalog(content: &str) -> Result<LessonCatalog> {
    let file: CatalogFile = toml::from_str(content)?;
    LessonCatalog::new(file.lessons)
}

/// Load a catalog file from disk
pub fn load_catalog(path: &Path) -> Result<LessonCatalog> {
    let content = fs::read_to_string(path)?;
    let catalog = parse_catalog(&content)?;
    tracing::info!(
        "Loaded {} lessons from {}",
        catalog.len(),
        path.display()
    );
    Ok(catalog)
}
