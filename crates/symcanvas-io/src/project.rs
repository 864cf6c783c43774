use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use symcanvas_core::{Color, RegistryError, Shape, Style, Symbol, SymbolRegistry};
use symcanvas_renderer::is_reserved_layer_name;
use symcanvas_session::SessionConfig;

use crate::error::ProjectError;

/// A canvas project file: session tunables plus the symbols to register at
/// startup, in draw order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasProject {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub config: SessionConfig,
    #[serde(default)]
    pub symbols: Vec<Symbol>,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

impl CanvasProject {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            version: default_version(),
            description: String::new(),
            config: SessionConfig::default(),
            symbols: Vec::new(),
        }
    }

    /// The single half-transparent red square the canvas starts with.
    pub fn demo() -> Self {
        let mut project = Self::new("demo");
        project.description = "Drag to pan; a second square appears after three seconds.".into();
        if let Ok(rect1) = Symbol::new(
            "rect1",
            Shape::rectangle(100.0, 100.0, 100.0, 100.0),
            Style::filled(Color::RED).with_opacity(0.5),
        ) {
            project.symbols.push(rect1);
        }
        project
    }

    pub fn from_json(json: &str) -> Result<Self, ProjectError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ProjectError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProjectError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let project = Self::from_json(&json)?;
        log::info!(
            "Loaded project '{}' from {} ({} symbols)",
            project.name,
            path.display(),
            project.symbols.len()
        );
        Ok(project)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ProjectError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Register every symbol in file order. A repeated name, or one the
    /// canvas uses for its grid or marker, fails the whole build.
    pub fn build_registry(&self) -> Result<SymbolRegistry, ProjectError> {
        let mut registry = SymbolRegistry::new();
        for symbol in &self.symbols {
            if is_reserved_layer_name(symbol.name()) {
                return Err(RegistryError::ReservedName(symbol.name().to_string()).into());
            }
            registry.add(symbol.clone())?;
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_project_defaults() {
        let project = CanvasProject::from_json(r#"{"name": "empty"}"#).unwrap();
        assert_eq!(project.version, "0.1.0");
        assert_eq!(project.config, SessionConfig::default());
        assert!(project.build_registry().unwrap().is_empty());
    }

    #[test]
    fn test_build_registry_keeps_file_order() {
        let json = r##"{
            "name": "shapes",
            "config": { "redraw_interval_ms": 50 },
            "symbols": [
                { "name": "z", "kind": "line", "x1": 0, "y1": 0, "x2": 10, "y2": 10 },
                { "name": "a", "kind": "rectangle", "x": 1, "y": 2, "width": 3, "height": 4,
                  "style": { "fill": "#0000FF" } }
            ]
        }"##;
        let project = CanvasProject::from_json(json).unwrap();
        assert_eq!(project.config.redraw_interval_ms, 50);
        let registry = project.build_registry().unwrap();
        let names: Vec<&str> = registry.all_in_order().map(|s| s.name()).collect();
        assert_eq!(names, vec!["z", "a"]);
    }

    #[test]
    fn test_duplicate_names_fail_build() {
        let mut project = CanvasProject::demo();
        project.symbols.push(project.symbols[0].clone());
        let err = project.build_registry().unwrap_err();
        assert!(matches!(
            err,
            ProjectError::Registry(RegistryError::DuplicateName(ref n)) if n == "rect1"
        ));
    }

    #[test]
    fn test_reserved_layer_name_fails_build() {
        let json = r#"{"name": "clash", "symbols": [
            { "name": "gridWidth25", "kind": "line", "x1": 0, "y1": 0, "x2": 1, "y2": 1 }
        ]}"#;
        let err = CanvasProject::from_json(json).unwrap().build_registry().unwrap_err();
        assert!(matches!(
            err,
            ProjectError::Registry(RegistryError::ReservedName(ref n)) if n == "gridWidth25"
        ));
    }

    #[test]
    fn test_invalid_symbol_rejected_on_load() {
        let json = r#"{"name": "bad", "symbols": [
            { "name": "r", "kind": "rectangle", "x": 0, "y": 0, "width": -1, "height": 1 }
        ]}"#;
        assert!(matches!(
            CanvasProject::from_json(json),
            Err(ProjectError::Json(_))
        ));
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!(
            "symcanvas-project-{}.json",
            std::process::id()
        ));
        let project = CanvasProject::demo();
        project.save(&path).unwrap();
        let loaded = CanvasProject::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.name, "demo");
        assert_eq!(loaded.symbols, project.symbols);
    }
}
