use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub(crate) const NODES_PATH_ENV_VAR: &str = "MAZE_NODES_PATH";

pub(crate) type ContentResult<T> = Result<T, String>;

/// One educational node: a short title plus the text lines shown when the
/// player opens its panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct EduNode {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) lines: Vec<String>,
}

/// The read-only node content loaded before scene start. The tutorial gate is
/// a dedicated field rather than a reserved id inside `lessons`: which node
/// gates the deferred spawn is structure, not string comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct NodeCatalog {
    pub(crate) tutorial: EduNode,
    pub(crate) lessons: Vec<EduNode>,
}

impl NodeCatalog {
    pub(crate) fn builtin() -> Self {
        Self {
            tutorial: EduNode {
                id: "tutorial".to_string(),
                title: "Tutorial: what's the goal?".to_string(),
                lines: vec![
                    "Read short privacy pills at cyan nodes (press E).".to_string(),
                    "Collect 3 keys to open the door and reach the cyan ring (exit).".to_string(),
                    "Optional portal: solve the cipher for bonus. Avoid lasers and drone."
                        .to_string(),
                ],
            },
            lessons: vec![
                EduNode {
                    id: "shielded-pool".to_string(),
                    title: "Shielded transactions".to_string(),
                    lines: vec![
                        "Shielded transactions hide sender, receiver, and amount on chain."
                            .to_string(),
                        "Only holders of the viewing key can decrypt the memo field.".to_string(),
                    ],
                },
                EduNode {
                    id: "view-keys".to_string(),
                    title: "Viewing keys".to_string(),
                    lines: vec![
                        "A viewing key reveals incoming payments without spending power."
                            .to_string(),
                        "Share it with an auditor instead of your seed phrase.".to_string(),
                    ],
                },
            ],
        }
    }

    pub(crate) fn parse_json(raw: &str) -> ContentResult<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(raw);
        match serde_path_to_error::deserialize::<_, NodeCatalog>(&mut deserializer) {
            Ok(catalog) => Ok(catalog),
            Err(error) => {
                let path = error.path().to_string();
                let source = error.into_inner();
                if path.is_empty() || path == "." {
                    Err(format!("parse node catalog json: {source}"))
                } else {
                    Err(format!("parse node catalog json at {path}: {source}"))
                }
            }
        }
    }

    pub(crate) fn load_from_path(path: &Path) -> ContentResult<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|error| format!("read node catalog '{}': {error}", path.display()))?;
        let catalog = Self::parse_json(&raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub(crate) fn validate(&self) -> ContentResult<()> {
        validate_node(&self.tutorial, "tutorial")?;
        if self.lessons.len() < 2 {
            return Err(validation_err(
                "lessons",
                format!("expected at least 2 lesson nodes, got {}", self.lessons.len()),
            ));
        }
        for (index, lesson) in self.lessons.iter().enumerate() {
            validate_node(lesson, &format!("lessons[{index}]"))?;
        }

        let mut seen_ids: Vec<&str> = vec![self.tutorial.id.as_str()];
        for (index, lesson) in self.lessons.iter().enumerate() {
            if seen_ids.contains(&lesson.id.as_str()) {
                return Err(validation_err(
                    &format!("lessons[{index}].id"),
                    format!("duplicate node id '{}'", lesson.id),
                ));
            }
            seen_ids.push(lesson.id.as_str());
        }
        Ok(())
    }

    pub(crate) fn lesson(&self, index: usize) -> Option<&EduNode> {
        self.lessons.get(index)
    }
}

fn validate_node(node: &EduNode, path: &str) -> ContentResult<()> {
    if node.id.trim().is_empty() {
        return Err(validation_err(&format!("{path}.id"), "must not be empty"));
    }
    if node.title.trim().is_empty() {
        return Err(validation_err(&format!("{path}.title"), "must not be empty"));
    }
    if node.lines.is_empty() {
        return Err(validation_err(
            &format!("{path}.lines"),
            "must contain at least one line",
        ));
    }
    for (index, line) in node.lines.iter().enumerate() {
        if line.trim().is_empty() {
            return Err(validation_err(
                &format!("{path}.lines[{index}]"),
                "must not be empty",
            ));
        }
    }
    Ok(())
}

fn validation_err(path: &str, message: impl Into<String>) -> String {
    format!("node catalog validation failed at {path}: {}", message.into())
}

/// Builtin catalog by default; `MAZE_NODES_PATH` points at a JSON override.
pub(crate) fn resolve_catalog() -> ContentResult<NodeCatalog> {
    match env::var(NODES_PATH_ENV_VAR) {
        Ok(path) => NodeCatalog::load_from_path(Path::new(&path)),
        Err(env::VarError::NotPresent) => {
            let catalog = NodeCatalog::builtin();
            catalog.validate()?;
            Ok(catalog)
        }
        Err(error) => Err(format!("read {NODES_PATH_ENV_VAR}: {error}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_catalog() -> NodeCatalog {
        NodeCatalog::builtin()
    }

    #[test]
    fn builtin_catalog_passes_validation() {
        sample_catalog().validate().expect("builtin catalog is valid");
    }

    #[test]
    fn validation_rejects_duplicate_ids() {
        let mut catalog = sample_catalog();
        catalog.lessons[1].id = catalog.lessons[0].id.clone();
        let error = catalog.validate().expect_err("duplicate id must fail");
        assert!(error.contains("lessons[1].id"), "unexpected error: {error}");
        assert!(error.contains("duplicate node id"), "unexpected error: {error}");
    }

    #[test]
    fn validation_rejects_tutorial_id_collision() {
        let mut catalog = sample_catalog();
        catalog.lessons[0].id = catalog.tutorial.id.clone();
        let error = catalog.validate().expect_err("collision must fail");
        assert!(error.contains("lessons[0].id"), "unexpected error: {error}");
    }

    #[test]
    fn validation_rejects_empty_lines() {
        let mut catalog = sample_catalog();
        catalog.lessons[0].lines = vec!["ok".to_string(), "   ".to_string()];
        let error = catalog.validate().expect_err("blank line must fail");
        assert!(
            error.contains("lessons[0].lines[1]"),
            "unexpected error: {error}"
        );
    }

    #[test]
    fn validation_requires_two_lessons() {
        let mut catalog = sample_catalog();
        catalog.lessons.truncate(1);
        let error = catalog.validate().expect_err("single lesson must fail");
        assert!(error.contains("at least 2"), "unexpected error: {error}");
    }

    #[test]
    fn parse_error_names_the_json_path() {
        let raw = r#"{"tutorial":{"id":"t","title":"T","lines":["a"]},"lessons":[{"id":"x","title":"X","lines":[3]}]}"#;
        let error = NodeCatalog::parse_json(raw).expect_err("bad line type must fail");
        assert!(
            error.contains("lessons[0].lines[0]"),
            "unexpected error: {error}"
        );
    }

    #[test]
    fn load_from_path_round_trips_valid_json() {
        let catalog = sample_catalog();
        let json = serde_json::to_string_pretty(&catalog).expect("encode");
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(json.as_bytes()).expect("write");

        let loaded = NodeCatalog::load_from_path(file.path()).expect("load");
        assert_eq!(loaded, catalog);
    }

    #[test]
    fn load_from_path_reports_missing_file() {
        let error = NodeCatalog::load_from_path(Path::new("definitely/not/here.json"))
            .expect_err("missing file must fail");
        assert!(error.contains("read node catalog"), "unexpected error: {error}");
    }

    #[test]
    fn load_from_path_rejects_invalid_catalog() {
        let mut catalog = sample_catalog();
        catalog.lessons.truncate(1);
        let json = serde_json::to_string(&catalog).expect("encode");
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(json.as_bytes()).expect("write");

        let error = NodeCatalog::load_from_path(file.path()).expect_err("invalid catalog");
        assert!(error.contains("at least 2"), "unexpected error: {error}");
    }
}
