//! Template store that layers a literal path, a template directory and the
//! built-in set.

use std::path::{Path, PathBuf};

use tracing::debug;

use modelsmith_core::{
    application::{
        ApplicationError,
        ports::{TemplateRef, TemplateStore},
    },
    error::SmithResult,
};

use crate::builtin_templates;

/// Resolves a template name in order:
///
/// 1. the name as a literal path to an existing file
/// 2. `<directory>/<name>` then `<directory>/<name>.hbs`, when a directory is configured
/// 3. the built-in template of that name
#[derive(Debug, Clone, Default)]
pub struct LayeredTemplateStore {
    directory: Option<PathBuf>,
}

impl LayeredTemplateStore {
    /// Store with only literal paths and built-ins.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that also looks in `directory`.
    pub fn with_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: Some(directory.into()),
        }
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    fn in_directory(&self, name: &str) -> Option<PathBuf> {
        let dir = self.directory.as_ref()?;
        [
            dir.join(name),
            dir.join(format!("{name}.{}", builtin_templates::EXTENSION)),
        ]
        .into_iter()
        .find(|p| p.is_file())
    }
}

impl TemplateStore for LayeredTemplateStore {
    fn resolve(&self, name: &str) -> SmithResult<TemplateRef> {
        let literal = Path::new(name);
        let resolved = if literal.is_file() {
            TemplateRef::File(literal.to_path_buf())
        } else if let Some(path) = self.in_directory(name) {
            TemplateRef::File(path)
        } else if builtin_templates::get(name).is_some() {
            TemplateRef::Builtin(name.to_string())
        } else {
            return Err(ApplicationError::TemplateResolution {
                name: name.to_string(),
                reason: match &self.directory {
                    Some(dir) => format!(
                        "not a file, not in {} and not a built-in template",
                        dir.display()
                    ),
                    None => "not a file and not a built-in template".into(),
                },
            }
            .into());
        };

        debug!(%name, template = %resolved, "Template resolved");
        Ok(resolved)
    }

    fn load(&self, template: &TemplateRef) -> SmithResult<String> {
        match template {
            TemplateRef::File(path) => std::fs::read_to_string(path).map_err(|e| {
                ApplicationError::TemplateResolution {
                    name: path.display().to_string(),
                    reason: format!("Failed to read template: {e}"),
                }
                .into()
            }),
            TemplateRef::Builtin(name) => builtin_templates::get(name)
                .map(str::to_string)
                .ok_or_else(|| {
                    ApplicationError::TemplateResolution {
                        name: name.clone(),
                        reason: "no such built-in template".into(),
                    }
                    .into()
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelsmith_core::error::SmithError;
    use tempfile::TempDir;

    #[test]
    fn falls_back_to_builtin() {
        let store = LayeredTemplateStore::new();
        let template = store.resolve("Model").unwrap();

        assert_eq!(template, TemplateRef::Builtin("Model".into()));
        assert_eq!(store.load(&template).unwrap(), builtin_templates::MODEL);
    }

    #[test]
    fn directory_overrides_builtin() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Model.hbs"), "custom {{className}}").unwrap();
        let store = LayeredTemplateStore::with_directory(dir.path());

        let template = store.resolve("Model").unwrap();
        assert_eq!(template, TemplateRef::File(dir.path().join("Model.hbs")));
        assert_eq!(store.load(&template).unwrap(), "custom {{className}}");
        // Not overridden: still built in.
        assert_eq!(
            store.resolve("Seeder").unwrap(),
            TemplateRef::Builtin("Seeder".into())
        );
    }

    #[test]
    fn literal_path_wins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("entity.tpl");
        std::fs::write(&path, "literal").unwrap();
        let store = LayeredTemplateStore::new();

        let template = store.resolve(path.to_str().unwrap()).unwrap();
        assert_eq!(template, TemplateRef::File(path));
    }

    #[test]
    fn unknown_name_fails_to_resolve() {
        let err = LayeredTemplateStore::new().resolve("Controller").unwrap_err();
        assert!(matches!(
            err,
            SmithError::Application(ApplicationError::TemplateResolution { .. })
        ));
    }
}
