//! Entity lookup backed by the models directory.
//!
//! Project entities are the files directly inside the model root whose
//! extension matches and whose stem is a valid entity name. External entities
//! come from configuration as qualified names (`vendor::auth::User`); they can
//! be related to but never edited, so relations onto them stay unidirectional.

use std::collections::BTreeSet;

use tracing::{debug, warn};
use walkdir::WalkDir;

use modelsmith_core::{
    application::ports::EntityLookup,
    domain::{ModelRoot, TargetDescriptor},
};

#[derive(Debug, Clone)]
pub struct DirectoryEntityLookup {
    root: ModelRoot,
    project: BTreeSet<String>,
    external: Vec<String>,
}

impl DirectoryEntityLookup {
    /// Scan `root.directory` once. A missing directory means no project
    /// entities yet.
    pub fn scan(root: ModelRoot, external: Vec<String>) -> Self {
        let mut project = BTreeSet::new();

        if root.directory.is_dir() {
            for entry in WalkDir::new(&root.directory).min_depth(1).max_depth(1) {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        warn!(error = %e, "Skipping unreadable model entry");
                        continue;
                    }
                };
                let path = entry.path();
                if !entry.file_type().is_file()
                    || path.extension().and_then(|e| e.to_str()) != Some(root.extension.as_str())
                {
                    continue;
                }
                let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                if TargetDescriptor::derive(stem, &root).is_ok() {
                    project.insert(stem.to_string());
                }
            }
        }

        debug!(
            directory = %root.directory.display(),
            project = project.len(),
            external = external.len(),
            "Entities scanned"
        );
        Self {
            root,
            project,
            external,
        }
    }

    /// Lookup over an explicit set of project entity names; nothing is read
    /// from disk.
    pub fn from_names<I, S>(root: ModelRoot, names: I, external: Vec<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            root,
            project: names.into_iter().map(Into::into).collect(),
            external,
        }
    }

    /// Project entity names, sorted.
    pub fn project_entities(&self) -> impl Iterator<Item = &str> {
        self.project.iter().map(String::as_str)
    }

    pub fn external_entities(&self) -> &[String] {
        &self.external
    }

    fn project_descriptor(&self, name: &str) -> Option<TargetDescriptor> {
        self.project
            .contains(name)
            .then(|| TargetDescriptor::derive(name, &self.root).ok())
            .flatten()
    }

    fn external_descriptor(&self, qualified: &str) -> Option<TargetDescriptor> {
        TargetDescriptor::external(qualified).ok()
    }
}

impl EntityLookup for DirectoryEntityLookup {
    fn resolve(&self, name: &str) -> Option<TargetDescriptor> {
        let name = name.trim();

        if let Some((namespace, short)) = name.rsplit_once("::") {
            if namespace == self.root.namespace {
                return self.project_descriptor(short);
            }
            return self
                .external
                .iter()
                .find(|e| e.as_str() == name)
                .and_then(|e| self.external_descriptor(e));
        }

        // Project entities shadow external ones with the same short name.
        self.project_descriptor(name).or_else(|| {
            self.external
                .iter()
                .find(|e| e.rsplit("::").next() == Some(name))
                .and_then(|e| self.external_descriptor(e))
        })
    }

    fn known_entities(&self) -> Vec<String> {
        self.project
            .iter()
            .cloned()
            .chain(self.external.iter().cloned())
            .collect()
    }

    fn is_external(&self, qualified_name: &str) -> bool {
        self.external.iter().any(|e| e == qualified_name)
    }
}
