//! Generation Transaction - the deferred write buffer.
//!
//! Files are *planned* during the session and only written on
//! [`commit`](GenerationTransaction::commit). Planning checks everything that
//! can be checked without writing (target already on disk, path planned
//! twice, template unresolvable), so a session that fails or is abandoned
//! before commit leaves the filesystem untouched.
//!
//! Commit writes in planning order and stops at the first failure. Files
//! already written stay written and the buffer is kept, so the caller can
//! inspect what was pending.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRef, TemplateRenderer, TemplateStore},
    },
    domain::{RenderContext, TargetDescriptor},
    error::SmithResult,
};

/// What a planned path will be filled with.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Render a template with these variables at commit time.
    Template {
        template: TemplateRef,
        variables: RenderContext,
    },
    /// Write these contents verbatim.
    Contents(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedWrite {
    pub path: PathBuf,
    pub payload: Payload,
}

pub struct GenerationTransaction {
    store: Box<dyn TemplateStore>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
    pending: Vec<PlannedWrite>,
}

impl GenerationTransaction {
    pub fn new(
        store: Box<dyn TemplateStore>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            store,
            renderer,
            filesystem,
            pending: Vec::new(),
        }
    }

    /// Plan `target` to be rendered from `template`.
    ///
    /// # Errors
    ///
    /// - `TargetExists` if the file is already on disk
    /// - `AlreadyPlanned` if the path is already in this transaction
    /// - `TemplateResolution` if the template is neither a file nor built in
    pub fn plan(
        &mut self,
        target: impl Into<PathBuf>,
        template: &str,
        variables: RenderContext,
    ) -> SmithResult<PathBuf> {
        let path = target.into();
        self.check_target(&path)?;
        let template = self.store.resolve(template)?;
        debug!(path = %path.display(), %template, "Planned");

        self.pending.push(PlannedWrite {
            path: path.clone(),
            payload: Payload::Template {
                template,
                variables,
            },
        });
        Ok(path)
    }

    /// Plan literal contents; no template is involved.
    pub fn plan_contents(
        &mut self,
        target: impl Into<PathBuf>,
        contents: impl Into<String>,
    ) -> SmithResult<PathBuf> {
        let path = target.into();
        self.check_target(&path)?;
        debug!(path = %path.display(), "Planned literal contents");

        self.pending.push(PlannedWrite {
            path: path.clone(),
            payload: Payload::Contents(contents.into()),
        });
        Ok(path)
    }

    /// Plan a descriptor's file. `className` and `namespace` are set from
    /// the descriptor and override any caller values.
    pub fn plan_for(
        &mut self,
        descriptor: &TargetDescriptor,
        template: &str,
        mut variables: RenderContext,
    ) -> SmithResult<PathBuf> {
        variables.insert("className", descriptor.name());
        variables.insert("namespace", descriptor.namespace());
        self.plan(descriptor.path(), template, variables)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Planned paths, in planning order.
    pub fn pending_paths(&self) -> Vec<&Path> {
        self.pending.iter().map(|w| w.path.as_path()).collect()
    }

    pub fn pending(&self) -> &[PlannedWrite] {
        &self.pending
    }

    /// Whether a file already occupies `path`.
    pub fn target_exists(&self, path: &Path) -> bool {
        self.filesystem.exists(path)
    }

    /// Render one planned entry without writing it.
    pub fn preview(&self, path: &Path) -> SmithResult<String> {
        let write = self
            .pending
            .iter()
            .find(|w| w.path == path)
            .ok_or_else(|| ApplicationError::NotPlanned {
                path: path.to_path_buf(),
            })?;
        self.contents_of(write)
    }

    /// Drop every planned write.
    pub fn discard(&mut self) {
        debug!(count = self.pending.len(), "Discarding planned writes");
        self.pending.clear();
    }

    /// Write every planned file in planning order and return their paths.
    ///
    /// The buffer is cleared only once every write has succeeded.
    #[instrument(skip_all, fields(count = self.pending.len()))]
    pub fn commit(&mut self) -> SmithResult<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.pending.len());

        for write in &self.pending {
            let contents = self.contents_of(write)?;
            if let Some(parent) = write.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&write.path, &contents)?;
            debug!(path = %write.path.display(), bytes = contents.len(), "Written");
            written.push(write.path.clone());
        }

        self.pending.clear();
        info!(files = written.len(), "Generation committed");
        Ok(written)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn check_target(&self, path: &Path) -> SmithResult<()> {
        if self.filesystem.exists(path) {
            return Err(ApplicationError::TargetExists {
                path: path.to_path_buf(),
            }
            .into());
        }
        if self.pending.iter().any(|w| w.path == path) {
            return Err(ApplicationError::AlreadyPlanned {
                path: path.to_path_buf(),
            }
            .into());
        }
        Ok(())
    }

    fn contents_of(&self, write: &PlannedWrite) -> SmithResult<String> {
        match &write.payload {
            Payload::Contents(contents) => Ok(contents.clone()),
            Payload::Template {
                template,
                variables,
            } => {
                let source = self.store.load(template)?;
                self.renderer.render(&source, variables)
            }
        }
    }
}
