//! Single-save orchestration

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use ckpt_fs::{PathResolver, ResolvedPath, io};
use ckpt_meta::{BuiltHeader, HeaderMap, PROMPT_KEY, build_header, effective_prompt};

use crate::writer::ArtifactWriter;
use crate::{Error, Result, SaveOptions};

/// Values the host supplies alongside the options.
#[derive(Debug, Clone, Default)]
pub struct SaveInputs {
    /// Prompt blob of the running workflow, usually a JSON object.
    pub prompt: Option<Value>,
    /// Extra info mapping (workflow graph and similar).
    pub extra_info: Option<Map<String, Value>>,
}

/// A resolved path and a built header, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavePlan {
    pub resolved: ResolvedPath,
    pub built: BuiltHeader,
}

/// What a completed save wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    pub path: PathBuf,
    /// Counter in the filename, `None` for the unsuffixed name.
    pub counter: Option<u32>,
    /// Whether an existing file was replaced.
    pub replaced_existing: bool,
    pub header: HeaderMap,
    /// Extra-info entries that went into the header.
    pub extra_applied: HeaderMap,
}

impl SaveReport {
    /// The header as pretty-printed JSON.
    pub fn metadata_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.header)?)
    }

    /// The prompt stored in the header, or an empty string.
    pub fn prompt(&self) -> &str {
        self.header
            .get(PROMPT_KEY)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// The applied extra-info entries as pretty-printed JSON.
    pub fn extra_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.extra_applied)?)
    }
}

/// Saves artifacts below a fixed output directory.
#[derive(Debug, Clone)]
pub struct SavePipeline {
    output_dir: PathBuf,
    resolver: PathResolver,
}

impl SavePipeline {
    /// Create a pipeline writing `.safetensors` artifacts under `output_dir`.
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self::with_resolver(output_dir, PathResolver::default())
    }

    pub fn with_resolver(output_dir: impl AsRef<Path>, resolver: PathResolver) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            resolver,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Build the header and resolve the path without touching anything.
    ///
    /// The header comes first: invalid metadata fails before any
    /// filesystem probe.
    pub fn plan(
        &self,
        options: &SaveOptions,
        inputs: &SaveInputs,
        hint: Option<u32>,
    ) -> Result<SavePlan> {
        let prompt = effective_prompt(Some(options.prompt_override.as_str()), inputs.prompt.as_ref());
        let built = build_header(
            options.metadata_mode,
            prompt.as_deref(),
            inputs.extra_info.as_ref(),
            options.include_extra_info,
            &options.metadata_json,
        )?;

        let resolved = self.resolver.resolve(
            &self.output_dir,
            &options.filename_prefix,
            options.filename_mode,
            hint,
        )?;

        Ok(SavePlan { resolved, built })
    }

    /// Plan, create the target directory, and hand off to `writer`.
    pub fn save<W>(
        &self,
        options: &SaveOptions,
        inputs: &SaveInputs,
        hint: Option<u32>,
        writer: &mut W,
    ) -> Result<SaveReport>
    where
        W: ArtifactWriter + ?Sized,
    {
        let SavePlan { resolved, built } = self.plan(options, inputs, hint)?;

        io::ensure_dir(&resolved.directory)?;

        writer
            .write_artifact(&resolved.path, &built.header)
            .map_err(|source| Error::Writer {
                path: resolved.path.clone(),
                source,
            })?;

        tracing::info!(
            path = %resolved.path.display(),
            counter = ?resolved.counter,
            replaced = resolved.replaces_existing,
            keys = built.header.len(),
            "Saved checkpoint"
        );

        Ok(SaveReport {
            path: resolved.path,
            counter: resolved.counter,
            replaced_existing: resolved.replaces_existing,
            header: built.header,
            extra_applied: built.extra_applied,
        })
    }
}
