//! Counter memory across repeated saves

use std::collections::HashMap;

use ckpt_fs::SavePrefix;

use crate::writer::ArtifactWriter;
use crate::{Result, SaveInputs, SaveOptions, SavePipeline, SaveReport};

/// Remembers the last counter used per prefix and feeds it back as the hint.
///
/// Numbered saves within one session therefore only move forward, even if
/// earlier files are deleted in between. The map is keyed on the parsed
/// prefix, so `a/b` and `a\b` share a counter.
#[derive(Debug)]
pub struct SaveSession {
    pipeline: SavePipeline,
    last_counters: HashMap<SavePrefix, u32>,
}

impl SaveSession {
    pub fn new(pipeline: SavePipeline) -> Self {
        Self {
            pipeline,
            last_counters: HashMap::new(),
        }
    }

    pub fn pipeline(&self) -> &SavePipeline {
        &self.pipeline
    }

    /// Last counter this session wrote for `prefix`, if any.
    pub fn last_counter(&self, prefix: &str) -> Option<u32> {
        let key = SavePrefix::parse(prefix).ok()?;
        self.last_counters.get(&key).copied()
    }

    /// Save through the pipeline, using the remembered counter as the hint.
    pub fn save<W>(
        &mut self,
        options: &SaveOptions,
        inputs: &SaveInputs,
        writer: &mut W,
    ) -> Result<SaveReport>
    where
        W: ArtifactWriter + ?Sized,
    {
        let key = SavePrefix::parse(&options.filename_prefix)?;
        let hint = self.last_counters.get(&key).copied();

        let report = self.pipeline.save(options, inputs, hint, writer)?;

        if let Some(counter) = report.counter {
            self.last_counters.insert(key, counter);
        }
        Ok(report)
    }
}
