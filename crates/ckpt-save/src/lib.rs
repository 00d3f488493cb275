//! Save orchestration for checkpoint artifacts
//!
//! Ties the two stateless pieces together for a single save:
//!
//! ```text
//!            SaveOptions + SaveInputs
//!                       |
//!                  SavePipeline
//!                 /            \
//!        ckpt-meta              ckpt-fs
//!     (header building)    (path resolution)
//!                 \            /
//!                 ArtifactWriter
//! ```
//!
//! The header is built before the filesystem is touched, so malformed
//! metadata aborts a save without side effects.
//!
//! # Example
//!
//! ```no_run
//! use ckpt_save::{HeaderMap, SaveInputs, SaveOptions, SavePipeline, WriterError};
//! use std::path::Path;
//!
//! # fn main() -> ckpt_save::Result<()> {
//! let pipeline = SavePipeline::new("output");
//! let options = SaveOptions::default();
//! let mut writer = |path: &Path, header: &HeaderMap| -> Result<(), WriterError> {
//!     println!("writing {} with {} header keys", path.display(), header.len());
//!     Ok(())
//! };
//!
//! let report = pipeline.save(&options, &SaveInputs::default(), None, &mut writer)?;
//! println!("{}", report.metadata_json()?);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod options;
pub mod pipeline;
pub mod session;
pub mod writer;

pub use ckpt_fs::FilenameMode;
pub use ckpt_meta::{HeaderMap, MetadataMode};
pub use error::{Error, Result};
pub use options::{ConfigFormat, SaveOptions};
pub use pipeline::{SaveInputs, SavePipeline, SavePlan, SaveReport};
pub use session::SaveSession;
pub use writer::{ArtifactWriter, WriterError};
