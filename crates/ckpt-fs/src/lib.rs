//! Output path resolution for checkpoint saves
//!
//! Decides where a checkpoint artifact should be written given an output
//! directory, a filename prefix and a [`FilenameMode`]. Nothing in this crate
//! writes artifacts; it only inspects the filesystem.
//!
//! The decision is not atomic with the later write: another process may
//! create the returned path between the existence probe and the write.
//! Callers that need strict exclusivity must serialize saves per prefix.

pub mod counter;
pub mod error;
pub mod io;
pub mod prefix;
pub mod resolver;

pub use counter::{COUNTER_WIDTH, MAX_COUNTER};
pub use error::{Error, Result};
pub use prefix::SavePrefix;
pub use resolver::{CHECKPOINT_EXTENSION, FilenameMode, PathResolver, ResolvedPath, resolve};
