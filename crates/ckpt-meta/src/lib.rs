//! Checkpoint header metadata construction.
//!
//! Builds the flat string-to-string header embedded in a checkpoint
//! artifact. Values from every source are coerced to strings because the
//! header format carries nothing else.

pub mod builder;
pub mod coerce;
pub mod error;
pub mod mode;
pub mod prompt;

pub use builder::{BuiltHeader, HeaderMap, PROMPT_KEY, build, build_header, parse_overrides};
pub use coerce::{coerce_object, coerce_value, to_header_json};
pub use error::{Error, Result};
pub use mode::MetadataMode;
pub use prompt::effective_prompt;
