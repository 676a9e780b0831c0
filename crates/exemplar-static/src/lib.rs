//! Static site generator for annotated HTML samples.
//!
//! Every sample becomes a documentation page (doc, code and preview columns
//! per section) plus a standalone preview page that runs the sample itself.

pub mod assets;
pub mod builder;
pub mod sample_file;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
pub use sample_file::SampleFile;
