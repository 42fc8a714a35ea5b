/* src/cli/codegen/src/lib.rs */

mod diagnostics;
mod error;
mod options;
mod pipeline;

pub mod discover;
pub mod handler;
pub mod naming;
pub mod route;
pub mod types;

pub use diagnostics::{Diagnostic, Diagnostics, Level};
pub use discover::{Discovery, IgnoreSet, PageBase, Segment, discover};
pub use error::{GenerateError, Result};
pub use options::{GENERATED_MARKER, GenerateOptions};
pub use pipeline::{Artifact, GenerateReport, Generator, Plan, generate, generated_files};
pub use route::RouteEntry;
pub use types::{InferredField, PageInterface, TsType};
