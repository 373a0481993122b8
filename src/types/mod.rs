// ABOUTME: Type-safe resource names and validated domain types.
// ABOUTME: Uses phantom types to prevent name confusion at compile time.

mod id;
mod workdir;

pub use id::{ContainerName, ImageName, Name, VolumeName};
pub use workdir::{CanonicalWorkdir, PathContext, WorkdirError};
