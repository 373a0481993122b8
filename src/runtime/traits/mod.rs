// ABOUTME: Capability traits ai-shell needs from a container runtime.
// ABOUTME: Commands bound on the narrowest set, so tests can swap in an in-memory fake.

mod container;
mod exec;
mod image;
mod runtime_info;
pub(crate) mod sealed;
mod shared_types;
mod volume;

pub use container::{ContainerError, ContainerFilters, ContainerOps, ContainerSummary};
pub use exec::{ExecError, ExecOps};
pub use image::{ImageError, ImageOps};
pub use runtime_info::{RuntimeInfo, RuntimeInfoError};
pub use shared_types::*;
pub use volume::{VolumeError, VolumeOps};
