pub mod config;
pub mod error;
pub mod math;
pub mod operations;
pub mod tessellation;
pub mod topology;

pub use config::BuildOptions;
pub use error::{FacetShellError, Result};
pub use operations::assemble::{AssemblyTarget, FallbackPolicy, Shape, ShapeBuilder, ShapeKind};
pub use operations::creation::{FaceSet, FaceSetState};
pub use topology::StyleId;
