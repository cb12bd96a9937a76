/// WF3D Core Library - wireframe model loading, transforms and projection
///
/// This library holds everything except the drawing surface itself: parsing
/// line-segment model files, homogeneous transforms, perspective projection
/// with focal-plane culling, and the command-driven viewer state.

pub mod config;
pub mod error;
pub mod geometry;
pub mod loader;
pub mod projection;
pub mod transform;
pub mod viewer;

// Re-export commonly used types
pub use config::ViewerConfig;
pub use error::{ConfigError, ModelError};
pub use geometry::{vertex, Edge, Model, Vertex};
pub use loader::{load, load_dir, load_models, parse_model, LoadOutcome};
pub use projection::{project_point, Camera, DepthAxis, Frame};
pub use transform::{Axis, Transform};
pub use viewer::{Command, MotionTable, RenderSurface, Response, Scene, Viewer};
