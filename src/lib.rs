pub mod artifact;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod math;
pub mod scene;
pub mod tessellation;

pub use artifact::{ArtifactFactory, ArtifactTriple, Color};
pub use config::SceneConfig;
pub use error::{Result, SceneError};
pub use geometry::{BoundingBox, GeomObject};
pub use io::FormatKind;
pub use scene::{ObserverId, SceneManager, SceneObserver};
