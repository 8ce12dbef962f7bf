//! UBC-GIF mesh, model and observation readers
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod error;
mod mesh;
mod model;
mod observations;
mod octree;
mod tensor;

#[doc(inline)]
pub use mesh::{detect_mesh_kind, parse_mesh_2d, parse_mesh_3d, parse_tensor_mesh, MeshKind};

#[doc(inline)]
pub use model::{model_name, parse_model_2d, parse_model_3d};

#[doc(inline)]
pub use observations::{field_vector, ObservationKind, ObservationReader};

#[doc(inline)]
pub use octree::{parse_octree_mesh, OcTreeReader};

#[doc(inline)]
pub use tensor::{ModelAppender, TensorMeshReader};

#[doc(inline)]
pub use error::{Error, Result};
