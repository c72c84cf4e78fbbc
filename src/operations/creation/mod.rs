mod face_set;
mod make_box;
mod make_tetrahedron;

pub use face_set::{FaceLoop, FaceSet, FaceSetState};
pub use make_box::MakeBox;
pub use make_tetrahedron::MakeTetrahedron;
