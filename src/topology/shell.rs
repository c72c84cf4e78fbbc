use super::face::FaceId;

slotmap::new_key_type! {
    /// Unique identifier for a shell in the topology store.
    pub struct ShellId;
}

/// Data associated with a shell.
///
/// A shell holds the faces of one input face set. It may be open or closed.
#[derive(Debug, Clone)]
pub struct ShellData {
    /// The faces that make up this shell.
    pub faces: Vec<FaceId>,
    /// Whether this shell is closed (no face touches an offending edge).
    pub is_closed: bool,
    /// Whether the face set was opened as an expected open sheet.
    pub is_open_mesh: bool,
    /// Index of the source face set.
    pub face_set: usize,
}
