#[derive(Debug, Clone, Default)]
pub struct RayConfig {
    /// Start rays at the face centres and aim them along the face normals
    /// instead of from the owner cells towards the faces
    pub outward: bool,
    /// Emit only the ray origins
    pub origins_only: bool,
}

impl RayConfig {
    pub fn new() -> Self {
        Self::default()
    }
}
