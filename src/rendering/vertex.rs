//! Interleaved vertex format for uploading chunk meshes.

/// A vertex with its position and normal side by side.
///
/// # Memory Layout
/// - Position: 3x f32 (12 bytes)
/// - Normal: 3x f32 (12 bytes)
///
/// Total size: 24 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in world space
    pub position: [f32; 3],
    /// Unit normal of the face this vertex belongs to
    pub normal: [f32; 3],
}

impl Vertex {
    /// Creates a new vertex.
    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Vertex { position, normal }
    }

    /// Size of one vertex in bytes.
    pub const fn stride() -> usize {
        std::mem::size_of::<Vertex>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertices_cast_to_tightly_packed_bytes() {
        let vertices = [
            Vertex::new([1.0, 2.0, 3.0], [0.0, 1.0, 0.0]),
            Vertex::new([4.0, 5.0, 6.0], [0.0, 1.0, 0.0]),
        ];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(Vertex::stride(), 24);
        assert_eq!(bytes.len(), 2 * Vertex::stride());

        let floats: &[f32] = bytemuck::cast_slice(&vertices);
        assert_eq!(&floats[6..9], &[4.0, 5.0, 6.0]);
    }
}
