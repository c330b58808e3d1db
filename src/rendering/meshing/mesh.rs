//! Mesh buffers produced by chunk mesh extraction.
//!
//! A mesh is a flat triangle list: every three consecutive positions form one
//! triangle, and `normals[i]` is the normal of `vertices[i]`. Normals are
//! duplicated per vertex so the renderer can upload both streams as-is.

use crate::error::InvariantViolation;
use crate::rendering::Vertex;
use crate::voxels::block::block_side::BlockSide;

use super::face::Face;

/// Number of vertices emitted per face (two triangles).
pub const VERTICES_PER_FACE: usize = 6;

/// Number of vertices emitted for a fully exposed cube.
pub const VERTICES_PER_CUBE: usize = VERTICES_PER_FACE * 6;

/// Triangle geometry for one chunk: positions and matching normals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// World-space vertex positions, three per triangle
    vertices: Vec<[f32; 3]>,
    /// Per-vertex unit normals, same length as `vertices`
    normals: Vec<[f32; 3]>,
}

impl Mesh {
    /// Creates a new, empty mesh.
    pub fn new() -> Self {
        Mesh::default()
    }

    /// Appends the two triangles of a face with its normal on every vertex.
    pub fn push_face(&mut self, face: &Face) {
        let normal: [f32; 3] = face.block_side.normal().into();
        for vertex in face.triangle_vertices() {
            self.vertices.push(vertex.into());
            self.normals.push(normal);
        }
    }

    /// Vertex positions.
    pub fn vertices(&self) -> &[[f32; 3]] {
        &self.vertices
    }

    /// Per-vertex normals.
    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    /// Vertex positions as a flat float stream of length `3 * vertex_count`.
    pub fn vertex_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Normals as a flat float stream of length `3 * vertex_count`.
    pub fn normal_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Positions and normals zipped into one interleaved vertex stream.
    pub fn interleaved(&self) -> Vec<Vertex> {
        self.vertices
            .iter()
            .zip(&self.normals)
            .map(|(position, normal)| Vertex::new(*position, *normal))
            .collect()
    }

    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Number of quad faces in the mesh.
    pub fn face_count(&self) -> usize {
        self.vertices.len() / VERTICES_PER_FACE
    }

    /// Returns `true` if the mesh contains no geometry.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Checks the buffer invariants: equal lengths, whole triangles only and
    /// axis-aligned unit normals.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        if self.vertices.len() != self.normals.len() {
            return Err(InvariantViolation::MeshMismatch {
                vertices: self.vertices.len(),
                normals: self.normals.len(),
            });
        }
        if self.vertices.len() % 3 != 0 {
            return Err(InvariantViolation::PartialTriangle(self.vertices.len()));
        }
        if let Some(index) = self
            .normals
            .iter()
            .position(|normal| BlockSide::from_normal(*normal).is_none())
        {
            return Err(InvariantViolation::InvalidNormal(index));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Point3;

    use super::*;

    #[test]
    fn push_face_adds_two_triangles() {
        let mut mesh = Mesh::new();
        mesh.push_face(&Face::new(Point3::new(0.0, 0.0, 0.0), BlockSide::Top));

        assert_eq!(mesh.vertex_count(), VERTICES_PER_FACE);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.face_count(), 1);
        assert!(mesh.normals().iter().all(|n| *n == [0.0, 1.0, 0.0]));
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn flat_streams_match_typed_buffers() {
        let mut mesh = Mesh::new();
        mesh.push_face(&Face::new(Point3::new(16.0, 2.0, -16.0), BlockSide::Left));

        let floats = mesh.vertex_floats();
        assert_eq!(floats.len(), 3 * mesh.vertex_count());
        assert_eq!(&floats[0..3], &mesh.vertices()[0]);
        assert_eq!(mesh.normal_floats().len(), floats.len());
        assert_eq!(&mesh.normal_floats()[0..3], &[-1.0, 0.0, 0.0]);
    }

    #[test]
    fn interleaved_pairs_positions_with_normals() {
        let mut mesh = Mesh::new();
        mesh.push_face(&Face::new(Point3::new(0.0, 0.0, 0.0), BlockSide::Front));
        let interleaved = mesh.interleaved();

        assert_eq!(interleaved.len(), mesh.vertex_count());
        assert_eq!(interleaved[4].position, mesh.vertices()[4]);
        assert_eq!(interleaved[4].normal, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn validate_rejects_mismatched_and_partial_buffers() {
        let mismatched = Mesh {
            vertices: vec![[0.0; 3]; 3],
            normals: vec![[0.0, 1.0, 0.0]; 2],
        };
        assert_eq!(
            mismatched.validate(),
            Err(InvariantViolation::MeshMismatch { vertices: 3, normals: 2 })
        );

        let partial = Mesh {
            vertices: vec![[0.0; 3]; 4],
            normals: vec![[0.0, 1.0, 0.0]; 4],
        };
        assert_eq!(partial.validate(), Err(InvariantViolation::PartialTriangle(4)));

        let skewed = Mesh {
            vertices: vec![[0.0; 3]; 3],
            normals: vec![[0.0, 1.0, 0.0], [0.5, 0.5, 0.0], [0.0, 1.0, 0.0]],
        };
        assert_eq!(skewed.validate(), Err(InvariantViolation::InvalidNormal(1)));
    }
}
