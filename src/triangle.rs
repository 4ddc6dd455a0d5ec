use crate::math::{Normal, Position, TexCoord};
use crate::mesh::Mesh;

// This struct represents a triangle by value: one attribute per corner.
// The same shape carries positions, normals and texture coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Triangle<T> {
    pub a: T,
    pub b: T,
    pub c: T,
}

impl<T: Copy> Triangle<T> {
    pub const fn new(a: T, b: T, c: T) -> Self {
        Self { a, b, c }
    }

    /// Applies `f` to each corner.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Triangle<U> {
        Triangle {
            a: f(self.a),
            b: f(self.b),
            c: f(self.c),
        }
    }

    pub fn corners(&self) -> [T; 3] {
        [self.a, self.b, self.c]
    }
}

pub type TriangleSet<T> = Vec<Triangle<T>>;

/// The three index-aligned triangle sets of a mesh.
///
/// Entry `i` of each set belongs to face `i`. Positions are scaled once so
/// the farthest vertex from the origin lies at distance 1; nothing is
/// re-centered.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshTriangles {
    positions: TriangleSet<Position>,
    normals: TriangleSet<Normal>,
    texcoords: TriangleSet<TexCoord>,
}

impl MeshTriangles {
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let scale = unit_scale(mesh.positions());
        let faces = mesh.faces();

        // Face indices were validated by the mesh builder.
        let positions = faces
            .iter()
            .map(|face| {
                Triangle::new(face.a, face.b, face.c)
                    .map(|corner| mesh.positions()[corner.position] * scale)
            })
            .collect();
        let normals = faces
            .iter()
            .map(|face| {
                Triangle::new(face.a, face.b, face.c).map(|corner| mesh.normals()[corner.normal])
            })
            .collect();
        let texcoords = faces
            .iter()
            .map(|face| {
                Triangle::new(face.a, face.b, face.c)
                    .map(|corner| mesh.texcoords()[corner.texcoord])
            })
            .collect();

        Self {
            positions,
            normals,
            texcoords,
        }
    }

    pub fn positions(&self) -> &[Triangle<Position>] {
        &self.positions
    }

    pub fn normals(&self) -> &[Triangle<Normal>] {
        &self.normals
    }

    pub fn texcoords(&self) -> &[Triangle<TexCoord>] {
        &self.texcoords
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Factor that brings the longest position vector to unit length.
///
/// Returns 1.0 when there is nothing to scale by (no positions, all at the
/// origin, or non-finite data).
fn unit_scale(positions: &[Position]) -> f32 {
    let max = positions
        .iter()
        .map(|p| p.magnitude())
        .fold(0.0_f32, f32::max);
    if max.is_finite() && max > f32::EPSILON {
        1.0 / max
    } else {
        1.0
    }
}
