use float_cmp::ApproxEqUlps;

/// Extracts the position of a vertex so typed vertex structs can go through
/// the same kernels as flat coordinate buffers.
pub trait DecodePosition {
    fn decode_position(&self) -> [f32; 3];
}

impl DecodePosition for [f32; 3] {
    fn decode_position(&self) -> [f32; 3] {
        *self
    }
}

/// Position, normal and texture coordinates of one vertex, usable with the
/// `_decoder` functions. Any type implementing `DecodePosition` works there too.
#[derive(Default, Debug, Copy, Clone)]
#[repr(C)]
pub struct Vertex {
    pub p: [f32; 3],
    pub n: [f32; 3],
    pub t: [f32; 2],
}

/// Attributes compare equal within 2 ulps.
impl PartialEq for Vertex {
    fn eq(&self, other: &Vertex) -> bool {
        let lhs = self.p.iter().chain(&self.n).chain(&self.t);
        let rhs = other.p.iter().chain(&other.n).chain(&other.t);
        lhs.zip(rhs).all(|(a, b)| a.approx_eq_ulps(b, 2))
    }
}

impl DecodePosition for Vertex {
    fn decode_position(&self) -> [f32; 3] {
        self.p
    }
}

/// Splits a flat `x, y, z, ...` buffer into position triples.
///
/// A trailing partial triple is ignored.
pub fn unpack_positions(vertices: &[f32]) -> Vec<[f32; 3]> {
    vertices
        .chunks_exact(3)
        .map(|xyz| [xyz[0], xyz[1], xyz[2]])
        .collect()
}

/// Flattens position triples back into an `x, y, z, ...` buffer.
pub fn pack_positions(positions: &[[f32; 3]]) -> Vec<f32> {
    let mut result: Vec<f32> = Vec::with_capacity(positions.len() * 3);
    for position in positions {
        result.extend_from_slice(position);
    }
    result
}

/// Writes per-vertex normals into the `n` slot of each vertex.
pub fn assign_normals(vertices: &mut [Vertex], normals: &[[f32; 3]]) {
    for (vertex, normal) in vertices.iter_mut().zip(normals) {
        vertex.n = *normal;
    }
}
