use crate::packing::{pack_positions, unpack_positions, DecodePosition};

#[inline(always)]
fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline(always)]
fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Normalizes `v` in place, leaving vectors too short to divide by as zero.
#[inline]
fn normalize_or_zero(v: &mut [f32; 3]) {
    let length = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if length > f32::MIN_POSITIVE {
        v[0] /= length;
        v[1] /= length;
        v[2] /= length;
    } else {
        *v = [0f32; 3];
    }
}

/// Estimates per-vertex normals of a triangle list of arbitrary vertices.
///
/// Every triangle adds its unnormalized face normal `(b - a) x (c - a)` to
/// each of its three corners, with no area or angle weighting, and the sums
/// are normalized at the end. Vertices no triangle touches, or only touched
/// by degenerate triangles, get the zero vector.
///
/// Triangles that reference a vertex past the end of `vertices` are skipped,
/// as is a trailing partial triangle.
pub fn compute_normals_decoder<T: DecodePosition>(vertices: &[T], indices: &[u32]) -> Vec<[f32; 3]> {
    let positions = vertices
        .iter()
        .map(|vertex| vertex.decode_position())
        .collect::<Vec<[f32; 3]>>();
    let mut normals: Vec<[f32; 3]> = vec![[0f32; 3]; positions.len()];

    let mut skipped = 0usize;
    for triangle in indices.chunks_exact(3) {
        let corners = [triangle[0] as usize, triangle[1] as usize, triangle[2] as usize];
        if corners.iter().any(|&corner| corner >= positions.len()) {
            skipped += 1;
            continue;
        }

        let a = positions[corners[0]];
        let face = cross(sub(positions[corners[1]], a), sub(positions[corners[2]], a));
        for corner in corners {
            let normal = &mut normals[corner];
            normal[0] += face[0];
            normal[1] += face[1];
            normal[2] += face[2];
        }
    }
    if skipped > 0 {
        log::warn!("skipped {} triangles with out of range indices", skipped);
    }

    for normal in normals.iter_mut() {
        normalize_or_zero(normal);
    }
    normals
}

/// Estimates per-vertex normals for a flat `x, y, z, ...` vertex buffer.
///
/// The result has exactly as many elements as `vertices`.
pub fn compute_normals(vertices: &[f32], indices: &[u32]) -> Vec<f32> {
    let positions = unpack_positions(vertices);
    let mut normals = pack_positions(&compute_normals_decoder(&positions, indices));
    normals.resize(vertices.len(), 0f32);
    normals
}
