extern crate float_cmp;
extern crate meshweld;
extern crate rand;

use float_cmp::{ApproxEq, F32Margin};
use meshweld::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn length(v: &[f32]) -> f32 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

#[test]
fn single_triangle_faces_up() {
    let vertices = [0f32, 0f32, 0f32, 1f32, 0f32, 0f32, 0f32, 1f32, 0f32];

    let normals = compute_normals(&vertices, &[0, 1, 2]);

    assert_eq!(normals.len(), vertices.len());
    for normal in normals.chunks_exact(3) {
        assert_eq!(normal, &[0f32, 0f32, 1f32]);
    }
}

#[test]
fn winding_flips_normal() {
    let vertices = [0f32, 0f32, 0f32, 1f32, 0f32, 0f32, 0f32, 1f32, 0f32];

    let normals = compute_normals(&vertices, &[0, 2, 1]);

    for normal in normals.chunks_exact(3) {
        assert_eq!(normal, &[0f32, 0f32, -1f32]);
    }
}

#[test]
fn isolated_and_degenerate_vertices_stay_zero() {
    let vertices = [
        0f32, 0f32, 0f32, //
        1f32, 0f32, 0f32, //
        0f32, 1f32, 0f32, //
        9f32, 9f32, 9f32, // never referenced
        2f32, 2f32, 2f32, // only in a collapsed triangle
    ];

    let normals = compute_normals(&vertices, &[0, 1, 2, 4, 4, 4]);

    assert_eq!(&normals[9..12], &[0f32, 0f32, 0f32]);
    assert_eq!(&normals[12..15], &[0f32, 0f32, 0f32]);
    assert_eq!(&normals[0..3], &[0f32, 0f32, 1f32]);
}

#[test]
fn shared_edge_accumulates_without_weighting() {
    // two triangles with perpendicular faces sharing the edge 0-1; face
    // normals of different area must still be summed as-is
    let vertices = [
        0f32, 0f32, 0f32, //
        1f32, 0f32, 0f32, //
        0f32, 1f32, 0f32, //
        0f32, 0f32, -3f32, //
    ];
    let indices = [0, 1, 2, 0, 1, 3];

    let normals = compute_normals(&vertices, &indices);

    // (0,0,1) + (0,3,0), normalized
    let expected = [0f32, 3f32 / 10f32.sqrt(), 1f32 / 10f32.sqrt()];
    let margin = F32Margin {
        epsilon: 1e-6,
        ulps: 4,
    };
    for axis in 0..3 {
        assert!(normals[axis].approx_eq(expected[axis], margin));
        assert!(normals[3 + axis].approx_eq(expected[axis], margin));
    }
    assert_eq!(&normals[6..9], &[0f32, 0f32, 1f32]);
    assert_eq!(&normals[9..12], &[0f32, 1f32, 0f32]);
}

#[test]
fn referenced_normals_have_unit_length() {
    // random height field: every face normal points up, so no referenced
    // vertex can sum to zero
    let mut rng = StdRng::seed_from_u64(7);
    let size = 10u32;
    let mut vertices: Vec<f32> = Vec::new();
    for y in 0..(size + 1) {
        for x in 0..(size + 1) {
            let z = rng.gen_range(-1f32..1f32);
            vertices.extend_from_slice(&[x as f32, y as f32, z]);
        }
    }
    let mut indices: Vec<u32> = Vec::new();
    for y in 0..size {
        for x in 0..size {
            let row = y * (size + 1) + x;
            let next_row = row + size + 1;
            indices.extend_from_slice(&[row, row + 1, next_row]);
            indices.extend_from_slice(&[next_row, row + 1, next_row + 1]);
        }
    }
    let referenced = (vertices.len() / 3) as u32;
    for _ in 0..20 {
        let isolated = [rng.gen_range(-5f32..5f32), rng.gen_range(-5f32..5f32), 9f32];
        vertices.extend_from_slice(&isolated);
    }

    let normals = compute_normals(&vertices, &indices);

    assert_eq!(normals.len(), vertices.len());
    for (vertex, normal) in normals.chunks_exact(3).enumerate() {
        let len = length(normal);
        if (vertex as u32) < referenced {
            assert!((len - 1f32).abs() < 1e-4, "vertex {} has length {}", vertex, len);
            assert!(normal[2] > 0f32);
        } else {
            assert_eq!(normal, &[0f32, 0f32, 0f32]);
        }
    }
}

#[test]
fn out_of_range_triangles_are_skipped() {
    let vertices = [0f32, 0f32, 0f32, 1f32, 0f32, 0f32, 0f32, 1f32, 0f32];

    let normals = compute_normals(&vertices, &[0, 1, 2, 0, 1, 3]);

    for normal in normals.chunks_exact(3) {
        assert_eq!(normal, &[0f32, 0f32, 1f32]);
    }
}

#[test]
fn decoder_matches_flat_buffer() {
    let mut vertices = vec![
        Vertex {
            p: [0f32, 0f32, 0f32],
            ..Vertex::default()
        },
        Vertex {
            p: [0f32, 0f32, 1f32],
            ..Vertex::default()
        },
        Vertex {
            p: [0f32, 1f32, 0f32],
            ..Vertex::default()
        },
    ];
    let indices = [0u32, 1, 2];

    let normals = compute_normals_decoder(&vertices, &indices);
    let positions = [vertices[0].p, vertices[1].p, vertices[2].p];
    let flat = compute_normals(&pack_positions(&positions), &indices);

    assert_eq!(pack_positions(&normals), flat);

    assign_normals(&mut vertices, &normals);
    assert!(vertices.iter().all(|vertex| vertex.n == [-1f32, 0f32, 0f32]));
}
