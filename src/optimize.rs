use crate::buffer::{import, ReadBuffer};
use crate::deduplicate::{deduplicate_vertices_with, DedupConfig};
use crate::matrix::multiply_4x4;
use crate::normals::compute_normals;
use crate::report::{elapsed_ms, MatrixReport, NormalsReport, OptimizationReport};
use crate::{Error, Result};
use log::{debug, trace};
use std::time::Instant;

/// Checks that a flat mesh is made of whole vertices and whole triangles and
/// that every index names an existing vertex. Returns the vertex count.
pub fn validate_mesh(vertices: &[f32], indices: &[u32]) -> Result<usize> {
    if vertices.len() % 3 != 0 {
        return Err(Error::VertexBufferLength(vertices.len()));
    }
    if indices.len() % 3 != 0 {
        return Err(Error::IndexBufferLength(indices.len()));
    }
    let vertex_count = vertices.len() / 3;
    if let Some((position, index)) = indices
        .iter()
        .enumerate()
        .find(|(_, index)| **index as usize >= vertex_count)
    {
        return Err(Error::IndexOutOfBounds {
            position,
            index: *index,
            vertex_count,
        });
    }
    Ok(vertex_count)
}

/// Welds near-duplicate vertices with the default quantized-key lookup.
///
/// The input must have at least one vertex, since the reduction ratio is
/// undefined otherwise.
pub fn optimize_mesh<V, I>(vertices: &V, indices: &I) -> Result<OptimizationReport>
where
    V: ReadBuffer<f32> + ?Sized,
    I: ReadBuffer<u32> + ?Sized,
{
    optimize_mesh_with(vertices, indices, &DedupConfig::default())
}

pub fn optimize_mesh_with<V, I>(
    vertices: &V,
    indices: &I,
    config: &DedupConfig,
) -> Result<OptimizationReport>
where
    V: ReadBuffer<f32> + ?Sized,
    I: ReadBuffer<u32> + ?Sized,
{
    let start = Instant::now();

    let vertices: Vec<f32> = import(vertices);
    let indices: Vec<u32> = import(indices);
    if vertices.is_empty() {
        return Err(Error::EmptyVertexBuffer);
    }
    let original_vertex_count = validate_mesh(&vertices, &indices)?;

    let (new_vertices, new_indices) = deduplicate_vertices_with(&vertices, &indices, config);
    let optimized_vertex_count = new_vertices.len() / 3;
    let reduction_ratio = 1f64 - optimized_vertex_count as f64 / original_vertex_count as f64;

    let report = OptimizationReport {
        vertices: new_vertices,
        indices: new_indices,
        processing_time_ms: elapsed_ms(start),
        original_vertex_count,
        optimized_vertex_count,
        reduction_ratio,
    };
    debug!("optimize_mesh ({:?}): {}", config.options, report);
    Ok(report)
}

/// Estimates smooth per-vertex normals for a triangle list.
pub fn calculate_normals<V, I>(vertices: &V, indices: &I) -> Result<NormalsReport>
where
    V: ReadBuffer<f32> + ?Sized,
    I: ReadBuffer<u32> + ?Sized,
{
    let start = Instant::now();

    let vertices: Vec<f32> = import(vertices);
    let indices: Vec<u32> = import(indices);
    let vertex_count = validate_mesh(&vertices, &indices)?;

    let normals = compute_normals(&vertices, &indices);

    let report = NormalsReport {
        normals,
        processing_time_ms: elapsed_ms(start),
    };
    debug!(
        "calculate_normals: {} vertices, {} triangles in {:.3} ms",
        vertex_count,
        indices.len() / 3,
        report.processing_time_ms
    );
    Ok(report)
}

fn matrix_operand<B: ReadBuffer<f32> + ?Sized>(buffer: &B, operand: char) -> Result<[f32; 16]> {
    import::<f32, B>(buffer)
        .try_into()
        .map_err(|values: Vec<f32>| Error::MatrixLength {
            operand,
            len: values.len(),
        })
}

/// Multiplies two row-major 4x4 matrices given as 16-element buffers.
pub fn multiply_matrices<A, B>(a: &A, b: &B) -> Result<MatrixReport>
where
    A: ReadBuffer<f32> + ?Sized,
    B: ReadBuffer<f32> + ?Sized,
{
    let start = Instant::now();

    let a = matrix_operand(a, 'a')?;
    let b = matrix_operand(b, 'b')?;
    let result = multiply_4x4(&a, &b);

    let report = MatrixReport {
        result,
        processing_time_ms: elapsed_ms(start),
    };
    trace!("multiply_matrices in {:.3} ms", report.processing_time_ms);
    Ok(report)
}
