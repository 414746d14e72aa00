use std::fmt;
use std::time::Instant;

/// Milliseconds elapsed since `start`, with sub-millisecond precision.
#[inline]
pub(crate) fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000f64
}

/// Result of `optimize_mesh`: the welded buffers and statistics about the pass.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationReport {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
    pub processing_time_ms: f64,
    pub original_vertex_count: usize,
    pub optimized_vertex_count: usize,
    /// Fraction of vertices removed, `1 - optimized / original`.
    pub reduction_ratio: f64,
}

impl OptimizationReport {
    pub fn removed_vertex_count(&self) -> usize {
        self.original_vertex_count - self.optimized_vertex_count
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl fmt::Display for OptimizationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} vertices ({:.1}% removed), {} triangles in {:.3} ms",
            self.original_vertex_count,
            self.optimized_vertex_count,
            self.reduction_ratio * 100f64,
            self.triangle_count(),
            self.processing_time_ms
        )
    }
}

/// Result of `calculate_normals`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalsReport {
    /// One xyz normal per input vertex, same length as the input buffer.
    pub normals: Vec<f32>,
    pub processing_time_ms: f64,
}

/// Result of `multiply_matrices`.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixReport {
    pub result: [f32; 16],
    pub processing_time_ms: f64,
}
