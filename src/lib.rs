//! Geometry kernels over flat vertex and index buffers: near-duplicate vertex
//! welding, smooth normal estimation, and 4x4 matrix multiplication.
//!
//! The entry points in [`optimize`] validate their input and return a report
//! with the output buffers and the time spent. The kernels they call
//! ([`deduplicate_vertices`], [`compute_normals`], [`multiply_4x4`]) trust the
//! caller and can be used directly on pre-validated data.

pub mod buffer;
pub mod deduplicate;
pub mod error;
pub mod key;
pub mod matrix;
pub mod normals;
pub mod optimize;
pub mod packing;
pub mod report;

pub use crate::{
    buffer::*, deduplicate::*, error::*, key::*, matrix::*, normals::*, optimize::*, packing::*,
    report::*,
};
