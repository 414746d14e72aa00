use crate::key::{
    positions_within, search_radius, QuantizedKey, QUANTIZATION_SCALE, WELD_EPSILON,
};
use crate::packing::{unpack_positions, DecodePosition};
use bitflags::bitflags;
use std::collections::HashMap;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct DedupOptions : u32 {
        const None = 0;
        /// Search the cells around a vertex for a representative within epsilon,
        /// instead of looking up its own quantization cell only.
        /// The search covers as many cells as `epsilon * scale` spans (27 with the
        /// default config), so near-duplicates that straddle a cell boundary are
        /// merged, and two clusters sharing a cell but farther apart than epsilon
        /// are kept separate. A vertex within epsilon of several representatives
        /// joins the earliest one.
        const NeighborSearch = 1;
    }
}

/// Parameters of a deduplication pass.
///
/// The default reproduces plain quantized-key lookup with a 0.001 cell size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DedupConfig {
    /// Per-axis tolerance used by `DedupOptions::NeighborSearch`.
    pub epsilon: f32,
    /// Scale applied before truncating coordinates to cell indices.
    pub scale: f32,
    pub options: DedupOptions,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            epsilon: WELD_EPSILON,
            scale: QUANTIZATION_SCALE,
            options: DedupOptions::None,
        }
    }
}

impl DedupConfig {
    pub fn with_options(options: DedupOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }
}

struct Welder<'c> {
    config: &'c DedupConfig,
    cells: HashMap<QuantizedKey, Vec<u32>>,
    radius: i32,
    representatives: Vec<[f32; 3]>,
    sources: Vec<u32>,
}

impl<'c> Welder<'c> {
    fn new(config: &'c DedupConfig, capacity: usize) -> Self {
        Self {
            config,
            cells: HashMap::with_capacity(capacity),
            radius: search_radius(config.epsilon, config.scale),
            representatives: Vec::new(),
            sources: Vec::new(),
        }
    }

    /// Returns the compacted index for `position`, creating a new one on a miss.
    fn insert(&mut self, source: u32, position: [f32; 3]) -> u32 {
        let key = QuantizedKey::with_scale(position, self.config.scale);

        let found = if self.config.options.contains(DedupOptions::NeighborSearch) {
            self.search_neighbors(key, position)
        } else {
            self.cells.get(&key).map(|bucket| bucket[0])
        };
        if let Some(index) = found {
            return index;
        }

        let index = self.representatives.len() as u32;
        self.representatives.push(position);
        self.sources.push(source);
        self.cells.entry(key).or_default().push(index);
        index
    }

    fn search_neighbors(&self, key: QuantizedKey, position: [f32; 3]) -> Option<u32> {
        let within = |candidate: &u32| {
            positions_within(
                self.representatives[*candidate as usize],
                position,
                self.config.epsilon,
            )
        };

        let span = 2 * self.radius as u64 + 1;
        if span.saturating_pow(3) > self.representatives.len() as u64 {
            // fewer representatives than cells to visit
            return (0..self.representatives.len() as u32).find(within);
        }
        key.neighbors_within(self.radius)
            .filter_map(|cell| self.cells.get(&cell))
            .flatten()
            .copied()
            .filter(within)
            .min()
    }
}

/// Groups positions and returns the old-to-new remap table together with the
/// original index of the first-seen vertex of every group.
fn weld<I>(positions: I, capacity: usize, config: &DedupConfig) -> (Vec<u32>, Vec<u32>)
where
    I: Iterator<Item = [f32; 3]>,
{
    let mut welder = Welder::new(config, capacity);
    let remap = positions
        .enumerate()
        .map(|(source, position)| welder.insert(source as u32, position))
        .collect::<Vec<u32>>();
    (remap, welder.sources)
}

/// Generates a vertex remap table for a flat `x, y, z, ...` vertex buffer.
///
/// Entry `i` of the table is the compacted index of input vertex `i`. Compacted
/// indices are assigned in order of first appearance. Also returns the number
/// of unique vertices.
pub fn generate_vertex_remap(vertices: &[f32], config: &DedupConfig) -> (Vec<u32>, usize) {
    let positions = unpack_positions(vertices);
    let (remap, sources) = weld(positions.iter().copied(), positions.len(), config);
    (remap, sources.len())
}

/// Rewrites an index buffer through a remap table.
///
/// Indices with no entry in the table are dropped rather than replaced, so the
/// output can be shorter than the input on malformed meshes.
pub fn remap_index_buffer(indices: &[u32], remap: &[u32]) -> Vec<u32> {
    let mut result: Vec<u32> = Vec::with_capacity(indices.len());
    let mut missing = 0usize;
    for index in indices {
        match remap.get(*index as usize) {
            Some(new_index) => result.push(*new_index),
            None => missing += 1,
        }
    }
    if missing > 0 {
        log::warn!(
            "dropped {} of {} indices with no vertex to remap to",
            missing,
            indices.len()
        );
    }
    result
}

/// Collapses near-duplicate vertices of a flat `x, y, z, ...` buffer and
/// rewrites the index buffer to reference the compacted vertices.
///
/// Vertices are grouped by their `QuantizedKey` alone. The first vertex seen in
/// a cell becomes the representative and its coordinates are kept verbatim.
/// Two clusters that fall in the same cell merge even if they are farther
/// apart than `WELD_EPSILON`, and near-duplicates on opposite sides of a cell
/// boundary stay separate.
pub fn deduplicate_vertices(vertices: &[f32], indices: &[u32]) -> (Vec<f32>, Vec<u32>) {
    deduplicate_vertices_with(vertices, indices, &DedupConfig::default())
}

pub fn deduplicate_vertices_with(
    vertices: &[f32],
    indices: &[u32],
    config: &DedupConfig,
) -> (Vec<f32>, Vec<u32>) {
    let positions = unpack_positions(vertices);
    let (remap, sources) = weld(positions.iter().copied(), positions.len(), config);

    let mut new_vertices: Vec<f32> = Vec::with_capacity(sources.len() * 3);
    for source in &sources {
        new_vertices.extend_from_slice(&positions[*source as usize]);
    }

    (new_vertices, remap_index_buffer(indices, &remap))
}

/// Collapses vertices that share a position and rewrites the index buffer.
///
/// Works like `deduplicate_vertices` on any vertex type; the first-seen vertex
/// of each group is cloned into the output, other attributes included.
pub fn deduplicate_decoder<T: DecodePosition + Clone>(
    vertices: &[T],
    indices: &[u32],
    config: &DedupConfig,
) -> (Vec<T>, Vec<u32>) {
    let (remap, sources) = weld(
        vertices.iter().map(DecodePosition::decode_position),
        vertices.len(),
        config,
    );
    let new_vertices = sources
        .iter()
        .map(|source| vertices[*source as usize].clone())
        .collect::<Vec<T>>();
    (new_vertices, remap_index_buffer(indices, &remap))
}
