/// Scale applied to each coordinate before truncating it to a cell index.
pub const QUANTIZATION_SCALE: f32 = 1000f32;

/// Per-axis distance below which two positions count as the same vertex.
pub const WELD_EPSILON: f32 = 0.001f32;

/// Quantize a coordinate into a cell index by scaling and truncating toward zero.
///
/// NaN maps to 0 and values outside the `i32` range saturate, so the result is
/// always deterministic even for non-finite input.
#[inline(always)]
pub fn quantize_coord(v: f32, scale: f32) -> i32 {
    (v * scale) as i32
}

/// True when every axis of `a` and `b` differs by strictly less than `epsilon`.
#[inline]
pub fn positions_within(a: [f32; 3], b: [f32; 3], epsilon: f32) -> bool {
    (a[0] - b[0]).abs() < epsilon
        && (a[1] - b[1]).abs() < epsilon
        && (a[2] - b[2]).abs() < epsilon
}

/// Quantization cell of a position, used as a hash key for approximate
/// equality lookup.
///
/// Positions in the same cell always produce equal keys. Positions on either
/// side of a cell boundary produce different keys even when they are closer
/// than `WELD_EPSILON`. Because truncation rounds toward zero, the cell
/// around zero on each axis is twice as wide as the others, so two positions
/// up to `2 * WELD_EPSILON` apart can share a key there.
///
/// Only equality is meaningful; the ordering of keys carries no spatial sense.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct QuantizedKey {
    x: i32,
    y: i32,
    z: i32,
}

impl QuantizedKey {
    #[inline]
    pub fn from_position(position: [f32; 3]) -> Self {
        Self::with_scale(position, QUANTIZATION_SCALE)
    }

    #[inline]
    pub fn with_scale(position: [f32; 3], scale: f32) -> Self {
        Self {
            x: quantize_coord(position[0], scale),
            y: quantize_coord(position[1], scale),
            z: quantize_coord(position[2], scale),
        }
    }

    pub fn cell(&self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    /// The 3x3x3 block of cells centered on this key, this key included.
    pub fn neighbors(&self) -> impl Iterator<Item = QuantizedKey> {
        self.neighbors_within(1)
    }

    /// Every cell at most `radius` cells away on each axis, this key included.
    pub fn neighbors_within(&self, radius: i32) -> impl Iterator<Item = QuantizedKey> {
        let center = *self;
        let radius = radius.max(0);
        (-radius..=radius).flat_map(move |dx| {
            (-radius..=radius).flat_map(move |dy| {
                (-radius..=radius).map(move |dz| QuantizedKey {
                    x: center.x.saturating_add(dx),
                    y: center.y.saturating_add(dy),
                    z: center.z.saturating_add(dz),
                })
            })
        })
    }
}

/// Number of cells on each side of a key that can hold a position within
/// `epsilon`, at least 1.
#[inline]
pub fn search_radius(epsilon: f32, scale: f32) -> i32 {
    ((epsilon * scale).abs().ceil() as i32).max(1)
}
