use crate::{Error, Result};

/// Random-access view over a numeric buffer handed in by the host.
///
/// Kernels read through this trait, so a host binding only has to expose a
/// length and an element fetch for its native array type.
pub trait ReadBuffer<T: Copy> {
    fn len(&self) -> usize;

    fn read(&self, index: usize) -> T;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Copy> ReadBuffer<T> for [T] {
    #[inline(always)]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline(always)]
    fn read(&self, index: usize) -> T {
        self[index]
    }
}

impl<T: Copy> ReadBuffer<T> for Vec<T> {
    #[inline(always)]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline(always)]
    fn read(&self, index: usize) -> T {
        self[index]
    }
}

/// Freshly allocated output buffer that results are written into.
pub trait WriteBuffer<T: Copy>: Sized {
    fn allocate(len: usize) -> Self;

    fn write(&mut self, index: usize, value: T);
}

impl<T: Copy + Default> WriteBuffer<T> for Vec<T> {
    fn allocate(len: usize) -> Self {
        vec![T::default(); len]
    }

    #[inline(always)]
    fn write(&mut self, index: usize, value: T) {
        self[index] = value;
    }
}

impl<T: Copy + Default> WriteBuffer<T> for Box<[T]> {
    fn allocate(len: usize) -> Self {
        vec![T::default(); len].into_boxed_slice()
    }

    #[inline(always)]
    fn write(&mut self, index: usize, value: T) {
        self[index] = value;
    }
}

/// Copies a host buffer into an owned vector the kernels can work on.
pub fn import<T: Copy, B: ReadBuffer<T> + ?Sized>(buffer: &B) -> Vec<T> {
    let mut result: Vec<T> = Vec::with_capacity(buffer.len());
    for index in 0..buffer.len() {
        result.push(buffer.read(index));
    }
    result
}

/// Copies kernel output into whatever buffer type the host consumes.
pub fn export<T: Copy, O: WriteBuffer<T>>(data: &[T]) -> O {
    let mut result = O::allocate(data.len());
    for (index, value) in data.iter().enumerate() {
        result.write(index, *value);
    }
    result
}

/// Reads xyz positions out of interleaved vertex bytes.
///
/// Each vertex occupies `vertex_stride` bytes and stores its position as three
/// little-endian `f32` values starting at `position_offset`.
pub struct VertexDataAdapter<'a> {
    data: &'a [u8],
    pub vertex_count: usize,
    pub vertex_stride: usize,
    pub position_offset: usize,
}

impl<'a> VertexDataAdapter<'a> {
    pub fn new(
        data: &'a [u8],
        vertex_stride: usize,
        position_offset: usize,
    ) -> Result<VertexDataAdapter<'a>> {
        if vertex_stride == 0 {
            return Err(Error::memory("vertex_stride must be non-zero"));
        }
        let vertex_count = data.len() / vertex_stride;
        if data.len() % vertex_stride != 0 {
            Err(Error::memory_dynamic(format!(
                "vertex data length ({}) must be evenly divisible by vertex_stride ({})",
                data.len(),
                vertex_stride
            )))
        } else if position_offset
            .checked_add(12)
            .map_or(true, |end| end > vertex_stride)
        {
            Err(Error::memory_dynamic(format!(
                "position at offset ({}) does not fit in vertex_stride ({})",
                position_offset, vertex_stride
            )))
        } else {
            Ok(VertexDataAdapter {
                data,
                vertex_count,
                vertex_stride,
                position_offset,
            })
        }
    }

    pub fn xyz_f32_at(&self, vertex: usize) -> Result<[f32; 3]> {
        self.position(vertex).ok_or_else(|| {
            Error::memory_dynamic(format!(
                "vertex index ({}) must be less than total vertex count ({})",
                vertex, self.vertex_count
            ))
        })
    }

    fn position(&self, vertex: usize) -> Option<[f32; 3]> {
        if vertex >= self.vertex_count {
            return None;
        }
        let start = vertex
            .checked_mul(self.vertex_stride)?
            .checked_add(self.position_offset)?;
        let bytes = self.data.get(start..start.checked_add(12)?)?;
        let mut position = [0f32; 3];
        for (value, chunk) in position.iter_mut().zip(bytes.chunks_exact(4)) {
            *value = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Some(position)
    }
}

/// Presents the adapter as a flat `x, y, z, x, y, z, ...` coordinate buffer.
impl<'a> ReadBuffer<f32> for VertexDataAdapter<'a> {
    #[inline]
    fn len(&self) -> usize {
        self.vertex_count * 3
    }

    /// Panics when `index` is past the end, like slice indexing.
    #[inline]
    fn read(&self, index: usize) -> f32 {
        match self.position(index / 3) {
            Some(position) => position[index % 3],
            None => panic!(
                "coordinate index {} out of range for {} vertices",
                index, self.vertex_count
            ),
        }
    }
}
