/// A type alias for handling errors throughout meshweld
pub type Result<T> = std::result::Result<T, Error>;

/// An error that can occur when a buffer violates the layout an operation expects
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The vertex buffer does not hold a whole number of xyz triples.
    #[error("vertex buffer length ({0}) must be a multiple of 3")]
    VertexBufferLength(usize),

    /// The index buffer does not hold a whole number of triangles.
    #[error("index buffer length ({0}) must be a multiple of 3")]
    IndexBufferLength(usize),

    /// An index names a vertex past the end of the vertex buffer.
    #[error("index {index} at position {position} is out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds {
        position: usize,
        index: u32,
        vertex_count: usize,
    },

    /// A matrix operand is not a 4x4 matrix.
    #[error("matrix operand {operand} has {len} elements, expected 16")]
    MatrixLength { operand: char, len: usize },

    /// The reduction ratio is undefined for a mesh without vertices.
    #[error("cannot optimize a mesh with no vertices")]
    EmptyVertexBuffer,

    /// An error that occurred while accessing or allocating memory
    #[error("memory error: {0}")]
    Memory(std::borrow::Cow<'static, str>),
}

impl Error {
    #[inline]
    pub(crate) fn memory(msg: &'static str) -> Self {
        Self::Memory(std::borrow::Cow::Borrowed(msg))
    }

    #[inline]
    pub(crate) fn memory_dynamic(msg: String) -> Self {
        Self::Memory(std::borrow::Cow::Owned(msg))
    }
}
