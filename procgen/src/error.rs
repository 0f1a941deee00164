//! Error types for the validation entry points
//!
//! Generators never fail; these errors only surface from helpers that
//! integrators call to check or import data at the crate boundary.

/// Problems found by [`crate::mesh::MeshData::validate`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    #[error("index count {0} is not a multiple of 3")]
    IncompleteTriangle(usize),

    #[error("index {index} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        position: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("vertex {0} has a non-finite position")]
    NonFinitePosition(usize),
}

/// Problems importing raw pixel bytes into a [`crate::texture::TextureData`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextureError {
    #[error("unsupported channel count {0} (expected 3 or 4)")]
    UnsupportedChannels(u32),

    #[error("expected {expected} bytes for {width}x{height}x{channels}, got {actual}")]
    SizeMismatch {
        width: u32,
        height: u32,
        channels: u32,
        expected: usize,
        actual: usize,
    },
}
