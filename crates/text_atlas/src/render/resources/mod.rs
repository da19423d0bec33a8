//! GPU-facing resources: materials, shader programs and texture handles

pub mod materials;
