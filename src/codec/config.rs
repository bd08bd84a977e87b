//! Codec limits

/// Limits checked when encoding and when decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Maximum nesting of arrays and maps
    pub max_depth: usize,

    /// Maximum number of elements in a single array or map
    ///
    /// String and byte lengths are not limited.
    pub max_items: usize,
}

impl CodecConfig {
    /// Create a configuration with the default limits
    pub fn new() -> Self {
        Self {
            max_depth: 64,
            max_items: 1 << 20,
        }
    }

    /// Set the nesting limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the per-collection length limit
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::new()
    }
}
