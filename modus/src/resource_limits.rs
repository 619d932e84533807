/// Resource limits to keep reading and chaining predictable
///
/// These limits protect against runaway inputs while being generous enough
/// for all legitimate knowledge bases.
#[derive(Debug, Clone)]
pub struct ResourceLimits {
    /// Maximum source size in bytes
    /// Real usage: ~5KB, Limit: 5MB (1000x)
    pub max_file_size_bytes: usize,

    /// Maximum number of terms in a single statement
    /// Real usage: ~3-4 terms, Limit: 256
    pub max_statement_terms: usize,

    /// Maximum number of fact/rule combinations processed by a single add
    /// Real usage: hundreds, Limit: 1,000,000
    pub max_inference_steps: usize,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 5 * 1024 * 1024, // 5 MB
            max_statement_terms: 256,
            max_inference_steps: 1_000_000,
        }
    }
}

impl ResourceLimits {
    /// Create a new ResourceLimits with default values
    pub fn new() -> Self {
        Self::default()
    }
}
