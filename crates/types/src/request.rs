//! Request identification.

/// Identifies a process by its zero-based index in the allocation tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcessId(pub usize);

impl ProcessId {
    /// Create a new process id.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw table index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ProcessId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// A single resource request: one process asking for additional units of
/// each resource type.
///
/// Requests are ephemeral. One is created per arriving request, consumed
/// entirely by one evaluation, and never retained in any state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRequest {
    /// The requesting process.
    pub process: ProcessId,
    /// Units requested per resource type.
    pub demand: Vec<u64>,
}

impl ResourceRequest {
    /// Create a new request.
    pub fn new(process: ProcessId, demand: Vec<u64>) -> Self {
        Self { process, demand }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_id_display() {
        assert_eq!(ProcessId::new(3).to_string(), "P3");
    }
}
