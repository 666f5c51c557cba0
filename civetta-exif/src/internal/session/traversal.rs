use std::collections::BTreeSet;

use crate::error::{Error, Result};

/// Maximum number of directories decoded for one file
pub const MAX_DIRECTORIES: usize = 64;

/// Keeps track of visited directories
///
/// Directory offsets can point backwards and form cycles. Every directory may
/// only be visited once and the total number is limited.
///
/// ```
/// # use civetta_exif::internal::Traversal;
/// let mut traversal = Traversal::new();
/// assert!(traversal.visit(8).is_ok());
/// assert!(traversal.visit(26).is_ok());
/// assert!(traversal.visit(8).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Traversal {
    visited: BTreeSet<u32>,
    limit: usize,
}

impl Default for Traversal {
    fn default() -> Self {
        Self::new()
    }
}

impl Traversal {
    pub fn new() -> Self {
        Self::with_limit(MAX_DIRECTORIES)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            visited: BTreeSet::new(),
            limit,
        }
    }

    /// Registers the directory at `offset`
    ///
    /// Fails if the directory was visited before or the limit is reached.
    pub fn visit(&mut self, offset: u32) -> Result<()> {
        if self.visited.len() >= self.limit || self.visited.contains(&offset) {
            tracing::info!("Not following directory at {offset}");
            return Err(Error::TraversalLimitExceeded {
                offset,
                visited: self.visited.len(),
            });
        }

        self.visited.insert(offset);
        Ok(())
    }

    pub fn is_visited(&self, offset: u32) -> bool {
        self.visited.contains(&offset)
    }

    /// Number of visited directories
    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }
}
