//! Index Configuration

/// Semantic index configuration
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Maximum embedding calls in flight during ingestion
    /// (1 = sequential, 0 = one per CPU core)
    pub concurrency: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self { concurrency: 1 }
    }
}

impl IndexConfig {
    /// Set ingestion concurrency
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Concurrency with the auto-detect value resolved
    pub fn effective_concurrency(&self) -> usize {
        if self.concurrency == 0 {
            num_cpus::get().max(1)
        } else {
            self.concurrency
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_sequential() {
        assert_eq!(IndexConfig::default().effective_concurrency(), 1);
    }

    #[test]
    fn test_zero_means_auto_detect() {
        let config = IndexConfig::default().with_concurrency(0);
        assert_eq!(config.effective_concurrency(), num_cpus::get().max(1));
        assert_eq!(IndexConfig::default().with_concurrency(8).effective_concurrency(), 8);
    }
}
