//! Trait definitions for correction strategies.

/// Default maximum edit distance at which a post counts as a correction
pub const DEFAULT_CORRECTION_THRESHOLD: usize = 10;

/// Strategy trait for deciding whether one post corrects another
pub trait CorrectionStrategy: Send + Sync {
    /// Whether two texts at this distance are the same post
    fn is_correction(&self, distance: usize) -> bool;

    /// Get the threshold used
    fn threshold(&self) -> usize;

    /// Human-readable description of the strategy
    fn description(&self) -> String;
}

/// Simple threshold-based correction strategy
#[derive(Debug, Clone)]
pub struct ThresholdStrategy {
    /// Maximum distance still treated as a correction
    threshold: usize,
}

impl ThresholdStrategy {
    /// Create a new threshold strategy
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }
}

impl Default for ThresholdStrategy {
    fn default() -> Self {
        Self::new(DEFAULT_CORRECTION_THRESHOLD)
    }
}

impl CorrectionStrategy for ThresholdStrategy {
    fn is_correction(&self, distance: usize) -> bool {
        distance <= self.threshold
    }

    fn threshold(&self) -> usize {
        self.threshold
    }

    fn description(&self) -> String {
        format!(
            "Threshold strategy: posts within {} edits are treated as corrections",
            self.threshold
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_strategy_at_boundary() {
        let strategy = ThresholdStrategy::new(10);

        assert!(strategy.is_correction(0));
        assert!(strategy.is_correction(10));
        assert!(!strategy.is_correction(11));
    }

    #[test]
    fn default_threshold_is_ten() {
        assert_eq!(ThresholdStrategy::default().threshold(), 10);
    }

    #[test]
    fn zero_threshold_only_folds_exact_reposts() {
        let strategy = ThresholdStrategy::new(0);

        assert!(strategy.is_correction(0));
        assert!(!strategy.is_correction(1));
    }

    #[test]
    fn description_mentions_threshold() {
        assert!(ThresholdStrategy::new(7).description().contains('7'));
    }
}
