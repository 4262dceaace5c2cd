use crate::utils::round_to;
use std::fmt;
use std::sync::Arc;

/// Tolerance of the floating-point identity check after inversion.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

type Rounding = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// Settings shared by inversion and solving.
#[derive(Clone)]
pub struct EliminationConfig {
    pub tolerance: f64,
    rounding: Option<Rounding>,
}

impl Default for EliminationConfig {
    fn default() -> Self {
        EliminationConfig {
            tolerance: DEFAULT_TOLERANCE,
            rounding: None,
        }
    }
}

impl EliminationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Function applied to every solved value, e.g. to drop floating-point drift.
    pub fn with_rounding(mut self, rounding: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        self.rounding = Some(Arc::new(rounding));
        self
    }

    pub fn with_decimals(self, decimals: u32) -> Self {
        self.with_rounding(move |value| round_to(value, decimals))
    }

    pub fn round(&self, value: f64) -> f64 {
        match &self.rounding {
            Some(rounding) => rounding(value),
            None => value,
        }
    }
}

impl fmt::Debug for EliminationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EliminationConfig")
            .field("tolerance", &self.tolerance)
            .field("rounding", &self.rounding.is_some())
            .finish()
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_rounding() {
        let config = EliminationConfig::new();
        assert_eq!(config.tolerance, DEFAULT_TOLERANCE);
        assert_eq!(config.round(0.30000000000000004), 0.30000000000000004);

        let config = config.with_decimals(3).with_tolerance(1e-9);
        assert_eq!(config.round(0.30000000000000004), 0.3);
        assert_eq!(config.round(2.71828), 2.718);
        assert_eq!(config.tolerance, 1e-9);

        let config = EliminationConfig::new().with_rounding(f64::trunc);
        assert_eq!(config.round(-1.9), -1.0);
        assert_eq!(
            format!("{:?}", config),
            "EliminationConfig { tolerance: 1e-6, rounding: true }"
        );
    }
}
