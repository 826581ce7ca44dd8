/// Configuration for a delay session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfiguration {
    /// Smallest selectable delay in seconds (default: 0).
    pub min_delay_secs: f64,

    /// Largest selectable delay in seconds (default: 3).
    pub max_delay_secs: f64,

    /// Delay applied before the user touches the control (default: 1).
    pub initial_delay_secs: f64,

    /// Increment used when nudging the delay up or down (default: 1).
    pub delay_step_secs: f64,
}

impl SessionConfiguration {
    pub fn validate(&self) -> Result<(), String> {
        let values = [
            self.min_delay_secs,
            self.max_delay_secs,
            self.initial_delay_secs,
            self.delay_step_secs,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err("delay bounds must be finite".into());
        }
        if self.min_delay_secs < 0.0 {
            return Err(format!("minimum delay must not be negative: {}", self.min_delay_secs));
        }
        if self.max_delay_secs < self.min_delay_secs {
            return Err(format!(
                "maximum delay {} is below minimum {}",
                self.max_delay_secs, self.min_delay_secs
            ));
        }
        if self.delay_step_secs <= 0.0 {
            return Err("delay step must be positive".into());
        }
        Ok(())
    }
}

impl Default for SessionConfiguration {
    fn default() -> Self {
        Self {
            min_delay_secs: 0.0,
            max_delay_secs: 3.0,
            initial_delay_secs: 1.0,
            delay_step_secs: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(SessionConfiguration::default().validate().is_ok());
    }

    #[test]
    fn rejects_inverted_bounds() {
        let config = SessionConfiguration {
            min_delay_secs: 2.0,
            max_delay_secs: 1.0,
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().contains("below minimum"));
    }

    #[test]
    fn rejects_non_positive_step_and_nan() {
        let zero_step = SessionConfiguration {
            delay_step_secs: 0.0,
            ..Default::default()
        };
        assert!(zero_step.validate().is_err());

        let nan = SessionConfiguration {
            max_delay_secs: f64::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());
    }
}
