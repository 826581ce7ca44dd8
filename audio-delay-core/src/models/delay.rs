use super::config::SessionConfiguration;
use super::error::SessionError;

/// Bounded delay value in seconds.
///
/// Out-of-range values are clamped to `[min, max]`; non-finite values are
/// rejected and leave the setting unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelaySetting {
    value: f64,
    min: f64,
    max: f64,
    step: f64,
}

impl DelaySetting {
    /// Fails with `ConfigurationFailed` on non-finite values, a negative
    /// minimum, `max < min` or a step that is not positive.
    pub fn new(min: f64, max: f64, initial: f64, step: f64) -> Result<Self, SessionError> {
        Self::from_config(&SessionConfiguration {
            min_delay_secs: min,
            max_delay_secs: max,
            initial_delay_secs: initial,
            delay_step_secs: step,
        })
    }

    pub fn from_config(config: &SessionConfiguration) -> Result<Self, SessionError> {
        config.validate().map_err(SessionError::ConfigurationFailed)?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: &SessionConfiguration) -> Self {
        Self {
            value: config
                .initial_delay_secs
                .clamp(config.min_delay_secs, config.max_delay_secs),
            min: config.min_delay_secs,
            max: config.max_delay_secs,
            step: config.delay_step_secs,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Set the value, clamping into range. Returns the stored value.
    pub fn set(&mut self, value: f64) -> Result<f64, SessionError> {
        if !value.is_finite() {
            return Err(SessionError::InvalidDelay(format!("{value} is not a finite number")));
        }
        self.value = value.clamp(self.min, self.max);
        Ok(self.value)
    }

    /// Move the value by `steps` increments, clamping into range.
    pub fn nudge(&mut self, steps: i32) -> f64 {
        self.value = (self.value + self.step * f64::from(steps)).clamp(self.min, self.max);
        self.value
    }
}

impl Default for DelaySetting {
    fn default() -> Self {
        Self::from_valid(&SessionConfiguration::default())
    }
}
