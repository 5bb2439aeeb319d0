//! Configuration for the scheduling pipeline.

use chrono::NaiveDate;
use pyo3::prelude::*;

/// Options that affect how a schedule is reported, never how it is computed.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Verbosity level: 0=silent, 1=summary, 2=passes, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
    /// Calendar date of day 0. Every day counts as a working day.
    #[pyo3(get, set)]
    pub project_start: Option<NaiveDate>,
}

#[pymethods]
impl ScheduleConfig {
    #[new]
    #[pyo3(signature = (verbosity=None, project_start=None))]
    fn new(verbosity: Option<u8>, project_start: Option<NaiveDate>) -> Self {
        let defaults = Self::default();
        Self {
            verbosity: verbosity.unwrap_or(defaults.verbosity),
            project_start: project_start.or(defaults.project_start),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduleConfig(verbosity={}, project_start={:?})",
            self.verbosity, self.project_start
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ScheduleConfig::default();
        assert_eq!(config.verbosity, 0);
        assert!(config.project_start.is_none());
    }

    #[test]
    fn test_new_fills_missing_fields_from_defaults() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let config = ScheduleConfig::new(None, Some(start));
        assert_eq!(config.verbosity, 0);
        assert_eq!(config.project_start, Some(start));

        let config = ScheduleConfig::new(Some(2), None);
        assert_eq!(config.verbosity, 2);
        assert!(config.project_start.is_none());
    }
}
