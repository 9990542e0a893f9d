use std::path::PathBuf;

use hifitime::Epoch;

use crate::error::{SimError, SimResult};

/// Integration scheme tag, selectable per §6 `scheme` knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Scheme{
    Euler,
    Rk4,
}

/// Validated realization of the §6 configuration table: `dt`, `end_time`,
/// `save_interval`, `scheme`, `datetime`.
#[derive(Debug, Clone)]
pub struct SimConfig{
    pub dt: f64,
    pub end_time: f64,
    pub save_interval: u64,
    pub scheme: Scheme,
    pub datetime: Epoch,
    pub save_dir: PathBuf,
}

impl SimConfig{
    pub fn new(
        dt: f64,
        end_time: f64,
        save_interval: u64,
        scheme: Scheme,
        datetime: Epoch,
        save_dir: impl Into<PathBuf>,
    ) -> SimResult<SimConfig>{
        if dt <= 0.0 || !dt.is_finite(){
            return Err(SimError::InvalidConfig(format!("dt must be positive and finite, got {dt}")));
        }
        if end_time < 0.0 || !end_time.is_finite(){
            return Err(SimError::InvalidConfig(format!("end_time must be non-negative and finite, got {end_time}")));
        }
        if save_interval == 0{
            return Err(SimError::InvalidConfig("save_interval must be nonzero".into()));
        }

        Ok(SimConfig{ dt, end_time, save_interval, scheme, datetime, save_dir: save_dir.into() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_nonpositive_dt(){
        let result = SimConfig::new(0.0, 10.0, 1, Scheme::Rk4, Epoch::from_gregorian_utc_at_midnight(2000, 1, 1), "out");
        assert!(result.is_err());
    }

    #[test]
    fn rejects_zero_save_interval(){
        let result = SimConfig::new(0.1, 10.0, 0, Scheme::Euler, Epoch::from_gregorian_utc_at_midnight(2000, 1, 1), "out");
        assert!(result.is_err());
    }

    #[test]
    fn accepts_sane_config(){
        let result = SimConfig::new(0.1, 10.0, 10, Scheme::Rk4, Epoch::from_gregorian_utc_at_midnight(2000, 1, 1), "out");
        assert!(result.is_ok());
    }
}
