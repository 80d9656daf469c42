use serde::{Deserialize, Serialize};

use crate::{Error, Pid};

/// Complete controller configuration.
///
/// Unlike the setters on [`Pid`], which silently ignore invalid values, the
/// configuration is validated as a whole and the first invalid field is
/// reported. Missing fields take their default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PidConfig {
    /// Raw proportional gain.
    pub kp: f32,
    /// Raw integral gain.
    pub ki: f32,
    /// Raw derivative gain.
    pub kd: f32,
    /// Point target.
    pub target: f32,
    /// Symmetric acceptance range around the target.
    pub target_range: Option<f32>,
    /// Explicit acceptance band. Takes precedence over `target_range`.
    pub target_bounds: Option<(f32, f32)>,
    /// Output scale.
    pub scale: f32,
    /// Output clamp bounds.
    pub output_range: Option<(f32, f32)>,
    /// Integral term clamp magnitude, zero to disable.
    pub max_integral_output: f32,
    /// Input filter blend gain.
    pub input_filter: Option<f32>,
}

impl Default for PidConfig {
    fn default() -> Self {
        Self {
            kp: 1.0,
            ki: 0.0,
            kd: 0.0,
            target: 0.0,
            target_range: None,
            target_bounds: None,
            scale: crate::consts::DEFAULT_SCALE,
            output_range: None,
            max_integral_output: 0.0,
            input_filter: None,
        }
    }
}

impl PidConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), Error> {
        let mut fields = vec![
            ("kp", self.kp),
            ("ki", self.ki),
            ("kd", self.kd),
            ("target", self.target),
            ("scale", self.scale),
            ("max_integral_output", self.max_integral_output),
        ];
        if let Some(range) = self.target_range {
            fields.push(("target_range", range));
        }
        if let Some((min, max)) = self.target_bounds {
            fields.extend([("target_bounds", min), ("target_bounds", max)]);
        }
        if let Some((min, max)) = self.output_range {
            fields.extend([("output_range", min), ("output_range", max)]);
        }
        if let Some(gain) = self.input_filter {
            fields.push(("input_filter", gain));
        }

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(Error::NonFinite(field, value));
            }
        }

        if self.scale == 0.0 {
            return Err(Error::ZeroScale);
        }

        if let Some(range) = self.target_range {
            let (min, max) = (self.target - range, self.target + range);
            if max < min {
                return Err(Error::InvertedTargetRange(min, max));
            }
        }

        if let Some((min, max)) = self.target_bounds {
            if max < min {
                return Err(Error::InvertedTargetRange(min, max));
            }
        }

        if let Some((min, max)) = self.output_range {
            if max < min {
                return Err(Error::InvertedOutputRange(min, max));
            }
        }

        if let Some(gain) = self.input_filter {
            if !crate::math::within(gain, 0.0, 1.0) {
                return Err(Error::FilterGainOutOfRange(gain));
            }
        }

        Ok(())
    }

    /// Validate the configuration and construct the controller.
    pub fn build(&self) -> Result<Pid, Error> {
        self.validate()?;

        let mut pid = Pid::new(self.kp, self.ki, self.kd);
        pid.set_scale(self.scale);
        pid.set_target(self.target);

        if let Some(range) = self.target_range {
            pid.set_target_range(range);
        }
        if let Some((min, max)) = self.target_bounds {
            pid.set_target_bounds(min, max);
        }
        if let Some((min, max)) = self.output_range {
            pid.set_output_range(min, max);
        }

        pid.set_max_integral_output(self.max_integral_output);

        if let Some(gain) = self.input_filter {
            pid.set_input_filter(gain);
        }

        debug!(
            "Controller gains {} target {} scale {}",
            pid.gains(),
            pid.target_bounds(),
            pid.scale()
        );

        Ok(pid)
    }
}
