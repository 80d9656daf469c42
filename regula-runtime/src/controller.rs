use serde::Serialize;

use crate::algorithm::lowpass::ExpSmoothing;
use crate::math::{self, Band};

/// Controller gains.
///
/// Gains are always stored normalized: the absolute values of the three
/// coefficients sum to one, unless all of them are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Gains {
    /// Proportional gain
    pub p: f32,
    /// Integral gain
    pub i: f32,
    /// Derivative gain
    pub d: f32,
}

impl Gains {
    /// Normalize the raw coefficients.
    ///
    /// Each coefficient is replaced by its absolute value divided by the sum
    /// of the absolute values. All zero coefficients stay zero.
    pub fn normalized(p: f32, i: f32, d: f32) -> Self {
        let (p, i, d) = (p.abs(), i.abs(), d.abs());

        let mut sum = p + i + d;
        if sum == 0.0 {
            sum = 1.0;
        }

        Self {
            p: p / sum,
            i: i / sum,
            d: d / sum,
        }
    }
}

impl std::fmt::Display for Gains {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P: {:.3} I: {:.3} D: {:.3}", self.p, self.i, self.d)
    }
}

/// Breakdown of a single control step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ControlOutput {
    /// Input after smoothing.
    pub input: f32,
    /// Signed distance back into the target band.
    pub error: f32,
    /// Proportional term.
    pub p: f32,
    /// Integral term, after the integral clamp.
    pub i: f32,
    /// Derivative term.
    pub d: f32,
    /// Final output, after the output clamp.
    pub output: f32,
    /// Whether the output clamp was hit on this step.
    pub saturated: bool,
}

impl std::fmt::Display for ControlOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Input: {:.3} Error: {:.3} P: {:.3} I: {:.3} D: {:.3} Output: {:.3}",
            self.input, self.error, self.p, self.i, self.d, self.output
        )
    }
}

/// Single loop PID controller.
///
/// Every call to [`Pid::compute_output`] is one sampling step with an
/// implicit unit time delta. Configuration setters validate their arguments
/// and silently ignore invalid values, leaving the previous configuration in
/// place. Use [`crate::PidConfig`] for validation with error reporting.
#[derive(Debug, Clone)]
pub struct Pid {
    /// Normalized gains.
    gains: Gains,
    /// Point target.
    target: f32,
    /// Acceptance band around the target.
    target_band: Band,
    /// Output scale, never zero.
    scale: f32,
    /// Output clamp.
    output_band: Option<Band>,
    /// Integral term clamp magnitude.
    max_integral_output: Option<f32>,
    /// Input smoothing.
    filter: Option<ExpSmoothing>,
    /// Accumulated error.
    sum_error: f32,
    /// Last (filtered) input. `None` until the first step.
    last_input: Option<f32>,
}

impl Pid {
    /// Construct a new PID controller.
    ///
    /// The gains are normalized right away. The target is zero with a zero
    /// width band, the scale is one and all clamps and the input filter are
    /// disabled.
    pub fn new(p: f32, i: f32, d: f32) -> Self {
        Self {
            gains: Gains::normalized(p, i, d),
            target: 0.0,
            target_band: Band::point(0.0),
            scale: crate::consts::DEFAULT_SCALE,
            output_band: None,
            max_integral_output: None,
            filter: None,
            sum_error: 0.0,
            last_input: None,
        }
    }

    /// Set all three gains, then normalize.
    pub fn set_gains(&mut self, p: f32, i: f32, d: f32) {
        self.gains = Gains::normalized(p, i, d);
    }

    /// Set the proportional gain, then normalize.
    pub fn set_p(&mut self, p: f32) {
        self.gains = Gains::normalized(p, self.gains.i, self.gains.d);
    }

    /// Set the integral gain, then normalize.
    pub fn set_i(&mut self, i: f32) {
        self.gains = Gains::normalized(self.gains.p, i, self.gains.d);
    }

    /// Set the derivative gain, then normalize.
    pub fn set_d(&mut self, d: f32) {
        self.gains = Gains::normalized(self.gains.p, self.gains.i, d);
    }

    /// Scale the output of the controller.
    ///
    /// Sensor inputs are often normalized while the actuator expects a
    /// different unit. The scale applies to all three terms. A zero scale is
    /// ignored.
    pub fn set_scale(&mut self, scale: f32) {
        if scale == 0.0 {
            debug!("Ignoring zero scale");
            return;
        }

        self.scale = scale;
    }

    /// Restrict the magnitude of the integral term.
    ///
    /// The sign is discarded. Zero disables the clamp.
    pub fn set_max_integral_output(&mut self, max_integral_output: f32) {
        let max_integral_output = max_integral_output.abs();

        self.max_integral_output = if max_integral_output == 0.0 {
            None
        } else {
            Some(max_integral_output)
        };
    }

    /// Set the point target and collapse the acceptance band onto it.
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
        self.target_band = Band::point(target);
    }

    /// Accept any input within `range` of the target.
    ///
    /// A negative range is ignored.
    pub fn set_target_range(&mut self, range: f32) {
        match Band::symmetric(self.target, range) {
            Some(band) => self.target_band = band,
            None => debug!("Ignoring negative target range {}", range),
        }
    }

    /// Accept any input within `[min, max]`.
    ///
    /// No error is produced for inputs inside the band. Inverted bounds are
    /// ignored.
    pub fn set_target_bounds(&mut self, min: f32, max: f32) {
        match Band::new(min, max) {
            Some(band) => self.target_band = band,
            None => debug!("Ignoring inverted target range [{}, {}]", min, max),
        }
    }

    /// Clamp the scaled output to `[min, max]`.
    ///
    /// Equal bounds disable the clamp. Inverted bounds are ignored.
    pub fn set_output_range(&mut self, min: f32, max: f32) {
        match Band::new(min, max) {
            Some(band) if band.min() == band.max() => self.output_band = None,
            Some(band) => self.output_band = Some(band),
            None => debug!("Ignoring inverted output range [{}, {}]", min, max),
        }
    }

    /// Clamp the scaled output to `[-limit, limit]`.
    pub fn set_output_limit(&mut self, limit: f32) {
        self.set_output_range(-limit, limit);
    }

    /// Smooth the input with the given blend gain.
    ///
    /// A gain of zero only trusts the input history, a gain of one only the
    /// current sample. Gains outside `[0, 1]` are ignored.
    pub fn set_input_filter(&mut self, gain: f32) {
        match ExpSmoothing::new(gain) {
            Some(filter) => self.filter = Some(filter),
            None => debug!("Ignoring input filter gain {} outside [0, 1]", gain),
        }
    }

    /// Pass the input through unfiltered.
    pub fn disable_input_filter(&mut self) {
        self.filter = None;
    }

    /// Clear the running state.
    ///
    /// The next step behaves as the first step of a new controller. The
    /// configuration is left untouched.
    pub fn reset(&mut self) {
        self.sum_error = 0.0;
        self.last_input = None;
    }

    /// Normalized gains.
    #[inline]
    pub fn gains(&self) -> Gains {
        self.gains
    }

    /// Point target.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Acceptance band around the target.
    #[inline]
    pub fn target_bounds(&self) -> Band {
        self.target_band
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Output clamp, if enabled.
    #[inline]
    pub fn output_range(&self) -> Option<Band> {
        self.output_band
    }

    /// Integral clamp magnitude, if enabled.
    #[inline]
    pub fn max_integral_output(&self) -> Option<f32> {
        self.max_integral_output
    }

    /// Input filter, if enabled.
    #[inline]
    pub fn input_filter(&self) -> Option<ExpSmoothing> {
        self.filter
    }

    /// Accumulated error.
    #[inline]
    pub fn accumulated_error(&self) -> f32 {
        self.sum_error
    }

    /// Last (filtered) input, `None` before the first step.
    #[inline]
    pub fn last_input(&self) -> Option<f32> {
        self.last_input
    }

    /// Calculate the output of the controller.
    #[inline]
    pub fn compute_output(&mut self, input: f32) -> f32 {
        self.step(input).output
    }

    /// Run one sampling step and return the breakdown of all terms.
    pub fn step(&mut self, input: f32) -> ControlOutput {
        // The first sample seeds the history so the derivative does not kick.
        let last_input = *self.last_input.get_or_insert(input);

        let input = match self.filter {
            Some(filter) => filter.blend(input, last_input),
            None => input,
        };

        let error = if self.target_band.contains(input) {
            0.0
        } else {
            self.target_band.contain(input) - input
        };

        let p = self.scale * self.gains.p * error;

        let d = self.scale * self.gains.d * (input - last_input);
        self.last_input = Some(input);

        let mut i = self.scale * self.gains.i * self.sum_error;
        match self.max_integral_output {
            Some(limit) if !math::within(i, -limit, limit) => {
                i = math::contain(i, -limit, limit);

                // Largest accumulated error the clamped integral term can represent.
                let max_sum_error = limit / (self.gains.i * self.scale);
                self.sum_error =
                    math::contain(self.sum_error + error, -max_sum_error, max_sum_error);
            }
            _ => self.sum_error += error,
        }

        let mut output = p + i + d;

        let mut saturated = false;
        if let Some(band) = self.output_band {
            if !band.contains(output) {
                output = band.contain(output);
                // Drop the history so the next step does not saturate again.
                self.sum_error = error;
                saturated = true;
            }
        }

        let step = ControlOutput {
            input,
            error,
            p,
            i,
            d,
            output,
            saturated,
        };

        trace!("{}", step);

        step
    }
}
