// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

//! The `regula` library provides a single loop feedback controller.
//!
//! The `Pid` struct evaluates a proportional-integral-derivative control law
//! once per sampling step. On top of the textbook law it supports a dead-band
//! around the target, an integral clamp with anti-windup, output clamping and
//! exponential smoothing of the input signal. The caller owns the sampling
//! cadence; each call to `Pid::compute_output` is one discrete time step.
//!
//! The `config` module provides the serializable `PidConfig` record which
//! validates a full controller configuration up front and builds a `Pid`
//! from it.

pub mod algorithm;
pub mod math;

#[macro_use]
extern crate log;

mod config;
mod controller;
mod error;

pub use self::config::PidConfig;
pub use self::controller::{ControlOutput, Gains, Pid};
pub use self::error::Error;

/// Regula runtime module containing various constants.
pub mod consts {
    /// Regula runtime version.
    ///
    /// # Example
    ///
    /// ```
    /// use regula::consts::VERSION;
    ///
    /// println!("Regula runtime version: {}", VERSION);
    /// ```
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// Default output scale.
    ///
    /// The scale is applied to all three terms. A scale of one leaves the
    /// normalized gains untouched.
    pub const DEFAULT_SCALE: f32 = 1.0;
}
