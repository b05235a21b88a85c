// syn.score -- rendering written scores into waveforms
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

use std::f64::consts::PI;

use crate::util;

/// The amplitude curve of a single note, stretched over the whole note.
/// The curve is evaluated on the normalized time of the note,
/// 0.0 being the start and 1.0 the end.
///
/// # Example
///
/// ```
/// use syn_score::envelope::*;
/// let e = Envelope::Linear {
///     start: 1.0,
///     end: 0.0,
/// };
/// let mut samples = vec![1.0; 5];
/// e.shape(&mut samples);
/// assert_eq!(samples, vec![1.0, 0.75, 0.5, 0.25, 0.0]);
///
/// // The default rises fast and decays slowly, starting from silence
/// let e = Envelope::default();
/// assert_eq!(e.level(0.0), 0.0);
/// assert!(e.level(0.1) > e.level(0.9));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Envelope {
    /// Density of a log-normal distribution with shape `sigma` (and unit scale).
    LogNormal { sigma: f64 },
    /// Straight ramp between the two levels.
    Linear { start: f64, end: f64 },
}

impl Envelope {
    pub const DEFAULT_SIGMA: f64 = 1.5;

    /// Amplitude at the normalized time `x`.
    pub fn level(&self, x: f64) -> f64 {
        match *self {
            Envelope::LogNormal { sigma } => {
                // the density tends to zero towards the origin
                if x <= 0.0 {
                    return 0.0;
                }
                let ln_x = x.ln();
                (-(ln_x * ln_x) / (2.0 * sigma * sigma)).exp() / (x * sigma * (2.0 * PI).sqrt())
            }
            Envelope::Linear { start, end } => start + (end - start) * x,
        }
    }

    /// Multiply the samples with the envelope stretched over their whole length.
    pub fn shape(&self, samples: &mut [f64]) {
        let count = samples.len();
        for (sample, x) in samples.iter_mut().zip(util::unit_linspace(count)) {
            *sample *= self.level(x);
        }
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Envelope::LogNormal {
            sigma: Self::DEFAULT_SIGMA,
        }
    }
}
