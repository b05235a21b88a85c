// syn.score -- rendering written scores into waveforms
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Utility functions that I don't know where to put else

/// Compute a factor measured in semitones (one octave consists of 12 semitones)
///
/// # Example
///
/// ```
/// # use syn_score::util::*;
///
/// assert_eq!(from_semitones(12.0), 2.0);
/// assert_eq!(from_semitones(-24.0), 0.25);
/// ```
pub fn from_semitones(semitones: f64) -> f64 {
    2.0f64.powf(semitones / 12.0)
}

/// `count` evenly spaced points covering the closed interval [0, 1].
/// A single point is placed at zero.
///
/// # Example
///
/// ```
/// # use syn_score::util::*;
///
/// assert_eq!(unit_linspace(5).collect::<Vec<_>>(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(unit_linspace(1).collect::<Vec<_>>(), vec![0.0]);
/// assert_eq!(unit_linspace(0).count(), 0);
/// ```
pub fn unit_linspace(count: usize) -> impl Iterator<Item = f64> {
    let step = if count > 1 {
        1.0 / (count - 1) as f64
    } else {
        0.0
    };
    (0..count).map(move |i| {
        // pin the end point, `i * step` may be off by one ulp
        if count > 1 && i == count - 1 {
            1.0
        } else {
            i as f64 * step
        }
    })
}
