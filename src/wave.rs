// syn.score -- rendering written scores into waveforms
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! This is the namespace for all parts dealing with data in sampled waves.

/// A mono waveform, one amplitude per sample.
pub type Wave = Vec<f32>;

/// Number of samples covered by `duration` quarter notes.
///
/// Partial samples at the end are cut off. The tempo must be positive.
///
/// ```
/// use syn_score::wave::sample_count;
///
/// assert_eq!(sample_count(1.0, 60.0, 44100), 44100);
/// assert_eq!(sample_count(0.5, 120.0, 44100), 11025);
/// ```
pub fn sample_count(duration: f64, beats_per_minute: f64, sample_rate: u32) -> usize {
    debug_assert!(
        beats_per_minute > 0.0,
        "tempo of {} bpm is not positive",
        beats_per_minute
    );
    // float to int casts saturate, so negative durations just yield no samples
    (duration * (60.0 / beats_per_minute) * sample_rate as f64) as usize
}

/// Overlay two waves that may differ in length.
///
/// The shorter wave is added onto the beginning of the longer one,
/// the tail of the longer wave stays as it is.
///
/// ```
/// use syn_score::wave::merge;
///
/// assert_eq!(merge(&[1.0; 5], &[2.0; 3]), vec![3.0, 3.0, 3.0, 1.0, 1.0]);
/// ```
pub fn merge(first: &[f32], second: &[f32]) -> Wave {
    let (long, short) = if first.len() >= second.len() {
        (first, second)
    } else {
        (second, first)
    };
    let mut merged = long.to_vec();
    overlay(&mut merged, short);
    merged
}

/// Same as [`merge`], but reuses the allocation of the longer wave.
pub fn merge_owned(first: Wave, second: Wave) -> Wave {
    let (mut long, short) = if first.len() >= second.len() {
        (first, second)
    } else {
        (second, first)
    };
    overlay(&mut long, &short);
    long
}

/// Add `other` onto the start of `target`, ignoring whatever does not fit.
fn overlay(target: &mut [f32], other: &[f32]) {
    for (sample, add) in target.iter_mut().zip(other.iter()) {
        *sample += add;
    }
}

/// Copy the `f32` samples to little endian bytes, scaled by `gain`.
///
/// Returns the number of samples that were actually copied.
/// Might be less than the number of input samples if the output buffer was not large enough.
pub fn copy_bytes_to(samples: &[f32], gain: f32, bytes: &mut [u8]) -> usize {
    let mut processed = 0;
    for (sample, target) in samples.iter().zip(bytes.chunks_exact_mut(4)) {
        target.copy_from_slice(&(sample * gain).to_le_bytes());
        processed += 1;
    }
    processed
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn duration_to_samples() {
        assert_eq!(sample_count(1.0, 60.0, 44100), 44100);
        assert_eq!(sample_count(2.0, 120.0, 44100), 44100);
        assert_eq!(sample_count(0.25, 60.0, 8000), 2000);
        assert_eq!(sample_count(0.0, 90.0, 44100), 0);
        assert_eq!(sample_count(-1.0, 90.0, 44100), 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "not positive")]
    fn zero_tempo() {
        sample_count(1.0, 0.0, 44100);
    }

    #[test]
    fn merge_overlays_prefix() {
        let ones = vec![1.0; 5];
        let twos = vec![2.0; 3];
        let expected = vec![3.0, 3.0, 3.0, 1.0, 1.0];
        assert_eq!(merge(&ones, &twos), expected);
        assert_eq!(merge(&twos, &ones), expected);
        assert_eq!(merge_owned(twos.clone(), ones.clone()), expected);
        assert_eq!(merge_owned(ones, twos), expected);
    }

    #[test]
    fn merge_equal_and_empty() {
        assert_eq!(merge(&[1.0, -1.0], &[0.5, 0.5]), vec![1.5, -0.5]);
        assert_eq!(merge(&[], &[0.25]), vec![0.25]);
        assert!(merge(&[], &[]).is_empty());
        assert_eq!(merge_owned(Vec::new(), vec![1.0, 2.0]), vec![1.0, 2.0]);
    }

    #[test]
    fn bytes_are_little_endian() {
        let mut bytes = vec![0u8; 8];
        assert_eq!(copy_bytes_to(&[1.0, -0.5, 0.25], 0.5, &mut bytes), 2);
        assert_eq!(&bytes[0..4], &0.5f32.to_le_bytes());
        assert_eq!(&bytes[4..8], &(-0.25f32).to_le_bytes());
    }
}
