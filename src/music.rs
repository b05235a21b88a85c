// syn.score -- rendering written scores into waveforms
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Translate a complete score into a waveform

use std::io;

use log::info;

use crate::component::MusicComponent;
use crate::key::KeyConfig;
use crate::output::{self, SoxTarget};
use crate::wave::Wave;

/// A score together with the tempo and sample rate it should be rendered at.
#[derive(Debug, Clone, PartialEq)]
pub struct Music {
    pub component: MusicComponent,
    /// Quarter notes per minute.
    pub beats_per_minute: f64,
    /// Samples per second.
    pub sample_rate: u32,
}

impl Music {
    pub const DEFAULT_BPM: f64 = 90.0;
    pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

    pub fn new<C: Into<MusicComponent>>(component: C) -> Self {
        Self {
            component: component.into(),
            beats_per_minute: Self::DEFAULT_BPM,
            sample_rate: Self::DEFAULT_SAMPLE_RATE,
        }
    }

    /// Set the tempo in quarter notes per minute, which must be positive.
    pub fn with_bpm(mut self, beats_per_minute: f64) -> Self {
        self.beats_per_minute = beats_per_minute;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Length of the score in quarter notes.
    pub fn duration(&self) -> f64 {
        self.component.duration()
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration() * 60.0 / self.beats_per_minute
    }

    /// Render the whole score, starting out in C major.
    pub fn render(&self) -> Wave {
        info!(
            "rendering at {} bpm at {} Hz",
            self.beats_per_minute, self.sample_rate
        );
        let wave = self.component.render(
            self.beats_per_minute,
            self.sample_rate,
            &KeyConfig::default(),
        );
        info!(
            "total length {} samples ({:.2} seconds)",
            wave.len(),
            wave.len() as f64 / self.sample_rate as f64
        );
        wave
    }

    /// Render the score and send it to sox, scaled by `volume`.
    pub fn play(&self, volume: f32, target: SoxTarget) -> io::Result<()> {
        let wave = self.render();
        output::write_mono(&wave, self.sample_rate, volume, target)
    }
}
