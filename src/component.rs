// syn.score -- rendering written scores into waveforms
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! The building blocks of a score.
//!
//! A score is a tree: notes and rests are the leaves, chords play their children
//! at the same time and series play them one after another. Chords and series may
//! carry a key of their own, which is added to the key of the surrounding part.
//!
//! ```
//! use syn_score::component::*;
//! use syn_score::key::KeyConfig;
//!
//! let mut melody = Series::new().with_key(KeyConfig::parse_signature("F", "#")?);
//! melody.add_tone(&["d4", "b3"], 1.0)?.add_tone(&["g4", "b3"], 2.0)?.add_rest(1.0);
//!
//! let wave = MusicComponent::from(melody).render(60.0, 8000, &KeyConfig::default());
//! assert_eq!(wave.len(), 4 * 8000);
//! # Ok::<(), syn_score::note::NoteError>(())
//! ```

use std::f64::consts::PI;

use log::trace;

use crate::envelope::Envelope;
use crate::key::KeyConfig;
use crate::note::{NoteError, Pitch};
use crate::wave::{self, Wave};

/// Any part of a score that can be turned into sound.
#[derive(Debug, Clone, PartialEq)]
pub enum MusicComponent {
    Note(Note),
    Rest(Rest),
    Chord(Chord),
    Series(Series),
}

impl MusicComponent {
    /// Render the component at the given tempo (in quarter notes per minute) and sample rate.
    /// `key` is the key of the surrounding part of the score.
    pub fn render(&self, beats_per_minute: f64, sample_rate: u32, key: &KeyConfig) -> Wave {
        match self {
            MusicComponent::Note(note) => note.render(beats_per_minute, sample_rate, key),
            MusicComponent::Rest(rest) => rest.render(beats_per_minute, sample_rate),
            MusicComponent::Chord(chord) => chord.render(beats_per_minute, sample_rate, key),
            MusicComponent::Series(series) => series.render(beats_per_minute, sample_rate, key),
        }
    }

    /// Length of the component in quarter notes.
    pub fn duration(&self) -> f64 {
        match self {
            MusicComponent::Note(note) => note.length,
            MusicComponent::Rest(rest) => rest.length,
            MusicComponent::Chord(chord) => chord.duration(),
            MusicComponent::Series(series) => series.duration(),
        }
    }
}

impl From<Note> for MusicComponent {
    fn from(note: Note) -> Self {
        MusicComponent::Note(note)
    }
}

impl From<Rest> for MusicComponent {
    fn from(rest: Rest) -> Self {
        MusicComponent::Rest(rest)
    }
}

impl From<Chord> for MusicComponent {
    fn from(chord: Chord) -> Self {
        MusicComponent::Chord(chord)
    }
}

impl From<Series> for MusicComponent {
    fn from(series: Series) -> Self {
        MusicComponent::Series(series)
    }
}

/// A single tone, sounding as a sine wave.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pitch: Pitch,
    /// Duration in quarter notes.
    length: f64,
    envelope: Envelope,
}

impl Note {
    /// Parse a note such as `"c#5"` lasting `length` quarter notes.
    pub fn new(scale: &str, length: f64) -> Result<Self, NoteError> {
        Ok(Self::from_pitch(Pitch::parse(scale)?, length))
    }

    pub fn from_pitch(pitch: Pitch, length: f64) -> Self {
        Self {
            pitch,
            length,
            envelope: Envelope::default(),
        }
    }

    /// Use a different amplitude curve for this note.
    pub fn with_envelope(mut self, envelope: Envelope) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn pitch(&self) -> Pitch {
        self.pitch
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn envelope(&self) -> Envelope {
        self.envelope
    }

    pub fn render(&self, beats_per_minute: f64, sample_rate: u32, key: &KeyConfig) -> Wave {
        let frequency = self.pitch.frequency(key);
        let count = wave::sample_count(self.length, beats_per_minute, sample_rate);
        let step = 2.0 * PI * frequency / sample_rate as f64;

        // every note starts at phase zero
        let mut samples: Vec<f64> = (0..count).map(|t| (step * t as f64).sin()).collect();
        self.envelope.shape(&mut samples);
        samples.into_iter().map(|s| s as f32).collect()
    }
}

/// Silence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rest {
    /// Duration in quarter notes.
    length: f64,
}

impl Rest {
    pub fn new(length: f64) -> Self {
        Self { length }
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn render(&self, beats_per_minute: f64, sample_rate: u32) -> Wave {
        vec![0.0; wave::sample_count(self.length, beats_per_minute, sample_rate)]
    }
}

/// Components sounding at the same time.
/// Despite the name, this is not limited to notes, e.g. two melodies can be played together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chord {
    components: Vec<MusicComponent>,
    key: Option<KeyConfig>,
}

impl Chord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_components(components: Vec<MusicComponent>) -> Self {
        Self {
            components,
            key: None,
        }
    }

    /// Set the key for all components of the chord, on top of the surrounding key.
    pub fn with_key(mut self, key: KeyConfig) -> Self {
        self.key = Some(key);
        self
    }

    pub fn add<C: Into<MusicComponent>>(&mut self, component: C) -> &mut Self {
        self.components.push(component.into());
        self
    }

    pub fn components(&self) -> &[MusicComponent] {
        &self.components
    }

    pub fn key(&self) -> Option<&KeyConfig> {
        self.key.as_ref()
    }

    /// The chord lasts as long as its longest component.
    pub fn duration(&self) -> f64 {
        self.components
            .iter()
            .map(MusicComponent::duration)
            .fold(0.0, f64::max)
    }

    pub fn render(&self, beats_per_minute: f64, sample_rate: u32, key: &KeyConfig) -> Wave {
        let key = KeyConfig::merge(self.key.as_ref(), Some(key));
        trace!("chord of {} components", self.components.len());
        self.components
            .iter()
            .map(|c| c.render(beats_per_minute, sample_rate, &key))
            .fold(Wave::new(), wave::merge_owned)
    }
}

/// Components sounding one after another, e.g. a melody.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    components: Vec<MusicComponent>,
    key: Option<KeyConfig>,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_components(components: Vec<MusicComponent>) -> Self {
        Self {
            components,
            key: None,
        }
    }

    /// Set the key for all components of the series, on top of the surrounding key.
    pub fn with_key(mut self, key: KeyConfig) -> Self {
        self.key = Some(key);
        self
    }

    pub fn add<C: Into<MusicComponent>>(&mut self, component: C) -> &mut Self {
        self.components.push(component.into());
        self
    }

    /// Append the given notes, played together for `length` quarter notes.
    pub fn add_tone<S: AsRef<str>>(
        &mut self,
        scales: &[S],
        length: f64,
    ) -> Result<&mut Self, NoteError> {
        let chord = tone(scales, length)?;
        Ok(self.add(chord))
    }

    pub fn add_rest(&mut self, length: f64) -> &mut Self {
        self.add(Rest::new(length))
    }

    pub fn components(&self) -> &[MusicComponent] {
        &self.components
    }

    pub fn key(&self) -> Option<&KeyConfig> {
        self.key.as_ref()
    }

    pub fn duration(&self) -> f64 {
        self.components.iter().map(MusicComponent::duration).sum()
    }

    pub fn render(&self, beats_per_minute: f64, sample_rate: u32, key: &KeyConfig) -> Wave {
        let key = KeyConfig::merge(self.key.as_ref(), Some(key));
        trace!("series of {} components", self.components.len());
        let waves: Vec<Wave> = self
            .components
            .iter()
            .map(|c| c.render(beats_per_minute, sample_rate, &key))
            .collect();
        waves.concat()
    }
}

/// A chord of notes all lasting `length` quarter notes.
///
/// ```
/// use syn_score::component::tone;
///
/// let c_major = tone(&["c4", "e4", "g4"], 1.0).unwrap();
/// assert_eq!(c_major.components().len(), 3);
/// assert!(tone(&["c4", "x4"], 1.0).is_err());
/// ```
pub fn tone<S: AsRef<str>>(scales: &[S], length: f64) -> Result<Chord, NoteError> {
    let notes = scales
        .iter()
        .map(|scale| Note::new(scale.as_ref(), length).map(MusicComponent::from))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Chord::from_components(notes))
}

/// A rest lasting `length` quarter notes.
pub fn rest(length: f64) -> Rest {
    Rest::new(length)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::key::Signature;
    use crate::note::NoteName;

    const RATE: u32 = 8000;

    fn note(scale: &str, length: f64) -> MusicComponent {
        Note::new(scale, length).unwrap().into()
    }

    fn render(component: &MusicComponent) -> Wave {
        component.render(120.0, RATE, &KeyConfig::default())
    }

    #[test]
    fn rest_is_silent() {
        let wave = Rest::new(1.5).render(60.0, RATE);
        assert_eq!(wave.len(), 12000);
        assert!(wave.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn note_length_and_shape() {
        let wave = note("a4", 1.0).render(60.0, 44100, &KeyConfig::default());
        assert_eq!(wave.len(), 44100);
        // phase and envelope both start at zero
        assert_eq!(wave[0], 0.0);
        assert!(wave.iter().all(|s| s.abs() <= 1.0));
        assert!(wave.iter().any(|s| s.abs() > 0.5));
    }

    #[test]
    fn note_is_a_sine() {
        // with a flat envelope, a4 at a rate of 1760 Hz has four samples per period
        let note = Note::new("a4", 1.0)
            .unwrap()
            .with_envelope(Envelope::Linear { start: 1.0, end: 1.0 });
        assert_eq!(note.pitch(), Pitch::parse("a4").unwrap());
        assert_eq!(note.envelope(), Envelope::Linear { start: 1.0, end: 1.0 });
        assert_eq!(Note::new("a4", 1.0).unwrap().envelope(), Envelope::default());
        let wave = note.render(60.0, 1760, &KeyConfig::default());
        assert_eq!(wave.len(), 1760);
        assert!((wave[1] - 1.0).abs() < 1e-6);
        assert!(wave[2].abs() < 1e-6);
        assert!((wave[3] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn series_concatenates() {
        let series = Series::from_components(vec![rest(1.0).into(), rest(1.0).into()]);
        let series_wave = render(&series.into());
        assert_eq!(series_wave.len(), render(&rest(2.0).into()).len());

        let mut melody = Series::new();
        melody.add(Note::new("c4", 0.5).unwrap()).add_rest(0.25);
        melody.add_tone(&["e4"], 1.0).unwrap();
        let first = render(&note("c4", 0.5));
        let last = render(&note("e4", 1.0));
        let wave = render(&melody.into());
        assert_eq!(wave.len(), first.len() + 1000 + last.len());
        assert_eq!(&wave[..first.len()], &first[..]);
        assert!(wave[first.len()..first.len() + 1000].iter().all(|&s| s == 0.0));
        assert_eq!(&wave[first.len() + 1000..], &last[..]);
    }

    #[test]
    fn chord_overlays() {
        let chord = tone(&["c4", "e4"], 1.0).unwrap();
        let wave = render(&chord.into());
        let c = render(&note("c4", 1.0));
        let e = render(&note("e4", 1.0));
        assert_eq!(wave, wave::merge(&c, &e));

        let mut uneven = Chord::new();
        uneven.add(Note::new("c4", 2.0).unwrap()).add(rest(3.0));
        assert_eq!(render(&uneven.into()).len(), 3 * 4000);
    }

    #[test]
    fn empty_composites() {
        assert!(render(&Chord::new().into()).is_empty());
        assert!(render(&Series::new().into()).is_empty());
        assert_eq!(Chord::new().duration(), 0.0);
    }

    #[test]
    fn single_child_chord_is_transparent() {
        let chord = Chord::from_components(vec![note("g3", 0.75)]);
        assert_eq!(render(&chord.into()), render(&note("g3", 0.75)));
    }

    #[test]
    fn key_applies_to_children() {
        let key = KeyConfig::with_signature(vec![NoteName::F], Signature::Sharp);
        let mut series = Series::new().with_key(key);
        series.add_tone(&["f4"], 1.0).unwrap();
        assert_eq!(series.key(), Some(&key));

        assert_eq!(render(&series.into()), render(&note("f#4", 1.0)));
    }

    #[test]
    fn nested_keys_add_up() {
        let sharp = KeyConfig::with_signature(vec![NoteName::C], Signature::Sharp);
        let inner = Chord::from_components(vec![note("c4", 1.0)]).with_key(sharp);
        assert_eq!(inner.key(), Some(&sharp));
        assert_eq!(Chord::new().key(), None);
        let outer = Series::from_components(vec![inner.into()]).with_key(sharp);

        assert_eq!(render(&outer.into()), render(&note("d4", 1.0)));
    }

    #[test]
    fn inherited_key_is_used() {
        let key = KeyConfig::with_signature(vec![NoteName::B, NoteName::E], Signature::Flat);
        let series = Series::from_components(vec![note("b3", 1.0), note("e4", 1.0)]);
        let expected = Series::from_components(vec![note("bb3", 1.0), note("eb4", 1.0)]);
        assert_eq!(
            MusicComponent::from(series).render(120.0, RATE, &key),
            render(&expected.into())
        );
    }

    #[test]
    fn durations() {
        let mut series = Series::new();
        series.add_tone(&["c4", "e4"], 2.0).unwrap().add_rest(0.5);
        let mut chord = Chord::new();
        chord.add(series.clone()).add(note("g4", 1.0));
        assert_eq!(MusicComponent::from(series).duration(), 2.5);
        assert_eq!(chord.duration(), 2.5);
    }

    #[test]
    fn add_tone_rejects_bad_scales() {
        let mut series = Series::new();
        assert_eq!(
            series.add_tone(&["c4", "h4"], 1.0).err(),
            Some(NoteError::InvalidScaleFormat { scale: "h4".into() })
        );
        assert!(series.components().is_empty());
    }
}
