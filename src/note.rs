// syn.score -- rendering written scores into waveforms
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Definitions of what a pitch is, and how it is written down.

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use snafu::Snafu;

use crate::key::KeyConfig;
use crate::util;

/// Frequency of the reference pitch A4 in Hz.
pub const REFERENCE_FREQUENCY: f64 = 440.0;

/// Octave of the reference pitch.
pub const REFERENCE_OCTAVE: i32 = 4;

/// Possible errors when reading notes and key signatures.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum NoteError {
    #[snafu(display("Invalid scale format {:?}, expected e.g. \"c#5\"", scale))]
    InvalidScaleFormat { scale: String },
    #[snafu(display("Invalid key {:?}, expected one of A-G", key))]
    InvalidKey { key: String },
}

/// The name of a note in standard notation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NoteName {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteName {
    /// All note names, in the order of their position within an octave.
    pub const ALL: [NoteName; 7] = [
        NoteName::C,
        NoteName::D,
        NoteName::E,
        NoteName::F,
        NoteName::G,
        NoteName::A,
        NoteName::B,
    ];

    /// Position of the name in [`NoteName::ALL`], usable as a table index.
    pub fn index(self) -> usize {
        match self {
            NoteName::C => 0,
            NoteName::D => 1,
            NoteName::E => 2,
            NoteName::F => 3,
            NoteName::G => 4,
            NoteName::A => 5,
            NoteName::B => 6,
        }
    }

    /// Distance in semitones from the A of the same octave.
    ///
    /// ```
    /// use syn_score::note::NoteName;
    ///
    /// assert_eq!(NoteName::A.semitones_from_a(), 0);
    /// assert_eq!(NoteName::C.semitones_from_a(), -9);
    /// assert_eq!(NoteName::B.semitones_from_a(), 2);
    /// ```
    pub fn semitones_from_a(self) -> i32 {
        match self {
            NoteName::C => -9,
            NoteName::D => -7,
            NoteName::E => -5,
            NoteName::F => -4,
            NoteName::G => -2,
            NoteName::A => 0,
            NoteName::B => 2,
        }
    }

    /// Read a note letter, ignoring case.
    ///
    /// ```
    /// use syn_score::note::*;
    ///
    /// assert_eq!(NoteName::from_char('f'), Ok(NoteName::F));
    /// assert!(NoteName::from_char('H').is_err());
    /// ```
    pub fn from_char(ch: char) -> Result<NoteName, NoteError> {
        let name = match ch.to_ascii_uppercase() {
            'A' => NoteName::A,
            'B' => NoteName::B,
            'C' => NoteName::C,
            'D' => NoteName::D,
            'E' => NoteName::E,
            'F' => NoteName::F,
            'G' => NoteName::G,
            _ => {
                return Err(NoteError::InvalidKey {
                    key: ch.to_string(),
                })
            }
        };
        Ok(name)
    }
}

impl TryFrom<char> for NoteName {
    type Error = NoteError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        NoteName::from_char(ch)
    }
}

impl FromStr for NoteName {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => NoteName::from_char(ch),
            _ => Err(NoteError::InvalidKey { key: s.to_owned() }),
        }
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            NoteName::C => "C",
            NoteName::D => "D",
            NoteName::E => "E",
            NoteName::F => "F",
            NoteName::G => "G",
            NoteName::A => "A",
            NoteName::B => "B",
        };
        f.write_str(letter)
    }
}

/// Any offset applied to a note in standard notation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Accidental {
    /// The note is a half-tone lower then indicated by its name.
    Flat,
    /// The note is left unchanged.
    Base,
    /// The note is a half-tone higher then indicated by its name.
    Sharp,
}

impl Accidental {
    pub fn semitones(self) -> i32 {
        match self {
            Accidental::Flat => -1,
            Accidental::Base => 0,
            Accidental::Sharp => 1,
        }
    }
}

/// A pitch as written in a score, e.g. `c#5`.
///
/// The pitch is only turned into a frequency when a key is known,
/// since the key signature may still move the note by some semitones.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Pitch {
    pub name: NoteName,
    pub accidental: Accidental,
    pub octave: u32,
}

impl Pitch {
    pub fn new(name: NoteName, accidental: Accidental, octave: u32) -> Self {
        Self {
            name,
            accidental,
            octave,
        }
    }

    /// Parse a name string of the format `<letter><accidental><octave>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use syn_score::note::*;
    ///
    /// assert_eq!(Pitch::parse("a4"), Ok(Pitch::new(NoteName::A, Accidental::Base, 4)));
    /// assert_eq!(Pitch::parse("C#5"), Ok(Pitch::new(NoteName::C, Accidental::Sharp, 5)));
    /// assert_eq!(Pitch::parse("gb2"), Ok(Pitch::new(NoteName::G, Accidental::Flat, 2)));
    /// assert!(Pitch::parse("h4").is_err());
    /// assert!(Pitch::parse("c").is_err());
    /// ```
    pub fn parse(scale: &str) -> Result<Pitch, NoteError> {
        let invalid = || NoteError::InvalidScaleFormat {
            scale: scale.to_owned(),
        };

        let mut chars = scale.chars();
        let name = chars
            .next()
            .and_then(|ch| NoteName::from_char(ch).ok())
            .ok_or_else(invalid)?;

        let rest = chars.as_str();
        let (accidental, octave_str) = if let Some(octave) = rest.strip_prefix('#') {
            (Accidental::Sharp, octave)
        } else if let Some(octave) = rest.strip_prefix('b') {
            (Accidental::Flat, octave)
        } else {
            (Accidental::Base, rest)
        };

        // `parse` alone would also accept a leading '+'
        if octave_str.is_empty() || !octave_str.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(invalid());
        }
        // octaves are kept within `i32` so frequency computations cannot overflow
        let octave: i32 = octave_str.parse().map_err(|_| invalid())?;

        Ok(Pitch::new(name, accidental, octave as u32))
    }

    /// Semitones from the A of the same octave, after applying the key.
    pub fn semitones(&self, key: &KeyConfig) -> i32 {
        key.factor_for_key(self.name) + self.accidental.semitones()
    }

    /// Frequency of this pitch in Hz when played in the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// use syn_score::key::KeyConfig;
    /// use syn_score::note::Pitch;
    ///
    /// let key = KeyConfig::default();
    /// assert_eq!(Pitch::parse("a4").unwrap().frequency(&key), 440.0);
    /// assert_eq!(Pitch::parse("a5").unwrap().frequency(&key), 880.0);
    /// assert!((Pitch::parse("c#5").unwrap().frequency(&key) - 554.365).abs() < 1e-3);
    /// ```
    pub fn frequency(&self, key: &KeyConfig) -> f64 {
        // Whole octaves only scale by powers of two, which keeps the octave relation exact.
        let octaves = i64::from(self.octave) - i64::from(REFERENCE_OCTAVE);
        let octaves = octaves.min(i64::from(i32::MAX)) as i32;
        REFERENCE_FREQUENCY
            * 2.0f64.powi(octaves)
            * util::from_semitones(self.semitones(key) as f64)
    }
}

impl FromStr for Pitch {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pitch::parse(s)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let accidental = match self.accidental {
            Accidental::Flat => "b",
            Accidental::Base => "",
            Accidental::Sharp => "#",
        };
        write!(f, "{}{}{}", self.name, accidental, self.octave)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn freq(scale: &str) -> f64 {
        Pitch::parse(scale).unwrap().frequency(&KeyConfig::default())
    }

    #[test]
    fn parse_valid() {
        assert_eq!(
            Pitch::parse("D3").unwrap(),
            Pitch::new(NoteName::D, Accidental::Base, 3)
        );
        assert_eq!(
            Pitch::parse("bb3").unwrap(),
            Pitch::new(NoteName::B, Accidental::Flat, 3)
        );
        assert_eq!(
            Pitch::parse("f#12").unwrap(),
            Pitch::new(NoteName::F, Accidental::Sharp, 12)
        );
        assert_eq!(
            Pitch::parse("c0").unwrap(),
            Pitch::new(NoteName::C, Accidental::Base, 0)
        );
    }

    #[test]
    fn parse_invalid() {
        let scales = [
            "h4", "c", "c#", "", "a-1", "a+1", "a4x", "a##4", "ab", "4", " a4", "a2147483648",
            "c#3000000000",
        ];
        for scale in scales.iter() {
            assert_eq!(
                Pitch::parse(scale),
                Err(NoteError::InvalidScaleFormat {
                    scale: scale.to_string()
                }),
                "{:?} should not parse",
                scale
            );
        }
    }

    #[test]
    fn huge_octave() {
        let key = KeyConfig::default();
        let highest = Pitch::parse("a2147483647").unwrap();
        assert_eq!(highest.octave, i32::MAX as u32);
        assert_eq!(highest.frequency(&key), f64::INFINITY);
        // built directly, the octave may exceed what parsing accepts
        let beyond = Pitch::new(NoteName::A, Accidental::Base, u32::MAX);
        assert_eq!(beyond.frequency(&key), f64::INFINITY);
    }

    #[test]
    fn invalid_key_letter() {
        assert_eq!(NoteName::try_from('c'), Ok(NoteName::C));
        assert_eq!(
            NoteName::try_from('x'),
            Err(NoteError::InvalidKey { key: "x".into() })
        );
        assert_eq!(
            NoteName::from_char('H'),
            Err(NoteError::InvalidKey { key: "H".into() })
        );
        assert_eq!("g".parse::<NoteName>(), Ok(NoteName::G));
        assert!("GA".parse::<NoteName>().is_err());
        assert!("".parse::<NoteName>().is_err());
    }

    #[test]
    fn reference_frequencies() {
        assert_eq!(freq("a4"), 440.0);
        assert_eq!(freq("A5"), 880.0);
        assert_eq!(freq("a3"), 220.0);
        assert!((freq("c#5") - 554.365).abs() < 1e-3);
        assert!((freq("c4") - 261.626).abs() < 1e-3);
    }

    /// One octave up always doubles the frequency.
    #[test]
    fn octave_doubles() {
        let key = KeyConfig::default();
        for &name in NoteName::ALL.iter() {
            for &accidental in &[Accidental::Flat, Accidental::Base, Accidental::Sharp] {
                for octave in 0..9 {
                    let low = Pitch::new(name, accidental, octave).frequency(&key);
                    let high = Pitch::new(name, accidental, octave + 1).frequency(&key);
                    assert!(high > low);
                    assert_eq!(high, 2.0 * low);
                }
            }
        }
    }

    #[test]
    fn accidentals_shift_by_semitone() {
        assert!((freq("c#4") - freq("db4")).abs() < 1e-9);
        assert!((freq("e#4") - freq("f4")).abs() < 1e-9);
        assert!((freq("cb5") - freq("b4")).abs() < 1e-9);
    }

    #[test]
    fn key_moves_pitch() {
        let key = KeyConfig::with_signature(vec![NoteName::F], crate::key::Signature::Sharp);
        let f4 = Pitch::parse("f4").unwrap();
        assert_eq!(f4.frequency(&key), freq("f#4"));
    }

    #[test]
    fn display_roundtrip() {
        for scale in &["c#5", "A4", "gb0"] {
            let pitch = Pitch::parse(scale).unwrap();
            assert_eq!(pitch.to_string().parse::<Pitch>().unwrap(), pitch);
        }
    }
}
