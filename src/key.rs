// syn.score -- rendering written scores into waveforms
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Key signatures, expressed as per-letter semitone adjustments.

use std::ops;

use crate::note::{NoteError, NoteName};

/// Whether a key signature raises or lowers the letters it names.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Signature {
    Sharp,
    Flat,
    Natural,
}

impl Signature {
    /// Interpret a signature symbol. Only `#` and `b` have an effect,
    /// everything else leaves the letters unchanged.
    pub fn from_symbol(symbol: &str) -> Signature {
        match symbol {
            "#" | "♯" => Signature::Sharp,
            "b" | "♭" => Signature::Flat,
            _ => Signature::Natural,
        }
    }

    pub fn semitones(self) -> i32 {
        match self {
            Signature::Sharp => 1,
            Signature::Flat => -1,
            Signature::Natural => 0,
        }
    }
}

/// Semitone adjustments for each of the seven note letters.
///
/// Every letter always has an entry, defaulting to zero.
///
/// # Examples
///
/// ```
/// use syn_score::key::*;
/// use syn_score::note::NoteName;
///
/// // G major
/// let g_major = KeyConfig::with_signature(vec![NoteName::F], Signature::Sharp);
/// assert_eq!(g_major.factor_for_key(NoteName::F), -3);
/// assert_eq!(g_major.factor_for_key(NoteName::A), 0);
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct KeyConfig {
    adjustments: [i32; 7],
}

impl KeyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// A key where all `letters` are changed according to `signature`.
    pub fn with_signature<I>(letters: I, signature: Signature) -> Self
    where
        I: IntoIterator<Item = NoteName>,
    {
        let mut key = Self::default();
        key.apply_signature(letters, signature);
        key
    }

    /// Build a key from textual letters and a signature symbol.
    /// Letters may be separated by whitespace or commas.
    ///
    /// ```
    /// use syn_score::key::*;
    /// use syn_score::note::NoteName;
    ///
    /// let e_flat_major = KeyConfig::parse_signature("A, B, E", "b").unwrap();
    /// assert_eq!(e_flat_major.adjustment(NoteName::B), -1);
    /// assert!(KeyConfig::parse_signature("H", "#").is_err());
    /// ```
    pub fn parse_signature(letters: &str, signature: &str) -> Result<Self, NoteError> {
        let letters = letters
            .chars()
            .filter(|ch| !ch.is_whitespace() && *ch != ',')
            .map(NoteName::from_char)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::with_signature(
            letters,
            Signature::from_symbol(signature),
        ))
    }

    /// Raise or lower the given letters by one semitone each.
    pub fn apply_signature<I>(&mut self, letters: I, signature: Signature)
    where
        I: IntoIterator<Item = NoteName>,
    {
        for letter in letters {
            self.adjustments[letter.index()] += signature.semitones();
        }
    }

    /// The adjustment of a letter relative to C major.
    pub fn adjustment(&self, letter: NoteName) -> i32 {
        self.adjustments[letter.index()]
    }

    /// Semitones from A of the letter in this key.
    pub fn factor_for_key(&self, letter: NoteName) -> i32 {
        letter.semitones_from_a() + self.adjustment(letter)
    }

    /// Like [`KeyConfig::factor_for_key`], but for a letter that still needs to be checked.
    pub fn factor_for_letter(&self, letter: char) -> Result<i32, NoteError> {
        NoteName::from_char(letter).map(|name| self.factor_for_key(name))
    }

    /// Sum of two keys, where a missing key counts as C major.
    pub fn merge(a: Option<&KeyConfig>, b: Option<&KeyConfig>) -> KeyConfig {
        let a = a.copied().unwrap_or_default();
        let b = b.copied().unwrap_or_default();
        a + b
    }
}

impl ops::Add for KeyConfig {
    type Output = KeyConfig;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl ops::AddAssign for KeyConfig {
    fn add_assign(&mut self, rhs: Self) {
        for (own, other) in self.adjustments.iter_mut().zip(rhs.adjustments.iter()) {
            *own += other;
        }
    }
}
