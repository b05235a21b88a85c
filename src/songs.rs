// syn.score -- rendering written scores into waveforms
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! A few well known pieces, mostly for trying things out.

use std::fmt;
use std::str::FromStr;

use crate::component::{rest, tone, Chord, Series};
use crate::key::KeyConfig;
use crate::music::Music;
use crate::note::NoteError;

/// The songs that come with the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SongName {
    AmazingGrace,
    Canon,
    Jupiter,
}

impl SongName {
    pub const ALL: [SongName; 3] = [SongName::AmazingGrace, SongName::Canon, SongName::Jupiter];

    /// Build the song at its usual tempo.
    pub fn build(self) -> Result<Music, NoteError> {
        match self {
            SongName::AmazingGrace => amazing_grace(120.0),
            SongName::Canon => canon(90.0),
            SongName::Jupiter => jupiter(80.0),
        }
    }
}

impl FromStr for SongName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "amazing-grace" => Ok(SongName::AmazingGrace),
            "canon" => Ok(SongName::Canon),
            "jupiter" => Ok(SongName::Jupiter),
            _ => Err(format!(
                "unknown song {:?}, expected one of amazing-grace, canon, jupiter",
                s
            )),
        }
    }
}

impl fmt::Display for SongName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SongName::AmazingGrace => "amazing-grace",
            SongName::Canon => "canon",
            SongName::Jupiter => "jupiter",
        };
        f.write_str(name)
    }
}

/// The first line of Amazing Grace, in G major.
pub fn amazing_grace(beats_per_minute: f64) -> Result<Music, NoteError> {
    // the quarter under the two eighths is its own voice
    let mut eighths = Series::new();
    eighths.add_tone(&["b4"], 0.5)?.add_tone(&["g4"], 0.5)?;
    let mut turn = Chord::new();
    turn.add(eighths).add(tone(&["d4"], 1.0)?);

    let mut part = Series::new().with_key(KeyConfig::parse_signature("F", "#")?);
    part.add_tone(&["d4", "b3"], 1.0)?
        .add_tone(&["g4", "b3"], 2.0)?
        .add(turn)
        .add_tone(&["b4", "d4"], 2.0)?
        .add_tone(&["a4", "c4"], 1.0)?
        .add_tone(&["g4", "b3"], 2.0)?
        .add_tone(&["e4", "c4"], 1.0)?
        .add_tone(&["d4", "b3"], 2.0)?;

    Ok(Music::new(part).with_bpm(beats_per_minute))
}

/// Pachelbel's canon in D, treble and bass played together.
pub fn canon(beats_per_minute: f64) -> Result<Music, NoteError> {
    let mut treble = Series::new().with_key(KeyConfig::parse_signature("C F", "#")?);
    let treble_chords = [
        ["f4", "d4"],
        ["e4", "c4"],
        ["d4", "b3"],
        ["c4", "a3"],
        ["b3", "g3"],
        ["a3", "f3"],
        ["b3", "g3"],
        ["c4", "a3"],
        ["d5", "f4"],
        ["c5", "a4"],
        ["b4", "d4"],
        ["a4", "f4"],
        ["g4", "b3"],
        ["f4", "d4"],
        ["g4", "b3"],
        ["a4", "c4"],
    ];
    for chord in treble_chords.iter() {
        treble.add_tone(chord, 2.0)?;
    }

    let mut bass = Series::new().with_key(KeyConfig::parse_signature("A E", "#")?);
    for scale in &["d3", "a2", "b2", "f3", "g3", "d3", "g3", "f3"] {
        bass.add_tone(&[scale], 2.0)?;
    }
    let quarters = [
        "d3", "f3", "a3", "g3", "f3", "d3", "f3", "e3", "d3", "b2", "d3", "a2", "g2", "b2", "c3",
        "a2",
    ];
    for scale in quarters.iter() {
        bass.add_tone(&[scale], 1.0)?;
    }
    bass.add(rest(1.0));

    let mut score = Chord::new();
    score.add(treble).add(bass);

    Ok(Music::new(score).with_bpm(beats_per_minute))
}

/// The hymn from Holst's Jupiter, in E flat major.
pub fn jupiter(beats_per_minute: f64) -> Result<Music, NoteError> {
    let mut part = Series::new().with_key(KeyConfig::parse_signature("A B E", "b")?);
    part.add_tone(&["g3"], 0.5)?
        .add_tone(&["b3"], 0.5)?
        .add_tone(&["c4", "a3"], 1.0)?
        .add_tone(&["c4"], 0.5)?
        .add_tone(&["e4"], 0.5)?
        .add_tone(&["d4", "a3"], 0.75)?
        .add_tone(&["b3"], 0.25)?
        .add_tone(&["e4", "b3"], 0.5)?
        .add_tone(&["f4"], 0.5)?
        .add_tone(&["e4"], 1.0)?
        .add_tone(&["d4", "b3"], 1.0)?
        .add_tone(&["c4", "a3"], 0.5)?
        .add_tone(&["d4"], 0.5)?
        .add_tone(&["c4"], 1.0)?
        .add_tone(&["b3", "f3"], 1.0)?
        .add_tone(&["g3", "e3"], 2.0)?
        .add_rest(1.0);

    Ok(Music::new(part).with_bpm(beats_per_minute))
}
