// syn.score -- rendering written scores into waveforms
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

// modules for making sounds
pub mod envelope;
pub mod key;
pub mod note;
pub mod util;
pub mod wave;

// Building scores
pub mod component;
pub mod music;
pub mod songs;

pub mod output;
