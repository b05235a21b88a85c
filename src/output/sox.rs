// syn.score -- rendering written scores into waveforms
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Easy interface for getting sound to play using a sox subprocess.

use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::{debug, error};

use crate::wave;

/// Where sox should send the audio.
#[derive(Debug, Clone, Copy)]
pub enum SoxTarget<'a> {
    /// Play on the default audio device.
    Play,
    /// Write to a file, in any format sox derives from the extension.
    File(&'a Path),
}

/// Samples written to sox in one go.
const CHUNK_SAMPLES: usize = 4410;

/// Arguments describing the raw mono `f32` stream on stdin.
fn input_args(sample_rate: u32) -> Vec<String> {
    vec![
        "-R".into(), // make the output reproducible
        "--channels".into(),
        "1".into(),
        "--rate".into(),
        sample_rate.to_string(),
        "--type".into(),
        "f32".into(),
        "/dev/stdin".into(),
    ]
}

/// Location of the `play` and `sox` binaries.
fn sox_binaries() -> (PathBuf, PathBuf) {
    // For properly recording the sox dependency on nix:
    if let Some(sox_bin) = option_env!("NIX_SOX_BIN") {
        debug!("using sox from nix store {}", sox_bin);
        (Path::new(sox_bin).join("play"), Path::new(sox_bin).join("sox"))
    } else {
        ("play".into(), "sox".into())
    }
}

/// Stream a mono wave to sox, scaling every sample by `gain`.
/// Returns once sox has exited.
pub fn write_mono(samples: &[f32], sample_rate: u32, gain: f32, target: SoxTarget) -> io::Result<()> {
    let (play, sox) = sox_binaries();
    let args = input_args(sample_rate);

    let mut player = match target {
        SoxTarget::Play => Command::new(&play)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?,
        SoxTarget::File(outfile) => Command::new(&sox)
            .args(&args)
            .arg(outfile)
            .stdin(Stdio::piped())
            .spawn()?,
    };
    debug!("spawned sox for {:?}", target);

    let mut audio_stream = player
        .stdin
        .take()
        .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "sox has no stdin"))?;

    let mut buffer = vec![0u8; CHUNK_SAMPLES * std::mem::size_of::<f32>()];
    let mut status = Ok(());
    for chunk in samples.chunks(CHUNK_SAMPLES) {
        let n = wave::copy_bytes_to(chunk, gain, &mut buffer);
        status = audio_stream.write_all(&buffer[..n * std::mem::size_of::<f32>()]);
        if let Err(err) = &status {
            error!("Failed to write audio to sox stream: {}", err);
            break;
        }
    }

    // sox exits once the input stream is closed
    drop(audio_stream);
    let exit = player.wait()?;
    status?;
    if exit.success() {
        Ok(())
    } else {
        Err(io::Error::new(
            io::ErrorKind::Other,
            format!("sox exited with {}", exit),
        ))
    }
}
