// syn.score -- rendering written scores into waveforms
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! `playscore` renders one of the bundled songs and plays it, or writes it to a file.

use std::io;
use std::io::Write;
use std::path::PathBuf;

use log::info;
use structopt::StructOpt;

use syn_score::output::SoxTarget;
use syn_score::songs::SongName;

#[derive(Debug, StructOpt)]
#[structopt(name = "playscore", about = "Playing scores as sine waves")]
struct Opt {
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,

    /// The song to play (amazing-grace, canon or jupiter).
    song: SongName,

    /// Tempo in quarter notes per minute, overriding the tempo of the song.
    #[structopt(long)]
    bpm: Option<f64>,

    /// Sample rate of the rendered audio.
    #[structopt(long, default_value = "44100")]
    rate: u32,

    /// Linear gain applied to the rendered wave before output.
    #[structopt(long, default_value = "0.1")]
    volume: f32,

    /// Output file (any sox-supported format). Music is played directly if not given.
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Dump the component tree of the song.
    #[structopt(long)]
    #[allow(clippy::option_option)]
    dump_description: Option<Option<PathBuf>>,
}

fn main() -> io::Result<()> {
    let opt = Opt::from_args();

    let level = match opt.verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    simple_logger::init_with_level(level).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let mut music = opt
        .song
        .build()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?
        .with_sample_rate(opt.rate);
    if let Some(bpm) = opt.bpm {
        music = music.with_bpm(bpm);
    }

    let dump_out = opt
        .dump_description
        .map(|path| path.unwrap_or_else(|| "/dev/stdout".into()));
    if let Some(dump_out_path) = dump_out {
        let mut f = std::fs::File::create(dump_out_path)?;
        writeln!(f, "{:#?}", music)?;
    }

    info!(
        "{}: {} quarter notes ({:.2} seconds)",
        opt.song,
        music.duration(),
        music.duration_seconds()
    );

    let target = match &opt.output {
        None => SoxTarget::Play,
        Some(path) => SoxTarget::File(path),
    };
    music.play(opt.volume, target)
}
