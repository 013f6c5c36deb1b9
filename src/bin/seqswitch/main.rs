//! seqswitch - terminal host for the eight-way sequential switch
//!
//! Run with: cargo run -- --bpm 140 --steps 5 --lane 2

mod app;
mod ui;

use app::Session;
use clap::{Parser, ValueEnum};
use seq_switch::dsp::Waveform;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "seqswitch", version, about = "Eight-way sequential switch in the terminal")]
struct Args {
    /// Internal clock tempo
    #[arg(long, default_value_t = 120.0)]
    bpm: f64,

    /// Number of steps in the cycle (1-8)
    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u8).range(1..=8))]
    steps: u8,

    /// Output lane sent to the speakers (1-8)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=8))]
    lane: u8,

    /// Frequency of the routed test signal in Hz
    #[arg(long, default_value_t = 220.0)]
    freq: f32,

    /// Waveform of the routed test signal
    #[arg(long, value_enum, default_value_t = WaveformArg::Saw)]
    waveform: WaveformArg,

    /// Fraction of each beat the clock gate stays high
    #[arg(long, default_value_t = 0.5)]
    gate: f64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum WaveformArg {
    Sine,
    Saw,
    Square,
}

impl From<WaveformArg> for Waveform {
    fn from(arg: WaveformArg) -> Self {
        match arg {
            WaveformArg::Sine => Waveform::Sine,
            WaveformArg::Saw => Waveform::Saw,
            WaveformArg::Square => Waveform::Square,
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!(?args, "parsed arguments");

    Session::new()
        .bpm(args.bpm)
        .steps(args.steps)
        .monitor_lane(args.lane as usize - 1)
        .signal(args.waveform.into(), args.freq)
        .gate(args.gate)
        .run()
}
