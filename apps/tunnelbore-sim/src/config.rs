//! Command-line options.

use anyhow::{anyhow, bail, Context, Result};
use tunnelbore_machine::{CrossSection, OrientationFlags};

/// Simulation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Low-frequency ticks to run.
    pub ticks: u64,
    /// Cross-section to cut.
    pub pattern: CrossSection,
    /// Orientation byte of the placed bore.
    pub flags: OrientationFlags,
    /// Energy offered each tick while the bore wants power.
    pub power_per_tick: f32,
    /// Overrides the bore's maximum distance.
    pub max_distance: Option<i32>,
    /// Seed for the flavor line.
    pub seed: u64,
    /// Print usage and exit.
    pub help: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ticks: 400,
            pattern: CrossSection::Staircase,
            flags: OrientationFlags::DEFAULT,
            power_per_tick: 500.0,
            max_distance: None,
            seed: 42,
            help: false,
        }
    }
}

impl SimConfig {
    /// Parse from the process arguments.
    pub fn from_env() -> Result<Self> {
        Self::parse(std::env::args().skip(1))
    }

    /// Parse from an argument list, program name excluded.
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let arg = arg.as_ref();
            if arg == "-h" || arg == "--help" {
                config.help = true;
                continue;
            }

            let value = args
                .next()
                .ok_or_else(|| anyhow!("missing value for {arg}"))?;
            let value = value.as_ref();
            match arg {
                "--ticks" => config.ticks = parse_number(arg, value)?,
                "--pattern" => config.pattern = parse_pattern(value)?,
                "--flags" => config.flags = parse_flags(value)?,
                "--power-per-tick" => config.power_per_tick = parse_number(arg, value)?,
                "--max-distance" => config.max_distance = Some(parse_number(arg, value)?),
                "--seed" => config.seed = parse_number(arg, value)?,
                _ => bail!("unknown option {arg}"),
            }
        }

        Ok(config)
    }
}

fn parse_number<T>(name: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse()
        .with_context(|| format!("invalid value {value:?} for {name}"))
}

fn parse_pattern(value: &str) -> Result<CrossSection> {
    match value {
        "staircase" | "stair" => Ok(CrossSection::Staircase),
        "square" => Ok(CrossSection::Square),
        other => {
            let selector = parse_number("--pattern", other)?;
            Ok(CrossSection::from_selector(selector)?)
        }
    }
}

fn parse_flags(value: &str) -> Result<OrientationFlags> {
    let raw = match value.strip_prefix("0x") {
        Some(hex) => u8::from_str_radix(hex, 16)
            .with_context(|| format!("invalid hex value {value:?} for --flags"))?,
        None => parse_number("--flags", value)?,
    };
    let flags = OrientationFlags(raw);
    if !flags.is_valid() {
        bail!("orientation flags {raw:#04x} do not name a single up face");
    }
    Ok(flags)
}

pub fn print_help() {
    eprintln!(
        "Tunnel bore simulator

USAGE:
    cargo run -p tunnelbore-sim -- [OPTIONS]

OPTIONS:
    --ticks <N>             Low-frequency ticks to run (default: 400)
    --pattern <P>           staircase | square | 0 | 1 (default: staircase)
    --flags <F>             Orientation byte, decimal or 0x-prefixed hex
                            Low six bits: one up face (1=top 2=bottom 4=left
                            8=right 16=front 32=back); bits 6-7: quarter turns
                            (default: 1)
    --power-per-tick <E>    Energy offered each tick (default: 500)
    --max-distance <N>      Override the maximum bore distance
    --seed <N>              Flavor text seed (default: 42)
    -h, --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG                Set log level (e.g., info, debug, trace)"
    );
}
