use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

/// wlmaker: a stacking window manager core, driven headless.
#[derive(Parser, Debug)]
#[command(name = "wlmaker", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (e.g. `wlmaker=debug`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Headless output as WIDTHxHEIGHT[@SCALE]. Repeat for more outputs;
    /// they are laid out left to right.
    #[arg(long = "output", value_name = "WxH[@SCALE]")]
    pub outputs: Vec<OutputSpec>,

    /// Feed input events from a JSON-lines file, then exit.
    #[arg(long, value_name = "FILE")]
    pub replay: Option<PathBuf>,
}

pub fn parse() -> Args {
    Args::parse()
}

/// Mode and scale of a headless output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputSpec {
    pub width: u32,
    pub height: u32,
    pub scale: f64,
}

impl Default for OutputSpec {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            scale: 1.0,
        }
    }
}

impl FromStr for OutputSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (mode, scale) = match s.split_once('@') {
            Some((mode, scale)) => {
                let scale: f64 = scale
                    .parse()
                    .map_err(|_| format!("invalid scale '{scale}'"))?;
                if !(scale > 0.0 && scale.is_finite()) {
                    return Err(format!("scale must be positive, got {scale}"));
                }
                (mode, scale)
            }
            None => (s, 1.0),
        };
        let (width, height) = mode
            .split_once('x')
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{mode}'"))?;
        let width: u32 = width
            .parse()
            .map_err(|_| format!("invalid width '{width}'"))?;
        let height: u32 = height
            .parse()
            .map_err(|_| format!("invalid height '{height}'"))?;
        if width == 0 || height == 0 {
            return Err("output mode must not be empty".to_string());
        }
        Ok(Self {
            width,
            height,
            scale,
        })
    }
}
