//! Command-line front end: argument parsing and parameter assembly

use crate::dice::{DiceParams, GlyphOrientation, Numbering};
use crate::errors::DiceError;
use crate::float_types::Real;
use crate::io::StlFormat;
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage: dicecarve [options]

Builds a twenty-sided die with engraved numbers and writes it as STL.

Options:
  --config <file.json>         load parameters from a JSON file
  --size <1..10>               circumradius of the die (default 5)
  --font-size <0.5..3>         digit height (default 1.5)
  --depth <0.1..1>             engraving depth (default 0.4)
  --text-scale <0.5..2>        extra digit scale (default 1)
  --rounding <0..1>            corner rounding (default 0)
  --numbering <sequential|opposite>
  --orientation <minimal|apex>
  --mark-six-nine              underline 6 and 9
  --font <file.ttf>            use a TrueType font instead of the block font
  --ascii                      write ASCII STL instead of binary
  --output <file.stl>          output path (default d20.stl)
  --density <g/cm3>            report the estimated mass for this density
  --dump-config                print the effective parameters as JSON and exit
  --help                       show this message
";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct CliError {
    message: String,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        CliError { message: message.into() }
    }
}

/// Values given on the command line; they win over the config file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub dice_size: Option<Real>,
    pub font_size: Option<Real>,
    pub depth: Option<Real>,
    pub text_scale: Option<Real>,
    pub rounding: Option<Real>,
    pub numbering: Option<Numbering>,
    pub orientation: Option<GlyphOrientation>,
    pub mark_six_nine: bool,
}

impl Overrides {
    fn apply(&self, params: &mut DiceParams) {
        let slots = [
            (self.dice_size, &mut params.dice_size),
            (self.font_size, &mut params.font_size),
            (self.depth, &mut params.depth),
            (self.text_scale, &mut params.text_scale),
            (self.rounding, &mut params.rounding),
        ];
        for (value, slot) in slots {
            if let Some(v) = value {
                *slot = v;
            }
        }
        if let Some(numbering) = self.numbering {
            params.numbering = numbering;
        }
        if let Some(orientation) = self.orientation {
            params.orientation = orientation;
        }
        params.mark_six_nine |= self.mark_six_nine;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub overrides: Overrides,
    pub font: Option<PathBuf>,
    pub format: StlFormat,
    pub output: PathBuf,
    pub density: Option<Real>,
    pub dump_config: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        CliOptions {
            config: None,
            overrides: Overrides::default(),
            font: None,
            format: StlFormat::Binary,
            output: PathBuf::from("d20.stl"),
            density: None,
            dump_config: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    Help,
    Run(CliOptions),
}

fn value<'a>(args: &'a [String], idx: usize, flag: &str) -> Result<&'a str, CliError> {
    args.get(idx + 1)
        .map(String::as_str)
        .ok_or_else(|| CliError::new(format!("missing value for {flag}")))
}

/// Parse a float argument value.
fn parse_real(args: &[String], idx: usize, flag: &str) -> Result<Real, CliError> {
    let raw = value(args, idx, flag)?;
    raw.parse::<Real>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CliError::new(format!("invalid number '{raw}' for {flag}")))
}

fn parse_numbering(raw: &str) -> Result<Numbering, CliError> {
    match raw.to_ascii_lowercase().as_str() {
        "sequential" => Ok(Numbering::Sequential),
        "opposite" | "opposite_sum" => Ok(Numbering::OppositeSum),
        other => Err(CliError::new(format!(
            "unknown --numbering value '{other}'; expected sequential or opposite"
        ))),
    }
}

fn parse_orientation(raw: &str) -> Result<GlyphOrientation, CliError> {
    match raw.to_ascii_lowercase().as_str() {
        "minimal" | "minimal_rotation" => Ok(GlyphOrientation::MinimalRotation),
        "apex" => Ok(GlyphOrientation::Apex),
        other => Err(CliError::new(format!(
            "unknown --orientation value '{other}'; expected minimal or apex"
        ))),
    }
}

impl CliOptions {
    /// Parse arguments, program name excluded
    pub fn parse(args: &[String]) -> Result<CliCommand, CliError> {
        let mut opts = CliOptions::default();
        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            let takes_value = match flag {
                "--help" | "-h" => return Ok(CliCommand::Help),
                "--config" => {
                    opts.config = Some(PathBuf::from(value(args, i, flag)?));
                    true
                },
                "--size" => {
                    opts.overrides.dice_size = Some(parse_real(args, i, flag)?);
                    true
                },
                "--font-size" => {
                    opts.overrides.font_size = Some(parse_real(args, i, flag)?);
                    true
                },
                "--depth" => {
                    opts.overrides.depth = Some(parse_real(args, i, flag)?);
                    true
                },
                "--text-scale" => {
                    opts.overrides.text_scale = Some(parse_real(args, i, flag)?);
                    true
                },
                "--rounding" => {
                    opts.overrides.rounding = Some(parse_real(args, i, flag)?);
                    true
                },
                "--numbering" => {
                    opts.overrides.numbering = Some(parse_numbering(value(args, i, flag)?)?);
                    true
                },
                "--orientation" => {
                    opts.overrides.orientation = Some(parse_orientation(value(args, i, flag)?)?);
                    true
                },
                "--mark-six-nine" => {
                    opts.overrides.mark_six_nine = true;
                    false
                },
                "--font" => {
                    opts.font = Some(PathBuf::from(value(args, i, flag)?));
                    true
                },
                "--ascii" => {
                    opts.format = StlFormat::Ascii;
                    false
                },
                "--output" | "-o" => {
                    opts.output = PathBuf::from(value(args, i, flag)?);
                    true
                },
                "--density" => {
                    let density = parse_real(args, i, flag)?;
                    if density <= 0.0 {
                        return Err(CliError::new(format!(
                            "--density must be positive, got {density}"
                        )));
                    }
                    opts.density = Some(density);
                    true
                },
                "--dump-config" => {
                    opts.dump_config = true;
                    false
                },
                other => return Err(CliError::new(format!("unknown option '{other}'; see --help"))),
            };
            i += if takes_value { 2 } else { 1 };
        }
        Ok(CliCommand::Run(opts))
    }

    /// Config file (if any), then command-line overrides, then range clamping
    pub fn params(&self) -> Result<DiceParams, DiceError> {
        let mut params = match &self.config {
            Some(path) => DiceParams::from_json_file(path)?,
            None => DiceParams::default(),
        };
        self.overrides.apply(&mut params);
        params.validate()?;
        Ok(params.clamped())
    }
}
