//! `key=value` command-line parsing.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

use route_core::{SourcePoint, TargetPoint};
use route_field::ScalingFactors;
use route_search::SearchConfig;

use crate::{AppError, LengthUnit, OutputFormat};

pub const USAGE: &str = "\
usage: cheapest_route key=value ...

required:
  origin=X,Y              start cell (integer raster coordinates)
  destination=X,Y         end cell (integer raster coordinates)
  heightmap=PATH          raster image: grayscale elevation, or RGBA
                          elevation/friction/wind

optional:
  scaling_factors=X,Y,Z   raster and elevation to world units (default 1,1,1)
  friction_strength=F     weight of the friction channel (default 1)
  wind_strength=F         weight of the wind channels (default 0)
  output_format=FMT       svg, columns or json (default columns)
  length_unit=UNIT        m, dm, cm, mm, in or svg (default m)
  output=PATH             write here instead of stdout
  subcells=S              lattice nodes per raster cell and axis (default 4)
  tolerance=T             squared raster distance counted as arrival
                          (default 1/S^2)

`cheapest_route help` prints this text.
";

/// A fully parsed invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub origin: SourcePoint<i32>,
    pub destination: TargetPoint<i32>,
    pub heightmap: PathBuf,
    pub scaling: ScalingFactors,
    pub friction_strength: f64,
    pub wind_strength: f64,
    pub output_format: OutputFormat,
    pub length_unit: LengthUnit,
    /// `None` writes to stdout.
    pub output: Option<PathBuf>,
    pub search: SearchConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            origin: SourcePoint::new(0, 0),
            destination: TargetPoint::new(0, 0),
            heightmap: PathBuf::new(),
            scaling: ScalingFactors::default(),
            friction_strength: 1.0,
            wind_strength: 0.0,
            output_format: OutputFormat::default(),
            length_unit: LengthUnit::default(),
            output: None,
            search: SearchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Run(RunConfig),
}

const KEYS: [&str; 11] = [
    "origin",
    "destination",
    "heightmap",
    "scaling_factors",
    "friction_strength",
    "wind_strength",
    "output_format",
    "length_unit",
    "output",
    "subcells",
    "tolerance",
];

/// Parse the arguments following the program name.
pub fn parse<I, S>(args: I) -> Result<Command, AppError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let args: Vec<S> = args.into_iter().collect();
    if let [only] = args.as_slice() {
        if only.as_ref() == "help" {
            return Ok(Command::Help);
        }
    }

    let mut pairs: BTreeMap<&str, &str> = BTreeMap::new();
    for arg in &args {
        let arg = arg.as_ref();
        let Some((key, value)) = arg.split_once('=') else {
            return Err(AppError::Cmdline(format!("expected key=value, got `{arg}`")));
        };
        if !KEYS.contains(&key) {
            return Err(AppError::Cmdline(format!("unknown key `{key}`")));
        }
        if pairs.insert(key, value).is_some() {
            return Err(AppError::Cmdline(format!("key `{key}` given more than once")));
        }
    }

    let required = |key: &str| {
        pairs
            .get(key)
            .copied()
            .ok_or_else(|| AppError::Cmdline(format!("missing required key `{key}`")))
    };

    let mut config = RunConfig {
        origin: parse_cell(required("origin")?, "origin")?.into(),
        destination: parse_cell(required("destination")?, "destination")?.into(),
        heightmap: PathBuf::from(required("heightmap")?),
        ..RunConfig::default()
    };

    if let Some(v) = pairs.get("scaling_factors") {
        config.scaling = v.parse()?;
    }
    if let Some(v) = pairs.get("friction_strength") {
        config.friction_strength = parse_finite(v, "friction_strength")?;
    }
    if let Some(v) = pairs.get("wind_strength") {
        config.wind_strength = parse_finite(v, "wind_strength")?;
    }
    if let Some(v) = pairs.get("output_format") {
        config.output_format = v.parse()?;
    }
    if let Some(v) = pairs.get("length_unit") {
        config.length_unit = v.parse()?;
    }
    if let Some(v) = pairs.get("output") {
        config.output = Some(PathBuf::from(v));
    }
    if let Some(v) = pairs.get("subcells") {
        let scale: i32 = parse_number(v, "subcells")?;
        if scale < 1 {
            return Err(AppError::Cmdline(format!("subcells must be at least 1, got {scale}")));
        }
        config.search.scale = scale;
    }
    if let Some(v) = pairs.get("tolerance") {
        let tolerance: f64 = parse_number(v, "tolerance")?;
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(AppError::Cmdline(format!("tolerance must be positive, got {v}")));
        }
        config.search.tolerance = Some(tolerance);
    }

    Ok(Command::Run(config))
}

fn parse_number<T: FromStr>(value: &str, key: &str) -> Result<T, AppError> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::Cmdline(format!("`{value}` is not a valid {key}")))
}

fn parse_finite(value: &str, key: &str) -> Result<f64, AppError> {
    let v: f64 = parse_number(value, key)?;
    if !v.is_finite() {
        return Err(AppError::Cmdline(format!("{key} must be finite, got {value}")));
    }
    Ok(v)
}

fn parse_cell(value: &str, key: &str) -> Result<(i32, i32), AppError> {
    let Some((x, y)) = value.split_once(',') else {
        return Err(AppError::Cmdline(format!("{key} must be X,Y, got `{value}`")));
    };
    Ok((parse_number(x, key)?, parse_number(y, key)?))
}
