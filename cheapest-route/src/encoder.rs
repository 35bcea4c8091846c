//! Path output formats.
//!
//! Encoders only see the finished [`Path`] and an [`EncodeContext`]; they
//! never touch the search or the cost field.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use route_core::Domain;
use route_field::ScalingFactors;
use route_search::Path;
use serde::Serialize;

use crate::{AppError, LengthUnit};

/// SVG user units per inch.
const SVG_UNITS_PER_INCH: f64 = 90.0;
const METRES_PER_INCH: f64 = 0.0254;

/// What an encoder needs besides the path itself.
#[derive(Debug, Clone, Copy)]
pub struct EncodeContext<'a> {
    pub domain: Domain,
    pub scaling: ScalingFactors,
    pub unit: LengthUnit,
    /// Raw (unscaled) elevation at each path sample, in path order.
    pub elevations: &'a [f64],
}

impl EncodeContext<'_> {
    fn elevation(&self, i: usize) -> f64 {
        self.elevations.get(i).copied().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Svg,
    #[default]
    Columns,
    Json,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Svg, OutputFormat::Columns, OutputFormat::Json];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Columns => "columns",
            OutputFormat::Json => "json",
        }
    }

    /// Write `path` to `out` in this format.
    pub fn encode<W: Write>(self, out: &mut W, path: &Path, ctx: &EncodeContext<'_>) -> io::Result<()> {
        match self {
            OutputFormat::Svg => encode_svg(out, path, ctx),
            OutputFormat::Columns => encode_columns(out, path, ctx),
            OutputFormat::Json => encode_json(out, path, ctx),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| AppError::UnsupportedInput {
                what: "output format",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// svg
// ---------------------------------------------------------------------------

fn encode_svg<W: Write>(out: &mut W, path: &Path, ctx: &EncodeContext<'_>) -> io::Result<()> {
    let per_unit = SVG_UNITS_PER_INCH * ctx.unit.metres() / METRES_PER_INCH;
    let sx = per_unit * ctx.scaling.x;
    let sy = per_unit * ctx.scaling.y;
    let width = (sx * f64::from(ctx.domain.width) + 0.5) as i64;
    let height = (sy * f64::from(ctx.domain.height) + 0.5) as i64;

    writeln!(
        out,
        r#"<svg width="{width}" height="{height}" xmlns="http://www.w3.org/2000/svg">"#
    )?;
    write!(out, r#"<polyline points=""#)?;
    for (i, p) in path.iter().enumerate() {
        if i > 0 {
            write!(out, " ")?;
        }
        write!(out, "{:.8e},{:.8e}", sx * p.location.x, sy * p.location.y)?;
    }
    writeln!(out, r#"" fill="none" stroke="black"/>"#)?;
    writeln!(out, "</svg>")
}

// ---------------------------------------------------------------------------
// columns
// ---------------------------------------------------------------------------

fn encode_columns<W: Write>(out: &mut W, path: &Path, ctx: &EncodeContext<'_>) -> io::Result<()> {
    let s = ctx.scaling;
    writeln!(out, "# x y z cost ({})", ctx.unit)?;
    for (i, p) in path.iter().enumerate() {
        writeln!(
            out,
            "{:.7e} {:.7e} {:.7e} {:.7e}",
            p.location.x * s.x,
            p.location.y * s.y,
            ctx.elevation(i) * s.z,
            p.cumulative_cost
        )?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// json
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct JsonDocument<'a> {
    cheapest_route: JsonRoute<'a>,
}

#[derive(Serialize)]
struct JsonRoute<'a> {
    path: JsonPath,
    world_scale: String,
    length_unit: &'a str,
    domain_size: Domain,
}

#[derive(Serialize, Default)]
struct JsonPath {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
    cost: Vec<f64>,
}

fn encode_json<W: Write>(out: &mut W, path: &Path, ctx: &EncodeContext<'_>) -> io::Result<()> {
    let mut columns = JsonPath::default();
    for (i, p) in path.iter().enumerate() {
        columns.x.push(p.location.x);
        columns.y.push(p.location.y);
        columns.z.push(ctx.elevation(i));
        columns.cost.push(p.cumulative_cost);
    }
    let doc = JsonDocument {
        cheapest_route: JsonRoute {
            path: columns,
            world_scale: ctx.scaling.to_string(),
            length_unit: ctx.unit.as_str(),
            domain_size: ctx.domain,
        },
    };
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use route_core::Location;
    use route_search::PathPoint;

    fn sample_path() -> Path {
        Path::new(vec![
            PathPoint {
                location: Location::new(0.0, 0.0),
                cumulative_cost: 0.0,
            },
            PathPoint {
                location: Location::new(1.0, 1.0),
                cumulative_cost: 2f64.sqrt(),
            },
        ])
    }

    fn encode(format: OutputFormat, unit: LengthUnit) -> String {
        let ctx = EncodeContext {
            domain: Domain::new(2, 2),
            scaling: ScalingFactors::new(2.0, 3.0, 5.0).unwrap(),
            unit,
            elevations: &[1.0, 2.0],
        };
        let mut buf = Vec::new();
        format.encode(&mut buf, &sample_path(), &ctx).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn parse_formats() {
        assert_eq!("svg".parse::<OutputFormat>().unwrap(), OutputFormat::Svg);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::default(), OutputFormat::Columns);
        let err = "png".parse::<OutputFormat>().unwrap_err();
        assert_eq!(err.to_string(), "unsupported output format `png`");
    }

    #[test]
    fn columns_layout() {
        let text = encode(OutputFormat::Columns, LengthUnit::Metre);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "# x y z cost (m)");
        assert_eq!(lines[1], "0.0000000e0 0.0000000e0 5.0000000e0 0.0000000e0");
        assert_eq!(lines[2], "2.0000000e0 3.0000000e0 1.0000000e1 1.4142136e0");
    }

    #[test]
    fn svg_layout() {
        let text = encode(OutputFormat::Svg, LengthUnit::Metre);
        // 90 px/in over 0.0254 m/in, times scaling, times domain size.
        assert!(text.starts_with(r#"<svg width="14173" height="21260""#), "{text}");
        assert!(text.contains("<polyline points=\"0.00000000e0,0.00000000e0 7.08661417e3,1.06299213e4\""));
        assert!(text.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn svg_follows_length_unit() {
        let metre = encode(OutputFormat::Svg, LengthUnit::Metre);
        let milli = encode(OutputFormat::Svg, LengthUnit::Millimetre);
        assert!(milli.starts_with(r#"<svg width="14" height="21""#), "{milli}");
        assert_ne!(metre, milli);
    }

    #[test]
    fn json_layout() {
        let text = encode(OutputFormat::Json, LengthUnit::Centimetre);
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        let route = &v["cheapest_route"];
        assert_eq!(route["path"]["x"], serde_json::json!([0.0, 1.0]));
        assert_eq!(route["path"]["y"], serde_json::json!([0.0, 1.0]));
        assert_eq!(route["path"]["z"], serde_json::json!([1.0, 2.0]));
        assert_eq!(route["path"]["cost"][0], 0.0);
        assert_eq!(route["world_scale"], "2 3 5");
        assert_eq!(route["length_unit"], "cm");
        assert_eq!(route["domain_size"]["width"], 2);
        assert_eq!(route["domain_size"]["height"], 2);
    }

    #[test]
    fn missing_elevations_default_to_zero() {
        let ctx = EncodeContext {
            domain: Domain::new(2, 2),
            scaling: ScalingFactors::default(),
            unit: LengthUnit::Metre,
            elevations: &[],
        };
        let mut buf = Vec::new();
        OutputFormat::Columns.encode(&mut buf, &sample_path(), &ctx).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.lines().nth(2).unwrap().starts_with("1.0000000e0 1.0000000e0 0.0000000e0"));
    }
}
