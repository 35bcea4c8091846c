use std::fmt;
use std::str::FromStr;

use crate::AppError;

/// Unit of world lengths produced by the scaling factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthUnit {
    #[default]
    Metre,
    Decimetre,
    Centimetre,
    Millimetre,
    Inch,
    /// SVG user unit, 1/90 inch.
    SvgPixel,
}

impl LengthUnit {
    pub const ALL: [LengthUnit; 6] = [
        LengthUnit::Metre,
        LengthUnit::Decimetre,
        LengthUnit::Centimetre,
        LengthUnit::Millimetre,
        LengthUnit::Inch,
        LengthUnit::SvgPixel,
    ];

    /// Length of one unit in metres.
    pub fn metres(self) -> f64 {
        match self {
            LengthUnit::Metre => 1.0,
            LengthUnit::Decimetre => 0.1,
            LengthUnit::Centimetre => 0.01,
            LengthUnit::Millimetre => 0.001,
            LengthUnit::Inch => 0.0254,
            LengthUnit::SvgPixel => 0.0254 / 90.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LengthUnit::Metre => "m",
            LengthUnit::Decimetre => "dm",
            LengthUnit::Centimetre => "cm",
            LengthUnit::Millimetre => "mm",
            LengthUnit::Inch => "in",
            LengthUnit::SvgPixel => "svg",
        }
    }
}

impl FromStr for LengthUnit {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LengthUnit::ALL
            .into_iter()
            .find(|u| u.as_str() == s)
            .ok_or_else(|| AppError::UnsupportedInput {
                what: "length unit",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
