use std::fmt;
use std::str::FromStr;

use crate::FieldError;

/// Per-axis factors converting raster units (and raw elevation) to world
/// lengths.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScalingFactors {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for ScalingFactors {
    fn default() -> Self {
        Self {
            x: 1.0,
            y: 1.0,
            z: 1.0,
        }
    }
}

impl ScalingFactors {
    /// Build validated factors. Every factor must be finite and `> 0`.
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self, FieldError> {
        for (axis, v) in [("x", x), ("y", y), ("z", z)] {
            if !(v.is_finite() && v > 0.0) {
                return Err(FieldError::InvalidScaling(format!(
                    "{axis} factor must be strictly positive, got {v}"
                )));
            }
        }
        Ok(Self { x, y, z })
    }
}

impl FromStr for ScalingFactors {
    type Err = FieldError;

    /// Parses three numbers separated by commas and/or whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        let [x, y, z] = parts.as_slice() else {
            return Err(FieldError::InvalidScaling(format!(
                "expected three values, got {:?}",
                s
            )));
        };
        let num = |p: &str| {
            p.parse::<f64>()
                .map_err(|_| FieldError::InvalidScaling(format!("{p:?} is not a number")))
        };
        Self::new(num(x)?, num(y)?, num(z)?)
    }
}

impl fmt::Display for ScalingFactors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}
