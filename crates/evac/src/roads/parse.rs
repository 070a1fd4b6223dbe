//! Whitespace-separated road-map format.
//!
//! ```text
//! alert detX detY
//! orientation fromX fromY toX toY width length
//! ...
//! ```
//! `orientation` is `true` (horizontal) or `false` (vertical). Blank lines and
//! lines starting with `#` are ignored.

use std::fmt;

use crate::geometry::Point;

use super::types::{Orientation, RoadMap, RoadRecord};

const HEADER_FIELDS: usize = 3;
const ROAD_FIELDS: usize = 7;

/// Malformed map input, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub reason: String,
}

impl ParseError {
    fn new(line: usize, reason: impl Into<String>) -> Self {
        Self {
            line,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "road map line {}: {}", self.line, self.reason)
    }
}

impl std::error::Error for ParseError {}

/// Parse a whole map. Either every record is valid or an error is returned.
pub fn parse_roadmap(src: &str) -> Result<RoadMap, ParseError> {
    let mut lines = src
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'));

    let (hline, header) = lines
        .next()
        .ok_or_else(|| ParseError::new(1, "missing header line"))?;
    let h = fields::<HEADER_FIELDS>(hline, header)?;
    let alert = number(hline, h[0], "alert")?;
    let detonation = Point::new(number(hline, h[1], "detX")?, number(hline, h[2], "detY")?);

    let roads = lines
        .map(|(n, l)| road(n, l))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RoadMap {
        alert,
        detonation,
        roads,
    })
}

fn road(line: usize, text: &str) -> Result<RoadRecord, ParseError> {
    let f = fields::<ROAD_FIELDS>(line, text)?;
    let orientation = f[0]
        .to_ascii_lowercase()
        .parse::<bool>()
        .map(Orientation::from_flag)
        .map_err(|_| {
            ParseError::new(line, format!("orientation must be true/false, got {:?}", f[0]))
        })?;
    let from = Point::new(number(line, f[1], "fromX")?, number(line, f[2], "fromY")?);
    let to = Point::new(number(line, f[3], "toX")?, number(line, f[4], "toY")?);
    let width = number(line, f[5], "width")?;
    let length = number(line, f[6], "length")?;
    if width < 0.0 || length < 0.0 {
        return Err(ParseError::new(
            line,
            format!("road width and length must be nonnegative, got {width} x {length}"),
        ));
    }
    Ok(RoadRecord {
        orientation,
        from,
        to,
        width,
        length,
    })
}

fn fields<const N: usize>(line: usize, text: &str) -> Result<[&str; N], ParseError> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    parts
        .try_into()
        .map_err(|p: Vec<&str>| ParseError::new(line, format!("expected {N} fields, got {}", p.len())))
}

fn number(line: usize, tok: &str, name: &str) -> Result<f64, ParseError> {
    let v: f64 = tok
        .parse()
        .map_err(|_| ParseError::new(line, format!("{name}: not a number: {tok:?}")))?;
    if !v.is_finite() {
        return Err(ParseError::new(line, format!("{name}: not finite: {tok:?}")));
    }
    Ok(v)
}
