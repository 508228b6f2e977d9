use crate::ports::FieldRow;
use crate::types::{Coords, WorkoutKind};
use anyhow::{Result, bail};
use once_cell::sync::Lazy;
use regex::Regex;

static CLICK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^click\s+(-?\d+(?:\.\d+)?)\s+(-?\d+(?:\.\d+)?)$").expect("valid regex")
});
static TYPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^type\s+(running|cycling)$").expect("valid regex"));
static SET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^set\s+(distance|duration|cadence|elevation)(?:\s+(.*))?$").expect("valid regex")
});

/// Which input a `set` line writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Distance,
    Duration,
    Extra(FieldRow),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Click(Coords),
    Type(WorkoutKind),
    Set { field: Field, raw: String },
    Submit,
    List,
}

/// `Ok(None)` for blank and `#` lines.
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    match line {
        "submit" => return Ok(Some(Command::Submit)),
        "list" => return Ok(Some(Command::List)),
        _ => {}
    }

    if let Some(c) = CLICK_RE.captures(line) {
        let lat: f64 = c[1].parse()?;
        let lng: f64 = c[2].parse()?;
        return Ok(Some(Command::Click(Coords::new(lat, lng))));
    }

    if let Some(c) = TYPE_RE.captures(line)
        && let Some(kind) = WorkoutKind::parse(&c[1])
    {
        return Ok(Some(Command::Type(kind)));
    }

    if let Some(c) = SET_RE.captures(line) {
        let field = match &c[1] {
            "distance" => Field::Distance,
            "duration" => Field::Duration,
            "cadence" => Field::Extra(FieldRow::Cadence),
            _ => Field::Extra(FieldRow::Elevation),
        };
        let raw = c.get(2).map_or("", |m| m.as_str()).to_string();
        return Ok(Some(Command::Set { field, raw }));
    }

    bail!("unrecognised command: {line:?}")
}
