use chrono::{DateTime, Datelike, FixedOffset, Local};
use serde::Serialize;
use std::fmt;

/// A `(lat, lng)` pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Cycling => "cycling",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "running" => Some(Self::Running),
            "cycling" => Some(Self::Cycling),
            _ => None,
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-kind payload. The derived metric is fixed when the variant is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkoutDetails {
    Running { cadence: f64, pace: f64 },
    Cycling { elevation_gain: f64, speed: f64 },
}

impl WorkoutDetails {
    pub const fn kind(&self) -> WorkoutKind {
        match self {
            Self::Running { .. } => WorkoutKind::Running,
            Self::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

/// One logged workout. Immutable once built; inputs are not validated here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workout {
    id: String,
    created_at: DateTime<FixedOffset>,
    coords: Coords,
    distance_km: f64,
    duration_min: f64,
    description: String,
    #[serde(flatten)]
    details: WorkoutDetails,
}

impl Workout {
    pub fn running(coords: Coords, distance_km: f64, duration_min: f64, cadence: f64) -> Self {
        Self::running_at(Local::now().fixed_offset(), coords, distance_km, duration_min, cadence)
    }

    pub fn cycling(
        coords: Coords,
        distance_km: f64,
        duration_min: f64,
        elevation_gain: f64,
    ) -> Self {
        Self::cycling_at(
            Local::now().fixed_offset(),
            coords,
            distance_km,
            duration_min,
            elevation_gain,
        )
    }

    pub fn running_at(
        created_at: DateTime<FixedOffset>,
        coords: Coords,
        distance_km: f64,
        duration_min: f64,
        cadence: f64,
    ) -> Self {
        let pace = duration_min / distance_km;
        Self::build(
            created_at,
            coords,
            distance_km,
            duration_min,
            WorkoutDetails::Running { cadence, pace },
        )
    }

    pub fn cycling_at(
        created_at: DateTime<FixedOffset>,
        coords: Coords,
        distance_km: f64,
        duration_min: f64,
        elevation_gain: f64,
    ) -> Self {
        let speed = distance_km / (duration_min / 60.0);
        Self::build(
            created_at,
            coords,
            distance_km,
            duration_min,
            WorkoutDetails::Cycling {
                elevation_gain,
                speed,
            },
        )
    }

    fn build(
        created_at: DateTime<FixedOffset>,
        coords: Coords,
        distance_km: f64,
        duration_min: f64,
        details: WorkoutDetails,
    ) -> Self {
        Self {
            id: id_from_timestamp(&created_at),
            description: describe(details.kind(), &created_at),
            created_at,
            coords,
            distance_km,
            duration_min,
            details,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub const fn created_at(&self) -> DateTime<FixedOffset> {
        self.created_at
    }

    pub const fn coords(&self) -> Coords {
        self.coords
    }

    pub const fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub const fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub const fn kind(&self) -> WorkoutKind {
        self.details.kind()
    }

    pub const fn details(&self) -> &WorkoutDetails {
        &self.details
    }
}

/// Last 10 digits of the millisecond timestamp.
fn id_from_timestamp(at: &DateTime<FixedOffset>) -> String {
    let ms = at.timestamp_millis().to_string();
    let start = ms.len().saturating_sub(10);
    ms[start..].to_string()
}

/// `"Running on April 3"`.
///
/// The trailing number is the weekday counted from Sunday = 0, not the day
/// of the month.
fn describe(kind: WorkoutKind, at: &DateTime<FixedOffset>) -> String {
    let name = kind.as_str();
    let mut chars = name.chars();
    let capitalized = chars.next().map_or_else(String::new, |c| {
        c.to_uppercase().chain(chars).collect::<String>()
    });
    format!(
        "{capitalized} on {} {}",
        at.format("%B"),
        at.weekday().num_days_from_sunday()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(rfc3339: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap()
    }

    #[test]
    fn running_pace_is_minutes_per_km() {
        let w = Workout::running_at(
            at("2024-04-03T10:00:00+02:00"),
            Coords::new(48.85, 2.35),
            5.0,
            30.0,
            178.0,
        );
        match w.details() {
            WorkoutDetails::Running { cadence, pace } => {
                assert!((pace - 6.0).abs() < 1e-12);
                assert!((cadence - 178.0).abs() < f64::EPSILON);
            }
            other => panic!("unexpected details: {other:?}"),
        }
        assert_eq!(w.kind(), WorkoutKind::Running);
    }

    #[test]
    fn cycling_speed_is_km_per_hour() {
        let w = Workout::cycling_at(
            at("2024-04-03T10:00:00+02:00"),
            Coords::new(48.85, 2.35),
            20.0,
            60.0,
            500.0,
        );
        let WorkoutDetails::Cycling { speed, .. } = w.details() else {
            panic!("expected cycling");
        };
        assert!((speed - 20.0).abs() < 1e-12);
    }

    #[test]
    fn description_uses_month_name_and_weekday_index() {
        // 2024-04-03 is a Wednesday.
        let w = Workout::running_at(
            at("2024-04-03T10:00:00+00:00"),
            Coords::new(0.0, 0.0),
            1.0,
            1.0,
            1.0,
        );
        assert_eq!(w.description(), "Running on April 3");

        // 2024-09-15 is a Sunday.
        let c = Workout::cycling_at(
            at("2024-09-15T08:30:00+00:00"),
            Coords::new(0.0, 0.0),
            1.0,
            1.0,
            1.0,
        );
        assert_eq!(c.description(), "Cycling on September 0");
    }

    #[test]
    fn description_follows_the_offset_of_the_timestamp() {
        // Saturday in UTC, already Sunday in UTC+10.
        let w = Workout::running_at(
            at("2024-06-02T03:00:00+10:00"),
            Coords::new(0.0, 0.0),
            1.0,
            1.0,
            1.0,
        );
        assert_eq!(w.description(), "Running on June 0");
    }

    #[test]
    fn id_is_last_ten_digits_of_millis() {
        let created = at("2024-04-03T10:00:00.123+00:00");
        let w = Workout::running_at(created, Coords::new(0.0, 0.0), 1.0, 1.0, 1.0);
        let full = created.timestamp_millis().to_string();
        assert_eq!(w.id().len(), 10);
        assert!(full.ends_with(w.id()));
        assert_eq!(w.created_at(), created);
    }

    #[test]
    fn kind_round_trips_through_its_name() {
        for kind in [WorkoutKind::Running, WorkoutKind::Cycling] {
            assert_eq!(WorkoutKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(WorkoutKind::parse("swimming"), None);
    }

    #[test]
    fn serializes_with_type_tag() {
        let w = Workout::cycling_at(
            at("2024-04-03T10:00:00+00:00"),
            Coords::new(1.5, -2.25),
            20.0,
            60.0,
            500.0,
        );
        let v = serde_json::to_value(&w).unwrap();
        assert_eq!(v["type"], "cycling");
        assert_eq!(v["elevation_gain"], 500.0);
        assert_eq!(v["coords"]["lng"], -2.25);
    }
}
