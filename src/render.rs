use crate::ports::{ListEntry, Marker, Popup};
use crate::types::{Workout, WorkoutDetails, WorkoutKind};
use quick_xml::escape::escape;

pub const POPUP_MAX_WIDTH: u32 = 500;
pub const POPUP_MIN_WIDTH: u32 = 200;

pub const fn marker(workout: &Workout) -> Marker {
    Marker {
        at: workout.coords(),
        draggable: true,
        auto_pan: true,
    }
}

/// Stays open across map interaction; styled by kind.
pub fn popup(workout: &Workout) -> Popup {
    Popup {
        max_width: POPUP_MAX_WIDTH,
        min_width: POPUP_MIN_WIDTH,
        auto_close: false,
        close_on_click: false,
        class_name: format!("{}-popup", workout.kind()),
        content: format!("<h3>{}</h3>", escape(workout.description())),
        open: true,
    }
}

const fn icon(kind: WorkoutKind) -> &'static str {
    match kind {
        WorkoutKind::Running => "🏃",
        WorkoutKind::Cycling => "🚴",
    }
}

fn detail(icon: &str, value: f64, unit: &str) -> String {
    format!(
        r#"    <div class="workout-details">
      <span class="workout-icon">{icon}</span>
      <span class="workout-value">{value}</span>
      <span class="workout-unit">{unit}</span>
    </div>
"#
    )
}

pub fn list_entry(workout: &Workout) -> ListEntry {
    let kind = workout.kind();
    let (derived, derived_unit, extra_icon, extra, extra_unit) = match *workout.details() {
        WorkoutDetails::Running { cadence, pace } => (pace, "MIN/KM", "🦶🏼", cadence, "SPM"),
        WorkoutDetails::Cycling {
            elevation_gain,
            speed,
        } => (speed, "KM/H", "🏔️", elevation_gain, "M"),
    };

    let mut html = format!(
        "<li class=\"workout workout-{kind}\" data-id=\"{}\">\n  <h3 class=\"workout-title\">{}</h3>\n  <div class=\"workout-wrap\">\n",
        escape(workout.id()),
        escape(workout.description()),
    );
    html.push_str(&detail(icon(kind), workout.distance_km(), "KM"));
    html.push_str(&detail("⌛", workout.duration_min(), "Min"));
    html.push_str(&detail("⚡️", derived, derived_unit));
    html.push_str(&detail(extra_icon, extra, extra_unit));
    html.push_str("  </div>\n</li>\n");

    ListEntry {
        workout_id: workout.id().to_string(),
        kind,
        html,
    }
}
