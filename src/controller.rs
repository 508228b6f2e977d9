use crate::config::Config;
use crate::dlog;
use crate::error::{Error, Result};
use crate::ports::{
    FieldRow, FormFields, FormSurface, Geolocation, MapOptions, MapService, Notifier, Sidebar,
    TileLayer,
};
use crate::render;
use crate::types::{Coords, Workout, WorkoutKind};

/// Where the pending workout stands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum State {
    Idle,
    AwaitingFormInput { at: Coords },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Committed { id: String },
    /// No map click preceded the submit.
    Ignored,
}

/// Handles injected into the [`App`].
pub struct Services<G, M, F, S, N> {
    pub geolocation: G,
    pub map: M,
    pub form: F,
    pub sidebar: S,
    pub notifier: N,
}

pub struct App<G, M, F, S, N> {
    config: Config,
    geolocation: G,
    map: M,
    form: F,
    sidebar: S,
    notifier: N,
    map_ready: bool,
    pending: Option<Coords>,
    workouts: Vec<Workout>,
}

impl<G, M, F, S, N> App<G, M, F, S, N>
where
    G: Geolocation,
    M: MapService,
    F: FormSurface,
    S: Sidebar,
    N: Notifier,
{
    pub fn new(services: Services<G, M, F, S, N>, config: Config) -> Self {
        let Services {
            geolocation,
            map,
            form,
            sidebar,
            notifier,
        } = services;
        Self {
            config,
            geolocation,
            map,
            form,
            sidebar,
            notifier,
            map_ready: false,
            pending: None,
            workouts: Vec::new(),
        }
    }

    /// Ask for the current position and bring up the map with it.
    pub fn start(&mut self) -> Result<()> {
        let position = self.geolocation.current_position();
        self.handle_location(position)
    }

    /// Completion of a location request.
    pub fn handle_location(&mut self, position: std::result::Result<Coords, String>) -> Result<()> {
        match position {
            Ok(center) => {
                self.load_map(center);
                Ok(())
            }
            Err(message) => {
                let err = Error::LocationUnavailable(message);
                tracing::warn!(%err, "location unavailable; map not loaded");
                self.notifier.alert(&err.to_string());
                Err(err)
            }
        }
    }

    fn load_map(&mut self, center: Coords) {
        let options = MapOptions {
            double_click_zoom: false,
        };
        self.map.create_view(center, self.config.zoom, &options);
        self.map.add_tile_layer(&TileLayer {
            url: self.config.tile_url.clone(),
            attribution: self.config.attribution.clone(),
        });
        self.map_ready = true;
        tracing::info!(%center, zoom = self.config.zoom, "map loaded");
    }

    /// A later click replaces an earlier unconsumed one.
    pub fn handle_map_click(&mut self, at: Coords) {
        if !self.map_ready {
            tracing::warn!(%at, "map click before the map is loaded; ignoring");
            return;
        }
        if let Some(prev) = self.pending.replace(at) {
            dlog!("pending location replaced prev={prev} new={at}");
        } else {
            dlog!("pending location set at={at}");
        }
        self.form.show();
        self.form.focus_distance();
    }

    pub fn handle_type_change(&mut self) {
        let kind = self.form.workout_type();
        self.form
            .set_row_visible(FieldRow::Cadence, kind == WorkoutKind::Running);
        self.form
            .set_row_visible(FieldRow::Elevation, kind == WorkoutKind::Cycling);
        dlog!("form type changed kind={kind}");
    }

    pub fn handle_submit(&mut self) -> Result<SubmitOutcome> {
        let Some(at) = self.pending else {
            tracing::warn!("submit without a selected location; ignoring");
            return Ok(SubmitOutcome::Ignored);
        };

        let kind = self.form.workout_type();
        let workout = match build_workout(kind, at, &self.form.read_fields()) {
            Ok(w) => w,
            Err(err) => {
                tracing::warn!(%err, %kind, "rejected form input");
                self.notifier.alert(&err.to_string());
                return Err(err);
            }
        };

        let id = workout.id().to_string();
        tracing::info!(
            id = %id,
            kind = %kind,
            distance_km = workout.distance_km(),
            duration_min = workout.duration_min(),
            "workout logged"
        );

        self.render_marker(&workout);
        let entry = render::list_entry(&workout);
        self.workouts.push(workout);
        self.sidebar.insert_after_form(&entry);
        self.hide_form();
        self.pending = None;

        Ok(SubmitOutcome::Committed { id })
    }

    fn render_marker(&mut self, workout: &Workout) {
        self.map
            .add_marker(&render::marker(workout), &render::popup(workout));
    }

    fn hide_form(&mut self) {
        self.form.clear_fields();
        self.form.hide(self.config.hide_delay);
    }

    pub fn state(&self) -> State {
        self.pending
            .map_or(State::Idle, |at| State::AwaitingFormInput { at })
    }

    pub const fn pending_location(&self) -> Option<Coords> {
        self.pending
    }

    pub const fn map_ready(&self) -> bool {
        self.map_ready
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub const fn config(&self) -> &Config {
        &self.config
    }

    pub const fn map(&self) -> &M {
        &self.map
    }

    pub const fn form(&self) -> &F {
        &self.form
    }

    pub const fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub const fn sidebar(&self) -> &S {
        &self.sidebar
    }

    pub const fn notifier(&self) -> &N {
        &self.notifier
    }
}

/// Browser-style numeric coercion: blank is 0, garbage is NaN.
pub fn coerce_number(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

fn all_positive_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite() && *v > 0.0)
}

/// Only the fields the kind uses are checked.
pub fn build_workout(kind: WorkoutKind, at: Coords, fields: &FormFields) -> Result<Workout> {
    let distance = coerce_number(&fields.distance);
    let duration = coerce_number(&fields.duration);

    match kind {
        WorkoutKind::Running => {
            let cadence = coerce_number(&fields.cadence);
            if !all_positive_finite(&[distance, duration, cadence]) {
                return Err(Error::InvalidInput);
            }
            Ok(Workout::running(at, distance, duration, cadence))
        }
        WorkoutKind::Cycling => {
            let elevation = coerce_number(&fields.elevation);
            if !all_positive_finite(&[distance, duration, elevation]) {
                return Err(Error::InvalidInput);
            }
            Ok(Workout::cycling(at, distance, duration, elevation))
        }
    }
}
