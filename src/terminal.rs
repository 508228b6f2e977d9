//! Terminal implementations of the controller's services, and the loop that
//! feeds script commands into the controller.

use crate::controller::{App, SubmitOutcome};
use crate::dlog;
use crate::ports::{
    FieldRow, FormFields, FormSurface, Geolocation, ListEntry, MapOptions, MapService, Marker,
    Notifier, Popup, Sidebar, TileLayer,
};
use crate::script::{self, Command, Field};
use crate::types::{Coords, WorkoutKind};
use anyhow::{Context, Result};
use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Output shared by every terminal service.
pub type Output = Rc<RefCell<dyn Write>>;

fn emit(out: &Output, line: &str) {
    if let Err(e) = writeln!(out.borrow_mut(), "{line}") {
        tracing::warn!(err = %e, "failed to write output");
    }
}

/// Reports a position given on the command line.
pub struct FixedPosition(pub Option<Coords>);

impl Geolocation for FixedPosition {
    fn current_position(&mut self) -> std::result::Result<Coords, String> {
        self.0
            .ok_or_else(|| "Could not get your position (pass --lat and --lon)".to_string())
    }
}

pub struct TerminalMap {
    out: Output,
    view: Option<(Coords, u8)>,
    markers: usize,
}

impl TerminalMap {
    pub fn new(out: Output) -> Self {
        Self {
            out,
            view: None,
            markers: 0,
        }
    }

    pub const fn view(&self) -> Option<(Coords, u8)> {
        self.view
    }

    pub const fn markers(&self) -> usize {
        self.markers
    }
}

impl MapService for TerminalMap {
    fn create_view(&mut self, center: Coords, zoom: u8, options: &MapOptions) {
        dlog!(
            "create_view center={center} zoom={zoom} double_click_zoom={}",
            options.double_click_zoom
        );
        self.view = Some((center, zoom));
        emit(&self.out, &format!("map\t{center}\tzoom={zoom}"));
    }

    fn add_tile_layer(&mut self, layer: &TileLayer) {
        dlog!("tile layer url={}", layer.url);
    }

    fn add_marker(&mut self, marker: &Marker, popup: &Popup) {
        self.markers += 1;
        emit(
            &self.out,
            &format!("marker\t{}\t{}\t{}", marker.at, popup.class_name, popup.content),
        );
    }
}

/// Entry form state, edited by `type` and `set` lines.
pub struct TerminalForm {
    kind: WorkoutKind,
    fields: FormFields,
    visible: bool,
    cadence_row: bool,
    elevation_row: bool,
    focused_distance: bool,
    restore_at: Option<Instant>,
}

impl Default for TerminalForm {
    fn default() -> Self {
        Self {
            kind: WorkoutKind::Running,
            fields: FormFields::default(),
            visible: false,
            cadence_row: true,
            elevation_row: false,
            focused_distance: false,
            restore_at: None,
        }
    }
}

impl TerminalForm {
    pub const fn set_type(&mut self, kind: WorkoutKind) {
        self.kind = kind;
    }

    pub fn set_field(&mut self, field: Field, raw: String) {
        let slot = match field {
            Field::Distance => &mut self.fields.distance,
            Field::Duration => &mut self.fields.duration,
            Field::Extra(FieldRow::Cadence) => &mut self.fields.cadence,
            Field::Extra(FieldRow::Elevation) => &mut self.fields.elevation,
        };
        *slot = raw;
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    pub const fn row_visible(&self, row: FieldRow) -> bool {
        match row {
            FieldRow::Cadence => self.cadence_row,
            FieldRow::Elevation => self.elevation_row,
        }
    }

    pub const fn distance_focused(&self) -> bool {
        self.focused_distance
    }

    /// Whether the delayed grid display has come back after a hide.
    pub fn display_restored(&self) -> bool {
        self.restore_at.is_none_or(|at| Instant::now() >= at)
    }
}

impl FormSurface for TerminalForm {
    fn show(&mut self) {
        self.visible = true;
    }

    fn focus_distance(&mut self) {
        self.focused_distance = true;
    }

    fn workout_type(&self) -> WorkoutKind {
        self.kind
    }

    fn read_fields(&self) -> FormFields {
        self.fields.clone()
    }

    fn set_row_visible(&mut self, row: FieldRow, visible: bool) {
        match row {
            FieldRow::Cadence => self.cadence_row = visible,
            FieldRow::Elevation => self.elevation_row = visible,
        }
    }

    fn clear_fields(&mut self) {
        self.fields = FormFields::default();
    }

    fn hide(&mut self, restore_display_after: Duration) {
        self.visible = false;
        self.focused_distance = false;
        self.restore_at = Some(Instant::now() + restore_display_after);
    }
}

pub struct TerminalSidebar {
    out: Output,
    entries: Vec<ListEntry>,
}

impl TerminalSidebar {
    pub fn new(out: Output) -> Self {
        Self {
            out,
            entries: Vec::new(),
        }
    }

    /// Newest first, as they sit below the form.
    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }
}

impl Sidebar for TerminalSidebar {
    fn insert_after_form(&mut self, entry: &ListEntry) {
        self.entries.insert(0, entry.clone());
        emit(&self.out, &format!("entry\t{}\t{}", entry.workout_id, entry.kind));
        emit(&self.out, entry.html.trim_end());
    }
}

pub struct TerminalNotifier {
    out: Output,
}

impl TerminalNotifier {
    pub fn new(out: Output) -> Self {
        Self { out }
    }
}

impl Notifier for TerminalNotifier {
    fn alert(&mut self, message: &str) {
        emit(&self.out, &format!("alert\t{message}"));
    }
}

pub type TerminalApp =
    App<FixedPosition, TerminalMap, TerminalForm, TerminalSidebar, TerminalNotifier>;

/// Feed every script line into `app`. Rejected submits and ignored clicks do
/// not stop the run; malformed lines do.
pub fn run<R: BufRead>(app: &mut TerminalApp, reader: R, out: &Output) -> Result<()> {
    for (i, line) in reader.lines().enumerate() {
        let lineno = i + 1;
        let line = line.with_context(|| format!("reading script line {lineno}"))?;
        let Some(cmd) =
            script::parse_line(&line).with_context(|| format!("script line {lineno}"))?
        else {
            continue;
        };
        dlog!("line={lineno} cmd={cmd:?}");

        match cmd {
            Command::Click(at) => app.handle_map_click(at),
            Command::Type(kind) => {
                app.form_mut().set_type(kind);
                app.handle_type_change();
            }
            Command::Set { field, raw } => app.form_mut().set_field(field, raw),
            Command::Submit => match app.handle_submit() {
                Ok(SubmitOutcome::Committed { id }) => {
                    dlog!("committed id={id}");
                }
                Ok(SubmitOutcome::Ignored) => {}
                Err(err) => {
                    dlog!("submit rejected line={lineno} err={err}");
                }
            },
            Command::List => print_json(app, out)?,
        }
    }
    Ok(())
}

/// One JSON object per workout, in insertion order.
pub fn print_json(app: &TerminalApp, out: &Output) -> Result<()> {
    for w in app.workouts() {
        let json = serde_json::to_string(w).context("serializing workout")?;
        emit(out, &json);
    }
    Ok(())
}
