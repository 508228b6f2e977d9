//! Services the controller is handed at construction.
//!
//! Everything outside the domain (positioning, map tiles, the entry form,
//! the sidebar, alerts) sits behind one of these traits.

use crate::types::{Coords, WorkoutKind};
use std::time::Duration;

pub trait Geolocation {
    /// Current position, or a human-readable reason it is unavailable.
    fn current_position(&mut self) -> Result<Coords, String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapOptions {
    pub double_click_zoom: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayer {
    pub url: String,
    pub attribution: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub at: Coords,
    pub draggable: bool,
    pub auto_pan: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
    pub class_name: String,
    pub content: String,
    pub open: bool,
}

pub trait MapService {
    fn create_view(&mut self, center: Coords, zoom: u8, options: &MapOptions);
    fn add_tile_layer(&mut self, layer: &TileLayer);
    fn add_marker(&mut self, marker: &Marker, popup: &Popup);
}

/// The two rows that swap with the workout type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRow {
    Cadence,
    Elevation,
}

/// Raw input values, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

pub trait FormSurface {
    fn show(&mut self);
    fn focus_distance(&mut self);
    fn workout_type(&self) -> WorkoutKind;
    fn read_fields(&self) -> FormFields;
    fn set_row_visible(&mut self, row: FieldRow, visible: bool);
    fn clear_fields(&mut self);
    /// Hide now; restore the layout display mode after `restore_display_after`.
    fn hide(&mut self, restore_display_after: Duration);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub workout_id: String,
    pub kind: WorkoutKind,
    pub html: String,
}

pub trait Sidebar {
    fn insert_after_form(&mut self, entry: &ListEntry);
}

pub trait Notifier {
    fn alert(&mut self, message: &str);
}
