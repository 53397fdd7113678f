//! Client application state and its action handlers.
//!
//! [`ClientState`] is the single mutable object behind the UI: the
//! last-fetched marker list, the current edit target, and the transient
//! feedback line. Every interaction arrives as an [`Event`] and is handled
//! by [`ClientState::update`], which mutates the state and returns an
//! ordered list of [`Effect`] descriptions for the shell and the HTTP
//! driver to carry out. No handler performs I/O.

use std::time::Duration;

use vidmark_types::{Marker, MarkerFields, NewMarker};

use crate::generate_id;
use crate::time::{seconds_to_time, time_to_seconds};
use crate::transfer::{export_json, parse_import};
use crate::url::timestamped_url;

/// How long the shell displays a transient feedback message before feeding
/// [`Event::FeedbackExpired`] back in.
pub const FEEDBACK_TTL: Duration = Duration::from_secs(3);

/// Raw values of the marker form, as entered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInput {
    pub title: String,
    pub url: String,
    pub time: String,
    pub note: String,
}

/// Severity of a transient feedback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Info,
    Ok,
    Warn,
    Err,
}

/// A transient status line. The shell clears it after a fixed delay by
/// feeding [`Event::FeedbackExpired`] back in.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub message: String,
    pub kind: FeedbackKind,
}

/// A destructive action awaiting interactive confirmation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmAction {
    /// Delete the marker with this id.
    DeleteOne(String),
    /// Delete every currently loaded marker.
    ClearAll,
}

/// Everything that can happen to the client: user interactions and the
/// outcomes of previously emitted effects.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A marker list arrived from the server.
    MarkersLoaded(Vec<Marker>),
    /// Fetching the marker list failed.
    LoadFailed(String),
    /// The form was submitted (create, or update when editing).
    SubmitForm(FormInput),
    /// A create/update request succeeded.
    SaveSucceeded,
    /// A create/update request failed.
    SaveFailed(String),
    /// The user asked to edit a listed marker.
    EditRequested(String),
    /// The user asked to delete a listed marker.
    DeleteRequested(String),
    /// The user confirmed a pending destructive action.
    Confirmed(ConfirmAction),
    /// The user dismissed a pending destructive action.
    Cancelled,
    /// A single delete request succeeded.
    DeleteSucceeded,
    /// A single delete request failed.
    DeleteFailed(String),
    /// The user asked to export the current list.
    ExportRequested,
    /// An import file was selected and read.
    ImportFileRead(String),
    /// A bulk import finished (failures included in `attempted`).
    ImportFinished { attempted: usize, failed: usize },
    /// A bulk clear finished.
    ClearFinished { attempted: usize, failed: usize },
    /// The user asked to delete all markers.
    ClearRequested,
    /// The user asked to open the form's URL at the form's time offset.
    PreviewRequested(FormInput),
    /// The feedback display delay elapsed.
    FeedbackExpired,
}

/// A side effect requested by a handler. Network effects are executed in
/// order by [`crate::api::drive`]; the rest describe UI work for the shell.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch the full marker list.
    FetchMarkers,
    /// Create one marker.
    CreateMarker(NewMarker),
    /// Replace the mutable fields of one marker.
    UpdateMarker { id: String, fields: MarkerFields },
    /// Delete one marker.
    DeleteMarker(String),
    /// Create markers one at a time, in order, continuing past failures.
    CreateMany(Vec<NewMarker>),
    /// Delete markers one at a time, in order, continuing past failures.
    DeleteMany(Vec<String>),
    /// Re-render the marker list from state.
    Render,
    /// Populate the form fields.
    FillForm(FormInput),
    /// Reset the form to empty.
    ClearForm,
    /// Ask the user to confirm a destructive action.
    Confirm(ConfirmAction),
    /// Offer `json` as a file download (the shell names it via
    /// [`crate::transfer::export_file_name`]).
    DownloadFile { json: String },
    /// Open a URL in a new tab/window.
    OpenUrl(String),
}

/// The client application state.
#[derive(Debug, Default)]
pub struct ClientState {
    /// Last-fetched marker list, newest first.
    pub markers: Vec<Marker>,
    /// When set, the next form submission updates this marker instead of
    /// creating a new one.
    pub editing_id: Option<String>,
    /// Current transient status line, if any.
    pub feedback: Option<Feedback>,
}

impl ClientState {
    /// Handles one event: mutates the state and returns the side effects to
    /// perform, in order.
    pub fn update(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::MarkersLoaded(markers) => {
                self.markers = markers;
                vec![Effect::Render]
            }

            Event::LoadFailed(_) => {
                self.set_feedback(FeedbackKind::Err, "Failed to load markers");
                vec![]
            }

            Event::SubmitForm(input) => self.submit(input),

            Event::SaveSucceeded => {
                let was_edit = self.editing_id.take().is_some();
                self.set_feedback(
                    FeedbackKind::Ok,
                    if was_edit { "Marker updated" } else { "Marker saved" },
                );
                vec![Effect::ClearForm, Effect::FetchMarkers]
            }

            Event::SaveFailed(_) => {
                // Edit target and form are left intact so the user can retry.
                self.set_feedback(FeedbackKind::Err, "Failed to save marker");
                vec![]
            }

            Event::EditRequested(id) => self.edit(id),

            Event::DeleteRequested(id) => vec![Effect::Confirm(ConfirmAction::DeleteOne(id))],

            Event::ClearRequested => vec![Effect::Confirm(ConfirmAction::ClearAll)],

            Event::Confirmed(ConfirmAction::DeleteOne(id)) => vec![Effect::DeleteMarker(id)],

            Event::Confirmed(ConfirmAction::ClearAll) => {
                let ids = self.markers.iter().map(|m| m.id.clone()).collect();
                vec![Effect::DeleteMany(ids)]
            }

            Event::Cancelled => vec![],

            Event::DeleteSucceeded => {
                self.set_feedback(FeedbackKind::Ok, "Marker deleted");
                vec![Effect::FetchMarkers]
            }

            Event::DeleteFailed(_) => {
                self.set_feedback(FeedbackKind::Err, "Failed to delete marker");
                vec![]
            }

            Event::ExportRequested => self.export(),

            Event::ImportFileRead(contents) => match parse_import(&contents) {
                Ok(entries) => vec![Effect::CreateMany(entries)],
                Err(_) => {
                    self.set_feedback(FeedbackKind::Err, "Failed to import file");
                    vec![]
                }
            },

            Event::ImportFinished { attempted, .. } => {
                self.set_feedback(FeedbackKind::Ok, format!("{attempted} markers imported"));
                vec![Effect::FetchMarkers]
            }

            Event::ClearFinished { .. } => {
                self.set_feedback(FeedbackKind::Ok, "All markers deleted");
                vec![Effect::FetchMarkers]
            }

            Event::PreviewRequested(input) => {
                let url = input.url.trim();
                if url.is_empty() {
                    self.set_feedback(FeedbackKind::Warn, "Enter a URL first");
                    return vec![];
                }
                let seconds = time_to_seconds(&input.time);
                vec![Effect::OpenUrl(timestamped_url(url, seconds))]
            }

            Event::FeedbackExpired => {
                self.feedback = None;
                vec![]
            }
        }
    }

    fn submit(&mut self, input: FormInput) -> Vec<Effect> {
        let title = non_empty(&input.title);
        let url = input.url.trim().to_string();
        let time = input.time.trim();
        let note = non_empty(&input.note);

        if url.is_empty() || time.is_empty() {
            self.set_feedback(FeedbackKind::Warn, "URL and time are required");
            return vec![];
        }

        let seconds = time_to_seconds(time);
        if seconds < 0 {
            self.set_feedback(FeedbackKind::Warn, "Invalid time format");
            return vec![];
        }

        match self.editing_id.clone() {
            Some(id) => vec![Effect::UpdateMarker {
                id,
                fields: MarkerFields {
                    title,
                    url,
                    seconds,
                    note,
                },
            }],
            None => vec![Effect::CreateMarker(NewMarker {
                id: generate_id(),
                title,
                url,
                seconds,
                note,
            })],
        }
    }

    fn edit(&mut self, id: String) -> Vec<Effect> {
        let Some(marker) = self.markers.iter().find(|m| m.id == id) else {
            return vec![];
        };

        let form = FormInput {
            title: marker.title.clone().unwrap_or_default(),
            url: marker.url.clone(),
            time: seconds_to_time(marker.seconds),
            note: marker.note.clone().unwrap_or_default(),
        };
        self.editing_id = Some(id);
        self.set_feedback(FeedbackKind::Warn, "Editing marker…");
        vec![Effect::FillForm(form)]
    }

    fn export(&mut self) -> Vec<Effect> {
        if self.markers.is_empty() {
            self.set_feedback(FeedbackKind::Warn, "No markers to export");
            return vec![];
        }

        match export_json(&self.markers) {
            Ok(json) => {
                self.set_feedback(FeedbackKind::Ok, "Markers exported");
                vec![Effect::DownloadFile { json }]
            }
            Err(_) => {
                self.set_feedback(FeedbackKind::Err, "Failed to export markers");
                vec![]
            }
        }
    }

    fn set_feedback(&mut self, kind: FeedbackKind, message: impl Into<String>) {
        self.feedback = Some(Feedback {
            message: message.into(),
            kind,
        });
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
