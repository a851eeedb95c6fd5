//! TUI module: Terminal User Interface using Ratatui.
//!
//! A single page holding the clinical data form, the medical glossary and,
//! after submission, the risk verdict.

mod app;
mod styles;
mod ui;

pub use app::{App, ArtifactService, SessionState, StatusMessage};
pub use styles::{MedicalTheme, StatusKind};
pub use ui::form::{FieldId, FormState};
