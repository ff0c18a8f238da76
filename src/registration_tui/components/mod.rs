//! Reusable UI components for the registration TUI

pub mod form_field;
pub mod status_display;

pub use form_field::{Form, FormField, FormFieldType};
pub use status_display::{StatusDisplay, StatusMessage, StatusType};
