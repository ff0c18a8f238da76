//! Event handling for the registration TUI

/// Application events produced by key handling
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Quit the application
    Quit,
    /// Validate and send the registration
    Submit,
    /// Close the notification popup
    DismissNotification,
    /// Show status message
    ShowStatus(String),
}
