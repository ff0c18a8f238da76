//! Status display component for showing submission feedback

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::registration_tui::ui::Styles;

/// Types of status messages
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatusType {
    Info,
    Success,
    Warning,
    Error,
    Loading,
}

impl StatusType {
    pub fn style(&self) -> Style {
        match self {
            StatusType::Info => Styles::info(),
            StatusType::Success => Styles::success(),
            StatusType::Warning | StatusType::Loading => Styles::warning(),
            StatusType::Error => Styles::error(),
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            StatusType::Info => "ℹ",
            StatusType::Success => "✓",
            StatusType::Warning => "⚠",
            StatusType::Error => "✗",
            StatusType::Loading => "⟳",
        }
    }
}

/// Status message with type and content
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub message: String,
    pub status_type: StatusType,
    pub timestamp: chrono::DateTime<chrono::Local>,
}

impl StatusMessage {
    pub fn new(message: String, status_type: StatusType) -> Self {
        Self {
            message,
            status_type,
            timestamp: chrono::Local::now(),
        }
    }
}

/// Status display component
pub struct StatusDisplay {
    pub current_message: Option<StatusMessage>,
    pub message_history: Vec<StatusMessage>,
    pub max_history: usize,
    pub show_timestamp: bool,
}

impl Default for StatusDisplay {
    fn default() -> Self {
        Self {
            current_message: None,
            message_history: Vec::new(),
            max_history: 100,
            show_timestamp: false,
        }
    }
}

impl StatusDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self
    }

    pub fn with_timestamps(mut self) -> Self {
        self.show_timestamp = true;
        self
    }

    /// Set current status message
    pub fn set_message(&mut self, message: StatusMessage) {
        if let Some(current) = self.current_message.take() {
            self.message_history.push(current);

            if self.message_history.len() > self.max_history {
                self.message_history.remove(0);
            }
        }

        self.current_message = Some(message);
    }

    pub fn set_info(&mut self, message: String) {
        self.set_message(StatusMessage::new(message, StatusType::Info));
    }

    pub fn set_success(&mut self, message: String) {
        self.set_message(StatusMessage::new(message, StatusType::Success));
    }

    pub fn set_warning(&mut self, message: String) {
        self.set_message(StatusMessage::new(message, StatusType::Warning));
    }

    pub fn set_error(&mut self, message: String) {
        self.set_message(StatusMessage::new(message, StatusType::Error));
    }

    pub fn set_loading(&mut self, message: String) {
        self.set_message(StatusMessage::new(message, StatusType::Loading));
    }

    pub fn get_current(&self) -> Option<&StatusMessage> {
        self.current_message.as_ref()
    }

    pub fn get_history(&self) -> &[StatusMessage] {
        &self.message_history
    }

    /// Render the status display
    pub fn render(&self, f: &mut Frame, area: Rect, hint: &str) {
        let (content, style) = match &self.current_message {
            Some(message) => (self.format_message(message), message.status_type.style()),
            None => ("Ready".to_string(), Styles::default()),
        };

        let block = Block::default()
            .title(hint)
            .borders(Borders::ALL)
            .border_style(Styles::inactive_border());

        let paragraph = Paragraph::new(content).style(style).block(block);

        f.render_widget(paragraph, area);
    }

    /// Format message for display
    fn format_message(&self, message: &StatusMessage) -> String {
        let prefix = message.status_type.prefix();

        if self.show_timestamp {
            format!(
                "{} [{}] {}",
                prefix,
                message.timestamp.format("%H:%M:%S"),
                message.message
            )
        } else {
            format!("{} {}", prefix, message.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_bounded() {
        let mut status = StatusDisplay::new().with_history(2);
        status.set_info("one".to_string());
        status.set_warning("two".to_string());
        status.set_error("three".to_string());
        status.set_success("four".to_string());

        let history: Vec<&str> = status
            .get_history()
            .iter()
            .map(|m| m.message.as_str())
            .collect();
        assert_eq!(history, vec!["two", "three"]);

        let current = status.get_current().unwrap();
        assert_eq!(current.message, "four");
        assert_eq!(current.status_type, StatusType::Success);
    }

    #[test]
    fn test_format_message() {
        let status = StatusDisplay::new();
        let message = StatusMessage::new("Submitting".to_string(), StatusType::Loading);
        assert_eq!(status.format_message(&message), "⟳ Submitting");

        let status = StatusDisplay::new().with_timestamps();
        let formatted = status.format_message(&message);
        assert!(formatted.starts_with("⟳ ["));
        assert!(formatted.ends_with("] Submitting"));
    }
}
