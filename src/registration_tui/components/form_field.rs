//! Form field component for user input

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::registration_tui::{traits::FormHandler, ui::Styles};

/// Type of form field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormFieldType {
    Text,
    TextArea,
    Dropdown,
    Checkbox,
    Button,
}

/// Individual form field
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: String,
    pub value: String,
    pub placeholder: String,
    pub field_type: FormFieldType,
    pub required: bool,
    pub is_focused: bool,
    /// Cursor position in characters, not bytes
    pub cursor_position: usize,
    pub dropdown_options: Vec<String>,
    pub dropdown_state: ListState,
    pub show_dropdown: bool,
    pub checked: bool,
    pub validation_error: Option<String>,
}

impl FormField {
    pub fn new(label: &str, field_type: FormFieldType) -> Self {
        Self {
            label: label.to_string(),
            value: String::new(),
            placeholder: String::new(),
            field_type,
            required: false,
            is_focused: false,
            cursor_position: 0,
            dropdown_options: Vec::new(),
            dropdown_state: ListState::default(),
            show_dropdown: false,
            checked: false,
            validation_error: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_dropdown_options(mut self, options: Vec<String>) -> Self {
        self.dropdown_options = options;
        if !self.dropdown_options.is_empty() {
            self.dropdown_state.select(Some(0));
        }
        self
    }

    /// Whether typed characters edit the value
    pub fn is_editable(&self) -> bool {
        matches!(self.field_type, FormFieldType::Text | FormFieldType::TextArea)
    }

    /// Current value as the rest of the app should read it
    pub fn selected_value(&self) -> &str {
        &self.value
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.is_focused = focused;
        if focused && self.field_type == FormFieldType::Dropdown {
            self.show_dropdown = true;
        } else if !focused {
            self.show_dropdown = false;
        }
    }

    /// Replace the value and park the cursor at the end
    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor_position = self.value.chars().count();
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn insert_char(&mut self, c: char) {
        if !self.is_editable() {
            return;
        }
        let idx = self.byte_index(self.cursor_position);
        self.value.insert(idx, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.is_editable() && self.cursor_position > 0 {
            self.cursor_position -= 1;
            let idx = self.byte_index(self.cursor_position);
            self.value.remove(idx);
        }
    }

    pub fn delete_char_forward(&mut self) {
        if self.is_editable() && self.cursor_position < self.char_len() {
            let idx = self.byte_index(self.cursor_position);
            self.value.remove(idx);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.char_len() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor_position = self.char_len();
    }

    pub fn toggle(&mut self) {
        if self.field_type == FormFieldType::Checkbox {
            self.checked = !self.checked;
        }
    }

    /// Handle dropdown navigation
    pub fn dropdown_up(&mut self) {
        if self.dropdown_options.is_empty() {
            return;
        }
        self.show_dropdown = true;
        let selected = self.dropdown_state.selected().unwrap_or(0);
        let new_selected = if selected == 0 {
            self.dropdown_options.len() - 1
        } else {
            selected - 1
        };
        self.dropdown_state.select(Some(new_selected));
    }

    pub fn dropdown_down(&mut self) {
        if self.dropdown_options.is_empty() {
            return;
        }
        self.show_dropdown = true;
        let selected = self.dropdown_state.selected().unwrap_or(0);
        let new_selected = (selected + 1) % self.dropdown_options.len();
        self.dropdown_state.select(Some(new_selected));
    }

    /// Jump to the next option starting with `c`, wrapping around
    pub fn dropdown_jump(&mut self, c: char) {
        let len = self.dropdown_options.len();
        if len == 0 {
            return;
        }
        let needle = c.to_lowercase().to_string();
        let start = self.dropdown_state.selected().map(|i| i + 1).unwrap_or(0);
        let hit = (0..len)
            .map(|offset| (start + offset) % len)
            .find(|&i| self.dropdown_options[i].to_lowercase().starts_with(&needle));
        if let Some(i) = hit {
            self.show_dropdown = true;
            self.dropdown_state.select(Some(i));
        }
    }

    pub fn select_dropdown_value(&mut self) {
        if let Some(selected) = self.dropdown_state.selected() {
            if let Some(value) = self.dropdown_options.get(selected) {
                self.value = value.clone();
                self.cursor_position = self.value.chars().count();
                self.show_dropdown = false;
            }
        }
    }

    fn title(&self) -> String {
        let label = if self.required {
            format!("{} *", self.label)
        } else {
            self.label.clone()
        };

        match self.validation_error {
            Some(ref error) => format!("{} - {}", label, error),
            None => label,
        }
    }

    fn border_style(&self) -> Style {
        if self.validation_error.is_some() {
            Styles::error()
        } else if self.is_focused {
            Styles::active_border()
        } else {
            Styles::inactive_border()
        }
    }

    /// Render the form field
    pub fn render(&self, f: &mut Frame, area: Rect) {
        match self.field_type {
            FormFieldType::Checkbox => return self.render_checkbox(f, area),
            FormFieldType::Button => return self.render_button(f, area),
            _ => {}
        }

        let display_text = if self.value.is_empty() && !self.placeholder.is_empty() {
            &self.placeholder
        } else {
            &self.value
        };

        let block = Block::default()
            .title(self.title())
            .borders(Borders::ALL)
            .border_style(self.border_style());

        let text_style = if self.value.is_empty() && !self.placeholder.is_empty() {
            Styles::inactive()
        } else {
            Styles::default()
        };

        let mut paragraph = Paragraph::new(display_text.to_string())
            .style(text_style)
            .block(block);
        if self.field_type == FormFieldType::TextArea {
            paragraph = paragraph.wrap(Wrap { trim: false });
        }

        f.render_widget(paragraph, area);

        // Cursor follows embedded newlines in text areas
        if self.is_focused && self.is_editable() {
            let (line, column) = self.cursor_line_column();
            let column = u16::try_from(column).unwrap_or(u16::MAX);
            let line = u16::try_from(line).unwrap_or(u16::MAX);
            let cursor_x = area.x.saturating_add(1).saturating_add(column);
            let cursor_y = area.y.saturating_add(1).saturating_add(line);
            if cursor_x < area.right().saturating_sub(1)
                && cursor_y < area.bottom().saturating_sub(1)
            {
                f.set_cursor(cursor_x, cursor_y);
            }
        }
    }

    fn cursor_line_column(&self) -> (usize, usize) {
        let before: String = self.value.chars().take(self.cursor_position).collect();
        let line = before.matches('\n').count();
        let column = before.rsplit('\n').next().map(|s| s.chars().count()).unwrap_or(0);
        (line, column)
    }

    fn render_checkbox(&self, f: &mut Frame, area: Rect) {
        let mark = if self.checked { "[x]" } else { "[ ]" };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.border_style());
        let paragraph = Paragraph::new(format!("{} {}", mark, self.label))
            .style(if self.is_focused {
                Styles::selected()
            } else {
                Styles::default()
            })
            .wrap(Wrap { trim: true })
            .block(block);
        f.render_widget(paragraph, area);
    }

    fn render_button(&self, f: &mut Frame, area: Rect) {
        let style = if self.is_focused {
            Styles::selected()
        } else {
            Styles::button()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.border_style());
        let paragraph = Paragraph::new(self.label.clone())
            .alignment(Alignment::Center)
            .style(style)
            .block(block);
        f.render_widget(paragraph, area);
    }

    /// Render dropdown if visible
    pub fn render_dropdown(&mut self, f: &mut Frame, area: Rect) {
        if !self.show_dropdown || self.dropdown_options.is_empty() {
            return;
        }

        let items: Vec<ListItem> = self
            .dropdown_options
            .iter()
            .map(|option| ListItem::new(option.clone()))
            .collect();

        let block = Block::default()
            .title("Options")
            .borders(Borders::ALL)
            .border_style(Styles::active_border());

        let list = List::new(items)
            .block(block)
            .highlight_style(Styles::selected());

        f.render_stateful_widget(list, area, &mut self.dropdown_state);
    }
}

/// Form container that manages multiple fields
pub struct Form {
    pub fields: Vec<FormField>,
    pub current_field: usize,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        let mut form = Self {
            fields,
            current_field: 0,
        };
        form.update_focus();
        form
    }

    fn update_focus(&mut self) {
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.set_focus(i == self.current_field);
        }
    }

    pub fn current(&self) -> Option<&FormField> {
        self.fields.get(self.current_field)
    }

    pub fn current_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.current_field)
    }
}

impl FormHandler for Form {
    fn get_current_field(&self) -> usize {
        self.current_field
    }

    fn set_current_field(&mut self, field: usize) {
        if field < self.fields.len() {
            self.current_field = field;
            self.update_focus();
        }
    }

    fn get_field_count(&self) -> usize {
        self.fields.len()
    }

    fn handle_char_input(&mut self, c: char) {
        if let Some(field) = self.current_mut() {
            match field.field_type {
                FormFieldType::Dropdown => field.dropdown_jump(c),
                FormFieldType::Checkbox if c == ' ' => field.toggle(),
                _ => field.insert_char(c),
            }
        }
    }

    fn handle_backspace(&mut self) {
        if let Some(field) = self.current_mut() {
            field.delete_char();
        }
    }

    fn handle_delete(&mut self) {
        if let Some(field) = self.current_mut() {
            field.delete_char_forward();
        }
    }
}
