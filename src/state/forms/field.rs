//! Form field value objects

use crate::pricing;

/// Type-safe field values
#[derive(Debug, Clone)]
pub enum FieldValue {
    Text(String),
    /// Numeric entry kept as a raw text buffer so partially-typed values
    /// ("12.", "-") survive between keystrokes; arithmetic goes through
    /// [`pricing::parse_amount`].
    Number(String),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: FieldValue,
    pub masked: bool,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Text(String::new()),
            masked: false,
        }
    }

    /// Create a new text field with initial value
    pub fn text_with_value(name: &str, label: &str, value: String) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Text(value),
            masked: false,
        }
    }

    /// Create a password field (rendered masked)
    pub fn password(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Text(String::new()),
            masked: true,
        }
    }

    /// Create a numeric field
    pub fn number(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Number(String::new()),
            masked: false,
        }
    }

    /// Create a numeric field seeded from a stored amount
    pub fn number_with_value(name: &str, label: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Number(format_number(value)),
            masked: false,
        }
    }

    /// Get the raw text of the field (numeric fields return their buffer)
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) | FieldValue::Number(s) => s,
        }
    }

    /// Parse a numeric field's buffer, defaulting to 0.0
    pub fn as_amount(&self) -> f64 {
        pricing::parse_amount(self.as_text())
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        match &mut self.value {
            FieldValue::Text(s) => s.push(c),
            FieldValue::Number(s) => {
                // Only digits, one decimal point, and a leading minus
                let accept = c.is_ascii_digit()
                    || (c == '.' && !s.contains('.'))
                    || (c == '-' && s.is_empty());
                if accept {
                    s.push(c);
                }
            }
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) | FieldValue::Number(s) => {
                s.pop();
            }
        }
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) | FieldValue::Number(s) => s.clear(),
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        if self.masked {
            "•".repeat(self.as_text().chars().count())
        } else {
            self.as_text().to_string()
        }
    }
}

/// Render a stored amount back into an editable buffer without a trailing
/// ".0" for whole numbers.
pub fn format_number(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
