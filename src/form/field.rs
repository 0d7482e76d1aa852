//! Form field values and change events.

use std::collections::BTreeMap;

/// Field name → current value.
pub type Values = BTreeMap<String, FieldValue>;

/// Field name → validation message. A field is valid iff it has no entry.
pub type Errors = BTreeMap<String, String>;

/// Reserved error key for a failed submission.
pub const SUBMIT_KEY: &str = "submit";

/// Reference to a file picked in a file input.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileRef {
    pub name: String,
    pub size: u64,
}

/// Value of a form field.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    File(FileRef),
}

impl FieldValue {
    /// Text content used by length and format checks. Flags have none; files
    /// contribute their name.
    ///
    pub fn as_str(&self) -> &str {
        match self {
            FieldValue::Text(text) => text,
            FieldValue::Flag(_) => "",
            FieldValue::File(file) => &file.name,
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_owned())
    }
}

impl From<bool> for FieldValue {
    fn from(flag: bool) -> Self {
        FieldValue::Flag(flag)
    }
}

/// Raw change event coming from an input.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldEvent {
    /// Text-like input (text, password, textarea, select).
    Input(String),
    /// Checkbox toggled.
    Checkbox(bool),
    /// File picked.
    File(FileRef),
}

impl FieldEvent {
    /// Value the event assigns: checkboxes give a flag, files a file
    /// reference, everything else text.
    ///
    pub fn into_value(self) -> FieldValue {
        match self {
            FieldEvent::Input(text) => FieldValue::Text(text),
            FieldEvent::Checkbox(checked) => FieldValue::Flag(checked),
            FieldEvent::File(file) => FieldValue::File(file),
        }
    }
}

/// Text of `field` in `values`, empty when absent.
///
pub fn text<'a>(values: &'a Values, field: &str) -> &'a str {
    values.get(field).map(FieldValue::as_str).unwrap_or("")
}
