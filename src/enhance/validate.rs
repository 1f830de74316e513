//! Client-side form validation for the contact form.

use once_cell::sync::Lazy;
use regex::Regex;
use std::time::{Duration, Instant};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d\s+\-()]+$").expect("valid phone regex"));

pub const MIN_PHONE_LEN: usize = 10;
pub const MESSAGE_LIMIT: usize = 1000;
pub const COUNTER_WARNING_BELOW: i64 = 50;
pub const SUBMIT_RESET_AFTER: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    TextArea,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl FieldSpec {
    pub fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            min_length: None,
            max_length: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    fn is_phone(&self) -> bool {
        self.name == "phone" || self.kind == FieldKind::Tel
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldStatus {
    /// Never validated, or validated while empty and optional
    #[default]
    Untouched,
    Valid,
    Invalid(String),
}

impl FieldStatus {
    pub fn is_invalid(&self) -> bool {
        matches!(self, FieldStatus::Invalid(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FieldStatus::Invalid(message) => Some(message),
            _ => None,
        }
    }
}

/// Check one value against its field rules; the first failing rule wins
pub fn validate_field(spec: &FieldSpec, value: &str) -> FieldStatus {
    let value = value.trim();
    let len = value.chars().count();

    if spec.required && value.is_empty() {
        return FieldStatus::Invalid("This field is required".into());
    }
    if spec.kind == FieldKind::Email && !value.is_empty() && !EMAIL_RE.is_match(value) {
        return FieldStatus::Invalid("Please enter a valid email address".into());
    }
    if spec.is_phone() && !value.is_empty() && (!PHONE_RE.is_match(value) || len < MIN_PHONE_LEN) {
        return FieldStatus::Invalid("Please enter a valid phone number".into());
    }
    if let Some(min) = spec.min_length {
        if len > 0 && len < min {
            return FieldStatus::Invalid(format!("Minimum {min} characters required"));
        }
    }
    if let Some(max) = spec.max_length {
        if len > max {
            return FieldStatus::Invalid(format!("Maximum {max} characters allowed"));
        }
    }

    if value.is_empty() {
        FieldStatus::Untouched
    } else {
        FieldStatus::Valid
    }
}

/// Strip everything but digits, as the phone input does on every keystroke
pub fn sanitize_phone(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// "N characters remaining" hint under a text area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterCounter {
    pub limit: usize,
}

impl Default for CharacterCounter {
    fn default() -> Self {
        Self { limit: MESSAGE_LIMIT }
    }
}

impl CharacterCounter {
    /// Can go negative; the field's own max length reports the error
    pub fn remaining(&self, text: &str) -> i64 {
        self.limit as i64 - text.chars().count() as i64
    }

    pub fn is_warning(&self, text: &str) -> bool {
        self.remaining(text) < COUNTER_WARNING_BELOW
    }

    pub fn label(&self, text: &str) -> String {
        format!("{} characters remaining", self.remaining(text))
    }
}

/// Submit button busy state
#[derive(Debug, Clone, Default)]
pub struct SubmitState {
    sending_since: Option<Instant>,
}

impl SubmitState {
    pub fn start(&mut self, now: Instant) {
        self.sending_since = Some(now);
    }

    pub fn is_sending(&self) -> bool {
        self.sending_since.is_some()
    }

    /// Re-enable the button once the reset delay has passed
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.sending_since {
            Some(since) if now.duration_since(since) >= SUBMIT_RESET_AFTER => {
                self.sending_since = None;
                true
            }
            _ => false,
        }
    }

    pub fn label<'a>(&self, idle: &'a str) -> &'a str {
        if self.is_sending() { "Sending..." } else { idle }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Index of the first invalid field, which should take focus
    Invalid(usize),
    Accepted,
}

/// A form's values and per-field validation state
#[derive(Debug, Clone)]
pub struct FormState {
    fields: Vec<FieldSpec>,
    values: Vec<String>,
    statuses: Vec<FieldStatus>,
    submit: SubmitState,
    digits_only_phone: bool,
}

impl FormState {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        let count = fields.len();
        Self {
            fields,
            values: vec![String::new(); count],
            statuses: vec![FieldStatus::Untouched; count],
            submit: SubmitState::default(),
            digits_only_phone: false,
        }
    }

    /// The contact page form: name, email, phone, subject and message
    pub fn contact() -> Self {
        let mut form = Self::new(vec![
            FieldSpec::new("name", "Name", FieldKind::Text)
                .required()
                .length(Some(2), Some(100)),
            FieldSpec::new("email", "Email", FieldKind::Email).required(),
            FieldSpec::new("phone", "Phone", FieldKind::Tel).length(None, Some(20)),
            FieldSpec::new("subject", "Subject", FieldKind::Text)
                .required()
                .length(Some(5), Some(200)),
            FieldSpec::new("message", "Message", FieldKind::TextArea)
                .required()
                .length(Some(10), Some(MESSAGE_LIMIT)),
        ]);
        form.digits_only_phone = true;
        form
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn value(&self, index: usize) -> &str {
        self.values.get(index).map(String::as_str).unwrap_or_default()
    }

    pub fn status(&self, index: usize) -> &FieldStatus {
        static UNTOUCHED: FieldStatus = FieldStatus::Untouched;
        self.statuses.get(index).unwrap_or(&UNTOUCHED)
    }

    pub fn submit_state(&self) -> &SubmitState {
        &self.submit
    }

    /// Input event: store the value and re-check fields already flagged invalid
    pub fn set_value(&mut self, index: usize, value: &str) {
        let Some(spec) = self.fields.get(index) else {
            return;
        };
        let value = if self.digits_only_phone && spec.name == "phone" {
            sanitize_phone(value)
        } else {
            value.to_string()
        };
        self.values[index] = value;
        if self.statuses[index].is_invalid() {
            self.blur(index);
        }
    }

    /// Blur event: validate the field
    pub fn blur(&mut self, index: usize) -> bool {
        let Some(spec) = self.fields.get(index) else {
            return true;
        };
        let status = validate_field(spec, &self.values[index]);
        let ok = !status.is_invalid();
        self.statuses[index] = status;
        ok
    }

    /// Validate every field. On success the submit button enters its busy state.
    pub fn submit(&mut self, now: Instant) -> SubmitOutcome {
        let mut first_invalid = None;
        for index in 0..self.fields.len() {
            if !self.blur(index) && first_invalid.is_none() {
                first_invalid = Some(index);
            }
        }

        match first_invalid {
            Some(index) => {
                tracing::debug!(field = self.fields[index].name, "form submission blocked");
                SubmitOutcome::Invalid(index)
            }
            None => {
                self.submit.start(now);
                SubmitOutcome::Accepted
            }
        }
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.submit.tick(now)
    }
}
