use crate::error::FormError;
use serde::Deserialize;
use serde_yaml::Value;
use std::fmt;
use std::ops::Deref;
use std::path::Path;

/// Schema text coerced from any YAML scalar, so `value: 3` and
/// `value: "3"` read the same.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Scalar")]
pub struct Text(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl From<Scalar> for Text {
    fn from(scalar: Scalar) -> Self {
        Text(match scalar {
            Scalar::Str(s) => s,
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Bool(b) => b.to_string(),
        })
    }
}

impl Deref for Text {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    Text,
    Radio,
    Checkbox,
    Number,
    Textarea,
    Ranking,
    StarRating,
    Likert,
    Range,
    Importance,
}

impl FieldKind {
    pub const ALL: [FieldKind; 10] = [
        FieldKind::Text,
        FieldKind::Radio,
        FieldKind::Checkbox,
        FieldKind::Number,
        FieldKind::Textarea,
        FieldKind::Ranking,
        FieldKind::StarRating,
        FieldKind::Likert,
        FieldKind::Range,
        FieldKind::Importance,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Radio => "radio",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Number => "number",
            FieldKind::Textarea => "textarea",
            FieldKind::Ranking => "ranking",
            FieldKind::StarRating => "star-rating",
            FieldKind::Likert => "likert",
            FieldKind::Range => "range",
            FieldKind::Importance => "importance",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.tag() == tag)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FollowUpKind {
    Text,
    Number,
    Textarea,
    Radio,
}

impl FollowUpKind {
    pub const ALL: [FollowUpKind; 4] = [
        FollowUpKind::Text,
        FollowUpKind::Number,
        FollowUpKind::Textarea,
        FollowUpKind::Radio,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            FollowUpKind::Text => "text",
            FollowUpKind::Number => "number",
            FollowUpKind::Textarea => "textarea",
            FollowUpKind::Radio => "radio",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.tag() == tag)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormSchema {
    pub title: Text,
    #[serde(default)]
    pub description: Option<Text>,
    #[serde(default)]
    pub total_questions: Option<u64>,
    #[serde(default)]
    pub validation_presets: Option<serde_json::Value>,
    pub sections: Vec<Section>,
}

impl FormSchema {
    pub fn field_count(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }

    /// Count shown in the progress stats: the explicit override if the
    /// schema sets one, else the number of fields.
    pub fn total_questions(&self) -> u64 {
        self.total_questions
            .unwrap_or_else(|| self.field_count() as u64)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    pub name: Text,
    pub questions: Vec<Field>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Field {
    pub id: Text,
    pub title: Text,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub context: Option<Text>,
    pub help_text: Option<Text>,
    pub tooltip: Option<Text>,
    pub placeholder: Option<Text>,
    #[serde(default)]
    pub options: Vec<Choice>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub default: Option<f64>,
    pub unit: Option<Text>,
    pub show_value: Option<bool>,
    pub rows: Option<u32>,
    #[serde(default)]
    pub labels: ScaleLabels,
    pub min_label: Option<Text>,
    pub max_label: Option<Text>,
    #[serde(default)]
    pub reasoning: bool,
    #[serde(default)]
    pub comments: bool,
    #[serde(default)]
    pub follow_ups: Vec<FollowUp>,
    pub validation: Option<serde_json::Value>,
    pub show_if: Option<Text>,
    pub required_if: Option<Text>,
    pub disabled_if: Option<Text>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScaleLabels {
    pub min: Option<Text>,
    pub max: Option<Text>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub value: Text,
    pub label: Text,
    pub description: Option<Text>,
    #[serde(default)]
    pub recommended: bool,
    #[serde(default)]
    pub pros: Vec<Text>,
    #[serde(default)]
    pub cons: Vec<Text>,
    pub implementation: Option<Text>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FollowUp {
    pub title: Text,
    #[serde(rename = "type")]
    pub kind: FollowUpKind,
    pub placeholder: Option<Text>,
    #[serde(default)]
    pub options: Vec<Choice>,
}

/// Read, validate and type a schema file.
pub fn load_schema(path: &Path) -> Result<FormSchema, FormError> {
    if !path.exists() {
        return Err(FormError::NotFound(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path).map_err(|source| FormError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: Value = serde_yaml::from_str(&text).map_err(|source| FormError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;
    typed_schema(raw)
}

/// Parse schema text that did not come from a file.
pub fn parse_schema(text: &str) -> Result<FormSchema, FormError> {
    let raw: Value = serde_yaml::from_str(text)
        .map_err(|e| FormError::Invalid(format!("Invalid YAML: {e}")))?;
    typed_schema(raw)
}

fn typed_schema(raw: Value) -> Result<FormSchema, FormError> {
    validate_schema(&raw)?;
    serde_yaml::from_value(raw)
        .map_err(|e| FormError::Invalid(format!("Invalid form definition: {e}")))
}

/// Structural checks on the raw document. Stops at the first problem, in
/// document order.
pub fn validate_schema(raw: &Value) -> Result<(), FormError> {
    for key in ["title", "sections"] {
        if raw.get(key).is_none() {
            return invalid(format!("Missing required field: {key}"));
        }
    }

    let sections = match raw.get("sections").and_then(Value::as_sequence) {
        Some(seq) if !seq.is_empty() => seq,
        _ => return invalid("'sections' must be a non-empty list".to_string()),
    };

    for (idx, section) in sections.iter().enumerate() {
        let Some(name) = section.get("name") else {
            return invalid(format!("Section {idx} missing 'name' field"));
        };
        let name = scalar_text(name);

        let questions = match section.get("questions").and_then(Value::as_sequence) {
            Some(seq) if !seq.is_empty() => seq,
            _ => return invalid(format!("Section '{name}' has no questions")),
        };

        for (q_idx, question) in questions.iter().enumerate() {
            validate_question(q_idx, question, &name)?;
        }
    }
    Ok(())
}

fn validate_question(q_idx: usize, question: &Value, section: &str) -> Result<(), FormError> {
    let Some(id) = question.get("id") else {
        return invalid(format!("Question {q_idx} in section '{section}' missing 'id'"));
    };
    let id = scalar_text(id);

    if question.get("title").is_none() {
        return invalid(format!("Question '{id}' missing 'title'"));
    }
    let Some(kind) = question.get("type") else {
        return invalid(format!("Question '{id}' missing 'type'"));
    };
    let kind = scalar_text(kind);
    if FieldKind::from_tag(&kind).is_none() {
        return invalid(format!("Question '{id}' has unrecognized type '{kind}'"));
    }

    if let Some(options) = question.get("options").and_then(Value::as_sequence) {
        validate_options(options, |n, key| {
            format!("Option {n} of question '{id}' missing '{key}'")
        })?;
    }

    if let Some(follow_ups) = question.get("follow_ups").and_then(Value::as_sequence) {
        for (n, follow_up) in follow_ups.iter().enumerate() {
            if follow_up.get("title").is_none() {
                return invalid(format!("Follow-up {n} of question '{id}' missing 'title'"));
            }
            let Some(kind) = follow_up.get("type") else {
                return invalid(format!("Follow-up {n} of question '{id}' missing 'type'"));
            };
            let kind = scalar_text(kind);
            if FollowUpKind::from_tag(&kind).is_none() {
                return invalid(format!(
                    "Follow-up {n} of question '{id}' has unrecognized type '{kind}'"
                ));
            }
            if let Some(options) = follow_up.get("options").and_then(Value::as_sequence) {
                validate_options(options, |o, key| {
                    format!("Option {o} of follow-up {n} of question '{id}' missing '{key}'")
                })?;
            }
        }
    }
    Ok(())
}

fn validate_options(
    options: &[Value],
    message: impl Fn(usize, &str) -> String,
) -> Result<(), FormError> {
    for (n, option) in options.iter().enumerate() {
        for key in ["value", "label"] {
            if option.get(key).is_none() {
                return invalid(message(n, key));
            }
        }
    }
    Ok(())
}

fn invalid(message: String) -> Result<(), FormError> {
    Err(FormError::Invalid(message))
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
