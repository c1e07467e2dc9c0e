use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One course section as it appears in the enriched catalog dump.
///
/// Only the fields the filter makes decisions on are typed; everything else
/// the upstream enrichment produced (title, times, instructors, ...) is
/// carried in `extra` and written back out untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSection {
    /// Course identifier, shared by all sections of the same course.
    pub code: String,
    /// Section label distinguishing parallel offerings ("S01", "L01", ...).
    pub section: String,
    /// Schedule-type tag. Opaque enumerated code; observed values are
    /// S, L, I, E, 0, C and F.
    pub schd: String,
    /// Sequential id assigned after filtering. Whatever the input carried
    /// here is meaningless and gets overwritten.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// All remaining input fields, passed through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CourseSection {
    /// Standard (non-lab) section.
    pub fn is_standard(&self) -> bool {
        self.schd == "S"
    }

    /// Lab section.
    pub fn is_lab(&self) -> bool {
        self.schd == "L"
    }

    /// First whitespace-delimited token of the course code, e.g. "CSCI"
    /// from "CSCI 0150".
    pub fn department(&self) -> &str {
        self.code.split_whitespace().next().unwrap_or(&self.code)
    }

    /// Whether the enrichment step attached usable enrollment data.
    pub fn has_enrollment_data(&self) -> bool {
        self.extra.get("max_enrollment").is_some_and(is_truthy)
    }

    /// Whether the section carries any course designations.
    pub fn has_designations(&self) -> bool {
        self.extra.get("designations").is_some_and(is_truthy)
    }
}

/// Truthiness of an opaque JSON value, matching the convention of the
/// upstream data: null, false, 0, "", [] and {} are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
