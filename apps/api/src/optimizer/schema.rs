// Declared output schemas for structured completions
//
// The same descriptor is rendered to JSON Schema for the provider and used
// to check whatever the provider sends back.

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::debug;

use super::types::{AssignmentPlan, WorkOrderPlan};

/// Shape of a single field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    String,
    Number,
    Array(Box<FieldType>),
    Object(Vec<FieldSpec>),
}

/// A named field inside an object schema
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub field_type: FieldType,
    pub required: bool,
    pub description: &'static str,
}

impl FieldSpec {
    pub fn required(name: &'static str, field_type: FieldType, description: &'static str) -> Self {
        Self {
            name,
            field_type,
            required: true,
            description,
        }
    }
}

/// Top-level object schema with a name the provider can echo back
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSchema {
    pub name: &'static str,
    pub fields: Vec<FieldSpec>,
}

/// A response that does not match the declared schema
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{path}: {message}")]
pub struct SchemaViolation {
    /// JSON path of the offending value, rooted at `$`
    pub path: String,
    pub message: String,
}

impl SchemaViolation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl OutputSchema {
    /// Render as JSON Schema suitable for strict structured-output mode
    ///
    /// Every object closes `additionalProperties` and lists all of its
    /// required fields.
    pub fn to_json_schema(&self) -> Value {
        object_schema(&self.fields)
    }

    /// Check field presence and types
    ///
    /// Unknown extra fields are tolerated; missing or `null` required
    /// fields and mistyped values are not.
    pub fn validate(&self, value: &Value) -> Result<(), SchemaViolation> {
        validate_object(&self.fields, value, "$")
    }
}

fn object_schema(fields: &[FieldSpec]) -> Value {
    let mut properties = Map::new();
    for field in fields {
        let mut schema = type_schema(&field.field_type);
        if !field.description.is_empty() {
            schema["description"] = json!(field.description);
        }
        properties.insert(field.name.to_string(), schema);
    }

    let required: Vec<&str> = fields
        .iter()
        .filter(|f| f.required)
        .map(|f| f.name)
        .collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

fn type_schema(field_type: &FieldType) -> Value {
    match field_type {
        FieldType::String => json!({ "type": "string" }),
        FieldType::Number => json!({ "type": "number" }),
        FieldType::Array(items) => json!({ "type": "array", "items": type_schema(items) }),
        FieldType::Object(fields) => object_schema(fields),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn validate_value(field_type: &FieldType, value: &Value, path: &str) -> Result<(), SchemaViolation> {
    match field_type {
        FieldType::String if value.is_string() => Ok(()),
        FieldType::Number if value.is_number() => Ok(()),
        FieldType::String => Err(SchemaViolation::new(
            path,
            format!("expected string, found {}", kind_of(value)),
        )),
        FieldType::Number => Err(SchemaViolation::new(
            path,
            format!("expected number, found {}", kind_of(value)),
        )),
        FieldType::Array(items) => {
            let elements = value.as_array().ok_or_else(|| {
                SchemaViolation::new(path, format!("expected array, found {}", kind_of(value)))
            })?;
            for (index, element) in elements.iter().enumerate() {
                validate_value(items, element, &format!("{}[{}]", path, index))?;
            }
            Ok(())
        }
        FieldType::Object(fields) => validate_object(fields, value, path),
    }
}

fn validate_object(fields: &[FieldSpec], value: &Value, path: &str) -> Result<(), SchemaViolation> {
    let object = value.as_object().ok_or_else(|| {
        SchemaViolation::new(path, format!("expected object, found {}", kind_of(value)))
    })?;

    for field in fields {
        let field_path = format!("{}.{}", path, field.name);
        match object.get(field.name) {
            None | Some(Value::Null) if field.required => {
                return Err(SchemaViolation::new(field_path, "missing required field"));
            }
            None | Some(Value::Null) => {}
            Some(field_value) => validate_value(&field.field_type, field_value, &field_path)?,
        }
    }

    Ok(())
}

/// A typed response that can be checked against its declared schema
pub trait StructuredOutput: DeserializeOwned {
    fn output_schema() -> OutputSchema;

    /// Semantic checks the schema cannot express, applied after decoding
    fn normalize(self) -> Result<Self, SchemaViolation> {
        Ok(self)
    }

    /// Validate, decode and normalize a raw provider payload
    fn from_structured(value: Value) -> Result<Self, SchemaViolation> {
        Self::output_schema().validate(&value)?;
        let decoded: Self =
            serde_json::from_value(value).map_err(|e| SchemaViolation::new("$", e.to_string()))?;
        decoded.normalize()
    }
}

fn require_text(value: &str, path: String) -> Result<(), SchemaViolation> {
    if value.trim().is_empty() {
        return Err(SchemaViolation::new(path, "must not be empty"));
    }
    Ok(())
}

/// Schema for the batch complaint-to-worker plan
pub fn assignment_plan_schema() -> OutputSchema {
    OutputSchema {
        name: "assignment_plan",
        fields: vec![
            FieldSpec::required(
                "assignments",
                FieldType::Array(Box::new(FieldType::Object(vec![
                    FieldSpec::required(
                        "workItemId",
                        FieldType::String,
                        "The ID of the complaint to be addressed.",
                    ),
                    FieldSpec::required(
                        "agentId",
                        FieldType::String,
                        "The ID of the worker assigned to the complaint.",
                    ),
                    FieldSpec::required(
                        "rationale",
                        FieldType::String,
                        "Why this worker suits this complaint, considering skills, location and the kind of waste.",
                    ),
                ]))),
                "One entry per complaint.",
            ),
            FieldSpec::required(
                "summary",
                FieldType::String,
                "A brief, high-level summary of the assignment strategy.",
            ),
        ],
    }
}

/// Schema for ranked suggestions on a single work order
pub fn work_order_schema() -> OutputSchema {
    OutputSchema {
        name: "work_order_suggestions",
        fields: vec![FieldSpec::required(
            "suggestedAssignments",
            FieldType::Array(Box::new(FieldType::Object(vec![
                FieldSpec::required(
                    "agentId",
                    FieldType::String,
                    "The worker ID suggested for the work order.",
                ),
                FieldSpec::required(
                    "reasoning",
                    FieldType::String,
                    "Reasoning covering proximity, skills and past performance.",
                ),
                FieldSpec::required(
                    "confidenceScore",
                    FieldType::Number,
                    "Confidence in the suggestion from 0.0 to 1.0.",
                ),
            ]))),
            "Suggested workers for the work order.",
        )],
    }
}

impl StructuredOutput for AssignmentPlan {
    fn output_schema() -> OutputSchema {
        assignment_plan_schema()
    }

    fn normalize(self) -> Result<Self, SchemaViolation> {
        for (index, assignment) in self.assignments.iter().enumerate() {
            let path = format!("$.assignments[{}]", index);
            require_text(&assignment.work_item_id, format!("{}.workItemId", path))?;
            require_text(&assignment.agent_id, format!("{}.agentId", path))?;
            require_text(&assignment.rationale, format!("{}.rationale", path))?;
        }
        Ok(self)
    }
}

impl StructuredOutput for WorkOrderPlan {
    fn output_schema() -> OutputSchema {
        work_order_schema()
    }

    fn normalize(mut self) -> Result<Self, SchemaViolation> {
        for (index, suggestion) in self.suggested_assignments.iter_mut().enumerate() {
            let path = format!("$.suggestedAssignments[{}]", index);
            require_text(&suggestion.agent_id, format!("{}.agentId", path))?;
            require_text(&suggestion.reasoning, format!("{}.reasoning", path))?;

            let score = suggestion.confidence_score;
            if !score.is_finite() {
                return Err(SchemaViolation::new(
                    format!("{}.confidenceScore", path),
                    "must be a finite number",
                ));
            }
            let clamped = score.clamp(0.0, 1.0);
            if clamped != score {
                debug!(
                    agent_id = %suggestion.agent_id,
                    reported = score,
                    "Clamped out-of-range confidence score"
                );
            }
            suggestion.confidence_score = clamped;
        }
        Ok(self)
    }
}
