//! Structured-output schemas sent alongside every generation request.
//!
//! A [`Schema`] is provider neutral. Gemini wants the OpenAPI subset with
//! upper-case type names, OpenAI-compatible endpoints want plain JSON Schema
//! with `additionalProperties: false` for strict mode.

use serde_json::{Map, Value, json};

#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    String,
    Number,
    Array(Box<Schema>),
    /// Every property is required.
    Object(Vec<(&'static str, Schema)>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub kind: SchemaKind,
    pub description: Option<&'static str>,
}

impl Schema {
    pub fn string() -> Self {
        Self { kind: SchemaKind::String, description: None }
    }

    pub fn number() -> Self {
        Self { kind: SchemaKind::Number, description: None }
    }

    pub fn array(items: Schema) -> Self {
        Self { kind: SchemaKind::Array(Box::new(items)), description: None }
    }

    pub fn object(properties: Vec<(&'static str, Schema)>) -> Self {
        Self { kind: SchemaKind::Object(properties), description: None }
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// Property names of an object schema, in declaration order.
    pub fn property_names(&self) -> Vec<&'static str> {
        match &self.kind {
            SchemaKind::Object(properties) => properties.iter().map(|(name, _)| *name).collect(),
            _ => Vec::new(),
        }
    }

    pub fn property(&self, name: &str) -> Option<&Schema> {
        match &self.kind {
            SchemaKind::Object(properties) => {
                properties.iter().find(|(key, _)| *key == name).map(|(_, schema)| schema)
            }
            _ => None,
        }
    }

    pub fn items(&self) -> Option<&Schema> {
        match &self.kind {
            SchemaKind::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Gemini `responseSchema` (OpenAPI subset).
    pub fn to_gemini(&self) -> Value {
        let mut node = Map::new();
        match &self.kind {
            SchemaKind::String => {
                node.insert("type".into(), json!("STRING"));
            }
            SchemaKind::Number => {
                node.insert("type".into(), json!("NUMBER"));
            }
            SchemaKind::Array(items) => {
                node.insert("type".into(), json!("ARRAY"));
                node.insert("items".into(), items.to_gemini());
            }
            SchemaKind::Object(properties) => {
                node.insert("type".into(), json!("OBJECT"));
                let props: Map<String, Value> = properties
                    .iter()
                    .map(|(name, schema)| (name.to_string(), schema.to_gemini()))
                    .collect();
                node.insert("properties".into(), Value::Object(props));
                node.insert("required".into(), json!(self.property_names()));
            }
        }
        if let Some(description) = self.description {
            node.insert("description".into(), json!(description));
        }
        Value::Object(node)
    }

    /// Strict JSON Schema for OpenAI-compatible `response_format`.
    pub fn to_json_schema(&self) -> Value {
        let mut node = Map::new();
        match &self.kind {
            SchemaKind::String => {
                node.insert("type".into(), json!("string"));
            }
            SchemaKind::Number => {
                node.insert("type".into(), json!("number"));
            }
            SchemaKind::Array(items) => {
                node.insert("type".into(), json!("array"));
                node.insert("items".into(), items.to_json_schema());
            }
            SchemaKind::Object(properties) => {
                node.insert("type".into(), json!("object"));
                let props: Map<String, Value> = properties
                    .iter()
                    .map(|(name, schema)| (name.to_string(), schema.to_json_schema()))
                    .collect();
                node.insert("properties".into(), Value::Object(props));
                node.insert("required".into(), json!(self.property_names()));
                node.insert("additionalProperties".into(), json!(false));
            }
        }
        if let Some(description) = self.description {
            node.insert("description".into(), json!(description));
        }
        Value::Object(node)
    }
}

fn segment_properties(described: bool) -> Vec<(&'static str, Schema)> {
    if described {
        vec![
            (
                "narration",
                Schema::string().describe("The spoken narration text for this segment."),
            ),
            (
                "visual",
                Schema::string()
                    .describe("Detailed visual description for the video footage or animation."),
            ),
        ]
    } else {
        vec![("narration", Schema::string()), ("visual", Schema::string())]
    }
}

/// Full generation: `{script: [segment], analysis: {...}}`.
pub fn script_schema() -> Schema {
    Schema::object(vec![
        ("script", Schema::array(Schema::object(segment_properties(false)))),
        (
            "analysis",
            Schema::object(vec![
                ("score", Schema::number().describe("A score out of 10 for viral potential.")),
                (
                    "headline",
                    Schema::string().describe("A 3-5 word summary of why this script works."),
                ),
                (
                    "viralFactors",
                    Schema::array(Schema::string())
                        .describe("3 bullet points explaining the strengths."),
                ),
                (
                    "platformTips",
                    Schema::array(Schema::string())
                        .describe("2 specific tips to maximize reach on the chosen platform."),
                ),
            ]),
        ),
    ])
}

/// Single-scene regeneration: `{narration, visual}`.
pub fn segment_schema() -> Schema {
    Schema::object(segment_properties(true))
}
