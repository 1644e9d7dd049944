//! The compiled template body: literal runs interleaved with dotted
//! field lookups, resolved against a JSON value at render time.

use serde_json::Value;

use crate::TemplateError;

/// Rendered in place of an unresolved or null placeholder.
pub(crate) const NO_VALUE: &str = "<no value>";

#[derive(Debug, Clone)]
pub(crate) struct Template {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    /// `{{.A.B}}`; an empty path is `{{.}}`, the whole render value.
    Field(Vec<String>),
}

impl Template {
    /// Compile `text` under `name` (used in parse diagnostics).
    pub(crate) fn parse(name: &str, text: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = text;
        while let Some(open) = rest.find("{{") {
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_owned()));
            }
            let after = &rest[open + 2..];
            let Some(close) = after.find("}}") else {
                return Err(TemplateError::Parse {
                    name: name.to_owned(),
                    detail: "unclosed action".to_owned(),
                });
            };
            segments.push(parse_action(name, after[..close].trim())?);
            rest = &after[close + 2..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_owned()));
        }
        Ok(Self { segments })
    }

    pub(crate) fn render(&self, data: &Value) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(path) => out.push_str(&lookup(data, path)),
            }
        }
        out
    }
}

fn parse_action(name: &str, action: &str) -> Result<Segment, TemplateError> {
    let Some(path) = action.strip_prefix('.') else {
        return Err(TemplateError::Parse {
            name: name.to_owned(),
            detail: format!("unsupported action '{action}'"),
        });
    };
    if path.is_empty() {
        return Ok(Segment::Field(Vec::new()));
    }
    let mut fields = Vec::new();
    for part in path.split('.') {
        if part.is_empty() {
            return Err(TemplateError::Parse {
                name: name.to_owned(),
                detail: format!("empty field in action '.{path}'"),
            });
        }
        fields.push(part.to_owned());
    }
    Ok(Segment::Field(fields))
}

fn lookup(data: &Value, path: &[String]) -> String {
    let mut current = data;
    for field in path {
        match current.get(field) {
            Some(value) => current = value,
            None => return NO_VALUE.to_owned(),
        }
    }
    match current {
        Value::Null => NO_VALUE.to_owned(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
