//! Structured documentation (spec §4.6 "Documentation"): man-page troff,
//! Markdown, and reStructuredText, hand-built by string concatenation,
//! plus YAML and JSON tool-call schemas via `serde`/`serde_yaml` for
//! feeding a field set to an LLM as a callable tool.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{json, Value};

use crate::field::{Field, FieldKind};

fn visible(fields: &[Field]) -> impl Iterator<Item = &Field> {
    fields.iter().filter(|f| !f.is_separator() && !f.hidden)
}

fn flag_spelling(f: &Field) -> String {
    match f.short {
        Some(c) => format!("-{}, --{}", c, f.display_name),
        None => format!("--{}", f.display_name),
    }
}

/// Markdown table of positionals and flags.
pub fn markdown(program: &str, fields: &[Field]) -> String {
    let mut out = format!("# {}\n\n", program);
    let positionals: Vec<&Field> = visible(fields).filter(|f| f.kind == FieldKind::Positional).collect();
    if !positionals.is_empty() {
        out.push_str("## Arguments\n\n| Name | Description |\n| --- | --- |\n");
        for p in positionals {
            out.push_str(&format!("| `{}` | {} |\n", p.display_name, p.description));
        }
        out.push('\n');
    }
    let flags: Vec<&Field> = visible(fields).filter(|f| f.kind == FieldKind::Flag).collect();
    if !flags.is_empty() {
        out.push_str("## Options\n\n| Flag | Type | Required | Description |\n| --- | --- | --- | --- |\n");
        for f in flags {
            let ty = if f.boolean { "flag".to_string() } else { f.ty.clone() };
            out.push_str(&format!("| `{}` | {} | {} | {} |\n", flag_spelling(f), ty, f.required, f.description));
        }
    }
    out
}

/// reStructuredText equivalent of [`markdown`].
pub fn rst(program: &str, fields: &[Field]) -> String {
    let mut out = format!("{}\n{}\n\n", program, "=".repeat(program.len()));
    let positionals: Vec<&Field> = visible(fields).filter(|f| f.kind == FieldKind::Positional).collect();
    if !positionals.is_empty() {
        out.push_str("Arguments\n---------\n\n");
        for p in positionals {
            out.push_str(&format!("``{}``\n    {}\n\n", p.display_name, p.description));
        }
    }
    let flags: Vec<&Field> = visible(fields).filter(|f| f.kind == FieldKind::Flag).collect();
    if !flags.is_empty() {
        out.push_str("Options\n-------\n\n");
        for f in flags {
            out.push_str(&format!("``{}``\n    {}\n\n", flag_spelling(f), f.description));
        }
    }
    out
}

/// Minimal troff man page (section 1, the only section argsh-described
/// programs need), grounded on the layout `examples/pacak-bpaf/src/manpage.rs`
/// builds for bpaf's own `roff` writer.
pub fn man(program: &str, fields: &[Field]) -> String {
    let mut out = format!(".TH {} 1\n.SH NAME\n{}\n.SH SYNOPSIS\n", program.to_uppercase(), program);
    out.push_str(&format!(".B {}\n", program));
    for f in visible(fields) {
        match f.kind {
            FieldKind::Positional => out.push_str(&format!("[\\fI{}\\fR]\n", f.display_name)),
            FieldKind::Flag => out.push_str(&format!("[\\fB{}\\fR]\n", flag_spelling(f))),
            FieldKind::Separator => {}
        }
    }
    out.push_str(".SH OPTIONS\n");
    for f in visible(fields) {
        if f.kind != FieldKind::Flag {
            continue;
        }
        out.push_str(&format!(".TP\n\\fB{}\\fR\n{}\n", flag_spelling(f), f.description));
    }
    out
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub ty: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParametersSchema {
    #[serde(rename = "type")]
    pub ty: String,
    pub properties: BTreeMap<String, PropertySchema>,
    pub required: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub parameters: ParametersSchema,
}

fn json_type(f: &Field) -> String {
    if f.boolean {
        return "boolean".to_string();
    }
    match f.ty.as_str() {
        "int" => "integer",
        "float" => "number",
        "boolean" => "boolean",
        _ => "string",
    }
    .to_string()
}

/// Build the schema shared between the YAML and `llm` doc formats from a
/// field set (positionals and flags alike — an LLM tool call has no
/// separate "positional" concept).
pub fn build_tool_schema(name: &str, description: &str, fields: &[Field]) -> ToolSchema {
    let mut properties = BTreeMap::new();
    let mut required = Vec::new();
    for f in visible(fields) {
        if f.kind == FieldKind::Separator {
            continue;
        }
        properties.insert(f.name.clone(), PropertySchema { ty: json_type(f), description: f.description.clone() });
        if f.required {
            required.push(f.name.clone());
        }
    }
    ToolSchema {
        name: name.to_string(),
        description: description.to_string(),
        parameters: ParametersSchema { ty: "object".to_string(), properties, required },
    }
}

/// `docgen yaml` (spec §6 format set).
pub fn yaml(schema: &ToolSchema) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(schema)
}

#[derive(Debug, Clone, Copy)]
pub enum LlmVendor {
    OpenAi,
    Anthropic,
    Gemini,
}

/// `docgen llm openai|anthropic|gemini`: the three tool-call shapes each
/// vendor's API expects, all built from the same [`ToolSchema`].
pub fn llm_tool_call(vendor: LlmVendor, schema: &ToolSchema) -> Value {
    let parameters = serde_json::to_value(&schema.parameters).unwrap_or(Value::Null);
    match vendor {
        LlmVendor::OpenAi => json!({
            "type": "function",
            "function": {
                "name": schema.name,
                "description": schema.description,
                "parameters": parameters,
            }
        }),
        LlmVendor::Anthropic => json!({
            "name": schema.name,
            "description": schema.description,
            "input_schema": parameters,
        }),
        LlmVendor::Gemini => json!({
            "name": schema.name,
            "description": schema.description,
            "parameters": parameters,
        }),
    }
}
