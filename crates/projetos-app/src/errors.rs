// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::Deserialize;
use std::fmt;

/// One element of a validation error location, e.g. `["body", "tipo"]` or `["body", 0]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LocPart {
    Name(String),
    Index(i64),
}

impl fmt::Display for LocPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub loc: Vec<LocPart>,
    pub msg: String,
}

impl FieldError {
    pub fn new(loc: &[&str], msg: &str) -> Self {
        Self {
            loc: loc
                .iter()
                .map(|part| LocPart::Name((*part).to_owned()))
                .collect(),
            msg: msg.to_owned(),
        }
    }

    /// The field name: the second location entry, or the last one for short locations.
    pub fn field(&self) -> String {
        self.loc
            .get(1)
            .or_else(|| self.loc.last())
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    pub fn describe(&self) -> String {
        format!("Campo '{}': {}", self.field(), self.msg)
    }
}

#[derive(Debug, Deserialize)]
struct ValidationBody {
    detail: Vec<FieldError>,
}

#[derive(Debug, Deserialize)]
struct DetailBody {
    detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {message}")]
    Network { message: String },
    #[error("validation failed: {}", format_field_errors(.0))]
    Validation(Vec<FieldError>),
    #[error("server returned {status}")]
    Server { status: u16, detail: Option<String> },
    #[error("decode response: {message}")]
    Decode { message: String },
}

impl ApiError {
    /// Classifies a non-2xx response from its status and raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        if status == 422
            && let Ok(parsed) = serde_json::from_str::<ValidationBody>(body)
        {
            return Self::Validation(parsed.detail);
        }

        let detail = serde_json::from_str::<DetailBody>(body)
            .ok()
            .map(|parsed| parsed.detail)
            .filter(|detail| !detail.is_empty());
        Self::Server { status, detail }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Validation(_) => Some(422),
            Self::Server { status, .. } => Some(*status),
            Self::Network { .. } | Self::Decode { .. } => None,
        }
    }
}

/// Joins every field error as `Campo '<field>': <msg>`, one per line.
pub fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(FieldError::describe)
        .collect::<Vec<_>>()
        .join("\n")
}
