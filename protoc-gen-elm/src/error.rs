// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::PathBuf;

use crate::analyzer::Diagnostics;

/// Fatal generator errors. None of them are recovered from: the plugin
/// stops and writes no response.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed code generator request: {0}")]
    MalformedRequest(#[from] prost::DecodeError),

    #[error("file to generate {0} is missing from the request")]
    MissingFile(String),

    #[error("unknown parameter `{0}`")]
    UnknownParameter(String),

    #[error("invalid options file {}: {reason}", path.display())]
    InvalidOptions { path: PathBuf, reason: String },

    #[error("{file}: unsupported syntax `{syntax}`")]
    UnsupportedSyntax { file: String, syntax: String },

    #[error("{file}: field {field} has unsupported type {ty}")]
    UnsupportedFieldType { file: String, field: String, ty: String },

    #[error("{file}: field {field} references unknown type `{type_name}`")]
    UnresolvedType { file: String, field: String, type_name: String },

    #[error("{file}: map entry {message} has {count} fields, expected 2")]
    MalformedMapEntry { file: String, message: String, count: usize },

    #[error("{file}: enum {name} has no values")]
    EmptyEnum { file: String, name: String },

    #[error("{file}: required field {field} has no default value")]
    MissingDefault { file: String, field: String },

    #[error("{file}: field {field} uses undeclared custom type `{key}`")]
    UnknownTypeOverride { file: String, field: String, key: String },

    #[error("{file}: {} identifier collision(s) in generated code", diagnostics.diagnostics.len())]
    IdentifierCollision { file: String, diagnostics: Diagnostics },
}
