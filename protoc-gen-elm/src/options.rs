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

//! Auxiliary JSON configuration selected with the `options=<path>`
//! parameter.
//!
//! ```json
//! {
//!   "types": {
//!     ".google.protobuf.Duration": {
//!       "type": "Duration",
//!       "decoder": "durationDecoder",
//!       "encoder": "durationEncoder",
//!       "default": "zeroDuration"
//!     }
//!   },
//!   "files": {
//!     "foo/bar.proto": {
//!       "imports": ["Extra.Codecs"],
//!       "fields": {
//!         "foo.Bar.amount": { "type": ".google.protobuf.Duration", "required": true }
//!       }
//!     }
//!   }
//! }
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Error;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorOptions {
    /// Custom codecs, keyed by fully-qualified schema type name or by an
    /// alias referenced from field options.
    pub types: BTreeMap<String, CustomType>,
    /// Per schema file settings, keyed by file name.
    pub files: BTreeMap<String, FileOptions>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomType {
    #[serde(rename = "type")]
    pub elm_type: String,
    pub decoder: String,
    pub encoder: String,
    #[serde(default)]
    pub default: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileOptions {
    pub imports: Vec<String>,
    /// Keyed by `package.Message.field`.
    pub fields: BTreeMap<String, FieldOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldOptions {
    /// Key into [`GeneratorOptions::types`].
    #[serde(rename = "type")]
    pub type_override: Option<String>,
    pub required: bool,
}

impl GeneratorOptions {
    pub fn from_json(path: &Path, text: &str) -> Result<GeneratorOptions, Error> {
        serde_json::from_str(text)
            .map_err(|err| Error::InvalidOptions { path: path.to_owned(), reason: err.to_string() })
    }

    pub fn load(path: &Path) -> Result<GeneratorOptions, Error> {
        let text = std::fs::read_to_string(path).map_err(|err| Error::InvalidOptions {
            path: path.to_owned(),
            reason: err.to_string(),
        })?;
        let options = Self::from_json(path, &text)?;
        tracing::debug!(
            "loaded {} custom type(s) and {} file section(s) from {}",
            options.types.len(),
            options.files.len(),
            path.display()
        );
        Ok(options)
    }

    pub fn file(&self, name: &str) -> Option<&FileOptions> {
        self.files.get(name)
    }
}
