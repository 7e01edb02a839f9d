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

use crate::error::Error;

/// Settings passed by `protoc` through `--elm_opt=a,b,c`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    /// Raise logging to debug and dump each input schema.
    pub debug: bool,
    /// Skip deprecated messages, fields, enums and enum values.
    pub remove_deprecated: bool,
    /// Path of the auxiliary options file.
    pub options: Option<PathBuf>,
}

impl Parameters {
    pub fn parse(parameter: Option<&str>) -> Result<Parameters, Error> {
        let mut parameters = Parameters::default();
        for entry in parameter.unwrap_or_default().split(',').map(str::trim) {
            match entry.split_once('=') {
                _ if entry.is_empty() => (),
                None if entry == "debug" => parameters.debug = true,
                None if entry == "remove-deprecated" => parameters.remove_deprecated = true,
                Some(("options", path)) if !path.is_empty() => {
                    parameters.options = Some(PathBuf::from(path))
                }
                _ => return Err(Error::UnknownParameter(entry.to_owned())),
            }
        }
        Ok(parameters)
    }
}
