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

/// Declared right after the imports. Keeps the module valid Elm when the
/// schema file declares nothing.
pub const PLACEHOLDER: &str = "uselessDeclarationToPreventErrorDueToEmptyOutputFile";

/// Generate the module header and imports.
pub fn generate(module_name: &str, source_file: &str, uses_dict: bool, imports: &[String]) -> String {
    let mut lines = vec![
        format!("module {module_name} exposing (..)"),
        String::new(),
        "-- DO NOT EDIT".to_owned(),
        "-- AUTOGENERATED BY THE ELM PROTOCOL BUFFER COMPILER".to_owned(),
        "-- https://github.com/tiziano88/elm-protobuf".to_owned(),
        format!("-- source file: {source_file}"),
        String::new(),
        "import Protobuf exposing (..)".to_owned(),
        String::new(),
        "import Json.Decode as JD".to_owned(),
        "import Json.Encode as JE".to_owned(),
    ];
    if uses_dict {
        lines.push("import Dict".to_owned());
    }
    lines.extend(imports.iter().map(|module| format!("import {module} exposing (..)")));
    lines.join("\n")
}

pub fn placeholder() -> String {
    format!("{PLACEHOLDER} = 42")
}
