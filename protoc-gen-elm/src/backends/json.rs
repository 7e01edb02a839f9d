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

//! Debug dump of the schema files received from `protoc`.

use crate::descriptor::SchemaFile;

/// Turn the schema file into a JSON representation.
pub fn generate(file: &SchemaFile) -> Result<String, String> {
    serde_json::to_string_pretty(&file)
        .map_err(|err| format!("could not JSON serialize schema {}: {err}", file.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_contains, field, file, message};
    use prost_types::field_descriptor_proto::{Label, Type};

    #[test]
    fn test_generate() {
        let proto = file(
            "person.proto",
            "demo",
            vec![message("Person", vec![field("full_name", 1, Type::String, Label::Optional)])],
            vec![],
        );
        let json = generate(&SchemaFile::from_proto(&proto).unwrap()).unwrap();
        assert_contains(&json, r#""kind": "file""#);
        assert_contains(&json, r#""full_name": ".demo.Person""#);
        assert_contains(&json, r#""json_name": "fullName""#);
        assert_contains(&json, r#""syntax": "proto3""#);
        assert!(!json.contains("declared_syntax"));
    }
}
