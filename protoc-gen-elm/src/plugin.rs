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

//! `protoc` plugin protocol: a serialized `CodeGeneratorRequest` comes in,
//! a serialized `CodeGeneratorResponse` goes out.

use prost::Message as _;
use prost_types::compiler::code_generator_response::{Feature, File};
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};

use crate::backends::elm::names::{module_name, output_file_name, NameResolver};
use crate::backends::elm::scope::Scope;
use crate::backends::elm::types::{TypeMapper, WellKnownTypes};
use crate::backends::{elm, json};
use crate::descriptor::SchemaFile;
use crate::error::Error;
use crate::options::GeneratorOptions;
use crate::parameters::Parameters;

/// Schema files covered by the runtime support module. They are neither
/// generated nor imported.
pub const EXCLUDED_FILES: &[&str] =
    &["google/protobuf/timestamp.proto", "google/protobuf/wrappers.proto"];

fn is_excluded(name: &str) -> bool {
    EXCLUDED_FILES.contains(&name)
}

/// Decode the request and the parameters it carries.
pub fn parse_request(input: &[u8]) -> Result<(CodeGeneratorRequest, Parameters), Error> {
    let request = CodeGeneratorRequest::decode(input)?;
    let parameters = Parameters::parse(request.parameter.as_deref())?;
    Ok((request, parameters))
}

/// Generate one Elm module per file listed in `file_to_generate`.
pub fn generate(
    request: &CodeGeneratorRequest,
    parameters: &Parameters,
    options: &GeneratorOptions,
) -> Result<CodeGeneratorResponse, Error> {
    let files = request
        .proto_file
        .iter()
        .map(SchemaFile::from_proto)
        .collect::<Result<Vec<_>, _>>()?;
    let names = NameResolver::default();
    let scope = Scope::new(&files, &names);
    let well_known = WellKnownTypes::default();

    let mut generated = vec![];
    for name in &request.file_to_generate {
        if is_excluded(name) {
            tracing::info!("Skipping {name}, provided by the runtime module");
            continue;
        }
        let file = files
            .iter()
            .find(|file| &file.name == name)
            .ok_or_else(|| Error::MissingFile(name.clone()))?;

        tracing::info!("Processing file {name}");
        if parameters.debug {
            match json::generate(file) {
                Ok(dump) => tracing::debug!("{name}:\n{dump}"),
                Err(err) => tracing::warn!("{err}"),
            }
        }
        if file.syntax.is_none() {
            return Err(Error::UnsupportedSyntax {
                file: name.clone(),
                syntax: file.declared_syntax.clone().unwrap_or_default(),
            });
        }

        let mut imports: Vec<String> = file
            .dependencies
            .iter()
            .filter(|dependency| !is_excluded(dependency))
            .map(|dependency| module_name(dependency))
            .collect();
        if let Some(file_options) = options.file(name) {
            imports.extend(file_options.imports.iter().cloned());
        }

        let mapper = TypeMapper::new(name, &scope, &well_known, options);
        let generator = elm::Generator::new(file, &names, mapper, parameters.remove_deprecated);
        let content = elm::generate(generator, imports)?;
        let output = output_file_name(name);
        tracing::debug!("Generated {output} ({} bytes)", content.len());
        generated.push(File { name: Some(output), content: Some(content), ..Default::default() });
    }

    Ok(CodeGeneratorResponse {
        file: generated,
        supported_features: Some(Feature::Proto3Optional as u64),
        ..Default::default()
    })
}

/// Load the options file and generate the serialized response.
pub fn respond(request: &CodeGeneratorRequest, parameters: &Parameters) -> Result<Vec<u8>, Error> {
    let options = match &parameters.options {
        Some(path) => GeneratorOptions::load(path)?,
        None => GeneratorOptions::default(),
    };
    Ok(generate(request, parameters, &options)?.encode_to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_contains, field, file, message, typed_field};
    use googletest::prelude::{assert_that, eq};
    use prost::Message;
    use prost_types::field_descriptor_proto::{Label, Type};
    use prost_types::FileDescriptorProto;
    use std::io::Write;

    fn request(files: Vec<FileDescriptorProto>, generate: &[&str], parameter: &str) -> CodeGeneratorRequest {
        CodeGeneratorRequest {
            file_to_generate: generate.iter().map(|name| name.to_string()).collect(),
            parameter: (!parameter.is_empty()).then(|| parameter.to_owned()),
            proto_file: files,
            ..Default::default()
        }
    }

    fn timestamp_proto() -> FileDescriptorProto {
        file(
            "google/protobuf/timestamp.proto",
            "google.protobuf",
            vec![message(
                "Timestamp",
                vec![
                    field("seconds", 1, Type::Int64, Label::Optional),
                    field("nanos", 2, Type::Int32, Label::Optional),
                ],
            )],
            vec![],
        )
    }

    fn event_proto() -> FileDescriptorProto {
        let mut event = file(
            "calendar/event.proto",
            "calendar",
            vec![message(
                "Event",
                vec![
                    typed_field("at", 1, Type::Message, Label::Optional, ".google.protobuf.Timestamp"),
                    typed_field("owner", 2, Type::Message, Label::Optional, ".people.Person"),
                ],
            )],
            vec![],
        );
        event.dependency =
            vec!["google/protobuf/timestamp.proto".to_owned(), "people/person.proto".to_owned()];
        event
    }

    fn person_proto() -> FileDescriptorProto {
        file(
            "people/person.proto",
            "people",
            vec![message("Person", vec![field("name", 1, Type::String, Label::Optional)])],
            vec![],
        )
    }

    #[test]
    fn test_generate_only_requested_files() {
        let request = request(
            vec![timestamp_proto(), person_proto(), event_proto()],
            &["calendar/event.proto"],
            "",
        );
        let response =
            generate(&request, &Parameters::default(), &GeneratorOptions::default()).unwrap();

        assert_eq!(response.supported_features, Some(Feature::Proto3Optional as u64));
        assert_that!(response.file.len(), eq(1));
        let event = &response.file[0];
        assert_eq!(event.name.as_deref(), Some("Calendar/Event.elm"));

        let content = event.content.as_deref().unwrap();
        assert_contains(content, "module Calendar.Event exposing (..)");
        assert_contains(content, "import People.Person exposing (..)");
        assert!(!content.contains("import Google.Protobuf.Timestamp"));
        assert_contains(content, "    { at : Maybe Timestamp -- 1");
        assert_contains(content, "|> optional \"owner\" personDecoder");
    }

    #[test]
    fn test_excluded_files_are_skipped() {
        let request = request(vec![timestamp_proto()], &["google/protobuf/timestamp.proto"], "");
        let response =
            generate(&request, &Parameters::default(), &GeneratorOptions::default()).unwrap();
        assert!(response.file.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let request = request(vec![], &["ghost.proto"], "");
        let err = generate(&request, &Parameters::default(), &GeneratorOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::MissingFile(name) if name == "ghost.proto"));
    }

    #[test]
    fn test_unsupported_syntax() {
        let mut proto = person_proto();
        proto.syntax = Some("editions".to_owned());
        let request = request(vec![proto], &["people/person.proto"], "");
        let err = generate(&request, &Parameters::default(), &GeneratorOptions::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "people/person.proto: unsupported syntax `editions`");
    }

    #[test]
    fn test_respond_with_options_file() {
        let mut temp = tempfile::NamedTempFile::new().unwrap();
        temp.write_all(br#"{ "files": { "people/person.proto": { "imports": ["Extra.Codecs"] } } }"#)
            .unwrap();
        let parameter = format!("options={}", temp.path().display());
        let input =
            request(vec![person_proto()], &["people/person.proto"], &parameter).encode_to_vec();

        let (request, parameters) = parse_request(&input).unwrap();
        let output = respond(&request, &parameters).unwrap();
        let response = CodeGeneratorResponse::decode(output.as_slice()).unwrap();
        assert_contains(
            response.file[0].content.as_deref().unwrap(),
            "import Extra.Codecs exposing (..)",
        );
    }

    #[test]
    fn test_parse_request_rejects_unknown_parameter() {
        let input = request(vec![person_proto()], &["people/person.proto"], "fast").encode_to_vec();
        assert!(matches!(parse_request(&input), Err(Error::UnknownParameter(_))));
    }

    #[test]
    fn test_parse_request_rejects_garbage() {
        assert!(matches!(parse_request(&[0xff, 0xff, 0xff]), Err(Error::MalformedRequest(_))));
    }
}
