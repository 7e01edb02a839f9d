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

//! Identifier collision checks over a lowered Elm module.
//!
//! Distinct schema names can flatten to the same Elm identifier, e.g. two
//! top-level enums declaring the same value name, or the fields `foo_bar`
//! and `fooBar` of one message. Elm rejects such modules, so the generator
//! reports them instead of emitting code that does not compile.

use codespan_reporting::diagnostic::Diagnostic;
use codespan_reporting::files::{self, SimpleFiles};
use codespan_reporting::term;
use codespan_reporting::term::termcolor;
use std::collections::HashMap;
use std::fmt;

use crate::backends::elm::codec::{EnumCodec, MessageCodec, OneOfCodec};
use crate::backends::elm::{ElmModule, MessageDecl, PLACEHOLDER};

/// Diagnostics do not point into source text: `protoc` does not forward
/// the schema sources to plugins.
pub type FileId = usize;

/// List of unique errors reported as analyzer diagnostics.
#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    DuplicateTypeIdentifier = 1,
    DuplicateConstructorIdentifier = 2,
    DuplicateValueIdentifier = 3,
    DuplicateRecordField = 4,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "E{}", *self as u16)
    }
}

impl From<ErrorCode> for String {
    fn from(code: ErrorCode) -> Self {
        format!("{}", code)
    }
}

/// Aggregate analyzer diagnostics.
#[derive(Debug, Default)]
pub struct Diagnostics {
    pub diagnostics: Vec<Diagnostic<FileId>>,
}

impl Diagnostics {
    fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    fn push(&mut self, diagnostic: Diagnostic<FileId>) {
        self.diagnostics.push(diagnostic)
    }

    fn err_or<T>(self, value: T) -> Result<T, Diagnostics> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }

    pub fn emit(&self, writer: &mut dyn termcolor::WriteColor) -> Result<(), files::Error> {
        let files = SimpleFiles::<String, String>::new();
        let config = term::Config::default();
        for d in self.diagnostics.iter() {
            term::emit(writer, &config, &files, d)?;
        }
        Ok(())
    }
}

/// One Elm namespace. Records the declaration which introduced each
/// identifier.
struct Namespace {
    kind: &'static str,
    code: ErrorCode,
    declared: HashMap<String, String>,
}

impl Namespace {
    fn new(kind: &'static str, code: ErrorCode) -> Self {
        Namespace { kind, code, declared: HashMap::new() }
    }

    fn declare(&mut self, id: &str, origin: String, diagnostics: &mut Diagnostics) {
        match self.declared.get(id) {
            Some(prev) => diagnostics.push(
                Diagnostic::error()
                    .with_code(self.code)
                    .with_message(format!("redeclaration of {} identifier `{}`", self.kind, id))
                    .with_notes(vec![
                        format!("`{id}` is first generated for {prev}"),
                        format!("`{id}` is generated again for {origin}"),
                    ]),
            ),
            None => {
                self.declared.insert(id.to_owned(), origin);
            }
        }
    }
}

struct Checker {
    types: Namespace,
    constructors: Namespace,
    values: Namespace,
    diagnostics: Diagnostics,
}

impl Checker {
    fn declare_codecs(&mut self, decoder: &str, encoder: &str, origin: &str) {
        self.values.declare(decoder, format!("the decoder of {origin}"), &mut self.diagnostics);
        self.values.declare(encoder, format!("the encoder of {origin}"), &mut self.diagnostics);
    }

    fn check_enum(&mut self, e: &EnumCodec) {
        let origin = format!("enum {}", e.type_name);
        self.types.declare(&e.type_name, origin.clone(), &mut self.diagnostics);
        for variant in &e.variants {
            self.constructors.declare(
                &variant.name,
                format!("value {} of {origin}", variant.json),
                &mut self.diagnostics,
            );
        }
        self.declare_codecs(&e.decoder, &e.encoder, &origin);
        self.values.declare(&e.default, format!("the default of {origin}"), &mut self.diagnostics);
    }

    fn check_oneof(&mut self, oneof: &OneOfCodec) {
        let origin = format!("oneof {}", oneof.type_name);
        self.types.declare(&oneof.type_name, origin.clone(), &mut self.diagnostics);
        self.constructors.declare(
            &oneof.unspecified,
            format!("the unspecified case of {origin}"),
            &mut self.diagnostics,
        );
        for variant in &oneof.variants {
            self.constructors.declare(
                &variant.name,
                format!("member {} of {origin}", variant.json),
                &mut self.diagnostics,
            );
        }
        self.declare_codecs(&oneof.decoder, &oneof.encoder, &origin);
    }

    fn check_record(&mut self, codec: &MessageCodec) {
        let origin = format!("message {}", codec.type_name);
        self.types.declare(&codec.type_name, origin.clone(), &mut self.diagnostics);
        // Record aliases also introduce a constructor function.
        self.constructors.declare(&codec.type_name, origin.clone(), &mut self.diagnostics);
        self.declare_codecs(&codec.decoder, &codec.encoder, &origin);

        let mut fields = Namespace::new("record field", ErrorCode::DuplicateRecordField);
        for slot in &codec.slots {
            let field_origin = match slot.number {
                Some(number) => format!("field #{number} of {origin}"),
                None => format!("a oneof of {origin}"),
            };
            fields.declare(&slot.field, field_origin, &mut self.diagnostics);
        }
    }

    fn check_message(&mut self, message: &MessageDecl) {
        self.check_record(&message.codec);
        for e in &message.enums {
            self.check_enum(e);
        }
        for oneof in &message.oneofs {
            self.check_oneof(oneof);
        }
        for nested in &message.messages {
            self.check_message(nested);
        }
    }
}

/// Check that every identifier of the module is declared once.
pub fn check(module: &ElmModule) -> Result<(), Diagnostics> {
    let mut checker = Checker {
        types: Namespace::new("type", ErrorCode::DuplicateTypeIdentifier),
        constructors: Namespace::new("constructor", ErrorCode::DuplicateConstructorIdentifier),
        values: Namespace::new("value", ErrorCode::DuplicateValueIdentifier),
        diagnostics: Diagnostics::default(),
    };
    checker.values.declare(PLACEHOLDER, "the module header".to_owned(), &mut checker.diagnostics);
    for e in &module.enums {
        checker.check_enum(e);
    }
    for message in &module.messages {
        checker.check_message(message);
    }
    checker.diagnostics.err_or(())
}
