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

//! Derivation of Elm identifiers from schema names.

use std::collections::BTreeSet;

/// Ordered list of the schema names enclosing a declaration,
/// outermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NestingPath(Vec<String>);

impl NestingPath {
    pub fn root() -> Self {
        NestingPath(vec![])
    }

    /// Return the path extended with one more enclosing name.
    pub fn push(&self, name: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.to_owned());
        NestingPath(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

/// Words which cannot be used as Elm identifiers.
#[derive(Debug, Clone)]
pub struct ReservedWords(BTreeSet<String>);

impl ReservedWords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ReservedWords(words.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(word)
    }
}

impl Default for ReservedWords {
    fn default() -> Self {
        ReservedWords::new([
            "module", "exposing", "import", "type", "alias", "let", "in", "if", "then", "else",
            "where", "case", "of", "port", "as", "infix",
        ])
    }
}

/// Identifiers generated for one message or enum. Every reference to the
/// type goes through the same `ResolvedName`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    pub type_name: String,
    pub decoder: String,
    pub encoder: String,
    /// Default constant, only generated for enums.
    pub default: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NameResolver {
    reserved: ReservedWords,
}

impl NameResolver {
    pub fn new(reserved: ReservedWords) -> Self {
        NameResolver { reserved }
    }

    fn escape(&self, id: String) -> String {
        if self.reserved.contains(&id) {
            id + "_"
        } else {
            id
        }
    }

    fn flatten<'a>(path: &'a NestingPath, name: Option<&'a str>) -> String {
        path.segments()
            .iter()
            .map(String::as_str)
            .chain(name)
            .map(upper_camel_case)
            .collect::<Vec<_>>()
            .join("_")
    }

    /// Flattened type identifier: `[A, B]` and `C` give `A_B_C`.
    pub fn type_name(&self, path: &NestingPath, name: &str) -> String {
        self.escape(Self::flatten(path, Some(name)))
    }

    /// Record field identifier.
    pub fn field_name(&self, name: &str) -> String {
        self.escape(first_lower(&camel_case(name)))
    }

    /// Constructor for an enum value. `path` lists the messages enclosing
    /// the enum, not the enum itself.
    pub fn enum_variant_name(&self, path: &NestingPath, value: &str) -> String {
        let variant = upper_camel_case(&value.to_lowercase());
        if path.segments().is_empty() {
            self.escape(variant)
        } else {
            self.escape(format!("{}_{}", Self::flatten(path, None), variant))
        }
    }

    /// Union type generated for a oneof. `path` ends with the message
    /// declaring the oneof.
    pub fn oneof_type_name(&self, path: &NestingPath, oneof: &str) -> String {
        self.type_name(path, oneof)
    }

    pub fn oneof_variant_name(&self, path: &NestingPath, oneof: &str, field: &str) -> String {
        self.type_name(&path.push(oneof), field)
    }

    pub fn unspecified_variant_name(&self, union: &str) -> String {
        format!("{union}Unspecified")
    }

    pub fn message(&self, path: &NestingPath, name: &str) -> ResolvedName {
        let type_name = self.type_name(path, name);
        ResolvedName {
            decoder: decoder_name(&type_name),
            encoder: encoder_name(&type_name),
            default: None,
            type_name,
        }
    }

    pub fn enumeration(&self, path: &NestingPath, name: &str) -> ResolvedName {
        let type_name = self.type_name(path, name);
        ResolvedName {
            decoder: decoder_name(&type_name),
            encoder: encoder_name(&type_name),
            default: Some(default_name(&type_name)),
            type_name,
        }
    }
}

/// Camel-case a schema identifier. An underscore followed by a lowercase
/// letter is dropped and the letter upper-cased, as is a lowercase letter
/// following a digit. Other characters are kept, so `HTTPRequest` and
/// `userID` keep their capitals. Remaining underscores are removed.
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 1);
    let mut chars = name.chars().peekable();
    if chars.peek() == Some(&'_') {
        chars.next();
        out.push('X');
    }
    while let Some(c) = chars.next() {
        if c == '_' && chars.peek().is_some_and(char::is_ascii_lowercase) {
            continue;
        }
        if c.is_ascii_digit() {
            out.push(c);
            continue;
        }
        out.push(c.to_ascii_uppercase());
        while let Some(&next) = chars.peek() {
            if !next.is_ascii_lowercase() {
                break;
            }
            out.push(next);
            chars.next();
        }
    }
    out.replace('_', "")
}

fn upper_camel_case(name: &str) -> String {
    first_upper(&camel_case(name))
}

pub fn first_upper(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn first_lower(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn decoder_name(type_name: &str) -> String {
    format!("{}Decoder", first_lower(type_name))
}

pub fn encoder_name(type_name: &str) -> String {
    format!("{}Encoder", first_lower(type_name))
}

pub fn default_name(type_name: &str) -> String {
    format!("{}Default", first_lower(type_name))
}

fn module_segments(proto_file: &str) -> Vec<String> {
    let stem = proto_file.strip_suffix(".proto").unwrap_or(proto_file);
    stem.split('/').map(first_upper).collect()
}

/// Elm module name for a schema file: `foo/bar_baz.proto` is `Foo.Bar_baz`.
pub fn module_name(proto_file: &str) -> String {
    module_segments(proto_file).join(".")
}

/// Output path for a schema file: `foo/bar_baz.proto` is `Foo/Bar_baz.elm`.
pub fn output_file_name(proto_file: &str) -> String {
    format!("{}.elm", module_segments(proto_file).join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use googletest::prelude::{assert_that, eq};

    fn path(segments: &[&str]) -> NestingPath {
        segments.iter().fold(NestingPath::root(), |path, s| path.push(s))
    }

    #[test]
    fn test_type_name_flattening() {
        let names = NameResolver::default();
        assert_that!(names.type_name(&path(&[]), "Person"), eq("Person"));
        assert_that!(names.type_name(&path(&["Outer"]), "Inner"), eq("Outer_Inner"));
        assert_that!(names.type_name(&path(&["a", "b"]), "c"), eq("A_B_C"));
        assert_that!(names.type_name(&path(&[]), "foo_bar"), eq("FooBar"));
    }

    #[test]
    fn test_camel_case_keeps_capitals() {
        assert_that!(camel_case("HTTPRequest"), eq("HTTPRequest"));
        assert_that!(camel_case("userID"), eq("UserID"));
        assert_that!(camel_case("user_id"), eq("UserId"));
        assert_that!(camel_case("URL"), eq("URL"));
        assert_that!(camel_case("Url"), eq("Url"));
        assert_that!(camel_case("foo_1"), eq("Foo1"));
        assert_that!(camel_case("foo_1bar"), eq("Foo1Bar"));
        assert_that!(camel_case("_hidden"), eq("XHidden"));
        assert_that!(camel_case("a__b"), eq("AB"));
    }

    #[test]
    fn test_acronyms_stay_distinct() {
        let names = NameResolver::default();
        assert_that!(names.field_name("user_id"), eq("userId"));
        assert_that!(names.field_name("userID"), eq("userID"));
        assert_that!(names.type_name(&path(&[]), "HTTPRequest"), eq("HTTPRequest"));
        assert_that!(names.type_name(&path(&[]), "URL"), eq("URL"));
        assert_that!(names.type_name(&path(&[]), "Url"), eq("Url"));
        assert_that!(names.message(&path(&[]), "URL").decoder, eq("uRLDecoder"));
    }

    #[test]
    fn test_field_name() {
        let names = NameResolver::default();
        assert_that!(names.field_name("foo_bar"), eq("fooBar"));
        assert_that!(names.field_name("name"), eq("name"));
        assert_that!(names.field_name("type"), eq("type_"));
        assert_that!(names.field_name("port"), eq("port_"));
    }

    #[test]
    fn test_names_are_idempotent() {
        let names = NameResolver::default();
        let once = names.field_name("foo_bar");
        assert_that!(names.field_name(&once), eq(once.as_str()));
        let once = names.type_name(&path(&[]), "foo_bar");
        assert_that!(names.type_name(&path(&[]), &once), eq(once.as_str()));
    }

    #[test]
    fn test_custom_reserved_words() {
        let names = NameResolver::new(ReservedWords::new(["name"]));
        assert_that!(names.field_name("name"), eq("name_"));
        assert_that!(names.field_name("type"), eq("type"));
    }

    #[test]
    fn test_enum_variant_name() {
        let names = NameResolver::default();
        assert_that!(names.enum_variant_name(&path(&[]), "DARK_GREEN"), eq("DarkGreen"));
        assert_that!(names.enum_variant_name(&path(&["M"]), "DARK_GREEN"), eq("M_DarkGreen"));
        assert_that!(names.enum_variant_name(&path(&["Outer", "Inner"]), "RED"), eq("Outer_Inner_Red"));
    }

    #[test]
    fn test_oneof_names() {
        let names = NameResolver::default();
        let person = path(&["Person"]);
        let union = names.oneof_type_name(&person, "contact");
        assert_that!(union, eq("Person_Contact"));
        assert_that!(names.oneof_variant_name(&person, "contact", "email"), eq("Person_Contact_Email"));
        assert_that!(names.unspecified_variant_name(&union), eq("Person_ContactUnspecified"));
    }

    #[test]
    fn test_resolved_names() {
        let names = NameResolver::default();
        let inner = names.message(&path(&["Outer"]), "Inner");
        assert_that!(inner.type_name, eq("Outer_Inner"));
        assert_that!(inner.decoder, eq("outer_InnerDecoder"));
        assert_that!(inner.encoder, eq("outer_InnerEncoder"));
        assert_eq!(inner.default, None);

        let color = names.enumeration(&path(&[]), "Color");
        assert_that!(color.default, eq(Some("colorDefault".to_owned())));
    }

    #[test]
    fn test_module_names() {
        assert_that!(module_name("foo/bar_baz.proto"), eq("Foo.Bar_baz"));
        assert_that!(output_file_name("foo/bar_baz.proto"), eq("Foo/Bar_baz.elm"));
        assert_that!(module_name("person.proto"), eq("Person"));
        assert_that!(output_file_name("person.proto"), eq("Person.elm"));
    }
}
