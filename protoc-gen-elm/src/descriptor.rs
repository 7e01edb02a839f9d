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

//! Read-only view over the schema tree handed over by `protoc`.
//!
//! The model is converted once from the prost descriptor types so that
//! the rest of the generator works with plain, owned values and never has
//! to deal with the optional-everything shape of the wire descriptors.

use prost_types::field_descriptor_proto::{Label as ProtoLabel, Type as ProtoType};
use prost_types::{
    DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, FileDescriptorProto,
};
use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Syntax {
    Proto2,
    Proto3,
}

/// Declared type of a field, independent of its cardinality.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WireType {
    Double,
    Float,
    Int64,
    UInt64,
    Int32,
    Fixed64,
    Fixed32,
    Bool,
    String,
    Group,
    Message,
    Bytes,
    UInt32,
    Enum,
    SFixed32,
    SFixed64,
    SInt32,
    SInt64,
}

impl WireType {
    fn from_proto(ty: ProtoType) -> Self {
        match ty {
            ProtoType::Double => WireType::Double,
            ProtoType::Float => WireType::Float,
            ProtoType::Int64 => WireType::Int64,
            ProtoType::Uint64 => WireType::UInt64,
            ProtoType::Int32 => WireType::Int32,
            ProtoType::Fixed64 => WireType::Fixed64,
            ProtoType::Fixed32 => WireType::Fixed32,
            ProtoType::Bool => WireType::Bool,
            ProtoType::String => WireType::String,
            ProtoType::Group => WireType::Group,
            ProtoType::Message => WireType::Message,
            ProtoType::Bytes => WireType::Bytes,
            ProtoType::Uint32 => WireType::UInt32,
            ProtoType::Enum => WireType::Enum,
            ProtoType::Sfixed32 => WireType::SFixed32,
            ProtoType::Sfixed64 => WireType::SFixed64,
            ProtoType::Sint32 => WireType::SInt32,
            ProtoType::Sint64 => WireType::SInt64,
        }
    }

    /// 64-bit integers are carried as JSON strings.
    pub fn is_64_bit(&self) -> bool {
        matches!(
            self,
            WireType::Int64
                | WireType::UInt64
                | WireType::SInt64
                | WireType::Fixed64
                | WireType::SFixed64
        )
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            WireType::Double => "double",
            WireType::Float => "float",
            WireType::Int64 => "int64",
            WireType::UInt64 => "uint64",
            WireType::Int32 => "int32",
            WireType::Fixed64 => "fixed64",
            WireType::Fixed32 => "fixed32",
            WireType::Bool => "bool",
            WireType::String => "string",
            WireType::Group => "group",
            WireType::Message => "message",
            WireType::Bytes => "bytes",
            WireType::UInt32 => "uint32",
            WireType::Enum => "enum",
            WireType::SFixed32 => "sfixed32",
            WireType::SFixed64 => "sfixed64",
            WireType::SInt32 => "sint32",
            WireType::SInt64 => "sint64",
        };
        f.write_str(name)
    }
}

impl Serialize for WireType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Optional,
    Required,
    Repeated,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename = "field")]
pub struct Field {
    pub name: String,
    pub json_name: String,
    /// Only used for documentation comments.
    pub number: i32,
    #[serde(rename = "type")]
    pub ty: WireType,
    /// Fully-qualified name of the referenced message or enum,
    /// e.g. `.package.Outer.Inner`.
    pub type_name: Option<String>,
    pub label: Label,
    /// Index into the enclosing message's `oneofs`.
    pub oneof_index: Option<usize>,
    /// Set for proto3 `optional` fields.
    pub explicit_presence: bool,
    pub deprecated: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename = "oneof")]
pub struct OneOf {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename = "enum_value")]
pub struct EnumValue {
    pub name: String,
    pub number: i32,
    pub deprecated: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename = "enum")]
pub struct Enum {
    pub name: String,
    pub full_name: String,
    pub values: Vec<EnumValue>,
    pub deprecated: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename = "message")]
pub struct Message {
    pub name: String,
    pub full_name: String,
    pub fields: Vec<Field>,
    pub oneofs: Vec<OneOf>,
    pub messages: Vec<Message>,
    pub enums: Vec<Enum>,
    /// Synthetic entry type generated by `protoc` for `map<K, V>` fields.
    pub map_entry: bool,
    pub deprecated: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename = "file")]
pub struct SchemaFile {
    pub name: String,
    pub package: String,
    /// `None` when the file declares a syntax the generator does not handle,
    /// e.g. editions.
    pub syntax: Option<Syntax>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_syntax: Option<String>,
    pub dependencies: Vec<String>,
    pub messages: Vec<Message>,
    pub enums: Vec<Enum>,
}

/// Join a scope and a local name into a fully-qualified schema name.
fn qualify(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        format!(".{name}")
    } else {
        format!("{scope}.{name}")
    }
}

impl SchemaFile {
    pub fn from_proto(file: &FileDescriptorProto) -> Result<SchemaFile, Error> {
        let package = file.package().to_owned();
        let scope = if package.is_empty() { String::new() } else { format!(".{package}") };
        let syntax = match file.syntax() {
            "" | "proto2" => Some(Syntax::Proto2),
            "proto3" => Some(Syntax::Proto3),
            _ => None,
        };

        Ok(SchemaFile {
            name: file.name().to_owned(),
            package,
            syntax,
            declared_syntax: syntax.is_none().then(|| file.syntax().to_owned()),
            dependencies: file.dependency.clone(),
            messages: file
                .message_type
                .iter()
                .map(|message| Message::from_proto(file.name(), &scope, message))
                .collect::<Result<_, _>>()?,
            enums: file.enum_type.iter().map(|e| Enum::from_proto(&scope, e)).collect(),
        })
    }

    /// Iterate over every message of the file, nested ones included,
    /// parents before children.
    pub fn iter_messages(&self) -> impl Iterator<Item = &Message> {
        let mut stack: Vec<&Message> = self.messages.iter().rev().collect();
        std::iter::from_fn(move || {
            let message = stack.pop()?;
            stack.extend(message.messages.iter().rev());
            Some(message)
        })
    }
}

impl Message {
    fn from_proto(file: &str, scope: &str, message: &DescriptorProto) -> Result<Message, Error> {
        let full_name = qualify(scope, message.name());

        // protoc wraps every proto3 `optional` field in a synthetic oneof.
        // Those are dropped and the field is flagged instead, so the
        // remaining indices have to be renumbered.
        let synthetic: Vec<bool> = (0..message.oneof_decl.len())
            .map(|index| {
                let members: Vec<_> = message
                    .field
                    .iter()
                    .filter(|f| f.oneof_index == Some(index as i32))
                    .collect();
                !members.is_empty() && members.iter().all(|f| f.proto3_optional())
            })
            .collect();
        let mut remap = Vec::with_capacity(synthetic.len());
        let mut next = 0;
        for is_synthetic in &synthetic {
            remap.push((!is_synthetic).then_some(next));
            if !is_synthetic {
                next += 1;
            }
        }

        let oneofs = message
            .oneof_decl
            .iter()
            .zip(&synthetic)
            .filter(|(_, synthetic)| !**synthetic)
            .map(|(oneof, _)| OneOf { name: oneof.name().to_owned() })
            .collect();

        let fields = message
            .field
            .iter()
            .map(|field| Field::from_proto(file, &full_name, field, &remap))
            .collect::<Result<_, _>>()?;

        Ok(Message {
            name: message.name().to_owned(),
            fields,
            oneofs,
            messages: message
                .nested_type
                .iter()
                .map(|nested| Message::from_proto(file, &full_name, nested))
                .collect::<Result<_, _>>()?,
            enums: message.enum_type.iter().map(|e| Enum::from_proto(&full_name, e)).collect(),
            map_entry: message.options.as_ref().map(|o| o.map_entry()).unwrap_or(false),
            deprecated: message.options.as_ref().map(|o| o.deprecated()).unwrap_or(false),
            full_name,
        })
    }

    /// Return the fields belonging to the oneof at `index`, in declaration
    /// order.
    pub fn oneof_fields(&self, index: usize) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(move |f| f.oneof_index == Some(index))
    }

    /// Return the nested message declared with the local name `name`.
    pub fn nested_message(&self, name: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.name == name)
    }
}

impl Field {
    fn from_proto(
        file: &str,
        message: &str,
        field: &FieldDescriptorProto,
        remap: &[Option<usize>],
    ) -> Result<Field, Error> {
        let ty = ProtoType::try_from(field.r#type.unwrap_or_default()).map_err(|_| {
            Error::UnsupportedFieldType {
                file: file.to_owned(),
                field: format!("{}.{}", message.trim_start_matches('.'), field.name()),
                ty: format!("#{}", field.r#type.unwrap_or_default()),
            }
        })?;
        let label = match field.label() {
            ProtoLabel::Optional => Label::Optional,
            ProtoLabel::Required => Label::Required,
            ProtoLabel::Repeated => Label::Repeated,
        };
        let json_name = match field.json_name.as_deref() {
            Some(json_name) if !json_name.is_empty() => json_name.to_owned(),
            _ => json_name(field.name()),
        };

        Ok(Field {
            name: field.name().to_owned(),
            json_name,
            number: field.number(),
            ty: WireType::from_proto(ty),
            type_name: field.type_name.clone().filter(|name| !name.is_empty()),
            label,
            oneof_index: field
                .oneof_index
                .and_then(|index| remap.get(index as usize).copied().flatten()),
            explicit_presence: field.proto3_optional(),
            deprecated: field.options.as_ref().map(|o| o.deprecated()).unwrap_or(false),
        })
    }

    /// Unqualified name of the referenced type, e.g. `Inner` for
    /// `.package.Outer.Inner`.
    pub fn local_type_name(&self) -> Option<&str> {
        self.type_name.as_deref().and_then(|name| name.rsplit('.').next())
    }
}

impl Enum {
    fn from_proto(scope: &str, e: &EnumDescriptorProto) -> Enum {
        Enum {
            name: e.name().to_owned(),
            full_name: qualify(scope, e.name()),
            values: e
                .value
                .iter()
                .map(|value| EnumValue {
                    name: value.name().to_owned(),
                    number: value.number(),
                    deprecated: value.options.as_ref().map(|o| o.deprecated()).unwrap_or(false),
                })
                .collect(),
            deprecated: e.options.as_ref().map(|o| o.deprecated()).unwrap_or(false),
        }
    }
}

/// JSON name `protoc` would have assigned: underscores are dropped and the
/// following letter is upper-cased.
fn json_name(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut capitalize_next = false;
    for c in name.chars() {
        if c == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            result.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }
    result
}
