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

//! Mapping of schema field types to Elm types, codecs and defaults.

use std::collections::BTreeMap;
use std::fmt;

use super::scope::{Scope, TypeKind};
use crate::descriptor::{Field, Label, Message, WireType};
use crate::error::Error;
use crate::options::{CustomType, FieldOptions, FileOptions, GeneratorOptions};

/// Reference to a codec function or to an inline value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Declaration emitted by this generator.
    Generated(String),
    /// Function of the runtime support module, of `elm/json`, or a user
    /// supplied codec.
    Support(String),
    /// Inline expression.
    Literal(String),
}

impl Expr {
    pub fn text(&self) -> &str {
        match self {
            Expr::Generated(text) | Expr::Support(text) | Expr::Literal(text) => text,
        }
    }

    /// Render the expression in argument position.
    pub fn as_argument(&self) -> String {
        parenthesize(self.text())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.text())
    }
}

fn parenthesize(text: &str) -> String {
    if text.contains(char::is_whitespace) {
        format!("({text})")
    } else {
        text.to_owned()
    }
}

/// Elm type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Named(String),
    Maybe(Box<TypeExpr>),
    List(Box<TypeExpr>),
    Dict(Box<TypeExpr>, Box<TypeExpr>),
}

impl TypeExpr {
    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Named(name.into())
    }

    pub fn as_argument(&self) -> String {
        parenthesize(&self.to_string())
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TypeExpr::Named(name) => f.write_str(name),
            TypeExpr::Maybe(inner) => write!(f, "Maybe {}", inner.as_argument()),
            TypeExpr::List(inner) => write!(f, "List {}", inner.as_argument()),
            TypeExpr::Dict(key, value) => {
                write!(f, "Dict.Dict {} {}", key.as_argument(), value.as_argument())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WellKnownType {
    pub elm_type: String,
    pub decoder: String,
    pub encoder: String,
}

/// Types provided by the runtime support module, keyed by fully-qualified
/// schema name.
#[derive(Debug, Clone)]
pub struct WellKnownTypes(BTreeMap<String, WellKnownType>);

impl WellKnownTypes {
    pub fn new(types: BTreeMap<String, WellKnownType>) -> Self {
        WellKnownTypes(types)
    }

    pub fn get(&self, full_name: &str) -> Option<&WellKnownType> {
        self.0.get(full_name)
    }
}

impl Default for WellKnownTypes {
    fn default() -> Self {
        let table = [
            ("Timestamp", "Timestamp", "timestampDecoder", "timestampEncoder"),
            ("Int32Value", "Int", "intValueDecoder", "intValueEncoder"),
            ("UInt32Value", "Int", "intValueDecoder", "intValueEncoder"),
            ("Int64Value", "Int", "intValueDecoder", "numericStringEncoder"),
            ("UInt64Value", "Int", "intValueDecoder", "numericStringEncoder"),
            ("DoubleValue", "Float", "floatValueDecoder", "floatValueEncoder"),
            ("FloatValue", "Float", "floatValueDecoder", "floatValueEncoder"),
            ("StringValue", "String", "stringValueDecoder", "stringValueEncoder"),
            ("BytesValue", "Bytes", "bytesValueDecoder", "bytesValueEncoder"),
            ("BoolValue", "Bool", "boolValueDecoder", "boolValueEncoder"),
        ];
        WellKnownTypes(
            table
                .into_iter()
                .map(|(name, elm_type, decoder, encoder)| {
                    (
                        format!(".google.protobuf.{name}"),
                        WellKnownType {
                            elm_type: elm_type.to_owned(),
                            decoder: decoder.to_owned(),
                            encoder: encoder.to_owned(),
                        },
                    )
                })
                .collect(),
        )
    }
}

/// Element type of a field: Elm type, codecs and default value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseType {
    pub ty: TypeExpr,
    pub decoder: Expr,
    pub encoder: Expr,
    /// `None` for types without a zero value, which are always carried
    /// with explicit presence.
    pub default: Option<Expr>,
}

impl BaseType {
    fn support(ty: &str, decoder: &str, encoder: &str, default: &str) -> Self {
        BaseType {
            ty: TypeExpr::named(ty),
            decoder: Expr::Support(decoder.to_owned()),
            encoder: Expr::Support(encoder.to_owned()),
            default: Some(Expr::Literal(default.to_owned())),
        }
    }

    fn custom(custom: &CustomType) -> Self {
        BaseType {
            ty: TypeExpr::named(&custom.elm_type),
            decoder: Expr::Support(custom.decoder.clone()),
            encoder: Expr::Support(custom.encoder.clone()),
            default: custom.default.clone().map(Expr::Literal),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cardinality {
    /// Always present, omitted on encode when equal to the default.
    Required { default: Expr },
    /// Carried as `Maybe`, omitted on encode when absent.
    Optional,
    Repeated,
    /// Keyed collection built from a map entry type.
    Map { key: BaseType },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldType {
    /// Type of the record field.
    pub ty: TypeExpr,
    pub cardinality: Cardinality,
    /// Element type; the value type for maps.
    pub value: BaseType,
}

/// Type mapper for the fields of one schema file.
#[derive(Debug)]
pub struct TypeMapper<'a> {
    file: &'a str,
    scope: &'a Scope,
    well_known: &'a WellKnownTypes,
    options: &'a GeneratorOptions,
    file_options: Option<&'a FileOptions>,
}

/// Key of a field in the options file, e.g. `pkg.Message.field`.
pub fn field_key(message: &Message, field: &Field) -> String {
    format!("{}.{}", message.full_name.trim_start_matches('.'), field.name)
}

impl<'a> TypeMapper<'a> {
    pub fn new(
        file: &'a str,
        scope: &'a Scope,
        well_known: &'a WellKnownTypes,
        options: &'a GeneratorOptions,
    ) -> Self {
        TypeMapper { file, scope, well_known, options, file_options: options.file(file) }
    }

    fn field_options(&self, message: &Message, field: &Field) -> Option<&'a FieldOptions> {
        self.file_options.and_then(|options| options.fields.get(&field_key(message, field)))
    }

    /// Element type of a field, ignoring its label.
    pub fn base_type(&self, message: &Message, field: &Field) -> Result<BaseType, Error> {
        if let Some(key) =
            self.field_options(message, field).and_then(|options| options.type_override.as_ref())
        {
            return match self.options.types.get(key) {
                Some(custom) => Ok(BaseType::custom(custom)),
                None => Err(Error::UnknownTypeOverride {
                    file: self.file.to_owned(),
                    field: field_key(message, field),
                    key: key.clone(),
                }),
            };
        }

        if let Some(type_name) = &field.type_name {
            if let Some(custom) = self.options.types.get(type_name) {
                return Ok(BaseType::custom(custom));
            }
            if let Some(wkt) = self.well_known.get(type_name) {
                return Ok(BaseType {
                    ty: TypeExpr::named(&wkt.elm_type),
                    decoder: Expr::Support(wkt.decoder.clone()),
                    encoder: Expr::Support(wkt.encoder.clone()),
                    default: None,
                });
            }
        }

        Ok(match field.ty {
            WireType::Int32
            | WireType::UInt32
            | WireType::SInt32
            | WireType::Fixed32
            | WireType::SFixed32 => BaseType::support("Int", "intDecoder", "JE.int", "0"),
            WireType::Int64
            | WireType::UInt64
            | WireType::SInt64
            | WireType::Fixed64
            | WireType::SFixed64 => {
                BaseType::support("Int", "intDecoder", "numericStringEncoder", "0")
            }
            WireType::Float | WireType::Double => {
                BaseType::support("Float", "JD.float", "JE.float", "0.0")
            }
            WireType::Bool => BaseType::support("Bool", "JD.bool", "JE.bool", "False"),
            WireType::String => BaseType::support("String", "JD.string", "JE.string", "\"\""),
            WireType::Bytes => {
                BaseType::support("Bytes", "bytesFieldDecoder", "bytesFieldEncoder", "[]")
            }
            WireType::Message | WireType::Enum => self.resolve(message, field)?,
            WireType::Group => {
                return Err(Error::UnsupportedFieldType {
                    file: self.file.to_owned(),
                    field: field_key(message, field),
                    ty: field.ty.to_string(),
                })
            }
        })
    }

    fn resolve(&self, message: &Message, field: &Field) -> Result<BaseType, Error> {
        let type_name = field.type_name.as_deref().unwrap_or_default();
        let resolved = self.scope.get(type_name).ok_or_else(|| Error::UnresolvedType {
            file: self.file.to_owned(),
            field: field_key(message, field),
            type_name: type_name.to_owned(),
        })?;
        let name = &resolved.name;
        Ok(BaseType {
            ty: TypeExpr::named(&name.type_name),
            decoder: Expr::Generated(name.decoder.clone()),
            encoder: Expr::Generated(name.encoder.clone()),
            default: match resolved.kind {
                TypeKind::Enum => name.default.clone().map(Expr::Generated),
                TypeKind::Message => None,
            },
        })
    }

    /// Return the map entry type backing `field`, if `field` is a map.
    pub fn map_entry<'m>(&self, message: &'m Message, field: &Field) -> Option<&'m Message> {
        if field.label != Label::Repeated || field.ty != WireType::Message {
            return None;
        }
        field
            .local_type_name()
            .and_then(|name| message.nested_message(name))
            .filter(|nested| nested.map_entry)
    }

    /// Full type of a field declared outside of any oneof.
    pub fn field_type(&self, message: &Message, field: &Field) -> Result<FieldType, Error> {
        if let Some(entry) = self.map_entry(message, field) {
            let [key, value] = entry.fields.as_slice() else {
                return Err(Error::MalformedMapEntry {
                    file: self.file.to_owned(),
                    message: entry.full_name.trim_start_matches('.').to_owned(),
                    count: entry.fields.len(),
                });
            };
            let key = self.base_type(entry, key)?;
            let value = self.base_type(entry, value)?;
            return Ok(FieldType {
                ty: TypeExpr::Dict(Box::new(key.ty.clone()), Box::new(value.ty.clone())),
                cardinality: Cardinality::Map { key },
                value,
            });
        }

        let value = self.base_type(message, field)?;
        if field.label == Label::Repeated {
            return Ok(FieldType {
                ty: TypeExpr::List(Box::new(value.ty.clone())),
                cardinality: Cardinality::Repeated,
                value,
            });
        }

        let required = self.field_options(message, field).map(|o| o.required).unwrap_or(false);
        let cardinality = match &value.default {
            Some(default) if required || !field.explicit_presence => {
                Cardinality::Required { default: default.clone() }
            }
            None if required => {
                return Err(Error::MissingDefault {
                    file: self.file.to_owned(),
                    field: field_key(message, field),
                })
            }
            _ => Cardinality::Optional,
        };
        let ty = match cardinality {
            Cardinality::Optional => TypeExpr::Maybe(Box::new(value.ty.clone())),
            _ => value.ty.clone(),
        };
        Ok(FieldType { ty, cardinality, value })
    }
}
