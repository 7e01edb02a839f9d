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

//! Synthesis of the Elm declarations emitted for messages, oneofs and
//! enums.
//!
//! The record type, the decoder pipeline and the encoder list of a message
//! are all produced from the same list of [`Slot`]s so that the positional
//! record constructor used by the decoder always matches the type alias.

use super::types::{Cardinality, Expr, FieldType, TypeExpr};

/// Name of the argument of generated encoders.
const ARG: &str = "v";

fn quote(text: &str) -> String {
    format!("\"{text}\"")
}

/// One record field and its codec fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub field: String,
    pub ty: String,
    /// Schema field number, absent for oneof slots.
    pub number: Option<i32>,
    /// Pipeline step of the message decoder, without the leading `|>`.
    pub decoder: String,
    /// Element of the message encoder list, a `Maybe ( String, JE.Value )`.
    pub encoder: String,
}

impl Slot {
    pub fn field(field: &str, json: &str, number: i32, ty: &FieldType) -> Slot {
        let json = quote(json);
        let value = format!("{ARG}.{field}");
        let (decoder, encoder) = match &ty.cardinality {
            Cardinality::Required { default } => (
                format!(
                    "required {json} {} {}",
                    ty.value.decoder.as_argument(),
                    default.as_argument()
                ),
                format!(
                    "requiredFieldEncoder {json} {} {} {value}",
                    ty.value.encoder.as_argument(),
                    default.as_argument()
                ),
            ),
            Cardinality::Optional => (
                format!("optional {json} {}", ty.value.decoder.as_argument()),
                format!("optionalEncoder {json} {} {value}", ty.value.encoder.as_argument()),
            ),
            Cardinality::Repeated => (
                format!("repeated {json} {}", ty.value.decoder.as_argument()),
                format!("repeatedFieldEncoder {json} {} {value}", ty.value.encoder.as_argument()),
            ),
            Cardinality::Map { .. } => (
                format!("mapEntries {json} {}", ty.value.decoder.as_argument()),
                format!(
                    "mapEntriesFieldEncoder {json} {} {value}",
                    ty.value.encoder.as_argument()
                ),
            ),
        };
        Slot { field: field.to_owned(), ty: ty.ty.to_string(), number: Some(number), decoder, encoder }
    }

    pub fn oneof(field: &str, oneof: &OneOfCodec) -> Slot {
        Slot {
            field: field.to_owned(),
            ty: oneof.type_name.clone(),
            number: None,
            decoder: format!("field {}", oneof.decoder),
            encoder: format!("{} {ARG}.{field}", oneof.encoder),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCodec {
    pub type_name: String,
    pub decoder: String,
    pub encoder: String,
    pub slots: Vec<Slot>,
}

impl MessageCodec {
    pub fn type_alias(&self) -> String {
        let mut lines = vec![format!("type alias {} =", self.type_name)];
        if self.slots.is_empty() {
            lines.push("    {}".to_owned());
        }
        for (index, slot) in self.slots.iter().enumerate() {
            let leading = if index == 0 { '{' } else { ',' };
            lines.push(match slot.number {
                Some(number) => format!("    {leading} {} : {} -- {number}", slot.field, slot.ty),
                None => format!("    {leading} {} : {}", slot.field, slot.ty),
            });
        }
        if !self.slots.is_empty() {
            lines.push("    }".to_owned());
        }
        lines.join("\n")
    }

    pub fn decoder(&self) -> String {
        // An empty record alias has no constructor function.
        let constructor = if self.slots.is_empty() { "{}" } else { self.type_name.as_str() };
        let mut lines = vec![
            format!("{} : JD.Decoder {}", self.decoder, self.type_name),
            format!("{} =", self.decoder),
            format!("    JD.lazy <| \\_ -> decode {constructor}"),
        ];
        lines.extend(self.slots.iter().map(|slot| format!("        |> {}", slot.decoder)));
        lines.join("\n")
    }

    pub fn encoder(&self) -> String {
        let arg = if self.slots.is_empty() { "_" } else { ARG };
        let mut lines = vec![
            format!("{} : {} -> JE.Value", self.encoder, self.type_name),
            format!("{} {arg} =", self.encoder),
            "    JE.object <| List.filterMap identity <|".to_owned(),
        ];
        lines.extend(bracketed(self.slots.iter().map(|slot| slot.encoder.clone()), "        "));
        lines.join("\n")
    }
}

/// Format items as a multi-line Elm list.
fn bracketed(items: impl Iterator<Item = String>, indent: &str) -> Vec<String> {
    let mut lines: Vec<String> = items
        .enumerate()
        .map(|(index, item)| {
            let leading = if index == 0 { '[' } else { ',' };
            format!("{indent}{leading} {item}")
        })
        .collect();
    lines.push(if lines.is_empty() { format!("{indent}[]") } else { format!("{indent}]") });
    lines
}

/// Member of a oneof union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub name: String,
    pub json: String,
    pub ty: TypeExpr,
    pub decoder: Expr,
    pub encoder: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneOfCodec {
    pub type_name: String,
    pub decoder: String,
    pub encoder: String,
    pub unspecified: String,
    pub variants: Vec<Variant>,
}

impl OneOfCodec {
    pub fn type_decl(&self) -> String {
        let mut lines = vec![format!("type {}", self.type_name), format!("    = {}", self.unspecified)];
        lines.extend(
            self.variants
                .iter()
                .map(|variant| format!("    | {} {}", variant.name, variant.ty.as_argument())),
        );
        lines.join("\n")
    }

    /// The first alternative matching the JSON object wins, members are
    /// tried in declaration order.
    pub fn decoder(&self) -> String {
        let mut lines = vec![
            format!("{} : JD.Decoder {}", self.decoder, self.type_name),
            format!("{} =", self.decoder),
            "    JD.lazy <| \\_ -> JD.oneOf".to_owned(),
        ];
        let alternatives = self
            .variants
            .iter()
            .map(|variant| {
                format!(
                    "JD.map {} (JD.field {} {})",
                    variant.name,
                    quote(&variant.json),
                    variant.decoder.as_argument()
                )
            })
            .chain(std::iter::once(format!("JD.succeed {}", self.unspecified)));
        lines.extend(bracketed(alternatives, "        "));
        lines.join("\n")
    }

    pub fn encoder(&self) -> String {
        let mut lines = vec![
            format!("{} : {} -> Maybe ( String, JE.Value )", self.encoder, self.type_name),
            format!("{} {ARG} =", self.encoder),
            format!("    case {ARG} of"),
            format!("        {} ->", self.unspecified),
            "            Nothing".to_owned(),
        ];
        for variant in &self.variants {
            lines.push(String::new());
            lines.push(format!("        {} x ->", variant.name));
            lines.push(format!(
                "            Just ( {}, {} x )",
                quote(&variant.json),
                variant.encoder.as_argument()
            ));
        }
        lines.join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumVariant {
    pub name: String,
    /// Declared schema name, used as the JSON representation.
    pub json: String,
    pub number: i32,
}

/// Enum declarations. The first variant is the default one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumCodec {
    pub type_name: String,
    pub decoder: String,
    pub encoder: String,
    pub default: String,
    pub variants: Vec<EnumVariant>,
}

impl EnumCodec {
    fn default_variant(&self) -> &str {
        self.variants.first().map(|variant| variant.name.as_str()).unwrap_or_default()
    }

    pub fn type_decl(&self) -> String {
        let mut lines = vec![format!("type {}", self.type_name)];
        lines.extend(self.variants.iter().enumerate().map(|(index, variant)| {
            let leading = if index == 0 { '=' } else { '|' };
            format!("    {leading} {} -- {}", variant.name, variant.number)
        }));
        lines.join("\n")
    }

    /// Unknown strings decode to the default variant.
    pub fn decoder(&self) -> String {
        let cases = self
            .variants
            .iter()
            .map(|variant| (quote(&variant.json), variant.name.clone()))
            .chain(std::iter::once(("_".to_owned(), self.default_variant().to_owned())));
        let mut lines = vec![
            format!("{} : JD.Decoder {}", self.decoder, self.type_name),
            format!("{} =", self.decoder),
        ];
        lines.extend(lookup(cases));
        lines.push("    JD.map lookup JD.string".to_owned());
        lines.join("\n")
    }

    pub fn default_decl(&self) -> String {
        [
            format!("{} : {}", self.default, self.type_name),
            format!("{} =", self.default),
            format!("    {}", self.default_variant()),
        ]
        .join("\n")
    }

    pub fn encoder(&self) -> String {
        let cases =
            self.variants.iter().map(|variant| (variant.name.clone(), quote(&variant.json)));
        let mut lines = vec![
            format!("{} : {} -> JE.Value", self.encoder, self.type_name),
            format!("{} {ARG} =", self.encoder),
        ];
        lines.extend(lookup(cases));
        lines.push(format!("    JE.string <| lookup {ARG}"));
        lines.join("\n")
    }
}

/// `let lookup s = case s of ... in` with one branch per pattern.
fn lookup(cases: impl Iterator<Item = (String, String)>) -> Vec<String> {
    let mut lines = vec![
        "    let".to_owned(),
        "        lookup s =".to_owned(),
        "            case s of".to_owned(),
    ];
    for (index, (pattern, result)) in cases.enumerate() {
        if index > 0 {
            lines.push(String::new());
        }
        lines.push(format!("                {pattern} ->"));
        lines.push(format!("                    {result}"));
    }
    lines.push("    in".to_owned());
    lines
}
