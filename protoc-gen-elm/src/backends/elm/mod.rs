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

//! Elm backend.
//!
//! A schema file is first lowered to an [`ElmModule`], which holds every
//! identifier and codec fragment of the generated module. The module is
//! checked for identifier collisions, then rendered to text.

pub mod codec;
pub mod names;
mod preamble;
pub mod scope;
pub mod types;

use codec::{EnumCodec, EnumVariant, MessageCodec, OneOfCodec, Slot, Variant};
use names::{decoder_name, encoder_name, NameResolver, NestingPath};
use types::{Cardinality, TypeMapper};

use crate::analyzer;
use crate::descriptor::{Enum, Message, SchemaFile};
use crate::error::Error;

pub use preamble::PLACEHOLDER;

/// Declarations generated for one message, with the declarations nested
/// inside it.
#[derive(Debug, Clone)]
pub struct MessageDecl {
    pub codec: MessageCodec,
    pub enums: Vec<EnumCodec>,
    pub oneofs: Vec<OneOfCodec>,
    pub messages: Vec<MessageDecl>,
}

/// Lowered form of a schema file.
#[derive(Debug, Clone)]
pub struct ElmModule {
    pub module_name: String,
    pub source_file: String,
    /// Modules imported with `exposing (..)`.
    pub imports: Vec<String>,
    pub uses_dict: bool,
    pub enums: Vec<EnumCodec>,
    pub messages: Vec<MessageDecl>,
}

pub struct Generator<'a> {
    file: &'a SchemaFile,
    names: &'a NameResolver,
    mapper: TypeMapper<'a>,
    remove_deprecated: bool,
    uses_dict: bool,
}

impl<'a> Generator<'a> {
    pub fn new(
        file: &'a SchemaFile,
        names: &'a NameResolver,
        mapper: TypeMapper<'a>,
        remove_deprecated: bool,
    ) -> Self {
        Generator { file, names, mapper, remove_deprecated, uses_dict: false }
    }

    fn retained(&self, deprecated: bool) -> bool {
        !(self.remove_deprecated && deprecated)
    }

    pub fn lower(mut self, imports: Vec<String>) -> Result<ElmModule, Error> {
        let file = self.file;
        let root = NestingPath::root();
        let enums = file
            .enums
            .iter()
            .filter(|e| self.retained(e.deprecated))
            .map(|e| self.lower_enum(&root, e))
            .collect::<Result<Vec<_>, _>>()?;
        let mut messages = vec![];
        for message in &file.messages {
            if self.retained(message.deprecated) && !message.map_entry {
                messages.push(self.lower_message(&root, message)?);
            }
        }
        Ok(ElmModule {
            module_name: names::module_name(&file.name),
            source_file: file.name.clone(),
            imports,
            uses_dict: self.uses_dict,
            enums,
            messages,
        })
    }

    fn lower_enum(&self, path: &NestingPath, e: &Enum) -> Result<EnumCodec, Error> {
        let variants: Vec<_> = e
            .values
            .iter()
            .filter(|value| self.retained(value.deprecated))
            .map(|value| EnumVariant {
                name: self.names.enum_variant_name(path, &value.name),
                json: value.name.clone(),
                number: value.number,
            })
            .collect();
        if variants.is_empty() {
            return Err(Error::EmptyEnum {
                file: self.file.name.clone(),
                name: e.full_name.trim_start_matches('.').to_owned(),
            });
        }
        let name = self.names.enumeration(path, &e.name);
        Ok(EnumCodec {
            default: name.default.unwrap_or_else(|| names::default_name(&name.type_name)),
            type_name: name.type_name,
            decoder: name.decoder,
            encoder: name.encoder,
            variants,
        })
    }

    fn lower_oneof(
        &self,
        path: &NestingPath,
        message: &Message,
        index: usize,
    ) -> Result<Option<OneOfCodec>, Error> {
        let oneof = &message.oneofs[index];
        let members: Vec<_> =
            message.oneof_fields(index).filter(|field| self.retained(field.deprecated)).collect();
        if members.is_empty() {
            return Ok(None);
        }
        let type_name = self.names.oneof_type_name(path, &oneof.name);
        let mut variants = Vec::with_capacity(members.len());
        for field in members {
            let base = self.mapper.base_type(message, field)?;
            variants.push(Variant {
                name: self.names.oneof_variant_name(path, &oneof.name, &field.name),
                json: field.json_name.clone(),
                ty: base.ty,
                decoder: base.decoder,
                encoder: base.encoder,
            });
        }
        Ok(Some(OneOfCodec {
            decoder: decoder_name(&type_name),
            encoder: encoder_name(&type_name),
            unspecified: self.names.unspecified_variant_name(&type_name),
            type_name,
            variants,
        }))
    }

    fn lower_message(&mut self, path: &NestingPath, message: &Message) -> Result<MessageDecl, Error> {
        tracing::trace!("lowering message {}", message.full_name);
        let name = self.names.message(path, &message.name);
        let inner = path.push(&message.name);

        let enums = message
            .enums
            .iter()
            .filter(|e| self.retained(e.deprecated))
            .map(|e| self.lower_enum(&inner, e))
            .collect::<Result<Vec<_>, _>>()?;

        let oneofs = (0..message.oneofs.len())
            .map(|index| self.lower_oneof(&inner, message, index))
            .collect::<Result<Vec<_>, _>>()?;

        // A oneof takes the slot of its first retained member.
        let mut slots = vec![];
        let mut placed = vec![false; oneofs.len()];
        for field in &message.fields {
            if !self.retained(field.deprecated) {
                continue;
            }
            match field.oneof_index {
                Some(index) => {
                    if let Some(oneof) = &oneofs[index] {
                        if !placed[index] {
                            placed[index] = true;
                            let field_name = self.names.field_name(&message.oneofs[index].name);
                            slots.push(Slot::oneof(&field_name, oneof));
                        }
                    }
                }
                None => {
                    let ty = self.mapper.field_type(message, field)?;
                    if matches!(ty.cardinality, Cardinality::Map { .. }) {
                        self.uses_dict = true;
                    }
                    slots.push(Slot::field(
                        &self.names.field_name(&field.name),
                        &field.json_name,
                        field.number,
                        &ty,
                    ));
                }
            }
        }

        let mut messages = vec![];
        for nested in &message.messages {
            if self.retained(nested.deprecated) && !nested.map_entry {
                messages.push(self.lower_message(&inner, nested)?);
            }
        }

        Ok(MessageDecl {
            codec: MessageCodec {
                type_name: name.type_name,
                decoder: name.decoder,
                encoder: name.encoder,
                slots,
            },
            enums,
            oneofs: oneofs.into_iter().flatten().collect(),
            messages,
        })
    }
}

fn enum_blocks(e: &EnumCodec, blocks: &mut Vec<String>) {
    blocks.push(e.type_decl());
    blocks.push(e.decoder());
    blocks.push(e.default_decl());
    blocks.push(e.encoder());
}

fn message_blocks(message: &MessageDecl, blocks: &mut Vec<String>) {
    blocks.push(message.codec.type_alias());
    blocks.push(message.codec.decoder());
    blocks.push(message.codec.encoder());
    for e in &message.enums {
        enum_blocks(e, blocks);
    }
    for oneof in &message.oneofs {
        blocks.push(oneof.type_decl());
        blocks.push(oneof.decoder());
        blocks.push(oneof.encoder());
    }
    for nested in &message.messages {
        message_blocks(nested, blocks);
    }
}

impl ElmModule {
    /// Render the module source. Top-level blocks are separated by two
    /// blank lines.
    pub fn render(&self) -> String {
        let mut blocks = vec![
            preamble::generate(&self.module_name, &self.source_file, self.uses_dict, &self.imports),
            preamble::placeholder(),
        ];
        for e in &self.enums {
            enum_blocks(e, &mut blocks);
        }
        for message in &self.messages {
            message_blocks(message, &mut blocks);
        }
        let mut code = blocks.join("\n\n\n");
        code.push('\n');
        code
    }
}

/// Generate the Elm module for one schema file.
pub fn generate(generator: Generator, imports: Vec<String>) -> Result<String, Error> {
    let file = generator.file.name.clone();
    let module = generator.lower(imports)?;
    analyzer::check(&module)
        .map_err(|diagnostics| Error::IdentifierCollision { file, diagnostics })?;
    Ok(module.render())
}
