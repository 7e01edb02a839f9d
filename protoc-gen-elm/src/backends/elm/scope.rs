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

use std::collections::HashMap;

use super::names::{NameResolver, NestingPath, ResolvedName};
use crate::descriptor::{Message, SchemaFile};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Message,
    Enum,
}

#[derive(Debug, Clone)]
pub struct ResolvedType {
    pub name: ResolvedName,
    pub kind: TypeKind,
}

/// Gather the Elm names of every message and enum declared in the
/// request, keyed by fully-qualified schema name.
#[derive(Debug, Default)]
pub struct Scope {
    typedef: HashMap<String, ResolvedType>,
}

impl Scope {
    pub fn new<'a>(files: impl IntoIterator<Item = &'a SchemaFile>, names: &NameResolver) -> Scope {
        let mut scope = Scope::default();
        for file in files {
            let root = NestingPath::root();
            for e in &file.enums {
                scope.insert_enum(&e.full_name, &root, &e.name, names);
            }
            for message in &file.messages {
                scope.insert_message(message, &root, names);
            }
        }
        scope
    }

    fn insert_enum(&mut self, full_name: &str, path: &NestingPath, name: &str, names: &NameResolver) {
        self.typedef.insert(
            full_name.to_owned(),
            ResolvedType { name: names.enumeration(path, name), kind: TypeKind::Enum },
        );
    }

    fn insert_message(&mut self, message: &Message, path: &NestingPath, names: &NameResolver) {
        self.typedef.insert(
            message.full_name.clone(),
            ResolvedType { name: names.message(path, &message.name), kind: TypeKind::Message },
        );
        let path = path.push(&message.name);
        for e in &message.enums {
            self.insert_enum(&e.full_name, &path, &e.name, names);
        }
        for nested in &message.messages {
            self.insert_message(nested, &path, names);
        }
    }

    pub fn get(&self, full_name: &str) -> Option<&ResolvedType> {
        self.typedef.get(full_name)
    }
}
