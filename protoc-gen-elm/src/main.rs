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

//! protoc plugin generating Elm types and JSON codecs.

use argh::FromArgs;
use codespan_reporting::term::termcolor;
use std::io::{Read, Write};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, Registry};

use protoc_gen_elm::error::Error;
use protoc_gen_elm::plugin;

#[derive(FromArgs, Debug)]
/// protoc plugin generating Elm types and JSON codecs.
/// The CodeGeneratorRequest is read from stdin and the
/// CodeGeneratorResponse is written to stdout.
/// Invoke through protoc: protoc --elm_out=<dir> [--elm_opt=<parameters>].
struct Opt {
    #[argh(switch)]
    /// print tool version and exit.
    version: bool,
}

/// Log to stderr, stdout carries the response. The level defaults to
/// `info` and can be set with `RUST_LOG`.
fn init_logging() -> reload::Handle<LevelFilter, Registry> {
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::INFO);
    let (filter, handle) = reload::Layer::new(level);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).without_time())
        .init();
    handle
}

fn generate(handle: &reload::Handle<LevelFilter, Registry>) -> Result<(), Error> {
    let mut input = vec![];
    std::io::stdin().lock().read_to_end(&mut input)?;
    let (request, parameters) = plugin::parse_request(&input)?;

    if parameters.debug {
        if let Err(err) = handle.reload(LevelFilter::DEBUG) {
            tracing::warn!("could not raise log level: {err}");
        }
        tracing::debug!("parameters: {parameters:?}");
    }

    let output = plugin::respond(&request, &parameters)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&output)?;
    stdout.flush()?;
    Ok(())
}

fn main() -> Result<(), String> {
    let opt: Opt = argh::from_env();

    if opt.version {
        println!("protoc-gen-elm {}\nCopyright (C) 2026 Google LLC", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let handle = init_logging();
    generate(&handle).map_err(|err| {
        tracing::error!("{err}");
        if let Error::IdentifierCollision { diagnostics, .. } = &err {
            let writer = termcolor::StandardStream::stderr(termcolor::ColorChoice::Auto);
            let mut lock = writer.lock();
            if let Err(emit_err) = diagnostics.emit(&mut lock) {
                tracing::error!("could not print analyzer diagnostics: {emit_err}");
            }
        }
        format!("{err}")
    })
}
