//! protoc-gen-protorpc - protoc plugin entry point
//!
//! Reads a `CodeGeneratorRequest` from stdin, runs the selected backend and
//! writes the `CodeGeneratorResponse` to stdout.

mod config;
mod logging;

use std::io::{self, Read, Write};

use anyhow::Context;
use clap::Parser;
use prost::Message;
use prost_types::compiler::CodeGeneratorRequest;
use protorpc_codegen::default_registry;

use crate::config::{Cli, PluginOptions};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_format);

    let registry = default_registry();

    if cli.list_backends {
        for name in registry.names() {
            println!("{name}");
        }
        return Ok(());
    }

    let mut input = Vec::new();
    io::stdin()
        .read_to_end(&mut input)
        .context("Failed to read CodeGeneratorRequest from stdin")?;
    let request = CodeGeneratorRequest::decode(input.as_slice())
        .context("Failed to decode CodeGeneratorRequest")?;

    let options = PluginOptions::parse(request.parameter.as_deref());
    let backend = registry
        .select(options.backend_name(&cli))
        .context("Invalid backend configuration")?;

    tracing::info!(
        backend = backend.name(),
        files = request.file_to_generate.len(),
        "Generating protorpc services"
    );

    let response = protorpc_codegen::generate(request, backend);

    io::stdout()
        .lock()
        .write_all(&response.encode_to_vec())
        .context("Failed to write CodeGeneratorResponse to stdout")?;

    Ok(())
}
