//! Generation driver
//!
//! Runs the selected backend over every file protoc asked for: header, then
//! messages, then services, each fragment followed by a newline. The buffer
//! is reformatted on a best-effort basis; a formatting failure is logged and
//! recorded, and the unformatted text is emitted instead.

use std::fmt;

use prost_types::compiler::code_generator_response::File;
use prost_types::FileDescriptorProto;

use crate::backends::Backend;
use crate::context::GeneratorContext;
use crate::format::{Formatter, RustFormatter};
use crate::naming;

/// Non-fatal problem found while generating one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file, self.message)
    }
}

pub struct Generator<'a> {
    context: &'a GeneratorContext,
    backend: &'a dyn Backend,
    formatter: Box<dyn Formatter + 'a>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Generator<'a> {
    pub fn new(context: &'a GeneratorContext, backend: &'a dyn Backend) -> Self {
        Self {
            context,
            backend,
            formatter: Box::new(RustFormatter),
            diagnostics: Vec::new(),
        }
    }

    /// Replace the default `syn`/`prettyplease` formatter
    pub fn with_formatter<F: Formatter + 'a>(mut self, formatter: F) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Generate outputs for all requested files, in request order
    pub fn generate(&mut self) -> Vec<File> {
        let context = self.context;
        context
            .files()
            .iter()
            .filter_map(|file| self.generate_file(file))
            .collect()
    }

    /// Generate one output, or `None` when the file is only a dependency
    pub fn generate_file(&mut self, file: &FileDescriptorProto) -> Option<File> {
        if !self.context.is_file_to_generate(file.name()) {
            tracing::trace!(file = file.name(), "skipping dependency");
            return None;
        }

        let source = self.render(file);
        let content = match self.formatter.format(&source) {
            Ok(formatted) => formatted,
            Err(err) => {
                tracing::warn!(
                    file = file.name(),
                    error = %err,
                    "formatting generated source failed, emitting unformatted text"
                );
                self.diagnostics.push(Diagnostic {
                    file: file.name().to_string(),
                    message: format!("format failed: {err}"),
                });
                source
            }
        };

        let name = naming::output_file_name(file, self.backend.file_extension());
        tracing::debug!(
            file = file.name(),
            output = %name,
            backend = self.backend.name(),
            "generated file"
        );

        Some(File {
            name: Some(name),
            content: Some(content),
            ..Default::default()
        })
    }

    /// Concatenated, unformatted backend output for one file
    pub fn render(&self, file: &FileDescriptorProto) -> String {
        let ctx = self.context;
        let mut buf = String::new();

        push_line(&mut buf, &self.backend.render_header(ctx, file));
        for message in &file.message_type {
            push_line(&mut buf, &self.backend.render_message(ctx, file, message));
        }
        for service in &file.service {
            push_line(&mut buf, &self.backend.render_service(ctx, file, service));
        }

        buf
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

fn push_line(buf: &mut String, fragment: &str) {
    buf.push_str(fragment);
    buf.push('\n');
}
