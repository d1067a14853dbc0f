//! protorpc code generator
//!
//! Library behind the `protoc-gen-protorpc` plugin. It takes the
//! `CodeGeneratorRequest` protoc hands a plugin and produces one Rust source
//! file per requested `.proto` file containing service traits, server
//! adapters and client stubs.
//!
//! ## Architecture
//!
//! 1. **Backends**: named strategies implementing [`backends::Backend`]
//! 2. **Registry**: ordered collection of backends, selected by name
//! 3. **Driver**: runs one backend over the requested files, formats the
//!    result and names the output via [`naming`]
//!
//! Message structs themselves are generated elsewhere (e.g. by
//! `prost-build`); backends here only emit service code and adapters.

pub mod backends;
pub mod context;
pub mod driver;
pub mod error;
pub mod format;
pub mod naming;
pub mod registry;
pub mod utils;

use prost::Message;
use prost_types::compiler::code_generator_response::Feature;
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};

pub use backends::{default_registry, Backend};
pub use context::GeneratorContext;
pub use driver::{Diagnostic, Generator};
pub use error::{Error, FormatError, Result};
pub use registry::BackendRegistry;

/// Run `backend` over a decoded request and build the response.
pub fn generate(request: CodeGeneratorRequest, backend: &dyn Backend) -> CodeGeneratorResponse {
    let context = GeneratorContext::new(request);
    let mut generator = Generator::new(&context, backend);

    CodeGeneratorResponse {
        supported_features: Some(Feature::Proto3Optional as u64),
        file: generator.generate(),
        ..Default::default()
    }
}

/// Decode an encoded request, generate, and encode the response.
pub fn generate_bytes(input: &[u8], backend: &dyn Backend) -> Result<Vec<u8>> {
    let request = CodeGeneratorRequest::decode(input)?;
    let response = generate(request, backend);
    Ok(response.encode_to_vec())
}
