//! Code generation backends
//!
//! Each target flavor has its own module that implements the `Backend` trait.
//! The driver calls the hooks of exactly one backend per run: the header once,
//! then every message, then every service, in declaration order.

mod common;
pub mod protorpc;
pub mod protorpc_async;

use prost_types::{DescriptorProto, FileDescriptorProto, ServiceDescriptorProto};

use crate::context::GeneratorContext;
use crate::registry::BackendRegistry;

pub use protorpc::ProtorpcBackend;
pub use protorpc_async::ProtorpcAsyncBackend;

/// Trait that all code generation backends must implement
///
/// Backends are stateless. Missing descriptor fields degrade to empty output
/// rather than errors; formatting problems are handled by the driver.
pub trait Backend {
    /// Stable unique identifier used for selection
    fn name(&self) -> &str;

    /// Suffix appended to the output base name (e.g. `.pb.rpc.rs`)
    fn file_extension(&self) -> &str;

    /// Preamble text for the whole file
    fn render_header(&self, ctx: &GeneratorContext, file: &FileDescriptorProto) -> String;

    /// Text for a single message, called once per top-level message
    fn render_message(
        &self,
        ctx: &GeneratorContext,
        file: &FileDescriptorProto,
        message: &DescriptorProto,
    ) -> String;

    /// Service interface and stub text for one service
    fn render_service(
        &self,
        ctx: &GeneratorContext,
        file: &FileDescriptorProto,
        service: &ServiceDescriptorProto,
    ) -> String;
}

/// Registry holding the built-in backends, `protorpc` first.
pub fn default_registry() -> BackendRegistry {
    let mut registry = BackendRegistry::new();
    registry.register(ProtorpcBackend::new());
    registry.register(ProtorpcAsyncBackend::new());
    registry
}
