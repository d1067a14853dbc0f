//! Async protorpc backend
//!
//! Same shape as the blocking backend, with `async fn` service methods and
//! clients over `::protorpc::AsyncTransport`. Messages need no adapter code.

use prost_types::{DescriptorProto, FileDescriptorProto, ServiceDescriptorProto};

use super::common::{self, ServiceNames};
use super::Backend;
use crate::context::GeneratorContext;

const RESULT: &str = "::core::result::Result";

#[derive(Debug, Clone, Copy, Default)]
pub struct ProtorpcAsyncBackend;

impl ProtorpcAsyncBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Backend for ProtorpcAsyncBackend {
    fn name(&self) -> &str {
        "protorpc-async"
    }

    fn file_extension(&self) -> &str {
        ".pb.rpc_async.rs"
    }

    fn render_header(&self, ctx: &GeneratorContext, file: &FileDescriptorProto) -> String {
        common::render_header(ctx, file, self.name())
    }

    fn render_message(
        &self,
        _ctx: &GeneratorContext,
        _file: &FileDescriptorProto,
        _message: &DescriptorProto,
    ) -> String {
        String::new()
    }

    fn render_service(
        &self,
        ctx: &GeneratorContext,
        file: &FileDescriptorProto,
        service: &ServiceDescriptorProto,
    ) -> String {
        let names = ServiceNames::new(ctx, file, service);
        let methods = common::unary_methods(ctx, file, service);
        let mut code = String::new();

        code.push_str(&format!(
            "/// Fully-qualified name of the `{}` service.\n\
             pub const {}: &str = \"{}\";\n\n",
            names.full_name, names.name_const, names.full_name
        ));

        code.push_str(&names.docs);
        code.push_str(&format!("pub trait {}: Send + Sync {{\n", names.trait_name));
        for method in &methods {
            code.push_str(&method.docs);
            code.push_str(&format!(
                "async fn {}(&self, request: {}) -> {RESULT}<{}, ::protorpc::Error>;\n",
                method.ident, method.input, method.output
            ));
        }
        code.push_str("}\n\n");

        code.push_str(&format!(
            "/// Dispatches encoded `{}` requests to a [`{}`] implementation.\n\
             pub struct {}<S> {{\n    inner: S,\n}}\n\n\
             impl<S: {}> {}<S> {{\n    \
             pub fn new(inner: S) -> Self {{\n        Self {{ inner }}\n    }}\n}}\n\n",
            names.full_name, names.trait_name, names.server, names.trait_name, names.server
        ));

        code.push_str(&format!(
            "impl<S: {}> ::protorpc::AsyncService for {}<S> {{\n\
             fn name(&self) -> &'static str {{\n    {}\n}}\n\n\
             async fn call(&self, method: &str, payload: ::std::vec::Vec<u8>) -> \
             {RESULT}<::std::vec::Vec<u8>, ::protorpc::Error> {{\n\
             match method {{\n",
            names.trait_name, names.server, names.name_const
        ));
        for method in &methods {
            code.push_str(&format!(
                "\"{}\" => {{\n\
                 let request = <{} as ::prost::Message>::decode(payload.as_slice())?;\n\
                 let reply = self.inner.{}(request).await?;\n\
                 Ok(::prost::Message::encode_to_vec(&reply))\n\
                 }}\n",
                method.proto_name, method.input, method.ident
            ));
        }
        code.push_str(&format!(
            "_ => Err(::protorpc::Error::unknown_method({}, method)),\n}}\n}}\n}}\n\n",
            names.name_const
        ));

        code.push_str(&format!(
            "/// Async client for the `{}` service.\n\
             #[derive(Debug, Clone)]\n\
             pub struct {}<T> {{\n    transport: T,\n}}\n\n\
             impl<T: ::protorpc::AsyncTransport> {}<T> {{\n\
             pub fn new(transport: T) -> Self {{\n    Self {{ transport }}\n}}\n",
            names.full_name, names.client, names.client
        ));
        for method in &methods {
            code.push('\n');
            code.push_str(&method.docs);
            code.push_str(&format!(
                "pub async fn {}(&self, request: &{}) -> {RESULT}<{}, ::protorpc::Error> {{\n\
                 let payload = ::prost::Message::encode_to_vec(request);\n\
                 let reply = self.transport.call({}, \"{}\", payload).await?;\n\
                 Ok(<{} as ::prost::Message>::decode(reply.as_slice())?)\n\
                 }}\n",
                method.ident,
                method.input,
                method.output,
                names.name_const,
                method.proto_name,
                method.output
            ));
        }
        code.push_str("}\n");

        code
    }
}
