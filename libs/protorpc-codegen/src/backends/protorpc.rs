//! Blocking protorpc backend
//!
//! Emits, per service, a trait with one method per unary RPC, a server
//! adapter implementing `::protorpc::Service`, and a client stub over any
//! `::protorpc::Transport`. Every top-level message gets a
//! `::protorpc::NamedMessage` impl so the runtime can report type names.

use prost_types::{DescriptorProto, FileDescriptorProto, ServiceDescriptorProto};

use super::common::{self, ServiceNames};
use super::Backend;
use crate::context::GeneratorContext;

const RESULT: &str = "::core::result::Result";

#[derive(Debug, Clone, Copy, Default)]
pub struct ProtorpcBackend;

impl ProtorpcBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Backend for ProtorpcBackend {
    fn name(&self) -> &str {
        "protorpc"
    }

    fn file_extension(&self) -> &str {
        ".pb.rpc.rs"
    }

    fn render_header(&self, ctx: &GeneratorContext, file: &FileDescriptorProto) -> String {
        common::render_header(ctx, file, self.name())
    }

    fn render_message(
        &self,
        ctx: &GeneratorContext,
        file: &FileDescriptorProto,
        message: &DescriptorProto,
    ) -> String {
        let full_name = ctx.qualified_name(file, message.name());
        let ty = ctx.resolve_type(file, &format!(".{full_name}"));

        format!(
            "impl ::protorpc::NamedMessage for {ty} {{\n    \
             const FULL_NAME: &'static str = \"{full_name}\";\n\
             }}\n"
        )
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

        // Service trait
        code.push_str(&names.docs);
        code.push_str(&format!("pub trait {} {{\n", names.trait_name));
        for method in &methods {
            code.push_str(&method.docs);
            code.push_str(&format!(
                "fn {}(&self, request: {}) -> {RESULT}<{}, ::protorpc::Error>;\n",
                method.ident, method.input, method.output
            ));
        }
        code.push_str("}\n\n");

        // Server adapter
        code.push_str(&format!(
            "/// Dispatches encoded `{}` requests to a [`{}`] implementation.\n\
             pub struct {}<S> {{\n    inner: S,\n}}\n\n",
            names.full_name, names.trait_name, names.server
        ));
        code.push_str(&format!(
            "impl<S: {}> {}<S> {{\n    \
             pub fn new(inner: S) -> Self {{\n        Self {{ inner }}\n    }}\n\n    \
             pub fn into_inner(self) -> S {{\n        self.inner\n    }}\n}}\n\n",
            names.trait_name, names.server
        ));
        code.push_str(&format!(
            "impl<S: {}> ::protorpc::Service for {}<S> {{\n",
            names.trait_name, names.server
        ));
        code.push_str(&format!(
            "fn name(&self) -> &'static str {{\n    {}\n}}\n\n",
            names.name_const
        ));
        code.push_str(&format!(
            "fn call(&self, method: &str, payload: &[u8]) -> \
             {RESULT}<::std::vec::Vec<u8>, ::protorpc::Error> {{\n"
        ));
        code.push_str("match method {\n");
        for method in &methods {
            code.push_str(&format!(
                "\"{}\" => {{\n\
                 let request = <{} as ::prost::Message>::decode(payload)?;\n\
                 let reply = self.inner.{}(request)?;\n\
                 Ok(::prost::Message::encode_to_vec(&reply))\n\
                 }}\n",
                method.proto_name, method.input, method.ident
            ));
        }
        code.push_str(&format!(
            "_ => Err(::protorpc::Error::unknown_method({}, method)),\n",
            names.name_const
        ));
        code.push_str("}\n}\n}\n\n");

        // Client stub
        code.push_str(&format!(
            "/// Client for the `{}` service.\n\
             #[derive(Debug, Clone)]\n\
             pub struct {}<T> {{\n    transport: T,\n}}\n\n",
            names.full_name, names.client
        ));
        code.push_str(&format!(
            "impl<T: ::protorpc::Transport> {}<T> {{\n\
             pub fn new(transport: T) -> Self {{\n    Self {{ transport }}\n}}\n",
            names.client
        ));
        for method in &methods {
            code.push('\n');
            code.push_str(&method.docs);
            code.push_str(&format!(
                "pub fn {}(&self, request: &{}) -> {RESULT}<{}, ::protorpc::Error> {{\n\
                 let payload = ::prost::Message::encode_to_vec(request);\n\
                 let reply = self.transport.call({}, \"{}\", &payload)?;\n\
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
