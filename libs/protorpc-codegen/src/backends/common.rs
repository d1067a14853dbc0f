//! Pieces shared by the protorpc backends

use prost_types::{FileDescriptorProto, ServiceDescriptorProto};

use crate::context::{GeneratorContext, FILE_SERVICE, SERVICE_METHOD};
use crate::utils::{const_ident, doc_lines, method_ident, type_ident};

/// A unary method ready for rendering
pub(super) struct Method {
    pub proto_name: String,
    pub ident: String,
    pub input: String,
    pub output: String,
    pub docs: String,
}

/// Names derived from one service declaration
pub(super) struct ServiceNames {
    /// `pkg.Service`
    pub full_name: String,
    pub trait_name: String,
    pub server: String,
    pub client: String,
    pub name_const: String,
    pub docs: String,
}

impl ServiceNames {
    pub fn new(
        ctx: &GeneratorContext,
        file: &FileDescriptorProto,
        service: &ServiceDescriptorProto,
    ) -> Self {
        let name = service.name();
        let trait_name = type_ident(name);
        let full_name = ctx.qualified_name(file, name);
        let comments = service_path(file, service).and_then(|p| ctx.leading_comments(file, &p));
        let docs = match comments {
            Some(comments) => doc_lines(comments),
            None => format!("/// Methods of the `{full_name}` service.\n"),
        };

        Self {
            server: format!("{trait_name}Server"),
            client: format!("{trait_name}Client"),
            name_const: name_const(name),
            trait_name,
            full_name,
            docs,
        }
    }
}

/// `ECHO_SERVICE_NAME` for both `Echo` and `EchoService`
fn name_const(service: &str) -> String {
    let shouty = const_ident(service);
    if shouty.ends_with("_SERVICE") || shouty == "SERVICE" {
        format!("{shouty}_NAME")
    } else {
        format!("{shouty}_SERVICE_NAME")
    }
}

/// Preamble shared by both backends: inner doc lines only, so the text stays
/// valid at the top of a module.
pub(super) fn render_header(
    ctx: &GeneratorContext,
    file: &FileDescriptorProto,
    backend: &str,
) -> String {
    let mut code = String::new();
    code.push_str(&format!(
        "//! Code generated by protoc-gen-protorpc ({backend}). DO NOT EDIT.\n"
    ));
    code.push_str("//!\n");
    code.push_str(&format!("//! Source: {}\n", file.name()));
    code.push_str(&format!("//! Package: {}\n", ctx.package_name(file)));
    code
}

/// Unary methods of `service`; streaming methods are skipped
pub(super) fn unary_methods(
    ctx: &GeneratorContext,
    file: &FileDescriptorProto,
    service: &ServiceDescriptorProto,
) -> Vec<Method> {
    let base_path = service_path(file, service);
    let mut methods = Vec::new();

    for (index, method) in service.method.iter().enumerate() {
        if method.client_streaming() || method.server_streaming() {
            tracing::debug!(
                service = service.name(),
                method = method.name(),
                "skipping streaming method"
            );
            continue;
        }

        let comments = base_path.as_ref().and_then(|base| {
            let mut path = base.clone();
            path.extend([SERVICE_METHOD, index as i32]);
            ctx.leading_comments(file, &path)
        });

        methods.push(Method {
            proto_name: method.name().to_string(),
            ident: method_ident(method.name()),
            input: ctx.resolve_type(file, method.input_type()),
            output: ctx.resolve_type(file, method.output_type()),
            docs: comments.map(doc_lines).unwrap_or_default(),
        });
    }

    methods
}

/// SourceCodeInfo path of a service, located by name
fn service_path(
    file: &FileDescriptorProto,
    service: &ServiceDescriptorProto,
) -> Option<Vec<i32>> {
    file.service
        .iter()
        .position(|s| s.name() == service.name())
        .map(|index| vec![FILE_SERVICE, index as i32])
}
