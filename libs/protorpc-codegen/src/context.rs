//! Generator context
//!
//! Wraps the decoded `CodeGeneratorRequest` and indexes every message type
//! declared across the supplied files, so backends can turn fully-qualified
//! proto type names into Rust paths.

use std::collections::HashMap;

use heck::{ToSnakeCase, ToUpperCamelCase};
use prost_types::compiler::CodeGeneratorRequest;
use prost_types::source_code_info::Location;
use prost_types::{DescriptorProto, FileDescriptorProto};

use crate::naming;

/// Field number of `FileDescriptorProto.service`
pub const FILE_SERVICE: i32 = 6;
/// Field number of `ServiceDescriptorProto.method`
pub const SERVICE_METHOD: i32 = 2;

/// Where a message type lives
#[derive(Debug, Clone, PartialEq, Eq)]
struct TypeEntry {
    package: String,
    /// Enclosing message names, outermost first
    parents: Vec<String>,
    name: String,
}

/// Compiler working context handed to every backend hook
#[derive(Debug, Clone, Default)]
pub struct GeneratorContext {
    request: CodeGeneratorRequest,
    types: HashMap<String, TypeEntry>,
}

impl GeneratorContext {
    pub fn new(request: CodeGeneratorRequest) -> Self {
        let mut types = HashMap::new();
        for file in &request.proto_file {
            let package = file.package().to_string();
            for message in &file.message_type {
                index_message(&mut types, &package, &[], message);
            }
        }
        Self { request, types }
    }

    /// All supplied files, dependencies included, in request order
    pub fn files(&self) -> &[FileDescriptorProto] {
        &self.request.proto_file
    }

    pub fn files_to_generate(&self) -> &[String] {
        &self.request.file_to_generate
    }

    /// Exact-match membership test against the files protoc asked for
    pub fn is_file_to_generate(&self, name: &str) -> bool {
        self.request.file_to_generate.iter().any(|f| f == name)
    }

    pub fn parameter(&self) -> Option<&str> {
        self.request.parameter.as_deref()
    }

    pub fn file(&self, name: &str) -> Option<&FileDescriptorProto> {
        self.files().iter().find(|f| f.name() == name)
    }

    /// Rust path of a fully-qualified proto type (`.pkg.Outer.Inner`) as seen
    /// from the module generated for `from`.
    ///
    /// Packages map to nested snake_case modules and nested messages live in
    /// a snake_case module named after their parent. Names missing from the
    /// request resolve to their last segment.
    pub fn resolve_type(&self, from: &FileDescriptorProto, type_name: &str) -> String {
        let Some(entry) = self.types.get(type_name) else {
            let last = type_name.rsplit('.').next().unwrap_or(type_name);
            return last.to_upper_camel_case();
        };

        let mut segments = Vec::new();
        if entry.package != from.package() {
            segments.extend(package_segments(from.package()).map(|_| "super".to_string()));
            segments.extend(package_segments(&entry.package).map(|s| s.to_snake_case()));
        }

        segments.extend(entry.parents.iter().map(|p| p.to_snake_case()));
        segments.push(entry.name.to_upper_camel_case());
        segments.join("::")
    }

    /// Fully-qualified proto name without the leading dot (`pkg.Name`)
    pub fn qualified_name(&self, file: &FileDescriptorProto, name: &str) -> String {
        if file.package().is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", file.package(), name)
        }
    }

    /// Package name surfaced to header text.
    ///
    /// Prefers the package part of a `go_package` override, then the last
    /// segment of the proto package, then the file's base name.
    pub fn package_name(&self, file: &FileDescriptorProto) -> String {
        if let Some(option) = naming::package_option(file) {
            return option.package;
        }
        if let Some(last) = package_segments(file.package()).last() {
            return last.to_snake_case();
        }
        naming::base_name(&naming::strip_proto_extension(file.name())).to_snake_case()
    }

    /// SourceCodeInfo location for an element path
    pub fn location<'a>(
        &self,
        file: &'a FileDescriptorProto,
        path: &[i32],
    ) -> Option<&'a Location> {
        file.source_code_info
            .as_ref()?
            .location
            .iter()
            .find(|loc| loc.path == path)
    }

    /// Leading comments attached to an element path, if any
    pub fn leading_comments<'a>(
        &self,
        file: &'a FileDescriptorProto,
        path: &[i32],
    ) -> Option<&'a str> {
        self.location(file, path)
            .and_then(|loc| loc.leading_comments.as_deref())
            .filter(|c| !c.trim().is_empty())
    }
}

fn index_message(
    types: &mut HashMap<String, TypeEntry>,
    package: &str,
    parents: &[String],
    message: &DescriptorProto,
) {
    let name = message.name().to_string();

    let mut key = String::from(".");
    if !package.is_empty() {
        key.push_str(package);
        key.push('.');
    }
    for parent in parents {
        key.push_str(parent);
        key.push('.');
    }
    key.push_str(&name);

    let mut nesting = parents.to_vec();
    nesting.push(name.clone());
    for nested in &message.nested_type {
        index_message(types, package, &nesting, nested);
    }

    types.insert(
        key,
        TypeEntry {
            package: package.to_string(),
            parents: parents.to_vec(),
            name,
        },
    );
}

fn package_segments(package: &str) -> impl Iterator<Item = &str> {
    package.split('.').filter(|s| !s.is_empty())
}
