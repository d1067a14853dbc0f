//! Output file naming
//!
//! Derives the relative path of a generated file from the input file name,
//! the backend's extension, and an optional `go_package`-style override of
//! the form `importPath[;packageName]`. Override parsing never fails: empty
//! or unusable values behave as if no override were given.

use prost_types::FileDescriptorProto;

/// Source extensions stripped from input names
pub const PROTO_EXTENSIONS: [&str; 2] = [".proto", ".protodevel"];

/// Parsed package override
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOption {
    /// Directory the output is relocated to
    pub import_path: Option<String>,
    pub package: String,
}

/// Relative output path for `file` using the given backend extension
pub fn output_file_name(file: &FileDescriptorProto, extension: &str) -> String {
    let mut name = strip_proto_extension(file.name());
    name.push_str(extension);

    match package_option(file) {
        Some(PackageOption {
            import_path: Some(import_path),
            ..
        }) => join(&import_path, base_name(&name)),
        _ => name,
    }
}

/// Read the override from the file options
pub fn package_option(file: &FileDescriptorProto) -> Option<PackageOption> {
    let value = file.options.as_ref().map(|o| o.go_package()).unwrap_or("");
    parse_package_option(value)
}

/// Parse `importPath[;packageName]`.
///
/// With a `/` present the whole value is the import path and the text after
/// the last `/` is the package name, unless a `;` splits off an explicit
/// package name. Without a `/` the value is only a package name. An import
/// path ending in `/` makes the whole override unusable.
pub fn parse_package_option(value: &str) -> Option<PackageOption> {
    if value.is_empty() {
        return None;
    }

    let Some(slash) = value.rfind('/') else {
        return Some(PackageOption {
            import_path: None,
            package: value.to_string(),
        });
    };

    let (import_path, package) = match value.find(';') {
        Some(sc) => (&value[..sc], &value[sc + 1..]),
        None => (value, &value[slash + 1..]),
    };
    if import_path.ends_with('/') {
        return None;
    }

    Some(PackageOption {
        import_path: (!import_path.is_empty()).then(|| import_path.to_string()),
        package: package.to_string(),
    })
}

pub fn strip_proto_extension(name: &str) -> String {
    PROTO_EXTENSIONS
        .iter()
        .find_map(|ext| name.strip_suffix(ext))
        .unwrap_or(name)
        .to_string()
}

/// Last `/`-separated element of a proto path
pub fn base_name(name: &str) -> &str {
    name.rsplit_once('/').map_or(name, |(_, base)| base)
}

/// Join two `/`-separated paths and clean the result.
///
/// Proto names always use `/`, independent of the host platform.
fn join(dir: &str, name: &str) -> String {
    let absolute = dir.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for part in dir.split('/').chain(name.split('/')) {
        match part {
            "" | "." => {}
            ".." if parts.last().is_some_and(|p| *p != "..") => {
                parts.pop();
            }
            ".." if absolute => {}
            _ => parts.push(part),
        }
    }

    let joined = parts.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}
