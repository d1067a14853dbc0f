use heck::{ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};

/// Words that need `r#` to be used as identifiers
const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers
const RESERVED_PATH_KEYWORDS: &[&str] = &["self", "Self", "super", "crate"];

/// Make `name` usable as a Rust identifier
pub fn escape_ident(name: &str) -> String {
    if RESERVED_PATH_KEYWORDS.contains(&name) {
        format!("{name}_")
    } else if RUST_KEYWORDS.contains(&name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}

/// snake_case function name for a proto method
pub fn method_ident(proto_name: &str) -> String {
    escape_ident(&proto_name.to_snake_case())
}

/// UpperCamelCase type name
pub fn type_ident(proto_name: &str) -> String {
    escape_ident(&proto_name.to_upper_camel_case())
}

/// SHOUTY_SNAKE_CASE constant name
pub fn const_ident(proto_name: &str) -> String {
    proto_name.to_shouty_snake_case()
}

/// Render proto comment text as `///` lines
pub fn doc_lines(text: &str) -> String {
    let mut code = String::new();
    for line in text.trim_end().lines() {
        code.push_str("///");
        code.push_str(line.trim_end_matches('\r'));
        code.push('\n');
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_ident() {
        assert_eq!(escape_ident("echo"), "echo");
        assert_eq!(escape_ident("type"), "r#type");
        assert_eq!(escape_ident("async"), "r#async");
        assert_eq!(escape_ident("self"), "self_");
        assert_eq!(escape_ident("Self"), "Self_");
    }

    #[test]
    fn test_identifier_cases() {
        assert_eq!(method_ident("GetUserByID"), "get_user_by_id");
        assert_eq!(method_ident("Match"), "r#match");
        assert_eq!(type_ident("echo_service"), "EchoService");
        assert_eq!(const_ident("EchoService"), "ECHO_SERVICE");
    }

    #[test]
    fn test_doc_lines() {
        assert_eq!(
            doc_lines(" Adds two numbers.\r\n Returns the sum.\n"),
            "/// Adds two numbers.\n/// Returns the sum.\n"
        );
        assert_eq!(doc_lines(""), "");
    }
}
