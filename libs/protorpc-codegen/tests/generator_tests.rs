use pretty_assertions::assert_eq;
use prost::Message;
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use prost_types::{
    DescriptorProto, FileDescriptorProto, FileOptions, MethodDescriptorProto,
    ServiceDescriptorProto,
};
use protorpc_codegen::format::Formatter;
use protorpc_codegen::{
    default_registry, generate, generate_bytes, Backend, BackendRegistry, FormatError,
    Generator, GeneratorContext,
};

/// Backend that emits one marker line per hook call
struct Marker {
    name: &'static str,
    ext: &'static str,
}

impl Backend for Marker {
    fn name(&self) -> &str {
        self.name
    }

    fn file_extension(&self) -> &str {
        self.ext
    }

    fn render_header(&self, _: &GeneratorContext, file: &FileDescriptorProto) -> String {
        format!("header {}", file.name())
    }

    fn render_message(
        &self,
        _: &GeneratorContext,
        _: &FileDescriptorProto,
        message: &DescriptorProto,
    ) -> String {
        format!("message {}", message.name())
    }

    fn render_service(
        &self,
        _: &GeneratorContext,
        _: &FileDescriptorProto,
        service: &ServiceDescriptorProto,
    ) -> String {
        format!("service {}", service.name())
    }
}

/// Leaves text untouched
struct Identity;

impl Formatter for Identity {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        Ok(source.to_string())
    }
}

/// Backend whose output is valid Rust except for services named `Broken`
struct Sometimes;

impl Backend for Sometimes {
    fn name(&self) -> &str {
        "sometimes"
    }

    fn file_extension(&self) -> &str {
        ".rs"
    }

    fn render_header(&self, _: &GeneratorContext, _: &FileDescriptorProto) -> String {
        "//! header".to_string()
    }

    fn render_message(
        &self,
        _: &GeneratorContext,
        _: &FileDescriptorProto,
        _: &DescriptorProto,
    ) -> String {
        String::new()
    }

    fn render_service(
        &self,
        _: &GeneratorContext,
        _: &FileDescriptorProto,
        service: &ServiceDescriptorProto,
    ) -> String {
        if service.name() == "Broken" {
            "pub trait Broken {".to_string()
        } else {
            format!("pub trait {}{{}}", service.name())
        }
    }
}

fn message(name: &str) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        ..Default::default()
    }
}

fn service(name: &str, methods: Vec<MethodDescriptorProto>) -> ServiceDescriptorProto {
    ServiceDescriptorProto {
        name: Some(name.to_string()),
        method: methods,
        ..Default::default()
    }
}

fn file(
    name: &str,
    messages: Vec<DescriptorProto>,
    services: Vec<ServiceDescriptorProto>,
) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(name.to_string()),
        message_type: messages,
        service: services,
        ..Default::default()
    }
}

fn request(files: Vec<FileDescriptorProto>, to_generate: &[&str]) -> CodeGeneratorRequest {
    CodeGeneratorRequest {
        file_to_generate: to_generate.iter().map(|s| s.to_string()).collect(),
        proto_file: files,
        ..Default::default()
    }
}

fn names(files: &[prost_types::compiler::code_generator_response::File]) -> Vec<&str> {
    files.iter().map(|f| f.name()).collect()
}

#[test]
fn test_dependencies_are_skipped() {
    let ctx = GeneratorContext::new(request(
        vec![
            file("dep.proto", vec![message("Dep")], vec![]),
            file("main.proto", vec![message("Main")], vec![]),
        ],
        &["main.proto"],
    ));
    let backend = Marker { name: "m", ext: ".m" };
    let mut generator = Generator::new(&ctx, &backend).with_formatter(Identity);

    let files = generator.generate();
    assert_eq!(names(&files), vec!["main.m"]);
}

#[test]
fn test_fragment_order() {
    let ctx = GeneratorContext::new(request(
        vec![file(
            "a/svc.proto",
            vec![message("First"), message("Second")],
            vec![service("Alpha", vec![]), service("Beta", vec![])],
        )],
        &["a/svc.proto"],
    ));
    let backend = Marker { name: "m", ext: ".m" };
    let mut generator = Generator::new(&ctx, &backend).with_formatter(Identity);

    let files = generator.generate();
    assert_eq!(files.len(), 1);
    assert_eq!(
        files[0].content(),
        "header a/svc.proto\n\
         message First\n\
         message Second\n\
         service Alpha\n\
         service Beta\n"
    );
    assert!(generator.diagnostics().is_empty());
}

#[test]
fn test_output_order_follows_file_list() {
    let ctx = GeneratorContext::new(request(
        vec![
            file("z.proto", vec![], vec![]),
            file("dep.proto", vec![], vec![]),
            file("a.proto", vec![], vec![]),
            file("m.proto", vec![], vec![]),
        ],
        // order of the generate list does not matter
        &["m.proto", "a.proto", "z.proto"],
    ));
    let backend = Marker { name: "m", ext: ".out" };
    let mut generator = Generator::new(&ctx, &backend).with_formatter(Identity);

    let files = generator.generate();
    assert_eq!(names(&files), vec!["z.out", "a.out", "m.out"]);
}

#[test]
fn test_format_failure_keeps_going() {
    let ctx = GeneratorContext::new(request(
        vec![
            file("bad.proto", vec![], vec![service("Broken", vec![])]),
            file("good.proto", vec![], vec![service("Fine", vec![])]),
        ],
        &["bad.proto", "good.proto"],
    ));
    let backend = Sometimes;
    let mut generator = Generator::new(&ctx, &backend);

    let files = generator.generate();
    assert_eq!(names(&files), vec!["bad.rs", "good.rs"]);

    // unformatted text is emitted as-is
    assert_eq!(files[0].content(), "//! header\npub trait Broken {\n");
    assert!(files[1].content().starts_with("//! header"));
    assert!(files[1].content().contains("pub trait Fine {}"));

    let diagnostics = generator.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].file, "bad.proto");
    assert!(diagnostics[0].message.starts_with("format failed"));
}

#[test]
fn test_first_backend_is_default() {
    let mut registry = BackendRegistry::new();
    registry.register(Marker { name: "one", ext: ".one" });
    registry.register(Marker { name: "two", ext: ".two" });

    let backend = registry.select(None).unwrap();
    let response = generate(
        request(vec![file("x/y.proto", vec![], vec![])], &["x/y.proto"]),
        backend,
    );

    // marker text is not Rust, so the content stays unformatted
    assert_eq!(names(&response.file), vec!["x/y.one"]);
}

#[test]
fn test_relocated_output() {
    let mut f = file("a/b/c.proto", vec![], vec![]);
    f.options = Some(FileOptions {
        go_package: Some("pkg/v2;v2".to_string()),
        ..Default::default()
    });
    let backend = Marker { name: "m", ext: ".gen.go" };
    let response = generate(request(vec![f], &["a/b/c.proto"]), &backend);
    assert_eq!(names(&response.file), vec!["pkg/v2/c.gen.go"]);
}

#[test]
fn test_end_to_end_bytes() {
    let arith = FileDescriptorProto {
        name: Some("arith/arith.proto".to_string()),
        package: Some("arith".to_string()),
        message_type: vec![message("ArithRequest"), message("ArithReply")],
        service: vec![service(
            "Arith",
            vec![MethodDescriptorProto {
                name: Some("Multiply".to_string()),
                input_type: Some(".arith.ArithRequest".to_string()),
                output_type: Some(".arith.ArithReply".to_string()),
                ..Default::default()
            }],
        )],
        ..Default::default()
    };
    let input = request(vec![arith], &["arith/arith.proto"]).encode_to_vec();

    let registry = default_registry();
    let backend = registry.select(None).unwrap();
    let output = generate_bytes(&input, backend).unwrap();
    let response = CodeGeneratorResponse::decode(output.as_slice()).unwrap();

    assert_eq!(response.supported_features, Some(1));
    assert_eq!(response.error, None);
    assert_eq!(names(&response.file), vec!["arith/arith.pb.rpc.rs"]);

    let content = response.file[0].content();
    assert!(content.starts_with("//! Code generated by protoc-gen-protorpc (protorpc)."));
    assert!(content.contains("impl ::protorpc::NamedMessage for ArithRequest {"));
    assert!(content.contains("impl ::protorpc::NamedMessage for ArithReply {"));
    assert!(content.contains("pub trait Arith {"));
    assert!(content.contains("pub const ARITH_SERVICE_NAME: &str = \"arith.Arith\";"));
    assert!(content.contains("fn multiply("));
    // formatted output is indented
    assert!(content.contains("\n    fn name(&self) -> &'static str {"));
}

#[test]
fn test_end_to_end_async_backend() {
    let f = FileDescriptorProto {
        name: Some("echo.proto".to_string()),
        service: vec![service(
            "EchoService",
            vec![MethodDescriptorProto {
                name: Some("Echo".to_string()),
                input_type: Some(".Ping".to_string()),
                output_type: Some(".Ping".to_string()),
                ..Default::default()
            }],
        )],
        message_type: vec![message("Ping")],
        ..Default::default()
    };

    let registry = default_registry();
    let backend = registry.select(Some("protorpc-async")).unwrap();
    let response = generate(request(vec![f], &["echo.proto"]), backend);

    assert_eq!(names(&response.file), vec!["echo.pb.rpc_async.rs"]);
    let content = response.file[0].content();
    assert!(content.contains("//! Package: echo"));
    assert!(content.contains("pub trait EchoService: Send + Sync {"));
    assert!(content.contains("pub const ECHO_SERVICE_NAME: &str = \"EchoService\";"));
    assert!(!content.contains("NamedMessage"));
}

#[test]
fn test_invalid_bytes_fail_to_decode() {
    let registry = default_registry();
    let backend = registry.first().unwrap();
    let err = generate_bytes(&[0xff, 0xff, 0xff], backend).unwrap_err();
    assert!(matches!(err, protorpc_codegen::Error::Decode(_)));
}
