fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Ensure a protoc binary is available for code generation. Prefer an
    // externally-provided PROTOC, otherwise fall back to the vendored binary.
    if std::env::var_os("PROTOC").is_none() {
        if let Ok(protoc) = protoc_bin_vendored::protoc_bin_path() {
            std::env::set_var("PROTOC", protoc);
        }
    }

    // Generate gRPC code from proto files (client included, for tests)
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile(&["../proto/auth.proto"], &["../proto"])?;

    Ok(())
}
