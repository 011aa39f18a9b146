//! Compile the protobuf definitions with tonic.
//!
//! Descriptors come from `protox`, so no system `protoc` is needed.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let proto_files = [
        "proto/bank/v1/user.proto",
        "proto/bank/v1/rpc.proto",
        "proto/bank/v1/service.proto",
    ];

    let descriptors = protox::compile(proto_files, ["proto"])?;

    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_fds(descriptors)?;

    for proto in &proto_files {
        println!("cargo:rerun-if-changed={proto}");
    }

    Ok(())
}
