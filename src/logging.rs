use tracing_subscriber::filter::{EnvFilter, ParseError};

/// `RUST_LOG` plus `info` for the library and for the calling binary's own
/// target, so the binaries log something useful with nothing configured.
pub fn env_filter(binary_target: &str) -> Result<EnvFilter, ParseError> {
    Ok(EnvFilter::from_default_env()
        .add_directive("greet_rpc=info".parse()?)
        .add_directive(format!("{}=info", binary_target).parse()?))
}
