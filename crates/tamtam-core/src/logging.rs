use crate::Result;

/// Initialize logging/tracing for a client process.
///
/// Without the `tracing` feature this is a no-op: log events are still emitted
/// through `tracing` macros but nothing subscribes to them.
pub fn init(service_name: &str) -> Result<()> {
    let _ = service_name;

    #[cfg(feature = "tracing")]
    {
        use tracing_subscriber::{fmt, EnvFilter};

        // Default: info for our crates. Can be overridden with `RUST_LOG`.
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "warn,tamtam_core=info,tamtam_http=info,{service_name}=info"
            ))
        });

        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init()
            .map_err(|e| crate::Error::Config(format!("logging init failed: {e}")))?;
    }

    Ok(())
}
