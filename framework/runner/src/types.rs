/// Recommended error type for your scenario `main` function. Errors raised by the probe itself are
/// [insights_probe_core::prelude::ProbeError] values and can be recovered with
/// [anyhow::Error::downcast_ref].
pub type ProbeRunResult<T> = anyhow::Result<T>;
