//! Metrics/tracing hooks.
//!
//! Events go to whatever `tracing` subscriber the host installs; the library
//! never installs one itself.

pub fn emit_span(event: &str, key_values: &[(&str, String)]) {
    let span = tracing::trace_span!("tabula", event);
    let _entered = span.enter();
    for (k, v) in key_values {
        tracing::trace!(%event, %k, %v, "metric");
    }
}
