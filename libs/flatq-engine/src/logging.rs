/// Emit a user-facing warning unless quiet mode is on.
pub fn log_warn(message: &str, quiet: bool) {
    if !quiet {
        tracing::warn!("{message}");
    }
}
