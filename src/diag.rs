//! Diagnostic side channel.
//!
//! A formatting failure inside a logging pipeline must never take the
//! application down, so failures are reported out-of-band through this
//! capability while the call itself returns a well-formed empty result.

/// Receiver for formatting-subsystem failure reports.
///
/// Injected at renderer construction so independent renderers never contend
/// on a hidden global and tests can observe exactly what was reported.
pub trait Diagnostic: Send + Sync {
    fn error(&self, message: &str);
}

/// Default sink: forwards to the `log` facade under the `printf_buf` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostic;

impl Diagnostic for LogDiagnostic {
    fn error(&self, message: &str) {
        log::error!(target: "printf_buf", "{message}");
    }
}
