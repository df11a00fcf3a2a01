use thiserror::Error;

/// Failure modes of a formatting pass.
///
/// `PrintfBuf::print` never surfaces these: it reports the message on the
/// diagnostic side channel and hands back the empty terminated result.
/// `try_print` and `sprintf` return them directly.
#[derive(Debug, Error)]
pub enum Error {
    /// The platform null device could not be opened for the measuring pass.
    #[error("could not open null device `{device}`")]
    NullDeviceUnavailable { device: &'static str },

    /// The measuring pass failed to write into the discard sink.
    #[error("error printing into the discard sink")]
    DiscardWrite(#[source] std::io::Error),

    /// A directive referenced an argument position that was never supplied.
    #[error("directive `%{conversion}` needs argument {index}, but only {supplied} supplied")]
    MissingArgument {
        conversion: char,
        index: usize,
        supplied: usize,
    },

    /// The supplied argument cannot be rendered by the directive it reached.
    #[error("directive `%{conversion}` cannot render {kind} argument at position {index}")]
    MismatchedArgument {
        conversion: char,
        kind: &'static str,
        index: usize,
    },

    /// Directives this renderer refuses to honor (`%n`, `%a`, `%A`).
    #[error("unsupported directive `%{conversion}`")]
    UnsupportedDirective { conversion: char },
}
