use std::fmt;
use std::io;
use std::path::Path;

#[derive(Debug)]
pub struct CliError {
    pub msg: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.msg.fmt(f)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Format a user friendly I/O error message with suggestions.
pub fn format_io_error(operation: &str, path: &Path, err: &io::Error) -> String {
    use io::ErrorKind::*;
    let suggestion = match err.kind() {
        NotFound => "Check that the file exists and the path is correct.",
        PermissionDenied => "Check permissions or run as a different user.",
        UnexpectedEof => "File appears truncated or corrupted.",
        WriteZero => "Disk may be full. Free up space and try again.",
        InvalidData => "File is not valid UTF-8 text.",
        Other if err.raw_os_error() == Some(28) => "Disk may be full. Free up space and try again.",
        _ => "Check permissions or free up disk space.",
    };
    format!(
        "Error {} '{}': {}. {}",
        operation,
        path.display(),
        err,
        suggestion
    )
}

/// Convert an I/O error into a CLI error with context.
pub fn io_cli_error(operation: &str, path: &Path, err: io::Error) -> CliError {
    CliError {
        msg: format_io_error(operation, path, &err),
        source: Some(Box::new(err)),
    }
}

/// Convert an I/O error into a std::io::Error with context.
pub fn io_error(operation: &str, path: &Path, err: io::Error) -> io::Error {
    io::Error::new(err.kind(), format_io_error(operation, path, &err))
}

/// Simple CLI error from string.
pub fn simple_cli_error(msg: &str) -> CliError {
    CliError {
        msg: msg.to_string(),
        source: None,
    }
}

/// Convert a library error into a CLI error with a hint.
pub fn contexto_cli_error(context: &str, err: crate::ContextoError) -> CliError {
    CliError {
        msg: format!("{}: {}", context, cli_hint(&err)),
        source: Some(Box::new(err)),
    }
}

/// Return an actionable hint for an error variant.
pub fn cli_hint(err: &crate::ContextoError) -> String {
    use crate::ContextoError::*;
    match err {
        Network(e) => format!("{e}. Check your connection or pass --dictionary-file."),
        HttpStatus(code) => format!("server answered {code}. Check --dictionary-url."),
        Dictionary(msg) => format!("{msg}. Check the word list source."),
        Embedding(msg) => format!("{msg}. Try --model ngram to play offline."),
        Store(msg) => format!("{msg}. Rebuild the cache with `contexto build --force`."),
        Cache(msg) => format!("{msg}. Rebuild the cache with `contexto build --force`."),
        UnknownWord(w) => format!("'{w}' is not in the dictionary."),
        NoCandidates => {
            "no candidate word exists in the dictionary. Check the candidates file.".to_string()
        }
        Config(msg) => format!("{msg}. Invalid configuration."),
        Io(io) => format!("{io}"),
    }
}
