use std::path::Path;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceOffset};

use crate::GenerateError;

/// A codegen failure, optionally labeled with the registry row that caused it.
#[derive(Debug)]
pub struct ErrorReport {
    src: Option<NamedSource>,
    message: String,
    location: Option<LabeledSpan>,
}

impl Diagnostic for ErrorReport {
    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.src.as_ref().map(|x| x as _)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        self.location
            .as_ref()
            .map(|loc| Box::new(std::iter::once(loc.clone())) as _)
    }
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ErrorReport {}

impl ErrorReport {
    pub fn message(message: impl Into<String>) -> Self {
        ErrorReport {
            src: None,
            message: message.into(),
            location: None,
        }
    }

    /// Report `error`, pointing at the offending row of the registry when
    /// the error is tied to one.
    pub fn from_error_src(error: &GenerateError, path: &Path, text: String) -> Self {
        let Some(row) = error
            .line()
            .and_then(|line| usize::try_from(line).ok())
            .filter(|line| *line > 0)
        else {
            return ErrorReport::message(format!("{}: {error}", path.display()));
        };
        let row_len = text.lines().nth(row - 1).map(str::len).unwrap_or_default();
        let start = SourceOffset::from_location(&text, row, 1);
        let location = LabeledSpan::new(Some(error.to_string()), start.offset(), row_len);
        let src = NamedSource::new(path.to_string_lossy(), text);
        ErrorReport {
            message: "compiling the feature registry failed".into(),
            src: Some(src),
            location: Some(location),
        }
    }

    /// The labeled location of this report, if any.
    pub fn location(&self) -> Option<&LabeledSpan> {
        self.location.as_ref()
    }
}
