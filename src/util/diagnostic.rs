//! User-friendly diagnostic messages.
//!
//! Skipped manifests are reported with the offending source snippet so the
//! broken JSON can be found without opening the file.

use miette::{
    Diagnostic as MietteDiagnostic, GraphicalReportHandler, GraphicalTheme, NamedSource,
    SourceSpan,
};
use thiserror::Error;

use crate::core::manifest::ManifestError;

/// Invalid JSON in a manifest.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("invalid JSON in `{package}`: {message}")]
#[diagnostic(
    code(fotno::manifest::invalid_json),
    help("fix the syntax error and run `fotno format-manifests` again; this manifest was left untouched")
)]
pub struct InvalidJsonError {
    pub package: String,
    pub message: String,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("here")]
    pub span: SourceSpan,
}

/// Manifest that is valid JSON but not an object.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("manifest of `{package}` is not a JSON object")]
#[diagnostic(
    code(fotno::manifest::not_an_object),
    help("a fonto-manifest.json must contain a single top-level object")
)]
pub struct NotAnObjectError {
    pub package: String,
}

/// Manifest whose bytes are not UTF-8.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("manifest of `{package}` is not valid UTF-8 (invalid byte at offset {offset})")]
#[diagnostic(
    code(fotno::manifest::invalid_encoding),
    help("re-save the file as UTF-8; this manifest was left untouched")
)]
pub struct InvalidEncodingError {
    pub package: String,
    pub offset: usize,
}

/// Render a manifest error for the terminal.
pub fn render_manifest_error(package: &str, error: &ManifestError, color: bool) -> String {
    let theme = if color {
        GraphicalTheme::unicode()
    } else {
        GraphicalTheme::unicode_nocolor()
    };
    let handler = GraphicalReportHandler::new_themed(theme).with_width(160);

    let mut out = String::new();
    let rendered = match error {
        ManifestError::Parse {
            path,
            line,
            column,
            message,
            contents,
        } => {
            let diagnostic = InvalidJsonError {
                package: package.to_string(),
                message: message.clone(),
                src: NamedSource::new(path.display().to_string(), contents.clone()),
                span: SourceSpan::from((byte_offset(contents, *line, *column), 0)),
            };
            handler.render_report(&mut out, &diagnostic)
        }
        ManifestError::InvalidEncoding { valid_up_to, .. } => {
            let diagnostic = InvalidEncodingError {
                package: package.to_string(),
                offset: *valid_up_to,
            };
            handler.render_report(&mut out, &diagnostic)
        }
        ManifestError::NotAnObject { .. } => {
            let diagnostic = NotAnObjectError {
                package: package.to_string(),
            };
            handler.render_report(&mut out, &diagnostic)
        }
        ManifestError::Io { .. } => return format!("error: {}\n", error),
    };

    if rendered.is_err() {
        return format!("error: {}\n", error);
    }
    out
}

/// Convert a 1-based line/column pair into a byte offset within `text`.
///
/// Positions past the end are clamped to the end of the text.
pub fn byte_offset(text: &str, line: usize, column: usize) -> usize {
    let line_start: usize = text
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();

    let mut offset = (line_start + column.saturating_sub(1)).min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use crate::core::Manifest;

    #[test]
    fn test_byte_offset() {
        let text = "{\n  \"a\": ,\n}";
        assert_eq!(byte_offset(text, 1, 1), 0);
        assert_eq!(byte_offset(text, 2, 1), 2);
        assert_eq!(byte_offset(text, 2, 8), 9);
        assert_eq!(&text[byte_offset(text, 2, 8)..byte_offset(text, 2, 8) + 1], ",");
    }

    #[test]
    fn test_byte_offset_clamped() {
        assert_eq!(byte_offset("{}", 9, 9), 2);
        assert_eq!(byte_offset("", 0, 0), 0);
    }

    #[test]
    fn test_render_parse_error() {
        let err = Manifest::parse(
            Path::new("packages/broken/fonto-manifest.json"),
            "{\n  \"dependencies\": {\n    \"a\": \n  }\n}",
        )
        .unwrap_err();

        let output = render_manifest_error("broken", &err, false);
        assert!(output.contains("invalid JSON in `broken`"));
        assert!(output.contains("packages/broken/fonto-manifest.json"));
        assert!(output.contains("left untouched"));
    }

    #[test]
    fn test_render_not_an_object() {
        let err = Manifest::parse(Path::new("packages/list/fonto-manifest.json"), "[]").unwrap_err();

        let output = render_manifest_error("list", &err, false);
        assert!(output.contains("manifest of `list` is not a JSON object"));
    }

    #[test]
    fn test_render_invalid_encoding() {
        let err = ManifestError::InvalidEncoding {
            path: "packages/latin1/fonto-manifest.json".into(),
            valid_up_to: 13,
        };

        let output = render_manifest_error("latin1", &err, false);
        assert!(output.contains("manifest of `latin1` is not valid UTF-8"));
        assert!(output.contains("offset 13"));
    }
}
