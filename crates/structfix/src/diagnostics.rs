//! Rendering fatal errors for the terminal or as JSON.
//!
//! Parse and usage errors point into a file and are shown with a source
//! excerpt (ariadne). Everything else is a one-line `error: ...` message.
//! In JSON mode each error is one object per line with the fields `code`,
//! `severity`, `message`, `file`, `spans` and `fix`; a span carries byte
//! offsets plus the 1-based line and column of its start.

use std::ops::Range;
use std::path::Path;

use ariadne::{Config, Label, Report, ReportKind, Source};
use structfix_backfill::BackfillError;
use structfix_common::span::{LineIndex, Span};

use crate::driver::FixError;
use crate::loader::LoadError;

/// Options controlling diagnostic output.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagnosticOptions {
    pub color: bool,
    pub json: bool,
}

/// A located error: what the report needs besides the source text.
struct Located<'a> {
    code: &'static str,
    title: &'static str,
    message: String,
    file: &'a Path,
    source: &'a str,
    labels: Vec<(Span, String)>,
}

/// Render `error` as text ready for stderr.
pub fn render(error: &FixError, opts: &DiagnosticOptions) -> String {
    let Some(located) = locate(error) else {
        return render_plain(error, opts);
    };
    if opts.json {
        render_json(&located)
    } else {
        render_report(&located, opts)
    }
}

fn locate(error: &FixError) -> Option<Located<'_>> {
    match error {
        FixError::Load(LoadError::Parse { path, text, error }) => {
            let mut labels = vec![(error.span, error.message.clone())];
            if let Some((message, span)) = &error.related {
                labels.push((*span, message.clone()));
            }
            Some(Located {
                code: "P0001",
                title: "Parse error",
                message: error.message.clone(),
                file: path,
                source: text,
                labels,
            })
        }
        FixError::Backfill { path, text, error } => {
            let BackfillError::NonIdentifierKey { key, span } = error;
            Some(Located {
                code: "U0001",
                title: "Unsupported struct literal",
                message: error.to_string(),
                file: path,
                source: text,
                labels: vec![(*span, format!("`{key}` is not a field name"))],
            })
        }
        FixError::Load(_) | FixError::Sink(_) => None,
    }
}

fn render_plain(error: &FixError, opts: &DiagnosticOptions) -> String {
    if opts.json {
        let msg = serde_json::json!({
            "code": "C0001",
            "severity": "error",
            "message": error.to_string(),
            "file": "",
            "spans": [],
            "fix": null
        });
        format!("{msg}\n")
    } else {
        format!("error: {error}\n")
    }
}

fn render_json(located: &Located<'_>) -> String {
    let lines = LineIndex::new(located.source);
    let spans: Vec<serde_json::Value> = located
        .labels
        .iter()
        .map(|(span, label)| {
            let range = span.to_label_range();
            let (line, column) = lines.line_col(span.start);
            serde_json::json!({
                "start": range.start,
                "end": range.end,
                "line": line,
                "column": column,
                "label": label
            })
        })
        .collect();
    let msg = serde_json::json!({
        "code": located.code,
        "severity": "error",
        "message": format!("{}: {}", located.title, located.message),
        "file": located.file.display().to_string(),
        "spans": spans,
        "fix": null
    });
    format!("{msg}\n")
}

fn render_report(located: &Located<'_>, opts: &DiagnosticOptions) -> String {
    let config = if opts.color {
        Config::default()
    } else {
        Config::default().with_color(false)
    };

    let primary = located
        .labels
        .first()
        .map_or(0..1, |(span, _)| span.to_label_range());
    let mut report = Report::<Range<usize>>::build(ReportKind::Error, primary)
        .with_message(located.title)
        .with_config(config)
        .with_note(format!("in {}", located.file.display()));
    for (span, message) in &located.labels {
        report = report.with_label(Label::new(span.to_label_range()).with_message(message));
    }

    let mut out = Vec::new();
    if report.finish().write(Source::from(located.source), &mut out).is_err() {
        return format!("error: {}: {}\n", located.file.display(), located.message);
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use structfix_parser::ParseError;

    fn parse_failure() -> FixError {
        FixError::Load(LoadError::Parse {
            path: PathBuf::from("bad.go"),
            text: "package p\nvar x = {".to_string(),
            error: ParseError::new("expected expression", Span::new(18, 19)),
        })
    }

    fn usage_failure() -> FixError {
        FixError::Backfill {
            path: PathBuf::from("keys.go"),
            text: "package p\n\nvar o = T{\"A\": 1}\n".to_string(),
            error: BackfillError::NonIdentifierKey {
                key: "\"A\"".to_string(),
                span: Span::new(21, 24),
            },
        }
    }

    const JSON: DiagnosticOptions = DiagnosticOptions {
        color: false,
        json: true,
    };
    const PLAIN: DiagnosticOptions = DiagnosticOptions {
        color: false,
        json: false,
    };

    #[test]
    fn parse_error_as_json() {
        let out = render(&parse_failure(), &JSON);
        assert!(out.ends_with('\n'));
        let json: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(json["code"], "P0001");
        assert_eq!(json["severity"], "error");
        assert_eq!(json["message"], "Parse error: expected expression");
        assert_eq!(json["file"], "bad.go");
        assert_eq!(json["spans"][0]["start"], 18);
        assert_eq!(json["spans"][0]["end"], 19);
        assert_eq!(json["spans"][0]["line"], 2);
        assert_eq!(json["spans"][0]["column"], 9);
        assert!(json["fix"].is_null());
    }

    #[test]
    fn usage_error_as_json() {
        let out = render(&usage_failure(), &JSON);
        let json: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(json["code"], "U0001");
        assert_eq!(json["spans"][0]["label"], "`\"A\"` is not a field name");
    }

    #[test]
    fn report_without_color_has_no_escapes() {
        let out = render(&usage_failure(), &PLAIN);
        assert!(out.contains("Unsupported struct literal"));
        assert!(out.contains("is not a field name"));
        assert!(out.contains("in keys.go"));
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn unlocated_errors_are_one_line() {
        let err = FixError::Load(LoadError::Stat {
            path: PathBuf::from("nope"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        });
        assert_eq!(render(&err, &PLAIN), "error: cannot stat nope: not found\n");

        let json: serde_json::Value = serde_json::from_str(render(&err, &JSON).trim_end()).unwrap();
        assert_eq!(json["code"], "C0001");
        assert_eq!(json["message"], "cannot stat nope: not found");
    }
}
