//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};

use super::Diagnostics;
use super::message::Severity;
use crate::schema::SourceMap;

/// Builder for rendering diagnostics with various options.
pub struct DiagnosticsPrinter<'d> {
    diagnostics: &'d Diagnostics,
    sources: &'d SourceMap,
    colored: bool,
}

impl<'d> DiagnosticsPrinter<'d> {
    pub fn new(diagnostics: &'d Diagnostics, sources: &'d SourceMap) -> Self {
        Self {
            diagnostics,
            sources,
            colored: false,
        }
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.format(&mut out);
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }

            let Some(view) = self.sources.try_get(diag.source) else {
                writeln!(w, "{}", diag)?;
                continue;
            };
            let limit = view.content.len();

            let mut snippet = Snippet::source(view.content)
                .line_start(1)
                .path(view.kind.display_name())
                .annotation(
                    AnnotationKind::Primary
                        .span(adjust_range(diag.range.clone(), limit))
                        .label(&diag.message),
                );

            let mut foreign = Vec::new();
            for related in &diag.related {
                if related.source == diag.source {
                    snippet = snippet.annotation(
                        AnnotationKind::Context
                            .span(adjust_range(related.range.clone(), limit))
                            .label(&related.message),
                    );
                    continue;
                }
                let Some(other) = self.sources.try_get(related.source) else {
                    continue;
                };
                foreign.push(
                    Snippet::source(other.content)
                        .line_start(1)
                        .path(other.kind.display_name())
                        .annotation(
                            AnnotationKind::Context
                                .span(adjust_range(related.range.clone(), other.content.len()))
                                .label(&related.message),
                        ),
                );
            }

            let level = severity_to_level(diag.severity());
            let mut group = level.primary_title(&diag.message).element(snippet);
            for other in foreign {
                group = group.element(other);
            }
            for hint in &diag.hints {
                group = group.element(Level::HELP.message(hint));
            }

            let report: Vec<Group> = vec![group];
            write!(w, "{}", renderer.render(&report))?;
        }

        Ok(())
    }
}

fn severity_to_level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}

fn adjust_range(range: Range<usize>, limit: usize) -> Range<usize> {
    let start = range.start.min(limit);
    let end = range.end.min(limit);

    if start == end {
        return start..(start + 1).min(limit);
    }

    start..end
}
