use ariadne::{Color, Label, Report, ReportKind, Source};
use modus::ModusError;

/// Format a ModusError with fancy terminal output using Ariadne
pub fn format_error(error: &ModusError) -> String {
    match error {
        ModusError::Parse(details) | ModusError::Semantic(details) => {
            let mut output = Vec::new();

            let error_type = match error {
                ModusError::Parse(_) => "Parse error",
                _ => "Semantic error",
            };

            let message = format!(
                "{}: {} ({}:{}:{})",
                error_type, details.message, details.source_id, details.span.line, details.span.col
            );

            let end = details.span.end.max(details.span.start + 1);
            let mut report =
                Report::build(ReportKind::Error, &details.source_id, details.span.start)
                    .with_message(message)
                    .with_label(
                        Label::new((&details.source_id, details.span.start..end))
                            .with_message("")
                            .with_color(Color::Red),
                    );

            if let Some(suggestion) = &details.suggestion {
                report = report.with_help(suggestion);
            }

            match report.finish().write(
                (
                    &details.source_id,
                    Source::from(details.source_text.as_ref()),
                ),
                &mut output,
            ) {
                Ok(_) => String::from_utf8_lossy(&output).to_string(),
                Err(_) => {
                    // Fallback to simple format
                    format!("{}", error)
                }
            }
        }
        ModusError::ResourceLimitExceeded {
            limit_name,
            limit_value,
            actual_value,
            suggestion,
        } => {
            format!(
                "Resource limit exceeded: {}\n  Limit: {}\n  Actual: {}\n  {}",
                limit_name, limit_value, actual_value, suggestion
            )
        }
        other => other.to_string(),
    }
}
