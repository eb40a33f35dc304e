use crate::classify::ClassifiedError;
use crate::error::{ErrorContext, SpmError};
use colored::Colorize;

pub fn format_error_chain(error: &SpmError) -> String {
    let context = ErrorContext::new(error);
    context.to_string()
}

/// Format error for display to user with colors and formatting
pub fn format_error_with_color(error: &SpmError, use_color: bool) -> String {
    let context = ErrorContext::new(error);
    let mut output = String::new();

    output.push_str(&format!("{} {error}\n", paint("Error:", use_color, |s| s.red().bold())));

    if let Some(details) = &context.details {
        output.push_str(&format!("\n{details}\n"));
    }

    if let Some(suggestion) = &context.suggestion {
        push_suggestions(&mut output, suggestion, use_color);
    }

    output
}

/// Format an upstream failure the same way, led by its RETRYABLE/PERMANENT kind.
pub fn format_classified(error: &ClassifiedError, use_color: bool) -> String {
    let label = format!("{}:", error.kind);
    let label = if error.is_retryable() {
        paint(&label, use_color, |s| s.yellow().bold())
    } else {
        paint(&label, use_color, |s| s.red().bold())
    };

    let mut output = format!("{label} {}\n", error.cause);
    push_suggestions(&mut output, &error.recovery_hint, use_color);
    output
}

fn push_suggestions(output: &mut String, suggestion: &str, use_color: bool) {
    output.push_str(&format!(
        "\n{}\n",
        paint("Suggestions:", use_color, |s| s.yellow().bold())
    ));
    for line in suggestion.lines() {
        if !line.trim().is_empty() {
            output.push_str(&format!(
                "{}\n",
                paint(&format!("• {line}"), use_color, |s| s.cyan())
            ));
        }
    }
}

fn paint(text: &str, use_color: bool, style: impl Fn(&str) -> colored::ColoredString) -> String {
    if use_color {
        style(text).to_string()
    } else {
        text.to_string()
    }
}
