use import_crawler_lib::crawler::{Diagnostic, DiagnosticKind, LinkStatus};

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap text in a color when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Short label for a link status
pub fn status_label(status: &LinkStatus, use_color: bool) -> String {
    match status {
        LinkStatus::Written { bytes } => paint(&format!("written ({} bytes)", bytes), Color::GREEN, use_color),
        LinkStatus::Skipped => paint("skipped (incomplete)", Color::GRAY, use_color),
        LinkStatus::SourceUnreadable { error } => {
            paint(&format!("source unreadable: {}", error), Color::RED, use_color)
        }
        LinkStatus::TargetUnwritable { error } => {
            paint(&format!("target unwritable: {}", error), Color::RED, use_color)
        }
    }
}

/// One line describing an import that was not expanded
pub fn render_diagnostic(diagnostic: &Diagnostic, use_color: bool) -> String {
    let (label, color) = match diagnostic.kind {
        DiagnosticKind::UnresolvedImport => ("unresolved", Color::YELLOW),
        DiagnosticKind::CycleDetected => ("cycle", Color::YELLOW),
        DiagnosticKind::DepthExceeded => ("too deep", Color::YELLOW),
        DiagnosticKind::ReadFailed => ("unreadable", Color::RED),
    };

    let mut line = format!(
        "{} {}:{} \u{2192} {}",
        paint(&format!("{:<10}", label), color, use_color),
        diagnostic.document,
        diagnostic.line,
        diagnostic.reference
    );
    if let Some(message) = &diagnostic.message {
        line.push_str(&paint(&format!(" ({})", message), Color::DIM, use_color));
    }
    line
}
