//! Text output formatting with colors.

use mediaembed_core::{CanonicalRecord, EmbedProvider};
use mediaembed_fetch::FetchError;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Header for the provider table.
    pub fn format_providers_header(&self) -> String {
        self.bold(&format!(
            "{:<14} {:<6} {:<10} {}",
            "PROVIDER", "FORMAT", "ID FIELD", "DOMAINS"
        ))
    }

    /// One line of the provider table.
    pub fn format_provider_line(&self, provider: &dyn EmbedProvider) -> String {
        format!(
            "{} {:<6} {:<10} {}",
            self.cyan(&format!("{:<14}", provider.name())),
            provider.format().as_str(),
            provider.id_tag_name().unwrap_or("(url)"),
            provider.domains()
        )
    }

    /// Summary of a fetched record.
    pub fn format_record(&self, record: &CanonicalRecord, error: Option<&FetchError>) -> String {
        let mut lines = Vec::new();

        let status = if record.failed {
            self.red("✗ failed")
        } else {
            self.green("✓ ok")
        };
        lines.push(format!("{} ({status})", self.bold(&record.provider)));
        lines.push(format!("  Source:    {}", self.dim(&record.source_url)));

        if let Some(error) = error {
            lines.push(format!("  Error:     {} ({})", error, error.kind()));
        }
        if !record.failed {
            lines.push(format!("  Id:        {}", record.id));
            if !record.title.is_empty() {
                lines.push(format!("  Title:     {}", record.title));
            }
            if let Some(thumbnail) = record.thumbnail() {
                lines.push(format!("  Thumbnail: {thumbnail}"));
            }
        }
        lines.push(format!(
            "  Fetched:   {}",
            record.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        lines.join("\n")
    }

    // ========================================================================
    // Color helpers
    // ========================================================================

    fn paint(&self, color: &str, s: &str) -> String {
        if self.use_colors {
            format!("{color}{s}{RESET}")
        } else {
            s.to_string()
        }
    }

    fn bold(&self, s: &str) -> String {
        self.paint(BOLD, s)
    }

    fn dim(&self, s: &str) -> String {
        self.paint(DIM, s)
    }

    fn green(&self, s: &str) -> String {
        self.paint(GREEN, s)
    }

    fn red(&self, s: &str) -> String {
        self.paint(RED, s)
    }

    fn cyan(&self, s: &str) -> String {
        self.paint(CYAN, s)
    }
}
