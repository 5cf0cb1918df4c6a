// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use ansi_term::Colour::{Green, Red};
use ansi_term::Style;
use cargo_factory_impl::{Diagnostic, DiagnosticSink, Severity};

/// Prints diagnostics to stdout as they arrive
#[derive(Debug, Default)]
pub struct ConsoleSink {
    /// Suppress notes, printing errors only
    quiet: bool,
}

impl ConsoleSink {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl DiagnosticSink for ConsoleSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => {
                println!("{}: {}", Red.bold().paint("error"), diagnostic.message);
            }
            Severity::Note if !self.quiet => {
                println!("{}: {}", Green.paint("note"), diagnostic.message);
            }
            Severity::Note => {}
        }
    }
}

/// One-line summary printed after a pass
pub fn summary_line(groups: usize, failed: usize) -> String {
    if failed == 0 {
        format!(
            "{} {} {}",
            Style::new().bold().paint("Finished:"),
            groups,
            if groups == 1 { "factory" } else { "factories" }
        )
    } else {
        format!(
            "{} {} of {} factories could not be generated",
            Red.bold().paint("Finished with errors:"),
            failed,
            groups
        )
    }
}
