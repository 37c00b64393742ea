//! Diagnostic sink
//!
//! Store and engine failures never reach the user; they are logged and
//! kept here so a host can inspect what went wrong.

use std::collections::VecDeque;

/// Severity of a diagnostic entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Warning,
    Error,
}

impl DiagnosticLevel {
    pub fn prefix(&self) -> &'static str {
        match self {
            DiagnosticLevel::Warning => "[WARN]",
            DiagnosticLevel::Error => "[ERROR]",
        }
    }
}

/// A single diagnostic entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticEntry {
    pub level: DiagnosticLevel,
    /// Operation that failed, e.g. `"save"`
    pub operation: &'static str,
    pub message: String,
    pub count: u32, // collapsed repeats
}

impl std::fmt::Display for DiagnosticEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.level.prefix(), self.operation, self.message)?;
        if self.count > 1 {
            write!(f, " (x{})", self.count)?;
        }
        Ok(())
    }
}

/// Bounded ring of diagnostic entries
#[derive(Debug)]
pub struct Diagnostics {
    entries: VecDeque<DiagnosticEntry>,
    max_entries: usize,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::with_capacity(64)
    }
}

impl Diagnostics {
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Record an entry and mirror it to the log.
    ///
    /// A repeat of the latest entry bumps its count instead of
    /// adding a new one.
    pub fn record(
        &mut self,
        level: DiagnosticLevel,
        operation: &'static str,
        message: impl Into<String>,
    ) {
        let message = message.into();

        match level {
            DiagnosticLevel::Warning => log::warn!("{}: {}", operation, message),
            DiagnosticLevel::Error => log::error!("{}: {}", operation, message),
        }

        if let Some(last) = self.entries.back_mut() {
            if last.level == level && last.operation == operation && last.message == message {
                last.count += 1;
                return;
            }
        }

        self.entries.push_back(DiagnosticEntry {
            level,
            operation,
            message,
            count: 1,
        });

        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &DiagnosticEntry> {
        self.entries.iter()
    }
}
