// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

/// Structured, user-facing description of an error.
///
/// Every crate keeps its own typed error enum for matching and converts it into a
/// `Diagnostic` when the error leaves the system, so callers get a stable code
/// together with a message, a help line and any notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
	pub code: String,
	pub message: String,
	pub label: Option<String>,
	pub help: Option<String>,
	pub notes: Vec<String>,
	pub cause: Option<Box<Diagnostic>>,
}

impl Diagnostic {
	pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			code: code.into(),
			message: message.into(),
			label: None,
			help: None,
			notes: vec![],
			cause: None,
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_help(mut self, help: impl Into<String>) -> Self {
		self.help = Some(help.into());
		self
	}

	pub fn with_note(mut self, note: impl Into<String>) -> Self {
		self.notes.push(note.into());
		self
	}

	pub fn with_cause(mut self, cause: Diagnostic) -> Self {
		self.cause = Some(Box::new(cause));
		self
	}
}

impl Display for Diagnostic {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "[{}] {}", self.code, self.message)?;
		if let Some(label) = &self.label {
			write!(f, "\n  --> {}", label)?;
		}
		if let Some(help) = &self.help {
			write!(f, "\n  help: {}", help)?;
		}
		for note in &self.notes {
			write!(f, "\n  note: {}", note)?;
		}
		if let Some(cause) = &self.cause {
			write!(f, "\n  caused by: {}", cause)?;
		}
		Ok(())
	}
}

pub trait IntoDiagnostic {
	fn into_diagnostic(self) -> Diagnostic;
}

impl IntoDiagnostic for Diagnostic {
	fn into_diagnostic(self) -> Diagnostic {
		self
	}
}
