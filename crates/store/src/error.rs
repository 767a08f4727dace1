// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use viewdb_type::{Diagnostic, IntoDiagnostic};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
	#[error("durable view store I/O failure: {0}")]
	Io(String),

	#[error("view document '{name}' could not be encoded or decoded: {source}")]
	Codec {
		name: String,
		#[source]
		source: serde_json::Error,
	},
}

impl StoreError {
	pub fn code(&self) -> &'static str {
		match self {
			StoreError::Io(_) => "STORE_001",
			StoreError::Codec {
				..
			} => "STORE_002",
		}
	}
}

impl IntoDiagnostic for StoreError {
	fn into_diagnostic(self) -> Diagnostic {
		let code = self.code();
		match self {
			StoreError::Io(reason) => Diagnostic::new(code, format!("durable view store I/O failure: {}", reason))
				.with_help("the operation did not change the view catalog; retry once storage is available"),
			StoreError::Codec {
				name,
				source,
			} => Diagnostic::new(code, format!("view document '{}' is corrupt", name))
				.with_label(source.to_string())
				.with_help("repair or remove the document in the views collection")
				.with_note("this may indicate data corruption or a version mismatch"),
		}
	}
}
