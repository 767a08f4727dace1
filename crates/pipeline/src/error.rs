// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use viewdb_type::{Diagnostic, IntoDiagnostic};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
	#[error("pipeline stage {index} is not a document")]
	StageNotDocument {
		index: usize,
	},

	#[error("a pipeline stage specification object must contain exactly one field, stage {index} has {count}")]
	StageFieldCount {
		index: usize,
		count: usize,
	},

	#[error("unrecognized pipeline stage name: '{name}'")]
	UnknownStage {
		index: usize,
		name: String,
	},

	#[error("{name} cannot be used in a view definition")]
	StageNotAllowedInView {
		name: String,
	},

	#[error("$collStats is only valid as the first stage in a pipeline, found at stage {index}")]
	CollStatsNotFirst {
		index: usize,
	},

	#[error("{stage} has an invalid source collection: {reason}")]
	InvalidSource {
		stage: String,
		reason: String,
	},

	#[error("{stage} expects {field} to be {expected}")]
	InvalidStageArgument {
		stage: String,
		field: String,
		expected: String,
	},
}

impl PipelineError {
	pub fn code(&self) -> &'static str {
		match self {
			PipelineError::StageNotDocument {
				..
			} => "PIPELINE_001",
			PipelineError::StageFieldCount {
				..
			} => "PIPELINE_002",
			PipelineError::UnknownStage {
				..
			} => "PIPELINE_003",
			PipelineError::StageNotAllowedInView {
				..
			} => "PIPELINE_004",
			PipelineError::CollStatsNotFirst {
				..
			} => "PIPELINE_005",
			PipelineError::InvalidSource {
				..
			} => "PIPELINE_006",
			PipelineError::InvalidStageArgument {
				..
			} => "PIPELINE_007",
		}
	}
}

impl IntoDiagnostic for PipelineError {
	fn into_diagnostic(self) -> Diagnostic {
		let code = self.code();
		let message = self.to_string();
		match self {
			PipelineError::StageNotDocument {
				..
			}
			| PipelineError::StageFieldCount {
				..
			} => Diagnostic::new(code, message)
				.with_help("write each stage as a document with a single '$stage' field, e.g. {\"$match\": {...}}"),
			PipelineError::UnknownStage {
				name,
				..
			} => Diagnostic::new(code, message)
				.with_label(format!("'{}' is not a pipeline stage", name))
				.with_help("check the stage name for typos"),
			PipelineError::StageNotAllowedInView {
				..
			} => Diagnostic::new(code, message)
				.with_help("views are read-only; remove the stage that writes output")
				.with_note("$out and $merge are rejected in view definitions"),
			PipelineError::CollStatsNotFirst {
				..
			} => Diagnostic::new(code, message)
				.with_help("move $collStats to the front of the pipeline")
				.with_note("$collStats reports on a physical collection and must run before any other stage"),
			PipelineError::InvalidSource {
				..
			} => Diagnostic::new(code, message)
				.with_help("the source must be the name of a collection or view in the same database"),
			PipelineError::InvalidStageArgument {
				..
			} => Diagnostic::new(code, message),
		}
	}
}
