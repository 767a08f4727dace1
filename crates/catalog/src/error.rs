// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use viewdb_pipeline::PipelineError;
use viewdb_store::StoreError;
use viewdb_type::{Diagnostic, IntoDiagnostic, Namespace, NamespaceError};

use crate::graph::GraphError;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
	#[error("view support not enabled")]
	ViewsDisabled,

	#[error("view '{name}' must be created on a view or collection in the same database, not '{view_on}'")]
	CrossDatabase {
		name: Namespace,
		view_on: Namespace,
	},

	#[error("view '{name}' does not belong to database '{database}'")]
	ForeignDatabase {
		name: Namespace,
		database: String,
	},

	#[error("namespace '{0}' already exists")]
	NamespaceExists(Namespace),

	#[error("invalid name for 'viewOn': '{0}'")]
	InvalidViewOn(String),

	#[error("view '{0}' does not exist")]
	NamespaceNotFound(Namespace),

	#[error(transparent)]
	Graph(#[from] GraphError),

	#[error(transparent)]
	Pipeline(#[from] PipelineError),

	#[error("invalid pipeline for existing view '{view}': {source}")]
	InvalidExistingViewPipeline {
		view: Namespace,
		source: PipelineError,
	},

	#[error(transparent)]
	Store(#[from] StoreError),

	#[error(transparent)]
	Namespace(#[from] NamespaceError),

	#[error("view depth too deep or view cycle detected; maximum depth is {max_depth}")]
	ResolutionDepthExceeded {
		max_depth: usize,
	},
}

impl CatalogError {
	pub fn code(&self) -> &'static str {
		match self {
			CatalogError::ViewsDisabled => "VIEW_001",
			CatalogError::CrossDatabase {
				..
			} => "VIEW_002",
			CatalogError::ForeignDatabase {
				..
			} => "VIEW_010",
			CatalogError::NamespaceExists(_) => "VIEW_003",
			CatalogError::InvalidViewOn(_) => "VIEW_004",
			CatalogError::NamespaceNotFound(_) => "VIEW_005",
			CatalogError::Graph(GraphError::Cycle {
				..
			}) => "VIEW_006",
			CatalogError::Graph(GraphError::DepthExceeded {
				..
			}) => "VIEW_007",
			CatalogError::InvalidExistingViewPipeline {
				..
			} => "VIEW_008",
			CatalogError::ResolutionDepthExceeded {
				..
			} => "VIEW_009",
			CatalogError::Pipeline(err) => err.code(),
			CatalogError::Store(err) => err.code(),
			CatalogError::Namespace(NamespaceError::Malformed(_)) => "NAMESPACE_001",
			CatalogError::Namespace(NamespaceError::InvalidDatabase(_)) => "NAMESPACE_002",
		}
	}
}

impl IntoDiagnostic for CatalogError {
	fn into_diagnostic(self) -> Diagnostic {
		let code = self.code();
		let message = self.to_string();
		match self {
			CatalogError::ViewsDisabled => Diagnostic::new(code, message)
				.with_help("enable views in the server configuration (enableViews) and restart"),
			CatalogError::CrossDatabase {
				..
			} => Diagnostic::new(code, message).with_note("a view and its source always live in one database"),
			CatalogError::ForeignDatabase {
				database,
				..
			} => Diagnostic::new(code, message)
				.with_help(format!("use the view catalog of the view's own database instead of '{}'", database)),
			CatalogError::NamespaceExists(_) => {
				Diagnostic::new(code, message).with_help("drop the existing view or choose another name")
			}
			CatalogError::InvalidViewOn(_) => Diagnostic::new(code, message)
				.with_help("collection names must be non-empty, must not start with '.' and must not contain '$'"),
			CatalogError::NamespaceNotFound(_) => Diagnostic::new(code, message),
			CatalogError::Graph(GraphError::Cycle {
				..
			}) => Diagnostic::new(code, message).with_help("a view cannot depend on itself, directly or through other views"),
			CatalogError::Graph(GraphError::DepthExceeded {
				max_depth,
				..
			}) => Diagnostic::new(code, message)
				.with_note(format!("at most {} views may be chained on top of each other", max_depth)),
			CatalogError::InvalidExistingViewPipeline {
				view,
				source,
			} => Diagnostic::new(code, message)
				.with_help(format!("fix or drop view '{}' before changing other views", view))
				.with_cause(source.into_diagnostic()),
			CatalogError::ResolutionDepthExceeded {
				..
			} => Diagnostic::new(code, message)
				.with_note("the views collection may have been edited directly; check it for cycles"),
			CatalogError::Pipeline(err) => err.into_diagnostic(),
			CatalogError::Store(err) => err.into_diagnostic(),
			CatalogError::Namespace(err) => err.into_diagnostic(),
		}
	}
}
