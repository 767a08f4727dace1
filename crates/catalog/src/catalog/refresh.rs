// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::BTreeSet;

use tracing::{trace, warn};
use viewdb_pipeline::{PipelineError, PipelineParser};
use viewdb_type::Namespace;

use crate::{CatalogError, Result, catalog::ViewCatalogInner, view::ViewDefinition};

impl ViewCatalogInner {
	/// Puts `view` into the dependency graph, rebuilding the graph from the
	/// cached definitions first when it is stale. On error the graph holds the
	/// same edges as before the call.
	pub(crate) fn upsert_into_graph(&mut self, view: &ViewDefinition) -> Result<()> {
		let refs = references(self.parser.as_ref(), view)?;

		if self.graph_needs_refresh {
			self.refresh_graph()?;
		}

		let previous = self.graph.remove(view.name());
		if let Err(err) = self.graph.insert_and_validate(view.name(), refs) {
			if let Some(previous) = previous {
				self.graph.insert_without_validating(view.name(), previous);
			}
			return Err(err.into());
		}
		Ok(())
	}

	fn refresh_graph(&mut self) -> Result<()> {
		trace!(views = self.views.len(), "rebuilding view graph");
		self.graph.clear();

		for view in self.views.values() {
			let refs = references(self.parser.as_ref(), view).map_err(|source| {
				warn!(view = %view.name(), error = %source, "invalid pipeline for existing view");
				CatalogError::InvalidExistingViewPipeline {
					view: view.name().clone(),
					source,
				}
			})?;
			self.graph.insert_without_validating(view.name(), refs);
		}

		self.graph_needs_refresh = false;
		Ok(())
	}
}

/// Everything `view` reads: its source plus the namespaces named by its pipeline.
fn references(
	parser: &dyn PipelineParser,
	view: &ViewDefinition,
) -> std::result::Result<BTreeSet<Namespace>, PipelineError> {
	let mut refs = parser.involved_namespaces(view.view_on(), view.pipeline())?;
	refs.insert(view.view_on().clone());
	Ok(refs)
}
