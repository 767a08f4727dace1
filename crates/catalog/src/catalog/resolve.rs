// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tracing::{instrument, trace};
use viewdb_pipeline::is_coll_stats_stage;
use viewdb_transaction::TransactionHooks;
use viewdb_type::Namespace;

use crate::{
	CatalogError, Result,
	catalog::ViewCatalog,
	graph::MAX_VIEW_DEPTH,
	view::ResolvedView,
};

impl ViewCatalog {
	/// Expands `name` into the namespace that has to be read and the pipeline to
	/// run over it. A name that is not a view resolves to itself with an empty
	/// pipeline.
	#[instrument(name = "catalog::view::resolve", level = "trace", skip(self, txn))]
	pub fn resolve_view(&self, txn: &mut dyn TransactionHooks, name: &Namespace) -> Result<ResolvedView> {
		let mut inner = self.inner.lock();

		let mut namespace = name.clone();
		let mut pipeline = Vec::new();

		for _ in 0..=MAX_VIEW_DEPTH {
			let Some(view) = inner.lookup(txn, &namespace)? else {
				trace!(%namespace, stages = pipeline.len(), "view resolved");
				return Ok(ResolvedView {
					namespace,
					pipeline,
				});
			};

			namespace = view.view_on().clone();
			let mut composed = view.pipeline().to_vec();
			composed.append(&mut pipeline);
			pipeline = composed;

			if view.pipeline().first().is_some_and(is_coll_stats_stage) {
				return Ok(ResolvedView {
					namespace,
					pipeline,
				});
			}
		}

		Err(CatalogError::ResolutionDepthExceeded {
			max_depth: MAX_VIEW_DEPTH,
		})
	}
}
