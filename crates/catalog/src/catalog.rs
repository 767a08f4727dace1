// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	collections::HashMap,
	sync::{Arc, Weak},
};

use parking_lot::Mutex;
use tracing::{debug, instrument};
use viewdb_pipeline::{PipelineParser, StagePipelineParser};
use viewdb_store::DurableViewStore;
use viewdb_transaction::TransactionHooks;
use viewdb_type::Namespace;

use crate::{Result, ViewCatalogConfig, graph::ViewGraph, view::ViewDefinition};

mod create;
mod drop;
mod refresh;
mod resolve;

/// In-memory cache of the view definitions of one database.
///
/// The cache is loaded lazily from the durable store and kept in step with it
/// through transaction hooks. All state sits behind a single lock which every
/// public operation holds for its whole duration.
#[derive(Clone)]
pub struct ViewCatalog {
	inner: Arc<Mutex<ViewCatalogInner>>,
	config: ViewCatalogConfig,
}

pub(crate) struct ViewCatalogInner {
	pub(crate) durable: Arc<dyn DurableViewStore>,
	pub(crate) parser: Arc<dyn PipelineParser>,
	pub(crate) views: HashMap<String, Arc<ViewDefinition>>,
	pub(crate) graph: ViewGraph,
	pub(crate) valid: bool,
	pub(crate) graph_needs_refresh: bool,
}

impl ViewCatalog {
	pub fn new(config: ViewCatalogConfig, durable: Arc<dyn DurableViewStore>) -> Self {
		Self::with_parser(config, durable, Arc::new(StagePipelineParser::new()))
	}

	pub fn with_parser(
		config: ViewCatalogConfig,
		durable: Arc<dyn DurableViewStore>,
		parser: Arc<dyn PipelineParser>,
	) -> Self {
		Self {
			inner: Arc::new(Mutex::new(ViewCatalogInner {
				durable,
				parser,
				views: HashMap::new(),
				graph: ViewGraph::new(),
				valid: false,
				graph_needs_refresh: true,
			})),
			config,
		}
	}

	pub fn config(&self) -> &ViewCatalogConfig {
		&self.config
	}

	/// Name of the database the durable store belongs to.
	pub fn database(&self) -> String {
		self.inner.lock().durable.name().to_string()
	}

	#[instrument(name = "catalog::view::reload_if_needed", level = "debug", skip(self, txn))]
	pub fn reload_if_needed(&self, txn: &mut dyn TransactionHooks) -> Result<()> {
		let mut inner = self.inner.lock();
		inner.reload_if_needed(txn)
	}

	/// Marks the cache stale; the next access reloads it from the durable store.
	#[instrument(name = "catalog::view::invalidate", level = "debug", skip(self))]
	pub fn invalidate(&self) {
		let mut inner = self.inner.lock();
		inner.valid = false;
		inner.graph_needs_refresh = true;
	}

	#[instrument(name = "catalog::view::lookup", level = "trace", skip(self, txn))]
	pub fn lookup(&self, txn: &mut dyn TransactionHooks, name: &Namespace) -> Result<Option<Arc<ViewDefinition>>> {
		let mut inner = self.inner.lock();
		inner.lookup(txn, name)
	}

	#[instrument(name = "catalog::view::list", level = "trace", skip(self, txn))]
	pub fn list_views(&self, txn: &mut dyn TransactionHooks) -> Result<Vec<Arc<ViewDefinition>>> {
		let mut inner = self.inner.lock();
		inner.reload_if_needed(txn)?;

		let mut views: Vec<_> = inner.views.values().cloned().collect();
		views.sort_by(|l, r| l.name().cmp(r.name()));
		Ok(views)
	}

	/// Calls `callback` for every view, in no particular order, while holding the
	/// catalog lock. The callback must not call back into the catalog.
	#[instrument(name = "catalog::view::iterate", level = "trace", skip(self, txn, callback))]
	pub fn iterate(&self, txn: &mut dyn TransactionHooks, mut callback: impl FnMut(&ViewDefinition)) -> Result<()> {
		let mut inner = self.inner.lock();
		inner.reload_if_needed(txn)?;

		for view in inner.views.values() {
			callback(view);
		}
		Ok(())
	}

	fn downgrade(&self) -> Weak<Mutex<ViewCatalogInner>> {
		Arc::downgrade(&self.inner)
	}
}

impl ViewCatalogInner {
	pub(crate) fn reload_if_needed(&mut self, txn: &mut dyn TransactionHooks) -> Result<()> {
		if self.valid {
			return Ok(());
		}
		self.reload(txn)
	}

	fn reload(&mut self, txn: &mut dyn TransactionHooks) -> Result<()> {
		debug!("reloading view catalog for database {}", self.durable.name());

		self.views.clear();
		self.valid = false;
		self.graph_needs_refresh = true;

		let mut documents = Vec::new();
		self.durable.iterate(txn, &mut |document| documents.push(document))?;

		let mut views = HashMap::with_capacity(documents.len());
		for document in &documents {
			let view = ViewDefinition::from_document(document)?;
			views.insert(view.name().to_string(), Arc::new(view));
		}

		debug!(views = views.len(), "view catalog reloaded");
		self.views = views;
		self.valid = true;
		Ok(())
	}

	pub(crate) fn lookup(
		&mut self,
		txn: &mut dyn TransactionHooks,
		name: &Namespace,
	) -> Result<Option<Arc<ViewDefinition>>> {
		self.reload_if_needed(txn)?;
		Ok(self.views.get(&name.to_string()).cloned())
	}
}

/// Registers the hooks that keep the cache in step with the outcome of `txn`:
/// commit marks the cache valid, rollback puts `previous` back under `name`
/// (or erases the entry when there was none) and forces a graph rebuild.
pub(crate) fn register_compensation(
	catalog: Weak<Mutex<ViewCatalogInner>>,
	txn: &mut dyn TransactionHooks,
	name: String,
	previous: Option<Arc<ViewDefinition>>,
) {
	let on_rollback = catalog.clone();
	txn.register_on_rollback(Box::new(move || {
		let Some(inner) = on_rollback.upgrade() else {
			return;
		};
		let mut inner = inner.lock();
		match previous {
			Some(view) => {
				inner.views.insert(name, view);
			}
			None => {
				inner.views.remove(&name);
			}
		}
		inner.graph_needs_refresh = true;
	}));

	txn.register_on_commit(Box::new(move || {
		let Some(inner) = catalog.upgrade() else {
			return;
		};
		inner.lock().valid = true;
	}));
}
