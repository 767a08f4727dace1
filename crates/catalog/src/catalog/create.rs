// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::{debug, instrument};
use viewdb_transaction::TransactionHooks;
use viewdb_type::{Document, Namespace};

use crate::{
	CatalogError, Result,
	catalog::{ViewCatalog, ViewCatalogInner, register_compensation},
	view::ViewDefinition,
};

impl ViewCatalog {
	/// Creates the view `name` over `view_on`.
	///
	/// The view is visible to every catalog user as soon as this returns; if
	/// `txn` rolls back it disappears again.
	#[instrument(name = "catalog::view::create", level = "debug", skip(self, txn, pipeline))]
	pub fn create_view(
		&self,
		txn: &mut dyn TransactionHooks,
		name: &Namespace,
		view_on: &Namespace,
		pipeline: Vec<Document>,
	) -> Result<()> {
		if !self.config.enable_views {
			return Err(CatalogError::ViewsDisabled);
		}

		let mut inner = self.inner.lock();
		check_catalog_database(inner.durable.name(), name)?;
		check_same_database(name, view_on)?;

		if inner.lookup(txn, name)?.is_some() {
			return Err(CatalogError::NamespaceExists(name.clone()));
		}

		check_view_on(view_on)?;

		create_or_update(self.downgrade(), &mut inner, txn, name, view_on, pipeline)
	}

	/// Replaces the source and pipeline of the existing view `name`.
	#[instrument(name = "catalog::view::modify", level = "debug", skip(self, txn, pipeline))]
	pub fn modify_view(
		&self,
		txn: &mut dyn TransactionHooks,
		name: &Namespace,
		view_on: &Namespace,
		pipeline: Vec<Document>,
	) -> Result<()> {
		let mut inner = self.inner.lock();
		check_catalog_database(inner.durable.name(), name)?;
		check_same_database(name, view_on)?;

		if inner.lookup(txn, name)?.is_none() {
			return Err(CatalogError::NamespaceNotFound(name.clone()));
		}

		check_view_on(view_on)?;

		create_or_update(self.downgrade(), &mut inner, txn, name, view_on, pipeline)
	}
}

fn check_catalog_database(database: &str, name: &Namespace) -> Result<()> {
	if name.db() != database {
		return Err(CatalogError::ForeignDatabase {
			name: name.clone(),
			database: database.to_string(),
		});
	}
	Ok(())
}

fn check_same_database(name: &Namespace, view_on: &Namespace) -> Result<()> {
	if name.db() != view_on.db() {
		return Err(CatalogError::CrossDatabase {
			name: name.clone(),
			view_on: view_on.clone(),
		});
	}
	Ok(())
}

fn check_view_on(view_on: &Namespace) -> Result<()> {
	if !Namespace::is_valid_collection_name(view_on.coll()) {
		return Err(CatalogError::InvalidViewOn(view_on.coll().to_string()));
	}
	Ok(())
}

fn create_or_update(
	catalog: Weak<Mutex<ViewCatalogInner>>,
	inner: &mut ViewCatalogInner,
	txn: &mut dyn TransactionHooks,
	name: &Namespace,
	view_on: &Namespace,
	pipeline: Vec<Document>,
) -> Result<()> {
	assert!(inner.valid, "view catalog must be valid after a successful lookup");

	let view = Arc::new(ViewDefinition::new(name.clone(), view_on.clone(), pipeline));
	inner.upsert_into_graph(&view)?;

	if let Err(err) = inner.durable.upsert(txn, name, view.to_document()) {
		inner.graph_needs_refresh = true;
		return Err(err.into());
	}

	let key = name.to_string();
	let previous = inner.views.insert(key.clone(), view);
	debug!(replaced = previous.is_some(), "view definition stored");

	register_compensation(catalog, txn, key, previous);
	Ok(())
}
