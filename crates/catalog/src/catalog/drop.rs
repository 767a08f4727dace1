// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tracing::{debug, instrument};
use viewdb_transaction::TransactionHooks;
use viewdb_type::Namespace;

use crate::{
	CatalogError, Result,
	catalog::{ViewCatalog, register_compensation},
};

impl ViewCatalog {
	#[instrument(name = "catalog::view::drop", level = "debug", skip(self, txn))]
	pub fn drop_view(&self, txn: &mut dyn TransactionHooks, name: &Namespace) -> Result<()> {
		let mut inner = self.inner.lock();

		let Some(saved) = inner.lookup(txn, name)? else {
			return Err(CatalogError::NamespaceNotFound(name.clone()));
		};
		assert!(inner.valid, "view catalog must be valid after a successful lookup");

		inner.durable.remove(txn, name)?;
		inner.graph.remove(saved.name());

		let key = name.to_string();
		inner.views.remove(&key);
		debug!("view definition removed");

		register_compensation(self.downgrade(), txn, key, Some(saved));
		Ok(())
	}
}
