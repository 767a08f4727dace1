// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use serde_json::json;
use viewdb_store::{MemoryViewStore, ViewDocument};
use viewdb_transaction::CommandTransaction;
use viewdb_type::{Document, Namespace};

use crate::{ViewCatalog, ViewCatalogConfig};

/// Installs a fmt subscriber honouring `RUST_LOG`. Safe to call from every test.
pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
		)
		.with_test_writer()
		.try_init();
}

pub fn ns(name: &str) -> Namespace {
	Namespace::parse(name).unwrap()
}

/// A catalog with views enabled over an empty in-memory store for database `db`.
pub fn setup() -> (ViewCatalog, MemoryViewStore) {
	setup_with_config(ViewCatalogConfig::default())
}

pub fn setup_with_config(config: ViewCatalogConfig) -> (ViewCatalog, MemoryViewStore) {
	init_tracing();
	let store = MemoryViewStore::new("db");
	let catalog = ViewCatalog::new(config, Arc::new(store.clone()));
	(catalog, store)
}

pub fn match_stage(level: i64) -> Document {
	json!({"$match": {"level": level}})
}

pub fn lookup_stage(from: &str) -> Document {
	json!({"$lookup": {"from": from, "localField": "id", "foreignField": "id", "as": "joined"}})
}

pub fn document(name: &str, view_on: &str, pipeline: Vec<Document>) -> ViewDocument {
	ViewDocument {
		id: name.to_string(),
		view_on: view_on.to_string(),
		pipeline,
	}
}

/// Creates `name` on `view_on` in its own committed transaction.
pub fn create_view(catalog: &ViewCatalog, name: &str, view_on: &str, pipeline: Vec<Document>) {
	let mut txn = CommandTransaction::new();
	catalog.create_view(&mut txn, &ns(name), &ns(view_on), pipeline).unwrap();
	txn.commit();
}
