// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

use viewdb_transaction::TransactionHooks;
use viewdb_type::{
	Namespace,
	version::{ComponentType, HasVersion, SystemVersion},
};

mod document;
mod error;
pub mod memory;

pub use document::ViewDocument;
pub use error::StoreError;
pub use memory::MemoryViewStore;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistence of view documents for a single database.
///
/// Writes happen under the caller's transaction: an implementation must make them
/// disappear again if that transaction rolls back.
pub trait DurableViewStore: Send + Sync {
	/// Name of the database whose views this store holds.
	fn name(&self) -> &str;

	/// Streams every persisted view document to `visit`.
	fn iterate(&self, txn: &mut dyn TransactionHooks, visit: &mut dyn FnMut(ViewDocument)) -> Result<()>;

	/// Inserts or replaces the document stored under `name`.
	fn upsert(&self, txn: &mut dyn TransactionHooks, name: &Namespace, document: ViewDocument) -> Result<()>;

	/// Removes the document stored under `name`; removing a missing entry is not an error.
	fn remove(&self, txn: &mut dyn TransactionHooks, name: &Namespace) -> Result<()>;
}

pub struct StoreVersion;

impl HasVersion for StoreVersion {
	fn version(&self) -> SystemVersion {
		SystemVersion {
			name: "store".to_string(),
			version: env!("CARGO_PKG_VERSION").to_string(),
			description: "Transactional storage for view documents".to_string(),
			r#type: ComponentType::Module,
		}
	}
}
