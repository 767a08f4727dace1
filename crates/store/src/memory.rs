// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	collections::BTreeMap,
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
};

use parking_lot::{Mutex, RwLock};
use tracing::{instrument, trace};
use viewdb_transaction::TransactionHooks;
use viewdb_type::Namespace;

use crate::{DurableViewStore, Result, StoreError, ViewDocument};

/// In-memory view store.
///
/// Documents are kept serialized, exactly as a disk backend would hold them.
/// Writes are applied immediately and a rollback hook restoring the previous
/// bytes is registered with the writing transaction.
#[derive(Clone)]
pub struct MemoryViewStore(Arc<MemoryViewStoreInner>);

struct MemoryViewStoreInner {
	database: String,
	documents: RwLock<BTreeMap<String, Vec<u8>>>,
	scans: AtomicUsize,
	faults: Mutex<Faults>,
}

#[derive(Default)]
struct Faults {
	iterate: Option<String>,
	upsert: Option<String>,
	remove: Option<String>,
}

impl MemoryViewStore {
	pub fn new(database: impl Into<String>) -> Self {
		Self(Arc::new(MemoryViewStoreInner {
			database: database.into(),
			documents: RwLock::new(BTreeMap::new()),
			scans: AtomicUsize::new(0),
			faults: Mutex::new(Faults::default()),
		}))
	}

	/// Number of full scans served so far, failed ones included.
	pub fn scan_count(&self) -> usize {
		self.0.scans.load(Ordering::SeqCst)
	}

	pub fn len(&self) -> usize {
		self.0.documents.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.documents.read().is_empty()
	}

	pub fn contains(&self, name: &Namespace) -> bool {
		self.0.documents.read().contains_key(&name.to_string())
	}

	/// Decoded copy of the document stored under `name`.
	pub fn get(&self, name: &Namespace) -> Result<Option<ViewDocument>> {
		let key = name.to_string();
		match self.0.documents.read().get(&key) {
			Some(bytes) => decode(&key, bytes).map(Some),
			None => Ok(None),
		}
	}

	/// Writes raw bytes outside of any transaction, the way an external writer
	/// editing the views collection directly would.
	pub fn put_raw(&self, name: impl Into<String>, bytes: Vec<u8>) {
		self.0.documents.write().insert(name.into(), bytes);
	}

	/// Makes the next `iterate` call fail with an I/O error.
	pub fn fail_next_iterate(&self, reason: impl Into<String>) {
		self.0.faults.lock().iterate = Some(reason.into());
	}

	/// Makes the next `upsert` call fail with an I/O error.
	pub fn fail_next_upsert(&self, reason: impl Into<String>) {
		self.0.faults.lock().upsert = Some(reason.into());
	}

	/// Makes the next `remove` call fail with an I/O error.
	pub fn fail_next_remove(&self, reason: impl Into<String>) {
		self.0.faults.lock().remove = Some(reason.into());
	}

	fn register_restore(&self, txn: &mut dyn TransactionHooks, key: String, previous: Option<Vec<u8>>) {
		let inner = Arc::downgrade(&self.0);
		txn.register_on_rollback(Box::new(move || {
			let Some(inner) = inner.upgrade() else {
				return;
			};
			let mut documents = inner.documents.write();
			match previous {
				Some(bytes) => {
					documents.insert(key, bytes);
				}
				None => {
					documents.remove(&key);
				}
			}
		}));
	}
}

impl DurableViewStore for MemoryViewStore {
	fn name(&self) -> &str {
		&self.0.database
	}

	#[instrument(name = "store::view::iterate", level = "trace", skip(self, _txn, visit))]
	fn iterate(&self, _txn: &mut dyn TransactionHooks, visit: &mut dyn FnMut(ViewDocument)) -> Result<()> {
		self.0.scans.fetch_add(1, Ordering::SeqCst);
		if let Some(reason) = self.0.faults.lock().iterate.take() {
			return Err(StoreError::Io(reason));
		}

		let documents = self.0.documents.read();
		for (key, bytes) in documents.iter() {
			visit(decode(key, bytes)?);
		}
		trace!(count = documents.len(), "scanned view documents");
		Ok(())
	}

	#[instrument(name = "store::view::upsert", level = "trace", skip(self, txn, document))]
	fn upsert(&self, txn: &mut dyn TransactionHooks, name: &Namespace, document: ViewDocument) -> Result<()> {
		if let Some(reason) = self.0.faults.lock().upsert.take() {
			return Err(StoreError::Io(reason));
		}

		let key = name.to_string();
		let bytes = serde_json::to_vec(&document).map_err(|source| StoreError::Codec {
			name: key.clone(),
			source,
		})?;

		let previous = self.0.documents.write().insert(key.clone(), bytes);
		self.register_restore(txn, key, previous);
		Ok(())
	}

	#[instrument(name = "store::view::remove", level = "trace", skip(self, txn))]
	fn remove(&self, txn: &mut dyn TransactionHooks, name: &Namespace) -> Result<()> {
		if let Some(reason) = self.0.faults.lock().remove.take() {
			return Err(StoreError::Io(reason));
		}

		let key = name.to_string();
		let previous = self.0.documents.write().remove(&key);
		if previous.is_some() {
			self.register_restore(txn, key, previous);
		}
		Ok(())
	}
}

fn decode(key: &str, bytes: &[u8]) -> Result<ViewDocument> {
	serde_json::from_slice(bytes).map_err(|source| StoreError::Codec {
		name: key.to_string(),
		source,
	})
}
