// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::mem;

use tracing::{debug, instrument};

use crate::{
	TransactionId,
	hook::{Callback, HookChain, TransactionHooks},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
	Active,
	Committed,
	RolledBack,
}

/// A write transaction that collects compensation hooks.
///
/// `commit` runs the commit hooks in registration order. `rollback` runs the
/// rollback hooks newest first. Dropping an active transaction rolls it back.
pub struct CommandTransaction {
	id: TransactionId,
	state: TransactionState,
	on_commit: HookChain,
	on_rollback: HookChain,
}

impl CommandTransaction {
	pub fn new() -> Self {
		Self {
			id: TransactionId::generate(),
			state: TransactionState::Active,
			on_commit: HookChain::new(),
			on_rollback: HookChain::new(),
		}
	}

	pub fn state(&self) -> TransactionState {
		self.state
	}

	pub fn pending_commit_hooks(&self) -> usize {
		self.on_commit.len()
	}

	pub fn pending_rollback_hooks(&self) -> usize {
		self.on_rollback.len()
	}

	#[instrument(name = "transaction::command::commit", level = "debug", skip(self), fields(id = %self.id))]
	pub fn commit(mut self) {
		self.state = TransactionState::Committed;
		let hooks = mem::take(&mut self.on_commit);
		self.on_rollback.clear();
		debug!(hooks = hooks.len(), "running commit hooks");
		hooks.run();
	}

	#[instrument(name = "transaction::command::rollback", level = "debug", skip(self), fields(id = %self.id))]
	pub fn rollback(mut self) {
		self.abort();
	}

	fn abort(&mut self) {
		self.state = TransactionState::RolledBack;
		let hooks = mem::take(&mut self.on_rollback);
		self.on_commit.clear();
		debug!(hooks = hooks.len(), "running rollback hooks");
		hooks.run_reversed();
	}
}

impl Default for CommandTransaction {
	fn default() -> Self {
		Self::new()
	}
}

impl TransactionHooks for CommandTransaction {
	fn id(&self) -> TransactionId {
		self.id
	}

	fn register_on_commit(&mut self, callback: Callback) {
		self.on_commit.add(callback);
	}

	fn register_on_rollback(&mut self, callback: Callback) {
		self.on_rollback.add(callback);
	}
}

impl Drop for CommandTransaction {
	fn drop(&mut self) {
		if self.state == TransactionState::Active {
			debug!(id = %self.id, "transaction dropped while active, rolling back");
			self.abort();
		}
	}
}
