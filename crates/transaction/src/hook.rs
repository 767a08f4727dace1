// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::TransactionId;

/// A compensation callback. Runs at most once, when the owning transaction
/// reaches the outcome it was registered for.
pub type Callback = Box<dyn FnOnce() + Send + 'static>;

/// The capability a transaction exposes to the code running inside it.
///
/// Components that mutate in-memory state ahead of the durable commit register
/// a rollback callback that undoes the mutation, and optionally a commit
/// callback that finalises it. Exactly one of the two sets runs.
pub trait TransactionHooks {
	fn id(&self) -> TransactionId;

	fn register_on_commit(&mut self, callback: Callback);

	fn register_on_rollback(&mut self, callback: Callback);
}

/// Ordered list of callbacks registered for one transaction outcome
pub struct HookChain {
	pub(crate) hooks: Vec<Callback>,
}

impl HookChain {
	pub fn new() -> Self {
		Self {
			hooks: Vec::new(),
		}
	}

	pub fn add(&mut self, hook: Callback) {
		self.hooks.push(hook);
	}

	pub fn is_empty(&self) -> bool {
		self.hooks.is_empty()
	}

	pub fn len(&self) -> usize {
		self.hooks.len()
	}

	pub fn clear(&mut self) {
		self.hooks.clear()
	}

	/// Runs every hook in registration order, consuming the chain.
	pub fn run(self) {
		for hook in self.hooks {
			hook();
		}
	}

	/// Runs every hook newest first, consuming the chain. Undo callbacks use this
	/// so that later mutations are reverted before the ones they were built on.
	pub fn run_reversed(self) {
		for hook in self.hooks.into_iter().rev() {
			hook();
		}
	}
}

impl Default for HookChain {
	fn default() -> Self {
		Self::new()
	}
}
