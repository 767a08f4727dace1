// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

use std::{
	fmt::{Display, Formatter},
	ops::Deref,
};

use uuid::Uuid;
use viewdb_type::version::{ComponentType, HasVersion, SystemVersion};

pub mod command;
pub mod hook;

pub use command::{CommandTransaction, TransactionState};
pub use hook::{Callback, HookChain, TransactionHooks};

/// A unique identifier for a transaction using UUIDv7 for time-ordered
/// uniqueness
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TransactionId(pub(crate) Uuid);

impl Default for TransactionId {
	fn default() -> Self {
		Self::generate()
	}
}

impl Deref for TransactionId {
	type Target = Uuid;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl TransactionId {
	pub fn generate() -> Self {
		Self(Uuid::now_v7())
	}
}

impl Display for TransactionId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

pub struct TransactionVersion;

impl HasVersion for TransactionVersion {
	fn version(&self) -> SystemVersion {
		SystemVersion {
			name: "transaction".to_string(),
			version: env!("CARGO_PKG_VERSION").to_string(),
			description: "Commit and rollback hook management".to_string(),
			r#type: ComponentType::Module,
		}
	}
}
