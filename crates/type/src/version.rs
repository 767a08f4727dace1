// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
	Module,
	Subsystem,
}

impl Display for ComponentType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			ComponentType::Module => f.write_str("module"),
			ComponentType::Subsystem => f.write_str("subsystem"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemVersion {
	pub name: String,
	pub version: String,
	pub description: String,
	pub r#type: ComponentType,
}

/// Implemented by every crate so the embedding server can report what it runs.
pub trait HasVersion {
	fn version(&self) -> SystemVersion;
}
