// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod error;
pub mod namespace;
pub mod version;

pub use error::{Diagnostic, IntoDiagnostic};
pub use namespace::{Namespace, NamespaceError};

/// A single pipeline stage or persisted document. Stages are opaque to the
/// catalog; only the pipeline parser looks inside them.
pub type Document = serde_json::Value;

pub struct TypeVersion;

impl version::HasVersion for TypeVersion {
	fn version(&self) -> version::SystemVersion {
		version::SystemVersion {
			name: "type".to_string(),
			version: env!("CARGO_PKG_VERSION").to_string(),
			description: "Namespace, document and diagnostic types".to_string(),
			r#type: version::ComponentType::Module,
		}
	}
}
