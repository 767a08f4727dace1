// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

use viewdb_type::version::{ComponentType, HasVersion, SystemVersion};

pub mod catalog;
mod config;
mod error;
pub mod graph;
pub mod test_utils;
pub mod view;

pub use catalog::ViewCatalog;
pub use config::ViewCatalogConfig;
pub use error::CatalogError;
pub use graph::{GraphError, MAX_VIEW_DEPTH, ViewGraph};
pub use view::{ResolvedView, ViewDefinition};

pub type Result<T> = std::result::Result<T, CatalogError>;

pub struct CatalogVersion;

impl HasVersion for CatalogVersion {
	fn version(&self) -> SystemVersion {
		SystemVersion {
			name: "catalog".to_string(),
			version: env!("CARGO_PKG_VERSION").to_string(),
			description: "View definition cache, dependency validation and view resolution".to_string(),
			r#type: ComponentType::Module,
		}
	}
}
