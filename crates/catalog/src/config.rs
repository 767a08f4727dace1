// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::Deserialize;

/// Startup configuration of a view catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewCatalogConfig {
	/// Gates `create_view`. Existing views stay readable, modifiable and droppable
	/// when this is off.
	pub enable_views: bool,
}

impl ViewCatalogConfig {
	pub fn new() -> Self {
		Self {
			enable_views: true,
		}
	}

	pub fn with_views_enabled(mut self, enabled: bool) -> Self {
		self.enable_views = enabled;
		self
	}
}

impl Default for ViewCatalogConfig {
	fn default() -> Self {
		Self::new()
	}
}
