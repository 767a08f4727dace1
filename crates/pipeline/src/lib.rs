// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

use std::collections::BTreeSet;

use viewdb_type::{
	Document, Namespace,
	version::{ComponentType, HasVersion, SystemVersion},
};

mod error;
pub mod stage;

pub use error::PipelineError;
pub use stage::{COLL_STATS, StagePipelineParser, is_coll_stats_stage};

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Parses a view pipeline far enough to know which namespaces it reads from.
pub trait PipelineParser: Send + Sync {
	/// Every namespace `pipeline` references when run against `view_on`, not
	/// including `view_on` itself.
	fn involved_namespaces(&self, view_on: &Namespace, pipeline: &[Document]) -> Result<BTreeSet<Namespace>>;
}

pub struct PipelineVersion;

impl HasVersion for PipelineVersion {
	fn version(&self) -> SystemVersion {
		SystemVersion {
			name: "pipeline".to_string(),
			version: env!("CARGO_PKG_VERSION").to_string(),
			description: "Pipeline stage validation and dependency extraction".to_string(),
			r#type: ComponentType::Module,
		}
	}
}
