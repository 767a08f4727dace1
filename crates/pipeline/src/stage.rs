// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::BTreeSet;

use serde_json::{Map, Value};
use tracing::instrument;
use viewdb_type::{Document, Namespace};

use crate::{PipelineError, PipelineParser, Result};

/// The statistics stage. It has to be the first operation against a physical
/// collection, so view resolution stops composing once it sees it.
pub const COLL_STATS: &str = "$collStats";

const STAGES: &[&str] = &[
	"$addFields",
	"$bucket",
	"$bucketAuto",
	COLL_STATS,
	"$count",
	"$facet",
	"$geoNear",
	"$graphLookup",
	"$group",
	"$indexStats",
	"$limit",
	"$lookup",
	"$match",
	"$project",
	"$redact",
	"$replaceRoot",
	"$replaceWith",
	"$sample",
	"$set",
	"$skip",
	"$sort",
	"$sortByCount",
	"$unionWith",
	"$unset",
	"$unwind",
];

const OUTPUT_STAGES: &[&str] = &["$out", "$merge"];

pub fn is_coll_stats_stage(stage: &Document) -> bool {
	stage.as_object().is_some_and(|spec| spec.contains_key(COLL_STATS))
}

/// Validates the shape of every stage and collects the collections that
/// `$lookup`, `$graphLookup` and `$unionWith` read, descending into nested
/// pipelines of `$lookup`, `$unionWith` and `$facet`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StagePipelineParser;

impl StagePipelineParser {
	pub fn new() -> Self {
		Self
	}
}

impl PipelineParser for StagePipelineParser {
	#[instrument(name = "pipeline::involved_namespaces", level = "trace", skip(self, pipeline))]
	fn involved_namespaces(&self, view_on: &Namespace, pipeline: &[Document]) -> Result<BTreeSet<Namespace>> {
		let mut involved = BTreeSet::new();
		collect(view_on, pipeline, true, &mut involved)?;
		Ok(involved)
	}
}

fn collect(view_on: &Namespace, pipeline: &[Document], top_level: bool, involved: &mut BTreeSet<Namespace>) -> Result<()> {
	for (index, stage) in pipeline.iter().enumerate() {
		let Some(spec) = stage.as_object() else {
			return Err(PipelineError::StageNotDocument {
				index,
			});
		};
		let (name, argument) = match spec.iter().next() {
			Some(entry) if spec.len() == 1 => entry,
			_ => {
				return Err(PipelineError::StageFieldCount {
					index,
					count: spec.len(),
				});
			}
		};

		if OUTPUT_STAGES.contains(&name.as_str()) {
			return Err(PipelineError::StageNotAllowedInView {
				name: name.clone(),
			});
		}
		if !STAGES.contains(&name.as_str()) {
			return Err(PipelineError::UnknownStage {
				index,
				name: name.clone(),
			});
		}

		match name.as_str() {
			COLL_STATS if !(top_level && index == 0) => {
				return Err(PipelineError::CollStatsNotFirst {
					index,
				});
			}
			"$lookup" => {
				let args = arguments(name, argument)?;
				match args.get("from") {
					Some(from) => {
						involved.insert(source(view_on, name, from)?);
					}
					None if !args.contains_key("pipeline") => {
						return Err(PipelineError::InvalidSource {
							stage: name.clone(),
							reason: "missing 'from'".to_string(),
						});
					}
					None => {}
				}
				if let Some(nested) = args.get("pipeline") {
					collect(view_on, nested_pipeline(name, "pipeline", nested)?, false, involved)?;
				}
			}
			"$graphLookup" => {
				let args = arguments(name, argument)?;
				let Some(from) = args.get("from") else {
					return Err(PipelineError::InvalidSource {
						stage: name.clone(),
						reason: "missing 'from'".to_string(),
					});
				};
				involved.insert(source(view_on, name, from)?);
			}
			"$unionWith" => {
				if argument.is_string() {
					involved.insert(source(view_on, name, argument)?);
				} else {
					let args = arguments(name, argument)?;
					let Some(coll) = args.get("coll") else {
						return Err(PipelineError::InvalidSource {
							stage: name.clone(),
							reason: "missing 'coll'".to_string(),
						});
					};
					involved.insert(source(view_on, name, coll)?);
					if let Some(nested) = args.get("pipeline") {
						collect(view_on, nested_pipeline(name, "pipeline", nested)?, false, involved)?;
					}
				}
			}
			"$facet" => {
				for (facet, nested) in arguments(name, argument)? {
					collect(view_on, nested_pipeline(name, facet, nested)?, false, involved)?;
				}
			}
			_ => {}
		}
	}
	Ok(())
}

fn arguments<'a>(stage: &str, argument: &'a Value) -> Result<&'a Map<String, Value>> {
	argument.as_object().ok_or_else(|| PipelineError::InvalidStageArgument {
		stage: stage.to_string(),
		field: "its specification".to_string(),
		expected: "a document".to_string(),
	})
}

fn nested_pipeline<'a>(stage: &str, field: &str, value: &'a Value) -> Result<&'a [Value]> {
	value.as_array().map(Vec::as_slice).ok_or_else(|| PipelineError::InvalidStageArgument {
		stage: stage.to_string(),
		field: format!("'{}'", field),
		expected: "an array of stages".to_string(),
	})
}

fn source(view_on: &Namespace, stage: &str, value: &Value) -> Result<Namespace> {
	let Some(coll) = value.as_str() else {
		return Err(PipelineError::InvalidSource {
			stage: stage.to_string(),
			reason: "the collection name must be a string".to_string(),
		});
	};
	if !Namespace::is_valid_collection_name(coll) {
		return Err(PipelineError::InvalidSource {
			stage: stage.to_string(),
			reason: format!("invalid collection name '{}'", coll),
		});
	}
	Ok(view_on.sibling(coll))
}
