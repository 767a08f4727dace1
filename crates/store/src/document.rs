// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};
use viewdb_type::Document;

/// The persisted form of a view: `{_id: <db.coll>, viewOn: <coll>, pipeline: [...]}`.
///
/// `view_on` holds only the collection part; the source always lives in the same
/// database as the view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewDocument {
	#[serde(rename = "_id")]
	pub id: String,
	#[serde(rename = "viewOn")]
	pub view_on: String,
	pub pipeline: Vec<Document>,
}
