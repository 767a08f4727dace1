// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::{Diagnostic, IntoDiagnostic};

/// A fully-qualified `<database>.<collection>` name.
///
/// The database part never contains a `.`; everything after the first `.` is the
/// collection, so `db.system.views` names collection `system.views` in `db`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Namespace {
	db: String,
	coll: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NamespaceError {
	#[error("invalid namespace '{0}': expected '<database>.<collection>'")]
	Malformed(String),

	#[error("invalid database name '{0}'")]
	InvalidDatabase(String),
}

impl Namespace {
	/// Builds a namespace from already separated parts without validating them.
	pub fn new(db: impl Into<String>, coll: impl Into<String>) -> Self {
		Self {
			db: db.into(),
			coll: coll.into(),
		}
	}

	pub fn parse(ns: &str) -> Result<Self, NamespaceError> {
		let Some((db, coll)) = ns.split_once('.') else {
			return Err(NamespaceError::Malformed(ns.to_string()));
		};
		if coll.is_empty() {
			return Err(NamespaceError::Malformed(ns.to_string()));
		}
		if !Self::is_valid_database_name(db) {
			return Err(NamespaceError::InvalidDatabase(db.to_string()));
		}
		Ok(Self::new(db, coll))
	}

	pub fn db(&self) -> &str {
		&self.db
	}

	pub fn coll(&self) -> &str {
		&self.coll
	}

	/// Another collection in the same database.
	pub fn sibling(&self, coll: impl Into<String>) -> Self {
		Self::new(self.db.clone(), coll)
	}

	pub fn is_valid_database_name(db: &str) -> bool {
		!db.is_empty() && !db.chars().any(|c| matches!(c, '.' | '/' | '\\' | '"' | '$' | ' ' | '\0'))
	}

	pub fn is_valid_collection_name(coll: &str) -> bool {
		!coll.is_empty() && !coll.starts_with('.') && !coll.contains('$') && !coll.contains('\0')
	}
}

impl Display for Namespace {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}.{}", self.db, self.coll)
	}
}

impl FromStr for Namespace {
	type Err = NamespaceError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl TryFrom<String> for Namespace {
	type Error = NamespaceError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::parse(&value)
	}
}

impl From<Namespace> for String {
	fn from(value: Namespace) -> Self {
		value.to_string()
	}
}

impl IntoDiagnostic for NamespaceError {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			NamespaceError::Malformed(ns) => Diagnostic::new("NAMESPACE_001", format!("invalid namespace '{}'", ns))
				.with_help("namespaces are written as '<database>.<collection>'"),
			NamespaceError::InvalidDatabase(db) => {
				Diagnostic::new("NAMESPACE_002", format!("invalid database name '{}'", db))
					.with_help("database names must be non-empty and must not contain '.', '/', '\\', '\"', '$', spaces or NUL")
			}
		}
	}
}
