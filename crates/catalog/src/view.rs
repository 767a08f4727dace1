// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use viewdb_store::ViewDocument;
use viewdb_type::{Document, Namespace};

use crate::Result;

/// An immutable view: its name, the namespace it reads from and the pipeline
/// applied on top of that source.
///
/// Modifying a view produces a new `ViewDefinition`; the catalog hands values out
/// as `Arc<ViewDefinition>`, so a reader keeps the version it looked up even if
/// the view is replaced or dropped afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewDefinition {
	name: Namespace,
	view_on: Namespace,
	pipeline: Vec<Document>,
}

impl ViewDefinition {
	pub fn new(name: Namespace, view_on: Namespace, pipeline: Vec<Document>) -> Self {
		debug_assert_eq!(name.db(), view_on.db());
		Self {
			name,
			view_on,
			pipeline,
		}
	}

	pub fn name(&self) -> &Namespace {
		&self.name
	}

	pub fn view_on(&self) -> &Namespace {
		&self.view_on
	}

	pub fn pipeline(&self) -> &[Document] {
		&self.pipeline
	}

	pub fn from_document(document: &ViewDocument) -> Result<Self> {
		let name = Namespace::parse(&document.id)?;
		let view_on = name.sibling(document.view_on.clone());
		Ok(Self {
			name,
			view_on,
			pipeline: document.pipeline.clone(),
		})
	}

	pub fn to_document(&self) -> ViewDocument {
		ViewDocument {
			id: self.name.to_string(),
			view_on: self.view_on.coll().to_string(),
			pipeline: self.pipeline.clone(),
		}
	}
}

/// The outcome of resolving a namespace: the namespace to actually read and the
/// full pipeline to run against it, ancestor stages first.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedView {
	pub namespace: Namespace,
	pub pipeline: Vec<Document>,
}
