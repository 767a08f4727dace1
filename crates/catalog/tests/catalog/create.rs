// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde_json::json;
use viewdb_catalog::{
	CatalogError, GraphError, MAX_VIEW_DEPTH, ViewCatalogConfig,
	test_utils::{create_view, lookup_stage, match_stage, ns, setup, setup_with_config},
};
use viewdb_transaction::CommandTransaction;
use viewdb_type::Namespace;

#[test]
fn test_create_then_lookup() {
	let (catalog, store) = setup();
	let pipeline = vec![json!({"$match": {"status": "open"}}), json!({"$project": {"total": 1}})];

	let mut txn = CommandTransaction::new();
	catalog.create_view(&mut txn, &ns("db.open"), &ns("db.orders"), pipeline.clone()).unwrap();
	txn.commit();

	let mut txn = CommandTransaction::new();
	let view = catalog.lookup(&mut txn, &ns("db.open")).unwrap().unwrap();
	assert_eq!(view.name(), &ns("db.open"));
	assert_eq!(view.view_on(), &ns("db.orders"));
	assert_eq!(view.pipeline(), pipeline.as_slice());

	let stored = store.get(&ns("db.open")).unwrap().unwrap();
	assert_eq!(stored.view_on, "orders");
	assert_eq!(stored.pipeline, pipeline);

	assert!(catalog.lookup(&mut txn, &ns("db.orders")).unwrap().is_none());
}

#[test]
fn test_create_existing_view_fails() {
	let (catalog, _store) = setup();
	create_view(&catalog, "db.v", "db.c", vec![]);

	let mut txn = CommandTransaction::new();
	let err = catalog.create_view(&mut txn, &ns("db.v"), &ns("db.other"), vec![]).unwrap_err();
	assert!(matches!(err, CatalogError::NamespaceExists(ref name) if name == &ns("db.v")));
	assert_eq!(err.code(), "VIEW_003");

	let view = catalog.lookup(&mut txn, &ns("db.v")).unwrap().unwrap();
	assert_eq!(view.view_on(), &ns("db.c"));
}

#[test]
fn test_create_across_databases_fails() {
	let (catalog, store) = setup();
	let mut txn = CommandTransaction::new();
	let err = catalog.create_view(&mut txn, &ns("db.v"), &ns("other.c"), vec![]).unwrap_err();
	assert_eq!(err.code(), "VIEW_002");
	assert!(store.is_empty());
}

#[test]
fn test_create_in_other_database_fails() {
	let (catalog, store) = setup();
	let mut txn = CommandTransaction::new();
	let err = catalog.create_view(&mut txn, &ns("other.v"), &ns("other.c"), vec![]).unwrap_err();
	assert!(matches!(
		err,
		CatalogError::ForeignDatabase {
			ref database,
			..
		} if database == "db"
	));
	assert!(store.is_empty());
	assert!(catalog.lookup(&mut txn, &ns("other.v")).unwrap().is_none());
}

#[test]
fn test_create_with_invalid_view_on_fails() {
	let (catalog, _store) = setup();
	let mut txn = CommandTransaction::new();

	let err = catalog.create_view(&mut txn, &ns("db.v"), &Namespace::new("db", "bad$coll"), vec![]).unwrap_err();
	assert!(matches!(err, CatalogError::InvalidViewOn(ref coll) if coll == "bad$coll"));

	let err = catalog.create_view(&mut txn, &ns("db.v"), &Namespace::new("db", ".hidden"), vec![]).unwrap_err();
	assert_eq!(err.code(), "VIEW_004");
}

#[test]
fn test_create_with_views_disabled_fails() {
	let (catalog, store) = setup_with_config(ViewCatalogConfig::new().with_views_enabled(false));
	let mut txn = CommandTransaction::new();

	let err = catalog.create_view(&mut txn, &ns("db.v"), &ns("db.c"), vec![]).unwrap_err();
	assert!(matches!(err, CatalogError::ViewsDisabled));
	assert_eq!(err.code(), "VIEW_001");
	// rejected before the store is read
	assert_eq!(store.scan_count(), 0);
}

#[test]
fn test_cycle_is_rejected() {
	let (catalog, store) = setup();
	create_view(&catalog, "db.a", "db.b", vec![]);

	let mut txn = CommandTransaction::new();
	let err = catalog.create_view(&mut txn, &ns("db.b"), &ns("db.a"), vec![]).unwrap_err();
	assert!(matches!(
		err,
		CatalogError::Graph(GraphError::Cycle { ref path }) if path == &vec![ns("db.b"), ns("db.a"), ns("db.b")]
	));
	assert_eq!(err.code(), "VIEW_006");

	assert!(catalog.lookup(&mut txn, &ns("db.a")).unwrap().is_some());
	assert!(catalog.lookup(&mut txn, &ns("db.b")).unwrap().is_none());
	assert!(!store.contains(&ns("db.b")));
}

#[test]
fn test_cycle_through_pipeline_reference_is_rejected() {
	let (catalog, _store) = setup();
	create_view(&catalog, "db.a", "db.c", vec![lookup_stage("b")]);

	let mut txn = CommandTransaction::new();
	let err = catalog.create_view(&mut txn, &ns("db.b"), &ns("db.a"), vec![]).unwrap_err();
	assert_eq!(err.code(), "VIEW_006");

	let err = catalog
		.create_view(&mut txn, &ns("db.self_ref"), &ns("db.c"), vec![lookup_stage("self_ref")])
		.unwrap_err();
	assert_eq!(err.code(), "VIEW_006");
}

#[test]
fn test_depth_limit_building_downwards() {
	let (catalog, _store) = setup();
	for level in 1..=MAX_VIEW_DEPTH {
		create_view(&catalog, &format!("db.v{}", level), &format!("db.v{}", level + 1), vec![match_stage(level as i64)]);
	}

	let mut txn = CommandTransaction::new();
	let err = catalog.create_view(&mut txn, &ns("db.v21"), &ns("db.v22"), vec![]).unwrap_err();
	assert!(matches!(
		err,
		CatalogError::Graph(GraphError::DepthExceeded { ref view, max_depth }) if view == &ns("db.v21") && max_depth == MAX_VIEW_DEPTH
	));
	assert_eq!(err.code(), "VIEW_007");

	let err = catalog.create_view(&mut txn, &ns("db.v0"), &ns("db.v1"), vec![]).unwrap_err();
	assert_eq!(err.code(), "VIEW_007");

	assert_eq!(catalog.list_views(&mut txn).unwrap().len(), MAX_VIEW_DEPTH);
}

#[test]
fn test_depth_limit_building_upwards() {
	let (catalog, _store) = setup();
	for level in (1..=MAX_VIEW_DEPTH).rev() {
		create_view(&catalog, &format!("db.v{}", level), &format!("db.v{}", level + 1), vec![match_stage(level as i64)]);
	}

	let mut txn = CommandTransaction::new();
	let err = catalog.create_view(&mut txn, &ns("db.v0"), &ns("db.v1"), vec![]).unwrap_err();
	assert_eq!(err.code(), "VIEW_007");

	// a second, shallower branch on the same base is fine
	catalog.create_view(&mut txn, &ns("db.side"), &ns("db.v2"), vec![]).unwrap();
	txn.commit();
}

#[test]
fn test_create_rollback() {
	let (catalog, store) = setup();

	let mut txn = CommandTransaction::new();
	catalog.create_view(&mut txn, &ns("db.v"), &ns("db.c"), vec![match_stage(1)]).unwrap();
	txn.rollback();

	let mut txn = CommandTransaction::new();
	assert!(catalog.lookup(&mut txn, &ns("db.v")).unwrap().is_none());
	assert!(store.is_empty());

	// the rolled back edge v -> c must not survive in the graph
	catalog.create_view(&mut txn, &ns("db.c"), &ns("db.v"), vec![]).unwrap();
	txn.commit();
}

#[test]
fn test_dropped_transaction_rolls_back_create() {
	let (catalog, store) = setup();
	{
		let mut txn = CommandTransaction::new();
		catalog.create_view(&mut txn, &ns("db.v"), &ns("db.c"), vec![]).unwrap();
	}

	let mut txn = CommandTransaction::new();
	assert!(catalog.lookup(&mut txn, &ns("db.v")).unwrap().is_none());
	assert!(store.is_empty());
}

#[test]
fn test_store_failure_leaves_catalog_untouched() {
	let (catalog, store) = setup();
	create_view(&catalog, "db.a", "db.c", vec![]);

	store.fail_next_upsert("disk full");
	let mut txn = CommandTransaction::new();
	let err = catalog.create_view(&mut txn, &ns("db.b"), &ns("db.a"), vec![]).unwrap_err();
	assert!(matches!(err, CatalogError::Store(_)));
	assert_eq!(err.code(), "STORE_001");
	assert!(catalog.lookup(&mut txn, &ns("db.b")).unwrap().is_none());
	assert!(!store.contains(&ns("db.b")));

	// the graph is rebuilt, so the phantom edge b -> a is gone
	catalog.create_view(&mut txn, &ns("db.c"), &ns("db.b"), vec![]).unwrap();
	txn.commit();
}

#[test]
fn test_invalid_pipeline_is_rejected() {
	let (catalog, store) = setup();
	let mut txn = CommandTransaction::new();

	let err = catalog
		.create_view(&mut txn, &ns("db.v"), &ns("db.c"), vec![json!({"$match": {}}), json!({"$collStats": {}})])
		.unwrap_err();
	assert!(matches!(err, CatalogError::Pipeline(_)));
	assert_eq!(err.code(), "PIPELINE_005");
	assert!(store.is_empty());
}

#[test]
fn test_collection_name_may_contain_dots() {
	let (catalog, store) = setup();
	create_view(&catalog, "db.with.dots", "db.c", vec![]);

	let mut txn = CommandTransaction::new();
	let view = catalog.lookup(&mut txn, &ns("db.with.dots")).unwrap().unwrap();
	assert_eq!(view.name().coll(), "with.dots");
	assert!(store.contains(&Namespace::new("db", "with.dots")));
}
