// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use viewdb_catalog::{
	CatalogError, ViewCatalogConfig,
	test_utils::{create_view, document, match_stage, ns, setup, setup_with_config},
};
use viewdb_transaction::CommandTransaction;
use viewdb_type::Namespace;

#[test]
fn test_modify_replaces_definition() {
	let (catalog, store) = setup();
	create_view(&catalog, "db.v", "db.c", vec![match_stage(1)]);

	let mut txn = CommandTransaction::new();
	let before = catalog.lookup(&mut txn, &ns("db.v")).unwrap().unwrap();
	catalog.modify_view(&mut txn, &ns("db.v"), &ns("db.d"), vec![match_stage(2)]).unwrap();
	txn.commit();

	let mut txn = CommandTransaction::new();
	let after = catalog.lookup(&mut txn, &ns("db.v")).unwrap().unwrap();
	assert_eq!(after.view_on(), &ns("db.d"));
	assert_eq!(after.pipeline(), &[match_stage(2)]);
	assert_eq!(store.get(&ns("db.v")).unwrap(), Some(document("db.v", "d", vec![match_stage(2)])));

	// a handle taken before the modify keeps the old definition
	assert_eq!(before.view_on(), &ns("db.c"));
	assert_eq!(before.pipeline(), &[match_stage(1)]);
}

#[test]
fn test_modify_rollback_restores_previous_definition() {
	let (catalog, store) = setup();
	create_view(&catalog, "db.v", "db.c", vec![match_stage(1)]);
	let original = store.get(&ns("db.v")).unwrap();

	let mut txn = CommandTransaction::new();
	catalog.modify_view(&mut txn, &ns("db.v"), &ns("db.d"), vec![match_stage(2)]).unwrap();
	catalog.modify_view(&mut txn, &ns("db.v"), &ns("db.e"), vec![match_stage(3)]).unwrap();
	assert_eq!(catalog.lookup(&mut txn, &ns("db.v")).unwrap().unwrap().view_on(), &ns("db.e"));
	txn.rollback();

	let mut txn = CommandTransaction::new();
	let view = catalog.lookup(&mut txn, &ns("db.v")).unwrap().unwrap();
	assert_eq!(view.view_on(), &ns("db.c"));
	assert_eq!(view.pipeline(), &[match_stage(1)]);
	assert_eq!(store.get(&ns("db.v")).unwrap(), original);
}

#[test]
fn test_modify_missing_view_fails() {
	let (catalog, store) = setup();
	let mut txn = CommandTransaction::new();
	let err = catalog.modify_view(&mut txn, &ns("db.v"), &ns("db.c"), vec![]).unwrap_err();
	assert!(matches!(err, CatalogError::NamespaceNotFound(ref name) if name == &ns("db.v")));
	assert!(store.is_empty());
}

#[test]
fn test_modify_into_cycle_keeps_old_definition() {
	let (catalog, _store) = setup();
	create_view(&catalog, "db.a", "db.c", vec![]);
	create_view(&catalog, "db.b", "db.a", vec![]);

	let mut txn = CommandTransaction::new();
	let err = catalog.modify_view(&mut txn, &ns("db.a"), &ns("db.b"), vec![]).unwrap_err();
	assert_eq!(err.code(), "VIEW_006");
	assert_eq!(catalog.lookup(&mut txn, &ns("db.a")).unwrap().unwrap().view_on(), &ns("db.c"));

	// the old edge a -> c is still in place, so c on b would close a cycle
	let err = catalog.create_view(&mut txn, &ns("db.c"), &ns("db.b"), vec![]).unwrap_err();
	assert_eq!(err.code(), "VIEW_006");
}

#[test]
fn test_modify_checks_view_on() {
	let (catalog, _store) = setup();
	create_view(&catalog, "db.v", "db.c", vec![]);

	let mut txn = CommandTransaction::new();
	let err = catalog.modify_view(&mut txn, &ns("db.v"), &ns("other.c"), vec![]).unwrap_err();
	assert_eq!(err.code(), "VIEW_002");

	let err = catalog.modify_view(&mut txn, &ns("db.v"), &Namespace::new("db", "bad$c"), vec![]).unwrap_err();
	assert_eq!(err.code(), "VIEW_004");
}

#[test]
fn test_modify_allowed_with_views_disabled() {
	let (catalog, store) = setup_with_config(ViewCatalogConfig::new().with_views_enabled(false));
	store.put_raw("db.v", serde_json::to_vec(&document("db.v", "c", vec![])).unwrap());

	let mut txn = CommandTransaction::new();
	catalog.modify_view(&mut txn, &ns("db.v"), &ns("db.d"), vec![match_stage(1)]).unwrap();
	txn.commit();

	let mut txn = CommandTransaction::new();
	assert_eq!(catalog.lookup(&mut txn, &ns("db.v")).unwrap().unwrap().view_on(), &ns("db.d"));
}
