use jsondb::doc;
use jsondb::errors::ErrorKind;
use jsondb_int_test::test_util::{cleanup, create_test_context, insert_test_documents, run_test};

fn first_names(docs: &jsondb::filter::MatchResult) -> Vec<String> {
    docs.iter()
        .filter_map(|d| d.get("first_name").and_then(|v| v.as_string()).cloned())
        .collect()
}

#[test]
fn test_find_all() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(ctx.db_mut())?;
            let result = ctx.db().find(&doc! {}, false)?;
            assert_eq!(result.count(), 3);

            // the empty condition ignores inversion
            let result = ctx.db().find(&doc! {}, true)?;
            assert_eq!(result.count(), 3);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_find_by_equality() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(ctx.db_mut())?;
            let result = ctx.db().find(&doc! { last_name: "ln2" }, false)?;
            assert_eq!(first_names(&result), vec!["fn2", "fn3"]);

            let result = ctx.db().find(&doc! { last_name: "ln2", age: 19 }, false)?;
            assert_eq!(first_names(&result), vec!["fn3"]);

            let result = ctx.db().find(&doc! { data: [3, 4, 3] }, false)?;
            assert_eq!(first_names(&result), vec!["fn2"]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_find_by_comparison() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(ctx.db_mut())?;
            let db = ctx.db();
            assert_eq!(first_names(&db.find(&doc! { "$lt": { age: 34 } }, false)?), vec!["fn3"]);
            assert_eq!(
                first_names(&db.find(&doc! { "$lte": { age: 34 } }, false)?),
                vec!["fn1", "fn3"]
            );
            assert_eq!(first_names(&db.find(&doc! { "$gt": { age: 34 } }, false)?), vec!["fn2"]);
            assert_eq!(
                first_names(&db.find(&doc! { "$gte": { age: 34 } }, false)?),
                vec!["fn1", "fn2"]
            );
            assert_eq!(
                first_names(&db.find(&doc! { "$gte": { last_name: "ln2" } }, false)?),
                vec!["fn2", "fn3"]
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_find_comparison_scenario() {
    run_test(
        create_test_context,
        |ctx| {
            ctx.db_mut().insert_many(vec![doc! { a: 1 }, doc! { a: 2 }, doc! { a: 3 }])?;
            let db = ctx.db();

            let result = db.find(&doc! { "$lt": { a: 2 } }, false)?;
            assert_eq!(result.into_vec(), vec![doc! { a: 1 }]);

            let result = db.find(&doc! { "$lt": { a: 2 } }, true)?;
            assert_eq!(result.into_vec(), vec![doc! { a: 2 }, doc! { a: 3 }]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_comparison_duality() {
    run_test(
        create_test_context,
        |ctx| {
            let docs = (0..10).map(|n| doc! { n: n }).collect::<Vec<_>>();
            ctx.db_mut().insert_many(docs)?;
            let db = ctx.db();

            for threshold in [-1, 0, 4, 9, 12] {
                let gt = db.find(&doc! { "$gt": { n: threshold } }, false)?;
                let lte_inverted = db.find(&doc! { "$lte": { n: threshold } }, true)?;
                assert_eq!(gt, lte_inverted);

                let gte = db.find(&doc! { "$gte": { n: threshold } }, false)?;
                let lt_inverted = db.find(&doc! { "$lt": { n: threshold } }, true)?;
                assert_eq!(gte, lt_inverted);

                let lt = db.find(&doc! { "$lt": { n: threshold } }, false)?;
                assert_eq!(lt.count() + gte.count(), 10);
            }
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_inverse_comparison_skips_missing_field() {
    run_test(
        create_test_context,
        |ctx| {
            ctx.db_mut().insert_many(vec![doc! { a: 1 }, doc! { b: 1 }, doc! { a: 9 }])?;
            let db = ctx.db();

            let result = db.find(&doc! { "$lt": { a: 5 } }, false)?;
            assert_eq!(result.into_vec(), vec![doc! { a: 1 }]);
            let result = db.find(&doc! { "$lt": { a: 5 } }, true)?;
            assert_eq!(result.into_vec(), vec![doc! { a: 9 }]);
            Ok(())
        },
        cleanup,
    )
}

// Inverting a direct match keeps only documents that share no pair with it.
#[test]
fn test_inverse_direct_match_is_equal_on_no_key() {
    run_test(
        create_test_context,
        |ctx| {
            ctx.db_mut().insert_many(vec![
                doc! { a: 1, b: 2 },
                doc! { a: 1, b: 3 },
                doc! { a: 5, b: 5 },
                doc! { c: 1 },
            ])?;

            let result = ctx.db().find(&doc! { a: 1, b: 2 }, true)?;
            assert_eq!(result.into_vec(), vec![doc! { a: 5, b: 5 }, doc! { c: 1 }]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_find_one() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(ctx.db_mut())?;
            let found = ctx.db().find_one(&doc! { last_name: "ln2" }, false)?;
            assert_eq!(found.get("first_name").and_then(|v| v.as_string()).map(String::as_str), Some("fn2"));

            let found = ctx.db().find_one(&doc! { last_name: "ln2" }, true)?;
            assert_eq!(found.get("first_name").and_then(|v| v.as_string()).map(String::as_str), Some("fn1"));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_find_one_not_found() {
    run_test(
        create_test_context,
        |ctx| {
            let err = ctx.db().find_one(&doc! {}, false).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::NotFound);

            insert_test_documents(ctx.db_mut())?;
            let err = ctx.db().find_one(&doc! { "$gt": { age: 100 } }, false).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::NotFound);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_find_invalid_conditions() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(ctx.db_mut())?;
            let db = ctx.db();

            let err = db.find(&doc! { "$regex": { first_name: "fn" } }, false).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::UnsupportedOperator);

            let err = db.find(&doc! { "$lt": { age: 30 }, last_name: "ln1" }, false).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::TypeMismatch);

            let err = db.find(&doc! { "$lt": 30 }, false).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::TypeMismatch);

            let err = db.find(&doc! { "$lt": { age: [30] } }, false).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::IncomparableTypes);

            // a string field against a numeric threshold
            let err = db.find(&doc! { "$lt": { first_name: 30 } }, false).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::IncomparableTypes);
            Ok(())
        },
        cleanup,
    )
}
