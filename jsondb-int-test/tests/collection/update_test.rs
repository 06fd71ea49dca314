use jsondb::collection::WriteResult;
use jsondb::doc;
use jsondb::errors::ErrorKind;
use jsondb_int_test::test_util::{cleanup, create_test_context, insert_test_documents, run_test};

#[test]
fn test_update_one_replaces_document() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(ctx.db_mut())?;
            let result = ctx
                .db_mut()
                .update_one(&doc! { first_name: "fn1" }, doc! { first_name: "fn1", age: 35 })?;
            assert_eq!(result, WriteResult::updated(1, 1));

            let updated = ctx.db().find_one(&doc! { first_name: "fn1" }, false)?;
            assert_eq!(updated, doc! { first_name: "fn1", age: 35 });
            assert!(!updated.contains_key("last_name"));
            assert_eq!(ctx.db().count()?, 3);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_one_touches_only_first_match() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(ctx.db_mut())?;
            let result = ctx
                .db_mut()
                .update_one(&doc! { last_name: "ln2" }, doc! { last_name: "changed" })?;
            assert_eq!(result.matched_count(), 1);
            assert_eq!(result.updated_count(), 1);

            assert_eq!(ctx.db().find(&doc! { last_name: "ln2" }, false)?.count(), 1);
            let all = ctx.db().find(&doc! {}, false)?;
            assert_eq!(all.get(1), Some(&doc! { last_name: "changed" }));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_one_without_match() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(ctx.db_mut())?;
            let before = ctx.db().find(&doc! {}, false)?;
            let result = ctx.db_mut().update_one(&doc! { age: 99 }, doc! { age: 100 })?;
            assert_eq!(result, WriteResult::updated(0, 0));
            assert_eq!(ctx.db().find(&doc! {}, false)?, before);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_many_scenario() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db_mut();
            db.insert_many(vec![doc! { a: 2 }, doc! { a: 2 }, doc! { a: 5 }])?;
            let result = db.update_many(&doc! { a: 2 }, doc! { a: 99 })?;
            assert_eq!(result.matched_count(), 2);
            assert_eq!(result.updated_count(), 2);

            let all = db.find(&doc! {}, false)?.into_vec();
            assert_eq!(all, vec![doc! { a: 99 }, doc! { a: 99 }, doc! { a: 5 }]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_many_with_comparison() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(ctx.db_mut())?;
            let result = ctx
                .db_mut()
                .update_many(&doc! { "$gte": { age: 34 } }, doc! { senior: true })?;
            assert_eq!(result, WriteResult::updated(2, 2));
            assert_eq!(ctx.db().find(&doc! { senior: true }, false)?.count(), 2);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_many_replacement_matching_condition() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db_mut();
            db.insert_many(vec![doc! { a: 1 }, doc! { a: 2 }, doc! { a: 8 }])?;

            // the replacement still satisfies the condition
            let result = db.update_many(&doc! { "$lt": { a: 5 } }, doc! { a: 0 })?;
            assert_eq!(result, WriteResult::updated(2, 2));

            let all = db.find(&doc! {}, false)?.into_vec();
            assert_eq!(all, vec![doc! { a: 0 }, doc! { a: 0 }, doc! { a: 8 }]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_many_with_empty_condition() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(ctx.db_mut())?;
            let result = ctx.db_mut().update_many(&doc! {}, doc! { reset: true })?;
            assert_eq!(result, WriteResult::updated(3, 3));
            assert_eq!(ctx.db().find(&doc! { reset: true }, false)?.count(), 3);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_with_invalid_condition() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(ctx.db_mut())?;
            let err = ctx
                .db_mut()
                .update_many(&doc! { "$ne": { age: 1 } }, doc! { a: 1 })
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::UnsupportedOperator);
            assert_eq!(ctx.db().find(&doc! { a: 1 }, false)?.count(), 0);
            Ok(())
        },
        cleanup,
    )
}
