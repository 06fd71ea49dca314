use jsondb::doc;
use jsondb::errors::ErrorKind;
use jsondb_int_test::test_util::{cleanup, create_test_context, create_test_docs, insert_test_documents, run_test};

#[test]
fn test_insert_one() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db_mut();
            let result = db.insert_one(doc! { first_name: "fn1", age: 34 })?;
            assert_eq!(result.inserted_count(), 1);
            assert_eq!(result.matched_count(), 0);
            assert_eq!(db.count()?, 1);

            let all = db.find(&doc! {}, false)?;
            assert_eq!(all.first(), Some(&doc! { first_name: "fn1", age: 34 }));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_insert_many() {
    run_test(
        create_test_context,
        |ctx| {
            let result = insert_test_documents(ctx.db_mut())?;
            assert_eq!(result.inserted_count(), 3);
            assert_eq!(ctx.db().find(&doc! {}, false)?.into_vec(), create_test_docs());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_insert_keeps_order_and_duplicates() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db_mut();
            db.insert_one(doc! { a: 1 })?;
            db.insert_one(doc! { a: 2 })?;
            db.insert_one(doc! { a: 1 })?;

            let all = db.find(&doc! {}, false)?.into_vec();
            assert_eq!(all, vec![doc! { a: 1 }, doc! { a: 2 }, doc! { a: 1 }]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_insert_empty_document() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db_mut();
            let err = db.insert_one(doc! {}).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::EmptyInsert);
            assert_eq!(db.count()?, 0);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_insert_many_empty_batch() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db_mut();
            let err = db.insert_many(vec![]).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::EmptyInsert);

            let err = db.insert_many(vec![doc! { a: 1 }, doc! {}, doc! { a: 2 }]).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::EmptyInsert);
            assert_eq!(db.count()?, 0);
            assert!(!db.has_unsaved_changes());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_insert_nested_values_round_trip() {
    run_test(
        create_test_context,
        |ctx| {
            let document = doc! {
                name: "Alice",
                address: { city: "Paris", zip: "75001" },
                scores: [1, 2.5, "three", [4], { five: 5 }],
                active: true,
                nothing: (None::<i64>),
            };
            ctx.db_mut().insert_one(document.clone())?;
            ctx.reopen()?;

            assert_eq!(ctx.db().find_one(&doc! {}, false)?, document);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_insert_non_finite_number() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(ctx.db_mut())?;
            let err = ctx
                .db_mut()
                .insert_one(doc! { score: (f64::INFINITY) })
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::TypeMismatch);
            let err = ctx
                .db_mut()
                .insert_many(vec![doc! { a: 1 }, doc! { nested: { score: (f64::NAN) } }])
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::TypeMismatch);
            assert_eq!(ctx.db().count()?, create_test_docs().len());

            ctx.reopen()?;
            assert_eq!(ctx.db().count()?, create_test_docs().len());
            Ok(())
        },
        cleanup,
    )
}
