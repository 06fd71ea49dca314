use jsondb::collection::Document;
use jsondb::doc;
use jsondb::errors::{ErrorKind, JsonDbResult};
use jsondb_int_test::test_util::{
    cleanup, create_test_context, create_test_docs, insert_test_documents, run_test, USES_FILE_STORE,
};

#[test]
fn test_context_uses_selected_store() {
    run_test(
        create_test_context,
        |ctx| {
            assert_eq!(ctx.path().is_some(), USES_FILE_STORE);
            ctx.db_mut().insert_one(doc! { a: 1 })?;
            ctx.db_mut().commit()?;
            if let Some(path) = ctx.path() {
                assert!(path.exists());
            }
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_close_and_reopen_round_trip() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(ctx.db_mut())?;
            ctx.db_mut().update_one(&doc! { first_name: "fn3" }, doc! { first_name: "fn3", age: 20 })?;
            let before = ctx.db().find(&doc! {}, false)?;

            ctx.db_mut().close()?;
            ctx.reopen()?;
            assert_eq!(ctx.db().find(&doc! {}, false)?, before);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_commit_and_rollback() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(ctx.db_mut())?;
            ctx.db_mut().commit()?;
            assert!(!ctx.db().has_unsaved_changes());

            ctx.db_mut().delete_many(&doc! {})?;
            ctx.db_mut().insert_one(doc! { temp: true })?;
            assert!(ctx.db().has_unsaved_changes());

            ctx.db_mut().rollback()?;
            assert_eq!(ctx.db().find(&doc! {}, false)?.into_vec(), create_test_docs());
            assert!(!ctx.db().has_unsaved_changes());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_rollback_without_commit_restores_opened_state() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(ctx.db_mut())?;
            ctx.db_mut().rollback()?;
            assert_eq!(ctx.db().count()?, 0);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_flush_persists() {
    run_test(
        create_test_context,
        |ctx| {
            ctx.db_mut().insert_one(doc! { a: 1 })?;
            ctx.db_mut().flush()?;
            ctx.db_mut().insert_one(doc! { a: 2 })?;
            ctx.db_mut().rollback()?;
            assert_eq!(ctx.db().find(&doc! {}, false)?.into_vec(), vec![doc! { a: 1 }]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_drop_persists_open_connection() {
    run_test(
        create_test_context,
        |ctx| {
            ctx.db_mut().insert_one(doc! { kept: "on drop" })?;
            assert!(ctx.db().has_unsaved_changes());
            ctx.drop_and_reopen()?;
            assert_eq!(ctx.db().find_one(&doc! {}, false)?, doc! { kept: "on drop" });
            Ok(())
        },
        cleanup,
    )
}

fn expect_closed<T: std::fmt::Debug>(result: JsonDbResult<T>) {
    let err = result.unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::ClosedConnection);
}

#[test]
fn test_closed_connection_guard() {
    run_test(
        create_test_context,
        |ctx| {
            insert_test_documents(ctx.db_mut())?;
            ctx.db_mut().close()?;
            assert!(ctx.db().is_closed());

            let db = ctx.db_mut();
            expect_closed(db.find(&doc! {}, false));
            expect_closed(db.find_one(&doc! {}, false));
            expect_closed(db.insert_one(doc! { a: 1 }));
            expect_closed(db.insert_many(vec![doc! { a: 1 }]));
            expect_closed(db.update_one(&doc! {}, doc! { a: 1 }));
            expect_closed(db.update_many(&doc! {}, doc! { a: 1 }));
            expect_closed(db.delete_one(&doc! {}));
            expect_closed(db.delete_many(&doc! {}));
            expect_closed(db.commit());
            expect_closed(db.flush());
            expect_closed(db.rollback());
            expect_closed(db.close());
            expect_closed(db.count());

            // nothing reached the store while closed
            ctx.reopen()?;
            assert_eq!(ctx.db().find(&doc! {}, false)?.into_vec(), create_test_docs());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_closed_connection_find_one_precedes_not_found() {
    run_test(
        create_test_context,
        |ctx| {
            ctx.db_mut().close()?;
            let err = ctx.db().find_one(&doc! {}, false).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::ClosedConnection);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_insert_then_find_contains_document() {
    run_test(
        create_test_context,
        |ctx| {
            let samples: Vec<Document> = (0..25)
                .map(|i| doc! { seq: i, even: (i % 2 == 0), label: (format!("item-{}", i)) })
                .collect();
            for (count, sample) in samples.iter().enumerate() {
                ctx.db_mut().insert_one(sample.clone())?;
                assert_eq!(ctx.db().count()?, count + 1);
                assert!(ctx.db().find(&doc! {}, false)?.iter().any(|d| d == sample));
            }
            Ok(())
        },
        cleanup,
    )
}
