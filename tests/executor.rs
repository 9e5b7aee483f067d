#[cfg(test)]
mod tests {
    use ecotech::db::db::{DatabaseConfig, Db};
    use ecotech::db::executor::{truncate_sql, SQL_DIAGNOSTIC_LEN};
    use ecotech::libs::error::{AppError, DbError};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    const CREATE_NOTES: &str = "CREATE TABLE notes (id INTEGER PRIMARY KEY, title TEXT NOT NULL UNIQUE)";
    const INSERT_NOTE: &str = "INSERT INTO notes (title) VALUES (?1)";
    const INSERT_NOTE_OR_IGNORE: &str = "INSERT OR IGNORE INTO notes (title) VALUES (?1)";
    const COUNT_NOTES: &str = "SELECT COUNT(*) FROM notes";

    struct ExecutorTestContext {
        db: Db,
        _temp_dir: TempDir,
    }

    impl TestContext for ExecutorTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(DatabaseConfig::at(temp_dir.path().join("executor.db"))).unwrap();
            db.execute_script(CREATE_NOTES).unwrap();
            ExecutorTestContext { db, _temp_dir: temp_dir }
        }
    }

    impl ExecutorTestContext {
        fn count(&self) -> i64 {
            self.db.query_one(COUNT_NOTES, [], |row| row.get(0)).unwrap().unwrap()
        }
    }

    #[test_context(ExecutorTestContext)]
    #[test]
    fn test_reads_on_empty_table(ctx: &mut ExecutorTestContext) {
        let titles: Vec<String> = ctx.db.query_many("SELECT title FROM notes", [], |row| row.get(0)).unwrap();
        assert!(titles.is_empty());

        let first: Option<String> = ctx
            .db
            .query_one("SELECT title FROM notes WHERE id = ?1", [1], |row| row.get(0))
            .unwrap();
        assert!(first.is_none());
    }

    #[test_context(ExecutorTestContext)]
    #[test]
    fn test_write_outcome(ctx: &mut ExecutorTestContext) {
        let first = ctx.db.execute_write(INSERT_NOTE, ["standup"]).unwrap();
        assert_eq!(first.rows_affected, 1);
        assert_eq!(first.inserted_id(), Some(1));

        let second = ctx.db.execute_write(INSERT_NOTE, ["retro"]).unwrap();
        assert_eq!(second.inserted_id(), Some(2));

        let ignored = ctx.db.execute_write(INSERT_NOTE_OR_IGNORE, ["retro"]).unwrap();
        assert_eq!(ignored.rows_affected, 0);
        assert_eq!(ignored.inserted_id(), None);

        let updated = ctx
            .db
            .execute_write("UPDATE notes SET title = title || '!'", [])
            .unwrap();
        assert_eq!(updated.rows_affected, 2);
    }

    #[test_context(ExecutorTestContext)]
    #[test]
    fn test_failed_statement_is_reported(ctx: &mut ExecutorTestContext) {
        ctx.db.execute_write(INSERT_NOTE, ["standup"]).unwrap();

        match ctx.db.execute_write(INSERT_NOTE, ["standup"]) {
            Err(DbError::Query { sql, .. }) => assert!(sql.starts_with("INSERT INTO notes")),
            other => panic!("expected a query error, got {other:?}"),
        }
        assert_eq!(ctx.count(), 1);
    }

    #[test_context(ExecutorTestContext)]
    #[test]
    fn test_failure_rolls_back_open_transaction(ctx: &mut ExecutorTestContext) {
        ctx.db.execute_script("BEGIN").unwrap();
        ctx.db.execute_write(INSERT_NOTE, ["draft"]).unwrap();

        assert!(ctx.db.execute_write("INSERT INTO missing_table VALUES (1)", []).is_err());

        assert_eq!(ctx.count(), 0, "the pending insert is rolled back with the failure");
        // Autocommit is back: a plain write persists.
        ctx.db.execute_write(INSERT_NOTE, ["final"]).unwrap();
        assert_eq!(ctx.count(), 1);
    }

    #[test_context(ExecutorTestContext)]
    #[test]
    fn test_transaction_commits_or_rolls_back(ctx: &mut ExecutorTestContext) {
        let id = ctx
            .db
            .transaction(|tx| {
                tx.execute(INSERT_NOTE, ["one"]).unwrap();
                tx.execute(INSERT_NOTE, ["two"]).unwrap();
                Ok(tx.last_insert_rowid())
            })
            .unwrap();
        assert_eq!(id, 2);
        assert_eq!(ctx.count(), 2);

        let result: Result<(), AppError> = ctx.db.transaction(|tx| {
            tx.execute(INSERT_NOTE, ["three"]).unwrap();
            Err(AppError::not_found("note", 3))
        });
        assert!(matches!(result, Err(AppError::NotFound { entity: "note", id: 3 })));
        assert_eq!(ctx.count(), 2);
    }

    #[test]
    fn test_truncate_sql() {
        assert_eq!(truncate_sql("SELECT  *\n   FROM notes"), "SELECT * FROM notes");

        let long = format!("SELECT {} FROM notes", vec!["title"; 50].join(", "));
        let cut = truncate_sql(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), SQL_DIAGNOSTIC_LEN + 3);
    }
}
