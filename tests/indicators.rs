#[cfg(test)]
mod tests {
    use chrono::{Datelike, Local, NaiveDate, Utc};
    use ecotech::db::db::{DatabaseConfig, Db};
    use ecotech::db::indicator_queries::IndicatorQueries;
    use ecotech::db::indicators::{EconomicIndicators, DEFAULT_RETENTION_DAYS};
    use ecotech::db::schema;
    use ecotech::db::users::Users;
    use ecotech::libs::error::AppError;
    use ecotech::libs::indicator::{IndicatorCode, DEFAULT_SOURCE};
    use ecotech::libs::messages::Message;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct IndicatorTestContext {
        db: Db,
        _temp_dir: TempDir,
        admin_id: i64,
        employee_id: i64,
    }

    impl TestContext for IndicatorTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(DatabaseConfig::at(temp_dir.path().join("ecotech.db"))).unwrap();
            schema::initialize(&db).unwrap();

            let users = Users::new(&db);
            let admin_id = users.find_by_username("admin").unwrap().unwrap().id;
            let employee_id = users.find_by_username("empleado1").unwrap().unwrap().id;

            IndicatorTestContext {
                db,
                _temp_dir: temp_dir,
                admin_id,
                employee_id,
            }
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_code_parsing() {
        assert_eq!("UF".parse::<IndicatorCode>().unwrap(), IndicatorCode::Uf);
        assert_eq!(" dolar ".parse::<IndicatorCode>().unwrap(), IndicatorCode::Dolar);
        assert!(matches!(
            "xyz".parse::<IndicatorCode>(),
            Err(AppError::Validation(Message::UnknownIndicator(code))) if code == "xyz"
        ));
        for code in IndicatorCode::ALL {
            assert_eq!(code.as_str().parse::<IndicatorCode>().unwrap(), code);
        }
    }

    #[test_context(IndicatorTestContext)]
    #[test]
    fn test_save_is_an_upsert(ctx: &mut IndicatorTestContext) {
        let indicators = EconomicIndicators::new(&ctx.db);
        let day = date(2025, 1, 1);

        indicators.save(IndicatorCode::Dolar, day, 950.1234, None).unwrap();
        let stored = indicators.get(IndicatorCode::Dolar, day).unwrap().unwrap();
        assert_eq!(stored.value, 950.1234);
        assert_eq!(stored.name, "Dólar Observado");
        assert_eq!(stored.source, DEFAULT_SOURCE);

        indicators.save(IndicatorCode::Dolar, day, 950.1234, None).unwrap();
        assert_eq!(indicators.stats().unwrap().total, 1, "saving again does not duplicate");
        assert_eq!(indicators.get(IndicatorCode::Dolar, day).unwrap().unwrap().value, 950.1234);

        indicators.save(IndicatorCode::Dolar, day, 951.0, Some("manual")).unwrap();
        let stored = indicators.get(IndicatorCode::Dolar, day).unwrap().unwrap();
        assert_eq!(stored.value, 951.0);
        assert_eq!(stored.source, "manual");
        assert_eq!(indicators.stats().unwrap().total, 1);
    }

    #[test_context(IndicatorTestContext)]
    #[test]
    fn test_values_rounded_to_four_decimals(ctx: &mut IndicatorTestContext) {
        let indicators = EconomicIndicators::new(&ctx.db);
        indicators.save(IndicatorCode::Uf, date(2025, 2, 1), 38_512.123456, None).unwrap();

        let stored = indicators.get(IndicatorCode::Uf, date(2025, 2, 1)).unwrap().unwrap();
        assert!((stored.value - 38_512.1235).abs() < 1e-9);

        assert!(matches!(
            indicators.save(IndicatorCode::Uf, date(2025, 2, 1), f64::INFINITY, None),
            Err(AppError::Validation(Message::InvalidIndicatorValue(_)))
        ));
    }

    #[test_context(IndicatorTestContext)]
    #[test]
    fn test_history_and_latest(ctx: &mut IndicatorTestContext) {
        let indicators = EconomicIndicators::new(&ctx.db);
        indicators.save(IndicatorCode::Uf, date(2025, 1, 1), 38_400.0, None).unwrap();
        indicators.save(IndicatorCode::Uf, date(2025, 1, 3), 38_420.0, None).unwrap();
        indicators.save(IndicatorCode::Uf, date(2025, 1, 2), 38_410.0, None).unwrap();
        indicators.save(IndicatorCode::Euro, date(2024, 12, 30), 1_030.5, None).unwrap();

        let history: Vec<NaiveDate> = indicators
            .history(IndicatorCode::Uf, 2)
            .unwrap()
            .into_iter()
            .map(|i| i.date)
            .collect();
        assert_eq!(history, vec![date(2025, 1, 3), date(2025, 1, 2)]);

        assert_eq!(indicators.latest(IndicatorCode::Uf).unwrap().unwrap().value, 38_420.0);
        assert!(indicators.latest(IndicatorCode::Bitcoin).unwrap().is_none());

        let latest = indicators.latest_per_code().unwrap();
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].code, IndicatorCode::Euro);
        assert_eq!(latest[1].code, IndicatorCode::Uf);
        assert_eq!(latest[1].date, date(2025, 1, 3));

        let stats = indicators.stats().unwrap();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.distinct_codes, 2);
        assert!(stats.last_update.is_some());
    }

    #[test_context(IndicatorTestContext)]
    #[test]
    fn test_purge_keeps_recent_values(ctx: &mut IndicatorTestContext) {
        let indicators = EconomicIndicators::new(&ctx.db);
        indicators.save(IndicatorCode::Utm, date(2000, 1, 1), 27_000.0, None).unwrap();
        indicators.save(IndicatorCode::Utm, Local::now().date_naive(), 68_000.0, None).unwrap();

        assert_eq!(indicators.purge_older_than(DEFAULT_RETENTION_DAYS).unwrap(), 1);
        assert_eq!(indicators.stats().unwrap().total, 1);
        assert_eq!(indicators.purge_older_than(DEFAULT_RETENTION_DAYS).unwrap(), 0);
    }

    #[test_context(IndicatorTestContext)]
    #[test]
    fn test_query_audit(ctx: &mut IndicatorTestContext) {
        let queries = IndicatorQueries::new(&ctx.db);
        queries.record(ctx.admin_id, IndicatorCode::Dolar, date(2025, 1, 2), 950.0, true).unwrap();
        queries.record(ctx.admin_id, IndicatorCode::Dolar, date(2025, 1, 3), 960.0, false).unwrap();
        let last = queries.record(ctx.admin_id, IndicatorCode::Uf, date(2025, 1, 3), 38_420.0, false).unwrap();
        queries.record(ctx.employee_id, IndicatorCode::Dolar, date(2025, 1, 3), 960.0, false).unwrap();

        let mine = queries.list_for_user(ctx.admin_id, 2).unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].id, last);
        assert!(mine.iter().all(|q| q.user_id == ctx.admin_id));

        let stats = queries.stats_for_user(ctx.admin_id).unwrap();
        assert_eq!(stats[0].code, IndicatorCode::Dolar);
        assert_eq!(stats[0].queries, 2);
        assert_eq!(stats[0].saved, 1);
        assert_eq!(stats[0].average_value, 955.0);
        assert_eq!(stats[1].code, IndicatorCode::Uf);

        let top = queries.top_global(1).unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].code, IndicatorCode::Dolar);
        assert_eq!(top[0].queries, 3);
        assert_eq!(top[0].users, 2);

        assert_eq!(queries.total_today().unwrap(), 4);
    }

    #[test_context(IndicatorTestContext)]
    #[test]
    fn test_monthly_summary(ctx: &mut IndicatorTestContext) {
        let queries = IndicatorQueries::new(&ctx.db);
        queries.record(ctx.employee_id, IndicatorCode::Ipc, date(2025, 1, 1), 0.4, false).unwrap();

        // Audit rows are stamped by the database in UTC.
        let now = Utc::now();
        let summary = queries.monthly_summary(ctx.employee_id, now.year(), now.month()).unwrap();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].code, IndicatorCode::Ipc);

        assert!(queries.monthly_summary(ctx.employee_id, 1999, 1).unwrap().is_empty());
        assert!(queries.monthly_summary(ctx.admin_id, now.year(), now.month()).unwrap().is_empty());
    }

    #[test_context(IndicatorTestContext)]
    #[test]
    fn test_queries_go_with_the_user(ctx: &mut IndicatorTestContext) {
        let queries = IndicatorQueries::new(&ctx.db);
        queries.record(ctx.employee_id, IndicatorCode::Euro, date(2025, 1, 2), 1_030.0, false).unwrap();

        Users::new(&ctx.db).delete(ctx.employee_id).unwrap();

        assert!(queries.list_for_user(ctx.employee_id, 10).unwrap().is_empty());
    }
}
