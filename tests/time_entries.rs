#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use ecotech::db::db::{DatabaseConfig, Db};
    use ecotech::db::employees::{Employees, NewEmployee};
    use ecotech::db::projects::{NewProject, Projects};
    use ecotech::db::schema;
    use ecotech::db::time_entries::{validate_hours, NewTimeEntry, TimeEntries};
    use ecotech::libs::error::AppError;
    use ecotech::libs::messages::Message;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct TimeTestContext {
        db: Db,
        _temp_dir: TempDir,
        ana: i64,
        bruno: i64,
        solar: i64,
        reciclaje: i64,
    }

    impl TestContext for TimeTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(DatabaseConfig::at(temp_dir.path().join("ecotech.db"))).unwrap();
            schema::initialize(&db).unwrap();

            let employees = Employees::new(&db);
            let ana = employees.create(NewEmployee::new("Ana Pérez", "ana@ecotech.cl")).unwrap();
            let bruno = employees.create(NewEmployee::new("Bruno Díaz", "bruno@ecotech.cl")).unwrap();

            let projects = Projects::new(&db);
            let new_project = |name: &str| NewProject {
                name: name.to_string(),
                ..Default::default()
            };
            let solar = projects.create(new_project("Solar")).unwrap();
            let reciclaje = projects.create(new_project("Reciclaje")).unwrap();

            TimeTestContext {
                db,
                _temp_dir: temp_dir,
                ana,
                bruno,
                solar,
                reciclaje,
            }
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    impl TimeTestContext {
        fn record(&self, employee_id: i64, project_id: i64, date: NaiveDate, hours: f64) -> Result<i64, AppError> {
            TimeEntries::new(&self.db).record(NewTimeEntry {
                employee_id,
                project_id,
                date,
                hours,
                description: None,
            })
        }
    }

    #[test]
    fn test_hours_bounds() {
        assert!(matches!(validate_hours(0.0), Err(AppError::Validation(Message::InvalidHours(_)))));
        assert!(validate_hours(-2.0).is_err());
        assert!(validate_hours(25.0).is_err());
        assert!(validate_hours(f64::NAN).is_err());
        assert!(matches!(validate_hours(24.001), Err(AppError::Validation(Message::InvalidHours(_)))));
        assert!(validate_hours(24.004).is_err());
        assert!(matches!(
            validate_hours(0.004),
            Err(AppError::Validation(Message::HoursBelowPrecision(_)))
        ));

        assert_eq!(validate_hours(8.5).unwrap(), 8.5);
        assert_eq!(validate_hours(24.0).unwrap(), 24.0);
        assert_eq!(validate_hours(7.333).unwrap(), 7.33);
    }

    #[test_context(TimeTestContext)]
    #[test]
    fn test_record_validates_hours(ctx: &mut TimeTestContext) {
        assert!(ctx.record(ctx.ana, ctx.solar, day(3), 0.0).is_err());
        assert!(ctx.record(ctx.ana, ctx.solar, day(3), 25.0).is_err());
        ctx.record(ctx.ana, ctx.solar, day(3), 8.5).unwrap();

        let entries = TimeEntries::new(&ctx.db).list_for_employee(ctx.ana, None, None).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].hours, 8.5);
        assert_eq!(entries[0].project_name, "Solar");
    }

    #[test_context(TimeTestContext)]
    #[test]
    fn test_record_requires_existing_ends(ctx: &mut TimeTestContext) {
        assert!(matches!(
            ctx.record(999, ctx.solar, day(3), 4.0),
            Err(AppError::NotFound { entity: "employee", id: 999 })
        ));
        assert!(matches!(
            ctx.record(ctx.ana, 999, day(3), 4.0),
            Err(AppError::NotFound { entity: "project", id: 999 })
        ));
        assert_eq!(TimeEntries::new(&ctx.db).global_stats().unwrap().entries, 0);
    }

    #[test_context(TimeTestContext)]
    #[test]
    fn test_description_is_trimmed(ctx: &mut TimeTestContext) {
        let entries = TimeEntries::new(&ctx.db);
        entries
            .record(NewTimeEntry {
                employee_id: ctx.ana,
                project_id: ctx.solar,
                date: day(4),
                hours: 2.0,
                description: Some("  Instalación de paneles  ".to_string()),
            })
            .unwrap();
        entries
            .record(NewTimeEntry {
                employee_id: ctx.ana,
                project_id: ctx.solar,
                date: day(5),
                hours: 2.0,
                description: Some("   ".to_string()),
            })
            .unwrap();

        let listed = entries.list_for_employee(ctx.ana, None, None).unwrap();
        assert_eq!(listed[0].date, day(5));
        assert_eq!(listed[0].description, None);
        assert_eq!(listed[1].description.as_deref(), Some("Instalación de paneles"));
    }

    #[test_context(TimeTestContext)]
    #[test]
    fn test_range_queries(ctx: &mut TimeTestContext) {
        ctx.record(ctx.ana, ctx.solar, day(3), 8.0).unwrap();
        ctx.record(ctx.ana, ctx.reciclaje, day(10), 4.25).unwrap();
        ctx.record(ctx.ana, ctx.solar, day(17), 6.0).unwrap();
        let entries = TimeEntries::new(&ctx.db);

        assert_eq!(entries.total_hours_for_employee(ctx.ana, None, None).unwrap(), 18.25);
        assert_eq!(entries.total_hours_for_employee(ctx.ana, Some(day(10)), None).unwrap(), 10.25);
        assert_eq!(entries.total_hours_for_employee(ctx.ana, None, Some(day(10))).unwrap(), 12.25);
        assert_eq!(
            entries.total_hours_for_employee(ctx.ana, Some(day(4)), Some(day(16))).unwrap(),
            4.25
        );
        assert_eq!(entries.total_hours_for_employee(ctx.bruno, None, None).unwrap(), 0.0);

        let dates: Vec<NaiveDate> = entries
            .list_for_employee(ctx.ana, Some(day(3)), Some(day(10)))
            .unwrap()
            .into_iter()
            .map(|e| e.date)
            .collect();
        assert_eq!(dates, vec![day(10), day(3)]);
    }

    #[test_context(TimeTestContext)]
    #[test]
    fn test_reports(ctx: &mut TimeTestContext) {
        ctx.record(ctx.ana, ctx.solar, day(3), 8.0).unwrap();
        ctx.record(ctx.ana, ctx.solar, day(4), 8.0).unwrap();
        ctx.record(ctx.bruno, ctx.solar, day(4), 4.0).unwrap();
        let entries = TimeEntries::new(&ctx.db);

        let by_employee = entries.hours_by_employee().unwrap();
        assert_eq!(by_employee.len(), 2);
        assert_eq!(by_employee[0].name, "Ana Pérez");
        assert_eq!(by_employee[0].total_hours, 16.0);
        assert_eq!(by_employee[0].entries, 2);
        assert_eq!(by_employee[0].daily_average(), 0.8);
        assert_eq!(by_employee[1].total_hours, 4.0);

        let by_project = entries.hours_by_project().unwrap();
        assert_eq!(by_project[0].name, "Solar");
        assert_eq!(by_project[0].total_hours, 20.0);
        assert_eq!(by_project[0].employees, 2);
        assert_eq!(by_project[1].name, "Reciclaje");
        assert_eq!(by_project[1].total_hours, 0.0);
        assert_eq!(by_project[1].employees, 0);

        let stats = entries.global_stats().unwrap();
        assert_eq!(stats.employees, 2);
        assert_eq!(stats.projects, 1);
        assert_eq!(stats.entries, 3);
        assert_eq!(stats.total_hours, 20.0);
        assert_eq!(stats.first_date, Some(day(3)));
        assert_eq!(stats.last_date, Some(day(4)));
        assert_eq!(stats.average_per_employee, 10.0);
    }

    #[test_context(TimeTestContext)]
    #[test]
    fn test_stats_without_entries(ctx: &mut TimeTestContext) {
        let stats = TimeEntries::new(&ctx.db).global_stats().unwrap();
        assert_eq!(stats.entries, 0);
        assert_eq!(stats.total_hours, 0.0);
        assert_eq!(stats.first_date, None);
        assert_eq!(stats.average_per_employee, 0.0);

        let by_employee = TimeEntries::new(&ctx.db).hours_by_employee().unwrap();
        assert!(by_employee.iter().all(|e| e.total_hours == 0.0 && e.entries == 0));
    }
}
