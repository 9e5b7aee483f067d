#[cfg(test)]
mod tests {
    use ecotech::commands::session::{report, MainAction};
    use ecotech::db::users::Role;
    use ecotech::libs::error::{AppError, DbError, ServiceError};
    use ecotech::libs::messages::Message;
    use std::path::PathBuf;

    #[test]
    fn test_menu_per_role() {
        let admin = MainAction::for_role(Role::Admin);
        assert!(admin.contains(&MainAction::Users));
        assert_eq!(admin.last(), Some(&MainAction::Logout));

        let hr = MainAction::for_role(Role::Hr);
        assert!(!hr.contains(&MainAction::Users));
        assert!(hr.contains(&MainAction::Employees));
        assert!(hr.contains(&MainAction::Departments));

        let employee = MainAction::for_role(Role::Employee);
        for staff_only in [
            MainAction::Employees,
            MainAction::Departments,
            MainAction::Projects,
            MainAction::Users,
        ] {
            assert!(!employee.contains(&staff_only), "{staff_only} is staff only");
        }
        assert!(employee.contains(&MainAction::Indicators));
        assert!(employee.contains(&MainAction::RegisterHours));
        assert!(employee.contains(&MainAction::ChangePassword));
    }

    #[test]
    fn test_domain_errors_keep_the_menu_running() {
        assert!(report(AppError::Validation(Message::InvalidHours(25.0)).into()).is_ok());
        assert!(report(AppError::not_found("project", 4).into()).is_ok());
        assert!(report(AppError::ExternalService(ServiceError::Timeout).into()).is_ok());
        assert!(report(AppError::Forbidden(Message::AdminOnly).into()).is_ok());
    }

    #[test]
    fn test_fatal_errors_end_the_session() {
        let unavailable = AppError::Storage(DbError::Unavailable {
            primary: PathBuf::from("/nonexistent/ecotech.db"),
            fallback: "none".to_string(),
            source: Box::new(DbError::Open {
                path: PathBuf::from("/nonexistent/ecotech.db"),
                reason: "unable to open database file".to_string(),
            }),
        });
        assert!(report(unavailable.into()).is_err());
        assert!(report(anyhow::anyhow!("terminal closed")).is_err());
    }

    #[test]
    fn test_messages_render() {
        assert_eq!(
            Message::InvalidHours(25.0).to_string(),
            "Hours must be greater than 0 and at most 24, got 25"
        );
        assert!(Message::UnknownIndicator("xyz".to_string()).to_string().contains("uf, ivp, dolar"));
        assert_eq!(Message::NoIndicatorQueriesInMonth(2025, 3).to_string(), "No indicator lookups in 2025-03");
        assert_eq!(
            AppError::InUse {
                entity: "department",
                id: 2,
                dependents: 3
            }
            .to_string(),
            "department #2 still has 3 dependent record(s)"
        );
    }
}
