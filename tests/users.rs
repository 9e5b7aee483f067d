#[cfg(test)]
mod tests {
    use ecotech::db::db::{DatabaseConfig, Db};
    use ecotech::db::schema::{self, SEED_USERS};
    use ecotech::db::users::{Role, Users, PRIMARY_ADMIN};
    use ecotech::libs::error::AppError;
    use ecotech::libs::messages::Message;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct UserTestContext {
        db: Db,
        _temp_dir: TempDir,
        seeded: usize,
    }

    impl TestContext for UserTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(DatabaseConfig::at(temp_dir.path().join("ecotech.db"))).unwrap();
            let seeded = schema::initialize(&db).unwrap();
            UserTestContext {
                db,
                _temp_dir: temp_dir,
                seeded,
            }
        }
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_seed_accounts(ctx: &mut UserTestContext) {
        assert_eq!(ctx.seeded, SEED_USERS.len());
        assert_eq!(schema::initialize(&ctx.db).unwrap(), 0, "seeding is idempotent");

        let users = Users::new(&ctx.db);
        for (username, password, role) in SEED_USERS {
            let user = users.authenticate(username, password).unwrap().unwrap();
            assert_eq!(user.role, role);
        }
        assert_eq!(users.list().unwrap().len(), 3);
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_reset_recreates_schema(ctx: &mut UserTestContext) {
        let users = Users::new(&ctx.db);
        users.create("temporal", "temp1234", Role::Employee).unwrap();

        assert_eq!(schema::reset(&ctx.db).unwrap(), 3);
        assert!(users.find_by_username("temporal").unwrap().is_none());
        assert_eq!(users.list().unwrap().len(), 3);
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_authenticate(ctx: &mut UserTestContext) {
        let users = Users::new(&ctx.db);
        assert!(users.authenticate("admin", "admin123").unwrap().is_some());
        assert!(users.authenticate("admin", "Admin123").unwrap().is_none());
        assert!(users.authenticate("ghost", "admin123").unwrap().is_none());
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_create_validation(ctx: &mut UserTestContext) {
        let users = Users::new(&ctx.db);

        assert!(matches!(
            users.create("  ", "secreto", Role::Employee),
            Err(AppError::Validation(Message::UsernameRequired))
        ));
        assert!(matches!(
            users.create("nuevo", "abc", Role::Employee),
            Err(AppError::Validation(Message::PasswordTooShort(_)))
        ));
        match users.create(" rrhh ", "secreto", Role::Employee) {
            Err(AppError::Validation(Message::UsernameTaken(name))) => assert_eq!(name, "rrhh"),
            other => panic!("expected UsernameTaken, got {other:?}"),
        }

        let id = users.create("jperez", "secreto", Role::Hr).unwrap();
        let created = users.get(id).unwrap().unwrap();
        assert_eq!(created.username, "jperez");
        assert_eq!(created.role, Role::Hr);
        assert!(created.created_at.is_some());
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_primary_admin_is_protected(ctx: &mut UserTestContext) {
        let users = Users::new(&ctx.db);
        let admin = users.find_by_username(PRIMARY_ADMIN).unwrap().unwrap();
        assert!(admin.is_primary_admin());

        assert!(matches!(
            users.delete(admin.id),
            Err(AppError::Forbidden(Message::PrimaryAdminProtected))
        ));
        assert!(matches!(
            users.change_role(admin.id, Role::Employee),
            Err(AppError::Forbidden(Message::PrimaryAdminProtected))
        ));
        users.change_role(admin.id, Role::Admin).unwrap();
        assert!(users.get(admin.id).unwrap().is_some());
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_change_role_and_delete(ctx: &mut UserTestContext) {
        let users = Users::new(&ctx.db);
        let hr = users.find_by_username("rrhh").unwrap().unwrap();

        users.change_role(hr.id, Role::Employee).unwrap();
        assert_eq!(users.get(hr.id).unwrap().unwrap().role, Role::Employee);

        users.delete(hr.id).unwrap();
        assert!(users.get(hr.id).unwrap().is_none());
        assert!(matches!(users.delete(hr.id), Err(AppError::NotFound { entity: "user", .. })));
        assert!(matches!(users.change_role(hr.id, Role::Admin), Err(AppError::NotFound { .. })));
    }

    #[test_context(UserTestContext)]
    #[test]
    fn test_change_password(ctx: &mut UserTestContext) {
        let users = Users::new(&ctx.db);
        let employee = users.find_by_username("empleado1").unwrap().unwrap();

        assert!(matches!(
            users.change_password(employee.id, "123"),
            Err(AppError::Validation(Message::PasswordTooShort(_)))
        ));

        users.change_password(employee.id, "otraClave").unwrap();
        assert!(users.authenticate("empleado1", "empleado123").unwrap().is_none());
        assert!(users.authenticate("empleado1", "otraClave").unwrap().is_some());

        assert!(matches!(
            users.change_password(999, "otraClave"),
            Err(AppError::NotFound { entity: "user", id: 999 })
        ));
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("RRHH".parse::<Role>().unwrap(), Role::Hr);
        assert_eq!("recursos_humanos".parse::<Role>().unwrap(), Role::Hr);
        assert_eq!("employee".parse::<Role>().unwrap(), Role::Employee);
        assert!(matches!("root".parse::<Role>(), Err(AppError::Validation(Message::InvalidRole(_)))));

        assert!(Role::Admin.can_manage_staff());
        assert!(Role::Hr.can_manage_staff());
        assert!(!Role::Employee.can_manage_staff());
    }
}
