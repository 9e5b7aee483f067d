use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // === SESSION MESSAGES ===
    Welcome(String, String),
    LoggedOut(String),
    LoginFailed(u32),
    LoginLocked,
    LoginSessionClosed,
    AdminOnly,

    // === VALIDATION MESSAGES ===
    InvalidRole(String),
    UsernameRequired,
    UsernameTaken(String),
    PasswordTooShort(usize),
    PasswordsDoNotMatch,
    WrongCurrentPassword,
    PrimaryAdminProtected,
    CannotDeleteSelf,
    InvalidEmail(String),
    EmployeeNameRequired,
    InvalidSalary(f64),
    DepartmentNameRequired,
    ProjectNameRequired,
    InvalidProjectStatus(String),
    InvalidHours(f64),
    HoursBelowPrecision(f64),
    UnknownIndicator(String),
    InvalidIndicatorValue(f64),
    InvalidDate(String),
    InvalidMonth(String),
    InvalidNumber(String),

    // === DATABASE MESSAGES ===
    DatabaseReady(String),
    DatabaseFallback(String),
    DatabaseResetting,
    SeedAccountsHeader,

    // === CONFIG MESSAGES ===
    ConfigSaved,
    ConfigModuleDatabase,
    ConfigModuleIndicators,

    // === MENU TITLES ===
    MenuMain,
    MenuEmployees,
    MenuDepartments,
    MenuProjects,
    MenuIndicators,
    MenuReports,
    MenuUsers,
    MenuCancel,

    // === EMPTY RESULTS ===
    NoEmployees,
    NoEmployeesMatching(String),
    NoDepartments,
    NoProjects,
    NoUsers,
    NoTimeEntries,
    NoEmployeeRecord(String),
    NoIndicatorQueries,
    NoIndicatorQueriesInMonth(i32, u32),
    NoSavedIndicators,
    ProjectWithoutMembers(String),
    EmployeeWithoutProjects(String),

    // === EMPLOYEE MESSAGES ===
    EmployeeCreated(String, i64),
    EmployeeUpdated(i64),
    EmployeeDeleted(String),
    EmployeeHasTimeEntries(String, i64),

    // === DEPARTMENT MESSAGES ===
    DepartmentCreated(String, i64),
    DepartmentUpdated(i64),
    DepartmentDeleted(i64),

    // === PROJECT MESSAGES ===
    ProjectCreated(String, i64),
    ProjectUpdated(i64),
    ProjectDeleted(String),
    ProjectHasMembers(String, i64),
    EmployeeAssigned(String, String),
    EmployeeAlreadyAssigned(String, String),
    AssignmentRejected(String),
    EmployeeUnassigned(String, String),
    EmployeeNotAssigned(String, String),
    TeamCleared(String, usize),

    // === HOURS MESSAGES ===
    HoursRecorded(String, String, String),

    // === INDICATOR MESSAGES ===
    IndicatorSaved(String, NaiveDate),
    IndicatorNoValue(String, Option<NaiveDate>),
    IndicatorStorageStats(i64, i64, String),
    IndicatorsPurged(usize, usize),

    // === REPORT MESSAGES ===
    ReportTopIndicators(u32),
    ReportGlobalStats,

    // === USER MESSAGES ===
    UserCreated(String, i64),
    UserRoleChanged(String, String),
    UserDeleted(String),
    PasswordChanged(String),

    // === PROMPTS ===
    PromptUsername,
    PromptPassword,
    PromptCurrentPassword,
    PromptNewPassword,
    PromptConfirmPassword,
    PromptSelectRole,
    PromptSelectUser,
    PromptSelectModules,
    PromptDatabasePath,
    PromptDatabaseFallback,
    PromptIndicatorUrl,
    PromptIndicatorTimeout,
    PromptSearchName,
    PromptEmployeeName,
    PromptEmail,
    PromptAddress,
    PromptPhone,
    PromptHireDate,
    PromptSalary,
    PromptAssignDepartmentNow,
    PromptSelectDepartment,
    PromptRemoveFromDepartment,
    PromptSelectEmployee,
    PromptDepartmentName,
    PromptAssignManagerNow,
    PromptSelectManager,
    PromptProjectName,
    PromptProjectDescription,
    PromptStartDate,
    PromptStartDateKeep,
    PromptProjectStatus,
    PromptSelectProject,
    PromptConfirmClearTeam(String),
    PromptWorkDate,
    PromptHours,
    PromptWorkDescription,
    PromptDateFrom,
    PromptDateTo,
    PromptSelectIndicator,
    PromptIndicatorDate,
    PromptSaveIndicator,
    PromptMonth,
    PromptConfirmPurge(u32, u32),
    PromptConfirmDelete,
}
