//! User-facing text for every [`Message`].
//!
//! All wording lives here so the rest of the code only deals with typed
//! variants and their parameters.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === SESSION MESSAGES ===
            Message::Welcome(user, role) => format!("Welcome, {} ({})", user, role),
            Message::LoggedOut(user) => format!("Goodbye, {}", user),
            Message::LoginFailed(remaining) => format!("Invalid username or password. Attempts left: {}", remaining),
            Message::LoginLocked => "Too many failed attempts. Try again later".to_string(),
            Message::LoginSessionClosed => "This login session is already closed".to_string(),
            Message::AdminOnly => "Only administrators can do this".to_string(),

            // === VALIDATION MESSAGES ===
            Message::InvalidRole(role) => format!("Unknown role '{}'", role),
            Message::UsernameRequired => "Username is required".to_string(),
            Message::UsernameTaken(name) => format!("Username '{}' is already taken", name),
            Message::PasswordTooShort(min) => format!("Password must be at least {} characters long", min),
            Message::PasswordsDoNotMatch => "Passwords do not match".to_string(),
            Message::WrongCurrentPassword => "Current password is incorrect".to_string(),
            Message::PrimaryAdminProtected => "The primary administrator cannot be deleted or demoted".to_string(),
            Message::CannotDeleteSelf => "You cannot delete the account you are logged in with".to_string(),
            Message::InvalidEmail(email) => format!("'{}' is not a valid email address", email),
            Message::EmployeeNameRequired => "Employee name is required".to_string(),
            Message::InvalidSalary(salary) => format!("Salary must be zero or positive, got {}", salary),
            Message::DepartmentNameRequired => "Department name is required".to_string(),
            Message::ProjectNameRequired => "Project name is required".to_string(),
            Message::InvalidProjectStatus(status) => format!("Unknown project status '{}'", status),
            Message::InvalidHours(hours) => format!("Hours must be greater than 0 and at most 24, got {}", hours),
            Message::HoursBelowPrecision(hours) => format!("Hours are recorded in hundredths, {} rounds to 0", hours),
            Message::UnknownIndicator(code) => format!(
                "Unknown indicator '{}'. Valid codes: uf, ivp, dolar, euro, ipc, utm, bitcoin",
                code
            ),
            Message::InvalidIndicatorValue(value) => format!("Indicator value {} is not a finite number", value),
            Message::InvalidDate(input) => format!("'{}' is not a valid date (expected YYYY-MM-DD)", input),
            Message::InvalidMonth(input) => format!("'{}' is not a valid month (expected YYYY-MM)", input),
            Message::InvalidNumber(input) => format!("'{}' is not a valid number", input),

            // === DATABASE MESSAGES ===
            Message::DatabaseReady(path) => format!("Database ready at {}", path),
            Message::DatabaseFallback(path) => format!("Primary database unavailable, using fallback at {}", path),
            Message::DatabaseResetting => "Dropping all tables and recreating the schema".to_string(),
            Message::SeedAccountsHeader => "Default accounts (change these passwords):".to_string(),

            // === CONFIG MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleDatabase => "Database settings".to_string(),
            Message::ConfigModuleIndicators => "Indicator API settings".to_string(),

            // === MENU TITLES ===
            Message::MenuMain => "Main menu".to_string(),
            Message::MenuEmployees => "Employees".to_string(),
            Message::MenuDepartments => "Departments".to_string(),
            Message::MenuProjects => "Projects".to_string(),
            Message::MenuIndicators => "Economic indicators".to_string(),
            Message::MenuReports => "Reports".to_string(),
            Message::MenuUsers => "User management".to_string(),
            Message::MenuCancel => "Cancel".to_string(),

            // === EMPTY RESULTS ===
            Message::NoEmployees => "No employees registered".to_string(),
            Message::NoEmployeesMatching(query) => format!("No employees match '{}'", query),
            Message::NoDepartments => "No departments registered".to_string(),
            Message::NoProjects => "No projects registered".to_string(),
            Message::NoUsers => "No users registered".to_string(),
            Message::NoTimeEntries => "No hours recorded".to_string(),
            Message::NoEmployeeRecord(user) => format!("User '{}' is not linked to an employee record", user),
            Message::NoIndicatorQueries => "No indicator lookups yet".to_string(),
            Message::NoIndicatorQueriesInMonth(year, month) => {
                format!("No indicator lookups in {}-{:02}", year, month)
            }
            Message::NoSavedIndicators => "No saved indicator values".to_string(),
            Message::ProjectWithoutMembers(project) => format!("Project '{}' has no employees", project),
            Message::EmployeeWithoutProjects(employee) => format!("{} is not assigned to any project", employee),

            // === EMPLOYEE MESSAGES ===
            Message::EmployeeCreated(name, id) => format!("Employee '{}' created with ID {}", name, id),
            Message::EmployeeUpdated(id) => format!("Employee #{} updated", id),
            Message::EmployeeDeleted(name) => format!("Employee '{}' deleted", name),
            Message::EmployeeHasTimeEntries(name, count) => {
                format!("{} has {} time entries that will be deleted too", name, count)
            }

            // === DEPARTMENT MESSAGES ===
            Message::DepartmentCreated(name, id) => format!("Department '{}' created with ID {}", name, id),
            Message::DepartmentUpdated(id) => format!("Department #{} updated", id),
            Message::DepartmentDeleted(id) => format!("Department #{} deleted", id),

            // === PROJECT MESSAGES ===
            Message::ProjectCreated(name, id) => format!("Project '{}' created with ID {}", name, id),
            Message::ProjectUpdated(id) => format!("Project #{} updated", id),
            Message::ProjectDeleted(name) => format!("Project '{}' deleted", name),
            Message::ProjectHasMembers(name, count) => {
                format!("Project '{}' has {} assigned employees; their assignments will be removed", name, count)
            }
            Message::EmployeeAssigned(employee, project) => format!("{} assigned to '{}'", employee, project),
            Message::EmployeeAlreadyAssigned(employee, project) => {
                format!("{} is already assigned to '{}'", employee, project)
            }
            Message::AssignmentRejected(reason) => format!("Assignment rejected: {}", reason),
            Message::EmployeeUnassigned(employee, project) => format!("{} removed from '{}'", employee, project),
            Message::EmployeeNotAssigned(employee, project) => {
                format!("{} was not assigned to '{}'", employee, project)
            }
            Message::TeamCleared(project, count) => format!("Removed {} employees from '{}'", count, project),

            // === HOURS MESSAGES ===
            Message::HoursRecorded(hours, employee, project) => {
                format!("Recorded {} h for {} on '{}'", hours, employee, project)
            }

            // === INDICATOR MESSAGES ===
            Message::IndicatorSaved(code, date) => format!("Value of {} for {} saved", code, date),
            Message::IndicatorNoValue(code, date) => match date {
                Some(date) => format!("No value published for {} on {}", code, date),
                None => format!("No value published for {} today", code),
            },
            Message::IndicatorStorageStats(total, codes, last) => {
                format!("{} saved values across {} indicators. Last update: {}", total, codes, last)
            }
            Message::IndicatorsPurged(values, queries) => {
                format!("Purged {} saved values and {} lookup records", values, queries)
            }

            // === REPORT MESSAGES ===
            Message::ReportTopIndicators(limit) => format!("Top {} most consulted indicators", limit),
            Message::ReportGlobalStats => "Global statistics".to_string(),

            // === USER MESSAGES ===
            Message::UserCreated(name, id) => format!("User '{}' created with ID {}", name, id),
            Message::UserRoleChanged(name, role) => format!("User '{}' is now {}", name, role),
            Message::UserDeleted(name) => format!("User '{}' deleted", name),
            Message::PasswordChanged(name) => format!("Password of '{}' changed", name),

            // === PROMPTS ===
            Message::PromptUsername => "Username".to_string(),
            Message::PromptPassword => "Password".to_string(),
            Message::PromptCurrentPassword => "Current password".to_string(),
            Message::PromptNewPassword => "New password".to_string(),
            Message::PromptConfirmPassword => "Repeat the new password".to_string(),
            Message::PromptSelectRole => "Role".to_string(),
            Message::PromptSelectUser => "Select a user".to_string(),
            Message::PromptSelectModules => "Select modules to configure (space to select)".to_string(),
            Message::PromptDatabasePath => "Database file".to_string(),
            Message::PromptDatabaseFallback => "Fallback database file (empty for none)".to_string(),
            Message::PromptIndicatorUrl => "Indicator API base URL".to_string(),
            Message::PromptIndicatorTimeout => "Request timeout (seconds)".to_string(),
            Message::PromptSearchName => "Name contains".to_string(),
            Message::PromptEmployeeName => "Full name".to_string(),
            Message::PromptEmail => "Email".to_string(),
            Message::PromptAddress => "Address (optional)".to_string(),
            Message::PromptPhone => "Phone (optional)".to_string(),
            Message::PromptHireDate => "Hire date YYYY-MM-DD (empty for today)".to_string(),
            Message::PromptSalary => "Salary".to_string(),
            Message::PromptAssignDepartmentNow => "Assign a department now?".to_string(),
            Message::PromptSelectDepartment => "Select a department".to_string(),
            Message::PromptRemoveFromDepartment => "Remove the employee from their department?".to_string(),
            Message::PromptSelectEmployee => "Select an employee".to_string(),
            Message::PromptDepartmentName => "Department name".to_string(),
            Message::PromptAssignManagerNow => "Assign a manager now?".to_string(),
            Message::PromptSelectManager => "Select the manager".to_string(),
            Message::PromptProjectName => "Project name".to_string(),
            Message::PromptProjectDescription => "Description (optional)".to_string(),
            Message::PromptStartDate => "Start date YYYY-MM-DD (empty for today)".to_string(),
            Message::PromptStartDateKeep => "New start date YYYY-MM-DD (empty to keep)".to_string(),
            Message::PromptProjectStatus => "Status".to_string(),
            Message::PromptSelectProject => "Select a project".to_string(),
            Message::PromptConfirmClearTeam(project) => format!("Remove every employee from '{}'?", project),
            Message::PromptWorkDate => "Date YYYY-MM-DD (empty for today)".to_string(),
            Message::PromptHours => "Hours worked".to_string(),
            Message::PromptWorkDescription => "What was done (optional)".to_string(),
            Message::PromptDateFrom => "From YYYY-MM-DD (empty for no limit)".to_string(),
            Message::PromptDateTo => "To YYYY-MM-DD (empty for no limit)".to_string(),
            Message::PromptSelectIndicator => "Indicator".to_string(),
            Message::PromptIndicatorDate => "Date YYYY-MM-DD (empty for the latest value)".to_string(),
            Message::PromptSaveIndicator => "Save this value?".to_string(),
            Message::PromptMonth => "Month YYYY-MM".to_string(),
            Message::PromptConfirmPurge(values, queries) => format!(
                "Delete saved values older than {} days and lookup records older than {} days?",
                values, queries
            ),
            Message::PromptConfirmDelete => "Delete permanently?".to_string(),
        };

        write!(f, "{}", text)
    }
}
