use crate::db::departments::Department;
use crate::db::employees::Employee;
use crate::db::indicator_queries::{CodeUsage, IndicatorQuery, Popularity};
use crate::db::indicators::EconomicIndicator;
use crate::db::projects::Project;
use crate::db::time_entries::{EmployeeHours, ProjectHours, TimeEntry, TimeStats};
use crate::db::users::User;
use crate::libs::formatter::{format_hours, format_indicator_value, format_money, truncate};
use crate::libs::indicator::IndicatorReading;
use prettytable::{row, Table};

const DASH: &str = "-";

pub struct View {}

impl View {
    pub fn employees(employees: &[Employee]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "EMAIL", "PHONE", "HIRED", "SALARY", "DEPARTMENT"]);
        for employee in employees {
            table.add_row(row![
                employee.id,
                employee.name,
                employee.email,
                employee.phone.as_deref().unwrap_or(DASH),
                employee.hire_date,
                r->format_money(employee.salary),
                employee.department_name.as_deref().unwrap_or(DASH)
            ]);
        }
        table.printstd();
    }

    pub fn employee(employee: &Employee) {
        let mut table = Table::new();

        table.add_row(row!["ID", employee.id]);
        table.add_row(row!["NAME", employee.name]);
        table.add_row(row!["EMAIL", employee.email]);
        table.add_row(row!["ADDRESS", employee.address.as_deref().unwrap_or(DASH)]);
        table.add_row(row!["PHONE", employee.phone.as_deref().unwrap_or(DASH)]);
        table.add_row(row!["HIRED", employee.hire_date]);
        table.add_row(row!["SALARY", format_money(employee.salary)]);
        table.add_row(row!["DEPARTMENT", employee.department_name.as_deref().unwrap_or(DASH)]);
        table.printstd();
    }

    pub fn departments(departments: &[Department]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "MANAGER", "EMPLOYEES"]);
        for department in departments {
            table.add_row(row![
                department.id,
                department.name,
                department.manager_name.as_deref().unwrap_or(DASH),
                r->department.employee_count
            ]);
        }
        table.printstd();
    }

    pub fn projects(projects: &[Project]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "STARTED", "STATUS", "DESCRIPTION", "TEAM"]);
        for project in projects {
            let team = if project.members.is_empty() {
                DASH.to_string()
            } else {
                project.members.join(", ")
            };
            table.add_row(row![
                project.id,
                project.name,
                project.start_date,
                project.status,
                truncate(project.description.as_deref().unwrap_or(DASH), 40),
                truncate(&team, 50)
            ]);
        }
        table.printstd();
    }

    pub fn time_entries(entries: &[TimeEntry], total: f64) {
        let mut table = Table::new();

        table.add_row(row!["ID", "DATE", "PROJECT", "HOURS", "DESCRIPTION"]);
        for entry in entries {
            table.add_row(row![
                entry.id,
                entry.date,
                entry.project_name,
                r->format_hours(entry.hours),
                truncate(entry.description.as_deref().unwrap_or(DASH), 50)
            ]);
        }
        table.add_row(row!["", "", "TOTAL", r->format_hours(total), ""]);
        table.printstd();
    }

    pub fn users(users: &[User]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "USERNAME", "ROLE", "CREATED"]);
        for user in users {
            table.add_row(row![
                user.id,
                user.username,
                user.role,
                user.created_at.as_deref().unwrap_or(DASH)
            ]);
        }
        table.printstd();
    }

    pub fn reading(reading: &IndicatorReading) {
        let mut table = Table::new();

        table.add_row(row!["INDICATOR", reading.name()]);
        table.add_row(row!["CODE", reading.code]);
        table.add_row(row!["DATE", reading.date]);
        table.add_row(row!["VALUE", r->format_indicator_value(reading.value)]);
        table.printstd();
    }

    pub fn indicators(indicators: &[EconomicIndicator]) {
        let mut table = Table::new();

        table.add_row(row!["CODE", "NAME", "DATE", "VALUE", "REGISTERED"]);
        for indicator in indicators {
            table.add_row(row![
                indicator.code,
                indicator.name,
                indicator.date,
                r->format_indicator_value(indicator.value),
                indicator.registered_at.as_deref().unwrap_or(DASH)
            ]);
        }
        table.printstd();
    }

    pub fn indicator_queries(queries: &[IndicatorQuery]) {
        let mut table = Table::new();

        table.add_row(row!["QUERIED AT", "CODE", "DATE", "VALUE", "SAVED"]);
        for query in queries {
            table.add_row(row![
                query.queried_at,
                query.code,
                query.date,
                r->format_indicator_value(query.value),
                if query.saved { "yes" } else { "no" }
            ]);
        }
        table.printstd();
    }

    pub fn code_usage(usage: &[CodeUsage]) {
        let mut table = Table::new();

        table.add_row(row!["CODE", "QUERIES", "SAVED", "AVERAGE VALUE"]);
        for item in usage {
            table.add_row(row![
                item.code,
                r->item.queries,
                r->item.saved,
                r->format_indicator_value(item.average_value)
            ]);
        }
        table.printstd();
    }

    pub fn top_indicators(top: &[Popularity]) {
        let mut table = Table::new();

        table.add_row(row!["#", "CODE", "NAME", "QUERIES", "USERS"]);
        for (position, item) in top.iter().enumerate() {
            table.add_row(row![
                position + 1,
                item.code,
                item.code.official_name(),
                r->item.queries,
                r->item.users
            ]);
        }
        table.printstd();
    }

    pub fn employee_hours(hours: &[EmployeeHours]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "EMPLOYEE", "ENTRIES", "TOTAL HOURS", "AVG / DAY (20)"]);
        for item in hours {
            table.add_row(row![
                item.employee_id,
                item.name,
                r->item.entries,
                r->format_hours(item.total_hours),
                r->format_hours(item.daily_average())
            ]);
        }
        table.printstd();
    }

    pub fn project_hours(hours: &[ProjectHours]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "PROJECT", "EMPLOYEES", "TOTAL HOURS"]);
        for item in hours {
            table.add_row(row![
                item.project_id,
                item.name,
                r->item.employees,
                r->format_hours(item.total_hours)
            ]);
        }
        table.printstd();
    }

    pub fn time_stats(stats: &TimeStats, queries_today: i64) {
        let mut table = Table::new();
        let date = |d: Option<chrono::NaiveDate>| d.map(|d| d.to_string()).unwrap_or_else(|| DASH.to_string());

        table.add_row(row!["EMPLOYEES WITH HOURS", r->stats.employees]);
        table.add_row(row!["PROJECTS WITH HOURS", r->stats.projects]);
        table.add_row(row!["TIME ENTRIES", r->stats.entries]);
        table.add_row(row!["TOTAL HOURS", r->format_hours(stats.total_hours)]);
        table.add_row(row!["AVERAGE PER EMPLOYEE", r->format_hours(stats.average_per_employee)]);
        table.add_row(row!["FIRST ENTRY", r->date(stats.first_date)]);
        table.add_row(row!["LAST ENTRY", r->date(stats.last_date)]);
        table.add_row(row!["INDICATOR QUERIES TODAY", r->queries_today]);
        table.printstd();
    }
}
