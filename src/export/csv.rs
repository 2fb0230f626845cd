//! CSV export of a roster.
//!
//! One row per employee in roster order, every field quoted. Amounts are in
//! each employee's own currency.

use std::io::Write;

use ::csv::{QuoteStyle, Terminator, WriterBuilder};
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::Employee;

/// Column headers, in output order.
pub const CSV_HEADERS: [&str; 12] = [
    "Name",
    "Current Level",
    "Next Level",
    "Currency",
    "Current Base Salary",
    "Current Stock",
    "Proposed Base Salary",
    "Proposed Stock",
    "Merit Increase %",
    "Total Increase %",
    "Has Promotion",
    "Flagged",
];

/// Writes the roster as CSV to `writer`.
pub fn write_csv<W: Write>(employees: &[Employee], writer: W) -> EngineResult<()> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(CSV_HEADERS)?;
    for employee in employees {
        wtr.write_record(row(employee))?;
    }
    wtr.flush().map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })
}

/// Renders the roster as a CSV string.
///
/// # Examples
///
/// ```
/// use comp_rollup::export::to_csv_string;
/// use comp_rollup::models::{BudgetSettings, Employee};
/// use rust_decimal::Decimal;
///
/// let employee = Employee::new("Ada", Decimal::from(100_000), &BudgetSettings::default());
/// let csv = to_csv_string(&[employee]).unwrap();
/// assert!(csv.starts_with("\"Name\",\"Current Level\""));
/// assert!(csv.contains("\"Ada\""));
/// ```
pub fn to_csv_string(employees: &[Employee]) -> EngineResult<String> {
    let mut buffer = Vec::new();
    write_csv(employees, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })
}

/// The download file name for a project's export.
pub fn csv_file_name(project_name: &str) -> String {
    format!("{}_compensation_rollup.csv", project_name)
}

fn row(employee: &Employee) -> [String; 12] {
    [
        employee.name.clone(),
        employee.current_level.clone().unwrap_or_default(),
        employee.next_level.clone().unwrap_or_default(),
        employee.currency.code().to_string(),
        amount(employee.current_base_salary),
        amount(employee.current_stock),
        amount(employee.proposed_base_salary),
        amount(employee.proposed_stock),
        amount(employee.merit_percent.unwrap_or(Decimal::ZERO)),
        amount(employee.total_increase_percent),
        yes_no(employee.has_promotion),
        yes_no(employee.flagged),
    ]
}

fn amount(value: Decimal) -> String {
    value.normalize().to_string()
}

fn yes_no(value: bool) -> String {
    let label = if value { "Yes" } else { "No" };
    label.to_string()
}
