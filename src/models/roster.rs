//! The roster: the ordered set of employees under review.

use serde::{Deserialize, Serialize};

use crate::calculation::resolve_increase;
use crate::error::{EngineError, EngineResult};

use super::{BudgetSettings, EditedField, Employee};

/// An ordered collection of employees, unique by id.
///
/// Insertion order carries no meaning beyond display. Every mutation that
/// touches increase fields goes through the increase resolver so the stored
/// records always satisfy `proposed == current + increase`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    employees: Vec<Employee>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a roster from existing records, rejecting duplicate ids.
    pub fn from_employees(employees: Vec<Employee>) -> EngineResult<Self> {
        let mut roster = Self::new();
        for employee in employees {
            roster.insert(employee)?;
        }
        Ok(roster)
    }

    /// Resolves and appends an employee.
    pub fn add(&mut self, employee: Employee, settings: &BudgetSettings) -> EngineResult<&Employee> {
        let resolved = resolve_increase(&employee, EditedField::Initial, settings);
        self.insert(resolved)?;
        Ok(&self.employees[self.employees.len() - 1])
    }

    /// Replaces the record with the same id, resolving from `edited`.
    pub fn update(
        &mut self,
        employee: Employee,
        edited: EditedField,
        settings: &BudgetSettings,
    ) -> EngineResult<&Employee> {
        let index = self.position(&employee.id)?;
        self.employees[index] = resolve_increase(&employee, edited, settings);
        Ok(&self.employees[index])
    }

    /// Removes and returns the employee with the given id.
    pub fn remove(&mut self, id: &str) -> EngineResult<Employee> {
        let index = self.position(id)?;
        Ok(self.employees.remove(index))
    }

    /// Looks up an employee by id.
    pub fn get(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Removes every employee.
    pub fn clear(&mut self) {
        self.employees.clear();
    }

    /// The employees in insertion order.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Number of employees.
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// True when the roster has no employees.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Consumes the roster, returning its records.
    pub fn into_employees(self) -> Vec<Employee> {
        self.employees
    }

    fn insert(&mut self, employee: Employee) -> EngineResult<()> {
        if self.get(&employee.id).is_some() {
            return Err(EngineError::DuplicateEmployee { id: employee.id });
        }
        self.employees.push(employee);
        Ok(())
    }

    fn position(&self, id: &str) -> EngineResult<usize> {
        self.employees
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| EngineError::EmployeeNotFound { id: id.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn employee(id: &str, base: &str) -> Employee {
        let mut e = Employee::new(id, dec(base), &BudgetSettings::default());
        e.id = id.to_string();
        e
    }

    #[test]
    fn test_add_resolves_the_new_record() {
        let settings = BudgetSettings::default();
        let mut roster = Roster::new();

        let added = roster.add(employee("emp_001", "100000"), &settings).unwrap();

        // 4% standard merit of 100000 = 4000, below 5000 so nearest 500
        assert_eq!(added.increase_amount, dec("4000"));
        assert_eq!(added.proposed_base_salary, dec("104000"));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let settings = BudgetSettings::default();
        let mut roster = Roster::new();
        roster.add(employee("emp_001", "100000"), &settings).unwrap();

        let result = roster.add(employee("emp_001", "90000"), &settings);
        match result {
            Err(EngineError::DuplicateEmployee { id }) => assert_eq!(id, "emp_001"),
            other => panic!("Expected DuplicateEmployee, got {:?}", other),
        }
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_update_reresolves_from_edited_field() {
        let settings = BudgetSettings::default();
        let mut roster = Roster::new();
        roster.add(employee("emp_001", "80000"), &settings).unwrap();

        let mut edited = roster.get("emp_001").unwrap().clone();
        edited.increase_amount = dec("6000");
        let updated = roster
            .update(edited, EditedField::IncreaseAmount, &settings)
            .unwrap();

        assert_eq!(updated.proposed_base_salary, dec("86000"));
        assert_eq!(updated.merit_percent, Some(dec("7.5")));
    }

    #[test]
    fn test_update_unknown_id_fails() {
        let settings = BudgetSettings::default();
        let mut roster = Roster::new();

        let result = roster.update(employee("ghost", "1000"), EditedField::Initial, &settings);
        assert!(matches!(result, Err(EngineError::EmployeeNotFound { .. })));
    }

    #[test]
    fn test_remove_and_clear() {
        let settings = BudgetSettings::default();
        let mut roster = Roster::new();
        roster.add(employee("emp_001", "100000"), &settings).unwrap();
        roster.add(employee("emp_002", "90000"), &settings).unwrap();

        let removed = roster.remove("emp_001").unwrap();
        assert_eq!(removed.id, "emp_001");
        assert!(roster.get("emp_001").is_none());
        assert_eq!(roster.len(), 1);

        roster.clear();
        assert!(roster.is_empty());
    }

    #[test]
    fn test_from_employees_rejects_duplicates() {
        let result = Roster::from_employees(vec![
            employee("emp_001", "100"),
            employee("emp_001", "200"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let roster = Roster::from_employees(vec![employee("emp_001", "100")]).unwrap();
        let json = serde_json::to_value(&roster).unwrap();
        assert!(json.is_array());
    }
}
