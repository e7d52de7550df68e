//! In-memory record store with soft delete.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, TaxBracket};

use super::RecordStore;
use super::records::{EmployeeChanges, NewEmployee, NewTaxBracket, TaxBracketChanges};

/// A stored value with its bookkeeping timestamps.
#[derive(Debug, Clone)]
struct Row<T> {
    value: T,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl<T> Row<T> {
    fn new(value: T, now: DateTime<Utc>) -> Self {
        Self {
            value,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Rows keyed by id. Ids start at 1 and are never reused.
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<u64, Row<T>>,
    next_id: u64,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn insert_with(&mut self, build: impl FnOnce(u64) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let value = build(id);
        self.rows.insert(id, Row::new(value.clone(), Utc::now()));
        value
    }

    fn live(&self, id: u64) -> Option<&Row<T>> {
        self.rows.get(&id).filter(|row| row.is_live())
    }

    fn live_mut(&mut self, id: u64) -> Option<&mut Row<T>> {
        self.rows.get_mut(&id).filter(|row| row.is_live())
    }

    fn live_values(&self) -> impl Iterator<Item = &T> {
        self.rows.values().filter(|row| row.is_live()).map(|row| &row.value)
    }

    fn soft_delete(&mut self, id: u64) -> Option<T> {
        let row = self.live_mut(id)?;
        let now = Utc::now();
        row.deleted_at = Some(now);
        row.updated_at = now;
        Some(row.value.clone())
    }
}

/// Thread-safe in-memory store for employees and tax brackets.
///
/// Deleting a row only stamps it as deleted; deleted rows are invisible to
/// every read and cannot be changed afterwards.
///
/// # Example
///
/// ```
/// use payslip_engine::store::{InMemoryStore, NewEmployee, RecordStore};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let store = InMemoryStore::new();
/// let employee = store.create_employee(NewEmployee {
///     first_name: "June".to_string(),
///     last_name: "Symons".to_string(),
///     annual_salary: Decimal::from(14352),
///     pension_rate: 0,
///     hiring_date: NaiveDate::from_ymd_opt(2016, 12, 14).unwrap(),
/// });
///
/// assert_eq!(store.employee(employee.id), Some(employee.clone()));
/// store.delete_employee(employee.id).unwrap();
/// assert_eq!(store.employee(employee.id), None);
/// ```
#[derive(Debug)]
pub struct InMemoryStore {
    employees: RwLock<Table<Employee>>,
    tax_brackets: RwLock<Table<TaxBracket>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            employees: RwLock::new(Table::new()),
            tax_brackets: RwLock::new(Table::new()),
        }
    }

    /// Creates a store pre-populated with seed records.
    ///
    /// Seed tax brackets bypass the API's field limits (the tax-free bracket
    /// has a zero rate) but must still have a top floor above the bottom.
    pub fn seeded(
        employees: Vec<NewEmployee>,
        tax_brackets: Vec<NewTaxBracket>,
    ) -> EngineResult<Self> {
        let store = Self::new();
        for bracket in tax_brackets {
            store.create_tax_bracket(bracket)?;
        }
        for employee in employees {
            store.create_employee(employee);
        }
        Ok(store)
    }

    fn read_employees(&self) -> RwLockReadGuard<'_, Table<Employee>> {
        self.employees.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_employees(&self) -> RwLockWriteGuard<'_, Table<Employee>> {
        self.employees.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_brackets(&self) -> RwLockReadGuard<'_, Table<TaxBracket>> {
        self.tax_brackets.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_brackets(&self) -> RwLockWriteGuard<'_, Table<TaxBracket>> {
        self.tax_brackets.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inserts a new employee and returns it with its assigned id.
    pub fn create_employee(&self, new: NewEmployee) -> Employee {
        let employee = self.write_employees().insert_with(|id| new.into_employee(id));
        info!(employee_id = employee.id, "Employee created");
        employee
    }

    /// Returns every live employee, ordered by id.
    pub fn list_employees(&self) -> Vec<Employee> {
        self.read_employees().live_values().cloned().collect()
    }

    /// Returns a live employee or `EmployeeNotFound`.
    pub fn get_employee(&self, id: u64) -> EngineResult<Employee> {
        self.employee(id)
            .ok_or(EngineError::EmployeeNotFound { id })
    }

    /// Applies a partial update to a live employee.
    pub fn update_employee(&self, id: u64, changes: EmployeeChanges) -> EngineResult<Employee> {
        let mut table = self.write_employees();
        let row = table
            .live_mut(id)
            .ok_or(EngineError::EmployeeNotFound { id })?;
        changes.apply_to(&mut row.value);
        row.updated_at = Utc::now();
        info!(employee_id = id, "Employee updated");
        Ok(row.value.clone())
    }

    /// Soft-deletes a live employee and returns its last state.
    pub fn delete_employee(&self, id: u64) -> EngineResult<Employee> {
        let deleted = self
            .write_employees()
            .soft_delete(id)
            .ok_or(EngineError::EmployeeNotFound { id })?;
        info!(employee_id = id, "Employee deleted");
        Ok(deleted)
    }

    /// Inserts a new tax bracket and returns it with its assigned id.
    ///
    /// Fails with `InvalidTaxBracket` if the top floor is not above the bottom.
    pub fn create_tax_bracket(&self, new: NewTaxBracket) -> EngineResult<TaxBracket> {
        let candidate = new.clone().into_bracket(0);
        check_range(&candidate)?;
        let bracket = self.write_brackets().insert_with(|id| new.into_bracket(id));
        info!(
            bracket_id = bracket.id,
            bottom_floor = %bracket.bottom_floor,
            top_floor = %bracket.top_floor,
            "Tax bracket created"
        );
        Ok(bracket)
    }

    /// Returns every live tax bracket, ordered by bottom floor.
    pub fn list_tax_brackets(&self) -> Vec<TaxBracket> {
        let mut brackets: Vec<TaxBracket> = self.read_brackets().live_values().cloned().collect();
        brackets.sort_by(|a, b| a.bottom_floor.cmp(&b.bottom_floor).then(a.id.cmp(&b.id)));
        brackets
    }

    /// Returns a live tax bracket or `TaxBracketNotFound`.
    pub fn get_tax_bracket(&self, id: u64) -> EngineResult<TaxBracket> {
        self.read_brackets()
            .live(id)
            .map(|row| row.value.clone())
            .ok_or(EngineError::TaxBracketNotFound { id })
    }

    /// Applies a partial update to a live tax bracket.
    ///
    /// The merged bracket must keep its top floor above its bottom floor;
    /// otherwise nothing is changed.
    pub fn update_tax_bracket(
        &self,
        id: u64,
        changes: TaxBracketChanges,
    ) -> EngineResult<TaxBracket> {
        let mut table = self.write_brackets();
        let row = table
            .live_mut(id)
            .ok_or(EngineError::TaxBracketNotFound { id })?;

        let mut updated = row.value.clone();
        changes.apply_to(&mut updated);
        check_range(&updated)?;

        row.value = updated.clone();
        row.updated_at = Utc::now();
        info!(bracket_id = id, "Tax bracket updated");
        Ok(updated)
    }

    /// Soft-deletes a live tax bracket and returns its last state.
    pub fn delete_tax_bracket(&self, id: u64) -> EngineResult<TaxBracket> {
        let deleted = self
            .write_brackets()
            .soft_delete(id)
            .ok_or(EngineError::TaxBracketNotFound { id })?;
        info!(bracket_id = id, "Tax bracket deleted");
        Ok(deleted)
    }

    /// Soft-deletes the whole tax table and returns how many rows were live.
    pub fn delete_all_tax_brackets(&self) -> usize {
        let mut table = self.write_brackets();
        let live_ids: Vec<u64> = table
            .rows
            .iter()
            .filter(|(_, row)| row.is_live())
            .map(|(id, _)| *id)
            .collect();
        for id in &live_ids {
            table.soft_delete(*id);
        }
        info!(count = live_ids.len(), "Tax table deleted");
        live_ids.len()
    }

    /// Returns when a row was created and last updated, including deleted rows.
    #[cfg(test)]
    fn employee_timestamps(&self, id: u64) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.read_employees()
            .rows
            .get(&id)
            .map(|row| (row.created_at, row.updated_at))
    }
}

fn check_range(bracket: &TaxBracket) -> EngineResult<()> {
    if bracket.top_floor <= bracket.bottom_floor {
        return Err(EngineError::InvalidTaxBracket {
            field: "top_floor".to_string(),
            message: format!(
                "must be greater than bottom_floor ({} <= {})",
                bracket.top_floor, bracket.bottom_floor
            ),
        });
    }
    Ok(())
}

impl RecordStore for InMemoryStore {
    fn employee(&self, id: u64) -> Option<Employee> {
        let employee = self.read_employees().live(id).map(|row| row.value.clone());
        debug!(employee_id = id, found = employee.is_some(), "Employee lookup");
        employee
    }

    fn tax_brackets(&self) -> Vec<TaxBracket> {
        self.list_tax_brackets()
    }
}
