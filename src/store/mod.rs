//! Record store for employees and tax brackets.
//!
//! The payslip calculation only needs two lookups from its store, expressed
//! by the [`RecordStore`] trait. [`InMemoryStore`] implements it and also
//! provides the create/read/update/soft-delete operations served by the API.

mod memory;
mod records;

pub use memory::InMemoryStore;
pub use records::{EmployeeChanges, NewEmployee, NewTaxBracket, TaxBracketChanges};

use crate::models::{Employee, TaxBracket};

/// The lookups the payslip calculation needs from its record store.
///
/// Implementations hand out owned snapshots; callers never hold a lock.
pub trait RecordStore: Send + Sync {
    /// Returns the live employee with the given id, if any.
    fn employee(&self, id: u64) -> Option<Employee>;

    /// Returns every live tax bracket, ordered by bottom floor.
    fn tax_brackets(&self) -> Vec<TaxBracket>;
}
