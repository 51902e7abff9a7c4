//! Storage boundary of the leave engine.
//!
//! The engine works on plain records and talks to storage only through the
//! [`LeaveStore`] trait. Every read-modify-write of a ledger runs inside
//! [`LeaveStore::with_ledger_lock`], which holds an exclusive lock on one
//! (employee, year) key and commits the ledger together with any staged
//! request updates only when the callback succeeds.

mod memory;
mod snapshot;

pub use memory::InMemoryStore;
pub use snapshot::StoreSnapshot;

use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{BalanceLedger, Employee, LedgerKey, LeaveRequest};

/// Working state of a locked ledger transaction.
///
/// Changes made through the transaction become visible to other callers only
/// after the callback that received it returns `Ok`.
#[derive(Debug)]
pub struct LedgerTransaction {
    ledger: BalanceLedger,
    staged_requests: Vec<LeaveRequest>,
}

impl LedgerTransaction {
    /// Starts a transaction over a ledger.
    pub fn new(ledger: BalanceLedger) -> Self {
        Self {
            ledger,
            staged_requests: Vec::new(),
        }
    }

    /// The ledger as modified so far.
    pub fn ledger(&self) -> &BalanceLedger {
        &self.ledger
    }

    /// Mutable access to the ledger.
    pub fn ledger_mut(&mut self) -> &mut BalanceLedger {
        &mut self.ledger
    }

    /// Schedules a request update to be committed with the ledger.
    pub fn stage_request(&mut self, request: LeaveRequest) {
        self.staged_requests.push(request);
    }

    /// Splits the transaction into the ledger and the staged requests.
    pub fn into_parts(self) -> (BalanceLedger, Vec<LeaveRequest>) {
        (self.ledger, self.staged_requests)
    }
}

/// Persistent store of employees, ledgers and leave requests.
///
/// Implementations must guarantee:
/// - at most one ledger per (employee, year), created on first access;
/// - at most one request per (employee, start date, end date);
/// - mutual exclusion of [`with_ledger_lock`](LeaveStore::with_ledger_lock)
///   callbacks on the same key, and no blocking across different keys.
pub trait LeaveStore: Send + Sync {
    /// Adds an employee. Fails with `EmployeeAlreadyExists` on a duplicate id.
    fn insert_employee(&self, employee: Employee) -> EngineResult<()>;

    /// Looks up an employee. Fails with `EmployeeNotFound`.
    fn employee(&self, id: &str) -> EngineResult<Employee>;

    /// All employees.
    fn employees(&self) -> EngineResult<Vec<Employee>>;

    /// Returns the ledger for a key, creating an all-zero one if absent.
    fn ledger_or_create(&self, key: &LedgerKey) -> EngineResult<BalanceLedger>;

    /// All ledgers of a year.
    fn ledgers_for_year(&self, year: i32) -> EngineResult<Vec<BalanceLedger>>;

    /// Adds a new request. Fails with a `DuplicatePeriod` validation error if
    /// the employee already has a request for the same period.
    fn insert_request(&self, request: LeaveRequest) -> EngineResult<()>;

    /// Looks up a request. Fails with `RequestNotFound`.
    fn request(&self, id: Uuid) -> EngineResult<LeaveRequest>;

    /// All requests.
    fn requests(&self) -> EngineResult<Vec<LeaveRequest>>;

    /// Runs `f` with exclusive access to the ledger for `key`.
    ///
    /// The ledger is created if absent. If `f` returns `Ok`, the ledger and
    /// every staged request are committed together; if it returns `Err`,
    /// nothing `f` did is kept. `f` may open a transaction on a different key.
    fn with_ledger_lock<T, F>(&self, key: &LedgerKey, f: F) -> EngineResult<T>
    where
        F: FnOnce(&mut LedgerTransaction) -> EngineResult<T>;
}
