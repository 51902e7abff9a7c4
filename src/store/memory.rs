//! Thread-safe in-memory implementation of [`LeaveStore`].

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult, ValidationError};
use crate::models::{BalanceLedger, Employee, LedgerKey, LeaveRequest};

use super::{LeaveStore, LedgerTransaction, StoreSnapshot};

#[derive(Debug, Default)]
struct StoreState {
    employees: HashMap<String, Employee>,
    ledgers: HashMap<LedgerKey, BalanceLedger>,
    requests: HashMap<Uuid, LeaveRequest>,
}

/// In-memory store.
///
/// Records live behind one `RwLock` that is only held for the duration of a
/// single read or write. Ledger transactions additionally take a per-key
/// `Mutex`, so read-modify-write cycles on one ledger are serialized while
/// other ledgers stay available.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
    ledger_locks: Mutex<HashMap<LedgerKey, Arc<Mutex<()>>>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a snapshot.
    ///
    /// Fails if the snapshot repeats an employee id, a ledger key or a
    /// request id.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> EngineResult<Self> {
        let store = Self::new();
        {
            let mut state = store.state.write();
            for employee in snapshot.employees {
                if state.employees.contains_key(&employee.id) {
                    return Err(EngineError::EmployeeAlreadyExists { id: employee.id });
                }
                state.employees.insert(employee.id.clone(), employee);
            }
            for ledger in snapshot.ledgers {
                let key = ledger.key();
                if state.ledgers.insert(key.clone(), ledger).is_some() {
                    return Err(EngineError::StorageError {
                        message: format!("snapshot contains ledger {} twice", key),
                    });
                }
            }
            for request in snapshot.requests {
                let id = request.id;
                if state.requests.insert(id, request).is_some() {
                    return Err(EngineError::StorageError {
                        message: format!("snapshot contains request {} twice", id),
                    });
                }
            }
        }
        Ok(store)
    }

    /// Copies every record into a snapshot, in a stable order.
    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.read();

        let mut employees: Vec<Employee> = state.employees.values().cloned().collect();
        employees.sort_by(|a, b| a.id.cmp(&b.id));

        let mut ledgers: Vec<BalanceLedger> = state.ledgers.values().cloned().collect();
        ledgers.sort_by_key(|l| l.key());

        let mut requests: Vec<LeaveRequest> = state.requests.values().cloned().collect();
        requests.sort_by(|a, b| a.requested_at.cmp(&b.requested_at).then(a.id.cmp(&b.id)));

        StoreSnapshot {
            employees,
            ledgers,
            requests,
        }
    }

    fn ledger_lock(&self, key: &LedgerKey) -> Arc<Mutex<()>> {
        let mut locks = self.ledger_locks.lock();
        Arc::clone(locks.entry(key.clone()).or_default())
    }
}

impl LeaveStore for InMemoryStore {
    fn insert_employee(&self, employee: Employee) -> EngineResult<()> {
        let mut state = self.state.write();
        if state.employees.contains_key(&employee.id) {
            return Err(EngineError::EmployeeAlreadyExists { id: employee.id });
        }
        state.employees.insert(employee.id.clone(), employee);
        Ok(())
    }

    fn employee(&self, id: &str) -> EngineResult<Employee> {
        self.state
            .read()
            .employees
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::EmployeeNotFound { id: id.to_string() })
    }

    fn employees(&self) -> EngineResult<Vec<Employee>> {
        let mut employees: Vec<Employee> = self.state.read().employees.values().cloned().collect();
        employees.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(employees)
    }

    fn ledger_or_create(&self, key: &LedgerKey) -> EngineResult<BalanceLedger> {
        if let Some(ledger) = self.state.read().ledgers.get(key) {
            return Ok(ledger.clone());
        }
        let mut state = self.state.write();
        Ok(state
            .ledgers
            .entry(key.clone())
            .or_insert_with(|| BalanceLedger::empty(key))
            .clone())
    }

    fn ledgers_for_year(&self, year: i32) -> EngineResult<Vec<BalanceLedger>> {
        let mut ledgers: Vec<BalanceLedger> = self
            .state
            .read()
            .ledgers
            .values()
            .filter(|l| l.year == year)
            .cloned()
            .collect();
        ledgers.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));
        Ok(ledgers)
    }

    fn insert_request(&self, request: LeaveRequest) -> EngineResult<()> {
        let mut state = self.state.write();
        let duplicate = state.requests.values().any(|r| {
            r.employee_id == request.employee_id
                && r.start_date == request.start_date
                && r.end_date == request.end_date
        });
        if duplicate {
            return Err(ValidationError::DuplicatePeriod {
                start: request.start_date,
                end: request.end_date,
            }
            .into());
        }
        state.requests.insert(request.id, request);
        Ok(())
    }

    fn request(&self, id: Uuid) -> EngineResult<LeaveRequest> {
        self.state
            .read()
            .requests
            .get(&id)
            .cloned()
            .ok_or(EngineError::RequestNotFound { id })
    }

    fn requests(&self) -> EngineResult<Vec<LeaveRequest>> {
        Ok(self.state.read().requests.values().cloned().collect())
    }

    fn with_ledger_lock<T, F>(&self, key: &LedgerKey, f: F) -> EngineResult<T>
    where
        F: FnOnce(&mut LedgerTransaction) -> EngineResult<T>,
    {
        let lock = self.ledger_lock(key);
        let _guard = lock.lock();

        let mut txn = LedgerTransaction::new(self.ledger_or_create(key)?);
        let value = f(&mut txn)?;

        let (mut ledger, staged_requests) = txn.into_parts();
        ledger.employee_id = key.employee_id.clone();
        ledger.year = key.year;

        let mut state = self.state.write();
        state.ledgers.insert(key.clone(), ledger);
        for request in staged_requests {
            state.requests.insert(request.id, request);
        }
        Ok(value)
    }
}
