//! The leave service: every operation that reads or changes balances and
//! requests goes through [`LeaveService`].

use std::sync::Arc;
use std::time::Instant;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{
    self, AllotmentResult, PriorityDebit, SimpleDebitRequest, apply_carry_over,
    apply_deduction, apply_onboarding_grant, apply_priority_debit, completed_years,
    onboarding_grant, refund_deduction, remaining_balance,
};
use crate::config::{LeavePolicy, OnboardingGrant};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, BalanceLedger, Employee, LedgerKey, LeaveRequest, RequestStatus,
};
use crate::notify::{Notification, NotificationEvent, Notifier};
use crate::store::LeaveStore;

use super::admin::{PrivilegeGrant, SplitAdjustment, apply_split_adjustment};
use super::clock::Clock;
use super::validation::{Submission, validate_submission};

/// One employee a batch job could not process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    /// The employee concerned.
    pub employee_id: String,
    /// Why the employee was skipped.
    pub error: String,
}

/// Outcome of a per-employee batch job.
///
/// Each employee is committed on its own, so the employees in `succeeded`
/// keep their changes even when others fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// The year the job ran for.
    pub year: i32,
    /// Employees processed.
    pub succeeded: Vec<String>,
    /// Employees that failed, with the reason.
    pub failed: Vec<BatchFailure>,
}

impl BatchSummary {
    fn new(year: i32) -> Self {
        Self {
            year,
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }

    fn record(&mut self, employee_id: &str, outcome: EngineResult<()>) {
        match outcome {
            Ok(()) => self.succeeded.push(employee_id.to_string()),
            Err(err) => self.failed.push(BatchFailure {
                employee_id: employee_id.to_string(),
                error: err.to_string(),
            }),
        }
    }

    /// Whether every employee succeeded.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// An approved request together with the audit of its deduction.
#[derive(Debug, Clone)]
pub struct ApprovalOutcome {
    /// The request, now approved, with its recorded deduction.
    pub request: LeaveRequest,
    /// One step per bucket debited.
    pub audit_steps: Vec<AuditStep>,
}

/// Composes storage, notifications, the clock and the leave policy.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use chrono::NaiveDate;
/// use leave_engine::config::LeavePolicy;
/// use leave_engine::lifecycle::{FixedClock, LeaveService};
/// use leave_engine::models::Employee;
/// use leave_engine::notify::RecordingNotifier;
/// use leave_engine::store::InMemoryStore;
///
/// let service = LeaveService::new(
///     Arc::new(InMemoryStore::new()),
///     Arc::new(RecordingNotifier::new()),
///     FixedClock::on(NaiveDate::from_ymd_opt(2026, 2, 16).unwrap()),
///     LeavePolicy::default(),
/// );
///
/// let employee = Employee::new("emp_001", "Ana Gomez", NaiveDate::from_ymd_opt(2020, 3, 15).unwrap());
/// service.onboard_employee(employee)?;
///
/// let ledger = service.balance("emp_001", 2026)?;
/// assert_eq!(ledger.split.business_days.current_year, 15);
/// # Ok::<(), leave_engine::error::EngineError>(())
/// ```
pub struct LeaveService<S, N, C> {
    store: Arc<S>,
    notifier: Arc<N>,
    clock: C,
    policy: LeavePolicy,
}

impl<S, N, C> LeaveService<S, N, C>
where
    S: LeaveStore,
    N: Notifier,
    C: Clock,
{
    /// Creates a service.
    pub fn new(store: Arc<S>, notifier: Arc<N>, clock: C, policy: LeavePolicy) -> Self {
        Self {
            store,
            notifier,
            clock,
            policy,
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// The policy in force.
    pub fn policy(&self) -> &LeavePolicy {
        &self.policy
    }

    /// Computes an employee's allotment for `year` and writes it into the
    /// allotted counters of that year's ledger.
    ///
    /// Carried-over and taken counters are left as they are, so running the
    /// allotment twice gives the same ledger.
    pub fn compute_annual_allotment(&self, employee_id: &str, year: i32) -> EngineResult<AllotmentResult> {
        let start_time = Instant::now();
        let employee = self.store.employee(employee_id)?;
        let result = calculation::compute_annual_allotment(&employee, year, &self.policy)?;

        let allotment = result.allotment;
        self.store
            .with_ledger_lock(&LedgerKey::new(employee_id, year), |txn| {
                let simple = &mut txn.ledger_mut().simple;
                simple.workdays.allotted = allotment.workdays;
                simple.holiday_leave.allotted = allotment.holiday_leave;
                simple.cct_days.allotted = allotment.cct_days;
                Ok(())
            })?;

        info!(
            employee_id = %employee_id,
            year,
            seniority_years = result.seniority_years,
            workdays = allotment.workdays,
            holiday_leave = allotment.holiday_leave,
            cct_days = allotment.cct_days,
            prorated = result.prorated,
            duration_us = start_time.elapsed().as_micros(),
            "Annual allotment completed"
        );
        Ok(result)
    }

    /// Runs [`compute_annual_allotment`](Self::compute_annual_allotment) for
    /// every active employee.
    pub fn run_annual_allotment(&self, year: i32) -> EngineResult<BatchSummary> {
        let mut summary = BatchSummary::new(year);

        for employee in self.store.employees()?.into_iter().filter(|e| e.is_active) {
            let outcome = self.compute_annual_allotment(&employee.id, year).map(|_| ());
            if let Err(err) = &outcome {
                warn!(employee_id = %employee.id, year, error = %err, "Annual allotment failed");
            }
            summary.record(&employee.id, outcome);
        }

        info!(
            year,
            succeeded = summary.succeeded.len(),
            failed = summary.failed.len(),
            "Annual allotment batch finished"
        );
        Ok(summary)
    }

    /// Rolls the unused simple-bucket balance of every `from_year` ledger into
    /// the ledger for the following year.
    ///
    /// The carried-over counters of the target ledger are overwritten. The
    /// yearly-split buckets are not carried.
    ///
    /// The source ledger is re-read under its own lock and stays locked while
    /// the target is written. Locks are always taken in year order.
    pub fn carry_over(&self, from_year: i32) -> EngineResult<BatchSummary> {
        let to_year = from_year.checked_add(1).ok_or_else(|| EngineError::CalculationError {
            message: format!("no year follows {}", from_year),
        })?;
        let mut summary = BatchSummary::new(from_year);

        for listed in self.store.ledgers_for_year(from_year)? {
            let employee_id = listed.employee_id;
            let source = LedgerKey::new(employee_id.clone(), from_year);
            let target = LedgerKey::new(employee_id.clone(), to_year);

            let outcome = self.store.with_ledger_lock(&source, |source_txn| {
                let carried = remaining_balance(source_txn.ledger());
                self.store.with_ledger_lock(&target, |txn| {
                    apply_carry_over(txn.ledger_mut(), carried);
                    Ok(())
                })?;
                Ok(carried)
            });
            match &outcome {
                Ok(carried) => debug!(
                    employee_id = %employee_id,
                    workdays = carried.workdays,
                    holiday_leave = carried.holiday_leave,
                    cct_days = carried.cct_days,
                    "Balance carried over"
                ),
                Err(err) => warn!(
                    employee_id = %employee_id,
                    from_year,
                    error = %err,
                    "Carry-over failed"
                ),
            }
            summary.record(&employee_id, outcome.map(|_| ()));
        }

        info!(
            from_year,
            to_year,
            succeeded = summary.succeeded.len(),
            failed = summary.failed.len(),
            "Carry-over batch finished"
        );
        Ok(summary)
    }

    /// Stores a new employee and grants their opening split balance.
    ///
    /// The grant band is chosen by completed years of service today and is
    /// written into the current-year split buckets of this year's ledger.
    /// Returns the grant applied, if any band matched.
    ///
    /// The employee is inserted inside the ledger transaction, so a failed
    /// grant write leaves no employee behind and the call can be retried.
    pub fn onboard_employee(&self, employee: Employee) -> EngineResult<Option<OnboardingGrant>> {
        let today = self.clock.today();
        let years = completed_years(employee.hire_date, today);
        let grant = onboarding_grant(years, self.policy.onboarding());
        let employee_id = employee.id.clone();

        match &grant {
            Some(grant) => {
                self.store
                    .with_ledger_lock(&LedgerKey::new(employee_id.clone(), today.year()), |txn| {
                        self.store.insert_employee(employee)?;
                        apply_onboarding_grant(txn.ledger_mut(), grant);
                        Ok(())
                    })?;
            }
            None => self.store.insert_employee(employee)?,
        }

        info!(
            employee_id = %employee_id,
            completed_years = years,
            granted = grant.is_some(),
            "Employee onboarded"
        );
        Ok(grant)
    }

    /// Validates and stores a new pending request.
    ///
    /// Nothing is debited; the balance check only projects availability.
    pub fn submit_request(
        &self,
        employee_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        is_cct_leave: bool,
    ) -> EngineResult<LeaveRequest> {
        let employee = self.store.employee(employee_id)?;
        let submission = Submission {
            employee_id: employee_id.to_string(),
            start_date,
            end_date,
            is_cct_leave,
        };

        let existing = self.employee_requests(employee_id)?;
        let ledger = self
            .store
            .ledger_or_create(&LedgerKey::new(employee_id, start_date.year()))?;

        if let Err(err) = validate_submission(&submission, self.clock.today(), &existing, &ledger.split) {
            info!(employee_id = %employee_id, reason = %err, "Leave request refused");
            return Err(err.into());
        }

        let request = LeaveRequest::new(employee_id, start_date, end_date, is_cct_leave, self.clock.now());
        self.store.insert_request(request.clone())?;

        info!(
            employee_id = %employee_id,
            request_id = %request.id,
            start_date = %start_date,
            end_date = %end_date,
            is_cct_leave,
            "Leave request submitted"
        );
        self.notify(NotificationEvent::Received, &employee, &request);
        Ok(request)
    }

    /// Approves a pending request, debiting the split buckets of the ledger
    /// for its start year.
    ///
    /// The request is re-read under the ledger lock, so of two concurrent
    /// approvals of the same request only one succeeds. If the buckets cannot
    /// cover the request it stays pending and nothing is written.
    pub fn approve(&self, request_id: Uuid) -> EngineResult<ApprovalOutcome> {
        let request = self.pending_request(request_id)?;

        let outcome = self.store.with_ledger_lock(&request.ledger_key(), |txn| {
            let mut current = self.pending_request(request_id)?;
            let result = apply_deduction(txn.ledger_mut(), &current, 1)?;

            current.deduction = result.applied.into();
            current.status = RequestStatus::Approved;
            txn.stage_request(current.clone());

            Ok(ApprovalOutcome {
                request: current,
                audit_steps: result.audit_steps,
            })
        });

        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(request_id = %request_id, error = %err, "Approval failed");
                return Err(err);
            }
        };

        let approved = &outcome.request;
        info!(
            employee_id = %approved.employee_id,
            request_id = %request_id,
            cct_days = approved.deduction.cct_days,
            workdays = approved.deduction.workdays,
            holiday_leave = approved.deduction.holiday_leave,
            "Leave request approved"
        );
        self.notify_employee(NotificationEvent::Approved, approved);
        Ok(outcome)
    }

    /// Rejects a pending request.
    ///
    /// A request that already carries a recorded deduction has it refunded
    /// from the simple `taken` counters, floored at zero.
    pub fn reject(&self, request_id: Uuid) -> EngineResult<LeaveRequest> {
        let request = self.pending_request(request_id)?;

        let rejected = self.store.with_ledger_lock(&request.ledger_key(), |txn| {
            let mut current = self.pending_request(request_id)?;
            if !current.deduction.is_zero() {
                refund_deduction(txn.ledger_mut(), &current.deduction);
            }
            current.status = RequestStatus::Rejected;
            txn.stage_request(current.clone());
            Ok(current)
        })?;

        info!(
            employee_id = %rejected.employee_id,
            request_id = %request_id,
            refunded = !rejected.deduction.is_zero(),
            "Leave request rejected"
        );
        self.notify_employee(NotificationEvent::Rejected, &rejected);
        Ok(rejected)
    }

    /// Overwrites split-bucket fields of an employee's ledger.
    ///
    /// Returns the ledger as committed.
    pub fn adjust_split_balance(
        &self,
        grant: &PrivilegeGrant,
        employee_id: &str,
        year: i32,
        adjustment: &SplitAdjustment,
    ) -> EngineResult<BalanceLedger> {
        self.store.employee(employee_id)?;

        let ledger = self.store.with_ledger_lock(&LedgerKey::new(employee_id, year), |txn| {
            apply_split_adjustment(txn.ledger_mut(), adjustment)?;
            Ok(txn.ledger().clone())
        })?;

        info!(
            subject = %grant.subject(),
            employee_id = %employee_id,
            year,
            "Split balance adjusted"
        );
        Ok(ledger)
    }

    /// Debits the simple buckets in priority order, CCT first.
    ///
    /// Request approval does not use this.
    pub fn debit_simple_buckets(
        &self,
        employee_id: &str,
        year: i32,
        need: SimpleDebitRequest,
    ) -> EngineResult<PriorityDebit> {
        self.store.employee(employee_id)?;

        let debit = self
            .store
            .with_ledger_lock(&LedgerKey::new(employee_id, year), |txn| {
                apply_priority_debit(txn.ledger_mut(), need)
            })
            .inspect_err(|err| {
                warn!(employee_id = %employee_id, year, error = %err, "Simple debit failed")
            })?;

        info!(
            employee_id = %employee_id,
            year,
            cct = debit.cct,
            workdays = debit.workdays,
            holiday = debit.holiday,
            "Simple buckets debited"
        );
        Ok(debit)
    }

    /// An employee's ledger for `year`, created empty if absent.
    pub fn balance(&self, employee_id: &str, year: i32) -> EngineResult<BalanceLedger> {
        self.store.employee(employee_id)?;
        self.store.ledger_or_create(&LedgerKey::new(employee_id, year))
    }

    /// All requests, optionally filtered by status, newest first.
    pub fn requests(&self, status: Option<RequestStatus>) -> EngineResult<Vec<LeaveRequest>> {
        let mut requests: Vec<LeaveRequest> = self
            .store
            .requests()?
            .into_iter()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .collect();
        sort_newest_first(&mut requests);
        Ok(requests)
    }

    /// One employee's requests, newest first.
    pub fn employee_requests(&self, employee_id: &str) -> EngineResult<Vec<LeaveRequest>> {
        let mut requests: Vec<LeaveRequest> = self
            .store
            .requests()?
            .into_iter()
            .filter(|r| r.employee_id == employee_id)
            .collect();
        sort_newest_first(&mut requests);
        Ok(requests)
    }

    fn pending_request(&self, request_id: Uuid) -> EngineResult<LeaveRequest> {
        let request = self.store.request(request_id)?;
        if request.status.is_terminal() {
            return Err(EngineError::InvalidTransition {
                request_id,
                status: request.status,
            });
        }
        Ok(request)
    }

    fn notify_employee(&self, event: NotificationEvent, request: &LeaveRequest) {
        match self.store.employee(&request.employee_id) {
            Ok(employee) => self.notify(event, &employee, request),
            Err(err) => warn!(
                request_id = %request.id,
                error = %err,
                "Notification skipped"
            ),
        }
    }

    fn notify(&self, event: NotificationEvent, employee: &Employee, request: &LeaveRequest) {
        let notification = Notification::for_request(event, employee, request);
        if let Err(err) = self.notifier.deliver(&notification) {
            warn!(
                request_id = %request.id,
                event = %event,
                error = %err,
                "Notification delivery failed"
            );
        }
    }
}

fn sort_newest_first(requests: &mut [LeaveRequest]) {
    requests.sort_by(|a, b| b.requested_at.cmp(&a.requested_at).then(a.id.cmp(&b.id)));
}
