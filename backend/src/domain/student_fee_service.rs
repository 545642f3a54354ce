use log::{debug, info, warn};
use rust_decimal::Decimal;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::domain::carry_over::CarryOverPolicy;
use crate::domain::commands::student_fees::{RecomputeClassResult, UpsertExtraFeesCommand};
use crate::domain::error::{FeeError, FeeResult};
use crate::domain::models::{ClassFeeConfig, StudentFeeState};
use crate::domain::money;
use crate::domain::proration::rebuild_schedule;
use crate::storage::traits::{DocumentStore, FeeConfigStorage, StudentDirectory, StudentFeeStorage};
use crate::storage::{DocumentStudentDirectory, FeeConfigRepository, StudentFeeRepository};

/// Service for the per-student extra-fee ledger and explicit recomputation
/// of persisted installment schedules.
///
/// Writes never recompute on their own: a schedule only changes when one of
/// the recompute operations is called.
#[derive(Clone)]
pub struct StudentFeeService {
    student_fee_repository: StudentFeeRepository,
    fee_config_repository: FeeConfigRepository,
    student_directory: DocumentStudentDirectory,
    carry_over: Arc<dyn CarryOverPolicy>,
}

impl StudentFeeService {
    /// Create a new StudentFeeService
    pub fn new(store: Arc<dyn DocumentStore>, carry_over: Arc<dyn CarryOverPolicy>) -> Self {
        Self {
            student_fee_repository: StudentFeeRepository::new(store.clone()),
            fee_config_repository: FeeConfigRepository::new(store.clone()),
            student_directory: DocumentStudentDirectory::new(store),
            carry_over,
        }
    }

    /// Merge extra charges into a student's ledger, creating the ledger if
    /// needed. Installments are left as they are.
    pub fn upsert_extra_fees(&self, command: UpsertExtraFeesCommand) -> FeeResult<StudentFeeState> {
        info!("Upserting extra fees: {:?}", command);

        for (name, amount) in &command.extra {
            money::ensure_amount(&format!("Extra fee '{}'", name), *amount)?;
        }

        let mut state = self
            .student_fee_repository
            .get_student_fee_state(&command.student_id)?
            .unwrap_or_else(|| StudentFeeState::new(&command.student_id, &command.class_id));

        if state.class_id != command.class_id {
            info!(
                "Student {} moved from class {} to {}",
                state.student_id, state.class_id, command.class_id
            );
            state.class_id = command.class_id;
        }
        state.extra_fees.extend(command.extra);

        let within_limit = state
            .extra_total()
            .map_or(false, |total| total <= Decimal::from(money::MAX_AMOUNT));
        if !within_limit {
            return Err(FeeError::InvalidConfiguration(format!(
                "Extra fees for student {} exceed the maximum of {}",
                state.student_id,
                money::MAX_AMOUNT
            )));
        }

        self.student_fee_repository.store_student_fee_state(&state)?;

        info!(
            "Student {} now has {} extra fees totalling {:?}",
            state.student_id,
            state.extra_fees.len(),
            state.extra_total()
        );
        Ok(state)
    }

    /// Rebuild and persist a student's schedule from the current class config,
    /// carrying payment flags over from the previous schedule.
    ///
    /// Fails with `NotFound` when the student's class cannot be determined or
    /// the class has no fee config.
    pub fn try_recompute_installments(&self, student_id: &str) -> FeeResult<StudentFeeState> {
        let state = match self.student_fee_repository.get_student_fee_state(student_id)? {
            Some(state) => state,
            None => {
                let student = self
                    .student_directory
                    .get_student(student_id)?
                    .ok_or_else(|| FeeError::not_found("Student", student_id))?;
                StudentFeeState::new(student_id, &student.class_id)
            }
        };

        let config = self
            .fee_config_repository
            .get_fee_config(&state.class_id)?
            .ok_or_else(|| FeeError::not_found("Fee config", &state.class_id))?;

        self.rebuild_and_store(state, &config)
    }

    fn rebuild_and_store(
        &self,
        mut state: StudentFeeState,
        config: &ClassFeeConfig,
    ) -> FeeResult<StudentFeeState> {
        state.installments = rebuild_schedule(Some(config), &state, self.carry_over.as_ref())?;
        self.student_fee_repository.store_student_fee_state(&state)?;

        debug!(
            "Recomputed {} installments for student {} (total {:?})",
            state.installments.len(),
            state.student_id,
            state.scheduled_total()
        );
        Ok(state)
    }

    /// Recompute a student's schedule; a missing class or config is a silent
    /// no-op
    pub fn recompute_installments(&self, student_id: &str) -> FeeResult<()> {
        info!("Recomputing installments for student: {}", student_id);

        match self.try_recompute_installments(student_id) {
            Ok(_) => Ok(()),
            Err(e) if e.is_absorbable() => {
                warn!("Skipping recompute for student {}: {}", student_id, e);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Upsert extra fees and recompute the student's schedule in one call.
    /// Returns the persisted state, which is only recomputed when the class
    /// has a fee config.
    pub fn update_and_recompute(&self, command: UpsertExtraFeesCommand) -> FeeResult<StudentFeeState> {
        let student_id = command.student_id.clone();
        let upserted = self.upsert_extra_fees(command)?;

        match self.try_recompute_installments(&student_id) {
            Ok(state) => Ok(state),
            Err(e) if e.is_absorbable() => {
                warn!("Extra fees saved without recompute for student {}: {}", student_id, e);
                Ok(upserted)
            }
            Err(e) => Err(e),
        }
    }

    /// Recompute every student of a class: directory members plus any
    /// persisted state that points at the class. A directory member billed to
    /// another class is left alone. Returns the number of schedules written;
    /// zero when the class has no fee config.
    pub fn recompute_class(&self, class_id: &str) -> FeeResult<RecomputeClassResult> {
        info!("Recomputing installments for class: {}", class_id);

        let config = match self.fee_config_repository.get_fee_config(class_id)? {
            Some(config) => config,
            None => {
                warn!("No fee config for class {}, nothing to recompute", class_id);
                return Ok(RecomputeClassResult {
                    class_id: class_id.to_string(),
                    recomputed_count: 0,
                });
            }
        };

        let mut states: HashMap<String, StudentFeeState> = self
            .student_fee_repository
            .list_student_fee_states()?
            .into_iter()
            .map(|state| (state.student_id.clone(), state))
            .collect();

        let mut student_ids: Vec<String> = Vec::new();
        let mut seen = BTreeSet::new();
        let members = self.student_directory.list_students_in_class(class_id)?;
        let persisted = states
            .values()
            .filter(|state| state.class_id == class_id)
            .map(|state| state.student_id.clone())
            .collect::<BTreeSet<_>>();

        for id in members.into_iter().map(|s| s.id).chain(persisted) {
            if seen.insert(id.clone()) {
                student_ids.push(id);
            }
        }

        let mut recomputed_count = 0;
        for student_id in student_ids {
            let state = match states.remove(&student_id) {
                // The persisted class wins over the directory
                Some(state) if state.class_id != class_id => {
                    debug!(
                        "Student {} is listed in class {} but billed to {}, skipping",
                        student_id, class_id, state.class_id
                    );
                    continue;
                }
                Some(state) => state,
                None => StudentFeeState::new(&student_id, class_id),
            };

            match self.rebuild_and_store(state, &config) {
                Ok(_) => recomputed_count += 1,
                Err(e) if e.is_absorbable() => {
                    warn!("Skipping student {} in class {}: {}", student_id, class_id, e)
                }
                Err(e) => return Err(e),
            }
        }

        info!("Recomputed {} students in class {}", recomputed_count, class_id);
        Ok(RecomputeClassResult {
            class_id: class_id.to_string(),
            recomputed_count,
        })
    }

    /// Drop a student's fee state; called when the student is removed from
    /// the directory
    pub fn remove_student_fee_state(&self, student_id: &str) -> FeeResult<bool> {
        let deleted = self
            .student_fee_repository
            .delete_student_fee_state(student_id)?;

        if deleted {
            info!("Removed fee state for student: {}", student_id);
        } else {
            warn!("No fee state found to remove for student: {}", student_id);
        }
        Ok(deleted)
    }
}
