use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::carry_over::CarryOverPolicy;
use crate::domain::error::FeeResult;
use crate::domain::models::StudentFeeState;
use crate::domain::proration::rebuild_schedule;
use crate::storage::traits::{DocumentStore, FeeConfigStorage, StudentDirectory, StudentFeeStorage};
use crate::storage::{DocumentStudentDirectory, FeeConfigRepository, StudentFeeRepository};

/// Read paths over student schedules.
///
/// Single-student reads return the persisted schedule, which lags until the
/// next recompute. Class reads re-derive every schedule from the current
/// config and never write back.
#[derive(Clone)]
pub struct ProjectionService {
    student_fee_repository: StudentFeeRepository,
    fee_config_repository: FeeConfigRepository,
    student_directory: DocumentStudentDirectory,
    carry_over: Arc<dyn CarryOverPolicy>,
}

impl ProjectionService {
    pub fn new(store: Arc<dyn DocumentStore>, carry_over: Arc<dyn CarryOverPolicy>) -> Self {
        Self {
            student_fee_repository: StudentFeeRepository::new(store.clone()),
            fee_config_repository: FeeConfigRepository::new(store.clone()),
            student_directory: DocumentStudentDirectory::new(store),
            carry_over,
        }
    }

    /// The student's state as last written
    pub fn get_student_fee_state(&self, student_id: &str) -> FeeResult<Option<StudentFeeState>> {
        Ok(self.student_fee_repository.get_student_fee_state(student_id)?)
    }

    /// Live schedules for every student of a class, in directory order
    pub fn get_class_students_fee_states(&self, class_id: &str) -> FeeResult<Vec<StudentFeeState>> {
        let config = self.fee_config_repository.get_fee_config(class_id)?;
        let students = self.student_directory.list_students_in_class(class_id)?;

        info!(
            "Projecting {} students in class {} (config present: {})",
            students.len(),
            class_id,
            config.is_some()
        );

        let mut persisted: HashMap<String, StudentFeeState> = self
            .student_fee_repository
            .list_student_fee_states()?
            .into_iter()
            .map(|state| (state.student_id.clone(), state))
            .collect();

        let mut states = Vec::with_capacity(students.len());
        for student in students {
            let mut state = persisted
                .remove(&student.id)
                .unwrap_or_else(|| StudentFeeState::new(&student.id, class_id));

            state.class_id = class_id.to_string();
            state.installments =
                match rebuild_schedule(config.as_ref(), &state, self.carry_over.as_ref()) {
                    Ok(installments) => installments,
                    Err(e) if e.is_absorbable() => {
                        warn!("Cannot project schedule for student {}: {}", state.student_id, e);
                        Vec::new()
                    }
                    Err(e) => return Err(e),
                };

            debug!(
                "Projected student {}: {} installments, total {:?}",
                state.student_id,
                state.installments.len(),
                state.scheduled_total()
            );
            states.push(state);
        }

        Ok(states)
    }
}
