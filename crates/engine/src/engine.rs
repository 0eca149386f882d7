#![forbid(unsafe_code)]

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::session::{Session, SessionId, SessionRegistry};
use crate::views::{ChecklistView, HistoryView, ItemInput, SubmitOutcome};
use ck_core::day::timestamp_ms;
use ck_core::draft::{merge_item_states, submission_batch};
use ck_core::{
    ChecklistItem, ChecklistResponse, Day, DraftAnswer, Employee, EmployeeName, ItemId,
    RoleLabel, ValidationMode, ValidationPolicy, Violation, ViolationKind,
};
use ck_storage::{
    EvidenceFs, EvidenceStore, HistoryRequest, LocalFs, SaveResponsesRequest,
    SaveResponsesResult, SeedOutcome, SqliteStore, StoreError, StoreEvidenceRequest,
    load_catalog_seed,
};
use std::path::Path;
use time::OffsetDateTime;
use tracing::{debug, info};

const EVIDENCE_DIR: &str = "evidence";
const HISTORY_LIMIT: usize = 1000;

/// Orchestrates one checklist deployment: catalog lookups, draft merging,
/// validation, evidence uploads and the daily completion gate.
///
/// Every time-dependent operation takes `now` from the caller; the engine
/// never reads the clock itself.
#[derive(Debug)]
pub struct ChecklistEngine<F = LocalFs> {
    store: SqliteStore,
    evidence: EvidenceStore<F>,
    policy: ValidationPolicy,
}

impl ChecklistEngine<LocalFs> {
    /// Opens `<root>/checklist.db`, seeds the default catalog into empty tables
    /// and keeps evidence under `<root>/evidence`.
    pub fn open(config: &EngineConfig) -> Result<Self, EngineError> {
        let root = config.resolve_storage_root();
        let mut store = SqliteStore::open(&root)?;
        let seeded = store.seed_defaults()?;
        if seeded.employees_inserted > 0 || seeded.items_inserted > 0 {
            info!(
                employees = seeded.employees_inserted,
                items = seeded.items_inserted,
                "default catalog seeded"
            );
        }
        let evidence = EvidenceStore::local(root.join(EVIDENCE_DIR));
        info!(
            root = %root.display(),
            validation_mode = config.validation_mode.as_str(),
            error_detail = config.error_detail.as_str(),
            "checklist engine ready"
        );
        Ok(Self::new(store, evidence, config.policy()))
    }
}

impl<F: EvidenceFs> ChecklistEngine<F> {
    pub fn new(store: SqliteStore, evidence: EvidenceStore<F>, policy: ValidationPolicy) -> Self {
        Self {
            store,
            evidence,
            policy,
        }
    }

    pub fn store(&self) -> &SqliteStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SqliteStore {
        &mut self.store
    }

    pub fn evidence(&self) -> &EvidenceStore<F> {
        &self.evidence
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    /// Loads a JSON catalog into still-empty tables.
    pub fn import_catalog(&mut self, path: impl AsRef<Path>) -> Result<SeedOutcome, EngineError> {
        let seed = load_catalog_seed(path)?;
        Ok(self.store.seed_catalog(&seed)?)
    }

    /// Exact name, case-insensitive role.
    pub fn login(&self, name: &str, role: &str) -> Result<Employee, EngineError> {
        let not_found = || EngineError::NotFound(format!("no employee {name:?} with role {role:?}"));
        let (Ok(name), Ok(role)) = (EmployeeName::try_new(name), RoleLabel::try_new(role)) else {
            return Err(not_found());
        };
        match self.store.find_employee(&name, &role)? {
            Some(employee) => {
                info!(employee_id = %employee.id, role = employee.role.as_str(), "login");
                Ok(employee)
            }
            None => {
                debug!(name = name.as_str(), role = role.as_str(), "login rejected");
                Err(not_found())
            }
        }
    }

    /// Logs in and registers a fresh session with an empty draft.
    pub fn start_session(
        &self,
        registry: &mut SessionRegistry,
        name: &str,
        role: &str,
    ) -> Result<SessionId, EngineError> {
        let employee = self.login(name, role)?;
        Ok(registry.insert(employee))
    }

    /// Catalog items for the role in id order. Empty for an unknown role.
    pub fn items_for_role(&self, role: &RoleLabel) -> Result<Vec<ChecklistItem>, EngineError> {
        Ok(self.store.items_for_role(role)?)
    }

    pub fn already_completed_today(
        &self,
        session: &Session,
        now: OffsetDateTime,
    ) -> Result<bool, EngineError> {
        let employee = session.employee();
        Ok(self
            .store
            .already_completed_today(employee.id, &employee.role, Day::of(now))?)
    }

    pub fn open_checklist(
        &self,
        session: &Session,
        now: OffsetDateTime,
    ) -> Result<ChecklistView, EngineError> {
        let employee = session.employee();
        let day = Day::of(now);
        let items = self.catalog(employee)?;
        let persisted = self.store.responses_for_day(employee.id, day)?;
        let counts = self
            .store
            .completion_counts(employee.id, &employee.role, day)?;

        Ok(ChecklistView {
            employee: employee.name.as_str().to_string(),
            role: employee.role.as_str().to_string(),
            day,
            counts,
            completed_today: counts.is_complete(),
            items: merge_item_states(&items, &persisted, &session.draft, day),
        })
    }

    /// Records one widget change in the session draft.
    ///
    /// An upload is written to the evidence store right away; without one the
    /// draft keeps the evidence it already had for the item, if that was
    /// captured on the same day.
    pub fn record_input(
        &self,
        session: &mut Session,
        input: ItemInput,
        now: OffsetDateTime,
    ) -> Result<DraftAnswer, EngineError> {
        let ItemInput {
            item_id,
            done,
            comment,
            upload,
        } = input;
        let employee = session.employee().clone();
        let day = Day::of(now);
        let items = self.catalog(&employee)?;
        if !items.iter().any(|item| item.id == item_id) {
            return Err(EngineError::Validation(vec![Violation::for_item(
                item_id,
                ViolationKind::UnknownItem,
            )]));
        }

        let evidence_path = match upload {
            Some(upload) => {
                let stored = self.evidence.store(StoreEvidenceRequest {
                    employee: &employee,
                    day,
                    item_id,
                    bytes: &upload.bytes,
                    extension: &upload.extension,
                });
                match stored {
                    Ok(path) => Some(path.to_string_lossy().into_owned()),
                    Err(StoreError::InvalidInput(reason)) => {
                        debug!(item_id = %item_id, reason, "upload rejected");
                        return Err(EngineError::Validation(vec![Violation::for_item(
                            item_id,
                            ViolationKind::InvalidUpload,
                        )]));
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            None => session
                .draft
                .answer_on(item_id, day)
                .and_then(|answer| answer.evidence_path),
        };

        let answer = DraftAnswer::new(item_id, done, comment, evidence_path);
        session.draft.put(answer.clone(), day);
        Ok(answer)
    }

    /// Validates the session's answers and saves the accepted ones.
    ///
    /// Entries that already match today's saved row are reported as unchanged
    /// and not rewritten. The draft is kept so the form keeps showing what was
    /// just saved.
    pub fn submit(
        &mut self,
        session: &mut Session,
        now: OffsetDateTime,
    ) -> Result<SubmitOutcome, EngineError> {
        let employee = session.employee().clone();
        let day = Day::of(now);

        if self
            .store
            .already_completed_today(employee.id, &employee.role, day)?
        {
            return Err(EngineError::AlreadyCompleted);
        }

        let items = self.catalog(&employee)?;
        let persisted = self.store.responses_for_day(employee.id, day)?;
        let batch = submission_batch(&items, &persisted, &session.draft, day);

        let policy = self.policy;
        let evidence = &self.evidence;
        let report = policy.validate(&batch, |path| evidence.exists(path));

        if !report.violations.is_empty()
            && (policy.mode == ValidationMode::StrictAll || report.accepted.is_empty())
        {
            debug!(
                employee_id = %employee.id,
                violations = report.violations.len(),
                mode = policy.mode.as_str(),
                "submission rejected"
            );
            return Err(EngineError::Validation(report.violations));
        }
        if report.accepted.is_empty() {
            return Err(EngineError::Validation(vec![Violation::batch(
                ViolationKind::NothingToSave,
            )]));
        }

        let (unchanged, to_write): (Vec<DraftAnswer>, Vec<DraftAnswer>) = report
            .accepted
            .into_iter()
            .partition(|answer| matches_saved(answer, &persisted));

        let saved = if to_write.is_empty() {
            SaveResponsesResult::default()
        } else {
            self.store.save_responses(SaveResponsesRequest {
                employee_name: employee.name.clone(),
                role: employee.role.clone(),
                answers: to_write,
                submitted_at_ms: timestamp_ms(now),
                day,
            })?
        };

        let counts = self
            .store
            .completion_counts(employee.id, &employee.role, day)?;
        let outcome = SubmitOutcome {
            inserted: saved.inserted,
            updated: saved.updated,
            unchanged: item_ids(&unchanged),
            skipped: report.skipped,
            violations: report.violations,
            counts,
            completed_today: counts.is_complete(),
        };

        info!(
            employee_id = %employee.id,
            day = %day.as_key(),
            inserted = outcome.inserted.len(),
            updated = outcome.updated.len(),
            unchanged = outcome.unchanged.len(),
            rejected = outcome.violations.len(),
            completed = outcome.completed_today,
            "checklist submitted"
        );
        Ok(outcome)
    }

    /// Days with saved responses for the session's employee and the rows of
    /// `day`, or of the newest day when none is given.
    pub fn history(
        &self,
        session: &Session,
        day: Option<Day>,
    ) -> Result<HistoryView, EngineError> {
        let employee_id = session.employee().id;
        let days = self.store.history_days(employee_id)?;
        let selected_day = day.or_else(|| days.first().copied());
        let entries = match selected_day {
            Some(day) => self.store.history(HistoryRequest {
                employee_id,
                day: Some(day),
                limit: HISTORY_LIMIT,
            })?,
            None => Vec::new(),
        };
        Ok(HistoryView {
            days,
            selected_day,
            entries,
        })
    }

    /// Deletes every saved response of `day`, for all employees.
    pub fn purge_day(&mut self, day: Day) -> Result<usize, EngineError> {
        Ok(self.store.purge_day(day)?)
    }

    fn catalog(&self, employee: &Employee) -> Result<Vec<ChecklistItem>, EngineError> {
        let items = self.store.items_for_role(&employee.role)?;
        if items.is_empty() {
            return Err(EngineError::NotFound(format!(
                "no checklist items for role {}",
                employee.role.as_str()
            )));
        }
        Ok(items)
    }
}

fn matches_saved(answer: &DraftAnswer, persisted: &[ChecklistResponse]) -> bool {
    let saved: Option<&ChecklistResponse> = persisted
        .iter()
        .filter(|row| row.item_id == answer.item_id)
        .max_by_key(|row| row.submitted_at_ms);
    saved.is_some_and(|row| row.to_answer() == *answer)
}

fn item_ids(answers: &[DraftAnswer]) -> Vec<ItemId> {
    answers.iter().map(|answer| answer.item_id).collect()
}
