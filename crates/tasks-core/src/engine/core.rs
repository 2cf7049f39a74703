//! Core TaskEngine implementation

use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde_json::json;
use uuid::Uuid;

use crate::errors::TaskError;
use crate::event::{EventStore, InMemoryEventStore, TaskEvent, TaskEventKind};
use crate::hashing::hash_value;
use crate::model::{ExecutionContext, Variables};
use crate::process::ProcessRunner;
use crate::repo::{InMemoryTargetRepository, TargetDefinition, TargetRepository};
use crate::step::{StepDefinition, StepRunResult, StepSignal};

/// Motor de ejecución de targets.
///
/// Orquesta los steps de un target en orden, registra cada transición como
/// evento y se detiene en el primer fallo (fail-fast, first-error-wins).
#[derive(Debug)]
pub struct TaskEngine<E, R, P>
    where E: EventStore,
          R: TargetRepository,
          P: ProcessRunner
{
    event_store: E,
    repository: R,
    runner: P,
    root: PathBuf,
    last_run: Option<Uuid>,
}

impl<P: ProcessRunner> TaskEngine<InMemoryEventStore, InMemoryTargetRepository, P> {
    /// Crea un engine con stores en memoria.
    pub fn in_memory(runner: P, root: impl Into<PathBuf>) -> Self {
        Self::new_with_stores(InMemoryEventStore::default(), InMemoryTargetRepository::new(), runner, root)
    }
}

impl<E, R, P> TaskEngine<E, R, P>
    where E: EventStore,
          R: TargetRepository,
          P: ProcessRunner
{
    pub fn new_with_stores(event_store: E, repository: R, runner: P, root: impl Into<PathBuf>) -> Self {
        Self { event_store,
               repository,
               runner,
               root: root.into(),
               last_run: None }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn runner(&self) -> &P {
        &self.runner
    }

    pub fn event_store(&self) -> &E {
        &self.event_store
    }

    /// Comprueba que todas las variables requeridas por el target estén presentes.
    pub fn validate(&self, definition: &TargetDefinition, variables: &Variables) -> Result<(), TaskError> {
        for key in &definition.required {
            variables.require(key, &definition.name)?;
        }
        Ok(())
    }

    /// Describe los steps que ejecutaría el target, sin lanzar nada.
    pub fn plan(&self, definition: &TargetDefinition, variables: &Variables) -> Result<Vec<String>, TaskError> {
        self.validate(definition, variables)?;
        definition.steps
                  .iter()
                  .map(|s| s.describe(&definition.name, variables))
                  .collect()
    }

    /// Ejecuta el target completo y retorna el ID de la ejecución.
    ///
    /// Un `MissingArgument` se devuelve antes de crear el run: no se emite
    /// ningún evento ni se lanza ningún proceso.
    pub fn run_target(&mut self, definition: &TargetDefinition, variables: &Variables) -> Result<Uuid, TaskError> {
        self.validate(definition, variables)?;
        let run_id = Uuid::new_v4();
        self.last_run = Some(run_id);
        debug!("[tasks-core] run {} target={} hash={}", run_id, definition.name, definition.definition_hash);
        loop {
            match self.next_with(run_id, definition, variables) {
                Ok(()) => continue,
                Err(TaskError::TargetCompleted) => return Ok(run_id),
                Err(e) => return Err(e),
            }
        }
    }

    /// ID de la última ejecución iniciada (exitosa o no).
    pub fn last_run_id(&self) -> Option<Uuid> {
        self.last_run
    }

    fn load_or_init(&mut self, run_id: Uuid, definition: &TargetDefinition) -> Vec<TaskEvent> {
        let mut events = self.event_store.list(run_id);
        let has_init = events.iter()
                             .any(|e| matches!(e.kind, TaskEventKind::TargetInitialized { .. }));
        if !has_init {
            let ev = self.event_store
                         .append_kind(run_id,
                                      TaskEventKind::TargetInitialized { target: definition.name.clone(),
                                                                         definition_hash:
                                                                             definition.definition_hash.clone(),
                                                                         step_count: definition.len() });
            events.push(ev);
        }
        events
    }

    /// Ejecuta el siguiente step pendiente del run.
    pub(crate) fn next_with(&mut self,
                            run_id: Uuid,
                            definition: &TargetDefinition,
                            variables: &Variables)
                            -> Result<(), TaskError> {
        let events = self.load_or_init(run_id, definition);
        let instance = self.repository.load(run_id, &events, definition);

        if instance.completed {
            return Err(TaskError::TargetCompleted);
        }

        let cursor = instance.cursor;
        if cursor >= definition.len() {
            // Target sin steps pendientes pero aún sin cierre (p. ej. vacío).
            self.complete_run(run_id, definition);
            return Err(TaskError::TargetCompleted);
        }

        let step_def = definition.steps[cursor].as_ref();
        self.event_store.append_kind(run_id,
                                     TaskEventKind::StepStarted { step_index: cursor,
                                                                  step_id: step_def.id().to_string() });
        debug!("[tasks-core] step {} ({}) iniciado", cursor, step_def.id());

        let ctx = ExecutionContext { target: &definition.name,
                                     variables,
                                     root: &self.root,
                                     runner: &self.runner };
        let run_res = step_def.run(&ctx);

        match run_res {
            StepRunResult::Success { outputs } => self.handle_step_success(run_id, cursor, step_def, outputs, vec![]),
            StepRunResult::SuccessWithSignals { outputs, signals } => {
                self.handle_step_success(run_id, cursor, step_def, outputs, signals)
            }
            StepRunResult::Failure { error } => self.handle_step_failure(run_id, cursor, step_def, error),
        }?;

        if cursor + 1 == definition.len() {
            self.complete_run(run_id, definition);
        }
        Ok(())
    }

    fn handle_step_success(&mut self,
                           run_id: Uuid,
                           cursor: usize,
                           step_def: &dyn StepDefinition,
                           outputs: Vec<String>,
                           signals: Vec<StepSignal>)
                           -> Result<(), TaskError> {
        for s in signals {
            self.event_store.append_kind(run_id,
                                         TaskEventKind::StepSignal { step_index: cursor,
                                                                     step_id: step_def.id().to_string(),
                                                                     signal: s.signal,
                                                                     data: s.data });
        }
        self.event_store.append_kind(run_id,
                                     TaskEventKind::StepFinished { step_index: cursor,
                                                                   step_id: step_def.id().to_string(),
                                                                   outputs });
        Ok(())
    }

    fn handle_step_failure(&mut self,
                           run_id: Uuid,
                           cursor: usize,
                           step_def: &dyn StepDefinition,
                           error: TaskError)
                           -> Result<(), TaskError> {
        warn!("[tasks-core] step {} ({}) falló: {}", cursor, step_def.id(), error);
        self.event_store.append_kind(run_id,
                                     TaskEventKind::StepFailed { step_index: cursor,
                                                                 step_id: step_def.id().to_string(),
                                                                 error: error.clone() });
        Err(error)
    }

    fn complete_run(&mut self, run_id: Uuid, definition: &TargetDefinition) {
        let step_outputs: Vec<Vec<String>> = self.event_store
                                                 .list(run_id)
                                                 .into_iter()
                                                 .filter_map(|e| match e.kind {
                                                     TaskEventKind::StepFinished { outputs, .. } => Some(outputs),
                                                     _ => None,
                                                 })
                                                 .collect();
        let run_fp = hash_value(&json!({
                                    "engine_version": crate::constants::ENGINE_VERSION,
                                    "definition_hash": definition.definition_hash,
                                    "step_outputs": step_outputs
                                }));
        self.event_store
            .append_kind(run_id, TaskEventKind::TargetCompleted { run_fingerprint: run_fp });
    }

    /// Lista eventos de una ejecución.
    pub fn events_for(&self, run_id: Uuid) -> Vec<TaskEvent> {
        self.event_store.list(run_id)
    }

    /// Variante compacta de eventos de una ejecución.
    pub fn event_variants(&self, run_id: Uuid) -> Vec<&'static str> {
        self.events_for(run_id)
            .iter()
            .map(|e| match e.kind {
                TaskEventKind::TargetInitialized { .. } => "I",
                TaskEventKind::StepStarted { .. } => "S",
                TaskEventKind::StepFinished { .. } => "F",
                TaskEventKind::StepFailed { .. } => "X",
                TaskEventKind::StepSignal { .. } => "G",
                TaskEventKind::TargetCompleted { .. } => "C",
            })
            .collect()
    }

    /// Fingerprint de la ejecución si llegó a completarse.
    pub fn run_fingerprint(&self, run_id: Uuid) -> Option<String> {
        self.events_for(run_id).iter().rev().find_map(|e| match &e.kind {
                                                TaskEventKind::TargetCompleted { run_fingerprint } => {
                                                    Some(run_fingerprint.clone())
                                                }
                                                _ => None,
                                            })
    }
}
