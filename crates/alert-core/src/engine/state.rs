use std::collections::BTreeSet;

use serde::Serialize;

use crate::schedule::PendingCommit;
use crate::step::{StepId, StepStatus};

/// Estado mutable de una sesión. Sólo el controlador (o el replay) lo cambia.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowState {
    current: StepId,
    completed: BTreeSet<StepId>,
    skipped: BTreeSet<StepId>,
    input: String,
    processing: bool,
    response_visible: bool,
}

impl FlowState {
    /// Estado inicial: en `entry`, sin historial y con la respuesta oculta
    /// hasta la primera revelación.
    pub fn new(entry: StepId) -> Self {
        Self { current: entry,
               completed: BTreeSet::new(),
               skipped: BTreeSet::new(),
               input: String::new(),
               processing: false,
               response_visible: false }
    }

    pub fn current(&self) -> StepId {
        self.current
    }

    pub fn completed(&self) -> &BTreeSet<StepId> {
        &self.completed
    }

    pub fn skipped(&self) -> &BTreeSet<StepId> {
        &self.skipped
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn response_visible(&self) -> bool {
        self.response_visible
    }

    /// `Current` > `Completed` > `Skipped` > `Pending`.
    pub fn status(&self, id: StepId) -> StepStatus {
        if self.current == id {
            StepStatus::Current
        } else if self.completed.contains(&id) {
            StepStatus::Completed
        } else if self.skipped.contains(&id) {
            StepStatus::Skipped
        } else {
            StepStatus::Pending
        }
    }

    pub(crate) fn set_input(&mut self, text: String) {
        self.input = text;
    }

    pub(crate) fn push_input(&mut self, text: &str) {
        if !self.input.is_empty() {
            self.input.push('\n');
        }
        self.input.push_str(text);
    }

    pub(crate) fn begin_processing(&mut self) {
        self.processing = true;
        self.response_visible = false;
    }

    pub(crate) fn mark_completed(&mut self, id: StepId) {
        self.completed.insert(id);
    }

    pub(crate) fn mark_skipped(&mut self, id: StepId) {
        self.skipped.insert(id);
    }

    pub(crate) fn enter(&mut self, id: StepId) {
        self.current = id;
        self.input.clear();
    }

    pub(crate) fn apply_commit(&mut self, commit: &PendingCommit) {
        self.mark_completed(commit.from);
        if let Some(skipped) = commit.skipped {
            self.mark_skipped(skipped);
        }
        self.enter(commit.to);
    }

    pub(crate) fn apply_reveal(&mut self) {
        self.processing = false;
        self.response_visible = true;
    }
}
