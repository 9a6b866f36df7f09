//! The working array plus the step list a run appends to.
//!
//! Every append goes through the run's checkpoint first, so a paused run blocks
//! before its next step and a stopped run unwinds with the steps recorded so far.

use std::time::Duration;

use crossbeam::channel::Sender;
use sk_common::{Element, ElementState, SortError, SortResult, Step, StepType};

use crate::control::{RunControl, RunToken};

/// Receives a copy of every step as it is appended.
pub trait StepSink: Send {
    fn accept(&self, step: &Step);
}

impl StepSink for Sender<Step> {
    fn accept(&self, step: &Step) {
        // A dropped receiver only means nobody is watching.
        let _ = self.send(step.clone());
    }
}

pub struct StepRecorder<'a> {
    elements: Vec<Element>,
    steps: Vec<Step>,
    control: &'a RunControl,
    run: RunToken,
    delay: u64,
    pace: bool,
    events: Option<Box<dyn StepSink>>,
    max_counting_span: u64,
}

impl<'a> StepRecorder<'a> {
    /// Record against the latest run generation of `control`.
    pub fn new(elements: Vec<Element>, control: &'a RunControl, delay: u64) -> Self {
        Self {
            elements,
            steps: Vec::new(),
            run: control.current_run(),
            control,
            delay,
            pace: false,
            events: None,
            max_counting_span: u64::MAX,
        }
    }

    /// Checkpoint against the claim `run` instead of the latest generation.
    pub fn with_run(mut self, run: RunToken) -> Self {
        self.run = run;
        self
    }

    /// Sleep for the step delay after every append.
    pub fn with_pacing(mut self, pace: bool) -> Self {
        self.pace = pace;
        self
    }

    /// Forward every appended step to `events`.
    pub fn with_events(mut self, events: Option<Box<dyn StepSink>>) -> Self {
        self.events = events;
        self
    }

    pub fn with_max_counting_span(mut self, span: u64) -> Self {
        self.max_counting_span = span;
        self
    }

    pub fn control(&self) -> &RunControl {
        self.control
    }

    pub fn max_counting_span(&self) -> u64 {
        self.max_counting_span
    }

    // ── Working array ───────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, index: usize) -> &Element {
        &self.elements[index]
    }

    pub fn value(&self, index: usize) -> i64 {
        self.elements[index].value
    }

    /// Smallest and largest value. `None` on an empty array.
    pub fn bounds(&self) -> Option<(i64, i64)> {
        let min = self.elements.iter().map(|e| e.value).min()?;
        let max = self.elements.iter().map(|e| e.value).max()?;
        Some((min, max))
    }

    pub fn set_state(&mut self, index: usize, state: ElementState) {
        self.elements[index].state = state;
    }

    pub fn mark_sorted(&mut self, index: usize) {
        self.elements[index].mark_sorted();
    }

    pub fn mark_all_sorted(&mut self) {
        for element in &mut self.elements {
            element.mark_sorted();
        }
    }

    /// Replace the whole working array with a rearrangement of itself.
    pub fn replace_all(&mut self, elements: Vec<Element>) {
        debug_assert_eq!(elements.len(), self.elements.len());
        self.elements = elements;
        for (i, element) in self.elements.iter_mut().enumerate() {
            element.position = i;
        }
    }

    // ── Steps ───────────────────────────────────────────────────

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }

    /// Checkpoint, then append a step of `step_type`.
    pub fn record(
        &mut self,
        step_type: StepType,
        indices: Vec<usize>,
        description: impl Into<String>,
    ) -> SortResult<()> {
        self.checkpoint()?;
        self.push(step_type, indices, description)
    }

    pub fn compare(&mut self, indices: Vec<usize>, description: impl Into<String>) -> SortResult<()> {
        self.record(StepType::Compare, indices, description)
    }

    pub fn highlight(&mut self, indices: Vec<usize>, description: impl Into<String>) -> SortResult<()> {
        self.record(StepType::Highlight, indices, description)
    }

    pub fn moved(&mut self, indices: Vec<usize>, description: impl Into<String>) -> SortResult<()> {
        self.record(StepType::Move, indices, description)
    }

    /// Record a `Swap` of slots `a` and `b`, then exchange them.
    ///
    /// The snapshot shows both elements in the `Swapping` state before the
    /// exchange; afterwards both are back to `Normal`.
    pub fn swap(&mut self, a: usize, b: usize, description: impl Into<String>) -> SortResult<()> {
        self.elements[a].state = ElementState::Swapping;
        self.elements[b].state = ElementState::Swapping;
        self.record(StepType::Swap, vec![a, b], description)?;
        self.exchange(a, b);
        Ok(())
    }

    /// Record a `Move` shifting slot `from` into slot `to`, then exchange them.
    ///
    /// Used for insertion-style shifts: the larger element moves up one slot
    /// (or one gap) and the key being inserted moves down.
    pub fn shift(&mut self, from: usize, to: usize, description: impl Into<String>) -> SortResult<()> {
        self.record(StepType::Move, vec![from, to], description)?;
        self.exchange(from, to);
        Ok(())
    }

    /// Write `element` into slot `index` and record a `Move` of that slot.
    pub fn place(
        &mut self,
        index: usize,
        mut element: Element,
        description: impl Into<String>,
    ) -> SortResult<()> {
        self.checkpoint()?;
        element.position = index;
        element.state = ElementState::Normal;
        self.elements[index] = element;
        self.push(StepType::Move, vec![index], description)
    }

    /// Mark every element sorted and append the terminal `Sorted` step.
    pub fn finish(&mut self, description: impl Into<String>) -> SortResult<()> {
        self.checkpoint()?;
        self.mark_all_sorted();
        self.push(StepType::Sorted, Vec::new(), description)
    }

    fn exchange(&mut self, a: usize, b: usize) {
        self.elements.swap(a, b);
        for index in [a, b] {
            let element = &mut self.elements[index];
            element.position = index;
            element.state = ElementState::Normal;
        }
    }

    fn checkpoint(&self) -> SortResult<()> {
        self.control.checkpoint(self.run).map_err(|_| SortError::SortStopped {
            recorded: self.steps.len(),
        })
    }

    fn push(
        &mut self,
        step_type: StepType,
        indices: Vec<usize>,
        description: impl Into<String>,
    ) -> SortResult<()> {
        let step = Step::new(
            step_type,
            indices,
            description,
            self.elements.clone(),
            self.delay,
        );
        if let Some(events) = &self.events {
            events.accept(&step);
        }
        self.steps.push(step);

        if self.pace && self.delay > 0 {
            self.control
                .sleep(self.run, Duration::from_millis(self.delay))
                .map_err(|_| SortError::SortStopped {
                    recorded: self.steps.len(),
                })?;
        }
        Ok(())
    }
}
