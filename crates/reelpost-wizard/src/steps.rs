//! Step sequencing for the publish wizard.
//!
//! The controller walks a fixed, ordered list of step views. Positions `0..len` are the
//! steps themselves; position `len` is the terminal completed state, entered only through
//! [`StepController::jump_past_end`]. No navigation leaves the completed state.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// The views of the publish wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepView {
    Details,
    Thumbnail,
    Visibility,
}

impl StepView {
    pub const ALL: [StepView; 3] = [StepView::Details, StepView::Thumbnail, StepView::Visibility];
}

impl Display for StepView {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StepView::Details => write!(f, "details"),
            StepView::Thumbnail => write!(f, "thumbnail"),
            StepView::Visibility => write!(f, "visibility"),
        }
    }
}

/// Where the controller currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPosition {
    Step(usize),
    Completed,
}

/// Display status of one step indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Inactive,
    Active,
    Complete,
}

#[derive(Debug, Clone)]
pub struct StepController<V> {
    steps: Vec<V>,
    // Equal to steps.len() once completed.
    index: usize,
}

impl StepController<StepView> {
    /// Controller over the three publish steps, starting at the details view.
    pub fn publish_steps() -> Self {
        Self {
            steps: StepView::ALL.to_vec(),
            index: 0,
        }
    }
}

impl<V> StepController<V> {
    /// Returns `None` when `steps` is empty.
    pub fn new(steps: Vec<V>) -> Option<Self> {
        if steps.is_empty() {
            return None;
        }
        Some(Self { steps, index: 0 })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[V] {
        &self.steps
    }

    /// The active view, or `None` in the completed state.
    pub fn current(&self) -> Option<&V> {
        self.steps.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn position(&self) -> StepPosition {
        if self.is_completed() {
            StepPosition::Completed
        } else {
            StepPosition::Step(self.index)
        }
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.steps.len()
    }

    pub fn is_completed(&self) -> bool {
        self.index >= self.steps.len()
    }

    /// Move to the next step. Returns whether the position changed.
    pub fn advance(&mut self) -> bool {
        if self.is_completed() || self.is_last() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Move to the previous step. Returns whether the position changed.
    pub fn retreat(&mut self) -> bool {
        if self.is_completed() || self.is_first() {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Enter the terminal completed state.
    pub fn jump_past_end(&mut self) {
        self.index = self.steps.len();
    }

    /// Status of the indicator for the step at `step_index` (0-based).
    pub fn status_of(&self, step_index: usize) -> StepStatus {
        match step_index.cmp(&self.index) {
            std::cmp::Ordering::Equal => StepStatus::Active,
            std::cmp::Ordering::Greater => StepStatus::Inactive,
            std::cmp::Ordering::Less => StepStatus::Complete,
        }
    }

    /// Status of every indicator, in step order.
    pub fn statuses(&self) -> Vec<StepStatus> {
        (0..self.steps.len()).map(|i| self.status_of(i)).collect()
    }
}
