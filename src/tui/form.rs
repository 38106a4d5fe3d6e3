//! Form state behind the "Input Parameters" sidebar.
//!
//! Kept free of terminal types so it can be driven directly from tests. The
//! form can only ever hold in-range values: every adjustment clamps to the
//! field's bounds.

use crate::domain::{FeatureVector, Field, JobCategory};

/// A selectable row in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Input(Field),
    Predict,
}

pub const ROWS: [Row; 6] = [
    Row::Input(Field::CreditScore),
    Row::Input(Field::AccountBalance),
    Row::Input(Field::TransactionCount),
    Row::Input(Field::Job),
    Row::Input(Field::Income),
    Row::Predict,
];

/// Multiplier applied for Shift+arrow and PageUp/PageDown.
pub const COARSE_STEPS: i64 = 10;

/// Slider increment for one arrow press.
pub fn slider_step(field: Field) -> i64 {
    match field {
        Field::CreditScore => 5,
        Field::AccountBalance => 1_000,
        Field::TransactionCount => 1,
        Field::Job => 1,
        Field::Income => 1_000,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub features: FeatureVector,
    selected: usize,
}

impl Default for Form {
    fn default() -> Self {
        Self {
            features: FeatureVector::default(),
            selected: 0,
        }
    }
}

impl Form {
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_row(&self) -> Row {
        ROWS[self.selected]
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < ROWS.len() {
            self.selected += 1;
        }
    }

    /// Move the selected input by `steps` slider increments.
    ///
    /// The job selector moves one option per call (wrapping) regardless of
    /// the magnitude. Returns `true` if a value changed.
    pub fn adjust(&mut self, steps: i64) -> bool {
        let Row::Input(field) = self.selected_row() else {
            return false;
        };
        if steps == 0 {
            return false;
        }

        if field == Field::Job {
            let job = self.features.job;
            self.features.job = if steps > 0 { job.next() } else { job.prev() };
            return self.features.job != job;
        }

        let current = self.features.get(field) as i64;
        let next = field.bounds().clamp(current + steps * slider_step(field));
        self.set(field, next)
    }

    /// Jump the selected input to its minimum (or first option).
    pub fn jump_to_min(&mut self) -> bool {
        self.jump(false)
    }

    /// Jump the selected input to its maximum (or last option).
    pub fn jump_to_max(&mut self) -> bool {
        self.jump(true)
    }

    fn jump(&mut self, to_max: bool) -> bool {
        let Row::Input(field) = self.selected_row() else {
            return false;
        };

        if field == Field::Job {
            let job = self.features.job;
            let options = JobCategory::ALL;
            self.features.job = if to_max { options[options.len() - 1] } else { options[0] };
            return self.features.job != job;
        }

        let bounds = field.bounds();
        self.set(field, if to_max { bounds.max } else { bounds.min })
    }

    fn set(&mut self, field: Field, value: u32) -> bool {
        let slot = match field {
            Field::CreditScore => &mut self.features.credit_score,
            Field::AccountBalance => &mut self.features.account_balance,
            Field::TransactionCount => &mut self.features.transaction_count,
            Field::Income => &mut self.features.income,
            Field::Job => return false,
        };
        let changed = *slot != value;
        *slot = value;
        changed
    }

    /// Display value for a row (the label for the job selector).
    pub fn display_value(&self, field: Field) -> String {
        match field {
            Field::Job => self.features.job.label().to_string(),
            _ => self.features.get(field).to_string(),
        }
    }
}
