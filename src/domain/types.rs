//! Shared domain types.
//!
//! These types define the one contract the classifier cares about: five
//! numeric features in a fixed order. Everything that builds a feature vector
//! (the form, the CLI, tests) goes through `FeatureVector` so the order is
//! written down exactly once, in `FeatureVector::to_array`.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of features the classifier was trained on.
pub const FEATURE_COUNT: usize = 5;

/// Customer job category.
///
/// The integer codes mirror the label encoder used when the model was
/// trained. They are not alphabetical and not ordinal; changing any of them
/// silently breaks predictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum JobCategory {
    #[serde(rename = "Other")]
    Other,
    #[serde(rename = "IT Professional")]
    ItProfessional,
    #[serde(rename = "Entry-Level")]
    EntryLevel,
    #[serde(rename = "Skilled Worker")]
    SkilledWorker,
    #[serde(rename = "Executive")]
    Executive,
    #[serde(rename = "Managerial")]
    Managerial,
}

impl JobCategory {
    /// All categories in selector display order.
    pub const ALL: [JobCategory; 6] = [
        JobCategory::Other,
        JobCategory::ItProfessional,
        JobCategory::EntryLevel,
        JobCategory::SkilledWorker,
        JobCategory::Executive,
        JobCategory::Managerial,
    ];

    /// Training-time integer code.
    pub fn code(self) -> u8 {
        match self {
            JobCategory::Other => 4,
            JobCategory::ItProfessional => 2,
            JobCategory::EntryLevel => 0,
            JobCategory::SkilledWorker => 5,
            JobCategory::Executive => 3,
            JobCategory::Managerial => 1,
        }
    }

    /// Human-readable label, as shown in the selector.
    pub fn label(self) -> &'static str {
        match self {
            JobCategory::Other => "Other",
            JobCategory::ItProfessional => "IT Professional",
            JobCategory::EntryLevel => "Entry-Level",
            JobCategory::SkilledWorker => "Skilled Worker",
            JobCategory::Executive => "Executive",
            JobCategory::Managerial => "Managerial",
        }
    }

    /// Exact-match lookup by display label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|job| job.label() == label)
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|job| job.code() == code)
    }

    /// Next category in display order (wraps).
    pub fn next(self) -> Self {
        let idx = self.position();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous category in display order (wraps).
    pub fn prev(self) -> Self {
        let idx = self.position();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|job| *job == self).unwrap_or(0)
    }
}

impl std::fmt::Display for JobCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Feature positions, in the order the classifier expects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    CreditScore,
    AccountBalance,
    TransactionCount,
    Job,
    Income,
}

impl Field {
    pub const ALL: [Field; FEATURE_COUNT] = [
        Field::CreditScore,
        Field::AccountBalance,
        Field::TransactionCount,
        Field::Job,
        Field::Income,
    ];

    /// Column index in the feature vector.
    pub fn index(self) -> usize {
        match self {
            Field::CreditScore => 0,
            Field::AccountBalance => 1,
            Field::TransactionCount => 2,
            Field::Job => 3,
            Field::Income => 4,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Field::CreditScore => "Credit Score",
            Field::AccountBalance => "Account Balance",
            Field::TransactionCount => "Transaction Count",
            Field::Job => "Job",
            Field::Income => "Income",
        }
    }

    /// Inclusive range accepted for this field.
    ///
    /// For `Job` this is the range of encoded codes, not a slider range.
    pub fn bounds(self) -> FieldBounds {
        match self {
            Field::CreditScore => FieldBounds { min: 300, max: 850 },
            Field::AccountBalance => FieldBounds { min: 0, max: 100_000 },
            Field::TransactionCount => FieldBounds { min: 0, max: 100 },
            Field::Job => FieldBounds { min: 0, max: 5 },
            Field::Income => FieldBounds { min: 0, max: 200_000 },
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldBounds {
    pub min: u32,
    pub max: u32,
}

impl FieldBounds {
    pub fn contains(self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn clamp(self, value: i64) -> u32 {
        value.clamp(self.min as i64, self.max as i64) as u32
    }
}

/// Rejected model input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("expected {} features, got {got}", FEATURE_COUNT)]
    WrongLength { got: usize },

    #[error("{field} must be a whole number, got {value}")]
    NotAWholeNumber { field: Field, value: f64 },

    #[error("{field} must be within {min}..={max}, got {value}")]
    OutOfRange {
        field: Field,
        value: f64,
        min: u32,
        max: u32,
    },
}

/// One customer's features, built fresh per prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub credit_score: u32,
    pub account_balance: u32,
    pub transaction_count: u32,
    pub job: JobCategory,
    pub income: u32,
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self {
            credit_score: 600,
            account_balance: 50_000,
            transaction_count: 10,
            job: JobCategory::Other,
            income: 50_000,
        }
    }
}

impl FeatureVector {
    /// The model input row. This is the only place the column order lives.
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.credit_score as f64,
            self.account_balance as f64,
            self.transaction_count as f64,
            self.job.code() as f64,
            self.income as f64,
        ]
    }

    /// Raw value of a numeric field (the job code for `Field::Job`).
    pub fn get(&self, field: Field) -> u32 {
        match field {
            Field::CreditScore => self.credit_score,
            Field::AccountBalance => self.account_balance,
            Field::TransactionCount => self.transaction_count,
            Field::Job => self.job.code() as u32,
            Field::Income => self.income,
        }
    }

    /// Check every numeric field against its documented range.
    pub fn validate(&self) -> Result<(), InputError> {
        for field in Field::ALL {
            let value = self.get(field);
            let bounds = field.bounds();
            if !bounds.contains(value) {
                return Err(InputError::OutOfRange {
                    field,
                    value: value as f64,
                    min: bounds.min,
                    max: bounds.max,
                });
            }
        }
        Ok(())
    }
}

impl TryFrom<&[f64]> for FeatureVector {
    type Error = InputError;

    /// Build a vector from an untyped row in model column order.
    ///
    /// Rejects rows of the wrong length, non-integral values, and job codes
    /// outside the encoder table. Numeric ranges are left to `validate`.
    fn try_from(row: &[f64]) -> Result<Self, Self::Error> {
        if row.len() != FEATURE_COUNT {
            return Err(InputError::WrongLength { got: row.len() });
        }

        let mut values = [0u32; FEATURE_COUNT];
        for field in Field::ALL {
            let value = row[field.index()];
            if !value.is_finite() || value.fract() != 0.0 {
                return Err(InputError::NotAWholeNumber { field, value });
            }
            if value < 0.0 || value > u32::MAX as f64 {
                let bounds = field.bounds();
                return Err(InputError::OutOfRange {
                    field,
                    value,
                    min: bounds.min,
                    max: bounds.max,
                });
            }
            values[field.index()] = value as u32;
        }

        let job_code = values[Field::Job.index()];
        let job = u8::try_from(job_code)
            .ok()
            .and_then(JobCategory::from_code)
            .ok_or_else(|| {
                let bounds = Field::Job.bounds();
                InputError::OutOfRange {
                    field: Field::Job,
                    value: job_code as f64,
                    min: bounds.min,
                    max: bounds.max,
                }
            })?;

        Ok(Self {
            credit_score: values[Field::CreditScore.index()],
            account_balance: values[Field::AccountBalance.index()],
            transaction_count: values[Field::TransactionCount.index()],
            job,
            income: values[Field::Income.index()],
        })
    }
}

/// Binary classifier output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    NoDefault,
    Default,
}

impl Label {
    pub fn code(self) -> u8 {
        match self {
            Label::NoDefault => 0,
            Label::Default => 1,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Label::NoDefault),
            1 => Some(Label::Default),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_codes_match_training_encoder() {
        let expected = [
            ("Other", 4),
            ("IT Professional", 2),
            ("Entry-Level", 0),
            ("Skilled Worker", 5),
            ("Executive", 3),
            ("Managerial", 1),
        ];
        for (label, code) in expected {
            let job = JobCategory::from_label(label).unwrap();
            assert_eq!(job.code(), code, "{label}");
            // Repeated lookups are stable.
            assert_eq!(JobCategory::from_label(label).unwrap().code(), code);
        }
    }

    #[test]
    fn job_codes_are_a_bijection_onto_0_to_5() {
        let mut codes: Vec<u8> = JobCategory::ALL.iter().map(|j| j.code()).collect();
        codes.sort_unstable();
        assert_eq!(codes, vec![0, 1, 2, 3, 4, 5]);
        for job in JobCategory::ALL {
            assert_eq!(JobCategory::from_code(job.code()), Some(job));
            assert_eq!(JobCategory::from_label(job.label()), Some(job));
        }
        assert_eq!(JobCategory::from_code(6), None);
        assert_eq!(JobCategory::from_label("other"), None);
    }

    #[test]
    fn job_cycle_wraps_in_display_order() {
        assert_eq!(JobCategory::Other.next(), JobCategory::ItProfessional);
        assert_eq!(JobCategory::Managerial.next(), JobCategory::Other);
        assert_eq!(JobCategory::Other.prev(), JobCategory::Managerial);
    }

    #[test]
    fn to_array_uses_fixed_column_order() {
        let v = FeatureVector {
            credit_score: 700,
            account_balance: 1234,
            transaction_count: 7,
            job: JobCategory::Executive,
            income: 88_000,
        };
        assert_eq!(v.to_array(), [700.0, 1234.0, 7.0, 3.0, 88_000.0]);
    }

    #[test]
    fn try_from_slice_round_trips_valid_rows() {
        let row = [300.0, 0.0, 0.0, 0.0, 0.0];
        let v = FeatureVector::try_from(&row[..]).unwrap();
        assert_eq!(v.job, JobCategory::EntryLevel);
        assert_eq!(v.to_array(), row);
    }

    #[test]
    fn try_from_slice_rejects_wrong_length() {
        let err = FeatureVector::try_from(&[600.0, 1.0, 2.0, 4.0][..]).unwrap_err();
        assert_eq!(err, InputError::WrongLength { got: 4 });
        let err = FeatureVector::try_from(&[0.0; 6][..]).unwrap_err();
        assert_eq!(err, InputError::WrongLength { got: 6 });
    }

    #[test]
    fn try_from_slice_rejects_fractions_and_unknown_job_codes() {
        let err = FeatureVector::try_from(&[600.5, 0.0, 0.0, 4.0, 0.0][..]).unwrap_err();
        assert!(matches!(err, InputError::NotAWholeNumber { field: Field::CreditScore, .. }));

        let err = FeatureVector::try_from(&[600.0, 0.0, 0.0, 9.0, 0.0][..]).unwrap_err();
        assert!(matches!(err, InputError::OutOfRange { field: Field::Job, .. }));

        let err = FeatureVector::try_from(&[600.0, -1.0, 0.0, 4.0, 0.0][..]).unwrap_err();
        assert!(matches!(err, InputError::OutOfRange { field: Field::AccountBalance, .. }));
    }

    #[test]
    fn validate_reports_field_and_range() {
        let v = FeatureVector {
            credit_score: 299,
            ..FeatureVector::default()
        };
        let err = v.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Credit Score must be within 300..=850, got 299"
        );

        let v = FeatureVector {
            income: 200_001,
            ..FeatureVector::default()
        };
        assert!(matches!(
            v.validate(),
            Err(InputError::OutOfRange { field: Field::Income, .. })
        ));
    }

    #[test]
    fn defaults_match_form_and_are_valid() {
        let v = FeatureVector::default();
        assert_eq!(v.to_array(), [600.0, 50_000.0, 10.0, 4.0, 50_000.0]);
        assert!(v.validate().is_ok());
    }

    #[test]
    fn bounds_clamp() {
        let b = Field::CreditScore.bounds();
        assert_eq!(b.clamp(100), 300);
        assert_eq!(b.clamp(900), 850);
        assert_eq!(b.clamp(700), 700);
    }

    #[test]
    fn label_codes() {
        assert_eq!(Label::NoDefault.code(), 0);
        assert_eq!(Label::Default.code(), 1);
        assert_eq!(Label::from_code(1), Some(Label::Default));
        assert_eq!(Label::from_code(2), None);
    }
}
