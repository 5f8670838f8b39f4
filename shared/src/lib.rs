use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Placeholder and reset value for the program fee field
pub const DEFAULT_PROGRAM_FEE: &str = "0.0";

/// Fee due day used when a standard has none configured
pub const DEFAULT_FEE_DUE_DAY: &str = "10";

/// A standard (grade/class) record as served by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standard {
    /// Name of the standard, e.g. "Grade 5". Also the record key.
    pub standard: String,
    /// Program fee amount
    pub program_fee: f64,
    /// Day of month the fee is due. Accepts a JSON string or number.
    #[serde(
        default,
        deserialize_with = "deserialize_fee_due_day",
        skip_serializing_if = "Option::is_none"
    )]
    pub fee_due_day: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DayValue {
    Text(String),
    Number(serde_json::Number),
}

fn deserialize_fee_due_day<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<DayValue>::deserialize(deserializer)?.map(|value| match value {
        DayValue::Text(text) => text,
        DayValue::Number(number) => number.to_string(),
    }))
}

/// Local editable mirror of a standard being edited.
///
/// All values are kept as entered text; numeric parsing only happens when the
/// form is turned into an [`UpdateStandardRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardForm {
    pub standard: String,
    pub program_fee: String,
    pub fee_due_day: String,
}

impl Default for StandardForm {
    fn default() -> Self {
        Self {
            standard: String::new(),
            program_fee: DEFAULT_PROGRAM_FEE.to_string(),
            fee_due_day: DEFAULT_FEE_DUE_DAY.to_string(),
        }
    }
}

impl Standard {
    /// Configured fee due day, or the default when none is set
    pub fn effective_fee_due_day(&self) -> &str {
        self.fee_due_day
            .as_deref()
            .filter(|day| !day.is_empty())
            .unwrap_or(DEFAULT_FEE_DUE_DAY)
    }

    pub fn has_fee_due_day(&self) -> bool {
        self.fee_due_day.as_deref().is_some_and(|day| !day.is_empty())
    }
}

impl From<&Standard> for StandardForm {
    fn from(record: &Standard) -> Self {
        Self {
            standard: record.standard.clone(),
            program_fee: record.program_fee.to_string(),
            fee_due_day: record.effective_fee_due_day().to_string(),
        }
    }
}

/// The fields of a [`StandardForm`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardFormField {
    Standard,
    ProgramFee,
    FeeDueDay,
}

impl StandardFormField {
    pub const ALL: [StandardFormField; 3] = [
        StandardFormField::Standard,
        StandardFormField::ProgramFee,
        StandardFormField::FeeDueDay,
    ];

    /// Label shown next to the field
    pub fn label(&self) -> &'static str {
        match self {
            StandardFormField::Standard => "Standard",
            StandardFormField::ProgramFee => "Program Fee",
            StandardFormField::FeeDueDay => "Fee Due Day",
        }
    }
}

impl fmt::Display for StandardFormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which save button was used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    /// Save, then clear the form
    Save,
    /// Save and keep the saved values in the form
    SaveAndContinue,
}

impl SaveMode {
    pub fn resets_form(&self) -> bool {
        matches!(self, SaveMode::Save)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SaveMode::Save => "Save",
            SaveMode::SaveAndContinue => "Save and continue editing",
        }
    }
}

impl StandardForm {
    pub fn value(&self, field: StandardFormField) -> &str {
        match field {
            StandardFormField::Standard => &self.standard,
            StandardFormField::ProgramFee => &self.program_fee,
            StandardFormField::FeeDueDay => &self.fee_due_day,
        }
    }

    /// Replace a single field, leaving the others untouched
    pub fn set_field(&mut self, field: StandardFormField, value: String) {
        match field {
            StandardFormField::Standard => self.standard = value,
            StandardFormField::ProgramFee => self.program_fee = value,
            StandardFormField::FeeDueDay => self.fee_due_day = value,
        }
    }

    /// Copy of the form with one field replaced
    pub fn with_field(&self, field: StandardFormField, value: String) -> Self {
        let mut next = self.clone();
        next.set_field(field, value);
        next
    }

    /// Fields holding an empty string. "0" counts as present.
    pub fn missing_fields(&self) -> Vec<StandardFormField> {
        StandardFormField::ALL
            .into_iter()
            .filter(|field| self.value(*field).is_empty())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Run the presence guard for a save.
    ///
    /// Returns the snapshot to hand to the save callback, or `None` when a
    /// field is empty. With [`SaveMode::Save`] the form is reset to defaults
    /// after the snapshot is taken.
    pub fn submit(&mut self, mode: SaveMode) -> Option<StandardForm> {
        if !self.is_complete() {
            return None;
        }

        let snapshot = self.clone();
        if mode.resets_form() {
            *self = StandardForm::default();
        }
        Some(snapshot)
    }
}

/// Response containing every standard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListStandardsResponse {
    pub standards: Vec<Standard>,
}

/// Request for updating the fee configuration of a standard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStandardRequest {
    pub standard: String,
    pub program_fee: f64,
    pub fee_due_day: u8, // 1..=31
}

/// Response after updating a standard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStandardResponse {
    pub standard: Standard,
    pub success_message: String,
}

/// Why a [`StandardForm`] could not be turned into an update request
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StandardFormError {
    #[error("Missing required fields: {}", join_labels(.0))]
    MissingFields(Vec<StandardFormField>),
    #[error("Program fee must be a non-negative amount, got \"{0}\"")]
    InvalidProgramFee(String),
    #[error("Fee due day must be a day of the month (1-31), got \"{0}\"")]
    InvalidFeeDueDay(String),
}

fn join_labels(fields: &[StandardFormField]) -> String {
    fields
        .iter()
        .map(StandardFormField::label)
        .collect::<Vec<_>>()
        .join(", ")
}

impl UpdateStandardRequest {
    pub fn is_valid_fee_due_day(day: u8) -> bool {
        (1..=31).contains(&day)
    }
}

impl TryFrom<&StandardForm> for UpdateStandardRequest {
    type Error = StandardFormError;

    fn try_from(form: &StandardForm) -> Result<Self, Self::Error> {
        let missing = form.missing_fields();
        if !missing.is_empty() {
            return Err(StandardFormError::MissingFields(missing));
        }

        let program_fee = form
            .program_fee
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|fee| fee.is_finite() && *fee >= 0.0)
            .ok_or_else(|| StandardFormError::InvalidProgramFee(form.program_fee.clone()))?;

        let fee_due_day = form
            .fee_due_day
            .trim()
            .parse::<u8>()
            .ok()
            .filter(|day| Self::is_valid_fee_due_day(*day))
            .ok_or_else(|| StandardFormError::InvalidFeeDueDay(form.fee_due_day.clone()))?;

        Ok(Self {
            standard: form.standard.clone(),
            program_fee,
            fee_due_day,
        })
    }
}
