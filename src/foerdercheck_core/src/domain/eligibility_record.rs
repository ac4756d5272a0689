use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::email::Email;

/// Key of an eligibility record. One record exists per owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Email> for OwnerId {
    fn from(email: &Email) -> Self {
        Self(email.as_str().to_owned())
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Answers of the document-check questionnaire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EligibilityAnswers {
    pub has_inheritance_right: bool,
    pub has_location_cost_loan: bool,
    pub has_wood_construction_loan: bool,
    #[serde(rename = "hasBEGStandardLoan")]
    pub has_beg_standard_loan: bool,
    pub is_pregnant: bool,
    pub is_married: bool,
    pub is_disabled: bool,
    pub has_authorized_person: bool,
}

/// A partial set of answers. `None` leaves the stored answer untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EligibilityAnswersUpdate {
    pub has_inheritance_right: Option<bool>,
    pub has_location_cost_loan: Option<bool>,
    pub has_wood_construction_loan: Option<bool>,
    #[serde(rename = "hasBEGStandardLoan")]
    pub has_beg_standard_loan: Option<bool>,
    pub is_pregnant: Option<bool>,
    pub is_married: Option<bool>,
    pub is_disabled: Option<bool>,
    pub has_authorized_person: Option<bool>,
}

impl EligibilityAnswersUpdate {
    pub fn apply_to(&self, answers: &mut EligibilityAnswers) {
        fn set(target: &mut bool, value: Option<bool>) {
            if let Some(value) = value {
                *target = value;
            }
        }

        set(&mut answers.has_inheritance_right, self.has_inheritance_right);
        set(&mut answers.has_location_cost_loan, self.has_location_cost_loan);
        set(
            &mut answers.has_wood_construction_loan,
            self.has_wood_construction_loan,
        );
        set(&mut answers.has_beg_standard_loan, self.has_beg_standard_loan);
        set(&mut answers.is_pregnant, self.is_pregnant);
        set(&mut answers.is_married, self.is_married);
        set(&mut answers.is_disabled, self.is_disabled);
        set(&mut answers.has_authorized_person, self.has_authorized_person);
    }
}

/// Partial data submitted by the document-check form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EligibilityUpdate {
    pub property_type: Option<String>,
    pub answers: EligibilityAnswersUpdate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityRecord {
    pub owner_id: OwnerId,
    pub property_type: String,
    pub answers: EligibilityAnswers,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EligibilityRecord {
    /// Create a record from partial data. Missing answers start as `false`.
    pub fn seeded(owner_id: OwnerId, update: EligibilityUpdate, now: DateTime<Utc>) -> Self {
        let mut answers = EligibilityAnswers::default();
        update.answers.apply_to(&mut answers);

        Self {
            owner_id,
            property_type: update.property_type.unwrap_or_default(),
            answers,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the defined fields of `update` over this record.
    pub fn merge(&mut self, update: EligibilityUpdate, now: DateTime<Utc>) {
        if let Some(property_type) = update.property_type {
            self.property_type = property_type;
        }
        update.answers.apply_to(&mut self.answers);
        self.updated_at = now;
    }

    /// Upsert step shared by every store: seed when absent, merge otherwise.
    pub fn upsert(
        existing: Option<Self>,
        owner_id: OwnerId,
        update: EligibilityUpdate,
        now: DateTime<Utc>,
    ) -> Self {
        match existing {
            Some(mut record) => {
                record.merge(update, now);
                record
            }
            None => Self::seeded(owner_id, update, now),
        }
    }
}
