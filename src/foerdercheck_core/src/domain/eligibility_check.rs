//! Income-limit check for the housing subsidy groups A and B.
//!
//! Limits depend on the number of adults (1 or 2), whether the household has
//! children, and whether it is retired. Every child beyond the first raises
//! the limits by a household-specific bonus, and married households get a
//! flat bonus on the gross limits.

use serde::{Deserialize, Serialize};

const MARRIAGE_BONUS: f64 = 6250.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeLimits {
    pub gross_a: f64,
    pub net_a: f64,
    pub gross_b: f64,
    pub net_b: f64,
}

impl IncomeLimits {
    const fn new(gross_a: f64, net_a: f64, gross_b: f64, net_b: f64) -> Self {
        Self {
            gross_a,
            net_a,
            gross_b,
            net_b,
        }
    }

    fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.gross_a * factor,
            self.net_a * factor,
            self.gross_b * factor,
            self.net_b * factor,
        )
    }
}

struct LimitTable {
    base: IncomeLimits,
    retired: IncomeLimits,
}

impl LimitTable {
    fn select(&self, is_retired: bool) -> IncomeLimits {
        if is_retired { self.retired } else { self.base }
    }
}

// Indexed by adult count - 1.
const NO_KIDS: [LimitTable; 2] = [
    LimitTable {
        base: IncomeLimits::new(38011.0, 23540.0, 52724.0, 32956.0),
        retired: IncomeLimits::new(31076.0, 23540.0, 40911.0, 32956.0),
    },
    LimitTable {
        base: IncomeLimits::new(51777.0, 28350.0, 69496.0, 39690.0),
        retired: IncomeLimits::new(42668.0, 28350.0, 56244.0, 39690.0),
    },
];

const WITH_KIDS: [LimitTable; 2] = [
    LimitTable {
        base: IncomeLimits::new(53121.0, 29210.0, 71377.0, 40894.0),
        retired: IncomeLimits::new(31076.0, 23540.0, 40911.0, 32956.0),
    },
    LimitTable {
        base: IncomeLimits::new(57074.0, 35740.0, 79411.0, 50036.0),
        retired: IncomeLimits::new(42668.0, 28350.0, 56244.0, 39690.0),
    },
];

const SINGLE_PARENT_CHILD_BONUS: IncomeLimits = IncomeLimits::new(5297.0, 7390.0, 9916.0, 10346.0);
const COUPLE_CHILD_BONUS: IncomeLimits = IncomeLimits::new(11547.0, 7390.0, 16166.0, 10346.0);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityRequest {
    pub adult_count: i32,
    pub child_count: i32,
    pub is_disabled: bool,
    pub is_married: bool,
    pub is_retired: bool,
    pub gross_income: f64,
    pub net_income: f64,
}

impl EligibilityRequest {
    fn additional_children(&self) -> f64 {
        f64::from(self.child_count.saturating_sub(1).max(0))
    }

    fn child_bonus(&self) -> IncomeLimits {
        if self.child_count <= 0 {
            return IncomeLimits::default();
        }
        let per_child = if self.adult_count == 1 {
            SINGLE_PARENT_CHILD_BONUS
        } else {
            COUPLE_CHILD_BONUS
        };
        per_child.scaled(self.additional_children())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EligibilityGroup {
    #[serde(rename = "Gruppe A")]
    GroupA,
    #[serde(rename = "Gruppe B")]
    GroupB,
    #[serde(rename = "Nicht Förderungsfähig")]
    NotEligible,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityDetails {
    pub adjusted_gross_a: f64,
    pub adjusted_net_a: f64,
    pub adjusted_gross_b: f64,
    pub adjusted_net_b: f64,
    pub child_bonus: IncomeLimits,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub eligible: bool,
    pub group: EligibilityGroup,
    pub reason: String,
    pub details: EligibilityDetails,
}

impl EligibilityResult {
    fn rejected(reason: &str) -> Self {
        Self {
            eligible: false,
            group: EligibilityGroup::NotEligible,
            reason: reason.to_owned(),
            details: EligibilityDetails::default(),
        }
    }
}

/// Adjusted limits for a household. Returns `None` for unsupported adult counts.
pub fn calculate_limits(request: &EligibilityRequest) -> Option<IncomeLimits> {
    let index = request
        .adult_count
        .checked_sub(1)
        .and_then(|n| usize::try_from(n).ok())?;
    let tables = if request.child_count == 0 {
        &NO_KIDS
    } else {
        &WITH_KIDS
    };
    let base = tables.get(index)?.select(request.is_retired);
    let bonus = request.child_bonus();
    let marriage_bonus = if request.is_married {
        MARRIAGE_BONUS
    } else {
        0.0
    };

    Some(IncomeLimits {
        gross_a: base.gross_a + bonus.gross_a + marriage_bonus,
        net_a: base.net_a + bonus.net_a,
        gross_b: base.gross_b + bonus.gross_b + marriage_bonus,
        net_b: base.net_b + bonus.net_b,
    })
}

pub fn determine_eligibility(request: &EligibilityRequest) -> EligibilityResult {
    if request.child_count < 0 {
        return EligibilityResult::rejected(
            "Ungültige Eingabedaten. Bitte überprüfen Sie Ihre Angaben.",
        );
    }
    let Some(limits) = calculate_limits(request) else {
        return EligibilityResult::rejected(
            "Ungültige Eingabedaten. Bitte überprüfen Sie Ihre Angaben.",
        );
    };
    if request.gross_income <= 0.0 || request.net_income <= 0.0 {
        return EligibilityResult::rejected("Das Einkommen muss größer als 0 sein.");
    }

    let details = EligibilityDetails {
        adjusted_gross_a: limits.gross_a,
        adjusted_net_a: limits.net_a,
        adjusted_gross_b: limits.gross_b,
        adjusted_net_b: limits.net_b,
        child_bonus: request.child_bonus(),
    };

    if request.gross_income <= limits.gross_a && request.net_income <= limits.net_a {
        return EligibilityResult {
            eligible: true,
            group: EligibilityGroup::GroupA,
            reason: "Sie erfüllen die Voraussetzungen für Gruppe A.".to_owned(),
            details,
        };
    }

    let gross_over_b = request.gross_income > limits.gross_b;
    let net_over_b = request.net_income > limits.net_b;
    let reason = match (gross_over_b, net_over_b) {
        (true, true) => "Ihr Brutto- und Nettoeinkommen liegen über den zulässigen Grenzen.",
        (true, false) => "Ihr Bruttoeinkommen liegt über der zulässigen Grenze.",
        (false, true) => "Ihr Nettoeinkommen liegt über der zulässigen Grenze.",
        (false, false) => {
            return EligibilityResult {
                eligible: true,
                group: EligibilityGroup::GroupB,
                reason: "Sie erfüllen die Voraussetzungen für Gruppe B.".to_owned(),
                details,
            };
        }
    };

    EligibilityResult {
        eligible: false,
        group: EligibilityGroup::NotEligible,
        reason: reason.to_owned(),
        details,
    }
}
