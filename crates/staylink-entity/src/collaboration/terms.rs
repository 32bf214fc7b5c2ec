//! Negotiable collaboration terms.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use staylink_core::AppError;

/// Compensation model for a collaboration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "collaboration_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CollaborationType {
    /// The hotel offers a free stay.
    FreeStay,
    /// The hotel pays a fixed amount.
    Paid,
    /// The hotel offers a percentage discount.
    Discount,
}

impl fmt::Display for CollaborationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::FreeStay => "free_stay",
            Self::Paid => "paid",
            Self::Discount => "discount",
        };
        write!(f, "{s}")
    }
}

/// One platform's committed deliverables, stored as JSONB on the row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlatformDeliverables {
    /// Social media platform name (Instagram, TikTok, YouTube, Facebook).
    pub platform: String,
    /// Committed deliverables on this platform.
    pub deliverables: Vec<Deliverable>,
}

/// A single deliverable commitment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Deliverable {
    /// Deliverable type, e.g. "Instagram Post".
    #[serde(rename = "type")]
    pub kind: String,
    /// How many of them.
    pub quantity: u32,
}

/// A partial update to a collaboration's negotiable terms.
///
/// Only fields that are `Some` are written; the repository assembles a
/// parameterized `SET` clause from this structure, never interpolating
/// values into SQL text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TermsPatch {
    /// New compensation model.
    pub collaboration_type: Option<CollaborationType>,
    /// Minimum nights for a free stay.
    pub free_stay_min_nights: Option<i32>,
    /// Maximum nights for a free stay.
    pub free_stay_max_nights: Option<i32>,
    /// Payment amount for a paid collaboration.
    pub paid_amount: Option<Decimal>,
    /// Discount percentage (1-100).
    pub discount_percentage: Option<i32>,
    /// Proposed check-in date.
    pub travel_date_from: Option<NaiveDate>,
    /// Proposed check-out date.
    pub travel_date_to: Option<NaiveDate>,
    /// Preferred months (abbreviations like "Jan").
    pub preferred_months: Option<Vec<String>>,
    /// Updated platform deliverables.
    pub platform_deliverables: Option<Vec<PlatformDeliverables>>,
}

impl TermsPatch {
    /// Whether the patch changes anything at all.
    pub fn is_empty(&self) -> bool {
        self.collaboration_type.is_none()
            && self.free_stay_min_nights.is_none()
            && self.free_stay_max_nights.is_none()
            && self.paid_amount.is_none()
            && self.discount_percentage.is_none()
            && self.travel_date_from.is_none()
            && self.travel_date_to.is_none()
            && self.preferred_months.is_none()
            && self.platform_deliverables.is_none()
    }

    /// Validate internal consistency of the supplied fields.
    pub fn validate(&self) -> Result<(), AppError> {
        if let (Some(min), Some(max)) = (self.free_stay_min_nights, self.free_stay_max_nights) {
            if min <= 0 || max < min {
                return Err(AppError::validation(
                    "free_stay_max_nights must be >= free_stay_min_nights and both positive",
                ));
            }
        }
        if let Some(amount) = self.paid_amount {
            if amount <= Decimal::ZERO {
                return Err(AppError::validation("paid_amount must be greater than 0"));
            }
        }
        if let Some(pct) = self.discount_percentage {
            if !(1..=100).contains(&pct) {
                return Err(AppError::validation(
                    "discount_percentage must be between 1 and 100",
                ));
            }
        }
        if let (Some(from), Some(to)) = (self.travel_date_from, self.travel_date_to) {
            if to < from {
                return Err(AppError::validation(
                    "travel_date_to must be >= travel_date_from",
                ));
            }
        }
        Ok(())
    }
}

/// Validate that type-specific term fields are present and consistent.
pub fn validate_typed_terms(
    collaboration_type: CollaborationType,
    free_stay_min_nights: Option<i32>,
    free_stay_max_nights: Option<i32>,
    paid_amount: Option<Decimal>,
    discount_percentage: Option<i32>,
) -> Result<(), AppError> {
    match collaboration_type {
        CollaborationType::FreeStay => {
            let (Some(min), Some(max)) = (free_stay_min_nights, free_stay_max_nights) else {
                return Err(AppError::validation(
                    "free_stay_min_nights and free_stay_max_nights are required for a free stay",
                ));
            };
            if min <= 0 || max < min {
                return Err(AppError::validation(
                    "free_stay_max_nights must be >= free_stay_min_nights and both positive",
                ));
            }
        }
        CollaborationType::Paid => {
            let Some(amount) = paid_amount else {
                return Err(AppError::validation(
                    "paid_amount is required for a paid collaboration",
                ));
            };
            if amount <= Decimal::ZERO {
                return Err(AppError::validation("paid_amount must be greater than 0"));
            }
        }
        CollaborationType::Discount => {
            let Some(pct) = discount_percentage else {
                return Err(AppError::validation(
                    "discount_percentage is required for a discount collaboration",
                ));
            };
            if !(1..=100).contains(&pct) {
                return Err(AppError::validation(
                    "discount_percentage must be between 1 and 100",
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_patch() {
        assert!(TermsPatch::default().is_empty());
        let patch = TermsPatch {
            discount_percentage: Some(20),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_patch_validation() {
        let patch = TermsPatch {
            discount_percentage: Some(150),
            ..Default::default()
        };
        assert!(patch.validate().is_err());

        let patch = TermsPatch {
            free_stay_min_nights: Some(5),
            free_stay_max_nights: Some(2),
            ..Default::default()
        };
        assert!(patch.validate().is_err());

        let patch = TermsPatch {
            paid_amount: Some(Decimal::new(50000, 2)),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn test_typed_terms_validation() {
        assert!(
            validate_typed_terms(CollaborationType::FreeStay, Some(2), Some(5), None, None).is_ok()
        );
        assert!(validate_typed_terms(CollaborationType::FreeStay, Some(2), None, None, None).is_err());
        assert!(validate_typed_terms(CollaborationType::Paid, None, None, None, None).is_err());
        assert!(
            validate_typed_terms(CollaborationType::Discount, None, None, None, Some(30)).is_ok()
        );
    }
}
