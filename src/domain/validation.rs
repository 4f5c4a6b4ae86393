//! Required-field rules checked before any mutating gateway call.

use crate::domain::model::{FacetField, StockDraft};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    /// Non-blank display name.
    Name,
    /// Non-blank category or supplier, depending on the configured facet.
    Facet,
    /// Strictly positive price.
    Price,
    /// Strictly positive cost.
    Cost,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRules {
    pub facet: FacetField,
    pub create: Vec<RequiredField>,
    pub update: Vec<RequiredField>,
}

impl Default for ValidationRules {
    fn default() -> Self {
        let required = vec![RequiredField::Name, RequiredField::Facet, RequiredField::Price];
        Self {
            facet: FacetField::Category,
            create: required.clone(),
            update: required,
        }
    }
}

impl ValidationRules {
    pub fn with_facet(mut self, facet: FacetField) -> Self {
        self.facet = facet;
        self
    }

    pub fn required_for(&self, op: Operation) -> &[RequiredField] {
        match op {
            Operation::Create => &self.create,
            Operation::Update => &self.update,
        }
    }

    /// Returns the first violation. Amounts must always be finite and non-negative,
    /// whether or not they are required.
    pub fn validate(&self, op: Operation, draft: &StockDraft) -> Result<(), AppError> {
        check_amount("price", draft.price)?;
        check_amount("cost", draft.cost)?;

        for field in self.required_for(op) {
            match field {
                RequiredField::Name => {
                    if draft.name.trim().is_empty() {
                        return Err(AppError::validation("name", "is required"));
                    }
                }
                RequiredField::Facet => {
                    let present = draft
                        .facet_value(self.facet)
                        .map(|v| !v.trim().is_empty())
                        .unwrap_or(false);
                    if !present {
                        return Err(AppError::validation(self.facet.label(), "is required"));
                    }
                }
                RequiredField::Price => require_positive("price", draft.price)?,
                RequiredField::Cost => require_positive("cost", draft.cost)?,
            }
        }
        Ok(())
    }
}

fn check_amount(field: &str, amount: Option<f64>) -> Result<(), AppError> {
    match amount {
        Some(v) if !v.is_finite() || v < 0.0 => {
            Err(AppError::validation(field, "must be a non-negative amount"))
        }
        _ => Ok(()),
    }
}

fn require_positive(field: &str, amount: Option<f64>) -> Result<(), AppError> {
    match amount {
        Some(v) if v > 0.0 => Ok(()),
        _ => Err(AppError::validation(field, "must be greater than zero")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> StockDraft {
        StockDraft {
            name: "Desk Lamp".into(),
            category: Some("Furniture".into()),
            price: Some(44.99),
            quantity: 18,
            ..Default::default()
        }
    }

    #[test]
    fn accepts_complete_draft() {
        let rules = ValidationRules::default();
        assert!(rules.validate(Operation::Create, &valid_draft()).is_ok());
        assert!(rules.validate(Operation::Update, &valid_draft()).is_ok());
    }

    #[test]
    fn blank_name_is_rejected() {
        let draft = StockDraft { name: "   ".into(), ..valid_draft() };
        let err = ValidationRules::default().validate(Operation::Create, &draft).unwrap_err();
        assert_eq!(err, AppError::validation("name", "is required"));
    }

    #[test]
    fn zero_price_is_rejected() {
        let draft = StockDraft { price: Some(0.0), ..valid_draft() };
        let err = ValidationRules::default().validate(Operation::Create, &draft).unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "price"));
    }

    #[test]
    fn facet_follows_configuration() {
        let rules = ValidationRules::default().with_facet(FacetField::Supplier);
        let err = rules.validate(Operation::Create, &valid_draft()).unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "supplier"));

        let draft = StockDraft { supplier: Some("HomeEssentials".into()), ..valid_draft() };
        assert!(rules.validate(Operation::Create, &draft).is_ok());
    }

    #[test]
    fn negative_cost_is_rejected_even_when_optional() {
        let draft = StockDraft { cost: Some(-1.0), ..valid_draft() };
        assert!(ValidationRules::default().validate(Operation::Update, &draft).is_err());
    }

    #[test]
    fn rules_are_configurable_per_operation() {
        let rules = ValidationRules {
            update: vec![RequiredField::Name],
            ..ValidationRules::default()
        };
        let draft = StockDraft { price: None, category: None, ..valid_draft() };
        assert!(rules.validate(Operation::Update, &draft).is_ok());
        assert!(rules.validate(Operation::Create, &draft).is_err());
    }
}
