//! Contract generation service
//!
//! Resolves the stored profiles a request points at, validates the ad-hoc
//! data, runs the assembler and persists the result as a snapshot.

use chrono::{NaiveDate, Utc};
use lease_assembler::format_contract;
use lease_types::{
    new_record_id, parse_rent, Clause, ContractTemplate, GeneratedContract, GenerationContext,
    LandlordProfile, PersonData, PropertyProfile,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{LeaseError, Result};
use crate::i18n::Translations;
use crate::store::{KeyValueStore, RecordStore};

/// Everything the user picks or types to generate one contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub landlord_id: String,
    pub property_id: String,
    pub template_id: String,
    pub tenant: PersonData,
    #[serde(default)]
    pub guarantor: Option<PersonData>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub monthly_rent: String,
    pub due_day: u8,
    #[serde(default)]
    pub contract_location: String,
}

impl GenerationRequest {
    /// Field-level checks that need no stored data
    ///
    /// All problems are collected and reported together.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        require_person(&mut problems, "tenant", &self.tenant, true);
        // A guarantor with a blank name counts as no guarantor
        if let Some(guarantor) = self.guarantor.as_ref().filter(|g| g.is_named()) {
            require_person(&mut problems, "guarantor", guarantor, false);
        }

        if !(1..=31).contains(&self.due_day) {
            problems.push(format!("due day must be between 1 and 31, got {}", self.due_day));
        }

        match parse_rent(&self.monthly_rent) {
            Ok(amount) if amount <= Decimal::ZERO => {
                problems.push(format!("monthly rent must be positive, got '{}'", self.monthly_rent))
            }
            Ok(_) => {}
            Err(e) => problems.push(e.to_string()),
        }

        if self.end_date < self.start_date {
            problems.push(format!(
                "end date {} is before start date {}",
                self.end_date, self.start_date
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(LeaseError::Validation(problems))
        }
    }
}

/// Tenants need the full qualification; guarantors need name, CPF and RG
fn require_person(problems: &mut Vec<String>, role: &str, person: &PersonData, full: bool) {
    let mut require = |field: &str, value: &str| {
        if value.trim().is_empty() {
            problems.push(format!("{} {} is required", role, field));
        }
    };

    require("name", &person.name);
    require("CPF", &person.cpf);
    require("RG", &person.rg);
    if full {
        require("nationality", &person.nationality);
        require("birthplace", &person.birthplace);
        if person.marital_status.is_none() {
            problems.push(format!("{} marital status is required", role));
        }
    }
}

/// Generates, stores and re-displays contracts
pub struct ContractGenerator<'a, S: KeyValueStore> {
    store: &'a RecordStore<S>,
    translations: Translations,
}

impl<'a, S: KeyValueStore> ContractGenerator<'a, S> {
    pub fn new(store: &'a RecordStore<S>, translations: Translations) -> Self {
        Self {
            store,
            translations,
        }
    }

    /// Assembler input for a request, plus the landlord profile it resolved
    pub fn build_context(
        &self,
        request: &GenerationRequest,
    ) -> Result<(GenerationContext, LandlordProfile)> {
        let landlord: LandlordProfile = self.store.get(&request.landlord_id)?;
        let property: PropertyProfile = self.store.get(&request.property_id)?;
        let template: ContractTemplate = self.store.get(&request.template_id)?;

        let guarantor = request.guarantor.clone().filter(|g| g.is_named());
        if template.has_guarantor && guarantor.is_none() {
            return Err(LeaseError::Validation(vec![format!(
                "template '{}' expects a guarantor",
                template.name
            )]));
        }

        let ctx = GenerationContext {
            landlord: landlord.data.clone(),
            property: property.data,
            tenant: request.tenant.clone(),
            guarantor,
            template: Some(template),
            start_date: Some(request.start_date),
            end_date: Some(request.end_date),
            monthly_rent: request.monthly_rent.trim().to_string(),
            due_day: Some(request.due_day),
            contract_location: request.contract_location.clone(),
        };
        Ok((ctx, landlord))
    }

    /// Render the text a request would produce, without saving anything
    pub fn preview(&self, request: &GenerationRequest) -> Result<String> {
        request.validate()?;
        let (ctx, _) = self.build_context(request)?;
        self.render(&ctx)
    }

    /// Validate, render and persist a new contract
    pub fn generate(&self, request: &GenerationRequest) -> Result<GeneratedContract> {
        request.validate()?;
        let (ctx, landlord) = self.build_context(request)?;
        let text = self.render(&ctx)?;

        let contract = GeneratedContract {
            id: new_record_id(),
            template_id: request.template_id.clone(),
            landlord_id: landlord.id,
            tenant: ctx.tenant,
            guarantor: ctx.guarantor,
            property: ctx.property,
            start_date: ctx.start_date,
            end_date: ctx.end_date,
            monthly_rent: ctx.monthly_rent,
            due_day: ctx.due_day,
            contract_location: ctx.contract_location,
            generated_at: Utc::now(),
            formatted_content: Some(text),
        };
        self.store.upsert(contract.clone())?;

        info!(
            contract = %contract.id,
            template = %contract.template_id,
            "generated contract"
        );
        Ok(contract)
    }

    /// Text to show for a stored contract
    ///
    /// The stored rendering is returned verbatim. Only contracts saved without
    /// one are re-assembled, from their snapshot and the current catalog.
    pub fn display_text(&self, contract: &GeneratedContract) -> Result<String> {
        if let Some(text) = &contract.formatted_content {
            return Ok(text.clone());
        }

        debug!(contract = %contract.id, "no stored rendering, re-assembling");
        let landlord: LandlordProfile = self.store.get(&contract.landlord_id)?;
        let template: ContractTemplate = self.store.get(&contract.template_id)?;
        let ctx = contract.to_context(landlord.data, template);
        self.render(&ctx)
    }

    fn render(&self, ctx: &GenerationContext) -> Result<String> {
        let clauses: Vec<Clause> = self.store.list()?;
        let text = format_contract(ctx, &clauses, &self.translations);
        if text.is_empty() {
            return Err(LeaseError::NotReady("no template selected".to_string()));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lease_types::MaritalStatus;

    fn tenant() -> PersonData {
        PersonData {
            name: "Maria Silva".into(),
            nationality: "brasileira".into(),
            marital_status: Some(MaritalStatus::Single),
            rg: "123".into(),
            cpf: "456".into(),
            birthplace: "Salvador".into(),
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest {
            landlord_id: "l".into(),
            property_id: "p".into(),
            template_id: "t".into(),
            tenant: tenant(),
            guarantor: None,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            monthly_rent: "1.500,00".into(),
            due_day: 5,
            contract_location: "Salvador".into(),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_problems_collected() {
        let mut req = request();
        req.tenant.cpf.clear();
        req.due_day = 0;
        req.monthly_rent = "abc".into();

        let Err(LeaseError::Validation(problems)) = req.validate() else {
            panic!("expected validation error");
        };
        assert_eq!(problems.len(), 3);
        assert!(problems.iter().any(|p| p == "tenant CPF is required"));
    }

    #[test]
    fn test_guarantor_needs_identity() {
        let mut req = request();
        req.guarantor = Some(PersonData::new("Carlos"));
        let Err(LeaseError::Validation(problems)) = req.validate() else {
            panic!("expected validation error");
        };
        assert_eq!(
            problems,
            vec!["guarantor CPF is required", "guarantor RG is required"]
        );
    }

    #[test]
    fn test_blank_guarantor_is_ignored() {
        let mut req = request();
        req.guarantor = Some(PersonData::default());
        assert!(req.validate().is_ok());

        req.guarantor = Some(PersonData {
            name: "   ".into(),
            cpf: "789".into(),
            ..Default::default()
        });
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_dates_and_rent_sign() {
        let mut req = request();
        req.end_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        req.monthly_rent = "0,00".into();
        let Err(LeaseError::Validation(problems)) = req.validate() else {
            panic!("expected validation error");
        };
        assert_eq!(problems.len(), 2);
    }
}
