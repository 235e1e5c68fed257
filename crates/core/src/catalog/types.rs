//! Requirement catalog types.
//!
//! The catalog is the bank's compliance policy expressed as lookup tables.
//! It is authored up front and never modified at runtime.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::case::RiskLevel;
use crate::catalog::error::CatalogError;

/// Document category of a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequirementCategory {
    /// Identity documents (NRIC, passport).
    Identity,
    /// Proof of address.
    Address,
    /// Corporate registry documents and bank forms.
    Corporate,
    /// Constitutional and legal instruments.
    Legal,
    /// Financial statements and declarations.
    Financial,
    /// Resolutions and mandates authorising the relationship.
    Authorization,
    /// KYC / due diligence artefacts.
    #[serde(rename = "KYC")]
    Kyc,
    /// Specimen signatures.
    Signature,
    /// Anything else.
    Other,
}

impl RequirementCategory {
    /// Returns the string representation of the category.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identity => "Identity",
            Self::Address => "Address",
            Self::Corporate => "Corporate",
            Self::Legal => "Legal",
            Self::Financial => "Financial",
            Self::Authorization => "Authorization",
            Self::Kyc => "KYC",
            Self::Signature => "Signature",
            Self::Other => "Other",
        }
    }

    /// Parses a category from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "identity" => Some(Self::Identity),
            "address" => Some(Self::Address),
            "corporate" => Some(Self::Corporate),
            "legal" => Some(Self::Legal),
            "financial" => Some(Self::Financial),
            "authorization" => Some(Self::Authorization),
            "kyc" => Some(Self::Kyc),
            "signature" => Some(Self::Signature),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for RequirementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn default_required() -> bool {
    true
}

/// A document the bank's policy requires (or recommends) for a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    /// Display name, unique within its template list.
    pub name: String,
    /// Document category.
    pub category: RequirementCategory,
    /// Whether the requirement blocks submission while outstanding.
    #[serde(default = "default_required")]
    pub required: bool,
    /// How long a document stays valid, used to derive an expiry date
    /// when the submitter gives a published date but no expiry date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validity_months: Option<u32>,
    /// Guidance shown to the RM.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Requirement {
    /// Creates a requirement with no validity period or description.
    #[must_use]
    pub fn new(name: impl Into<String>, category: RequirementCategory, required: bool) -> Self {
        Self {
            name: name.into(),
            category,
            required,
            validity_months: None,
            description: None,
        }
    }

    /// Sets the validity period in months.
    #[must_use]
    pub fn with_validity_months(mut self, months: u32) -> Self {
        self.validity_months = Some(months);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Fixed bank forms, listed by name only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankFormTemplates {
    /// Forms every non-individual entity must complete.
    #[serde(default)]
    pub corporate_mandatory: Vec<String>,
    /// Forms replacing the corporate set for individual accounts.
    #[serde(default)]
    pub individual_stakeholder: Vec<String>,
    /// Forms offered to corporates on request.
    #[serde(default)]
    pub corporate_optional: Vec<String>,
}

impl BankFormTemplates {
    /// Converts mandatory form names into `Corporate` requirements.
    #[must_use]
    pub fn to_requirements(names: &[String]) -> Vec<Requirement> {
        names
            .iter()
            .map(|name| Requirement::new(name.clone(), RequirementCategory::Corporate, true))
            .collect()
    }
}

/// The complete requirement catalog.
///
/// All lookups return an empty slice for an unknown key so that a case with
/// an unrecognised entity type or residency status still produces a
/// (smaller) checklist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementCatalog {
    /// Entity-level documents keyed by entity type.
    #[serde(default)]
    pub entity_templates: BTreeMap<String, Vec<Requirement>>,
    /// Per-party documents keyed by residency status.
    #[serde(default)]
    pub individual_templates: BTreeMap<String, Vec<Requirement>>,
    /// Extra entity-level documents layered on by risk level.
    #[serde(default)]
    pub risk_based_documents: BTreeMap<RiskLevel, Vec<Requirement>>,
    /// Fixed bank forms.
    #[serde(default)]
    pub bank_forms: BankFormTemplates,
    /// Forms cloned once per proposed account.
    #[serde(default)]
    pub account_opening_forms: Vec<Requirement>,
    /// Relationship types offered when linking a party, keyed by entity type.
    #[serde(default)]
    pub entity_role_mapping: BTreeMap<String, Vec<String>>,
}

impl RequirementCatalog {
    /// Parses and validates a catalog from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Returns true if the catalog knows this entity type.
    #[must_use]
    pub fn has_entity_type(&self, entity_type: &str) -> bool {
        self.entity_templates.contains_key(entity_type)
    }

    /// Entity-level documents for an entity type.
    #[must_use]
    pub fn entity_requirements(&self, entity_type: &str) -> &[Requirement] {
        self.entity_templates
            .get(entity_type)
            .map_or(&[], Vec::as_slice)
    }

    /// Per-party documents for a residency status.
    #[must_use]
    pub fn individual_requirements(&self, residency_status: &str) -> &[Requirement] {
        self.individual_templates
            .get(residency_status)
            .map_or(&[], Vec::as_slice)
    }

    /// Additional entity-level documents for a risk level.
    #[must_use]
    pub fn risk_requirements(&self, risk_level: RiskLevel) -> &[Requirement] {
        self.risk_based_documents
            .get(&risk_level)
            .map_or(&[], Vec::as_slice)
    }

    /// Fixed bank forms.
    #[must_use]
    pub fn bank_forms(&self) -> &BankFormTemplates {
        &self.bank_forms
    }

    /// Forms required for every proposed account.
    #[must_use]
    pub fn account_opening_forms(&self) -> &[Requirement] {
        &self.account_opening_forms
    }

    /// Valid relationship types when linking a party to an entity.
    #[must_use]
    pub fn roles_for(&self, entity_type: &str) -> &[String] {
        self.entity_role_mapping
            .get(entity_type)
            .map_or(&[], Vec::as_slice)
    }

    /// Checks the catalog for authoring mistakes.
    ///
    /// Rejects blank names, duplicate names within one template list, and
    /// zero-month validity periods.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for (entity_type, requirements) in &self.entity_templates {
            validate_list(&format!("entity:{entity_type}"), requirements)?;
        }
        for (residency, requirements) in &self.individual_templates {
            validate_list(&format!("individual:{residency}"), requirements)?;
        }
        for (risk, requirements) in &self.risk_based_documents {
            validate_list(&format!("risk:{risk}"), requirements)?;
        }
        validate_list("accountOpeningForms", &self.account_opening_forms)?;

        for (template, names) in [
            ("bankForms.corporateMandatory", &self.bank_forms.corporate_mandatory),
            ("bankForms.individualStakeholder", &self.bank_forms.individual_stakeholder),
            ("bankForms.corporateOptional", &self.bank_forms.corporate_optional),
        ] {
            validate_list(template, &BankFormTemplates::to_requirements(names))?;
        }

        Ok(())
    }
}

fn validate_list(template: &str, requirements: &[Requirement]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for requirement in requirements {
        let name = requirement.name.trim();
        if name.is_empty() {
            return Err(CatalogError::BlankName {
                template: template.to_string(),
            });
        }
        if requirement.validity_months == Some(0) {
            return Err(CatalogError::ZeroValidity {
                name: name.to_string(),
            });
        }
        if !seen.insert(name) {
            return Err(CatalogError::DuplicateRequirement {
                template: template.to_string(),
                name: name.to_string(),
            });
        }
    }
    Ok(())
}
