//! Checklist generation.
//!
//! Projects a case and the party roster onto the requirement catalog. The
//! generator is pure: it never mutates the case, never fails, and returns
//! identical output for identical input.

use chrono::{NaiveDate, Utc};
use tracing::{debug, warn};

use kyc_shared::CategoryMode;

use crate::case::{Account, Case, Party, RelatedPartyLink, party_by_id};
use crate::catalog::{
    BankFormTemplates, INDIVIDUAL_ACCOUNT, Requirement, RequirementCatalog, RequirementCategory,
};
use crate::checklist::types::{
    ChecklistItem, ChecklistSection, Owner, Priority, RequirementId, SectionKind,
};
use crate::workflow::types::DocumentStatus;

/// Parties screened above this score get a source of wealth item.
pub const HIGH_RISK_SCORE_THRESHOLD: u32 = 50;

/// Name of the synthetic item added for PEPs and high-risk parties.
pub const SOURCE_OF_WEALTH: &str = "Source of Wealth Declaration";

/// Where an item's requirement came from. Decides its presented category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemOrigin {
    /// Entity, risk-based or residency template.
    Template,
    /// Bank form, account form, or the synthetic source of wealth item.
    Fixed,
}

/// Builds checklists from a requirement catalog.
#[derive(Debug, Clone, Copy)]
pub struct ChecklistGenerator<'a> {
    catalog: &'a RequirementCatalog,
    category_mode: CategoryMode,
}

impl Default for ChecklistGenerator<'static> {
    fn default() -> Self {
        Self::new(RequirementCatalog::builtin())
    }
}

impl<'a> ChecklistGenerator<'a> {
    /// Creates a generator over a catalog with the legacy category labelling.
    #[must_use]
    pub fn new(catalog: &'a RequirementCatalog) -> Self {
        Self {
            catalog,
            category_mode: CategoryMode::default(),
        }
    }

    /// Sets the category labelling mode.
    #[must_use]
    pub fn with_category_mode(mut self, category_mode: CategoryMode) -> Self {
        self.category_mode = category_mode;
        self
    }

    /// Generates the checklist as of today (UTC).
    #[must_use]
    pub fn generate_now(&self, case: &Case, parties: &[Party]) -> Vec<ChecklistSection> {
        self.generate(case, parties, Utc::now().date_naive())
    }

    /// Generates the checklist for a case.
    ///
    /// Sections come back in a fixed order: the entity section, one section
    /// per related-party link in link order, then one section per account in
    /// account order. Empty sections are omitted. Documents whose expiry
    /// date is before `as_of` are presented as `Expired`.
    #[must_use]
    pub fn generate(
        &self,
        case: &Case,
        parties: &[Party],
        as_of: NaiveDate,
    ) -> Vec<ChecklistSection> {
        let mut sections = Vec::with_capacity(1 + case.related_party_links.len() + case.accounts.len());

        sections.extend(self.entity_section(case, as_of));
        sections.extend(
            case.related_party_links
                .iter()
                .filter_map(|link| self.party_section(case, parties, link, as_of)),
        );
        sections.extend(
            case.accounts
                .iter()
                .filter_map(|account| self.account_section(case, account, as_of)),
        );

        debug!(
            case_id = %case.case_id,
            sections = sections.len(),
            "checklist generated"
        );
        sections
    }

    fn entity_section(&self, case: &Case, as_of: NaiveDate) -> Option<ChecklistSection> {
        let entity_type = case.entity_data.entity_type.as_str();
        if !self.catalog.has_entity_type(entity_type) {
            warn!(
                case_id = %case.case_id,
                entity_type,
                "unknown entity type, entity section omitted"
            );
            return None;
        }

        let mut items = Vec::new();

        for (i, requirement) in self.catalog.entity_requirements(entity_type).iter().enumerate() {
            items.push(self.build_item(
                case,
                RequirementId::entity(i),
                requirement,
                Owner::Entity,
                ItemOrigin::Template,
                as_of,
            ));
        }

        let forms = if entity_type == INDIVIDUAL_ACCOUNT {
            &self.catalog.bank_forms().individual_stakeholder
        } else {
            &self.catalog.bank_forms().corporate_mandatory
        };
        for (i, requirement) in BankFormTemplates::to_requirements(forms).iter().enumerate() {
            items.push(self.build_item(
                case,
                RequirementId::forms(i),
                requirement,
                Owner::Entity,
                ItemOrigin::Fixed,
                as_of,
            ));
        }

        for (i, requirement) in self.catalog.risk_requirements(case.risk_level).iter().enumerate() {
            items.push(self.build_item(
                case,
                RequirementId::risk(i),
                requirement,
                Owner::Entity,
                ItemOrigin::Template,
                as_of,
            ));
        }

        if items.is_empty() {
            return None;
        }

        Some(ChecklistSection::new(
            SectionKind::Entity,
            "Entity Documents".to_string(),
            format!(
                "Documents required for {} ({})",
                case.entity_data.entity_name, entity_type
            ),
            items,
            true,
        ))
    }

    fn party_section(
        &self,
        case: &Case,
        parties: &[Party],
        link: &RelatedPartyLink,
        as_of: NaiveDate,
    ) -> Option<ChecklistSection> {
        let Some(party) = party_by_id(parties, link.party_id) else {
            warn!(
                case_id = %case.case_id,
                party_id = %link.party_id,
                "related party not in roster, section skipped"
            );
            return None;
        };

        let owner = Owner::Party(party.id);
        let templates = self.catalog.individual_requirements(&party.residency_status);
        if templates.is_empty() {
            debug!(
                party_id = %party.id,
                residency_status = %party.residency_status,
                "no residency template for party"
            );
        }

        let mut items: Vec<ChecklistItem> = templates
            .iter()
            .enumerate()
            .map(|(i, requirement)| {
                self.build_item(
                    case,
                    RequirementId::party(party.id, i),
                    requirement,
                    owner,
                    ItemOrigin::Template,
                    as_of,
                )
            })
            .collect();

        if party.is_pep || party.risk_score > HIGH_RISK_SCORE_THRESHOLD {
            items.push(self.build_item(
                case,
                RequirementId::party_source_of_wealth(party.id),
                &source_of_wealth_requirement(),
                owner,
                ItemOrigin::Fixed,
                as_of,
            ));
        }

        if items.is_empty() {
            return None;
        }

        Some(ChecklistSection::new(
            SectionKind::Party(party.id),
            format!("{} ({})", party.name, link.relationship_type),
            format!(
                "Documents required for {} as {}",
                party.name, link.relationship_type
            ),
            items,
            link.is_primary,
        ))
    }

    fn account_section(
        &self,
        case: &Case,
        account: &Account,
        as_of: NaiveDate,
    ) -> Option<ChecklistSection> {
        let items: Vec<ChecklistItem> = self
            .catalog
            .account_opening_forms()
            .iter()
            .enumerate()
            .map(|(i, requirement)| {
                self.build_item(
                    case,
                    RequirementId::account(account.account_id, i),
                    requirement,
                    Owner::Entity,
                    ItemOrigin::Fixed,
                    as_of,
                )
            })
            .collect();

        if items.is_empty() {
            return None;
        }

        Some(ChecklistSection::new(
            SectionKind::Account(account.account_id),
            format!(
                "Account Forms - {} ({})",
                account.account_type, account.currency
            ),
            format!(
                "Opening forms for the {} {} account",
                account.currency, account.account_type
            ),
            items,
            true,
        ))
    }

    fn build_item(
        &self,
        case: &Case,
        requirement_id: RequirementId,
        requirement: &Requirement,
        owner: Owner,
        origin: ItemOrigin,
        as_of: NaiveDate,
    ) -> ChecklistItem {
        let mut requirement = requirement.clone();
        if origin == ItemOrigin::Template && self.category_mode == CategoryMode::LegacyOther {
            requirement.category = RequirementCategory::Other;
        }

        let submissions = case
            .document_link(&requirement_id)
            .map(|link| link.submissions.clone())
            .unwrap_or_default();

        let status = match submissions.last() {
            None => DocumentStatus::Missing,
            Some(latest) => {
                let presented = latest.presented_status(as_of);
                if presented != latest.status {
                    debug!(
                        requirement_id = %requirement_id,
                        expiry_date = ?latest.expiry_date,
                        "verified document has expired"
                    );
                }
                presented
            }
        };

        let last_submission_date = submissions.last().map(|s| s.submitted_at);
        let priority = Priority::for_required(requirement.required);

        ChecklistItem {
            requirement_id,
            requirement,
            owner,
            status,
            submissions,
            last_submission_date,
            priority,
        }
    }
}

/// The synthetic requirement for PEPs and high-risk parties.
#[must_use]
pub fn source_of_wealth_requirement() -> Requirement {
    Requirement::new(SOURCE_OF_WEALTH, RequirementCategory::Financial, true)
        .with_description("Required for politically exposed and high-risk individuals")
}
