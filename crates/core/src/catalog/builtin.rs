//! Built-in requirement catalog.
//!
//! These tables mirror the bank's current onboarding policy for Singapore
//! booked relationships.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;

use crate::case::RiskLevel;
use crate::catalog::types::{
    BankFormTemplates, Requirement, RequirementCatalog, RequirementCategory as Cat,
};

/// Entity type for personal accounts. Its entity template is empty and it
/// takes the individual stakeholder forms instead of the corporate set.
pub const INDIVIDUAL_ACCOUNT: &str = "Individual Account";

/// Residency bucket for citizens and permanent residents.
pub const RESIDENT: &str = "Singaporean/PR";

/// Residency bucket for everyone else.
pub const FOREIGNER: &str = "Foreigner";

static BUILTIN: Lazy<RequirementCatalog> = Lazy::new(build);

impl RequirementCatalog {
    /// Returns the process-wide built-in catalog.
    #[must_use]
    pub fn builtin() -> &'static RequirementCatalog {
        &BUILTIN
    }
}

fn req(name: &str, category: Cat) -> Requirement {
    Requirement::new(name, category, true)
}

fn optional(name: &str, category: Cat) -> Requirement {
    Requirement::new(name, category, false)
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

fn business_profile() -> Requirement {
    req("ACRA Business Profile", Cat::Corporate)
        .with_validity_months(3)
        .with_description("Extract dated within the last 3 months")
}

fn business_address() -> Requirement {
    req("Proof of Business Address", Cat::Address).with_validity_months(3)
}

fn build() -> RequirementCatalog {
    let mut entity_templates = BTreeMap::new();
    entity_templates.insert(INDIVIDUAL_ACCOUNT.to_string(), Vec::new());
    entity_templates.insert(
        "Private Limited Company".to_string(),
        vec![
            business_profile(),
            req("Certificate of Incorporation", Cat::Corporate),
            req("Constitution / Memorandum & Articles of Association", Cat::Legal),
            req("Board Resolution to Open Account", Cat::Authorization),
            req("Register of Directors", Cat::Corporate),
            req("Register of Members", Cat::Corporate),
            req("Register of Registrable Controllers", Cat::Kyc),
            req("Group Structure Chart", Cat::Kyc)
                .with_description("Ownership chain up to every ultimate beneficial owner"),
            business_address(),
        ],
    );
    entity_templates.insert(
        "Public Company".to_string(),
        vec![
            business_profile(),
            req("Certificate of Incorporation", Cat::Corporate),
            req("Constitution / Memorandum & Articles of Association", Cat::Legal),
            req("Board Resolution to Open Account", Cat::Authorization),
            req("Register of Directors", Cat::Corporate),
            req("Latest Audited Financial Statements", Cat::Financial),
            optional("Evidence of Listing", Cat::Corporate),
            business_address(),
        ],
    );
    entity_templates.insert(
        "Sole Proprietorship".to_string(),
        vec![business_profile(), business_address()],
    );
    entity_templates.insert(
        "Partnership".to_string(),
        vec![
            business_profile(),
            req("Partnership Agreement", Cat::Legal),
            req("Partners' Resolution to Open Account", Cat::Authorization),
            business_address(),
        ],
    );
    entity_templates.insert(
        "Limited Liability Partnership".to_string(),
        vec![
            business_profile(),
            req("LLP Agreement", Cat::Legal),
            req("Partners' Resolution to Open Account", Cat::Authorization),
            req("Register of Registrable Controllers", Cat::Kyc),
            business_address(),
        ],
    );
    entity_templates.insert(
        "Trust".to_string(),
        vec![
            req("Trust Deed", Cat::Legal),
            optional("Deed of Appointment of Trustees", Cat::Legal),
            req("Trustee Resolution to Open Account", Cat::Authorization),
            req("Register of Beneficiaries", Cat::Kyc),
            req("Source of Trust Assets Declaration", Cat::Financial),
        ],
    );
    entity_templates.insert(
        "Society/Charity".to_string(),
        vec![
            req("Certificate of Registration", Cat::Corporate),
            req("Constitution / By-Laws", Cat::Legal),
            req("Committee Resolution to Open Account", Cat::Authorization),
            req("List of Office Bearers", Cat::Kyc),
            business_address(),
        ],
    );

    let mut individual_templates = BTreeMap::new();
    individual_templates.insert(
        RESIDENT.to_string(),
        vec![
            req("NRIC (Front and Back)", Cat::Identity),
            req("Proof of Residential Address", Cat::Address)
                .with_validity_months(3)
                .with_description("Utility bill or bank statement dated within 3 months"),
            req("Specimen Signature Card", Cat::Signature),
        ],
    );
    individual_templates.insert(
        FOREIGNER.to_string(),
        vec![
            req("Passport", Cat::Identity),
            req("Proof of Residential Address", Cat::Address)
                .with_validity_months(3)
                .with_description("Utility bill or bank statement dated within 3 months"),
            optional("Employment Pass / Work Permit", Cat::Identity),
            req("Specimen Signature Card", Cat::Signature),
        ],
    );

    let medium = vec![req("Source of Funds Declaration", Cat::Financial)];
    let high = vec![
        req("Source of Funds Declaration", Cat::Financial),
        req("Enhanced Due Diligence Report", Cat::Kyc),
        req("Senior Management Approval Memo", Cat::Authorization),
    ];
    let mut critical = high.clone();
    critical.push(req("Adverse Media Screening Report", Cat::Kyc));
    critical.push(req("Site Visit Report", Cat::Kyc));

    let mut risk_based_documents = BTreeMap::new();
    risk_based_documents.insert(RiskLevel::Low, Vec::new());
    risk_based_documents.insert(RiskLevel::Medium, medium);
    risk_based_documents.insert(RiskLevel::High, high);
    risk_based_documents.insert(RiskLevel::Critical, critical);

    let bank_forms = BankFormTemplates {
        corporate_mandatory: names(&[
            "Corporate Account Opening Form",
            "Board Resolution Form (Bank Template)",
            "Mandate Form",
            "FATCA/CRS Entity Self-Certification",
        ]),
        individual_stakeholder: names(&[
            "Individual Account Opening Form",
            "FATCA/CRS Individual Self-Certification",
            "Customer Due Diligence Questionnaire",
        ]),
        corporate_optional: names(&[
            "Internet Banking Application",
            "GIRO Application Form",
            "Cheque Book Request",
        ]),
    };

    let account_opening_forms = vec![
        req("Account Application Form", Cat::Corporate),
        req("Signature Mandate", Cat::Signature),
        req("Terms and Conditions Acknowledgement", Cat::Legal),
        optional("Standing Instruction Form", Cat::Authorization),
    ];

    let mut entity_role_mapping = BTreeMap::new();
    entity_role_mapping.insert(
        INDIVIDUAL_ACCOUNT.to_string(),
        names(&[
            "Account Holder",
            "Joint Account Holder",
            "Authorised Signatory",
            "Power of Attorney",
        ]),
    );
    let company_roles = names(&[
        "Director",
        "Shareholder",
        "Ultimate Beneficial Owner",
        "Authorised Signatory",
        "Company Secretary",
    ]);
    entity_role_mapping.insert("Private Limited Company".to_string(), company_roles.clone());
    entity_role_mapping.insert("Public Company".to_string(), company_roles);
    entity_role_mapping.insert(
        "Sole Proprietorship".to_string(),
        names(&["Sole Proprietor", "Authorised Signatory"]),
    );
    entity_role_mapping.insert(
        "Partnership".to_string(),
        names(&["Partner", "Authorised Signatory", "Ultimate Beneficial Owner"]),
    );
    entity_role_mapping.insert(
        "Limited Liability Partnership".to_string(),
        names(&[
            "Partner",
            "Manager",
            "Authorised Signatory",
            "Ultimate Beneficial Owner",
        ]),
    );
    entity_role_mapping.insert(
        "Trust".to_string(),
        names(&[
            "Trustee",
            "Settlor",
            "Protector",
            "Authorised Signatory",
            "Beneficiary",
            "Ultimate Controller",
        ]),
    );
    entity_role_mapping.insert(
        "Society/Charity".to_string(),
        names(&["Chairman", "Secretary", "Treasurer", "Authorised Signatory"]),
    );

    RequirementCatalog {
        entity_templates,
        individual_templates,
        risk_based_documents,
        bank_forms,
        account_opening_forms,
        entity_role_mapping,
    }
}
