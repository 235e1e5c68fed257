//! Subcommand handlers. Each returns the text to print on stdout.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};

use kyc_core::case::{Case, Party};
use kyc_core::catalog::RequirementCatalog;
use kyc_core::checklist::{ChecklistGenerator, ChecklistSection};
use kyc_core::progress::{ChecklistSummary, ProgressCalculator};
use kyc_core::workflow::{AccountStatus, CaseStatus, UserRole};
use kyc_shared::ChecklistConfig;
use kyc_shared::types::{AccountId, CaseId};

/// Arguments of the `generate` subcommand.
#[derive(Debug)]
pub struct GenerateArgs {
    pub case: PathBuf,
    pub parties: PathBuf,
    pub role: UserRole,
    pub as_of: Option<NaiveDate>,
    pub catalog: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateOutput<'a> {
    case_id: CaseId,
    case_status: CaseStatus,
    as_of: NaiveDate,
    sections: &'a [ChecklistSection],
    summary: ChecklistSummary,
    accounts: Vec<AccountGate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AccountGate {
    account_id: AccountId,
    status: AccountStatus,
    is_submittable: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RolesOutput<'a> {
    entity_type: &'a str,
    roles: &'a [String],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogReport {
    entity_types: Vec<String>,
    residency_statuses: Vec<String>,
    account_opening_forms: usize,
}

/// `generate`: checklist sections, summary and account gates.
pub fn run_generate(config: &ChecklistConfig, args: &GenerateArgs) -> Result<String> {
    let custom = load_configured_catalog(config, args.catalog.as_deref())?;
    let catalog = match &custom {
        Some(catalog) => catalog,
        None => RequirementCatalog::builtin(),
    };

    let case: Case = read_json(&args.case).context("failed to load case")?;
    let parties: Vec<Party> = read_json(&args.parties).context("failed to load party roster")?;
    let as_of = args.as_of.unwrap_or_else(|| Utc::now().date_naive());

    let sections = ChecklistGenerator::new(catalog)
        .with_category_mode(config.category_mode)
        .generate(&case, &parties, as_of);
    let summary = ProgressCalculator::summarize(&sections, args.role);

    let accounts = case
        .accounts
        .iter()
        .map(|account| AccountGate {
            account_id: account.account_id,
            status: account.status,
            is_submittable: ProgressCalculator::account_section(&sections, account.account_id)
                .is_some_and(ProgressCalculator::is_account_submittable),
        })
        .collect();

    info!(
        case_id = %case.case_id,
        sections = sections.len(),
        progress = %summary.progress_percentage,
        submittable = summary.is_submittable,
        "checklist generated"
    );

    let output = GenerateOutput {
        case_id: case.case_id,
        case_status: case.status,
        as_of,
        sections: &sections,
        summary,
        accounts,
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

/// `roles`: relationship types valid for an entity type.
pub fn run_roles(
    config: &ChecklistConfig,
    entity_type: &str,
    catalog_path: Option<&Path>,
) -> Result<String> {
    let custom = load_configured_catalog(config, catalog_path)?;
    let catalog = match &custom {
        Some(catalog) => catalog,
        None => RequirementCatalog::builtin(),
    };

    let roles = catalog.roles_for(entity_type);
    if roles.is_empty() {
        warn!(entity_type, "no relationship roles for entity type");
    }

    Ok(serde_json::to_string_pretty(&RolesOutput { entity_type, roles })?)
}

/// `validate-catalog`: parse, validate and summarise a catalog file.
pub fn run_validate_catalog(path: &Path) -> Result<String> {
    let catalog = load_catalog(path)?;
    let report = CatalogReport {
        entity_types: catalog.entity_templates.keys().cloned().collect(),
        residency_statuses: catalog.individual_templates.keys().cloned().collect(),
        account_opening_forms: catalog.account_opening_forms().len(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// The command-line catalog wins over the configured one; `None` means
/// the built-in catalog.
fn load_configured_catalog(
    config: &ChecklistConfig,
    override_path: Option<&Path>,
) -> Result<Option<RequirementCatalog>> {
    let path = override_path
        .map(Path::to_path_buf)
        .or_else(|| config.catalog_path.as_ref().map(PathBuf::from));

    path.map(|p| load_catalog(&p)).transpose()
}

fn load_catalog(path: &Path) -> Result<RequirementCatalog> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    let catalog = RequirementCatalog::from_json_str(&raw)
        .with_context(|| format!("invalid catalog {}", path.display()))?;
    info!(path = %path.display(), entity_types = catalog.entity_templates.len(), "catalog loaded");
    Ok(catalog)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}
