//! Subcommand implementations

use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use cd_03_field_registry::{load_registry, FieldKind, FieldRegistry, StaticSchema};
use cd_04_aggregation::InMemoryRecordStore;
use cd_05_permissions::StaticPolicyAuthorizer;
use cd_06_discovery::{DiscoveryApi, DiscoveryOutcome, DiscoveryService, DiscoverySettings};
use serde_json::{json, Value};
use shared_types::Caller;
use tracing::{debug, warn};

/// What the fixture authorizer grants every caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    Counts,
    Full,
}

/// Load and validate a discovery document against the clinical schema.
pub fn load_config(path: &Path) -> Result<FieldRegistry> {
    let registry = match load_registry(path, &StaticSchema::clinical()) {
        Ok(registry) => registry,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Discovery configuration rejected");
            return Err(e).with_context(|| format!("invalid discovery configuration {}", path.display()));
        }
    };
    match registry {
        Some(registry) => {
            debug!(path = %path.display(), fields = registry.fields().count(), "Discovery configuration loaded");
            Ok(registry)
        }
        None => bail!("no discovery configuration at {}", path.display()),
    }
}

fn kind_name(kind: &FieldKind) -> &'static str {
    match kind {
        FieldKind::String { .. } => "string",
        FieldKind::Number { .. } => "number",
        FieldKind::Date { .. } => "date",
    }
}

/// Human-readable summary of a loaded configuration.
pub fn validate_report(registry: &FieldRegistry) -> Result<String> {
    let mut out = String::new();
    let rules = registry.rules();
    writeln!(
        out,
        "rules: count_threshold={} max_query_parameters={}",
        rules.count_threshold, rules.max_query_parameters
    )?;

    writeln!(out, "overview:")?;
    for section in registry.overview() {
        let charts: Vec<String> = section
            .charts
            .iter()
            .map(|c| format!("{} ({})", c.field, c.chart_type))
            .collect();
        writeln!(out, "  {}: {}", section.section_title, charts.join(", "))?;
    }

    writeln!(out, "search:")?;
    for section in registry.search() {
        writeln!(out, "  {}: {}", section.section_title, section.fields.join(", "))?;
    }

    writeln!(out, "fields:")?;
    for field in registry.fields() {
        writeln!(
            out,
            "  {:<24} {:<7} {:<12} {}",
            field.id,
            kind_name(&field.kind),
            field.data_type(),
            field.path
        )?;
    }
    Ok(out)
}

/// Bin layout of a number field, or the strategy of a date field.
pub fn bins_report(registry: &FieldRegistry, field_id: &str) -> Result<String> {
    let Some(field) = registry.field(field_id) else {
        bail!("unknown field `{}`", field_id);
    };

    let mut out = String::new();
    match &field.kind {
        FieldKind::Number { bins, units, .. } => {
            if let Some(units) = units {
                writeln!(out, "units: {}", units)?;
            }
            for bin in bins {
                let bound = |b: Option<i64>| b.map_or_else(|| "-".to_string(), |b| b.to_string());
                writeln!(out, "{:<14} {:>8} {:>8}", bin.label, bound(bin.floor), bound(bin.ceil))?;
            }
        }
        FieldKind::Date { bin_by } => {
            writeln!(out, "bin_by: {:?}", bin_by)?;
        }
        FieldKind::String { .. } => bail!("field `{}` is categorical and has no bin layout", field_id),
    }
    Ok(out)
}

/// Run the public overview over an in-memory record fixture.
pub async fn overview_json(registry: FieldRegistry, records: Value, access: AccessLevel) -> Result<Value> {
    let store = InMemoryRecordStore::from_fixture(records).context("invalid record fixture")?;
    let authz = match access {
        AccessLevel::Counts => StaticPolicyAuthorizer::counts_for_everyone(),
        AccessLevel::Full => StaticPolicyAuthorizer::data_for_everyone(),
    };

    let service = DiscoveryService::new(
        Some(Arc::new(registry)),
        Arc::new(store),
        Arc::new(authz),
        &DiscoverySettings::default(),
    );

    let outcome = service.public_overview(&Caller::anonymous()).await?;
    let value = match outcome {
        DiscoveryOutcome::Success(overview) => serde_json::to_value(overview)?,
        DiscoveryOutcome::NotConfigured(message) => json!({ "message": message }),
        DiscoveryOutcome::Forbidden => json!({ "message": "Forbidden" }),
    };
    Ok(value)
}
