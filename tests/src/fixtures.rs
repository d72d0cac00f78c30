//! Shared fixtures
//!
//! One discovery document and one small cohort, sized so that every
//! interesting count sits next to the default threshold of 5:
//!
//! | Field | Observed |
//! |-------|----------|
//! | `diagnosis` / `tier` | A: 3, B: 10, C: 5 |
//! | `date_of_consent` | 2021-01: 3, 2021-04: 9, absent: 6 |
//! | `experiment_type` | WGS: 8, RNA-seq: 1 |

use cd_03_field_registry::{ConfigurationError, FieldRegistry, StaticSchema};
use cd_04_aggregation::InMemoryRecordStore;
use cd_05_permissions::AuthorizationService;
use cd_06_discovery::{DiscoveryService, DiscoverySettings};
use serde_json::{json, Value};
use shared_types::Collection;
use std::sync::Arc;

/// Threshold used by most scenarios.
pub const THRESHOLD: u64 = 5;

/// Individuals in [`cohort`].
pub const COHORT_SIZE: usize = 18;

pub fn document(count_threshold: u64) -> Value {
    json!({
        "overview": [
            {"section_title": "Demographics", "charts": [
                {"field": "sex", "chart_type": "pie"},
                {"field": "age", "chart_type": "bar"},
                {"field": "date_of_consent", "chart_type": "bar"}
            ]},
            {"section_title": "Clinical", "charts": [
                {"field": "diagnosis", "chart_type": "bar"},
                {"field": "tier", "chart_type": "pie"}
            ]},
            {"section_title": "Experiments", "charts": [
                {"field": "experiment_type", "chart_type": "pie"}
            ]}
        ],
        "search": [
            {"section_title": "Demographics", "fields": ["sex", "age", "date_of_consent"]},
            {"section_title": "Clinical", "fields": ["diagnosis"]},
            {"section_title": "Experiments", "fields": ["experiment_type"]}
        ],
        "fields": {
            "sex": {
                "mapping": "individual/sex",
                "title": "Sex",
                "datatype": "string",
                "config": {"enum": ["MALE", "FEMALE"]}
            },
            "age": {
                "mapping": "individual/age_numeric",
                "title": "Age",
                "datatype": "number",
                "config": {"bin_size": 20, "taper_left": 20, "taper_right": 80,
                           "units": "years", "minimum": 0, "maximum": 100}
            },
            "date_of_consent": {
                "mapping": "individual/extra_properties/date_of_consent",
                "title": "Verbal consent date",
                "datatype": "date",
                "config": {"bin_by": "month"}
            },
            "diagnosis": {
                "mapping": "individual/extra_properties/diagnosis",
                "title": "Diagnosis",
                "datatype": "string",
                "config": {"enum": null}
            },
            "tier": {
                "mapping": "individual/extra_properties/tier",
                "title": "Tier",
                "datatype": "string",
                "config": {"enum": ["A", "B", "C"]}
            },
            "experiment_type": {
                "mapping": "experiment/experiment_type",
                "mapping_for_search_filter": "individual/biosamples/experiment/experiment_type",
                "title": "Experiment Types",
                "datatype": "string",
                "config": {"enum": null}
            }
        },
        "rules": {"count_threshold": count_threshold, "max_query_parameters": 2}
    })
}

pub fn registry(count_threshold: u64) -> Result<FieldRegistry, ConfigurationError> {
    let document = serde_json::from_value(document(count_threshold))?;
    FieldRegistry::new(document, &StaticSchema::clinical())
}

fn label_of(i: usize) -> &'static str {
    match i {
        0..=2 => "A",
        3..=12 => "B",
        _ => "C",
    }
}

fn individual(i: usize) -> Value {
    let mut extra = json!({"diagnosis": label_of(i), "tier": label_of(i)});
    let consent = match i {
        0..=2 => Some(format!("2021-01-{:02}", 10 + i)),
        3..=11 => Some(format!("2021-04-{:02}", 1 + i)),
        _ => None,
    };
    if let (Some(date), Some(map)) = (consent, extra.as_object_mut()) {
        map.insert("date_of_consent".into(), Value::String(date));
    }

    let biosamples = match i {
        0..=7 => json!([{"id": format!("bs-{}", i), "experiment": {"experiment_type": "WGS"}}]),
        8 => json!([{"id": format!("bs-{}", i), "experiment": {"experiment_type": "RNA-seq"}}]),
        _ => json!([]),
    };

    json!({
        "id": format!("ind-{}", i),
        "sex": if i % 2 == 0 { "MALE" } else { "FEMALE" },
        "age_numeric": 10 + 4 * i,
        "extra_properties": extra,
        "biosamples": biosamples,
    })
}

/// The cohort described in the module docs.
pub fn cohort() -> InMemoryRecordStore {
    let individuals: Vec<Value> = (0..COHORT_SIZE).map(individual).collect();
    let experiments: Vec<Value> = (0..9)
        .map(|i| {
            let kind = if i < 8 { "WGS" } else { "RNA-seq" };
            json!({"id": format!("exp-{}", i), "experiment_type": kind})
        })
        .collect();

    InMemoryRecordStore::new()
        .with_records(Collection::Individual, individuals)
        .with_records(Collection::Experiment, experiments)
}

/// `copies` repetitions of [`cohort`], for benchmarks.
pub fn large_cohort(copies: usize) -> InMemoryRecordStore {
    (0..copies).fold(InMemoryRecordStore::new(), |store, _| {
        store.with_records(
            Collection::Individual,
            (0..COHORT_SIZE).map(individual).collect(),
        )
    })
}

pub fn service<A>(registry: FieldRegistry, store: InMemoryRecordStore, authz: A) -> DiscoveryService<InMemoryRecordStore, A>
where
    A: AuthorizationService + 'static,
{
    service_with_settings(registry, store, authz, &DiscoverySettings::default())
}

pub fn service_with_settings<A>(
    registry: FieldRegistry,
    store: InMemoryRecordStore,
    authz: A,
    settings: &DiscoverySettings,
) -> DiscoveryService<InMemoryRecordStore, A>
where
    A: AuthorizationService + 'static,
{
    DiscoveryService::new(Some(Arc::new(registry)), Arc::new(store), Arc::new(authz), settings)
}
