//! Discovery Service
//!
//! Orchestrates one request: resolve the caller's permissions, derive the
//! rules in effect, fan out one aggregation per field and assemble the
//! response. Nothing is shared between requests except the immutable
//! registry.

use async_trait::async_trait;
use cd_02_censorship::{Censor, CensorshipPolicy, DisclosureRules, DisclosureTier};
use cd_03_field_registry::{data_types_of, load_registry, FieldDescriptor, FieldRegistry, FieldSchema};
use cd_04_aggregation::{AggregationApi, Condition, RecordStore, StatsService};
use cd_05_permissions::{AuthorizationService, DataTypePermissions, PermissionApi, PermissionComposer};
use cohort_telemetry::{log_event, subsystem_span};
use futures::future::try_join_all;
use shared_types::{Caller, Collection, DataType, DataTypePermission};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, Instrument};

use crate::domain::{
    DiscoveryOutcome, EntityCounts, FieldWithData, FieldWithOptions, OutcomeKind, OverviewResponse, SearchCount,
    SearchFieldsResponse, SearchFieldsSection, SearchFilter, NO_PUBLIC_DATA_AVAILABLE, NO_PUBLIC_FIELDS_CONFIGURED,
};
use crate::error::{DiscoveryError, ValidationError};
use crate::metrics::{DiscoveryMetrics, MetricsSnapshot, Operation};
use crate::ports::DiscoveryApi;
use crate::settings::DiscoverySettings;

const SUBSYSTEM: &str = "cd-06-discovery";

/// Discovery orchestrator over a record store and an authorization service.
pub struct DiscoveryService<S: RecordStore, A: AuthorizationService> {
    registry: Option<Arc<FieldRegistry>>,
    stats: StatsService<S>,
    permissions: PermissionComposer<A>,
    metrics: DiscoveryMetrics,
}

impl<S, A> DiscoveryService<S, A>
where
    S: RecordStore + 'static,
    A: AuthorizationService + 'static,
{
    /// `registry` is `None` when discovery is not configured on this node.
    pub fn new(
        registry: Option<Arc<FieldRegistry>>,
        store: Arc<S>,
        authz: Arc<A>,
        settings: &DiscoverySettings,
    ) -> Self {
        Self {
            registry,
            stats: StatsService::new(store),
            permissions: PermissionComposer::new(authz).with_timeout(settings.authz_timeout),
            metrics: DiscoveryMetrics::new(),
        }
    }

    /// Load the discovery document named by `settings` and build the service.
    pub fn load(
        settings: &DiscoverySettings,
        schema: &dyn FieldSchema,
        store: Arc<S>,
        authz: Arc<A>,
    ) -> Result<Self, DiscoveryError> {
        settings.validate()?;
        let registry = load_registry(&settings.config_path, schema)?;
        if registry.is_none() {
            log_event!(
                warn,
                SUBSYSTEM,
                "Discovery is not configured",
                path = %settings.config_path.display()
            );
        }
        Ok(Self::new(registry.map(Arc::new), store, authz, settings))
    }

    pub fn registry(&self) -> Option<&FieldRegistry> {
        self.registry.as_deref()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics
            .snapshot(self.permissions.authorization_failures())
    }

    fn finish<T>(
        &self,
        operation: Operation,
        result: Result<DiscoveryOutcome<T>, DiscoveryError>,
    ) -> Result<DiscoveryOutcome<T>, DiscoveryError> {
        let kind = match &result {
            Ok(outcome) => outcome.kind(),
            Err(_) => OutcomeKind::Error,
        };
        self.metrics.record_outcome(kind);

        match &result {
            Err(e) => log_event!(
                warn,
                SUBSYSTEM,
                "Discovery request failed",
                operation = operation.as_str(),
                error = %e
            ),
            Ok(_) => log_event!(
                debug,
                SUBSYSTEM,
                "Discovery request completed",
                operation = operation.as_str(),
                outcome = ?kind
            ),
        }
        result
    }

    // =========================================================================
    // FIELD LISTING
    // =========================================================================

    async fn list_fields(&self, caller: &Caller) -> Result<DiscoveryOutcome<SearchFieldsResponse>, DiscoveryError> {
        let Some(registry) = self.registry.as_deref() else {
            return Ok(DiscoveryOutcome::NotConfigured(NO_PUBLIC_FIELDS_CONFIGURED));
        };

        let implicated = data_types_of(registry.queryable_fields());
        let permissions = self.permissions.resolve(caller, &implicated).await;
        let permissions = &permissions;
        let policy = CensorshipPolicy::new(Some(registry.rules()));

        let sections = try_join_all(registry.search().iter().map(|section| async move {
            let fields = try_join_all(
                section
                    .fields
                    .iter()
                    .filter_map(|id| registry.field(id))
                    .map(|field| self.field_with_options(field, permissions.get(field.data_type()), policy)),
            )
            .await?;

            Ok::<_, DiscoveryError>(SearchFieldsSection {
                section_title: section.section_title.clone(),
                fields: fields.into_iter().flatten().collect(),
            })
        }))
        .await?;

        Ok(DiscoveryOutcome::Success(SearchFieldsResponse { sections }))
    }

    /// `None` when the caller may not count the field's data type.
    async fn field_with_options(
        &self,
        field: &FieldDescriptor,
        permission: DataTypePermission,
        policy: CensorshipPolicy,
    ) -> Result<Option<FieldWithOptions>, DiscoveryError> {
        if !permission.counts() {
            debug!(field_id = %field.id, "Omitting field without counts permission");
            return Ok(None);
        }

        let censor = policy.censor(permission.low_counts_censored());
        let options = self.stats.field_options(field, censor).await?;
        Ok(Some(FieldWithOptions {
            field: field.clone(),
            options,
        }))
    }

    // =========================================================================
    // OVERVIEW
    // =========================================================================

    async fn overview(&self, caller: &Caller) -> Result<DiscoveryOutcome<OverviewResponse>, DiscoveryError> {
        let Some(registry) = self.registry.as_deref() else {
            return Ok(DiscoveryOutcome::NotConfigured(NO_PUBLIC_DATA_AVAILABLE));
        };

        // Entity totals span every public collection.
        let implicated: BTreeSet<DataType> = DataType::ALL.into_iter().collect();
        let permissions = self.permissions.resolve(caller, &implicated).await;
        if !permissions.any_counts() {
            return Ok(DiscoveryOutcome::Forbidden);
        }

        let rules = permissions
            .tier(&data_types_of(registry.queryable_fields()))
            .rules(registry.rules());
        let policy = CensorshipPolicy::new(Some(registry.rules()));

        let overview_fields = registry.overview_fields();
        let (fields, counts) = futures::try_join!(
            try_join_all(
                overview_fields
                    .iter()
                    .map(|field| self.field_with_data(field, permissions.get(field.data_type()), policy)),
            ),
            self.entity_counts(&permissions, policy),
        )?;

        Ok(DiscoveryOutcome::Success(OverviewResponse {
            layout: registry.overview().to_vec(),
            fields: fields
                .into_iter()
                .map(|f| (f.field.id.clone(), f))
                .collect::<BTreeMap<_, _>>(),
            counts,
            max_query_parameters: rules.max_query_parameters,
            count_threshold: rules.count_threshold,
        }))
    }

    async fn field_with_data(
        &self,
        field: &FieldDescriptor,
        permission: DataTypePermission,
        policy: CensorshipPolicy,
    ) -> Result<FieldWithData, DiscoveryError> {
        let data = if permission.counts() {
            let censor = policy.censor(permission.low_counts_censored());
            Some(self.stats.field_stats(field, censor).await?)
        } else {
            None
        };

        Ok(FieldWithData {
            field: field.clone(),
            data,
        })
    }

    async fn entity_counts(
        &self,
        permissions: &DataTypePermissions,
        policy: CensorshipPolicy,
    ) -> Result<EntityCounts, DiscoveryError> {
        let totals = try_join_all(Collection::ALL.iter().map(|collection| async move {
            let permission = permissions.get(collection.data_type());
            if !permission.counts() {
                return Ok::<_, DiscoveryError>(None);
            }
            let censor = policy.censor(permission.low_counts_censored());
            Ok(Some(self.stats.record_count(*collection, censor).await?))
        }))
        .await?;

        let mut counts = EntityCounts::default();
        for (collection, total) in Collection::ALL.iter().zip(totals) {
            match collection {
                Collection::Individual => counts.individuals = total,
                Collection::Biosample => counts.biosamples = total,
                Collection::Experiment => counts.experiments = total,
            }
        }
        Ok(counts)
    }

    // =========================================================================
    // RULES AND SEARCH
    // =========================================================================

    async fn rules(
        &self,
        caller: &Caller,
        field_ids: Option<&[String]>,
    ) -> Result<DiscoveryOutcome<DisclosureRules>, DiscoveryError> {
        let Some(registry) = self.registry.as_deref() else {
            return Ok(DiscoveryOutcome::NotConfigured(NO_PUBLIC_FIELDS_CONFIGURED));
        };

        let fields = match field_ids {
            Some(ids) if !ids.is_empty() => ids
                .iter()
                .map(|id| queryable_field(registry, id))
                .collect::<Result<Vec<_>, _>>()?,
            _ => registry.queryable_fields(),
        };

        let implicated = data_types_of(fields.iter().copied());
        let permissions = self.permissions.resolve(caller, &implicated).await;
        Ok(DiscoveryOutcome::Success(
            permissions.tier(&implicated).rules(registry.rules()),
        ))
    }

    async fn search(
        &self,
        caller: &Caller,
        filters: &[SearchFilter],
    ) -> Result<DiscoveryOutcome<SearchCount>, DiscoveryError> {
        let Some(registry) = self.registry.as_deref() else {
            return Ok(DiscoveryOutcome::NotConfigured(NO_PUBLIC_FIELDS_CONFIGURED));
        };

        let fields = filters
            .iter()
            .map(|filter| queryable_field(registry, &filter.field))
            .collect::<Result<Vec<_>, _>>()?;

        // The result is a count of individuals whatever the filters touch.
        let mut implicated = data_types_of(fields.iter().copied());
        implicated.insert(Collection::Individual.data_type());

        let permissions = self.permissions.resolve(caller, &implicated).await;
        let tier = permissions.tier(&implicated);
        if tier == DisclosureTier::NoPermissions {
            return Ok(DiscoveryOutcome::Forbidden);
        }

        let rules = tier.rules(registry.rules());
        if filters.len() as u64 > rules.max_query_parameters {
            return Err(ValidationError::TooManyParameters {
                count: filters.len(),
                max: rules.max_query_parameters,
            }
            .into());
        }

        let conditions = fields
            .iter()
            .zip(filters)
            .map(|(field, filter)| Condition::for_field(field, &filter.value))
            .collect::<Result<Vec<_>, _>>()?;

        let count = self
            .stats
            .search_count(&conditions, Censor::with_threshold(rules.count_threshold))
            .await?;
        Ok(DiscoveryOutcome::Success(SearchCount { count }))
    }
}

fn queryable_field<'r>(registry: &'r FieldRegistry, id: &str) -> Result<&'r FieldDescriptor, ValidationError> {
    registry
        .field(id)
        .filter(|_| registry.is_queryable(id))
        .ok_or_else(|| ValidationError::UnknownField(id.to_string()))
}

fn request_span(operation: Operation) -> tracing::Span {
    subsystem_span!("discovery_request", subsystem = SUBSYSTEM, operation = operation.as_str())
}

#[async_trait]
impl<S, A> DiscoveryApi for DiscoveryService<S, A>
where
    S: RecordStore + 'static,
    A: AuthorizationService + 'static,
{
    async fn list_queryable_fields(
        &self,
        caller: &Caller,
    ) -> Result<DiscoveryOutcome<SearchFieldsResponse>, DiscoveryError> {
        self.metrics.record_request(Operation::ListFields);
        let result = self
            .list_fields(caller)
            .instrument(request_span(Operation::ListFields))
            .await;
        self.finish(Operation::ListFields, result)
    }

    async fn public_overview(&self, caller: &Caller) -> Result<DiscoveryOutcome<OverviewResponse>, DiscoveryError> {
        self.metrics.record_request(Operation::Overview);
        let result = self
            .overview(caller)
            .instrument(request_span(Operation::Overview))
            .await;
        self.finish(Operation::Overview, result)
    }

    async fn discovery_rules(
        &self,
        caller: &Caller,
        field_ids: Option<&[String]>,
    ) -> Result<DisclosureRules, DiscoveryError> {
        self.metrics.record_request(Operation::Rules);
        let result = self
            .rules(caller, field_ids)
            .instrument(request_span(Operation::Rules))
            .await;
        self.finish(Operation::Rules, result)
            .map(|outcome| outcome.success().unwrap_or(DisclosureRules::NO_PERMISSIONS))
    }

    async fn public_search(
        &self,
        caller: &Caller,
        filters: &[SearchFilter],
    ) -> Result<DiscoveryOutcome<SearchCount>, DiscoveryError> {
        self.metrics.record_request(Operation::Search);
        let result = self
            .search(caller, filters)
            .instrument(request_span(Operation::Search))
            .await;
        self.finish(Operation::Search, result)
    }
}
