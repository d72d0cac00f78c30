//! # Discovery Flows
//!
//! End-to-end requests through `DiscoveryService` with the in-memory record
//! store and authorizers that grant, deny, fail or stall.
//!
//! ## Properties Tested
//!
//! 1. **No masked bins**: every returned value is 0 or above the threshold
//! 2. **Idempotence**: identical requests over unchanged data agree
//! 3. **Full data**: censorship becomes a no-op
//! 4. **Fail closed**: authorization errors and timeouts deny
//! 5. **Search**: filters resolve through the individual collection and
//!    results are censored like any other count

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use cd_02_censorship::DisclosureRules;
    use cd_05_permissions::{AuthorizationService, AuthzError, StaticPolicyAuthorizer};
    use cd_06_discovery::{
        DiscoveryApi, DiscoveryError, DiscoveryOutcome, DiscoverySettings, OverviewResponse, SearchCount,
        SearchFilter, ValidationError,
    };
    use proptest::prelude::*;
    use shared_types::{Caller, Permission, ResourceScope};

    use crate::fixtures::{cohort, registry, service, service_with_settings, COHORT_SIZE, THRESHOLD};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Authorizer whose backend is down.
    struct UnavailableAuthz;

    #[async_trait]
    impl AuthorizationService for UnavailableAuthz {
        async fn evaluate(
            &self,
            _caller: &Caller,
            _resources: &[ResourceScope],
            _permissions: &[Permission],
        ) -> Result<Vec<bool>, AuthzError> {
            Err(AuthzError::Unavailable("connection refused".into()))
        }
    }

    /// Authorizer that would grant everything, too late.
    struct StalledAuthz;

    #[async_trait]
    impl AuthorizationService for StalledAuthz {
        async fn evaluate(
            &self,
            _caller: &Caller,
            resources: &[ResourceScope],
            _permissions: &[Permission],
        ) -> Result<Vec<bool>, AuthzError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(vec![true; resources.len()])
        }
    }

    async fn overview_with(threshold: u64, authz: StaticPolicyAuthorizer) -> OverviewResponse {
        service(registry(threshold).unwrap(), cohort(), authz)
            .public_overview(&Caller::anonymous())
            .await
            .unwrap()
            .success()
            .unwrap()
    }

    fn every_value(overview: &OverviewResponse) -> Vec<u64> {
        let bins = overview
            .fields
            .values()
            .filter_map(|f| f.data.as_ref())
            .flatten()
            .map(|b| b.value);
        let totals = [
            overview.counts.individuals,
            overview.counts.biosamples,
            overview.counts.experiments,
        ];
        bins.chain(totals.into_iter().flatten()).collect()
    }

    // =============================================================================
    // CENSORSHIP INVARIANTS
    // =============================================================================

    #[tokio::test]
    async fn test_no_masked_values_for_any_threshold() {
        for threshold in 0..=12 {
            let overview = overview_with(threshold, StaticPolicyAuthorizer::counts_for_everyone()).await;

            assert_eq!(overview.count_threshold, threshold);
            for value in every_value(&overview) {
                assert!(
                    value == 0 || value > threshold,
                    "value {} leaked under threshold {}",
                    value,
                    threshold
                );
            }
        }
    }

    #[tokio::test]
    async fn test_repeated_overviews_agree() {
        let service = service(
            registry(THRESHOLD).unwrap(),
            cohort(),
            StaticPolicyAuthorizer::counts_for_everyone(),
        );
        let caller = Caller::anonymous();

        let first = service.public_overview(&caller).await.unwrap();
        for _ in 0..3 {
            assert_eq!(service.public_overview(&caller).await.unwrap(), first);
        }
    }

    #[tokio::test]
    async fn test_full_data_makes_censorship_a_no_op() {
        let full = overview_with(THRESHOLD, StaticPolicyAuthorizer::data_for_everyone()).await;
        let unthresholded = overview_with(0, StaticPolicyAuthorizer::counts_for_everyone()).await;

        assert_eq!(full.count_threshold, DisclosureRules::FULL_PERMISSIONS.count_threshold);
        assert_eq!(full.max_query_parameters, DisclosureRules::FULL_PERMISSIONS.max_query_parameters);
        assert_eq!(full.fields, unthresholded.fields);
        assert_eq!(full.counts, unthresholded.counts);
        assert_eq!(full.counts.individuals, Some(COHORT_SIZE as u64));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_search_counts_never_masked(threshold in 0u64..20, sex in prop::sample::select(vec!["MALE", "female"])) {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let outcome = runtime.block_on(async {
                service(registry(threshold).unwrap(), cohort(), StaticPolicyAuthorizer::counts_for_everyone())
                    .public_search(&Caller::anonymous(), &[SearchFilter::new("sex", sex)])
                    .await
                    .unwrap()
            });

            let count = outcome.success().unwrap().count;
            prop_assert!(count == 0 || count > threshold);
            // 9 of each sex.
            prop_assert_eq!(count, if threshold < 9 { 9 } else { 0 });
        }
    }

    // =============================================================================
    // FAIL CLOSED
    // =============================================================================

    #[tokio::test]
    async fn test_unavailable_authorization_denies() {
        let service = service(registry(THRESHOLD).unwrap(), cohort(), UnavailableAuthz);
        let caller = Caller::anonymous();

        assert_eq!(service.public_overview(&caller).await.unwrap(), DiscoveryOutcome::Forbidden);
        assert_eq!(
            service.discovery_rules(&caller, None).await.unwrap(),
            DisclosureRules::NO_PERMISSIONS
        );

        let listing = service.list_queryable_fields(&caller).await.unwrap().success().unwrap();
        assert!(listing.field_ids().is_empty());

        let metrics = service.metrics();
        assert!(metrics.authorization_failures >= 2);
        assert_eq!(metrics.forbidden, 1);
    }

    #[tokio::test]
    async fn test_stalled_authorization_times_out_closed() {
        let settings = DiscoverySettings::default().with_authz_timeout(Duration::from_millis(20));
        let service = service_with_settings(registry(THRESHOLD).unwrap(), cohort(), StalledAuthz, &settings);

        let outcome = service
            .public_search(&Caller::anonymous(), &[SearchFilter::new("sex", "MALE")])
            .await
            .unwrap();

        assert_eq!(outcome, DiscoveryOutcome::Forbidden);
        assert!(service.metrics().authorization_failures >= 1);
    }

    // =============================================================================
    // SEARCH
    // =============================================================================

    #[tokio::test]
    async fn test_search_through_nested_experiments() {
        let service = service(
            registry(THRESHOLD).unwrap(),
            cohort(),
            StaticPolicyAuthorizer::data_for_everyone(),
        );
        let caller = Caller::anonymous();

        let wgs = service
            .public_search(&caller, &[SearchFilter::new("experiment_type", "WGS")])
            .await
            .unwrap();
        assert_eq!(wgs, DiscoveryOutcome::Success(SearchCount { count: 8 }));

        // Individuals 0..=7 have WGS; the even ones are MALE.
        let male_wgs = service
            .public_search(
                &caller,
                &[
                    SearchFilter::new("experiment_type", "wgs"),
                    SearchFilter::new("sex", "MALE"),
                ],
            )
            .await
            .unwrap();
        assert_eq!(male_wgs, DiscoveryOutcome::Success(SearchCount { count: 4 }));
    }

    #[tokio::test]
    async fn test_search_censors_small_results() {
        let service = service(
            registry(THRESHOLD).unwrap(),
            cohort(),
            StaticPolicyAuthorizer::counts_for_everyone(),
        );

        // Three individuals consented in January.
        let january = service
            .public_search(
                &Caller::anonymous(),
                &[SearchFilter::new("date_of_consent", "Jan 2021")],
            )
            .await
            .unwrap();
        assert_eq!(january, DiscoveryOutcome::Success(SearchCount { count: 0 }));

        let april = service
            .public_search(
                &Caller::anonymous(),
                &[SearchFilter::new("date_of_consent", "Apr 2021")],
            )
            .await
            .unwrap();
        assert_eq!(april, DiscoveryOutcome::Success(SearchCount { count: 9 }));
    }

    #[tokio::test]
    async fn test_search_validation() {
        let service = service(
            registry(THRESHOLD).unwrap(),
            cohort(),
            StaticPolicyAuthorizer::counts_for_everyone(),
        );
        let caller = Caller::anonymous();

        // `tier` is charted but not searchable.
        let err = service
            .public_search(&caller, &[SearchFilter::new("tier", "A")])
            .await
            .unwrap_err();
        assert!(matches!(err, DiscoveryError::Validation(ValidationError::UnknownField(_))));

        let err = service
            .public_search(&caller, &[SearchFilter::new("date_of_consent", "2021-01")])
            .await
            .unwrap_err();
        assert!(matches!(err, DiscoveryError::Validation(ValidationError::InvalidValue(_))));

        let err = service
            .public_search(
                &caller,
                &[
                    SearchFilter::new("sex", "MALE"),
                    SearchFilter::new("age", "< 20"),
                    SearchFilter::new("diagnosis", "B"),
                ],
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DiscoveryError::Validation(ValidationError::TooManyParameters { count: 3, max: 2 })
        ));
    }

    #[tokio::test]
    async fn test_full_data_lifts_parameter_limit() {
        let service = service(
            registry(THRESHOLD).unwrap(),
            cohort(),
            StaticPolicyAuthorizer::data_for_everyone(),
        );

        // Individuals 0 and 2: MALE, under 20, diagnosis A.
        let outcome = service
            .public_search(
                &Caller::anonymous(),
                &[
                    SearchFilter::new("sex", "MALE"),
                    SearchFilter::new("age", "< 20"),
                    SearchFilter::new("diagnosis", "a"),
                ],
            )
            .await
            .unwrap();
        assert_eq!(outcome, DiscoveryOutcome::Success(SearchCount { count: 2 }));
    }
}
