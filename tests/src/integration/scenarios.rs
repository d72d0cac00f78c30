//! # Discovery Scenarios
//!
//! Worked examples that pin down binning, censorship, permission composition
//! and monthly gap-filling across the subsystems that implement them:
//!
//! - **A**: auto binning with tapers
//! - **B**: custom boundaries without a maximum
//! - **C**: threshold censorship of derived and declared labels
//! - **D**: conjunctive permission composition across data types
//! - **E**: month histograms with empty months filled in

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use cd_01_binning::{BinSpec, NumericBinning};
    use cd_02_censorship::{DisclosureRules, DisclosureTier};
    use cd_05_permissions::{PermissionApi, PermissionComposer, StaticPolicyAuthorizer, Subject};
    use cd_06_discovery::{DiscoveryApi, OverviewResponse};
    use serde_json::json;
    use shared_types::{Bin, Caller, DataType, DataTypePermission, DiscoveryScope, Permission, ResourceScope};

    use crate::fixtures::{cohort, registry, service, THRESHOLD};

    fn binning(config: serde_json::Value) -> Vec<BinSpec> {
        serde_json::from_value::<NumericBinning>(config).unwrap().bins().unwrap()
    }

    fn spec(floor: Option<i64>, ceil: Option<i64>, label: &str) -> (Option<i64>, Option<i64>, String) {
        (floor, ceil, label.to_string())
    }

    fn triple(bin: &BinSpec) -> (Option<i64>, Option<i64>, String) {
        (bin.floor, bin.ceil, bin.label.clone())
    }

    fn bins(overview: &OverviewResponse, field: &str) -> Vec<Bin> {
        overview.fields[field].data.clone().unwrap()
    }

    fn bin(label: &str, value: u64) -> Bin {
        Bin::new(label, value)
    }

    async fn counts_overview() -> OverviewResponse {
        let service = service(
            registry(THRESHOLD).unwrap(),
            cohort(),
            StaticPolicyAuthorizer::counts_for_everyone(),
        );
        service
            .public_overview(&Caller::anonymous())
            .await
            .unwrap()
            .success()
            .unwrap()
    }

    // =============================================================================
    // SCENARIO A: AUTO BINNING
    // =============================================================================

    #[test]
    fn test_scenario_a_auto_binning() {
        let bins = binning(json!({
            "minimum": 0, "maximum": 1000,
            "taper_left": 50, "taper_right": 800, "bin_size": 50
        }));

        assert_eq!(bins.len(), 17);
        assert_eq!(triple(&bins[0]), spec(Some(0), Some(50), "< 50"));
        assert_eq!(triple(&bins[1]), spec(Some(50), Some(100), "[50, 100)"));
        assert_eq!(triple(&bins[16]), spec(Some(800), Some(1000), "≥ 800"));

        for pair in bins.windows(2) {
            assert_eq!(pair[0].ceil, pair[1].floor);
        }
    }

    // =============================================================================
    // SCENARIO B: CUSTOM BINNING
    // =============================================================================

    #[test]
    fn test_scenario_b_custom_binning() {
        let bins = binning(json!({"minimum": 0, "bins": [200, 300, 500, 1000, 1500, 2000]}));

        assert_eq!(bins.len(), 7);
        assert_eq!(triple(&bins[0]), spec(Some(0), Some(200), "< 200"));
        assert_eq!(triple(&bins[6]), spec(Some(2000), None, "≥ 2000"));

        for pair in bins.windows(2) {
            assert_eq!(pair[0].ceil, pair[1].floor);
        }
    }

    // =============================================================================
    // SCENARIO C: THRESHOLD CENSORSHIP
    // =============================================================================

    #[tokio::test]
    async fn test_scenario_c_derived_labels_are_dropped() {
        let overview = counts_overview().await;

        // A (3) and C (5) are at or below the threshold of 5.
        assert_eq!(bins(&overview, "diagnosis"), vec![bin("B", 10)]);
    }

    #[tokio::test]
    async fn test_scenario_c_declared_labels_report_zero() {
        let overview = counts_overview().await;

        assert_eq!(
            bins(&overview, "tier"),
            vec![bin("A", 0), bin("B", 10), bin("C", 0)]
        );
    }

    #[tokio::test]
    async fn test_scenario_c_full_data_sees_small_cells() {
        let service = service(
            registry(THRESHOLD).unwrap(),
            cohort(),
            StaticPolicyAuthorizer::data_for_everyone(),
        );
        let overview = service
            .public_overview(&Caller::anonymous())
            .await
            .unwrap()
            .success()
            .unwrap();

        assert_eq!(
            bins(&overview, "diagnosis"),
            vec![bin("A", 3), bin("B", 10), bin("C", 5)]
        );
    }

    // =============================================================================
    // SCENARIO D: PERMISSION COMPOSITION
    // =============================================================================

    fn clinician_authz() -> StaticPolicyAuthorizer {
        StaticPolicyAuthorizer::new()
            .with_grant(
                Subject::Principal("clinician".into()),
                ResourceScope::Project { project: "p1".into() },
                [Permission::QueryProjectLevelCounts],
            )
            .with_grant(
                Subject::Principal("clinician".into()),
                ResourceScope::DataType {
                    project: "p1".into(),
                    dataset: None,
                    data_type: DataType::Phenopacket,
                },
                [Permission::QueryData],
            )
    }

    fn clinician() -> Caller {
        Caller::with_principal("clinician").in_scope(DiscoveryScope::project("p1"))
    }

    #[tokio::test]
    async fn test_scenario_d_permissions_per_data_type() {
        let composer = PermissionComposer::new(Arc::new(clinician_authz()));
        let implicated: BTreeSet<DataType> = DataType::ALL.into_iter().collect();

        let permissions = composer.resolve(&clinician(), &implicated).await;

        assert_eq!(permissions.get(DataType::Phenopacket), DataTypePermission::FULL);
        assert_eq!(permissions.get(DataType::Experiment), DataTypePermission::COUNTS);
        assert_eq!(permissions.tier(&implicated), DisclosureTier::ConfiguredPartial);
    }

    #[tokio::test]
    async fn test_scenario_d_least_privileged_type_gates_rules() {
        let service = service(registry(THRESHOLD).unwrap(), cohort(), clinician_authz());
        let configured = DisclosureRules::new(2, THRESHOLD);

        let mixed = vec!["sex".to_string(), "experiment_type".to_string()];
        assert_eq!(
            service.discovery_rules(&clinician(), Some(&mixed)).await.unwrap(),
            configured
        );

        let clinical = vec!["sex".to_string(), "diagnosis".to_string()];
        assert_eq!(
            service.discovery_rules(&clinician(), Some(&clinical)).await.unwrap(),
            DisclosureRules::FULL_PERMISSIONS
        );

        // Outside p1 the clinician holds nothing.
        let elsewhere = Caller::with_principal("clinician").in_scope(DiscoveryScope::project("p2"));
        assert_eq!(
            service.discovery_rules(&elsewhere, Some(&clinical)).await.unwrap(),
            DisclosureRules::NO_PERMISSIONS
        );
    }

    // =============================================================================
    // SCENARIO E: MONTHLY GAP-FILL
    // =============================================================================

    #[tokio::test]
    async fn test_scenario_e_monthly_gap_fill() {
        let overview = counts_overview().await;

        assert_eq!(
            bins(&overview, "date_of_consent"),
            vec![
                bin("Jan 2021", 0),
                bin("Feb 2021", 0),
                bin("Mar 2021", 0),
                bin("Apr 2021", 9),
                bin("missing", 6),
            ]
        );
    }

    #[tokio::test]
    async fn test_scenario_e_month_options() {
        let service = service(
            registry(THRESHOLD).unwrap(),
            cohort(),
            StaticPolicyAuthorizer::counts_for_everyone(),
        );
        let listing = service
            .list_queryable_fields(&Caller::anonymous())
            .await
            .unwrap()
            .success()
            .unwrap();

        let consent = listing.sections[0]
            .fields
            .iter()
            .find(|f| f.field.id == "date_of_consent")
            .unwrap();
        assert_eq!(consent.options, vec!["Jan 2021", "Feb 2021", "Mar 2021", "Apr 2021"]);
    }
}
