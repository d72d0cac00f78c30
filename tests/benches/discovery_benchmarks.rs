//! # Cohort Discovery Benchmarks
//!
//! | Area | Measured |
//! |------|----------|
//! | cd-01 Binning | bin generation for a tapered auto layout |
//! | cd-06 Discovery | public overview over growing in-memory cohorts |

use cd_01_binning::{AutoBinning, NumericBinning};
use cd_05_permissions::StaticPolicyAuthorizer;
use cd_06_discovery::DiscoveryApi;
use cd_tests::fixtures::{large_cohort, registry, service, COHORT_SIZE, THRESHOLD};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shared_types::Caller;

// ============================================================================
// CD-01: Bin generation
// ============================================================================

fn bench_auto_binning(c: &mut Criterion) {
    let binning = NumericBinning::Auto(AutoBinning {
        minimum: 0,
        maximum: 100_000,
        taper_left: 50,
        taper_right: 99_950,
        bin_size: 50,
    });

    c.bench_function("cd-01-auto-binning-2000", |b| b.iter(|| black_box(binning.bins())));
}

// ============================================================================
// CD-06: Public overview
// ============================================================================

fn bench_public_overview(c: &mut Criterion) {
    let Ok(runtime) = tokio::runtime::Runtime::new() else {
        return;
    };
    let mut group = c.benchmark_group("cd-06-public-overview");

    for copies in [1, 10, 100] {
        let Ok(registry) = registry(THRESHOLD) else {
            return;
        };
        let service = service(registry, large_cohort(copies), StaticPolicyAuthorizer::counts_for_everyone());
        let caller = Caller::anonymous();

        group.throughput(Throughput::Elements((copies * COHORT_SIZE) as u64));
        group.bench_with_input(BenchmarkId::new("individuals", copies * COHORT_SIZE), &copies, |b, _| {
            b.iter(|| runtime.block_on(async { black_box(service.public_overview(&caller).await.is_ok()) }))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_auto_binning, bench_public_overview);
criterion_main!(benches);
