//! # Slasher Benchmarks
//!
//! | Operation | Target |
//! |-----------|--------|
//! | Indexing a full committee | < 50μs |
//! | Canonical validation (2048 indices) | < 50μs |
//! | Signing root | < 10μs |
//! | Aggregate verify (128 signers) | < 5ms |
//! | Full pipeline, in-memory collaborators | < 10ms |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use qc_18_slasher::{
    attesting_indices, validate_attesting_indices, AggregationBitfield,
    IndexedAttestationVerifier, InMemoryAttestationStore, InMemorySlashingDetector,
    OperationContext, SlasherApi, SlasherConfig, SlasherService, MAX_VALIDATORS_PER_COMMITTEE,
};
use qc_tests::fixtures::{
    attestation_data, fork_for, fork_schedule, keystore, public_key, signed_attestation,
    GENESIS_VALIDATORS_ROOT,
};
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

fn bench_indexing(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18-slasher/indexing");

    let committee: Vec<u64> = (0..MAX_VALIDATORS_PER_COMMITTEE as u64).collect();
    let mut rng = rand::thread_rng();
    let positions: Vec<usize> = (0..committee.len())
        .filter(|_| rng.gen_bool(0.7))
        .collect();
    let bits = AggregationBitfield::from_positions(committee.len(), &positions);

    group.throughput(Throughput::Elements(committee.len() as u64));
    group.bench_function("attesting_indices_full_committee", |b| {
        b.iter(|| black_box(attesting_indices(&bits, &committee)))
    });

    let canonical = attesting_indices(&bits, &committee);
    group.bench_function("validate_attesting_indices", |b| {
        b.iter(|| black_box(validate_attesting_indices(&canonical, MAX_VALIDATORS_PER_COMMITTEE)))
    });

    group.finish();
}

fn bench_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18-slasher/verification");
    group.measurement_time(Duration::from_secs(10));

    let verifier = IndexedAttestationVerifier::default();
    let data = attestation_data(2, 3, 0xaa);
    let fork = fork_for(3);

    group.bench_function("signing_root", |b| {
        b.iter(|| black_box(verifier.signing_root(&data, &fork, &GENESIS_VALIDATORS_ROOT)))
    });

    for size in [1u64, 16, 128] {
        let indices: Vec<u64> = (0..size).collect();
        let attestation = signed_attestation(indices.clone(), data.clone());
        let keys: HashMap<_, _> = indices.iter().map(|&i| (i, public_key(i))).collect();

        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::new("verify", size), &size, |b, _| {
            b.iter(|| {
                black_box(verifier.verify(&attestation, &fork, &GENESIS_VALIDATORS_ROOT, &keys))
            })
        });
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18-slasher/pipeline");
    group.measurement_time(Duration::from_secs(10));

    let runtime = tokio::runtime::Runtime::new().expect("runtime");
    let service = SlasherService::new(
        SlasherConfig::default(),
        Arc::new(fork_schedule()),
        Arc::new(keystore(128)),
        Arc::new(InMemoryAttestationStore::new()),
        Arc::new(InMemorySlashingDetector::new()),
    );
    let attestation = signed_attestation((0..128).collect(), attestation_data(2, 3, 0xaa));

    group.bench_function("submit_indexed_attestation_128", |b| {
        b.iter(|| {
            runtime.block_on(async {
                black_box(
                    service
                        .submit_indexed_attestation(&OperationContext::new(), attestation.clone())
                        .await,
                )
            })
        })
    });

    group.finish();
}

criterion_group!(benches, bench_indexing, bench_verification, bench_pipeline);

criterion_main!(benches);
