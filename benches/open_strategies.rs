use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use model_allocation::{
    Allocation, AllocationConfig, CopiedAllocation, LogReporter, MappedAllocation, Strategy,
};
use std::hint::black_box;
use tempfile::tempdir;

/// 测试参数
const SIZES: [usize; 3] = [64 * 1024, 4 * 1024 * 1024, 64 * 1024 * 1024];

/// 比较映射与拷贝两种策略的构造并完整读取一遍的开销
fn bench_open(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let mut group = c.benchmark_group("open_and_scan");
    group.sample_size(20);

    for size in SIZES {
        let path = dir.path().join(format!("model_{size}.bin"));
        std::fs::write(&path, vec![0x5A; size]).unwrap();

        group.bench_with_input(BenchmarkId::new("mapped", size), &path, |b, path| {
            b.iter(|| {
                let allocation = MappedAllocation::open(path, &LogReporter);
                let sum: u64 = allocation.as_slice().unwrap().iter().map(|&x| x as u64).sum();
                black_box(sum)
            })
        });

        group.bench_with_input(BenchmarkId::new("copied", size), &path, |b, path| {
            b.iter(|| {
                let allocation = CopiedAllocation::open(path, &LogReporter);
                let sum: u64 = allocation.as_slice().unwrap().iter().map(|&x| x as u64).sum();
                black_box(sum)
            })
        });

        let populate = AllocationConfig::new().strategy(Strategy::Mapped).populate(true);
        group.bench_with_input(BenchmarkId::new("mapped_populate", size), &path, |b, path| {
            b.iter(|| {
                let allocation = MappedAllocation::open_with_config(path, &populate, &LogReporter);
                black_box(allocation.bytes())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_open);
criterion_main!(benches);
