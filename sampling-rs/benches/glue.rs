use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sampling_rs::interpolate::InterpKind;
use sampling_rs::kernel::KernelLifecycle;
use sampling_rs::signal::glue::{GlueConfig, GlueKernel};
use sampling_rs::signal::traits::Glue1D;

fn glue_orders(c: &mut Criterion) {
    let left: Vec<f64> = (0..10_000).map(|i| (i as f64 * 0.01).sin()).collect();
    let right: Vec<f64> = (0..10_000).map(|i| (i as f64 * 0.01).cos()).collect();

    for gap in [-50isize, 50] {
        for order in InterpKind::ALL {
            let kernel = GlueKernel::try_new(GlueConfig::new(gap, order))
                .expect("valid glue kernel config");
            let mut out = vec![0.0; kernel.output_len(left.len(), right.len())];
            c.bench_function(&format!("glue_{order}_gap{gap}"), |b| {
                b.iter(|| {
                    kernel
                        .run_into(&left, &right, &mut out)
                        .expect("benchmark input should satisfy glue preconditions");
                    black_box(&out);
                });
            });
        }
    }
}

criterion_group!(benches, glue_orders);
criterion_main!(benches);
