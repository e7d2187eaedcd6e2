use criterion::{Criterion, black_box, criterion_group, criterion_main};
use esox_resourcepool::{PoolConfiguration, Resource, ResourcePool};
use std::convert::Infallible;

struct Noop(u64);

impl Resource for Noop {
    type Error = Infallible;

    fn close(self) -> Result<(), Infallible> {
        black_box(self.0);
        Ok(())
    }
}

fn bench_pool(c: &mut Criterion) {
    let config = PoolConfiguration::new(|| Ok::<_, Infallible>(Noop(0)))
        .with_initial_capacity(16)
        .with_max_capacity(16);
    let pool = ResourcePool::new(config).unwrap();

    c.bench_function("acquire_release_idle", |b| {
        b.iter(|| {
            let res = pool.acquire().unwrap();
            pool.release(black_box(res));
        })
    });

    c.bench_function("checkout_guard", |b| {
        b.iter(|| {
            let guard = pool.checkout().unwrap();
            black_box(guard.0);
        })
    });

    let empty = ResourcePool::new(
        PoolConfiguration::new(|| Ok::<_, Infallible>(Noop(1))).with_max_capacity(0),
    )
    .unwrap();

    c.bench_function("acquire_factory_fallback", |b| {
        b.iter(|| {
            let res = empty.acquire().unwrap();
            empty.release(black_box(res));
        })
    });
}

criterion_group!(benches, bench_pool);
criterion_main!(benches);
