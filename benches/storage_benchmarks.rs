//! Storage adapter benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kv_persist::storage::{MemoryStore, Storage, StorageKey};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
struct Profile {
    id: u64,
    name: String,
    roles: Vec<String>,
}

fn benchmark_storage(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let storage = Storage::new(MemoryStore::new());
    let profile = Profile {
        id: 42,
        name: "bench user".to_string(),
        roles: vec!["admin".to_string(); 16],
    };

    c.bench_function("set_profile", |b| {
        b.iter(|| {
            runtime
                .block_on(storage.set(StorageKey::UserData, black_box(&profile)))
                .unwrap();
        })
    });

    c.bench_function("get_profile", |b| {
        b.iter(|| {
            let loaded: Option<Profile> = runtime
                .block_on(storage.get(StorageKey::UserData))
                .unwrap();
            black_box(loaded)
        })
    });
}

criterion_group!(benches, benchmark_storage);
criterion_main!(benches);
