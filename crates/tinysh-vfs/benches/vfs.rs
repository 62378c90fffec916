use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tinysh_vfs::{HandleTable, MemoryVfs, resolve};

fn bench_resolve(c: &mut Criterion) {
    c.bench_function("resolve_relative", |b| {
        b.iter(|| resolve(black_box("/home/friends/deep/er"), black_box("../../about/./x")))
    });
}

fn bench_find(c: &mut Criterion) {
    let mut vfs = MemoryVfs::new();
    let mut path = String::new();
    for i in 0..16 {
        path.push_str(&format!("/d{i}"));
        let _ = vfs.make_dir("/", &path);
    }
    let _ = vfs.write_file("/", &format!("{path}/leaf"), "x");
    let target = format!("{path}/leaf");
    c.bench_function("find_depth_16", |b| {
        b.iter(|| vfs.find(black_box("/"), black_box(&target)))
    });
}

fn bench_handles(c: &mut Criterion) {
    let mut vfs = MemoryVfs::new();
    let Ok(node) = vfs.open("/", "f", true) else {
        return;
    };
    c.bench_function("acquire_close_churn", |b| {
        let mut table = HandleTable::new();
        b.iter(|| {
            let hs: Vec<_> = (0..32).map(|_| table.acquire(node)).collect();
            for h in hs {
                table.close(h);
            }
        })
    });
}

criterion_group!(benches, bench_resolve, bench_find, bench_handles);
criterion_main!(benches);
