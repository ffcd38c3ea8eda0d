use criterion::{black_box, criterion_group, criterion_main, Criterion};
use weewasm_runtime::{box_f64, box_i32, Heap};

fn bench_int_keys(c: &mut Criterion) {
    c.bench_function("set_get_int_keys", |b| {
        b.iter(|| {
            let mut heap = Heap::new();
            let obj = heap.new_object();
            for i in 0..1024 {
                heap.set(obj, box_i32(i), box_i32(i)).unwrap();
            }
            for i in 0..1024 {
                black_box(heap.get(obj, box_i32(i)).unwrap());
            }
        });
    });
}

fn bench_float_keys(c: &mut Criterion) {
    c.bench_function("set_get_float_keys", |b| {
        b.iter(|| {
            let mut heap = Heap::new();
            let obj = heap.new_object();
            for i in 0..1024 {
                heap.set(obj, box_f64(i as f64 * 0.5), box_i32(i)).unwrap();
            }
            for i in 0..1024 {
                black_box(heap.get(obj, box_f64(i as f64 * 0.5)).unwrap());
            }
        });
    });
}

fn bench_ref_keys(c: &mut Criterion) {
    c.bench_function("set_get_ref_keys", |b| {
        b.iter(|| {
            let mut heap = Heap::new();
            let obj = heap.new_object();
            let keys: Vec<_> = (0..256).map(|_| heap.new_object()).collect();
            for (i, k) in keys.iter().enumerate() {
                heap.set(obj, *k, box_i32(i as i32)).unwrap();
            }
            for k in &keys {
                black_box(heap.get(obj, *k).unwrap());
            }
        });
    });
}

criterion_group!(benches, bench_int_keys, bench_float_keys, bench_ref_keys);
criterion_main!(benches);
