use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rsrctmpl::StructTemplate;

const LIQD_DESCRIPTOR: &str = "Hxx I i h xx i 200f f f h h h h+";
const LIQD_NAMES: &str = "kind,flags,height,numNubs,reserved,x`y[100],hotSpotX,hotSpotZ,bBoxTop,bBoxLeft,bBoxBottom,bBoxRight";

fn liqd_template() -> StructTemplate {
    let names: Vec<String> = LIQD_NAMES.split(',').map(|s| s.to_string()).collect();
    StructTemplate::compile(LIQD_DESCRIPTOR, &names).unwrap()
}

fn gen_resource(template: &StructTemplate, records: usize) -> Vec<u8> {
    let len = template.record_length() * records;
    // Deterministic pattern; staying below 0x40 keeps every float finite.
    (0..len).map(|i| (i % 64) as u8).collect()
}

fn bench_compile(c: &mut Criterion) {
    c.bench_function("compile liqd template", |b| {
        b.iter(|| black_box(liqd_template()));
    });
}

fn bench_unpack(c: &mut Criterion) {
    let template = liqd_template();
    let resource = gen_resource(&template, 64);
    c.bench_function("unpack 64 liqd records", |b| {
        b.iter(|| black_box(template.unpack(black_box(&resource)).unwrap()));
    });
}

fn bench_roundtrip(c: &mut Criterion) {
    let template = liqd_template();
    let resource = gen_resource(&template, 8);
    let decoded = template.unpack(&resource).unwrap();
    c.bench_function("pack 8 liqd records", |b| {
        b.iter(|| black_box(template.pack(black_box(&decoded)).unwrap()));
    });
}

criterion_group!(benches, bench_compile, bench_unpack, bench_roundtrip);
criterion_main!(benches);
