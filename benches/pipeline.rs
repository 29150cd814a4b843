//! Benchmarks for the dexc pipeline.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{ImageFormat, Rgba, RgbaImage};

use dexc::render::{compose_sheet, Resampling};
use dexc::{ImageLoader, Pokedex, SheetLayout, SpriteIndex};

fn manifest(entries: usize, distinct: usize) -> Pokedex {
    let entries: Vec<String> = (0..entries)
        .map(|i| {
            format!(
                r#"{{"id": {}, "name": "mon-{i}", "sprite": "s{}.png"}}"#,
                i + 1,
                i % distinct
            )
        })
        .collect();
    Pokedex::parse(&format!(
        r#"{{"name": "Bench", "description": "", "thumbnail": "s0.png", "entries": [{}]}}"#,
        entries.join(",")
    ))
    .unwrap()
}

fn write_sprites(dir: &Path, count: usize) {
    for i in 0..count {
        let shade = (i * 7 % 256) as u8;
        let img = RgbaImage::from_pixel(96, 96, Rgba([shade, 64, 255 - shade, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        fs::write(dir.join(format!("s{i}.png")), bytes).unwrap();
    }
}

// -- Index benchmarks --

fn bench_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("index");

    let small = manifest(151, 151);
    let large = manifest(1025, 400);

    group.bench_function("sprite_index_151", |b| {
        b.iter(|| SpriteIndex::from_pokedex(black_box(&small)))
    });

    group.bench_function("sprite_index_1025", |b| {
        b.iter(|| SpriteIndex::from_pokedex(black_box(&large)))
    });

    let layout = SheetLayout::new((64, 64), 64);
    group.bench_function("layout_cells", |b| {
        b.iter(|| {
            (0..1025)
                .map(|i| layout.cell_origin(black_box(i)))
                .fold(0u64, |acc, (x, y)| acc + x as u64 + y as u64)
        })
    });

    group.finish();
}

// -- Composition benchmarks --

fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");
    group.sample_size(20);

    let dir = tempfile::tempdir().unwrap();
    write_sprites(dir.path(), 64);
    let loader = ImageLoader::new(dir.path(), dir.path().join("cache"));
    let pokedex = manifest(128, 64);
    let index = SpriteIndex::from_pokedex(&pokedex);
    let layout = SheetLayout::new((64, 64), 64);

    group.bench_function("sheet_64_nearest", |b| {
        b.iter(|| compose_sheet(black_box(&index), &loader, &layout, Resampling::Nearest).unwrap())
    });

    group.bench_function("sheet_64_bicubic", |b| {
        b.iter(|| compose_sheet(black_box(&index), &loader, &layout, Resampling::Bicubic).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_index, bench_compose);
criterion_main!(benches);
