use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use rigcheck_catalog::{Category, Product};
use rigcheck_compat::{Evaluator, Selection};
use rigcheck_discovery::{FilterCriteria, Pipeline, SortOrder, build_facets, facets_for};
use serde_json::json;

const SOCKETS: [&str; 3] = ["AM5", "AM4", "LGA1700"];
const RAM_TYPES: [&str; 2] = ["DDR4", "DDR5"];

fn synthetic_boards(n: usize) -> Vec<Product> {
    (0..n)
        .map(|i| {
            let specs = json!({
                "metadata": {"name": format!("Board {i}"), "manufacturer": ["ASUS", "MSI", "Gigabyte"][i % 3]},
                "socket": SOCKETS[i % SOCKETS.len()],
                "form_factor": ["ATX", "Micro-ATX", "Mini-ITX"][i % 3],
                "chipset": format!("X{}", 600 + i % 7),
                "memory": {"ram_type": RAM_TYPES[i % 2], "max_capacity_gb": 64 + (i % 3) * 64, "slots": 2 + (i % 2) * 2},
            });
            let product = Product::new(format!("mb-{i}"), Category::Motherboard, specs);
            if i % 5 == 0 {
                product
            } else {
                product.with_price("Ekua", 89.0 + (i % 40) as f64 * 7.5)
            }
        })
        .collect()
}

fn fixture_build() -> Vec<Product> {
    vec![
        Product::new("cpu", Category::Cpu, json!({"socket": "AM5", "tdp": 105})),
        Product::new("ram", Category::Ram, json!({"ram_type": "DDR5", "capacity": 64, "modules": {"quantity": 2}})),
        Product::new("case", Category::PcCase, json!({"form_factor": "ATX, Micro-ATX"})),
        Product::new("psu", Category::Psu, json!({"wattage": 750})),
    ]
}

fn bench_pipeline_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_run");
    let evaluator = Evaluator::default();
    let pipeline = Pipeline::new(&evaluator);
    let parts = fixture_build();
    let build: Selection<'_> = parts.iter().map(|p| (p.category, p)).collect();

    for size in [100usize, 300, 600] {
        let products = synthetic_boards(size);
        group.throughput(Throughput::Elements(size as u64));

        // Benchmark: compatibility-only filtering (one evaluation per candidate)
        group.bench_with_input(BenchmarkId::new("compatible_only", size), &products, |b, products| {
            let criteria = FilterCriteria::default().compatible_only(true).sorted(SortOrder::PriceAsc);
            b.iter(|| pipeline.run(black_box(products), &criteria, &build, Category::Motherboard));
        });

        // Benchmark: search + facet filtering without compatibility
        group.bench_with_input(BenchmarkId::new("search_and_facets", size), &products, |b, products| {
            let criteria = FilterCriteria::default().with_query("board 1").check("socket", "am5");
            b.iter(|| pipeline.run(black_box(products), &criteria, &build, Category::Motherboard));
        });
    }

    group.finish();
}

fn bench_facet_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("facet_index");
    let products = synthetic_boards(600);

    group.bench_function("motherboards_600", |b| {
        b.iter(|| build_facets(black_box(&products), facets_for(Category::Motherboard)));
    });

    group.finish();
}

criterion_group!(benches, bench_pipeline_run, bench_facet_index);
criterion_main!(benches);
