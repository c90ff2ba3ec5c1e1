//! Slotpool registry benchmark.
//!
//! Measures insert, forward (id) lookup, reverse (name) lookup, recycle
//! churn, and memory footprint for the pooled dual-key registry at realistic
//! low and high scales.
//!
//! Scenarios benchmarked:
//!   1. Admin<u64> keyed by id only        — insert / lookup / churn
//!   2. Admin<u64> keyed by name only      — insert / lookup
//!   3. Admin<u64> dual-keyed (id + name)  — insert / both lookups / churn

use std::alloc::{GlobalAlloc, Layout, System};
use std::hint::black_box;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use slotpool_core::Admin;

// ============================================================================
// Tracking allocator
// ============================================================================

struct TrackingAllocator;

static ALLOCATED: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static ALLOC: TrackingAllocator = TrackingAllocator;

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            ALLOCATED.fetch_add(layout.size(), Ordering::Relaxed);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        ALLOCATED.fetch_sub(layout.size(), Ordering::Relaxed);
        unsafe { System.dealloc(ptr, layout) };
    }
}

fn current_allocated() -> usize {
    ALLOCATED.load(Ordering::Relaxed)
}

// ============================================================================
// Data generation
// ============================================================================

/// Distinct id keys with a scattered (non-sequential) distribution.
fn generate_ids(count: usize, seed: u64) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count)
        .map(|i| (i as u64) << 20 | rng.gen_range(0u64..1 << 20))
        .collect()
}

/// Registry-style names: a mix of short well-known labels and generated ones.
fn generate_names(count: usize, seed: u64) -> Vec<String> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let stems = [
        "unit", "item", "spell", "region", "faction", "vendor", "quest",
        "spawn", "effect", "craft",
    ];
    (0..count)
        .map(|i| {
            let stem = stems[rng.gen_range(0..stems.len())];
            format!("{stem}_{i}_{}", rng.gen_range(0u32..100_000))
        })
        .collect()
}

/// Id probes: 50% hits, 50% misses.
fn build_id_lookups(source: &[u64], count: usize, seed: u64) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            if rng.gen_bool(0.5) && !source.is_empty() {
                source[rng.gen_range(0..source.len())]
            } else {
                rng.gen::<u64>() | 1 << 63 // above the generated id range
            }
        })
        .collect()
}

/// Name probes: 50% hits, 50% misses.
fn build_name_lookups(source: &[String], count: usize, seed: u64) -> Vec<String> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            if rng.gen_bool(0.5) && !source.is_empty() {
                source[rng.gen_range(0..source.len())].clone()
            } else {
                format!("miss_{}", rng.gen_range(0u64..10_000_000))
            }
        })
        .collect()
}

// ============================================================================
// Benchmark result
// ============================================================================

struct BenchResult {
    label: &'static str,
    scale: usize,
    lookup_count: usize,
    insert_ms: f64,
    id_lookup_ms: Option<f64>,
    name_lookup_ms: Option<f64>,
    churn_ms: Option<f64>,
    mem_bytes: usize,
    live_count: usize,
}

fn format_count(n: usize) -> String {
    if n >= 1_000_000 {
        let m = n as f64 / 1_000_000.0;
        if m == m.floor() {
            format!("{:.0}M", m)
        } else {
            format!("{:.1}M", m)
        }
    } else if n >= 1_000 {
        let k = n as f64 / 1_000.0;
        if k == k.floor() {
            format!("{:.0}K", k)
        } else {
            format!("{:.1}K", k)
        }
    } else {
        format!("{n}")
    }
}

fn format_opt_ms(v: Option<f64>) -> String {
    match v {
        Some(ms) => format!("{ms:>8.1}ms"),
        None => format!("{:>10}", "--"),
    }
}

fn print_detail(r: &BenchResult) {
    let mem_mb = r.mem_bytes as f64 / 1_048_576.0;
    let bytes_per_entry = if r.live_count > 0 {
        r.mem_bytes / r.live_count
    } else {
        0
    };

    println!("\n--- {} ({} entries) ---", r.label, format_count(r.scale));
    println!(
        "  Inserts:     {} calls -> {} live objects",
        format_count(r.scale),
        format_count(r.live_count)
    );
    println!("  Insert:      {:>10.2} ms", r.insert_ms);
    if let Some(ms) = r.id_lookup_ms {
        println!(
            "  Id lookup:   {:>10.2} ms  ({} lookups)",
            ms,
            format_count(r.lookup_count)
        );
    }
    if let Some(ms) = r.name_lookup_ms {
        println!(
            "  Name lookup: {:>10.2} ms  ({} lookups)",
            ms,
            format_count(r.lookup_count)
        );
    }
    if let Some(ms) = r.churn_ms {
        println!(
            "  Churn:       {:>10.2} ms  ({} remove+insert cycles)",
            ms,
            format_count(r.scale.min(CHURN_CYCLES))
        );
    }
    println!(
        "  Memory:      {:>10.2} MB  ({} bytes/object)",
        mem_mb, bytes_per_entry
    );
}

// ============================================================================
// Benchmark functions
// ============================================================================

const CHURN_CYCLES: usize = 100_000;

fn bench_by_id(n: usize) -> BenchResult {
    let ids = generate_ids(n, 42);
    let lookup_count = n.clamp(10_000, 500_000);
    let lookup_ids = build_id_lookups(&ids, lookup_count, 99);

    let baseline = current_allocated();

    let start = Instant::now();
    let mut admin: Admin<u64> = Admin::with_capacity(n);
    for &id in &ids {
        if let Ok(payload) = admin.insert_by_id(id) {
            *payload = id ^ 0x5a5a;
        }
    }
    let insert_ms = start.elapsed().as_secs_f64() * 1000.0;
    let mem_bytes = current_allocated().saturating_sub(baseline);
    let live_count = admin.len();

    let start = Instant::now();
    for &id in &lookup_ids {
        black_box(admin.get_by_id(id));
    }
    let id_lookup_ms = start.elapsed().as_secs_f64() * 1000.0;

    // remove + reinsert cycles exercise free-list recycling
    let cycles = n.min(CHURN_CYCLES);
    let start = Instant::now();
    for &id in ids.iter().take(cycles) {
        let _ = admin.remove_by_id(id);
        let _ = admin.insert_by_id(id);
    }
    let churn_ms = start.elapsed().as_secs_f64() * 1000.0;

    black_box(&admin);

    BenchResult {
        label: "Admin<u64> by id",
        scale: n,
        lookup_count,
        insert_ms,
        id_lookup_ms: Some(id_lookup_ms),
        name_lookup_ms: None,
        churn_ms: Some(churn_ms),
        mem_bytes,
        live_count,
    }
}

fn bench_by_name(n: usize) -> BenchResult {
    let names = generate_names(n, 42);
    let lookup_count = n.clamp(10_000, 500_000);
    let lookup_names = build_name_lookups(&names, lookup_count, 99);

    let baseline = current_allocated();

    let start = Instant::now();
    let mut admin: Admin<u64> = Admin::with_capacity(n);
    for (i, name) in names.iter().enumerate() {
        if let Ok(payload) = admin.insert_by_name(name) {
            *payload = i as u64;
        }
    }
    let insert_ms = start.elapsed().as_secs_f64() * 1000.0;
    let mem_bytes = current_allocated().saturating_sub(baseline);
    let live_count = admin.len();

    let start = Instant::now();
    for name in &lookup_names {
        black_box(admin.get_by_name(name));
    }
    let name_lookup_ms = start.elapsed().as_secs_f64() * 1000.0;

    black_box(&admin);

    BenchResult {
        label: "Admin<u64> by name",
        scale: n,
        lookup_count,
        insert_ms,
        id_lookup_ms: None,
        name_lookup_ms: Some(name_lookup_ms),
        churn_ms: None,
        mem_bytes,
        live_count,
    }
}

fn bench_dual(n: usize) -> BenchResult {
    let ids = generate_ids(n, 42);
    let names = generate_names(n, 43);
    let lookup_count = n.clamp(10_000, 500_000);
    let lookup_ids = build_id_lookups(&ids, lookup_count, 99);
    let lookup_names = build_name_lookups(&names, lookup_count, 100);

    let baseline = current_allocated();

    let start = Instant::now();
    let mut admin: Admin<u64> = Admin::with_capacity(n);
    let mut inserted: Vec<usize> = Vec::with_capacity(n);
    for (i, (&id, name)) in ids.iter().zip(names.iter()).enumerate() {
        if let Ok(payload) = admin.insert(id, name) {
            *payload = i as u64;
            inserted.push(i);
        }
    }
    let insert_ms = start.elapsed().as_secs_f64() * 1000.0;
    let mem_bytes = current_allocated().saturating_sub(baseline);
    let live_count = admin.len();

    let start = Instant::now();
    for &id in &lookup_ids {
        black_box(admin.get_by_id(id));
    }
    let id_lookup_ms = start.elapsed().as_secs_f64() * 1000.0;

    let start = Instant::now();
    for name in &lookup_names {
        black_box(admin.get_by_name(name));
    }
    let name_lookup_ms = start.elapsed().as_secs_f64() * 1000.0;

    // dual-keyed churn goes through the combined remove
    let cycles = inserted.len().min(CHURN_CYCLES);
    let start = Instant::now();
    for &i in inserted.iter().take(cycles) {
        let _ = admin.remove(ids[i], &names[i]);
        let _ = admin.insert(ids[i], &names[i]);
    }
    let churn_ms = start.elapsed().as_secs_f64() * 1000.0;

    black_box(&admin);

    BenchResult {
        label: "Admin<u64> dual-keyed",
        scale: n,
        lookup_count,
        insert_ms,
        id_lookup_ms: Some(id_lookup_ms),
        name_lookup_ms: Some(name_lookup_ms),
        churn_ms: Some(churn_ms),
        mem_bytes,
        live_count,
    }
}

// ============================================================================
// Summary
// ============================================================================

fn print_summary(results: &[BenchResult]) {
    println!("\n{}", "=".repeat(96));
    println!("  SLOTPOOL SUMMARY");
    println!("{}", "=".repeat(96));
    println!(
        "  {:<24} {:>6} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "Scenario", "Scale", "Insert", "Id Lk", "Name Lk", "Churn", "Memory"
    );
    println!("  {}", "-".repeat(88));

    for r in results {
        let mem_mb = r.mem_bytes as f64 / 1_048_576.0;
        println!(
            "  {:<24} {:>6} {:>8.1}ms {} {} {} {:>8.1}MB",
            r.label,
            format_count(r.scale),
            r.insert_ms,
            format_opt_ms(r.id_lookup_ms),
            format_opt_ms(r.name_lookup_ms),
            format_opt_ms(r.churn_ms),
            mem_mb,
        );
    }

    println!("  {}", "-".repeat(88));
    println!();
}

// ============================================================================
// Main
// ============================================================================

fn main() {
    println!("Slotpool Registry Benchmark");
    println!("===========================");
    println!();

    let mut all_results: Vec<BenchResult> = Vec::new();

    // --- Warmup (exercises allocator paths, populates CPU caches) ---
    println!("Warming up...");
    let _ = bench_by_id(10_000);
    let _ = bench_dual(1_000);
    println!("Warmup complete.");

    for &n in &[100_000, 1_000_000] {
        let r = bench_by_id(n);
        print_detail(&r);
        all_results.push(r);
    }

    for &n in &[100_000, 1_000_000] {
        let r = bench_by_name(n);
        print_detail(&r);
        all_results.push(r);
    }

    for &n in &[100_000, 1_000_000] {
        let r = bench_dual(n);
        print_detail(&r);
        all_results.push(r);
    }

    print_summary(&all_results);

    println!("Done.");
}
