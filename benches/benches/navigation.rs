// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Active-index sweeps and typeahead scans over generated option lists.

use std::borrow::Cow;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use thicket_active::{Focus, SliceResolvers, calculate_active_index};
use thicket_combobox::find_match;

type Item = (String, bool);

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}

/// `(label, disabled)` pairs with roughly one in `disabled_every` disabled.
fn gen_items(n: usize, disabled_every: u64) -> Vec<Item> {
    let mut rng = Rng(0x9E37_79B9_7F4A_7C15);
    (0..n)
        .map(|i| {
            let r = rng.next_u64();
            let first = char::from(b'a' + (r % 26) as u8);
            (format!("{first}item {i}"), r % disabled_every == 0)
        })
        .collect()
}

fn bench_navigation(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculate_active_index");
    for &n in &[100_usize, 10_000] {
        let items = gen_items(n, 4);
        group.bench_with_input(BenchmarkId::new("next_sweep", n), &items, |b, items| {
            b.iter(|| {
                let mut active = None;
                loop {
                    let r = SliceResolvers::new(items, active, |i, _: &Item| i, |_, it: &Item| it.1);
                    let next = calculate_active_index(Focus::Next, &r);
                    if next == active {
                        break;
                    }
                    active = next;
                }
                black_box(active)
            });
        });
        group.bench_with_input(BenchmarkId::new("last", n), &items, |b, items| {
            b.iter(|| {
                let r = SliceResolvers::new(items, None, |i, _: &Item| i, |_, it: &Item| it.1);
                black_box(calculate_active_index(Focus::Last, &r))
            });
        });
    }
    group.finish();
}

fn bench_typeahead(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_match");
    for &n in &[100_usize, 10_000] {
        let items = gen_items(n, 4);
        group.bench_with_input(BenchmarkId::new("miss", n), &items, |b, items| {
            b.iter(|| {
                black_box(find_match(
                    items,
                    Some(n / 2),
                    "zzz",
                    |it| Some(Cow::Borrowed(it.0.as_str())),
                    |it| it.1,
                ))
            });
        });
        group.bench_with_input(BenchmarkId::new("prefix", n), &items, |b, items| {
            b.iter(|| {
                black_box(find_match(
                    items,
                    Some(n / 2),
                    "q",
                    |it| Some(Cow::Borrowed(it.0.as_str())),
                    |it| it.1,
                ))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_navigation, bench_typeahead);
criterion_main!(benches);
