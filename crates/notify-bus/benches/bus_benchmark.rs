use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use notify_bus::{BusConfig, BusEventKind, NotificationBus, RawEvent};

fn event_for(i: usize) -> RawEvent {
    let room = format!("{}", 100 + i % 900);
    RawEvent::new("system_alert", "system_monitor", room).with_id(format!("bench-{i}"))
}

fn add_fanout_benchmark(c: &mut Criterion) {
    c.bench_function("add_with_subscribers", |b| {
        b.iter(|| {
            let bus = NotificationBus::with_config(BusConfig { capacity: 1000 });
            for _ in 0..4 {
                bus.on(BusEventKind::Add, |event| {
                    black_box(event.kind());
                });
            }
            for i in 0..900 {
                black_box(bus.add(event_for(i)));
            }
        })
    });
}

fn churn_at_capacity_benchmark(c: &mut Criterion) {
    c.bench_function("churn_at_capacity", |b| {
        b.iter(|| {
            // Capacity far below the key space, so most inserts evict.
            let bus = NotificationBus::with_config(BusConfig { capacity: 50 });
            for i in 0..900 {
                black_box(bus.add(event_for(i)));
            }
            black_box(bus.get_all());
        })
    });
}

criterion_group!(benches, add_fanout_benchmark, churn_at_capacity_benchmark);
criterion_main!(benches);
