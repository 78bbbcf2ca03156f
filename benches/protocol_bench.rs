//! Benchmarks for KeelKV protocol operations

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use keelkv::acl::AclAuthorizer;
use keelkv::protocol::{encode_frame, FrameCodec, KeyValue, Message, MessageType};
use keelkv::{Dispatcher, MemoryStore};

fn codec_benchmarks(c: &mut Criterion) {
    let msg = Message::kv_request(
        MessageType::Put,
        1,
        1,
        KeyValue {
            key: b"bench-key".to_vec(),
            new_version: b"1".to_vec(),
            ..KeyValue::default()
        },
    );
    let value = vec![0xabu8; 4096];

    c.bench_function("encode_frame_4k_value", |b| {
        b.iter(|| encode_frame(black_box(&msg), black_box(Some(&value))).unwrap())
    });

    let frame = encode_frame(&msg, Some(&value)).unwrap();
    c.bench_function("decode_frame_4k_value", |b| {
        b.iter(|| {
            let mut codec = FrameCodec::new();
            codec.feed(black_box(&frame));
            codec.next_frame().unwrap().unwrap()
        })
    });
}

fn dispatch_benchmarks(c: &mut Criterion) {
    let store = Arc::new(MemoryStore::new());
    let authorizer = Arc::new(AclAuthorizer::new().allow_all(1));
    let dispatcher = Dispatcher::new(store, authorizer);

    let value = vec![0xcdu8; 1024];
    let mut seq = 0u64;
    c.bench_function("dispatch_forced_put_1k", |b| {
        b.iter(|| {
            seq += 1;
            let req = Message::kv_request(
                MessageType::Put,
                1,
                seq,
                KeyValue {
                    key: b"bench-key".to_vec(),
                    new_version: b"1".to_vec(),
                    force: true,
                    ..KeyValue::default()
                },
            );
            dispatcher.dispatch(black_box(&req), black_box(Some(&value)))
        })
    });

    let get = Message::kv_request(
        MessageType::Get,
        1,
        1,
        KeyValue {
            key: b"bench-key".to_vec(),
            ..KeyValue::default()
        },
    );
    c.bench_function("dispatch_get_1k", |b| {
        b.iter(|| dispatcher.dispatch(black_box(&get), None))
    });
}

criterion_group!(benches, codec_benchmarks, dispatch_benchmarks);
criterion_main!(benches);
