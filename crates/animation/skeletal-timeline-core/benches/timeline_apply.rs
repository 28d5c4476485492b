use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use skeletal_timeline_core::{
    binary_search, linear_search, Animation, Attachment, AttachmentTimeline, BoneData,
    MixDirection, MixPose, RotateTimeline, Skeleton, SkeletonData, Skin, SlotData, Timeline,
    TranslateTimeline,
};

const BONES: usize = 32;
const KEYS: usize = 64;

fn mk_data() -> Arc<SkeletonData> {
    let mut skin = Skin::new();
    let mut slots = Vec::with_capacity(BONES);
    for i in 0..BONES {
        skin.add(i, Attachment::region("a"));
        skin.add(i, Attachment::region("b"));
        slots.push(SlotData::new(format!("slot{i}"), i));
    }
    Arc::new(SkeletonData {
        name: "bench".into(),
        bones: (0..BONES)
            .map(|i| BoneData::new(format!("bone{i}"), i.checked_sub(1)))
            .collect(),
        slots,
        skin,
        ..Default::default()
    })
}

fn mk_animation() -> Animation {
    let mut timelines: Vec<Timeline> = Vec::new();
    for bone in 0..BONES {
        let mut rotate = RotateTimeline::new(KEYS);
        let mut translate = TranslateTimeline::new(KEYS);
        let mut attachment = AttachmentTimeline::new(KEYS);
        rotate.set_bone_index(bone);
        translate.set_bone_index(bone);
        attachment.set_slot_index(bone);
        for k in 0..KEYS {
            let t = k as f32 / 30.0;
            rotate.set_frame(k, t, (k * 37 % 360) as f32);
            translate.set_frame(k, t, k as f32, -(k as f32));
            let name = if k % 2 == 0 { "a" } else { "b" };
            attachment.set_frame(k, t, Some(name.to_string()));
        }
        timelines.extend([rotate.into(), translate.into(), attachment.into()]);
    }
    let duration = (KEYS - 1) as f32 / 30.0;
    Animation::new_unchecked("bench", timelines, duration)
}

fn bench_search(c: &mut Criterion) {
    let frames: Vec<f32> = (0..1024).map(|i| i as f32 * 0.01).collect();
    c.bench_function("binary_search_1024", |b| {
        b.iter(|| binary_search(black_box(&frames), black_box(7.777), 1))
    });
    c.bench_function("linear_search_1024", |b| {
        b.iter(|| linear_search(black_box(&frames), black_box(7.777), 1))
    });
}

fn bench_apply(c: &mut Criterion) {
    let animation = mk_animation();
    let mut skeleton = Skeleton::new(mk_data());
    let mut time = 0.0_f32;
    c.bench_function("animation_apply_96_timelines", |b| {
        b.iter(|| {
            let last = time;
            time += 1.0 / 60.0;
            animation.apply(
                black_box(&mut skeleton),
                last,
                time,
                true,
                None,
                0.5,
                MixPose::Current,
                MixDirection::In,
            );
        })
    });
}

criterion_group!(benches, bench_search, bench_apply);
criterion_main!(benches);
