use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use skeletal_timeline_core::{
    Attachment, AttachmentTimeline, BoneData, KeyframeTimeline, MixDirection, MixPose, Skeleton,
    SkeletonData, Skin, SlotData,
};

/// Counts allocations made by threads that opted in.
struct CountingAlloc;

static ALLOCATIONS: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    static COUNTING: Cell<bool> = const { Cell::new(false) };
}

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNTING.with(Cell::get) {
            ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNTING.with(Cell::get) {
            ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

fn allocations_during(f: impl FnOnce()) -> usize {
    let before = ALLOCATIONS.load(Ordering::Relaxed);
    COUNTING.with(|c| c.set(true));
    f();
    COUNTING.with(|c| c.set(false));
    ALLOCATIONS.load(Ordering::Relaxed) - before
}

#[test]
fn switching_attachments_does_not_allocate() {
    let mut skin = Skin::new();
    skin.add(0, Attachment::region("a"));
    skin.add(0, Attachment::region("b"));
    let mut skeleton = Skeleton::new(Arc::new(SkeletonData {
        name: "blinker".into(),
        bones: vec![BoneData::new("root", None)],
        slots: vec![SlotData {
            attachment: Some("a".into()),
            ..SlotData::new("eye", 0)
        }],
        skin,
        ..Default::default()
    }));

    let mut timeline = AttachmentTimeline::new(2);
    timeline.set_frame(0, 0.0, Some("a".into()));
    timeline.set_frame(1, 0.5, Some("b".into()));

    let count = allocations_during(|| {
        for i in 0..100 {
            let time = if i % 2 == 0 { 0.75 } else { 0.25 };
            timeline.apply(&mut skeleton, 0.0, time, None, 1.0, MixPose::Current, MixDirection::In);
        }
        // Fade-out reverts go through the same path.
        timeline.apply(&mut skeleton, 0.0, 0.75, None, 1.0, MixPose::Setup, MixDirection::Out);
        skeleton.set_to_setup_pose();
    });

    assert_eq!(count, 0);
    assert_eq!(skeleton.slots[0].attachment.as_deref(), Some("a"));
}
