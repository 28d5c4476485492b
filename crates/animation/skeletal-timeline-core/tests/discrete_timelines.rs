use std::sync::Arc;

use skeletal_timeline_core::{
    BoneData, DrawOrderTimeline, Event, EventData, EventTimeline, KeyframeTimeline, MixDirection,
    MixPose, Skeleton, SkeletonData, SlotData, TimelineError,
};

fn mk_data() -> Arc<SkeletonData> {
    Arc::new(SkeletonData {
        name: "stack".into(),
        bones: vec![BoneData::new("root", None)],
        slots: vec![
            SlotData::new("back", 0),
            SlotData::new("middle", 0),
            SlotData::new("front", 0),
        ],
        events: vec![
            EventData {
                name: "step".into(),
                int_value: 1,
                ..Default::default()
            },
            EventData {
                name: "land".into(),
                string_value: "dust".into(),
                ..Default::default()
            },
        ],
        ..Default::default()
    })
}

fn mk_draw_order() -> DrawOrderTimeline {
    let mut t = DrawOrderTimeline::new(2);
    t.set_frame(0, 0.5, Some(vec![2, 0, 1]));
    t.set_frame(1, 1.0, None);
    t
}

fn draw_order_at(time: f32, pose: MixPose, direction: MixDirection) -> Vec<usize> {
    let mut s = Skeleton::new(mk_data());
    s.draw_order = vec![1, 2, 0];
    mk_draw_order().apply(&mut s, 0.0, time, None, 1.0, pose, direction);
    s.draw_order
}

#[test]
fn draw_order_holds_keyed_permutation() {
    assert_eq!(draw_order_at(0.7, MixPose::Current, MixDirection::In), [2, 0, 1]);
}

#[test]
fn draw_order_none_key_restores_setup_order() {
    assert_eq!(draw_order_at(1.0, MixPose::Current, MixDirection::In), [0, 1, 2]);
}

#[test]
fn draw_order_before_range() {
    assert_eq!(draw_order_at(0.1, MixPose::Current, MixDirection::In), [1, 2, 0]);
    assert_eq!(draw_order_at(0.1, MixPose::Setup, MixDirection::In), [0, 1, 2]);
}

#[test]
fn draw_order_fade_out_with_setup_reverts() {
    assert_eq!(draw_order_at(0.7, MixPose::Setup, MixDirection::Out), [0, 1, 2]);
    assert_eq!(draw_order_at(0.7, MixPose::Current, MixDirection::Out), [2, 0, 1]);
}

#[test]
fn draw_order_validation_requires_permutations() {
    let data = mk_data();
    assert!(mk_draw_order().validate(&data).is_ok());

    let mut t = mk_draw_order();
    t.set_frame(0, 0.5, Some(vec![0, 0, 1]));
    assert_eq!(
        t.validate(&data),
        Err(TimelineError::InvalidDrawOrder { frame: 0, slots: 3 })
    );

    t.set_frame(0, 0.5, Some(vec![0, 1]));
    assert!(t.validate(&data).is_err());
}

fn mk_event(data: &SkeletonData, name: &str) -> Event {
    let index = data.find_event(name).unwrap();
    Event::new(index, &data.events[index], 0.0)
}

/// step @ 0.0, land @ 0.5, step @ 1.0
fn mk_events() -> EventTimeline {
    let data = mk_data();
    let mut t = EventTimeline::new(3);
    t.set_frame(0, 0.0, mk_event(&data, "step"));
    t.set_frame(1, 0.5, mk_event(&data, "land"));
    t.set_frame(2, 1.0, mk_event(&data, "step"));
    t
}

fn fired(timeline: &EventTimeline, last_time: f32, time: f32) -> Vec<(usize, f32)> {
    let mut out = Vec::new();
    timeline.fire(last_time, time, &mut out);
    out.iter().map(|e| (e.data, e.time)).collect()
}

#[test]
fn events_fire_in_half_open_interval() {
    let t = mk_events();
    assert_eq!(fired(&t, 0.2, 0.6), [(1, 0.5)]);
    assert_eq!(fired(&t, 0.0, 0.5), [(1, 0.5)]);
    assert!(fired(&t, 0.5, 0.9).is_empty());
    assert_eq!(fired(&t, -1.0, 0.0), [(0, 0.0)]);
}

#[test]
fn events_fire_in_key_order() {
    assert_eq!(
        fired(&mk_events(), -1.0, 2.0),
        [(0, 0.0), (1, 0.5), (0, 1.0)]
    );
}

#[test]
fn events_past_the_end_fire_nothing() {
    assert!(fired(&mk_events(), 1.0, 3.0).is_empty());
}

#[test]
fn looped_events_fire_tail_then_head() {
    assert_eq!(fired(&mk_events(), 0.8, 0.2), [(0, 1.0), (0, 0.0)]);
}

#[test]
fn duplicate_event_times_all_fire() {
    let data = mk_data();
    let mut t = EventTimeline::new(2);
    t.set_frame(0, 0.5, mk_event(&data, "step"));
    t.set_frame(1, 0.5, mk_event(&data, "land"));
    assert_eq!(fired(&t, 0.0, 0.5), [(0, 0.5), (1, 0.5)]);
}

#[test]
fn event_payload_comes_from_event_data() {
    let mut out = Vec::new();
    mk_events().fire(0.4, 0.5, &mut out);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].string_value, "dust");
    assert_eq!(out[0].time, 0.5);
}

#[test]
fn apply_without_sink_fires_nothing() {
    let t = mk_events();
    let mut s = Skeleton::new(mk_data());
    t.apply(&mut s, -1.0, 2.0, None, 1.0, MixPose::Current, MixDirection::Out);

    let mut sink = vec![mk_event(&mk_data(), "land")];
    t.apply(&mut s, -1.0, 0.0, Some(&mut sink), 0.0, MixPose::Setup, MixDirection::Out);
    assert_eq!(sink.len(), 2, "events append to the caller's buffer");
}

#[test]
fn event_validation_checks_event_data_index() {
    let data = mk_data();
    assert!(mk_events().validate(&data).is_ok());

    let mut t = mk_events();
    let mut stray = mk_event(&data, "land");
    stray.data = 9;
    t.set_frame(1, 0.5, stray);
    assert!(matches!(
        t.validate(&data),
        Err(TimelineError::TargetOutOfRange { index: 9, len: 2, .. })
    ));
}
