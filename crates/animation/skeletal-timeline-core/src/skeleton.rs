//! Skeleton boundary model: immutable setup data plus the mutable pose arrays
//! timelines write to. World transforms, rendering and constraint solving live
//! in the host engine; only the local pose state is represented here.

use std::sync::Arc;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::event::EventData;

/// RGBA color, each channel in `[0, 1]`.
pub type Color = [f32; 4];

pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];

fn one() -> f32 {
    1.0
}

fn white() -> Color {
    WHITE
}

fn positive_bend() -> i32 {
    1
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoneData {
    pub name: String,
    #[serde(default)]
    pub parent: Option<usize>,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    /// Degrees.
    #[serde(default)]
    pub rotation: f32,
    #[serde(default = "one")]
    pub scale_x: f32,
    #[serde(default = "one")]
    pub scale_y: f32,
    #[serde(default)]
    pub shear_x: f32,
    #[serde(default)]
    pub shear_y: f32,
}

impl BoneData {
    pub fn new(name: impl Into<String>, parent: Option<usize>) -> Self {
        Self {
            name: name.into(),
            parent,
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            shear_x: 0.0,
            shear_y: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlotData {
    pub name: String,
    pub bone: usize,
    #[serde(default = "white")]
    pub color: Color,
    /// Attachment shown in the setup pose.
    #[serde(default)]
    pub attachment: Option<String>,
}

impl SlotData {
    pub fn new(name: impl Into<String>, bone: usize) -> Self {
        Self {
            name: name.into(),
            bone,
            color: WHITE,
            attachment: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IkConstraintData {
    pub name: String,
    pub bones: Vec<usize>,
    pub target: usize,
    #[serde(default = "one")]
    pub mix: f32,
    /// `1` or `-1`.
    #[serde(default = "positive_bend")]
    pub bend_direction: i32,
}

/// Attachment as far as timelines care: a name, and setup vertices for
/// attachments that can be deformed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Shared with every slot showing this attachment.
    pub name: Arc<str>,
    #[serde(default)]
    pub vertices: Option<Vec<f32>>,
}

impl Attachment {
    pub fn region(name: impl Into<String>) -> Self {
        Self {
            name: Arc::from(name.into()),
            vertices: None,
        }
    }

    pub fn mesh(name: impl Into<String>, vertices: Vec<f32>) -> Self {
        Self {
            name: Arc::from(name.into()),
            vertices: Some(vertices),
        }
    }

    #[inline]
    pub fn setup_vertices(&self) -> Option<&[f32]> {
        self.vertices.as_deref()
    }
}

/// Attachments keyed by slot index, then attachment name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Skin {
    #[serde(default)]
    attachments: HashMap<usize, HashMap<String, Attachment>>,
}

impl Skin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, slot_index: usize, attachment: Attachment) {
        self.attachments
            .entry(slot_index)
            .or_default()
            .insert(attachment.name.to_string(), attachment);
    }

    pub fn get(&self, slot_index: usize, name: &str) -> Option<&Attachment> {
        self.attachments.get(&slot_index)?.get(name)
    }
}

/// Setup pose shared by every skeleton instance.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SkeletonData {
    #[serde(default)]
    pub name: String,
    pub bones: Vec<BoneData>,
    pub slots: Vec<SlotData>,
    #[serde(default)]
    pub ik_constraints: Vec<IkConstraintData>,
    #[serde(default)]
    pub skin: Skin,
    #[serde(default)]
    pub events: Vec<EventData>,
}

impl SkeletonData {
    pub fn find_bone(&self, name: &str) -> Option<usize> {
        self.bones.iter().position(|b| b.name == name)
    }

    pub fn find_slot(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|s| s.name == name)
    }

    pub fn find_ik_constraint(&self, name: &str) -> Option<usize> {
        self.ik_constraints.iter().position(|c| c.name == name)
    }

    pub fn find_event(&self, name: &str) -> Option<usize> {
        self.events.iter().position(|e| e.name == name)
    }
}

/// Local pose of one bone.
#[derive(Clone, Debug, PartialEq)]
pub struct Bone {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub shear_x: f32,
    pub shear_y: f32,
}

impl Bone {
    fn from_data(data: &BoneData) -> Self {
        Self {
            x: data.x,
            y: data.y,
            rotation: data.rotation,
            scale_x: data.scale_x,
            scale_y: data.scale_y,
            shear_x: data.shear_x,
            shear_y: data.shear_y,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Slot {
    pub color: Color,
    /// Name of the attachment currently shown, shared with the skin entry.
    pub attachment: Option<Arc<str>>,
    /// Deformed vertices for the current attachment; empty means setup vertices.
    pub deform: Vec<f32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IkConstraint {
    pub mix: f32,
    pub bend_direction: i32,
}

/// One posed instance. Exclusively owned by whoever updates it each frame.
#[derive(Clone, Debug)]
pub struct Skeleton {
    pub(crate) data: Arc<SkeletonData>,
    pub bones: Vec<Bone>,
    pub slots: Vec<Slot>,
    /// Slot indices in draw order.
    pub draw_order: Vec<usize>,
    pub ik_constraints: Vec<IkConstraint>,
}

impl Skeleton {
    pub fn new(data: Arc<SkeletonData>) -> Self {
        let mut skeleton = Self {
            bones: data.bones.iter().map(Bone::from_data).collect(),
            slots: Vec::with_capacity(data.slots.len()),
            draw_order: Vec::with_capacity(data.slots.len()),
            ik_constraints: data
                .ik_constraints
                .iter()
                .map(|c| IkConstraint {
                    mix: c.mix,
                    bend_direction: c.bend_direction,
                })
                .collect(),
            data,
        };
        skeleton.slots = (0..skeleton.data.slots.len())
            .map(|_| Slot {
                color: WHITE,
                attachment: None,
                deform: Vec::new(),
            })
            .collect();
        skeleton.set_slots_to_setup_pose();
        skeleton
    }

    #[inline]
    pub fn data(&self) -> &SkeletonData {
        &self.data
    }

    pub fn set_to_setup_pose(&mut self) {
        self.set_bones_to_setup_pose();
        self.set_slots_to_setup_pose();
    }

    pub fn set_bones_to_setup_pose(&mut self) {
        for (bone, data) in self.bones.iter_mut().zip(&self.data.bones) {
            *bone = Bone::from_data(data);
        }
        for (constraint, data) in self.ik_constraints.iter_mut().zip(&self.data.ik_constraints) {
            constraint.mix = data.mix;
            constraint.bend_direction = data.bend_direction;
        }
    }

    /// Resets draw order, slot colors, attachments and deform buffers.
    pub fn set_slots_to_setup_pose(&mut self) {
        self.draw_order.clear();
        self.draw_order.extend(0..self.slots.len());
        for index in 0..self.slots.len() {
            self.slots[index].color = self.data.slots[index].color;
            self.slots[index].deform.clear();
            self.reset_slot_attachment(index);
        }
    }

    /// Restores the setup attachment of one slot.
    pub fn reset_slot_attachment(&mut self, slot_index: usize) {
        let data = Arc::clone(&self.data);
        self.set_attachment(slot_index, data.slots[slot_index].attachment.as_deref());
    }

    /// Looks an attachment up in the skin.
    pub fn attachment(&self, slot_index: usize, name: &str) -> Option<&Attachment> {
        self.data.skin.get(slot_index, name)
    }

    /// The attachment currently shown by a slot.
    pub fn slot_attachment(&self, slot_index: usize) -> Option<&Attachment> {
        let name = self.slots[slot_index].attachment.as_deref()?;
        self.attachment(slot_index, name)
    }

    /// Shows the named attachment, or clears the slot for `None`, an empty
    /// name, or a name missing from the skin. Changing the attachment drops
    /// any deform. Never allocates: the slot shares the skin's name.
    pub fn set_attachment(&mut self, slot_index: usize, name: Option<&str>) {
        let resolved = match name {
            Some(name) if !name.is_empty() => match self.data.skin.get(slot_index, name) {
                Some(attachment) => Some(Arc::clone(&attachment.name)),
                None => {
                    log::trace!("slot {slot_index}: attachment '{name}' not in skin, clearing");
                    None
                }
            },
            _ => None,
        };
        let slot = &mut self.slots[slot_index];
        if slot.attachment != resolved {
            slot.attachment = resolved;
            slot.deform.clear();
        }
    }
}
