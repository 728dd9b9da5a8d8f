//! Animation timing tree.
//!
//! A slide's animations hang off one `ExtTimeNodeContainer` and nest
//! through its child nodes. Each node carries at most one behavior, a
//! target element, and begin/end conditions that share a record type and
//! differ by instance.

use ppt_wire::{
    Corrupted, Cursor, DecodeFn, Depth, HeaderSpec, Instances, Length, Match, Record,
    RecordHeader, RecordReader, Variant, decode_record, validate,
};

use crate::enums::{ElementReference, TimeNodeFill, TimeNodeType, TriggerObject, VisualElementType};
use crate::opaque::Opaque;
use crate::record_type::code;

/// `TimeConditionContainer` instances.
pub mod condition {
    pub const BEGIN: u16 = 1;
    pub const END: u16 = 2;
    pub const END_SYNC: u16 = 3;
    pub const NEXT: u16 = 4;
    pub const PREVIOUS: u16 = 5;
}

// ── Atoms ─────────────────────────────────────────────────────────────

/// Kind, fill and duration of a time node.
///
/// ```text
/// ┌────────┬──────┬──────────────────────────────────────────┐
/// │ Offset │ Size │ Field                                    │
/// ├────────┼──────┼──────────────────────────────────────────┤
/// │ 0x00   │ 4    │ reserved                                 │
/// │ 0x04   │ 4    │ restart (0..=3)                          │
/// │ 0x08   │ 4    │ type                                     │
/// │ 0x0C   │ 4    │ fill                                     │
/// │ 0x10   │ 4    │ reserved                                 │
/// │ 0x14   │ 1    │ reserved                                 │
/// │ 0x15   │ 3    │ unused                                   │
/// │ 0x18   │ 4    │ duration (ms, i32)                       │
/// │ 0x1C   │ 4    │ five property-used flags, 27 reserved    │
/// └────────┴──────┴──────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct TimeNodeAtom {
    pub restart: u32,
    pub node_type: TimeNodeType,
    pub fill: TimeNodeFill,
    pub duration: i32,
    pub fill_used: bool,
    pub restart_used: bool,
    pub grouping_type_used: bool,
    pub duration_used: bool,
}

impl Record for TimeNodeAtom {
    const HEADER: HeaderSpec =
        HeaderSpec::atom("TimeNodeAtom", code::TIME_NODE, Length::Exact(0x20));

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        body.skip(4)?;
        let restart = body.read_u32()?;
        let restart = body.check(validate::in_range("restart", restart, 0..=3))?;
        let node_type = body.read_u32()?;
        let node_type = body.check(TimeNodeType::from_wire(node_type))?;
        let fill = body.read_u32()?;
        let fill = body.check(TimeNodeFill::from_wire(fill))?;
        body.skip(4 + 1 + 3)?;
        let duration = body.read_i32()?;

        let mut flags = body.read_bits_u32()?;
        let fill_used = flags.read_bit();
        let restart_used = flags.read_bit();
        let _reserved = flags.read_bit();
        let grouping_type_used = flags.read_bit();
        let duration_used = flags.read_bit();
        let _reserved = flags.read_remaining_bits();

        Ok(Self {
            restart,
            node_type,
            fill,
            duration,
            fill_used,
            restart_used,
            grouping_type_used,
            duration_used,
        })
    }
}

/// What fires a time condition, and with which delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeConditionAtom {
    pub trigger_object: TriggerObject,
    pub trigger_event: u32,
    pub id: u32,
    /// Milliseconds; -1 means indefinite.
    pub delay: i32,
}

impl Record for TimeConditionAtom {
    const HEADER: HeaderSpec =
        HeaderSpec::atom("TimeConditionAtom", code::TIME_CONDITION, Length::Exact(0x10));

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        let trigger_object = body.read_u32()?;
        Ok(Self {
            trigger_object: body.check(TriggerObject::from_wire(trigger_object))?,
            trigger_event: body.read_u32()?,
            id: body.read_u32()?,
            delay: body.read_i32()?,
        })
    }
}

/// A repeat-count, speed or acceleration adjustment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeModifierAtom {
    pub modifier_type: u32,
    pub value: f32,
}

impl Record for TimeModifierAtom {
    const HEADER: HeaderSpec =
        HeaderSpec::atom("TimeModifierAtom", code::TIME_MODIFIER, Length::Exact(8));

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        let modifier_type = body.read_u32()?;
        Ok(Self {
            modifier_type: body.check(validate::in_range("type", modifier_type, 0..=3))?,
            value: body.read_f32()?,
        })
    }
}

/// How an effect steps through letters or words.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct TimeIterateDataAtom {
    pub interval: u32,
    pub iterate_type: u32,
    pub direction: u32,
    pub interval_type: u32,
    pub direction_used: bool,
    pub type_used: bool,
    pub interval_type_used: bool,
    pub interval_used: bool,
}

impl Record for TimeIterateDataAtom {
    const HEADER: HeaderSpec =
        HeaderSpec::atom("TimeIterateDataAtom", code::TIME_ITERATE_DATA, Length::Exact(0x14));

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        let interval = body.read_u32()?;
        let iterate_type = body.read_u32()?;
        let iterate_type = body.check(validate::in_range("iterateType", iterate_type, 0..=2))?;
        let direction = body.read_u32()?;
        let direction = body.check(validate::in_range("iterateDirection", direction, 0..=1))?;
        let interval_type = body.read_u32()?;
        let interval_type =
            body.check(validate::in_range("iterateIntervalType", interval_type, 0..=1))?;

        let mut flags = body.read_bits_u32()?;
        let direction_used = flags.read_bit();
        let type_used = flags.read_bit();
        let interval_type_used = flags.read_bit();
        let interval_used = flags.read_bit();
        let _reserved = flags.read_remaining_bits();

        Ok(Self {
            interval,
            iterate_type,
            direction,
            interval_type,
            direction_used,
            type_used,
            interval_type_used,
            interval_used,
        })
    }
}

// ── Visual elements ───────────────────────────────────────────────────

/// A shape, or part of one, that an animation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisualShapeAtom {
    pub element_type: VisualElementType,
    pub reference: ElementReference,
    pub id: u32,
    pub data1: u32,
    pub data2: u32,
}

impl Record for VisualShapeAtom {
    const HEADER: HeaderSpec =
        HeaderSpec::atom("VisualShapeAtom", code::VISUAL_SHAPE_ATOM, Length::Exact(0x14));

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        let element_type = body.read_u32()?;
        let element_type = body.check(VisualElementType::from_wire(element_type))?;
        let reference = body.read_u32()?;
        let reference = body.check(ElementReference::from_wire(reference))?;
        Ok(Self {
            element_type,
            reference,
            id: body.read_u32()?,
            data1: body.read_u32()?,
            data2: body.read_u32()?,
        })
    }
}

/// The slide itself as an animation target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisualPageAtom;

impl Record for VisualPageAtom {
    const HEADER: HeaderSpec =
        HeaderSpec::atom("VisualPageAtom", code::VISUAL_PAGE_ATOM, Length::Exact(4));

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        let element_type = body.read_u32()?;
        body.check(validate::expect_value(
            "type",
            element_type,
            VisualElementType::Page.to_wire(),
        ))?;
        Ok(Self)
    }
}

/// Target of an animation: a shape or the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisualElement {
    Shape(VisualShapeAtom),
    Page(VisualPageAtom),
}

fn decode_shape(cursor: &mut Cursor<'_>, depth: Depth) -> Result<VisualElement, Corrupted> {
    decode_record(cursor, depth).map(VisualElement::Shape)
}

fn decode_page(cursor: &mut Cursor<'_>, depth: Depth) -> Result<VisualElement, Corrupted> {
    decode_record(cursor, depth).map(VisualElement::Page)
}

impl Variant for VisualElement {
    const NAME: &'static str = "VisualElement";

    fn decoder_for(header: &RecordHeader) -> Option<DecodeFn<Self>> {
        let decode: DecodeFn<Self> = match header.record_type {
            code::VISUAL_SHAPE_ATOM => decode_shape,
            code::VISUAL_PAGE_ATOM => decode_page,
            _ => return None,
        };
        Some(decode)
    }
}

/// Wrapper that holds exactly one [`VisualElement`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClientVisualElement(pub VisualElement);

impl Record for ClientVisualElement {
    const HEADER: HeaderSpec = HeaderSpec::container(
        "ClientVisualElementContainer",
        code::TIME_CLIENT_VISUAL_ELEMENT,
    );

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        body.mandatory_variant().map(Self)
    }
}

// ── Conditions ────────────────────────────────────────────────────────

/// A begin, end, end-sync, next or previous condition, by instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeCondition {
    pub instance: u16,
    pub atom: TimeConditionAtom,
    pub target: Option<ClientVisualElement>,
}

impl Record for TimeCondition {
    const HEADER: HeaderSpec =
        HeaderSpec::container("TimeConditionContainer", code::TIME_CONDITION_CONTAINER)
            .with_instances(Instances::OneOf(&[
                condition::BEGIN,
                condition::END,
                condition::END_SYNC,
                condition::NEXT,
                condition::PREVIOUS,
            ]));

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        Ok(Self {
            instance: body.header().instance,
            atom: body.mandatory()?,
            target: body.optional()?,
        })
    }
}

// ── Behaviors ─────────────────────────────────────────────────────────

pub type AnimateBehavior = Opaque<{ code::TIME_ANIMATE_BEHAVIOR_CONTAINER }>;
pub type ColorBehavior = Opaque<{ code::TIME_COLOR_BEHAVIOR_CONTAINER }>;
pub type EffectBehavior = Opaque<{ code::TIME_EFFECT_BEHAVIOR_CONTAINER }>;
pub type MotionBehavior = Opaque<{ code::TIME_MOTION_BEHAVIOR_CONTAINER }>;
pub type RotationBehavior = Opaque<{ code::TIME_ROTATION_BEHAVIOR_CONTAINER }>;
pub type ScaleBehavior = Opaque<{ code::TIME_SCALE_BEHAVIOR_CONTAINER }>;
pub type SetBehavior = Opaque<{ code::TIME_SET_BEHAVIOR_CONTAINER }>;
pub type CommandBehavior = Opaque<{ code::TIME_COMMAND_BEHAVIOR_CONTAINER }>;

/// The single behavior of a time node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimeBehavior {
    Animate(AnimateBehavior),
    Color(ColorBehavior),
    Effect(EffectBehavior),
    Motion(MotionBehavior),
    Rotation(RotationBehavior),
    Scale(ScaleBehavior),
    Set(SetBehavior),
    Command(CommandBehavior),
}

/// Slot names of the behavior group, in slot order.
const BEHAVIOR_SLOTS: [&str; 8] = [
    "TimeAnimateBehaviorContainer",
    "TimeColorBehaviorContainer",
    "TimeEffectBehaviorContainer",
    "TimeMotionBehaviorContainer",
    "TimeRotationBehaviorContainer",
    "TimeScaleBehaviorContainer",
    "TimeSetBehaviorContainer",
    "TimeCommandBehaviorContainer",
];

impl TimeBehavior {
    /// Decode the eight behavior slots, of which at most one may be
    /// present.
    fn decode_slots(body: &mut RecordReader<'_, '_>) -> Result<Option<Self>, Corrupted> {
        let slots = [
            body.optional::<AnimateBehavior>()?.map(Self::Animate),
            body.optional::<ColorBehavior>()?.map(Self::Color),
            body.optional::<EffectBehavior>()?.map(Self::Effect),
            body.optional::<MotionBehavior>()?.map(Self::Motion),
            body.optional::<RotationBehavior>()?.map(Self::Rotation),
            body.optional::<ScaleBehavior>()?.map(Self::Scale),
            body.optional::<SetBehavior>()?.map(Self::Set),
            body.optional::<CommandBehavior>()?.map(Self::Command),
        ];
        let present: Vec<_> = BEHAVIOR_SLOTS
            .iter()
            .zip(&slots)
            .map(|(name, slot)| (*name, slot.is_some()))
            .collect();
        body.exclusive(&present)?;
        Ok(slots.into_iter().flatten().next())
    }
}

// ── Time nodes ────────────────────────────────────────────────────────

pub type TimePropertyList = Opaque<{ code::TIME_PROPERTY_LIST }>;
pub type TimeSequenceData = Opaque<{ code::TIME_SEQUENCE_DATA }>;
pub type SubEffect = Opaque<{ code::TIME_SUB_EFFECT_CONTAINER }>;

/// One node of the animation timing tree.
///
/// ```text
///   ExtTimeNodeContainer (0xF144, instance 1)
///   ├── TimeNodeAtom
///   ├── TimePropertyList?
///   ├── one of eight behavior containers?
///   ├── ClientVisualElementContainer?
///   ├── TimeIterateDataAtom?
///   ├── TimeSequenceDataAtom?
///   ├── TimeConditionContainer*   (instance 1, begin)
///   ├── TimeConditionContainer*   (instance 2, end)
///   ├── TimeConditionContainer?   (instance 3, end sync)
///   ├── TimeConditionContainer*   (instance 4, next)
///   ├── TimeConditionContainer*   (instance 5, previous)
///   ├── TimeModifierAtom*
///   ├── (unrecognized records, skipped)
///   ├── SubEffectContainer*
///   └── ExtTimeNodeContainer*     (children, recursive)
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ExtTimeNode {
    pub time_node: TimeNodeAtom,
    pub properties: Option<TimePropertyList>,
    pub behavior: Option<TimeBehavior>,
    pub visual_element: Option<ClientVisualElement>,
    pub iterate: Option<TimeIterateDataAtom>,
    pub sequence: Option<TimeSequenceData>,
    pub begin: Vec<TimeCondition>,
    pub end: Vec<TimeCondition>,
    pub end_sync: Option<TimeCondition>,
    pub next: Vec<TimeCondition>,
    pub previous: Vec<TimeCondition>,
    pub modifiers: Vec<TimeModifierAtom>,
    pub skipped_records: usize,
    pub sub_effects: Vec<SubEffect>,
    pub children: Vec<ExtTimeNode>,
}

impl ExtTimeNode {
    /// Number of nodes in this subtree, this one included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}

fn conditions(instance: u16) -> Match {
    Match::of::<TimeCondition>().instance(instance)
}

impl Record for ExtTimeNode {
    const HEADER: HeaderSpec =
        HeaderSpec::container("ExtTimeNodeContainer", code::TIME_EXT_TIME_NODE_CONTAINER)
            .with_instances(Instances::Only(1));

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        Ok(Self {
            time_node: body.mandatory()?,
            properties: body.optional()?,
            behavior: TimeBehavior::decode_slots(body)?,
            visual_element: body.optional()?,
            iterate: body.optional()?,
            sequence: body.optional()?,
            begin: body.run_matching(conditions(condition::BEGIN))?,
            end: body.run_matching(conditions(condition::END))?,
            end_sync: body.optional_matching(conditions(condition::END_SYNC))?,
            next: body.run_matching(conditions(condition::NEXT))?,
            previous: body.run_matching(conditions(condition::PREVIOUS))?,
            modifiers: body.run()?,
            skipped_records: body.skip_unknown(|h| {
                Match::of::<SubEffect>().accepts(h) || Match::of::<Self>().accepts(h)
            })?,
            sub_effects: body.run()?,
            children: body.run()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ppt_wire::fixture::{Body, atom, container};
    use ppt_wire::{Cause, Limits, decode_at};

    fn time_node_atom(node_type: u32) -> Vec<u8> {
        let body = Body::new()
            .u32(0)
            .u32(0)
            .u32(node_type)
            .u32(1)
            .u32(0)
            .u8(0)
            .zeros(3)
            .i32(500)
            .u32(0b1_0001)
            .build();
        atom(0, 0, code::TIME_NODE, &body)
    }

    fn time_condition(instance: u16, delay: i32) -> Vec<u8> {
        let condition_atom = atom(
            0,
            0,
            code::TIME_CONDITION,
            &Body::new().u32(0).u32(0).u32(0).i32(delay).build(),
        );
        container(code::TIME_CONDITION_CONTAINER, instance, &[condition_atom])
    }

    fn behavior(record_type: u16) -> Vec<u8> {
        container(record_type, 0, &[atom(0, 0, code::TIME_BEHAVIOR, &[0; 4])])
    }

    fn shape_target(id: u32) -> Vec<u8> {
        let shape = atom(
            0,
            0,
            code::VISUAL_SHAPE_ATOM,
            &Body::new().u32(0).u32(1).u32(id).u32(0).u32(0).build(),
        );
        container(code::TIME_CLIENT_VISUAL_ELEMENT, 0, &[shape])
    }

    fn node(children: &[Vec<u8>]) -> Vec<u8> {
        container(code::TIME_EXT_TIME_NODE_CONTAINER, 1, children)
    }

    fn decode(buf: &[u8]) -> Result<ExtTimeNode, Corrupted> {
        decode_at(buf, 0, Limits::default())
    }

    #[test]
    fn node_atom_fields() {
        let root = decode(&node(&[time_node_atom(1)])).unwrap();
        assert_eq!(root.time_node.node_type, TimeNodeType::Sequential);
        assert_eq!(root.time_node.fill, TimeNodeFill::Freeze);
        assert_eq!(root.time_node.duration, 500);
        assert!(root.time_node.fill_used);
        assert!(root.time_node.duration_used);
        assert!(!root.time_node.restart_used);
        assert_eq!(root.node_count(), 1);
    }

    #[test]
    fn conditions_are_split_by_instance() {
        let buf = node(&[
            time_node_atom(0),
            time_condition(condition::BEGIN, 0),
            time_condition(condition::BEGIN, 100),
            time_condition(condition::END, 200),
            time_condition(condition::END_SYNC, -1),
        ]);
        let root = decode(&buf).unwrap();
        assert_eq!(
            root.begin.iter().map(|c| c.atom.delay).collect::<Vec<_>>(),
            vec![0, 100]
        );
        assert_eq!(root.end.len(), 1);
        assert_eq!(root.end_sync.map(|c| c.atom.delay), Some(-1));
        assert!(root.next.is_empty());
        assert_eq!(root.skipped_records, 0);
    }

    #[test]
    fn sequence_navigation_conditions() {
        let buf = node(&[
            time_node_atom(1),
            time_condition(condition::END_SYNC, 0),
            time_condition(condition::NEXT, 10),
            time_condition(condition::PREVIOUS, 20),
            time_condition(condition::PREVIOUS, 30),
        ]);
        let root = decode(&buf).unwrap();
        assert_eq!(root.next.len(), 1);
        assert_eq!(root.next[0].instance, condition::NEXT);
        assert_eq!(
            root.previous.iter().map(|c| c.atom.delay).collect::<Vec<_>>(),
            vec![20, 30]
        );
        assert_eq!(root.skipped_records, 0);
    }

    #[test]
    fn one_behavior_and_a_target() {
        let buf = node(&[
            time_node_atom(3),
            behavior(code::TIME_SET_BEHAVIOR_CONTAINER),
            shape_target(9),
        ]);
        let root = decode(&buf).unwrap();
        assert!(matches!(root.behavior, Some(TimeBehavior::Set(_))));
        match root.visual_element {
            Some(ClientVisualElement(VisualElement::Shape(shape))) => assert_eq!(shape.id, 9),
            other => panic!("expected a shape target, got {other:?}"),
        }
    }

    #[test]
    fn two_behaviors_are_corrupted() {
        let buf = node(&[
            time_node_atom(3),
            behavior(code::TIME_COLOR_BEHAVIOR_CONTAINER),
            behavior(code::TIME_SCALE_BEHAVIOR_CONTAINER),
        ]);
        let err = decode(&buf).unwrap_err();
        assert_eq!(
            err.cause,
            Cause::MutuallyExclusive {
                first: "TimeColorBehaviorContainer",
                second: "TimeScaleBehaviorContainer"
            }
        );
    }

    #[test]
    fn children_nest_and_unknowns_are_skipped() {
        let modifier = atom(0, 0, code::TIME_MODIFIER, &Body::new().u32(1).f32(2.0).build());
        let unknown = atom(0, 0, 0xF1FF, &[0; 2]);
        let leaf = node(&[time_node_atom(3)]);
        let middle = node(&[time_node_atom(0), leaf.clone(), leaf]);
        let buf = node(&[time_node_atom(1), modifier, unknown, middle]);

        let root = decode(&buf).unwrap();
        assert_eq!(root.modifiers.len(), 1);
        assert!((root.modifiers[0].value - 2.0).abs() < f32::EPSILON);
        assert_eq!(root.skipped_records, 1);
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.node_count(), 4);
    }

    #[test]
    fn page_target_must_say_page() {
        let page = atom(0, 0, code::VISUAL_PAGE_ATOM, &Body::new().u32(0).build());
        let buf = container(code::TIME_CLIENT_VISUAL_ELEMENT, 0, &[page]);
        let err = decode_at::<ClientVisualElement>(&buf, 0, Limits::default()).unwrap_err();
        assert_eq!(err.cause, Cause::OutOfRange { field: "type", value: 0 });
    }

    #[test]
    fn empty_visual_element_is_missing_its_target() {
        let buf = container(code::TIME_CLIENT_VISUAL_ELEMENT, 0, &[]);
        let err = decode_at::<ClientVisualElement>(&buf, 0, Limits::default()).unwrap_err();
        assert_eq!(err.cause, Cause::MissingRecord { record: "VisualElement" });
    }

    #[test]
    fn deep_nesting_hits_the_depth_limit() {
        let mut buf = node(&[time_node_atom(0)]);
        for _ in 0..10 {
            buf = node(&[time_node_atom(0), buf]);
        }
        assert!(decode_at::<ExtTimeNode>(&buf, 0, Limits { max_depth: 11 }).is_ok());
        let err = decode_at::<ExtTimeNode>(&buf, 0, Limits { max_depth: 5 }).unwrap_err();
        assert_eq!(err.cause, Cause::DepthExceeded { limit: 5 });
    }
}
