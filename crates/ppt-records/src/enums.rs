use ppt_wire::Cause;

// ── Macro for enumerated field boilerplate ────────────────────────────
//
// Every enum in this module is a closed set of named values stored in a
// fixed-width integer field. The macro produces the enum plus a
// conversion pair (to_wire / from_wire). A value outside the set is a
// format violation, reported as `Cause::InvalidEnumValue`.

macro_rules! wire_enum {
  (
    $(#[$meta:meta])*
    pub enum $name:ident : $repr:ty {
      $( $(#[$vmeta:meta])* $variant:ident = $wire:literal ),+ $(,)?
    }
  ) => {
    $(#[$meta])*
    pub enum $name {
      $( $(#[$vmeta])* $variant ),+
    }

    impl $name {
      /// The raw field value for this variant.
      #[must_use]
      pub fn to_wire(self) -> $repr {
        match self {
          $( Self::$variant => $wire ),+
        }
      }

      /// Decode a raw field value.
      ///
      /// # Errors
      ///
      /// Returns [`Cause::InvalidEnumValue`] if the value doesn't match
      /// any variant.
      pub fn from_wire(value: $repr) -> Result<Self, Cause> {
        match value {
          $( $wire => Ok(Self::$variant), )+
          other => Err(Cause::InvalidEnumValue {
            enum_name: stringify!($name),
            value: u32::from(other),
          }),
        }
      }
    }
  };
}

// ── Document ──────────────────────────────────────────────────────────

wire_enum! {
  /// Intended output size of the slides (`DocumentAtom.slideSizeType`).
  #[derive(Clone, Copy, Debug, PartialEq, Eq)]
  pub enum SlideSize: u16 {
    OnScreen = 0x0000,
    LetterPaper = 0x0001,
    A4Paper = 0x0002,
    Film35mm = 0x0003,
    Overhead = 0x0004,
    Banner = 0x0005,
    Custom = 0x0006,
  }
}

wire_enum! {
  /// Which list a `SlideListWithTextContainer` holds, from its instance.
  ///
  /// ```text
  /// ┌──────────┬───────────────────────────┐
  /// │ Instance │ List                      │
  /// ├──────────┼───────────────────────────┤
  /// │ 0x000    │ presentation slides       │
  /// │ 0x001    │ main and title masters    │
  /// │ 0x002    │ notes slides              │
  /// └──────────┴───────────────────────────┘
  /// ```
  #[derive(Clone, Copy, Debug, PartialEq, Eq)]
  pub enum SlideListKind: u16 {
    Slides = 0x000,
    Masters = 0x001,
    Notes = 0x002,
  }
}

// ── Text ──────────────────────────────────────────────────────────────

wire_enum! {
  /// Role of a text body (`TextHeaderAtom.textType`).
  #[derive(Clone, Copy, Debug, PartialEq, Eq)]
  pub enum TextType: u32 {
    Title = 0,
    Body = 1,
    Notes = 2,
    Other = 4,
    CenterBody = 5,
    CenterTitle = 6,
    HalfBody = 7,
    QuarterBody = 8,
  }
}

// ── Slides ────────────────────────────────────────────────────────────

wire_enum! {
  /// Placeholder arrangement of a slide (`SlideAtom.geom`).
  #[derive(Clone, Copy, Debug, PartialEq, Eq)]
  pub enum SlideLayout: u32 {
    TitleSlide = 0x00,
    TitleBody = 0x01,
    MasterTitle = 0x02,
    TitleOnly = 0x07,
    TwoColumns = 0x08,
    TwoRows = 0x09,
    ColumnTwoRows = 0x0A,
    TwoRowsColumn = 0x0B,
    TwoColumnsRow = 0x0D,
    FourObjects = 0x0E,
    BigObject = 0x0F,
    Blank = 0x10,
    VerticalTitleBody = 0x11,
    VerticalTwoRows = 0x12,
  }
}

// ── Edit chain ────────────────────────────────────────────────────────

wire_enum! {
  /// `CurrentUserAtom.headerToken`.
  #[derive(Clone, Copy, Debug, PartialEq, Eq)]
  pub enum HeaderToken: u32 {
    Plain = 0xE391_C05F,
    /// The document stream is encrypted.
    Encrypted = 0xF3D1_C4DF,
  }
}

// ── Animation timing ──────────────────────────────────────────────────

wire_enum! {
  /// Kind of a time node (`TimeNodeAtom.type`).
  #[derive(Clone, Copy, Debug, PartialEq, Eq)]
  pub enum TimeNodeType: u32 {
    Parallel = 0,
    Sequential = 1,
    Behavior = 3,
    Media = 4,
  }
}

wire_enum! {
  /// What a time node does once its duration ends (`TimeNodeAtom.fill`).
  #[derive(Clone, Copy, Debug, PartialEq, Eq)]
  pub enum TimeNodeFill: u32 {
    Remove = 0,
    Freeze = 1,
    Hold = 2,
    Transition = 3,
  }
}

wire_enum! {
  /// Object a time condition is triggered by.
  #[derive(Clone, Copy, Debug, PartialEq, Eq)]
  pub enum TriggerObject: u32 {
    None = 0,
    VisualElement = 1,
    TimeNode = 2,
    RuntimeNodeRef = 3,
  }
}

wire_enum! {
  /// Part of a shape an animation targets (`VisualShapeAtom.type`).
  #[derive(Clone, Copy, Debug, PartialEq, Eq)]
  pub enum VisualElementType: u32 {
    Shape = 0,
    Page = 1,
    TextRange = 2,
    Audio = 3,
    Video = 4,
    ChartElement = 5,
    ShapeOnly = 6,
    AllTextRange = 7,
  }
}

wire_enum! {
  /// What `VisualShapeAtom.id` refers to.
  #[derive(Clone, Copy, Debug, PartialEq, Eq)]
  pub enum ElementReference: u32 {
    Shape = 1,
    Sound = 2,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn slide_size_roundtrip() {
    for v in 0u16..=6 {
      assert_eq!(SlideSize::from_wire(v).unwrap().to_wire(), v);
    }
  }

  #[test]
  fn gaps_in_the_value_set_are_rejected() {
    // 3 is not a TextType; neither are the unused layout codes.
    assert_eq!(
      TextType::from_wire(3),
      Err(Cause::InvalidEnumValue {
        enum_name: "TextType",
        value: 3
      })
    );
    assert!(SlideLayout::from_wire(0x03).is_err());
    assert!(SlideLayout::from_wire(0x0C).is_err());
    assert!(TimeNodeType::from_wire(2).is_err());
  }

  #[test]
  fn header_tokens() {
    assert_eq!(HeaderToken::from_wire(0xE391_C05F), Ok(HeaderToken::Plain));
    assert_eq!(HeaderToken::from_wire(0xF3D1_C4DF), Ok(HeaderToken::Encrypted));
    assert!(HeaderToken::from_wire(0).is_err());
  }

  #[test]
  fn slide_list_kind_from_instance() {
    assert_eq!(SlideListKind::from_wire(1), Ok(SlideListKind::Masters));
    assert!(SlideListKind::from_wire(3).is_err());
  }
}
