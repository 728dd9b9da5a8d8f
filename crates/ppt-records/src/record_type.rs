// ── Record type table ─────────────────────────────────────────────────
//
// One line per record type: the variant name, its 16-bit type code, and
// the name of the matching constant in `code`. The macro produces the
// constants and the name lookup from the same table so they can't drift
// apart.

macro_rules! record_types {
    ( $( $variant:ident = $code:literal => $konst:ident, )+ ) => {
        /// Raw type codes, for `HeaderSpec`s and slot matches.
        pub mod code {
            $( pub const $konst: u16 = $code; )+
        }

        /// Name of a record type code, `"Unknown"` if unlisted.
        #[must_use]
        pub const fn name_of(code: u16) -> &'static str {
            match code {
                $( $code => stringify!($variant), )+
                _ => "Unknown",
            }
        }
    };
}

record_types! {
    Document = 0x03E8 => DOCUMENT,
    DocumentAtom = 0x03E9 => DOCUMENT_ATOM,
    EndDocumentAtom = 0x03EA => END_DOCUMENT_ATOM,
    Slide = 0x03EE => SLIDE,
    SlideAtom = 0x03EF => SLIDE_ATOM,
    Notes = 0x03F0 => NOTES,
    NotesAtom = 0x03F1 => NOTES_ATOM,
    Environment = 0x03F2 => ENVIRONMENT,
    SlidePersistAtom = 0x03F3 => SLIDE_PERSIST_ATOM,
    MainMaster = 0x03F8 => MAIN_MASTER,
    SlideShowSlideInfoAtom = 0x03F9 => SLIDE_SHOW_SLIDE_INFO_ATOM,
    SlideViewInfo = 0x03FA => SLIDE_VIEW_INFO,
    GuideAtom = 0x03FB => GUIDE_ATOM,
    ViewInfoAtom = 0x03FD => VIEW_INFO_ATOM,
    SlideViewInfoAtom = 0x03FE => SLIDE_VIEW_INFO_ATOM,
    VbaInfo = 0x03FF => VBA_INFO,
    VbaInfoAtom = 0x0400 => VBA_INFO_ATOM,
    SlideShowDocInfoAtom = 0x0401 => SLIDE_SHOW_DOC_INFO_ATOM,
    Summary = 0x0402 => SUMMARY,
    DocRoutingSlipAtom = 0x0406 => DOC_ROUTING_SLIP_ATOM,
    OutlineViewInfo = 0x0407 => OUTLINE_VIEW_INFO,
    SorterViewInfo = 0x0408 => SORTER_VIEW_INFO,
    ExternalObjectList = 0x0409 => EXTERNAL_OBJECT_LIST,
    ExternalObjectListAtom = 0x040A => EXTERNAL_OBJECT_LIST_ATOM,
    DrawingGroup = 0x040B => DRAWING_GROUP,
    Drawing = 0x040C => DRAWING,
    GridSpacing10Atom = 0x040D => GRID_SPACING_10_ATOM,
    RoundTripTheme12Atom = 0x040E => ROUND_TRIP_THEME_12_ATOM,
    RoundTripColorMapping12Atom = 0x040F => ROUND_TRIP_COLOR_MAPPING_12_ATOM,
    NamedShows = 0x0410 => NAMED_SHOWS,
    NamedShow = 0x0411 => NAMED_SHOW,
    NamedShowSlidesAtom = 0x0412 => NAMED_SHOW_SLIDES_ATOM,
    RoundTripOriginalMainMasterId12Atom = 0x041C => ROUND_TRIP_ORIGINAL_MAIN_MASTER_ID_12_ATOM,
    RoundTripCompositeMasterId12Atom = 0x041D => ROUND_TRIP_COMPOSITE_MASTER_ID_12_ATOM,
    RoundTripContentMasterInfo12Atom = 0x041E => ROUND_TRIP_CONTENT_MASTER_INFO_12_ATOM,
    RoundTripShapeId12Atom = 0x041F => ROUND_TRIP_SHAPE_ID_12_ATOM,
    RoundTripHfPlaceholder12Atom = 0x0420 => ROUND_TRIP_HF_PLACEHOLDER_12_ATOM,
    RoundTripContentMasterId12Atom = 0x0422 => ROUND_TRIP_CONTENT_MASTER_ID_12_ATOM,
    RoundTripOArtTextStyles12Atom = 0x0423 => ROUND_TRIP_OART_TEXT_STYLES_12_ATOM,
    RoundTripHeaderFooterDefaults12Atom = 0x0424 => ROUND_TRIP_HEADER_FOOTER_DEFAULTS_12_ATOM,
    RoundTripDocFlags12Atom = 0x0425 => ROUND_TRIP_DOC_FLAGS_12_ATOM,
    RoundTripShapeCheckSumForCl12Atom = 0x0426 => ROUND_TRIP_SHAPE_CHECKSUM_FOR_CL_12_ATOM,
    RoundTripNotesMasterTextStyles12Atom = 0x0427 => ROUND_TRIP_NOTES_MASTER_TEXT_STYLES_12_ATOM,
    RoundTripCustomTableStyles12Atom = 0x0428 => ROUND_TRIP_CUSTOM_TABLE_STYLES_12_ATOM,
    List = 0x07D0 => LIST,
    FontCollection = 0x07D5 => FONT_COLLECTION,
    FontCollection10 = 0x07D6 => FONT_COLLECTION_10,
    BookmarkCollection = 0x07E3 => BOOKMARK_COLLECTION,
    SoundCollection = 0x07E4 => SOUND_COLLECTION,
    SoundCollectionAtom = 0x07E5 => SOUND_COLLECTION_ATOM,
    Sound = 0x07E6 => SOUND,
    SoundDataBlob = 0x07E7 => SOUND_DATA_BLOB,
    BookmarkSeedAtom = 0x07E9 => BOOKMARK_SEED_ATOM,
    ColorSchemeAtom = 0x07F0 => COLOR_SCHEME_ATOM,
    ExternalObjectRefAtom = 0x0BC1 => EXTERNAL_OBJECT_REF_ATOM,
    PlaceholderAtom = 0x0BC3 => PLACEHOLDER_ATOM,
    ShapeAtom = 0x0BDB => SHAPE_ATOM,
    ShapeFlags10Atom = 0x0BDC => SHAPE_FLAGS_10_ATOM,
    OutlineTextRefAtom = 0x0F9E => OUTLINE_TEXT_REF_ATOM,
    TextHeaderAtom = 0x0F9F => TEXT_HEADER_ATOM,
    TextCharsAtom = 0x0FA0 => TEXT_CHARS_ATOM,
    StyleTextPropAtom = 0x0FA1 => STYLE_TEXT_PROP_ATOM,
    MasterTextPropAtom = 0x0FA2 => MASTER_TEXT_PROP_ATOM,
    TextMasterStyleAtom = 0x0FA3 => TEXT_MASTER_STYLE_ATOM,
    TextCharFormatExceptionAtom = 0x0FA4 => TEXT_CHAR_FORMAT_EXCEPTION_ATOM,
    TextParagraphFormatExceptionAtom = 0x0FA5 => TEXT_PARAGRAPH_FORMAT_EXCEPTION_ATOM,
    TextRulerAtom = 0x0FA6 => TEXT_RULER_ATOM,
    TextBookmarkAtom = 0x0FA7 => TEXT_BOOKMARK_ATOM,
    TextBytesAtom = 0x0FA8 => TEXT_BYTES_ATOM,
    TextSpecialInfoDefaultAtom = 0x0FA9 => TEXT_SPECIAL_INFO_DEFAULT_ATOM,
    TextSpecialInfoAtom = 0x0FAA => TEXT_SPECIAL_INFO_ATOM,
    DefaultRulerAtom = 0x0FAB => DEFAULT_RULER_ATOM,
    StyleTextProp9Atom = 0x0FAC => STYLE_TEXT_PROP_9_ATOM,
    TextMasterStyle9Atom = 0x0FAD => TEXT_MASTER_STYLE_9_ATOM,
    OutlineTextProps9 = 0x0FAE => OUTLINE_TEXT_PROPS_9,
    OutlineTextPropsHeader9Atom = 0x0FAF => OUTLINE_TEXT_PROPS_HEADER_9_ATOM,
    TextDefaults9Atom = 0x0FB0 => TEXT_DEFAULTS_9_ATOM,
    StyleTextProp10Atom = 0x0FB1 => STYLE_TEXT_PROP_10_ATOM,
    TextMasterStyle10Atom = 0x0FB2 => TEXT_MASTER_STYLE_10_ATOM,
    OutlineTextProps10 = 0x0FB3 => OUTLINE_TEXT_PROPS_10,
    TextDefaults10Atom = 0x0FB4 => TEXT_DEFAULTS_10_ATOM,
    OutlineTextProps11 = 0x0FB5 => OUTLINE_TEXT_PROPS_11,
    StyleTextProp11Atom = 0x0FB6 => STYLE_TEXT_PROP_11_ATOM,
    FontEntityAtom = 0x0FB7 => FONT_ENTITY_ATOM,
    FontEmbedDataBlob = 0x0FB8 => FONT_EMBED_DATA_BLOB,
    CString = 0x0FBA => CSTRING,
    MetaFile = 0x0FC1 => META_FILE,
    ExternalOleObjectAtom = 0x0FC3 => EXTERNAL_OLE_OBJECT_ATOM,
    Kinsoku = 0x0FC8 => KINSOKU,
    Handout = 0x0FC9 => HANDOUT,
    ExternalOleEmbed = 0x0FCC => EXTERNAL_OLE_EMBED,
    ExternalOleEmbedAtom = 0x0FCD => EXTERNAL_OLE_EMBED_ATOM,
    ExternalOleLink = 0x0FCE => EXTERNAL_OLE_LINK,
    BookmarkEntityAtom = 0x0FD0 => BOOKMARK_ENTITY_ATOM,
    ExternalOleLinkAtom = 0x0FD1 => EXTERNAL_OLE_LINK_ATOM,
    KinsokuAtom = 0x0FD2 => KINSOKU_ATOM,
    ExternalHyperlinkAtom = 0x0FD3 => EXTERNAL_HYPERLINK_ATOM,
    ExternalHyperlink = 0x0FD7 => EXTERNAL_HYPERLINK,
    SlideNumberMetaCharAtom = 0x0FD8 => SLIDE_NUMBER_META_CHAR_ATOM,
    HeadersFooters = 0x0FD9 => HEADERS_FOOTERS,
    HeadersFootersAtom = 0x0FDA => HEADERS_FOOTERS_ATOM,
    TextInteractiveInfoAtom = 0x0FDF => TEXT_INTERACTIVE_INFO_ATOM,
    ExternalHyperlink9 = 0x0FE4 => EXTERNAL_HYPERLINK_9,
    RecolorInfoAtom = 0x0FE7 => RECOLOR_INFO_ATOM,
    ExternalOleControl = 0x0FEE => EXTERNAL_OLE_CONTROL,
    SlideListWithText = 0x0FF0 => SLIDE_LIST_WITH_TEXT,
    AnimationInfoAtom = 0x0FF1 => ANIMATION_INFO_ATOM,
    InteractiveInfo = 0x0FF2 => INTERACTIVE_INFO,
    InteractiveInfoAtom = 0x0FF3 => INTERACTIVE_INFO_ATOM,
    UserEditAtom = 0x0FF5 => USER_EDIT_ATOM,
    CurrentUserAtom = 0x0FF6 => CURRENT_USER_ATOM,
    DateTimeMetaCharAtom = 0x0FF7 => DATE_TIME_META_CHAR_ATOM,
    GenericDateMetaCharAtom = 0x0FF8 => GENERIC_DATE_META_CHAR_ATOM,
    HeaderMetaCharAtom = 0x0FF9 => HEADER_META_CHAR_ATOM,
    FooterMetaCharAtom = 0x0FFA => FOOTER_META_CHAR_ATOM,
    ExternalOleControlAtom = 0x0FFB => EXTERNAL_OLE_CONTROL_ATOM,
    ExternalMediaAtom = 0x1004 => EXTERNAL_MEDIA_ATOM,
    ExternalVideo = 0x1005 => EXTERNAL_VIDEO,
    ExternalAviMovie = 0x1006 => EXTERNAL_AVI_MOVIE,
    ExternalMciMovie = 0x1007 => EXTERNAL_MCI_MOVIE,
    ExternalMidiAudio = 0x100D => EXTERNAL_MIDI_AUDIO,
    ExternalCdAudio = 0x100E => EXTERNAL_CD_AUDIO,
    ExternalWavAudioEmbedded = 0x100F => EXTERNAL_WAV_AUDIO_EMBEDDED,
    ExternalWavAudioLink = 0x1010 => EXTERNAL_WAV_AUDIO_LINK,
    ExternalOleObjectStg = 0x1011 => EXTERNAL_OLE_OBJECT_STG,
    ExternalCdAudioAtom = 0x1012 => EXTERNAL_CD_AUDIO_ATOM,
    ExternalWavAudioEmbeddedAtom = 0x1013 => EXTERNAL_WAV_AUDIO_EMBEDDED_ATOM,
    AnimationInfo = 0x1014 => ANIMATION_INFO,
    RtfDateTimeMetaCharAtom = 0x1015 => RTF_DATE_TIME_META_CHAR_ATOM,
    ExternalHyperlinkFlagsAtom = 0x1018 => EXTERNAL_HYPERLINK_FLAGS_ATOM,
    ProgTags = 0x1388 => PROG_TAGS,
    ProgStringTag = 0x1389 => PROG_STRING_TAG,
    ProgBinaryTag = 0x138A => PROG_BINARY_TAG,
    BinaryTagDataBlob = 0x138B => BINARY_TAG_DATA_BLOB,
    PrintOptionsAtom = 0x1770 => PRINT_OPTIONS_ATOM,
    PersistDirectoryAtom = 0x1772 => PERSIST_DIRECTORY_ATOM,
    PresentationAdvisorFlags9Atom = 0x177A => PRESENTATION_ADVISOR_FLAGS_9_ATOM,
    HtmlDocInfo9Atom = 0x177B => HTML_DOC_INFO_9_ATOM,
    HtmlPublishInfoAtom = 0x177C => HTML_PUBLISH_INFO_ATOM,
    HtmlPublishInfo9 = 0x177D => HTML_PUBLISH_INFO_9,
    BroadcastDocInfo9 = 0x177E => BROADCAST_DOC_INFO_9,
    BroadcastDocInfo9Atom = 0x177F => BROADCAST_DOC_INFO_9_ATOM,
    EnvelopeFlags9Atom = 0x1784 => ENVELOPE_FLAGS_9_ATOM,
    EnvelopeData9Atom = 0x1785 => ENVELOPE_DATA_9_ATOM,
    VisualShapeAtom = 0x2AFB => VISUAL_SHAPE_ATOM,
    HashCodeAtom = 0x2B00 => HASH_CODE_ATOM,
    VisualPageAtom = 0x2B01 => VISUAL_PAGE_ATOM,
    BuildList = 0x2B02 => BUILD_LIST,
    BuildAtom = 0x2B03 => BUILD_ATOM,
    ChartBuild = 0x2B04 => CHART_BUILD,
    ChartBuildAtom = 0x2B05 => CHART_BUILD_ATOM,
    DiagramBuild = 0x2B06 => DIAGRAM_BUILD,
    DiagramBuildAtom = 0x2B07 => DIAGRAM_BUILD_ATOM,
    ParaBuild = 0x2B08 => PARA_BUILD,
    ParaBuildAtom = 0x2B09 => PARA_BUILD_ATOM,
    LevelInfoAtom = 0x2B0A => LEVEL_INFO_ATOM,
    RoundTripAnimationAtom12Atom = 0x2B0B => ROUND_TRIP_ANIMATION_ATOM_12_ATOM,
    RoundTripAnimationHashAtom12Atom = 0x2B0D => ROUND_TRIP_ANIMATION_HASH_ATOM_12_ATOM,
    Comment10 = 0x2EE0 => COMMENT_10,
    Comment10Atom = 0x2EE1 => COMMENT_10_ATOM,
    CommentIndex10 = 0x2EE4 => COMMENT_INDEX_10,
    CommentIndex10Atom = 0x2EE5 => COMMENT_INDEX_10_ATOM,
    LinkedShape10Atom = 0x2EE6 => LINKED_SHAPE_10_ATOM,
    LinkedSlide10Atom = 0x2EE7 => LINKED_SLIDE_10_ATOM,
    SlideFlags10Atom = 0x2EEA => SLIDE_FLAGS_10_ATOM,
    SlideTime10Atom = 0x2EEB => SLIDE_TIME_10_ATOM,
    DiffTree10 = 0x2EEC => DIFF_TREE_10,
    Diff10 = 0x2EED => DIFF_10,
    Diff10Atom = 0x2EEE => DIFF_10_ATOM,
    SlideListTableSize10Atom = 0x2EEF => SLIDE_LIST_TABLE_SIZE_10_ATOM,
    SlideListEntry10Atom = 0x2EF0 => SLIDE_LIST_ENTRY_10_ATOM,
    SlideListTable10 = 0x2EF1 => SLIDE_LIST_TABLE_10,
    CryptSession10Container = 0x2F14 => CRYPT_SESSION_10_CONTAINER,
    FontEmbedFlags10Atom = 0x32C8 => FONT_EMBED_FLAGS_10_ATOM,
    FilterPrivacyFlags10Atom = 0x36B0 => FILTER_PRIVACY_FLAGS_10_ATOM,
    DocToolbarStates10Atom = 0x36B1 => DOC_TOOLBAR_STATES_10_ATOM,
    PhotoAlbumInfo10Atom = 0x36B2 => PHOTO_ALBUM_INFO_10_ATOM,
    SmartTagStore11Container = 0x36B3 => SMART_TAG_STORE_11_CONTAINER,
    RoundTripSlideSyncInfo12 = 0x3714 => ROUND_TRIP_SLIDE_SYNC_INFO_12,
    RoundTripSlideSyncInfoAtom12 = 0x3715 => ROUND_TRIP_SLIDE_SYNC_INFO_ATOM_12,
    TimeConditionContainer = 0xF125 => TIME_CONDITION_CONTAINER,
    TimeNode = 0xF127 => TIME_NODE,
    TimeCondition = 0xF128 => TIME_CONDITION,
    TimeModifier = 0xF129 => TIME_MODIFIER,
    TimeBehaviorContainer = 0xF12A => TIME_BEHAVIOR_CONTAINER,
    TimeAnimateBehaviorContainer = 0xF12B => TIME_ANIMATE_BEHAVIOR_CONTAINER,
    TimeColorBehaviorContainer = 0xF12C => TIME_COLOR_BEHAVIOR_CONTAINER,
    TimeEffectBehaviorContainer = 0xF12D => TIME_EFFECT_BEHAVIOR_CONTAINER,
    TimeMotionBehaviorContainer = 0xF12E => TIME_MOTION_BEHAVIOR_CONTAINER,
    TimeRotationBehaviorContainer = 0xF12F => TIME_ROTATION_BEHAVIOR_CONTAINER,
    TimeScaleBehaviorContainer = 0xF130 => TIME_SCALE_BEHAVIOR_CONTAINER,
    TimeSetBehaviorContainer = 0xF131 => TIME_SET_BEHAVIOR_CONTAINER,
    TimeCommandBehaviorContainer = 0xF132 => TIME_COMMAND_BEHAVIOR_CONTAINER,
    TimeBehavior = 0xF133 => TIME_BEHAVIOR,
    TimeAnimateBehavior = 0xF134 => TIME_ANIMATE_BEHAVIOR,
    TimeColorBehavior = 0xF135 => TIME_COLOR_BEHAVIOR,
    TimeEffectBehavior = 0xF136 => TIME_EFFECT_BEHAVIOR,
    TimeMotionBehavior = 0xF137 => TIME_MOTION_BEHAVIOR,
    TimeRotationBehavior = 0xF138 => TIME_ROTATION_BEHAVIOR,
    TimeScaleBehavior = 0xF139 => TIME_SCALE_BEHAVIOR,
    TimeSetBehavior = 0xF13A => TIME_SET_BEHAVIOR,
    TimeCommandBehavior = 0xF13B => TIME_COMMAND_BEHAVIOR,
    TimeClientVisualElement = 0xF13C => TIME_CLIENT_VISUAL_ELEMENT,
    TimePropertyList = 0xF13D => TIME_PROPERTY_LIST,
    TimeVariantList = 0xF13E => TIME_VARIANT_LIST,
    TimeAnimationValueList = 0xF13F => TIME_ANIMATION_VALUE_LIST,
    TimeIterateData = 0xF140 => TIME_ITERATE_DATA,
    TimeSequenceData = 0xF141 => TIME_SEQUENCE_DATA,
    TimeVariant = 0xF142 => TIME_VARIANT,
    TimeAnimationValue = 0xF143 => TIME_ANIMATION_VALUE,
    TimeExtTimeNodeContainer = 0xF144 => TIME_EXT_TIME_NODE_CONTAINER,
    TimeSubEffectContainer = 0xF145 => TIME_SUB_EFFECT_CONTAINER,
}
