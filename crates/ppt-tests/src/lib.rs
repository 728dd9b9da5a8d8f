#![warn(clippy::pedantic)]
#![allow(clippy::missing_panics_doc)]

//! Byte builders for whole presentations.
//!
//! Shared by the integration tests, the benchmarks and the
//! `generate_sample` binary. Every builder produces well-formed records;
//! tests break them afterwards where they need to.
//!
//! ```text
//!   PowerPoint Document stream built by PresentationBuilder
//!   ┌──────────────────────────────────────────────┐
//!   │ DocumentContainer           persist id 1     │
//!   │ MainMaster                  persist id 2     │
//!   │ SlideContainer × n          persist id 3..   │
//!   │ NotesContainer (master)     optional         │
//!   │ NotesContainer × n          optional         │
//!   │ PersistDirectoryAtom                         │
//!   │ UserEditAtom  ◀── Current User points here   │
//!   └──────────────────────────────────────────────┘
//! ```

use ppt_decoder::MemoryStreams;
use ppt_records::record_type::code;
pub use ppt_wire::fixture::{Body, atom, container, header};

/// Slide id of the single master.
pub const MASTER_SLIDE_ID: u32 = 0x8000_0000;

/// Slide id of the first slide; later slides count up from here.
pub const FIRST_SLIDE_ID: u32 = 0x100;

pub const DOCUMENT_PERSIST_ID: u32 = 1;
pub const MASTER_PERSIST_ID: u32 = 2;

const PLAIN_TOKEN: u32 = 0xE391_C05F;
const ENCRYPTED_TOKEN: u32 = 0xF3D1_C4DF;

fn u32_len(bytes: &[u8]) -> u32 {
    u32::try_from(bytes.len()).expect("fixture stream fits in u32")
}

// ── Records ───────────────────────────────────────────────────────────────────

/// `DocumentAtom` for a 10 x 7.5 inch deck.
#[must_use]
pub fn document_atom(notes_master_persist_id: u32) -> Vec<u8> {
    let body = Body::new()
        .i32(5760)
        .i32(4320)
        .i32(4320)
        .i32(5760)
        .i32(1)
        .i32(2)
        .u32(notes_master_persist_id)
        .u32(0)
        .u16(1)
        .u16(0)
        .u8(1)
        .u8(0)
        .u8(0)
        .u8(0)
        .build();
    atom(1, 0, code::DOCUMENT_ATOM, &body)
}

/// `FontEntityAtom` with a NUL-padded face name.
#[must_use]
pub fn font_entity(index: u16, face_name: &str) -> Vec<u8> {
    let name = Body::new().utf16(face_name);
    let padding = 64 - name.len();
    let body = name.zeros(padding).u8(0).u8(0).u8(0b0100).u8(0x22).build();
    atom(0, index, code::FONT_ENTITY_ATOM, &body)
}

/// `DocumentTextInfoContainer` with one font and default styles.
#[must_use]
pub fn text_info() -> Vec<u8> {
    container(
        code::ENVIRONMENT,
        0,
        &[
            container(code::FONT_COLLECTION, 0, &[font_entity(0, "Arial")]),
            atom(0, 0, code::TEXT_SPECIAL_INFO_DEFAULT_ATOM, &[1, 0, 0, 0, 0, 0]),
            atom(0, 0, code::TEXT_MASTER_STYLE_ATOM, &[0, 0]),
        ],
    )
}

#[must_use]
pub fn drawing_group() -> Vec<u8> {
    container(code::DRAWING_GROUP, 0, &[atom(0, 0, 0xF006, &[0; 16])])
}

#[must_use]
pub fn drawing() -> Vec<u8> {
    container(code::DRAWING, 0, &[atom(0, 0, 0xF008, &[0; 8])])
}

#[must_use]
pub fn color_scheme() -> Vec<u8> {
    let mut body = Body::new();
    for shade in [0xFF, 0x00, 0x80, 0x00, 0xBB, 0x33, 0x99, 0x66] {
        body = body.u8(shade).u8(shade).u8(shade).u8(0);
    }
    atom(0, 1, code::COLOR_SCHEME_ATOM, &body.build())
}

#[must_use]
pub fn slide_persist(persist_id: u32, slide_id: u32, text_count: i32) -> Vec<u8> {
    let body = Body::new()
        .u32(persist_id)
        .u32(0)
        .i32(text_count)
        .u32(slide_id)
        .u32(0)
        .build();
    atom(0, 0, code::SLIDE_PERSIST_ATOM, &body)
}

#[must_use]
pub fn text_header(text_type: u32) -> Vec<u8> {
    atom(0, 0, code::TEXT_HEADER_ATOM, &Body::new().u32(text_type).build())
}

#[must_use]
pub fn text_chars(text: &str) -> Vec<u8> {
    atom(0, 0, code::TEXT_CHARS_ATOM, &Body::new().utf16(text).build())
}

/// One slide list entry: the persist atom, then a title group and body
/// groups for `texts`.
#[must_use]
pub fn slide_list_entry(persist_id: u32, slide_id: u32, texts: &[String]) -> Vec<u8> {
    let count = i32::try_from(texts.len()).expect("text count fits in i32");
    let mut out = slide_persist(persist_id, slide_id, count);
    for (index, text) in texts.iter().enumerate() {
        out.extend(text_header(if index == 0 { 0 } else { 1 }));
        out.extend(text_chars(text));
    }
    out
}

#[must_use]
pub fn slide_atom(master_id: u32, notes_id: u32) -> Vec<u8> {
    let body = Body::new()
        .u32(1)
        .bytes(&[0x0D, 0x0E, 0, 0, 0, 0, 0, 0])
        .u32(master_id)
        .u32(notes_id)
        .u16(0b111)
        .u16(0)
        .build();
    atom(2, 0, code::SLIDE_ATOM, &body)
}

/// A slide with the mandatory slots only.
#[must_use]
pub fn slide(notes_id: u32) -> Vec<u8> {
    container(
        code::SLIDE,
        0,
        &[slide_atom(MASTER_SLIDE_ID, notes_id), drawing(), color_scheme()],
    )
}

#[must_use]
pub fn main_master() -> Vec<u8> {
    container(
        code::MAIN_MASTER,
        0,
        &[slide_atom(0, 0), drawing(), color_scheme()],
    )
}

/// A notes page for `slide_id`; 0 makes it the notes master.
#[must_use]
pub fn notes(slide_id: u32) -> Vec<u8> {
    let notes_atom = atom(
        1,
        0,
        code::NOTES_ATOM,
        &Body::new().u32(slide_id).u16(0b011).u16(0).build(),
    );
    container(code::NOTES, 0, &[notes_atom, drawing(), color_scheme()])
}

#[must_use]
pub fn user_edit(last_edit: u32, directory: u32, encrypt_session: Option<u32>) -> Vec<u8> {
    let mut body = Body::new()
        .u32(FIRST_SLIDE_ID)
        .u16(0)
        .u8(0)
        .u8(3)
        .u32(last_edit)
        .u32(directory)
        .u32(DOCUMENT_PERSIST_ID)
        .u32(0x40)
        .u16(1)
        .u16(0);
    if let Some(id) = encrypt_session {
        body = body.u32(id);
    }
    atom(0, 0, code::USER_EDIT_ATOM, &body.build())
}

/// `PersistDirectoryAtom` with one single-id entry per `(id, offset)`.
#[must_use]
pub fn persist_directory(entries: &[(u32, u32)]) -> Vec<u8> {
    let mut body = Body::new();
    for &(persist_id, offset) in entries {
        body = body.u32((1 << 20) | persist_id).u32(offset);
    }
    atom(0, 0, code::PERSIST_DIRECTORY_ATOM, &body.build())
}

/// `CurrentUserAtom` with both the 8-bit and the Unicode user name.
#[must_use]
pub fn current_user(offset_to_current_edit: u32, user: &str, encrypted: bool) -> Vec<u8> {
    let len = u16::try_from(user.len()).expect("user name fits in u16");
    let body = Body::new()
        .u32(0x14)
        .u32(if encrypted { ENCRYPTED_TOKEN } else { PLAIN_TOKEN })
        .u32(offset_to_current_edit)
        .u16(len)
        .u16(0x03F4)
        .u8(3)
        .u8(0)
        .u16(0)
        .bytes(user.as_bytes())
        .u32(8)
        .utf16(user)
        .build();
    atom(0, 0, code::CURRENT_USER_ATOM, &body)
}

// ── Streams ───────────────────────────────────────────────────────────────────

/// The two streams of a presentation, grown one save at a time.
#[derive(Clone, Debug)]
pub struct Streams {
    pub current_user: Vec<u8>,
    pub document: Vec<u8>,
    user: String,
    current_edit: u32,
}

impl Streams {
    #[must_use]
    pub fn new(user: &str) -> Self {
        Self {
            current_user: current_user(0, user, false),
            document: Vec::new(),
            user: user.to_owned(),
            current_edit: 0,
        }
    }

    /// Offset of the newest `UserEditAtom`.
    #[must_use]
    pub fn current_edit(&self) -> u32 {
        self.current_edit
    }

    /// Append one save: `objects` as persist objects, their directory, and
    /// a user edit chained to the previous one. The current user is
    /// repointed at the new edit.
    pub fn save(&mut self, objects: &[(u32, Vec<u8>)]) {
        let mut entries = Vec::with_capacity(objects.len());
        for (persist_id, record) in objects {
            entries.push((*persist_id, u32_len(&self.document)));
            self.document.extend_from_slice(record);
        }
        let directory = u32_len(&self.document);
        self.document.extend(persist_directory(&entries));
        let edit = u32_len(&self.document);
        self.document
            .extend(user_edit(self.current_edit, directory, None));
        self.current_edit = edit;
        self.current_user = current_user(edit, &self.user, false);
    }

    /// Append raw bytes without touching the edit chain.
    pub fn append_raw(&mut self, bytes: &[u8]) -> u32 {
        let offset = u32_len(&self.document);
        self.document.extend_from_slice(bytes);
        offset
    }

    /// Point the current user at an arbitrary edit offset.
    pub fn point_current_user_at(&mut self, offset: u32, encrypted: bool) {
        self.current_edit = offset;
        self.current_user = current_user(offset, &self.user, encrypted);
    }

    #[must_use]
    pub fn memory(&self) -> MemoryStreams {
        MemoryStreams::presentation(self.current_user.clone(), self.document.clone())
    }
}

// ── Presentation builder ──────────────────────────────────────────────────────

/// Builder for a single-save presentation.
///
/// ```rust
/// use ppt_decoder::PresentationDecoder;
/// use ppt_tests::PresentationBuilder;
///
/// let streams = PresentationBuilder::new()
///     .slide(&["Title", "Body text"])
///     .slide(&["Second"])
///     .build();
/// let presentation = PresentationDecoder::decode(&streams.memory()).unwrap();
/// assert_eq!(presentation.slides.len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct PresentationBuilder {
    user: String,
    slides: Vec<Vec<String>>,
    notes: bool,
}

impl Default for PresentationBuilder {
    fn default() -> Self {
        Self {
            user: "author".to_owned(),
            slides: Vec::new(),
            notes: false,
        }
    }
}

impl PresentationBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn user(mut self, user: &str) -> Self {
        self.user = user.to_owned();
        self
    }

    /// Add a slide. The first text is its title, the rest body text.
    #[must_use]
    pub fn slide(mut self, texts: &[&str]) -> Self {
        self.slides
            .push(texts.iter().map(|&t| t.to_owned()).collect());
        self
    }

    /// Give every slide a notes page, plus a notes master.
    #[must_use]
    pub fn with_notes(mut self) -> Self {
        self.notes = true;
        self
    }

    /// Persist id of slide `index`.
    #[must_use]
    pub fn slide_persist_id(index: usize) -> u32 {
        MASTER_PERSIST_ID + 1 + u32::try_from(index).expect("slide index fits in u32")
    }

    #[must_use]
    pub fn slide_id(index: usize) -> u32 {
        FIRST_SLIDE_ID + u32::try_from(index).expect("slide index fits in u32")
    }

    fn notes_master_persist_id(&self) -> u32 {
        Self::slide_persist_id(self.slides.len())
    }

    fn notes_persist_id(&self, index: usize) -> u32 {
        self.notes_master_persist_id() + 1 + u32::try_from(index).expect("index fits in u32")
    }

    /// The `DocumentContainer` record alone.
    #[must_use]
    pub fn document(&self) -> Vec<u8> {
        let notes_master = if self.notes {
            self.notes_master_persist_id()
        } else {
            0
        };
        let mut children = vec![
            document_atom(notes_master),
            text_info(),
            drawing_group(),
            container(
                code::SLIDE_LIST_WITH_TEXT,
                1,
                &[slide_persist(MASTER_PERSIST_ID, MASTER_SLIDE_ID, 0)],
            ),
        ];
        if !self.slides.is_empty() {
            let entries: Vec<Vec<u8>> = self
                .slides
                .iter()
                .enumerate()
                .map(|(i, texts)| {
                    slide_list_entry(Self::slide_persist_id(i), Self::slide_id(i), texts)
                })
                .collect();
            children.push(container(code::SLIDE_LIST_WITH_TEXT, 0, &entries));
        }
        if self.notes && !self.slides.is_empty() {
            let entries: Vec<Vec<u8>> = (0..self.slides.len())
                .map(|i| slide_persist(self.notes_persist_id(i), Self::slide_id(i), 0))
                .collect();
            children.push(container(code::SLIDE_LIST_WITH_TEXT, 2, &entries));
        }
        children.push(atom(0, 0, code::END_DOCUMENT_ATOM, &[]));
        container(code::DOCUMENT, 0, &children)
    }

    /// Every persist object of the presentation, by persist id.
    #[must_use]
    pub fn objects(&self) -> Vec<(u32, Vec<u8>)> {
        let mut objects = vec![
            (DOCUMENT_PERSIST_ID, self.document()),
            (MASTER_PERSIST_ID, main_master()),
        ];
        for i in 0..self.slides.len() {
            let notes_id = if self.notes { Self::slide_id(i) } else { 0 };
            objects.push((Self::slide_persist_id(i), slide(notes_id)));
        }
        if self.notes {
            objects.push((self.notes_master_persist_id(), notes(0)));
            for i in 0..self.slides.len() {
                objects.push((self.notes_persist_id(i), notes(Self::slide_id(i))));
            }
        }
        objects
    }

    /// Both streams, written as a single save.
    #[must_use]
    pub fn build(&self) -> Streams {
        let mut streams = Streams::new(&self.user);
        streams.save(&self.objects());
        streams
    }
}
