//! Sample stream generator.
//!
//! Writes the two streams of a few small presentations under `samples/`,
//! one directory per sample, as raw `current_user.bin` and `document.bin`
//! files. They are the inputs the `pptrec` CLI reads, so the CLI can be
//! tried without an OLE extractor.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin generate_sample -p ppt-tests
//! pptrec outline --current-user samples/basic/current_user.bin \
//!                --document samples/basic/document.bin
//! ```
//!
//! # Generated samples
//!
//! | Directory      | Contents                                          |
//! |----------------|---------------------------------------------------|
//! | basic          | Three slides with title and body text             |
//! | with_notes     | Two slides, a notes master and two notes pages    |
//! | two_saves      | Second save rewrites slide 2 with a name          |
//! | encrypted      | Current user token marks the document encrypted   |
//! | edit_cycle     | Newest edit points back at itself                 |

#![allow(clippy::pedantic)]

use std::path::Path;

use ppt_records::record_type::code;
use ppt_records::slide::SLIDE_NAME_INSTANCE;
use ppt_tests::{
    Body, MASTER_SLIDE_ID, PresentationBuilder, Streams, atom, color_scheme, container, drawing,
    persist_directory, slide_atom, user_edit,
};

fn main() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let samples = manifest_dir.join("samples");

    generate_basic(&samples);
    generate_with_notes(&samples);
    generate_two_saves(&samples);
    generate_encrypted(&samples);
    generate_edit_cycle(&samples);

    println!("All samples written to {}", samples.display());
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn write_file(path: &Path, data: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create_dir_all");
    }
    std::fs::write(path, data).expect("write_file");
    println!("  wrote {}", path.display());
}

fn write_streams(dir: &Path, streams: &Streams) {
    write_file(&dir.join("current_user.bin"), &streams.current_user);
    write_file(&dir.join("document.bin"), &streams.document);
}

// ── Sample generators ─────────────────────────────────────────────────────────

fn generate_basic(samples: &Path) {
    let streams = PresentationBuilder::new()
        .user("Sample Author")
        .slide(&["Project kickoff", "Goals\rTimeline\rOwners"])
        .slide(&["Timeline", "Design in March\rBuild in April"])
        .slide(&["Questions?"])
        .build();
    write_streams(&samples.join("basic"), &streams);
}

fn generate_with_notes(samples: &Path) {
    let streams = PresentationBuilder::new()
        .slide(&["Welcome"])
        .slide(&["Summary", "Shipped on time"])
        .with_notes()
        .build();
    write_streams(&samples.join("with_notes"), &streams);
}

fn generate_two_saves(samples: &Path) {
    let mut streams = PresentationBuilder::new()
        .slide(&["First"])
        .slide(&["Second"])
        .build();
    let renamed = container(
        code::SLIDE,
        0,
        &[
            slide_atom(MASTER_SLIDE_ID, 0),
            drawing(),
            color_scheme(),
            atom(
                0,
                SLIDE_NAME_INSTANCE,
                code::CSTRING,
                &Body::new().utf16("Renamed").build(),
            ),
        ],
    );
    streams.save(&[(PresentationBuilder::slide_persist_id(1), renamed)]);
    write_streams(&samples.join("two_saves"), &streams);
}

fn generate_encrypted(samples: &Path) {
    let mut streams = PresentationBuilder::new().slide(&["Confidential"]).build();
    let edit = streams.current_edit();
    streams.point_current_user_at(edit, true);
    write_streams(&samples.join("encrypted"), &streams);
}

fn generate_edit_cycle(samples: &Path) {
    let mut streams = PresentationBuilder::new().slide(&["Loop"]).build();
    let directory = streams.append_raw(&persist_directory(&[(1, 0)]));
    let edit = u32::try_from(streams.document.len()).expect("sample fits in u32");
    streams.append_raw(&user_edit(edit, directory, None));
    streams.point_current_user_at(edit, false);
    write_streams(&samples.join("edit_cycle"), &streams);
}
