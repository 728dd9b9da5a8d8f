/// Implementation of `pptrec outline`.
///
/// Prints the text the slide list stores for each slide: titles, body
/// placeholders and other outline text, one indented line per text group.
///
/// ```text
/// Slide 1 (id 256, persist 3)
///   Quarterly review
///   Revenue up, costs flat
/// Slide 2 (id 257, persist 4)
///   (no text)
/// ```
use anyhow::{Context, Result};
use ppt_decoder::{DecoderConfig, PresentationDecoder, SlideOutline};

use crate::PresentationArgs;
use crate::streams;

/// Run the `pptrec outline` command.
///
/// # Errors
///
/// Returns an error if a stream cannot be read or the presentation is
/// corrupted.
pub fn run(args: &PresentationArgs, config: &DecoderConfig) -> Result<()> {
    let streams = streams::load(args)?;
    let config = DecoderConfig {
        decode_notes: false,
        ..*config
    };
    let presentation = PresentationDecoder::decode_with_config(&streams, &config)
        .with_context(|| format!("failed to decode {}", args.document.display()))?;

    for (index, slide) in presentation.outline().iter().enumerate() {
        for line in slide_lines(index + 1, slide) {
            println!("{line}");
        }
    }
    Ok(())
}

fn slide_lines(number: usize, slide: &SlideOutline) -> Vec<String> {
    let mut lines = vec![format!(
        "Slide {number} (id {}, persist {})",
        slide.slide_id, slide.persist_id
    )];
    if slide.texts.is_empty() {
        lines.push("  (no text)".to_string());
    }
    for text in &slide.texts {
        // Paragraphs are separated by carriage returns.
        for paragraph in text.split('\r') {
            lines.push(format!("  {paragraph}"));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_get_their_own_line() {
        let slide = SlideOutline {
            persist_id: 3,
            slide_id: 256,
            texts: vec!["Title".to_string(), "one\rtwo".to_string()],
        };
        assert_eq!(
            slide_lines(1, &slide),
            vec![
                "Slide 1 (id 256, persist 3)",
                "  Title",
                "  one",
                "  two"
            ]
        );
    }

    #[test]
    fn slide_without_text() {
        let slide = SlideOutline {
            persist_id: 4,
            slide_id: 257,
            texts: vec![],
        };
        assert_eq!(slide_lines(2, &slide)[1], "  (no text)");
    }
}
