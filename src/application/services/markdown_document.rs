//! Markdown image extraction and in-place rewriting.
//!
//! The document is parsed once into an arena-backed AST. Extraction walks the
//! tree in document order; rewriting mutates image nodes through their
//! `RefCell` and the tree is serialized back with the same dialect options.

use std::panic::{self, AssertUnwindSafe};

use comrak::nodes::{AstNode, NodeValue};
use comrak::{Arena, Options};
use tracing::trace;

use crate::domain::entities::{ImageReference, ReplacementMap};
use crate::domain::errors::RunError;

/// Parsed markdown document bound to an arena owned by the caller.
pub struct MarkdownDocument<'a> {
    root: &'a AstNode<'a>,
    options: Options<'static>,
}

impl std::fmt::Debug for MarkdownDocument<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkdownDocument").finish_non_exhaustive()
    }
}

/// GitHub-flavoured parse and render options.
fn dialect() -> Options<'static> {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.tasklist = true;
    options
}

impl<'a> MarkdownDocument<'a> {
    /// Parses `text` into `arena`.
    ///
    /// # Errors
    /// Returns [`RunError::UnparseableDocument`] if the parser aborts.
    pub fn parse(arena: &'a Arena<AstNode<'a>>, text: &str) -> Result<Self, RunError> {
        let options = dialect();

        let root = panic::catch_unwind(AssertUnwindSafe(|| {
            comrak::parse_document(arena, text, &options)
        }))
        .map_err(|payload| {
            let reason = payload
                .downcast_ref::<&str>()
                .map(ToString::to_string)
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "parser panicked".to_string());
            RunError::unparseable(reason)
        })?;

        Ok(Self { root, options })
    }

    /// Returns every image reference in document order.
    #[must_use]
    pub fn images(&self) -> Vec<ImageReference> {
        self.image_nodes()
            .enumerate()
            .filter_map(|(position, node)| {
                let ast = node.data.borrow();
                match &ast.value {
                    NodeValue::Image(link) => Some(ImageReference::new(
                        position,
                        link.url.clone(),
                        collect_text(node),
                        link.title.clone(),
                    )),
                    _ => None,
                }
            })
            .collect()
    }

    /// Points every image whose URL is a key of `replacements` at the mapped
    /// URL. Alt text and title are untouched. Returns the number of nodes changed.
    pub fn rewrite(&self, replacements: &ReplacementMap) -> usize {
        let mut changed = 0;

        for node in self.image_nodes() {
            let mut ast = node.data.borrow_mut();
            if let NodeValue::Image(link) = &mut ast.value
                && let Some(replacement) = replacements.get(&link.url)
            {
                trace!(from = %link.url, to = %replacement, "Rewriting image node");
                link.url = replacement.to_string();
                changed += 1;
            }
        }

        changed
    }

    /// Serializes the tree back to markdown.
    ///
    /// # Errors
    /// Returns [`RunError::DocumentRender`] if formatting fails.
    pub fn render(&self) -> Result<String, RunError> {
        let mut output = Vec::new();
        comrak::format_commonmark(self.root, &self.options, &mut output)
            .map_err(|e| RunError::render(e.to_string()))?;
        String::from_utf8(output).map_err(|e| RunError::render(e.to_string()))
    }

    fn image_nodes(&self) -> impl Iterator<Item = &'a AstNode<'a>> + use<'a> {
        self.root
            .descendants()
            .filter(|node| matches!(node.data.borrow().value, NodeValue::Image(_)))
    }
}

/// Flattens the inline content under `node` to plain text.
fn collect_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    for child in node.descendants().skip(1) {
        match &child.data.borrow().value {
            NodeValue::Text(t) => text.push_str(t),
            NodeValue::Code(code) => text.push_str(&code.literal),
            NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
            _ => {}
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images_of(text: &str) -> Vec<ImageReference> {
        let arena = Arena::new();
        MarkdownDocument::parse(&arena, text).unwrap().images()
    }

    #[test]
    fn test_empty_document_has_no_images() {
        assert!(images_of("").is_empty());
        assert!(images_of("Just text, a [link](https://github.com/a.png).").is_empty());
    }

    #[test]
    fn test_extracts_in_document_order() {
        let text = "# Title\n\n![first](https://a.test/1.png)\n\n\
                    - item ![second](https://b.test/2.png \"Second\")\n\n\
                    > ![third](https://c.test/3.png)\n";
        let images = images_of(text);

        assert_eq!(images.len(), 3);
        assert_eq!(images[0].url, "https://a.test/1.png");
        assert_eq!(images[0].alt, "first");
        assert_eq!(images[0].title, "");
        assert_eq!(images[1].position, 1);
        assert_eq!(images[1].alt, "second");
        assert_eq!(images[1].title, "Second");
        assert_eq!(images[2].url, "https://c.test/3.png");
    }

    #[test]
    fn test_alt_text_is_flattened() {
        let images = images_of("![a *b* `c`](https://a.test/x.png)");
        assert_eq!(images[0].alt, "a b c");
    }

    #[test]
    fn test_reference_style_image_resolves_url() {
        let images = images_of("![logo][l]\n\n[l]: https://a.test/logo.png \"Logo\"\n");

        assert_eq!(images.len(), 1);
        assert_eq!(images[0].url, "https://a.test/logo.png");
        assert_eq!(images[0].title, "Logo");
    }

    #[test]
    fn test_image_in_code_span_is_ignored() {
        assert!(images_of("`![x](https://a.test/x.png)`").is_empty());
        assert!(images_of("```\n![x](https://a.test/x.png)\n```\n").is_empty());
    }

    #[test]
    fn test_rewrite_replaces_all_occurrences() {
        let arena = Arena::new();
        let text = "![a](https://a.test/x.png) and ![b](https://a.test/x.png \"T\") \
                    and ![c](https://other.test/y.png)";
        let doc = MarkdownDocument::parse(&arena, text).unwrap();

        let replacements: ReplacementMap =
            [("https://a.test/x.png", "https://raw.test/new.webp")].into_iter().collect();
        let changed = doc.rewrite(&replacements);

        assert_eq!(changed, 2);
        let images = doc.images();
        assert_eq!(images[0].url, "https://raw.test/new.webp");
        assert_eq!(images[0].alt, "a");
        assert_eq!(images[1].url, "https://raw.test/new.webp");
        assert_eq!(images[1].title, "T");
        assert_eq!(images[2].url, "https://other.test/y.png");

        let rendered = doc.render().unwrap();
        assert!(rendered.contains("![a](https://raw.test/new.webp)"));
        assert!(rendered.contains("![b](https://raw.test/new.webp \"T\")"));
        assert!(rendered.contains("![c](https://other.test/y.png)"));
        assert!(!rendered.contains("https://a.test/x.png"));
    }

    #[test]
    fn test_rewrite_with_empty_map_changes_nothing() {
        let arena = Arena::new();
        let doc = MarkdownDocument::parse(&arena, "![a](https://a.test/x.png)").unwrap();

        assert_eq!(doc.rewrite(&ReplacementMap::new()), 0);
        assert_eq!(doc.images()[0].url, "https://a.test/x.png");
    }

    #[test]
    fn test_round_trip_preserves_alt_and_title() {
        let text = "Intro\n\n![Screen shot](https://a.test/s.png \"The title\")\n\n\
                    | col |\n| --- |\n| ![cell](https://b.test/c.png) |\n";
        let before = images_of(text);

        let arena = Arena::new();
        let rendered = MarkdownDocument::parse(&arena, text)
            .unwrap()
            .render()
            .unwrap();
        let after = images_of(&rendered);

        assert_eq!(before.len(), after.len());
        for (b, a) in before.iter().zip(&after) {
            assert_eq!(b.url, a.url);
            assert_eq!(b.alt, a.alt);
            assert_eq!(b.title, a.title);
        }
    }

    #[test]
    fn test_render_simple_image() {
        let arena = Arena::new();
        let doc = MarkdownDocument::parse(&arena, "![a](https://a.test/x.png)").unwrap();

        assert_eq!(doc.render().unwrap(), "![a](https://a.test/x.png)\n");
    }
}
