//! Link rewriting for notes moved into the Zola page hierarchy.
//!
//! Zola serves every page under its section path, so a link that was
//! relative to the note's folder in the vault has to become site-absolute.
//! The rewrite happens per line in a fixed order:
//!
//! 1. `[label](target)` gets the note's base path prepended and loses a
//!    trailing `.md`, keeping any `#fragment`.
//! 2. A rewritten link that points back at the note itself collapses to its
//!    fragment.
//! 3. A trailing block id (` ^id`) becomes an HTML anchor.
//! 4. The last breadcrumb label on the line (`[Note > Heading]`) keeps only
//!    its last part.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::path::{Component, Path};

static LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\[.+?\])\((.+?)\)").unwrap());

static SCHEME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z][A-Za-z0-9+.\-]*://|(?i:mailto|tel|data):)").unwrap()
});

static BLOCK_ANCHOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s\^([\w-]+)\s*$").unwrap());

static BREADCRUMB_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\[\]]+>\s*([^\[\]>]+)\]").unwrap());

const MARKDOWN_EXTENSION: &str = ".md";

/// Site path of a directory relative to the content root: one `/`-prefixed
/// segment per component, spaces escaped as `%20`. Empty for the root.
///
/// # Examples
///
/// ```
/// use obsidian_zola::base_path;
/// use std::path::Path;
///
/// assert_eq!(base_path(Path::new("Projects/Side work")), "/Projects/Side%20work");
/// assert_eq!(base_path(Path::new("")), "");
/// ```
#[must_use]
pub fn base_path(relative_dir: &Path) -> String {
    relative_dir
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .map(|component| {
            format!(
                "/{}",
                component.as_os_str().to_string_lossy().replace(' ', "%20")
            )
        })
        .collect()
}

/// Rewrites the links of a single note.
#[derive(Debug, Clone)]
pub struct LinkRewriter {
    base: String,
    self_page: String,
}

impl LinkRewriter {
    /// Creates a rewriter for a note with the given base path and file stem.
    #[must_use]
    pub fn new(base: impl Into<String>, note_stem: &str) -> Self {
        let base = base.into();
        let self_page = format!("{base}/{}", urlencoding::encode(note_stem));
        Self { base, self_page }
    }

    /// Creates a rewriter for the note at `note_path` inside `content_dir`.
    #[must_use]
    pub fn for_note(content_dir: &Path, note_path: &Path) -> Self {
        let parent = note_path.parent().unwrap_or(content_dir);
        let relative = pathdiff::diff_paths(parent, content_dir).unwrap_or_default();
        let stem = note_path
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();

        Self::new(base_path(&relative), &stem)
    }

    /// Base path prepended to relative targets.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Rewrites every line of `text`.
    ///
    /// # Examples
    ///
    /// ```
    /// use obsidian_zola::LinkRewriter;
    ///
    /// let rewriter = LinkRewriter::new("/garden", "Roses");
    /// assert_eq!(
    ///     rewriter.rewrite("[Tulips](Tulips.md#care) [Top](Roses.md#top)"),
    ///     "[Tulips](/garden/Tulips#care) [Top](#top)"
    /// );
    /// ```
    #[must_use]
    pub fn rewrite(&self, text: &str) -> String {
        text.split('\n')
            .map(|line| self.rewrite_line(line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn rewrite_line(&self, line: &str) -> String {
        let line = LINK_RE.replace_all(line, |caps: &Captures<'_>| {
            let target = &caps[2];
            if is_external(target) || target.starts_with('#') {
                caps[0].to_string()
            } else {
                format!("{}({})", &caps[1], self.rewrite_target(target))
            }
        });
        let line = BLOCK_ANCHOR_RE.replace(&line, r#" <span id="${1}">^${1}</span>"#);
        collapse_breadcrumb(&line)
    }

    /// Rewrites a single relative link target.
    ///
    /// The `.md` extension is dropped from the path part; the fragment is
    /// kept. A target that resolves to this note and carries a fragment is
    /// reduced to the fragment.
    #[must_use]
    pub fn rewrite_target(&self, target: &str) -> String {
        let (path, fragment) = target
            .find('#')
            .map_or((target, ""), |index| target.split_at(index));
        let path = path.strip_suffix(MARKDOWN_EXTENSION).unwrap_or(path);

        let page = format!("{}/{path}", self.base);
        if !fragment.is_empty() && page == self.self_page {
            return fragment.to_string();
        }
        page + fragment
    }
}

// Only the last breadcrumb on a line is collapsed.
fn collapse_breadcrumb(line: &str) -> String {
    let Some(caps) = BREADCRUMB_RE.captures_iter(line).last() else {
        return line.to_string();
    };
    let Some(whole) = caps.get(0) else {
        return line.to_string();
    };
    format!("{}[{}]{}", &line[..whole.start()], &caps[1], &line[whole.end()..])
}

fn is_external(target: &str) -> bool {
    target.starts_with("http") || SCHEME_RE.is_match(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewriter() -> LinkRewriter {
        LinkRewriter::for_note(Path::new("/site/content"), Path::new("/site/content/dir/sub/Note.md"))
    }

    #[test]
    fn test_base_path_from_note_location() {
        assert_eq!(rewriter().base(), "/dir/sub");

        let root_note =
            LinkRewriter::for_note(Path::new("/site/content"), Path::new("/site/content/Top.md"));
        assert_eq!(root_note.base(), "");
    }

    #[test]
    fn test_base_path_escapes_spaces() {
        let spaced = LinkRewriter::for_note(
            Path::new("/site/content"),
            Path::new("/site/content/My Notes/Daily Log/today.md"),
        );
        assert_eq!(spaced.base(), "/My%20Notes/Daily%20Log");
    }

    #[test]
    fn test_prefixes_relative_links() {
        assert_eq!(rewriter().rewrite("[x](target)"), "[x](/dir/sub/target)");
    }

    #[test]
    fn test_root_note_links_are_site_absolute() {
        let root_note = LinkRewriter::new("", "Top");
        assert_eq!(root_note.rewrite("[b](Other.md)"), "[b](/Other)");
    }

    #[test]
    fn test_strips_extension_preserving_fragment() {
        assert_eq!(
            rewriter().rewrite("[x](target.md#frag)"),
            "[x](/dir/sub/target#frag)"
        );
        assert_eq!(rewriter().rewrite("[x](target.md)"), "[x](/dir/sub/target)");
    }

    #[test]
    fn test_absolute_urls_untouched() {
        let lines = [
            "[x](https://example.com/y)",
            "[x](http://example.com/page.md#top)",
            "[mail](mailto:me@example.com)",
        ];
        for line in lines {
            assert_eq!(rewriter().rewrite(line), line);
        }
    }

    #[test]
    fn test_fragment_only_link_untouched() {
        assert_eq!(rewriter().rewrite("[x](#local)"), "[x](#local)");
    }

    #[test]
    fn test_same_page_link_collapses_to_fragment() {
        assert_eq!(rewriter().rewrite("[x](Note#frag)"), "[x](#frag)");
        assert_eq!(rewriter().rewrite("[x](Note.md#frag)"), "[x](#frag)");
    }

    #[test]
    fn test_same_page_link_without_fragment_keeps_path() {
        assert_eq!(rewriter().rewrite("[x](Note.md)"), "[x](/dir/sub/Note)");
    }

    #[test]
    fn test_same_page_detection_uses_encoded_stem() {
        let spaced = LinkRewriter::new("/dir", "My Note");
        assert_eq!(spaced.rewrite("[x](My%20Note.md#part)"), "[x](#part)");
        assert_eq!(spaced.rewrite("[x](Other%20Note.md#part)"), "[x](/dir/Other%20Note#part)");
    }

    #[test]
    fn test_several_links_on_one_line() {
        assert_eq!(
            rewriter().rewrite("see [a](a.md) and [b](https://b.example) then [c](c.md#d)"),
            "see [a](/dir/sub/a) and [b](https://b.example) then [c](/dir/sub/c#d)"
        );
    }

    #[test]
    fn test_image_embeds_are_prefixed() {
        assert_eq!(
            rewriter().rewrite("![diagram](assets/flow.png)"),
            "![diagram](/dir/sub/assets/flow.png)"
        );
    }

    #[test]
    fn test_block_reference_anchor() {
        assert_eq!(
            rewriter().rewrite("An important claim ^claim-1"),
            r#"An important claim <span id="claim-1">^claim-1</span>"#
        );
    }

    #[test]
    fn test_caret_mid_line_is_not_an_anchor() {
        let line = "x ^2 is not a block id here";
        assert_eq!(rewriter().rewrite(line), line);
    }

    #[test]
    fn test_breadcrumb_label_collapses() {
        assert_eq!(
            rewriter().rewrite("[Other > Setup](Other.md#setup)"),
            "[Setup](/dir/sub/Other#setup)"
        );
        assert_eq!(
            rewriter().rewrite("[Guide > Part > Step](Guide.md#step)"),
            "[Step](/dir/sub/Guide#step)"
        );
    }

    #[test]
    fn test_breadcrumb_on_same_page_link() {
        assert_eq!(rewriter().rewrite("[Note > Intro](Note.md#intro)"), "[Intro](#intro)");
    }

    #[test]
    fn test_breadcrumb_multi_link_line() {
        assert_eq!(
            rewriter().rewrite("[A > b](x.md) and [C > d](y.md)"),
            "[A > b](/dir/sub/x) and [d](/dir/sub/y)"
        );
    }

    #[test]
    fn test_every_same_page_link_on_a_line_collapses() {
        assert_eq!(
            rewriter().rewrite("[x](Note.md#h) more [y](Note.md#k)"),
            "[x](#h) more [y](#k)"
        );
    }

    #[test]
    fn test_colon_in_relative_target_is_not_a_scheme() {
        assert_eq!(
            rewriter().rewrite("[m](Meeting: notes.md)"),
            "[m](/dir/sub/Meeting: notes)"
        );
        assert_eq!(rewriter().rewrite("[t](tel:+123)"), "[t](tel:+123)");
        assert_eq!(rewriter().rewrite("[f](ftp://host/file)"), "[f](ftp://host/file)");
    }

    #[test]
    fn test_lines_are_rewritten_independently() {
        let text = "[a](a.md)\nplain\nclaim ^id";
        assert_eq!(
            rewriter().rewrite(text),
            "[a](/dir/sub/a)\nplain\nclaim <span id=\"id\">^id</span>"
        );
    }

    #[test]
    fn test_text_without_links_untouched() {
        let text = "No links, just [brackets] and (parens).";
        assert_eq!(rewriter().rewrite(text), text);
    }
}
