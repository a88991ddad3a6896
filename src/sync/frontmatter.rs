//! Hugo front matter and attachment link normalization.
//!
//! Every note in the site tree gets a YAML block with `title` and `date`:
//! ```markdown
//! ---
//! title: My Note
//! date: 2024-05-01
//! ---
//!
//! Note content here...
//! ```
//!
//! A leading block that parses as a YAML mapping is kept and only gains the
//! missing keys, so repeated runs converge. Anything else (a thematic break,
//! prose between rules) gets a fresh block prepended. Links into the vault's
//! `assets/` folder are rewritten to site-root paths
//! (`assets/img.png` -> `/img.png`) everywhere except code.

use std::borrow::Cow;
use std::fs;
use std::io;
use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;

use chrono::{DateTime, Local};
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use serde_yaml::{Mapping, Value};
use tracing::debug;
use walkdir::WalkDir;

use super::index::is_markdown;
use crate::error::Error;

/// Attachment prefix used by vault links.
pub const ASSET_PREFIX: &str = "assets/";

/// Link targets starting with `assets/` (or `./assets/`). The `lead` group
/// is kept, the prefix becomes `/`.
static ASSET_LINK_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // [text](assets/..) and ![alt](assets/..), optionally <angle> wrapped
        r"(?P<lead>\]\(\s*<?)(?:\./)?assets/",
        // [id]: assets/..
        r"(?m)^(?P<lead>[ \t]{0,3}\[[^\]\n]+\]:[ \t]*<?)(?:\./)?assets/",
        // [[assets/..]] and ![[assets/..]]
        r"(?P<lead>\[\[)(?:\./)?assets/",
        // src="assets/.." and href='assets/..'
        r#"(?P<lead>\b(?:src|href)\s*=\s*["']?)(?:\./)?assets/"#,
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("asset link pattern is valid"))
    .collect()
});

/// Existing front matter split from the rest of a note.
struct FrontMatter<'a> {
    /// Lines between the delimiters, each ending in a newline.
    block: &'a [u8],
    /// Everything after the closing delimiter line.
    body: &'a [u8],
}

/// Split a leading `---` ... `---` block off `content`.
fn split_front_matter(content: &[u8]) -> Option<FrontMatter<'_>> {
    let rest = content
        .strip_prefix(b"---\n")
        .or_else(|| content.strip_prefix(b"---\r\n"))?;

    let mut offset = 0;
    for line in rest.split_inclusive(|b| *b == b'\n') {
        if line.trim_ascii_end() == b"---" {
            return Some(FrontMatter {
                block: &rest[..offset],
                body: &rest[offset + line.len()..],
            });
        }
        offset += line.len();
    }
    None
}

/// Parse a front matter block as a YAML mapping. An empty block counts as
/// an empty mapping.
fn parse_mapping(block: &[u8]) -> Option<Mapping> {
    let text = std::str::from_utf8(block).ok()?;
    match serde_yaml::from_str::<Value>(text).ok()? {
        Value::Mapping(mapping) => Some(mapping),
        Value::Null => Some(Mapping::new()),
        _ => None,
    }
}

/// `title` and `date` first (when missing), then the existing entries.
fn with_defaults(existing: Mapping, title: &str, date: &str) -> Mapping {
    let mut merged = Mapping::new();
    if !existing.contains_key("title") {
        merged.insert(Value::from("title"), Value::from(title));
    }
    if !existing.contains_key("date") {
        merged.insert(Value::from("date"), Value::from(date));
    }
    merged.extend(existing);
    merged
}

/// Build the header block for a note without front matter.
pub fn header(title: &str, date: &str) -> Result<String, Error> {
    let yaml = serde_yaml::to_string(&with_defaults(Mapping::new(), title, date))?;
    Ok(format!("---\n{}---\n\n", yaml))
}

/// Apply front matter and link rewriting to a note's bytes.
///
/// Bodies that aren't UTF-8 keep their bytes as-is; only the header changes.
pub fn normalize(content: &[u8], title: &str, date: &str) -> Result<Vec<u8>, Error> {
    let existing = split_front_matter(content)
        .and_then(|front| parse_mapping(front.block).map(|mapping| (front, mapping)));

    let (mut out, body) = match existing {
        Some((front, mapping)) if mapping.contains_key("title") && mapping.contains_key("date") => {
            let header_len = content.len() - front.body.len();
            (content[..header_len].to_vec(), front.body)
        }
        Some((front, mapping)) => {
            let yaml = serde_yaml::to_string(&with_defaults(mapping, title, date))?;
            (format!("---\n{}---\n", yaml).into_bytes(), front.body)
        }
        None => (header(title, date)?.into_bytes(), content),
    };

    match std::str::from_utf8(body) {
        Ok(text) => out.extend_from_slice(rewrite_asset_links(text).as_bytes()),
        Err(_) => {
            debug!("Note body is not UTF-8, leaving links as-is");
            out.extend_from_slice(body);
        }
    }
    Ok(out)
}

/// Byte ranges of fenced/indented code blocks and inline code spans.
fn code_ranges(body: &str) -> Vec<Range<usize>> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TASKLISTS);
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TABLES);

    let mut excluded = Vec::new();
    let mut code_block_start = 0;

    for (event, range) in Parser::new_ext(body, opts).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(_)) => code_block_start = range.start,
            Event::End(TagEnd::CodeBlock) => excluded.push(code_block_start..range.end),
            Event::Code(_) => excluded.push(range),
            _ => {}
        }
    }

    excluded
}

/// Rewrite `assets/` link targets to `/`, leaving code untouched.
pub fn rewrite_asset_links(body: &str) -> Cow<'_, str> {
    if !body.contains(ASSET_PREFIX) {
        return Cow::Borrowed(body);
    }

    let excluded = code_ranges(body);
    let in_code = |offset: usize| excluded.iter().any(|range| range.contains(&offset));

    let mut edits: Vec<Range<usize>> = ASSET_LINK_PATTERNS
        .iter()
        .flat_map(|pattern| pattern.captures_iter(body))
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let lead = caps.name("lead")?;
            (!in_code(whole.start())).then(|| lead.end()..whole.end())
        })
        .collect();

    if edits.is_empty() {
        return Cow::Borrowed(body);
    }

    edits.sort_by_key(|edit| edit.start);
    edits.dedup_by(|next, kept| next.start < kept.end);

    let mut out = String::with_capacity(body.len());
    let mut cursor = 0;
    for edit in edits {
        out.push_str(&body[cursor..edit.start]);
        out.push('/');
        cursor = edit.end;
    }
    out.push_str(&body[cursor..]);
    Cow::Owned(out)
}

/// Normalize one note in place. Returns whether the file was rewritten.
pub fn normalize_file(path: &Path) -> Result<bool, Error> {
    let wrap = |source: io::Error| Error::Normalize {
        path: path.to_path_buf(),
        source,
    };

    let content = fs::read(path).map_err(wrap)?;
    let modified = fs::metadata(path).and_then(|m| m.modified()).map_err(wrap)?;
    let date = DateTime::<Local>::from(modified).format("%Y-%m-%d").to_string();
    let title = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let normalized = normalize(&content, &title, &date)?;
    if normalized == content {
        return Ok(false);
    }

    fs::write(path, normalized).map_err(wrap)?;
    Ok(true)
}

/// Normalize every note under the site content root.
///
/// Returns the number of files rewritten.
pub fn normalize_tree(content_root: &Path) -> Result<usize, Error> {
    let mut rewritten = 0;

    for entry in WalkDir::new(content_root) {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_markdown(entry.path()) {
            continue;
        }

        if normalize_file(entry.path())? {
            debug!(path = %entry.path().display(), "Normalized note");
            rewritten += 1;
        }
    }

    Ok(rewritten)
}
