//! CLI-guide and admin-guide segmentation.
//!
//! CLI reference chapters hold one `section.body` per command, sub-sectioned
//! by heading (Syntax, Parameters, Default Configuration, Command Mode, User
//! Guidelines, Examples). Admin guides are split into per-article topic/text
//! records. Every record carries the chapter metadata plus a fresh document
//! id.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static META_DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[name="description"]"#).unwrap());
static META_CONCEPT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[name="concept"]"#).unwrap());
static SECTION: LazyLock<Selector> = LazyLock::new(|| Selector::parse("section").unwrap());
static P: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());
static UL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("ul").unwrap());
static LI: LazyLock<Selector> = LazyLock::new(|| Selector::parse("li").unwrap());
static PRE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("pre").unwrap());
static ARTICLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div#chapterContent article.topic, div#chapterContent article.task").unwrap()
});
static ARTICLE_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h2.title, h3.title, h4.title").unwrap());

const CHAPTER_TOC_PREFIX: &str = "This chapter contains the following sections:";

/// Chapter-level metadata stamped onto every record from a page. The title
/// field carries the page's description meta, which names the chapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concept: Option<String>,
    pub doc_id: String,
}

/// A single worked example: prose plus the literal command lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<String>>,
}

/// One CLI command reference entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliCommandRecord {
    pub topic: String,
    pub command_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syntax: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub parameters: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_configuration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_guidelines: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<Example>>,
    #[serde(flatten)]
    pub meta: PageMeta,
}

/// The introduction chapter's prose, kept as an ordered paragraph list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntroRecord {
    pub topic: String,
    pub command_name: String,
    pub description: Vec<String>,
    #[serde(flatten)]
    pub meta: PageMeta,
}

/// Everything a CLI guide page can yield.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GuideRecord {
    Command(Box<CliCommandRecord>),
    Introduction(IntroRecord),
}

/// One admin-guide article: its heading and full sanitized text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub topic: String,
    pub text: String,
    #[serde(flatten)]
    pub meta: PageMeta,
}

/// Collapse whitespace and strip formatting noise: backslashes go away,
/// prompt hashes become spaces, runs of a repeated punctuation character
/// collapse to one.
pub fn sanitize_text(text: &str) -> String {
    let collapsed = WS_RE.replace_all(text.trim(), " ");
    let cleaned = collapsed.replace('\\', "").replace('#', " ");
    let mut out = String::with_capacity(cleaned.len());
    let mut prev: Option<char> = None;
    for c in cleaned.chars() {
        if Some(c) == prev && !c.is_alphanumeric() && !c.is_whitespace() && c != '_' {
            continue;
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

fn raw_text(el: ElementRef) -> String {
    el.text().collect()
}

fn has_class(el: ElementRef, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

fn meta_content<'a>(doc: &'a Html, sel: &Selector) -> Option<&'a str> {
    doc.select(sel).next().map(|m| m.value().attr("content").unwrap_or(""))
}

/// Chapter metadata for one page: description meta as the title, document
/// language, concept meta, and a fresh v4 id per record.
pub fn build_metadata(doc: &Html, url: &str) -> PageMeta {
    PageMeta {
        source: url.to_string(),
        title: meta_content(doc, &META_DESCRIPTION).map(str::to_string),
        language: doc
            .root_element()
            .value()
            .attr("lang")
            .map(str::to_string),
        concept: meta_content(doc, &META_CONCEPT).map(str::to_string),
        doc_id: Uuid::new_v4().to_string(),
    }
}

/// Segment a CLI reference chapter into command records.
///
/// Command bodies are `section.body` elements; each command's name is the
/// text of the nearest preceding element carrying the "title" class, tracked
/// in one forward pass over the document. The chapter whose description meta
/// reads "Introduction" gets prose records instead. A body with neither
/// syntax nor description is dropped.
pub fn parse_cli_guide(doc: &Html, url: &str) -> Vec<GuideRecord> {
    let topic = meta_content(doc, &META_DESCRIPTION)
        .unwrap_or_default()
        .to_string();
    let mut records = Vec::new();
    let mut last_title = String::new();

    for node in doc.root_element().descendants() {
        let Some(el) = ElementRef::wrap(node) else {
            continue;
        };
        if has_class(el, "title") {
            last_title = raw_text(el).trim().to_string();
            continue;
        }
        if el.value().name() != "section" || !has_class(el, "body") {
            continue;
        }
        if raw_text(el).trim_start().starts_with(CHAPTER_TOC_PREFIX) {
            continue;
        }

        if topic == "Introduction" {
            records.push(GuideRecord::Introduction(IntroRecord {
                topic: topic.clone(),
                command_name: last_title.clone(),
                description: intro_paragraphs(el),
                meta: build_metadata(doc, url),
            }));
        } else if let Some(record) =
            command_record(el, &topic, &last_title, build_metadata(doc, url))
        {
            records.push(GuideRecord::Command(Box::new(record)));
        }
    }
    records
}

/// Introduction prose in document order: paragraphs, list items, preformatted
/// lines, anything else as plain text. Blank pieces are dropped.
fn intro_paragraphs(body: ElementRef) -> Vec<String> {
    let mut out = Vec::new();
    for child in body.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "p" => out.push(sanitize_text(&raw_text(child))),
            "ul" => out.extend(child.select(&LI).map(|li| sanitize_text(&raw_text(li)))),
            "pre" => out.extend(
                raw_text(child)
                    .split('\n')
                    .map(sanitize_text)
                    .collect::<Vec<_>>(),
            ),
            _ => out.push(sanitize_text(&raw_text(child))),
        }
    }
    out.retain(|s| !s.is_empty());
    out
}

/// True when any text fragment of the section starts with `label`.
fn section_labeled(el: ElementRef, label: &str, case_insensitive: bool) -> bool {
    el.text().any(|t| {
        let t = t.trim_start();
        if case_insensitive {
            t.to_lowercase().starts_with(&label.to_lowercase())
        } else {
            t.starts_with(label)
        }
    })
}

fn first_p_text(el: ElementRef) -> Option<String> {
    el.select(&P).next().map(raw_text)
}

fn all_p_texts(el: ElementRef) -> Vec<String> {
    el.select(&P).map(raw_text).collect()
}

fn command_record(
    body: ElementRef,
    topic: &str,
    command_name: &str,
    meta: PageMeta,
) -> Option<CliCommandRecord> {
    let mut description: Option<String> = None;
    let mut syntax: Option<Vec<String>> = None;
    let mut parameters: Vec<String> = Vec::new();
    let mut default_configuration: Option<String> = None;
    let mut command_mode: Option<String> = None;
    let mut user_guidelines: Option<String> = None;
    let mut examples: Option<Vec<Example>> = None;
    let mut seen_parameters: HashSet<String> = HashSet::new();

    for (i, sub) in body.select(&SECTION).enumerate() {
        if i == 0 {
            description = Some(sanitize_text(&raw_text(sub)));
        } else if section_labeled(sub, "Syntax", true) {
            syntax = Some(
                all_p_texts(sub)
                    .iter()
                    .map(|t| sanitize_text(t))
                    .collect(),
            );
        } else if section_labeled(sub, "Parameters", true) {
            if let Some(p) = first_p_text(sub) {
                let trimmed = p.trim().to_string();
                if seen_parameters.insert(trimmed.clone()) {
                    parameters = vec![trimmed];
                }
            }
            if let Some(ul) = sub.select(&UL).next() {
                for li in ul.select(&LI) {
                    let trimmed = raw_text(li).trim().to_string();
                    if seen_parameters.insert(trimmed.clone()) {
                        parameters.push(trimmed);
                    }
                }
            }
        } else if section_labeled(sub, "Default Configuration", false) {
            let text = first_p_text(sub).unwrap_or_else(|| raw_text(sub));
            default_configuration = Some(sanitize_text(&text));
        } else if section_labeled(sub, "Command Mode", false) {
            let text = first_p_text(sub).unwrap_or_else(|| raw_text(sub));
            command_mode = Some(sanitize_text(&text));
        } else if section_labeled(sub, "User Guidelines", false) {
            let ps = all_p_texts(sub);
            let text = if ps.is_empty() {
                raw_text(sub)
            } else {
                ps.join(" ")
            };
            user_guidelines = Some(sanitize_text(&text));
        } else if section_labeled(sub, "Example", false) {
            examples = Some(vec![parse_example(sub)]);
        }
    }

    let no_syntax = syntax.as_ref().map(Vec::is_empty).unwrap_or(true);
    let no_description = description.as_deref().map(str::is_empty).unwrap_or(true);
    if no_syntax && no_description {
        return None;
    }

    Some(CliCommandRecord {
        topic: topic.to_string(),
        command_name: command_name.to_string(),
        description,
        syntax,
        parameters: parameters.iter().map(|p| sanitize_text(p)).collect(),
        default_configuration,
        command_mode,
        user_guidelines,
        examples,
        meta,
    })
}

/// An Examples sub-section: first paragraph as prose, list items and
/// preformatted lines as literal command lines.
fn parse_example(sub: ElementRef) -> Example {
    let description = first_p_text(sub).map(|t| sanitize_text(&t));
    let mut commands: Vec<String> = Vec::new();
    let mut saw_block = false;
    if let Some(ul) = sub.select(&UL).next() {
        saw_block = true;
        commands.extend(ul.select(&LI).map(|li| raw_text(li).trim().to_string()));
    }
    if let Some(pre) = sub.select(&PRE).next() {
        saw_block = true;
        commands.extend(raw_text(pre).split('\n').map(|l| l.trim().to_string()));
    }
    commands.retain(|c| !c.is_empty());
    Example {
        description,
        commands: saw_block.then_some(commands),
    }
}

/// Split an admin-guide chapter into per-article records. Articles live
/// under `div#chapterContent` with the topic or task class; the article's
/// first title heading names it.
pub fn parse_admin_guide(doc: &Html, url: &str) -> Vec<ArticleRecord> {
    let mut records = Vec::new();
    for article in doc.select(&ARTICLE) {
        let text = sanitize_text(&raw_text(article));
        if text == CHAPTER_TOC_PREFIX {
            continue;
        }
        let topic = article
            .select(&ARTICLE_TITLE)
            .next()
            .map(|t| sanitize_text(&raw_text(t)))
            .unwrap_or_default();
        records.push(ArticleRecord {
            topic,
            text,
            meta: build_metadata(doc, url),
        });
    }
    records
}
