//! # Project Document Verification
//!
//! File: cli/src/project/verify.rs
//!
//! ## Overview
//!
//! Structural checks over the text of a `project.pbxproj`. They run on every
//! generated document before it is written, and on any existing file through
//! `projgen verify`.
//!
//! The document is tokenized once (strings and comments are recognized, so
//! braces inside them do not count) and then checked for:
//!
//! - the `// !$*UTF8*$!` header on the first line
//! - balanced `{}` and `()`, and terminated strings and comments
//! - `/* Begin X section */` markers each closed by a matching `End` marker
//! - object keys that are 24-character uppercase hex and not repeated
//! - exactly one `rootObject`, naming a defined object
//! - every identifier-shaped token resolving to a defined object
//!
//! The checker does not know what each `isa` should contain. It only
//! guarantees that the document parses and holds no dangling references.
//!
use crate::project::ident::is_identifier;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::debug;

pub const HEADER: &str = "// !$*UTF8*$!";

/// Outcome of checking one document.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    /// Number of objects defined under `objects`.
    pub objects: usize,
    /// Number of `Begin`/`End` section pairs.
    pub sections: usize,
    /// Number of identifier references outside object keys.
    pub references: usize,
    pub issues: Vec<String>,
}

impl VerifyReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Word(String),
    Str,
    Punct(char),
}

#[derive(Debug)]
struct Lexed {
    tokens: Vec<(Token, usize)>,
    comments: Vec<(String, usize)>,
}

fn section_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| {
        Regex::new(r"^\s*(Begin|End) ([A-Za-z0-9_]+) section\s*$").expect("valid section regex")
    })
}

/// Runs every check over `text`.
pub fn check_document(text: &str) -> VerifyReport {
    let mut report = VerifyReport::default();

    if text.lines().next() != Some(HEADER) {
        report
            .issues
            .push(format!("Line 1: expected header `{}`", HEADER));
    }

    let lexed = lex(text, &mut report.issues);
    check_balance(&lexed.tokens, &mut report.issues);
    report.sections = check_sections(&lexed.comments, &mut report.issues);
    check_objects(&lexed.tokens, &mut report);

    debug!(
        "Verified document: {} objects, {} sections, {} references, {} issue(s)",
        report.objects,
        report.sections,
        report.references,
        report.issues.len()
    );
    report
}

fn lex(text: &str, issues: &mut Vec<String>) -> Lexed {
    let mut tokens = Vec::new();
    let mut comments = Vec::new();
    let mut chars = text.chars().peekable();
    let mut line = 1;

    while let Some(c) = chars.next() {
        match c {
            '\n' => line += 1,
            c if c.is_whitespace() => {}
            '/' if chars.peek() == Some(&'/') => {
                let mut body = String::new();
                while let Some(&next) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    body.push(next);
                    chars.next();
                }
                comments.push((body, line));
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let start = line;
                let mut body = String::new();
                let mut closed = false;
                while let Some(next) = chars.next() {
                    if next == '*' && chars.peek() == Some(&'/') {
                        chars.next();
                        closed = true;
                        break;
                    }
                    if next == '\n' {
                        line += 1;
                    }
                    body.push(next);
                }
                if !closed {
                    issues.push(format!("Line {}: unterminated comment", start));
                }
                comments.push((body, start));
            }
            '"' => {
                let start = line;
                let mut closed = false;
                while let Some(next) = chars.next() {
                    match next {
                        '\\' => {
                            chars.next();
                        }
                        '"' => {
                            closed = true;
                            break;
                        }
                        '\n' => line += 1,
                        _ => {}
                    }
                }
                if !closed {
                    issues.push(format!("Line {}: unterminated string", start));
                }
                tokens.push((Token::Str, start));
            }
            '{' | '}' | '(' | ')' | '=' | ';' | ',' => tokens.push((Token::Punct(c), line)),
            _ => {
                let mut word = c.to_string();
                while let Some(&next) = chars.peek() {
                    if next.is_whitespace() || "{}()=;,\"".contains(next) {
                        break;
                    }
                    word.push(next);
                    chars.next();
                }
                tokens.push((Token::Word(word), line));
            }
        }
    }
    Lexed { tokens, comments }
}

fn check_balance(tokens: &[(Token, usize)], issues: &mut Vec<String>) {
    let mut stack: Vec<(char, usize)> = Vec::new();
    for (token, line) in tokens {
        let Token::Punct(c) = token else { continue };
        match c {
            '{' | '(' => stack.push((*c, *line)),
            '}' | ')' => {
                let expected = if *c == '}' { '{' } else { '(' };
                match stack.pop() {
                    Some((open, _)) if open == expected => {}
                    Some((open, open_line)) => issues.push(format!(
                        "Line {}: `{}` closes `{}` opened on line {}",
                        line, c, open, open_line
                    )),
                    None => issues.push(format!("Line {}: unmatched `{}`", line, c)),
                }
            }
            _ => {}
        }
    }
    for (open, line) in stack {
        issues.push(format!("Line {}: `{}` is never closed", line, open));
    }
}

fn check_sections(comments: &[(String, usize)], issues: &mut Vec<String>) -> usize {
    let mut open: Option<(&str, usize)> = None;
    let mut pairs = 0;
    for (body, line) in comments {
        let Some(caps) = section_marker().captures(body) else {
            continue;
        };
        let (kind, name) = match (caps.get(1), caps.get(2)) {
            (Some(kind), Some(name)) => (kind.as_str(), name.as_str()),
            _ => continue,
        };
        match (kind, open) {
            ("Begin", None) => open = Some((name, *line)),
            ("Begin", Some((current, _))) => {
                issues.push(format!(
                    "Line {}: section {} begins inside section {}",
                    line, name, current
                ));
                open = Some((name, *line));
            }
            ("End", Some((current, _))) if current == name => {
                pairs += 1;
                open = None;
            }
            ("End", Some((current, _))) => {
                issues.push(format!(
                    "Line {}: end of section {} while {} is open",
                    line, name, current
                ));
                open = None;
            }
            _ => issues.push(format!("Line {}: end of section {} without a begin", line, name)),
        }
    }
    if let Some((name, line)) = open {
        issues.push(format!("Line {}: section {} is never ended", line, name));
    }
    pairs
}

fn word(token: Option<&(Token, usize)>) -> Option<&str> {
    match token {
        Some((Token::Word(w), _)) => Some(w.as_str()),
        _ => None,
    }
}

fn is_punct(token: Option<&(Token, usize)>, c: char) -> bool {
    matches!(token, Some((Token::Punct(p), _)) if *p == c)
}

fn check_objects(tokens: &[(Token, usize)], report: &mut VerifyReport) {
    let mut keys: HashSet<&str> = HashSet::new();
    let mut key_positions: HashSet<usize> = HashSet::new();
    let mut roots: Vec<(&str, usize)> = Vec::new();
    let mut depth = 0usize;
    let mut objects_depth: Option<usize> = None;

    for (i, (token, line)) in tokens.iter().enumerate() {
        match token {
            Token::Punct('{') | Token::Punct('(') => depth += 1,
            Token::Punct('}') | Token::Punct(')') => {
                depth = depth.saturating_sub(1);
                if objects_depth.is_some_and(|d| depth < d) {
                    objects_depth = None;
                }
            }
            Token::Word(w) if is_punct(tokens.get(i + 1), '=') => {
                if depth == 1 && w == "objects" && is_punct(tokens.get(i + 2), '{') {
                    objects_depth = Some(2);
                } else if depth == 1 && w == "rootObject" {
                    match word(tokens.get(i + 2)) {
                        Some(value) => roots.push((value, *line)),
                        None => report
                            .issues
                            .push(format!("Line {}: rootObject has no value", line)),
                    }
                } else if objects_depth == Some(depth) {
                    key_positions.insert(i);
                    if !is_identifier(w) {
                        report
                            .issues
                            .push(format!("Line {}: invalid object key `{}`", line, w));
                    } else if !keys.insert(w.as_str()) {
                        report
                            .issues
                            .push(format!("Line {}: duplicate object key {}", line, w));
                    }
                }
            }
            _ => {}
        }
    }
    report.objects = keys.len();

    match roots.as_slice() {
        [] => report.issues.push("Document has no rootObject".to_string()),
        [(root, line)] => {
            if !keys.contains(root) {
                report.issues.push(format!(
                    "Line {}: rootObject {} is not a defined object",
                    line, root
                ));
            }
        }
        many => report.issues.push(format!(
            "Document has {} rootObject entries, expected one",
            many.len()
        )),
    }

    for (i, (token, line)) in tokens.iter().enumerate() {
        let Token::Word(w) = token else { continue };
        if key_positions.contains(&i) || !is_identifier(w) {
            continue;
        }
        report.references += 1;
        if !keys.contains(w.as_str()) {
            report
                .issues
                .push(format!("Line {}: reference {} does not resolve", line, w));
        }
    }
}
