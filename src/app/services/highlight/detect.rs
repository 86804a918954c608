//! Cheap language sniffing for auto mode.
//!
//! Each supported language has a list of telltale fragments; the language
//! with the most hits in the first lines of the text wins. Shebangs short-cut
//! the scoring.

use crate::app::domain::preferences::Language;

const SAMPLE_LINES: usize = 50;

const JAVASCRIPT_HINTS: &[&str] = &[
    "function ",
    "const ",
    "let ",
    "var ",
    "=>",
    "===",
    "console.log",
    "document.",
    "require(",
    "export ",
    "import {",
    " from '",
    " from \"",
];

const PYTHON_HINTS: &[&str] = &[
    "def ",
    "elif ",
    "self.",
    "print(",
    "__init__",
    "import ",
    "lambda ",
    " None",
];

const HTML_HINTS: &[&str] = &[
    "<!doctype",
    "<html",
    "<head",
    "<body",
    "<div",
    "<span",
    "<p>",
    "</",
    "<script",
];

const CSS_HINTS: &[&str] = &[
    "color:",
    "margin:",
    "padding:",
    "display:",
    "font-",
    "border:",
    "@media",
    "px;",
];

const JAVA_HINTS: &[&str] = &[
    "public class",
    "public static void",
    "private ",
    "protected ",
    "System.out",
    "String[]",
    "@Override",
    "import java.",
];

/// Best guess among the non-auto languages, or `None` when nothing scores.
pub fn sniff_language(text: &str) -> Option<Language> {
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(lang) = trimmed.lines().next().and_then(shebang_language) {
        return Some(lang);
    }

    let sample: Vec<&str> = trimmed.lines().take(SAMPLE_LINES).collect();
    let joined = sample.join("\n");
    let lower = joined.to_ascii_lowercase();

    let python_colons = sample
        .iter()
        .filter(|l| {
            let l = l.trim_end();
            l.ends_with(':') && !l.trim_start().starts_with("//")
        })
        .count();

    let scores = [
        (Language::Html, hits(&lower, HTML_HINTS)),
        (Language::Java, hits(&joined, JAVA_HINTS)),
        (Language::Python, hits(&joined, PYTHON_HINTS) + python_colons),
        (Language::JavaScript, hits(&joined, JAVASCRIPT_HINTS)),
        (Language::Css, hits(&lower, CSS_HINTS)),
    ];

    let mut best: Option<(Language, usize)> = None;
    for (lang, score) in scores {
        if score == 0 {
            continue;
        }
        match best {
            Some((_, top)) if top >= score => {}
            _ => best = Some((lang, score)),
        }
    }
    best.map(|(lang, _)| lang)
}

fn hits(haystack: &str, hints: &[&str]) -> usize {
    hints.iter().map(|h| haystack.matches(h).count()).sum()
}

fn shebang_language(first: &str) -> Option<Language> {
    let rest = first.strip_prefix("#!")?.to_ascii_lowercase();
    if rest.contains("python") {
        Some(Language::Python)
    } else if rest.contains("node") || rest.contains("deno") {
        Some(Language::JavaScript)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_plain_text() {
        assert_eq!(sniff_language(""), None);
        assert_eq!(sniff_language("   \n\n"), None);
        assert_eq!(sniff_language("hello world"), None);
        assert_eq!(sniff_language("x=1"), None);
    }

    #[test]
    fn test_shebang() {
        assert_eq!(sniff_language("#!/usr/bin/env python3\nx = 1\n"), Some(Language::Python));
        assert_eq!(sniff_language("#!/usr/bin/env node\n"), Some(Language::JavaScript));
        assert_eq!(sniff_language("#!/bin/sh\n"), None);
    }

    #[test]
    fn test_python() {
        let src = "def greet(name):\n    print(f\"hi {name}\")\n";
        assert_eq!(sniff_language(src), Some(Language::Python));
    }

    #[test]
    fn test_javascript() {
        let src = "const add = (a, b) => a + b;\nconsole.log(add(1, 2));\n";
        assert_eq!(sniff_language(src), Some(Language::JavaScript));
    }

    #[test]
    fn test_es_module_imports() {
        let src = "import React from 'react';\nimport { render } from \"react-dom\";\n\nrender(App);\n";
        assert_eq!(sniff_language(src), Some(Language::JavaScript));

        let src = "import os\nfrom sys import argv\n";
        assert_eq!(sniff_language(src), Some(Language::Python));
    }

    #[test]
    fn test_java() {
        let src = "public class Main {\n    public static void main(String[] args) {\n        System.out.println(\"hi\");\n    }\n}\n";
        assert_eq!(sniff_language(src), Some(Language::Java));
    }

    #[test]
    fn test_html() {
        let src = "<!DOCTYPE html>\n<html><body><p>Hi</p></body></html>\n";
        assert_eq!(sniff_language(src), Some(Language::Html));
    }

    #[test]
    fn test_css() {
        let src = "body {\n  color: red;\n  margin: 0;\n  padding: 4px;\n}\n";
        assert_eq!(sniff_language(src), Some(Language::Css));
    }
}
