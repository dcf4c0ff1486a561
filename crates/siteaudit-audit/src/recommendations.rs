//! Parsing of generator output into [`Recommendation`]s.
//!
//! The accepted header grammar is
//!
//! ```text
//! 1. [HIGH] Issue text → Fix text
//! 2. [PRIORITY: med] Issue text
//! → Fix text on the following line
//! ```
//!
//! Everything else is ignored.

use crate::model::{Priority, Recommendation};
use regex::Regex;
use std::sync::OnceLock;

const ARROW: char = '→';

fn header_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^\d+\.\s*\[(?:PRIORITY:\s*)?(HIGH|MEDIUM|MED|LOW)\]\s*(.+?)(?:→(.+))?$")
            .expect("recommendation header pattern is valid")
    })
}

/// Parse generator output into recommendations, in line order.
///
/// A header without an inline fix takes the immediately following line as
/// its fix when that line starts with `→`; the consumed line is never parsed
/// again. Without any fix the issue text is repeated.
#[must_use]
pub fn parse_recommendations(text: &str) -> Vec<Recommendation> {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let mut recommendations = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        i += 1;

        let Some(caps) = header_pattern().captures(line) else {
            if !line.is_empty() {
                tracing::trace!("Ignoring non-recommendation line: {}", line);
            }
            continue;
        };

        let Some(priority) = Priority::from_token(&caps[1]) else {
            continue;
        };
        // `1. [HIGH] → fix` has no issue; the arrow lands in the lazy capture.
        let issue = caps[2].trim();
        if issue.is_empty() || issue.starts_with(ARROW) {
            continue;
        }

        let mut fix = caps.get(3).map_or("", |m| m.as_str().trim()).to_string();
        if fix.is_empty() {
            if let Some(next) = lines.get(i).and_then(|l| l.strip_prefix(ARROW)) {
                fix = next.trim().to_string();
                i += 1;
            }
        }
        if fix.is_empty() {
            fix = issue.to_string();
        }

        recommendations.push(Recommendation {
            priority,
            issue: issue.to_string(),
            fix,
        });
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(priority: Priority, issue: &str, fix: &str) -> Recommendation {
        Recommendation {
            priority,
            issue: issue.to_string(),
            fix: fix.to_string(),
        }
    }

    #[test]
    fn test_inline_fix_and_fallback() {
        let text = "1. [HIGH] Missing title tag → Add a descriptive title element.\n2. [LOW] No canonical link";

        assert_eq!(
            parse_recommendations(text),
            vec![
                rec(Priority::High, "Missing title tag", "Add a descriptive title element."),
                rec(Priority::Low, "No canonical link", "No canonical link"),
            ]
        );
    }

    #[test]
    fn test_priority_normalization() {
        let text = "1. [med] Compress images → Serve WebP\n\
                    2. [Medium] Minify CSS → Use a build step\n\
                    3. [PRIORITY: high] Slow LCP → Preload the hero image\n\
                    4. [priority:low] Add author meta → Set meta author";

        let priorities: Vec<Priority> = parse_recommendations(text)
            .into_iter()
            .map(|r| r.priority)
            .collect();
        assert_eq!(
            priorities,
            vec![Priority::Medium, Priority::Medium, Priority::High, Priority::Low]
        );
    }

    #[test]
    fn test_header_without_issue_is_skipped() {
        let text = "1. [HIGH] → Add a title\n2. [LOW]   \n3. [MED] Thin content → Expand the copy";

        assert_eq!(
            parse_recommendations(text),
            vec![rec(Priority::Medium, "Thin content", "Expand the copy")]
        );
        assert!(parse_recommendations("1. [HIGH] → fix").is_empty());
    }

    #[test]
    fn test_fix_on_next_line_is_consumed_once() {
        let text = "1. [HIGH] Render-blocking CSS\n→ Inline critical CSS and defer the rest\n2. [LOW] Missing OG image → Add og:image";

        let parsed = parse_recommendations(text);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].fix, "Inline critical CSS and defer the rest");
        assert_eq!(parsed[1].issue, "Missing OG image");
    }

    #[test]
    fn test_only_the_immediate_next_line_is_checked() {
        let text = "1. [MEDIUM] Large DOM\n\n→ Reduce node count";

        let parsed = parse_recommendations(text);
        assert_eq!(parsed, vec![rec(Priority::Medium, "Large DOM", "Large DOM")]);
    }

    #[test]
    fn test_inline_fix_does_not_consume_next_line() {
        let text = "1. [HIGH] A → B\n→ stray";

        let parsed = parse_recommendations(text);
        assert_eq!(parsed, vec![rec(Priority::High, "A", "B")]);
    }

    #[test]
    fn test_noise_does_not_disturb_neighbours() {
        let text = "Here are my recommendations:\n\
                    \n\
                    1. [HIGH] Slow server response → Enable caching\n\
                    - a stray bullet\n\
                    **Note** this is prose\n\
                    2. [URGENT] Not a real priority → ignored\n\
                    3. [LOW] Missing alt text → Describe each image\n\
                    Thanks!";

        assert_eq!(
            parse_recommendations(text),
            vec![
                rec(Priority::High, "Slow server response", "Enable caching"),
                rec(Priority::Low, "Missing alt text", "Describe each image"),
            ]
        );
    }

    #[test]
    fn test_indented_lines_and_crlf() {
        let text = "   1. [HIGH] Issue one → Fix one   \r\n  2.[LOW]Issue two\r\n";

        assert_eq!(
            parse_recommendations(text),
            vec![
                rec(Priority::High, "Issue one", "Fix one"),
                rec(Priority::Low, "Issue two", "Issue two"),
            ]
        );
    }

    #[test]
    fn test_empty_and_prose_inputs() {
        assert!(parse_recommendations("").is_empty());
        assert!(parse_recommendations("   \n\t\n").is_empty());
        assert!(parse_recommendations("The site looks great overall. Keep it up.").is_empty());
    }

    #[test]
    fn test_no_truncation() {
        let text: String = (1..=14)
            .map(|n| format!("{n}. [LOW] Issue {n} → Fix {n}\n"))
            .collect();

        let parsed = parse_recommendations(&text);
        assert_eq!(parsed.len(), 14);
        assert_eq!(parsed[13].issue, "Issue 14");
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let text = "1. [HIGH] A\n→ B\n2. [MED] C → D";
        assert_eq!(parse_recommendations(text), parse_recommendations(text));
    }
}
