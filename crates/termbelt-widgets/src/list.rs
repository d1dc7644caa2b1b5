//! Nested list rendering with pluggable bullet numbering.
//!
//! A list is a tree of [`ListNode`]s. Each nesting level gets a bullet
//! scheme from a per-level configuration slice (unordered `*` past the end
//! of the slice), with a per-level counter that runs across sibling
//! sublists for the whole render. Bullets within a level are right-padded
//! so the item text starts in the same column, and wrapped continuation
//! lines are padded under the first text column rather than re-bulleted.

use std::io;

use termbelt_core::{display_length, wrap};
use termbelt_terminal::Console;

/// One node of a nested list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListNode {
    /// A scalar item rendered with a bullet.
    Leaf(String),
    /// A nested list rendered one level deeper.
    Sublist(Vec<ListNode>),
}

impl ListNode {
    /// Leaf constructor accepting anything stringly.
    pub fn leaf(text: impl Into<String>) -> Self {
        Self::Leaf(text.into())
    }
}

impl From<&str> for ListNode {
    fn from(text: &str) -> Self {
        Self::Leaf(text.to_string())
    }
}

impl From<String> for ListNode {
    fn from(text: String) -> Self {
        Self::Leaf(text)
    }
}

/// Bullet numbering scheme for one nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bullet {
    /// Literal `* `.
    #[default]
    Unordered,
    /// `1. `, `2. `, …
    Number,
    /// Bijective base-26 letters with a `) ` suffix: `a) `, …, `z) `, `aa) `.
    LetterLowercase,
    /// Bijective base-26 letters with a `. ` suffix: `A. `, …, `Z. `, `AA. `.
    LetterUppercase,
    /// Lowercase Roman numerals with a `. ` suffix: `i. `, `ii. `, `iv. `.
    Roman,
}

impl Bullet {
    /// The bullet text for the `count`-th item (1-based) at this scheme.
    #[must_use]
    pub fn render(self, count: usize) -> String {
        match self {
            Self::Unordered => "* ".to_string(),
            Self::Number => format!("{count}. "),
            Self::LetterLowercase => format!("{}) ", letters(count)),
            Self::LetterUppercase => format!("{}. ", letters(count).to_uppercase()),
            Self::Roman => format!("{}. ", roman(count)),
        }
    }
}

/// Bijective base-26 letter sequence: 1 → `a`, 26 → `z`, 27 → `aa`.
fn letters(mut count: usize) -> String {
    let mut reversed = Vec::new();
    while count > 0 {
        count -= 1;
        reversed.push(char::from(b'a' + u8::try_from(count % 26).unwrap_or(0)));
        count /= 26;
    }
    reversed.iter().rev().collect()
}

const ROMAN_DIGITS: [(&str, usize); 13] = [
    ("m", 1000),
    ("cm", 900),
    ("d", 500),
    ("cd", 400),
    ("c", 100),
    ("xc", 90),
    ("l", 50),
    ("xl", 40),
    ("x", 10),
    ("ix", 9),
    ("v", 5),
    ("iv", 4),
    ("i", 1),
];

/// Lowercase Roman numeral with the standard subtractive pairs.
fn roman(mut count: usize) -> String {
    let mut out = String::new();
    for (digits, value) in ROMAN_DIGITS {
        while count >= value {
            out.push_str(digits);
            count -= value;
        }
    }
    out
}

/// Render a nested list to text.
///
/// `bullets[level]` picks the scheme per nesting level (unordered beyond the
/// slice). Top-level items are indented `list_indent` spaces; level-L items
/// a further `L * sub_list_indent`. Item text wraps to `width` minus the
/// bullet column; `width == 0` disables wrapping.
#[must_use]
pub fn render_list(
    nodes: &[ListNode],
    bullets: &[Bullet],
    list_indent: usize,
    sub_list_indent: usize,
    width: usize,
) -> String {
    // Per-level bullet column widths come from the bullet each level's
    // final count will produce, so every value in a level starts flush.
    let mut finals = Vec::new();
    count_leaves(nodes, 0, &mut finals);
    let widths: Vec<usize> = finals
        .iter()
        .enumerate()
        .map(|(level, &count)| display_length(&bullet_for(bullets, level).render(count)))
        .collect();

    let mut counters = vec![0usize; finals.len()];
    let mut lines = Vec::new();
    render_level(
        nodes,
        bullets,
        &widths,
        &mut counters,
        0,
        list_indent,
        sub_list_indent,
        width,
        &mut lines,
    );
    lines.join("\n")
}

/// Render a nested list through the console as one erasable block.
///
/// # Errors
///
/// Propagates stream write failures.
pub fn print_list<O: io::Write, E: io::Write>(
    console: &mut Console<O, E>,
    nodes: &[ListNode],
    bullets: &[Bullet],
    list_indent: usize,
    sub_list_indent: usize,
) -> io::Result<()> {
    let width = console.width();
    console.printout(&render_list(
        nodes,
        bullets,
        list_indent,
        sub_list_indent,
        width,
    ))
}

fn bullet_for(bullets: &[Bullet], level: usize) -> Bullet {
    bullets.get(level).copied().unwrap_or_default()
}

/// Total leaf count per nesting level, across sibling sublists.
fn count_leaves(nodes: &[ListNode], level: usize, finals: &mut Vec<usize>) {
    if finals.len() <= level {
        finals.resize(level + 1, 0);
    }
    for node in nodes {
        match node {
            ListNode::Leaf(_) => finals[level] += 1,
            ListNode::Sublist(children) => count_leaves(children, level + 1, finals),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn render_level(
    nodes: &[ListNode],
    bullets: &[Bullet],
    widths: &[usize],
    counters: &mut [usize],
    level: usize,
    list_indent: usize,
    sub_list_indent: usize,
    width: usize,
    lines: &mut Vec<String>,
) {
    for node in nodes {
        match node {
            ListNode::Leaf(value) => {
                counters[level] += 1;
                let bullet = bullet_for(bullets, level).render(counters[level]);
                let column = widths.get(level).copied().unwrap_or(0);
                let indent = list_indent + level * sub_list_indent;

                let mut prefix = " ".repeat(indent);
                prefix.push_str(&bullet);
                prefix.push_str(&" ".repeat(column.saturating_sub(display_length(&bullet))));
                let prefix_width = display_length(&prefix);

                let wrapped = if width == 0 {
                    value.clone()
                } else {
                    wrap(value, width.saturating_sub(prefix_width))
                };
                for (i, line) in wrapped.split('\n').enumerate() {
                    if i == 0 {
                        lines.push(format!("{prefix}{line}"));
                    } else {
                        lines.push(format!("{}{line}", " ".repeat(prefix_width)));
                    }
                }
            }
            ListNode::Sublist(children) => render_level(
                children,
                bullets,
                widths,
                counters,
                level + 1,
                list_indent,
                sub_list_indent,
                width,
                lines,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaves(items: &[&str]) -> Vec<ListNode> {
        items.iter().map(|item| ListNode::leaf(*item)).collect()
    }

    #[test]
    fn test_letter_sequence_is_bijective_base_26() {
        let rendered: Vec<String> = (1..=27).map(letters).collect();
        assert_eq!(rendered[0], "a");
        assert_eq!(rendered[1], "b");
        assert_eq!(rendered[24], "y");
        assert_eq!(rendered[25], "z");
        assert_eq!(rendered[26], "aa");
        assert_eq!(letters(52), "az");
        assert_eq!(letters(53), "ba");
        assert_eq!(letters(702), "zz");
        assert_eq!(letters(703), "aaa");
    }

    #[test]
    fn test_letter_bullet_suffixes() {
        assert_eq!(Bullet::LetterLowercase.render(1), "a) ");
        assert_eq!(Bullet::LetterLowercase.render(27), "aa) ");
        assert_eq!(Bullet::LetterUppercase.render(1), "A. ");
        assert_eq!(Bullet::LetterUppercase.render(26), "Z. ");
        assert_eq!(Bullet::LetterUppercase.render(27), "AA. ");
    }

    #[test]
    fn test_roman_numerals() {
        assert_eq!(roman(1), "i");
        assert_eq!(roman(4), "iv");
        assert_eq!(roman(9), "ix");
        assert_eq!(roman(14), "xiv");
        assert_eq!(roman(40), "xl");
        assert_eq!(roman(90), "xc");
        assert_eq!(roman(1994), "mcmxciv");
    }

    #[test]
    fn test_roman_bullet_1994() {
        assert_eq!(Bullet::Roman.render(1994), "mcmxciv. ");
    }

    #[test]
    fn test_number_and_unordered_bullets() {
        assert_eq!(Bullet::Number.render(3), "3. ");
        assert_eq!(Bullet::Unordered.render(999), "* ");
    }

    #[test]
    fn test_nested_render_with_indents() {
        let list = vec![
            ListNode::leaf("x"),
            ListNode::leaf("y"),
            ListNode::Sublist(leaves(&["p", "q"])),
        ];
        let rendered = render_list(
            &list,
            &[Bullet::Number, Bullet::LetterLowercase],
            0,
            4,
            80,
        );
        let lines: Vec<&str> = rendered.split('\n').collect();
        assert_eq!(lines[0], "1. x");
        assert_eq!(lines[1], "2. y");
        assert_eq!(lines[2], "    a) p");
        assert_eq!(lines[3], "    b) q");
    }

    #[test]
    fn test_top_level_indent() {
        let rendered = render_list(&leaves(&["only"]), &[Bullet::Number], 4, 4, 80);
        assert_eq!(rendered, "    1. only");
    }

    #[test]
    fn test_counters_run_across_sibling_sublists() {
        let list = vec![
            ListNode::leaf("x"),
            ListNode::Sublist(leaves(&["p"])),
            ListNode::leaf("y"),
            ListNode::Sublist(leaves(&["q"])),
        ];
        let rendered = render_list(&list, &[Bullet::Number, Bullet::LetterLowercase], 0, 4, 0);
        let lines: Vec<&str> = rendered.split('\n').collect();
        assert_eq!(lines, vec!["1. x", "    a) p", "2. y", "    b) q"]);
    }

    #[test]
    fn test_bullets_flush_to_final_count() {
        let items: Vec<ListNode> = (1..=10).map(|i| ListNode::from(format!("item{i}"))).collect();
        let rendered = render_list(&items, &[Bullet::Number], 0, 4, 0);
        let lines: Vec<&str> = rendered.split('\n').collect();
        // "10. " is the widest bullet, so "1. " gets one pad space.
        assert_eq!(lines[0], "1.  item1");
        assert_eq!(lines[9], "10. item10");
    }

    #[test]
    fn test_deep_level_defaults_to_unordered() {
        let list = vec![ListNode::Sublist(vec![ListNode::Sublist(leaves(&["deep"]))])];
        let rendered = render_list(&list, &[Bullet::Number], 4, 2, 0);
        assert_eq!(rendered, "        * deep");
    }

    #[test]
    fn test_continuation_lines_padded_not_rebulleted() {
        let list = leaves(&["alpha beta gamma delta"]);
        let rendered = render_list(&list, &[Bullet::Number], 0, 4, 14);
        let lines: Vec<&str> = rendered.split('\n').collect();
        assert_eq!(lines[0], "1. alpha beta");
        assert_eq!(lines[1], "   gamma delta");
    }

    #[test]
    fn test_zero_width_disables_wrapping() {
        let list = leaves(&["a very long line that would normally wrap somewhere"]);
        let rendered = render_list(&list, &[], 0, 0, 0);
        assert_eq!(rendered.split('\n').count(), 1);
    }
}
