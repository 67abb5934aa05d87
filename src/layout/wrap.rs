use crate::metrics::{FontId, TextMeasurer};
use crate::units::Pt;

/// Breaks `text` into lines no wider than `max_width`, packing as many whitespace
/// separated words onto each line as will fit.
///
/// Runs of whitespace collapse to single spaces. Words are never split, so a word
/// that is wider than `max_width` on its own gets a line to itself and overflows.
/// Blank text produces no lines.
pub fn wrap_words<M: TextMeasurer + ?Sized>(
    measurer: &M,
    text: &str,
    font: FontId,
    size: Pt,
    max_width: Pt,
) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let fitting_len = current.len();
        current.push(' ');
        current.push_str(word);
        if measurer.width_of(&current, font, size) > max_width {
            current.truncate(fitting_len);
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::metrics::{Advances, AdvanceTable};

    fn mono() -> (AdvanceTable, FontId) {
        let mut table = AdvanceTable::new();
        // 1pt per character at 2pt
        let font = table.add_font(Advances::monospace(500));
        (table, font)
    }

    #[test]
    fn packs_words_greedily() {
        let (table, font) = mono();
        let lines = wrap_words(&table, "the quick brown fox jumps", font, Pt(2.0), Pt(10.0));
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn a_line_may_fill_the_width_exactly() {
        let (table, font) = mono();
        let lines = wrap_words(&table, "abcde fghi jk", font, Pt(2.0), Pt(10.0));
        assert_eq!(lines, vec!["abcde fghi", "jk"]);
    }

    #[test]
    fn blank_text_has_no_lines() {
        let (table, font) = mono();
        assert!(wrap_words(&table, "", font, Pt(2.0), Pt(10.0)).is_empty());
        assert!(wrap_words(&table, " \t\n ", font, Pt(2.0), Pt(10.0)).is_empty());
    }

    #[test]
    fn oversized_words_get_their_own_line() {
        let (table, font) = mono();
        let lines = wrap_words(
            &table,
            "a Supercalifragilistic b c",
            font,
            Pt(2.0),
            Pt(10.0),
        );
        assert_eq!(lines, vec!["a", "Supercalifragilistic", "b c"]);

        let lines = wrap_words(&table, "Supercalifragilistic", font, Pt(2.0), Pt(10.0));
        assert_eq!(lines, vec!["Supercalifragilistic"]);
    }

    #[test]
    fn lines_fit_and_rejoin_to_the_normalised_text() {
        let (table, font) = mono();
        for seed in 1..20 {
            let text = lipsum::lipsum_words(seed * 7).replace(' ', "  \t");
            // lipsum words are well under 30 characters
            let max_width = Pt(30.0);
            let lines = wrap_words(&table, &text, font, Pt(2.0), max_width);

            for line in lines.iter() {
                assert!(table.width_of(line, font, Pt(2.0)) <= max_width, "{line:?} too wide");
                assert_eq!(line.trim(), line);
            }
            let normalised: Vec<&str> = text.split_whitespace().collect();
            assert_eq!(lines.join(" "), normalised.join(" "));
        }
    }
}
