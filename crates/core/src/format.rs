use chrono::NaiveDate;

use crate::types::ScriptSegment;

/// Narration-only script, scenes separated by a blank line.
///
/// This is also what the copy action puts on the clipboard.
pub fn narration_text(script: &[ScriptSegment]) -> String {
    script
        .iter()
        .map(|segment| segment.narration.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Rough word count, good enough for a "~N words" footer.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Strong,
    Average,
    Weak,
}

impl ScoreBand {
    pub fn of(score: f64) -> Self {
        if score >= 9.0 {
            ScoreBand::Excellent
        } else if score >= 7.0 {
            ScoreBand::Strong
        } else if score >= 5.0 {
            ScoreBand::Average
        } else {
            ScoreBand::Weak
        }
    }
}

/// Scores come back as whatever number the model chose; print integers bare.
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.0}", score)
    } else {
        format!("{:.1}", score)
    }
}

pub struct PrintHeader<'a> {
    pub title: &'a str,
    pub date: NaiveDate,
    pub platform: &'a str,
    pub tone: &'a str,
    pub duration: &'a str,
}

/// Plain-text production sheet for printing.
pub fn render_print_sheet(header: &PrintHeader<'_>, script: &[ScriptSegment]) -> String {
    let rule = "=".repeat(72);
    let mut output = String::new();
    output.push_str(&format!("{}\n{}\n{}\n", rule, header.title, rule));
    output.push_str(&format!("Date:     {}\n", header.date.format("%Y-%m-%d")));
    output.push_str(&format!("Format:   {}\n", header.platform));
    output.push_str(&format!("Tone:     {}\n", header.tone));
    output.push_str(&format!("Duration: {}\n\n", header.duration));

    for (i, segment) in script.iter().enumerate() {
        output.push_str(&format!("{}\n", "-".repeat(72)));
        output.push_str(&format!("#{}\n", i + 1));
        output.push_str("VISUAL PRODUCTION NOTES\n");
        output.push_str(&indent(&segment.visual));
        output.push_str("NARRATION\n");
        output.push_str(&indent(&segment.narration));
    }
    output.push_str(&format!("{}\n", "-".repeat(72)));
    output
}

fn indent(text: &str) -> String {
    let mut out: String = text.lines().map(|line| format!("    {}\n", line)).collect();
    if out.is_empty() {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script() -> Vec<ScriptSegment> {
        vec![
            ScriptSegment { narration: "Time is ticking.".into(), visual: "Clock face".into() },
            ScriptSegment { narration: "Gears  never\nlie.".into(), visual: "Gear train\nmacro".into() },
        ]
    }

    #[test]
    fn narration_text_joins_with_blank_lines() {
        assert_eq!(narration_text(&script()), "Time is ticking.\n\nGears  never\nlie.");
        assert_eq!(narration_text(&[]), "");
    }

    #[test]
    fn word_count_splits_on_any_whitespace() {
        assert_eq!(word_count(&narration_text(&script())), 6);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn score_bands() {
        assert_eq!(ScoreBand::of(9.0), ScoreBand::Excellent);
        assert_eq!(ScoreBand::of(8.9), ScoreBand::Strong);
        assert_eq!(ScoreBand::of(5.0), ScoreBand::Average);
        assert_eq!(ScoreBand::of(4.99), ScoreBand::Weak);
        assert_eq!(format_score(8.0), "8");
        assert_eq!(format_score(8.5), "8.5");
    }

    #[test]
    fn print_sheet_numbers_scenes_and_keeps_lines() {
        let header = PrintHeader {
            title: "Watches",
            date: NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(),
            platform: "LinkedIn Video",
            tone: "Casual & Friendly",
            duration: "short",
        };
        let sheet = render_print_sheet(&header, &script());
        assert!(sheet.contains("Date:     2026-10-17"));
        assert!(sheet.contains("#1\n"));
        assert!(sheet.contains("#2\n"));
        assert!(sheet.contains("    Gear train\n    macro\n"));
    }
}
