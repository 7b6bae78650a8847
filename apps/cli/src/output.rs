use console::{Style, style};

use scriptflow_core::{
    ScoreBand, ScriptAnalysis, ScriptSegment,
    format::{format_score, narration_text, word_count},
};

fn band_style(band: ScoreBand) -> Style {
    match band {
        ScoreBand::Excellent => Style::new().green().bold(),
        ScoreBand::Strong => Style::new().blue().bold(),
        ScoreBand::Average => Style::new().yellow().bold(),
        ScoreBand::Weak => Style::new().red().bold(),
    }
}

pub fn print_rule() {
    println!("{}", style("─".repeat(60)).dim());
}

pub fn print_analysis(analysis: &ScriptAnalysis) {
    let score = band_style(ScoreBand::of(analysis.score))
        .apply_to(format!("{}/10", format_score(analysis.score)));
    println!("{} {}  {}", style("Hype Score").dim(), score, style(&analysis.headline).bold());
    println!();

    println!("{}", style("VIRAL FACTORS").dim().bold());
    for factor in &analysis.viral_factors {
        println!("  {} {}", style("•").green(), factor);
    }
    println!();

    println!("{}", style("PLATFORM TIPS").dim().bold());
    for tip in &analysis.platform_tips {
        println!("  {} {}", style("•").cyan(), tip);
    }
    println!();
}

pub fn print_clean(script: &[ScriptSegment]) {
    println!("{}\n", style("Narration Script").bold());
    for segment in script {
        println!("{}\n", segment.narration);
    }
    println!(
        "{}  {}",
        style(format!("~{} words", word_count(&narration_text(script)))).dim(),
        style("Optimized for Text-to-Speech").dim()
    );
}

pub fn print_production(script: &[ScriptSegment]) {
    for (i, segment) in script.iter().enumerate() {
        println!("{} {}", style("#").dim(), style(i + 1).cyan().bold());
        println!("  {} {}", style("Visual:").dim(), segment.visual);
        println!("  {} {}", style("Narration:").dim(), segment.narration);
        println!();
    }
}
