use crate::error::KpResult;
use crate::export::{LanguageMetrics, ParetoResults, SolutionRecord};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

pub const DEFAULT_HTML_FILE: &str = "pareto_results.html";

const STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", sans-serif; background: #f4f5f7; color: #222; margin: 0; }
.container { max-width: 1100px; margin: 0 auto; padding: 24px; }
h1 { margin-bottom: 4px; }
.subtitle { color: #666; margin-top: 0; }
.legend { display: flex; gap: 24px; margin: 16px 0 24px; }
.legend-item { display: flex; align-items: center; gap: 8px; }
.legend-key { width: 20px; height: 20px; border-radius: 4px; border: 1px solid #999; }
.legend-key.fixed, .key.fixed { background: #ffe08a; }
.legend-key.moveable, .key { background: #fff; }
.layout-container { background: #fff; border-radius: 8px; box-shadow: 0 1px 3px rgba(0,0,0,.15); margin-bottom: 24px; padding: 16px; }
.layout-header { display: flex; justify-content: space-between; font-weight: bold; margin-bottom: 12px; }
.layout-content { display: flex; gap: 32px; flex-wrap: wrap; }
.keyboard .row { display: flex; gap: 4px; margin-bottom: 4px; }
.key { width: 36px; height: 36px; border: 1px solid #999; border-radius: 4px; display: flex; align-items: center; justify-content: center; font-family: monospace; font-size: 18px; }
.key.empty { background: transparent; border-color: transparent; }
.metrics { display: flex; gap: 24px; }
.language-metrics h3 { margin: 0 0 6px; text-transform: capitalize; }
.metric .value { font-family: monospace; }
.weighted-score .score { font-size: 28px; font-weight: bold; color: #0b6e99; }
.weight-info { color: #666; font-size: 12px; }
"#;

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn keyboard(sol: &SolutionRecord, anchored: &HashSet<String>) -> String {
    let mut html = format!("<div class=\"keyboard\" id=\"layout-{}\">\n", sol.id);
    for row in &sol.layout {
        html.push_str("  <div class=\"row\">\n");
        for cell in row {
            if cell.is_empty() {
                html.push_str("    <div class=\"key empty\"></div>\n");
                continue;
            }
            let class = if anchored.contains(cell) {
                "key fixed"
            } else {
                "key"
            };
            html.push_str(&format!(
                "    <div class=\"{}\">{}</div>\n",
                class,
                escape(cell)
            ));
        }
        html.push_str("  </div>\n");
    }
    html.push_str("</div>\n");
    html
}

fn language_block(name: &str, m: &LanguageMetrics) -> String {
    let mut html = format!(
        "  <div class=\"language-metrics\">\n    <h3>{}</h3>\n",
        escape(name)
    );
    for (label, value) in [
        ("SFB", m.costs.sfb),
        ("Scissors", m.costs.scissors),
        ("Lat Stretch", m.costs.lat_stretch),
        ("Skip Bigrams", m.costs.skip_bigrams),
        ("Total", m.total_penalty),
    ] {
        html.push_str(&format!(
            "    <div class=\"metric\">{}: <span class=\"value\">{:.2}%</span></div>\n",
            label, value
        ));
    }
    html.push_str("  </div>\n");
    html
}

fn metrics(results: &ParetoResults, sol: &SolutionRecord) -> String {
    let meta = &results.metadata;
    let mut html = String::from("<div class=\"metrics\">\n");
    html.push_str(&language_block(&meta.primary_language, &sol.primary));
    html.push_str(&language_block(&meta.secondary_language, &sol.secondary));
    html.push_str(&format!(
        "  <div class=\"weighted-score\">\n    <div class=\"score\">{:.3}</div>\n    \
         <div class=\"weight-info\">({:.0}% {} + {:.0}% {})</div>\n  </div>\n",
        sol.weighted_score,
        meta.weights.primary_weight * 100.0,
        escape(&meta.primary_language),
        meta.weights.secondary_weight * 100.0,
        escape(&meta.secondary_language),
    ));
    html.push_str("</div>\n");
    html
}

/// Renders the first `top` solutions (all when `None`) as a standalone
/// page. Anchored keys carry the `fixed` class.
pub fn render(results: &ParetoResults, top: Option<usize>) -> String {
    let meta = &results.metadata;
    let anchored: HashSet<String> = meta
        .anchors
        .iter()
        .filter(|a| a.position.is_main_row())
        .map(|a| a.key.to_string())
        .collect();
    let shown = top.unwrap_or(results.solutions.len());

    let title = format!(
        "Pareto-optimal layouts: {} / {}",
        escape(&meta.primary_language),
        escape(&meta.secondary_language)
    );

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n<style>{}</style>\n", title, STYLE));
    html.push_str("</head>\n<body>\n<div class=\"container\">\n");
    html.push_str(&format!("<h1>{}</h1>\n", title));
    html.push_str(&format!(
        "<p class=\"subtitle\">{} solutions, population {}, {} generations</p>\n",
        results.solutions.len(),
        meta.population_size,
        meta.generations
    ));
    html.push_str(
        "<div class=\"legend\">\n  <div class=\"legend-item\"><span class=\"legend-key fixed\"></span>Anchored</div>\n  \
         <div class=\"legend-item\"><span class=\"legend-key moveable\"></span>Optimized</div>\n</div>\n",
    );

    for sol in results.solutions.iter().take(shown) {
        html.push_str("<div class=\"layout-container\">\n<div class=\"layout-header\">\n");
        html.push_str(&format!(
            "  <span>Solution #{}</span><span class=\"typing\">{}</span>\n</div>\n",
            sol.id,
            escape(&sol.typing_string)
        ));
        html.push_str("<div class=\"layout-content\">\n");
        html.push_str(&keyboard(sol, &anchored));
        html.push_str(&metrics(results, sol));
        html.push_str("</div>\n</div>\n");
    }

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

pub fn write_html<P: AsRef<Path>>(path: P, results: &ParetoResults, top: Option<usize>) -> KpResult<()> {
    let path = path.as_ref();
    fs::write(path, render(results, top))?;
    info!("🌐 Wrote HTML report to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LanguageWeights;
    use crate::export::RunMetadata;
    use crate::geometry::KeyboardGeometry;
    use crate::scorer::CostVector;

    fn results() -> ParetoResults {
        let geom = KeyboardGeometry::standard();
        let metrics = LanguageMetrics::from(&CostVector {
            sfb: 1.5,
            scissors: 0.25,
            lat_stretch: 0.5,
            skip_bigrams: 0.25,
        });
        let mut layout = vec![vec![String::new(); 12]; 3];
        layout[0][1] = "q".to_string();
        layout[1][1] = "n".to_string();
        layout[2][10] = "<".to_string();

        ParetoResults {
            metadata: RunMetadata {
                primary_language: "english".to_string(),
                secondary_language: "finnish".to_string(),
                anchors: geom.anchors.clone(),
                population_size: 10,
                generations: 2,
                seed: Some(1),
                weights: LanguageWeights::default(),
            },
            solutions: vec![
                SolutionRecord {
                    id: 1,
                    layout: layout.clone(),
                    typing_string: "qn<".to_string(),
                    primary: metrics.clone(),
                    secondary: metrics.clone(),
                    weighted_score: 2.5,
                },
                SolutionRecord {
                    id: 2,
                    layout,
                    typing_string: "qn<".to_string(),
                    primary: metrics.clone(),
                    secondary: metrics,
                    weighted_score: 2.6,
                },
            ],
        }
    }

    #[test]
    fn test_anchored_keys_are_marked() {
        let html = render(&results(), None);
        assert!(html.contains("<div class=\"key fixed\">n</div>"));
        assert!(html.contains("<div class=\"key\">q</div>"));
        assert!(html.contains("<div class=\"key\">&lt;</div>"));
        assert!(html.contains("key empty"));
    }

    #[test]
    fn test_metrics_and_weights_are_shown() {
        let html = render(&results(), None);
        assert!(html.contains("SFB: <span class=\"value\">1.50%</span>"));
        assert!(html.contains("(80% english + 20% finnish)"));
        assert!(html.contains("id=\"layout-2\""));
    }

    #[test]
    fn test_top_limits_solutions() {
        let html = render(&results(), Some(1));
        assert!(html.contains("id=\"layout-1\""));
        assert!(!html.contains("id=\"layout-2\""));
    }
}
