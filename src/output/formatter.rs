//! Output formatters for recommendation reports

use crate::config::OutputFormat;
use crate::error::{RecommenderError, Result};
use crate::output::report::*;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting recommendation reports
pub trait OutputFormatter {
    fn format_report(&self, report: &RecommendationReport) -> Result<String>;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    include_diagnostics: bool,
    show_motivation: bool,
}

/// JSON formatter for scripting and integration
pub struct JsonFormatter {
    pretty: bool,
    include_diagnostics: bool,
}

/// Markdown formatter for sharing
pub struct MarkdownFormatter {
    include_metadata: bool,
    include_diagnostics: bool,
    show_motivation: bool,
}

/// HTML formatter rendering a standalone page
pub struct HtmlFormatter {
    include_styles: bool,
    include_diagnostics: bool,
    show_motivation: bool,
}

/// Report generator that dispatches to the formatter for a format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Career Recommendation System</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .success { color: #155724; background: #d4edda; padding: 12px; border-radius: 5px; }
        .warning { color: #856404; background: #fff3cd; padding: 12px; border-radius: 5px; }
        .job { margin: 15px 0; padding: 15px; border-left: 4px solid #007acc; background: #f8f9fa; }
        .source { color: #6c757d; font-size: 0.9em; }
        .motivation { border: 2px solid #4CAF50; padding: 10px; border-radius: 5px; margin-top: 25px; }
        .diagnostics { color: #6c757d; font-size: 0.9em; margin-top: 20px; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <h1>Career Recommendation System</h1>
        {% if has_entries %}
        <p class="success">{{ greeting }}</p>
        {% for entry in entries %}
        <div class="job">
            <h3>{{ entry.rank }}: {{ entry.category }}</h3>
            <p>{{ entry.description }}</p>
            <p class="source">Matched by {{ entry.source.label() }}</p>
        </div>
        {% endfor %}
        {% if show_motivation %}
        <div class="motivation">
            <p>{{ quote }}</p>
            <p>{{ note }}</p>
        </div>
        {% endif %}
        {% else %}
        <p class="warning">{{ greeting }}</p>
        {% endif %}
        {% if has_diagnostics %}
        <div class="diagnostics">
            <h4>Diagnostics</h4>
            <ul>
            {% for diagnostic in diagnostics %}
                <li>{{ diagnostic }}</li>
            {% endfor %}
            </ul>
        </div>
        {% endif %}
        <p class="source">Generated {{ generated_at }} by career-recommender v{{ version }}</p>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate<'a> {
    include_styles: bool,
    show_motivation: bool,
    greeting: String,
    has_entries: bool,
    entries: &'a [ReportEntry],
    quote: &'a str,
    note: &'a str,
    has_diagnostics: bool,
    diagnostics: Vec<String>,
    generated_at: String,
    version: &'a str,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, include_diagnostics: bool, show_motivation: bool) -> Self {
        Self {
            use_colors,
            include_diagnostics,
            show_motivation,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".color(Color::Blue).bold(), title.color(Color::Blue).bold())
        } else {
            format!("\n{} {}\n", "█", title)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &RecommendationReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("Career Recommendation System"));
        output.push('\n');

        if report.has_recommendations() {
            output.push_str(&format!("{}\n\n", self.colorize(&report.greeting(), Color::Green)));

            for entry in &report.entries {
                let title = format!("{}: {}", entry.rank, entry.category);
                if self.use_colors {
                    output.push_str(&format!("{}", title.bold()));
                } else {
                    output.push_str(&title);
                }
                output.push_str(&format!(
                    " {}\n",
                    self.colorize(&format!("({})", entry.source.label()), Color::BrightBlack)
                ));
                output.push_str(&format!("{}\n\n", entry.description));
            }

            if self.show_motivation {
                output.push_str(&format!("{}\n", self.colorize(MOTIVATIONAL_QUOTE, Color::Cyan)));
                output.push_str(&format!("{}\n", MOTIVATIONAL_NOTE));
            }
        } else {
            output.push_str(&format!("{}\n", self.colorize(&report.greeting(), Color::Yellow)));
        }

        if self.include_diagnostics && !report.diagnostics.is_empty() {
            output.push('\n');
            for diagnostic in &report.diagnostics {
                output.push_str(&format!(
                    "{} {}\n",
                    self.colorize("⚠️ ", Color::Yellow),
                    diagnostic.message
                ));
            }
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool, include_diagnostics: bool) -> Self {
        Self {
            pretty,
            include_diagnostics,
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &RecommendationReport) -> Result<String> {
        let stripped;
        let report = if self.include_diagnostics {
            report
        } else {
            stripped = RecommendationReport {
                diagnostics: Vec::new(),
                ..report.clone()
            };
            &stripped
        };

        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool, include_diagnostics: bool, show_motivation: bool) -> Self {
        Self {
            include_metadata,
            include_diagnostics,
            show_motivation,
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &RecommendationReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# Career Recommendations\n\n");

        let profile = &report.profile;
        let skills = if profile.skills.is_empty() {
            "_none selected_".to_string()
        } else {
            profile.skills.iter().cloned().collect::<Vec<_>>().join(", ")
        };
        output.push_str(&format!("- **Skills:** {}\n", skills));
        output.push_str(&format!(
            "- **Primary intelligence:** {}\n",
            profile.primary_intelligence
        ));
        output.push_str(&format!(
            "- **Secondary intelligence:** {}\n\n",
            profile.secondary_intelligence
        ));

        if report.has_recommendations() {
            output.push_str(&format!("{}\n\n", report.greeting()));
            for entry in &report.entries {
                output.push_str(&format!(
                    "{}. **{}** _({})_\n   {}\n",
                    entry.rank,
                    entry.category,
                    entry.source.label(),
                    entry.description
                ));
            }
            if self.show_motivation {
                output.push_str(&format!("\n> {}\n>\n> {}\n", MOTIVATIONAL_QUOTE, MOTIVATIONAL_NOTE));
            }
        } else {
            output.push_str(&format!("> ⚠️ {}\n", report.greeting()));
        }

        if self.include_diagnostics && !report.diagnostics.is_empty() {
            output.push_str("\n## Diagnostics\n\n");
            for diagnostic in &report.diagnostics {
                output.push_str(&format!("- {}\n", diagnostic.message));
            }
        }

        if self.include_metadata {
            output.push_str(&format!(
                "\n---\n_Generated {} by career-recommender v{} ({} rules, classifier {})_\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.version,
                report.metadata.rule_count,
                if report.metadata.classifier_fitted { "fitted" } else { "unfitted" }
            ));
        }

        Ok(output)
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool, include_diagnostics: bool, show_motivation: bool) -> Self {
        Self {
            include_styles,
            include_diagnostics,
            show_motivation,
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &RecommendationReport) -> Result<String> {
        let template = HtmlTemplate {
            include_styles: self.include_styles,
            show_motivation: self.show_motivation,
            greeting: report.greeting(),
            has_entries: report.has_recommendations(),
            entries: &report.entries,
            quote: MOTIVATIONAL_QUOTE,
            note: MOTIVATIONAL_NOTE,
            has_diagnostics: self.include_diagnostics && !report.diagnostics.is_empty(),
            diagnostics: report.diagnostics.iter().map(|d| d.message.clone()).collect(),
            generated_at: report
                .metadata
                .generated_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
            version: &report.metadata.version,
        };

        template
            .render()
            .map_err(|e| RecommenderError::OutputFormatting(e.to_string()))
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, true, true, true)
    }

    pub fn with_options(
        use_colors: bool,
        include_diagnostics: bool,
        show_motivation: bool,
        pretty_json: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, include_diagnostics, show_motivation),
            json_formatter: JsonFormatter::new(pretty_json, include_diagnostics),
            markdown_formatter: MarkdownFormatter::new(true, include_diagnostics, show_motivation),
            html_formatter: HtmlFormatter::new(true, include_diagnostics, show_motivation),
        }
    }

    pub fn generate_report(&self, report: &RecommendationReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, user_name: &str, timestamp: bool) -> String {
    let base_name = if user_name.trim().is_empty() {
        "career".to_string()
    } else {
        user_name
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect()
    };

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_recommendations{}.{}", base_name, timestamp_suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::fixtures::report;

    #[test]
    fn test_console_numbered_list() {
        let formatter = ConsoleFormatter::new(false, true, true);
        let output = formatter
            .format_report(&report(&["Data Scientist", "Quantum Plumber"], false))
            .unwrap();

        assert!(output.contains("Hi Ada! Your recommended job categories"));
        assert!(output.contains("1: Data Scientist (rules)"));
        assert!(output.contains("2: Quantum Plumber"));
        assert!(output.contains("No description available."));
        assert!(output.contains("Eleanor Roosevelt"));
    }

    #[test]
    fn test_console_no_recommendations() {
        let formatter = ConsoleFormatter::new(false, true, true);
        let output = formatter.format_report(&report(&[], true)).unwrap();

        assert!(output.contains("could not find any job recommendations"));
        assert!(output.contains("The boosting model is not fitted"));
        assert!(!output.contains("Eleanor Roosevelt"));
    }

    #[test]
    fn test_console_hides_diagnostics_when_disabled() {
        let formatter = ConsoleFormatter::new(false, false, false);
        let output = formatter.format_report(&report(&["Data Scientist"], true)).unwrap();
        assert!(!output.contains("not fitted"));
        assert!(!output.contains("Eleanor Roosevelt"));
    }

    #[test]
    fn test_json_is_parseable() {
        let output = JsonFormatter::new(false, true)
            .format_report(&report(&["Data Scientist"], true))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["entries"][0]["category"], "Data Scientist");
        assert_eq!(value["entries"][0]["source"], "rules");
        assert_eq!(value["diagnostics"][0]["kind"], "model_not_fitted");
        assert_eq!(value["profile"]["primary_intelligence"], "analytical");
    }

    #[test]
    fn test_markdown_contains_profile() {
        let output = MarkdownFormatter::new(true, true, true)
            .format_report(&report(&["Project Manager"], false))
            .unwrap();
        assert!(output.contains("- **Skills:** Python"));
        assert!(output.contains("1. **Project Manager** _(rules)_"));
        assert!(output.contains("12 rules, classifier unfitted"));
    }

    #[test]
    fn test_html_escapes_and_renders() {
        let output = HtmlFormatter::new(false, true, true)
            .format_report(&report(&["UI/UX Designer"], false))
            .unwrap();
        assert!(output.contains("<h3>1: UI&#x2f;UX Designer</h3>") || output.contains("<h3>1: UI/UX Designer</h3>"));
        assert!(output.contains("Matched by rules"));
        assert!(!output.contains("<style>"));
    }

    #[test]
    fn test_json_omits_diagnostics_when_disabled() {
        let output = JsonFormatter::new(false, false)
            .format_report(&report(&["Data Scientist"], true))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["entries"][0]["category"], "Data Scientist");
        assert_eq!(value["diagnostics"], serde_json::json!([]));
    }

    #[test]
    fn test_markdown_respects_diagnostics_and_motivation() {
        let sample = report(&["Data Scientist"], true);

        let full = MarkdownFormatter::new(false, true, true).format_report(&sample).unwrap();
        assert!(full.contains("## Diagnostics"));
        assert!(full.contains("Eleanor Roosevelt"));

        let quiet = MarkdownFormatter::new(false, false, false).format_report(&sample).unwrap();
        assert!(!quiet.contains("## Diagnostics"));
        assert!(!quiet.contains("not fitted"));
        assert!(!quiet.contains("Eleanor Roosevelt"));
        assert!(quiet.contains("1. **Data Scientist**"));
    }

    #[test]
    fn test_html_hides_diagnostics_when_disabled() {
        let sample = report(&["Data Scientist"], true);

        let shown = HtmlFormatter::new(false, true, true).format_report(&sample).unwrap();
        assert!(shown.contains("<h4>Diagnostics</h4>"));

        let hidden = HtmlFormatter::new(false, false, false).format_report(&sample).unwrap();
        assert!(!hidden.contains("<h4>Diagnostics</h4>"));
        assert!(!hidden.contains("not fitted"));
        assert!(!hidden.contains("Eleanor Roosevelt"));
    }

    #[test]
    fn test_generator_applies_settings_to_every_format() {
        let sample = report(&["Data Scientist"], true);
        let generator = ReportGenerator::with_options(false, false, false, true);

        for format in [
            OutputFormat::Console,
            OutputFormat::Json,
            OutputFormat::Markdown,
            OutputFormat::Html,
        ] {
            let output = generator.generate_report(&sample, &format).unwrap();
            assert!(!output.contains("not fitted"), "{:?} leaked a diagnostic", format);
            assert!(!output.contains("Eleanor Roosevelt"), "{:?} showed the quote", format);
        }
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(&OutputFormat::Markdown, "Ada Lovelace", false),
            "ada_lovelace_recommendations.md"
        );
        assert_eq!(
            suggest_filename(&OutputFormat::Json, " ", false),
            "career_recommendations.json"
        );
    }
}
