use crate::application::read_models::{ReportReadModel, SummaryView};
use crate::compatibility::domain::{CompatibilityStatus, ComponentResult, ErrorRecord};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// Markdown table header for component verdicts
const TABLE_HEADER: &str =
    "| Component | Version | Status | Current Version Supported | Minimum Version | Recommended Version | Confidence | Notes |\n";

/// Markdown table separator line
const TABLE_SEPARATOR: &str =
    "|-----------|---------|--------|---------------------------|-----------------|---------------------|------------|-------|\n";

/// Statuses that need someone to act, in the order they are rendered
const ACTION_SECTIONS: &[(CompatibilityStatus, &str)] = &[
    (CompatibilityStatus::Incompatible, "❌ Incompatible"),
    (CompatibilityStatus::NeedsUpgrade, "⬆️ Needs Upgrade"),
    (CompatibilityStatus::NeedsVersionVerification, "🔍 Needs Version Verification"),
    (CompatibilityStatus::NeedsVerification, "🔍 Needs Verification"),
    (CompatibilityStatus::Unknown, "❔ Unknown"),
];

/// MarkdownReportFormatter adapter for the human-readable report
///
/// Renders the summary counters, one table per status that needs action,
/// the full inventory and the list of skipped components.
pub struct MarkdownReportFormatter;

impl MarkdownReportFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn optional_cell(value: Option<&str>) -> String {
        value
            .map(Self::escape_markdown_table_cell)
            .unwrap_or_else(|| "N/A".to_string())
    }
}

impl Default for MarkdownReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper methods for rendering sections
impl MarkdownReportFormatter {
    fn render_header(&self, output: &mut String, model: &ReportReadModel) {
        let metadata = &model.metadata;
        output.push_str(&format!(
            "# {} Compatibility Report\n\n",
            metadata.target_architecture.to_uppercase()
        ));
        output.push_str(&format!(
            "- **Source:** {}\n",
            Self::escape_markdown_table_cell(&metadata.source_document)
        ));
        output.push_str(&format!(
            "- **Detected OS:** {}\n",
            metadata.detected_os.as_deref().unwrap_or("not detected")
        ));
        output.push_str(&format!("- **Generated:** {}\n", metadata.generated_at));
        output.push_str(&format!(
            "- **Tool:** {} {}\n\n",
            metadata.tool_name, metadata.tool_version
        ));
    }

    fn render_summary(&self, output: &mut String, summary: &SummaryView) {
        output.push_str("## Summary\n\n");
        output.push_str("| Status | Components |\n");
        output.push_str("|--------|------------|\n");
        for (label, count) in [
            ("Compatible", summary.compatible),
            ("Incompatible", summary.incompatible),
            ("Needs Upgrade", summary.needs_upgrade),
            ("Needs Verification", summary.needs_verification),
            ("Needs Version Verification", summary.needs_version_verification),
            ("Unknown", summary.unknown),
        ] {
            output.push_str(&format!("| {} | {} |\n", label, count));
        }
        output.push_str(&format!(
            "| **Total** | **{}** |\n\n",
            summary.total_components
        ));
        output.push_str(&format!(
            "*Analyzed in {:.2}s*\n\n",
            summary.processing_time_seconds
        ));
    }

    fn render_action_items(&self, output: &mut String, components: &[ComponentResult]) {
        let mut rendered_any = false;
        for (status, title) in ACTION_SECTIONS {
            let matching: Vec<&ComponentResult> =
                components.iter().filter(|c| c.status() == *status).collect();
            if matching.is_empty() {
                continue;
            }
            if !rendered_any {
                output.push_str("## Action Items\n\n");
                rendered_any = true;
            }
            output.push_str(&format!("### {} ({})\n\n", title, matching.len()));
            self.render_table(output, matching);
        }
        if !rendered_any {
            output.push_str("## Action Items\n\n*No action required*\n\n");
        }
    }

    fn render_inventory(&self, output: &mut String, components: &[ComponentResult]) {
        output.push_str("## Component Inventory\n\n");
        if components.is_empty() {
            output.push_str("*No components*\n\n");
            return;
        }
        self.render_table(output, components.iter().collect());
    }

    fn render_table(&self, output: &mut String, components: Vec<&ComponentResult>) {
        output.push_str(TABLE_HEADER);
        output.push_str(TABLE_SEPARATOR);
        for result in components {
            let compatibility = &result.compatibility;
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} | {} |\n",
                Self::escape_markdown_table_cell(result.component.name()),
                Self::escape_markdown_table_cell(result.component.version()),
                compatibility.status,
                if compatibility.current_version_supported {
                    "yes"
                } else {
                    "no"
                },
                Self::optional_cell(compatibility.minimum_supported_version.as_deref()),
                Self::optional_cell(compatibility.recommended_version.as_deref()),
                compatibility.confidence_level,
                Self::escape_markdown_table_cell(&compatibility.notes)
            ));
        }
        output.push('\n');
    }

    fn render_errors(&self, output: &mut String, errors: &[ErrorRecord]) {
        if errors.is_empty() {
            return;
        }
        output.push_str(&format!("## Skipped Components ({})\n\n", errors.len()));
        output.push_str("| Reference | Message |\n");
        output.push_str("|-----------|---------|\n");
        for error in errors {
            output.push_str(&format!(
                "| {} | {} |\n",
                Self::escape_markdown_table_cell(&error.component_ref),
                Self::escape_markdown_table_cell(&error.message)
            ));
        }
        output.push('\n');
    }
}

impl ReportFormatter for MarkdownReportFormatter {
    fn format(&self, model: &ReportReadModel) -> Result<String> {
        let mut output = String::new();
        self.render_header(&mut output, model);
        self.render_summary(&mut output, &model.summary);
        self.render_action_items(&mut output, &model.components);
        self.render_inventory(&mut output, &model.components);
        self.render_errors(&mut output, &model.errors);
        Ok(output)
    }
}
