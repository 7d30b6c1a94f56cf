//! Markdown rendering of batch results

use std::fmt::Write as FmtWrite;

use shared_types::{BatchEntry, ChecklistResult, DocumentReport, Verdict};

fn badge(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::LikelyAddressed => "✅",
        Verdict::PossiblyMissing => "❌",
    }
}

/// Render a full report, one section per document in batch order
pub fn render_markdown(entries: &[BatchEntry]) -> String {
    let mut out = String::from("# 🧠 Clinical Gap Analysis\n");

    for entry in entries {
        match entry {
            BatchEntry::Analyzed(report) => render_document(&mut out, report),
            BatchEntry::Failed { filename, error } => {
                let _ = write!(
                    out,
                    "\n## 📎 {}\n\n⚠️ Could not analyze document: {}\n",
                    filename, error
                );
            }
        }
    }

    out
}

fn render_document(out: &mut String, report: &DocumentReport) {
    let _ = write!(
        out,
        "\n## 📎 {}\n\n**Document type:** {}\n",
        report.filename, report.document_type
    );

    for result in &report.results {
        render_checklist(out, result);
    }

    match &report.summary {
        Some(summary) => {
            let _ = write!(
                out,
                "\n### 📊 Audit Readiness\n\n**Overall confidence:** {:.1}% ({})\n",
                summary.overall_confidence, summary.tier
            );
        }
        None => out.push_str("\n_No standards selected._\n"),
    }
}

fn render_checklist(out: &mut String, result: &ChecklistResult) {
    let _ = write!(
        out,
        "\n### 📋 {} Compliance Check\n\n",
        result.checklist_name
    );
    for item in &result.items {
        let _ = writeln!(
            out,
            "- **{}** — {} {}",
            item.requirement,
            badge(item.verdict),
            item.verdict
        );
    }
    let _ = write!(out, "\n**Confidence:** {:.1}%\n", result.confidence);
}
