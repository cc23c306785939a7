//! Execution trace rendering
//!
//! Turns an ordered slice of [`InvocationRecord`]s into a human-readable
//! trace. The default text form is a top-to-bottom arrow diagram; Mermaid and
//! JSON forms are available for tooling. None of these have a stable schema
//! beyond "one block per invocation, in order".

use crate::{FlowResult, InvocationRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Final line of a trace for a successful workflow
pub const TERMINATED_SUCCESSFULLY: &str = "Workflow Terminated Successfully";

/// Final line of a trace for an unsuccessful workflow
pub const TERMINATED_UNSUCCESSFULLY: &str = "Workflow Terminated Unsuccessfully";

/// Fill colour for failed steps in Mermaid output
const FAILED_COLOR: &str = "#FFB6C1";

/// Fill colour for successful steps in Mermaid output
const SUCCEEDED_COLOR: &str = "#90EE90";

/// Fill colour for branch decisions in Mermaid output
const DECISION_COLOR: &str = "#87CEEB";

/// Trace output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceFormat {
    /// Arrow diagram, one block per invocation
    #[default]
    Text,
    /// Mermaid flowchart
    Mermaid,
    /// Pretty-printed JSON
    Json,
}

impl fmt::Display for TraceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceFormat::Text => write!(f, "text"),
            TraceFormat::Mermaid => write!(f, "mermaid"),
            TraceFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for TraceFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(TraceFormat::Text),
            "mermaid" => Ok(TraceFormat::Mermaid),
            "json" => Ok(TraceFormat::Json),
            other => Err(format!(
                "Unknown trace format '{other}', expected one of: text, mermaid, json"
            )),
        }
    }
}

/// Serializable form of a whole trace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceExport {
    /// Orchestrator run the trace belongs to
    pub run_id: String,
    /// Verdict the caller gave the workflow
    pub final_success: bool,
    /// Recorded invocations, oldest first
    pub steps: Vec<InvocationRecord>,
}

/// Renders invocation records as a trace
#[derive(Debug, Clone)]
pub struct TraceRenderer {
    /// Annotate each step with its elapsed time
    pub include_timing: bool,
}

impl TraceRenderer {
    /// Create a renderer that includes timing
    pub fn new() -> Self {
        Self {
            include_timing: true,
        }
    }

    /// Create a renderer without timing annotations, which makes output
    /// deterministic
    pub fn without_timing() -> Self {
        Self {
            include_timing: false,
        }
    }

    /// Render `records` in the requested format
    pub fn render(
        &self,
        format: TraceFormat,
        run_id: &str,
        records: &[InvocationRecord],
        final_success: bool,
    ) -> FlowResult<String> {
        match format {
            TraceFormat::Text => Ok(self.render_text(records, final_success)),
            TraceFormat::Mermaid => Ok(self.render_mermaid(records, final_success)),
            TraceFormat::Json => self.render_json(run_id, records, final_success),
        }
    }

    /// Render the arrow diagram
    pub fn render_text(&self, records: &[InvocationRecord], final_success: bool) -> String {
        let mut trace = String::from("Start\n|\nV\n");

        for record in records {
            if let Some(name) = &record.name {
                trace.push_str(name);
                trace.push('\n');
            }
            trace.push_str(&record.kind);
            trace.push('\n');

            let status = status_text(record);
            if self.include_timing {
                trace.push_str(&format!(
                    "| {} ({})\n",
                    status,
                    format_elapsed(record.elapsed)
                ));
            } else {
                trace.push_str(&format!("| {status}\n"));
            }
            trace.push_str("V\n");
        }

        trace.push_str(terminal_line(final_success));
        trace
    }

    /// Render a Mermaid flowchart with one node per record
    pub fn render_mermaid(&self, records: &[InvocationRecord], final_success: bool) -> String {
        let mut diagram = String::from("flowchart TD\n");
        diagram.push_str("    start([Start])\n");

        let mut previous = "start".to_string();
        let mut failed_nodes = Vec::new();
        let mut succeeded_nodes = Vec::new();
        let mut decision_nodes = Vec::new();

        for (i, record) in records.iter().enumerate() {
            let node = format!("step{i}");
            let status = status_icon(record);
            let mut label = match &record.name {
                Some(name) => format!("{}<br/>{}", escape_label(name), escape_label(&record.kind)),
                None => escape_label(&record.kind),
            };
            label.push_str(&format!(" {status}"));
            if self.include_timing {
                label.push_str(&format!("<br/>{}", format_elapsed(record.elapsed)));
            }

            diagram.push_str(&format!("    {node}[\"{label}\"]\n"));
            diagram.push_str(&format!("    {previous} --> {node}\n"));

            if record.is_decision() {
                decision_nodes.push(node.clone());
            } else if record.success {
                succeeded_nodes.push(node.clone());
            } else {
                failed_nodes.push(node.clone());
            }
            previous = node;
        }

        diagram.push_str(&format!(
            "    finish([{}])\n    {previous} --> finish\n",
            terminal_line(final_success)
        ));

        diagram.push_str(&format!("    classDef succeeded fill:{SUCCEEDED_COLOR}\n"));
        diagram.push_str(&format!("    classDef failed fill:{FAILED_COLOR}\n"));
        diagram.push_str(&format!("    classDef decision fill:{DECISION_COLOR}\n"));
        if !succeeded_nodes.is_empty() {
            diagram.push_str(&format!("    class {} succeeded\n", succeeded_nodes.join(",")));
        }
        if !failed_nodes.is_empty() {
            diagram.push_str(&format!("    class {} failed\n", failed_nodes.join(",")));
        }
        if !decision_nodes.is_empty() {
            diagram.push_str(&format!("    class {} decision\n", decision_nodes.join(",")));
        }

        diagram
    }

    /// Render the records as pretty-printed JSON
    pub fn render_json(
        &self,
        run_id: &str,
        records: &[InvocationRecord],
        final_success: bool,
    ) -> FlowResult<String> {
        let mut steps = records.to_vec();
        if !self.include_timing {
            for step in &mut steps {
                step.elapsed = Duration::ZERO;
            }
        }
        let export = TraceExport {
            run_id: run_id.to_string(),
            final_success,
            steps,
        };
        Ok(serde_json::to_string_pretty(&export)?)
    }
}

impl Default for TraceRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn terminal_line(final_success: bool) -> &'static str {
    if final_success {
        TERMINATED_SUCCESSFULLY
    } else {
        TERMINATED_UNSUCCESSFULLY
    }
}

fn format_elapsed(elapsed: Duration) -> String {
    if elapsed >= Duration::from_secs(1) {
        format!("{:.2}s", elapsed.as_secs_f64())
    } else {
        format!("{:.1}ms", elapsed.as_secs_f64() * 1000.0)
    }
}

/// Branch decisions show the condition's value, everything else its result
fn status_text(record: &InvocationRecord) -> &'static str {
    match (record.is_decision(), record.success) {
        (true, true) => "True",
        (true, false) => "False",
        (false, true) => "Succeeded",
        (false, false) => "Failed",
    }
}

fn status_icon(record: &InvocationRecord) -> &'static str {
    match (record.is_decision(), record.success) {
        (true, true) => "True",
        (true, false) => "False",
        (false, true) => "✓",
        (false, false) => "✗",
    }
}

/// Mermaid labels are quoted and single-line; quotes and angle brackets
/// must be entities and line breaks become `<br/>`
fn escape_label(input: &str) -> String {
    input
        .replace('"', "#quot;")
        .replace('<', "#lt;")
        .replace('>', "#gt;")
        .replace("\r\n", "<br/>")
        .replace('\n', "<br/>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BRANCH_KIND;

    fn record(name: Option<&str>, kind: &str, success: bool) -> InvocationRecord {
        InvocationRecord::new(name, kind, success, Duration::from_millis(12))
    }

    #[test]
    fn test_text_trace_layout() {
        let records = vec![
            record(Some("step1"), "Greeting", true),
            record(None, "Failing", false),
        ];
        let trace = TraceRenderer::without_timing().render_text(&records, true);

        assert_eq!(
            trace,
            "Start\n|\nV\n\
             step1\nGreeting\n| Succeeded\nV\n\
             Failing\n| Failed\nV\n\
             Workflow Terminated Successfully"
        );
    }

    #[test]
    fn test_text_trace_with_timing() {
        let records = vec![record(Some("step1"), "Greeting", true)];
        let trace = TraceRenderer::new().render_text(&records, false);

        assert!(trace.contains("| Succeeded (12.0ms)"));
        assert!(trace.ends_with(TERMINATED_UNSUCCESSFULLY));
    }

    #[test]
    fn test_empty_trace() {
        let trace = TraceRenderer::without_timing().render_text(&[], true);
        assert_eq!(trace, "Start\n|\nV\nWorkflow Terminated Successfully");
    }

    #[test]
    fn test_mermaid_trace_chains_steps_and_styles_failures() {
        let records = vec![
            record(Some("say \"hi\""), "Greeting", true),
            record(Some("oops"), "Failing", false),
        ];
        let diagram = TraceRenderer::without_timing().render_mermaid(&records, false);

        assert!(diagram.starts_with("flowchart TD\n"));
        assert!(diagram.contains("start --> step0"));
        assert!(diagram.contains("step0 --> step1"));
        assert!(diagram.contains("step1 --> finish"));
        assert!(diagram.contains("say #quot;hi#quot;"));
        assert!(diagram.contains("class step0 succeeded"));
        assert!(diagram.contains("class step1 failed"));
        assert!(diagram.contains("finish([Workflow Terminated Unsuccessfully])"));
    }

    #[test]
    fn test_json_trace() {
        let records = vec![record(Some("step1"), "Greeting", true)];
        let json = TraceRenderer::without_timing()
            .render_json("run-1", &records, true)
            .unwrap();

        let parsed: TraceExport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.run_id, "run-1");
        assert!(parsed.final_success);
        assert_eq!(parsed.steps.len(), 1);
        assert_eq!(parsed.steps[0].kind, "Greeting");
        assert_eq!(parsed.steps[0].elapsed, Duration::ZERO);
    }

    #[test]
    fn test_branch_decisions_render_as_booleans() {
        let records = vec![
            record(Some("cond"), BRANCH_KIND, false),
            record(Some("other"), BRANCH_KIND, true),
        ];
        let trace = TraceRenderer::without_timing().render_text(&records, true);
        assert!(trace.contains("cond\nIf\n| False\n"));
        assert!(trace.contains("other\nIf\n| True\n"));
        assert!(!trace.contains("Failed"));

        let diagram = TraceRenderer::without_timing().render_mermaid(&records, true);
        assert!(diagram.contains("cond<br/>If False"));
        assert!(diagram.contains("class step0,step1 decision"));
        assert!(!diagram.contains("class step0 failed"));
    }

    #[test]
    fn test_mermaid_label_with_line_break_stays_on_one_line() {
        let records = vec![record(Some("first\nsecond"), "Greeting", true)];
        let diagram = TraceRenderer::without_timing().render_mermaid(&records, true);

        assert!(diagram.contains("step0[\"first<br/>second<br/>Greeting ✓\"]"));
        assert!(diagram
            .lines()
            .all(|line| !line.trim_start().starts_with("second")));
    }

    #[test]
    fn test_trace_format_parsing() {
        assert_eq!("text".parse::<TraceFormat>(), Ok(TraceFormat::Text));
        assert_eq!("Mermaid".parse::<TraceFormat>(), Ok(TraceFormat::Mermaid));
        assert_eq!("JSON".parse::<TraceFormat>(), Ok(TraceFormat::Json));
        assert!("dot".parse::<TraceFormat>().is_err());
        assert_eq!(TraceFormat::Mermaid.to_string(), "mermaid");
    }
}
