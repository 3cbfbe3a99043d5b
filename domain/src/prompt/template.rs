//! Prompt templates for the exploration flow

use crate::chat::ChatContext;
use crate::exploration::config::Depth;
use crate::exploration::value_objects::TaskFinding;
use crate::util::truncate;

/// Line placed in the synthesis prompt when no task produced results.
pub const NO_FINDINGS_MARKER: &str = "NO FINDINGS: none of the browsing tasks produced results.";

/// Maximum bytes of one raw task result included in the chat context.
pub const RAW_RESULT_LIMIT: usize = 2000;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the planning service
    pub fn planning_system() -> &'static str {
        r#"You are an exploration planner for a research assistant that browses the web on behalf of the user.

Create a focused browsing plan for the user's interests. Output valid JSON matching the schema exactly.

Guidelines:
- Choose websites with rich, current content on the topics (news aggregators and forums work well)
- Write clear, specific instructions that a web automation tool can follow
- The goal should be specific and actionable for today's exploration
- Match the depth: shallow = headlines only, medium = read the top discussions, deep = explore comments and linked articles

Output JSON schema:
{
  "goal": "string - specific exploration goal",
  "tasks": [
    {
      "website": "string - full URL to start browsing",
      "instructions": "string - what to look for and extract"
    }
  ]
}"#
    }

    /// User prompt for the planning service
    pub fn planning_prompt(
        topics: &[String],
        depth: Depth,
        time_budget_minutes: u32,
        max_tasks: usize,
    ) -> String {
        format!(
            r#"Create a browsing plan for a user interested in: {}

Depth preference: {} ({})
Time budget: {} minutes

Generate a focused plan with at most {} browsing task(s) that will find the most relevant, high-signal content."#,
            topics.join(", "),
            depth,
            depth.guidance(),
            time_budget_minutes,
            max_tasks,
        )
    }

    /// System prompt for the synthesis service
    pub fn synthesis_system() -> &'static str {
        r#"You are the synthesis engine of a research assistant that delivers condensed intelligence to the user.

Turn raw browsing results into a personalized, actionable brief. Output valid JSON matching the schema exactly.

Rules:
- Report ONLY information actually present in the browsing results
- If there are no results, or they hold nothing useful, say so honestly: return an empty top_findings array and explain in insights
- Never invent information

When there is real data:
- Focus on what matters most for the user's topics
- Be concrete and specific
- The insight should reveal a non-obvious pattern across findings
- The opportunity should be immediately actionable, with a link if possible

Output JSON schema:
{
  "top_findings": [
    {
      "title": "string",
      "summary": "string - 2-4 sentences",
      "why_it_matters": "string - why this matters to this user",
      "source_link": "string - URL of the source"
    }
  ],
  "insights": ["string"],
  "opportunities": ["string"],
  "sources": ["string - URLs consulted"]
}"#
    }

    /// User prompt for the synthesis service
    ///
    /// An empty `findings` slice produces [`NO_FINDINGS_MARKER`] in place of
    /// results.
    pub fn synthesis_prompt(topics: &[String], goal: Option<&str>, findings: &[TaskFinding]) -> String {
        let mut prompt = format!(
            "The user is interested in: {}\n\nExploration goal: {}\n\nBrowsing results:\n",
            topics.join(", "),
            goal.unwrap_or("(none)"),
        );

        if findings.is_empty() {
            prompt.push('\n');
            prompt.push_str(NO_FINDINGS_MARKER);
            prompt.push('\n');
        }
        for (i, finding) in findings.iter().enumerate() {
            prompt.push_str(&format!(
                "\n--- Result {} ---\nWebsite: {}\nInstructions: {}\nContent: {}\n",
                i + 1,
                finding.site,
                finding.instructions,
                finding.content,
            ));
        }

        prompt.push_str(
            "\nCreate a brief with exactly 3 top findings, or fewer if the results do not support 3 meaningful findings.",
        );
        prompt
    }

    /// System prompt for a follow-up conversation, grounded in `context`
    pub fn chat_system(context: &ChatContext) -> String {
        let mut prompt = format!(
            r#"You are the conversational interface of a research assistant that has just explored the web for the user.

The user's interests: {}
The exploration goal: {}

Answer questions helpfully and specifically, referencing the content that was found. If the user asks about something the exploration did not cover, say so and suggest exploring it next time. Be conversational but concise.
"#,
            context.topics.join(", "),
            context.goal.as_deref().unwrap_or("(none)"),
        );

        let brief = &context.brief;
        prompt.push_str("\nExploration summary:\n");
        if brief.top_findings.is_empty() {
            prompt.push_str("- Top findings: none\n");
        }
        for finding in &brief.top_findings {
            prompt.push_str(&format!("- Finding: {}", finding.title));
            if let Some(summary) = &finding.summary {
                prompt.push_str(&format!(" ({summary})"));
            }
            prompt.push('\n');
        }
        for insight in &brief.insights {
            prompt.push_str(&format!("- Insight: {insight}\n"));
        }
        for opportunity in &brief.opportunities {
            prompt.push_str(&format!("- Opportunity: {opportunity}\n"));
        }
        if !brief.sources.is_empty() {
            prompt.push_str(&format!("- Sources: {}\n", brief.sources.join(", ")));
        }

        if !context.findings.is_empty() {
            prompt.push_str("\nRaw browsing data:\n");
            for finding in &context.findings {
                prompt.push_str(&format!(
                    "- {}: {}\n",
                    finding.site,
                    truncate(&finding.content, RAW_RESULT_LIMIT)
                ));
            }
        }

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exploration::value_objects::{Brief, Finding};

    fn finding(content: &str) -> TaskFinding {
        TaskFinding {
            site: "https://news.ycombinator.com".to_string(),
            instructions: "Top stories".to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_planning_prompt_format() {
        let prompt = PromptTemplate::planning_prompt(
            &["AI agents".to_string(), "Rust".to_string()],
            Depth::Shallow,
            5,
            1,
        );
        assert!(prompt.contains("AI agents, Rust"));
        assert!(prompt.contains("headlines only"));
        assert!(prompt.contains("at most 1 browsing task"));
    }

    #[test]
    fn test_synthesis_prompt_with_results() {
        let prompt = PromptTemplate::synthesis_prompt(
            &["AI agents".to_string()],
            Some("Find agent news"),
            &[finding("Three launches today")],
        );
        assert!(prompt.contains("Find agent news"));
        assert!(prompt.contains("Three launches today"));
        assert!(!prompt.contains(NO_FINDINGS_MARKER));
    }

    #[test]
    fn test_synthesis_prompt_without_results() {
        let prompt = PromptTemplate::synthesis_prompt(&["AI agents".to_string()], None, &[]);
        assert!(prompt.contains(NO_FINDINGS_MARKER));
        assert!(prompt.contains("(none)"));
    }

    #[test]
    fn test_chat_system_truncates_raw_results() {
        let context = ChatContext {
            topics: vec!["AI agents".to_string()],
            goal: Some("Find agent news".to_string()),
            brief: Brief {
                top_findings: vec![Finding::titled("Agents ship")],
                insights: vec!["Tooling matters".to_string()],
                ..Default::default()
            },
            findings: vec![finding(&"x".repeat(5000))],
        };
        let prompt = PromptTemplate::chat_system(&context);
        assert!(prompt.contains("Finding: Agents ship"));
        assert!(prompt.contains("Insight: Tooling matters"));
        assert!(prompt.contains(&format!("{}...", "x".repeat(RAW_RESULT_LIMIT - 3))));
        assert!(!prompt.contains(&"x".repeat(RAW_RESULT_LIMIT + 1)));
    }
}
