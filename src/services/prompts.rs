//! System prompt for the evaluation assistant

/// Build the system prompt around the serialized evaluation context
pub fn system_prompt(context: &str) -> String {
    format!(
        r#"You are an AI assistant helping users understand software tool evaluations.

Here are the current tool evaluations in our system:
{}

Please answer questions about these tool evaluations, providing insights, comparisons, recommendations, and analysis. You can:
- Summarize findings for specific tools
- Compare tools across categories
- Explain scoring rationale
- Provide recommendations based on use cases
- Analyze business impact and costs
- Help users understand evaluation criteria

Be helpful, concise, and reference specific data from the evaluations when relevant. Use bullet points for lists instead of dashes for better readability."#,
        context
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_is_embedded_verbatim() {
        let context = r#"[{"toolName":"Clueso"}]"#;
        let prompt = system_prompt(context);
        assert!(prompt.contains(context));
        assert!(prompt.starts_with("You are an AI assistant"));
    }
}
