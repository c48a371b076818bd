use indoc::formatdoc;

use crate::agent::AgentConfig;

/// Persona line used when the agent has no custom system prompt. `{name}` is
/// replaced with the agent's name.
pub const DEFAULT_PERSONA: &str =
    r#"You are {name}, a capable assistant that completes tasks on the user's behalf."#;

pub const TOOLS_HEADER: &str = r#"You have access to the following tools:"#;

/// Fixed directives appended to every system prompt, tools or not.
pub const BEHAVIORAL_DIRECTIVES: &str = r#"<INSTRUCTIONS>
- Prefer taking action over deferring; when an available tool can do the task, use it
- When a task involves computation, data transformation or code, execute code instead of describing what code would do
- Pick the tool suited to the task: search tools for current information, file tools for documents, communication tools for outreach
- After using tools, answer the user directly, grounded in the tool results
</INSTRUCTIONS>"#;

/// Assembles the system prompt for one run. A custom prompt replaces only
/// the persona line; the capability listing is omitted when no tools
/// resolve.
pub fn build_system_prompt(config: &AgentConfig, tool_descriptions: &[String]) -> String {
    let persona = match &config.system_prompt {
        Some(prompt) => prompt.clone(),
        None => DEFAULT_PERSONA.replace("{name}", &config.name),
    };

    if tool_descriptions.is_empty() {
        return formatdoc! {"
            {persona}

            {directives}",
            persona = persona,
            directives = BEHAVIORAL_DIRECTIVES,
        };
    }

    formatdoc! {"
        {persona}

        {header}

        {tools}

        {directives}",
        persona = persona,
        header = TOOLS_HEADER,
        tools = tool_descriptions.join("\n\n"),
        directives = BEHAVIORAL_DIRECTIVES,
    }
}
