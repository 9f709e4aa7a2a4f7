use kbeauty_core::ToolName;
use rmcp::{
    ErrorData,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::KBeautyMcp;

/// Payload listing the catalog tools and their required arguments.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct HelpCommands {
    pub commands: Vec<String>,
}

impl Default for HelpCommands {
    fn default() -> Self {
        let mut commands: Vec<String> = ToolName::ALL
            .into_iter()
            .map(|tool| {
                let required = tool.required_arguments();
                if required.is_empty() {
                    format!("{tool} - {}", tool.description())
                } else {
                    format!("{tool}({}) - {}", required.join(", "), tool.description())
                }
            })
            .collect();
        commands.push("health - Returns 'ok'.".to_string());
        Self { commands }
    }
}

#[tool_router(router = tool_router_context, vis = "pub")]
impl KBeautyMcp {
    #[tool(description = "List the catalog tools with their required arguments.")]
    async fn help(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::json(HelpCommands::default())?]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_lists_required_arguments() {
        let help = HelpCommands::default();
        assert_eq!(help.commands.len(), ToolName::ALL.len() + 1);
        assert!(help.commands[0].starts_with("search_brands(query) - "));
        assert!(help.commands.iter().any(|line| line.starts_with("catalog_overview - ")));
    }
}
