//! Role framing — seeds the system-prompt addendum from role and task state.

use async_trait::async_trait;
use promptloom_core::context::EnhanceContext;
use promptloom_core::error::StrategyError;
use promptloom_core::output::AssemblyOutput;
use promptloom_core::strategy::Strategy;

/// Priority-10 stage: role addendum, assignment summary, pending todos.
///
/// Pure function of the context — no I/O, and missing optional fields
/// degrade to omission rather than error.
pub struct RoleFraming;

#[async_trait]
impl Strategy for RoleFraming {
    fn name(&self) -> &str {
        "role_framing"
    }

    fn priority(&self) -> i32 {
        10
    }

    async fn enhance(
        &self,
        output: AssemblyOutput,
        ctx: &EnhanceContext,
    ) -> Result<AssemblyOutput, StrategyError> {
        let mut sections: Vec<String> = Vec::new();

        let role_append = ctx.role.system_prompt_append.trim();
        if !role_append.is_empty() {
            sections.push(role_append.to_string());
        }

        sections.push(format!(
            "## Assignment\nRole: {}\nPosition: {} ({})\nTask {} [{}]: {}",
            ctx.role.name,
            ctx.position.id,
            ctx.position.state,
            ctx.task.id,
            ctx.task.kind,
            ctx.task.payload,
        ));

        if let Some(todos) = &ctx.todos
            && !todos.is_empty()
        {
            let mut block = String::from("## Todo\n");
            for item in todos {
                let mark = if item.done { "x" } else { " " };
                block.push_str(&format!("- [{}] {}\n", mark, item.text));
            }
            sections.push(block.trim_end().to_string());
        }

        let framing = sections.join("\n\n");
        let system_prompt_append = if output.system_prompt_append.is_empty() {
            framing
        } else {
            format!("{}\n\n{}", output.system_prompt_append, framing)
        };

        Ok(AssemblyOutput {
            prompt: output.prompt,
            system_prompt_append,
            history: output.history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::test_support::context_with;
    use promptloom_core::context::TodoItem;

    #[tokio::test]
    async fn injects_role_addendum_and_assignment() {
        let ctx = context_with(|_| {});
        let out = RoleFraming
            .enhance(AssemblyOutput::seed("go"), &ctx)
            .await
            .unwrap();

        assert!(out.system_prompt_append.contains("Be precise."));
        assert!(out.system_prompt_append.contains("## Assignment"));
        assert!(out.system_prompt_append.contains("Role: reviewer"));
        assert_eq!(out.prompt, "go");
        assert!(out.history.is_none());
    }

    #[tokio::test]
    async fn renders_todos_as_checkboxes() {
        let ctx = context_with(|c| {
            c.todos = Some(vec![
                TodoItem {
                    text: "read the diff".into(),
                    done: true,
                },
                TodoItem {
                    text: "leave comments".into(),
                    done: false,
                },
            ]);
        });
        let out = RoleFraming
            .enhance(AssemblyOutput::seed("go"), &ctx)
            .await
            .unwrap();

        assert!(out.system_prompt_append.contains("- [x] read the diff"));
        assert!(out.system_prompt_append.contains("- [ ] leave comments"));
    }

    #[tokio::test]
    async fn empty_todo_list_renders_nothing() {
        let ctx = context_with(|c| c.todos = Some(vec![]));
        let out = RoleFraming
            .enhance(AssemblyOutput::seed("go"), &ctx)
            .await
            .unwrap();
        assert!(!out.system_prompt_append.contains("## Todo"));
    }

    #[tokio::test]
    async fn appends_after_existing_content() {
        let ctx = context_with(|_| {});
        let mut seed = AssemblyOutput::seed("go");
        seed.system_prompt_append = "earlier".into();
        let out = RoleFraming.enhance(seed, &ctx).await.unwrap();
        assert!(out.system_prompt_append.starts_with("earlier\n\n"));
    }
}
