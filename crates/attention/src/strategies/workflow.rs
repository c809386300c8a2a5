//! Workflow injection — shows the agent the source code that drives it.

use async_trait::async_trait;
use promptloom_core::context::EnhanceContext;
use promptloom_core::error::StrategyError;
use promptloom_core::output::AssemblyOutput;
use promptloom_core::strategy::Strategy;

/// Priority-20 stage: appends the agent's own workflow source to the prompt
/// so it can reason about — and propose edits to — its own behavior.
///
/// With no workflow source in the context this stage is the identity: it
/// returns its input untouched rather than appending empty sections.
pub struct WorkflowInjection {
    capability: String,
}

impl WorkflowInjection {
    /// `capability` is the name of the operation the agent invokes to
    /// request a change to its own workflow.
    pub fn new(capability: impl Into<String>) -> Self {
        Self {
            capability: capability.into(),
        }
    }
}

#[async_trait]
impl Strategy for WorkflowInjection {
    fn name(&self) -> &str {
        "workflow_injection"
    }

    fn priority(&self) -> i32 {
        20
    }

    async fn enhance(
        &self,
        output: AssemblyOutput,
        ctx: &EnhanceContext,
    ) -> Result<AssemblyOutput, StrategyError> {
        let Some(source) = &ctx.workflow_source else {
            return Ok(output);
        };

        let mut prompt = output.prompt;
        prompt.push_str(&format!(
            "\n\n## Your Workflow\n\
             The program below is the workflow currently driving you.\n\
             If a change to it would help you work better, invoke `{}` with the edited source.\n\
             ```\n{}\n```",
            self.capability,
            source.trim_end(),
        ));

        Ok(AssemblyOutput {
            prompt,
            system_prompt_append: output.system_prompt_append,
            history: output.history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::test_support::context_with;

    fn strategy() -> WorkflowInjection {
        WorkflowInjection::new("request_workflow_change")
    }

    #[tokio::test]
    async fn identity_without_workflow_source() {
        let ctx = context_with(|_| {});
        let seed = AssemblyOutput::seed("original prompt");
        let out = strategy().enhance(seed.clone(), &ctx).await.unwrap();
        assert_eq!(out, seed);
    }

    #[tokio::test]
    async fn appends_fenced_source_block() {
        let ctx = context_with(|c| {
            c.workflow_source = Some("loop { poll(); act(); }".into());
        });
        let out = strategy()
            .enhance(AssemblyOutput::seed("original prompt"), &ctx)
            .await
            .unwrap();

        assert!(out.prompt.starts_with("original prompt"));
        assert!(out.prompt.contains("## Your Workflow"));
        assert!(out.prompt.contains("`request_workflow_change`"));
        assert!(out.prompt.contains("```\nloop { poll(); act(); }\n```"));
        assert!(out.system_prompt_append.is_empty());
    }
}
