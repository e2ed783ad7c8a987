// VoxFlow — Command interpreter: template selection and customization

pub mod rules;

use crate::catalog::Catalog;
use crate::workflow::{NodeType, WorkflowNode, WorkflowTemplate};
use rules::RuleSet;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InterpreterError {
    #[error("workflow catalog is empty, no template can be selected")]
    EmptyCatalog,
}

const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_millis(1000);

/// Turns a natural-language command into a customized workflow node
/// sequence. Pure computation over a read-only catalog; safe to call from
/// any number of tasks concurrently.
pub struct Interpreter {
    catalog: Arc<Catalog>,
    rules: RuleSet,
    processing_delay: Duration,
}

impl Interpreter {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_delay(catalog, DEFAULT_PROCESSING_DELAY)
    }

    pub fn with_delay(catalog: Arc<Catalog>, processing_delay: Duration) -> Self {
        Self {
            catalog,
            rules: RuleSet::standard(),
            processing_delay,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Interpret a command. Suspends once for the simulated processing
    /// latency, then runs the synchronous selection + customization. No
    /// partial results; one result or one failure per call.
    pub async fn interpret(&self, command: &str) -> Result<Vec<WorkflowNode>, InterpreterError> {
        if !self.processing_delay.is_zero() {
            tokio::time::sleep(self.processing_delay).await;
        }
        self.select_workflow(command)
    }

    /// Select the best-matching template and return a customized deep copy
    /// of its node sequence. The catalog prototype is never touched.
    pub fn select_workflow(&self, command: &str) -> Result<Vec<WorkflowNode>, InterpreterError> {
        let template = self.select_template(command)?;
        tracing::debug!(template = %template.id, "selected workflow template");
        Ok(self.customize(template.nodes.clone(), command))
    }

    /// Score every template and pick the winner. Ties break by catalog
    /// order; a zero top score resolves to the fallback template.
    fn select_template(&self, command: &str) -> Result<&WorkflowTemplate, InterpreterError> {
        if self.catalog.is_empty() {
            return Err(InterpreterError::EmptyCatalog);
        }

        let lower = command.to_lowercase();
        let mut best: Option<&WorkflowTemplate> = None;
        let mut highest = 0usize;

        for template in self.catalog.iter() {
            let score = template
                .keywords
                .iter()
                .filter(|kw| lower.contains(kw.to_lowercase().as_str()))
                .count();
            if score > highest {
                highest = score;
                best = Some(template);
            }
        }

        match best {
            Some(template) => Ok(template),
            None => self.catalog.fallback().ok_or(InterpreterError::EmptyCatalog),
        }
    }

    /// Apply the customization rule chains to an already-copied node
    /// sequence. Input and output nodes pass through unchanged.
    pub fn customize(&self, nodes: Vec<WorkflowNode>, command: &str) -> Vec<WorkflowNode> {
        let lower = command.to_lowercase();
        nodes
            .into_iter()
            .map(|mut node| {
                match node.node_type {
                    NodeType::Generation => {
                        self.rules.customize_generation(&mut node, &lower, command)
                    }
                    NodeType::Processing => self.rules.customize_processing(&mut node, &lower),
                    NodeType::Input | NodeType::Output => {}
                }
                node
            })
            .collect()
    }
}
