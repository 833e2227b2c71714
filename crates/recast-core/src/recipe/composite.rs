//! Ordered composition of recipes.

use std::time::Duration;

use crate::errors::TransformError;
use crate::model::SourceFile;
use crate::recipe::{ExecutionContext, Precondition, Recipe, Visitor};

/// An ordered aggregate of recipes exposing the single-recipe
/// contract. Its visitor is the sequential composition of its
/// children's visitors.
pub struct CompositeRecipe {
    display_name: String,
    description: String,
    estimated_effort: Duration,
    recipes: Vec<Box<dyn Recipe>>,
}

impl CompositeRecipe {
    pub fn new(
        display_name: impl Into<String>,
        description: impl Into<String>,
        estimated_effort: Duration,
        recipes: Vec<Box<dyn Recipe>>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            description: description.into(),
            estimated_effort,
            recipes,
        }
    }
}

impl Recipe for CompositeRecipe {
    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn estimated_effort(&self) -> Duration {
        self.estimated_effort
    }

    fn children(&self) -> &[Box<dyn Recipe>] {
        &self.recipes
    }

    fn visitor(&self) -> Box<dyn Visitor> {
        Box::new(CompositeVisitor::from_recipes(&self.recipes))
    }
}

struct ChainStep {
    name: String,
    precondition: Option<Box<dyn Precondition>>,
    visitor: Box<dyn Visitor>,
}

/// Executes child visitors strictly in configured order, feeding each
/// one's output file to the next.
///
/// Each child's precondition is checked against the *current* file at
/// that point in the chain, so a rule can become applicable only after
/// an earlier rule ran. An error from any child aborts the chain for
/// that file; partial results are discarded by the caller. Cancellation
/// is checked between children.
pub struct CompositeVisitor {
    steps: Vec<ChainStep>,
}

impl CompositeVisitor {
    pub fn from_recipes(recipes: &[Box<dyn Recipe>]) -> Self {
        let steps = recipes
            .iter()
            .map(|recipe| ChainStep {
                name: recipe.display_name().to_string(),
                precondition: recipe.precondition(),
                visitor: recipe.visitor(),
            })
            .collect();
        Self { steps }
    }
}

impl Visitor for CompositeVisitor {
    fn visit(
        &self,
        file: SourceFile,
        ctx: &mut ExecutionContext,
    ) -> Result<SourceFile, TransformError> {
        let mut current = file;
        for step in &self.steps {
            if ctx.is_cancelled() {
                return Err(TransformError::Cancelled {
                    rule: step.name.clone(),
                });
            }
            if let Some(precondition) = &step.precondition {
                if !precondition.check(&current) {
                    tracing::debug!(rule = %step.name, path = %current.path(), "precondition not met, skipping");
                    continue;
                }
            }
            current = step.visitor.visit(current, ctx)?;
        }
        Ok(current)
    }
}
