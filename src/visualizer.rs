use crate::{Goal, Plan, Result, Vocabulary};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// A visualizer for crafting plans that generates Graphviz DOT files
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanVisualizer;

impl PlanVisualizer {
    /// Create a new plan visualizer
    pub fn new() -> Self {
        Self
    }

    /// Write a DOT digraph of the plan path to `out`
    pub fn write_plan<W: Write>(&self, plan: &Plan, goal: &Goal, out: &mut W) -> Result<()> {
        let vocabulary = plan.vocabulary();

        writeln!(out, "digraph CraftingPlan {{")?;
        writeln!(out, "    rankdir=LR;")?;
        writeln!(out, "    node [shape=box, style=filled, fillcolor=lightblue];")?;
        writeln!(out, "    edge [fontsize=10];")?;

        let last = plan.steps().len().saturating_sub(1);
        for (i, step) in plan.steps().iter().enumerate() {
            let (title, color) = match i {
                0 => ("Initial State", "lightgreen"),
                i if i == last => ("Goal State", "lightpink"),
                _ => ("Step", "lightblue"),
            };
            writeln!(
                out,
                "    step_{} [label=\"{}\\nt={}\\n{}\", fillcolor={}];",
                i,
                title,
                step.cost,
                escape(&step.state.display(vocabulary).to_string()),
                color
            )?;
        }

        for (i, pair) in plan.steps().windows(2).enumerate() {
            let action = pair[1].action.as_deref().unwrap_or("?");
            writeln!(
                out,
                "    step_{} -> step_{} [label=\"{} (+{})\"];",
                i,
                i + 1,
                escape(action),
                pair[1].cost.saturating_sub(pair[0].cost)
            )?;
        }

        writeln!(
            out,
            "    goal [label=\"Goal\\n{}\", shape=note, fillcolor=lightyellow];",
            escape(&Self::goal_to_string(goal, vocabulary))
        )?;
        writeln!(out, "    step_{} -> goal [style=dashed, label=\"satisfies\"];", last)?;

        writeln!(out, "}}")?;
        Ok(())
    }

    /// Write the DOT digraph to a file
    pub fn visualize_plan(&self, plan: &Plan, goal: &Goal, path: impl AsRef<Path>) -> Result<()> {
        let mut file = BufWriter::new(File::create(path)?);
        self.write_plan(plan, goal, &mut file)?;
        file.flush()?;
        Ok(())
    }

    fn goal_to_string(goal: &Goal, vocabulary: &Vocabulary) -> String {
        goal.targets()
            .iter()
            .map(|&(id, quantity)| format!("{} >= {}", vocabulary.name(id), quantity))
            .collect::<Vec<_>>()
            .join("\\n")
    }
}

fn escape(label: &str) -> String {
    label.replace('"', "\\\"")
}
