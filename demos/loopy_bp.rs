use std::{collections::HashMap, error::Error, fs, path::PathBuf};

use clap::Parser;
use dfactor::core::{random_message_initializer, Variable};
use dfactor::graph::{Messages, NamedFactor, NamedVariable, NonZeroCount, SparseFactor, VertexId};
use rand::thread_rng;
use serde::Deserialize;

/// Loopy sum-product belief propagation over a factor graph read from YAML
#[derive(Parser, Debug)]
struct Args {
    /// Path to a factor graph description
    #[arg(long, default_value = "demos/frustrated_loop.yaml")]
    graph: PathBuf,

    /// Maximal number of iterations
    #[arg(long, default_value_t = 1000)]
    max_iterations: usize,

    /// Messages are considered converged when they change less than the threshold
    #[arg(long, default_value_t = 1e-10)]
    threshold: f64,

    /// Check declared numbers of nonzero entries of factors
    #[arg(long)]
    verify_counts: bool,
}

#[derive(Deserialize, Debug)]
struct VariableDescription {
    id: VertexId,
    states: usize,
}

#[derive(Deserialize, Debug)]
struct GraphDescription {
    variables: Vec<VariableDescription>,
    factors: Vec<SparseFactor>,
}

// `to_destination` flows from a variable to a factor, `to_source` the other way
struct Edge {
    factor: usize,
    variable: usize,
    position: usize,
    messages: Messages,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let description: GraphDescription = serde_yaml::from_str(&fs::read_to_string(&args.graph)?)?;
    let policy = if args.verify_counts {
        NonZeroCount::Verified
    } else {
        NonZeroCount::Trusted
    };
    // graph -------------------------------------------------------------------------------
    let var_indices: HashMap<VertexId, usize> = description
        .variables
        .iter()
        .enumerate()
        .map(|(i, v)| (v.id, i))
        .collect();
    let mut variables: Vec<_> = description
        .variables
        .iter()
        .map(|v| NamedVariable::new(v.id, Variable::uniform(v.states)))
        .collect();
    let mut factors = description
        .factors
        .iter()
        .map(|f| f.build(policy))
        .collect::<Result<Vec<NamedFactor>, _>>()?;
    let mut initializer = random_message_initializer(thread_rng());
    let mut edges = Vec::new();
    for (f, factor) in factors.iter().enumerate() {
        for (position, var) in factor.variables().iter().enumerate() {
            let variable = *var_indices
                .get(var)
                .ok_or_else(|| format!("factor {} refers to unknown variable {}", factor.id(), var))?;
            let size = factor.potential().var_len(position)?;
            edges.push(Edge {
                factor: f,
                variable,
                position,
                messages: Messages::initial(size, &mut initializer),
            });
        }
    }
    // message passing ---------------------------------------------------------------------
    let mut iterations = 0;
    let mut discrepancy = f64::MAX;
    while discrepancy > args.threshold && iterations < args.max_iterations {
        iterations += 1;
        for (f, factor) in factors.iter_mut().enumerate() {
            let mut belief = factor.potential().clone();
            for edge in edges.iter().filter(|e| e.factor == f) {
                belief = belief.product(&edge.messages.to_destination, edge.position)?;
            }
            factor.set_belief(belief)?;
        }
        discrepancy = 0f64;
        for edge in edges.iter_mut() {
            let msg = factors[edge.factor]
                .belief()
                .marginal_of_division(&edge.messages.to_destination, edge.position)?
                .normalize();
            discrepancy = discrepancy.max(edge.messages.to_source.max_diff(&msg)?);
            edge.messages.to_source = msg;
        }
        for (v, variable) in variables.iter_mut().enumerate() {
            let mut belief = Variable::from_fn(variable.belief().size(), || 1f64);
            for edge in edges.iter().filter(|e| e.variable == v) {
                belief = belief.product(&edge.messages.to_source)?;
            }
            variable.set_belief(belief);
        }
        for edge in edges.iter_mut() {
            edge.messages.to_destination = variables[edge.variable]
                .belief()
                .divide(&edge.messages.to_source)?
                .normalize();
        }
    }
    if discrepancy > args.threshold {
        println!(
            "Message passing has not converged after {} iterations, last iteration discrepancy: {}",
            iterations, discrepancy
        );
    } else {
        println!(
            "Message passing has converged after {} iterations, last iteration discrepancy: {}",
            iterations, discrepancy
        );
    }
    for variable in &variables {
        println!("{}: {}", variable.id(), variable.belief().normalize());
    }
    Ok(())
}
