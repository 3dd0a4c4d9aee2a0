//! Algorithm trace runner CLI.
//!
//! Provides the `stepviz` binary with subcommands for running any traced
//! algorithm or a scripted container session and printing the resulting
//! steps. Text output plays the role of the step player: numbered step
//! messages at an optional cadence (`--delay-ms`), followed by the result
//! and a per-kind summary. JSON output prints the serialized trace for a
//! downstream renderer.

use std::fmt;
use std::process;
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, Level};

use stepviz_algos::{
    bfs, bfs_connected_components, bfs_shortest_path, binary_search, bubble_sort, dfs,
    dfs_cycle_detection, dfs_iterative, dfs_topological_sort, linear_search, merge_sort,
    quick_sort, Bst,
};
use stepviz_containers::{BoundedQueue, BoundedStack, DynArray};
use stepviz_core::{Graph, NodeId, StepRecord, Trace};

/// Algorithm trace runner and step player.
#[derive(Parser)]
#[command(name = "stepviz", about = "Algorithm trace runner and step player")]
struct Cli {
    /// Print debug-level tracing output.
    #[arg(long, global = true)]
    verbose: bool,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Milliseconds to sleep between printed steps (text output only).
    #[arg(long, global = true, default_value_t = 0)]
    delay_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Trace a sorting algorithm over a comma-separated integer list.
    Sort {
        #[arg(short, long, value_enum)]
        algorithm: SortAlgorithm,

        /// Input values, e.g. "5,3,8,1".
        #[arg(short, long)]
        input: String,
    },

    /// Trace a search for a target value.
    Search {
        #[arg(short, long, value_enum)]
        algorithm: SearchAlgorithm,

        /// Input values (must already be sorted for binary search).
        #[arg(short, long)]
        input: String,

        /// Value to search for.
        #[arg(short, long)]
        target: i64,
    },

    /// Trace a graph traversal.
    Graph {
        #[arg(short, long, value_enum)]
        algorithm: GraphAlgorithm,

        /// Comma-separated node labels; edge endpoints are added on demand.
        #[arg(long)]
        nodes: Option<String>,

        /// Comma-separated edges, `FROM:TO` or `FROM:TO:WEIGHT`.
        #[arg(long, default_value = "")]
        edges: String,

        /// Interpret edges as directed.
        #[arg(long)]
        directed: bool,

        /// Start node label (bfs, dfs, dfs-iterative, shortest-path).
        #[arg(long)]
        start: Option<String>,

        /// Target node label (shortest-path).
        #[arg(long)]
        target: Option<String>,
    },

    /// Trace binary search tree operations.
    Tree {
        /// Values inserted in order to build the tree, e.g. "50,30,70".
        #[arg(long)]
        insert: String,

        /// Value to search for after building.
        #[arg(long)]
        search: Option<i64>,

        /// Value to delete after building.
        #[arg(long)]
        delete: Option<i64>,

        /// Traversal to run last.
        #[arg(long, value_enum)]
        traverse: Option<Traversal>,
    },

    /// Replay a scripted session against an instrumented container.
    Containers {
        #[arg(short, long, value_enum)]
        structure: Structure,

        /// Capacity for queue/stack structures.
        #[arg(long, default_value_t = 5)]
        capacity: usize,

        /// Initial contents for the array structure, e.g. "1,2,3".
        #[arg(long)]
        initial: Option<String>,

        /// Comma-separated ops, e.g. "enqueue:1,dequeue" or "set:0=9".
        #[arg(long)]
        ops: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortAlgorithm {
    Bubble,
    Quick,
    Merge,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SearchAlgorithm {
    Linear,
    Binary,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GraphAlgorithm {
    Bfs,
    Dfs,
    DfsIterative,
    ShortestPath,
    Components,
    CycleDetection,
    Topological,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Traversal {
    InOrder,
    PreOrder,
    PostOrder,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Structure {
    Queue,
    Stack,
    Array,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    let output = Output {
        format: cli.format,
        delay_ms: cli.delay_ms,
    };

    let exit_code = match cli.command {
        Commands::Sort { algorithm, input } => run_sort(algorithm, &input, output),
        Commands::Search {
            algorithm,
            input,
            target,
        } => run_search(algorithm, &input, target, output),
        Commands::Graph {
            algorithm,
            nodes,
            edges,
            directed,
            start,
            target,
        } => run_graph(algorithm, nodes.as_deref(), &edges, directed, start, target, output),
        Commands::Tree {
            insert,
            search,
            delete,
            traverse,
        } => run_tree(&insert, search, delete, traverse, output),
        Commands::Containers {
            structure,
            capacity,
            initial,
            ops,
        } => run_containers(structure, capacity, initial.as_deref(), &ops, output),
    };
    process::exit(exit_code);
}

/// How traces get rendered.
#[derive(Clone, Copy)]
struct Output {
    format: OutputFormat,
    delay_ms: u64,
}

impl Output {
    /// Prints a full trace: steps, result, and a per-kind summary.
    fn trace<R, S>(&self, trace: &Trace<R, S>)
    where
        R: Serialize + fmt::Debug,
        S: StepRecord + Serialize,
    {
        match self.format {
            OutputFormat::Json => match serde_json::to_string_pretty(trace) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("error: failed to serialize trace: {}", e),
            },
            OutputFormat::Text => {
                self.steps(&trace.steps);
                let summary = trace.summary();
                println!("result: {:?}", trace.result);
                println!("steps: {}", summary.total);
            }
        }
    }

    /// Prints a bare step list (container logs).
    fn steps<S>(&self, steps: &[S])
    where
        S: StepRecord + Serialize,
    {
        match self.format {
            OutputFormat::Json => match serde_json::to_string_pretty(steps) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("error: failed to serialize steps: {}", e),
            },
            OutputFormat::Text => {
                for (i, step) in steps.iter().enumerate() {
                    println!("{:>4}  [{}] {}", i + 1, step.kind(), step);
                    if self.delay_ms > 0 {
                        thread::sleep(Duration::from_millis(self.delay_ms));
                    }
                }
            }
        }
    }
}

/// Execute the sort subcommand.
fn run_sort(algorithm: SortAlgorithm, input: &str, output: Output) -> i32 {
    let values = match parse_values(input) {
        Ok(v) => v,
        Err(msg) => {
            eprintln!("error: {}", msg);
            return 1;
        }
    };
    debug!(count = values.len(), "running {:?} sort", algorithm);

    match algorithm {
        SortAlgorithm::Bubble => output.trace(&bubble_sort(&values)),
        SortAlgorithm::Quick => output.trace(&quick_sort(&values)),
        SortAlgorithm::Merge => output.trace(&merge_sort(&values)),
    }
    0
}

/// Execute the search subcommand.
fn run_search(algorithm: SearchAlgorithm, input: &str, target: i64, output: Output) -> i32 {
    let values = match parse_values(input) {
        Ok(v) => v,
        Err(msg) => {
            eprintln!("error: {}", msg);
            return 1;
        }
    };

    if matches!(algorithm, SearchAlgorithm::Binary) && values.windows(2).any(|w| w[0] > w[1]) {
        eprintln!("error: binary search requires a sorted input");
        return 1;
    }
    debug!(count = values.len(), target, "running {:?} search", algorithm);

    match algorithm {
        SearchAlgorithm::Linear => output.trace(&linear_search(&values, &target)),
        SearchAlgorithm::Binary => output.trace(&binary_search(&values, &target)),
    }
    0
}

/// Execute the graph subcommand.
fn run_graph(
    algorithm: GraphAlgorithm,
    nodes: Option<&str>,
    edges: &str,
    directed: bool,
    start: Option<String>,
    target: Option<String>,
    output: Output,
) -> i32 {
    let graph = match build_graph(nodes, edges, directed) {
        Ok(g) => g,
        Err(msg) => {
            eprintln!("error: {}", msg);
            return 1;
        }
    };
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "running {:?}",
        algorithm
    );

    // Whole-graph algorithms need no start node.
    match algorithm {
        GraphAlgorithm::Components => {
            output.trace(&bfs_connected_components(&graph));
            return 0;
        }
        GraphAlgorithm::CycleDetection => {
            output.trace(&dfs_cycle_detection(&graph));
            return 0;
        }
        GraphAlgorithm::Topological => {
            output.trace(&dfs_topological_sort(&graph));
            return 0;
        }
        _ => {}
    }

    let Some(start) = start.as_deref().and_then(|l| graph.node_by_label(l)) else {
        eprintln!("error: --start must name a node in the graph");
        return 1;
    };

    let result = match algorithm {
        GraphAlgorithm::Bfs => bfs(&graph, start).map(|t| output.trace(&t)),
        GraphAlgorithm::Dfs => dfs(&graph, start).map(|t| output.trace(&t)),
        GraphAlgorithm::DfsIterative => dfs_iterative(&graph, start).map(|t| output.trace(&t)),
        GraphAlgorithm::ShortestPath => {
            let Some(target) = target.as_deref().and_then(|l| graph.node_by_label(l)) else {
                eprintln!("error: --target must name a node in the graph");
                return 1;
            };
            bfs_shortest_path(&graph, start, target).map(|t| output.trace(&t))
        }
        _ => unreachable!("whole-graph algorithms handled above"),
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("error: {}", e);
            1
        }
    }
}

/// Execute the tree subcommand.
fn run_tree(
    insert: &str,
    search: Option<i64>,
    delete: Option<i64>,
    traverse: Option<Traversal>,
    output: Output,
) -> i32 {
    let values = match parse_values(insert) {
        Ok(v) => v,
        Err(msg) => {
            eprintln!("error: {}", msg);
            return 1;
        }
    };

    let mut tree: Bst<i64> = Bst::new();
    for value in values {
        println!("== insert {}", value);
        output.trace(&tree.insert(value));
    }

    if let Some(value) = search {
        println!("== search {}", value);
        output.trace(&tree.search(&value));
    }
    if let Some(value) = delete {
        println!("== delete {}", value);
        output.trace(&tree.remove(&value));
    }
    if let Some(traversal) = traverse {
        match traversal {
            Traversal::InOrder => {
                println!("== in-order traversal");
                output.trace(&tree.in_order());
            }
            Traversal::PreOrder => {
                println!("== pre-order traversal");
                output.trace(&tree.pre_order());
            }
            Traversal::PostOrder => {
                println!("== post-order traversal");
                output.trace(&tree.post_order());
            }
        }
    }
    0
}

/// Execute the containers subcommand.
fn run_containers(
    structure: Structure,
    capacity: usize,
    initial: Option<&str>,
    ops: &str,
    output: Output,
) -> i32 {
    let ops: Vec<&str> = ops
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    match structure {
        Structure::Queue => {
            let mut queue: BoundedQueue<i64> = BoundedQueue::new(capacity);
            for op in ops {
                // Failed operations are already narrated as error steps.
                if let Err(msg) = apply_queue_op(&mut queue, op) {
                    eprintln!("error: {}", msg);
                    return 1;
                }
            }
            output.steps(queue.steps());
            println!("contents: {:?}", queue.contents());
        }
        Structure::Stack => {
            let mut stack: BoundedStack<i64> = BoundedStack::new(capacity);
            for op in ops {
                if let Err(msg) = apply_stack_op(&mut stack, op) {
                    eprintln!("error: {}", msg);
                    return 1;
                }
            }
            output.steps(stack.steps());
            println!("contents: {:?}", stack.contents());
        }
        Structure::Array => {
            let items = match initial.map(parse_values).transpose() {
                Ok(items) => items.unwrap_or_default(),
                Err(msg) => {
                    eprintln!("error: {}", msg);
                    return 1;
                }
            };
            let mut array = DynArray::new(items);
            for op in ops {
                if let Err(msg) = apply_array_op(&mut array, op) {
                    eprintln!("error: {}", msg);
                    return 1;
                }
            }
            output.steps(array.steps());
            println!("contents: {:?}", array.items());
        }
    }
    0
}

/// Applies one scripted op to a queue. Container failures are narrated in
/// the step log, so only unknown op syntax is an error here.
fn apply_queue_op(queue: &mut BoundedQueue<i64>, op: &str) -> Result<(), String> {
    match parse_op(op)? {
        ("enqueue", Some(value)) => {
            let _ = queue.enqueue(value);
            Ok(())
        }
        ("dequeue", None) => {
            let _ = queue.dequeue();
            Ok(())
        }
        _ => Err(format!("unknown queue op '{}'", op)),
    }
}

/// Applies one scripted op to a stack.
fn apply_stack_op(stack: &mut BoundedStack<i64>, op: &str) -> Result<(), String> {
    match parse_op(op)? {
        ("push", Some(value)) => {
            let _ = stack.push(value);
            Ok(())
        }
        ("pop", None) => {
            let _ = stack.pop();
            Ok(())
        }
        ("peek", None) => {
            let _ = stack.peek();
            Ok(())
        }
        ("search", Some(value)) => {
            let _ = stack.search(&value);
            Ok(())
        }
        _ => Err(format!("unknown stack op '{}'", op)),
    }
}

/// Applies one scripted op to an array. `set` uses `set:INDEX=VALUE`.
fn apply_array_op(array: &mut DynArray<i64>, op: &str) -> Result<(), String> {
    if let Some(rest) = op.strip_prefix("set:") {
        let (index, value) = rest
            .split_once('=')
            .ok_or_else(|| format!("expected set:INDEX=VALUE, got '{}'", op))?;
        let index: usize = index
            .trim()
            .parse()
            .map_err(|_| format!("invalid index in '{}'", op))?;
        let value: i64 = value
            .trim()
            .parse()
            .map_err(|_| format!("invalid value in '{}'", op))?;
        let _ = array.set(index, value);
        return Ok(());
    }

    match parse_op(op)? {
        ("push", Some(value)) => {
            array.push(value);
            Ok(())
        }
        ("pop", None) => {
            let _ = array.pop();
            Ok(())
        }
        ("get", Some(index)) if index >= 0 => {
            let _ = array.get(index as usize);
            Ok(())
        }
        _ => Err(format!("unknown array op '{}'", op)),
    }
}

/// Splits `name` or `name:value` into its parts.
fn parse_op(op: &str) -> Result<(&str, Option<i64>), String> {
    match op.split_once(':') {
        None => Ok((op, None)),
        Some((name, value)) => {
            let value: i64 = value
                .trim()
                .parse()
                .map_err(|_| format!("invalid value in op '{}'", op))?;
            Ok((name, Some(value)))
        }
    }
}

/// Parses a comma-separated integer list.
fn parse_values(input: &str) -> Result<Vec<i64>, String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| format!("invalid integer '{}'", s))
        })
        .collect()
}

/// Builds a graph from `--nodes` and `--edges` specs. Edge endpoints that
/// are not pre-declared are added in first-appearance order.
fn build_graph(nodes: Option<&str>, edges: &str, directed: bool) -> Result<Graph, String> {
    let mut graph = Graph::new(directed);

    if let Some(nodes) = nodes {
        for label in nodes.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if graph.node_by_label(label).is_some() {
                return Err(format!("duplicate node label '{}'", label));
            }
            graph.add_node(label);
        }
    }

    for spec in edges.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let parts: Vec<&str> = spec.split(':').collect();
        let (from, to, weight) = match parts.as_slice() {
            [from, to] => (*from, *to, None),
            [from, to, weight] => {
                let weight: f64 = weight
                    .trim()
                    .parse()
                    .map_err(|_| format!("invalid edge weight in '{}'", spec))?;
                (*from, *to, Some(weight))
            }
            _ => return Err(format!("expected FROM:TO or FROM:TO:WEIGHT, got '{}'", spec)),
        };

        let from = node_or_add(&mut graph, from);
        let to = node_or_add(&mut graph, to);
        graph
            .add_edge(from, to, weight)
            .map_err(|e| e.to_string())?;
    }

    Ok(graph)
}

fn node_or_add(graph: &mut Graph, label: &str) -> NodeId {
    match graph.node_by_label(label) {
        Some(id) => id,
        None => graph.add_node(label),
    }
}
