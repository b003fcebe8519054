//! Grover's Search Algorithm Demo
//!
//! Builds a search circuit with Ampl's amplification engine and checks the
//! success probability on a dense simulation.

use anyhow::{Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ampl_demos::circuits::{grover_circuit, success_probability};
use ampl_demos::{print_header, print_result, print_section, print_success};

/// Largest register simulated densely.
const MAX_SIMULATED_QUBITS: u32 = 8;

#[derive(Parser, Debug)]
#[command(name = "demo-grover")]
#[command(about = "Build and check a Grover search circuit")]
struct Args {
    /// Number of qubits (search space size = 2^n)
    #[arg(short = 'n', long, default_value = "3", value_parser = clap::value_parser!(u32).range(1..=12))]
    qubits: u32,

    /// Marked state to search for (0 to 2^n - 1)
    #[arg(short, long, default_value = "5")]
    marked: usize,

    /// Number of amplification rounds
    #[arg(short, long, default_value = "2")]
    iterations: usize,

    /// Print the instruction list
    #[arg(long)]
    show_circuit: bool,

    /// Print the circuit as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let max_state = (1_usize << args.qubits) - 1;
    if args.marked > max_state {
        bail!(
            "marked state {} exceeds maximum {} for {} qubits",
            args.marked,
            max_state,
            args.qubits
        );
    }

    print_header("Grover's Search Algorithm Demo");

    print_section("Problem Setup");
    print_result("Qubits", args.qubits);
    print_result("Search space size", 1_usize << args.qubits);
    print_result(
        "Marked state",
        format!(
            "|{}⟩ = |{:0width$b}⟩",
            args.marked,
            args.marked,
            width = args.qubits as usize
        ),
    );
    print_result("Amplification rounds", args.iterations);

    print_section("Circuit Generation");
    let circuit = grover_circuit(args.qubits, args.marked, args.iterations)?;
    info!(instructions = circuit.len(), "circuit built");
    print_result("Instructions", circuit.len());
    print_result("Depth", circuit.depth());
    let mut ops: Vec<_> = circuit.count_ops().into_iter().collect();
    ops.sort();
    for (name, count) in ops {
        print_result(&format!("  {name}"), count);
    }

    if args.show_circuit {
        print_section("Instructions");
        println!("{circuit}");
    }

    if args.json {
        print_section("JSON");
        println!("{}", circuit.to_json()?);
    }

    if args.qubits <= MAX_SIMULATED_QUBITS {
        print_section("Dense Simulation");
        let p = success_probability(&circuit, args.qubits, args.marked)?;
        print_result("Success probability", format!("{:.1}%", p * 100.0));
    }

    println!();
    print_success("Grover demo complete!");
    Ok(())
}
