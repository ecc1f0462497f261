//! Interactive console for a wired network.
//!
//! Examples:
//!   semnet-cli wiring/echo.json
//!   semnet-cli --periodic
//!
//! Type text to feed it to the network's sensors; effector output is printed
//! as it is produced. `quit` exits.

use std::io::{self, BufRead, Write};
use std::process;

use semnet::console::{format_activations, ConsoleHooks, WiringFile};
use semnet::demo;
use semnet::network::Network;
use semnet::observer::NetworkAdapter;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const BANNER: &str = "Semantic network - interactive mode
Type 'quit' to exit, 'info' for network info, 'all' to see all neuron activations, \
'perm' to see permanent neurons, 'repr' to see the embedding, 'sensors' to see sensors, \
'effectors' to see effectors, 'json' for a snapshot.";

fn usage() -> ! {
    eprintln!("semnet-cli (interactive console for a wired network)");
    eprintln!("Usage: semnet-cli <wiring.json>");
    eprintln!("       semnet-cli --periodic");
    process::exit(1);
}

fn load_network() -> Network<i8, ConsoleHooks> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.first().map(String::as_str) {
        None | Some("-h") | Some("--help") => usage(),
        Some("--periodic") => demo::periodic_network(),
        Some(path) => WiringFile::from_path(path).and_then(|w| w.build()),
    };
    match result {
        Ok(net) => net,
        Err(e) => {
            eprintln!("Could not load network: {}", e);
            process::exit(1);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let mut net = load_network();
    info!(
        neurons = net.len(),
        permanent = net.permanent_count(),
        links = net.total_links(),
        "network loaded"
    );

    println!("{}", BANNER);
    println!("{}", "_".repeat(50));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("\n> ");
        let _ = io::stdout().flush();

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("Error: {}", e);
                break;
            }
            None => break,
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input.to_lowercase().as_str() {
            "quit" => break,
            "info" => print!("{}", net.info()),
            "repr" => println!("{}", format_activations(&net.embedding(), 20, 40)),
            "perm" => println!(
                "{}",
                format_activations(&net.activations()[..net.permanent_count()], 20, 40)
            ),
            "all" => println!("{}", format_activations(net.activations(), 20, 100)),
            "sensors" => print!("{}", net.hooks().describe_sensors()),
            "effectors" => print!("{}", net.hooks().describe_effectors()),
            "json" => match serde_json::to_string_pretty(&NetworkAdapter::new(&net).snapshot()) {
                Ok(s) => println!("{}", s),
                Err(e) => eprintln!("Error: {}", e),
            },
            _ => {
                if let Err(e) = net.process_input(input) {
                    warn!("{}", e);
                    eprintln!("Error: {}", e);
                }
            }
        }
    }
}
