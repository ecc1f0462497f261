use semnet::config::NetworkConfig;
use semnet::console::format_activations;
use semnet::demo;
use semnet::network::{Network, NoHooks};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() >= 2 && (args[1] == "--help" || args[1] == "-h" || args[1] == "help") {
        print_help();
        return;
    }

    let result = match args.get(1).map(String::as_str) {
        None | Some("periodic") => run_periodic(parse_arg(&args, 2, 50)),
        Some("soak") => run_soak(
            parse_arg(&args, 2, 1024),
            parse_arg(&args, 3, 1000),
            parse_arg(&args, 4, 42),
        ),
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            print_help();
            std::process::exit(2);
        }
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn print_help() {
    println!("semnet (threshold-firing activation network)");
    println!("usage:");
    println!("  cargo run -- periodic [steps]                 a/b oscillator demo");
    println!("  cargo run -- soak [neurons] [steps] [seed]    random network soak");
    println!("  cargo run -- --help");
    println!("interactive console: cargo run --bin semnet-cli -- <wiring.json>");
}

fn parse_arg<T: std::str::FromStr>(args: &[String], index: usize, default: T) -> T {
    args.get(index).and_then(|s| s.parse().ok()).unwrap_or(default)
}

// Writes a b a b ... using a one-neuron latch.
fn run_periodic(steps: usize) -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "This network writes a periodic sequence. Its permanent neuron stores which \
         symbol comes next and flips every step.\nOutput:"
    );
    let mut net = demo::periodic_network()?;
    for _ in 0..steps {
        net.step()?;
    }
    println!("... (forever)\nWith activations at the end of each step:");

    net.hooks_mut().set_print_to_console(false);
    for _ in 0..10 {
        net.step()?;
        let out = net.hooks_mut().flush_output();
        println!("{} {}", format_activations(net.activations(), 20, 40), out);
    }
    Ok(())
}

fn run_soak(neurons: usize, steps: usize, seed: u64) -> Result<(), Box<dyn std::error::Error>> {
    let permanent = neurons / 8;
    let cfg = NetworkConfig::random(neurons, permanent, 3, seed);
    let mut net = Network::from_config(&cfg, NoHooks)?;
    info!(neurons, permanent, links = net.total_links(), seed, "soak start");

    let mut total_fired = 0usize;
    let mut max_fired = 0usize;
    for _ in 0..steps {
        let fired = net.step()?;
        total_fired += fired;
        max_fired = max_fired.max(fired);
    }

    let d = net.diagnostics();
    println!("neurons:        {}", d.neuron_count);
    println!("permanent:      {}", d.permanent_count);
    println!("links:          {}", d.link_count);
    println!("steps:          {}", d.steps);
    println!("fired (total):  {}", total_fired);
    println!("fired (max):    {}", max_fired);
    println!("active at end:  {}", d.active_count);
    Ok(())
}
