use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::process;

use log::{error, info};

use scheduler::notifier::WriterNotifier;
use scheduler::{CompletionMessage, Endpoint, Pid, PolicyKind, Simulation, Timestamp};

mod logger;
mod workload;

use workload::Workload;

/// Gives up on workloads that need more ticks than this
const MAX_TICKS: u64 = 1_000_000;

const USAGE: &str = "usage: runner [--policy fifo|sjf|rr|mlfq] [WORKLOAD.json]";

struct Options {
    policy: Option<PolicyKind>,
    workload: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, Box<dyn Error>> {
    let mut options = Options { policy: None, workload: None };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-p" | "--policy" => {
                let name = args.next().ok_or("--policy needs a value")?;
                options.policy = Some(name.parse()?);
            }
            "-h" | "--help" => {
                println!("{}", USAGE);
                process::exit(0);
            }
            path => options.workload = Some(PathBuf::from(path)),
        }
    }

    Ok(options)
}

/// One row of the final report
struct Completion {
    pid: Pid,
    arrival: u32,
    burst: u32,
    finished: Option<Timestamp>,
}

fn run() -> Result<(), Box<dyn Error>> {
    let options = parse_args(env::args().skip(1))?;

    let mut workload = match &options.workload {
        Some(path) => Workload::load(path)?,
        None => Workload::demo(),
    };
    if let Some(policy) = options.policy {
        workload.scheduler.policy = policy;
    }

    let mut notifier: WriterNotifier<Vec<u8>> = WriterNotifier::new();
    for i in 0..workload.processes.len() {
        notifier.connect(Endpoint::new(i as u32 + 1), Vec::new());
    }

    let mut sim = Simulation::from_config(&workload.scheduler, notifier)?;
    let mut rows = Vec::new();
    for (i, spec) in workload.processes.iter().enumerate() {
        let endpoint = Endpoint::new(i as u32 + 1);
        let pid = sim.submit(Timestamp::new(spec.arrival_ms), spec.burst_ms, endpoint);
        rows.push((endpoint, pid, spec.arrival_ms, spec.burst_ms));
    }

    info!(
        "running {} processes under {}",
        sim.registered(),
        workload.scheduler.policy
    );
    let end = sim.run(MAX_TICKS)?;
    info!("all processes finished, last tick at {}", end);

    let notifier = sim.into_notifier();
    let report: Vec<Completion> = rows
        .into_iter()
        .map(|(endpoint, pid, arrival, burst)| Completion {
            pid,
            arrival,
            burst,
            finished: notifier
                .writer(endpoint)
                .and_then(|bytes| CompletionMessage::from_bytes(bytes))
                .map(|message| Timestamp::new(message.time_ms)),
        })
        .collect();

    print_report(&report);
    Ok(())
}

fn print_report(report: &[Completion]) {
    println!("{:>5} {:>9} {:>9} {:>9} {:>11}", "pid", "arrival", "burst", "finish", "turnaround");

    for row in report {
        match row.finished {
            Some(finished) => println!(
                "{:>5} {:>9} {:>9} {:>9} {:>11}",
                row.pid,
                row.arrival,
                row.burst,
                finished.get(),
                finished.get().saturating_sub(row.arrival)
            ),
            None => println!("{:>5} {:>9} {:>9} {:>9} {:>11}", row.pid, row.arrival, row.burst, "-", "-"),
        }
    }
}

fn main() {
    if let Err(err) = logger::init() {
        eprintln!("could not install the logger: {}", err);
    }

    if let Err(err) = run() {
        error!("{}", err);
        eprintln!("{}", USAGE);
        process::exit(1);
    }
}
