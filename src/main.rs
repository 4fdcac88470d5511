mod cli_main;

use std::process;

use bruijn::cli::benchmark::benchmark_assembly;
use bruijn::cli::stats::format_stats;
use bruijn::pipeline::{AssemblerRun, EulerianOutcome};
use bruijn::stats::calculate_stats;
use bruijn::AssemblyConfig;
use clap::Parser;
use cli_main::{AssembleArgs, Cli, Commands};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn init_logging(level: Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Setting tracing default failed");
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Assemble(args) => {
            let level = if args.debug {
                Level::DEBUG
            } else if args.print {
                Level::INFO
            } else {
                Level::WARN
            };
            init_logging(level);

            if let Err(e) = assemble(&args) {
                eprintln!("Error during assembly: {}", e);
                process::exit(1);
            }
        }

        Commands::Stats { input, format } => {
            init_logging(Level::WARN);

            let stats = match calculate_stats(&input) {
                Ok(stats) => stats,
                Err(e) => {
                    eprintln!("Error calculating stats: {}", e);
                    process::exit(1);
                }
            };
            match format_stats(&stats, format) {
                Ok(text) => println!("{}", text),
                Err(e) => {
                    eprintln!("Error formatting stats: {}", e);
                    process::exit(1);
                }
            }
        }
    }
}

fn assemble(args: &AssembleArgs) -> bruijn::Result<()> {
    let base = match &args.config {
        Some(path) => AssemblyConfig::load(path)?,
        None => AssemblyConfig::default(),
    };
    let config = args.apply(base);

    let mut run = AssemblerRun::new(&args.filename, config);
    if let Some(output) = &args.output {
        run = run.with_output(output);
    }

    if args.runs > 1 {
        benchmark_assembly(&run, args.runs)?;
        return Ok(());
    }

    let summary = run.run()?;
    let report = &summary.report;

    if args.output.is_none() {
        for (index, contig) in report.final_contigs.iter().enumerate() {
            println!(">{} {}", index, contig.len());
            println!("{}", contig.sequence);
        }
    }

    match &report.eulerian {
        EulerianOutcome::Skipped => {}
        EulerianOutcome::Found { sequence, edges, backtracks, start } => {
            eprintln!(
                "Eulerian trail: {} edges from {} ({} backtracks), {} bp",
                edges,
                start,
                backtracks,
                sequence.len()
            );
        }
        EulerianOutcome::NotFound { reason } => {
            eprintln!("Assembly failed to find an Eulerian trail: {}", reason);
        }
    }

    eprintln!(
        "Assembled {} contigs (N50 {}) in {:.2}s",
        summary.stats.total_contigs,
        summary.stats.n50,
        summary.elapsed.as_secs_f64()
    );
    Ok(())
}
