use pokemon_combat_sim::catalog::CatalogConfig;
use pokemon_combat_sim::{log_filter, run, CliOptions};
use std::env;
use std::path::PathBuf;

fn usage() -> ! {
    eprintln!(
        "Usage: pokemon-combat-sim [--p1 NAME] [--p2 NAME] [--move1 MOVE] [--move2 MOVE] [--seed SEED] \
[--catalog fixture.json] [--output report.json] [--list-moves] [--popular]"
    );
    std::process::exit(1);
}

fn parse_args() -> anyhow::Result<CliOptions> {
    let mut opts = CliOptions {
        catalog: CatalogConfig::from_env(),
        ..CliOptions::default()
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--p1" => {
                opts.p1 = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--p1 requires a name (e.g. --p1 pikachu)"))?;
            }
            "--p2" => {
                opts.p2 = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--p2 requires a name (e.g. --p2 charizard)"))?;
            }
            "--move1" => {
                opts.move1 = Some(
                    args.next()
                        .ok_or_else(|| anyhow::anyhow!("--move1 requires a move name"))?,
                );
            }
            "--move2" => {
                opts.move2 = Some(
                    args.next()
                        .ok_or_else(|| anyhow::anyhow!("--move2 requires a move name"))?,
                );
            }
            "--seed" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--seed requires a number"))?;
                opts.seed = Some(val.parse()?);
            }
            "--catalog" => {
                opts.catalog_path = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--catalog requires a path (e.g. --catalog fixture.json)")
                })?);
            }
            "--output" => {
                opts.output_path = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--output requires a path (e.g. --output report.json)")
                })?);
            }
            "--list-moves" => opts.list_moves = true,
            "--popular" => opts.list_popular = true,
            "--help" | "-h" => usage(),
            other => return Err(anyhow::anyhow!("Unknown argument {other}")),
        }
    }

    if opts.p1.trim().is_empty() || opts.p2.trim().is_empty() {
        anyhow::bail!("creature names must not be empty");
    }
    Ok(opts)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let opts = parse_args()?;
    run(opts)
}
