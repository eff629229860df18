use facet::Facet;
use figue as args;
use stackmark::{DiagnosticsConfig, Echo, ErrorReport, RoutineStats};
use tracing::info;

mod scenarios;

type AnyResult<T> = Result<T, String>;

#[derive(Facet, Debug)]
struct Cli {
    #[facet(flatten)]
    builtins: args::FigueBuiltins,
    /// Print the outcome as JSON.
    #[facet(args::named, default)]
    json: bool,
    /// Routines to echo (`all` or a comma-separated list); overrides STACKMARK_ECHO.
    #[facet(args::named, default)]
    echo: Option<String>,
    /// Collect per-routine statistics.
    #[facet(args::named, default)]
    timing: bool,
    #[facet(args::subcommand)]
    command: CommandKind,
}

#[derive(Facet, Debug)]
#[repr(u8)]
enum CommandKind {
    SingularAssembly,
    MissingSubsystem,
    PerRankContexts {
        #[facet(args::named, default)]
        ranks: Option<u32>,
    },
}

#[derive(Facet, Debug)]
struct Summary {
    scenario: String,
    value: Option<String>,
    error: Option<ErrorReport>,
    stats: Vec<RoutineStats>,
}

const DEFAULT_RANKS: u32 = 4;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> AnyResult<()> {
    let cli = parse_cli()?;
    let config = config_from_cli(&cli);

    let (scenario, outcome) = match cli.command {
        CommandKind::SingularAssembly => (
            "singular-assembly",
            scenarios::singular_assembly::run(&config),
        ),
        CommandKind::MissingSubsystem => (
            "missing-subsystem",
            scenarios::missing_subsystem::run(&config),
        ),
        CommandKind::PerRankContexts { ranks } => (
            "per-rank-contexts",
            scenarios::per_rank_contexts::run(&config, ranks.unwrap_or(DEFAULT_RANKS))?,
        ),
    };
    info!(scenario, ok = outcome.result.is_ok(), "scenario finished");

    if cli.json {
        let summary = Summary {
            scenario: scenario.to_owned(),
            value: outcome.result.as_ref().ok().cloned(),
            error: outcome.result.as_ref().err().map(|err| err.report()),
            stats: outcome.stats,
        };
        let json = facet_json::to_string(&summary).map_err(|e| e.to_string())?;
        println!("{json}");
        return Ok(());
    }

    for stats in &outcome.stats {
        println!(
            "{:<24} calls={:<4} failures={:<4} inclusive={}ns",
            stats.routine, stats.calls, stats.failures, stats.inclusive_ns
        );
    }
    match outcome.result {
        Ok(value) => {
            println!("{scenario}: {value}");
            Ok(())
        }
        Err(err) => Err(format!("ERROR: {err}")),
    }
}

fn parse_cli() -> AnyResult<Cli> {
    let figue_config = args::builder::<Cli>()
        .map_err(|e| format!("failed to build CLI schema: {e}"))?
        .cli(|cli| cli.strict())
        .help(|h| {
            h.program_name("stackmark-examples")
                .description("Run instrumented numerical scenarios as subcommands")
                .version(option_env!("CARGO_PKG_VERSION").unwrap_or("dev"))
        })
        .build();

    args::Driver::new(figue_config)
        .run()
        .into_result()
        .map(|v| v.value)
        .map_err(|e| e.to_string())
}

fn config_from_cli(cli: &Cli) -> DiagnosticsConfig {
    let mut config = DiagnosticsConfig::from_env();
    if let Some(echo) = &cli.echo {
        config = config.with_echo(Echo::parse(echo));
    }
    if cli.timing {
        config = config.with_timing(true);
    }
    config
}
