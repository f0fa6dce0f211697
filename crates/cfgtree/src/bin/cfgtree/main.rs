mod cli;

fn main() {
    use clap::Parser;
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("CFGTREE_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let command_result = match cli.command {
        cli::Command::Parse(cmd) => parse(cmd),
        cli::Command::Contexts(cmd) => contexts(cmd),
        cli::Command::Dev(cmd) => dev(cmd),
    };

    if let Err(e) = command_result {
        for error in e.chain() {
            eprintln!("{error}")
        }
        std::process::exit(1);
    }
}

fn parse(cmd: cli::ParseCommand) -> anyhow::Result<()> {
    let text = load(&cmd.input)?;
    let (tree, _contexts) = cfgtree::parse_config(&text)?;

    match &cmd.context {
        Some(name) => {
            let Some(node) = tree.region(name) else {
                anyhow::bail!("no such context or region: {name}");
            };
            output(&cmd.output, node)
        }
        None => output(&cmd.output, &tree),
    }
}

fn contexts(cmd: cli::ContextsCommand) -> anyhow::Result<()> {
    let text = load(&cmd.input)?;
    let (_tree, contexts) = cfgtree::parse_config(&text)?;

    for name in contexts {
        println!("{name}");
    }
    Ok(())
}

fn load(input: &cli::InputArgs) -> anyhow::Result<String> {
    match &input.file {
        Some(path) => {
            tracing::info!(path=%path.display(), "loading file");
            Ok(std::fs::read_to_string(path)?)
        }
        None => Ok(std::io::read_to_string(std::io::stdin())?),
    }
}

fn output<T: serde::Serialize>(output: &cli::OutputArgs, value: &T) -> anyhow::Result<()> {
    match output.format {
        cli::OutputFormat::Yaml => serde_yaml::to_writer(std::io::stdout(), value)?,
        cli::OutputFormat::Json => serde_json::to_writer_pretty(std::io::stdout(), value)?,
    };

    Ok(())
}

/// (cfgtree-)developer utilities
///
/// A quick way to expose internal structures for debugging purposes
fn dev(cmd: cli::DevCommand) -> anyhow::Result<()> {
    use cli::DevSubCommand::*;

    let text = load(&cmd.input)?;

    match cmd.command {
        Regions => {
            let document = cfgtree::regions::split_regions(&text)?;
            println!("{document:#?}");
        }
        Tree => {
            let (tree, contexts) = cfgtree::parse_config(&text)?;
            println!("{contexts:#?}");
            println!("{tree:#?}");
        }
    }

    Ok(())
}
