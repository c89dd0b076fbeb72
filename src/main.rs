use anyhow::{Context, Result};
use clap::Parser;
use pyseed::{
    args::{Args, Commands, Overrides},
    config::{ConfigDirs, Settings},
    error, info, trace, Initializer, ProjectName, SystemRunner, TemplateSet,
};
use std::process::ExitCode;

fn load_settings(dirs: &ConfigDirs, overrides: &Overrides) -> Result<Settings> {
    let mut builder = Settings::builder();

    if let Some(file) = dirs.load()? {
        trace!("Loaded {} entries from {}", file.entries.len(), dirs.config_file().display());
        file.apply(&mut builder);
    }

    overrides.apply(&mut builder);

    Ok(builder.build()?)
}

fn app(args: &Args) -> Result<()> {
    let dirs = ConfigDirs::default_paths()?;

    trace!("Global config: {}", dirs.global_config().display());

    match args.command {
        Commands::New {
            ref project_name,
            ref overrides,
        } => {
            let settings = load_settings(&dirs, overrides)?;

            let name = match project_name {
                Some(name) => name.clone(),
                None => inquire::Text::new("Project name:").prompt()?,
            };
            let name = name.parse::<ProjectName>()?;

            let root = std::env::current_dir().context("Failed to get current dir")?;
            let runner = SystemRunner::new(settings.verbose);
            let initializer = Initializer::new(runner, settings, TemplateSet::default(), root);

            initializer.initialize(&name)?;

            info!("Project {name} is ready");
            Ok(())
        }
        Commands::Init => {
            dirs.create_global_dir()?;
            dirs.create_global_config(&Settings::default())?;

            info!("Config file at {}", dirs.display_config_file());
            Ok(())
        }
        Commands::Config { ref overrides } => {
            let settings = load_settings(&dirs, overrides)?;

            println!("# {}", dirs.display_config_file());
            print!("{}", settings.to_config());
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    match app(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !args.no_errors() {
                error!("{e:#}");
            }
            ExitCode::FAILURE
        }
    }
}
