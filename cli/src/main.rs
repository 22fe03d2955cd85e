use clap::{Parser, Subcommand};
use log::{LevelFilter, info};
use simplelog::{Config, SimpleLogger};
use std::process;
use talaria_core::{grab_lnk_file, save_lnk_file};

mod recipe;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a shortcut file and print its contents
    Inspect {
        /// Path to the lnk file
        path: String,
        /// Emit pretty JSON instead of the text dump
        #[arg(long)]
        json: bool,
    },
    /// Build a shortcut file from a TOML recipe
    Create {
        /// Path to the TOML recipe
        #[arg(long)]
        recipe: String,
        /// Path for the new lnk file
        output: String,
    },
}

fn main() {
    let args = Args::parse();
    let _ = SimpleLogger::init(LevelFilter::Warn, Config::default());

    match args.command {
        Commands::Inspect { path, json } => inspect(&path, json),
        Commands::Create { recipe, output } => create(&recipe, &output),
    }
}

fn inspect(path: &str, json: bool) {
    let shortcut = match grab_lnk_file(path) {
        Ok(results) => results,
        Err(err) => {
            println!("[talaria] Failed to parse {path}: {err}");
            process::exit(1);
        }
    };

    if json {
        match serde_json::to_string_pretty(&shortcut) {
            Ok(results) => println!("{results}"),
            Err(err) => {
                println!("[talaria] Failed to serialize {path}: {err:?}");
                process::exit(1);
            }
        }
    } else {
        print!("{shortcut}");
    }
    info!("[talaria] Inspected {path}");
}

fn create(recipe_path: &str, output: &str) {
    let buffer = match std::fs::read(recipe_path) {
        Ok(results) => results,
        Err(err) => {
            println!("[talaria] Failed to read recipe {recipe_path}: {err:?}");
            process::exit(1);
        }
    };

    let recipe = match recipe::parse_recipe(&buffer) {
        Ok(results) => results,
        Err(err) => {
            println!("[talaria] Failed to parse recipe {recipe_path}: {err}");
            process::exit(1);
        }
    };

    let shortcut = match recipe::build_shortcut(&recipe) {
        Ok(results) => results,
        Err(err) => {
            println!("[talaria] Failed to build shortcut: {err}");
            process::exit(1);
        }
    };

    if let Err(err) = save_lnk_file(output, &shortcut) {
        println!("[talaria] Failed to write {output}: {err}");
        process::exit(1);
    }

    info!("[talaria] Shortcut written to {output}");
    println!("[talaria] Created {output}");
}
