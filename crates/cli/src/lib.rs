pub mod commands;
pub mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use shopcart_core::config::{ConfigOverrides, LoadOptions};

#[derive(Debug, Parser)]
#[command(
    name = "shopcart",
    about = "Shopcart operator CLI",
    long_about = "Add catalog products to a cart, inspect the stored cart, list the catalog, and inspect configuration.",
    after_help = "Examples:\n  shopcart add mustard ketchup --catalog catalog.toml\n  shopcart show\n  shopcart config"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a shopcart.toml config file")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Add one unit of each given product to the cart and print the result")]
    Add {
        #[arg(required = true, value_name = "PRODUCT_ID")]
        product_ids: Vec<String>,
        #[command(flatten)]
        paths: PathArgs,
    },
    #[command(about = "Print the stored cart")]
    Show {
        #[command(flatten)]
        paths: PathArgs,
    },
    #[command(about = "List products in the catalog file")]
    Catalog {
        #[command(flatten)]
        paths: PathArgs,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

#[derive(Debug, Args)]
struct PathArgs {
    #[arg(long, help = "Catalog TOML file (overrides catalog.path)")]
    catalog: Option<PathBuf>,
    #[arg(long, help = "Cart state JSON file (overrides cart.state_path)")]
    cart: Option<PathBuf>,
}

impl Cli {
    fn load_options(&self, paths: Option<&PathArgs>) -> LoadOptions {
        LoadOptions {
            config_path: self.config.clone(),
            require_file: self.config.is_some(),
            overrides: ConfigOverrides {
                catalog_path: paths.and_then(|paths| paths.catalog.clone()),
                cart_state_path: paths.and_then(|paths| paths.cart.clone()),
                ..ConfigOverrides::default()
            },
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let paths = match &cli.command {
        Command::Add { paths, .. } | Command::Show { paths } | Command::Catalog { paths } => {
            Some(paths)
        }
        Command::Config => None,
    };
    let options = cli.load_options(paths);

    if let Err(error) = logging::init(options.clone()) {
        eprintln!("logging disabled: {error:#}");
    }

    let result = match &cli.command {
        Command::Add { product_ids, .. } => commands::add::run(product_ids, options),
        Command::Show { .. } => commands::show::run(options),
        Command::Catalog { .. } => commands::catalog::run(options),
        Command::Config => commands::config::run(options),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
