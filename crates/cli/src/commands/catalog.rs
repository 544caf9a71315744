use shopcart_core::config::LoadOptions;
use shopcart_store::{load_catalog, ProductRepository};

use crate::commands::{load_config, runtime, CommandResult};

pub fn run(options: LoadOptions) -> CommandResult {
    let config = match load_config("catalog", options) {
        Ok(config) => config,
        Err(result) => return result,
    };
    let catalog_path = match config.require_catalog_path() {
        Ok(path) => path.to_path_buf(),
        Err(error) => {
            return CommandResult::failure(
                "catalog",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };
    let runtime = match runtime("catalog") {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let result = runtime.block_on(async {
        let repository =
            load_catalog(&catalog_path).await.map_err(|error| ("catalog", error.to_string(), 4u8))?;
        repository.list().await.map_err(|error| ("persistence", error.to_string(), 6u8))
    });

    match result {
        Ok(products) => CommandResult::success_with_data(
            "catalog",
            format!("{} product(s) in `{}`", products.len(), catalog_path.display()),
            Some(&products),
        ),
        Err(failure) => CommandResult::from_failure("catalog", failure),
    }
}
