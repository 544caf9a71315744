use std::sync::Arc;

use shopcart_core::config::LoadOptions;
use shopcart_store::{load_catalog, AddProductToCartRequest, CartStore, JsonFileCartRepository};

use crate::commands::{application_failure, load_config, runtime, CommandResult, Failure};

pub fn run(product_ids: &[String], options: LoadOptions) -> CommandResult {
    let config = match load_config("add", options) {
        Ok(config) => config,
        Err(result) => return result,
    };
    let catalog_path = match config.require_catalog_path() {
        Ok(path) => path.to_path_buf(),
        Err(error) => {
            return CommandResult::failure(
                "add",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let runtime = match runtime("add") {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let result = runtime.block_on(async {
        let products =
            load_catalog(&catalog_path).await.map_err(|error| ("catalog", error.to_string(), 4u8))?;
        let store = CartStore::new(
            Arc::new(products),
            Arc::new(JsonFileCartRepository::new(&config.cart.state_path)),
        );

        // Each add is saved on its own; a failure leaves the earlier adds in place.
        let mut cart = store.select_cart().await.map_err(application_failure)?;
        for (applied, product_id) in product_ids.iter().enumerate() {
            let request = AddProductToCartRequest::new(product_id.as_str());
            cart = store.add_product_to_cart(request).await.map_err(|error| {
                let (error_class, message, exit_code) = application_failure(error);
                let message = format!(
                    "{message}; {applied} of {} product(s) were added before the failure",
                    product_ids.len()
                );
                (error_class, message, exit_code)
            })?;
        }

        Ok::<_, Failure>(cart)
    });

    match result {
        Ok(cart) => CommandResult::success_with_data(
            "add",
            format!("added {} product(s); cart total is {}", product_ids.len(), cart.total),
            Some(&cart),
        ),
        Err(failure) => CommandResult::from_failure("add", failure),
    }
}
