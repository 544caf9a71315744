use std::sync::Arc;

use shopcart_core::config::LoadOptions;
use shopcart_store::{CartStore, InMemoryProductRepository, JsonFileCartRepository};

use crate::commands::{application_failure, load_config, runtime, CommandResult};

pub fn run(options: LoadOptions) -> CommandResult {
    let config = match load_config("show", options) {
        Ok(config) => config,
        Err(result) => return result,
    };
    let runtime = match runtime("show") {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let store = CartStore::new(
        Arc::new(InMemoryProductRepository::default()),
        Arc::new(JsonFileCartRepository::new(&config.cart.state_path)),
    );

    match runtime.block_on(store.select_cart()) {
        Ok(cart) if cart.is_empty() => {
            CommandResult::success_with_data("show", "cart is empty", Some(&cart))
        }
        Ok(cart) => CommandResult::success_with_data(
            "show",
            format!(
                "{} item(s) across {} line(s); total {}",
                cart.item_count(),
                cart.lines.len(),
                cart.total
            ),
            Some(&cart),
        ),
        Err(error) => CommandResult::from_failure("show", application_failure(error)),
    }
}
