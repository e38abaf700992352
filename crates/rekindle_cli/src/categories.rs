//! `rekindle categories` — print the extension dispatch table.

use crate::GlobalArgs;

/// Runs the `rekindle categories` command.
///
/// Prints one line per extension binding, in dispatch-table order, followed
/// by the fallback category.
pub fn run(global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = crate::load_cache_config(global)?;
    let dispatch = crate::build_dispatch(&config);

    for (extension, category) in dispatch.categories() {
        println!(".{extension} -> {category}");
    }
    println!("(default) -> {}", dispatch.fallback_category());
    Ok(0)
}
