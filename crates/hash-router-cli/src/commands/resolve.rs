use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use hash_router::{ActiveRoute, ActiveRoutes, MemoryHistory, Router, RoutesFile};

pub fn execute(routes: &Path, locations: &[String], table: bool) -> Result<()> {
    let file = RoutesFile::load_from(routes)
        .with_context(|| format!("failed to load {}", routes.display()))?;

    let mut router = Router::new(MemoryHistory::new(file.router.initial_location.clone()));
    router.register(file.into_routes())?;

    for location in locations {
        router
            .update_location(location.as_str())
            .with_context(|| format!("failed to resolve {}", location))?;

        if router.location() != location {
            tracing::info!("{} settled at {}", location, router.location());
        }

        if table {
            print_table(router.location(), &router.active());
        } else {
            println!("{}", render_json(&router.active())?);
        }
    }

    Ok(())
}

/// Active map as pretty JSON, keys sorted
fn render_json(active: &ActiveRoutes) -> Result<String> {
    let sorted: BTreeMap<String, ActiveRoute> = active.snapshot().into_iter().collect();
    Ok(serde_json::to_string_pretty(&sorted)?)
}

fn print_table(location: &str, active: &ActiveRoutes) {
    println!("{}", location.cyan().bold());

    if active.is_not_found() {
        println!("  {}", "404 - no route".red());
        return;
    }

    let map = active.borrow();
    let mut entries: Vec<&ActiveRoute> = map.values().collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    for entry in entries {
        println!(
            "  {:<20} args={:<24} search={}",
            entry.name.green(),
            format!("{:?}", entry.args),
            entry.search
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hash_router::RouteDescriptor;

    #[test]
    fn test_render_json_is_sorted() {
        let mut router = Router::default();
        router
            .register([
                ("b", RouteDescriptor::new("^/")),
                ("a", RouteDescriptor::new("^/")),
            ])
            .unwrap();

        let json = render_json(&router.active()).unwrap();
        let a = json.find("\"a\"").unwrap();
        let b = json.find("\"b\"").unwrap();
        assert!(a < b);
    }
}
