use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use hash_router::{CompiledRoute, RoutesFile, NOT_FOUND};

/// Compiles every route (reserved group names included) and checks that reroute targets exist
/// and have a push url
pub fn execute(routes: &Path) -> Result<()> {
    let file = RoutesFile::load_from(routes)
        .with_context(|| format!("failed to load {}", routes.display()))?;

    println!("{} {}", "Checking".green().bold(), routes.display());

    let problems = check(&file);
    for problem in &problems {
        println!("  {} {}", "✗".red(), problem);
    }

    if !problems.is_empty() {
        bail!("{} problem(s) in {}", problems.len(), routes.display());
    }

    println!("{} {} routes", "✓".green(), file.routes.len());
    Ok(())
}

fn check(file: &RoutesFile) -> Vec<String> {
    let mut problems = Vec::new();
    let mut seen = HashSet::new();

    for entry in &file.routes {
        if !seen.insert(entry.name.as_str()) {
            problems.push(format!("{}: declared more than once", entry.name));
        }
        if entry.name == NOT_FOUND {
            problems.push(format!("{}: reserved name, never matched", entry.name));
        }
        if let Err(e) = CompiledRoute::compile(entry.name.clone(), entry.descriptor.clone()) {
            problems.push(format!("{}: {}", entry.name, e));
        }

        if let Some(target) = entry.descriptor.reroute.as_deref() {
            match file.routes.iter().find(|r| r.name == target) {
                None => problems.push(format!("{}: reroutes to unknown route {}", entry.name, target)),
                Some(r) if r.descriptor.push_url.is_none() => problems.push(format!(
                    "{}: reroute target {} has no push_url",
                    entry.name, target
                )),
                Some(_) => {}
            }
        }
    }

    problems
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_file() {
        let file: RoutesFile = r#"
[[route]]
name = "old"
match = "^/old$"
reroute = "new"

[[route]]
name = "new"
match = "^/new$"
push_url = "/#/new"
"#
        .parse()
        .unwrap();

        assert!(check(&file).is_empty());
    }

    #[test]
    fn test_reports_problems() {
        let file: RoutesFile = r#"
[[route]]
name = "bad"
match = "("

[[route]]
name = "old"
match = "^/old$"
reroute = "bad"

[[route]]
name = "404"
match = "^/"
"#
        .parse()
        .unwrap();

        let problems = check(&file);
        assert_eq!(problems.len(), 3);
        assert!(problems[0].starts_with("bad:"));
        assert!(problems[1].contains("has no push_url"));
        assert!(problems[2].contains("reserved"));
    }

    #[test]
    fn test_reports_reserved_group() {
        let file: RoutesFile = r#"
[[route]]
name = "a"
match = "^/a$"
group = "404"
"#
        .parse()
        .unwrap();

        let problems = check(&file);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("reserved group"));
    }
}
