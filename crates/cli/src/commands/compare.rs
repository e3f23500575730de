//! Comparison list commands.

use std::io::Write;

use clap::Subcommand;
use glory_core::CurrencyCode;
use glory_state::{AddOutcome, ComparisonStore, KeyValueStorage};

use super::ProductArgs;

#[derive(Debug, Subcommand)]
pub enum CompareAction {
    /// Add a product to the comparison
    Add {
        #[command(flatten)]
        product: ProductArgs,
    },
    /// Drop a product from the comparison
    Remove {
        /// Product key
        key: String,
    },
    /// Drop every product
    Clear,
    /// Print the comparison
    Show,
}

/// Apply `action` to the comparison list and print the result.
///
/// # Errors
///
/// Returns an error if the product arguments are invalid or output fails.
pub fn run<S: KeyValueStorage>(
    comparison: &mut ComparisonStore<S>,
    action: CompareAction,
    currency: CurrencyCode,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CompareAction::Add { product } => {
            let entry = product.comparison_entry()?;
            match comparison.add(entry) {
                AddOutcome::Added => {}
                AddOutcome::AlreadyPresent => writeln!(out, "Already comparing {}", product.key)?,
                AddOutcome::Full => writeln!(
                    out,
                    "Comparison list is full ({} products max)",
                    comparison.capacity()
                )?,
            }
        }
        CompareAction::Remove { key } => comparison.remove(key.trim()),
        CompareAction::Clear => comparison.clear(),
        CompareAction::Show => {}
    }
    print(comparison, currency, out)?;
    Ok(())
}

/// Print compared products side by side, one per row.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn print<S: KeyValueStorage>(
    comparison: &ComparisonStore<S>,
    currency: CurrencyCode,
    out: &mut impl Write,
) -> std::io::Result<()> {
    if comparison.is_empty() {
        return writeln!(out, "Nothing to compare");
    }
    for entry in comparison.items() {
        let rating = entry
            .rating
            .map_or_else(|| "-".to_owned(), |rating| format!("{rating:.1}"));
        writeln!(
            out,
            "{:<24} {:>10}  {:<12} {:>4}  {}",
            entry.title,
            entry.price.display(currency),
            entry.category,
            rating,
            entry.description,
        )?;
    }
    writeln!(
        out,
        "{}/{} slots used",
        comparison.len(),
        comparison.capacity()
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use glory_state::MemoryStorage;

    use super::*;

    fn add(key: &str) -> CompareAction {
        CompareAction::Add {
            product: ProductArgs {
                key: key.to_owned(),
                catalog: None,
                title: Some(key.to_uppercase()),
                price: Some("100".parse().unwrap()),
                image: None,
                category: Some("Watches".to_owned()),
                rating: None,
                description: Some("Automatic".to_owned()),
            },
        }
    }

    fn run_action(list: &mut ComparisonStore<MemoryStorage>, action: CompareAction) -> String {
        let mut out = Vec::new();
        run(list, action, CurrencyCode::USD, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_reports_full_and_duplicates() {
        let mut list = ComparisonStore::hydrate(MemoryStorage::new());
        run_action(&mut list, add("a"));
        let output = run_action(&mut list, add("a"));
        assert!(output.starts_with("Already comparing a"));

        run_action(&mut list, add("b"));
        let output = run_action(&mut list, add("c"));
        assert!(output.ends_with("3/3 slots used\n"));

        let output = run_action(&mut list, add("d"));
        assert!(output.starts_with("Comparison list is full (3 products max)"));
    }

    #[test]
    fn test_clear() {
        let mut list = ComparisonStore::hydrate(MemoryStorage::new());
        run_action(&mut list, add("a"));
        assert_eq!(run_action(&mut list, CompareAction::Clear), "Nothing to compare\n");
    }
}
