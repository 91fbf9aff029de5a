//! Field listing command implementation.

use anyhow::Result;
use tasador_features::{FieldCategory, fields_by_category};

/// List the input fields, optionally filtered by category.
pub(crate) fn list_fields(category: Option<String>, detail: bool) -> Result<()> {
    println!("\nInput fields\n");

    for cat in FieldCategory::ALL {
        if let Some(ref filter) = category
            && !cat.label().to_lowercase().contains(&filter.to_lowercase())
        {
            continue;
        }

        let infos = fields_by_category(cat);
        println!("{}:", cat.label());
        println!("{}", "-".repeat(60));

        for info in infos {
            let stage = if info.price_stage_only { "price" } else { "factor+price" };
            if detail {
                println!(
                    "  {:30} {:13} {}",
                    info.field.wire_name(),
                    stage,
                    info.description
                );
            } else {
                println!("  {}", info.field.wire_name());
            }
        }
        println!();
    }

    if !detail {
        println!("Use --detail for stages and descriptions.\n");
    }

    Ok(())
}
