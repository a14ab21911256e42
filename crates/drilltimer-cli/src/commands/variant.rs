use clap::Subcommand;
use drilltimer_core::{builtin_variants, variant_by_id};

#[derive(Subcommand)]
pub enum VariantAction {
    /// List built-in variants
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one variant's threshold table as JSON
    Show {
        /// Variant id
        id: String,
    },
}

pub fn run(action: VariantAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        VariantAction::List { json } => {
            let variants = builtin_variants()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&variants)?);
            } else {
                for v in &variants {
                    println!("{:<10} {:<16} {}", v.id, v.name, v.describe());
                }
            }
        }
        VariantAction::Show { id } => {
            let variant = variant_by_id(&id)?;
            println!("{}", serde_json::to_string_pretty(&variant)?);
        }
    }
    Ok(())
}
