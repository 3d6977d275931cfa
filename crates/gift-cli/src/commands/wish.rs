//! Wish commands
//!
//! Usage: gift wish add --member <ID> --product <ID> [--count <N>]

use clap::{Args, Subcommand};
use gift_core::{MemberId, ProductId, Wish};
use gift_store::{MemberRepository, ProductRepository, Repository, WishRepository};

use super::StoreOptions;

#[derive(Debug, Args)]
pub struct WishArgs {
    #[command(subcommand)]
    pub command: WishCommand,
}

#[derive(Debug, Subcommand)]
pub enum WishCommand {
    /// Add a product to a member's wish list
    Add(AddArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Member identity
    #[arg(long)]
    pub member: i64,

    /// Product identity
    #[arg(long)]
    pub product: i64,

    #[arg(long, default_value_t = 1)]
    pub count: u32,
}

/// Execute wish command
pub fn execute(store: &StoreOptions, args: WishArgs) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        WishCommand::Add(add_args) => execute_add(store, add_args),
    }
}

fn execute_add(store: &StoreOptions, args: AddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = store.open()?;

    let member = MemberRepository::new(&ctx)
        .find_by_id(MemberId::new(args.member))?
        .ok_or_else(|| format!("member {} not found", args.member))?;
    let product = ProductRepository::new(&ctx)
        .find_by_id(ProductId::new(args.product))?
        .ok_or_else(|| format!("product {} not found", args.product))?;

    let mut wish = Wish::builder()
        .member(&member)
        .product(&product)
        .count(args.count)
        .build()?;
    WishRepository::new(&ctx).save(&mut wish)?;
    ctx.flush()?;

    if let Some(id) = wish.id() {
        println!(
            "✓ Wish {} saved (member {}, product {}, count {})",
            id,
            member.email,
            product.name,
            wish.count
        );
    }
    Ok(())
}
