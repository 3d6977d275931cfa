//! Product commands
//!
//! Usage:
//!   gift product add --name <NAME> --price <PRICE> --image-url <URL>
//!   gift product list [--json]
//!   gift product show <ID> [--with-wishes] [--json]

use clap::{Args, Subcommand};
use gift_core::{Product, ProductId, Wish};
use gift_store::{ProductRepository, Repository};
use serde::Serialize;

use super::StoreOptions;

#[derive(Debug, Args)]
pub struct ProductArgs {
    #[command(subcommand)]
    pub command: ProductCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    /// Register a new product
    Add(AddArgs),
    /// List every product
    List(ListArgs),
    /// Show one product
    Show(ShowArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub price: u32,

    #[arg(long)]
    pub image_url: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Print JSON instead of tab-separated rows
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub id: i64,

    /// Fetch the product's wishes in the same query
    #[arg(long)]
    pub with_wishes: bool,

    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ProductRow {
    id: i64,
    name: String,
    price: u32,
    image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    wishes: Option<Vec<WishRow>>,
}

#[derive(Debug, Serialize)]
struct WishRow {
    id: Option<i64>,
    member_id: i64,
    count: u32,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id().map(ProductId::get).unwrap_or_default(),
            name: product.name.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            wishes: product
                .wish_list()
                .map(|wishes| wishes.iter().map(WishRow::from).collect()),
        }
    }
}

impl From<&Wish> for WishRow {
    fn from(wish: &Wish) -> Self {
        Self {
            id: wish.id().map(|id| id.get()),
            member_id: wish.member_id().get(),
            count: wish.count,
        }
    }
}

/// Execute product command
pub fn execute(store: &StoreOptions, args: ProductArgs) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        ProductCommand::Add(add_args) => execute_add(store, add_args),
        ProductCommand::List(list_args) => execute_list(store, list_args),
        ProductCommand::Show(show_args) => execute_show(store, show_args),
    }
}

fn execute_add(store: &StoreOptions, args: AddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut product = Product::builder()
        .name(args.name)
        .price(args.price)
        .image_url(args.image_url)
        .build()?;

    let ctx = store.open()?;
    ProductRepository::new(&ctx).save(&mut product)?;
    ctx.flush()?;

    if let Some(id) = product.id() {
        println!("✓ Product {} saved", id);
    }
    Ok(())
}

fn execute_list(store: &StoreOptions, args: ListArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = store.open()?;
    let products = ProductRepository::new(&ctx).find_all()?;

    if args.json {
        let rows: Vec<ProductRow> = products.iter().map(ProductRow::from).collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for product in &products {
        let row = ProductRow::from(product);
        println!("{}\t{}\t{}\t{}", row.id, row.name, row.price, row.image_url);
    }
    Ok(())
}

fn execute_show(store: &StoreOptions, args: ShowArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = store.open()?;
    let repo = ProductRepository::new(&ctx);
    let id = ProductId::new(args.id);

    let product = if args.with_wishes {
        repo.find_product_with_relation(id)?
    } else {
        repo.find_by_id(id)?
    };
    let product = product.ok_or_else(|| format!("product {} not found", args.id))?;
    let row = ProductRow::from(&product);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&row)?);
        return Ok(());
    }

    println!("id: {}", row.id);
    println!("name: {}", row.name);
    println!("price: {}", row.price);
    println!("image_url: {}", row.image_url);
    if let Some(wishes) = &row.wishes {
        println!("wishes: {}", wishes.len());
        for wish in wishes {
            println!("  member {} x{}", wish.member_id, wish.count);
        }
    }
    Ok(())
}
