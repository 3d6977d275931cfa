//! Member commands
//!
//! Usage: gift member add --email <EMAIL> --password <PASSWORD>

use clap::{Args, Subcommand};
use gift_core::Member;
use gift_store::{MemberRepository, Repository};

use super::StoreOptions;

#[derive(Debug, Args)]
pub struct MemberArgs {
    #[command(subcommand)]
    pub command: MemberCommand,
}

#[derive(Debug, Subcommand)]
pub enum MemberCommand {
    /// Register a new member
    Add(AddArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,
}

/// Execute member command
pub fn execute(store: &StoreOptions, args: MemberArgs) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        MemberCommand::Add(add_args) => execute_add(store, add_args),
    }
}

fn execute_add(store: &StoreOptions, args: AddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut member = Member::builder()
        .email(args.email)
        .password(args.password)
        .build()?;

    let ctx = store.open()?;
    MemberRepository::new(&ctx).save(&mut member)?;
    ctx.flush()?;

    if let Some(id) = member.id() {
        println!("✓ Member {} saved ({})", id, member.email);
    }
    Ok(())
}
