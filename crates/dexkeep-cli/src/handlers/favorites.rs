//! Favorites command handlers.

use anyhow::Result;
use dexkeep_core::EntityId;

use crate::bootstrap::CliContext;
use crate::commands::FavoritesCommand;
use crate::handlers::resolve_entity;
use crate::presentation::print_entity_table;

pub async fn execute(ctx: &CliContext, command: FavoritesCommand) -> Result<()> {
    match command {
        FavoritesCommand::List => {
            list(ctx);
            Ok(())
        }
        FavoritesCommand::Add { query } => add(ctx, &query).await,
        FavoritesCommand::Remove { id } => {
            remove(ctx, id);
            Ok(())
        }
        FavoritesCommand::Toggle { query } => toggle(ctx, &query).await,
    }
}

fn list(ctx: &CliContext) {
    let favorites = ctx.app().favorites().favorites();
    if favorites.is_empty() {
        println!("No favorites yet.");
        println!("Use 'dexkeep favorites add <query>' to add one.");
        return;
    }

    println!("{} favorite(s):\n", favorites.len());
    print_entity_table(&favorites);
}

async fn add(ctx: &CliContext, query: &str) -> Result<()> {
    let entity = resolve_entity(ctx, query).await?;
    let name = entity.name.clone();

    if ctx.app().favorites().add(entity) {
        println!("Added {name} to favorites.");
    } else {
        println!("{name} is already a favorite.");
    }
    Ok(())
}

fn remove(ctx: &CliContext, id: EntityId) {
    if ctx.app().favorites().remove(id) {
        println!("Removed #{id} from favorites.");
    } else {
        println!("#{id} is not a favorite.");
    }
}

async fn toggle(ctx: &CliContext, query: &str) -> Result<()> {
    let entity = resolve_entity(ctx, query).await?;
    let name = entity.name.clone();

    if ctx.app().favorites().toggle(entity) {
        println!("Added {name} to favorites.");
    } else {
        println!("Removed {name} from favorites.");
    }
    Ok(())
}
