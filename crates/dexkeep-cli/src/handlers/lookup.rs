//! Lookup command handler.
//!
//! Shows a catalog entry together with its standing in the local
//! collections.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::handlers::resolve_entity;
use crate::presentation::format_tags;

pub async fn execute(ctx: &CliContext, query: &str) -> Result<()> {
    let entity = resolve_entity(ctx, query).await?;

    println!("#{} {}", entity.id, entity.name);
    println!("  Types:    {}", format_tags(&entity.category_tags));
    if !entity.image_url.is_empty() {
        println!("  Image:    {}", entity.image_url);
    }

    let favorite = if ctx.app().favorites().is_favorite(entity.id) {
        "yes"
    } else {
        "no"
    };
    println!("  Favorite: {favorite}");

    let groups = ctx.app().groups().groups_containing(entity.id);
    if groups.is_empty() {
        println!("  Groups:   --");
    } else {
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        println!("  Groups:   {}", names.join(", "));
    }

    Ok(())
}
