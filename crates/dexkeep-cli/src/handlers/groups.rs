//! Group command handlers.
//!
//! `add_member`, `rename_group` and friends answer `false` for several
//! reasons; the handlers inspect the current state to say which one applied.

use anyhow::Result;
use dexkeep_core::{
    CoreError, EntityId, Group, GroupId, GroupName, GroupOrigin, MAX_GROUP_MEMBERS,
};

use crate::bootstrap::CliContext;
use crate::commands::GroupsCommand;
use crate::error::CliError;
use crate::handlers::resolve_entity;
use crate::presentation::{format_size, print_entity_table, print_group_table};

pub async fn execute(ctx: &CliContext, command: GroupsCommand) -> Result<()> {
    match command {
        GroupsCommand::List => list(ctx),
        GroupsCommand::Show { id } => show(ctx, &GroupId::from(id)),
        GroupsCommand::Create {
            name,
            members,
            origin,
        } => return create(ctx, &name, &members, origin).await,
        GroupsCommand::Rename { id, name } => rename(ctx, &GroupId::from(id), &name),
        GroupsCommand::Delete { id } => delete(ctx, &GroupId::from(id)),
        GroupsCommand::Clear => clear(ctx),
        GroupsCommand::Add { id, query } => return add(ctx, &GroupId::from(id), &query).await,
        GroupsCommand::RemoveMember { id, entity_id } => {
            remove_member(ctx, &GroupId::from(id), entity_id);
        }
        GroupsCommand::Candidates { query } => return candidates(ctx, &query).await,
    }
    Ok(())
}

fn list(ctx: &CliContext) {
    let groups = ctx.app().groups().groups();
    if groups.is_empty() {
        println!("No groups yet.");
        println!("Use 'dexkeep groups create <name>' to create one.");
        return;
    }

    println!("{} group(s):\n", groups.len());
    print_group_table(&groups);
}

fn show(ctx: &CliContext, id: &GroupId) {
    let Some(group) = ctx.app().groups().get(id) else {
        print_missing(id);
        return;
    };

    println!("{} ({}, created by {})", group.name, format_size(&group), group.origin);
    println!("ID: {}\n", group.id);
    if group.members.is_empty() {
        println!("No members.");
    } else {
        print_entity_table(&group.members);
    }
}

async fn create(
    ctx: &CliContext,
    name: &str,
    member_queries: &[String],
    origin: GroupOrigin,
) -> Result<()> {
    // Validate before any catalog round-trips.
    let name = GroupName::parse(name).map_err(|e| CliError::Arguments(e.to_string()))?;

    let mut members = Vec::with_capacity(member_queries.len());
    for query in member_queries {
        members.push(resolve_entity(ctx, query).await?);
    }

    let id = ctx
        .app()
        .groups()
        .create_group(name.as_str(), members, origin)
        .map_err(|e| CliError::from(CoreError::from(e)))?;

    let size = ctx
        .app()
        .groups()
        .get(&id)
        .map_or_else(String::new, |g| format_size(&g));
    println!("Created group '{}' ({size}).", name.as_str());
    println!("ID: {id}");
    Ok(())
}

fn rename(ctx: &CliContext, id: &GroupId, new_name: &str) {
    if ctx.app().groups().rename_group(id, new_name) {
        println!("Renamed group to '{}'.", new_name.trim());
        return;
    }

    if ctx.app().groups().get(id).is_none() {
        print_missing(id);
    } else if let Err(e) = GroupName::parse(new_name) {
        println!("Name not changed: {e}.");
    }
}

fn delete(ctx: &CliContext, id: &GroupId) {
    if ctx.app().groups().delete_group(id) {
        println!("Deleted group {id}.");
    } else {
        print_missing(id);
    }
}

fn clear(ctx: &CliContext) {
    match ctx.app().groups().delete_all() {
        0 => println!("There are no groups to delete."),
        count => println!("Deleted {count} group(s)."),
    }
}

async fn add(ctx: &CliContext, id: &GroupId, query: &str) -> Result<()> {
    let Some(group) = ctx.app().groups().get(id) else {
        print_missing(id);
        return Ok(());
    };

    let entity = resolve_entity(ctx, query).await?;
    let (entity_id, name) = (entity.id, entity.name.clone());

    if ctx.app().groups().add_member(id, entity) {
        println!("Added {name} to '{}'.", group.name);
        return Ok(());
    }

    // Re-read: the group may have changed while the lookup was in flight.
    match ctx.app().groups().get(id) {
        None => print_missing(id),
        Some(current) => println!("{}", refusal_reason(&current, entity_id, &name)),
    }
    Ok(())
}

fn refusal_reason(group: &Group, entity_id: EntityId, name: &str) -> String {
    if group.contains(entity_id) {
        format!("{name} is already in '{}'.", group.name)
    } else {
        format!(
            "'{}' is full ({MAX_GROUP_MEMBERS} members max).",
            group.name
        )
    }
}

fn remove_member(ctx: &CliContext, id: &GroupId, entity_id: EntityId) {
    if ctx.app().groups().remove_member(id, entity_id) {
        println!("Removed #{entity_id} from group {id}.");
    } else if ctx.app().groups().get(id).is_none() {
        print_missing(id);
    } else {
        println!("#{entity_id} is not a member of group {id}.");
    }
}

async fn candidates(ctx: &CliContext, query: &str) -> Result<()> {
    let entity = resolve_entity(ctx, query).await?;
    let groups = ctx.app().groups().groups_accepting(entity.id);

    if groups.is_empty() {
        println!("No group can take {} right now.", entity.name);
        return Ok(());
    }

    println!("{} can be added to:\n", entity.name);
    print_group_table(&groups);
    Ok(())
}

fn print_missing(id: &GroupId) {
    println!("No group found with id '{id}'.");
    println!("Use 'dexkeep groups list' to see available groups.");
}
