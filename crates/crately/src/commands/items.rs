//! Item command handlers.

use std::sync::Arc;

use tabled::Tabled;

use crately_core::{
    Command as CoreCommand, CommandResult, Controller, Item, ItemForm, ListView, PAGE_SIZE,
};

use crate::cli::{GlobalOpts, ItemFieldArgs, ItemsArgs, ItemsCommand, ListArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Category")]
    category: String,
}

impl From<&Arc<Item>> for ItemRow {
    fn from(item: &Arc<Item>) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            quantity: item.quantity,
            price: format!("{:.2}", item.price),
            category: item.category.clone(),
        }
    }
}

fn detail(item: &Arc<Item>) -> String {
    [
        format!("ID:        {}", item.id),
        format!("Name:      {}", item.name),
        format!("Quantity:  {}", item.quantity),
        format!("Price:     {:.2}", item.price),
        format!("Category:  {}", item.category),
    ]
    .join("\n")
}

/// Validate raw field flags through the shared draft form, so the CLI
/// rejects the same inputs the TUI form would.
fn validate_fields(fields: &ItemFieldArgs) -> Result<crately_core::ItemWriteRequest, CliError> {
    let form = ItemForm {
        name: fields.name.clone(),
        quantity: fields.quantity.clone(),
        price: fields.price.clone(),
        category: fields.category.clone(),
    };
    form.validate().map_err(|e| CliError::Validation {
        field: "fields".into(),
        reason: e.to_string(),
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: ItemsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ItemsCommand::List(list) => handle_list(controller, &list, global),

        ItemsCommand::Get { id } => {
            let Some(item) = controller.get_item(id) else {
                return Err(CliError::NotFound { id });
            };
            let out = global
                .output
                .render_single(&item, |i| detail(i), |i| i.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ItemsCommand::Add(fields) => {
            let request = validate_fields(&fields)?;
            let result = controller.execute(CoreCommand::CreateItem(request)).await?;
            if let CommandResult::Item(item) = result {
                output::print_status(&format!("Created item {} ({})", item.id, item.name), global);
            }
            Ok(())
        }

        ItemsCommand::Update { id, fields } => {
            let update = validate_fields(&fields)?;
            let result = controller
                .execute(CoreCommand::UpdateItem { id, update })
                .await?;
            if let CommandResult::Item(item) = result {
                output::print_status(&format!("Updated item {} ({})", item.id, item.name), global);
            }
            Ok(())
        }

        ItemsCommand::Delete { id } => {
            if controller.get_item(id).is_none() {
                return Err(CliError::NotFound { id });
            }
            if !util::confirm(&format!("Delete item {id}? This cannot be undone."), global.yes)? {
                return Ok(());
            }
            controller.execute(CoreCommand::DeleteItem { id }).await?;
            output::print_status(&format!("Deleted item {id}"), global);
            Ok(())
        }
    }
}

/// Run the list pipeline through `ListView` so the CLI's search, sort,
/// and pagination semantics match the TUI exactly.
fn handle_list(
    controller: &Controller,
    list: &ListArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut view = ListView::new();
    view.set_snapshot(controller.items_snapshot());
    if let Some(ref query) = list.search {
        view.set_search(query.clone());
    }
    view.set_sort(list.sort, list.order);

    let rows = if let Some(page) = list.page {
        view.set_page(page);
        if !global.quiet {
            eprintln!(
                "Page {} of {} ({} per page)",
                view.current_page(),
                view.page_count(),
                PAGE_SIZE
            );
        }
        view.visible_rows()
    } else {
        view.rows()
    };

    let out = global
        .output
        .render_list(&rows, |i| ItemRow::from(i), |i| i.id.to_string());
    output::print_output(&out, global.quiet);
    Ok(())
}
