// Query operations - list, highlights, stats, tags

use crate::cli::{ListArgs, ListFormat};
use crate::core::data::PromptCollection;
use crate::core::search::FilterCriteria;
use crate::core::state::Highlights;
use crate::manager::Backend;
use crate::utils::DisplayFormatter;
use crate::utils::error::{AppResult, FlowResult, handle_flow};

pub async fn handle_list_command(backend: &Backend, args: &ListArgs) -> AppResult<()> {
    if args.all_tags {
        let prompts = backend.store().list().await?;
        DisplayFormatter::print_tags(&PromptCollection::new(prompts).get_all_tags());
        return Ok(());
    }

    if args.stats {
        DisplayFormatter::print_stats(&backend.stats().await?);
        return Ok(());
    }

    let view = backend.view(criteria_from_args(args)).await?;

    if view.filtered.is_empty() && args.format != ListFormat::Json {
        let item_type = if view.filters_active {
            "prompts matching your criteria"
        } else {
            "prompts"
        };
        handle_flow(FlowResult::EmptyList {
            item_type: item_type.to_string(),
        });
    } else {
        DisplayFormatter::print_view(&view, &args.format)?;
    }

    if args.highlights && args.format != ListFormat::Json {
        DisplayFormatter::print_highlights(&Highlights {
            favorites: view.favorites,
            frequent: view.frequent,
        });
    }

    Ok(())
}

fn criteria_from_args(args: &ListArgs) -> FilterCriteria {
    let mut criteria = FilterCriteria::new()
        .tags(args.tags.iter().cloned())
        .favorites_only(args.favorites);
    if let Some(term) = &args.search {
        criteria = criteria.search(term);
    }
    if let Some(category) = &args.category {
        criteria = criteria.category(category);
    }
    criteria
}
