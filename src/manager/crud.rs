// CRUD operations - Create, Read, Update, Delete
// plus the favorite toggle and use counter

use crate::cli::{DeleteArgs, EditArgs, FavArgs, IdArgs, NewArgs};
use crate::core::data::{Prompt, PromptInput, PromptPatch};
use crate::manager::Backend;
use crate::utils::error::{AppError, AppResult, FlowResult, handle_flow};
use crate::utils::{OutputStyle, print_success, prompt_yes_no};

// Create operations
pub async fn handle_new_command(backend: &Backend, args: &NewArgs) -> AppResult<Prompt> {
    let mut input = PromptInput::new(&args.title, &args.content)
        .with_tags(args.tags.iter().cloned())
        .favorite(args.favorite);
    if let Some(category) = &args.category {
        input = input.with_category(category);
    }

    let prompt = backend.store().create(input).await?;
    print_success(&format!("Prompt '{}' saved ({})", prompt.title, prompt.id));
    Ok(prompt)
}

// Read operations
pub async fn handle_show_command(backend: &Backend, args: &IdArgs) -> AppResult<Prompt> {
    let prompt = backend.store().get(&args.id).await?;
    OutputStyle::print_prompt_detailed(&prompt);
    Ok(prompt)
}

// Update operations
pub async fn handle_edit_command(backend: &Backend, args: &EditArgs) -> AppResult<Prompt> {
    let prompt = if args.replace {
        let input = PromptInput {
            title: args.title.clone(),
            content: args.content.clone(),
            category: args.category.clone(),
            tags: args.tags.clone(),
            is_favorite: None,
        };
        backend.store().replace(&args.id, input).await?
    } else {
        let patch = PromptPatch {
            title: args.title.clone(),
            content: args.content.clone(),
            category: args.category.clone(),
            tags: args.tags.clone(),
            is_favorite: None,
        };
        if patch.is_empty() {
            return Err(AppError::validation(
                "Nothing to update; pass --title, --content, --category or --tag",
            ));
        }
        backend.store().patch(&args.id, patch).await?
    };

    print_success(&format!("Prompt '{}' updated", prompt.title));
    Ok(prompt)
}

pub async fn handle_fav_command(backend: &Backend, args: &FavArgs) -> AppResult<Prompt> {
    let prompt = backend
        .store()
        .patch(&args.id, PromptPatch::favorite(!args.off))
        .await?;

    let state = if prompt.is_favorite {
        "added to"
    } else {
        "removed from"
    };
    print_success(&format!("'{}' {} favorites", prompt.title, state));
    Ok(prompt)
}

pub async fn handle_use_command(backend: &Backend, args: &IdArgs) -> AppResult<Prompt> {
    let prompt = backend.store().mark_used(&args.id).await?;
    OutputStyle::print_rendered_content(&prompt.content);
    println!(
        "{}",
        OutputStyle::muted(&format!("'{}' used {} times", prompt.title, prompt.use_count))
    );
    Ok(prompt)
}

// Delete operations
pub async fn handle_delete_command(backend: &Backend, args: &DeleteArgs) -> AppResult<()> {
    let prompt = backend.store().get(&args.id).await?;

    if !args.force {
        println!("Prompt to delete:");
        println!("{}", OutputStyle::format_prompt_line(&prompt));
        if !prompt_yes_no("\nAre you sure you want to delete this prompt?")? {
            handle_flow(FlowResult::Cancelled("Prompt not deleted".to_string()));
            return Ok(());
        }
    }

    backend.store().delete(&prompt.id).await?;
    handle_flow(FlowResult::Success(format!(
        "Prompt '{}' deleted successfully!",
        prompt.title
    )));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::Category;
    use crate::core::store::MemoryStore;
    use std::sync::Arc;

    fn backend() -> Backend {
        Backend::from_store(Arc::new(MemoryStore::new()))
    }

    fn new_args(title: &str) -> NewArgs {
        NewArgs {
            title: title.to_string(),
            content: "body".to_string(),
            category: Some("Writing".to_string()),
            tags: vec!["draft".to_string()],
            favorite: false,
        }
    }

    fn edit_args(id: &str) -> EditArgs {
        EditArgs {
            id: id.to_string(),
            title: None,
            content: None,
            category: None,
            tags: None,
            replace: false,
        }
    }

    #[tokio::test]
    async fn test_new_and_show() {
        let backend = backend();
        let created = handle_new_command(&backend, &new_args("Essay")).await.unwrap();
        assert_eq!(created.category, Category::Writing);

        let shown = handle_show_command(&backend, &IdArgs { id: created.id.clone() })
            .await
            .unwrap();
        assert_eq!(shown, created);
    }

    #[tokio::test]
    async fn test_edit_patch_keeps_other_fields() {
        let backend = backend();
        let created = handle_new_command(&backend, &new_args("Essay")).await.unwrap();

        let mut args = edit_args(&created.id);
        args.title = Some("Renamed".to_string());
        let edited = handle_edit_command(&backend, &args).await.unwrap();
        assert_eq!(edited.title, "Renamed");
        assert_eq!(edited.tags, vec!["draft"]);
        assert_eq!(edited.category, Category::Writing);

        let empty = handle_edit_command(&backend, &edit_args(&created.id)).await;
        assert!(matches!(empty, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_edit_replace_resets_defaults() {
        let backend = backend();
        let created = handle_new_command(&backend, &new_args("Essay")).await.unwrap();

        let mut args = edit_args(&created.id);
        args.replace = true;
        args.title = Some("Fresh".to_string());
        args.content = Some("new body".to_string());
        let replaced = handle_edit_command(&backend, &args).await.unwrap();
        assert!(replaced.tags.is_empty());
        assert_eq!(replaced.category, Category::Other);

        args.content = None;
        let missing = handle_edit_command(&backend, &args).await;
        assert!(matches!(missing, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_fav_use_and_forced_delete() {
        let backend = backend();
        let created = handle_new_command(&backend, &new_args("Essay")).await.unwrap();

        let fav = FavArgs { id: created.id.clone(), off: false };
        assert!(handle_fav_command(&backend, &fav).await.unwrap().is_favorite);
        let unfav = FavArgs { id: created.id.clone(), off: true };
        assert!(!handle_fav_command(&backend, &unfav).await.unwrap().is_favorite);

        let id = IdArgs { id: created.id.clone() };
        handle_use_command(&backend, &id).await.unwrap();
        assert_eq!(handle_use_command(&backend, &id).await.unwrap().use_count, 2);

        let delete = DeleteArgs { id: created.id.clone(), force: true };
        handle_delete_command(&backend, &delete).await.unwrap();
        assert!(backend.store().list().await.unwrap().is_empty());
        assert_eq!(
            handle_delete_command(&backend, &delete).await,
            Err(AppError::NotFound(created.id.clone()))
        );
    }
}
