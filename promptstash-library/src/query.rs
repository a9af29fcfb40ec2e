//! Pure search, sort, and sidebar filtering over already-fetched prompts.
//!
//! No store access and no hazards here: these operate on slices the caller
//! fetched, synchronously.

use promptstash_core::{CategoryId, Prompt};
use serde::{Deserialize, Serialize};

/// List ordering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOption {
    /// Most recently touched first.
    #[default]
    DateUpdated,
    /// Most recently created first.
    DateCreated,
    TitleAz,
    TitleZa,
}

/// Sidebar selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Favorites,
    Category(CategoryId),
}

impl Filter {
    pub fn matches(&self, prompt: &Prompt) -> bool {
        match self {
            Filter::All => true,
            Filter::Favorites => prompt.favorite,
            Filter::Category(id) => prompt.category_id == Some(*id),
        }
    }
}

/// Case-insensitive substring match over title and body.
pub fn search(prompts: &[Prompt], query: &str) -> Vec<Prompt> {
    if query.is_empty() {
        return prompts.to_vec();
    }
    let query = query.to_lowercase();
    prompts
        .iter()
        .filter(|p| {
            p.title.to_lowercase().contains(&query) || p.body.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

/// Sort prompts in place. Stable, so equal keys keep their fetched order.
pub fn sort(prompts: &mut [Prompt], option: SortOption) {
    match option {
        SortOption::DateUpdated => prompts.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        SortOption::DateCreated => prompts.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOption::TitleAz => {
            prompts.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        }
        SortOption::TitleZa => {
            prompts.sort_by(|a, b| b.title.to_lowercase().cmp(&a.title.to_lowercase()))
        }
    }
}

/// Keep only prompts matching the sidebar selection.
pub fn filter(prompts: &[Prompt], selection: Filter) -> Vec<Prompt> {
    prompts
        .iter()
        .filter(|p| selection.matches(p))
        .cloned()
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use promptstash_core::new_entity_id;

    fn prompts() -> Vec<Prompt> {
        let mut swift = Prompt::new("Swift Code Review", "Review the following Swift code", None);
        swift.favorite = true;
        let blog = Prompt::new("Blog Post Draft", "Write a blog post", None);
        let data = Prompt::new("data analysis", "Analyze the DATASET", None);
        vec![swift, blog, data]
    }

    #[test]
    fn search_matches_title_and_body_case_insensitively() {
        let all = prompts();

        let by_title = search(&all, "swift");
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].title, "Swift Code Review");

        let by_body = search(&all, "dataset");
        assert_eq!(by_body.len(), 1);
        assert_eq!(by_body[0].title, "data analysis");
    }

    #[test]
    fn empty_query_returns_everything() {
        let all = prompts();
        assert_eq!(search(&all, "").len(), all.len());
    }

    #[test]
    fn search_with_no_hits_is_empty() {
        assert!(search(&prompts(), "nonexistent").is_empty());
    }

    #[test]
    fn title_sort_ignores_case() {
        let mut all = prompts();
        sort(&mut all, SortOption::TitleAz);
        let titles: Vec<&str> = all.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Blog Post Draft", "data analysis", "Swift Code Review"]);

        sort(&mut all, SortOption::TitleZa);
        let titles: Vec<&str> = all.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Swift Code Review", "data analysis", "Blog Post Draft"]);
    }

    #[test]
    fn date_sorts_are_newest_first() {
        let mut all = prompts();
        sort(&mut all, SortOption::DateCreated);
        assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));

        sort(&mut all, SortOption::DateUpdated);
        assert!(all.windows(2).all(|w| w[0].updated_at >= w[1].updated_at));
    }

    #[test]
    fn filters_select_favorites_and_categories() {
        let category_id = new_entity_id();
        let mut all = prompts();
        all[1].category_id = Some(category_id);

        assert_eq!(filter(&all, Filter::All).len(), 3);

        let favorites = filter(&all, Filter::Favorites);
        assert_eq!(favorites.len(), 1);
        assert!(favorites[0].favorite);

        let in_category = filter(&all, Filter::Category(category_id));
        assert_eq!(in_category.len(), 1);
        assert_eq!(in_category[0].title, "Blog Post Draft");
    }

    #[test]
    fn search_does_not_mutate_input() {
        let all = prompts();
        let before = all.clone();
        let _ = search(&all, "swift");
        assert_eq!(all, before);
    }
}
