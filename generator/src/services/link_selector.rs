//! Internal link selection for cross-reference context
//!
//! Links from the article's own category are preferred; when the category
//! pool runs short the remainder is drawn from all other categories. The
//! article never links to itself and a short result is valid. All sampling
//! goes through the caller-supplied rng so tests can seed it.

use rand::seq::SliceRandom;
use rand::Rng;

use shared::types::path_category;
use shared::LinkIndex;

pub struct LinkSelector {
    index: LinkIndex,
    site_domain: String,
}

impl LinkSelector {
    pub fn new(index: LinkIndex, site_domain: impl Into<String>) -> Self {
        Self {
            index,
            site_domain: site_domain.into(),
        }
    }

    /// Pick up to `count` distinct cross-reference paths for `target_path`,
    /// excluding the target itself
    pub fn select_links<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        target_path: &str,
        count: usize,
        prefer_same_category: bool,
    ) -> Vec<String> {
        let category = path_category(target_path);
        let mut selected: Vec<String> = Vec::new();

        if prefer_same_category {
            let same_category: Vec<&String> = self
                .index
                .get(category)
                .map(|links| {
                    links
                        .iter()
                        .filter(|link| link.as_str() != target_path)
                        .collect()
                })
                .unwrap_or_default();

            if same_category.len() >= count {
                return same_category
                    .choose_multiple(rng, count)
                    .map(|link| (*link).clone())
                    .collect();
            }
            selected.extend(same_category.into_iter().cloned());
        }

        if selected.len() < count {
            let pool: Vec<&String> = self
                .index
                .values()
                .flatten()
                .filter(|link| link.as_str() != target_path && !selected.contains(*link))
                .collect();
            let needed = count - selected.len();
            selected.extend(
                pool.choose_multiple(rng, needed)
                    .map(|link| (*link).clone()),
            );
        }

        selected.truncate(count);
        selected
    }

    /// Format selected links as Markdown bullets, input order preserved
    pub fn format_for_prompt(&self, links: &[String]) -> String {
        links
            .iter()
            .map(|link| {
                format!(
                    "- [{}]({}{})",
                    derive_title(link),
                    self.site_domain,
                    link
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Last path segment with separators replaced by spaces, each word capitalized
fn derive_title(link: &str) -> String {
    link.trim_matches('/')
        .split('/')
        .last()
        .unwrap_or("")
        .split('-')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

// Title-case: upper first letter, lower the rest
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
        }
        None => String::new(),
    }
}
