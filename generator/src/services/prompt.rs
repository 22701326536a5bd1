//! Prompt construction from the article template
//!
//! The template carries `{url_path}`, `{article_title}`, `{keyword}`,
//! `{reference_link}`, `{internal_links}` and `{current_date}` placeholders.
//! Link selection happens here, once per request, before the request enters
//! the generation core.

use chrono::Local;
use rand::Rng;

use crate::services::link_selector::LinkSelector;
use shared::{ArticleRecord, GenerationRequest};

pub struct PromptBuilder {
    template: String,
    links_per_article: usize,
}

impl PromptBuilder {
    pub fn new(template: String, links_per_article: usize) -> Self {
        Self {
            template,
            links_per_article,
        }
    }

    pub fn build<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        selector: &LinkSelector,
        record: &ArticleRecord,
    ) -> GenerationRequest {
        let links = selector.select_links(rng, &record.url_path, self.links_per_article, true);
        let internal_links = selector.format_for_prompt(&links);
        let current_date = Local::now().format("%Y-%m-%d").to_string();
        let reference = record
            .reference
            .clone()
            .unwrap_or_else(|| "No reference provided".to_string());

        let prompt = self
            .template
            .replace("{url_path}", &record.url_path)
            .replace("{article_title}", &record.title)
            .replace("{keyword}", &record.keyword)
            .replace("{reference_link}", &reference)
            .replace("{internal_links}", &internal_links)
            .replace("{current_date}", &current_date);

        GenerationRequest {
            record: record.clone(),
            prompt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use shared::LinkIndex;

    fn record() -> ArticleRecord {
        ArticleRecord {
            url_path: "/codes/pixel-codes/".to_string(),
            title: "Pixel Codes".to_string(),
            keyword: "pixel codes".to_string(),
            reference: None,
            priority: None,
        }
    }

    #[test]
    fn test_placeholders_replaced() {
        let mut index = LinkIndex::new();
        index.insert(
            "codes".to_string(),
            vec!["/codes/pixel-codes/".to_string(), "/codes/other/".to_string()],
        );
        let selector = LinkSelector::new(index, "https://example.org");
        let builder = PromptBuilder::new(
            "Write {article_title} at {url_path} for {keyword}.\nRef: {reference_link}\nLinks:\n{internal_links}\nDate: {current_date}"
                .to_string(),
            1,
        );

        let mut rng = StdRng::seed_from_u64(7);
        let request = builder.build(&mut rng, &selector, &record());

        assert!(request.prompt.contains("Write Pixel Codes at /codes/pixel-codes/"));
        assert!(request.prompt.contains("Ref: No reference provided"));
        assert!(request.prompt.contains("- [Other](https://example.org/codes/other/)"));
        assert!(!request.prompt.contains('{'));
    }

    #[test]
    fn test_reference_used_when_present() {
        let selector = LinkSelector::new(LinkIndex::new(), "https://example.org");
        let builder = PromptBuilder::new("Ref: {reference_link}".to_string(), 2);
        let mut with_reference = record();
        with_reference.reference = Some("https://example.org/source/".to_string());

        let mut rng = StdRng::seed_from_u64(7);
        let request = builder.build(&mut rng, &selector, &with_reference);
        assert_eq!(request.prompt, "Ref: https://example.org/source/");
    }
}
