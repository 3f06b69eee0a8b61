//! Tutorial guide
//!
//! Static educational content about building LLM agents, rendered to the
//! terminal. Pages are fixed data; there is no state and no control flow
//! beyond iterating over the sections.

pub mod pages;
pub mod render;

pub use render::GuideRenderer;

/// A block of page content
#[derive(Debug, Clone, Copy)]
pub enum Section {
    Heading(&'static str),
    Paragraph(&'static str),
    Bullets(&'static [&'static str]),
    Code {
        lang: &'static str,
        text: &'static str,
    },
    Note(&'static str),
}

/// A single guide page
#[derive(Debug, Clone, Copy)]
pub struct Page {
    /// Stable identifier used on the command line
    pub slug: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub sections: &'static [Section],
}

/// All guide pages, in reading order.
pub fn all_pages() -> &'static [Page] {
    pages::PAGES
}

/// Look up a page by slug (case-insensitive).
pub fn find_page(slug: &str) -> Option<&'static Page> {
    let slug = slug.to_lowercase();
    pages::PAGES.iter().find(|p| p.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_present_in_reading_order() {
        let slugs: Vec<&str> = all_pages().iter().map(|p| p.slug).collect();
        assert_eq!(
            slugs,
            vec![
                "introduction",
                "prerequisites",
                "development",
                "examples",
                "deployment"
            ]
        );
    }

    #[test]
    fn test_slugs_unique() {
        let mut slugs: Vec<&str> = all_pages().iter().map(|p| p.slug).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), all_pages().len());
    }

    #[test]
    fn test_every_page_has_content() {
        for page in all_pages() {
            assert!(!page.title.is_empty(), "page {} missing title", page.slug);
            assert!(!page.summary.is_empty(), "page {} missing summary", page.slug);
            assert!(
                !page.sections.is_empty(),
                "page {} has no sections",
                page.slug
            );
        }
    }

    #[test]
    fn test_find_page_case_insensitive() {
        assert!(find_page("Introduction").is_some());
        assert!(find_page("DEPLOYMENT").is_some());
        assert!(find_page("nonexistent").is_none());
    }
}
