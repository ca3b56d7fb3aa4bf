use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;

use crate::error::CourseError;

static CONTENT_DIR: Dir = include_dir!("src/content");

/// A named content pool: the word and image lists for one project category.
/// Read-only; selected once at configuration time.
#[derive(Deserialize, Clone, Debug)]
pub struct Category {
    pub name: String,
    pub display_name: String,
    pub words: Vec<String>,
    pub images: Vec<String>,
}

impl Category {
    /// Load a category by name from the embedded catalog.
    pub fn load(name: &str) -> Result<Self, CourseError> {
        let file = CONTENT_DIR
            .get_file(format!("categories/{name}.json"))
            .ok_or_else(|| CourseError::UnknownCategory(name.to_string()))?;

        let text = file
            .contents_utf8()
            .expect("category file is not valid UTF-8");
        let category: Category = from_str(text).expect("unable to deserialize category json");
        Ok(category)
    }

    /// Names of every embedded category, for the configuration panel.
    pub fn names() -> Vec<String> {
        let mut names: Vec<String> = CONTENT_DIR
            .get_dir("categories")
            .expect("embedded categories directory missing")
            .files()
            .filter_map(|f| f.path().file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// The generic filler words blended into every category's word pool.
pub fn generic_words() -> Vec<String> {
    #[derive(Deserialize)]
    struct Generic {
        words: Vec<String>,
    }

    let file = CONTENT_DIR
        .get_file("generic.json")
        .expect("embedded generic word list missing");
    let text = file.contents_utf8().expect("generic.json is not UTF-8");
    let generic: Generic = from_str(text).expect("unable to deserialize generic.json");
    generic.words
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn pottery_category_loads() {
        let cat = Category::load("pottery").unwrap();
        assert_eq!(cat.name, "pottery");
        assert_eq!(cat.display_name, "Pottery");
        assert!(cat.words.len() >= 30);
        assert!(cat.images.len() >= 20);
    }

    #[test]
    fn every_embedded_category_loads() {
        let names = Category::names();
        assert!(!names.is_empty());
        for name in names {
            let cat = Category::load(&name).unwrap();
            assert_eq!(cat.name, name);
            assert!(!cat.words.is_empty());
            assert!(!cat.images.is_empty());
        }
    }

    #[test]
    fn unknown_category_is_an_error() {
        assert_matches!(
            Category::load("underwater-basket-weaving"),
            Err(CourseError::UnknownCategory(_))
        );
    }

    #[test]
    fn generic_pool_is_large_enough_to_sample() {
        // Deck construction samples 30 generic words per playback.
        assert!(generic_words().len() >= 30);
    }
}
