//! Embedded article panels: course framing text and the lesson series.

use include_dir::{include_dir, Dir};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::CourseError;

static CONTENT_DIR: Dir = include_dir!("src/content");

#[derive(Deserialize, Clone, Debug)]
pub struct Article {
    pub title: String,
    pub body: String,
}

fn articles() -> &'static HashMap<String, Article> {
    static ARTICLES: OnceLock<HashMap<String, Article>> = OnceLock::new();
    ARTICLES.get_or_init(|| {
        let file = CONTENT_DIR
            .get_file("articles.json")
            .expect("embedded articles.json missing");
        let text = file.contents_utf8().expect("articles.json is not UTF-8");
        serde_json::from_str(text).expect("unable to deserialize articles.json")
    })
}

/// Look up an article panel by id (ex: "FLO00", "SSToday").
pub fn lookup(id: &str) -> Result<&'static Article, CourseError> {
    articles()
        .get(id)
        .ok_or_else(|| CourseError::UnknownArticle(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crate::calendar::Calendar;

    #[test]
    fn framing_articles_exist() {
        for id in [
            "Contents",
            "EnableStorage",
            "SSDay1",
            "SS2ndView",
            "SSToday",
            "SSInterrupt",
            "SSNums",
            "AskLesson",
            "NoLesson",
            "NoLesson1",
            "WaitDay",
            "WaitLesson",
            "WaitHW",
            "LessonDone",
            "Done",
        ] {
            let article = lookup(id).unwrap();
            assert!(!article.title.is_empty());
            assert!(!article.body.is_empty());
        }
    }

    #[test]
    fn every_calendar_lesson_has_an_article() {
        for (_, lesson) in Calendar::course().days() {
            if let Some(id) = lesson {
                assert!(lookup(id).is_ok(), "missing article for lesson {id}");
            }
        }
    }

    #[test]
    fn unknown_article_is_an_error() {
        assert_matches!(lookup("ZZZ99"), Err(CourseError::UnknownArticle(_)));
    }
}
