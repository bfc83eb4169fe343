//! REST
//!
//! The remote exercise catalog is a set of paginated collections. Every page carries a `results`
//! array and the URL of the following page in `next`.

use gloo_net::http::Request;
use log::debug;
use serde::{Deserialize, de::DeserializeOwned};
use workout_generator_domain as domain;

pub const API_URL: &str = "https://wger.de/api/v2";

#[allow(async_fn_in_trait)]
pub trait SendRequest {
    async fn send_request(&self, url: &str) -> Result<Response, domain::StorageError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    #[must_use]
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Clone, Copy)]
pub struct GlooNetSendRequest;

impl SendRequest for GlooNetSendRequest {
    async fn send_request(&self, url: &str) -> Result<Response, domain::StorageError> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|_| domain::StorageError::NoConnection)?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| domain::StorageError::Other(err.into()))?;
        Ok(Response { status, body })
    }
}

#[derive(Clone)]
pub struct REST<S: SendRequest> {
    pub sender: S,
}

impl REST<GlooNetSendRequest> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sender: GlooNetSendRequest,
        }
    }
}

impl Default for REST<GlooNetSendRequest> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SendRequest> REST<S> {
    /// Follows the `next` cursors starting at `url` and concatenates all results.
    ///
    /// Pages are requested one after another. Any unsuccessful response aborts the whole fetch.
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<Vec<T>, domain::ReadError> {
        let mut results = vec![];
        let mut next = Some(url.to_string());

        while let Some(url) = next {
            debug!("fetching {url}");
            let response = self.sender.send_request(&url).await?;
            if !response.ok() {
                return Err(domain::ReadError::RequestFailed(response.status));
            }
            let page = serde_json::from_str::<Page<T>>(&response.body).map_err(|err| {
                domain::ReadError::Other(format!("deserialization failed: {err}").into())
            })?;
            results.extend(page.results);
            next = page.next.filter(|next| !next.is_empty());
        }

        Ok(results)
    }
}

impl<S: SendRequest> domain::CatalogRepository for REST<S> {
    async fn read_muscles(&self) -> Result<Vec<domain::MuscleRef>, domain::ReadError> {
        Ok(self
            .fetch_all::<Muscle>(&format!("{API_URL}/muscle/?limit=200"))
            .await?
            .into_iter()
            .map(domain::MuscleRef::from)
            .collect())
    }

    async fn read_exercises(
        &self,
        language: domain::LanguageID,
    ) -> Result<Vec<domain::CatalogExercise>, domain::ReadError> {
        Ok(self
            .fetch_all::<ExerciseInfo>(&format!("{API_URL}/exerciseinfo/?language={language}"))
            .await?
            .into_iter()
            .map(domain::CatalogExercise::from)
            .collect())
    }
}

#[derive(Deserialize)]
struct Page<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
    #[serde(default)]
    next: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Muscle {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub name_en: Option<String>,
}

impl From<Muscle> for domain::MuscleRef {
    fn from(value: Muscle) -> Self {
        let name = [value.name_en, value.name]
            .into_iter()
            .flatten()
            .find(|n| !n.is_empty())
            .unwrap_or_default();
        domain::MuscleRef {
            id: value.id.into(),
            name: name.trim().to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ExerciseInfo {
    pub id: u32,
    #[serde(default)]
    pub translations: Option<Vec<Translation>>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub muscles: Option<Vec<Reference>>,
    #[serde(default)]
    pub muscles_secondary: Option<Vec<Reference>>,
    #[serde(default)]
    pub equipment: Option<Vec<Equipment>>,
}

impl From<ExerciseInfo> for domain::CatalogExercise {
    fn from(value: ExerciseInfo) -> Self {
        let muscle_ids = |references: Option<Vec<Reference>>| {
            references
                .unwrap_or_default()
                .iter()
                .filter_map(Reference::id)
                .map(domain::MuscleID::from)
                .collect()
        };
        domain::CatalogExercise {
            id: value.id.into(),
            translations: value
                .translations
                .unwrap_or_default()
                .into_iter()
                .filter_map(Translation::normalize)
                .collect(),
            name: value.name.unwrap_or_default(),
            description: value.description.unwrap_or_default(),
            muscles: muscle_ids(value.muscles),
            muscles_secondary: muscle_ids(value.muscles_secondary),
            equipment: value
                .equipment
                .unwrap_or_default()
                .into_iter()
                .filter_map(Equipment::name)
                .collect(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Translation {
    pub language: Reference,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Translation {
    /// Translations without a language reference are dropped.
    fn normalize(self) -> Option<domain::Translation> {
        Some(domain::Translation {
            language: self.language.id()?.into(),
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
        })
    }
}

/// Reference to another catalog record, either by bare ID or as nested object.
///
/// Any other value is accepted as `Other` so that a single malformed record does not fail the
/// whole page.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Reference {
    Id(u32),
    Object { id: u32 },
    Other(serde_json::Value),
}

impl Reference {
    #[must_use]
    pub fn id(&self) -> Option<u32> {
        match self {
            Reference::Id(id) | Reference::Object { id } => Some(*id),
            Reference::Other(_) => None,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Equipment {
    Name(String),
    Id(u32),
    Object { name: String },
    Other(serde_json::Value),
}

impl Equipment {
    #[must_use]
    pub fn name(self) -> Option<String> {
        match self {
            Equipment::Name(name) | Equipment::Object { name } => Some(name),
            Equipment::Id(id) => Some(id.to_string()),
            Equipment::Other(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::VecDeque};

    use futures_util::FutureExt;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use workout_generator_domain::CatalogRepository;

    use super::*;

    struct MockSendRequest {
        requests: RefCell<Vec<String>>,
        responses: RefCell<VecDeque<Result<Response, domain::StorageError>>>,
    }

    fn rest_with_responses(
        responses: Vec<Result<Response, domain::StorageError>>,
    ) -> REST<MockSendRequest> {
        REST {
            sender: MockSendRequest {
                requests: RefCell::new(vec![]),
                responses: RefCell::new(responses.into()),
            },
        }
    }

    fn ok(body: &serde_json::Value) -> Result<Response, domain::StorageError> {
        Ok(Response {
            status: 200,
            body: body.to_string(),
        })
    }

    impl SendRequest for MockSendRequest {
        async fn send_request(&self, url: &str) -> Result<Response, domain::StorageError> {
            self.requests.borrow_mut().push(url.to_string());
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or(Err(domain::StorageError::NoConnection))
        }
    }

    #[test]
    fn test_fetch_all_follows_next() {
        let rest = rest_with_responses(vec![
            ok(&json!({ "results": ["a", "b"], "next": "p2" })),
            ok(&json!({ "results": ["c"], "next": null })),
        ]);

        assert_eq!(
            rest.fetch_all::<String>("p1")
                .now_or_never()
                .unwrap()
                .unwrap(),
            vec!["a", "b", "c"]
        );
        assert_eq!(*rest.sender.requests.borrow(), vec!["p1", "p2"]);
    }

    #[test]
    fn test_fetch_all_missing_fields() {
        let rest = rest_with_responses(vec![
            ok(&json!({ "results": ["a"], "next": "" })),
            ok(&json!({})),
        ]);

        assert_eq!(
            rest.fetch_all::<String>("p1")
                .now_or_never()
                .unwrap()
                .unwrap(),
            vec!["a"]
        );
        assert_eq!(rest.sender.requests.borrow().len(), 1);
    }

    #[test]
    fn test_fetch_all_request_failed() {
        let rest = rest_with_responses(vec![
            ok(&json!({ "results": ["a"], "next": "p2" })),
            Ok(Response {
                status: 503,
                body: String::new(),
            }),
            ok(&json!({ "results": ["c"], "next": null })),
        ]);

        assert!(matches!(
            rest.fetch_all::<String>("p1").now_or_never().unwrap(),
            Err(domain::ReadError::RequestFailed(503))
        ));
        assert_eq!(rest.sender.requests.borrow().len(), 2);
    }

    #[test]
    fn test_fetch_all_no_connection() {
        let rest = rest_with_responses(vec![Err(domain::StorageError::NoConnection)]);

        assert!(matches!(
            rest.fetch_all::<String>("p1").now_or_never().unwrap(),
            Err(domain::ReadError::Storage(
                domain::StorageError::NoConnection
            ))
        ));
    }

    #[test]
    fn test_fetch_all_invalid_body() {
        let rest = rest_with_responses(vec![Ok(Response {
            status: 200,
            body: "<html>".to_string(),
        })]);

        assert!(matches!(
            rest.fetch_all::<String>("p1").now_or_never().unwrap(),
            Err(domain::ReadError::Other(error))
                if error.to_string().starts_with("deserialization failed")
        ));
    }

    #[test]
    fn test_read_muscles() {
        let rest = rest_with_responses(vec![ok(&json!({
            "results": [
                { "id": 1, "name": "Biceps brachii", "name_en": "Biceps" },
                { "id": 2, "name": "Obliquus externus abdominis", "name_en": "" },
                { "id": 3, "name": "", "name_en": null },
            ],
            "next": null
        }))]);

        assert_eq!(
            rest.read_muscles().now_or_never().unwrap().unwrap(),
            vec![
                domain::MuscleRef {
                    id: 1.into(),
                    name: "Biceps".to_string()
                },
                domain::MuscleRef {
                    id: 2.into(),
                    name: "Obliquus externus abdominis".to_string()
                },
                domain::MuscleRef {
                    id: 3.into(),
                    name: String::new()
                },
            ]
        );
        assert_eq!(
            *rest.sender.requests.borrow(),
            vec!["https://wger.de/api/v2/muscle/?limit=200"]
        );
    }

    #[test]
    fn test_read_exercises() {
        let rest = rest_with_responses(vec![
            ok(&json!({
                "results": [{
                    "id": 1,
                    "muscles": [{ "id": 5, "name": "Pectoralis major" }],
                    "muscles_secondary": [4],
                    "translations": [
                        { "language": 1, "name": "Liegestütz", "description": "Auf den Boden" },
                        { "language": 2, "name": "Push-up", "description": "Do a push-up" }
                    ],
                    "equipment": []
                }],
                "next": "https://wger.de/api/v2/exerciseinfo/?language=2&offset=20"
            })),
            ok(&json!({
                "results": [{
                    "id": 2,
                    "name": "Bench Press",
                    "description": "<p>Press</p>",
                    "muscles": [4],
                    "muscles_secondary": null,
                    "equipment": [{ "id": 1, "name": "Barbell" }, "Bench", 7]
                }],
                "next": null
            })),
        ]);

        assert_eq!(
            rest.read_exercises(domain::LANGUAGE_ENGLISH)
                .now_or_never()
                .unwrap()
                .unwrap(),
            vec![
                domain::CatalogExercise {
                    id: 1.into(),
                    translations: vec![
                        domain::Translation {
                            language: 1.into(),
                            name: "Liegestütz".to_string(),
                            description: "Auf den Boden".to_string(),
                        },
                        domain::Translation {
                            language: 2.into(),
                            name: "Push-up".to_string(),
                            description: "Do a push-up".to_string(),
                        },
                    ],
                    name: String::new(),
                    description: String::new(),
                    muscles: vec![5.into()],
                    muscles_secondary: vec![4.into()],
                    equipment: vec![],
                },
                domain::CatalogExercise {
                    id: 2.into(),
                    translations: vec![],
                    name: "Bench Press".to_string(),
                    description: "<p>Press</p>".to_string(),
                    muscles: vec![4.into()],
                    muscles_secondary: vec![],
                    equipment: vec!["Barbell".to_string(), "Bench".to_string(), "7".to_string()],
                },
            ]
        );
        assert_eq!(
            *rest.sender.requests.borrow(),
            vec![
                "https://wger.de/api/v2/exerciseinfo/?language=2",
                "https://wger.de/api/v2/exerciseinfo/?language=2&offset=20"
            ]
        );
    }

    #[test]
    fn test_read_exercises_malformed_references() {
        let rest = rest_with_responses(vec![ok(&json!({
            "results": [
                {
                    "id": 1,
                    "name": "Plank",
                    "muscles": [{ "name": "Rectus abdominis" }, 6],
                    "muscles_secondary": [null],
                    "translations": [
                        { "language": null, "name": "Unterarmstütz" },
                        { "language": { "id": 2 }, "name": "Plank" }
                    ],
                    "equipment": [null, { "id": 3 }, "Mat"]
                },
                {
                    "id": 2,
                    "name": "Bench Press",
                    "muscles": [4],
                    "equipment": ["Barbell"]
                }
            ],
            "next": null
        }))]);

        assert_eq!(
            rest.read_exercises(domain::LANGUAGE_ENGLISH)
                .now_or_never()
                .unwrap()
                .unwrap(),
            vec![
                domain::CatalogExercise {
                    id: 1.into(),
                    translations: vec![domain::Translation {
                        language: 2.into(),
                        name: "Plank".to_string(),
                        description: String::new(),
                    }],
                    name: "Plank".to_string(),
                    description: String::new(),
                    muscles: vec![6.into()],
                    muscles_secondary: vec![],
                    equipment: vec!["Mat".to_string()],
                },
                domain::CatalogExercise {
                    id: 2.into(),
                    translations: vec![],
                    name: "Bench Press".to_string(),
                    description: String::new(),
                    muscles: vec![4.into()],
                    muscles_secondary: vec![],
                    equipment: vec!["Barbell".to_string()],
                },
            ]
        );
    }
}
