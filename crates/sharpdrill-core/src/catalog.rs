//! Material catalog loader.
//!
//! The material file is a JSON object keyed by question type name. Each
//! bucket maps an item id to the positional arguments of that question type:
//!
//! ```json
//! {
//!     "Noun": { "1001": ["m", "Hund", "Hunde", ["dog", "hound"]] },
//!     "Verb": { "2001": ["gehen", "gehe", "gehst", "geht", "gegangen", "geh!", ["to go"]] },
//!     "Adjective+preposition": { "3001": ["stolz", "auf", "Akkusativ"] }
//! }
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::error::DrillError;
use crate::model::{Gender, QuestionKind};
use crate::records::Records;

/// A noun: gender, singular, plural and the accepted translations.
#[derive(Debug, Clone, PartialEq)]
pub struct NounMaterial {
    pub gender: Gender,
    pub noun: String,
    pub plural: String,
    /// Never empty; the first entry is the primary meaning.
    pub meanings: Vec<String>,
}

/// A verb with its present-tense persons, participle and imperative.
#[derive(Debug, Clone, PartialEq)]
pub struct VerbMaterial {
    pub infinitive: String,
    pub first: String,
    pub second: String,
    pub third: String,
    pub participle: String,
    pub imperative: String,
    pub meanings: Vec<String>,
}

/// An adjective together with the preposition and case it governs.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjectivePrepositionMaterial {
    pub adjective: String,
    pub preposition: String,
    pub case: String,
}

/// The constructor arguments of one item.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Noun(NounMaterial),
    Verb(VerbMaterial),
    AdjectivePreposition(AdjectivePrepositionMaterial),
}

impl Material {
    /// The question type this material belongs to.
    pub fn kind(&self) -> QuestionKind {
        match self {
            Material::Noun(_) => QuestionKind::Noun,
            Material::Verb(_) => QuestionKind::Verb,
            Material::AdjectivePreposition(_) => QuestionKind::AdjectivePreposition,
        }
    }

    /// Every free-text field, used for blank-field validation.
    fn text_fields(&self) -> Vec<&str> {
        match self {
            Material::Noun(n) => {
                let mut fields = vec![n.noun.as_str(), n.plural.as_str()];
                fields.extend(n.meanings.iter().map(String::as_str));
                fields
            }
            Material::Verb(v) => {
                let mut fields = vec![
                    v.infinitive.as_str(),
                    v.first.as_str(),
                    v.second.as_str(),
                    v.third.as_str(),
                    v.participle.as_str(),
                    v.imperative.as_str(),
                ];
                fields.extend(v.meanings.iter().map(String::as_str));
                fields
            }
            Material::AdjectivePreposition(a) => {
                vec![a.adjective.as_str(), a.preposition.as_str(), a.case.as_str()]
            }
        }
    }

    fn meanings(&self) -> &[String] {
        match self {
            Material::Noun(n) => &n.meanings,
            Material::Verb(v) => &v.meanings,
            Material::AdjectivePreposition(_) => &[],
        }
    }
}

type RawNoun = (Gender, String, String, Vec<String>);
type RawVerb = (String, String, String, String, String, String, Vec<String>);
type RawAdjectivePreposition = (String, String, String);

/// Read-only mapping from question type to item id to material.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    buckets: BTreeMap<QuestionKind, BTreeMap<String, Material>>,
}

impl Catalog {
    /// Load the catalog from a material file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read material file: {}", path.display()))?;

        Self::from_json_str(&content, path)
    }

    /// Parse a material document (useful for testing).
    pub fn from_json_str(content: &str, source_path: &Path) -> Result<Self> {
        let raw: BTreeMap<String, BTreeMap<String, Value>> = serde_json::from_str(content)
            .with_context(|| format!("failed to parse material JSON: {}", source_path.display()))?;

        let mut catalog = Catalog::default();
        let mut seen_ids = HashSet::new();

        for (type_name, items) in raw {
            let kind: QuestionKind = type_name.parse()?;
            let bucket = catalog.buckets.entry(kind).or_default();

            for (id, args) in items {
                if !seen_ids.insert(id.clone()) {
                    return Err(DrillError::InvalidMaterial {
                        id,
                        reason: "item id is used more than once".into(),
                    }
                    .into());
                }
                let material = parse_material(kind, &id, args)?;
                bucket.insert(id, material);
            }
        }

        tracing::debug!(
            items = catalog.len(),
            "loaded material from {}",
            source_path.display()
        );

        Ok(catalog)
    }

    /// Items of one question type, keyed by id.
    pub fn bucket(&self, kind: QuestionKind) -> impl Iterator<Item = (&String, &Material)> {
        self.buckets.get(&kind).into_iter().flatten()
    }

    /// Look up an item by id in any bucket.
    pub fn get(&self, id: &str) -> Option<&Material> {
        self.buckets.values().find_map(|bucket| bucket.get(id))
    }

    /// All item ids, bucket by bucket.
    pub fn ids(&self) -> impl Iterator<Item = &String> {
        self.buckets.values().flat_map(|bucket| bucket.keys())
    }

    /// Number of items of one question type.
    pub fn count(&self, kind: QuestionKind) -> usize {
        self.buckets.get(&kind).map_or(0, BTreeMap::len)
    }

    /// Total number of items.
    pub fn len(&self) -> usize {
        self.buckets.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn parse_material(kind: QuestionKind, id: &str, args: Value) -> Result<Material, DrillError> {
    let invalid = |reason: String| DrillError::InvalidMaterial {
        id: id.to_string(),
        reason,
    };

    let material = match kind {
        QuestionKind::Noun => {
            let (gender, noun, plural, meanings): RawNoun = serde_json::from_value(args)
                .map_err(|e| invalid(format!("expected [gender, noun, plural, [meanings]]: {e}")))?;
            Material::Noun(NounMaterial {
                gender,
                noun,
                plural,
                meanings,
            })
        }
        QuestionKind::Verb => {
            let (infinitive, first, second, third, participle, imperative, meanings): RawVerb =
                serde_json::from_value(args).map_err(|e| {
                    invalid(format!(
                        "expected [infinitive, first, second, third, participle, imperative, [meanings]]: {e}"
                    ))
                })?;
            Material::Verb(VerbMaterial {
                infinitive,
                first,
                second,
                third,
                participle,
                imperative,
                meanings,
            })
        }
        QuestionKind::AdjectivePreposition => {
            let (adjective, preposition, case): RawAdjectivePreposition =
                serde_json::from_value(args)
                    .map_err(|e| invalid(format!("expected [adjective, preposition, case]: {e}")))?;
            Material::AdjectivePreposition(AdjectivePrepositionMaterial {
                adjective,
                preposition,
                case,
            })
        }
    };

    if kind != QuestionKind::AdjectivePreposition && material.meanings().is_empty() {
        return Err(invalid("at least one meaning is required".into()));
    }

    Ok(material)
}

/// A warning from material validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The item id (if applicable).
    pub item_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Check a loaded catalog, and the records next to it, for common issues.
pub fn validate_catalog(catalog: &Catalog, records: Option<&Records>) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for kind in QuestionKind::ALL {
        if catalog.count(kind) == 0 {
            warnings.push(ValidationWarning {
                item_id: None,
                message: format!("no {kind} items in the material"),
            });
        }
    }

    for kind in QuestionKind::ALL {
        for (id, material) in catalog.bucket(kind) {
            if material.text_fields().iter().any(|f| f.trim().is_empty()) {
                warnings.push(ValidationWarning {
                    item_id: Some(id.clone()),
                    message: "item has a blank field".into(),
                });
            }

            let mut seen = HashSet::new();
            if material.meanings().iter().any(|m| !seen.insert(m)) {
                warnings.push(ValidationWarning {
                    item_id: Some(id.clone()),
                    message: "item lists the same meaning twice".into(),
                });
            }
        }
    }

    if let Some(records) = records {
        for id in records.keys() {
            if catalog.get(id).is_none() {
                warnings.push(ValidationWarning {
                    item_id: Some(id.clone()),
                    message: "record has no matching material item".into(),
                });
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;
    use std::path::PathBuf;

    const MATERIAL: &str = r#"{
        "Noun": {
            "1001": ["m", "Hund", "Hunde", ["dog", "hound"]],
            "1002": ["f", "Katze", "Katzen", ["cat"]]
        },
        "Verb": {
            "2001": ["gehen", "gehe", "gehst", "geht", "gegangen", "geh!", ["to go"]]
        },
        "Adjective+preposition": {
            "3001": ["stolz", "auf", "Akkusativ"]
        }
    }"#;

    fn parse(content: &str) -> Result<Catalog> {
        Catalog::from_json_str(content, &PathBuf::from("material.json"))
    }

    #[test]
    fn parse_valid_material() {
        let catalog = parse(MATERIAL).unwrap();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.count(QuestionKind::Noun), 2);
        assert_eq!(catalog.count(QuestionKind::Verb), 1);

        match catalog.get("1001") {
            Some(Material::Noun(noun)) => {
                assert_eq!(noun.gender, Gender::Masculine);
                assert_eq!(noun.plural, "Hunde");
                assert_eq!(noun.meanings, vec!["dog", "hound"]);
            }
            other => panic!("expected a noun, got {other:?}"),
        }
        assert_eq!(
            catalog.get("3001").map(Material::kind),
            Some(QuestionKind::AdjectivePreposition)
        );
    }

    #[test]
    fn missing_bucket_is_empty() {
        let catalog = parse(r#"{ "Noun": { "1001": ["n", "Haus", "Häuser", ["house"]] } }"#).unwrap();
        assert_eq!(catalog.count(QuestionKind::Verb), 0);
        assert_eq!(catalog.bucket(QuestionKind::Verb).count(), 0);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = parse(r#"{ "Idiom": {} }"#).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DrillError>(),
            Some(DrillError::UnknownQuestionType(name)) if name == "Idiom"
        ));
    }

    #[test]
    fn wrong_arity_is_rejected() {
        let err = parse(r#"{ "Adjective+preposition": { "3001": ["stolz", "auf"] } }"#).unwrap_err();
        assert!(err.to_string().contains("3001"));
    }

    #[test]
    fn bad_gender_is_rejected() {
        assert!(parse(r#"{ "Noun": { "1001": ["x", "Hund", "Hunde", ["dog"]] } }"#).is_err());
    }

    #[test]
    fn empty_meanings_are_rejected() {
        let err = parse(r#"{ "Noun": { "1001": ["m", "Hund", "Hunde", []] } }"#).unwrap_err();
        assert!(err.to_string().contains("meaning"));
    }

    #[test]
    fn duplicate_ids_across_buckets_are_rejected() {
        let content = r#"{
            "Noun": { "1": ["m", "Hund", "Hunde", ["dog"]] },
            "Adjective+preposition": { "1": ["stolz", "auf", "Akkusativ"] }
        }"#;
        assert!(parse(content).is_err());
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(parse("{ not json").is_err());
    }

    #[test]
    fn validation_reports_orphans_and_duplicates() {
        let content = r#"{
            "Noun": { "1001": ["m", "Hund", "Hunde", ["dog", "dog"]] },
            "Adjective+preposition": { "3001": ["stolz", " ", "Akkusativ"] }
        }"#;
        let catalog = parse(content).unwrap();
        let mut records = Records::new();
        records.insert("9999".into(), Record::fresh());

        let warnings = validate_catalog(&catalog, Some(&records));
        assert!(warnings.iter().any(|w| w.message.contains("no Verb items")));
        assert!(warnings
            .iter()
            .any(|w| w.item_id.as_deref() == Some("1001") && w.message.contains("same meaning")));
        assert!(warnings
            .iter()
            .any(|w| w.item_id.as_deref() == Some("3001") && w.message.contains("blank")));
        assert!(warnings
            .iter()
            .any(|w| w.item_id.as_deref() == Some("9999") && w.message.contains("no matching")));
    }

    #[test]
    fn clean_material_has_no_warnings() {
        let catalog = parse(MATERIAL).unwrap();
        assert!(validate_catalog(&catalog, None).is_empty());
    }
}
