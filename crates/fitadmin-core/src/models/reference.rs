use serde::{Deserialize, Serialize};

/// A related document that the backend may or may not have populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ref<T> {
    Populated(Box<T>),
    Id(String),
}

impl<T> Ref<T> {
    pub fn populated(&self) -> Option<&T> {
        match self {
            Ref::Populated(doc) => Some(doc),
            Ref::Id(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    #[test]
    fn test_accepts_id_or_document() {
        let id: Ref<User> = serde_json::from_str(r#""64f0c2""#).unwrap();
        assert!(matches!(id, Ref::Id(ref s) if s == "64f0c2"));
        assert!(id.populated().is_none());

        let doc: Ref<User> = serde_json::from_str(r#"{"_id":"64f0c2","name":"Dana"}"#).unwrap();
        assert_eq!(doc.populated().and_then(|u| u.name.as_deref()), Some("Dana"));
    }
}
