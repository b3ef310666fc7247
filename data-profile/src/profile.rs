use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use data_error::ProfileError;

use crate::links::LinkList;
use crate::tags::TagList;

/// Whether the profile is listed publicly.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub enum Visibility {
    #[default]
    Private,
    Public,
}

impl FromStr for Visibility {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Private" => Ok(Visibility::Private),
            "Public" => Ok(Visibility::Public),
            _ => Err(ProfileError::Parse),
        }
    }
}

/// Selects one of the two independent interest lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagGroup {
    Interests,
    Potential,
}

/// The canonical record describing one user's editable personal and
/// business information.
///
/// This is the whole aggregate: form fields, both tag lists, links
/// and visibility live together and are mutated through one entry
/// point, so nothing has to be merged at save time.
///
/// Wire names are camelCase for compatibility with previously
/// persisted data. Field names unknown to the schema are kept
/// verbatim in `extra` and survive a save/load round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub name: String,
    pub lastname: String,
    pub job_title: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub pitch: String,
    pub avatar: Option<String>,
    pub tags: TagList,
    pub potential_tags: TagList,
    pub links: LinkList,
    pub profile_visibility: Visibility,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Profile {
    /// Update one named field. No validation happens at this layer;
    /// unknown field names are accepted and stored verbatim.
    pub fn set_field(&mut self, field: &str, value: &str) {
        match field {
            "name" => self.name = value.to_owned(),
            "lastname" => self.lastname = value.to_owned(),
            "jobTitle" => self.job_title = value.to_owned(),
            "phone" => self.phone = value.to_owned(),
            "email" => self.email = value.to_owned(),
            "address" => self.address = value.to_owned(),
            "pitch" => self.pitch = value.to_owned(),
            "avatar" => {
                self.avatar = if value.is_empty() {
                    None
                } else {
                    Some(value.to_owned())
                }
            }
            "profileVisibility" => {
                // unparsable visibility leaves the field unchanged
                if let Ok(visibility) = value.parse() {
                    self.profile_visibility = visibility;
                }
            }
            // Structured fields must never fall through to `extra`:
            // a text entry there would serialize a duplicate wire key
            // and break the next hydrate.
            "tags" | "potentialTags" | "links" => {
                log::warn!("ignoring text write to list field {}", field);
            }
            _ => {
                self.extra
                    .insert(field.to_owned(), Value::String(value.to_owned()));
            }
        }
    }

    /// Read one named text field back, `extra` included.
    pub fn field_value(&self, field: &str) -> Option<&str> {
        match field {
            "name" => Some(&self.name),
            "lastname" => Some(&self.lastname),
            "jobTitle" => Some(&self.job_title),
            "phone" => Some(&self.phone),
            "email" => Some(&self.email),
            "address" => Some(&self.address),
            "pitch" => Some(&self.pitch),
            "avatar" => self.avatar.as_deref(),
            _ => self.extra.get(field).and_then(Value::as_str),
        }
    }

    pub fn set_avatar(&mut self, data_uri: String) {
        self.avatar = Some(data_uri);
    }

    pub fn tag_list(&self, group: TagGroup) -> &TagList {
        match group {
            TagGroup::Interests => &self.tags,
            TagGroup::Potential => &self.potential_tags,
        }
    }

    pub fn tag_list_mut(&mut self, group: TagGroup) -> &mut TagList {
        match group {
            TagGroup::Interests => &mut self.tags,
            TagGroup::Potential => &mut self.potential_tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_private_and_empty() {
        let profile = Profile::default();
        assert_eq!(profile.profile_visibility, Visibility::Private);
        assert!(profile.tags.is_empty());
        assert!(profile.potential_tags.is_empty());
        assert!(profile.links.is_empty());
        assert_eq!(profile.avatar, None);
    }

    #[test]
    fn wire_names_are_camel_case() {
        let mut profile = Profile::default();
        profile.set_field("jobTitle", "Engineer");
        profile.potential_tags.add();
        profile.potential_tags.commit(0, "ml");

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["jobTitle"], "Engineer");
        assert_eq!(json["potentialTags"][0], "ml");
        assert_eq!(json["profileVisibility"], "Private");
    }

    #[test]
    fn unknown_fields_are_stored_verbatim() {
        let mut profile = Profile::default();
        profile.set_field("nickname", "annie");

        let json = serde_json::to_string(&profile).unwrap();
        let restored: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.field_value("nickname"), Some("annie"));
        assert_eq!(restored, profile);
    }

    #[test]
    fn text_writes_to_list_fields_are_ignored() {
        let mut profile = Profile::default();
        profile.tags.add();
        profile.tags.commit(0, "rust");

        for field in ["tags", "potentialTags", "links"] {
            profile.set_field(field, "sneaky");
        }
        assert_eq!(profile.tags.as_slice(), ["rust".to_owned()]);
        assert!(profile.potential_tags.is_empty());
        assert!(profile.links.is_empty());
        assert!(profile.extra.is_empty());

        // the serialized form stays decodable and round-trips
        let json = serde_json::to_string(&profile).unwrap();
        let restored: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, profile);
    }

    #[test]
    fn partial_json_hydrates_with_defaults() {
        let profile: Profile =
            serde_json::from_str(r#"{"name":"Ann"}"#).unwrap();
        assert_eq!(profile.name, "Ann");
        assert_eq!(profile.profile_visibility, Visibility::Private);
        assert!(profile.links.is_empty());
    }

    #[test]
    fn visibility_parse_is_strict() {
        assert_eq!("Public".parse::<Visibility>().unwrap(), Visibility::Public);
        assert!("public".parse::<Visibility>().is_err());

        let mut profile = Profile::default();
        profile.set_field("profileVisibility", "Public");
        assert_eq!(profile.profile_visibility, Visibility::Public);
        profile.set_field("profileVisibility", "Banana");
        assert_eq!(profile.profile_visibility, Visibility::Public);
    }

    #[test]
    fn clearing_avatar_through_set_field() {
        let mut profile = Profile::default();
        profile.set_avatar("data:image/png;base64,AA==".to_owned());
        assert!(profile.avatar.is_some());
        profile.set_field("avatar", "");
        assert_eq!(profile.avatar, None);
    }
}
