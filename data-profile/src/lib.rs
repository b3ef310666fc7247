pub mod avatar;
pub mod links;
pub mod profile;
pub mod rules;
pub mod tags;

pub use avatar::{encode_data_uri, AvatarError, MAX_AVATAR_BYTES};
pub use links::{LinkEntry, LinkField, LinkList, LinkWarning, MAX_LINKS};
pub use profile::{Profile, TagGroup, Visibility};
pub use rules::{validate_field, validate_profile, ValidationError};
pub use tags::{TagCommit, TagList, MAX_TAGS};
