mod cache;
mod error;
mod list;
mod model;
mod replay;
mod validator;

pub use cache::LruCache;
pub use error::{
    CacheError, CacheErrorKind, ErrorCode, ExpectationMismatch, ReplayError, ReplayErrorKind,
    ScriptError, ValidationResult,
};
pub use list::Iter;
pub use model::{InsertStep, KeyCheck, KeyedCheck, LenCheck, Script, Step};
pub use replay::{replay, replay_with_mismatches};
pub use validator::validate_script;

pub fn parse_script(yaml: &str) -> Result<Script, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}
