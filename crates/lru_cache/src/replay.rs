use serde_json::{Value as JsonValue, json};

use crate::cache::LruCache;
use crate::error::{ExpectationMismatch, ReplayError, ReplayErrorKind};
use crate::model::{KeyCheck, KeyedCheck, Script, Step};

type ScriptCache = LruCache<String, JsonValue>;

pub fn replay(script: &Script) -> Result<JsonValue, ReplayError> {
    replay_with_mismatches(script).map(|(output, _)| output)
}

pub fn replay_with_mismatches(
    script: &Script,
) -> Result<(JsonValue, Vec<ExpectationMismatch>), ReplayError> {
    if script.version != 1 {
        return Err(ReplayError::new(
            ReplayErrorKind::UnsupportedVersion,
            format!("unsupported script version {}", script.version),
        )
        .with_path("version"));
    }

    let mut cache: ScriptCache =
        LruCache::new(script.capacity).map_err(|err| ReplayError::from(err).with_path("capacity"))?;

    let mut steps = Vec::with_capacity(script.steps.len());
    let mut mismatches = Vec::new();
    for (index, step) in script.steps.iter().enumerate() {
        let mut checker = Checker {
            index,
            base: format!("steps[{}]", index),
            mismatches: &mut mismatches,
        };
        steps.push(apply_step(&mut cache, step, &mut checker));
    }

    let entries: Vec<JsonValue> = cache
        .iter()
        .map(|(key, value)| json!({ "key": key, "value": value }))
        .collect();

    let output = json!({
        "capacity": cache.capacity(),
        "steps": steps,
        "entries": entries,
    });
    Ok((output, mismatches))
}

fn apply_step(cache: &mut ScriptCache, step: &Step, checker: &mut Checker<'_>) -> JsonValue {
    let op = step.op_name();
    match step {
        Step::Insert(insert) => {
            let evicted = evicted_by_insert(cache, &insert.key);
            cache.insert(insert.key.clone(), insert.value.clone());
            json!({ "op": op, "key": insert.key, "evicted": evicted })
        }
        Step::Get(check) => {
            let found = cache.get(check.key.as_str()).cloned();
            keyed_outcome(op, check, found, checker)
        }
        Step::Peek(check) => {
            let found = cache.peek(check.key.as_str()).cloned();
            keyed_outcome(op, check, found, checker)
        }
        Step::Remove(check) => {
            let found = cache.remove(check.key.as_str());
            keyed_outcome(op, check, found, checker)
        }
        Step::PeekMostRecent(check) => {
            let found = cache.peek_most_recent().cloned();
            key_outcome(op, check, found, checker)
        }
        Step::PeekLeastRecent(check) => {
            let found = cache.peek_least_recent().cloned();
            key_outcome(op, check, found, checker)
        }
        Step::Len(check) => {
            let len = cache.len();
            if let Some(expected) = check.expect {
                if expected != len {
                    checker.mismatch(format!("expected len {}, got {}", expected, len), "expect");
                }
            }
            json!({ "op": op, "len": len })
        }
    }
}

fn evicted_by_insert(cache: &ScriptCache, key: &str) -> Option<String> {
    if cache.contains_key(key) || cache.len() < cache.capacity() {
        return None;
    }
    cache.peek_least_recent().cloned()
}

fn keyed_outcome(
    op: &str,
    check: &KeyedCheck,
    found: Option<JsonValue>,
    checker: &mut Checker<'_>,
) -> JsonValue {
    if let Some(expected) = check.found {
        if expected != found.is_some() {
            checker.mismatch(presence_message(&check.key, expected), "found");
        }
    }

    if let Some(expected) = &check.expect {
        match &found {
            Some(actual) if actual == expected => {}
            Some(actual) => checker.mismatch(
                format!("expected value {} for key `{}`, got {}", expected, check.key, actual),
                "expect",
            ),
            None => checker.mismatch(
                format!("expected value {} for key `{}`, key is absent", expected, check.key),
                "expect",
            ),
        }
    }

    json!({
        "op": op,
        "key": check.key,
        "found": found.is_some(),
        "value": found,
    })
}

fn key_outcome(
    op: &str,
    check: &KeyCheck,
    found: Option<String>,
    checker: &mut Checker<'_>,
) -> JsonValue {
    if let Some(expected) = check.found {
        if expected != found.is_some() {
            let message = if expected {
                "expected a key, cache is empty".to_string()
            } else {
                format!("expected no key, got `{}`", found.as_deref().unwrap_or_default())
            };
            checker.mismatch(message, "found");
        }
    }

    if let Some(expected) = &check.expect {
        match found.as_deref() {
            Some(actual) if actual == expected => {}
            Some(actual) => checker.mismatch(
                format!("expected key `{}`, got `{}`", expected, actual),
                "expect",
            ),
            None => checker.mismatch(
                format!("expected key `{}`, cache is empty", expected),
                "expect",
            ),
        }
    }

    json!({
        "op": op,
        "found": found.is_some(),
        "key": found,
    })
}

fn presence_message(key: &str, expected_present: bool) -> String {
    if expected_present {
        format!("expected key `{}` to be present", key)
    } else {
        format!("expected key `{}` to be absent", key)
    }
}

struct Checker<'a> {
    index: usize,
    base: String,
    mismatches: &'a mut Vec<ExpectationMismatch>,
}

impl Checker<'_> {
    fn mismatch(&mut self, message: String, field: &str) {
        self.mismatches.push(ExpectationMismatch::new(
            self.index,
            message,
            format!("{}.{}", self.base, field),
        ));
    }
}
