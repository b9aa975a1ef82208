use crate::error::{ErrorCode, ScriptError, ValidationResult};
use crate::model::{Script, Step};

pub fn validate_script(script: &Script) -> ValidationResult {
    let mut ctx = ValidationCtx::new();

    validate_version(script, &mut ctx);
    validate_capacity(script, &mut ctx);
    validate_steps(script, &mut ctx);

    ctx.finish()
}

fn validate_version(script: &Script, ctx: &mut ValidationCtx) {
    if script.version != 1 {
        ctx.push(ErrorCode::InvalidVersion, "version must be 1", "version");
    }
}

fn validate_capacity(script: &Script, ctx: &mut ValidationCtx) {
    if script.capacity == 0 {
        ctx.push(
            ErrorCode::InvalidCapacity,
            "capacity must be at least 1",
            "capacity",
        );
    }
}

fn validate_steps(script: &Script, ctx: &mut ValidationCtx) {
    for (index, step) in script.steps.iter().enumerate() {
        let base = format!("steps[{}]", index);

        if step.key().is_some_and(str::is_empty) {
            ctx.push(
                ErrorCode::EmptyKey,
                "key must not be empty",
                format!("{}.key", base),
            );
        }

        let conflicting = match step {
            Step::Get(check) | Step::Peek(check) | Step::Remove(check) => {
                check.found == Some(false) && check.expect.is_some()
            }
            Step::PeekMostRecent(check) | Step::PeekLeastRecent(check) => {
                check.found == Some(false) && check.expect.is_some()
            }
            Step::Insert(_) | Step::Len(_) => false,
        };
        if conflicting {
            ctx.push(
                ErrorCode::ConflictingExpectation,
                "expect cannot be combined with found: false",
                format!("{}.expect", base),
            );
        }
    }
}

struct ValidationCtx {
    errors: Vec<ScriptError>,
}

impl ValidationCtx {
    fn new() -> Self {
        Self { errors: Vec::new() }
    }

    fn push(&mut self, code: ErrorCode, message: &str, path: impl Into<String>) {
        self.errors
            .push(ScriptError::new(code, message).with_path(path));
    }

    fn finish(self) -> ValidationResult {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}
